//! Top-level domain membership.
//!
//! A [`TldStore`] can only be obtained from an initialization call, so there
//! is no way to query a store that was never loaded. The usual source is the
//! IANA registry file:
//!
//! ```text
//! wget -O tlds.txt https://data.iana.org/TLD/tlds-alpha-by-domain.txt
//! ```
//!
//! Lines are trimmed; blank lines and lines starting with `#` are skipped.
//! Entries are stored upper-cased and lookups are case-insensitive.

use crate::error::{Error, Result};
use std::collections::HashSet;
use std::io::BufRead;
use std::path::Path;
use tracing::{debug, warn};

/// Set of recognized top-level domains
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TldStore {
    members: HashSet<String>,
}

impl TldStore {
    /// Builds a store from an iterator of lines
    pub fn from_lines<I, S>(lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self {
            members: parse_lines(lines)?,
        })
    }

    /// Builds a store from newline-delimited text
    pub fn from_text(text: &str) -> Result<Self> {
        Self::from_lines(text.lines())
    }

    /// Builds a store from a buffered reader
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let lines = reader
            .lines()
            .collect::<std::io::Result<Vec<_>>>()
            .map_err(|e| Error::tld_read("<reader>", e))?;
        Self::from_lines(lines)
    }

    /// Builds a store from a file on disk
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::tld_read(path, e))?;
        let store = Self::from_text(&text)?;
        debug!("Loaded {} TLDs from {}", store.len(), path.display());
        Ok(store)
    }

    /// Replaces the member set with the entries in `lines`.
    ///
    /// Returns `Ok(true)` if the new set is non-empty. On error the previous
    /// members are kept.
    pub fn initialize<I, S>(&mut self, lines: I) -> Result<bool>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.members = parse_lines(lines)?;
        Ok(!self.is_empty())
    }

    /// Checks whether the last label of `domain` is a known TLD.
    ///
    /// Returns false if `domain` has no dot or ends with one.
    pub fn contains(&self, domain: &str) -> bool {
        match domain.rfind('.') {
            Some(pos) => {
                let tld = &domain[pos + 1..];
                !tld.is_empty() && self.members.contains(&tld.to_ascii_uppercase())
            }
            None => false,
        }
    }

    /// Number of TLDs in the store
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns true if the store holds no TLDs
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Iterates over the stored (upper-case) TLDs in no particular order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(String::as_str)
    }
}

fn parse_lines<I, S>(lines: I) -> Result<HashSet<String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut members = HashSet::new();

    for (i, line) in lines.into_iter().enumerate() {
        let entry = line.as_ref().trim();
        if entry.is_empty() || entry.starts_with('#') {
            continue;
        }
        if !entry.is_ascii() {
            return Err(Error::non_ascii_tld(i + 1, entry));
        }
        members.insert(entry.to_ascii_uppercase());
    }

    if members.is_empty() {
        warn!("TLD list contained no entries, every TLD lookup will fail");
    }

    Ok(members)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_comments_and_blanks_skipped() {
        let store = TldStore::from_text("# comment\nCOM\nORG\n").unwrap();
        assert_eq!(store.len(), 2);

        let mut tlds: Vec<_> = store.iter().collect();
        tlds.sort_unstable();
        assert_eq!(tlds, vec!["COM", "ORG"]);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let store = TldStore::from_text("com\n  De  \n").unwrap();
        assert!(store.contains("example.com"));
        assert!(store.contains("EXAMPLE.COM"));
        assert!(store.contains("www.domain.de"));
        assert!(!store.contains("www.domain.eu"));
    }

    #[test]
    fn test_lookup_edge_cases() {
        let store = TldStore::from_text("COM").unwrap();
        assert!(!store.contains("com"));
        assert!(!store.contains("example.com."));
        assert!(!store.contains(""));
        assert!(store.contains(".com"));
    }

    #[test]
    fn test_non_ascii_line_fails() {
        let err = TldStore::from_text("COM\n# ünïcode comments are skipped\nBÜCHER\n");
        assert!(matches!(err, Err(Error::NonAsciiTld { line: 3, .. })));
    }

    #[test]
    fn test_empty_list() {
        let mut store = TldStore::from_text("# nothing here\n\n").unwrap();
        assert!(store.is_empty());
        assert!(!store.contains("example.com"));

        assert!(store.initialize(["NET"]).unwrap());
        assert!(store.contains("example.net"));
    }

    #[test]
    fn test_reinitialize_replaces_members() {
        let mut store = TldStore::from_lines(["COM", "ORG"]).unwrap();
        assert!(!store.initialize(["# only a comment"]).unwrap());
        assert!(store.is_empty());

        store.initialize(["DE"]).unwrap();
        assert!(store.contains("domain.de"));
        assert!(!store.contains("example.com"));
    }

    #[test]
    fn test_failed_reinitialize_keeps_members() {
        let mut store = TldStore::from_lines(["COM"]).unwrap();
        assert!(store.initialize(["ORG", "日本"]).is_err());
        assert!(store.contains("example.com"));
        assert!(!store.contains("example.org"));
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# Version 2024010100").unwrap();
        writeln!(file, "COM").unwrap();
        writeln!(file, "DE").unwrap();
        writeln!(file, "XN--PUNYCODEY2342").unwrap();

        let store = TldStore::from_path(file.path()).unwrap();
        assert_eq!(store.len(), 3);
        assert!(store.contains("test.xn--punycodey2342"));
    }

    #[test]
    fn test_from_path_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = TldStore::from_path(dir.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, Error::TldRead { .. }));
    }

    #[test]
    fn test_from_reader() {
        let store = TldStore::from_reader("COM\r\nNET\r\n".as_bytes()).unwrap();
        assert!(store.contains("example.net"));
        assert_eq!(store.len(), 2);
    }
}
