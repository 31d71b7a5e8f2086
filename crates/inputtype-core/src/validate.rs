//! Policy checks on classified input.
//!
//! A [`Validator`] borrows a loaded [`TldStore`]; domain and email checks need
//! it, IP and file checks do not but are exposed here too so callers have one
//! entry point.

use crate::detect::ClassifiedInput;
use crate::domain::{is_ascii, is_domain_name};
use crate::email::{is_valid_local_part, EmailAddress, EmailHost};
use crate::error::ValidationError;
use crate::tld::TldStore;
use std::net::IpAddr;
use std::path::Path;
use tracing::debug;

/// Validates classified values against a TLD store
#[derive(Debug, Clone, Copy)]
pub struct Validator<'a> {
    tlds: &'a TldStore,
}

impl<'a> Validator<'a> {
    /// Creates a validator backed by `tlds`
    pub fn new(tlds: &'a TldStore) -> Self {
        Self { tlds }
    }

    /// The TLD store in use
    pub fn tlds(&self) -> &'a TldStore {
        self.tlds
    }

    /// Checks the grammar and TLD of `domain`
    pub fn validate_domain(&self, domain: &str) -> Result<(), ValidationError> {
        if !is_ascii(domain) {
            return Err(ValidationError::NonAsciiCharacters);
        }
        if !is_domain_name(domain) {
            return Err(ValidationError::InvalidDomain);
        }
        if !self.tlds.contains(domain) {
            debug!("Unregistered TLD in {}", domain);
            return Err(ValidationError::InvalidTld);
        }
        Ok(())
    }

    /// Checks the local part, then the domain or literal IP of `email`
    pub fn validate_email(&self, email: &EmailAddress) -> Result<(), ValidationError> {
        if !is_valid_local_part(email.local_part()) {
            return Err(ValidationError::InvalidEmail);
        }
        match email.host() {
            EmailHost::Domain(domain) => self.validate_domain(domain),
            EmailHost::Literal(ip) => self.validate_ip(ip),
        }
    }

    /// See [`crate::ip::validate_ip`]
    pub fn validate_ip(&self, addr: &IpAddr) -> Result<(), ValidationError> {
        crate::ip::validate_ip(addr)
    }

    /// See [`crate::file::validate_file`]
    pub fn validate_file(&self, path: impl AsRef<Path>) -> Result<(), ValidationError> {
        crate::file::validate_file(path)
    }

    /// Runs the check matching the kind of `input`.
    ///
    /// Networks have no policy and always pass; `Unknown` and `Empty` fail
    /// with their own error.
    pub fn validate(&self, input: &ClassifiedInput) -> Result<(), ValidationError> {
        match input {
            ClassifiedInput::Domain(domain) => self.validate_domain(domain),
            ClassifiedInput::Email(email) => self.validate_email(email),
            ClassifiedInput::Ip(ip) => self.validate_ip(ip),
            ClassifiedInput::IpNetwork(_) => Ok(()),
            ClassifiedInput::File(path) => self.validate_file(path),
            ClassifiedInput::Unknown => Err(ValidationError::UnknownType),
            ClassifiedInput::Empty => Err(ValidationError::EmptyInput),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::{Detector, DetectorConfig};
    use crate::email::parse_email;
    use pretty_assertions::assert_eq;

    fn store() -> TldStore {
        TldStore::from_text(
            "
            # some sample tlds
            COM
            DE
            XN--PUNYCODEY2342
            ",
        )
        .unwrap()
    }

    #[test]
    fn test_validate_domain() {
        let tlds = store();
        let validator = Validator::new(&tlds);

        assert_eq!(validator.validate_domain("www.domain.de"), Ok(()));
        assert_eq!(validator.validate_domain("yet-another-domain.com"), Ok(()));
        assert_eq!(validator.validate_domain("a.xn--punycodey2342"), Ok(()));
        assert_eq!(validator.validate_domain("www.domain.eu"), Err(ValidationError::InvalidTld));
        assert_eq!(validator.validate_domain("-bad.com"), Err(ValidationError::InvalidDomain));
        assert_eq!(validator.validate_domain("localhost"), Err(ValidationError::InvalidDomain));
        assert_eq!(
            validator.validate_domain("bücher.de"),
            Err(ValidationError::NonAsciiCharacters)
        );
    }

    #[test]
    fn test_validate_email() {
        let tlds = store();
        let validator = Validator::new(&tlds);

        let ok = parse_email("Max Musterman <max@musterman.com>").unwrap();
        assert_eq!(validator.validate_email(&ok), Ok(()));
        assert_eq!(ok.validate(&validator), Ok(()));

        let bad_tld = parse_email("somename@invalidtld.eu").unwrap();
        assert_eq!(validator.validate_email(&bad_tld), Err(ValidationError::InvalidTld));

        let bad_local = parse_email("john doe@example.com").unwrap();
        assert_eq!(validator.validate_email(&bad_local), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn test_validate_email_literal_ip() {
        let tlds = store();
        let validator = Validator::new(&tlds);

        let public = parse_email("tester@[53.24.88.19]").unwrap();
        assert_eq!(validator.validate_email(&public), Ok(()));

        let private = parse_email("tester@[192.168.0.10]").unwrap();
        assert_eq!(validator.validate_email(&private), Err(ValidationError::NotPublic));

        let loopback = EmailAddress::with_literal_ip("", "root", "127.0.0.1".parse().unwrap());
        assert_eq!(validator.validate_email(&loopback), Err(ValidationError::IsLoopback));
    }

    #[test]
    fn test_validate_constructed_email_domain() {
        let tlds = store();
        let validator = Validator::new(&tlds);

        let email = EmailAddress::with_domain("", "user", "nodomain-.com");
        assert_eq!(validator.validate_email(&email), Err(ValidationError::InvalidDomain));
    }

    #[test]
    fn test_validate_classified() {
        let tlds = store();
        let validator = Validator::new(&tlds);
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("sample"), b"data").unwrap();
        let detector = Detector::with_config(DetectorConfig::new().staging_root(dir.path()));

        let cases = [
            ("example.com", Ok(())),
            ("www.domain.eu", Err(ValidationError::InvalidTld)),
            ("8.8.8.8", Ok(())),
            ("127.0.0.1", Err(ValidationError::IsLoopback)),
            ("10.1.2.3", Err(ValidationError::NotPublic)),
            ("fe80::1%eth0", Err(ValidationError::NotPublic)),
            ("10.0.0.0/8", Ok(())),
            ("peter@parker.com", Ok(())),
            ("sample", Ok(())),
            ("", Err(ValidationError::EmptyInput)),
            ("no such thing", Err(ValidationError::UnknownType)),
        ];

        for (input, expected) in cases {
            let classified = detector.detect(input);
            assert_eq!(validator.validate(&classified), expected, "{input:?}");
        }
    }
}
