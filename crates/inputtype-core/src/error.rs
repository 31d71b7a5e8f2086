//! Error types for the inputtype-core library.
//!
//! Two families are kept apart:
//!
//! - [`Error`] covers operational failures (reading a TLD list, decoding byte
//!   input, parsing a network literal). These are returned through [`Result`].
//! - [`ValidationError`] is the taxonomy of expected-invalid input. Detection
//!   and the validators hand these back as plain values so callers can map them
//!   to their own responses.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for inputtype operations
pub type Result<T> = std::result::Result<T, Error>;

/// Operational error type for inputtype operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Failed to read a TLD list
    #[error("failed to read TLD list '{path}': {source}")]
    TldRead {
        /// Path (or a placeholder for in-memory readers) of the TLD source
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A TLD list line contained non-ASCII characters
    #[error("TLD list contains non-ascii entry on line {line}: '{value}'")]
    NonAsciiTld {
        /// 1-based line number in the source
        line: usize,
        /// The offending entry after trimming
        value: String,
    },

    /// Byte input was not valid UTF-8 text
    #[error("input is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    /// Malformed CIDR network literal
    #[error("invalid network '{input}': {details}")]
    InvalidNetwork {
        /// The literal that failed to parse
        input: String,
        /// Detailed description of the issue
        details: String,
    },
}

impl Error {
    /// Creates a new TLD read error
    pub fn tld_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::TldRead {
            path: path.into(),
            source,
        }
    }

    /// Creates a new non-ASCII TLD error
    pub fn non_ascii_tld(line: usize, value: impl Into<String>) -> Self {
        Self::NonAsciiTld {
            line,
            value: value.into(),
        }
    }

    /// Creates a new invalid network error
    pub fn invalid_network(input: impl Into<String>, details: impl Into<String>) -> Self {
        Self::InvalidNetwork {
            input: input.into(),
            details: details.into(),
        }
    }
}

/// Reasons an input fails detection or validation.
///
/// None of these are fatal; they describe why an observable was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ValidationError {
    /// Input was empty (or zero)
    #[error("Empty Input String")]
    EmptyInput,

    /// Input did not match any known type
    #[error("Unknown Type")]
    UnknownType,

    /// Input contained characters outside the ASCII range
    #[error("Non-ASCII Characters")]
    NonAsciiCharacters,

    /// Domain failed the grammar check
    #[error("Invalid Domain")]
    InvalidDomain,

    /// Domain's top-level label is not a registered TLD
    #[error("Invalid TLD")]
    InvalidTld,

    /// Email local part is malformed
    #[error("Invalid Email")]
    InvalidEmail,

    /// File does not exist or is a directory
    #[error("File Not Found")]
    FileNotFound,

    /// File exists but cannot be read
    #[error("File Access Denied")]
    FileAccessDenied,

    /// Address is a loopback address
    #[error("Loopback IP")]
    IsLoopback,

    /// Address is a multicast address
    #[error("Multicast IP")]
    IsMulticast,

    /// Address is the all-zero address
    #[error("Unspecified IP")]
    IsUnspecified,

    /// Address is an interface-local multicast address
    #[error("Interface Local Multicast IP")]
    IsInterfaceLocalMulticast,

    /// Address is a link-local multicast address
    #[error("Link Local Multicast IP")]
    IsLinkLocalMulticast,

    /// Address is a link-local unicast address
    #[error("Link Local Unicast IP")]
    IsLinkLocalUnicast,

    /// Address belongs to a private-use block
    #[error("Private IP")]
    IsPrivate,

    /// Address belongs to some other non-public block
    #[error("Non-Public IP")]
    NotPublic,

    /// Any other I/O condition hit while checking a file
    #[error("I/O Error: {0}")]
    Io(std::io::ErrorKind),
}

impl ValidationError {
    /// Returns true for the address-scope variants
    pub fn is_ip_error(&self) -> bool {
        matches!(
            self,
            Self::IsLoopback
                | Self::IsMulticast
                | Self::IsUnspecified
                | Self::IsInterfaceLocalMulticast
                | Self::IsLinkLocalMulticast
                | Self::IsLinkLocalUnicast
                | Self::IsPrivate
                | Self::NotPublic
        )
    }
}
