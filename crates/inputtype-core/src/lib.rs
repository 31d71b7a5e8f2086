//! # inputtype-core
//!
//! Classification and validation of untrusted observables.
//!
//! Given an arbitrary string (or integer), this crate works out whether it is
//! a domain name, an email address, an IP address, a CIDR network or a
//! reference to a staged file, and applies the policy checks for that type:
//! registered TLD, well-formed local part, public address, readable file.
//!
//! ## Architecture
//!
//! - [`detect`]: ordered shape detection producing a [`ClassifiedInput`]
//! - [`validate`]: policy checks through a [`Validator`]
//! - [`domain`]: domain name grammar
//! - [`email`]: email address parsing
//! - [`ip`]: public/non-public address classification
//! - [`network`]: CIDR networks and the static range tables
//! - [`tld`]: the top-level domain store
//! - [`file`]: staged file resolution and checks
//! - [`error`]: error types
//!
//! ## Example
//!
//! ```
//! use inputtype_core::{ClassifiedInput, Detector, TldStore, ValidationError, Validator};
//!
//! let tlds = TldStore::from_text("# IANA list\nCOM\nORG\n")?;
//! let validator = Validator::new(&tlds);
//! let detector = Detector::new();
//!
//! let input = detector.detect("www.example.com");
//! assert!(matches!(input, ClassifiedInput::Domain(_)));
//! assert_eq!(validator.validate(&input), Ok(()));
//!
//! let input = detector.detect("10.1.2.3");
//! assert_eq!(validator.validate(&input), Err(ValidationError::NotPublic));
//! # Ok::<(), inputtype_core::Error>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unreachable_pub)]

pub mod detect;
pub mod domain;
pub mod email;
pub mod error;
pub mod file;
pub mod ip;
pub mod network;
pub mod tld;
pub mod validate;

// Re-export primary types for convenience
pub use detect::{detect, ClassifiedInput, Detector, DetectorConfig, Input, InputType};
pub use domain::{is_ascii, is_domain_name};
pub use email::{parse_email, EmailAddress, EmailHost};
pub use error::{Error, Result, ValidationError};
pub use file::validate_file;
pub use ip::{ip_scope, validate_ip};
pub use network::{IpNetwork, RangeTable};
pub use tld::TldStore;
pub use validate::Validator;

/// Crate version for programmatic access
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
