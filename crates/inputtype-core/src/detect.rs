//! Input type detection.
//!
//! [`Detector::detect`] classifies raw input by trying, in order:
//!
//! 1. an IP address literal (integers are taken as numeric addresses,
//!    below 2^32 as IPv4)
//! 2. a CIDR network, with host bits masked
//! 3. a domain name
//! 4. an email address
//! 5. an existing file below the staging root
//!
//! The first match wins. Detection is about shape only: a domain with an
//! unknown TLD or a private IP is still classified as such. Use
//! [`Validator`](crate::Validator) for policy checks.

use crate::domain::{is_ascii, is_domain_name};
use crate::email::{parse_email, EmailAddress};
use crate::error::{Result, ValidationError};
use crate::file::resolve_staged_path;
use crate::network::IpNetwork;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::path::PathBuf;
use tracing::{debug, trace};

/// Staging directory used when none is configured
pub const DEFAULT_STAGING_ROOT: &str = "/tmp";

/// Raw input accepted by the detector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input<'a> {
    /// Decoded text
    Text(&'a str),
    /// An address in numeric form
    Integer(u128),
}

impl<'a> Input<'a> {
    /// Decodes byte input as UTF-8 text.
    ///
    /// Fails with [`Error::InvalidUtf8`](crate::Error::InvalidUtf8) if the
    /// bytes are not text.
    pub fn from_bytes(bytes: &'a [u8]) -> Result<Self> {
        Ok(Self::Text(std::str::from_utf8(bytes)?))
    }

    /// Returns true for empty text and zero
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.is_empty(),
            Self::Integer(n) => *n == 0,
        }
    }
}

impl<'a> From<&'a str> for Input<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a String> for Input<'a> {
    fn from(text: &'a String) -> Self {
        Self::Text(text)
    }
}

impl From<u32> for Input<'_> {
    fn from(n: u32) -> Self {
        Self::Integer(u128::from(n))
    }
}

impl From<u64> for Input<'_> {
    fn from(n: u64) -> Self {
        Self::Integer(u128::from(n))
    }
}

impl From<u128> for Input<'_> {
    fn from(n: u128) -> Self {
        Self::Integer(n)
    }
}

/// Kind of a classified input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputType {
    /// Domain name
    Domain,
    /// Email address
    Email,
    /// Single IP address
    Ip,
    /// CIDR network
    IpNetwork,
    /// File below the staging root
    File,
    /// Nothing matched
    Unknown,
    /// Empty input
    Empty,
}

impl InputType {
    /// Returns the display name of this type
    pub fn as_str(&self) -> &'static str {
        match self {
            InputType::Domain => "Domain",
            InputType::Email => "Email",
            InputType::Ip => "IP",
            InputType::IpNetwork => "IPNet",
            InputType::File => "File",
            InputType::Unknown => "Unknown",
            InputType::Empty => "Empty",
        }
    }
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of classifying one input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedInput {
    /// The input text, unchanged
    Domain(String),
    /// Parsed email address
    Email(EmailAddress),
    /// Parsed IP address
    Ip(IpAddr),
    /// Parsed network with host bits cleared
    IpNetwork(IpNetwork),
    /// Resolved path of an existing file
    File(PathBuf),
    /// No type matched
    Unknown,
    /// Input was empty
    Empty,
}

impl ClassifiedInput {
    /// Returns the kind of this classification
    pub fn kind(&self) -> InputType {
        match self {
            Self::Domain(_) => InputType::Domain,
            Self::Email(_) => InputType::Email,
            Self::Ip(_) => InputType::Ip,
            Self::IpNetwork(_) => InputType::IpNetwork,
            Self::File(_) => InputType::File,
            Self::Unknown => InputType::Unknown,
            Self::Empty => InputType::Empty,
        }
    }

    /// Error kind carried by `Unknown` and `Empty`
    pub fn error(&self) -> Option<ValidationError> {
        match self {
            Self::Unknown => Some(ValidationError::UnknownType),
            Self::Empty => Some(ValidationError::EmptyInput),
            _ => None,
        }
    }

    /// Returns true if a type was detected
    pub fn is_known(&self) -> bool {
        self.error().is_none()
    }
}

impl fmt::Display for ClassifiedInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(domain) => f.write_str(domain),
            Self::Email(email) => write!(f, "{}", email),
            Self::Ip(ip) => write!(f, "{}", ip),
            Self::IpNetwork(net) => write!(f, "{}", net),
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Unknown | Self::Empty => write!(f, "{}", self.kind()),
        }
    }
}

/// Configuration for the detector
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    /// Directory that file references are resolved against
    pub staging_root: PathBuf,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            staging_root: PathBuf::from(DEFAULT_STAGING_ROOT),
        }
    }
}

impl DetectorConfig {
    /// Creates a new detector config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the staging root
    pub fn staging_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.staging_root = root.into();
        self
    }
}

/// Classifies raw input by shape
#[derive(Debug, Clone, Default)]
pub struct Detector {
    config: DetectorConfig,
}

impl Detector {
    /// Creates a new detector with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new detector with custom configuration
    pub fn with_config(config: DetectorConfig) -> Self {
        Self { config }
    }

    /// Returns the active configuration
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Classifies `input`. Calling this twice on the same input gives the
    /// same answer as long as the staging directory is unchanged.
    pub fn detect<'a>(&self, input: impl Into<Input<'a>>) -> ClassifiedInput {
        let input = input.into();
        if input.is_empty() {
            debug!("Empty input");
            return ClassifiedInput::Empty;
        }

        let classified = match input {
            Input::Integer(n) => ClassifiedInput::Ip(ip_from_integer(n)),
            Input::Text(text) => self.detect_text(text),
        };

        debug!("Classified input as {}", classified.kind());
        classified
    }

    fn detect_text(&self, text: &str) -> ClassifiedInput {
        if let Some(ip) = parse_ip(text) {
            return ClassifiedInput::Ip(ip);
        }
        trace!("Not an IP address: {:?}", text);

        if let Ok(net) = text.parse::<IpNetwork>() {
            return ClassifiedInput::IpNetwork(net);
        }
        trace!("Not a network: {:?}", text);

        if is_ascii(text) && is_domain_name(text) {
            return ClassifiedInput::Domain(text.to_string());
        }
        trace!("Not a domain: {:?}", text);

        if let Some(email) = parse_email(text) {
            return ClassifiedInput::Email(email);
        }
        trace!("Not an email: {:?}", text);

        let path = resolve_staged_path(&self.config.staging_root, text);
        if path.is_file() {
            return ClassifiedInput::File(path);
        }
        trace!("Not a staged file: {}", path.display());

        ClassifiedInput::Unknown
    }
}

/// Parses an address literal. A zone on an IPv6 address (`fe80::1%eth0`) is
/// accepted and dropped.
fn parse_ip(text: &str) -> Option<IpAddr> {
    if let Ok(ip) = text.parse::<IpAddr>() {
        return Some(ip);
    }

    let (addr, zone) = text.split_once('%')?;
    if zone.is_empty() || zone.contains('%') {
        return None;
    }
    let ip = addr.parse::<Ipv6Addr>().ok()?;
    trace!("Dropping zone {:?} from {}", zone, ip);
    Some(IpAddr::V6(ip))
}

/// Numeric address: IPv4 below 2^32, IPv6 otherwise
fn ip_from_integer(n: u128) -> IpAddr {
    match u32::try_from(n) {
        Ok(v4) => IpAddr::V4(Ipv4Addr::from(v4)),
        Err(_) => IpAddr::V6(Ipv6Addr::from(n)),
    }
}

/// Classifies `input` with the default configuration
pub fn detect<'a>(input: impl Into<Input<'a>>) -> ClassifiedInput {
    Detector::new().detect(input)
}
