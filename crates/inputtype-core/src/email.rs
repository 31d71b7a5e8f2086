//! Email address parsing.
//!
//! Accepts a bare address (`peter@parker.com`), an address with a display
//! name (`Peter Parker <peter@parker.com>`) and addresses whose domain is a
//! bracketed IP literal (`tester@[53.24.88.19]`).
//!
//! Parsing only establishes the shape. Policy checks (local-part grammar,
//! registered TLD, public IP) are done by
//! [`Validator::validate_email`](crate::Validator::validate_email).

use crate::domain::is_domain_name;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::net::IpAddr;

/// Local part grammar: a dot-atom or a quoted string
static LOCAL_PART: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)^[-!#$%&'*+/=?^_`{}|~0-9A-Z]+(\.[-!#$%&'*+/=?^_`{}|~0-9A-Z]+)*$",
        r#"|^"([\x01-\x08\x0B\x0C\x0E-\x1F!#-\[\]-\x7F]|\\[\x01-\x09\x0B\x0C\x0E-\x7F])*"$"#,
    ))
    .expect("valid local part regex")
});

/// Where an address is delivered: a domain name or a literal IP
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EmailHost {
    /// `user@example.com`
    Domain(String),
    /// `user@[192.0.2.1]`
    Literal(IpAddr),
}

/// A parsed email address
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress {
    display_name: String,
    local_part: String,
    host: EmailHost,
}

impl EmailAddress {
    /// Creates an address delivered to a domain
    pub fn with_domain(
        display_name: impl Into<String>,
        local_part: impl Into<String>,
        domain: impl Into<String>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            local_part: local_part.into(),
            host: EmailHost::Domain(domain.into()),
        }
    }

    /// Creates an address delivered to a literal IP
    pub fn with_literal_ip(
        display_name: impl Into<String>,
        local_part: impl Into<String>,
        ip: IpAddr,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            local_part: local_part.into(),
            host: EmailHost::Literal(ip),
        }
    }

    /// Display name, empty if none was given
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Part before the last `@`
    pub fn local_part(&self) -> &str {
        &self.local_part
    }

    /// The host part
    pub fn host(&self) -> &EmailHost {
        &self.host
    }

    /// Domain, if the host is not an IP literal
    pub fn domain(&self) -> Option<&str> {
        match &self.host {
            EmailHost::Domain(domain) => Some(domain),
            EmailHost::Literal(_) => None,
        }
    }

    /// Literal IP, if the host was written as `[addr]`
    pub fn literal_ip(&self) -> Option<IpAddr> {
        match self.host {
            EmailHost::Literal(ip) => Some(ip),
            EmailHost::Domain(_) => None,
        }
    }

    /// The address without display name
    pub fn address(&self) -> String {
        match &self.host {
            EmailHost::Domain(domain) => format!("{}@{}", self.local_part, domain),
            EmailHost::Literal(ip) => format!("{}@[{}]", self.local_part, ip),
        }
    }

    /// Runs the full policy check against `validator`
    pub fn validate(
        &self,
        validator: &crate::Validator<'_>,
    ) -> std::result::Result<(), crate::ValidationError> {
        validator.validate_email(self)
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.display_name.is_empty() {
            write!(f, "{}", self.address())
        } else {
            write!(f, "{} <{}>", self.display_name, self.address())
        }
    }
}

/// Parses `text` as an email address.
///
/// Returns `None` if it does not look like one: no `@`, non-ASCII address,
/// or a host that is neither a domain name nor a bracketed IP.
pub fn parse_email(text: &str) -> Option<EmailAddress> {
    let mut display_name = "";
    let mut address = text;

    if text.ends_with('>') {
        if let Some(pos) = text.rfind('<') {
            display_name = text[..pos].trim();
            address = text[pos + 1..text.len() - 1].trim();
        }
    }

    let (local_part, host) = address.rsplit_once('@')?;
    if !address.is_ascii() {
        return None;
    }

    if is_domain_name(host) {
        return Some(EmailAddress::with_domain(display_name, local_part, host));
    }

    let literal = host.strip_prefix('[')?.strip_suffix(']')?;
    let ip = literal.parse::<IpAddr>().ok()?;
    Some(EmailAddress::with_literal_ip(display_name, local_part, ip))
}

/// Checks the local part against the dot-atom / quoted-string grammar
pub fn is_valid_local_part(local_part: &str) -> bool {
    local_part.is_ascii() && LOCAL_PART.is_match(local_part)
}
