//! Public/non-public classification of IP addresses.
//!
//! [`validate_ip`] is the policy check: loopback, unspecified and any address
//! inside the [`NON_PUBLIC`] table are rejected. [`ip_scope`] gives a finer
//! reason for callers that want to report multicast or link-local addresses
//! separately.

use crate::error::ValidationError;
use crate::network::{NON_PUBLIC, PRIVATE};
use std::net::{IpAddr, Ipv6Addr};

/// Checks that `addr` is a public address.
///
/// Returns [`ValidationError::IsLoopback`], [`ValidationError::IsUnspecified`]
/// or [`ValidationError::NotPublic`] otherwise.
pub fn validate_ip(addr: &IpAddr) -> Result<(), ValidationError> {
    if addr.is_loopback() {
        return Err(ValidationError::IsLoopback);
    }
    if addr.is_unspecified() {
        return Err(ValidationError::IsUnspecified);
    }
    if NON_PUBLIC.contains(addr) {
        return Err(ValidationError::NotPublic);
    }
    Ok(())
}

/// Returns true if `addr` lies in a private-use block
pub fn is_private(addr: &IpAddr) -> bool {
    PRIVATE.contains(addr)
}

/// Returns the most specific reason `addr` is not public, or `None` if it is.
///
/// An address rejected by [`validate_ip`] always yields `Some`.
pub fn ip_scope(addr: &IpAddr) -> Option<ValidationError> {
    match validate_ip(addr) {
        Ok(()) => return None,
        Err(ValidationError::NotPublic) => {}
        Err(err) => return Some(err),
    }

    let scope = match addr {
        IpAddr::V4(v4) if v4.is_multicast() => ValidationError::IsLinkLocalMulticast,
        IpAddr::V4(v4) if v4.is_link_local() => ValidationError::IsLinkLocalUnicast,
        IpAddr::V6(v6) if v6.is_multicast() => v6_multicast_scope(v6),
        IpAddr::V6(v6) if is_v6_link_local(v6) => ValidationError::IsLinkLocalUnicast,
        _ if is_private(addr) => ValidationError::IsPrivate,
        _ => ValidationError::NotPublic,
    };
    Some(scope)
}

/// Multicast scope from the low nibble of the second byte (RFC 4291 2.7)
fn v6_multicast_scope(addr: &Ipv6Addr) -> ValidationError {
    match addr.segments()[0] & 0x000f {
        0x1 => ValidationError::IsInterfaceLocalMulticast,
        0x2 => ValidationError::IsLinkLocalMulticast,
        _ => ValidationError::IsMulticast,
    }
}

fn is_v6_link_local(addr: &Ipv6Addr) -> bool {
    addr.segments()[0] & 0xffc0 == 0xfe80
}
