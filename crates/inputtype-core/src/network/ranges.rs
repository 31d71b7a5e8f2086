//! Static address-range tables.
//!
//! The CIDR literals below are shared with existing deployments and must stay
//! byte-for-byte as listed, including the duplicated link-local entry.
//!
//! Sources:
//! - IPv4: RFC 6890 and the IANA IPv4 special-purpose registry
//! - IPv6: RFC 4291 and the IANA IPv6 special-purpose registry

use super::RangeTable;
use once_cell::sync::Lazy;

/// Private-use IPv4 networks (RFC 1918)
pub const IPV4_PRIVATE: &[&str] = &["10.0.0.0/8", "172.16.0.0/12", "192.168.0.0/16"];

/// Non-public IPv4 networks, excluding the private-use blocks
pub const IPV4_NON_PUBLIC: &[&str] = &[
    "0.0.0.0/8",          // this host on this network
    "127.0.0.0/8",        // loopback
    "169.254.0.0/16",     // link-local
    "100.64.0.0/10",      // shared address space (RFC 6598)
    "192.0.0.0/24",       // IETF protocol assignments
    "192.0.2.0/24",       // TEST-NET-1
    "198.18.0.0/15",      // benchmarking
    "198.51.100.0/24",    // TEST-NET-2
    "203.0.113.0/24",     // TEST-NET-3
    "240.0.0.0/4",        // reserved (RFC 1112, section 4)
    "255.255.255.255/32", // limited broadcast
    "224.0.0.0/24",       // local network control block (RFC 5771)
];

/// Private IPv6 networks: unique-local and ORCHIDv2 (RFC 7343)
pub const IPV6_PRIVATE: &[&str] = &["fc00::/7", "2001:20::/28"];

/// Non-public IPv6 networks, excluding the private blocks
pub const IPV6_NON_PUBLIC: &[&str] = &[
    "::/128",        // unspecified
    "::1/128",       // loopback
    "::ffff:0:0/96", // IPv4-mapped
    "100::/64",      // discard-only
    "2001::/32",     // TEREDO
    "2001:2::/48",   // benchmarking
    "2001:db8::/32", // documentation
    "fc00::/7",      // unique-local
    "fe80::/10",     // link-scoped unicast
    "FE80::/10",     // link-local (RFC 4193)
    "FF00::/8",      // multicast
];

/// Private-use networks for both families
pub static PRIVATE: Lazy<RangeTable> = Lazy::new(|| {
    RangeTable::from_cidrs(IPV4_PRIVATE.iter().chain(IPV6_PRIVATE))
        .expect("static private range literals are valid")
});

/// Every network whose addresses are never considered public
pub static NON_PUBLIC: Lazy<RangeTable> = Lazy::new(|| {
    RangeTable::from_cidrs(
        IPV4_NON_PUBLIC
            .iter()
            .chain(IPV4_PRIVATE)
            .chain(IPV6_NON_PUBLIC)
            .chain(IPV6_PRIVATE),
    )
    .expect("static non-public range literals are valid")
});
