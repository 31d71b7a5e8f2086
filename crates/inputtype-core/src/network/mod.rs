//! IP network values and range tables.
//!
//! [`IpNetwork`] is a family-tagged CIDR block. Parsing is non-strict: host
//! bits beyond the prefix are masked off rather than rejected, so
//! `"10.1.2.3/8"` parses to `10.0.0.0/8`.
//!
//! [`RangeTable`] partitions a list of networks by address family and answers
//! "does this address fall inside any of them". The process-wide tables used
//! by the IP validator live in [`ranges`].

pub mod ranges;

use crate::error::{Error, Result};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

pub use ranges::{NON_PUBLIC, PRIVATE};

/// A CIDR network: network address plus prefix length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IpNetwork {
    network: IpAddr,
    prefix_len: u8,
}

impl IpNetwork {
    /// Creates a network from an address and a prefix length.
    ///
    /// Host bits of `addr` beyond the prefix are cleared.
    pub fn new(addr: IpAddr, prefix_len: u8) -> Result<Self> {
        let max = max_prefix_len(&addr);
        if prefix_len > max {
            return Err(Error::invalid_network(
                format!("{}/{}", addr, prefix_len),
                format!("prefix length must be at most {}", max),
            ));
        }

        let network = match addr {
            IpAddr::V4(v4) => IpAddr::V4(Ipv4Addr::from(u32::from(v4) & v4_mask(prefix_len))),
            IpAddr::V6(v6) => IpAddr::V6(Ipv6Addr::from(u128::from(v6) & v6_mask(prefix_len))),
        };

        Ok(Self {
            network,
            prefix_len,
        })
    }

    /// Returns the (masked) network address
    pub fn network(&self) -> IpAddr {
        self.network
    }

    /// Returns the prefix length
    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    /// Returns the netmask as an address of the same family
    pub fn netmask(&self) -> IpAddr {
        match self.network {
            IpAddr::V4(_) => IpAddr::V4(Ipv4Addr::from(v4_mask(self.prefix_len))),
            IpAddr::V6(_) => IpAddr::V6(Ipv6Addr::from(v6_mask(self.prefix_len))),
        }
    }

    /// Returns true if this is an IPv4 network
    pub fn is_ipv4(&self) -> bool {
        self.network.is_ipv4()
    }

    /// Returns true if this is an IPv6 network
    pub fn is_ipv6(&self) -> bool {
        self.network.is_ipv6()
    }

    /// Returns true if `addr` lies inside this network.
    ///
    /// Addresses of the other family are never contained.
    pub fn contains(&self, addr: &IpAddr) -> bool {
        match (self.network, addr) {
            (IpAddr::V4(net), IpAddr::V4(addr)) => {
                u32::from(*addr) & v4_mask(self.prefix_len) == u32::from(net)
            }
            (IpAddr::V6(net), IpAddr::V6(addr)) => {
                u128::from(*addr) & v6_mask(self.prefix_len) == u128::from(net)
            }
            _ => false,
        }
    }
}

impl fmt::Display for IpNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network, self.prefix_len)
    }
}

impl FromStr for IpNetwork {
    type Err = Error;

    /// Parses `addr/prefix`, `addr/netmask` or `addr/hostmask` (IPv4 only for
    /// the mask forms). A bare address is taken as a single-host network.
    fn from_str(s: &str) -> Result<Self> {
        let (addr_part, prefix_part) = match s.split_once('/') {
            Some((addr, prefix)) => (addr, Some(prefix)),
            None => (s, None),
        };

        let addr: IpAddr = addr_part
            .parse()
            .map_err(|_| Error::invalid_network(s, "invalid address"))?;

        let prefix_len = match prefix_part {
            None => max_prefix_len(&addr),
            Some(p) => parse_prefix(&addr, p).ok_or_else(|| {
                Error::invalid_network(s, format!("invalid prefix length or mask '{}'", p))
            })?,
        };

        Self::new(addr, prefix_len)
    }
}

fn max_prefix_len(addr: &IpAddr) -> u8 {
    match addr {
        IpAddr::V4(_) => 32,
        IpAddr::V6(_) => 128,
    }
}

fn v4_mask(prefix_len: u8) -> u32 {
    u32::MAX.checked_shl(32 - u32::from(prefix_len)).unwrap_or(0)
}

fn v6_mask(prefix_len: u8) -> u128 {
    u128::MAX.checked_shl(128 - u32::from(prefix_len)).unwrap_or(0)
}

/// Parses the part after `/`: a decimal prefix length, or for IPv4 a dotted
/// netmask or hostmask.
fn parse_prefix(addr: &IpAddr, part: &str) -> Option<u8> {
    if !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()) {
        let prefix: u8 = part.parse().ok()?;
        return (prefix <= max_prefix_len(addr)).then_some(prefix);
    }

    if !addr.is_ipv4() {
        return None;
    }

    let mask = u32::from(part.parse::<Ipv4Addr>().ok()?);
    prefix_from_mask(mask).or_else(|| prefix_from_mask(!mask))
}

/// Returns the prefix length of a contiguous netmask
fn prefix_from_mask(mask: u32) -> Option<u8> {
    let ones = mask.leading_ones();
    (ones + mask.trailing_zeros() >= 32).then_some(ones as u8)
}

/// An immutable set of networks, partitioned per address family
#[derive(Debug, Clone, Default)]
pub struct RangeTable {
    v4: Vec<IpNetwork>,
    v6: Vec<IpNetwork>,
}

impl RangeTable {
    /// Builds a table from network literals, keeping their order
    pub fn from_cidrs<I, S>(cidrs: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        cidrs
            .into_iter()
            .map(|cidr| cidr.as_ref().parse::<IpNetwork>())
            .collect()
    }

    /// Returns true if `addr` falls inside any network of its family
    pub fn contains(&self, addr: &IpAddr) -> bool {
        let nets = match addr {
            IpAddr::V4(_) => &self.v4,
            IpAddr::V6(_) => &self.v6,
        };
        nets.iter().any(|net| net.contains(addr))
    }

    /// IPv4 networks in insertion order
    pub fn v4(&self) -> &[IpNetwork] {
        &self.v4
    }

    /// IPv6 networks in insertion order
    pub fn v6(&self) -> &[IpNetwork] {
        &self.v6
    }

    /// Total number of networks across both families
    pub fn len(&self) -> usize {
        self.v4.len() + self.v6.len()
    }

    /// Returns true if the table holds no networks
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over all networks, IPv4 first
    pub fn iter(&self) -> impl Iterator<Item = &IpNetwork> {
        self.v4.iter().chain(self.v6.iter())
    }
}

impl FromIterator<IpNetwork> for RangeTable {
    fn from_iter<I: IntoIterator<Item = IpNetwork>>(iter: I) -> Self {
        let (v4, v6) = iter.into_iter().partition(IpNetwork::is_ipv4);
        Self { v4, v6 }
    }
}
