//! IPv6 network utilities, mirroring [`super::ipv4`] on 128 bit addresses.

use serde::Serialize;
use std::error::Error;
use std::net::{IpAddr, Ipv6Addr};

/// Maximum length for an IPv6 subnet mask (128 bits).
const MAX_LENGTH_V6: u8 = 128;

/// The IPv6 link-local network, fe80::/10.
const LINK_LOCAL: Ipv6 = Ipv6 {
    addr: Ipv6Addr::new(0xfe80, 0, 0, 0, 0, 0, 0, 0),
    mask: 10,
};

/// Convert a CIDR prefix length to a subnet mask as u128.
fn get_cidr_mask_v6(len: u8) -> Result<u128, Box<dyn Error>> {
    match len {
        0 => Ok(0),
        l if l > MAX_LENGTH_V6 => Err("Network length is too long".into()),
        l => Ok(u128::MAX << (MAX_LENGTH_V6 - l)),
    }
}

/// Get the network address for a given IPv6 address and prefix length.
fn cut_addr_v6(addr: Ipv6Addr, len: u8) -> Result<Ipv6Addr, Box<dyn Error>> {
    let mask = get_cidr_mask_v6(len)?;
    Ok(Ipv6Addr::from(u128::from(addr) & mask))
}

/// Parse an IPv4 or IPv6 literal.
///
/// An IPv6 zone suffix (`fe80::1%eth0`) is accepted and ignored; an empty
/// zone or a zone on an IPv4 literal is not.
pub fn parse_addr(value: &str) -> Option<IpAddr> {
    match value.split_once('%') {
        Some((addr, zone)) if !zone.is_empty() => addr.parse::<Ipv6Addr>().ok().map(IpAddr::V6),
        Some(_) => None,
        None => value.parse().ok(),
    }
}

/// True for addresses inside fe80::/10.
pub fn is_link_local(addr: Ipv6Addr) -> bool {
    LINK_LOCAL.contains(addr)
}

/// IPv6 network in CIDR notation.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct Ipv6 {
    /// The network address.
    pub addr: Ipv6Addr,
    /// The subnet mask length (0-128).
    pub mask: u8,
}

impl Serialize for Ipv6 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl Ipv6 {
    /// The `len` sized network that contains `addr`.
    pub fn containing(addr: Ipv6Addr, len: u8) -> Result<Ipv6, Box<dyn Error>> {
        Ok(Ipv6 {
            addr: cut_addr_v6(addr, len)?,
            mask: len,
        })
    }

    /// Check if `addr` falls inside this network.
    fn contains(&self, addr: Ipv6Addr) -> bool {
        cut_addr_v6(addr, self.mask)
            .map(|net| net == self.addr)
            .unwrap_or(false)
    }

    /// A network is link-local when its network address is.
    pub fn is_link_local(&self) -> bool {
        is_link_local(self.addr)
    }
}

impl std::fmt::Display for Ipv6 {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.mask)
    }
}
