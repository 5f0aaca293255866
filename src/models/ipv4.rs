//! IPv4 network utilities.
//!
//! Provides [`Ipv4`] struct for representing an IPv4 network (address plus
//! prefix length), along with the mask arithmetic used to derive prefixes.

use serde::Serialize;
use std::error::Error;
use std::net::Ipv4Addr;

/// Maximum length for an IPv4 subnet mask (32 bits).
const MAX_LENGTH: u8 = 32;

/// Convert a CIDR prefix length to a subnet mask as u32.
fn get_cidr_mask(len: u8) -> Result<u32, Box<dyn Error>> {
    if len > MAX_LENGTH {
        Err("Network length is too long".into())
    } else {
        let right_len = MAX_LENGTH - len;
        let all_bits = u32::MAX as u64;

        let mask = (all_bits >> right_len) << right_len;

        Ok(mask as u32)
    }
}

/// Get the network address for a given IP and prefix length.
///
/// Host bits are masked off, never rejected.
fn cut_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr, Box<dyn Error>> {
    let mask = get_cidr_mask(len)?;
    Ok(Ipv4Addr::from(u32::from(addr) & mask))
}

/// IPv4 network in CIDR notation.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct Ipv4 {
    /// The network address.
    pub addr: Ipv4Addr,
    /// The subnet mask length (0-32).
    pub mask: u8,
}

impl Serialize for Ipv4 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl Ipv4 {
    /// The `len` sized network that contains `addr`.
    ///
    /// # Examples
    /// ```
    /// use mdx_csv_inventory::models::Ipv4;
    /// use std::net::Ipv4Addr;
    /// let net = Ipv4::containing(Ipv4Addr::new(10, 0, 1, 5), 21).unwrap();
    /// assert_eq!(net.to_string(), "10.0.0.0/21");
    /// ```
    pub fn containing(addr: Ipv4Addr, len: u8) -> Result<Ipv4, Box<dyn Error>> {
        Ok(Ipv4 {
            addr: cut_addr(addr, len)?,
            mask: len,
        })
    }
}

impl std::fmt::Display for Ipv4 {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.mask)
    }
}
