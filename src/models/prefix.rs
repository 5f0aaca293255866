//! Network prefix derived from an observed host address.

use super::{Ipv4, Ipv6};
use serde::Serialize;
use std::error::Error;
use std::fmt;
use std::net::IpAddr;

/// The network of a given mask length that contains one representative
/// address. Computed once per run, never mutated.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(untagged)]
pub enum NetworkPrefix {
    V4(Ipv4),
    V6(Ipv6),
}

impl NetworkPrefix {
    /// Smallest `len` network containing `addr`, whatever its family.
    pub fn containing(addr: IpAddr, len: u8) -> Result<NetworkPrefix, Box<dyn Error>> {
        Ok(match addr {
            IpAddr::V4(a) => NetworkPrefix::V4(Ipv4::containing(a, len)?),
            IpAddr::V6(a) => NetworkPrefix::V6(Ipv6::containing(a, len)?),
        })
    }

    pub fn is_link_local(&self) -> bool {
        match self {
            NetworkPrefix::V4(_) => false,
            NetworkPrefix::V6(net) => net.is_link_local(),
        }
    }
}

impl fmt::Display for NetworkPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkPrefix::V4(net) => net.fmt(f),
            NetworkPrefix::V6(net) => net.fmt(f),
        }
    }
}

/// The three prefixes published in `[all:vars]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Prefixes {
    pub eth_ipv4: Option<NetworkPrefix>,
    pub rdma_ipv4: Option<NetworkPrefix>,
    pub eth_ipv6: Option<NetworkPrefix>,
}
