//! Network prefix derivation.
//!
//! The fleet is assumed to share one subnet per network role, so the first
//! usable address of each role reveals its prefix. Nothing checks that the
//! rest of the fleet agrees.

use crate::config;
use crate::models::{parse_addr, NetworkPrefix, Prefixes, VmRecord};

/// Prefix of `len` around `value`, or None if it is not an address.
fn prefix_of(vm: &VmRecord, value: &str, len: u8) -> Option<NetworkPrefix> {
    let addr = match parse_addr(value) {
        Some(addr) => addr,
        None => {
            log::warn!("{}: skip unparsable address '{value}'", vm.name);
            return None;
        }
    };
    NetworkPrefix::containing(addr, len)
        .map_err(|e| log::error!("prefix of {value}/{len}: {e}"))
        .ok()
}

/// Ethernet and RDMA IPv4 prefixes.
///
/// Each is fixed by the first record offering the address; the scan stops
/// as soon as both are known.
pub fn get_ipv4_prefixes(vms: &[VmRecord]) -> (Option<NetworkPrefix>, Option<NetworkPrefix>) {
    let mut eth = None;
    let mut rdma = None;
    for vm in vms {
        if eth.is_none() && vm.has_service_ipv4() {
            eth = prefix_of(vm, &vm.service_ipv4, config::IPV4_PREFIX_LEN);
        }
        if rdma.is_none() && vm.has_storage_ipv4() {
            rdma = prefix_of(vm, &vm.storage_ipv4, config::IPV4_PREFIX_LEN);
        }
        if eth.is_some() && rdma.is_some() {
            break;
        }
    }
    (eth, rdma)
}

/// Ethernet IPv6 prefix: the first /64 that is not link-local.
pub fn get_ipv6_prefix(vms: &[VmRecord]) -> Option<NetworkPrefix> {
    vms.iter()
        .filter(|vm| vm.has_service_ipv6())
        .filter_map(|vm| prefix_of(vm, &vm.service_ipv6, config::IPV6_PREFIX_LEN))
        .find(|prefix| {
            if prefix.is_link_local() {
                log::debug!("skip link-local prefix {prefix}");
                return false;
            }
            true
        })
}

/// All three prefixes for `[all:vars]`.
pub fn get_prefixes(vms: &[VmRecord]) -> Prefixes {
    let (eth_ipv4, rdma_ipv4) = get_ipv4_prefixes(vms);
    let eth_ipv6 = get_ipv6_prefix(vms);
    log::info!(
        "prefixes: eth_ipv4={:?} rdma_ipv4={:?} eth_ipv6={:?}",
        eth_ipv4.map(|p| p.to_string()),
        rdma_ipv4.map(|p| p.to_string()),
        eth_ipv6.map(|p| p.to_string()),
    );
    Prefixes {
        eth_ipv4,
        rdma_ipv4,
        eth_ipv6,
    }
}
