//! Address field validation.
//!
//! Malformed or policy-excluded addresses are blanked in place; nothing
//! here is ever fatal.

use crate::models::{is_link_local, parse_addr, VmRecord};
use colored::Colorize;
use lazy_static::lazy_static;
use regex::Regex;
use std::net::IpAddr;

lazy_static! {
    static ref IP_FIELD_RE: Regex = Regex::new(r"_IPv([46])?").expect("Invalid Regex?");
}

/// Address family named by an address-shaped column, if the column is one.
///
/// `Some(None)` is an address column that does not name a version.
fn column_family(column: &str) -> Option<Option<u8>> {
    IP_FIELD_RE
        .captures(column)
        .map(|c| c.get(1).map(|m| if m.as_str() == "4" { 4 } else { 6 }))
}

/// Decide whether `value` survives validation.
fn keep_address(value: &str, enable_link_local: bool) -> Result<IpAddr, &'static str> {
    let addr = parse_addr(value).ok_or("not an IP address")?;
    match addr {
        IpAddr::V6(v6) if !enable_link_local && is_link_local(v6) => Err("link-local"),
        _ => Ok(addr),
    }
}

/// Blank every address-shaped field that is not a usable IP address.
///
/// Kept values are left verbatim, never canonicalized.
pub fn validate_vms(vms: &mut [VmRecord], enable_link_local: bool) {
    log::info!("#Start validate_vms() enable_link_local={enable_link_local}");
    let mut dropped = 0;

    for vm in vms.iter_mut() {
        let name = vm.name.clone();
        for (column, value) in vm.fields_mut() {
            if value.is_empty() {
                continue;
            }
            let Some(family) = column_family(column) else {
                continue;
            };
            match keep_address(value, enable_link_local) {
                Ok(addr) => {
                    let parsed_family = if addr.is_ipv4() { 4 } else { 6 };
                    if family.is_some_and(|f| f != parsed_family) {
                        log::debug!(
                            "{name}: {column}={value} is IPv{parsed_family}, kept anyway"
                        );
                    }
                }
                Err(reason) => {
                    log::warn!(
                        "{name}: drop {column}={value} ({reason})",
                        value = value.red()
                    );
                    value.clear();
                    dropped += 1;
                }
            }
        }
    }

    log::info!("validate_vms() dropped {dropped} address fields");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vm(ipv4: &str, ipv6: &str, storage: &str) -> VmRecord {
        VmRecord {
            name: "vm".to_string(),
            service_ipv4: ipv4.to_string(),
            service_ipv6: ipv6.to_string(),
            storage_ipv4: storage.to_string(),
            extra: vec![],
        }
    }

    #[test]
    fn test_column_family() {
        assert_eq!(column_family("SERVICE_NET_1_IPv4"), Some(Some(4)));
        assert_eq!(column_family("STORAGE_NET_1_IPv6"), Some(Some(6)));
        assert_eq!(column_family("MGMT_IPv"), Some(None));
        assert_eq!(column_family("VM_NAME"), None);
        assert_eq!(column_family("IPv4"), None);
    }

    #[test]
    fn test_malformed_addresses_are_dropped() {
        let mut vms = vec![vm("10.0.0.300", "2001:db8::zz", "not-an-ip")];
        validate_vms(&mut vms, false);
        assert_eq!(vms[0], vm("", "", ""));
        assert_eq!(vms[0].name, "vm");
    }

    #[test]
    fn test_valid_addresses_are_kept_verbatim() {
        let mut vms = vec![vm("10.0.0.1", "2001:DB8:0:0::1", "10.1.0.1")];
        validate_vms(&mut vms, false);
        assert_eq!(vms[0], vm("10.0.0.1", "2001:DB8:0:0::1", "10.1.0.1"));
    }

    #[test]
    fn test_link_local() {
        let mut vms = vec![vm("10.0.0.1", "fe80::1", "")];
        validate_vms(&mut vms, false);
        assert_eq!(vms[0].service_ipv6, "");

        let mut vms = vec![vm("10.0.0.1", "fe80::1", "")];
        validate_vms(&mut vms, true);
        assert_eq!(vms[0].service_ipv6, "fe80::1");
    }

    #[test]
    fn test_scoped_link_local() {
        let mut vms = vec![vm("", "fe80::1%eth0", "")];
        validate_vms(&mut vms, true);
        assert_eq!(vms[0].service_ipv6, "fe80::1%eth0");

        validate_vms(&mut vms, false);
        assert_eq!(vms[0].service_ipv6, "");
    }

    #[test]
    fn test_extra_columns() {
        let mut v = vm("", "", "");
        v.extra = vec![
            ("STORAGE_NET_1_IPv6".to_string(), "fe80::2".to_string()),
            ("BACKUP_IPv4".to_string(), "bogus".to_string()),
            ("COMMENT".to_string(), "bogus".to_string()),
        ];
        let mut vms = vec![v];
        validate_vms(&mut vms, false);
        assert_eq!(vms[0].extra_field("STORAGE_NET_1_IPv6"), Some(""));
        assert_eq!(vms[0].extra_field("BACKUP_IPv4"), Some(""));
        assert_eq!(vms[0].extra_field("COMMENT"), Some("bogus"));
    }

    #[test]
    fn test_other_family_is_accepted() {
        let mut vms = vec![vm("2001:db8::1", "", "")];
        validate_vms(&mut vms, false);
        assert_eq!(vms[0].service_ipv4, "2001:db8::1");
    }
}
