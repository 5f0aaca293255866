//! Ansible dynamic inventory JSON rendering.
//!
//! Carries the same hosts, groups and variables as the INI document, for
//! tools that want a host list with per-host variables.

use crate::config::{self, InventoryConfig};
use crate::models::{Group, NetworkPrefix, Prefixes, VmRecord};
use serde::Serialize;
use std::collections::BTreeMap;
use std::error::Error;

#[derive(Serialize, Debug)]
struct HostVars<'a> {
    hostname: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    ethipv4: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rdmaipv4: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ethipv6: Option<&'a str>,
}

#[derive(Serialize, Debug)]
struct AllVars<'a> {
    ansible_user: &'a str,
    ansible_remote_tmp: &'a str,
    ldap_vars_file: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    ethipv4prefix: Option<NetworkPrefix>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rdmaipv4prefix: Option<NetworkPrefix>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ethipv6prefix: Option<NetworkPrefix>,
}

#[derive(Serialize, Debug)]
struct Meta<'a> {
    hostvars: BTreeMap<&'a str, HostVars<'a>>,
}

#[derive(Serialize, Debug)]
#[serde(untagged)]
enum Section<'a> {
    Meta(Meta<'a>),
    Vars { vars: AllVars<'a> },
    Hosts { hosts: Vec<&'a str> },
}

fn non_empty(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}

fn host_vars<'a>(vm: &'a VmRecord, config: &InventoryConfig) -> HostVars<'a> {
    HostVars {
        hostname: &vm.name,
        ethipv4: non_empty(&vm.service_ipv4),
        rdmaipv4: non_empty(&vm.storage_ipv4),
        ethipv6: non_empty(&vm.service_ipv6).filter(|_| config.enable_ipv6_host_var),
    }
}

/// The whole inventory as a pretty-printed JSON document.
pub fn format_inventory_json(
    prefixes: &Prefixes,
    groups: &[Group],
    config: &InventoryConfig,
) -> Result<String, Box<dyn Error>> {
    log::info!("#Start format_inventory_json() {} groups", groups.len());
    let mut hostvars = BTreeMap::new();
    let mut sections = BTreeMap::new();

    for group in groups {
        let mut hosts = Vec::new();
        for vm in &group.members {
            match vm.display_address(config.use_ipv6_preference) {
                Some(addr) => {
                    hostvars.insert(addr, host_vars(vm, config));
                    hosts.push(addr);
                }
                None => log::warn!("no service address available for {}", vm.name),
            }
        }
        if sections
            .insert(group.name, Section::Hosts { hosts })
            .is_some()
        {
            log::warn!("group [{}] defined twice, last one wins", group.name);
        }
    }

    sections.insert(
        "all",
        Section::Vars {
            vars: AllVars {
                ansible_user: &config.management_user,
                ansible_remote_tmp: config::ANSIBLE_REMOTE_TMP,
                ldap_vars_file: config::LDAP_VARS_FILE,
                ethipv4prefix: prefixes.eth_ipv4,
                rdmaipv4prefix: prefixes.rdma_ipv4,
                ethipv6prefix: prefixes.eth_ipv6,
            },
        },
    );
    sections.insert("_meta", Section::Meta(Meta { hostvars }));

    let mut out = serde_json::to_string_pretty(&sections)?;
    out.push('\n');
    Ok(out)
}
