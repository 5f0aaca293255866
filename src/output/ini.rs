//! Ansible INI inventory rendering.

use crate::config::{self, InventoryConfig};
use crate::models::{Group, NetworkPrefix, Prefixes, VmRecord};

use super::terminal::format_field;

/// Render one host line.
///
/// A record with no service address becomes a comment and carries no
/// host variables.
pub fn format_vm(vm: &VmRecord, config: &InventoryConfig) -> String {
    let Some(addr) = vm.display_address(config.use_ipv6_preference) else {
        log::warn!("no service address available for {}", vm.name);
        return format!("# !! no service address available for {}", vm.name);
    };

    let mut out = format!(
        "{addr} hostname={name}",
        addr = format_field(addr, config::FIELD_WIDTH),
        name = vm.name
    );
    if vm.has_service_ipv4() {
        out += &format!(" ethipv4={}", format_field(&vm.service_ipv4, config::FIELD_WIDTH));
    }
    if vm.has_storage_ipv4() {
        out += &format!(" rdmaipv4={}", format_field(&vm.storage_ipv4, config::FIELD_WIDTH));
    }
    if vm.has_service_ipv6() && config.enable_ipv6_host_var {
        out += &format!(" ethipv6={}", format_field(&vm.service_ipv6, config::FIELD_WIDTH));
    }
    out
}

fn prefix_line(key: &str, prefix: Option<&NetworkPrefix>, missing: &str) -> String {
    match prefix {
        Some(p) => format!("{key}={p}"),
        None => format!("# no valid {missing} found"),
    }
}

/// The `[all:vars]` block, blank line included.
pub fn format_all_vars(prefixes: &Prefixes, config: &InventoryConfig) -> String {
    let lines = [
        "[all:vars]".to_string(),
        format!("ansible_user={}", config.management_user),
        format!("ansible_remote_tmp={}", config::ANSIBLE_REMOTE_TMP),
        format!("ldap_vars_file={}", config::LDAP_VARS_FILE),
        prefix_line(
            "ethipv4prefix",
            prefixes.eth_ipv4.as_ref(),
            "IPv4 prefix for Ethernet network",
        ),
        prefix_line(
            "rdmaipv4prefix",
            prefixes.rdma_ipv4.as_ref(),
            "IPv4 prefix for RDMA network",
        ),
        prefix_line(
            "ethipv6prefix",
            prefixes.eth_ipv6.as_ref(),
            "IPv6 prefix for Ethernet network",
        ),
    ];
    let mut out = lines.join("\n");
    out.push_str("\n\n");
    out
}

/// One group section: header, optional description, hosts, blank line.
pub fn format_group(group: &Group, config: &InventoryConfig) -> String {
    let mut out = format!("[{}]\n", group.name);
    if let Some(description) = &group.description {
        out.push_str(description);
        out.push('\n');
    }
    for vm in &group.members {
        out.push_str(&format_vm(vm, config));
        out.push('\n');
    }
    out.push('\n');
    out
}

/// The whole inventory document.
pub fn format_inventory(prefixes: &Prefixes, groups: &[Group], config: &InventoryConfig) -> String {
    log::info!("#Start format_inventory() {} groups", groups.len());
    let mut out = format_all_vars(prefixes, config);
    for group in groups {
        out.push_str(&format_group(group, config));
    }
    out
}
