//! Fixed names and the run configuration.

/// Portal export column holding the VM name.
pub const COL_VM_NAME: &str = "VM_NAME";
pub const COL_SERVICE_IPV4: &str = "SERVICE_NET_1_IPv4";
pub const COL_SERVICE_IPV6: &str = "SERVICE_NET_1_IPv6";
pub const COL_STORAGE_IPV4: &str = "STORAGE_NET_1_IPv4";

pub const IPV4_PREFIX_LEN: u8 = 21;
pub const IPV6_PREFIX_LEN: u8 = 64;

/// Minimum width of every left-justified address column.
pub const FIELD_WIDTH: usize = 15;

pub const ANSIBLE_REMOTE_TMP: &str = "/tmp/.ansible";
pub const LDAP_VARS_FILE: &str = "vars/ldap.yml";

pub const DEFAULT_ANSIBLE_USER: &str = "mdxuser";
pub const DEFAULT_GROUP: &str = "default";

/// Rendering target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Ansible INI inventory
    #[default]
    Ini,
    /// Ansible dynamic inventory JSON
    Json,
}

/// Everything one run needs besides the input table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryConfig {
    pub use_ipv6_preference: bool,
    pub management_user: String,
    pub default_group_name: String,
    pub enable_per_node_groups: bool,
    /// (group name, member VM names)
    pub include_groups: Vec<(String, Vec<String>)>,
    /// (group name, excluded VM names)
    pub exclude_groups: Vec<(String, Vec<String>)>,
    /// (group name, regular expression)
    pub include_pattern_groups: Vec<(String, String)>,
    /// (group name, regular expression)
    pub exclude_pattern_groups: Vec<(String, String)>,
    pub enable_ipv6_host_var: bool,
    pub enable_link_local: bool,
    pub output_format: OutputFormat,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        InventoryConfig {
            use_ipv6_preference: false,
            management_user: DEFAULT_ANSIBLE_USER.to_string(),
            default_group_name: DEFAULT_GROUP.to_string(),
            enable_per_node_groups: false,
            include_groups: vec![],
            exclude_groups: vec![],
            include_pattern_groups: vec![],
            exclude_pattern_groups: vec![],
            enable_ipv6_host_var: false,
            enable_link_local: false,
            output_format: OutputFormat::Ini,
        }
    }
}
