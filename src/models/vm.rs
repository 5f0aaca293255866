//! Virtual machine record, one row of the portal export.

use crate::config;

/// One VM row of the inventory export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VmRecord {
    /// VM name, later used as the inventory hostname.
    pub name: String,
    /// Ethernet service network IPv4 address ("" when absent).
    pub service_ipv4: String,
    /// Ethernet service network IPv6 address ("" when absent).
    pub service_ipv6: String,
    /// Storage (RDMA) network IPv4 address ("" when absent).
    pub storage_ipv4: String,
    /// Every other column, in header order.
    pub extra: Vec<(String, String)>,
}

impl VmRecord {
    /// Build a record from a header/value pair list.
    pub fn from_fields<'a, I>(fields: I) -> VmRecord
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut vm = VmRecord::default();
        for (key, value) in fields {
            let value = value.to_string();
            match key {
                config::COL_VM_NAME => vm.name = value,
                config::COL_SERVICE_IPV4 => vm.service_ipv4 = value,
                config::COL_SERVICE_IPV6 => vm.service_ipv6 = value,
                config::COL_STORAGE_IPV4 => vm.storage_ipv4 = value,
                _ => vm.extra.push((key.to_string(), value)),
            }
        }
        vm
    }

    /// All fields as (column, value) pairs, mutable.
    pub fn fields_mut(&mut self) -> impl Iterator<Item = (&str, &mut String)> {
        [
            (config::COL_SERVICE_IPV4, &mut self.service_ipv4),
            (config::COL_SERVICE_IPV6, &mut self.service_ipv6),
            (config::COL_STORAGE_IPV4, &mut self.storage_ipv4),
        ]
        .into_iter()
        .chain(self.extra.iter_mut().map(|(k, v)| (k.as_str(), v)))
    }

    /// Look up an extra column.
    pub fn extra_field(&self, column: &str) -> Option<&str> {
        self.extra
            .iter()
            .find(|(k, _)| k == column)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_service_ipv4(&self) -> bool {
        !self.service_ipv4.is_empty()
    }

    pub fn has_service_ipv6(&self) -> bool {
        !self.service_ipv6.is_empty()
    }

    pub fn has_storage_ipv4(&self) -> bool {
        !self.storage_ipv4.is_empty()
    }

    /// The host address for inventory lines.
    ///
    /// IPv4 first unless `prefer_ipv6`, falling back to the other family.
    pub fn display_address(&self, prefer_ipv6: bool) -> Option<&str> {
        let (first, second) = if prefer_ipv6 {
            (&self.service_ipv6, &self.service_ipv4)
        } else {
            (&self.service_ipv4, &self.service_ipv6)
        };
        [first, second]
            .into_iter()
            .find(|a| !a.is_empty())
            .map(|a| a.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vm() -> VmRecord {
        VmRecord::from_fields([
            ("VM_NAME", "vm-a"),
            ("SERVICE_NET_1_IPv4", "10.0.1.6"),
            ("SERVICE_NET_1_IPv6", "2001:db8::6"),
            ("STORAGE_NET_1_IPv4", ""),
            ("STORAGE_NET_1_IPv6", "2001:db8:1::6"),
            ("PROJECT", "demo"),
        ])
    }

    #[test]
    fn test_from_fields() {
        let vm = vm();
        assert_eq!(vm.name, "vm-a");
        assert_eq!(vm.service_ipv4, "10.0.1.6");
        assert!(!vm.has_storage_ipv4());
        assert_eq!(vm.extra.len(), 2);
        assert_eq!(vm.extra_field("PROJECT"), Some("demo"));
        assert_eq!(vm.extra_field("NOPE"), None);
    }

    #[test]
    fn test_fields_mut_covers_all_columns() {
        let mut vm = vm();
        let keys: Vec<String> = vm.fields_mut().map(|(k, _)| k.to_string()).collect();
        assert_eq!(
            keys,
            vec![
                "SERVICE_NET_1_IPv4",
                "SERVICE_NET_1_IPv6",
                "STORAGE_NET_1_IPv4",
                "STORAGE_NET_1_IPv6",
                "PROJECT"
            ]
        );
    }

    #[test]
    fn test_display_address() {
        let mut vm = vm();
        assert_eq!(vm.display_address(false), Some("10.0.1.6"));
        assert_eq!(vm.display_address(true), Some("2001:db8::6"));

        vm.service_ipv6.clear();
        assert_eq!(vm.display_address(true), Some("10.0.1.6"));

        vm.service_ipv4.clear();
        assert_eq!(vm.display_address(false), None);
    }
}
