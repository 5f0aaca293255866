//! Inventory group rules.

use super::VmRecord;
use itertools::Itertools;
use regex::Regex;

/// One group definition, checked and ready to match.
#[derive(Debug, Clone)]
pub enum GroupRule {
    /// Every record.
    All { name: String },
    /// Records whose name is listed. The list is never empty.
    IncludeNames { name: String, members: Vec<String> },
    /// Records whose name is not listed. An empty list matches all.
    ExcludeNames { name: String, excluded: Vec<String> },
    /// Records whose name contains a match of `pattern`.
    IncludePattern { name: String, pattern: Regex },
    /// Records whose name has no match of `pattern`.
    ExcludePattern { name: String, pattern: Regex },
    /// One singleton group per record with a service IPv4 address.
    PerNode,
}

impl GroupRule {
    /// Membership predicate for a single record.
    pub fn matches(&self, vm: &VmRecord) -> bool {
        match self {
            GroupRule::All { .. } => true,
            GroupRule::IncludeNames { members, .. } => members.contains(&vm.name),
            GroupRule::ExcludeNames { excluded, .. } => !excluded.contains(&vm.name),
            GroupRule::IncludePattern { pattern, .. } => pattern.is_match(&vm.name),
            GroupRule::ExcludePattern { pattern, .. } => !pattern.is_match(&vm.name),
            GroupRule::PerNode => vm.has_service_ipv4(),
        }
    }

    /// Comment line rendered under the group header, if any.
    pub fn description(&self) -> Option<String> {
        match self {
            GroupRule::All { .. } | GroupRule::PerNode => None,
            GroupRule::IncludeNames { members, .. } => {
                Some(format!("# group with {}", members.iter().join(" ")))
            }
            GroupRule::ExcludeNames { excluded, .. } => {
                Some(format!("# group without {}", excluded.iter().join(" ")))
            }
            GroupRule::IncludePattern { pattern, .. } => {
                Some(format!("# group with regexp '{}'", pattern.as_str()))
            }
            GroupRule::ExcludePattern { pattern, .. } => {
                Some(format!("# group without regexp '{}'", pattern.as_str()))
            }
        }
    }
}

/// A named, ordered view over the record set.
#[derive(Debug)]
pub struct Group<'a> {
    pub name: &'a str,
    pub description: Option<String>,
    pub members: Vec<&'a VmRecord>,
}
