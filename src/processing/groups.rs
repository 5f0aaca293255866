//! Group partitioning.
//!
//! Turns the group options of [`InventoryConfig`] into [`GroupRule`]s and
//! evaluates them against the sorted record set.

use crate::config::InventoryConfig;
use crate::error::RuleError;
use crate::models::{Group, GroupRule, VmRecord};
use regex::Regex;

fn compile(group: &str, pattern: &str) -> Result<Regex, RuleError> {
    Regex::new(pattern).map_err(|source| RuleError::InvalidPattern {
        group: group.to_string(),
        pattern: pattern.to_string(),
        source,
    })
}

/// Build the ordered rule list for one run.
///
/// Order: all nodes, include-by-name, exclude-by-name, include-by-pattern,
/// exclude-by-pattern, then per-node groups when enabled. Every rule is
/// checked here so a bad definition fails before anything is rendered.
pub fn build_group_rules(config: &InventoryConfig) -> Result<Vec<GroupRule>, RuleError> {
    let mut rules = vec![GroupRule::All {
        name: config.default_group_name.clone(),
    }];

    for (name, members) in &config.include_groups {
        if members.is_empty() {
            return Err(RuleError::EmptyIncludeGroup {
                group: name.clone(),
            });
        }
        rules.push(GroupRule::IncludeNames {
            name: name.clone(),
            members: members.clone(),
        });
    }
    for (name, excluded) in &config.exclude_groups {
        rules.push(GroupRule::ExcludeNames {
            name: name.clone(),
            excluded: excluded.clone(),
        });
    }
    for (name, pattern) in &config.include_pattern_groups {
        rules.push(GroupRule::IncludePattern {
            name: name.clone(),
            pattern: compile(name, pattern)?,
        });
    }
    for (name, pattern) in &config.exclude_pattern_groups {
        rules.push(GroupRule::ExcludePattern {
            name: name.clone(),
            pattern: compile(name, pattern)?,
        });
    }
    if config.enable_per_node_groups {
        rules.push(GroupRule::PerNode);
    }

    log::info!("built {} group rules", rules.len());
    Ok(rules)
}

/// Evaluate one rule, keeping the order of `vms`.
///
/// Per-node rules expand to one singleton group per matching record.
pub fn partition<'a>(rule: &'a GroupRule, vms: &'a [VmRecord]) -> Vec<Group<'a>> {
    let matching = vms.iter().filter(|vm| rule.matches(vm));
    let name = match rule {
        GroupRule::PerNode => {
            return matching
                .map(|vm| Group {
                    name: &vm.name,
                    description: None,
                    members: vec![vm],
                })
                .collect();
        }
        GroupRule::All { name }
        | GroupRule::IncludeNames { name, .. }
        | GroupRule::ExcludeNames { name, .. }
        | GroupRule::IncludePattern { name, .. }
        | GroupRule::ExcludePattern { name, .. } => name,
    };
    let group = Group {
        name,
        description: rule.description(),
        members: matching.collect(),
    };
    log::debug!("group [{}] has {} members", group.name, group.members.len());
    vec![group]
}

/// Evaluate every rule in order.
pub fn partition_all<'a>(rules: &'a [GroupRule], vms: &'a [VmRecord]) -> Vec<Group<'a>> {
    rules.iter().flat_map(|rule| partition(rule, vms)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vms() -> Vec<VmRecord> {
        ["db-01", "gpu-01", "web-01", "web-02"]
            .iter()
            .enumerate()
            .map(|(i, name)| VmRecord {
                name: name.to_string(),
                service_ipv4: if i == 1 {
                    String::new()
                } else {
                    format!("10.0.0.{i}")
                },
                ..Default::default()
            })
            .collect()
    }

    fn names<'a>(group: &Group<'a>) -> Vec<&'a str> {
        group.members.iter().map(|vm| vm.name.as_str()).collect()
    }

    #[test]
    fn test_default_rules() {
        let rules = build_group_rules(&InventoryConfig::default()).unwrap();
        assert_eq!(rules.len(), 1);
        let vms = vms();
        let groups = partition_all(&rules, &vms);
        assert_eq!(groups[0].name, "default");
        assert_eq!(names(&groups[0]), vec!["db-01", "gpu-01", "web-01", "web-02"]);
    }

    #[test]
    fn test_rule_order_and_membership() {
        let config = InventoryConfig {
            include_groups: vec![("pair".into(), vec!["web-02".into(), "db-01".into()])],
            exclude_groups: vec![("no-gpu".into(), vec!["gpu-01".into()])],
            include_pattern_groups: vec![("web".into(), "^web-".into())],
            exclude_pattern_groups: vec![("not-web".into(), "web".into())],
            enable_per_node_groups: true,
            ..Default::default()
        };
        let rules = build_group_rules(&config).unwrap();
        let vms = vms();
        let groups = partition_all(&rules, &vms);
        let group_names: Vec<&str> = groups.iter().map(|g| g.name).collect();
        assert_eq!(
            group_names,
            vec!["default", "pair", "no-gpu", "web", "not-web", "db-01", "web-01", "web-02"]
        );
        // members keep sort order, not list order
        assert_eq!(names(&groups[1]), vec!["db-01", "web-02"]);
        assert_eq!(names(&groups[2]), vec!["db-01", "web-01", "web-02"]);
        assert_eq!(names(&groups[3]), vec!["web-01", "web-02"]);
        assert_eq!(names(&groups[4]), vec!["db-01", "gpu-01"]);
        assert_eq!(names(&groups[5]), vec!["db-01"]);
    }

    #[test]
    fn test_empty_exclude_list_matches_all() {
        let config = InventoryConfig {
            exclude_groups: vec![("everyone".into(), vec![])],
            ..Default::default()
        };
        let rules = build_group_rules(&config).unwrap();
        let vms = vms();
        let groups = partition_all(&rules, &vms);
        assert_eq!(names(&groups[1]), names(&groups[0]));
    }

    #[test]
    fn test_no_matches_still_yields_group() {
        let config = InventoryConfig {
            include_pattern_groups: vec![("none".into(), "^zzz".into())],
            ..Default::default()
        };
        let rules = build_group_rules(&config).unwrap();
        let vms = vms();
        let groups = partition_all(&rules, &vms);
        assert_eq!(groups.len(), 2);
        assert!(groups[1].members.is_empty());
    }

    #[test]
    fn test_empty_include_list_is_error() {
        let config = InventoryConfig {
            include_groups: vec![("empty".into(), vec![])],
            ..Default::default()
        };
        let err = build_group_rules(&config).unwrap_err();
        assert!(matches!(err, RuleError::EmptyIncludeGroup { ref group } if group == "empty"));
        assert_eq!(err.to_string(), "no VM name specified for --group-with empty");
    }

    #[test]
    fn test_invalid_pattern_is_error() {
        let config = InventoryConfig {
            exclude_pattern_groups: vec![("bad".into(), "web(".into())],
            ..Default::default()
        };
        let err = build_group_rules(&config).unwrap_err();
        assert!(matches!(err, RuleError::InvalidPattern { .. }));
    }

    #[test]
    fn test_lookaround_is_rejected() {
        let config = InventoryConfig {
            include_pattern_groups: vec![("not-login".into(), "^(?!login)".into())],
            ..Default::default()
        };
        let err = build_group_rules(&config).unwrap_err();
        assert!(
            matches!(err, RuleError::InvalidPattern { ref group, .. } if group == "not-login")
        );
    }
}
