//! Inventory derivation logic.
//!
//! This module contains the pipeline stages between reading and rendering:
//! - [`validate`] - Blanking malformed or link-local addresses
//! - [`prefix`] - Deriving the shared network prefixes
//! - [`groups`] - Building group rules and partitioning records

mod groups;
mod prefix;
mod validate;

// Re-export public functions
pub use groups::{build_group_rules, partition, partition_all};
pub use prefix::{get_ipv4_prefixes, get_ipv6_prefix, get_prefixes};
pub use validate::validate_vms;
