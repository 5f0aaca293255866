//! Domain models for the inventory generator.
//!
//! This module contains the core data structures used throughout the application:
//! - [`VmRecord`] - One VM row of the portal export
//! - [`Ipv4`] and [`Ipv6`] - Networks in CIDR notation
//! - [`NetworkPrefix`] and [`Prefixes`] - Prefixes derived from host addresses
//! - [`GroupRule`] and [`Group`] - Inventory group definitions and views

mod group;
mod ipv4;
mod ipv6;
mod prefix;
mod vm;

// Re-export public types
pub use group::{Group, GroupRule};
pub use ipv4::Ipv4;
pub use ipv6::{is_link_local, parse_addr, Ipv6};
pub use prefix::{NetworkPrefix, Prefixes};
pub use vm::VmRecord;
