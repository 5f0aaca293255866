//! Output formatting for the inventory.
//!
//! This module handles rendering the derived inventory:
//! - [`ini`] - Ansible INI inventory text
//! - [`json`] - Ansible dynamic inventory JSON
//! - [`terminal`] - Fixed-width field helpers

mod ini;
mod json;
mod terminal;

pub use ini::{format_all_vars, format_group, format_inventory, format_vm};
pub use json::format_inventory_json;
pub use terminal::format_field;
