//! Input handling.
//!
//! - [`csv`] - Reading the portal CSV export into [`crate::models::VmRecord`]s

mod csv;

pub use self::csv::{parse_vms, read_vms};
