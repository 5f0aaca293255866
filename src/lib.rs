//! Generate an Ansible inventory from the MDX portal VM export.
//!
//! Pipeline: [`input`] reads the CSV rows, [`processing`] validates the
//! addresses, derives the network prefixes and partitions the VMs into
//! groups, and [`output`] renders the inventory document.

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod logging;
pub mod models;
pub mod output;
pub mod processing;

use config::{InventoryConfig, OutputFormat};
use models::VmRecord;
use std::error::Error;
use std::io::{Read, Write};

/// Read the export and sort it by VM name.
///
/// The sort is stable, duplicate names keep their input order.
pub fn get_sorted_vms<R: Read>(input: R) -> Result<Vec<VmRecord>, Box<dyn Error>> {
    let mut vms = input::read_vms(input)?;
    vms.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(vms)
}

/// Derive and render the inventory for an already loaded record set.
///
/// Validates `vms` in place, then sorts them by name.
pub fn render_inventory(
    vms: &mut [VmRecord],
    config: &InventoryConfig,
) -> Result<String, Box<dyn Error>> {
    let rules = processing::build_group_rules(config)?;

    processing::validate_vms(vms, config.enable_link_local);
    vms.sort_by(|a, b| a.name.cmp(&b.name));
    let vms: &[VmRecord] = vms;

    let prefixes = processing::get_prefixes(vms);
    let groups = processing::partition_all(&rules, vms);

    match config.output_format {
        OutputFormat::Ini => Ok(output::format_inventory(&prefixes, &groups, config)),
        OutputFormat::Json => output::format_inventory_json(&prefixes, &groups, config),
    }
}

/// Full run: read the export, render it, write the document in one go.
pub fn generate_inventory<R: Read, W: Write>(
    input: R,
    mut output: W,
    config: &InventoryConfig,
) -> Result<(), Box<dyn Error>> {
    let mut vms = get_sorted_vms(input)?;
    let document = render_inventory(&mut vms, config)?;
    output.write_all(document.as_bytes())?;
    output.flush()?;
    log::info!("wrote inventory for {} VMs", vms.len());
    Ok(())
}
