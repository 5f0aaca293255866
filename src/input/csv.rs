//! Portal CSV export reader.

use crate::models::VmRecord;
use colored::Colorize;
use std::error::Error;
use std::io::Read;

const UTF8_BOM: char = '\u{feff}';

/// Parse the CSV text into records, in file order.
///
/// A leading byte-order mark is stripped. Rows are never rejected: cells
/// missing from short rows read as empty and cells without a header are
/// ignored.
pub fn parse_vms(csv_text: &str) -> Result<Vec<VmRecord>, Box<dyn Error>> {
    let csv_text = csv_text.strip_prefix(UTF8_BOM).unwrap_or(csv_text);

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(csv_text.as_bytes());
    let headers = reader.headers()?.clone();
    log::debug!("csv headers: {:?}", headers);

    let mut vms = Vec::new();
    for (i, row) in reader.records().enumerate() {
        let row = row?;
        let vm = VmRecord::from_fields(
            headers
                .iter()
                .enumerate()
                .map(|(col, key)| (key, row.get(col).unwrap_or(""))),
        );
        log::trace!("row#{i:3} {name}", name = vm.name.on_blue());
        vms.push(vm);
    }

    log::info!("Read {} VM rows from csv", vms.len());
    Ok(vms)
}

/// Read the whole stream, then parse it with [`parse_vms`].
pub fn read_vms<R: Read>(mut input: R) -> Result<Vec<VmRecord>, Box<dyn Error>> {
    let mut csv_text = String::new();
    input
        .read_to_string(&mut csv_text)
        .map_err(|e| format!("Error reading csv input: {e}"))?;
    parse_vms(&csv_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "VM_NAME,SERVICE_NET_1_IPv4,SERVICE_NET_1_IPv6,STORAGE_NET_1_IPv4";

    #[test]
    fn test_parse_vms() {
        let text = format!("{HEADER}\nvm-b,10.0.1.5,,10.0.2.5\nvm-a,10.0.1.6,,\n");
        let vms = parse_vms(&text).expect("Error parsing csv");
        assert_eq!(vms.len(), 2);
        assert_eq!(vms[0].name, "vm-b");
        assert_eq!(vms[0].storage_ipv4, "10.0.2.5");
        assert_eq!(vms[1].name, "vm-a");
        assert!(!vms[1].has_storage_ipv4());
    }

    #[test]
    fn test_strip_bom() {
        let text = format!("\u{feff}{HEADER}\nvm-a,10.0.1.6,,\n");
        let vms = parse_vms(&text).expect("Error parsing csv");
        assert_eq!(vms[0].name, "vm-a", "BOM must not leak into VM_NAME header");
        assert!(vms[0].extra.is_empty());
    }

    #[test]
    fn test_short_and_long_rows() {
        let text = format!("{HEADER}\nvm-a,10.0.1.6\nvm-b,10.0.1.7,,,surplus\n");
        let vms = parse_vms(&text).expect("Error parsing csv");
        assert_eq!(vms.len(), 2);
        assert_eq!(vms[0].service_ipv6, "");
        assert_eq!(vms[0].storage_ipv4, "");
        assert_eq!(vms[1].service_ipv4, "10.0.1.7");
        assert!(vms[1].extra.is_empty());
    }

    #[test]
    fn test_missing_name_column_is_not_rejected() {
        let vms = parse_vms("SERVICE_NET_1_IPv4\n10.0.0.1\n").expect("Error parsing csv");
        assert_eq!(vms.len(), 1);
        assert_eq!(vms[0].name, "");
    }

    #[test]
    fn test_read_vms_from_file() {
        let file = std::fs::File::open("src/tests/test_data/vms_01.csv")
            .expect("Error opening test csv");
        let vms = read_vms(file).expect("Error reading test csv");
        assert_eq!(vms.len(), 5);
        assert_eq!(vms[0].extra_field("STORAGE_NET_1_IPv6"), Some(""));
    }
}
