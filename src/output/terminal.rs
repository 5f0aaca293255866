//! Fixed-width field formatting.

/// Format a value left-justified to a minimum width.
///
/// Longer values are never truncated.
///
/// # Arguments
/// * `value` - The value to format
/// * `width` - The minimum width of the field
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let value_str = value.to_string();
    format!("{value_str:<width$}")
}
