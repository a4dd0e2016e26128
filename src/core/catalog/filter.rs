//! Name filter over the catalog.

use super::types::Pokemon;

/// Retain every record whose name contains `search`, ignoring case.
///
/// An empty search keeps everything. Source order is preserved.
pub fn filter_by_name(records: &[Pokemon], search: &str) -> Vec<Pokemon> {
    let needle = search.to_lowercase();
    records
        .iter()
        .filter(|p| name_matches(&p.name, &needle))
        .cloned()
        .collect()
}

/// `needle` must already be lowercased.
fn name_matches(name: &str, needle: &str) -> bool {
    needle.is_empty() || name.to_lowercase().contains(needle)
}
