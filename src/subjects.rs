//! Subject-name resolution for unit-coded records.

use crate::constants::subjects::{SUBJECT_PREFIXES, SUBJECT_PREFIX_LEN, UNKNOWN_SUBJECT};

/// Resolve a unit code to a human-readable subject name.
///
/// Takes the first three characters as a prefix and looks it up in the
/// static table (`WBI11` resolves through `WBI` to `Biology`). Unknown
/// prefixes return the input unchanged; an empty code returns the
/// `Unknown Subject` sentinel. Total function, never fails.
pub fn resolve_subject_name(unit_code: &str) -> String {
    if unit_code.is_empty() {
        return UNKNOWN_SUBJECT.to_string();
    }
    let prefix: String = unit_code.chars().take(SUBJECT_PREFIX_LEN).collect();
    match SUBJECT_PREFIXES.binary_search_by_key(&prefix.as_str(), |(key, _)| *key) {
        Ok(idx) => SUBJECT_PREFIXES[idx].1.to_string(),
        Err(_) => unit_code.to_string(),
    }
}

/// Resolve an optional unit code, treating absence like an empty code.
pub fn resolve_optional_subject_name(unit_code: Option<&str>) -> String {
    resolve_subject_name(unit_code.unwrap_or(""))
}
