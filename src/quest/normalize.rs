//! Requirement Key Normalization
//!
//! Maps raw item/entity short names from game events onto the canonical
//! requirement keys quests are written against. Pure and total: unknown keys
//! pass through unchanged. All matching is case-insensitive.

/// Requirement keys tracked by inventory reconciliation rather than event
/// accrual. These resources can be spent between events, so progress is
/// recomputed from absolute holdings (monotonic max) instead of summed.
const RECONCILED_KEYS: &[&str] = &[
    "metal.ore",
    "sulfur.ore",
    "metal.fragments",
    "scrap",
    "lowgradefuel",
    "cloth",
];

pub fn is_reconciled_key(key: &str) -> bool {
    RECONCILED_KEYS.iter().any(|k| k.eq_ignore_ascii_case(key))
}

/// Canonicalize a raw short name. Rules apply in order, first match wins.
pub fn normalize_requirement_key(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let stripped = strip_deployed_suffix(raw);
    let lower = stripped.to_ascii_lowercase();

    if lower.contains("legacy") && lower.contains("bow") {
        return "bow.hunting".to_string();
    }

    if lower.starts_with("door.hinged") || lower.starts_with("door.double.hinged") {
        if lower.contains("wood") {
            return "door.hinged.wood".to_string();
        }
        if lower.contains("metal") || lower.contains("toptier") || lower.contains("armored") {
            return "door.hinged.metal".to_string();
        }
        // unknown door material falls through unchanged
    }

    if lower == "bow"
        || lower == "weapon.bow"
        || lower.contains("bow.hunting")
        || lower.contains("bow.compound")
    {
        return "bow.hunting".to_string();
    }

    if lower.contains("repair") && lower.contains("bench") {
        return "repair.bench".to_string();
    }

    match lower.as_str() {
        "workbench3" => "iotable".to_string(),
        _ => stripped.to_string(),
    }
}

fn strip_deployed_suffix(raw: &str) -> &str {
    const SUFFIX: &str = ".deployed";
    if raw.len() <= SUFFIX.len() {
        return raw;
    }
    // get() keeps non-ASCII input total: a cut that lands inside a
    // multibyte character is not a suffix match.
    match raw.get(raw.len() - SUFFIX.len()..) {
        Some(tail) if tail.eq_ignore_ascii_case(SUFFIX) => &raw[..raw.len() - SUFFIX.len()],
        _ => raw,
    }
}
