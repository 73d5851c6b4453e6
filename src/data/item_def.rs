use serde::Deserialize;

// ============================================================================
// Raw Item Definition (direct from TOML)
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct RawItemDefinition {
    pub display_name: Option<String>,
    pub max_stack: Option<i32>,
}

// ============================================================================
// Resolved Item Definition
// ============================================================================

/// An item the host game can hold in inventory. The quest core only needs a
/// display name and the per-slot stack limit.
#[derive(Debug, Clone)]
pub struct ItemDefinition {
    pub id: String,
    pub display_name: String,
    pub max_stack: i32,
}

impl ItemDefinition {
    pub fn from_raw(id: &str, raw: &RawItemDefinition) -> Self {
        Self {
            id: id.to_string(),
            display_name: raw.display_name.clone()
                .unwrap_or_else(|| id.to_string()),
            max_stack: raw.max_stack.unwrap_or(1).max(1),
        }
    }
}
