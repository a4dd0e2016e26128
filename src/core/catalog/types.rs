//! Catalog Types
//!
//! Record shape served by the data source, plus the load status and outcome
//! reported by the store.

use serde::{Deserialize, Serialize};

// ============================================================================
// Records
// ============================================================================

/// One creature entry as served by `/pokemon.json`.
///
/// Records are immutable once loaded; `id` is the identity. Numbers are taken
/// as served, so a negative or oversized stat does not reject the payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pokemon {
    pub id: i64,
    pub name: String,
    /// Type tags in source order, e.g. `["Grass", "Poison"]`. May be empty.
    #[serde(rename = "type")]
    pub types: Vec<String>,
    pub hp: i64,
    pub attack: i64,
    pub defense: i64,
    pub special_attack: i64,
    pub special_defense: i64,
    pub speed: i64,
}

impl Pokemon {
    /// Sum of the six base stats.
    ///
    /// Saturates instead of overflowing on out-of-range stats.
    pub fn base_stat_total(&self) -> i64 {
        [
            self.hp,
            self.attack,
            self.defense,
            self.special_attack,
            self.special_defense,
            self.speed,
        ]
        .into_iter()
        .fold(0i64, i64::saturating_add)
    }

    /// Case-insensitive type tag check, folded the same way as the name filter.
    pub fn has_type(&self, tag: &str) -> bool {
        let tag = tag.to_lowercase();
        self.types.iter().any(|t| t.to_lowercase() == tag)
    }
}

// ============================================================================
// Load Lifecycle
// ============================================================================

/// Where the one-shot catalog load currently stands.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LoadStatus {
    /// `initialize` has not been called yet
    #[default]
    Idle,
    /// Fetch issued, not resolved
    Pending,
    /// Records applied to the store
    Loaded { count: usize },
    /// Fetch or decode failed; the catalog stays empty
    Failed { reason: String },
}

impl LoadStatus {
    /// True once the load has resolved, successfully or not.
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Loaded { .. } | Self::Failed { .. })
    }
}

/// What became of a load task once it ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Records were written into the store
    Applied { count: usize },
    /// The source returned an error; nothing was written
    Failed { reason: String },
    /// The store was torn down before the fetch resolved
    Discarded,
}
