//! Compile-request types: caller-owned constraints, the compilation result,
//! and the persisted snapshot row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Caller-owned page constraints. Immutable during one compile.
///
/// `min_bullets_per_entry` is the minimum-bullets floor: entries left with
/// fewer surviving bullets are dropped whole. Reasonable values are 1 (drop
/// only emptied entries) or 2 (drop thin entries too); default 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Constraints {
    pub max_pages: u32,
    pub font_size_pt: u32,
    #[serde(default)]
    pub min_score: u8,
    #[serde(default = "default_min_bullets")]
    pub min_bullets_per_entry: usize,
}

fn default_min_bullets() -> usize {
    1
}

impl Default for Constraints {
    fn default() -> Self {
        Constraints {
            max_pages: 1,
            font_size_pt: 11,
            min_score: 0,
            min_bullets_per_entry: default_min_bullets(),
        }
    }
}

impl Constraints {
    pub fn validate(&self) -> Result<(), String> {
        if self.max_pages == 0 {
            return Err("constraints.max_pages must be at least 1".to_string());
        }
        if self.font_size_pt == 0 {
            return Err("constraints.font_size_pt must be at least 1".to_string());
        }
        if self.min_score > 100 {
            return Err("constraints.min_score must be between 0 and 100".to_string());
        }
        if self.min_bullets_per_entry == 0 {
            return Err("constraints.min_bullets_per_entry must be at least 1".to_string());
        }
        Ok(())
    }
}

/// A persisted compile snapshot: the tailored inventory plus the rendered
/// artifact reference, one row per compile call.
///
/// `pdf_path` is NULL when `page_count_unknown` is set — in that case no
/// artifact on disk matches `selected_inventory`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SnapshotRow {
    pub id: Uuid,
    pub application_id: Uuid,
    pub pdf_path: Option<String>,
    pub final_page_count: i32,
    pub page_count_unknown: bool,
    pub selected_inventory: Value,
    pub created_at: DateTime<Utc>,
}
