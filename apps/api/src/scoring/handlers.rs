//! Axum route handlers for the Scoring API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::inventory::Inventory;
use crate::scoring::score_inventory;
use crate::state::AppState;
use crate::store;

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub owner_id: Uuid,
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub inventory: Inventory,
}

/// Rejects a missing or all-whitespace job description. Both the scoring and
/// compile endpoints call this before touching the store or the typesetter.
pub(crate) fn require_job_description(
    job_description: &str,
    action: &str,
) -> Result<(), AppError> {
    if job_description.trim().is_empty() {
        return Err(AppError::Validation(format!(
            "job_description is required for {action}"
        )));
    }
    Ok(())
}

/// POST /api/v1/score
///
/// Fetches the owner's full inventory and returns it with every bullet's
/// `score` overwritten against the given job description.
pub async fn handle_score(
    State(state): State<AppState>,
    Json(request): Json<ScoreRequest>,
) -> Result<Json<ScoreResponse>, AppError> {
    require_job_description(&request.job_description, "scoring")?;

    let inventory = store::fetch_inventory(&state.db, request.owner_id).await?;
    let scored = score_inventory(inventory, &request.job_description);

    Ok(Json(ScoreResponse { inventory: scored }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_job_description_rejected() {
        let err = require_job_description("", "scoring").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_whitespace_only_job_description_rejected() {
        let err = require_job_description("  \n\t  ", "scoring").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_nonempty_job_description_accepted() {
        assert!(require_job_description("Rust engineer, Kubernetes", "scoring").is_ok());
    }
}
