//! Axum route handlers for the Compile API.

use std::path::Path as FsPath;
use std::time::Duration;

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::compile::{apply_constraints, fit_to_pages, FitOutcome};
use crate::errors::AppError;
use crate::models::application::{Constraints, SnapshotRow};
use crate::models::inventory::Inventory;
use crate::scoring::handlers::require_job_description;
use crate::scoring::score_inventory;
use crate::state::AppState;
use crate::store;

#[derive(Debug, Deserialize)]
pub struct CompileRequest {
    pub owner_id: Uuid,
    pub job_description: String,
    #[serde(default)]
    pub constraints: Constraints,
}

#[derive(Debug, Serialize)]
pub struct CompileResponse {
    pub snapshot_id: Uuid,
    /// `None` when `page_count_unknown` is set: any PDF on disk predates the
    /// returned snapshot (or was never written), so no URL is handed out.
    pub pdf_url: Option<String>,
    pub final_page_count: u32,
    /// True when the typesetting backend failed twice and the reported page
    /// count is stale or absent. Never silently fabricated.
    pub page_count_unknown: bool,
    pub iterations: u32,
    pub tailored_snapshot: Inventory,
}

/// POST /api/v1/applications/:id/compile
///
/// Full pipeline: validate → fetch inventory → score → filter → page-fit →
/// persist snapshot. Compiles for the same application are serialized; the
/// whole run sits under a wall-clock timeout on top of the iteration cap.
pub async fn handle_compile(
    State(state): State<AppState>,
    Path(application_id): Path<Uuid>,
    Json(request): Json<CompileRequest>,
) -> Result<Json<CompileResponse>, AppError> {
    require_job_description(&request.job_description, "compilation")?;
    request.constraints.validate().map_err(AppError::Validation)?;

    // The output PDF path is keyed by application id; hold the per-application
    // lock for the whole compile so concurrent requests cannot corrupt it.
    let lock = state.compile_locks.lock_for(application_id).await;
    let _guard = lock.lock().await;

    let inventory = store::fetch_inventory(&state.db, request.owner_id).await?;
    inventory
        .validate_for_compile()
        .map_err(AppError::Validation)?;

    let scored = score_inventory(inventory, &request.job_description);
    let tailored = apply_constraints(
        &scored,
        request.constraints.min_score,
        request.constraints.min_bullets_per_entry,
    );

    let template_path = FsPath::new(&state.config.template_dir).join("basic.tex");
    let template = tokio::fs::read_to_string(&template_path)
        .await
        .map_err(|e| {
            AppError::Render(format!(
                "Failed to read template {}: {e}",
                template_path.display()
            ))
        })?;

    let file_name = format!("resume_{application_id}.pdf");
    let output_path = FsPath::new(&state.config.output_dir).join(&file_name);

    let compile_timeout = Duration::from_secs(state.config.compile_timeout_secs);
    let outcome: FitOutcome = tokio::time::timeout(
        compile_timeout,
        fit_to_pages(
            tailored,
            &request.constraints,
            &template,
            state.typesetter.as_ref(),
            &output_path,
        ),
    )
    .await
    .map_err(|_| {
        AppError::Typesetting(format!("Compile timed out after {compile_timeout:?}"))
    })??;

    info!(
        %application_id,
        pages = outcome.final_page_count,
        unknown = outcome.page_count_unknown,
        iterations = outcome.iterations,
        "Compile finished"
    );

    let pdf_url = artifact_url(&file_name, &outcome);
    let snapshot_id =
        insert_snapshot(&state, application_id, pdf_url.as_deref(), &outcome).await?;

    Ok(Json(CompileResponse {
        snapshot_id,
        pdf_url,
        final_page_count: outcome.final_page_count,
        page_count_unknown: outcome.page_count_unknown,
        iterations: outcome.iterations,
        tailored_snapshot: outcome.snapshot,
    }))
}

/// GET /api/v1/applications/:id/snapshots
///
/// Lists persisted compile snapshots for one application, newest first.
pub async fn handle_list_snapshots(
    State(state): State<AppState>,
    Path(application_id): Path<Uuid>,
) -> Result<Json<Vec<SnapshotRow>>, AppError> {
    let snapshots = sqlx::query_as::<_, SnapshotRow>(
        "SELECT id, application_id, pdf_path, final_page_count, page_count_unknown, \
         selected_inventory, created_at \
         FROM generated_snapshots WHERE application_id = $1 ORDER BY created_at DESC",
    )
    .bind(application_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(snapshots))
}

/// URL of the artifact matching `outcome.snapshot`. When the page count is
/// unknown the fitter broke out mid-run: whatever `output_path` holds was
/// rendered from an earlier (or no) iteration, so nothing is linked.
fn artifact_url(file_name: &str, outcome: &FitOutcome) -> Option<String> {
    if outcome.page_count_unknown {
        None
    } else {
        Some(format!("/pdfs/{file_name}"))
    }
}

async fn insert_snapshot(
    state: &AppState,
    application_id: Uuid,
    pdf_url: Option<&str>,
    outcome: &FitOutcome,
) -> Result<Uuid, AppError> {
    let snapshot_id = Uuid::new_v4();
    let selected_inventory = serde_json::to_value(&outcome.snapshot)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Snapshot serialization failed: {e}")))?;

    sqlx::query(
        "INSERT INTO generated_snapshots \
         (id, application_id, pdf_path, final_page_count, page_count_unknown, \
          selected_inventory, created_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7)",
    )
    .bind(snapshot_id)
    .bind(application_id)
    .bind(pdf_url)
    .bind(outcome.final_page_count as i32)
    .bind(outcome.page_count_unknown)
    .bind(selected_inventory)
    .bind(Utc::now())
    .execute(&state.db)
    .await?;

    Ok(snapshot_id)
}
