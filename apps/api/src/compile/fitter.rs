//! Greedy Page-Fitter — render, measure, cut the cheapest content, repeat.
//!
//! # Loop shape
//! Each iteration renders the current tailored inventory, submits it to the
//! typesetting backend, and reads back a page count. Over budget → enumerate
//! cutting moves, apply the single cheapest one, go again. The loop ends when
//! the document fits, no move remains, or the iteration cap is reached — the
//! last two are best-effort outcomes, not errors, so the caller can warn the
//! user instead of blocking them.
//!
//! # Cutting moves
//! - trim-bullet: remove the last (lowest-scoring, bullets are pre-sorted
//!   descending) bullet of an entry above the minimum-bullets floor.
//!   Cost = that bullet's score.
//! - drop-entry: remove a whole entry sitting at exactly the floor.
//!   Cost = sum of its bullet scores plus a fixed bias (+100 for experience,
//!   +0 for projects) so whole employers outlive projects of equal relevance.
//!
//! Ties break by encounter order: experience before projects, ascending index.
//! Greedy with no backtracking — every re-measure invokes the external
//! typesetting process, so few well-chosen cuts beat exhaustive search.

use std::path::Path;

use tracing::{debug, warn};

use crate::errors::AppError;
use crate::models::application::Constraints;
use crate::models::inventory::Inventory;
use crate::render::template::fill_template;
use crate::render::typesetter::Typesetter;

/// Hard safety bound on render-measure-cut iterations.
pub const MAX_FIT_ITERATIONS: u32 = 50;

/// Dropping a whole experience entry costs this much on top of its bullet
/// scores; project entries carry no bias.
const EXPERIENCE_DROP_BIAS: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Experience,
    Projects,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    TrimBullet,
    DropEntry,
}

/// One candidate content reduction. Ephemeral — recomputed every iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub kind: MoveKind,
    pub section: Section,
    pub index: usize,
    pub cost: u32,
}

/// Result of one fitting run. `final_page_count` is the last successfully
/// measured count; when `page_count_unknown` is set the backend failed twice
/// and the count reflects an earlier iteration (or 0 if none succeeded).
#[derive(Debug, Clone)]
pub struct FitOutcome {
    pub snapshot: Inventory,
    pub final_page_count: u32,
    pub page_count_unknown: bool,
    pub iterations: u32,
}

/// Runs the greedy page-fitting loop on an already scored-and-filtered
/// inventory. `output_path` receives the rendered PDF on every successful
/// typesetting pass; the last write is the final artifact. When the outcome
/// carries `page_count_unknown` the loop broke out after a render, so any
/// file at `output_path` does not match the returned snapshot.
pub async fn fit_to_pages(
    tailored: Inventory,
    constraints: &Constraints,
    template: &str,
    typesetter: &dyn Typesetter,
    output_path: &Path,
) -> Result<FitOutcome, AppError> {
    let mut tailored = tailored;
    let mut iterations = 0u32;
    let mut page_count = 0u32;
    let mut page_count_unknown = true;

    loop {
        iterations += 1;

        let tex = fill_template(template, &tailored, constraints)?;

        match measure_with_retry(typesetter, &tex, output_path).await {
            Some(pages) => {
                page_count = pages;
                page_count_unknown = false;
                debug!(iterations, pages, bullets = tailored.bullet_count(), "Measured");
            }
            None => {
                // Backend failed twice. Surface the degraded state instead of
                // fabricating a page count.
                page_count_unknown = true;
                warn!(iterations, "Typesetting failed twice; page count unknown");
                break;
            }
        }

        if page_count <= constraints.max_pages {
            break;
        }
        if iterations >= MAX_FIT_ITERATIONS {
            warn!(
                page_count,
                max_pages = constraints.max_pages,
                "Iteration cap reached while still over budget"
            );
            break;
        }

        match cheapest_move(&tailored, constraints.min_bullets_per_entry) {
            Some(mv) => {
                debug!(?mv.kind, ?mv.section, mv.index, mv.cost, "Applying cut");
                apply_move(&mut tailored, mv);
            }
            None => {
                warn!(page_count, "No cutting moves remain; returning best effort");
                break;
            }
        }
    }

    Ok(FitOutcome {
        snapshot: tailored,
        final_page_count: page_count,
        page_count_unknown,
        iterations,
    })
}

/// One typesetting attempt plus a single retry. Returns the page count, or
/// `None` after the second failure (diagnostics are logged on both).
async fn measure_with_retry(
    typesetter: &dyn Typesetter,
    tex: &str,
    output_path: &Path,
) -> Option<u32> {
    match typesetter.compile(tex, output_path).await {
        Ok(output) => Some(output.page_count),
        Err(first) => {
            warn!("Typesetting attempt failed, retrying once: {first}");
            match typesetter.compile(tex, output_path).await {
                Ok(output) => Some(output.page_count),
                Err(second) => {
                    warn!("Typesetting retry failed: {second}");
                    None
                }
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Move enumeration and application
// ────────────────────────────────────────────────────────────────────────────

/// Enumerates every legal cutting move in encounter order.
pub fn enumerate_moves(inventory: &Inventory, min_bullets: usize) -> Vec<Move> {
    let mut moves = Vec::new();

    for (index, job) in inventory.experience.iter().enumerate() {
        push_entry_moves(
            &mut moves,
            Section::Experience,
            index,
            job.bullets.iter().map(|b| b.score as u32),
            min_bullets,
            EXPERIENCE_DROP_BIAS,
        );
    }

    for (index, project) in inventory.projects.iter().enumerate() {
        push_entry_moves(
            &mut moves,
            Section::Projects,
            index,
            project.bullets.iter().map(|b| b.score as u32),
            min_bullets,
            0,
        );
    }

    moves
}

fn push_entry_moves(
    moves: &mut Vec<Move>,
    section: Section,
    index: usize,
    scores: impl Iterator<Item = u32>,
    min_bullets: usize,
    drop_bias: u32,
) {
    let scores: Vec<u32> = scores.collect();

    if scores.len() > min_bullets {
        // Bullets are sorted descending, so the last one is the cheapest.
        if let Some(&last) = scores.last() {
            moves.push(Move {
                kind: MoveKind::TrimBullet,
                section,
                index,
                cost: last,
            });
        }
    } else if scores.len() == min_bullets && !scores.is_empty() {
        moves.push(Move {
            kind: MoveKind::DropEntry,
            section,
            index,
            cost: scores.iter().sum::<u32>() + drop_bias,
        });
    }
}

/// Picks the minimum-cost move. Strict `<` keeps the first of equal costs,
/// which is the encounter-order tie-break.
pub fn cheapest_move(inventory: &Inventory, min_bullets: usize) -> Option<Move> {
    let mut best: Option<Move> = None;
    for mv in enumerate_moves(inventory, min_bullets) {
        match best {
            Some(current) if mv.cost >= current.cost => {}
            _ => best = Some(mv),
        }
    }
    best
}

/// Mutates the working copy: trims the last bullet or removes the entry.
pub fn apply_move(inventory: &mut Inventory, mv: Move) {
    match (mv.section, mv.kind) {
        (Section::Experience, MoveKind::TrimBullet) => {
            inventory.experience[mv.index].bullets.pop();
        }
        (Section::Experience, MoveKind::DropEntry) => {
            inventory.experience.remove(mv.index);
        }
        (Section::Projects, MoveKind::TrimBullet) => {
            inventory.projects[mv.index].bullets.pop();
        }
        (Section::Projects, MoveKind::DropEntry) => {
            inventory.projects.remove(mv.index);
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
