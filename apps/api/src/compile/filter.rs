//! Constraint filtering — prunes scored bullets and drops thin entries.
//!
//! Within each entry, bullets below `min_score` are removed and survivors are
//! stable-sorted descending by score (ties keep their original order). An
//! entry left with fewer than `min_bullets` survivors is dropped whole.
//! Idempotent: reapplying with the same parameters is a no-op.

use crate::models::inventory::{BulletItem, Inventory};

/// Applies the score threshold and minimum-bullets floor to a scored
/// inventory. The input is cloned; about, education, and skills pass through
/// untouched.
pub fn apply_constraints(inventory: &Inventory, min_score: u8, min_bullets: usize) -> Inventory {
    let mut tailored = inventory.clone();

    for job in &mut tailored.experience {
        prune_bullets(&mut job.bullets, min_score);
    }
    tailored
        .experience
        .retain(|job| job.bullets.len() >= min_bullets);

    for project in &mut tailored.projects {
        prune_bullets(&mut project.bullets, min_score);
    }
    tailored
        .projects
        .retain(|project| project.bullets.len() >= min_bullets);

    tailored
}

fn prune_bullets(bullets: &mut Vec<BulletItem>, min_score: u8) {
    bullets.retain(|b| b.score >= min_score);
    // sort_by is stable: equal scores keep their original relative order.
    bullets.sort_by(|a, b| b.score.cmp(&a.score));
}
