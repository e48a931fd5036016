//! Inventory store — read-only fetch of resume content by owner.
//!
//! The core never depends on the storage schema beyond these row shapes:
//! profile, education, skills, experience, and projects are assembled into one
//! explicit `Inventory` aggregate at this boundary. Malformed rows (bad bullet
//! JSON) are rejected here rather than deep-guessed downstream.

use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::inventory::{
    AboutProfile, BulletItem, EducationEntry, ExperienceEntry, Inventory, ProjectEntry, SkillGroup,
    SocialLinks,
};

// ────────────────────────────────────────────────────────────────────────────
// Row types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, FromRow)]
struct AboutRow {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub website: Option<String>,
    #[allow(dead_code)]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
struct EducationRow {
    pub school: String,
    pub degree: String,
    pub dates: String,
    pub location: Option<String>,
}

#[derive(Debug, Clone, FromRow)]
struct SkillRow {
    pub category: String,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, FromRow)]
struct ExperienceRow {
    pub company: String,
    pub role: String,
    pub dates: String,
    pub location: Option<String>,
    pub tech_stack: Vec<String>,
    /// JSONB array of `BulletItem`.
    pub bullets: Value,
}

#[derive(Debug, Clone, FromRow)]
struct ProjectRow {
    pub title: String,
    pub role: Option<String>,
    pub dates: String,
    pub tech_stack: Vec<String>,
    pub bullets: Value,
}

// ────────────────────────────────────────────────────────────────────────────
// Fetch
// ────────────────────────────────────────────────────────────────────────────

/// Fetches the full inventory for one owner and assembles the aggregate.
///
/// Fails with `NotFound` when the owner has no profile row, and with
/// `Validation` when stored bullet JSON does not conform to `BulletItem`.
pub async fn fetch_inventory(db: &PgPool, owner_id: Uuid) -> Result<Inventory, AppError> {
    let about = sqlx::query_as::<_, AboutRow>(
        "SELECT name, email, phone, location, github, linkedin, website, updated_at \
         FROM about WHERE owner_id = $1",
    )
    .bind(owner_id)
    .fetch_optional(db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("No profile found for owner {owner_id}")))?;

    let education = sqlx::query_as::<_, EducationRow>(
        "SELECT school, degree, dates, location FROM education \
         WHERE owner_id = $1 ORDER BY position",
    )
    .bind(owner_id)
    .fetch_all(db)
    .await?;

    let skills = sqlx::query_as::<_, SkillRow>(
        "SELECT category, skills FROM skills WHERE owner_id = $1 ORDER BY position",
    )
    .bind(owner_id)
    .fetch_all(db)
    .await?;

    let experience = sqlx::query_as::<_, ExperienceRow>(
        "SELECT company, role, dates, location, tech_stack, bullets FROM experiences \
         WHERE owner_id = $1 ORDER BY position",
    )
    .bind(owner_id)
    .fetch_all(db)
    .await?;

    let projects = sqlx::query_as::<_, ProjectRow>(
        "SELECT title, role, dates, tech_stack, bullets FROM projects \
         WHERE owner_id = $1 ORDER BY position",
    )
    .bind(owner_id)
    .fetch_all(db)
    .await?;

    Ok(Inventory {
        about: AboutProfile {
            name: about.name,
            email: about.email,
            phone: about.phone,
            location: about.location,
            links: SocialLinks {
                github: about.github,
                linkedin: about.linkedin,
                website: about.website,
            },
        },
        education: education
            .into_iter()
            .map(|row| EducationEntry {
                school: row.school,
                degree: row.degree,
                dates: row.dates,
                location: row.location,
            })
            .collect(),
        skills: skills
            .into_iter()
            .map(|row| SkillGroup {
                category: row.category,
                skills: row.skills,
            })
            .collect(),
        experience: experience
            .into_iter()
            .map(|row| {
                Ok(ExperienceEntry {
                    bullets: parse_bullets(row.bullets, "experience", &row.company)?,
                    company: row.company,
                    role: row.role,
                    dates: row.dates,
                    location: row.location,
                    tech_stack: row.tech_stack,
                })
            })
            .collect::<Result<Vec<_>, AppError>>()?,
        projects: projects
            .into_iter()
            .map(|row| {
                Ok(ProjectEntry {
                    bullets: parse_bullets(row.bullets, "project", &row.title)?,
                    title: row.title,
                    role: row.role,
                    dates: row.dates,
                    tech_stack: row.tech_stack,
                })
            })
            .collect::<Result<Vec<_>, AppError>>()?,
    })
}

fn parse_bullets(raw: Value, section: &str, label: &str) -> Result<Vec<BulletItem>, AppError> {
    serde_json::from_value(raw).map_err(|e| {
        AppError::Validation(format!("Malformed bullets on {section} entry '{label}': {e}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_bullets_accepts_conforming_array() {
        let raw = json!([
            {"id": "5f0c8a3e-2f6a-4bfa-9a3e-111111111111", "text": "Shipped it", "score": 40},
            {"id": "5f0c8a3e-2f6a-4bfa-9a3e-222222222222", "text": "Scaled it"}
        ]);
        let bullets = parse_bullets(raw, "experience", "Acme").unwrap();
        assert_eq!(bullets.len(), 2);
        assert_eq!(bullets[0].score, 40);
        assert_eq!(bullets[1].score, 0, "missing score defaults to 0");
    }

    #[test]
    fn test_parse_bullets_rejects_malformed_json() {
        let raw = json!([{"text_only": true}]);
        let err = parse_bullets(raw, "project", "Sidecar").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(err.to_string().contains("Sidecar"));
    }

    #[test]
    fn test_parse_bullets_empty_array_is_fine() {
        let bullets = parse_bullets(json!([]), "experience", "Acme").unwrap();
        assert!(bullets.is_empty());
    }
}
