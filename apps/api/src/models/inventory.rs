//! Inventory data model — the candidate's full resume content as assembled
//! from the document store. Read-only input to scoring; the compile pipeline
//! works on deep copies and never mutates the caller's inventory.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single achievement/description line within an experience or project entry.
///
/// `score` is the only field the core ever writes: the Keyword Scorer
/// overwrites it on every scoring call. 0–100, multiples of 20 until clamped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulletItem {
    pub id: Uuid,
    pub text: String,
    #[serde(default)]
    pub score: u8,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SocialLinks {
    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub website: Option<String>,
}

/// Profile header fields. `name` and `email` are required for compilation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AboutProfile {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    #[serde(default)]
    pub links: SocialLinks,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EducationEntry {
    pub school: String,
    pub degree: String,
    pub dates: String,
    pub location: Option<String>,
}

/// One skills category with an ordered list of skill names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillGroup {
    pub category: String,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub company: String,
    pub role: String,
    pub dates: String,
    pub location: Option<String>,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    pub bullets: Vec<BulletItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub title: String,
    pub role: Option<String>,
    pub dates: String,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    pub bullets: Vec<BulletItem>,
}

/// The full inventory aggregate. Supplied fresh per request; nothing in the
/// core survives across compiles except the snapshot the caller persists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inventory {
    pub about: AboutProfile,
    pub education: Vec<EducationEntry>,
    pub skills: Vec<SkillGroup>,
    pub experience: Vec<ExperienceEntry>,
    pub projects: Vec<ProjectEntry>,
}

impl Inventory {
    /// Checks the profile fields the template cannot render without.
    /// Rejected at the boundary, before any scoring or fitting work.
    pub fn validate_for_compile(&self) -> Result<(), String> {
        if self.about.name.trim().is_empty() {
            return Err("about.name is required for compilation".to_string());
        }
        if self.about.email.trim().is_empty() {
            return Err("about.email is required for compilation".to_string());
        }
        Ok(())
    }

    /// Total bullets across experience and projects. Used by fitter logging.
    pub fn bullet_count(&self) -> usize {
        let experience: usize = self.experience.iter().map(|e| e.bullets.len()).sum();
        let projects: usize = self.projects.iter().map(|p| p.bullets.len()).sum();
        experience + projects
    }
}
