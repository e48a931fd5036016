//! Bullet relevance scoring against a job description.
//!
//! Every bullet gets 20 points per token present in the keyword set, clamped
//! at 100. Scoring is pure: same (text, job description) pair, same score,
//! regardless of bullet order or neighboring entries.

use std::collections::HashSet;

use crate::models::inventory::Inventory;
use crate::scoring::keywords::{extract_keywords, tokenize};

const POINTS_PER_MATCH: usize = 20;
const MAX_SCORE: usize = 100;

/// Scores a single bullet text against the keyword set.
/// Empty text scores 0. Each matching token occurrence counts once.
pub fn score_text(text: &str, keywords: &HashSet<String>) -> u8 {
    if text.is_empty() {
        return 0;
    }

    let matches = tokenize(text)
        .iter()
        .filter(|word| keywords.contains(word.as_str()))
        .count();

    (matches * POINTS_PER_MATCH).min(MAX_SCORE) as u8
}

/// Overwrites the `score` field of every experience and project bullet.
/// Consumes and returns the inventory; nothing else is touched.
pub fn score_inventory(mut inventory: Inventory, job_description: &str) -> Inventory {
    let keywords = extract_keywords(job_description);

    for job in &mut inventory.experience {
        for bullet in &mut job.bullets {
            bullet.score = score_text(&bullet.text, &keywords);
        }
    }

    for project in &mut inventory.projects {
        for bullet in &mut project.bullets {
            bullet.score = score_text(&bullet.text, &keywords);
        }
    }

    inventory
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::inventory::{
        AboutProfile, BulletItem, ExperienceEntry, Inventory, ProjectEntry, SocialLinks,
    };
    use uuid::Uuid;

    fn make_bullet(text: &str) -> BulletItem {
        BulletItem {
            id: Uuid::new_v4(),
            text: text.to_string(),
            score: 0,
        }
    }

    fn make_inventory(experience_bullets: Vec<&str>, project_bullets: Vec<&str>) -> Inventory {
        Inventory {
            about: AboutProfile {
                name: "Ada Lovelace".to_string(),
                email: "ada@example.com".to_string(),
                phone: None,
                location: None,
                links: SocialLinks::default(),
            },
            education: vec![],
            skills: vec![],
            experience: vec![ExperienceEntry {
                company: "Acme".to_string(),
                role: "Engineer".to_string(),
                dates: "2020 – 2024".to_string(),
                location: None,
                tech_stack: vec![],
                bullets: experience_bullets.into_iter().map(make_bullet).collect(),
            }],
            projects: vec![ProjectEntry {
                title: "Sidecar".to_string(),
                role: None,
                dates: "2023".to_string(),
                tech_stack: vec![],
                bullets: project_bullets.into_iter().map(make_bullet).collect(),
            }],
        }
    }

    const JD: &str = "We need a React developer with Docker and Kubernetes experience";

    #[test]
    fn test_three_keyword_matches_score_60() {
        let keywords = extract_keywords(JD);
        let score = score_text("Built React dashboards using Docker and Kubernetes", &keywords);
        assert_eq!(score, 60);
    }

    #[test]
    fn test_short_acronyms_do_not_count() {
        // "aws" is 3 letters and never tokenizes, on either side.
        let keywords = extract_keywords("We need a React developer with Docker and AWS experience");
        let score = score_text("Built React dashboards using Docker and AWS", &keywords);
        assert_eq!(score, 40);
    }

    #[test]
    fn test_score_is_multiple_of_20_until_clamped() {
        let keywords = extract_keywords(JD);
        for text in [
            "",
            "nothing relevant here",
            "React only",
            "React and Docker",
        ] {
            let score = score_text(text, &keywords);
            assert_eq!(score % 20, 0, "score {score} for {text:?}");
            assert!(score <= 100);
        }
    }

    #[test]
    fn test_six_matches_clamp_at_100() {
        let keywords = extract_keywords("alpha beta gamma delta epsilon zeta");
        let score = score_text("alpha beta gamma delta epsilon zeta", &keywords);
        assert_eq!(score, 100);
    }

    #[test]
    fn test_repeated_token_occurrences_each_count() {
        let keywords = extract_keywords("kubernetes deployments");
        let score = score_text("kubernetes kubernetes kubernetes", &keywords);
        assert_eq!(score, 60);
    }

    #[test]
    fn test_empty_text_scores_zero() {
        let keywords = extract_keywords(JD);
        assert_eq!(score_text("", &keywords), 0);
    }

    #[test]
    fn test_no_matches_scores_zero() {
        let keywords = extract_keywords(JD);
        assert_eq!(score_text("Maintained legacy COBOL batch jobs", &keywords), 0);
    }

    #[test]
    fn test_score_inventory_overwrites_all_bullets() {
        let inventory = make_inventory(
            vec![
                "Built React dashboards using Docker and Kubernetes",
                "Wrote docs",
            ],
            vec!["React component library"],
        );
        let scored = score_inventory(inventory, JD);

        assert_eq!(scored.experience[0].bullets[0].score, 60);
        assert_eq!(scored.experience[0].bullets[1].score, 0);
        assert_eq!(scored.projects[0].bullets[0].score, 20);
    }

    #[test]
    fn test_scoring_is_order_independent() {
        let forward = make_inventory(vec!["React work", "Docker work"], vec![]);
        let reversed = make_inventory(vec!["Docker work", "React work"], vec![]);

        let forward = score_inventory(forward, JD);
        let reversed = score_inventory(reversed, JD);

        // Permuting bullets does not change any individual bullet's score.
        assert_eq!(
            forward.experience[0].bullets[0].score,
            reversed.experience[0].bullets[1].score
        );
        assert_eq!(
            forward.experience[0].bullets[1].score,
            reversed.experience[0].bullets[0].score
        );
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let a = score_inventory(make_inventory(vec!["React and Docker daily"], vec![]), JD);
        let b = score_inventory(make_inventory(vec!["React and Docker daily"], vec![]), JD);
        assert_eq!(a.experience[0].bullets[0].score, b.experience[0].bullets[0].score);
    }
}
