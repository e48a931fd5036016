// Keyword scoring pipeline.
// Implements: keyword extraction from a job description, per-bullet relevance
// scoring. Pure and deterministic — no store or backend calls in here.

pub mod handlers;
pub mod keywords;
pub mod scorer;

pub use scorer::score_inventory;
