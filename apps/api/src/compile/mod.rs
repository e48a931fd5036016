// Compilation pipeline.
// Implements: constraint filtering, the greedy page-fitting loop, and the
// compile endpoint that drives score → filter → fit → snapshot.

pub mod filter;
pub mod fitter;
pub mod handlers;

pub use filter::apply_constraints;
pub use fitter::{fit_to_pages, FitOutcome, MAX_FIT_ITERATIONS};
