//! Static display tables. Read-only and shared process-wide.

pub mod explanations;
pub mod importance;

pub use explanations::explanation;
pub use importance::{importance, top_features, FEATURE_IMPORTANCE};
