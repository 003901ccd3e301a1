pub mod analysis;

pub use analysis::{Feature, FeatureVector, RiskAssessment, RiskLevel, SchemaError, FEATURE_COUNT};
