pub mod record;

pub use record::{CoverageLevel, FeatureRecord, CATEGORICAL_FIELDS, NUMERICAL_FIELDS, REQUIRED_FIELDS};
