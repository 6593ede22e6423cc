pub mod labels;
pub mod pipeline;
pub mod predictor;
pub mod validator;

pub use labels::LabelResolver;
pub use pipeline::CoveragePipeline;
pub use predictor::PredictionService;
