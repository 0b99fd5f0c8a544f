pub mod config;
pub mod error;
pub mod fallback;
pub mod llm;
pub mod mapper;
pub mod predictor;
pub mod prompt;
pub mod schema;

#[cfg(test)]
mod mock;

pub use config::{ModelPriority, NerConfig};
pub use error::{NerError, Result};
pub use fallback::{Attempt, ModelFallbackCaller, ModelResponse};
pub use llm::{GeminiClient, Generation, Generator};
pub use mapper::MapOutcome;
pub use predictor::{TaskOutcome, TaskPrediction, TaskPredictor};
pub use schema::{AnnotationSpan, ExtractedEntity, LabelResult, PredictionRecord, Task};
