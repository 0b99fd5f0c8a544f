use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::config::ModelPriority;
use crate::error::{NerError, Result};
use crate::llm::{Generation, Generator};

/// Outcome of asking a single model.
#[derive(Debug)]
pub enum Attempt {
    Success(Generation),
    Failure(NerError),
}

/// Reply from the first model that answered.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelResponse {
    pub model: String,
    pub output: Generation,
}

/// Tries each configured model in order until one succeeds.
#[derive(Clone)]
pub struct ModelFallbackCaller {
    generator: Arc<dyn Generator>,
    models: ModelPriority,
}

impl ModelFallbackCaller {
    pub fn new(generator: Arc<dyn Generator>, models: ModelPriority) -> Self {
        Self { generator, models }
    }

    pub fn models(&self) -> &ModelPriority {
        &self.models
    }

    async fn attempt(&self, model: &str, prompt: &str) -> Attempt {
        match self.generator.generate(model, prompt).await {
            Ok(output) => Attempt::Success(output),
            Err(source) => Attempt::Failure(NerError::ModelCall {
                model: model.to_string(),
                source,
            }),
        }
    }

    /// Returns the first reply, even one without text. When every model
    /// fails, only the last failure is reported.
    pub async fn call(&self, prompt: &str) -> Result<ModelResponse> {
        let mut last_failure = None;
        let mut attempts = 0;

        for model in self.models.as_slice() {
            attempts += 1;
            match self.attempt(model, prompt).await {
                Attempt::Success(output) => {
                    debug!(model = %model, attempts, "Model call succeeded");
                    return Ok(ModelResponse {
                        model: model.clone(),
                        output,
                    });
                }
                Attempt::Failure(err) => {
                    warn!(model = %model, error = %err, "Model failed, trying next model");
                    last_failure = Some(err);
                }
            }
        }

        match last_failure {
            Some(last) => {
                error!(attempts, "All models failed");
                Err(NerError::AllModelsFailed {
                    attempts,
                    last: Box::new(last),
                })
            }
            None => Err(NerError::NoModelsConfigured),
        }
    }
}
