use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error};

use crate::config::NerConfig;
use crate::error::{NerError, Result};
use crate::fallback::ModelFallbackCaller;
use crate::llm::{GeminiClient, Generation, Generator};
use crate::mapper::{self, MapOutcome};
use crate::prompt;
use crate::schema::{PredictionRecord, Task};

/// How a task ended. Both `Empty` and `Failed` score 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    Succeeded,
    Empty,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskPrediction {
    pub record: PredictionRecord,
    pub outcome: TaskOutcome,
}

/// Runs tasks one at a time through prompt, model fallback and span mapping.
#[derive(Clone)]
pub struct TaskPredictor {
    caller: ModelFallbackCaller,
}

impl TaskPredictor {
    pub fn new(caller: ModelFallbackCaller) -> Self {
        Self { caller }
    }

    pub fn from_config(config: &NerConfig) -> anyhow::Result<Self> {
        let generator: Arc<dyn Generator> = Arc::new(GeminiClient::new(config)?);
        Ok(Self::new(ModelFallbackCaller::new(
            generator,
            config.models.clone(),
        )))
    }

    pub fn models(&self) -> &[String] {
        self.caller.models().as_slice()
    }

    /// Extract spans from a single text.
    pub async fn extract(&self, input_text: &str) -> Result<MapOutcome> {
        let full_prompt = prompt::build_ner_prompt(input_text);
        let response = self.caller.call(&full_prompt).await?;
        let text = match response.output {
            Generation::Text(text) => text,
            Generation::NoText { reason } => {
                return Err(NerError::NoText {
                    model: response.model,
                    reason,
                });
            }
        };
        let outcome = mapper::map_response(&text, input_text)?;

        debug!(
            model = %response.model,
            spans = outcome.spans.len(),
            skipped = outcome.skipped,
            unmatched = outcome.unmatched,
            "Mapped model response"
        );
        Ok(outcome)
    }

    pub async fn predict_task(&self, task: &Task) -> Result<PredictionRecord> {
        let input_text = task.input_text()?;
        let outcome = self.extract(input_text).await?;
        Ok(PredictionRecord::success(outcome.spans))
    }

    /// One record per task, in order. Failures never abort the batch.
    pub async fn predict(&self, tasks: &[Task]) -> Vec<PredictionRecord> {
        self.predict_with_outcomes(tasks)
            .await
            .into_iter()
            .map(|p| p.record)
            .collect()
    }

    /// Like `predict`, keeping whether each zero-score record came from
    /// missing input or from a failure.
    pub async fn predict_with_outcomes(&self, tasks: &[Task]) -> Vec<TaskPrediction> {
        let mut predictions = Vec::with_capacity(tasks.len());

        for task in tasks {
            let prediction = match self.predict_task(task).await {
                Ok(record) => TaskPrediction {
                    record,
                    outcome: TaskOutcome::Succeeded,
                },
                Err(NerError::MissingInput) => TaskPrediction {
                    record: PredictionRecord::empty(),
                    outcome: TaskOutcome::Empty,
                },
                Err(e) => {
                    error!(task_id = %task_label(task), error = %e, "Task failed");
                    TaskPrediction {
                        record: PredictionRecord::empty(),
                        outcome: TaskOutcome::Failed,
                    }
                }
            };
            predictions.push(prediction);
        }

        predictions
    }
}

fn task_label(task: &Task) -> String {
    match &task.id {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => "<none>".to_string(),
    }
}
