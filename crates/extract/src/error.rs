use thiserror::Error;

#[derive(Error, Debug)]
pub enum NerError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("model {model} failed: {source:#}")]
    ModelCall {
        model: String,
        #[source]
        source: anyhow::Error,
    },

    /// Only the last attempt's failure is kept.
    #[error("all {attempts} models failed, last error: {last}")]
    AllModelsFailed { attempts: usize, last: Box<NerError> },

    #[error("no models configured")]
    NoModelsConfigured,

    /// The model answered but gave no text, e.g. a safety block.
    #[error("model {model} returned no text (finish reason: {reason})")]
    NoText { model: String, reason: String },

    #[error("invalid model response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("task has no input text")]
    MissingInput,

    #[error("task text is not a string: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, NerError>;
