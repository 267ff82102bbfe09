use quire_model::ValidationError;
use quire_render_pdf::ProducerError;
use std::time::Duration;
use thiserror::Error;

/// The producer boundary failed. Never retried.
#[derive(Error, Debug)]
pub enum ExternalProducerError {
    #[error("Producer '{producer}' failed: {source}")]
    Failed {
        producer: String,
        #[source]
        source: ProducerError,
    },

    #[error("Producer '{producer}' timed out after {timeout:?}")]
    TimedOut { producer: String, timeout: Duration },

    #[error("Producer '{producer}' task aborted: {message}")]
    Aborted { producer: String, message: String },
}

/// Every error the facade can return.
#[derive(Error, Debug)]
pub enum QuireError {
    #[error("Invalid document: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Producer(#[from] ExternalProducerError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Pipeline configuration is invalid: {0}")]
    Config(String),
}

impl From<serde_json::Error> for QuireError {
    fn from(e: serde_json::Error) -> Self {
        QuireError::Validation(ValidationError::from(e))
    }
}
