use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PDF generation error: {0}")]
    Pdf(String),
}

impl From<lopdf::Error> for RenderError {
    fn from(err: lopdf::Error) -> Self {
        RenderError::Pdf(err.to_string())
    }
}

/// Failure of an artifact producer. Terminal: the pipeline never retries.
#[derive(Error, Debug)]
pub enum ProducerError {
    #[error("render failed: {0}")]
    Render(#[from] RenderError),
    #[error("producer '{producer}' failed: {message}")]
    Failed { producer: String, message: String },
}
