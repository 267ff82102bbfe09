use thiserror::Error;

/// The first violation found while checking a document, with the JSON path
/// of the offending value (`$` for the document root).
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{path}: {message}")]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn at_root(message: impl Into<String>) -> Self {
        Self::new("$", message)
    }
}

impl From<serde_json::Error> for ValidationError {
    fn from(err: serde_json::Error) -> Self {
        ValidationError::at_root(format!("malformed JSON: {}", err))
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("No element with id '{0}'")]
    NotFound(String),
    #[error("Index {index} is out of range for {len} elements")]
    IndexOutOfRange { index: usize, len: usize },
}
