use log::warn;
use thiserror::Error;

/// A problem a back-end recovers from locally by drawing a placeholder or a
/// default. Never propagated; always logged.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderFallback {
    #[error("unknown element '{}' rendered as placeholder ({reason})", .tag.as_deref().unwrap_or("?"))]
    UnknownElement { tag: Option<String>, reason: String },
    #[error("{tag} has no data to plot")]
    EmptyChart { tag: &'static str },
    #[error("color '{value}' could not be parsed, using black")]
    UnparseableColor { value: String },
    #[error("table row {row} has {cells} cells for {headers} headers, padding to fit")]
    TableShape { row: usize, cells: usize, headers: usize },
}

impl RenderFallback {
    pub fn report(&self) {
        warn!("Render fallback: {}", self);
    }
}
