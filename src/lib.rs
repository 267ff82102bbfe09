//! quire: declarative document instructions rendered twice.
//!
//! One validated [`Document`] drives both an interactive HTML node tree for
//! the editing surface ([`render_interactive`]) and a paginated PDF
//! ([`PrintPipeline`]). The member crates can be used on their own; this
//! crate ties them together and owns the async producer boundary.

pub mod config;
pub mod error;
pub mod pipeline;

pub use config::PipelineConfig;
pub use error::{ExternalProducerError, QuireError};
pub use pipeline::{PrintPipeline, PrintPipelineBuilder};

pub use quire_chart as chart;
pub use quire_model::ops;
pub use quire_model::{
    Document, EditError, Element, ElementKind, ValidationError, default_element, load_content_lenient,
    parse_document, validate_document, validate_element,
};
pub use quire_render_html::{
    HtmlElement, HtmlNode, InteractiveOptions, render_interactive, render_preview_html,
};
pub use quire_render_pdf::{
    ArtifactProducer, LopdfProducer, PrintDocument, ProducerError, RenderError, print_table,
    project_document,
};
pub use quire_richtext::{InlineKind, InlineToken, tokenize};
pub use quire_style::{sanitize_colors, to_hex};
pub use quire_types::{Color, ElementId};
