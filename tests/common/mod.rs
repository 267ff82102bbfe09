#![allow(dead_code)]

pub mod fixtures;
pub mod pdf_assertions;

use lopdf::Document as LopdfDocument;
use quire::{PrintPipeline, PrintPipelineBuilder, QuireError};
use serde_json::Value;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    /// Load a GeneratedPdf from raw bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, lopdf::Error> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    /// Get the number of pages in the PDF
    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Save PDF to a file for manual debugging
    pub fn save_for_debug(&self, name: &str) -> std::io::Result<()> {
        std::fs::write(format!("test_output_{}.pdf", name), &self.bytes)
    }
}

/// Run an untyped document through `pipeline` and return the raw bytes
pub fn run_pipeline(pipeline: &PrintPipeline, document: &Value) -> Result<Vec<u8>, QuireError> {
    tokio::runtime::Runtime::new()?.block_on(pipeline.generate_json(document))
}

/// Generate a PDF from an untyped document through the full pipeline
pub fn generate_pdf(document: &Value) -> Result<GeneratedPdf, Box<dyn std::error::Error>> {
    let pipeline = PrintPipelineBuilder::new().with_compression(false).build()?;
    Ok(GeneratedPdf::from_bytes(run_pipeline(&pipeline, document)?)?)
}

/// Generate a compressed PDF, as the default pipeline does
pub fn generate_compressed_pdf(document: &Value) -> Result<GeneratedPdf, Box<dyn std::error::Error>> {
    let pipeline = PrintPipelineBuilder::new().build()?;
    Ok(GeneratedPdf::from_bytes(run_pipeline(&pipeline, document)?)?)
}
