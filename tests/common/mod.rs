#![allow(dead_code)]

pub mod fixtures;
pub mod pdf_assertions;

use lopdf::Document as LopdfDocument;
use serde_json::Value;
use vitae::{DocumentAssembler, FontLibrary, LayoutConfig, PipelineError, RenderReport};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
    pub report: RenderReport,
}

impl GeneratedPdf {
    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }
}

fn into_array(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        other => vec![other],
    }
}

/// Runs the full pipeline in memory with the built-in fonts only.
pub fn render_with(config: &LayoutConfig, text: Value, shapes: Value) -> Result<GeneratedPdf, PipelineError> {
    let mut assembler = DocumentAssembler::new(config, FontLibrary::new());
    assembler.load(into_array(text), into_array(shapes))?;
    assembler.validate()?;
    assembler.render_shapes()?;
    assembler.render_text()?;

    let mut bytes = Vec::new();
    let report = assembler.finalize(&mut bytes)?;
    let doc = LopdfDocument::load_mem(&bytes).map_err(|e| PipelineError::Config(e.to_string()))?;
    Ok(GeneratedPdf { bytes, doc, report })
}

pub fn render(text: Value, shapes: Value) -> Result<GeneratedPdf, PipelineError> {
    render_with(&LayoutConfig::default(), text, shapes)
}
