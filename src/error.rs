// src/error.rs
use crate::assembler::Stage;
use crate::validation::{Collection, ValidationError};
use std::path::PathBuf;
use thiserror::Error;
use vitae_render_lopdf::RenderError;

/// Every fatal failure of a render run.
///
/// Per-element drawing problems are not represented here: they are logged
/// and skipped by the assembler, and only surface in its report.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON in '{path}': {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Expected a JSON array of elements in '{path}'")]
    NotAnArray { path: PathBuf },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Could not decode {collection} element {index}: {source}")]
    Decode {
        collection: Collection,
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Cannot run this step in stage {found:?}; expected {expected:?}")]
    Stage { expected: Stage, found: Stage },

    #[error("Assembly was aborted by an earlier validation failure")]
    Aborted,
}
