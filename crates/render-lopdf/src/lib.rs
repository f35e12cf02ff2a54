//! Single-page PDF canvas using lopdf.
//!
//! This crate provides the drawing surface the vitae renderer paints on:
//! filled rectangles, positioned text runs with WinAnsi-encoded fonts, and
//! URI link annotations, written out as one PDF page.

mod canvas;
pub mod encoding;
mod error;
pub mod fonts;

pub use canvas::{DocumentInfo, LinkAnnotation, PdfCanvas, Stroke, TextRun};
pub use error::RenderError;
pub use fonts::FontLibrary;
