//! Renders a CV from coordinate-positioned text and shape collections into a
//! single-page PDF.
//!
//! The input is two JSON arrays whose elements carry absolute positions:
//! text in top-down source space, rectangles already in bottom-up page space.
//! [`DocumentAssembler`] validates them, applies a few visual corrections,
//! infers hyperlinks, and draws everything through a `lopdf` canvas.

pub mod assembler;
pub mod cache;
pub mod config;
pub mod corrections;
pub mod error;
pub mod fonts;
pub mod hyperlinks;
pub mod render;
pub mod transform;
pub mod validation;

pub use assembler::{render_to_file, DocumentAssembler, RenderPaths, RenderReport, Stage, TextFailure};
pub use cache::WidthCache;
pub use config::{DocumentMetadata, FontConfig, InkSpread, LayoutConfig, LinkTargets};
pub use corrections::{BulletInjection, Correction, DateAlignment, PrecisionCorrector};
pub use error::PipelineError;
pub use fonts::{load_font_library, FontResolver};
pub use hyperlinks::HyperlinkResolver;
pub use transform::CoordinateTransformer;
pub use validation::{DataValidator, ValidationError, ValidationIssue};

pub use vitae_render_lopdf::{FontLibrary, RenderError};
pub use vitae_types::{Rect, RectShape, Rgb, ShapeElement, TextElement};
