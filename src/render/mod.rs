// src/render/mod.rs
//! Drawing onto the single output page.
//!
//! [`RenderContext`] owns the canvas and the width cache; the renderers hold
//! only configuration and borrow the context for each element they draw.

mod context;
mod shapes;
mod text;

pub use context::RenderContext;
pub use shapes::{ShapeOutcome, ShapeRenderer};
pub use text::{DrawnText, TextRenderer};
