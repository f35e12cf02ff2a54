use super::RenderContext;
use crate::config::LayoutConfig;
use vitae_render_lopdf::RenderError;
use vitae_types::{Rect, RectShape, Rgb, ShapeElement};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeOutcome {
    Drawn,
    /// Fill color is outside tolerance of the primary color.
    Filtered,
    Unsupported,
}

/// Draws decoration rectangles in the primary color.
///
/// Shape coordinates are taken as already being in target space and are
/// drawn untransformed, unlike text. Rectangles of any other color are
/// dropped without an error.
#[derive(Debug, Clone, Copy)]
pub struct ShapeRenderer {
    primary: Rgb,
    tolerance: f32,
}

impl ShapeRenderer {
    pub fn new(config: &LayoutConfig) -> Self {
        Self {
            primary: config.color_primary,
            tolerance: config.color_tolerance,
        }
    }

    pub fn matches(&self, rect: &RectShape) -> bool {
        rect.fill_color.approx_eq(&self.primary, self.tolerance)
    }

    pub fn draw(&self, ctx: &mut RenderContext, shape: &ShapeElement) -> Result<ShapeOutcome, RenderError> {
        let rect = match shape {
            ShapeElement::Rect(rect) => rect,
            ShapeElement::Unsupported => return Ok(ShapeOutcome::Unsupported),
        };
        if !self.matches(rect) {
            log::debug!("Skipping rect at ({}, {}) with fill {:?}", rect.x, rect.y, rect.fill_color);
            return Ok(ShapeOutcome::Filtered);
        }
        ctx.canvas_mut()
            .fill_rect(Rect::new(rect.x, rect.y, rect.width, rect.height), rect.fill_color)?;
        Ok(ShapeOutcome::Drawn)
    }
}
