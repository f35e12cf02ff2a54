use crate::config::LayoutConfig;
use vitae_types::Rgb;

/// Maps source-space (top-down) coordinates to target-space (bottom-up) ones.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateTransformer {
    page_height: f32,
    y_global_offset: f32,
}

impl CoordinateTransformer {
    pub fn new(config: &LayoutConfig) -> Self {
        Self {
            page_height: config.page_height,
            y_global_offset: config.y_global_offset,
        }
    }

    /// `page_height - y + y_global_offset`
    pub fn transform_y(&self, y_source: f32) -> f32 {
        self.page_height - y_source + self.y_global_offset
    }

    /// Exact inverse of [`transform_y`](Self::transform_y).
    pub fn inverse_y(&self, y_target: f32) -> f32 {
        self.page_height + self.y_global_offset - y_target
    }

    pub fn rgb_from_int(color: u32) -> Rgb {
        Rgb::from_packed(color)
    }
}
