use super::{Corrected, Correction, CorrectionContext};
use crate::config::LayoutConfig;

/// Nudges right-hand dates in the page body slightly to the left.
///
/// Fires only when the element is past the horizontal threshold *and* its
/// target-space Y is above `page_height - y_limit`.
#[derive(Debug, Clone, PartialEq)]
pub struct DateAlignment {
    threshold_x: f32,
    y_floor: f32,
    offset: f32,
}

impl DateAlignment {
    pub fn new(config: &LayoutConfig) -> Self {
        Self {
            threshold_x: config.threshold_date_align_x,
            y_floor: config.page_height - config.threshold_date_align_y_limit,
            offset: config.offset_date_correction,
        }
    }
}

impl Correction for DateAlignment {
    fn name(&self) -> &'static str {
        "date-alignment"
    }

    fn applies(&self, ctx: &CorrectionContext<'_>) -> bool {
        ctx.element.x > self.threshold_x && ctx.y_target > self.y_floor
    }

    fn adjust(&self, mut draft: Corrected) -> Corrected {
        draft.x -= self.offset;
        draft
    }
}
