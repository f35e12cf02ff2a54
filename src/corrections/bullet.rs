use super::{Corrected, Correction, CorrectionContext};
use crate::config::LayoutConfig;

/// Prepends a list marker to plain right-column lines that look like list items.
///
/// There is no "list item" flag in the input, so this is inferred from
/// position and typography: right of the column boundary, left of the
/// location-text boundary, neither bold nor italic, and starting with an
/// uppercase letter with more than 3 characters after trimming. The text is
/// shifted left by the indent so the original words stay where they were.
#[derive(Debug, Clone, PartialEq)]
pub struct BulletInjection {
    right_column_x: f32,
    location_text_x: f32,
    indent: f32,
    marker: String,
}

impl BulletInjection {
    pub fn new(config: &LayoutConfig) -> Self {
        Self {
            right_column_x: config.threshold_right_column_x,
            location_text_x: config.threshold_location_text_x,
            indent: config.offset_bullet_indent,
            marker: config.bullet_marker.clone(),
        }
    }
}

fn looks_like_item(text: &str) -> bool {
    let clean = text.trim();
    clean.chars().next().is_some_and(char::is_uppercase) && clean.chars().count() > 3
}

impl Correction for BulletInjection {
    fn name(&self) -> &'static str {
        "bullet-injection"
    }

    fn applies(&self, ctx: &CorrectionContext<'_>) -> bool {
        let el = ctx.element;
        el.x > self.right_column_x
            && el.x < self.location_text_x
            && el.is_plain()
            && looks_like_item(&el.text)
    }

    fn adjust(&self, mut draft: Corrected) -> Corrected {
        draft.text = format!("{} {}", self.marker, draft.text);
        draft.x -= self.indent;
        draft
    }
}
