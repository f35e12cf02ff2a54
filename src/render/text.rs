use super::RenderContext;
use crate::config::{InkSpread, LayoutConfig};
use crate::corrections::PrecisionCorrector;
use crate::fonts::FontResolver;
use crate::hyperlinks::HyperlinkResolver;
use crate::transform::CoordinateTransformer;
use vitae_render_lopdf::{RenderError, Stroke, TextRun};
use vitae_types::{Rect, TextElement};

/// What was placed on the page for one text element.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawnText {
    pub text: String,
    pub font: String,
    pub x: f32,
    pub y: f32,
    pub link: Option<String>,
}

/// Runs one text element through transform, corrections, font and color
/// resolution, drawing, and link registration.
pub struct TextRenderer<'a> {
    transformer: CoordinateTransformer,
    corrector: PrecisionCorrector,
    fonts: FontResolver,
    links: HyperlinkResolver<'a>,
    default_family: &'a str,
    link_padding: f32,
    ink_spread: Option<&'a InkSpread>,
}

impl<'a> TextRenderer<'a> {
    pub fn new(config: &'a LayoutConfig, fonts: FontResolver) -> Self {
        Self {
            transformer: CoordinateTransformer::new(config),
            corrector: PrecisionCorrector::standard(config),
            fonts,
            links: HyperlinkResolver::new(config),
            default_family: &config.fonts.default_family,
            link_padding: config.link_hitbox_padding,
            ink_spread: config.ink_spread.as_ref(),
        }
    }

    /// Replaces the correction policies.
    pub fn with_corrector(mut self, corrector: PrecisionCorrector) -> Self {
        self.corrector = corrector;
        self
    }

    /// Draws `element`. On error nothing has been added to the page.
    pub fn draw(&mut self, ctx: &mut RenderContext, element: &TextElement) -> Result<DrawnText, RenderError> {
        let y = self.transformer.transform_y(element.y);
        let corrected = self.corrector.correct(element, y);

        let family = if element.font_family.is_empty() {
            self.default_family
        } else {
            element.font_family.as_str()
        };
        let font = self.fonts.resolve(family, element.bold, element.italic);
        let fill = CoordinateTransformer::rgb_from_int(element.color);
        let stroke = self.ink_spread.map(|ink| Stroke {
            color: fill,
            width: ink.stroke_width(&corrected.text, corrected.x, element.size),
        });

        // Disambiguation uses the source-space position, not the corrected one.
        let link = self.links.resolve(&corrected.text, element.y);

        ctx.canvas_mut().draw_string(&TextRun {
            text: &corrected.text,
            x: corrected.x,
            y,
            font: &font,
            size: element.size,
            fill,
            stroke,
        })?;

        if let Some(uri) = &link {
            match ctx.string_width(&corrected.text, &font, element.size) {
                Ok(width) => {
                    let rect = Rect::from_edges(
                        corrected.x,
                        y - self.link_padding,
                        corrected.x + width,
                        y + element.size,
                    );
                    log::debug!("Link {} over {:?}", uri, rect);
                    ctx.canvas_mut().link_url(uri, rect);
                }
                Err(e) => log::warn!("Could not measure {:?} for link {}: {}", corrected.text, uri, e),
            }
        }

        Ok(DrawnText { text: corrected.text, font, x: corrected.x, y, link })
    }
}
