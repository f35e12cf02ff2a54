use crate::cache::{CacheStats, WidthCache};
use crate::config::LayoutConfig;
use std::io::Write;
use vitae_render_lopdf::{DocumentInfo, FontLibrary, PdfCanvas, RenderError};

/// The live output page plus the memoized width measurements for one render.
#[derive(Debug)]
pub struct RenderContext {
    canvas: PdfCanvas,
    widths: WidthCache,
}

impl RenderContext {
    pub fn new(config: &LayoutConfig, fonts: FontLibrary) -> Self {
        let mut canvas = PdfCanvas::new(config.page_width, config.page_height, fonts);
        let meta = &config.metadata;
        canvas.set_info(DocumentInfo {
            title: meta.title.clone(),
            author: meta.author.clone(),
            subject: meta.subject.clone(),
            producer: Some(format!("vitae {}", env!("CARGO_PKG_VERSION"))),
        });
        Self {
            canvas,
            widths: WidthCache::new(config.width_cache_capacity),
        }
    }

    pub fn canvas(&self) -> &PdfCanvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut PdfCanvas {
        &mut self.canvas
    }

    /// Rendered width of `text`, measured once per distinct (text, font, size).
    pub fn string_width(&mut self, text: &str, font: &str, size: f32) -> Result<f32, RenderError> {
        let canvas = &self.canvas;
        self.widths
            .get_or_measure(text, font, size, || canvas.string_width(text, font, size))
    }

    pub fn width_stats(&self) -> CacheStats {
        self.widths.stats()
    }

    pub fn finish<W: Write>(self, writer: &mut W) -> Result<(), RenderError> {
        log::debug!("Width cache: {:?}", self.widths.stats());
        self.canvas.finish(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths_are_memoized() {
        let mut ctx = RenderContext::new(&LayoutConfig::default(), FontLibrary::new());
        let first = ctx.string_width("Hello", "Helvetica", 10.0).unwrap();
        let second = ctx.string_width("Hello", "Helvetica", 10.0).unwrap();
        assert_eq!(first, second);
        assert!(first > 0.0);
        assert_eq!(ctx.width_stats().hits, 1);
        assert_eq!(ctx.width_stats().misses, 1);
    }

    #[test]
    fn unknown_font_width_is_an_error() {
        let mut ctx = RenderContext::new(&LayoutConfig::default(), FontLibrary::new());
        assert!(ctx.string_width("Hello", "Missing", 10.0).is_err());
    }
}
