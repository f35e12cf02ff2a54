//! Font variant selection and font library setup.

use crate::config::FontConfig;
use std::collections::HashSet;
use std::path::Path;
use vitae_render_lopdf::fonts::{HELVETICA, HELVETICA_BOLD, HELVETICA_OBLIQUE};
use vitae_render_lopdf::FontLibrary;

const BOLD_SUFFIX: &str = "-Bold";
const ITALIC_SUFFIX: &str = "-Italic";

/// Maps a requested family plus bold/italic flags to a registered font variant.
#[derive(Debug)]
pub struct FontResolver {
    registered: HashSet<String>,
    fallback_family: String,
    warned: HashSet<String>,
}

impl FontResolver {
    pub fn new(config: &FontConfig, fonts: &FontLibrary) -> Self {
        Self {
            registered: fonts.names().into_iter().collect(),
            fallback_family: config.fallback_family.clone(),
            warned: HashSet::new(),
        }
    }

    /// The variant name for a family and style, regardless of registration.
    ///
    /// A family that already carries a style suffix is used verbatim. There is
    /// no combined bold-italic variant; bold wins.
    pub fn variant_name(family: &str, bold: bool, italic: bool) -> String {
        if has_style_suffix(family) {
            family.to_string()
        } else if bold {
            format!("{}{}", family, BOLD_SUFFIX)
        } else if italic {
            format!("{}{}", family, ITALIC_SUFFIX)
        } else {
            family.to_string()
        }
    }

    /// Resolves to a registered variant, degrading to the fallback family
    /// (with one warning per missing variant) when the variant is unknown.
    pub fn resolve(&mut self, family: &str, bold: bool, italic: bool) -> String {
        let variant = Self::variant_name(family, bold, italic);
        if self.registered.contains(&variant) {
            return variant;
        }

        // A suffixed family names its own style; the element flags do not apply.
        let (bold, italic) = if has_style_suffix(family) {
            (family.contains(BOLD_SUFFIX), family.contains(ITALIC_SUFFIX))
        } else {
            (bold, italic)
        };
        let fallback = self.fallback_variant(bold, italic);
        if self.warned.insert(variant.clone()) {
            log::warn!("Font {} is not available, using {}", variant, fallback);
        }
        fallback
    }

    fn fallback_variant(&self, bold: bool, italic: bool) -> String {
        let styled = if self.fallback_family == HELVETICA {
            match (bold, italic) {
                (true, _) => HELVETICA_BOLD.to_string(),
                (false, true) => HELVETICA_OBLIQUE.to_string(),
                (false, false) => HELVETICA.to_string(),
            }
        } else {
            Self::variant_name(&self.fallback_family, bold, italic)
        };
        [styled, self.fallback_family.clone()]
            .into_iter()
            .find(|name| self.registered.contains(name))
            .unwrap_or_else(|| HELVETICA.to_string())
    }
}

fn has_style_suffix(family: &str) -> bool {
    family.contains(BOLD_SUFFIX) || family.contains(ITALIC_SUFFIX)
}

/// Builds the font library for a render: built-in fallbacks, every configured
/// asset file that exists, and (with `system-fonts`) installed fonts for
/// variants whose asset file is missing.
pub fn load_font_library(config: &FontConfig, assets_dir: &Path) -> FontLibrary {
    let mut fonts = FontLibrary::new();
    fonts.load_assets(assets_dir, &config.files);

    #[cfg(feature = "system-fonts")]
    for name in config.files.keys() {
        if fonts.contains(name) {
            continue;
        }
        let family = name
            .trim_end_matches(BOLD_SUFFIX)
            .trim_end_matches(ITALIC_SUFFIX);
        let bold = name.ends_with(BOLD_SUFFIX);
        let italic = name.ends_with(ITALIC_SUFFIX);
        fonts.register_system(name, family, bold, italic);
    }

    fonts
}
