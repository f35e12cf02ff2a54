//! Infers hyperlink destinations from text content and position.

use crate::config::{LayoutConfig, LinkTargets};

/// Resolves text to an optional URL.
///
/// Checks run most specific first. The short handle only matches when the
/// long handle is absent, because the short one is a substring of the long
/// one. The long handle is shared by two destinations, chosen by comparing
/// the element's *source-space* Y against the disambiguation threshold.
#[derive(Debug, Clone)]
pub struct HyperlinkResolver<'a> {
    targets: &'a LinkTargets,
    disambiguation_y: f32,
}

impl<'a> HyperlinkResolver<'a> {
    pub fn new(config: &'a LayoutConfig) -> Self {
        Self {
            targets: &config.links,
            disambiguation_y: config.threshold_link_disambiguation_y,
        }
    }

    pub fn resolve(&self, text: &str, y_source: f32) -> Option<String> {
        let clean = text.trim();
        if clean.is_empty() {
            return None;
        }
        let t = self.targets;

        if contains(clean, &t.email) {
            Some(format!("mailto:{}", t.email))
        } else if contains(clean, &t.doi_marker) {
            Some(t.doi_url.clone())
        } else if contains(clean, &t.short_handle) && !contains(clean, &t.long_handle) {
            Some(t.short_handle_url.clone())
        } else if contains(clean, &t.long_handle) {
            if y_source < self.disambiguation_y {
                Some(t.upper_url.clone())
            } else {
                Some(t.lower_url.clone())
            }
        } else {
            None
        }
    }
}

/// Substring test where an empty needle never matches, so unset targets stay inert.
fn contains(haystack: &str, needle: &str) -> bool {
    !needle.is_empty() && haystack.contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(text: &str, y: f32) -> Option<String> {
        let config = LayoutConfig::default();
        HyperlinkResolver::new(&config).resolve(text, y)
    }

    #[test]
    fn email_resolves_to_mailto_anywhere() {
        for y in [0.0, 149.0, 150.0, 780.0] {
            assert_eq!(
                resolve("someone@example.com", y).as_deref(),
                Some("mailto:someone@example.com")
            );
        }
    }

    #[test]
    fn doi_marker_resolves() {
        assert_eq!(
            resolve("IEEE Access, DOI: 10.1109/ACCESS", 600.0).as_deref(),
            Some("https://doi.org/10.1109/ACCESS.2021.3094723")
        );
    }

    #[test]
    fn short_handle_is_not_shadowed_by_long_handle() {
        assert_eq!(resolve("@jdoe", 100.0).as_deref(), Some("https://twitter.com/jdoe"));
        assert_eq!(resolve("jdoe-dev", 100.0).as_deref(), Some("https://github.com/jdoe-dev"));
    }

    #[test]
    fn long_handle_is_split_at_threshold() {
        let eps = 0.01;
        assert_eq!(resolve("jdoe-dev", 150.0 - eps).as_deref(), Some("https://github.com/jdoe-dev"));
        assert_eq!(
            resolve("jdoe-dev", 150.0 + eps).as_deref(),
            Some("https://www.linkedin.com/in/jdoe-dev")
        );
        // Strictly less-than: the threshold itself goes to the lower destination.
        assert_eq!(
            resolve("jdoe-dev", 150.0).as_deref(),
            Some("https://www.linkedin.com/in/jdoe-dev")
        );
    }

    #[test]
    fn resolution_is_pure() {
        let config = LayoutConfig::default();
        let resolver = HyperlinkResolver::new(&config);
        for _ in 0..3 {
            assert_eq!(resolver.resolve("jdoe-dev", 120.0), resolver.resolve("jdoe-dev", 120.0));
        }
    }

    #[test]
    fn plain_and_blank_text_have_no_link() {
        assert_eq!(resolve("Software Engineer", 100.0), None);
        assert_eq!(resolve("   ", 100.0), None);
        assert_eq!(resolve("", 100.0), None);
    }

    #[test]
    fn unset_targets_never_match() {
        let config = LayoutConfig {
            links: LinkTargets { email: String::new(), ..Default::default() },
            ..Default::default()
        };
        assert_eq!(HyperlinkResolver::new(&config).resolve("anything", 0.0), None);
    }
}
