//! Heuristic visual corrections applied to text before it is drawn.
//!
//! Each heuristic is a [`Correction`] policy. Policies decide from the
//! *original* element and its transformed Y, and only adjust the draft they
//! are handed, so the order in which they run does not matter.

mod bullet;
mod date;

pub use bullet::BulletInjection;
pub use date::DateAlignment;

use crate::config::LayoutConfig;
use vitae_types::TextElement;

/// Text content and X position after corrections.
#[derive(Debug, Clone, PartialEq)]
pub struct Corrected {
    pub text: String,
    pub x: f32,
}

/// What a policy may look at when deciding whether it applies.
#[derive(Debug, Clone, Copy)]
pub struct CorrectionContext<'a> {
    pub element: &'a TextElement,
    /// Y of the element in target space.
    pub y_target: f32,
}

pub trait Correction {
    fn name(&self) -> &'static str;

    fn applies(&self, ctx: &CorrectionContext<'_>) -> bool;

    /// Adjusts `draft`; only called when [`applies`](Correction::applies) is true.
    fn adjust(&self, draft: Corrected) -> Corrected;
}

/// Runs a set of correction policies over each text element.
#[derive(Default)]
pub struct PrecisionCorrector {
    policies: Vec<Box<dyn Correction>>,
}

impl PrecisionCorrector {
    /// A corrector with no policies; output equals input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Date alignment followed by bullet injection.
    pub fn standard(config: &LayoutConfig) -> Self {
        Self::new()
            .with(DateAlignment::new(config))
            .with(BulletInjection::new(config))
    }

    pub fn with<C: Correction + 'static>(mut self, policy: C) -> Self {
        self.policies.push(Box::new(policy));
        self
    }

    pub fn policy_names(&self) -> Vec<&'static str> {
        self.policies.iter().map(|p| p.name()).collect()
    }

    pub fn correct(&self, element: &TextElement, y_target: f32) -> Corrected {
        let ctx = CorrectionContext { element, y_target };
        self.policies.iter().fold(
            Corrected { text: element.text.clone(), x: element.x },
            |draft, policy| {
                if policy.applies(&ctx) {
                    log::trace!("{} applied to {:?}", policy.name(), element.text);
                    policy.adjust(draft)
                } else {
                    draft
                }
            },
        )
    }
}
