//! Flash-onset detection.

use crate::state::{ProfileNode, Regime};
use gf_core::units::Length;

/// First node at which the rising fluid starts to boil.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlashEvent {
    pub index: usize,
    pub depth: Length,
}

/// Watches the regime sequence for the first liquid → two-phase crossing.
///
/// The event is set once; later crossings (after an undefined stretch, say)
/// are ignored.
#[derive(Debug, Clone, Default)]
pub struct FlashDetector {
    event: Option<FlashEvent>,
}

impl FlashDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the regime of a defined node; returns the event when it is first seen.
    pub fn observe(&mut self, index: usize, depth: Length, regime: Regime) -> Option<FlashEvent> {
        if self.event.is_some() || regime != Regime::TwoPhase {
            return None;
        }
        let event = FlashEvent { index, depth };
        self.event = Some(event);
        Some(event)
    }

    pub fn event(&self) -> Option<FlashEvent> {
        self.event
    }

    /// Scan a completed profile; undefined nodes are skipped.
    pub fn scan<'a>(nodes: impl IntoIterator<Item = &'a ProfileNode>) -> Option<FlashEvent> {
        let mut detector = Self::new();
        for node in nodes {
            if let Some(state) = node.as_resolved() {
                if let Some(event) = detector.observe(state.index, state.depth, state.regime) {
                    return Some(event);
                }
            }
        }
        None
    }
}
