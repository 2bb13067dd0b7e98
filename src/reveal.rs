use std::collections::HashSet;

use crate::dom::{Document, SectionSpan};

/// Class carrying the entrance animation.
pub const REVEALED: &str = "revealed";

/// Fraction of `span` visible in a viewport starting at `scroll_y`, with the
/// viewport's bottom edge pulled up by `bottom_inset`.
pub fn visible_ratio(span: &SectionSpan, scroll_y: f64, viewport_height: f64, bottom_inset: f64) -> f64 {
    if span.height <= 0.0 {
        return 0.0;
    }
    let view_top = scroll_y;
    let view_bottom = scroll_y + viewport_height - bottom_inset;
    let overlap = view_bottom.min(span.top + span.height) - view_top.max(span.top);
    (overlap.max(0.0) / span.height).min(1.0)
}

/// One-shot entrance animation per section. Once revealed a section stays
/// revealed; later visibility changes are ignored.
#[derive(Debug, Clone)]
pub struct RevealTrigger {
    threshold: f64,
    bottom_inset: f64,
    revealed: HashSet<String>,
}

impl RevealTrigger {
    pub fn new(threshold: f64, bottom_inset: f64) -> Self {
        RevealTrigger {
            threshold,
            bottom_inset,
            revealed: HashSet::new(),
        }
    }

    pub fn is_revealed(&self, section: &str) -> bool {
        self.revealed.contains(section)
    }

    /// Intersection report for one section. Returns true only on the first
    /// crossing of the threshold.
    pub fn intersected<D: Document + ?Sized>(&mut self, doc: &mut D, section: &str, ratio: f64) -> bool {
        if ratio <= 0.0 || ratio < self.threshold || self.revealed.contains(section) {
            return false;
        }
        if !doc.set_class(section, REVEALED, true) {
            return false;
        }
        self.revealed.insert(section.to_string());
        log::debug!("[reveal] Section {} revealed", section);
        true
    }

    /// Check every section against the current viewport. Returns the ids
    /// revealed by this call.
    pub fn viewport_changed<D: Document + ?Sized>(
        &mut self,
        doc: &mut D,
        scroll_y: f64,
        viewport_height: f64,
    ) -> Vec<String> {
        let mut newly = Vec::new();
        for span in doc.sections() {
            let ratio = visible_ratio(&span, scroll_y, viewport_height, self.bottom_inset);
            if self.intersected(&mut *doc, &span.id, ratio) {
                newly.push(span.id);
            }
        }
        newly
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::MemoryDocument;

    fn span(top: f64, height: f64) -> SectionSpan {
        SectionSpan {
            id: "s".into(),
            top,
            height,
        }
    }

    #[test]
    fn test_visible_ratio_respects_bottom_inset() {
        // Viewport 0..800, effective bottom 750
        assert_eq!(visible_ratio(&span(700.0, 500.0), 0.0, 800.0, 50.0), 0.1);
        assert_eq!(visible_ratio(&span(760.0, 500.0), 0.0, 800.0, 50.0), 0.0);
        assert_eq!(visible_ratio(&span(0.0, 400.0), 0.0, 800.0, 50.0), 1.0);
        assert_eq!(visible_ratio(&span(0.0, 0.0), 0.0, 800.0, 50.0), 0.0);
    }

    #[test]
    fn test_below_threshold_does_not_reveal() {
        let mut doc = MemoryDocument::portfolio_layout();
        let mut trigger = RevealTrigger::new(0.1, 50.0);
        assert!(!trigger.intersected(&mut doc, "projects", 0.05));
        assert!(!doc.has_class("projects", REVEALED));
        assert!(trigger.intersected(&mut doc, "projects", 0.1));
        assert!(doc.has_class("projects", REVEALED));
    }

    #[test]
    fn test_unknown_section_is_ignored() {
        let mut doc = MemoryDocument::portfolio_layout();
        let mut trigger = RevealTrigger::new(0.1, 50.0);
        assert!(!trigger.intersected(&mut doc, "nowhere", 1.0));
        assert!(!trigger.is_revealed("nowhere"));
    }

    #[test]
    fn test_viewport_reveals_visible_sections_once() {
        let mut doc = MemoryDocument::portfolio_layout();
        let mut trigger = RevealTrigger::new(0.1, 50.0);
        // 0..750 effective: home fully, projects 50/900 (< 10%)
        assert_eq!(trigger.viewport_changed(&mut doc, 0.0, 800.0), vec!["home"]);
        assert_eq!(trigger.viewport_changed(&mut doc, 600.0, 800.0), vec!["projects"]);
        assert!(trigger.viewport_changed(&mut doc, 0.0, 800.0).is_empty());
        assert!(doc.has_class("home", REVEALED));
    }
}
