use crate::dom::{self, Document, SectionSpan};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

impl MenuState {
    pub fn toggled(self) -> Self {
        match self {
            Self::Closed => Self::Open,
            Self::Open => Self::Closed,
        }
    }
}

/// The section whose span contains `offset`, with spans shifted up by
/// `lookahead` to clear the fixed header. Later sections win on overlap.
pub fn active_section(spans: &[SectionSpan], offset: f64, lookahead: f64) -> Option<&str> {
    spans
        .iter()
        .filter(|s| {
            let top = s.top - lookahead;
            offset > top && offset <= top + s.height
        })
        .last()
        .map(|s| s.id.as_str())
}

/// Mobile menu state plus the active-link tracker.
#[derive(Debug, Clone)]
pub struct NavController {
    menu: MenuState,
    lookahead: f64,
    active: Option<String>,
}

impl NavController {
    pub fn new(lookahead: f64) -> Self {
        NavController {
            menu: MenuState::Closed,
            lookahead,
            active: None,
        }
    }

    pub fn menu(&self) -> MenuState {
        self.menu
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn toggle_menu<D: Document + ?Sized>(&mut self, doc: &mut D) -> MenuState {
        self.set_menu(doc, self.menu.toggled())
    }

    /// Any nav link click closes the menu, even when it is already closed.
    pub fn link_clicked<D: Document + ?Sized>(&mut self, doc: &mut D) -> MenuState {
        self.set_menu(doc, MenuState::Closed)
    }

    fn set_menu<D: Document + ?Sized>(&mut self, doc: &mut D, state: MenuState) -> MenuState {
        self.menu = state;
        doc.set_class(dom::NAV_MENU, "active", state == MenuState::Open);
        state
    }

    /// Recompute the active link from scratch for this offset: clear every
    /// link, then mark at most one.
    pub fn scrolled<D: Document + ?Sized>(&mut self, doc: &mut D, offset: f64) -> Option<&str> {
        let spans = doc.sections();
        let found = active_section(&spans, offset, self.lookahead).map(str::to_string);
        for target in doc.nav_targets() {
            doc.set_link_active(&target, false);
        }
        if let Some(id) = &found {
            doc.set_link_active(id, true);
        }
        self.active = found;
        self.active.as_deref()
    }
}

/// Smooth-scroll handler for in-page anchors. Unknown targets are ignored.
/// Returns whether a scroll happened; the caller always prevents default.
pub fn scroll_to_anchor<D: Document + ?Sized>(doc: &mut D, href: &str) -> bool {
    match href.strip_prefix('#') {
        Some(id) if !id.is_empty() => doc.scroll_into_view(id),
        _ => false,
    }
}
