//! Document capabilities the page controllers act through.
//!
//! Controllers never reach for a global page: everything they read or mutate
//! goes through [`Document`]. [`MemoryDocument`] is the in-process element
//! table used to prerender the page and to drive the controllers in tests.

/// Id of the element wrapping the nav links (toggled open on mobile).
pub const NAV_MENU: &str = "navMenu";
/// Id of the mobile menu toggle control.
pub const MENU_TOGGLE: &str = "hamburger";
pub const PROJECTS_GRID: &str = "projectsGrid";
pub const BLOG_GRID: &str = "blogGrid";
pub const CONTACT_FORM: &str = "contactForm";
pub const CONTACT_FIELDS: [&str; 3] = ["name", "email", "message"];

/// Vertical extent of a page section, in document pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionSpan {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

pub trait Document: Send {
    fn contains(&self, element: &str) -> bool;

    /// Replace everything inside `container`. Returns false when the
    /// container is not part of the document.
    fn replace_children(&mut self, container: &str, html: String) -> bool;

    fn set_class(&mut self, element: &str, class: &str, on: bool) -> bool;
    fn has_class(&self, element: &str, class: &str) -> bool;

    /// Sections carrying an id, in document order.
    fn sections(&self) -> Vec<SectionSpan>;

    /// Section ids referenced by nav links, in document order.
    fn nav_targets(&self) -> Vec<String>;
    fn set_link_active(&mut self, section: &str, active: bool);

    fn field_value(&self, field: &str) -> Option<String>;
    fn reset_form(&mut self, form: &str) -> bool;

    fn alert(&mut self, message: &str);
    fn open_in_new_context(&mut self, url: &str);
    /// Smooth-scroll `element` to the top of the viewport.
    fn scroll_into_view(&mut self, element: &str) -> bool;
}

#[derive(Debug, Clone, PartialEq)]
enum Kind {
    Container,
    Section { top: f64, height: f64 },
    NavLink { target: String },
    Form,
    Field { form: String, value: String },
    Control,
}

#[derive(Debug, Clone)]
struct Element {
    id: String,
    kind: Kind,
    classes: Vec<String>,
    html: String,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    elements: Vec<Element>,
    pub alerts: Vec<String>,
    pub opened: Vec<String>,
    pub scrolled_to: Vec<String>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// The structure the portfolio page exposes: menu, nav links, the four
    /// sections with their containers, and the contact form.
    pub fn portfolio_layout() -> Self {
        let mut doc = Self::new();
        doc.add_control(MENU_TOGGLE);
        doc.add_container(NAV_MENU);
        let sections = [
            ("home", 0.0, 700.0),
            ("projects", 700.0, 900.0),
            ("blog", 1600.0, 900.0),
            ("contact", 2500.0, 700.0),
        ];
        for (id, _, _) in &sections {
            doc.add_nav_link(&format!("nav-{}", id), id);
        }
        for (id, top, height) in &sections {
            doc.add_section(id, *top, *height);
        }
        doc.add_container(PROJECTS_GRID);
        doc.add_container(BLOG_GRID);
        doc.add_form(CONTACT_FORM, &CONTACT_FIELDS);
        doc
    }

    fn push(&mut self, id: &str, kind: Kind) {
        self.elements.retain(|e| e.id != id);
        self.elements.push(Element {
            id: id.to_string(),
            kind,
            classes: Vec::new(),
            html: String::new(),
        });
    }

    pub fn add_container(&mut self, id: &str) {
        self.push(id, Kind::Container);
    }

    pub fn add_control(&mut self, id: &str) {
        self.push(id, Kind::Control);
    }

    pub fn add_section(&mut self, id: &str, top: f64, height: f64) {
        self.push(id, Kind::Section { top, height });
    }

    pub fn add_nav_link(&mut self, id: &str, target: &str) {
        self.push(id, Kind::NavLink { target: target.to_string() });
    }

    pub fn add_form(&mut self, id: &str, fields: &[&str]) {
        self.push(id, Kind::Form);
        for field in fields {
            self.push(
                field,
                Kind::Field {
                    form: id.to_string(),
                    value: String::new(),
                },
            );
        }
    }

    /// Drop an element, e.g. to simulate a page without a blog section.
    pub fn remove(&mut self, id: &str) {
        self.elements.retain(|e| e.id != id);
    }

    pub fn set_geometry(&mut self, id: &str, new_top: f64, new_height: f64) -> bool {
        match self.find_mut(id) {
            Some(Element {
                kind: Kind::Section { top, height },
                ..
            }) => {
                *top = new_top;
                *height = new_height;
                true
            }
            _ => false,
        }
    }

    pub fn set_field(&mut self, id: &str, text: &str) -> bool {
        match self.find_mut(id) {
            Some(Element {
                kind: Kind::Field { value, .. },
                ..
            }) => {
                *value = text.to_string();
                true
            }
            _ => false,
        }
    }

    pub fn inner_html(&self, id: &str) -> Option<&str> {
        self.find(id).map(|e| e.html.as_str())
    }

    /// Sections whose nav link currently carries the active mark.
    pub fn active_links(&self) -> Vec<String> {
        self.elements
            .iter()
            .filter_map(|e| match &e.kind {
                Kind::NavLink { target } if e.classes.iter().any(|c| c == "active") => {
                    Some(target.clone())
                }
                _ => None,
            })
            .collect()
    }

    fn find(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id == id)
    }
}

fn set_class_on(el: &mut Element, class: &str, on: bool) {
    let present = el.classes.iter().any(|c| c == class);
    if on && !present {
        el.classes.push(class.to_string());
    } else if !on && present {
        el.classes.retain(|c| c != class);
    }
}

impl Document for MemoryDocument {
    fn contains(&self, element: &str) -> bool {
        self.find(element).is_some()
    }

    fn replace_children(&mut self, container: &str, html: String) -> bool {
        match self.find_mut(container) {
            Some(el) => {
                el.html = html;
                true
            }
            None => false,
        }
    }

    fn set_class(&mut self, element: &str, class: &str, on: bool) -> bool {
        match self.find_mut(element) {
            Some(el) => {
                set_class_on(el, class, on);
                true
            }
            None => false,
        }
    }

    fn has_class(&self, element: &str, class: &str) -> bool {
        self.find(element)
            .map(|e| e.classes.iter().any(|c| c == class))
            .unwrap_or(false)
    }

    fn sections(&self) -> Vec<SectionSpan> {
        self.elements
            .iter()
            .filter_map(|e| match e.kind {
                Kind::Section { top, height } => Some(SectionSpan {
                    id: e.id.clone(),
                    top,
                    height,
                }),
                _ => None,
            })
            .collect()
    }

    fn nav_targets(&self) -> Vec<String> {
        self.elements
            .iter()
            .filter_map(|e| match &e.kind {
                Kind::NavLink { target } => Some(target.clone()),
                _ => None,
            })
            .collect()
    }

    fn set_link_active(&mut self, section: &str, active: bool) {
        for el in self.elements.iter_mut() {
            if matches!(&el.kind, Kind::NavLink { target } if target == section) {
                set_class_on(el, "active", active);
            }
        }
    }

    fn field_value(&self, field: &str) -> Option<String> {
        match self.find(field) {
            Some(Element {
                kind: Kind::Field { value, .. },
                ..
            }) => Some(value.clone()),
            _ => None,
        }
    }

    fn reset_form(&mut self, form: &str) -> bool {
        if !matches!(self.find(form), Some(Element { kind: Kind::Form, .. })) {
            return false;
        }
        for el in self.elements.iter_mut() {
            if let Kind::Field { form: owner, value } = &mut el.kind {
                if owner.as_str() == form {
                    value.clear();
                }
            }
        }
        true
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn open_in_new_context(&mut self, url: &str) {
        self.opened.push(url.to_string());
    }

    fn scroll_into_view(&mut self, element: &str) -> bool {
        if self.find(element).is_none() {
            return false;
        }
        self.scrolled_to.push(element.to_string());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_exposes_page_contract() {
        let doc = MemoryDocument::portfolio_layout();
        assert_eq!(doc.nav_targets(), vec!["home", "projects", "blog", "contact"]);
        assert_eq!(doc.sections().len(), 4);
        assert_eq!(doc.inner_html(PROJECTS_GRID), Some(""));
        assert_eq!(doc.field_value("email"), Some(String::new()));
        assert!(doc.contains(BLOG_GRID) && !doc.contains("sidebar"));
    }

    #[test]
    fn test_replace_children_on_missing_container() {
        let mut doc = MemoryDocument::new();
        assert!(!doc.replace_children("nowhere", "<p>x</p>".into()));
    }

    #[test]
    fn test_reset_form_clears_only_its_fields() {
        let mut doc = MemoryDocument::portfolio_layout();
        doc.add_form("newsletter", &["subscriber"]);
        doc.set_field("name", "Ada");
        doc.set_field("subscriber", "ada@example.com");
        assert!(doc.reset_form(CONTACT_FORM));
        assert_eq!(doc.field_value("name"), Some(String::new()));
        assert_eq!(doc.field_value("subscriber"), Some("ada@example.com".into()));
    }

    #[test]
    fn test_set_class_is_idempotent() {
        let mut doc = MemoryDocument::portfolio_layout();
        doc.set_class(NAV_MENU, "active", true);
        doc.set_class(NAV_MENU, "active", true);
        assert!(doc.has_class(NAV_MENU, "active"));
        doc.set_class(NAV_MENU, "active", false);
        assert!(!doc.has_class(NAV_MENU, "active"));
    }
}
