//! The single page as an event-driven runtime.
//!
//! A [`Page`] owns its document and controller state and takes one
//! [`PageEvent`] at a time. Network-bound events resolve through a single
//! `await` before anything is rendered.

use std::collections::HashMap;

use crate::config::SiteConfig;
use crate::contact::{self, ContactTransport, Delivery};
use crate::dom::{self, Document};
use crate::loader::{self, BlogSource, Origin};
use crate::models::catalog::Catalogs;
use crate::models::entry::CardEntry;
use crate::nav::{self, NavController};
use crate::render;
use crate::reveal::RevealTrigger;

#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    Ready,
    MenuToggle,
    NavLinkClick { section: String },
    AnchorClick { href: String },
    /// Click on the body of card `index` in `container`.
    CardClick { container: String, index: usize },
    /// Click on the card's own action link; does not bubble to the card.
    CardActionClick { container: String, index: usize },
    Scroll { offset: f64, viewport_height: f64 },
    Intersect { section: String, ratio: f64 },
    Submit,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventResult {
    Continue,
    PreventDefault,
}

pub struct Page<'a, D: Document> {
    doc: D,
    config: &'a SiteConfig,
    catalogs: &'a Catalogs,
    blog: &'a dyn BlogSource,
    contact: &'a dyn ContactTransport,
    nav: NavController,
    reveal: RevealTrigger,
    /// Links of the cards currently shown, per container.
    card_links: HashMap<&'static str, Vec<String>>,
    pub blog_origin: Option<Origin>,
    pub last_delivery: Option<Delivery>,
}

impl<'a, D: Document> Page<'a, D> {
    pub fn new(
        doc: D,
        config: &'a SiteConfig,
        catalogs: &'a Catalogs,
        blog: &'a dyn BlogSource,
        contact: &'a dyn ContactTransport,
    ) -> Self {
        Page {
            doc,
            config,
            catalogs,
            blog,
            contact,
            nav: NavController::new(config.header_offset),
            reveal: RevealTrigger::new(config.reveal_threshold, config.reveal_bottom_inset),
            card_links: HashMap::new(),
            blog_origin: None,
            last_delivery: None,
        }
    }

    pub fn document(&self) -> &D {
        &self.doc
    }

    pub fn document_mut(&mut self) -> &mut D {
        &mut self.doc
    }

    pub fn into_document(self) -> D {
        self.doc
    }

    pub fn nav(&self) -> &NavController {
        &self.nav
    }

    pub fn reveal(&self) -> &RevealTrigger {
        &self.reveal
    }

    pub async fn dispatch(&mut self, event: PageEvent) -> EventResult {
        match event {
            PageEvent::Ready => {
                self.ready().await;
                EventResult::Continue
            }
            PageEvent::MenuToggle => {
                self.nav.toggle_menu(&mut self.doc);
                EventResult::Continue
            }
            PageEvent::NavLinkClick { section } => {
                self.nav.link_clicked(&mut self.doc);
                nav::scroll_to_anchor(&mut self.doc, &format!("#{}", section));
                EventResult::PreventDefault
            }
            PageEvent::AnchorClick { href } => {
                nav::scroll_to_anchor(&mut self.doc, &href);
                EventResult::PreventDefault
            }
            PageEvent::CardClick { container, index }
            | PageEvent::CardActionClick { container, index } => {
                self.open_card(&container, index);
                EventResult::PreventDefault
            }
            PageEvent::Scroll {
                offset,
                viewport_height,
            } => {
                self.nav.scrolled(&mut self.doc, offset);
                self.reveal
                    .viewport_changed(&mut self.doc, offset, viewport_height);
                EventResult::Continue
            }
            PageEvent::Intersect { section, ratio } => {
                self.reveal.intersected(&mut self.doc, &section, ratio);
                EventResult::Continue
            }
            PageEvent::Submit => {
                let delivery = contact::submit(
                    &mut self.doc,
                    self.contact,
                    &self.config.confirmation_message,
                )
                .await;
                self.last_delivery = Some(delivery);
                EventResult::PreventDefault
            }
        }
    }

    /// Page-ready: projects from the catalog, blog through the loader.
    /// Without a blog container the endpoint is never contacted.
    async fn ready(&mut self) {
        let projects = &self.catalogs.projects;
        if render::render_projects(&mut self.doc, projects) {
            self.card_links
                .insert(dom::PROJECTS_GRID, links_of(projects));
        } else {
            self.card_links.remove(dom::PROJECTS_GRID);
        }

        if self.doc.contains(dom::BLOG_GRID) {
            let load = loader::resolve(self.blog, &self.catalogs.blog_posts).await;
            if render::render_blog(&mut self.doc, &load.posts) {
                self.card_links.insert(dom::BLOG_GRID, links_of(&load.posts));
            } else {
                self.card_links.remove(dom::BLOG_GRID);
            }
            self.blog_origin = Some(load.origin);
        } else {
            log::debug!("[page] No blog container, skipping fetch");
            self.card_links.remove(dom::BLOG_GRID);
            self.blog_origin = None;
        }
        self.nav.scrolled(&mut self.doc, 0.0);
    }

    /// The action link and the card body share one handler, so a click on
    /// either opens the link exactly once.
    fn open_card(&mut self, container: &str, index: usize) {
        let link = self
            .card_links
            .get(container)
            .and_then(|links| links.get(index));
        if let Some(link) = link {
            self.doc.open_in_new_context(link);
        }
    }
}

fn links_of<E: CardEntry>(entries: &[E]) -> Vec<String> {
    entries
        .iter()
        .map(|e| render::safe_href(e.link()).to_string())
        .collect()
}
