use serde::{Deserialize, Serialize};

/// Glyph shown when an entry has no icon of its own.
pub const DEFAULT_ICON: &str = "📝";

/// Link used when an entry has no destination yet.
pub const PLACEHOLDER_LINK: &str = "#";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Project {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BlogPost {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    /// Accepted from remote payloads, never rendered.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Read-only view a card is rendered from. Absent optional fields fall back
/// to `DEFAULT_ICON` / `PLACEHOLDER_LINK` here, so the renderer never sees a hole.
pub trait CardEntry {
    fn title(&self) -> &str;
    fn body(&self) -> &str;
    fn raw_icon(&self) -> Option<&str>;
    fn raw_link(&self) -> Option<&str>;

    fn tags(&self) -> &[String] {
        &[]
    }

    fn date(&self) -> Option<&str> {
        None
    }

    fn icon(&self) -> &str {
        non_empty(self.raw_icon()).unwrap_or(DEFAULT_ICON)
    }

    fn link(&self) -> &str {
        non_empty(self.raw_link()).unwrap_or(PLACEHOLDER_LINK)
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

impl CardEntry for Project {
    fn title(&self) -> &str {
        &self.title
    }
    fn body(&self) -> &str {
        &self.description
    }
    fn raw_icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }
    fn raw_link(&self) -> Option<&str> {
        self.link.as_deref()
    }
    fn tags(&self) -> &[String] {
        &self.tags
    }
}

impl CardEntry for BlogPost {
    fn title(&self) -> &str {
        &self.title
    }
    fn body(&self) -> &str {
        &self.excerpt
    }
    fn raw_icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }
    fn raw_link(&self) -> Option<&str> {
        self.link.as_deref()
    }
    fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }
}

/// True when every entry can be shown as a card (non-empty title).
pub fn all_displayable<E: CardEntry>(entries: &[E]) -> bool {
    entries.iter().all(|e| !e.title().trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blog_post_decodes_with_missing_optionals() {
        let post: BlogPost = serde_json::from_str(r#"{"id":7,"title":"Hello"}"#).unwrap();
        assert_eq!(post.icon(), DEFAULT_ICON);
        assert_eq!(post.link(), PLACEHOLDER_LINK);
        assert_eq!(CardEntry::date(&post), None);
        assert_eq!(post.body(), "");
    }

    #[test]
    fn test_remote_blog_record_ignores_unknown_fields() {
        let json = r#"{"id":1,"title":"T","excerpt":"E","content":"long body","date":"March 15, 2024","tags":["Rust"],"link":"/blog/1"}"#;
        let post: BlogPost = serde_json::from_str(json).unwrap();
        assert_eq!(post.link(), "/blog/1");
        assert_eq!(post.tags, vec!["Rust".to_string()]);
    }

    #[test]
    fn test_empty_icon_and_link_fall_back() {
        let p = Project {
            id: 1,
            title: "X".into(),
            description: String::new(),
            tags: vec![],
            icon: Some("  ".into()),
            link: Some(String::new()),
        };
        assert_eq!(p.icon(), DEFAULT_ICON);
        assert_eq!(p.link(), "#");
    }

    #[test]
    fn test_all_displayable_rejects_blank_title() {
        let posts = vec![BlogPost {
            id: 1,
            title: " ".into(),
            excerpt: String::new(),
            date: None,
            icon: None,
            link: None,
            tags: vec![],
        }];
        assert!(!all_displayable(&posts));
        assert!(all_displayable::<BlogPost>(&[]));
    }
}
