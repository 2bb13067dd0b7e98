use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use url::Url;

const DEFAULT_CONFIG_PATH: &str = "folio.toml";

/// Site settings. Read from `folio.toml` (or `$FOLIO_CONFIG`), then
/// overridden by `FOLIO_*` environment variables. Every key is optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub site_title: String,
    pub owner_name: String,
    pub tagline: String,
    /// Base URL the blog and contact endpoints hang off.
    pub api_base: String,
    pub blog_path: String,
    pub contact_path: String,
    pub request_timeout_secs: u64,
    /// Cap on the blog fetch, which every page view waits on.
    pub blog_timeout_secs: u64,
    /// Fixed-header allowance used when matching scroll offset to sections.
    pub header_offset: f64,
    pub reveal_threshold: f64,
    pub reveal_bottom_inset: f64,
    pub confirmation_message: String,
    pub catalog_dir: Option<PathBuf>,
    pub static_dir: PathBuf,
    pub contact_rate_limit: u64,
    pub contact_rate_window_secs: u64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            site_title: "Portfolio".to_string(),
            owner_name: "Jane Doe".to_string(),
            tagline: "Developer, writer, tinkerer.".to_string(),
            api_base: "http://127.0.0.1:5000".to_string(),
            blog_path: "/api/blog".to_string(),
            contact_path: "/api/contact".to_string(),
            request_timeout_secs: 10,
            blog_timeout_secs: 3,
            header_offset: 100.0,
            reveal_threshold: 0.1,
            reveal_bottom_inset: 50.0,
            confirmation_message: "Thank you for your message! I'll get back to you soon."
                .to_string(),
            catalog_dir: None,
            static_dir: PathBuf::from("site/static"),
            contact_rate_limit: 5,
            contact_rate_window_secs: 600,
        }
    }
}

impl SiteConfig {
    /// Load from the config file and environment. A missing file means
    /// defaults; an unreadable or invalid one is an error.
    pub fn load() -> Result<Self, String> {
        let path = env::var("FOLIO_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let mut config = Self::from_file(Path::new(&path))?;
        config.apply_env(|key| env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            log::info!("[config] {} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)
            .map_err(|e| format!("Cannot read {}: {}", path.display(), e))?;
        Self::from_toml(&raw).map_err(|e| format!("Invalid {}: {}", path.display(), e))
    }

    pub fn from_toml(raw: &str) -> Result<Self, String> {
        toml::from_str(raw).map_err(|e| e.to_string())
    }

    /// Apply `FOLIO_*` overrides. `lookup` is the environment in production.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let text = |key: &str, slot: &mut String| {
            if let Some(v) = lookup(key).filter(|v| !v.is_empty()) {
                *slot = v;
            }
        };
        text("FOLIO_SITE_TITLE", &mut self.site_title);
        text("FOLIO_OWNER_NAME", &mut self.owner_name);
        text("FOLIO_API_BASE", &mut self.api_base);
        text("FOLIO_BLOG_PATH", &mut self.blog_path);
        text("FOLIO_CONTACT_PATH", &mut self.contact_path);
        text("FOLIO_TAGLINE", &mut self.tagline);
        text("FOLIO_CONFIRMATION_MESSAGE", &mut self.confirmation_message);

        // Unparsable numbers keep the current value
        let whole = |key: &str, slot: &mut u64| {
            if let Some(v) = lookup(key).and_then(|v| v.trim().parse().ok()) {
                *slot = v;
            }
        };
        whole("FOLIO_REQUEST_TIMEOUT_SECS", &mut self.request_timeout_secs);
        whole("FOLIO_BLOG_TIMEOUT_SECS", &mut self.blog_timeout_secs);
        whole("FOLIO_CONTACT_RATE_LIMIT", &mut self.contact_rate_limit);
        whole("FOLIO_CONTACT_RATE_WINDOW_SECS", &mut self.contact_rate_window_secs);

        let real = |key: &str, slot: &mut f64| {
            if let Some(v) = lookup(key).and_then(|v| v.trim().parse().ok()) {
                *slot = v;
            }
        };
        real("FOLIO_HEADER_OFFSET", &mut self.header_offset);
        real("FOLIO_REVEAL_THRESHOLD", &mut self.reveal_threshold);
        real("FOLIO_REVEAL_BOTTOM_INSET", &mut self.reveal_bottom_inset);

        if let Some(dir) = lookup("FOLIO_CATALOG_DIR").filter(|v| !v.is_empty()) {
            self.catalog_dir = Some(PathBuf::from(dir));
        }
        if let Some(dir) = lookup("FOLIO_STATIC_DIR").filter(|v| !v.is_empty()) {
            self.static_dir = PathBuf::from(dir);
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        self.blog_url()?;
        self.contact_url()?;
        if !(0.0..=1.0).contains(&self.reveal_threshold) {
            return Err(format!(
                "reveal_threshold must be within 0..=1, got {}",
                self.reveal_threshold
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be at least 1".to_string());
        }
        if self.blog_timeout_secs == 0 {
            return Err("blog_timeout_secs must be at least 1".to_string());
        }
        Ok(())
    }

    pub fn blog_url(&self) -> Result<Url, String> {
        self.endpoint(&self.blog_path)
    }

    pub fn contact_url(&self) -> Result<Url, String> {
        self.endpoint(&self.contact_path)
    }

    fn endpoint(&self, path: &str) -> Result<Url, String> {
        let base = Url::parse(&self.api_base)
            .map_err(|e| format!("Invalid api_base {:?}: {}", self.api_base, e))?;
        base.join(path)
            .map_err(|e| format!("Invalid endpoint path {:?}: {}", path, e))
    }
}
