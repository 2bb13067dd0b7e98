use log::{error, info, warn};
use std::fs;
use std::path::Path;
use std::process;

use crate::config::SiteConfig;

const CATALOG_FILES: &[&str] = &["projects.json", "blog_posts.json"];

#[derive(Debug, Default, PartialEq)]
pub struct BootReport {
    pub warnings: u32,
    pub errors: u32,
}

/// Run all boot checks. Call this before Rocket launches.
/// Aborts the process if anything the page cannot be served without is absent.
pub fn run(config: &SiteConfig) {
    info!("Folio boot check starting...");
    let report = check(config);

    if report.errors > 0 {
        error!(
            "Boot check FAILED: {} error(s), {} warning(s). Aborting.",
            report.errors, report.warnings
        );
        process::exit(1);
    }

    if report.warnings > 0 {
        warn!(
            "Boot check passed with {} warning(s). Some features may not work correctly.",
            report.warnings
        );
    } else {
        info!("Boot check passed. All systems go.");
    }
}

pub fn check(config: &SiteConfig) -> BootReport {
    let mut report = BootReport::default();

    // ── 1. Static directory ────────────────────────────
    let static_dir = config.static_dir.as_path();
    if !static_dir.exists() {
        match fs::create_dir_all(static_dir) {
            Ok(_) => info!("  Created directory: {}", static_dir.display()),
            Err(e) => {
                error!("  FAILED to create directory {}: {}", static_dir.display(), e);
                report.errors += 1;
            }
        }
    }

    // ── 2. Stylesheet ──────────────────────────────────
    let stylesheet = static_dir.join("css/style.css");
    if !stylesheet.exists() {
        warn!("  Missing static asset: {} (page will be unstyled)", stylesheet.display());
        report.warnings += 1;
    }

    // ── 3. Catalog overrides ───────────────────────────
    if let Some(dir) = &config.catalog_dir {
        if !dir.is_dir() {
            warn!("  Catalog directory {} not found, using built-in content", dir.display());
            report.warnings += 1;
        } else {
            for file in CATALOG_FILES {
                if !dir.join(file).exists() {
                    warn!("  No {} in {}, using built-in entries", file, dir.display());
                    report.warnings += 1;
                }
            }
        }
    }

    // ── 4. Endpoints ───────────────────────────────────
    match config.blog_url() {
        Ok(url) => info!("  Blog endpoint: {}", url),
        Err(e) => {
            error!("  {}", e);
            report.errors += 1;
        }
    }

    // ── 5. Rocket.toml exists ──────────────────────────
    if !Path::new("Rocket.toml").exists() {
        warn!("  Rocket.toml not found, using Rocket defaults");
        report.warnings += 1;
    }

    report
}
