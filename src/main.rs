#[macro_use]
extern crate rocket;

use std::process;
use std::time::Duration;

use rocket::fs::{FileServer, Options};
use rocket::response::content::RawHtml;
use rocket::{Build, Rocket};

mod boot;
mod client;
mod config;
mod contact;
mod dom;
mod loader;
mod models;
mod nav;
mod page;
mod rate_limit;
mod render;
mod reveal;
mod routes;


use client::HttpApi;
use config::SiteConfig;
use models::catalog::Catalogs;
use rate_limit::RateLimiter;

#[catch(404)]
fn not_found() -> RawHtml<String> {
    RawHtml("<html><body style='font-family:sans-serif;text-align:center;padding:80px'><h1>404</h1><p>Page not found.</p><a href='/'>← Home</a></body></html>".to_string())
}

#[catch(500)]
fn server_error() -> RawHtml<String> {
    RawHtml("<html><body style='font-family:sans-serif;text-align:center;padding:80px'><h1>500</h1><p>Internal server error.</p><a href='/'>← Home</a></body></html>".to_string())
}

/// Assemble the server from a validated config.
pub fn build(config: SiteConfig) -> Result<Rocket<Build>, String> {
    let catalogs = Catalogs::load(config.catalog_dir.as_deref());
    let api = HttpApi::new(&config)?;
    let limiter = RateLimiter::new(
        config.contact_rate_limit,
        Duration::from_secs(config.contact_rate_window_secs),
    );
    let static_dir = config.static_dir.clone();

    Ok(rocket::build()
        .manage(config)
        .manage(catalogs)
        .manage(api)
        .manage(limiter)
        .mount("/static", FileServer::new(static_dir, Options::Index | Options::Missing))
        .mount("/", routes::public::routes())
        .mount("/api", routes::api::routes())
        .register("/", catchers![not_found, server_error]))
}

#[launch]
fn rocket() -> _ {
    env_logger::init();

    let config = match SiteConfig::load() {
        Ok(c) => c,
        Err(e) => {
            log::error!("[config] {}", e);
            process::exit(1);
        }
    };

    // Verify directories and endpoints before launch
    boot::run(&config);

    match build(config) {
        Ok(rocket) => rocket,
        Err(e) => {
            log::error!("[boot] {}", e);
            process::exit(1);
        }
    }
}
