use std::net::IpAddr;

use rocket::form::Form;
use rocket::request::FlashMessage;
use rocket::response::content::RawHtml;
use rocket::response::{Flash, Redirect};
use rocket::serde::json::{json, Json, Value};
use rocket::State;

use crate::client::HttpApi;
use crate::config::SiteConfig;
use crate::contact::{self, ContactMessage};
use crate::dom::MemoryDocument;
use crate::models::catalog::Catalogs;
use crate::page::{Page, PageEvent};
use crate::rate_limit::RateLimiter;
use crate::render;

// ── Homepage ───────────────────────────────────────────

#[get("/")]
pub async fn homepage(
    config: &State<SiteConfig>,
    catalogs: &State<Catalogs>,
    api: &State<HttpApi>,
    flash: Option<FlashMessage<'_>>,
) -> RawHtml<String> {
    let flash = flash.map(|f| f.message().to_string());
    let api: &HttpApi = api.inner();
    let mut page = Page::new(
        MemoryDocument::portfolio_layout(),
        config.inner(),
        catalogs.inner(),
        api,
        api,
    );
    page.dispatch(PageEvent::Ready).await;
    let doc = page.into_document();
    RawHtml(render::page_html(
        config.inner(),
        &doc,
        flash.as_deref(),
    ))
}

// ── Contact (no-JS path) ───────────────────────────────

#[derive(Debug, FromForm)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
    #[field(name = "_honey")]
    pub honeypot: Option<String>,
}

#[post("/contact", data = "<form>")]
pub async fn contact_submit(
    config: &State<SiteConfig>,
    api: &State<HttpApi>,
    limiter: &State<RateLimiter>,
    client_ip: Option<IpAddr>,
    form: Form<ContactForm>,
) -> Flash<Redirect> {
    let form = form.into_inner();
    let msg = ContactMessage {
        name: form.name,
        email: form.email,
        message: form.message,
    };
    contact::accept(
        api.inner(),
        limiter.inner(),
        &contact::client_key(client_ip),
        &msg,
        form.honeypot.as_deref(),
    )
    .await;

    Flash::success(
        Redirect::to("/#contact"),
        config.confirmation_message.clone(),
    )
}

// ── Health ─────────────────────────────────────────────

#[get("/health")]
pub fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub fn routes() -> Vec<rocket::Route> {
    routes![homepage, contact_submit, health]
}
