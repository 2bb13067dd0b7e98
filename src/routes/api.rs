use std::net::IpAddr;

use rocket::serde::json::{json, Json, Value};
use rocket::State;
use serde::Deserialize;

use crate::client::HttpApi;
use crate::contact::{self, ContactMessage};
use crate::rate_limit::RateLimiter;

// ── Contact (script path) ──────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ContactSubmit {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
    #[serde(rename = "_honey", default)]
    pub honeypot: Option<String>,
}

/// Same-origin relay for the page script. Screens and forwards like the
/// form path, and answers success whatever happened.
#[post("/contact", format = "json", data = "<form>")]
pub async fn contact_submit(
    api: &State<HttpApi>,
    limiter: &State<RateLimiter>,
    client_ip: Option<IpAddr>,
    form: Json<ContactSubmit>,
) -> Json<Value> {
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

    Json(json!({ "success": true }))
}

pub fn routes() -> Vec<rocket::Route> {
    routes![contact_submit]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_reads_honeypot_and_tolerates_missing_fields() {
        let s: ContactSubmit =
            serde_json::from_str(r#"{"name":"Bot","message":"buy","_honey":"yes"}"#).unwrap();
        assert_eq!(s.honeypot.as_deref(), Some("yes"));
        assert_eq!(s.email, "");

        let s: ContactSubmit =
            serde_json::from_str(r#"{"name":"Ada","email":"a@b.c","message":"Hi"}"#).unwrap();
        assert_eq!(s.honeypot, None);
    }
}
