use std::net::IpAddr;

use serde::{Deserialize, Serialize};

use crate::dom::{self, Document};
use crate::loader::FetchError;
use crate::rate_limit::RateLimiter;

/// The record posted to the contact endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactMessage {
    /// Collect the three contact fields from the page. Missing fields read as empty.
    pub fn from_document<D: Document + ?Sized>(doc: &D) -> Self {
        let field = |id: &str| doc.field_value(id).unwrap_or_default();
        let [name, email, message] = dom::CONTACT_FIELDS;
        ContactMessage {
            name: field(name),
            email: field(email),
            message: field(message),
        }
    }
}

#[rocket::async_trait]
pub trait ContactTransport: Send + Sync {
    async fn send(&self, msg: &ContactMessage) -> Result<(), FetchError>;
}

/// What actually happened to a submission. Only ever logged: the visitor sees
/// the same confirmation for every variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Delivery {
    Delivered,
    Rejected(u16),
    Unreachable(String),
    /// Not forwarded (honeypot or rate limit).
    Skipped(&'static str),
}

pub async fn deliver(transport: &dyn ContactTransport, msg: &ContactMessage) -> Delivery {
    let delivery = match transport.send(msg).await {
        Ok(()) => Delivery::Delivered,
        Err(FetchError::Status(code)) => Delivery::Rejected(code),
        Err(e) => Delivery::Unreachable(e.to_string()),
    };
    match &delivery {
        Delivery::Delivered => log::info!("[contact] Message from {} delivered", msg.email),
        Delivery::Rejected(code) => {
            log::warn!("[contact] Endpoint rejected message from {} ({})", msg.email, code)
        }
        Delivery::Unreachable(e) => log::warn!("[contact] Endpoint unreachable: {}", e),
        Delivery::Skipped(why) => log::info!("[contact] Skipped: {}", why),
    }
    delivery
}

/// Rate-limit key for a submitting client.
pub fn client_key(ip: Option<IpAddr>) -> String {
    format!(
        "contact:{}",
        ip.map(|ip| ip.to_string()).unwrap_or_else(|| "unknown".into())
    )
}

/// Reason a server-side submission is dropped before delivery, if any.
/// A filled honeypot never counts against the client's rate limit.
pub fn screen(honeypot: Option<&str>, limiter: &RateLimiter, client_key: &str) -> Option<&'static str> {
    if honeypot.is_some_and(|h| !h.trim().is_empty()) {
        return Some("honeypot filled");
    }
    if !limiter.check_and_record(client_key) {
        return Some("rate limited");
    }
    None
}

/// Server-side entry for both submit paths: screen, then deliver.
pub async fn accept(
    transport: &dyn ContactTransport,
    limiter: &RateLimiter,
    client_key: &str,
    msg: &ContactMessage,
    honeypot: Option<&str>,
) -> Delivery {
    match screen(honeypot, limiter, client_key) {
        Some(why) => {
            log::info!("[contact] Not forwarding submission from {}: {}", client_key, why);
            Delivery::Skipped(why)
        }
        None => deliver(transport, msg).await,
    }
}

/// Handle a contact form submit: read the fields, attempt delivery, then
/// confirm once and clear the form whatever the outcome.
pub async fn submit<D: Document + ?Sized>(
    doc: &mut D,
    transport: &dyn ContactTransport,
    confirmation: &str,
) -> Delivery {
    let msg = ContactMessage::from_document(doc);
    let delivery = deliver(transport, &msg).await;
    doc.alert(confirmation);
    doc.reset_form(dom::CONTACT_FORM);
    delivery
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::MemoryDocument;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct CountingTransport(AtomicUsize);

    #[rocket::async_trait]
    impl ContactTransport for CountingTransport {
        async fn send(&self, _msg: &ContactMessage) -> Result<(), FetchError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn hello() -> ContactMessage {
        ContactMessage {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            message: "Hello".into(),
        }
    }

    #[rocket::async_test]
    async fn test_filled_honeypot_is_never_forwarded() {
        let transport = CountingTransport(AtomicUsize::new(0));
        let limiter = RateLimiter::new(1, Duration::from_secs(60));
        let key = client_key(Some("10.0.0.1".parse().unwrap()));

        let d = accept(&transport, &limiter, &key, &hello(), Some("yes")).await;
        assert_eq!(d, Delivery::Skipped("honeypot filled"));
        assert_eq!(transport.0.load(Ordering::SeqCst), 0);

        // Blank honeypot passes, and the bot attempt did not use up the slot
        let d = accept(&transport, &limiter, &key, &hello(), Some("  ")).await;
        assert_eq!(d, Delivery::Delivered);
        assert_eq!(transport.0.load(Ordering::SeqCst), 1);
    }

    #[rocket::async_test]
    async fn test_rate_limited_client_is_not_forwarded() {
        let transport = CountingTransport(AtomicUsize::new(0));
        let limiter = RateLimiter::new(1, Duration::from_secs(60));
        let key = client_key(None);
        assert_eq!(key, "contact:unknown");

        assert_eq!(accept(&transport, &limiter, &key, &hello(), None).await, Delivery::Delivered);
        assert_eq!(
            accept(&transport, &limiter, &key, &hello(), None).await,
            Delivery::Skipped("rate limited")
        );
        assert_eq!(transport.0.load(Ordering::SeqCst), 1);

        let other = client_key(Some("10.0.0.2".parse().unwrap()));
        assert_eq!(accept(&transport, &limiter, &other, &hello(), None).await, Delivery::Delivered);
    }

    #[test]
    fn test_message_from_document() {
        let mut doc = MemoryDocument::portfolio_layout();
        doc.set_field("name", "Ada");
        doc.set_field("email", "ada@example.com");
        doc.set_field("message", "Hello");
        let msg = ContactMessage::from_document(&doc);
        assert_eq!(msg.name, "Ada");
        assert_eq!(msg.message, "Hello");
    }

    #[test]
    fn test_message_serializes_as_three_fields() {
        let msg = ContactMessage {
            name: "A".into(),
            email: "a@b.c".into(),
            message: "hi".into(),
        };
        let v = serde_json::to_value(&msg).unwrap();
        assert_eq!(v, serde_json::json!({"name":"A","email":"a@b.c","message":"hi"}));
    }

    #[test]
    fn test_missing_fields_read_empty() {
        let doc = MemoryDocument::new();
        let msg = ContactMessage::from_document(&doc);
        assert!(msg.name.is_empty() && msg.email.is_empty() && msg.message.is_empty());
    }
}
