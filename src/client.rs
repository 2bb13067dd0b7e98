use std::time::Duration;

use url::Url;

use crate::config::SiteConfig;
use crate::contact::{ContactMessage, ContactTransport};
use crate::loader::{decode_posts, BlogSource, FetchError};
use crate::models::entry::BlogPost;

/// HTTP client for the external blog and contact endpoints.
pub struct HttpApi {
    client: reqwest::Client,
    blog_timeout: Duration,
    blog_url: Url,
    contact_url: Url,
}

impl HttpApi {
    pub fn new(config: &SiteConfig) -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| format!("HTTP client error: {}", e))?;
        Ok(HttpApi {
            client,
            blog_timeout: Duration::from_secs(config.blog_timeout_secs),
            blog_url: config.blog_url()?,
            contact_url: config.contact_url()?,
        })
    }
}

fn transport(e: reqwest::Error) -> FetchError {
    FetchError::Transport(e.to_string())
}

#[rocket::async_trait]
impl BlogSource for HttpApi {
    async fn fetch_posts(&self) -> Result<Vec<BlogPost>, FetchError> {
        let resp = self
            .client
            .get(self.blog_url.clone())
            .timeout(self.blog_timeout)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(transport)?;
        let status = resp.status().as_u16();
        let body = resp.bytes().await.map_err(transport)?;
        decode_posts(status, &body)
    }
}

#[rocket::async_trait]
impl ContactTransport for HttpApi {
    async fn send(&self, msg: &ContactMessage) -> Result<(), FetchError> {
        let resp = self
            .client
            .post(self.contact_url.clone())
            .json(msg)
            .send()
            .await
            .map_err(transport)?;
        if !resp.status().is_success() {
            return Err(FetchError::Status(resp.status().as_u16()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builds_from_default_config() {
        let api = HttpApi::new(&SiteConfig::default()).unwrap();
        assert_eq!(api.blog_url.path(), "/api/blog");
        assert_eq!(api.contact_url.path(), "/api/contact");
        assert_eq!(api.blog_timeout, Duration::from_secs(3));
    }

    #[rocket::async_test]
    async fn test_unreachable_endpoint_is_transport_error() {
        // Port 9 (discard) on loopback: nothing listens, connection is refused.
        let config = SiteConfig {
            api_base: "http://127.0.0.1:9".into(),
            request_timeout_secs: 2,
            ..SiteConfig::default()
        };
        let api = HttpApi::new(&config).unwrap();
        assert!(matches!(api.fetch_posts().await, Err(FetchError::Transport(_))));
        let msg = ContactMessage {
            name: "A".into(),
            email: "a@b.c".into(),
            message: "hi".into(),
        };
        assert!(matches!(api.send(&msg).await, Err(FetchError::Transport(_))));
    }
}
