use std::borrow::Cow;
use std::fmt;

use crate::models::entry::{all_displayable, BlogPost};

#[derive(Debug, Clone, PartialEq)]
pub enum FetchError {
    /// Connection refused, DNS failure, timeout.
    Transport(String),
    /// The endpoint answered with a non-success status.
    Status(u16),
    /// The body was not the expected entry sequence.
    Decode(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(e) => write!(f, "transport error: {}", e),
            Self::Status(code) => write!(f, "endpoint returned status {}", code),
            Self::Decode(e) => write!(f, "malformed payload: {}", e),
        }
    }
}

/// Where remote blog entries come from.
#[rocket::async_trait]
pub trait BlogSource: Send + Sync {
    async fn fetch_posts(&self) -> Result<Vec<BlogPost>, FetchError>;
}

/// Decode a blog endpoint response. Anything but a 2xx carrying an array of
/// displayable entries is a failure.
pub fn decode_posts(status: u16, body: &[u8]) -> Result<Vec<BlogPost>, FetchError> {
    if !(200..300).contains(&status) {
        return Err(FetchError::Status(status));
    }
    let posts: Vec<BlogPost> =
        serde_json::from_slice(body).map_err(|e| FetchError::Decode(e.to_string()))?;
    if !all_displayable(&posts) {
        return Err(FetchError::Decode("entry without a title".to_string()));
    }
    Ok(posts)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Origin {
    Remote,
    Fallback,
}

/// Outcome of one load: the sequence to render and where it came from.
/// Remote posts are owned and transient; the fallback borrows the catalog.
#[derive(Debug)]
pub struct BlogLoad<'a> {
    pub posts: Cow<'a, [BlogPost]>,
    pub origin: Origin,
}

/// Resolve the blog sequence. Never fails: any fetch error is logged and the
/// local catalog is used instead. The caller renders the result once, so
/// there is no intermediate empty or partial state.
pub async fn resolve<'a>(source: &dyn BlogSource, fallback: &'a [BlogPost]) -> BlogLoad<'a> {
    match source.fetch_posts().await {
        Ok(posts) => {
            log::debug!("[loader] Fetched {} blog posts", posts.len());
            BlogLoad {
                posts: Cow::Owned(posts),
                origin: Origin::Remote,
            }
        }
        Err(e) => {
            log::warn!("[loader] Using local blog data: {}", e);
            BlogLoad {
                posts: Cow::Borrowed(fallback),
                origin: Origin::Fallback,
            }
        }
    }
}
