use std::time::Duration;

use serde::Deserialize;

use crate::error::FeedError;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://m.media-amazon.com/images/G/01/Shopbop/p";

///
/// ApiConfig
///
/// Where the feed lives and how image suffixes become URLs.
///

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiConfig {
    pub base_url: String,
    /// Prefix joined onto every `image_url_suffix` / `product_images` entry.
    pub image_base_url: String,
    /// Shown when an item carries no image at all.
    pub default_image: String,
    pub timeout_ms: u64,
    pub page_size: usize,
    /// Restricts the feed to one category when set.
    pub category_id: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            default_image: "bundled://placeholder.png".to_string(),
            timeout_ms: 10_000,
            page_size: 10,
            category_id: None,
        }
    }
}

impl ApiConfig {
    #[inline]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Base URL without a trailing slash, checked for an http(s) scheme.
    pub fn checked_base_url(&self) -> Result<&str, FeedError> {
        let base = self.base_url.trim_end_matches('/');
        if base.starts_with("http://") || base.starts_with("https://") {
            Ok(base)
        } else {
            Err(FeedError::InvalidBaseUrl(self.base_url.clone()))
        }
    }

    /// Joins an image suffix onto the image base. Absolute URLs pass through.
    pub fn image_url(&self, suffix: &str) -> String {
        if suffix.starts_with("http://") || suffix.starts_with("https://") {
            suffix.to_string()
        } else {
            format!("{}{}", self.image_base_url, suffix)
        }
    }
}
