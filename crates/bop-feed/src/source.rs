use std::future::Future;
use std::path::Path;

use log::debug;

use crate::config::ApiConfig;
use crate::error::FeedError;
use crate::record::{ApiItem, CardRecord};

/// Anything that hands out pages of cards by offset.
///
/// An empty page means the source is exhausted.
pub trait FeedSource {
    fn fetch_page(
        &self,
        offset: usize,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<CardRecord>, FeedError>> + Send;
}

///
/// FixtureFeed
///
/// In-memory feed, usually loaded from a JSON file in the API's item shape.
/// Lets the deck run offline and in tests.
///

#[derive(Debug, Clone, Default)]
pub struct FixtureFeed {
    records: Vec<CardRecord>,
}

impl FixtureFeed {
    pub fn new(records: Vec<CardRecord>) -> Self {
        Self { records }
    }

    /// Parses a JSON array of API items.
    pub fn from_json(json: &str, config: &ApiConfig) -> Result<Self, FeedError> {
        let items: Vec<ApiItem> = serde_json::from_str(json)?;
        let records = items.into_iter().map(|item| CardRecord::from_api(item, config)).collect();

        Ok(Self { records })
    }

    pub async fn from_path(path: impl AsRef<Path>, config: &ApiConfig) -> Result<Self, FeedError> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path).await?;
        let feed = Self::from_json(&json, config)?;
        debug!("fixture feed: {} records from {}", feed.len(), path.display());

        Ok(feed)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FeedSource for FixtureFeed {
    async fn fetch_page(&self, offset: usize, limit: usize) -> Result<Vec<CardRecord>, FeedError> {
        let start = offset.min(self.records.len());
        let end = offset.saturating_add(limit).min(self.records.len());

        Ok(self.records[start..end].to_vec())
    }
}
