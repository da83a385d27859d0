use log::{debug, trace};
use serde::Serialize;

use crate::config::ApiConfig;
use crate::error::FeedError;
use crate::interaction::{Interaction, InteractionKind, InteractionTarget};
use crate::record::{ApiItem, CardRecord};
use crate::source::FeedSource;

#[derive(Debug, Serialize)]
struct InteractionBody<'a> {
    user_id: u64,
    item_id: &'a str,
}

///
/// FeedClient
///
/// HTTP client for the feed and interaction endpoints.
///

#[derive(Debug, Clone)]
pub struct FeedClient {
    http: reqwest::Client,
    base: String,
    config: ApiConfig,
}

impl FeedClient {
    pub fn new(config: ApiConfig) -> Result<Self, FeedError> {
        let base = config.checked_base_url()?.to_string();
        let http = reqwest::Client::builder().timeout(config.timeout()).build()?;

        Ok(Self { http, base, config })
    }

    #[inline]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// `GET /items/feed?offset=&limit=[&category_id=]`
    pub async fn fetch_feed(
        &self,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<CardRecord>, FeedError> {
        let url = self.url("/items/feed");
        let mut query = vec![("offset", offset.to_string()), ("limit", limit.to_string())];
        if let Some(category) = &self.config.category_id {
            query.push(("category_id", category.clone()));
        }

        let resp = self.http.get(&url).query(&query).send().await?;
        let items: Vec<ApiItem> = decode(resp, &url).await?;
        debug!("feed: {} items at offset {offset}", items.len());

        Ok(self.resolve(items))
    }

    /// `GET /likes/{user_id}`: the user's closet.
    pub async fn liked_items(&self, user_id: u64) -> Result<Vec<CardRecord>, FeedError> {
        let url = self.url(&format!("/likes/{user_id}"));
        let resp = self.http.get(&url).send().await?;
        let items: Vec<ApiItem> = decode(resp, &url).await?;

        Ok(self.resolve(items))
    }

    /// `POST /likes/`
    pub async fn like(&self, user_id: u64, item_id: &str) -> Result<(), FeedError> {
        self.send_interaction(reqwest::Method::POST, "/likes/", user_id, item_id).await
    }

    /// `POST /dislikes/`
    pub async fn dislike(&self, user_id: u64, item_id: &str) -> Result<(), FeedError> {
        self.send_interaction(reqwest::Method::POST, "/dislikes/", user_id, item_id).await
    }

    /// `DELETE /likes/`
    pub async fn unlike(&self, user_id: u64, item_id: &str) -> Result<(), FeedError> {
        self.send_interaction(reqwest::Method::DELETE, "/likes/", user_id, item_id).await
    }

    async fn send_interaction(
        &self,
        method: reqwest::Method,
        path: &str,
        user_id: u64,
        item_id: &str,
    ) -> Result<(), FeedError> {
        let url = self.url(path);
        let resp = self
            .http
            .request(method, &url)
            .json(&InteractionBody { user_id, item_id })
            .send()
            .await?;
        check(&resp, &url)?;
        trace!("{url}: {}", resp.status());

        Ok(())
    }

    fn resolve(&self, items: Vec<ApiItem>) -> Vec<CardRecord> {
        items.into_iter().map(|item| CardRecord::from_api(item, &self.config)).collect()
    }
}

fn check(resp: &reqwest::Response, url: &str) -> Result<(), FeedError> {
    let status = resp.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(FeedError::Status { status: status.as_u16(), url: url.to_string() })
    }
}

async fn decode<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
    url: &str,
) -> Result<T, FeedError> {
    check(&resp, url)?;
    let bytes = resp.bytes().await?;

    Ok(serde_json::from_slice(&bytes)?)
}

// ── trait impls ───────────────────────────────────────────────────────────

impl FeedSource for FeedClient {
    async fn fetch_page(&self, offset: usize, limit: usize) -> Result<Vec<CardRecord>, FeedError> {
        self.fetch_feed(offset, limit).await
    }
}

impl InteractionTarget for FeedClient {
    async fn deliver(&self, interaction: &Interaction) -> Result<(), FeedError> {
        let Interaction { user_id, item_id, kind } = interaction;
        match kind {
            InteractionKind::Like => self.like(*user_id, item_id).await,
            InteractionKind::Dislike => self.dislike(*user_id, item_id).await,
            InteractionKind::Unlike => self.unlike(*user_id, item_id).await,
        }
    }
}
