use async_trait::async_trait;
use reqwest::Client;

use crate::config::SourceConfig;
use crate::error::{Result, ScrollError};
use crate::types::{Item, PageQuery};

/// Anything that can serve a page of items.
#[async_trait]
pub trait ItemSource: Send + Sync + std::fmt::Debug {
    fn name(&self) -> &str;

    /// Fetch one page. An empty vector means there are no further results.
    async fn list_items(&self, query: &PageQuery) -> Result<Vec<Item>>;
}

/// JSON-over-HTTP source speaking the `_limit` / `_page` / `q` convention.
pub struct HttpSource {
    client: Client,
    base_url: String,
}

impl std::fmt::Debug for HttpSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpSource")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl HttpSource {
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("todo-scroll/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn page_url(&self, query: &PageQuery) -> String {
        format!(
            "{}?_limit={}&_page={}&q={}",
            self.base_url,
            query.limit,
            query.page,
            urlencoding::encode(&query.search)
        )
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(ScrollError::Fetch(format!("{}: {}", status, text)));
        }

        response.json().await.map_err(ScrollError::from)
    }
}

#[async_trait]
impl ItemSource for HttpSource {
    fn name(&self) -> &str {
        &self.base_url
    }

    async fn list_items(&self, query: &PageQuery) -> Result<Vec<Item>> {
        let url = self.page_url(query);
        tracing::debug!(%url, "requesting page");
        self.get_json(&url).await
    }
}
