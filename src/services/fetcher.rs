// src/services/fetcher.rs

//! Page retrieval.

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::error::Result;
use crate::utils::{http, with_query_param};

/// Anything that can turn a URL into markup.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch the body at `url`; non-success responses are errors.
    async fn fetch(&self, url: &Url) -> Result<String>;
}

/// [`PageSource`] backed by a real HTTP client.
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageSource for HttpSource {
    async fn fetch(&self, url: &Url) -> Result<String> {
        log::debug!("GET {url}");
        http::fetch_text(&self.client, url).await
    }
}

/// Fetches numbered listing pages of one board.
pub struct PageFetcher<'a> {
    source: &'a dyn PageSource,
    page_param: &'a str,
}

impl<'a> PageFetcher<'a> {
    pub fn new(source: &'a dyn PageSource, page_param: &'a str) -> Self {
        Self { source, page_param }
    }

    /// URL of page `page` (1-based) of `board`.
    pub fn page_url(&self, board: &Url, page: u32) -> Url {
        with_query_param(board, self.page_param, &page.to_string())
    }

    /// Fetch page `page` of `board`.
    pub async fn fetch_page(&self, board: &Url, page: u32) -> Result<String> {
        let url = self.page_url(board, page);
        self.source.fetch(&url).await
    }
}
