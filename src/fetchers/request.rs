use super::{FetchedPage, Fetcher};
use crate::error::FetchError;
use async_trait::async_trait;
use log::debug;
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, DNT, REFERER,
    UPGRADE_INSECURE_REQUESTS,
};
use reqwest::{Client, Response, StatusCode};
use serde_json::Value;
use std::time::Duration;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Plain HTTP GET with browser-like headers.
///
/// Recipe sites reject requests that lack a desktop User-Agent and the
/// usual Accept headers.
#[derive(Clone)]
pub struct RequestFetcher {
    client: Client,
}

fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static("ja;q=0.9,en-US;q=0.8,en;q=0.7"),
    );
    headers.insert(REFERER, HeaderValue::from_static("https://www.google.com/"));
    headers.insert(DNT, HeaderValue::from_static("1"));
    headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));
    for (name, value) in [
        ("sec-fetch-dest", "document"),
        ("sec-fetch-mode", "navigate"),
        ("sec-fetch-site", "cross-site"),
        ("sec-fetch-user", "?1"),
    ] {
        headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }
    headers
}

impl RequestFetcher {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .default_headers(browser_headers())
            .build()?;

        Ok(Self { client })
    }

    async fn get(&self, url: &str) -> Result<Response, FetchError> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status == StatusCode::FORBIDDEN {
            return Err(FetchError::Blocked(url.to_string()));
        }
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response)
    }

    pub async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        Ok(self.get(url).await?.text().await?)
    }

    pub async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        Ok(self.get(url).await?.json::<Value>().await?)
    }
}

#[async_trait]
impl Fetcher for RequestFetcher {
    fn name(&self) -> &'static str {
        "request"
    }

    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let body = self.get_text(url).await?;
        Ok(FetchedPage {
            url: url.to_string(),
            body,
        })
    }
}
