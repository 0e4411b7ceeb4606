use std::time::Duration;

use bytes::Bytes;
use devfeed_core::{ArticleDetail, PageRequest, Post, PostId, Tag, PAGE_SIZE};
use feed_logging::{feed_debug, feed_warn};
use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use url::Url;

use crate::{FailureKind, FetchError};

pub const DEFAULT_API_BASE: &str = "https://dev.to/api";
/// Page size used by the tag directory.
pub const TAGS_PER_PAGE: u32 = 84;

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub api_base: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

/// Remote source of posts, tags and article bodies.
#[async_trait::async_trait]
pub trait PageSource: Send + Sync {
    /// Returns at most one page of posts, in source order.
    async fn fetch_page(&self, request: &PageRequest) -> Result<Vec<Post>, FetchError>;

    async fn fetch_tags(&self) -> Result<Vec<Tag>, FetchError>;

    async fn fetch_article(&self, id: PostId) -> Result<ArticleDetail, FetchError>;
}

/// `PageSource` over the dev.to REST API.
#[derive(Debug, Clone)]
pub struct DevToClient {
    settings: FetchSettings,
    client: reqwest::Client,
}

impl DevToClient {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .user_agent(concat!("devfeed/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &FetchSettings {
        &self.settings
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, FetchError> {
        let mut url = Url::parse(self.settings.api_base.trim_end_matches('/'))
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| FetchError::new(FailureKind::InvalidUrl, "base url cannot carry a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub fn articles_url(&self, request: &PageRequest) -> Result<Url, FetchError> {
        let mut url = self.endpoint(&["articles"])?;
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("page", &request.page.to_string())
                .append_pair("per_page", &PAGE_SIZE.to_string());
            if let Some(tag) = request.tag.as_deref() {
                query.append_pair("tag", tag);
            }
            if let Some(text) = request.query.as_deref() {
                query.append_pair("query", text);
            }
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        feed_debug!("GET {}", url);
        let body = self.get_bytes(url).await?;
        serde_json::from_slice(&body)
            .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))
    }

    async fn get_bytes(&self, url: Url) -> Result<Bytes, FetchError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, Some(content_len)));
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, Some(next_len)));
            }
            body.extend_from_slice(&chunk);
        }
        Ok(Bytes::from(body))
    }
}

#[async_trait::async_trait]
impl PageSource for DevToClient {
    async fn fetch_page(&self, request: &PageRequest) -> Result<Vec<Post>, FetchError> {
        let url = self.articles_url(request)?;
        let mut posts: Vec<Post> = self.get_json(url).await?;
        if posts.len() > PAGE_SIZE {
            feed_warn!(
                "source returned {} posts for page {}; keeping {}",
                posts.len(),
                request.page,
                PAGE_SIZE
            );
            posts.truncate(PAGE_SIZE);
        }
        Ok(posts)
    }

    async fn fetch_tags(&self) -> Result<Vec<Tag>, FetchError> {
        let mut url = self.endpoint(&["tags"])?;
        url.query_pairs_mut()
            .append_pair("per_page", &TAGS_PER_PAGE.to_string());
        self.get_json(url).await
    }

    async fn fetch_article(&self, id: PostId) -> Result<ArticleDetail, FetchError> {
        let url = self.endpoint(&["articles", &id.to_string()])?;
        self.get_json(url).await
    }
}

fn too_large(max_bytes: u64, actual: Option<u64>) -> FetchError {
    FetchError::new(
        FailureKind::TooLarge { max_bytes, actual },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return FetchError::new(FailureKind::Decode, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> DevToClient {
        DevToClient::new(FetchSettings {
            api_base: base.to_string(),
            ..FetchSettings::default()
        })
        .expect("client")
    }

    #[test]
    fn articles_url_carries_only_present_filters() {
        let client = client("https://dev.to/api");
        let url = client
            .articles_url(&PageRequest {
                page: 3,
                tag: Some("rust".into()),
                query: None,
            })
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://dev.to/api/articles?page=3&per_page=12&tag=rust"
        );
    }

    #[test]
    fn trailing_slash_in_base_is_ignored() {
        let client = client("http://localhost:9000/api/");
        let url = client.endpoint(&["articles", "42"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:9000/api/articles/42");
    }

    #[test]
    fn query_text_is_percent_encoded() {
        let client = client("https://dev.to/api");
        let url = client
            .articles_url(&PageRequest {
                page: 1,
                tag: None,
                query: Some("async & await".into()),
            })
            .unwrap();
        assert!(url.as_str().ends_with("query=async+%26+await"));
    }

    #[test]
    fn bad_base_is_an_invalid_url() {
        let client = client("not a url");
        let err = client.endpoint(&["tags"]).unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidUrl);
    }
}
