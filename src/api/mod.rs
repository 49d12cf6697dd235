pub mod models;

use std::future::Future;
use std::time::Duration;

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

pub use models::{FoodDetail, FoodPage, FoodSummary};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/v1";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid API base URL: {url}")]
    InvalidBaseUrl { url: String },

    #[error("failed to build HTTP client: {source}")]
    ClientBuild {
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to setup proxy: {proxy}: {source}")]
    ProxySetup {
        proxy: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("API error: {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("malformed response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Query for the listing endpoint. Filters are sent only when present.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub skip: u64,
    pub limit: u32,
    pub food_name: Option<String>,
    pub research_year: Option<String>,
    pub maker_name: Option<String>,
    pub food_code: Option<String>,
}

impl ListQuery {
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut out = vec![
            ("skip", self.skip.to_string()),
            ("limit", self.limit.to_string()),
        ];
        let optional = [
            ("food_name", &self.food_name),
            ("research_year", &self.research_year),
            ("maker_name", &self.maker_name),
            ("food_code", &self.food_code),
        ];
        for (key, value) in optional {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                out.push((key, value.to_string()));
            }
        }
        out
    }
}

/// The two calls the browser makes against the catalog backend.
pub trait FoodsApi {
    fn list_foods(
        &self,
        query: &ListQuery,
    ) -> impl Future<Output = Result<FoodPage, ApiError>> + Send;

    fn get_food(&self, id: i64) -> impl Future<Output = Result<FoodDetail, ApiError>> + Send;
}

#[derive(Clone, Debug)]
pub struct HttpFoodsApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpFoodsApi {
    pub fn new(client: reqwest::Client, base_url: &str) -> Result<Self, ApiError> {
        let base_url = crate::utils::normalize_base_url(base_url)
            .map_err(|_| ApiError::InvalidBaseUrl {
                url: base_url.to_string(),
            })?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn list_request(&self, query: &ListQuery) -> Result<reqwest::Request, ApiError> {
        let url = format!("{}/foods", self.base_url);
        self.client
            .get(&url)
            .query(&query.params())
            .build()
            .map_err(|e| ApiError::Transport { url, source: e })
    }

    pub fn detail_request(&self, id: i64) -> Result<reqwest::Request, ApiError> {
        let url = format!("{}/foods/{}", self.base_url, id);
        self.client
            .get(&url)
            .build()
            .map_err(|e| ApiError::Transport { url, source: e })
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        request: reqwest::Request,
    ) -> Result<T, ApiError> {
        let url = request.url().to_string();
        debug!(%url, "GET");
        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| ApiError::Transport {
                url: url.clone(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| ApiError::Transport {
            url: url.clone(),
            source: e,
        })?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode { url, source: e })
    }
}

impl FoodsApi for HttpFoodsApi {
    async fn list_foods(&self, query: &ListQuery) -> Result<FoodPage, ApiError> {
        let request = self.list_request(query)?;
        self.fetch_json(request).await
    }

    async fn get_food(&self, id: i64) -> Result<FoodDetail, ApiError> {
        let request = self.detail_request(id)?;
        self.fetch_json(request).await
    }
}

pub fn build_client(proxy: Option<&str>, timeout_seconds: u64) -> Result<reqwest::Client, ApiError> {
    let mut headers = reqwest::header::HeaderMap::new();
    headers.insert(
        reqwest::header::USER_AGENT,
        reqwest::header::HeaderValue::from_static(concat!(
            "nutribrowse/",
            env!("CARGO_PKG_VERSION")
        )),
    );
    headers.insert(
        reqwest::header::ACCEPT,
        reqwest::header::HeaderValue::from_static("application/json"),
    );

    let mut builder = reqwest::Client::builder()
        .default_headers(headers)
        .timeout(Duration::from_secs(timeout_seconds.max(1)));

    if let Some(proxy) = proxy.filter(|p| !p.trim().is_empty()) {
        let proxy = reqwest::Proxy::all(proxy).map_err(|e| ApiError::ProxySetup {
            proxy: proxy.to_string(),
            source: e,
        })?;
        builder = builder.proxy(proxy);
    }

    builder
        .build()
        .map_err(|e| ApiError::ClientBuild { source: e })
}
