//! HTTP client for the WorkBC job board API.
//!
//! Every operation issues a single GET and hands back the decoded JSON body
//! untouched. Shape handling is left to the renderers.

use crate::config::Config;
use crate::error::ApiError;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder, Url};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

/// Query parameters for `GET /jobs`.
///
/// `page` and `per_page` are always sent; the filters only when set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchParams {
    pub page: String,
    pub per_page: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_type: Option<String>,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            page: "1".to_string(),
            per_page: "10".to_string(),
            keywords: None,
            region: None,
            industry: None,
            job_type: None,
        }
    }
}

/// The enumerations the API exposes to help build search filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    JobTypes,
    Industries,
    Regions,
}

impl ReferenceKind {
    /// Endpoint path segment.
    pub fn path(self) -> &'static str {
        match self {
            ReferenceKind::JobTypes => "job-types",
            ReferenceKind::Industries => "industries",
            ReferenceKind::Regions => "regions",
        }
    }

    /// Name of the array property in the object-shaped response.
    pub fn list_key(self) -> &'static str {
        match self {
            ReferenceKind::JobTypes => "types",
            ReferenceKind::Industries => "industries",
            ReferenceKind::Regions => "regions",
        }
    }
}

/// Thin, stateless request/response bridge to the API.
pub struct JobBoardClient {
    base_url: String,
    client: Client,
}

impl JobBoardClient {
    /// Create a client for `base_url`. The URL itself is validated lazily,
    /// when the first request is built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let base_url = base_url.into();
        let client = Client::builder().build().map_err(ApiError::Client)?;

        Ok(Self { base_url, client })
    }

    /// Create a client for the configured base URL.
    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        Self::new(config.base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Search job postings.
    pub async fn search_jobs(&self, params: &SearchParams) -> Result<Value, ApiError> {
        let request = self.search_request(params)?;
        self.send(request).await
    }

    /// Fetch a single job posting.
    pub async fn get_job(&self, id: &str) -> Result<Value, ApiError> {
        let request = self.get(&["jobs", id])?;
        self.send(request).await
    }

    pub async fn get_job_types(&self) -> Result<Value, ApiError> {
        let request = self.get(&[ReferenceKind::JobTypes.path()])?;
        self.send(request).await
    }

    pub async fn get_industries(&self) -> Result<Value, ApiError> {
        let request = self.get(&[ReferenceKind::Industries.path()])?;
        self.send(request).await
    }

    pub async fn get_regions(&self) -> Result<Value, ApiError> {
        let request = self.get(&[ReferenceKind::Regions.path()])?;
        self.send(request).await
    }

    /// Fetch one of the reference lists.
    pub async fn get_reference(&self, kind: ReferenceKind) -> Result<Value, ApiError> {
        match kind {
            ReferenceKind::JobTypes => self.get_job_types().await,
            ReferenceKind::Industries => self.get_industries().await,
            ReferenceKind::Regions => self.get_regions().await,
        }
    }

    fn search_request(&self, params: &SearchParams) -> Result<RequestBuilder, ApiError> {
        Ok(self.get(&["jobs"])?.query(params))
    }

    /// Build a GET for `segments` appended to the base URL.
    fn get(&self, segments: &[&str]) -> Result<RequestBuilder, ApiError> {
        let url = self.endpoint(segments)?;
        Ok(self
            .client
            .get(url)
            .header(CONTENT_TYPE, "application/json"))
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let invalid = |reason: String| ApiError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason,
        };

        let mut url = Url::parse(&self.base_url).map_err(|e| invalid(e.to_string()))?;
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| invalid("URL cannot be a base".to_string()))?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Value, ApiError> {
        let request = request.build().map_err(|source| ApiError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason: source.to_string(),
        })?;
        let url = request.url().to_string();
        debug!("GET {}", url);

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|source| ApiError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        debug!("{} -> {}", url, status);
        if !status.is_success() {
            return Err(ApiError::Status { url, status });
        }

        response
            .json::<Value>()
            .await
            .map_err(|source| ApiError::Decode { url, source })
    }
}
