//! HTTP client for the deal flow backend.
//!
//! Every failure is reported as a [`FetchError`]; deciding what to do about
//! it (usually falling back to fixtures) is left to the services.

use async_trait::async_trait;
use log::{debug, info};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use dealflow_core::deals::DealRecord;
use dealflow_core::errors::{Error, FetchError, Result};
use dealflow_core::notes::{NewNote, Note, NoteSinkTrait};
use dealflow_core::portfolio::PortfolioCompany;
use dealflow_core::sources::{DealSourceTrait, PortfolioSourceTrait};

type FetchResult<T> = std::result::Result<T, FetchError>;

/// Listing payload. The backend answers with a bare array; some deployments
/// wrap it in an object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListResponse<T> {
    Bare(Vec<T>),
    Wrapped {
        #[serde(alias = "deals", alias = "companies", alias = "items")]
        data: Vec<T>,
    },
}

impl<T> ListResponse<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            ListResponse::Bare(items) => items,
            ListResponse::Wrapped { data } => data,
        }
    }
}

/// Body of `POST /deals/{id}/notes`; the deal id travels in the path.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NoteRequest<'a> {
    framework: &'a str,
    content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    author: Option<&'a str>,
}

/// HTTP client for the deal flow REST backend.
///
/// ```ignore
/// let client = BackendClient::new("https://deals.example.com/api", Duration::from_secs(10), None)?;
/// let deals = client.fetch_deals().await?;
/// ```
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
    auth_header: Option<HeaderValue>,
}

impl BackendClient {
    /// Creates a client for `base_url`. A trailing slash is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the token cannot be used as a header value or the
    /// HTTP client cannot be initialized.
    pub fn new(base_url: &str, timeout: Duration, api_token: Option<&str>) -> Result<Self> {
        let auth_header = api_token
            .map(|token| {
                HeaderValue::from_str(&format!("Bearer {}", token))
                    .map_err(|e| Error::Unexpected(format!("Invalid API token format: {}", e)))
            })
            .transpose()?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Unexpected(format!("Failed to initialize HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_header,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(auth) = &self.auth_header {
            headers.insert(AUTHORIZATION, auth.clone());
        }
        headers
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> FetchResult<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("[Backend] GET {}", url);

        let response = self
            .client
            .get(&url)
            .headers(self.headers())
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Self::parse_response(response).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> FetchResult<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("[Backend] POST {}", url);

        let response = self
            .client
            .post(&url)
            .headers(self.headers())
            .json(body)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Self::parse_response(response).await
    }

    async fn parse_response<T: DeserializeOwned>(response: reqwest::Response) -> FetchResult<T> {
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                code: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Transport(format!("Failed to read response: {}", e)))?;

        serde_json::from_str(&body).map_err(|e| {
            FetchError::Decode(format!(
                "{} - {}",
                e,
                body.chars().take(200).collect::<String>()
            ))
        })
    }
}

#[async_trait]
impl DealSourceTrait for BackendClient {
    async fn fetch_deals(&self) -> FetchResult<Vec<DealRecord>> {
        let deals = self.get::<ListResponse<DealRecord>>("/deals").await?.into_vec();
        info!("[Backend] Fetched {} deals", deals.len());
        Ok(deals)
    }
}

#[async_trait]
impl PortfolioSourceTrait for BackendClient {
    async fn fetch_portfolio(&self) -> FetchResult<Vec<PortfolioCompany>> {
        let companies = self
            .get::<ListResponse<PortfolioCompany>>("/portfolio")
            .await?
            .into_vec();
        info!("[Backend] Fetched {} portfolio companies", companies.len());
        Ok(companies)
    }
}

#[async_trait]
impl NoteSinkTrait for BackendClient {
    async fn append(&self, note: NewNote) -> Result<Note> {
        note.validate()?;
        let path = format!("/deals/{}/notes", urlencoding::encode(&note.deal_id));
        let request = NoteRequest {
            framework: note.framework.as_str(),
            content: note.content.trim(),
            author: note.author.as_deref(),
        };
        let stored: Note = self.post(&path, &request).await?;
        info!("[Backend] Stored note {} for deal '{}'", stored.id, stored.deal_id);
        Ok(stored)
    }
}
