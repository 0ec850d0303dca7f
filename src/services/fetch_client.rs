use crate::core::credentials::Credentials;
use crate::core::fetch::{FetchError, FetchResult};
use crate::core::models::DatasetRows;
use crate::core::types::DatasetKind;
use color_eyre::Result;
use reqwest::Url;
use std::time::Duration;
use tracing::{error, info};

/// Retrieves issue and event collections from the backend
///
/// The client is stateless apart from its connection pool: every call sends
/// exactly one `GET {root}/{kind}` request carrying the three credential
/// values as query parameters. Nothing is retried.
#[derive(Debug, Clone)]
pub struct FetchClient {
    http: reqwest::Client,
    service_root: Url,
}

impl FetchClient {
    /// Create a client for the given service root
    ///
    /// `timeout` of `None` leaves requests unbounded.
    pub fn new(service_root: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut root = Url::parse(service_root)?;
        if !root.path().ends_with('/') {
            let path = format!("{}/", root.path());
            root.set_path(&path);
        }

        let mut builder = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            service_root: root,
        })
    }

    pub fn service_root(&self) -> &Url {
        &self.service_root
    }

    /// Endpoint for a dataset kind, without query
    pub fn endpoint(&self, kind: DatasetKind) -> Result<Url, FetchError> {
        self.service_root
            .join(kind.path())
            .map_err(|e| FetchError::Transport(e.to_string()))
    }

    /// Build the exact outbound request for a fetch
    pub fn build_request(
        &self,
        kind: DatasetKind,
        credentials: &Credentials,
    ) -> Result<reqwest::Request, FetchError> {
        let endpoint = self.endpoint(kind)?;
        self.http
            .get(endpoint)
            .query(&credentials.query_pairs())
            .build()
            .map_err(|e| FetchError::Transport(e.without_url().to_string()))
    }

    /// Fetch all rows of one kind
    ///
    /// Failures are logged here and returned to the caller, who leaves its
    /// cached rows untouched.
    pub async fn fetch(&self, kind: DatasetKind, credentials: &Credentials) -> FetchResult {
        // The query string carries the password; log the path only
        let path = self
            .endpoint(kind)
            .map(|url| url.path().to_string())
            .unwrap_or_default();
        info!(%kind, %path, "fetching dataset");

        match self.execute(kind, credentials).await {
            Ok(rows) => {
                info!(%kind, rows = rows.len(), "dataset fetched");
                Ok(rows)
            }
            Err(e) => {
                error!(%kind, %path, "fetch failed: {e}");
                Err(e)
            }
        }
    }

    async fn execute(&self, kind: DatasetKind, credentials: &Credentials) -> FetchResult {
        let request = self.build_request(kind, credentials)?;
        let response = self
            .http
            .execute(request)
            .await
            .map_err(|e| FetchError::Transport(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Response {
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Transport(e.without_url().to_string()))?;
        Self::decode(kind, &body)
    }

    /// Decode a response body into rows of the requested kind
    pub fn decode(kind: DatasetKind, body: &[u8]) -> FetchResult {
        DatasetRows::from_json(kind, body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}
