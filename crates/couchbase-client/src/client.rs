use std::path::PathBuf;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::config::ClientConfig;
use crate::routes::{EndpointRoutes, Service};
use crate::tls;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("invalid CA bundle {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },
    #[error("Invalid base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("endpoint prefix {0} is routed to both the admin and query services")]
    AmbiguousRoute(String),
    #[error("no service route for endpoint {0}")]
    UnroutableEndpoint(String),
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected status code {status}")]
    Status { status: u16 },
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Authenticated client for the Couchbase admin and query REST APIs.
///
/// Holds one base URL per service, both sharing the scheme picked by
/// `use_ssl`. Every request carries HTTP Basic credentials. The client is
/// immutable once built; clones share the underlying connection pool.
#[derive(Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
    base_url: String,
    base_query_url: String,
    username: String,
    password: String,
    routes: EndpointRoutes,
}

impl HttpClient {
    /// Build a client from `config`.
    ///
    /// A non-empty `hostname_override` replaces `config.hostname` in both
    /// base URLs. No network traffic happens here; the CA bundle (only
    /// consulted when `use_ssl` is set) is read from disk.
    pub fn new(config: &ClientConfig, hostname_override: Option<&str>) -> Result<Self, ClientError> {
        let host = match hostname_override {
            Some(host) if !host.is_empty() => host,
            _ => config.hostname.as_str(),
        };
        let scheme = if config.use_ssl { "https" } else { "http" };

        let base_url = format!("{scheme}://{host}:{}", config.port);
        let base_query_url = format!("{scheme}://{host}:{}", config.query_port);
        Url::parse(&base_url)?;
        Url::parse(&base_query_url)?;

        config.routes.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder().default_headers(headers);
        // zero disables the per-request deadline
        if config.timeout > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout));
        }

        if config.use_ssl {
            let certs = tls::load_ca_bundle(
                config.ca_bundle_dir.as_deref(),
                config.ca_bundle_file.as_deref(),
            )?;
            if !certs.is_empty() {
                builder = builder.tls_certs_only(certs);
            }
        }

        Ok(Self {
            inner: builder.build()?,
            base_url,
            base_query_url,
            username: config.username.clone(),
            password: config.password.clone(),
            routes: config.routes.clone(),
        })
    }

    /// GET `endpoint` from the service it routes to and deserialize the JSON body.
    pub async fn request<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ClientError> {
        let (service, url) = self.resolve(endpoint)?;
        debug!(%service, %url, "sending request");

        let resp = self
            .inner
            .get(url)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await?;

        let status = resp.status();
        debug!(%service, endpoint, status = status.as_u16(), "received response");
        check_status_code(status)?;

        let body = resp.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Full URL `endpoint` would be requested from, without sending anything.
    pub fn url_for(&self, endpoint: &str) -> Result<String, ClientError> {
        self.resolve(endpoint).map(|(_, url)| url.to_string())
    }

    /// Admin REST API root, e.g. `http://host:8091`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Query service root, e.g. `http://host:8093`.
    pub fn base_query_url(&self) -> &str {
        &self.base_query_url
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn routes(&self) -> &EndpointRoutes {
        &self.routes
    }

    fn resolve(&self, endpoint: &str) -> Result<(Service, Url), ClientError> {
        let service = self
            .routes
            .resolve(endpoint)
            .ok_or_else(|| ClientError::UnroutableEndpoint(endpoint.to_string()))?;
        let base = match service {
            Service::Admin => &self.base_url,
            Service::Query => &self.base_query_url,
        };
        let url = Url::parse(&format!("{base}{endpoint}"))?;
        Ok((service, url))
    }
}

/// Accept any 2xx status, reject everything else with its numeric code.
pub fn check_status_code(status: StatusCode) -> Result<(), ClientError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(ClientError::Status {
            status: status.as_u16(),
        })
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url)
            .field("base_query_url", &self.base_query_url)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}
