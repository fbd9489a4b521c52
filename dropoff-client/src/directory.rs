//! `CustomerDirectory` backed by the customer service's REST API.

use std::future::Future;
use std::{panic, thread};
use std::time::Duration;

use dropoff_core::{Customer, CustomerDirectory, DirectoryError, NewCustomer};
use log::{debug, warn};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use url::Url;

use crate::error_body::extract_error_message;

/// Default user agent for customer service requests.
pub const DEFAULT_USER_AGENT: &str = "dropoff-client/0.1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

const CUSTOMERS_SEGMENT: &str = "customers";
const STATUS_SEGMENT: &str = "status";

/// Error type for [`HttpCustomerDirectory`] construction failures.
#[derive(Debug, Error)]
pub enum ClientBuildError {
    /// The base URL could not be parsed.
    #[error("invalid base URL {url:?}: {source}")]
    InvalidBaseUrl {
        /// URL as configured.
        url: String,
        /// Parser error.
        #[source]
        source: url::ParseError,
    },
    /// The base URL cannot carry path segments (e.g. `mailto:`).
    #[error("base URL {url:?} cannot carry a path")]
    UnsupportedBaseUrl {
        /// URL as configured.
        url: String,
    },
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Configuration for [`HttpCustomerDirectory`].
#[derive(Debug, Clone)]
pub struct HttpCustomerDirectoryConfig {
    /// Base URL of the customer service (e.g. `"http://localhost:3000/api"`).
    pub base_url: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for HttpCustomerDirectoryConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/api".to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl HttpCustomerDirectoryConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

#[derive(Debug, Serialize)]
struct StatusUpdate<'a> {
    status: &'a str,
}

/// REST-backed customer directory.
///
/// # Runtime behaviour
///
/// Outside any Tokio runtime, requests run on the directory's own runtime on
/// the calling thread. Inside a `current_thread` runtime the own runtime is
/// driven on a short-lived helper thread, since that runtime cannot be
/// blocked in place. Inside a multi-threaded runtime the caller's handle is
/// used via [`tokio::task::block_in_place`].
///
/// The directory may be dropped inside an async context; its own runtime is
/// then shut down in the background.
pub struct HttpCustomerDirectory {
    client: Client,
    config: HttpCustomerDirectoryConfig,
    base_url: Url,
    /// Only `None` while the directory is being dropped.
    runtime: Option<Runtime>,
}

impl std::fmt::Debug for HttpCustomerDirectory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpCustomerDirectory")
            .field("client", &self.client)
            .field("config", &self.config)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish_non_exhaustive()
    }
}

impl HttpCustomerDirectory {
    /// Create a directory with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client or Tokio
    /// runtime fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientBuildError> {
        Self::with_config(HttpCustomerDirectoryConfig::new(base_url))
    }

    /// Create a directory with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client or Tokio
    /// runtime fails to build.
    pub fn with_config(config: HttpCustomerDirectoryConfig) -> Result<Self, ClientBuildError> {
        let base_url =
            Url::parse(&config.base_url).map_err(|source| ClientBuildError::InvalidBaseUrl {
                url: config.base_url.clone(),
                source,
            })?;
        if base_url.cannot_be_a_base() {
            return Err(ClientBuildError::UnsupportedBaseUrl {
                url: config.base_url.clone(),
            });
        }
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ClientBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ClientBuildError::Runtime)?;
        Ok(Self {
            client,
            config,
            base_url,
            runtime: Some(runtime),
        })
    }

    /// Append percent-encoded `segments` to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Construction rejected cannot-be-a-base URLs, so this always applies.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn customers_url(&self) -> Url {
        self.endpoint(&[CUSTOMERS_SEGMENT])
    }

    fn status_url(&self, id: &str) -> Url {
        self.endpoint(&[CUSTOMERS_SEGMENT, id, STATUS_SEGMENT])
    }

    /// Send `request` and decode a JSON success body.
    async fn execute<T>(&self, request: RequestBuilder, url: &Url) -> Result<T, DirectoryError>
    where
        T: DeserializeOwned,
    {
        debug!("sending customer service request to {url}");
        let response = request
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, url))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = extract_error_message(status, &body);
            warn!("customer service returned {status} for {url}: {message}");
            return Err(DirectoryError::Http {
                url: url.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|err| DirectoryError::Decode {
                url: url.to_string(),
                message: err.to_string(),
            })
    }

    /// Convert a transport-level reqwest error to a `DirectoryError`.
    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &Url) -> DirectoryError {
        if error.is_timeout() {
            return DirectoryError::Timeout {
                url: url.to_string(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }
        DirectoryError::Network {
            url: url.to_string(),
            message: error.to_string(),
        }
    }

    /// Drive `future` to completion from synchronous code.
    ///
    /// `block_in_place` requires a multi-threaded runtime. A `current_thread`
    /// runtime cannot be blocked from within, so the owned runtime is driven
    /// on a scoped helper thread instead. Outside any runtime the owned
    /// runtime runs on the calling thread.
    fn block_on<T, F>(&self, url: &Url, future: F) -> Result<T, DirectoryError>
    where
        F: Future<Output = Result<T, DirectoryError>> + Send,
        T: Send,
    {
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            Ok(_) => {
                let runtime = self.owned_runtime(url)?;
                thread::scope(|scope| {
                    scope
                        .spawn(|| runtime.block_on(future))
                        .join()
                        .unwrap_or_else(|payload| panic::resume_unwind(payload))
                })
            }
            Err(_) => self.owned_runtime(url)?.block_on(future),
        }
    }

    fn owned_runtime(&self, url: &Url) -> Result<&Runtime, DirectoryError> {
        self.runtime.as_ref().ok_or_else(|| DirectoryError::Network {
            url: url.to_string(),
            message: "client runtime has shut down".to_owned(),
        })
    }
}

impl Drop for HttpCustomerDirectory {
    fn drop(&mut self) {
        // A runtime dropped inside an async context panics while blocking on
        // its worker shutdown.
        if Handle::try_current().is_ok()
            && let Some(runtime) = self.runtime.take()
        {
            runtime.shutdown_background();
        }
    }
}

impl CustomerDirectory for HttpCustomerDirectory {
    fn list_customers(&self) -> Result<Vec<Customer>, DirectoryError> {
        let url = self.customers_url();
        let request = self.client.get(url.clone());
        self.block_on(&url, self.execute(request, &url))
    }

    fn create_customer(&self, customer: &NewCustomer) -> Result<Customer, DirectoryError> {
        let url = self.customers_url();
        let request = self.client.post(url.clone()).json(customer);
        self.block_on(&url, self.execute(request, &url))
    }

    fn update_status(&self, id: &str, status: &str) -> Result<Customer, DirectoryError> {
        let url = self.status_url(id);
        let request = self
            .client
            .patch(url.clone())
            .json(&StatusUpdate { status });
        self.block_on(&url, self.execute(request, &url))
            .map_err(|err| match err {
                DirectoryError::Http { status: code, .. }
                    if code == StatusCode::NOT_FOUND.as_u16() =>
                {
                    DirectoryError::NotFound { id: id.to_owned() }
                }
                other => other,
            })
    }
}
