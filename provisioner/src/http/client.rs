//! HTTP client implementation

use std::time::Duration;

use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, Method, RequestBuilder};
use secrecy::ExposeSecret;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, error};

use crate::errors::ProvisionError;
use crate::storage::settings::Credentials;

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

// Header names must be lowercase for `HeaderName::from_static`
const HEADER_COMPONENT_ID: &str = "x-ss-app-component-id";
const HEADER_AUTH_TOKEN: &str = "x-ss-app-auth-token";
const HEADER_REST_CALL: &str = "x-ss-rest-call";
const HEADER_REQUESTED_BY: &str = "x-requested-by";

const REQUESTED_BY: &str = "sdc-provisioner";

/// Headers identifying the caller to the control plane
fn auth_headers(credentials: &Credentials) -> Result<HeaderMap, ProvisionError> {
    let invalid = |name: &str| {
        ProvisionError::ConfigError(format!("{} is not a valid header value", name))
    };

    let component_id = HeaderValue::from_str(&credentials.credential_id)
        .map_err(|_| invalid("CRED_ID"))?;
    let mut auth_token = HeaderValue::from_str(credentials.token.expose_secret())
        .map_err(|_| invalid("CRED_TOKEN"))?;
    auth_token.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(HEADER_COMPONENT_ID, component_id);
    headers.insert(HEADER_AUTH_TOKEN, auth_token);
    headers.insert(HEADER_REST_CALL, HeaderValue::from_static("true"));
    headers.insert(HEADER_REQUESTED_BY, HeaderValue::from_static(REQUESTED_BY));
    headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
    Ok(headers)
}

/// HTTP client for control-plane communication
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    /// Create a new HTTP client sending `credentials` on every request
    pub fn new(
        base_url: &str,
        credentials: &Credentials,
        timeout: Duration,
    ) -> Result<Self, ProvisionError> {
        let client = Client::builder()
            .timeout(timeout)
            .default_headers(auth_headers(credentials)?)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);

        self.client.request(method, &url)
    }

    /// Send a request and decode the JSON response
    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        request: RequestBuilder,
    ) -> Result<T, ProvisionError> {
        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("HTTP {} failed: {} - {}", method, status, body);
            return Err(ProvisionError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.json().await?;
        Ok(body)
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ProvisionError> {
        let request = self.request(Method::GET, path).query(query);
        self.send(Method::GET, request).await
    }

    /// Make a POST request
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        query: &[(&str, String)],
        body: &B,
    ) -> Result<T, ProvisionError> {
        let request = self.request(Method::POST, path).query(query).json(body);
        self.send(Method::POST, request).await
    }

    /// Make a PUT request
    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ProvisionError> {
        let request = self.request(Method::PUT, path).json(body);
        self.send(Method::PUT, request).await
    }
}
