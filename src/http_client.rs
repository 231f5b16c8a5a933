//! HTTP transport for the OpenCRM REST API.
//!
//! `HttpClient` is the single point of outbound traffic. It builds the full
//! URL from the API root, attaches the User-Agent and credentials, stringifies
//! the form body, sends it, and classifies the response.
//!
//! # Response classification
//!
//! - HTTP 404: `OpenCrmError::NotFound`
//! - HTTP 429: `OpenCrmError::RateLimited`
//! - Any other status of 400 or above: `OpenCrmError::Api`
//! - Empty body: [`ApiResponse::Empty`]
//! - Otherwise JSON, falling back to raw text: [`ApiResponse::Json`] / [`ApiResponse::Text`]
//!
//! Nothing is retried. Every failure reaches the caller unchanged.
//!
//! # Connection lifecycle
//!
//! The underlying `reqwest` client is created on first use and released by
//! [`HttpClient::close`] or when the `HttpClient` is dropped. A request made
//! after `close` opens a fresh connection.

use std::collections::BTreeMap;
use std::sync::OnceLock;
use std::time::Duration;

use reqwest::blocking::{multipart::Form, Client};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::Method;
use serde_json::Value;
use url::Url;

use crate::auth::Auth;
use crate::config::ClientConfig;
use crate::error::OpenCrmError;

/// A record as returned by OpenCRM: field name to value.
pub type Record = serde_json::Map<String, Value>;

/// Flat, stringified form fields as sent on the wire.
pub type FormFields = BTreeMap<String, String>;

/// A classified, successful API response.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    /// The response body was empty.
    Empty,
    /// The response body was valid JSON.
    Json(Value),
    /// The response body was not JSON; the raw text is kept as-is.
    Text(String),
}

impl ApiResponse {
    /// Classifies a raw response body.
    pub fn from_body(body: String) -> Self {
        if body.is_empty() {
            return ApiResponse::Empty;
        }
        match serde_json::from_str(&body) {
            Ok(json) => ApiResponse::Json(json),
            Err(_) => ApiResponse::Text(body),
        }
    }

    /// Returns true for an empty body.
    pub fn is_empty(&self) -> bool {
        matches!(self, ApiResponse::Empty)
    }

    /// Reads the response as a numeric id: a non-negative JSON integer or a digit string.
    ///
    /// Values that do not fit in a `u64` read as no id.
    pub fn as_id(&self) -> Option<u64> {
        match self {
            ApiResponse::Json(value) => value_as_id(value),
            ApiResponse::Text(text) => digit_string(text),
            ApiResponse::Empty => None,
        }
    }

    /// Converts the response into a JSON value. Empty becomes `null`, text becomes a string.
    pub fn into_value(self) -> Value {
        match self {
            ApiResponse::Empty => Value::Null,
            ApiResponse::Json(value) => value,
            ApiResponse::Text(text) => Value::String(text),
        }
    }
}

/// Reads a JSON value as an id: a non-negative integer or a digit string.
pub(crate) fn value_as_id(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => digit_string(s),
        _ => None,
    }
}

/// Parses a non-empty string made only of ASCII digits.
fn digit_string(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Converts a record into wire form fields.
///
/// Null values are dropped, strings are sent verbatim, booleans become
/// `"1"`/`"0"`, and everything else is sent as its JSON text.
pub fn stringify_fields(data: &Record) -> FormFields {
    data.iter()
        .filter_map(|(key, value)| {
            let text = match value {
                Value::Null => return None,
                Value::String(s) => s.clone(),
                Value::Bool(b) => (if *b { "1" } else { "0" }).to_string(),
                other => other.to_string(),
            };
            Some((key.clone(), text))
        })
        .collect()
}

/// Blocking HTTP transport for the OpenCRM API.
///
/// Not meant to be shared across threads without external synchronization;
/// use one client per thread.
#[derive(Debug)]
pub struct HttpClient {
    /// The underlying connection pool, created on first use.
    http: OnceLock<Client>,

    /// API root, always ending with `/api/rest/`.
    base_url: Url,

    /// Credential strategy.
    /// SECURITY: Never log this value!
    auth: Auth,

    /// User-Agent sent with every request.
    user_agent: String,

    /// Timeout applied to every request.
    timeout: Duration,
}

impl HttpClient {
    /// Creates a transport without opening a connection.
    pub fn new(base_url: Url, auth: Auth, user_agent: impl Into<String>, timeout: Duration) -> Self {
        Self {
            http: OnceLock::new(),
            base_url,
            auth,
            user_agent: user_agent.into(),
            timeout,
        }
    }

    /// Creates a transport from a validated configuration and an auth strategy.
    ///
    /// # Errors
    ///
    /// Returns `OpenCrmError::Config` if the API root cannot be derived.
    pub fn from_config(config: &ClientConfig, auth: Auth) -> Result<Self, OpenCrmError> {
        Ok(Self::new(
            config.api_base_url()?,
            auth,
            config.user_agent.clone(),
            config.timeout,
        ))
    }

    /// The API root every endpoint is joined onto.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The credential strategy in use.
    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    /// Returns true while a connection is held.
    pub fn is_open(&self) -> bool {
        self.http.get().is_some()
    }

    /// Releases the underlying connection. Calling it again is a no-op.
    pub fn close(&mut self) {
        if self.http.take().is_some() {
            tracing::debug!("Closed OpenCRM HTTP connection");
        }
    }

    /// Returns the underlying client, creating it on first use.
    fn client(&self) -> Result<&Client, OpenCrmError> {
        if let Some(client) = self.http.get() {
            return Ok(client);
        }

        let client = Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent.clone())
            .build()
            .map_err(|e| OpenCrmError::config(format!("failed to build HTTP client: {}", e)))?;

        tracing::debug!(timeout = ?self.timeout, "Opened OpenCRM HTTP connection");
        Ok(self.http.get_or_init(|| client))
    }

    /// Builds the headers for one request: User-Agent, then credentials.
    fn build_headers(&self) -> Result<HeaderMap, OpenCrmError> {
        let user_agent = HeaderValue::from_str(&self.user_agent).map_err(|_| {
            OpenCrmError::config("user_agent cannot be sent as an HTTP header")
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, user_agent);
        Ok(self.auth.augment_headers(&headers))
    }

    /// Makes a request to the OpenCRM API.
    ///
    /// # Arguments
    ///
    /// * `method` - HTTP method
    /// * `endpoint` - Endpoint name, e.g. `get_lead_list`
    /// * `data` - Form fields; null values are dropped and the rest stringified
    /// * `params` - URL query parameters
    ///
    /// # Errors
    ///
    /// Returns `OpenCrmError::Connection` for network failures and
    /// `NotFound`/`RateLimited`/`Api` for error statuses.
    pub fn request(
        &self,
        method: Method,
        endpoint: &str,
        data: Option<&Record>,
        params: Option<&[(&str, &str)]>,
    ) -> Result<ApiResponse, OpenCrmError> {
        let url = self.base_url.join(endpoint).map_err(|e| {
            OpenCrmError::config(format!("invalid endpoint {:?}: {}", endpoint, e))
        })?;

        let fields = data.map(stringify_fields).unwrap_or_default();
        let fields = self.auth.augment_body(&fields);
        let headers = self.build_headers()?;

        tracing::debug!(
            method = %method,
            endpoint = %endpoint,
            fields = fields.len(),
            "Making OpenCRM API request"
        );

        let mut req = self.client()?.request(method, url).headers(headers);

        if let Some(params) = params {
            req = req.query(params);
        }

        // Always multipart, even when there are no fields.
        let form = fields
            .into_iter()
            .fold(Form::new(), |form, (key, value)| form.text(key, value));
        req = req.multipart(form);

        let response = req.send().map_err(OpenCrmError::Connection)?;
        let status = response.status();
        let body = response.text().map_err(OpenCrmError::Connection)?;

        if status.as_u16() >= 400 {
            if status.as_u16() == 429 {
                tracing::warn!(endpoint = %endpoint, "Rate limited by OpenCRM");
            } else {
                tracing::debug!(endpoint = %endpoint, status = %status, "OpenCRM API error");
            }
            return Err(OpenCrmError::from_status(status.as_u16(), body));
        }

        tracing::trace!(body = %body, "OpenCRM API response");

        Ok(ApiResponse::from_body(body))
    }

    /// Makes a GET request to the OpenCRM API.
    pub fn get(
        &self,
        endpoint: &str,
        params: Option<&[(&str, &str)]>,
    ) -> Result<ApiResponse, OpenCrmError> {
        self.request(Method::GET, endpoint, None, params)
    }

    /// Makes a POST request to the OpenCRM API.
    pub fn post(&self, endpoint: &str, data: &Record) -> Result<ApiResponse, OpenCrmError> {
        self.request(Method::POST, endpoint, Some(data), None)
    }
}
