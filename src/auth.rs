//! Authentication strategies.
//!
//! OpenCRM accepts credentials in three ways, modelled as the closed enum
//! [`Auth`]: the key pair as form fields, the key pair as `KEY1`/`KEY2`
//! headers, or a session access key obtained from a login call. Each
//! strategy returns augmented copies of the outgoing body and headers and
//! never mutates its inputs.
//!
//! # Security
//!
//! Keys are never logged. `Debug` prints only the strategy name, and header
//! values are marked sensitive so `reqwest` keeps them out of its own output.

use std::fmt;
use std::time::Duration;

use reqwest::blocking::{multipart::Form, Client};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use url::Url;

use crate::config::{AuthMethod, ClientConfig};
use crate::error::OpenCrmError;
use crate::http_client::FormFields;

/// Endpoint that exchanges a key pair for a session access key.
const LOGIN_ENDPOINT: &str = "login";

/// Header carrying the API key in header mode.
const KEY1_HEADER: HeaderName = HeaderName::from_static("key1");

/// Header carrying the pass key in header mode.
const KEY2_HEADER: HeaderName = HeaderName::from_static("key2");

/// Credentials attached to every outgoing call.
#[derive(Clone)]
pub enum Auth {
    /// Key pair sent as `apikey`/`passkey` form fields.
    BodyKeys {
        /// API key.
        api_key: String,
        /// Pass key.
        pass_key: String,
    },
    /// Key pair sent as `KEY1`/`KEY2` headers.
    HeaderKeys {
        /// API key, pre-validated as a header value.
        api_key: HeaderValue,
        /// Pass key, pre-validated as a header value.
        pass_key: HeaderValue,
    },
    /// Session access key sent as the `accesskey` form field.
    Session {
        /// The key returned by the login call.
        access_key: String,
    },
}

impl Auth {
    /// Builds the strategy selected by `config`.
    ///
    /// Session mode performs the login round-trip here, so a client built in
    /// session mode is either authenticated or not built at all.
    ///
    /// # Errors
    ///
    /// Returns `OpenCrmError::Config` for unusable keys or URLs, and
    /// `OpenCrmError::Authentication` if the session login fails.
    pub fn from_config(config: &ClientConfig) -> Result<Self, OpenCrmError> {
        match config.auth_method {
            AuthMethod::Keys => Ok(Self::body_keys(&config.api_key, &config.pass_key)),
            AuthMethod::Headers => Self::header_keys(&config.api_key, &config.pass_key),
            AuthMethod::Session => Self::login(
                &config.api_base_url()?,
                &config.api_key,
                &config.pass_key,
                &config.user_agent,
                config.timeout,
            ),
        }
    }

    /// Key pair sent in the request body.
    pub fn body_keys(api_key: impl Into<String>, pass_key: impl Into<String>) -> Self {
        Auth::BodyKeys {
            api_key: api_key.into(),
            pass_key: pass_key.into(),
        }
    }

    /// Key pair sent as headers.
    ///
    /// # Errors
    ///
    /// Returns `OpenCrmError::Config` if either key cannot be sent as a header value.
    pub fn header_keys(api_key: &str, pass_key: &str) -> Result<Self, OpenCrmError> {
        Ok(Auth::HeaderKeys {
            api_key: Self::sensitive_header(api_key, "api_key")?,
            pass_key: Self::sensitive_header(pass_key, "pass_key")?,
        })
    }

    /// Session access key obtained elsewhere.
    pub fn session(access_key: impl Into<String>) -> Self {
        Auth::Session {
            access_key: access_key.into(),
        }
    }

    /// Exchanges the key pair for a session access key.
    ///
    /// POSTs `key`/`passkey` to `{base_url}login`. The access key is the
    /// `accesskey` field of a JSON object response, or else the trimmed raw
    /// response body.
    ///
    /// # Errors
    ///
    /// Returns `OpenCrmError::Authentication` on a non-2xx status, a network
    /// failure, or an empty key. The raw response is attached when available.
    pub fn login(
        base_url: &Url,
        api_key: &str,
        pass_key: &str,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<Self, OpenCrmError> {
        let login_url = base_url
            .join(LOGIN_ENDPOINT)
            .map_err(|e| OpenCrmError::config(format!("invalid login URL: {}", e)))?;

        tracing::debug!(url = %login_url, "Requesting OpenCRM session access key");

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| OpenCrmError::config(format!("failed to build HTTP client: {}", e)))?;

        let form = Form::new()
            .text("key", api_key.to_string())
            .text("passkey", pass_key.to_string());

        let response = http
            .post(login_url)
            .multipart(form)
            .send()
            .map_err(Self::login_transport_error)?;

        let status = response.status();
        let body = response.text().map_err(Self::login_transport_error)?;

        if !status.is_success() {
            tracing::warn!(status = %status, "OpenCRM login rejected");
            return Err(OpenCrmError::authentication(
                format!("login failed with status {}", status.as_u16()),
                Some(body),
            ));
        }

        let access_key = Self::extract_access_key(&body);
        if access_key.is_empty() {
            return Err(OpenCrmError::authentication(
                "login succeeded but no access key returned",
                Some(body),
            ));
        }

        tracing::debug!("OpenCRM session established");
        Ok(Auth::Session { access_key })
    }

    /// Returns the configuration method this strategy corresponds to.
    pub fn method(&self) -> AuthMethod {
        match self {
            Auth::BodyKeys { .. } => AuthMethod::Keys,
            Auth::HeaderKeys { .. } => AuthMethod::Headers,
            Auth::Session { .. } => AuthMethod::Session,
        }
    }

    /// Returns a copy of `body` with this strategy's form fields added.
    pub fn augment_body(&self, body: &FormFields) -> FormFields {
        let mut body = body.clone();
        match self {
            Auth::BodyKeys { api_key, pass_key } => {
                body.insert("apikey".to_string(), api_key.clone());
                body.insert("passkey".to_string(), pass_key.clone());
            }
            Auth::Session { access_key } => {
                body.insert("accesskey".to_string(), access_key.clone());
            }
            Auth::HeaderKeys { .. } => {}
        }
        body
    }

    /// Returns a copy of `headers` with this strategy's headers added.
    pub fn augment_headers(&self, headers: &HeaderMap) -> HeaderMap {
        let mut headers = headers.clone();
        if let Auth::HeaderKeys { api_key, pass_key } = self {
            headers.insert(KEY1_HEADER, api_key.clone());
            headers.insert(KEY2_HEADER, pass_key.clone());
        }
        headers
    }

    fn sensitive_header(value: &str, name: &str) -> Result<HeaderValue, OpenCrmError> {
        let mut header = HeaderValue::from_str(value).map_err(|_| {
            OpenCrmError::config(format!("{} cannot be sent as an HTTP header", name))
        })?;
        header.set_sensitive(true);
        Ok(header)
    }

    fn extract_access_key(body: &str) -> String {
        let from_json = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|json| {
                json.get("accesskey")
                    .and_then(Value::as_str)
                    .map(str::to_string)
            })
            .filter(|key| !key.is_empty());

        from_json.unwrap_or_else(|| body.trim().to_string())
    }

    fn login_transport_error(e: reqwest::Error) -> OpenCrmError {
        OpenCrmError::Authentication {
            message: format!("login request failed: {}", e),
            response: None,
            source: Some(e),
        }
    }
}

impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Auth::{:?}([REDACTED])", self.method())
    }
}
