//! Client configuration.
//!
//! `ClientConfig` carries everything the client needs at construction time:
//! the OpenCRM system name, the API key pair, the authentication method, the
//! User-Agent string, and the per-request timeout. Nothing is loaded from the
//! environment here; the `opencrm` binary does that before building a config.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use url::Url;

use crate::error::OpenCrmError;

/// Default User-Agent. OpenCRM rejects requests carrying default tool agents such as curl's.
pub const DEFAULT_USER_AGENT: &str = concat!("opencrm-rust/", env!("CARGO_PKG_VERSION"));

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Domain every OpenCRM system lives under.
const OPENCRM_DOMAIN: &str = "opencrm.co.uk";

/// Path of the REST API below the system host.
const API_PATH: &str = "/api/rest";

/// How credentials are attached to outgoing calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMethod {
    /// Send `apikey`/`passkey` as form fields with every request.
    #[default]
    Keys,
    /// Send the key pair as `KEY1`/`KEY2` headers.
    Headers,
    /// Log in once and send the returned session `accesskey`.
    Session,
}

impl AuthMethod {
    /// The configuration name of this method.
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthMethod::Keys => "keys",
            AuthMethod::Headers => "headers",
            AuthMethod::Session => "session",
        }
    }
}

impl fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthMethod {
    type Err = OpenCrmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "keys" => Ok(AuthMethod::Keys),
            "headers" => Ok(AuthMethod::Headers),
            "session" => Ok(AuthMethod::Session),
            other => Err(OpenCrmError::config(format!(
                "invalid auth_method: {:?} (expected keys, headers or session)",
                other
            ))),
        }
    }
}

/// Configuration for connecting to an OpenCRM system.
///
/// The key pair is held in memory only and never logged; `Debug` redacts it.
#[derive(Clone)]
pub struct ClientConfig {
    /// OpenCRM system name: the subdomain in `https://{system}.opencrm.co.uk`.
    pub system_name: String,

    /// API key issued by OpenCRM.
    /// This value must never be logged or included in error messages.
    pub api_key: String,

    /// API pass key issued by OpenCRM.
    /// This value must never be logged or included in error messages.
    pub pass_key: String,

    /// Authentication method.
    pub auth_method: AuthMethod,

    /// User-Agent header sent with every request.
    pub user_agent: String,

    /// Timeout applied to every request.
    pub timeout: Duration,

    /// Overrides the API root derived from `system_name`.
    pub base_url: Option<String>,
}

impl ClientConfig {
    /// Creates a configuration with the default auth method, User-Agent and timeout.
    pub fn new(
        system_name: impl Into<String>,
        api_key: impl Into<String>,
        pass_key: impl Into<String>,
    ) -> Self {
        Self {
            system_name: system_name.into(),
            api_key: api_key.into(),
            pass_key: pass_key.into(),
            auth_method: AuthMethod::default(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            base_url: None,
        }
    }

    /// Sets the authentication method.
    pub fn with_auth_method(mut self, method: AuthMethod) -> Self {
        self.auth_method = method;
        self
    }

    /// Sets the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Points the client at a different host, e.g. a local mock server.
    ///
    /// The URL is normalized to end with `/api/rest/`.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Checks that every required value is present and usable.
    ///
    /// # Errors
    ///
    /// Returns `OpenCrmError::Config` naming the first offending value.
    pub fn validate(&self) -> Result<(), OpenCrmError> {
        if self.system_name.trim().is_empty() {
            return Err(OpenCrmError::config("system_name is required"));
        }
        Self::check_system_name(&self.system_name)?;
        if self.api_key.is_empty() || self.pass_key.is_empty() {
            return Err(OpenCrmError::config("api_key and pass_key are required"));
        }
        if self.user_agent.trim().is_empty() {
            return Err(OpenCrmError::config(
                "user_agent must not be empty - OpenCRM blocks default tool agents",
            ));
        }
        if self.timeout.is_zero() {
            return Err(OpenCrmError::config("timeout must be greater than zero"));
        }
        self.api_base_url().map(|_| ())
    }

    /// Returns the API root, always ending with `/api/rest/` so endpoints can be joined onto it.
    ///
    /// # Errors
    ///
    /// Returns `OpenCrmError::Config` if the system name or override does not form a valid URL.
    pub fn api_base_url(&self) -> Result<Url, OpenCrmError> {
        let raw = match &self.base_url {
            Some(url) => Self::normalize_base_url(url),
            None => {
                Self::check_system_name(&self.system_name)?;
                format!(
                    "https://{}.{}{}/",
                    self.system_name.trim(),
                    OPENCRM_DOMAIN,
                    API_PATH
                )
            }
        };

        let url = Url::parse(&raw)
            .map_err(|e| OpenCrmError::config(format!("invalid API URL {:?}: {}", raw, e)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(OpenCrmError::config(
                "base_url must start with http:// or https://",
            ));
        }

        Ok(url)
    }

    /// The system name becomes the first label of the API host, so it must be
    /// exactly one DNS label: letters, digits and inner hyphens.
    fn check_system_name(name: &str) -> Result<(), OpenCrmError> {
        let name = name.trim();
        let is_label = !name.is_empty()
            && name.len() <= 63
            && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
            && !name.starts_with('-')
            && !name.ends_with('-');
        if is_label {
            Ok(())
        } else {
            Err(OpenCrmError::config(format!(
                "invalid system_name {:?}: expected a single host label such as \"acme\"",
                name
            )))
        }
    }

    /// Normalizes an override URL to include the API path and a trailing slash.
    fn normalize_base_url(url: &str) -> String {
        let url = url.trim().trim_end_matches('/');
        if url.ends_with(API_PATH) {
            format!("{}/", url)
        } else if url.ends_with("/api") {
            format!("{}/rest/", url)
        } else {
            format!("{}{}/", url, API_PATH)
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("system_name", &self.system_name)
            .field("api_key", &"[REDACTED]")
            .field("pass_key", &"[REDACTED]")
            .field("auth_method", &self.auth_method)
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .field("base_url", &self.base_url)
            .finish()
    }
}
