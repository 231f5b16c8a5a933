//! Shared helpers for the integration tests.
//!
//! The client is blocking, so every client call runs inside
//! `spawn_blocking`; the mock server keeps running on the async runtime.

#![allow(dead_code)]

use std::collections::BTreeMap;

use opencrm::{ClientConfig, OpenCrmClient};
use wiremock::{Match, MockServer, Request};

pub const API_KEY: &str = "test-api-key";
pub const PASS_KEY: &str = "test-pass-key";

/// Mount path of an endpoint below the mock server's API root.
pub fn endpoint(name: &str) -> String {
    format!("/api/rest/{}", name)
}

/// Configuration pointing at the mock server.
pub fn config(server: &MockServer) -> ClientConfig {
    ClientConfig::new("test", API_KEY, PASS_KEY).with_base_url(server.uri())
}

/// Builds a client against the mock server and runs `f` with it off the async runtime.
pub async fn with_client<T, F>(config: ClientConfig, f: F) -> T
where
    T: Send + 'static,
    F: FnOnce(OpenCrmClient) -> T + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let client = OpenCrmClient::new(config).expect("client");
        f(client)
    })
    .await
    .expect("blocking task panicked")
}

/// Decodes the multipart/form-data body of `request` into name/value pairs.
///
/// Returns an empty map when the request has no multipart body.
pub fn form_fields(request: &Request) -> BTreeMap<String, String> {
    let Some(boundary) = request
        .headers
        .get("content-type")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split("boundary=").nth(1))
        .map(|boundary| boundary.trim_matches('"').to_string())
    else {
        return BTreeMap::new();
    };

    let body = String::from_utf8_lossy(&request.body);
    let delimiter = format!("--{}", boundary);

    body.split(delimiter.as_str())
        .filter_map(|part| {
            let (head, value) = part.split_once("\r\n\r\n")?;
            let name = head
                .split("name=\"")
                .nth(1)?
                .split('"')
                .next()?
                .to_string();
            let value = value.strip_suffix("\r\n").unwrap_or(value).to_string();
            Some((name, value))
        })
        .collect()
}

/// Matches requests whose form body has `name` set to `value`.
pub struct FormField {
    name: String,
    value: String,
}

pub fn form_field(name: impl Into<String>, value: impl Into<String>) -> FormField {
    FormField {
        name: name.into(),
        value: value.into(),
    }
}

impl Match for FormField {
    fn matches(&self, request: &Request) -> bool {
        form_fields(request).get(&self.name) == Some(&self.value)
    }
}
