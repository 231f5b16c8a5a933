//! # OpenCRM
//!
//! A blocking client for the OpenCRM REST API.
//!
//! It covers the eight core modules (leads, contacts, companies, projects,
//! helpdesk tickets, opportunities, products and activities) with the same
//! five operations each: count, list, get, create and update, plus a
//! paginating iterator over list results.
//!
//! ## Architecture
//!
//! - [`config`] - Client configuration and validation
//! - [`error`] - Error types
//! - [`auth`] - Credential strategies (body keys, header keys, session)
//! - [`http_client`] - The HTTP transport and response classification
//! - [`query`] - Builder for `FIELD|OPERATOR|VALUE` filter strings
//! - [`modules`] - Endpoint names per module
//! - [`resource`] - Generic CRUD over one module
//! - [`models`] - Optional typed record structs
//! - [`client`] - The [`OpenCrmClient`] facade
//!
//! ## Authentication
//!
//! | [`AuthMethod`] | Credentials sent                              |
//! |----------------|-----------------------------------------------|
//! | `Keys`         | `apikey`/`passkey` form fields (default)      |
//! | `Headers`      | `KEY1`/`KEY2` HTTP headers                    |
//! | `Session`      | `accesskey` form field, obtained at login     |
//!
//! ## Security Considerations
//!
//! API keys, pass keys and session keys are never logged, and are redacted
//! from `Debug` output.
//!
//! ## Example
//!
//! ```no_run
//! use opencrm::{query, ClientConfig, ListParams, OpenCrmClient};
//!
//! # fn main() -> Result<(), opencrm::OpenCrmError> {
//! let client = OpenCrmClient::new(ClientConfig::new("acme", "api-key", "pass-key"))?;
//!
//! let open = ListParams::new().with_query(&query().equals("status", "Open"));
//! println!("{} open tickets", client.helpdesk().count(&open)?);
//!
//! for ticket in client.helpdesk().iterate(open, 100) {
//!     let ticket = ticket?;
//!     println!("{:?}", ticket.get("title"));
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod http_client;
pub mod models;
pub mod modules;
pub mod query;
pub mod resource;

pub use client::OpenCrmClient;
pub use config::{AuthMethod, ClientConfig};
pub use error::OpenCrmError;
pub use http_client::{ApiResponse, Record};
pub use modules::Module;
pub use query::{query, Operator, QueryBuilder};
pub use resource::{ListParams, Records, Resource};
