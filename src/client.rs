//! Top-level OpenCRM client.

use crate::auth::Auth;
use crate::config::ClientConfig;
use crate::error::OpenCrmError;
use crate::http_client::HttpClient;
use crate::models::CrmModel;
use crate::modules::Module;
use crate::resource::Resource;

/// Client for the OpenCRM REST API.
///
/// Owns the transport; each module accessor returns a [`Resource`] borrowing it.
///
/// # Example
///
/// ```no_run
/// use opencrm::{query, ClientConfig, ListParams, OpenCrmClient};
///
/// # fn main() -> Result<(), opencrm::OpenCrmError> {
/// let mut client = OpenCrmClient::new(ClientConfig::new("acme", "api-key", "pass-key"))?;
///
/// let params = ListParams::new()
///     .with_query(&query().equals("leadstatus", "New"))
///     .with_range(0, 50);
/// for lead in client.leads().list(&params)? {
///     println!("{:?}", lead.get("lastname"));
/// }
///
/// client.close();
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct OpenCrmClient {
    http: HttpClient,
}

impl OpenCrmClient {
    /// Creates a new client.
    ///
    /// The configuration is validated before anything touches the network.
    /// In session mode the login round-trip happens here.
    ///
    /// # Errors
    ///
    /// Returns `OpenCrmError::Config` for an invalid configuration and
    /// `OpenCrmError::Authentication` if the session login fails.
    pub fn new(config: ClientConfig) -> Result<Self, OpenCrmError> {
        config.validate()?;

        let auth = Auth::from_config(&config)?;
        let http = HttpClient::from_config(&config, auth)?;

        tracing::debug!(
            base_url = %http.base_url(),
            auth_method = %config.auth_method,
            "Created OpenCRM client"
        );

        Ok(Self { http })
    }

    /// The underlying transport.
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Any module by its endpoint binding.
    pub fn resource(&self, module: &'static Module) -> Resource<'_> {
        Resource::new(&self.http, module)
    }

    /// The module a typed model belongs to.
    pub fn resource_for<T: CrmModel>(&self) -> Resource<'_> {
        self.resource(T::MODULE)
    }

    /// Leads.
    pub fn leads(&self) -> Resource<'_> {
        self.resource(&Module::LEADS)
    }

    /// Contacts.
    pub fn contacts(&self) -> Resource<'_> {
        self.resource(&Module::CONTACTS)
    }

    /// Companies.
    pub fn companies(&self) -> Resource<'_> {
        self.resource(&Module::COMPANIES)
    }

    /// Projects.
    pub fn projects(&self) -> Resource<'_> {
        self.resource(&Module::PROJECTS)
    }

    /// Helpdesk tickets.
    pub fn helpdesk(&self) -> Resource<'_> {
        self.resource(&Module::HELPDESK)
    }

    /// Opportunities.
    pub fn opportunities(&self) -> Resource<'_> {
        self.resource(&Module::OPPORTUNITIES)
    }

    /// Products.
    pub fn products(&self) -> Resource<'_> {
        self.resource(&Module::PRODUCTS)
    }

    /// Activities.
    pub fn activities(&self) -> Resource<'_> {
        self.resource(&Module::ACTIVITIES)
    }

    /// Releases the HTTP connection. Safe to call more than once.
    ///
    /// Dropping the client releases it too.
    pub fn close(&mut self) {
        self.http.close();
    }
}
