//! Client for the backup admin REST api.
//!
//! [`AdminClient`] hands out one [`ResourceClient`] per backend collection.
//! [`AdminContext`] bundles it with the confirmation and toast state that
//! views share.

pub mod confirm;
pub mod error;
pub mod notify;
pub mod query;
pub mod resource;
pub mod transport;

pub use confirm::{ConfirmDialog, ConfirmError, ConfirmOptions, ConfirmWorkflow, DialogKind};
pub use error::{ClientError, Result};
pub use notify::{Notifier, Severity, ToastSink};
pub use query::{LogQuery, PageQuery, QueryParams, ServerQuery};
pub use resource::{Destinations, Logs, Resource, ResourceClient, Servers, Tasks};
pub use transport::{ApiClient, DEFAULT_API_BASE};

#[derive(Debug, Clone)]
pub struct AdminClient {
    api: ApiClient,
}

impl AdminClient {
    pub fn new(api_base: &str) -> Result<Self> {
        Ok(Self::from_api(ApiClient::new(api_base)?))
    }

    pub fn from_api(api: ApiClient) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn servers(&self) -> ResourceClient<Servers> {
        ResourceClient::new(self.api.clone())
    }

    pub fn destinations(&self) -> ResourceClient<Destinations> {
        ResourceClient::new(self.api.clone())
    }

    pub fn tasks(&self) -> ResourceClient<Tasks> {
        ResourceClient::new(self.api.clone())
    }

    pub fn logs(&self) -> ResourceClient<Logs> {
        ResourceClient::new(self.api.clone())
    }
}

/// Everything a view needs, passed in rather than reached through globals.
/// Clones share confirmation and notification state.
#[derive(Debug, Clone)]
pub struct AdminContext {
    pub api: AdminClient,
    pub confirm: ConfirmWorkflow,
    pub notifier: Notifier,
}

impl AdminContext {
    pub fn new(api: AdminClient) -> Self {
        Self {
            api,
            confirm: ConfirmWorkflow::new(),
            notifier: Notifier::new(),
        }
    }

    /// Shows the outcome of a view action: `success` on `Ok`, the error
    /// message on `Err`. The result is handed back unchanged.
    pub fn notify_outcome<T, E>(
        &self,
        result: std::result::Result<T, E>,
        success: impl AsRef<str>,
    ) -> std::result::Result<T, E>
    where
        E: std::error::Error,
    {
        match &result {
            Ok(_) => self.notifier.success(success),
            Err(err) => self.notifier.report(err),
        }
        result
    }
}

#[cfg(test)]
#[path = "tests/mock_backend.rs"]
mod mock_backend;
