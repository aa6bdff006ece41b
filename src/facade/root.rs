use std::sync::Arc;

use reqwest::Client;

use super::{Node, ProjectsFacade};
use crate::config::Config;
use crate::credential::Credential;
use crate::dispatch::{Dispatcher, RetryPolicy};
use crate::error::Result;

/// Root of a facade chain.
///
/// Holds the credential shared by every node below it. Cloning a root is
/// cheap and keeps pointing at the same credential.
#[derive(Debug, Clone)]
pub struct Tracker {
    credential: Arc<Credential>,
    client: Client,
    retry: RetryPolicy,
}

impl Tracker {
    pub fn new(credential: Credential) -> Self {
        Self::with_retry(credential, RetryPolicy::default())
    }

    pub fn with_retry(credential: Credential, retry: RetryPolicy) -> Self {
        Self {
            credential: Arc::new(credential),
            client: Client::new(),
            retry,
        }
    }

    /// Build a root from raw values, failing fast on an incomplete credential.
    pub fn connect(api_key: impl Into<String>, base_url: impl AsRef<str>) -> Result<Self> {
        Ok(Self::new(Credential::new(api_key, base_url)?))
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::with_retry(config.credential()?, config.retry_policy()))
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Whether both roots share the same credential instance.
    pub fn same_root(&self, other: &Tracker) -> bool {
        Arc::ptr_eq(&self.credential, &other.credential)
    }

    /// Navigate to the projects of the account.
    pub fn projects(&self) -> ProjectsFacade {
        ProjectsFacade::new(self)
    }

    /// A fresh dispatcher bound to this root's credential.
    pub(crate) fn dispatcher(&self) -> Dispatcher {
        Dispatcher::new(Arc::clone(&self.credential), self.client.clone(), self.retry)
    }
}

impl Node for Tracker {
    fn root(&self) -> &Tracker {
        self
    }
}
