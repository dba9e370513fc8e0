//! Dependencies injected into the storefront reducers.

use crate::api::StorefrontApi;
use std::sync::Arc;

/// Environment shared by every storefront slice.
#[derive(Clone)]
pub struct ClientEnvironment {
    /// Server API that request effects call.
    pub api: Arc<dyn StorefrontApi>,
}

impl ClientEnvironment {
    /// Environment calling the given API.
    #[must_use]
    pub fn new(api: Arc<dyn StorefrontApi>) -> Self {
        Self { api }
    }
}

impl std::fmt::Debug for ClientEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientEnvironment").finish_non_exhaustive()
    }
}
