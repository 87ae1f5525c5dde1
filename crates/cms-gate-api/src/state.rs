//! Shared router state.

use std::sync::Arc;

use crate::http::forward::Forwarder;
use crate::provider::BackendAuthProvider;

pub(crate) struct ApiState {
    pub(crate) provider: Arc<dyn BackendAuthProvider>,
    pub(crate) upstream: Option<Forwarder>,
}

impl ApiState {
    pub(crate) fn new(provider: Arc<dyn BackendAuthProvider>, upstream: Option<Forwarder>) -> Self {
        Self { provider, upstream }
    }
}
