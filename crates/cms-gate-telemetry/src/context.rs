//! Application-level span helpers.

use tracing::{Span, span::Entered};

use crate::init::build_sha;

/// Guard that keeps the application-level span entered for the lifetime of the process.
pub struct GlobalContextGuard {
    _guard: Entered<'static>,
}

impl GlobalContextGuard {
    #[must_use]
    /// Enter the application-level tracing span for the lifetime of the guard.
    pub fn new(provider: impl Into<String>) -> Self {
        let provider = provider.into();
        let span: &'static Span = Box::leak(Box::new(tracing::info_span!(
            "cms_gate",
            provider = %provider,
            build_sha = %build_sha()
        )));
        let guard = span.enter();
        Self { _guard: guard }
    }
}

/// Record the active provider mode on the current span.
pub fn record_provider_mode(mode: &str) {
    Span::current().record("provider", tracing::field::display(mode));
}

#[cfg(test)]
mod tests {
    use super::{GlobalContextGuard, record_provider_mode};

    #[test]
    fn provider_mode_is_recorded_inside_the_context_span() {
        let _guard = GlobalContextGuard::new("basic");
        record_provider_mode("local");
    }
}
