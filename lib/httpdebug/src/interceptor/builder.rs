use std::sync::Arc;

use super::Interceptor;
use crate::{RedactionPolicy, Sender, Sink, StderrSink};

/// Builder for creating [`Interceptor`] instances.
///
/// Modifiers are applied in call order. Adding an empty secret name does nothing.
///
/// # Default Configuration
///
/// - **Secret headers**: `authorization`
/// - **Secret query parameters**: `client_secret`
/// - **Delegate**: none, a process-wide [`reqwest::Client`] is used
/// - **Sink**: [`StderrSink`]
///
/// # Example
///
/// ```rust
/// use httpdebug::{Interceptor, RedactionPolicy, TracingSink};
///
/// let interceptor = Interceptor::builder()
///     .add_secret_header("X-Api-Key")
///     .add_secret_param("api_key")
///     .with_delegate(reqwest::Client::new())
///     .with_sink(TracingSink)
///     .build();
///
/// assert!(interceptor.policy().is_secret_header("x-api-key"));
/// ```
#[derive(Clone)]
pub struct InterceptorBuilder {
    policy: RedactionPolicy,
    delegate: Option<Arc<dyn Sender>>,
    sink: Arc<dyn Sink>,
}

impl Default for InterceptorBuilder {
    fn default() -> Self {
        Self {
            policy: RedactionPolicy::default(),
            delegate: None,
            sink: Arc::new(StderrSink),
        }
    }
}

impl InterceptorBuilder {
    /// Builds the [`Interceptor`], its configuration cannot change afterwards.
    pub fn build(self) -> Interceptor {
        let Self {
            policy,
            delegate,
            sink,
        } = self;

        Interceptor {
            policy,
            delegate,
            sink,
        }
    }

    /// Adds a header whose value must be hidden, compared case-insensitively.
    #[must_use]
    pub fn add_secret_header(mut self, name: impl Into<String>) -> Self {
        self.policy = self.policy.add_secret_header(name);
        self
    }

    /// Adds a query parameter whose value must be hidden, compared case-insensitively.
    #[must_use]
    pub fn add_secret_param(mut self, name: impl Into<String>) -> Self {
        self.policy = self.policy.add_secret_param(name);
        self
    }

    /// Replaces the whole redaction policy, defaults included.
    ///
    /// Secrets added before this call are lost, those added after are appended.
    #[must_use]
    pub fn with_policy(mut self, policy: RedactionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the transport used to actually send the requests.
    ///
    /// Another [`Interceptor`] is a valid delegate.
    #[must_use]
    pub fn with_delegate(mut self, delegate: impl Sender + 'static) -> Self {
        self.delegate = Some(Arc::new(delegate));
        self
    }

    /// Sets the destination of the rendered commands.
    #[must_use]
    pub fn with_sink(mut self, sink: impl Sink + 'static) -> Self {
        self.sink = Arc::new(sink);
        self
    }
}
