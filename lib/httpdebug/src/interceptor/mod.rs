use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::sender::default_transport;
use crate::{Client, HttpDebugError, RedactionPolicy, Request, SendFuture, Sender, Sink};

mod builder;
pub use self::builder::InterceptorBuilder;

#[cfg(test)]
mod integration_tests;

/// Transport that logs every request as a `curl` command before sending it.
///
/// The request reaches the delegate unchanged: if its body had to be read for
/// rendering, the same bytes are put back before it is forwarded.
/// Responses and delegate errors are returned as is.
///
/// # Example
///
/// ```rust,no_run
/// use httpdebug::{Interceptor, TracingSink};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = Interceptor::builder()
///     .add_secret_header("X-Api-Key")
///     .add_secret_param("api_key")
///     .with_sink(TracingSink)
///     .build()
///     .client();
///
/// let response = client
///     .get("http://localhost:8080/users?api_key=s3cr3t")
///     .header("x-api-key", "s3cr3t")
///     .send()
///     .await?;
/// # Ok(())
/// # }
/// ```
///
/// # Thread Safety
///
/// The redaction policy is fixed by [`InterceptorBuilder::build`], concurrent
/// dispatches only read it.
#[derive(Clone)]
pub struct Interceptor {
    policy: RedactionPolicy,
    delegate: Option<Arc<dyn Sender>>,
    sink: Arc<dyn Sink>,
}

impl fmt::Debug for Interceptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interceptor")
            .field("policy", &self.policy)
            .field("has_delegate", &self.has_delegate())
            .finish_non_exhaustive()
    }
}

impl Default for Interceptor {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Interceptor {
    /// Creates an interceptor with the default policy, sending with a shared
    /// [`reqwest::Client`] and logging on the standard error.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the configuration of an interceptor.
    pub fn builder() -> InterceptorBuilder {
        InterceptorBuilder::default()
    }

    /// The redaction policy applied when rendering.
    pub fn policy(&self) -> &RedactionPolicy {
        &self.policy
    }

    /// Returns `true` if a delegate transport was configured.
    pub fn has_delegate(&self) -> bool {
        self.delegate.is_some()
    }

    /// Renders the request with this interceptor policy.
    ///
    /// # Errors
    ///
    /// Fails if the request body cannot be read, see [`render`](crate::render::render).
    pub async fn render(&self, request: &mut Request) -> Result<String, HttpDebugError> {
        crate::render::render(request, &self.policy).await
    }

    /// Renders and emits the request, then forwards it to the delegate.
    ///
    /// # Errors
    ///
    /// Returns [`HttpDebugError::BodyRead`] without calling the delegate if the body
    /// cannot be read. Otherwise returns the delegate result untouched.
    pub async fn dispatch(&self, mut request: Request) -> Result<reqwest::Response, HttpDebugError> {
        let command = self.render(&mut request).await?;
        self.sink.emit(&command);

        debug!(method = %request.method(), uri = %request.uri(), "dispatching...");
        match &self.delegate {
            Some(delegate) => delegate.send(request).await,
            None => default_transport().send(request).await,
        }
    }

    /// Returns a client that sends all its requests through this interceptor.
    pub fn client(self) -> Client {
        Client::new(self)
    }
}

impl Sender for Interceptor {
    fn send(&self, request: Request) -> SendFuture<'_> {
        Box::pin(self.dispatch(request))
    }
}
