use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, LazyLock};

use crate::{HttpDebugError, Request};

/// Future returned by [`Sender::send`].
pub type SendFuture<'a> =
    Pin<Box<dyn Future<Output = Result<reqwest::Response, HttpDebugError>> + Send + 'a>>;

/// Something able to perform an HTTP exchange.
///
/// Implemented by [`reqwest::Client`] and by [`Interceptor`](crate::Interceptor),
/// so interceptors can be chained.
///
/// # Example
///
/// ```rust
/// use httpdebug::{HttpDebugError, Request, SendFuture, Sender};
///
/// /// Answers every request with `204 No Content`.
/// struct NoContent;
///
/// impl Sender for NoContent {
///     fn send(&self, _request: Request) -> SendFuture<'_> {
///         Box::pin(async {
///             let response = http::Response::builder()
///                 .status(204)
///                 .body(String::new())?;
///             Ok::<_, HttpDebugError>(reqwest::Response::from(response))
///         })
///     }
/// }
/// ```
pub trait Sender: Send + Sync {
    /// Sends the request and returns the response.
    fn send(&self, request: Request) -> SendFuture<'_>;
}

impl Sender for reqwest::Client {
    fn send(&self, request: Request) -> SendFuture<'_> {
        Box::pin(async move {
            let request = reqwest::Request::try_from(request)?;
            let response = self.execute(request).await?;
            Ok::<_, HttpDebugError>(response)
        })
    }
}

impl<S> Sender for Arc<S>
where
    S: Sender + ?Sized,
{
    fn send(&self, request: Request) -> SendFuture<'_> {
        S::send(self, request)
    }
}

static DEFAULT_TRANSPORT: LazyLock<reqwest::Client> = LazyLock::new(reqwest::Client::new);

/// Process-wide client used when no delegate is configured.
pub(crate) fn default_transport() -> &'static reqwest::Client {
    &DEFAULT_TRANSPORT
}
