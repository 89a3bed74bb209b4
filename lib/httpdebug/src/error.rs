use std::error::Error;

/// Errors that can occur while inspecting or dispatching a request.
///
/// Errors coming from the delegate transport are passed through untouched,
/// the interceptor never retries nor reinterprets them.
#[derive(Debug, derive_more::Error, derive_more::Display, derive_more::From)]
pub enum HttpDebugError {
    /// The request body could not be drained for rendering.
    ///
    /// The request is not sent when this happens.
    #[display("failed to read request body: {source}")]
    #[from(skip)]
    BodyRead {
        /// The error returned by the body stream.
        source: reqwest::Error,
    },

    /// HTTP client error from the underlying reqwest library.
    ///
    /// Returned verbatim by the default transport.
    #[display("{_0}")]
    Transport(reqwest::Error),

    /// Error returned by a custom [`Sender`](crate::Sender) implementation.
    #[display("{_0}")]
    #[from(skip)]
    Delegate(#[error(not(source))] Box<dyn Error + Send + Sync>),

    /// HTTP protocol error from the http crate.
    ///
    /// Occurs when building a request with an invalid method, URI or header.
    #[display("{_0}")]
    Http(http::Error),
}

impl HttpDebugError {
    /// Wraps an error produced by a custom delegate transport.
    pub fn delegate(error: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        Self::Delegate(error.into())
    }
}
