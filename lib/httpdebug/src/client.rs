use std::sync::Arc;

use bytes::Bytes;
use http::header::{HeaderName, HeaderValue};
use http::{Method, request};

use crate::{HttpDebugError, Interceptor, Request};

/// HTTP client sending every request through an [`Interceptor`].
///
/// Cloning is cheap, clones share the same interceptor.
///
/// # Example
///
/// ```rust,no_run
/// use httpdebug::Interceptor;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = Interceptor::new().client();
///
/// let response = client
///     .post("http://localhost:8080/login")
///     .header("content-type", "application/json")
///     .body(r#"{"login":"bob"}"#)
///     .send()
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    interceptor: Arc<Interceptor>,
}

impl Client {
    pub(crate) fn new(interceptor: Interceptor) -> Self {
        Self {
            interceptor: Arc::new(interceptor),
        }
    }

    /// The interceptor every request goes through.
    pub fn interceptor(&self) -> &Interceptor {
        &self.interceptor
    }

    /// Starts a request with the given method and URI.
    ///
    /// An invalid URI is reported when the request is built or sent.
    pub fn request(&self, method: Method, uri: impl AsRef<str>) -> RequestBuilder {
        let builder = http::Request::builder().method(method).uri(uri.as_ref());
        RequestBuilder {
            client: self.clone(),
            builder,
            body: None,
        }
    }

    /// Starts a `GET` request.
    pub fn get(&self, uri: impl AsRef<str>) -> RequestBuilder {
        self.request(Method::GET, uri)
    }

    /// Starts a `POST` request.
    pub fn post(&self, uri: impl AsRef<str>) -> RequestBuilder {
        self.request(Method::POST, uri)
    }

    /// Starts a `PUT` request.
    pub fn put(&self, uri: impl AsRef<str>) -> RequestBuilder {
        self.request(Method::PUT, uri)
    }

    /// Starts a `PATCH` request.
    pub fn patch(&self, uri: impl AsRef<str>) -> RequestBuilder {
        self.request(Method::PATCH, uri)
    }

    /// Starts a `DELETE` request.
    pub fn delete(&self, uri: impl AsRef<str>) -> RequestBuilder {
        self.request(Method::DELETE, uri)
    }

    /// Starts a `HEAD` request.
    pub fn head(&self, uri: impl AsRef<str>) -> RequestBuilder {
        self.request(Method::HEAD, uri)
    }

    /// Sends an already built request through the interceptor.
    ///
    /// # Errors
    ///
    /// See [`Interceptor::dispatch`].
    pub async fn execute(&self, request: Request) -> Result<reqwest::Response, HttpDebugError> {
        self.interceptor.dispatch(request).await
    }
}

/// Request under construction, created by a [`Client`].
#[derive(Debug)]
pub struct RequestBuilder {
    client: Client,
    builder: request::Builder,
    body: Option<reqwest::Body>,
}

impl RequestBuilder {
    /// Appends a header value, existing values with the same name are kept.
    #[must_use]
    pub fn header<K, V>(mut self, name: K, value: V) -> Self
    where
        HeaderName: TryFrom<K>,
        <HeaderName as TryFrom<K>>::Error: Into<http::Error>,
        HeaderValue: TryFrom<V>,
        <HeaderValue as TryFrom<V>>::Error: Into<http::Error>,
    {
        self.builder = self.builder.header(name, value);
        self
    }

    /// Sets the request body, the request has an empty body otherwise.
    #[must_use]
    pub fn body(mut self, body: impl Into<reqwest::Body>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Builds the request without sending it.
    ///
    /// # Errors
    ///
    /// Fails with [`HttpDebugError::Http`] if the method, the URI or a header is invalid.
    pub fn build(self) -> Result<Request, HttpDebugError> {
        let Self { builder, body, .. } = self;
        let body = body.unwrap_or_else(|| reqwest::Body::from(Bytes::new()));
        let request = builder.body(body)?;
        Ok(request)
    }

    /// Builds then dispatches the request.
    ///
    /// # Errors
    ///
    /// Fails if the request cannot be built, see [`RequestBuilder::build`],
    /// otherwise see [`Interceptor::dispatch`].
    pub async fn send(self) -> Result<reqwest::Response, HttpDebugError> {
        let client = self.client.clone();
        let request = self.build()?;
        client.execute(request).await
    }
}
