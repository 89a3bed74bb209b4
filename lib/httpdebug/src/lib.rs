//! # httpdebug
//!
//! Log outgoing HTTP requests as `curl` commands you can paste in a terminal.
//!
//! The [`Interceptor`] sits in front of the real transport. For every request it:
//! 1. renders the equivalent `curl` command, hiding secret headers and query parameters,
//! 2. emits that command to a [`Sink`] (standard error by default),
//! 3. forwards the untouched request to its delegate [`Sender`] and returns the
//!    response as is.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use httpdebug::Interceptor;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Interceptor::new().client();
//!
//! let response = client
//!     .get("http://localhost:8080/users?client_secret=s3cr3t")
//!     .header("authorization", "Bearer s3cr3t")
//!     .send()
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! Prints on the standard error:
//!
//! ```text
//! curl -X GET \
//!   http://localhost:8080/users?client_secret=REDACTED \
//!   -H 'authorization: <REDACTED>'
//! ```
//!
//! ## Redaction
//!
//! By default the `authorization` header and the `client_secret` query parameter
//! are hidden. Names are compared case-insensitively.
//!
//! ```rust
//! use httpdebug::{Interceptor, RedactionPolicy};
//!
//! let interceptor = Interceptor::builder()
//!     .add_secret_header("X-Api-Key")
//!     .add_secret_param("api_key")
//!     .build();
//!
//! // or start from scratch
//! let interceptor = Interceptor::builder()
//!     .with_policy(RedactionPolicy::empty().add_secret_header("cookie"))
//!     .build();
//! ```
//!
//! ## Chaining
//!
//! An [`Interceptor`] is itself a [`Sender`], so it can be used as the delegate of
//! another interceptor, or of any layer that adds headers before sending
//! (authentication, tracing, ...).
//!
//! ## Request body
//!
//! Rendering reads the whole body. The same bytes are then put back on the request,
//! the delegate sends exactly what it would have sent without the interceptor.
//! If the body cannot be read, the request is not sent and
//! [`HttpDebugError::BodyRead`] is returned.
//!
//! ## Logging
//!
//! The crate uses [`tracing`] for its own diagnostics and never installs a subscriber.
//! Use [`TracingSink`] to route the rendered commands through `tracing` as well.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod client;
pub use self::client::{Client, RequestBuilder};

mod error;
pub use self::error::HttpDebugError;

mod interceptor;
pub use self::interceptor::{Interceptor, InterceptorBuilder};

mod policy;
pub use self::policy::{DEFAULT_SECRET_HEADER, DEFAULT_SECRET_PARAM, RedactionPolicy};

pub mod render;

mod sender;
pub use self::sender::{SendFuture, Sender};

mod sink;
pub use self::sink::{Sink, StderrSink, TracingSink};

/// Outgoing request as seen by the interceptor.
pub type Request = http::Request<reqwest::Body>;
