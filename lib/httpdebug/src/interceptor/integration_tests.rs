use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::State;
use axum::routing::{get, post};
use bytes::Bytes;
use http::StatusCode;
use tracing::info;

use super::*;
use crate::TracingSink;

const GREETING: &str = "Hello from the other side !";

fn init_tracing() {
    // should be run once, fail otherwise, we skip that error
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Starts a server with a greeting and an echo route, returns its address and its hit counter.
async fn start_server() -> anyhow::Result<(SocketAddr, Arc<AtomicUsize>)> {
    init_tracing();
    let hits = Arc::new(AtomicUsize::new(0));

    let app = Router::new()
        .route(
            "/test-url",
            get(|State(hits): State<Arc<AtomicUsize>>| async move {
                hits.fetch_add(1, Ordering::SeqCst);
                GREETING
            }),
        )
        .route(
            "/echo",
            post(|State(hits): State<Arc<AtomicUsize>>, body: Bytes| async move {
                hits.fetch_add(1, Ordering::SeqCst);
                body
            }),
        )
        .with_state(Arc::clone(&hits));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    info!(%addr, "test server listening");
    tokio::spawn(async move {
        if let Err(error) = axum::serve(listener, app.into_make_service()).await {
            tracing::error!(%error, "test server stopped");
        }
    });

    Ok((addr, hits))
}

fn capture() -> (Arc<Mutex<Vec<String>>>, impl Sink + 'static) {
    let lines = Arc::new(Mutex::new(vec![]));
    let captured = Arc::clone(&lines);
    let sink = move |line: &str| {
        captured.lock().expect("not poisoned").push(line.to_string());
    };
    (lines, sink)
}

#[tokio::test]
async fn should_send_with_default_transport() -> anyhow::Result<()> {
    let (addr, _) = start_server().await?;
    let (lines, sink) = capture();
    let client = Interceptor::builder().with_sink(sink).build().client();

    let response = client.get(format!("http://{addr}/test-url")).send().await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await?, GREETING);
    assert_eq!(
        *lines.lock().expect("not poisoned"),
        [format!("curl -X GET \\\n  http://{addr}/test-url")]
    );
    Ok(())
}

/// Adds a bearer token before delegating, like an authentication layer would.
struct BearerAuth<S> {
    token: &'static str,
    inner: S,
}

impl<S: Sender> Sender for BearerAuth<S> {
    fn send(&self, mut request: Request) -> SendFuture<'_> {
        Box::pin(async move {
            let value = http::HeaderValue::try_from(format!("Bearer {}", self.token))
                .map_err(http::Error::from)?;
            request.headers_mut().insert(http::header::AUTHORIZATION, value);
            self.inner.send(request).await
        })
    }
}

#[tokio::test]
async fn should_redact_authorization_added_by_outer_layer() -> anyhow::Result<()> {
    let (addr, _) = start_server().await?;
    let (lines, sink) = capture();
    let interceptor = Interceptor::builder()
        .with_delegate(reqwest::Client::new())
        .with_sink(sink)
        .build();
    let auth = BearerAuth {
        token: "SECRET",
        inner: interceptor,
    };
    let request = http::Request::get(format!("http://{addr}/test-url?client_secret=SECRET"))
        .body(reqwest::Body::from(Bytes::new()))?;

    let response = auth.send(request).await?;

    assert_eq!(response.text().await?, GREETING);
    let lines = lines.lock().expect("not poisoned");
    assert_eq!(
        *lines,
        [format!(
            "curl -X GET \\\n  http://{addr}/test-url?client_secret=REDACTED \\\n  -H 'authorization: <REDACTED>'"
        )]
    );
    assert!(lines.iter().all(|line| !line.contains("SECRET")));
    Ok(())
}

#[tokio::test]
async fn should_redact_authorization_set_on_the_request() -> anyhow::Result<()> {
    let (addr, _) = start_server().await?;
    let (lines, sink) = capture();
    let client = Interceptor::builder().with_sink(sink).build().client();

    let response = client
        .get(format!("http://{addr}/test-url"))
        .header("authorization", "Bearer SECRET")
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        *lines.lock().expect("not poisoned"),
        [format!(
            "curl -X GET \\\n  http://{addr}/test-url \\\n  -H 'authorization: <REDACTED>'"
        )]
    );
    Ok(())
}

#[tokio::test]
async fn should_deliver_the_original_body() -> anyhow::Result<()> {
    let (addr, _) = start_server().await?;
    let (lines, sink) = capture();
    let client = Interceptor::builder().with_sink(sink).build().client();
    let body = r#"{"login":"l'a"}"#;

    let response = client
        .post(format!("http://{addr}/echo"))
        .body(body)
        .send()
        .await?;

    assert_eq!(response.text().await?, body);
    let lines = lines.lock().expect("not poisoned");
    assert!(
        lines.iter().all(|line| line.ends_with(r#"-d '{"login":"l\'a"}'"#)),
        "{lines:?}"
    );
    Ok(())
}

#[tokio::test]
async fn should_deliver_streamed_body_through_chained_interceptors() -> anyhow::Result<()> {
    let (addr, _) = start_server().await?;
    let (lines, sink) = capture();
    let inner = Interceptor::builder()
        .with_delegate(reqwest::Client::new())
        .with_sink(TracingSink)
        .build();
    let outer = Interceptor::builder()
        .with_delegate(inner)
        .with_sink(sink)
        .build();
    let chunks: Vec<Result<Bytes, std::io::Error>> =
        vec![Ok(Bytes::from_static(b"chunk-1,")), Ok(Bytes::from_static(b"chunk-2"))];
    let request = http::Request::post(format!("http://{addr}/echo"))
        .body(reqwest::Body::wrap_stream(futures::stream::iter(chunks)))?;

    let response = outer.send(request).await?;

    assert_eq!(response.text().await?, "chunk-1,chunk-2");
    assert_eq!(lines.lock().expect("not poisoned").len(), 1);
    Ok(())
}

#[tokio::test]
async fn should_not_reach_server_when_body_fails() -> anyhow::Result<()> {
    let (addr, hits) = start_server().await?;
    let (lines, sink) = capture();
    let client = Interceptor::builder().with_sink(sink).build().client();
    let chunks: Vec<Result<Bytes, std::io::Error>> =
        vec![Err(std::io::Error::other("custom error"))];

    let result = client
        .post(format!("http://{addr}/echo"))
        .body(reqwest::Body::wrap_stream(futures::stream::iter(chunks)))
        .send()
        .await;

    let Err(error) = result else {
        anyhow::bail!("dispatch should fail");
    };
    assert!(matches!(error, HttpDebugError::BodyRead { .. }), "{error}");
    assert_eq!(hits.load(Ordering::SeqCst), 0);
    assert!(lines.lock().expect("not poisoned").is_empty());
    Ok(())
}

#[tokio::test]
async fn should_pass_transport_error_through() -> anyhow::Result<()> {
    init_tracing();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    let client = Interceptor::builder().with_sink(|_: &str| {}).build().client();

    let result = client.get(format!("http://{addr}/nowhere")).send().await;

    match result {
        Err(HttpDebugError::Transport(error)) => {
            assert!(error.is_connect() || error.is_request(), "{error:?}");
        }
        other => anyhow::bail!("expected a transport error, got {other:?}"),
    }
    Ok(())
}
