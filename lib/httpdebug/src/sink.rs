use std::io::{self, Write};

use tracing::debug;

/// Destination of the rendered commands.
///
/// A sink is not expected to fail: an emission problem never prevents the request
/// from being sent.
///
/// Any `Fn(&str)` closure is a sink:
///
/// ```rust
/// use std::sync::{Arc, Mutex};
///
/// use httpdebug::Interceptor;
///
/// let lines = Arc::new(Mutex::new(Vec::<String>::new()));
/// let captured = Arc::clone(&lines);
/// let interceptor = Interceptor::builder()
///     .with_sink(move |line: &str| {
///         if let Ok(mut lines) = captured.lock() {
///             lines.push(line.to_string());
///         }
///     })
///     .build();
/// ```
pub trait Sink: Send + Sync {
    /// Emits a rendered command.
    fn emit(&self, line: &str);
}

impl<F> Sink for F
where
    F: Fn(&str) + Send + Sync,
{
    fn emit(&self, line: &str) {
        self(line);
    }
}

/// Writes each command on the standard error, followed by a new line.
///
/// This is the default sink.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrSink;

impl Sink for StderrSink {
    fn emit(&self, line: &str) {
        let mut stderr = io::stderr().lock();
        // nothing sensible to do if stderr is gone
        let _ = writeln!(stderr, "{line}");
    }
}

/// Emits each command as a `DEBUG` tracing event with the `httpdebug` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl Sink for TracingSink {
    fn emit(&self, line: &str) {
        debug!(target: "httpdebug", "{line}");
    }
}
