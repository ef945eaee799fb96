//! Spans for deck operations.

use std::future::Future;
use tracing::{info_span, Instrument, Span};

/// Span covering one interactive deck session.
pub fn session_span(templates: usize) -> Span {
    info_span!("deck_session", templates = templates)
}

/// Span for work on a single template.
pub fn template_span(template_id: &str) -> Span {
    info_span!("template", id = %template_id)
}

/// Span for a clipboard write.
pub fn clipboard_span(backend: &str, bytes: usize) -> Span {
    info_span!("clipboard", backend = %backend, bytes = bytes)
}

/// Instrument a future with a span.
pub fn instrument_future<F: Future>(future: F, span: Span) -> impl Future<Output = F::Output> {
    future.instrument(span)
}

/// Measures an operation and logs its duration at debug level when finished.
pub struct Timer {
    start: std::time::Instant,
    operation: &'static str,
}

impl Timer {
    pub fn start(operation: &'static str) -> Self {
        Self {
            start: std::time::Instant::now(),
            operation,
        }
    }

    /// Stop the timer, returning the elapsed milliseconds.
    pub fn finish(self) -> u128 {
        let elapsed = self.start.elapsed().as_millis();
        tracing::debug!(operation = %self.operation, duration_ms = %elapsed, "operation completed");
        elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::EnvFilter;

    fn with_subscriber<F>(f: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let subscriber = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter(EnvFilter::new("trace"))
            .finish();

        tracing::subscriber::with_default(subscriber, f);
    }

    #[test]
    fn test_nested_spans() {
        with_subscriber(|| {
            let session = session_span(4);
            let _outer = session.enter();
            let template = template_span("polaroid");
            let _inner = template.enter();
            tracing::info!("rendering");
        });
    }

    #[tokio::test]
    async fn test_instrumented_clipboard_future() {
        let value = instrument_future(async { 7 }, clipboard_span("memory", 12)).await;
        assert_eq!(value, 7);
    }

    #[test]
    fn test_timer_reports_elapsed() {
        let timer = Timer::start("sleep");
        std::thread::sleep(std::time::Duration::from_millis(5));
        assert!(timer.finish() >= 5);
    }
}
