//! Tracing middleware.
//!
//! Opens one `callback_request` span per request. The callback service
//! records the flow stage it reached on the same span.

use axum::{body::Body, http::Request, response::Response};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Instant;
use tower::{Layer, Service};
use tracing::{debug, info_span, Instrument, Span};

/// Wraps every request in a `callback_request` span with a sequential id.
#[derive(Clone, Default)]
pub struct TracingLayer {
    next_id: Arc<AtomicU64>,
}

impl TracingLayer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S> Layer<S> for TracingLayer {
    type Service = TracingService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        TracingService {
            inner,
            next_id: Arc::clone(&self.next_id),
        }
    }
}

#[derive(Clone)]
pub struct TracingService<S> {
    inner: S,
    next_id: Arc<AtomicU64>,
}

impl<S> Service<Request<Body>> for TracingService<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        // take the ready clone, leave a fresh one for the next call
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        let request_id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;

        let span = info_span!(
            "callback_request",
            request.id = request_id,
            http.method = %req.method(),
            http.target = %req.uri().path(),
            http.status_code = tracing::field::Empty,
            flow.stage = tracing::field::Empty,
            latency_ms = tracing::field::Empty,
            otel.kind = "server",
            otel.status_code = tracing::field::Empty,
        );

        Box::pin(
            async move {
                let started = Instant::now();
                let result = inner.call(req).await;
                let current = Span::current();
                current.record("latency_ms", started.elapsed().as_millis() as u64);

                match &result {
                    Ok(response) => {
                        let status = response.status();
                        current.record("http.status_code", status.as_u16());
                        current.record(
                            "otel.status_code",
                            if status.is_success() { "OK" } else { "ERROR" },
                        );
                        debug!(status = status.as_u16(), "request finished");
                    }
                    Err(_) => {
                        current.record("otel.status_code", "ERROR");
                    }
                }

                result
            }
            .instrument(span),
        )
    }
}
