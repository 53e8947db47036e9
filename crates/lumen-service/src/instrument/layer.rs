use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::http::{Request, Response, StatusCode};
use futures_util::FutureExt;
use tower::{Layer, Service};

use lumen_core::error::Result;
use lumen_core::{CounterFamily, LogRecord, MetricRegistry, Severity};

use super::context::RequestContext;
use super::{CLIENT_CLOSED_REQUEST, HTTP_REQUESTS_TOTAL};
use crate::logging::RequestLogger;

type BoxFuture<T, E> = Pin<Box<dyn Future<Output = std::result::Result<T, E>> + Send>>;

/// Request extension marking a request as already observed.
#[derive(Clone, Copy)]
struct Observed;

struct Observer {
    logger: Arc<RequestLogger>,
    requests: Arc<CounterFamily>,
}

impl Observer {
    fn incoming(&self, ctx: &RequestContext) {
        self.logger.log(
            LogRecord::info("incoming")
                .with_field("method", ctx.method.as_str())
                .with_field("path", ctx.path.as_str()),
        );
    }

    fn complete(&self, ctx: RequestContext, status: u16) {
        let elapsed = ctx.elapsed();
        let status_label = status.to_string();
        if let Err(e) = self
            .requests
            .inc(&[ctx.method.as_str(), ctx.route.as_str(), status_label.as_str()])
        {
            tracing::error!(error = %e, "request counter update failed");
        }

        let duration_ms = elapsed.as_micros() as f64 / 1000.0;
        self.logger.log(
            LogRecord::new(Severity::for_status(status), "completed")
                .with_field("method", ctx.method)
                .with_field("path", ctx.path)
                .with_field("route", ctx.route)
                .with_field("status", status)
                .with_field("duration_ms", duration_ms),
        );
    }
}

/// Records exactly one completion per request, even if the future is dropped.
struct InFlight {
    observer: Arc<Observer>,
    ctx: Option<RequestContext>,
}

impl InFlight {
    fn finish(&mut self, status: u16) {
        if let Some(ctx) = self.ctx.take() {
            self.observer.complete(ctx, status);
        }
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.finish(CLIENT_CLOSED_REQUEST);
    }
}

// ============================================================================
// Layer
// ============================================================================

/// Instrumentation layer. Build one per registry and apply it once.
#[derive(Clone)]
pub struct InstrumentLayer {
    observer: Arc<Observer>,
}

impl InstrumentLayer {
    /// Registers `http_requests_total` on `registry`; fails with
    /// `DuplicateName` if it is already registered.
    pub fn new(registry: &MetricRegistry, logger: Arc<RequestLogger>) -> Result<Self> {
        let requests = registry.register_family(
            HTTP_REQUESTS_TOTAL,
            "Total number of HTTP requests",
            &["method", "path", "status"],
        )?;
        Ok(Self {
            observer: Arc::new(Observer { logger, requests }),
        })
    }
}

impl<S> Layer<S> for InstrumentLayer {
    type Service = Instrumented<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Instrumented {
            inner,
            observer: Arc::clone(&self.observer),
        }
    }
}

// ============================================================================
// Service
// ============================================================================

#[derive(Clone)]
pub struct Instrumented<S> {
    inner: S,
    observer: Arc<Observer>,
}

impl<S, B, ResBody> Service<Request<B>> for Instrumented<S>
where
    S: Service<Request<B>, Response = Response<ResBody>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    S::Error: Send + 'static,
    B: Send + 'static,
    ResBody: Send + 'static,
{
    type Response = Response<ResBody>;
    type Error = S::Error;
    type Future = BoxFuture<Response<ResBody>, S::Error>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<std::result::Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<B>) -> Self::Future {
        // The clone is not necessarily ready; keep the one that was polled.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        if req.extensions().get::<Observed>().is_some() {
            return Box::pin(inner.call(req));
        }
        req.extensions_mut().insert(Observed);

        let ctx = RequestContext::from_request(&req);
        self.observer.incoming(&ctx);
        let mut in_flight = InFlight {
            observer: Arc::clone(&self.observer),
            ctx: Some(ctx),
        };

        Box::pin(async move {
            let outcome = AssertUnwindSafe(async move { inner.call(req).await })
                .catch_unwind()
                .await;
            match outcome {
                Ok(Ok(res)) => {
                    in_flight.finish(res.status().as_u16());
                    Ok(res)
                }
                Ok(Err(e)) => {
                    in_flight.finish(StatusCode::INTERNAL_SERVER_ERROR.as_u16());
                    Err(e)
                }
                Err(panic) => {
                    in_flight.finish(StatusCode::INTERNAL_SERVER_ERROR.as_u16());
                    std::panic::resume_unwind(panic)
                }
            }
        })
    }
}
