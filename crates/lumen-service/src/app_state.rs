//! Shared application state for the Lumen service.
//!
//! The registry (with default process metrics), the request logger and the
//! instrumentation layer are built here once and shared by handle; nothing
//! is kept in statics.

use std::sync::Arc;

use lumen_core::error::Result;
use lumen_core::MetricRegistry;

use crate::config::ServiceConfig;
use crate::instrument::InstrumentLayer;
use crate::logging::{ConsoleSink, FileSink, LogSink, RequestLogger};
use crate::obs::ProcessCollector;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: ServiceConfig,
    registry: Arc<MetricRegistry>,
    logger: Arc<RequestLogger>,
    instrument: InstrumentLayer,
}

impl AppState {
    /// Build state with the sinks named in the config.
    pub fn new(cfg: ServiceConfig) -> Result<Self> {
        let mut sinks: Vec<Box<dyn LogSink>> = Vec::new();
        if cfg.logging.console {
            sinks.push(Box::new(ConsoleSink::new()));
        }
        sinks.push(Box::new(FileSink::new(cfg.logging.file_path())));
        Self::with_sinks(cfg, sinks)
    }

    /// Build state with caller-provided sinks.
    pub fn with_sinks(cfg: ServiceConfig, sinks: Vec<Box<dyn LogSink>>) -> Result<Self> {
        let registry = Arc::new(MetricRegistry::new());
        registry.register_collector(Arc::new(ProcessCollector::new()))?;
        let logger = Arc::new(RequestLogger::new(
            &registry,
            cfg.logging.queue_capacity,
            sinks,
        )?);
        let instrument = InstrumentLayer::new(&registry, Arc::clone(&logger))?;

        tracing::debug!(sinks = ?logger.sink_names(), "request logger ready");

        Ok(Self {
            inner: Arc::new(AppStateInner {
                cfg,
                registry,
                logger,
                instrument,
            }),
        })
    }

    pub fn cfg(&self) -> &ServiceConfig {
        &self.inner.cfg
    }

    pub fn registry(&self) -> &MetricRegistry {
        &self.inner.registry
    }

    pub fn logger(&self) -> &RequestLogger {
        &self.inner.logger
    }

    pub fn instrument_layer(&self) -> InstrumentLayer {
        self.inner.instrument.clone()
    }
}
