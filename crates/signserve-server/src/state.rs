//! Shared application state
//!
//! The bundle is published into the state exactly once, before the router
//! is built; request handlers only ever read it. The `Option` models the
//! pre-publish lifecycle (health reports not-ready, data routes refuse)
//! rather than any runtime mutability.

use crate::config::ServerConfig;
use metrics_exporter_prometheus::PrometheusHandle;
use signserve_model::ModelBundle;
use std::sync::Arc;

/// Application state shared across all request handlers
#[derive(Clone)]
pub struct AppState {
    inner: Arc<StateInner>,
}

struct StateInner {
    bundle: Option<Arc<ModelBundle>>,
    config: ServerConfig,
    metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// State with a published bundle (the normal serving state)
    pub fn new(
        bundle: Arc<ModelBundle>,
        config: ServerConfig,
        metrics: Option<PrometheusHandle>,
    ) -> Self {
        Self {
            inner: Arc::new(StateInner {
                bundle: Some(bundle),
                config,
                metrics,
            }),
        }
    }

    /// State before any bundle has been published
    pub fn unloaded(config: ServerConfig) -> Self {
        Self {
            inner: Arc::new(StateInner {
                bundle: None,
                config,
                metrics: None,
            }),
        }
    }

    /// The published bundle, if any
    pub fn bundle(&self) -> Option<&Arc<ModelBundle>> {
        self.inner.bundle.as_ref()
    }

    /// True once a bundle has been published
    pub fn is_ready(&self) -> bool {
        self.inner.bundle.is_some()
    }

    /// Server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Render the Prometheus exposition text
    pub fn render_metrics(&self) -> String {
        self.inner
            .metrics
            .as_ref()
            .map(|handle| handle.render())
            .unwrap_or_default()
    }
}
