use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Result;
use tracing::Span;
use tracing_subscriber::layer::Layer;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::TelemetryConfig;

static INIT: OnceLock<()> = OnceLock::new();
static METRICS_ENABLED: AtomicBool = AtomicBool::new(true);

/// Installs the global subscriber. Later calls only refresh the metrics switch.
pub fn init_telemetry(cfg: TelemetryConfig) -> Result<()> {
    METRICS_ENABLED.store(cfg.metrics_enabled, Ordering::SeqCst);
    if INIT.get().is_some() {
        return Ok(());
    }

    let fmt_layer = if cfg.json_logs {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .boxed()
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cfg.default_filter.as_str()));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .ok();

    tracing::debug!(service = %cfg.service_name, "telemetry installed");
    INIT.set(()).ok();
    Ok(())
}

pub fn telemetry_enabled() -> bool {
    METRICS_ENABLED.load(Ordering::SeqCst)
}

pub fn with_common_fields(span: &Span, channel: &str, external_id: Option<&str>) {
    span.record("channel", tracing::field::display(channel));
    if let Some(external_id) = external_id {
        span.record("external_id", tracing::field::display(external_id));
    }
}
