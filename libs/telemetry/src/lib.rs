//! Logging and metric helpers shared by the Smooch connector crates.
//!
//! Logs go through `tracing`; counters go through the `metrics` facade, so a host that installs
//! a recorder (Prometheus, statsd, ...) picks them up without changes here.

use anyhow::Result;

mod config;
mod context;
mod recorder;
mod tracing_init;

pub use config::TelemetryConfig;
pub use context::TelemetryLabels;
pub use recorder::record_counter;
pub use tracing_init::{init_telemetry, telemetry_enabled, with_common_fields};

/// Installs the shared subscriber configured from `RUST_LOG` and `LOG_FORMAT`.
pub fn install(service_name: &str) -> Result<()> {
    init_telemetry(TelemetryConfig::from_env(service_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn install_is_idempotent() {
        install("smooch-telemetry-test").unwrap();
        install("smooch-telemetry-test").unwrap();
        tracing::info!("still logging after second install");
    }

    #[test]
    fn counters_without_recorder_are_noops() {
        let labels = TelemetryLabels::new("smooch").with_direction("outbound");
        record_counter("messages_digested", 1, &labels);
        record_counter("inbound_events_skipped", 1, &labels.with_kind("reply"));
    }
}
