use metrics::Label;

use crate::context::TelemetryLabels;
use crate::tracing_init::telemetry_enabled;

fn labels_of(labels: &TelemetryLabels) -> Vec<Label> {
    labels
        .tags()
        .into_iter()
        .map(|(key, value)| Label::new(key, value))
        .collect()
}

pub fn record_counter(name: &'static str, value: u64, labels: &TelemetryLabels) {
    if !telemetry_enabled() {
        return;
    }
    metrics::counter!(name, labels_of(labels)).increment(value);
}
