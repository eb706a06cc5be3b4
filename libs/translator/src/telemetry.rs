use smooch_core::DigestResult;
use smooch_telemetry::{TelemetryLabels, record_counter, with_common_fields};

const DIGEST_SPAN_NAME: &str = "digest.run";
const DIGEST_COUNTER: &str = "messages_digested";
const SKIPPED_COUNTER: &str = "inbound_events_skipped";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Inbound,
    Outbound,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Inbound => "inbound",
            Direction::Outbound => "outbound",
        }
    }
}

/// Runs a digest step inside a `digest.run` span and counts the items it produced.
///
/// `external_id` is recorded on the span when the caller could resolve one.
pub fn digest_with_span<T, F>(
    channel: &str,
    direction: Direction,
    external_id: Option<&str>,
    f: F,
) -> DigestResult<Vec<T>>
where
    F: FnOnce() -> DigestResult<Vec<T>>,
{
    let span = tracing::info_span!(
        DIGEST_SPAN_NAME,
        channel = tracing::field::Empty,
        external_id = tracing::field::Empty,
        direction = %direction.as_str()
    );
    with_common_fields(&span, channel, external_id);
    let _guard = span.enter();
    let result = f();
    match &result {
        Ok(items) => {
            let labels = TelemetryLabels::new(channel).with_direction(direction.as_str());
            record_counter(DIGEST_COUNTER, items.len() as u64, &labels);
        }
        Err(err) => tracing::warn!(error = %err, "digest failed"),
    }
    result
}

pub(crate) fn record_skipped(channel: &str, kind: &str) {
    let labels = TelemetryLabels::new(channel)
        .with_direction(Direction::Inbound.as_str())
        .with_kind(kind);
    record_counter(SKIPPED_COUNTER, 1, &labels);
}
