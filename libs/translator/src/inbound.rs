//! Smooch webhook events to chatbot API requests.

use serde_json::Value;
use smooch_core::{CanonicalRequest, EventKind, InboundEvent, SkippedEvent, webhook_events};

use crate::telemetry::record_skipped;

/// Digests every event of a webhook body, in order.
///
/// Bodies without `messages` or `postbacks` produce no requests. An event that cannot be
/// digested (unknown shape, missing field, undecodable payload) is logged and skipped; its
/// siblings are still digested.
pub fn digest_webhook(channel: &str, body: &Value) -> Vec<CanonicalRequest> {
    let mut output = Vec::new();
    for raw in webhook_events(body) {
        match InboundEvent::from_value(raw).and_then(digest_event) {
            Ok(request) => output.push(request),
            Err(reason) => {
                tracing::warn!(event = %raw, %reason, "skipping inbound event");
                record_skipped(channel, reason.kind_label());
            }
        }
    }
    output
}

/// Converts one classified event into a chatbot API request.
pub fn digest_event(event: InboundEvent) -> Result<CanonicalRequest, SkippedEvent> {
    tracing::debug!(kind = event.kind().as_str(), "digesting inbound event");
    match event {
        InboundEvent::Text { text } => Ok(CanonicalRequest::text(text)),
        InboundEvent::Reply { payload } => decode_payload(EventKind::Reply, &payload),
        InboundEvent::Postback { payload } => decode_payload(EventKind::Postback, &payload),
        InboundEvent::Image { media_url } | InboundEvent::File { media_url } => {
            Ok(CanonicalRequest::text(media_url))
        }
    }
}

fn decode_payload(kind: EventKind, payload: &str) -> Result<CanonicalRequest, SkippedEvent> {
    serde_json::from_str(payload)
        .map(CanonicalRequest::OpaquePayload)
        .map_err(|source| SkippedEvent::MalformedPayload { kind, source })
}
