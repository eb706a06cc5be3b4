//! Classification of Smooch webhook events.
//!
//! Events carry no single discriminator: a reply is a text event with a `payload`, a postback is
//! recognised by its `action.type`. Classification therefore walks [`EventKind::ORDER`] and
//! the first matching shape wins.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Reply,
    Text,
    Postback,
    Image,
    File,
}

impl EventKind {
    /// Check order used by [`classify`]. Reply must precede text.
    pub const ORDER: [EventKind; 5] = [
        EventKind::Reply,
        EventKind::Text,
        EventKind::Postback,
        EventKind::Image,
        EventKind::File,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Reply => "reply",
            EventKind::Text => "text",
            EventKind::Postback => "postback",
            EventKind::Image => "image",
            EventKind::File => "file",
        }
    }

    /// Returns true when `event` has the shape of this kind, ignoring precedence.
    pub fn matches(&self, event: &Value) -> bool {
        let event_type = event.get("type").and_then(Value::as_str);
        match self {
            EventKind::Reply => event_type == Some("text") && has_field(event, "payload"),
            EventKind::Text => event_type == Some("text") && !has_field(event, "payload"),
            EventKind::Postback => {
                event
                    .get("action")
                    .and_then(|action| action.get("type"))
                    .and_then(Value::as_str)
                    == Some("postback")
            }
            EventKind::Image => event_type == Some("image"),
            EventKind::File => event_type == Some("file"),
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// A JSON null counts as absent, matching how the webhook omits unset fields.
fn has_field(event: &Value, field: &str) -> bool {
    event.get(field).is_some_and(|value| !value.is_null())
}

/// Returns the first kind in [`EventKind::ORDER`] whose shape matches `event`.
///
/// ```
/// use smooch_core::{classify, EventKind};
/// use serde_json::json;
///
/// let reply = json!({"type": "text", "text": "Yes", "payload": "{\"option\":1}"});
/// assert_eq!(classify(&reply), Some(EventKind::Reply));
/// assert_eq!(classify(&json!({"type": "location"})), None);
/// ```
pub fn classify(event: &Value) -> Option<EventKind> {
    EventKind::ORDER
        .into_iter()
        .find(|kind| kind.matches(event))
}

/// Why an inbound event produced no request. Skipped events never fail the webhook.
#[derive(Debug, Error)]
pub enum SkippedEvent {
    #[error("event matches no known shape")]
    Unrecognised,
    #[error("{kind} event is missing `{field}`")]
    MissingField {
        kind: EventKind,
        field: &'static str,
    },
    #[error("{kind} payload is not valid JSON: {source}")]
    MalformedPayload {
        kind: EventKind,
        #[source]
        source: serde_json::Error,
    },
}

impl SkippedEvent {
    /// Metric label for the skipped event: its kind, or `unknown`.
    pub fn kind_label(&self) -> &'static str {
        match self {
            SkippedEvent::Unrecognised => "unknown",
            SkippedEvent::MissingField { kind, .. }
            | SkippedEvent::MalformedPayload { kind, .. } => kind.as_str(),
        }
    }
}

/// A classified inbound event with the fields its converter needs.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundEvent {
    Text { text: String },
    Reply { payload: String },
    Postback { payload: String },
    Image { media_url: String },
    File { media_url: String },
}

impl InboundEvent {
    /// Classifies `raw` and extracts its fields.
    pub fn from_value(raw: &Value) -> Result<Self, SkippedEvent> {
        let kind = classify(raw).ok_or(SkippedEvent::Unrecognised)?;
        let event = match kind {
            EventKind::Text => InboundEvent::Text {
                text: required_str(raw, kind, "text")?,
            },
            EventKind::Reply => InboundEvent::Reply {
                payload: required_str(raw, kind, "payload")?,
            },
            EventKind::Postback => {
                let payload = raw
                    .get("action")
                    .and_then(|action| action.get("payload"))
                    .and_then(Value::as_str)
                    .ok_or(SkippedEvent::MissingField {
                        kind,
                        field: "action.payload",
                    })?;
                InboundEvent::Postback {
                    payload: payload.to_string(),
                }
            }
            EventKind::Image => InboundEvent::Image {
                media_url: required_str(raw, kind, "mediaUrl")?,
            },
            EventKind::File => InboundEvent::File {
                media_url: required_str(raw, kind, "mediaUrl")?,
            },
        };
        Ok(event)
    }

    pub fn kind(&self) -> EventKind {
        match self {
            InboundEvent::Text { .. } => EventKind::Text,
            InboundEvent::Reply { .. } => EventKind::Reply,
            InboundEvent::Postback { .. } => EventKind::Postback,
            InboundEvent::Image { .. } => EventKind::Image,
            InboundEvent::File { .. } => EventKind::File,
        }
    }
}

fn required_str(
    raw: &Value,
    kind: EventKind,
    field: &'static str,
) -> Result<String, SkippedEvent> {
    raw.get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(SkippedEvent::MissingField { kind, field })
}

/// Returns the event list of a webhook body: `messages` when non-empty, otherwise `postbacks`
/// when non-empty, otherwise nothing.
pub fn webhook_events(body: &Value) -> &[Value] {
    ["messages", "postbacks"]
        .into_iter()
        .filter_map(|field| body.get(field).and_then(Value::as_array))
        .find(|events| !events.is_empty())
        .map(Vec::as_slice)
        .unwrap_or_default()
}
