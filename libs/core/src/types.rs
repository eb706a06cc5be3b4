use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Request forwarded to the bot answer service after an inbound event was digested.
///
/// Plain user input is wrapped as `{"message": ...}`. Replies and postbacks carry a payload
/// the channel echoes back untouched; it is forwarded as-is without a `message` wrapper.
///
/// ```
/// use smooch_core::CanonicalRequest;
/// use serde_json::json;
///
/// let text = CanonicalRequest::text("hello");
/// assert_eq!(serde_json::to_value(&text).unwrap(), json!({"message": "hello"}));
///
/// let opaque = CanonicalRequest::OpaquePayload(json!({"option": 1}));
/// assert_eq!(serde_json::to_value(&opaque).unwrap(), json!({"option": 1}));
/// ```
///
/// Deserializing treats only an object whose sole key is a string `message` as a text message;
/// every other value is kept whole as an opaque payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CanonicalRequest {
    TextMessage { message: String },
    OpaquePayload(Value),
}

impl CanonicalRequest {
    pub fn text(message: impl Into<String>) -> Self {
        CanonicalRequest::TextMessage {
            message: message.into(),
        }
    }

    /// Returns the user text when this request is a plain message.
    pub fn message(&self) -> Option<&str> {
        match self {
            CanonicalRequest::TextMessage { message } => Some(message),
            CanonicalRequest::OpaquePayload(_) => None,
        }
    }
}

fn is_text_message(map: &Map<String, Value>) -> bool {
    map.len() == 1 && map.get("message").is_some_and(Value::is_string)
}

impl From<Value> for CanonicalRequest {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) if is_text_message(&map) => {
                CanonicalRequest::text(map["message"].as_str().unwrap_or_default())
            }
            other => CanonicalRequest::OpaquePayload(other),
        }
    }
}

impl<'de> Deserialize<'de> for CanonicalRequest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(CanonicalRequest::from)
    }
}

/// Author of an outbound channel message. The bot always speaks as the app maker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[default]
    #[serde(rename = "appMaker")]
    AppMaker,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Text,
    Image,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Postback,
    Reply,
    Webview,
}

/// Button or quick reply attached to an outbound text message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "type")]
    pub kind: ActionKind,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl Action {
    /// Button whose activation sends `payload` back as a postback event.
    pub fn postback(text: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            kind: ActionKind::Postback,
            text: text.into(),
            payload: Some(payload.into()),
            uri: None,
            fallback: None,
            metadata: None,
        }
    }

    /// Quick reply; the channel delivers `payload` back on a text event.
    pub fn reply(text: impl Into<String>, payload: impl Into<String>, metadata: Value) -> Self {
        Self {
            kind: ActionKind::Reply,
            text: text.into(),
            payload: Some(payload.into()),
            uri: None,
            fallback: None,
            metadata: Some(metadata),
        }
    }

    /// Button that opens `url` in the channel's webview, falling back to the same URL.
    pub fn webview(text: impl Into<String>, url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            kind: ActionKind::Webview,
            text: text.into(),
            payload: None,
            uri: Some(url.clone()),
            fallback: Some(url),
            metadata: None,
        }
    }
}

/// One message delivered to the channel on behalf of the bot.
///
/// ```
/// use smooch_core::ChannelMessage;
/// use serde_json::json;
///
/// let msg = ChannelMessage::image("https://example.com/a.png");
/// assert_eq!(
///     serde_json::to_value(&msg).unwrap(),
///     json!({"role": "appMaker", "type": "image", "mediaUrl": "https://example.com/a.png"})
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelMessage {
    pub role: Role,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(rename = "mediaUrl", default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<Action>>,
}

impl ChannelMessage {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            role: Role::AppMaker,
            kind: MessageKind::Text,
            text: Some(text.into()),
            media_url: None,
            actions: None,
        }
    }

    pub fn image(media_url: impl Into<String>) -> Self {
        Self {
            role: Role::AppMaker,
            kind: MessageKind::Image,
            text: None,
            media_url: Some(media_url.into()),
            actions: None,
        }
    }

    pub fn with_actions(text: impl Into<String>, actions: Vec<Action>) -> Self {
        Self {
            actions: Some(actions),
            ..Self::text(text)
        }
    }
}

/// Result of digesting a single bot answer.
///
/// Most answers map to one channel message; answers with inline images expand into an ordered
/// run of text and image messages that the gateway must deliver individually.
#[derive(Debug, Clone, PartialEq)]
pub enum Digested {
    Single(ChannelMessage),
    Multiple(Vec<ChannelMessage>),
}

impl Digested {
    pub fn into_messages(self) -> Vec<ChannelMessage> {
        match self {
            Digested::Single(message) => vec![message],
            Digested::Multiple(messages) => messages,
        }
    }

    pub fn is_multiple(&self) -> bool {
        matches!(self, Digested::Multiple(_))
    }
}
