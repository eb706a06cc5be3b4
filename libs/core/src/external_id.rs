//! Per-user identifiers used as session keys by the connector host.
//!
//! A request reaches the connector either as a channel webhook, as a live-chat (HyperChat)
//! event, or as the live-chat webhook-linking handshake. Each carries the user identity
//! differently.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::error::{DigestError, DigestResult};

const EXTERNAL_ID_PREFIX: &str = "smooch";
const CHALLENGE_PREFIX: &str = "hc-challenge-";

static NON_ALPHANUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9 ]").expect("valid challenge regex"));

/// Identifier of a channel user within a Smooch app, rendered as `smooch-<app>-<user>`.
///
/// ```
/// use smooch_core::ExternalId;
///
/// let id: ExternalId = "smooch-app1-user9".parse().unwrap();
/// assert_eq!(id.app_id(), "app1");
/// assert_eq!(id.user_id(), "user9");
/// assert_eq!(id.to_string(), "smooch-app1-user9");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExternalId {
    app_id: String,
    user_id: String,
}

impl ExternalId {
    pub fn new(app_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            user_id: user_id.into(),
        }
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Reads `app._id` and `appUser._id` from a channel webhook body.
    pub fn from_webhook(body: &Value) -> Option<Self> {
        let app_id = body.pointer("/app/_id").and_then(Value::as_str)?;
        let user_id = body.pointer("/appUser/_id").and_then(Value::as_str)?;
        Some(Self::new(app_id, user_id))
    }
}

impl fmt::Display for ExternalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{EXTERNAL_ID_PREFIX}-{}-{}", self.app_id, self.user_id)
    }
}

impl FromStr for ExternalId {
    type Err = DigestError;

    // Splits on the first '-' after the prefix: everything before it is the app id, the rest
    // (hyphens included) is the user id.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s
            .strip_prefix(EXTERNAL_ID_PREFIX)
            .and_then(|rest| rest.strip_prefix('-'))
            .ok_or(DigestError::InvalidRequest)?;
        match rest.split_once('-') {
            Some((app, user)) if !app.is_empty() && !user.is_empty() => Ok(Self::new(app, user)),
            _ => Err(DigestError::InvalidRequest),
        }
    }
}

/// Returns true for live-chat events, which carry top-level `trigger` and `appId`.
pub fn is_chat_event(body: &Value) -> bool {
    body.get("trigger").is_some() && body.get("appId").is_some()
}

/// Reads the external id a live-chat event refers to.
pub fn chat_event_external_id(body: &Value) -> Option<String> {
    if !is_chat_event(body) {
        return None;
    }
    body.pointer("/data/user/externalId")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

/// Temporary session id used while the live-chat service verifies the webhook.
pub fn challenge_external_id(api_key: &str) -> String {
    format!(
        "{CHALLENGE_PREFIX}{}",
        NON_ALPHANUMERIC.replace_all(api_key, "")
    )
}

/// Resolves the session key for a request: channel webhook first, then live-chat event, then
/// the webhook-linking handshake (signalled by the host when an `X-Hook-Secret` header is set).
pub fn resolve_external_id(
    body: &Value,
    hook_secret_present: bool,
    api_key: &str,
) -> DigestResult<String> {
    if let Some(id) = ExternalId::from_webhook(body) {
        return Ok(id.to_string());
    }
    if let Some(id) = chat_event_external_id(body) {
        return Ok(id);
    }
    if hook_secret_present {
        return Ok(challenge_external_id(api_key));
    }
    Err(DigestError::InvalidRequest)
}
