//! Digesting rules between Smooch and the chatbot answer API.
//!
//! The main entry point is the [`MessageDigester`] trait, implemented by [`SmoochDigester`].
//! Inbound, webhook events become [`CanonicalRequest`]s; outbound, chatbot answers become one or
//! more [`ChannelMessage`]s ready to be delivered by the gateway.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use smooch_core::{
    CanonicalRequest, ChannelMessage, DigestResult, DigesterConfig, ExternalId, RatingOption,
    Translate,
};

mod buttons;
mod html;
mod images;
pub mod inbound;
mod outbound;
pub mod telemetry;
pub mod templates;

pub use buttons::build_url_button_message;
pub use html::{strip_tags, strip_tags_except_img};
pub use images::{split_fragments, split_images};
pub use telemetry::{Direction, digest_with_span};

pub const SMOOCH_CHANNEL: &str = "Smooch";

/// Converts between a channel's native payloads and the chatbot API.
///
/// Implementations never mutate their inputs. Requests are digested independently; the only
/// state read is the digester's configuration and translations.
pub trait MessageDigester {
    /// Name of the channel this digester serves.
    fn channel(&self) -> &'static str;

    /// Converts a webhook body into chatbot API requests, one per digestible event. Events that
    /// cannot be digested are skipped, never reported as errors.
    fn digest_to_api(&self, request: &Value) -> DigestResult<Vec<CanonicalRequest>>;

    /// Converts a chatbot API response into channel messages, in delivery order.
    fn digest_from_api(
        &self,
        response: &Value,
        last_user_question: &str,
    ) -> DigestResult<Vec<ChannelMessage>>;
}

/// Digester for the Smooch conversational channel.
///
/// ```
/// use std::sync::Arc;
/// use smooch_core::{DigesterConfig, TranslationCatalog};
/// use smooch_translator::{MessageDigester, SmoochDigester};
/// use serde_json::json;
///
/// let digester = SmoochDigester::new(Arc::new(TranslationCatalog::default()), DigesterConfig::default());
/// let requests = digester
///     .digest_to_api(&json!({"messages": [{"type": "text", "text": "hello"}]}))
///     .unwrap();
/// assert_eq!(serde_json::to_value(&requests).unwrap(), json!([{"message": "hello"}]));
/// ```
#[derive(Clone)]
pub struct SmoochDigester {
    lang: Arc<dyn Translate>,
    config: DigesterConfig,
}

impl SmoochDigester {
    pub fn new(lang: Arc<dyn Translate>, config: DigesterConfig) -> Self {
        Self { lang, config }
    }

    pub fn config(&self) -> &DigesterConfig {
        &self.config
    }

    pub fn lang(&self) -> &dyn Translate {
        self.lang.as_ref()
    }

    /// Content-rating prompt for the answer identified by `rate_code`.
    pub fn build_content_ratings_message(
        &self,
        options: &[RatingOption],
        rate_code: &str,
    ) -> ChannelMessage {
        templates::build_content_ratings_message(self.lang(), options, rate_code)
    }

    /// Yes/no prompt offering a hand-off to a human agent.
    pub fn build_escalation_message(&self) -> ChannelMessage {
        templates::build_escalation_message(self.lang())
    }
}

impl std::fmt::Debug for SmoochDigester {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmoochDigester")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl MessageDigester for SmoochDigester {
    fn channel(&self) -> &'static str {
        SMOOCH_CHANNEL
    }

    fn digest_to_api(&self, request: &Value) -> DigestResult<Vec<CanonicalRequest>> {
        let external_id = ExternalId::from_webhook(request).map(|id| id.to_string());
        digest_with_span(
            self.channel(),
            Direction::Inbound,
            external_id.as_deref(),
            || Ok(inbound::digest_webhook(self.channel(), request)),
        )
    }

    fn digest_from_api(
        &self,
        response: &Value,
        last_user_question: &str,
    ) -> DigestResult<Vec<ChannelMessage>> {
        digest_with_span(self.channel(), Direction::Outbound, None, || {
            let grouped = self.digest_from_api_grouped(response, last_user_question)?;
            Ok(grouped
                .into_iter()
                .flat_map(|digested| digested.into_messages())
                .collect())
        })
    }
}

/// Serializes an action payload. Payload types are plain structs, so this cannot fail in
/// practice; an empty object is sent if it ever does.
pub(crate) fn encode_payload<T: Serialize>(payload: &T) -> String {
    serde_json::to_string(payload).unwrap_or_else(|_| "{}".into())
}
