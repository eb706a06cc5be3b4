//! Core types for the Smooch chatbot connector.
//!
//! Inbound webhook events ([`InboundEvent`]) are digested into [`CanonicalRequest`]s for the bot
//! answer service; bot answers ([`BotAnswer`]) are digested into [`ChannelMessage`]s for the
//! channel. The digesting rules live in `smooch-translator`; this crate holds the shapes,
//! configuration and errors they share.

pub mod answer;
pub mod config;
pub mod error;
pub mod external_id;
pub mod inbound;
pub mod translate;
pub mod types;

pub use answer::{
    AnswerKind, AnswerOption, BotAnswer, ExtendedAnswer, MULTIPLE_OPTIONS_FLAG, QuestionAnswer,
    TextAnswer, answer_entries,
};
pub use config::{CONFIG_PATH_ENV, ConnectorConfig, DigesterConfig, RatingOption, UrlButtonsConfig};
pub use error::{DigestError, DigestResult};
pub use external_id::{
    ExternalId, challenge_external_id, chat_event_external_id, is_chat_event, resolve_external_id,
};
pub use inbound::{EventKind, InboundEvent, SkippedEvent, classify, webhook_events};
pub use translate::{Translate, TranslationCatalog};
pub use types::{Action, ActionKind, CanonicalRequest, ChannelMessage, Digested, MessageKind, Role};
