//! Chatbot API answers to Smooch messages.

use serde::Serialize;
use serde_json::Value;
use smooch_core::{
    Action, BotAnswer, ChannelMessage, DigestResult, Digested, ExtendedAnswer,
    MULTIPLE_OPTIONS_FLAG, QuestionAnswer, TextAnswer, answer_entries,
};

use crate::buttons::{build_url_button_message, is_blank};
use crate::html::strip_tags;
use crate::images::split_images;
use crate::{SmoochDigester, encode_payload};

const IMG_TAG_OPEN: &str = "<img";

#[derive(Debug, Serialize)]
struct OptionPayload<'a> {
    message: &'a str,
    option: &'a Value,
}

#[derive(Debug, Serialize)]
struct ExtendedContentPayload<'a> {
    #[serde(rename = "extendedContentAnswer")]
    extended_content_answer: &'a Value,
}

impl SmoochDigester {
    /// Digests a chatbot API response, keeping one [`Digested`] per answer.
    ///
    /// Gateways that deliver multi-part answers as a batch use this; others can call
    /// [`MessageDigester::digest_from_api`](crate::MessageDigester::digest_from_api), which
    /// flattens the result.
    pub fn digest_from_api_grouped(
        &self,
        response: &Value,
        last_user_question: &str,
    ) -> DigestResult<Vec<Digested>> {
        answer_entries(response)?
            .into_iter()
            .map(|raw| self.digest_answer(raw, last_user_question))
            .collect()
    }

    pub(crate) fn digest_answer(
        &self,
        raw: &Value,
        last_user_question: &str,
    ) -> DigestResult<Digested> {
        let answer = BotAnswer::from_value(raw)?;
        tracing::debug!(kind = answer.kind().as_str(), "digesting answer");
        let digested = match answer {
            BotAnswer::Answer(answer) => self.digest_text_answer(&answer),
            BotAnswer::PolarQuestion(question) => {
                Digested::Single(self.digest_polar_question(&question, last_user_question))
            }
            BotAnswer::MultipleChoiceQuestion(question) => Digested::Single(
                self.digest_multiple_choice_question(&question, last_user_question),
            ),
            BotAnswer::ExtendedContentsAnswer(answer) => {
                Digested::Single(self.digest_extended_contents(&answer))
            }
        };
        Ok(digested)
    }

    fn digest_text_answer(&self, answer: &TextAnswer) -> Digested {
        if answer.message.contains(IMG_TAG_OPEN) {
            return Digested::Multiple(split_images(&answer.message));
        }
        let url_buttons = self
            .config()
            .url_button_attribute()
            .and_then(|name| answer.attribute(name))
            .filter(|buttons| !is_blank(buttons));
        match url_buttons {
            Some(buttons) => Digested::Single(build_url_button_message(
                &answer.message,
                buttons,
                self.config().url_button_fields(),
            )),
            None => Digested::Single(ChannelMessage::text(strip_tags(&answer.message))),
        }
    }

    fn digest_polar_question(
        &self,
        question: &QuestionAnswer,
        last_user_question: &str,
    ) -> ChannelMessage {
        let actions = question
            .options
            .iter()
            .map(|option| {
                option_action(
                    self.lang().translate(&option.label),
                    last_user_question,
                    &option.value,
                )
            })
            .collect();
        ChannelMessage::with_actions(strip_tags(&question.message), actions)
    }

    fn digest_multiple_choice_question(
        &self,
        question: &QuestionAnswer,
        last_user_question: &str,
    ) -> ChannelMessage {
        let title_attribute = self
            .config()
            .button_title_attribute()
            .filter(|_| question.has_flag(MULTIPLE_OPTIONS_FLAG));
        let actions = question
            .options
            .iter()
            .map(|option| {
                let text = title_attribute
                    .and_then(|name| option.attribute(name))
                    .and_then(Value::as_str)
                    .unwrap_or(&option.label);
                option_action(text.to_string(), last_user_question, &option.value)
            })
            .collect();
        ChannelMessage::with_actions(strip_tags(&question.message), actions)
    }

    fn digest_extended_contents(&self, answer: &ExtendedAnswer) -> ChannelMessage {
        let title_attribute = self.config().button_title_attribute();
        let actions = answer
            .sub_answers
            .iter()
            .map(|sub_answer| {
                let text = title_attribute
                    .and_then(|name| sub_answer.get("attributes")?.get(name))
                    .and_then(Value::as_str)
                    .or_else(|| sub_answer.get("message").and_then(Value::as_str))
                    .unwrap_or_default();
                let payload = ExtendedContentPayload {
                    extended_content_answer: sub_answer,
                };
                Action::postback(text, encode_payload(&payload))
            })
            .collect();
        ChannelMessage::with_actions(strip_tags(&answer.message), actions)
    }
}

fn option_action(text: String, last_user_question: &str, value: &Value) -> Action {
    let payload = OptionPayload {
        message: last_user_question,
        option: value,
    };
    Action::postback(text, encode_payload(&payload))
}
