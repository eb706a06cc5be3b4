//! Fixed prompts that need no classification: content rating and escalation offers.

use serde::Serialize;
use serde_json::{Value, json};
use smooch_core::{Action, ChannelMessage, RatingOption, Translate};

use crate::encode_payload;

pub const RATING_INTRO_KEY: &str = "rate_content_intro";
pub const ESCALATION_INTRO_KEY: &str = "ask_to_escalate";

const ESCALATION_OPTIONS: [(&str, bool); 2] = [("yes", true), ("no", false)];

#[derive(Debug, Serialize)]
struct RatingPayload<'a> {
    #[serde(rename = "askRatingComment")]
    ask_rating_comment: bool,
    #[serde(rename = "isNegativeRating")]
    is_negative_rating: bool,
    #[serde(rename = "ratingData")]
    rating_data: RatingData<'a>,
}

#[derive(Debug, Serialize)]
struct RatingData<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    data: RatingValue<'a>,
}

#[derive(Debug, Serialize)]
struct RatingValue<'a> {
    code: &'a str,
    value: &'a Value,
    comment: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct EscalationPayload {
    #[serde(rename = "escalateOption")]
    escalate_option: bool,
}

/// Asks the user to rate the content identified by `rate_code`, one quick reply per option.
pub fn build_content_ratings_message(
    lang: &dyn Translate,
    options: &[RatingOption],
    rate_code: &str,
) -> ChannelMessage {
    let actions = options
        .iter()
        .map(|option| {
            let payload = RatingPayload {
                ask_rating_comment: option.comment,
                is_negative_rating: option.is_negative,
                rating_data: RatingData {
                    kind: "rate",
                    data: RatingValue {
                        code: rate_code,
                        value: &option.id,
                        comment: None,
                    },
                },
            };
            Action::reply(
                lang.translate(&option.label),
                encode_payload(&payload),
                json!({"type": "rating"}),
            )
        })
        .collect();
    ChannelMessage::with_actions(lang.translate(RATING_INTRO_KEY), actions)
}

/// Offers a hand-off to a human agent with yes/no postbacks.
pub fn build_escalation_message(lang: &dyn Translate) -> ChannelMessage {
    let actions = ESCALATION_OPTIONS
        .iter()
        .map(|(label, escalate)| {
            Action::postback(
                lang.translate(label),
                encode_payload(&EscalationPayload {
                    escalate_option: *escalate,
                }),
            )
        })
        .collect();
    ChannelMessage::with_actions(lang.translate(ESCALATION_INTRO_KEY), actions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use smooch_core::{ActionKind, TranslationCatalog};

    fn catalog() -> TranslationCatalog {
        TranslationCatalog::from_iter([
            ("yes", "Yes"),
            ("no", "No"),
            ("ask_to_escalate", "Talk to a person?"),
            ("rate_content_intro", "Was this helpful?"),
            ("thumbs_up", "👍"),
        ])
    }

    #[test]
    fn rating_actions_carry_rating_metadata() {
        let options = vec![
            RatingOption {
                id: json!(1),
                label: "thumbs_up".into(),
                comment: false,
                is_negative: false,
            },
            RatingOption {
                id: json!(2),
                label: "thumbs_down".into(),
                comment: true,
                is_negative: true,
            },
        ];
        let msg = build_content_ratings_message(&catalog(), &options, "rc-42");
        assert_eq!(msg.text.as_deref(), Some("Was this helpful?"));

        let actions = msg.actions.expect("actions");
        assert_eq!(actions.len(), 2);
        assert_eq!(actions[0].kind, ActionKind::Reply);
        assert_eq!(actions[0].text, "👍");
        assert_eq!(actions[1].text, "thumbs_down");
        assert_eq!(actions[1].metadata, Some(json!({"type": "rating"})));

        let payload: Value = serde_json::from_str(actions[1].payload.as_deref().unwrap()).unwrap();
        assert_eq!(
            payload,
            json!({
                "askRatingComment": true,
                "isNegativeRating": true,
                "ratingData": {"type": "rate", "data": {"code": "rc-42", "value": 2, "comment": null}}
            })
        );
    }

    #[test]
    fn escalation_offers_yes_then_no() {
        let msg = build_escalation_message(&catalog());
        assert_eq!(msg.text.as_deref(), Some("Talk to a person?"));
        let actions = msg.actions.expect("actions");
        let rendered: Vec<_> = actions
            .iter()
            .map(|a| (a.kind, a.text.as_str(), a.payload.as_deref().unwrap()))
            .collect();
        assert_eq!(
            rendered,
            vec![
                (ActionKind::Postback, "Yes", r#"{"escalateOption":true}"#),
                (ActionKind::Postback, "No", r#"{"escalateOption":false}"#),
            ]
        );
    }
}
