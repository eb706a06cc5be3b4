use std::sync::Arc;

use serde_json::json;
use smooch_core::{CanonicalRequest, ConnectorConfig, MessageKind, TranslationCatalog};
use smooch_testutil::{decoded_action_payloads, fixtures_dir, load_fixture, message_contains_text};
use smooch_translator::{MessageDigester, SmoochDigester};

fn digester() -> (SmoochDigester, ConnectorConfig) {
    let config = ConnectorConfig::from_path(&fixtures_dir().join("connector.yaml")).expect("config");
    let lang = TranslationCatalog::new(config.translations.clone());
    (
        SmoochDigester::new(Arc::new(lang), config.digester.clone()),
        config,
    )
}

#[test]
fn postback_webhook_returns_embedded_request() {
    let (digester, _) = digester();
    let body = load_fixture("webhook_postback.json").unwrap();
    let requests = digester.digest_to_api(&body).unwrap();
    assert_eq!(
        requests,
        vec![CanonicalRequest::OpaquePayload(
            json!({"message": "reset password", "option": 1})
        )]
    );
}

#[test]
fn mixed_webhook_skips_unknown_events_and_keeps_order() {
    let (digester, _) = digester();
    let body = load_fixture("webhook_mixed.json").unwrap();
    let requests = digester.digest_to_api(&body).unwrap();
    assert_eq!(requests.len(), 4);
    assert!(requests[0].message().is_none());
    assert_eq!(
        requests[1].message(),
        Some("https://media.smooch.io/apps/5963/photo.jpg")
    );
    assert_eq!(
        requests[2].message(),
        Some("https://media.smooch.io/apps/5963/invoice.pdf")
    );
    assert_eq!(requests[3].message(), Some("thanks"));
}

#[test]
fn mixed_answers_flatten_in_order() {
    let (digester, _) = digester();
    let body = load_fixture("answers_mixed.json").unwrap();
    let messages = digester.digest_from_api(&body, "reset password").unwrap();

    let kinds: Vec<_> = messages.iter().map(|m| m.kind).collect();
    assert_eq!(
        kinds,
        [
            MessageKind::Text,
            MessageKind::Image,
            MessageKind::Text,
            MessageKind::Text,
            MessageKind::Text
        ]
    );
    assert_eq!(messages[0].text.as_deref(), Some("To reset it:"));
    assert_eq!(messages[2].text.as_deref(), Some("then confirm."));

    let polar = &messages[3];
    let labels: Vec<_> = polar.actions.as_ref().unwrap().iter().map(|a| a.text.as_str()).collect();
    assert_eq!(labels, ["Yes", "No"]);

    let choice = &messages[4];
    let value = serde_json::to_value(choice).unwrap();
    assert!(message_contains_text(&value, "My personal account"));
    assert!(message_contains_text(&value, "Business"));
    assert_eq!(
        decoded_action_payloads(choice)[1],
        json!({"message": "reset password", "option": "b"})
    );
}

#[test]
fn configured_templates_use_translations() {
    let (digester, config) = digester();
    let rating = digester.build_content_ratings_message(&config.ratings, "rc-99");
    assert_eq!(rating.text.as_deref(), Some("Was this answer helpful?"));
    let labels: Vec<_> = rating.actions.as_ref().unwrap().iter().map(|a| a.text.as_str()).collect();
    assert_eq!(labels, ["Helpful", "Not helpful"]);
    assert_eq!(decoded_action_payloads(&rating)[1]["ratingData"]["data"]["value"], 2);

    let escalation = digester.build_escalation_message();
    assert_eq!(escalation.text.as_deref(), Some("Do you want to talk to a person?"));
    assert_eq!(
        decoded_action_payloads(&escalation),
        vec![json!({"escalateOption": true}), json!({"escalateOption": false})]
    );
}
