use serde_json::Value;
use smooch_core::{Action, ChannelMessage};

use crate::html::strip_tags;

/// Returns true for values that count as "not set": null, false, empty strings, arrays and
/// objects.
pub(crate) fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Number(_) => false,
    }
}

fn non_blank_str<'a>(button: &'a Value, field: &str) -> Option<&'a str> {
    button
        .get(field)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
}

/// Builds a text message with one `webview` action per URL button.
///
/// `buttons` is a single button object or a list of them; `fields` names the title and URL keys
/// inside each. When the field names are unknown, or any button lacks a non-empty title or URL,
/// no button is rendered and the plain answer text is returned instead.
pub fn build_url_button_message(
    message: &str,
    buttons: &Value,
    fields: Option<(&str, &str)>,
) -> ChannelMessage {
    let text = strip_tags(message);
    let Some((title_field, url_field)) = fields else {
        return ChannelMessage::text(text);
    };

    let buttons: Vec<&Value> = match buttons {
        Value::Array(items) => items.iter().collect(),
        other => vec![other],
    };

    let mut actions = Vec::with_capacity(buttons.len());
    for button in buttons {
        match (
            non_blank_str(button, title_field),
            non_blank_str(button, url_field),
        ) {
            (Some(title), Some(url)) => actions.push(Action::webview(title, url)),
            _ => {
                tracing::debug!(%button, "url button is incomplete; sending plain text");
                return ChannelMessage::text(text);
            }
        }
    }
    ChannelMessage::with_actions(text, actions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const FIELDS: Option<(&str, &str)> = Some(("BUTTON_TITLE", "BUTTON_URL"));

    #[test]
    fn single_button_object_is_accepted() {
        let button = json!({"BUTTON_TITLE": "Docs", "BUTTON_URL": "https://docs.example"});
        let msg = build_url_button_message("<b>Read</b> more", &button, FIELDS);
        assert_eq!(msg.text.as_deref(), Some("Read more"));
        let actions = msg.actions.expect("actions");
        assert_eq!(actions, vec![Action::webview("Docs", "https://docs.example")]);
    }

    #[test]
    fn one_incomplete_button_discards_all() {
        let buttons = json!([
            {"BUTTON_TITLE": "Docs", "BUTTON_URL": "https://docs.example"},
            {"BUTTON_TITLE": "", "BUTTON_URL": "https://blog.example"}
        ]);
        let msg = build_url_button_message("Read more", &buttons, FIELDS);
        assert!(msg.actions.is_none());
        assert_eq!(msg.text.as_deref(), Some("Read more"));
    }

    #[test]
    fn unknown_field_names_fall_back_to_text() {
        let button = json!({"BUTTON_TITLE": "Docs", "BUTTON_URL": "https://docs.example"});
        assert!(build_url_button_message("x", &button, None).actions.is_none());
    }

    #[test]
    fn blank_values() {
        assert!(is_blank(&json!(null)));
        assert!(is_blank(&json!([])));
        assert!(is_blank(&json!({})));
        assert!(is_blank(&json!("")));
        assert!(!is_blank(&json!({"a": 1})));
        assert!(!is_blank(&json!(0)));
    }
}
