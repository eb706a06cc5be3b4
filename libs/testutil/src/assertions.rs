use serde_json::Value;
use smooch_core::ChannelMessage;

/// Returns true when the payload contains the provided text fragment anywhere in its structure.
pub fn message_contains_text(value: &Value, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }

    let mut stack = vec![value];
    while let Some(current) = stack.pop() {
        match current {
            Value::String(text) => {
                if text.contains(needle) {
                    return true;
                }
            }
            Value::Array(items) => stack.extend(items),
            Value::Object(map) => stack.extend(map.values()),
            _ => {}
        }
    }
    false
}

/// JSON-decodes the payload of every action attached to `message`, in order.
///
/// Panics when an action has no payload or the payload is not JSON.
pub fn decoded_action_payloads(message: &ChannelMessage) -> Vec<Value> {
    message
        .actions
        .iter()
        .flatten()
        .map(|action| {
            let raw = action
                .payload
                .as_deref()
                .unwrap_or_else(|| panic!("action `{}` has no payload", action.text));
            serde_json::from_str(raw)
                .unwrap_or_else(|err| panic!("action `{}` payload is not JSON: {err}", action.text))
        })
        .collect()
}

/// Asserts the serialized message has no `actions` key at all.
pub fn assert_no_actions(message: &ChannelMessage) {
    let value = serde_json::to_value(message).expect("serialize channel message");
    assert!(
        value.get("actions").is_none(),
        "expected message without actions, got: {}",
        value
    );
}
