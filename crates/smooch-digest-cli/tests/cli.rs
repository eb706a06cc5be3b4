use serde_json::{Value, json};
use smooch_testutil::fixtures_dir;
use std::io::Write;
use std::process::{Command, Stdio};
use tempfile::NamedTempFile;

const CONFIG_ENV: &str = "SMOOCH_CONNECTOR_CONFIG";

fn cli_cmd() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_smooch-digest"));
    cmd.env_remove(CONFIG_ENV).env("RUST_LOG", "off");
    cmd
}

fn config_path() -> String {
    fixtures_dir()
        .join("connector.yaml")
        .to_string_lossy()
        .into_owned()
}

fn run_json(args: &[&str]) -> Value {
    let output = cli_cmd().args(args).output().expect("run smooch-digest");
    if !output.status.success() {
        panic!(
            "CLI command {:?} failed: status={:?}\nstdout={}\nstderr={}",
            args,
            output.status,
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
    }
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

fn json_file(value: &Value) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{value}").unwrap();
    file
}

#[test]
fn inbound_reads_webhook_file() {
    let webhook = fixtures_dir().join("webhook_text.json");
    let output = run_json(&["inbound", "--input", webhook.to_str().unwrap()]);
    assert_eq!(output, json!([{"message": "hello"}]));
}

#[test]
fn inbound_reads_stdin() {
    let mut child = cli_cmd()
        .arg("inbound")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("spawn smooch-digest");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(br#"{"messages":[{"type":"file","mediaUrl":"https://m/f.pdf"}]}"#)
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value, json!([{"message": "https://m/f.pdf"}]));
}

#[test]
fn outbound_uses_configured_url_buttons() {
    let answer = json_file(&json!({
        "type": "answer",
        "message": "<p>Read the guide</p>",
        "attributes": {"URL_BUTTON": {"BUTTON_TITLE": "Guide", "BUTTON_URL": "https://g.example"}}
    }));
    let config = config_path();
    let output = run_json(&[
        "outbound",
        "--config",
        &config,
        "--input",
        answer.path().to_str().unwrap(),
    ]);
    assert_eq!(
        output,
        json!([{
            "role": "appMaker",
            "type": "text",
            "text": "Read the guide",
            "actions": [{
                "type": "webview",
                "text": "Guide",
                "uri": "https://g.example",
                "fallback": "https://g.example"
            }]
        }])
    );
}

#[test]
fn outbound_passes_last_user_question() {
    let answer = json_file(&json!({
        "type": "polarQuestion",
        "message": "Q?",
        "options": [{"label": "yes", "value": 1}]
    }));
    let output = run_json(&[
        "outbound",
        "--input",
        answer.path().to_str().unwrap(),
        "--last-user-question",
        "Q",
    ]);
    let payload: Value =
        serde_json::from_str(output[0]["actions"][0]["payload"].as_str().unwrap()).unwrap();
    assert_eq!(payload, json!({"message": "Q", "option": 1}));
}

#[test]
fn unknown_answer_type_fails() {
    let answer = json_file(&json!({"answers": [{"type": "carousel"}]}));
    let output = cli_cmd()
        .args(["outbound", "--input", answer.path().to_str().unwrap()])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown answer type"));
}

#[test]
fn rating_and_escalation_prompts() {
    let config = config_path();
    let rating = run_json(&["rating", "--code", "rc-7", "--config", &config]);
    assert_eq!(rating["text"], "Was this answer helpful?");
    assert_eq!(rating["actions"][1]["metadata"], json!({"type": "rating"}));

    let escalation = run_json(&["escalation", "--config", &config]);
    assert_eq!(escalation["actions"][0]["text"], "Yes");
    assert_eq!(escalation["actions"][1]["payload"], r#"{"escalateOption":false}"#);
}

#[test]
fn rating_without_options_fails() {
    let output = cli_cmd().args(["rating", "--code", "x"]).output().unwrap();
    assert!(!output.status.success());
}

#[test]
fn external_id_from_webhook_and_handshake() {
    let webhook = fixtures_dir().join("webhook_text.json");
    let output = run_json(&["external-id", "--input", webhook.to_str().unwrap()]);
    assert_eq!(
        output["externalId"],
        "smooch-5963c0d619a30a2e00de36b8-c7f6e6d6c3a637261bd9656f"
    );

    let empty = json_file(&json!({}));
    let config = config_path();
    let output = run_json(&[
        "external-id",
        "--config",
        &config,
        "--input",
        empty.path().to_str().unwrap(),
        "--hook-secret",
    ]);
    assert_eq!(output["externalId"], "hc-challenge-botkey9f2");
}
