use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use serde_json::{Value, json};
use smooch_core::{CONFIG_PATH_ENV, ConnectorConfig, TranslationCatalog, resolve_external_id};
use smooch_translator::{MessageDigester, SmoochDigester};

fn main() -> Result<()> {
    let cli = Cli::parse();
    smooch_telemetry::install("smooch-digest")?;

    let config = ConnectorConfig::load(cli.config.as_deref())?;
    let output = run(cli.command, &config)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

#[derive(Parser, Debug)]
#[command(
    name = "smooch-digest",
    version,
    about = "Digest Smooch webhooks and chatbot answers from the command line"
)]
struct Cli {
    /// Connector configuration file (.yaml or .json).
    #[arg(long, global = true, value_name = "PATH", env = CONFIG_PATH_ENV)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand, Debug)]
enum CliCommand {
    /// Convert a Smooch webhook body into chatbot API requests
    Inbound {
        /// Webhook JSON file; `-` or omitted reads stdin.
        #[arg(long, value_name = "PATH")]
        input: Option<PathBuf>,
    },
    /// Convert a chatbot API response into Smooch messages
    Outbound {
        /// Chatbot response JSON file; `-` or omitted reads stdin.
        #[arg(long, value_name = "PATH")]
        input: Option<PathBuf>,
        /// Last question asked by the user, echoed in option payloads.
        #[arg(long, default_value = "")]
        last_user_question: String,
    },
    /// Print the content-rating prompt built from the configured ratings
    Rating {
        /// Rate code of the answer being rated.
        #[arg(long)]
        code: String,
    },
    /// Print the escalation prompt
    Escalation,
    /// Resolve the session external id of a request body
    ExternalId {
        /// Request JSON file; `-` or omitted reads stdin.
        #[arg(long, value_name = "PATH")]
        input: Option<PathBuf>,
        /// The request carried an X-Hook-Secret header.
        #[arg(long)]
        hook_secret: bool,
    },
}

fn build_digester(config: &ConnectorConfig) -> SmoochDigester {
    let lang = TranslationCatalog::new(config.translations.clone());
    SmoochDigester::new(Arc::new(lang), config.digester.clone())
}

fn run(command: CliCommand, config: &ConnectorConfig) -> Result<Value> {
    let digester = build_digester(config);
    let output = match command {
        CliCommand::Inbound { input } => {
            let body = read_json(input.as_deref())?;
            serde_json::to_value(digester.digest_to_api(&body)?)?
        }
        CliCommand::Outbound {
            input,
            last_user_question,
        } => {
            let body = read_json(input.as_deref())?;
            serde_json::to_value(digester.digest_from_api(&body, &last_user_question)?)?
        }
        CliCommand::Rating { code } => {
            if config.ratings.is_empty() {
                bail!("no rating options configured");
            }
            serde_json::to_value(digester.build_content_ratings_message(&config.ratings, &code))?
        }
        CliCommand::Escalation => serde_json::to_value(digester.build_escalation_message())?,
        CliCommand::ExternalId { input, hook_secret } => {
            let body = read_json(input.as_deref())?;
            let api_key = config.api_key.as_deref().unwrap_or_default();
            json!({ "externalId": resolve_external_id(&body, hook_secret, api_key)? })
        }
    };
    tracing::debug!(digester = ?digester, "command completed");
    Ok(output)
}

fn read_json(path: Option<&Path>) -> Result<Value> {
    let raw = match path {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };
    serde_json::from_str(&raw).context("input is not valid JSON")
}
