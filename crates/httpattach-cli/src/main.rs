//! httpattach CLI — imports local files through the http-attachments hook.
//!
//! Acts as the host: offers the file to the registered import hooks and
//! falls back to inline embedding when none claims it. Hook settings come
//! from the HTTP_ATTACHMENTS_* environment variables (or `.env`).

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use httpattach_cli::{file_name_of, init_tracing, inline_entry, open_store, ImportReport};
use httpattach_core::{AttachConfig, CompletionCallback, ImportContext, ImportRequest};
use httpattach_plugins::{
    register_http_attachments, HookOutcome, HookRegistry, InterceptionDecision, InterceptionGate,
};
use serde::Serialize;
use serde_json::json;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "httpattach", about = "Import files through the http-attachments hook")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a local file as the host would
    Import {
        /// Path to the file to import
        file: PathBuf,
        #[command(flatten)]
        host: HostArgs,
    },
    /// Show whether an import would be intercepted, without uploading
    Check {
        /// Name of the file being imported
        file_name: String,
        #[command(flatten)]
        host: HostArgs,
    },
}

#[derive(Args)]
struct HostArgs {
    /// URL of the document receiving the import
    #[arg(long)]
    origin: String,
    /// Mime type of the file
    #[arg(long = "type", default_value = "application/octet-stream")]
    mime_type: String,
    /// Classify the file as text instead of binary
    #[arg(long)]
    text: bool,
    /// Set the enable flag to "yes" for this run
    #[arg(long, conflicts_with = "tiddlers")]
    enable: bool,
    /// Read config entries from a directory of .tid files
    #[arg(long, value_name = "DIR")]
    tiddlers: Option<PathBuf>,
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize output")?;
    println!("{}", out);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = AttachConfig::from_env().context("Invalid HTTP_ATTACHMENTS_* configuration")?;

    match cli.command {
        Commands::Import { file, host } => {
            let payload = tokio::fs::read(&file)
                .await
                .with_context(|| format!("Failed to read file: {}", file.display()))?;
            let file_name = file_name_of(&file)?;
            let context = ImportContext::from_location(&host.origin)?;
            let store =
                open_store(host.enable, host.tiddlers.as_deref(), &config.enable_title).await?;

            let registry = HookRegistry::new();
            register_http_attachments(&registry, &config, store).await?;

            let callback = CompletionCallback::new(|entries| {
                tracing::debug!(count = entries.len(), "Host received replacement entries");
            });
            let request =
                ImportRequest::new(file_name, host.mime_type, !host.text, payload, callback);

            let report = match registry.importing_file(&context, &request).await {
                HookOutcome::Claimed(claim) => {
                    let entries = claim
                        .wait()
                        .await
                        .context("Upload failed; the file was not imported")?;
                    ImportReport::Referenced { entries }
                }
                HookOutcome::PassThrough => ImportReport::Inline {
                    entry: inline_entry(&request),
                },
            };
            print_json(&report)?;
        }
        Commands::Check { file_name, host } => {
            let context = ImportContext::from_location(&host.origin)?;
            let store =
                open_store(host.enable, host.tiddlers.as_deref(), &config.enable_title).await?;
            let gate = InterceptionGate::new(config.enable_title.clone(), store);

            let callback = CompletionCallback::new(|_| {});
            let request =
                ImportRequest::new(file_name, host.mime_type, !host.text, Vec::new(), callback);

            let output = match gate.evaluate(&context, &request).await {
                InterceptionDecision::Claim => json!({ "claimed": true }),
                InterceptionDecision::PassThrough(reason) => {
                    json!({ "claimed": false, "reason": reason.as_str() })
                }
            };
            print_json(&output)?;
        }
    }

    Ok(())
}
