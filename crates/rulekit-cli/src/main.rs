//! # rulekit
//!
//! Command-line front end: prints the effective lint rules for a workspace or
//! the custom instruction document for a working directory.

#![deny(unsafe_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use rulekit_core::logging::init_subscriber;
use rulekit_core::{StaticWorkspace, primary_root};
use rulekit_instructions::{BuildOptions, InstructionAggregator};
use rulekit_lint::{EslintCliProbe, LintConfigResolver};
use rulekit_settings::{RulekitSettings, get_settings};

/// Lint configuration and custom instruction tooling.
#[derive(Parser, Debug)]
#[command(name = "rulekit", about = "Lint config and instruction tooling")]
struct Cli {
    /// Log filter (overrides settings; `RUST_LOG` wins over both).
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the effective lint rules as JSON (`null` when none are found).
    LintConfig {
        /// Workspace root (defaults to the current directory).
        #[arg(long)]
        workspace: Option<PathBuf>,
    },
    /// Print the custom instruction document.
    Instructions {
        /// Working directory (defaults to the current directory).
        #[arg(long)]
        cwd: Option<PathBuf>,

        /// Active mode slug.
        #[arg(long, default_value = "code")]
        mode: String,

        /// Preferred language code (overrides settings).
        #[arg(long)]
        language: Option<String>,

        /// Global instructions (overrides settings).
        #[arg(long)]
        global: Option<String>,

        /// Mode-specific instructions (overrides settings).
        #[arg(long)]
        mode_instructions: Option<String>,

        /// Ignore instructions text (overrides the ignore file).
        #[arg(long)]
        ignore_instructions: Option<String>,
    },
}

fn current_dir_or(path: Option<PathBuf>) -> Result<PathBuf> {
    match path {
        Some(p) => Ok(p),
        None => std::env::current_dir().context("Failed to read current directory"),
    }
}

/// Cancel `token` on Ctrl-C so a running probe child is killed.
fn cancel_on_interrupt(token: CancellationToken) {
    let _ = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            debug!("interrupt received, cancelling");
            token.cancel();
        }
    });
}

async fn lint_config(settings: &RulekitSettings, workspace: &Path) -> Result<String> {
    let token = CancellationToken::new();
    cancel_on_interrupt(token.clone());

    let probe = EslintCliProbe::from_settings(&settings.lint).with_cancellation(token);
    let resolver = LintConfigResolver::with_probe(Arc::new(probe), &settings.lint);

    let roots = StaticWorkspace::single(workspace);
    let root = primary_root(&roots).context("No workspace root")?;
    let rules = resolver.resolve(&root).await;
    serde_json::to_string_pretty(&rules).context("Failed to serialize lint rules")
}

struct InstructionArgs {
    mode: String,
    language: Option<String>,
    global: Option<String>,
    mode_instructions: Option<String>,
    ignore_instructions: Option<String>,
}

async fn instructions(
    settings: &RulekitSettings,
    cwd: &Path,
    args: InstructionArgs,
) -> Result<String> {
    let cfg = &settings.instructions;
    let aggregator = InstructionAggregator::from_settings(cfg);

    let ignore_instructions = match args.ignore_instructions {
        Some(text) => Some(text),
        None => aggregator
            .ignore_instructions(cwd)
            .await
            .with_context(|| format!("Failed to read ignore file in {}", cwd.display()))?,
    };
    let options = BuildOptions {
        language: args.language.or_else(|| cfg.language.clone()),
        ignore_instructions,
    };
    let global = args.global.as_deref().or(cfg.global_instructions.as_deref());
    let mode_instructions = args
        .mode_instructions
        .as_deref()
        .or_else(|| cfg.instructions_for_mode(&args.mode));

    aggregator
        .build(cwd, &args.mode, global, mode_instructions, &options)
        .await
        .with_context(|| format!("Failed to build instructions for {}", cwd.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = get_settings();

    let level = cli.log_level.as_deref().unwrap_or(&settings.logging.level);
    init_subscriber(level);

    let output = match cli.command {
        Command::LintConfig { workspace } => {
            lint_config(settings, &current_dir_or(workspace)?).await?
        }
        Command::Instructions {
            cwd,
            mode,
            language,
            global,
            mode_instructions,
            ignore_instructions,
        } => {
            let cwd = current_dir_or(cwd)?;
            let args = InstructionArgs {
                mode,
                language,
                global,
                mode_instructions,
                ignore_instructions,
            };
            instructions(settings, &cwd, args).await?
        }
    };

    println!("{output}");
    Ok(())
}
