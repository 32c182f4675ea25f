//! Command-line front end for the generation pipeline.
//!
//! ```text
//! factoria generate "track daily water intake" --user-id alice
//! factoria health
//! ```
//!
//! Results are written to standard output as JSON; logs go to standard
//! error. Provider credentials are read from the environment or a `.env`
//! file.

use clap::{Parser, Subcommand};
use factoria::bootstrap::build_pipeline;
use factoria::config::FactoriaConfig;
use factoria::job::services::GenerateRequest;
use factoria::orchestration::domain::AppKind;
use factoria::synthesis::{SynthesisOptions, SynthesisStrategy};
use factoria::telemetry::{DEFAULT_DIRECTIVE, init_tracing};
use serde::Serialize;
use std::io::Write;
use std::process::ExitCode;
use tokio::runtime::Builder;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Parser)]
#[command(name = "factoria", version, about = "Turn a prompt into a deployed web app")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate, synthesize, and deploy an application.
    Generate {
        /// What the application should do (1 to 500 characters).
        prompt: String,

        /// Attribute the job to this user.
        #[arg(long)]
        user_id: Option<String>,

        /// Synthesis strategy for this run: `template` or `model`.
        #[arg(long, value_parser = parse_strategy)]
        synthesis: Option<SynthesisStrategy>,

        /// Application kind used when the model does not classify one.
        #[arg(long, value_parser = parse_kind)]
        kind: Option<AppKind>,
    },
    /// Report which providers are configured.
    Health,
}

fn parse_strategy(value: &str) -> Result<SynthesisStrategy, String> {
    SynthesisStrategy::try_from(value).map_err(|err| err.to_string())
}

fn parse_kind(value: &str) -> Result<AppKind, String> {
    AppKind::try_from(value).map_err(|err| err.to_string())
}

fn write_json(value: &impl Serialize) -> Result<(), BoxError> {
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

fn main() -> Result<ExitCode, BoxError> {
    let cli = Cli::parse();
    if !init_tracing(DEFAULT_DIRECTIVE) {
        tracing::debug!("tracing subscriber already installed");
    }
    let pipeline = build_pipeline(FactoriaConfig::from_env()?);

    match cli.command {
        Command::Health => {
            write_json(&pipeline.health())?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Generate {
            prompt,
            user_id,
            synthesis,
            kind,
        } => {
            let mut options = SynthesisOptions::default();
            if let Some(strategy) = synthesis {
                options = options.with_strategy(strategy);
            }
            if let Some(preferred) = kind {
                options = options.with_preferred_kind(preferred);
            }
            let mut request = GenerateRequest::new(prompt).with_options(options);
            if let Some(user) = user_id {
                request = request.with_user_id(user);
            }

            let runtime = Builder::new_multi_thread().enable_all().build()?;
            match runtime.block_on(pipeline.generate(request)) {
                Ok(result) => {
                    write_json(&result)?;
                    Ok(ExitCode::SUCCESS)
                }
                Err(failure) => {
                    write_json(&failure)?;
                    Ok(ExitCode::FAILURE)
                }
            }
        }
    }
}
