use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use ahp_engine::adapters::judgments::FileJudgmentSource;
use ahp_engine::application::{EvaluateHierarchyHandler, ToolResponse};
use ahp_engine::config::{AppConfig, LogFormat, LoggingConfig};

#[derive(Debug, Parser)]
#[command(
    name = "ahp-engine",
    about = "Evaluate an AHP decision hierarchy",
    long_about = "Reads criteria and alternative pairwise judgments from a JSON or YAML document, \
                  derives priority weights, checks consistency and prints the ranked alternatives as JSON.",
    after_help = "Examples:\n  ahp-engine --input hierarchy.yaml\n  ahp-engine --input hierarchy.json --pretty --precision 4"
)]
struct Cli {
    #[arg(long, short, help = "Hierarchy document (.json, .yaml or .yml)")]
    input: PathBuf,

    #[arg(long, help = "Pretty-print the JSON response")]
    pretty: bool,

    #[arg(long, help = "Decimal places in the rounded report (overrides configuration)")]
    precision: Option<u32>,
}

fn init_tracing(logging: &LoggingConfig) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(logging.env_filter())
        .with_writer(std::io::stderr);
    match logging.format {
        LogFormat::Compact => builder.compact().init(),
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Json => builder.json().init(),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match AppConfig::load().and_then(|c| {
        c.validate()?;
        Ok(c)
    }) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("ahp-engine: {}", e);
            return ExitCode::from(2);
        }
    };
    init_tracing(&config.logging);

    let precision = cli.precision.unwrap_or(config.engine.report_precision);
    let handler = EvaluateHierarchyHandler::new(
        Arc::new(FileJudgmentSource::new(&cli.input)),
        config.engine.settings(),
        config.engine.timeout(),
    );

    tracing::info!(input = %cli.input.display(), "Evaluating hierarchy");
    let outcome = handler.handle().await;
    if let Err(e) = &outcome {
        tracing::error!(code = e.code(), error = %e, "Evaluation failed");
    }

    let response = ToolResponse::from_outcome(&outcome, precision);
    match response.to_json(cli.pretty) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("ahp-engine: failed to serialize response: {}", e);
            return ExitCode::FAILURE;
        }
    }

    if response.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
