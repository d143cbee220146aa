//! MedClassify CLI - classify medical abstracts from the command line.

use anyhow::Context;
use clap::Parser;
use medclassify_cli::commands;
use medclassify_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_env("MEDCLASSIFY_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default));

    // Log to stderr so stdout stays parseable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_path = Config::resolve_path(cli.config.as_deref())?;
    let config = Config::load_from(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Classify(args) => commands::execute_classify(args, &config, &formatter).await?,
        Command::Reliability(args) => commands::execute_reliability(args, &config, &formatter)?,
        Command::Upload(args) => commands::execute_upload(args, &config, &formatter).await?,
        Command::Fetch(args) => commands::execute_fetch(args, &config, &formatter).await?,
        Command::Summarize(args) => commands::execute_summarize(args, &config, &formatter).await?,
        Command::Predict(args) => commands::execute_predict(args, &config, &formatter)?,
        Command::Eval(args) => commands::execute_eval(args, &config, &formatter)?,
        Command::Config(args) => {
            commands::execute_config(args.action, &config, &config_path, &formatter)?
        }
    }

    Ok(())
}
