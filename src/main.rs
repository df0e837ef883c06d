//! CV extractor: structured field extraction from CVs

use clap::Parser;
use cv_extractor::cli::{self, Cli, Commands, ConfigAction};
use cv_extractor::config::Config;
use cv_extractor::error::{CvExtractError, Result};
use cv_extractor::output::formatter::OutputFormatter;
use cv_extractor::pipeline::Pipeline;
use log::{error, info};
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Extract {
            cv,
            strategy,
            output,
        } => {
            cli::validate_file_extension(&cv, &["pdf", "txt"])
                .map_err(|e| CvExtractError::InvalidInput(format!("CV file: {}", e)))?;

            let output_format =
                cli::parse_output_format(&output).map_err(CvExtractError::InvalidInput)?;

            let strategy = strategy
                .map(|s| cli::parse_strategy(&s))
                .transpose()
                .map_err(CvExtractError::InvalidInput)?;

            info!("Processing CV: {}", cv.display());

            let result = Pipeline::new(config).run(&cv, strategy).await?;

            if result.used_fallback {
                eprintln!("Note: fallback extraction was used");
            }

            println!(
                "{}",
                OutputFormatter::render(&result.record, output_format)?
            );
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                let rendered = toml::to_string_pretty(&config).map_err(|e| {
                    CvExtractError::Configuration(format!("Failed to render config: {}", e))
                })?;
                println!("{}", rendered);
            }

            Some(ConfigAction::Reset) => {
                let default_config = Config::default();
                default_config.save()?;
                println!("Configuration reset to defaults");
            }
        },
    }

    Ok(())
}
