use clap::Parser;
use option_odds::cli::{Cli, Commands};
use option_odds::config::Config;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration; only a missing file falls back to defaults
    let loaded = Config::load_optional(&cli.config)?;
    let missing = loaded.is_none();
    let config = loaded.unwrap_or_default();

    // Initialize telemetry
    option_odds::telemetry::init_telemetry(&config.telemetry)?;

    if missing {
        tracing::warn!(path = %cli.config, "Config file not found, using defaults");
    }

    match cli.command {
        Commands::Analyze(args) => {
            args.execute(&config).await?;
        }
        Commands::Config => {
            println!("Current configuration:");
            println!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
