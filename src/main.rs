use clap::Parser;
use onboarding_forms::cli::commands::{cmd_flows, cmd_submit, cmd_validate};
use onboarding_forms::cli::config::{Cli, Commands, load_config, resolve_settings};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref());

    match cli.command {
        Commands::Flows => cmd_flows(),
        Commands::Validate { flow, fields } => {
            if !cmd_validate(&flow, &fields)? {
                std::process::exit(1);
            }
        }
        Commands::Submit {
            flow,
            fields,
            timeout_ms,
        } => {
            // Resolve settings: CLI > config > defaults
            let settings = resolve_settings(
                &config,
                cli.base_url.as_deref(),
                cli.storage.as_deref(),
                timeout_ms,
            );
            if !cmd_submit(&flow, &fields, &settings, cli.verbose)? {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

/// RUST_LOG wins; otherwise -v raises the level from warn.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "onboarding_forms=warn",
        1 => "onboarding_forms=info",
        2 => "onboarding_forms=debug",
        _ => "onboarding_forms=trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
