mod args;
mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use args::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let filter = match cli.verbose {
        0 => "ytlyric=info,ytlyric_core=info",
        1 => "ytlyric=debug,ytlyric_core=debug",
        2 => "ytlyric=trace,ytlyric_core=trace",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    match cli.command {
        Some(Commands::Lyrics { input, output }) => {
            commands::lyrics::run(&input, output.as_deref(), cli.config.as_deref()).await
        }
        Some(Commands::Batch {
            input,
            parallel,
            output_dir,
        }) => {
            commands::batch::run(&input, parallel, output_dir, cli.config.as_deref()).await
        }
        Some(Commands::Config) => commands::config::run(cli.config.as_deref()).await,
        None => {
            // If a file is provided directly, treat as lyrics command
            if let Some(input) = cli.input {
                commands::lyrics::run(&input, cli.output.as_deref(), cli.config.as_deref()).await
            } else {
                use clap::CommandFactory;
                Cli::command().print_help()?;
                println!();
                Ok(())
            }
        }
    }
}
