//! Fieldmap CLI - Command-line front end for the mapping pipeline.

use clap::Parser;
use fieldmap_cli::commands;
use fieldmap_cli::{Cli, Command, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> fieldmap_cli::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(!cli.no_color)
        .try_init();

    let color_enabled = !cli.no_color;

    let output = match cli.command {
        Command::Suggest(args) => {
            let formatter = Formatter::new(args.format, color_enabled);
            commands::execute_suggest(args, &formatter).await?
        }
        Command::Explain(args) => {
            let formatter = Formatter::new(args.format, color_enabled);
            commands::execute_explain(args, &formatter)?
        }
    };

    println!("{}", output);
    Ok(())
}
