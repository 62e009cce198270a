//! Fieldmap server binary
//!
//! Starts the HTTP server for mapping suggestions and feedback.

use fieldmap_server::{config::ServerConfig, start_server, ServerError};
use std::env;
use std::process;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), ServerError> {
    let args: Vec<String> = env::args().collect();

    let config = if args.len() > 2 && args[1] == "--config" {
        ServerConfig::from_file(&args[2])?
    } else if args.len() > 1 && args[1] == "--help" {
        print_help();
        process::exit(0);
    } else {
        eprintln!("Warning: No config file specified, using defaults (127.0.0.1:8080, no AI, no feedback store)");
        eprintln!("Usage: fieldmap-server --config <path-to-config.toml>");
        eprintln!();
        ServerConfig::default_config()
    };

    start_server(config).await
}

fn print_help() {
    println!("Fieldmap Server - Schema field-mapping suggestions");
    println!();
    println!("USAGE:");
    println!("    fieldmap-server --config <path-to-config.toml>");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>    Load configuration from TOML file");
    println!("    --help             Print this help message");
    println!();
    println!("CONFIGURATION:");
    println!("    bind_address / bind_port     Listen address (default 127.0.0.1:8080)");
    println!("    [llm]                        endpoint, model, api_key or api_key_env, temperature, timeout_secs");
    println!("    [store]                      path of the SQLite feedback database");
    println!("    [scoring]                    name, type, semantic, structural weights");
    println!();
    println!("Logging is controlled by RUST_LOG (default: info).");
}
