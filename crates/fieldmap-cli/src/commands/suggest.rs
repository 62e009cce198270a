//! `suggest`: run a request file through the mapping service.

use crate::cli::SuggestArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use fieldmap_server::build_service;
use fieldmap_server::config::ServerConfig;
use fieldmap_suggester::MappingRequest;
use std::path::Path;
use tracing::info;

/// Read and parse a request file.
pub fn load_request(path: &Path) -> Result<MappingRequest> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| {
        CliError::InvalidInput(format!("{} is not a valid mapping request: {}", path.display(), e))
    })
}

/// Execute the suggest command and return the rendered output.
pub async fn execute_suggest(args: SuggestArgs, formatter: &Formatter) -> Result<String> {
    let config = match &args.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            ServerConfig::from_file(path)?
        }
        None => ServerConfig::default_config(),
    };

    let service = build_service(&config)?;
    let request = load_request(&args.request)?;
    let response = service.handle(request).await?;

    formatter.format_response(&response, args.top)
}
