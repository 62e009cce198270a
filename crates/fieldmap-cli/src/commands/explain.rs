//! `explain`: score one source/target pair.

use crate::cli::ExplainArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use fieldmap_domain::{SourceField, TargetField};
use fieldmap_scoring::CandidateRanker;

fn clean_tags(tags: &[String]) -> Vec<String> {
    tags.iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Build the source and target fields described by the arguments.
pub fn build_pair(args: &ExplainArgs) -> Result<(SourceField, TargetField)> {
    if args.source.trim().is_empty() {
        return Err(CliError::InvalidInput("--source must not be empty".to_string()));
    }
    if args.target_path.trim().is_empty() {
        return Err(CliError::InvalidInput("--target-path must not be empty".to_string()));
    }

    let mut source = SourceField::new(args.source.clone(), args.source_type.clone());
    if let Some(path) = &args.source_path {
        source = source.with_path(path.clone());
    }
    let source_tags = clean_tags(&args.source_tags);
    if !source_tags.is_empty() {
        source = source.with_tags(source_tags);
    }

    let name = args
        .target_path
        .rsplit('.')
        .next()
        .unwrap_or(&args.target_path)
        .to_string();
    let mut target = TargetField::new(
        name,
        args.target_path.clone(),
        args.target_type.clone(),
        args.target_document.clone(),
    );
    let target_tags = clean_tags(&args.target_tags);
    if !target_tags.is_empty() {
        target = target.with_tags(target_tags);
    }

    Ok((source, target))
}

/// Execute the explain command and return the rendered output.
pub fn execute_explain(args: ExplainArgs, formatter: &Formatter) -> Result<String> {
    let (source, target) = build_pair(&args)?;
    let candidate = CandidateRanker::default().score(&source, &target);
    formatter.format_candidate(&candidate)
}
