//! Output formatting for the CLI.

use crate::cli::CliFormat;
use crate::error::Result;
use colored::*;
use fieldmap_domain::{ConfidenceStatus, MappingCandidate, MappingSuggestion};
use fieldmap_suggester::{FeedbackResponse, MappingResponse, ServiceResponse};
use std::cmp::Ordering;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: CliFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: CliFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a service response.
    pub fn format_response(&self, response: &ServiceResponse, top: usize) -> Result<String> {
        match (self.format, response) {
            (CliFormat::Json, _) => Ok(serde_json::to_string_pretty(response)?),
            (CliFormat::Table, ServiceResponse::Suggestions(r)) => Ok(self.suggestions_table(r, top)),
            (CliFormat::Table, ServiceResponse::Feedback(r)) => Ok(self.feedback_summary(r)),
        }
    }

    /// Format a single scored pair.
    pub fn format_candidate(&self, candidate: &MappingCandidate) -> Result<String> {
        if self.format == CliFormat::Json {
            return Ok(serde_json::to_string_pretty(candidate)?);
        }

        let b = &candidate.breakdown;
        let mut builder = Builder::default();
        builder.push_record(["Component", "Score"]);
        builder.push_record(["name".to_string(), format!("{:.3}", b.name)]);
        builder.push_record(["type".to_string(), format!("{:.3}", b.type_score)]);
        builder.push_record(["semantic".to_string(), format!("{:.3}", b.semantic)]);
        builder.push_record(["structural".to_string(), format!("{:.3}", b.structural)]);
        builder.push_record(["total".to_string(), format!("{:.3}", b.total)]);

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        Ok(format!(
            "{}\nStatus: {}\nRationale: {}",
            table,
            self.status(candidate.status),
            candidate.rationale.join(", ")
        ))
    }

    fn suggestions_table(&self, response: &MappingResponse, top: usize) -> String {
        let meta = &response.meta;
        let mut out = format!(
            "{}\n",
            self.info(&format!(
                "{} source(s) x {} target(s) via {} [{}]: {}",
                meta.source_count, meta.target_count, meta.strategy, meta.model, meta.message
            ))
        );

        for suggestion in &response.suggestions {
            out.push('\n');
            out.push_str(&self.suggestion_table(suggestion, top));
            out.push('\n');
        }
        out
    }

    fn suggestion_table(&self, suggestion: &MappingSuggestion, top: usize) -> String {
        let source = &suggestion.source;
        let header = format!("{} ({})", source.name, source.field_type);
        let header = if self.color_enabled {
            header.bold().to_string()
        } else {
            header
        };

        if suggestion.suggestions.is_empty() {
            return format!("{}\n{}", header, self.colorize("No candidates.", "yellow"));
        }

        let mut ranked: Vec<&MappingCandidate> = suggestion.suggestions.iter().collect();
        ranked.sort_by(|a, b| {
            b.breakdown
                .total
                .partial_cmp(&a.breakdown.total)
                .unwrap_or(Ordering::Equal)
        });

        let mut builder = Builder::default();
        builder.push_record(["Target", "Document", "Total", "Name", "Type", "Semantic", "Structural", "Status", "Rationale"]);
        for candidate in ranked.into_iter().take(top.max(1)) {
            let b = &candidate.breakdown;
            builder.push_record([
                candidate.target.path.clone(),
                candidate.target.document_type.clone(),
                format!("{:.3}", b.total),
                format!("{:.3}", b.name),
                format!("{:.3}", b.type_score),
                format!("{:.3}", b.semantic),
                format!("{:.3}", b.structural),
                self.status(candidate.status),
                candidate.rationale.join(", "),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        format!("{}\n{}", header, table)
    }

    fn feedback_summary(&self, response: &FeedbackResponse) -> String {
        if response.feedback_stored {
            self.success(&format!(
                "Stored {} feedback entr{} (request {})",
                response.feedback_count,
                if response.feedback_count == 1 { "y" } else { "ies" },
                response.meta.request_id
            ))
        } else {
            self.warning(&format!(
                "{} feedback entr{} not stored: {}",
                response.feedback_count,
                if response.feedback_count == 1 { "y" } else { "ies" },
                response.reason.as_deref().unwrap_or("unknown reason")
            ))
        }
    }

    fn status(&self, status: ConfidenceStatus) -> String {
        let color = match status {
            ConfidenceStatus::High => "green",
            ConfidenceStatus::Medium => "yellow",
            ConfidenceStatus::Low => "red",
        };
        self.colorize(status.as_str(), color)
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldmap_domain::{ConfidenceBreakdown, SourceField, TargetField};
    use fieldmap_suggester::{FeedbackMeta, ResponseMeta, Strategy};

    fn candidate(path: &str, total: f64) -> MappingCandidate {
        MappingCandidate::new(
            TargetField::new(path, path, "string", "order"),
            ConfidenceBreakdown::new(total, 1.0, 0.0, 1.0, total),
            vec!["type compatible".to_string()],
        )
    }

    fn response() -> ServiceResponse {
        ServiceResponse::Suggestions(MappingResponse {
            suggestions: vec![MappingSuggestion {
                source: SourceField::new("customer_email", "string"),
                suggestions: vec![candidate("low", 0.2), candidate("best", 0.9), candidate("mid", 0.6)],
            }],
            meta: ResponseMeta {
                source_count: 1,
                target_count: 3,
                strategy: Strategy::RuleBased,
                message: "Rule-based suggestions: AI provider not configured".to_string(),
                model: "rule-based".to_string(),
                request_id: "req-1".to_string(),
                prompt: String::new(),
            },
        })
    }

    #[test]
    fn test_table_sorts_and_truncates() {
        let formatter = Formatter::new(CliFormat::Table, false);
        let output = formatter.format_response(&response(), 2).unwrap();

        assert!(output.contains("customer_email (string)"));
        assert!(output.contains("via rule-based"));
        let best = output.find("best").unwrap();
        let mid = output.find("mid").unwrap();
        assert!(best < mid, "candidates sorted by total");
        assert!(!output.contains("low"), "only the top 2 are shown");
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(CliFormat::Json, false);
        let output = formatter.format_response(&response(), 1).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["meta"]["strategy"], "rule-based");
        assert_eq!(value["suggestions"][0]["suggestions"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_feedback_summary() {
        let formatter = Formatter::new(CliFormat::Table, false);
        let response = ServiceResponse::Feedback(FeedbackResponse {
            status: "ok".to_string(),
            feedback_stored: false,
            feedback_count: 1,
            reason: Some("feedback store not configured".to_string()),
            meta: FeedbackMeta {
                request_id: "r".to_string(),
                strategy: "unknown".to_string(),
                model: "unknown".to_string(),
            },
        });
        let output = formatter.format_response(&response, 3).unwrap();
        assert_eq!(output, "⚠ 1 feedback entry not stored: feedback store not configured");
    }

    #[test]
    fn test_candidate_breakdown() {
        let formatter = Formatter::new(CliFormat::Table, false);
        let output = formatter.format_candidate(&candidate("billTo.email", 0.545)).unwrap();
        assert!(output.contains("structural"));
        assert!(output.contains("0.545"));
        assert!(output.contains("Status: medium"));
        assert!(output.contains("Rationale: type compatible"));
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(CliFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
    }
}
