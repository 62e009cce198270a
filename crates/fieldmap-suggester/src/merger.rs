//! Merge AI mappings with rule-based candidates
//!
//! AI output names targets by free text. Each reference is resolved against
//! the real target fields (path, then name, then nearest by similarity)
//! before it becomes a candidate. Source fields the model did not cover are
//! ranked by rules instead.

use fieldmap_domain::confidence::clamp_unit;
use fieldmap_domain::{AiMapping, ConfidenceBreakdown, MappingCandidate, MappingSuggestion, SourceField, TargetField};
use fieldmap_scoring::{similarity, CandidateRanker};
use std::collections::BTreeSet;
use tracing::debug;

/// Rationale used when the model gives none
pub const AI_RATIONALE: &str = "ai-assisted";

/// Sub-score placeholder for AI candidates, which carry no breakdown
pub const NEUTRAL_SUB_SCORE: f64 = 0.5;

/// Confidence used when neither the model nor the ranker provides one
pub const DEFAULT_AI_CONFIDENCE: f64 = 0.5;

/// Source type assumed when scoring a bare AI source name
const AI_SOURCE_TYPE: &str = "string";

/// How an AI target reference was resolved
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TargetResolution<'a> {
    /// Reference equals a target's path or name
    Exact(&'a TargetField),

    /// Nearest target by string similarity
    Fuzzy {
        /// Best-matching target
        target: &'a TargetField,
        /// Similarity between the reference and the target path
        similarity: f64,
    },

    /// No targets to resolve against
    Unresolved,
}

impl<'a> TargetResolution<'a> {
    /// The resolved target, if any
    pub fn target(&self) -> Option<&'a TargetField> {
        match *self {
            TargetResolution::Exact(target) | TargetResolution::Fuzzy { target, .. } => Some(target),
            TargetResolution::Unresolved => None,
        }
    }
}

/// Resolve a free-text target reference
///
/// Exact path match wins, then exact name match, then the most similar
/// target, scored by the better of its path and name similarity. The fuzzy
/// step has no floor and keeps the first target on ties.
pub fn resolve_target<'a>(reference: &str, targets: &'a [TargetField]) -> TargetResolution<'a> {
    if let Some(target) = targets.iter().find(|t| t.path == reference) {
        return TargetResolution::Exact(target);
    }
    if let Some(target) = targets.iter().find(|t| t.name == reference) {
        return TargetResolution::Exact(target);
    }

    let mut best: Option<(&TargetField, f64)> = None;
    for target in targets {
        let score = similarity(reference, &target.path).max(similarity(reference, &target.name));
        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((target, score));
        }
    }

    match best {
        Some((target, similarity)) => TargetResolution::Fuzzy { target, similarity },
        None => TargetResolution::Unresolved,
    }
}

/// Confidence in [0, 1] for an AI mapping onto a resolved target
///
/// Uses the model's 0-100 confidence when present, otherwise a rule-based
/// pass over the bare source name.
pub fn ai_confidence(mapping: &AiMapping, target: &TargetField, ranker: &CandidateRanker) -> f64 {
    if let Some(confidence) = mapping.confidence.filter(|c| !c.is_nan()) {
        return confidence.clamp(0.0, 100.0) / 100.0;
    }

    let source = SourceField::new(mapping.source.clone(), AI_SOURCE_TYPE);
    ranker
        .rank(&source, std::slice::from_ref(target))
        .first()
        .map(|candidate| candidate.breakdown.total)
        .unwrap_or(DEFAULT_AI_CONFIDENCE)
}

/// Turn one AI mapping into a candidate, or `None` when it cannot be resolved
pub fn ai_candidate(mapping: &AiMapping, targets: &[TargetField], ranker: &CandidateRanker) -> Option<MappingCandidate> {
    let resolution = resolve_target(&mapping.target, targets);
    if let TargetResolution::Fuzzy { target, similarity } = resolution {
        debug!(
            "AI target '{}' resolved to '{}' by similarity {:.3}",
            mapping.target, target.path, similarity
        );
    }
    let target = resolution.target()?;

    let confidence = clamp_unit(ai_confidence(mapping, target, ranker));
    let breakdown = ConfidenceBreakdown::new(
        confidence,
        NEUTRAL_SUB_SCORE,
        NEUTRAL_SUB_SCORE,
        NEUTRAL_SUB_SCORE,
        confidence,
    );

    let rationale = match &mapping.rationale {
        Some(reasons) if !reasons.is_empty() => reasons.clone(),
        _ => vec![AI_RATIONALE.to_string()],
    };

    Some(MappingCandidate::new(target.clone(), breakdown, rationale))
}

/// Build one suggestion per source field
///
/// Sources with at least one resolvable AI mapping get the AI candidates, in
/// AI output order. Every other source gets a full rule-based pass.
pub fn merge_suggestions(
    sources: &[SourceField],
    targets: &[TargetField],
    ai_mappings: &[AiMapping],
    ranker: &CandidateRanker,
) -> Vec<MappingSuggestion> {
    let known: BTreeSet<&str> = sources.iter().map(|s| s.name.as_str()).collect();
    for mapping in ai_mappings.iter().filter(|m| !known.contains(m.source.as_str())) {
        debug!("Ignoring AI mapping for unknown source '{}'", mapping.source);
    }

    sources
        .iter()
        .map(|source| {
            let ai_candidates: Vec<MappingCandidate> = ai_mappings
                .iter()
                .filter(|m| m.source == source.name)
                .filter_map(|m| ai_candidate(m, targets, ranker))
                .collect();

            let suggestions = if ai_candidates.is_empty() {
                ranker.rank(source, targets)
            } else {
                ai_candidates
            };

            MappingSuggestion {
                source: source.clone(),
                suggestions,
            }
        })
        .collect()
}

/// Count of sources whose suggestions came from the AI
pub fn ai_covered_sources(sources: &[SourceField], ai_mappings: &[AiMapping]) -> usize {
    sources
        .iter()
        .filter(|s| ai_mappings.iter().any(|m| m.source == s.name))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldmap_domain::ConfidenceStatus;

    fn targets() -> Vec<TargetField> {
        vec![
            TargetField::new("email", "billTo.email", "string", "order"),
            TargetField::new("sku", "product.sku", "string", "product"),
            TargetField::new("total", "summary.total", "number", "order"),
        ]
    }

    fn ai(source: &str, target: &str, confidence: Option<f64>) -> AiMapping {
        AiMapping {
            source: source.to_string(),
            target: target.to_string(),
            confidence,
            rationale: None,
        }
    }

    #[test]
    fn test_resolve_by_path() {
        let targets = targets();
        assert_eq!(resolve_target("product.sku", &targets), TargetResolution::Exact(&targets[1]));
    }

    #[test]
    fn test_resolve_by_name() {
        let targets = targets();
        assert_eq!(resolve_target("total", &targets), TargetResolution::Exact(&targets[2]));
    }

    #[test]
    fn test_resolve_fuzzy_without_floor() {
        let targets = targets();
        match resolve_target("billto.emial", &targets) {
            TargetResolution::Fuzzy { target, similarity } => {
                assert_eq!(target.path, "billTo.email");
                assert!(similarity > 0.5);
            }
            other => panic!("expected fuzzy resolution, got {:?}", other),
        }

        // Even a hopeless reference resolves to something
        assert!(resolve_target("zzzzzzzzzzzzzzzzzz", &targets).target().is_some());
    }

    #[test]
    fn test_resolve_fuzzy_considers_name() {
        let targets = vec![
            TargetField::new("mail", "mail", "string", "order"),
            TargetField::new("email", "billTo.contact.email", "string", "order"),
        ];
        match resolve_target("emails", &targets) {
            TargetResolution::Fuzzy { target, similarity } => {
                assert_eq!(target.path, "billTo.contact.email");
                assert!((similarity - 5.0 / 6.0).abs() < 1e-9);
            }
            other => panic!("expected fuzzy resolution, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_fuzzy_tie_keeps_first() {
        let targets = vec![
            TargetField::new("ab", "x.ab", "string", "order"),
            TargetField::new("ab", "y.ab", "string", "order"),
        ];
        assert_eq!(resolve_target("abc", &targets).target().map(|t| t.path.as_str()), Some("x.ab"));
    }

    #[test]
    fn test_resolve_empty_targets() {
        assert_eq!(resolve_target("anything", &[]), TargetResolution::Unresolved);
    }

    #[test]
    fn test_ai_confidence_scaled_and_clamped() {
        let targets = targets();
        let ranker = CandidateRanker::default();
        assert_eq!(ai_confidence(&ai("sku", "sku", Some(92.0)), &targets[1], &ranker), 0.92);
        assert_eq!(ai_confidence(&ai("sku", "sku", Some(150.0)), &targets[1], &ranker), 1.0);
        assert_eq!(ai_confidence(&ai("sku", "sku", Some(-5.0)), &targets[1], &ranker), 0.0);
    }

    #[test]
    fn test_ai_confidence_backfilled_by_ranker() {
        let targets = targets();
        let ranker = CandidateRanker::default();
        let mapping = ai("customer_email", "billTo.email", None);

        let expected = ranker
            .breakdown(&SourceField::new("customer_email", "string"), &targets[0])
            .total;
        assert_eq!(ai_confidence(&mapping, &targets[0], &ranker), expected);
    }

    #[test]
    fn test_ai_candidate_shape() {
        let targets = targets();
        let candidate = ai_candidate(&ai("sku", "product.sku", Some(85.0)), &targets, &CandidateRanker::default()).unwrap();

        assert_eq!(candidate.target.path, "product.sku");
        assert_eq!(candidate.breakdown.name, 0.85);
        assert_eq!(candidate.breakdown.total, 0.85);
        assert_eq!(candidate.breakdown.type_score, NEUTRAL_SUB_SCORE);
        assert_eq!(candidate.breakdown.semantic, NEUTRAL_SUB_SCORE);
        assert_eq!(candidate.breakdown.structural, NEUTRAL_SUB_SCORE);
        assert_eq!(candidate.status, ConfidenceStatus::High);
        assert_eq!(candidate.rationale, vec![AI_RATIONALE]);
    }

    #[test]
    fn test_ai_rationale_kept_when_present() {
        let targets = targets();
        let mut mapping = ai("sku", "product.sku", Some(60.0));
        mapping.rationale = Some(vec!["identical names".to_string()]);
        let candidate = ai_candidate(&mapping, &targets, &CandidateRanker::default()).unwrap();
        assert_eq!(candidate.rationale, vec!["identical names"]);
        assert_eq!(candidate.status, ConfidenceStatus::Medium);

        mapping.rationale = Some(vec![]);
        let candidate = ai_candidate(&mapping, &targets, &CandidateRanker::default()).unwrap();
        assert_eq!(candidate.rationale, vec![AI_RATIONALE]);
    }

    #[test]
    fn test_merge_accumulates_and_falls_back() {
        let targets = targets();
        let sources = vec![
            SourceField::new("customer_email", "string"),
            SourceField::new("order_total", "number"),
        ];
        let ai_mappings = vec![
            ai("customer_email", "billTo.email", Some(90.0)),
            ai("customer_email", "email", Some(40.0)),
            ai("ghost_field", "product.sku", Some(99.0)),
        ];

        let merged = merge_suggestions(&sources, &targets, &ai_mappings, &CandidateRanker::default());

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].source.name, "customer_email");
        assert_eq!(merged[0].suggestions.len(), 2);
        assert_eq!(merged[0].suggestions[0].breakdown.total, 0.9);
        assert_eq!(merged[0].suggestions[1].breakdown.total, 0.4);

        // Uncovered source gets the full rule-based cross product
        assert_eq!(merged[1].source.name, "order_total");
        assert_eq!(merged[1].suggestions.len(), targets.len());
        assert_ne!(merged[1].suggestions[0].rationale, vec![AI_RATIONALE]);

        assert_eq!(ai_covered_sources(&sources, &ai_mappings), 1);
    }

    #[test]
    fn test_merge_without_ai_is_rule_based() {
        let targets = targets();
        let sources = vec![SourceField::new("sku", "string")];
        let merged = merge_suggestions(&sources, &targets, &[], &CandidateRanker::default());
        assert_eq!(merged[0].suggestions.len(), 3);
    }
}
