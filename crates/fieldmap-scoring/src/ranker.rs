//! Candidate ranking: one scored candidate per target field
//!
//! Combines the name, type, semantic and structural scorers into a
//! [`ConfidenceBreakdown`], derives the status tier and builds the rationale.

use crate::normalize::name_variants;
use crate::semantic::tag_overlap;
use crate::similarity::similarity;
use crate::structural::structural_score;
use crate::types::type_compatibility;
use crate::weights::ScoringWeights;
use fieldmap_domain::{ConfidenceBreakdown, MappingCandidate, SourceField, TargetField};
use std::cmp::Ordering;

/// Rationale emitted when no scoring signal qualifies
pub const FALLBACK_RATIONALE: &str = "rule-based fallback";

/// Name score threshold for "strong name match"
pub const NAME_SIGNAL: f64 = 0.7;

/// Type score threshold for "type compatible"
pub const TYPE_SIGNAL: f64 = 0.7;

/// Semantic score threshold for "semantic tags aligned"
pub const SEMANTIC_SIGNAL: f64 = 0.5;

/// Structural score threshold for "similar depth"
pub const STRUCTURAL_SIGNAL: f64 = 0.7;

/// Best similarity between two names across all their lexical variants
///
/// Considers raw vs raw, every source variant vs the raw target, and every
/// source variant vs every target variant.
pub fn name_score(source: &str, target: &str) -> f64 {
    let source_variants = name_variants(source);
    let target_variants = name_variants(target);

    let mut best = similarity(source, target);
    for sv in &source_variants {
        best = best.max(similarity(sv, target));
        for tv in &target_variants {
            best = best.max(similarity(sv, tv));
        }
    }
    best
}

/// Unrounded sub-scores of one pair
///
/// Rationale thresholds apply to these values; only the emitted
/// [`ConfidenceBreakdown`] is rounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubScores {
    /// Name similarity
    pub name: f64,
    /// Type compatibility
    pub type_score: f64,
    /// Semantic tag overlap
    pub semantic: f64,
    /// Depth similarity
    pub structural: f64,
}

/// Rationale for a set of sub-scores, evaluated in a fixed order
///
/// Never empty: falls back to [`FALLBACK_RATIONALE`] when no signal fires.
pub fn build_rationale(scores: &SubScores) -> Vec<String> {
    let signals = [
        (scores.name >= NAME_SIGNAL, "strong name match"),
        (scores.type_score >= TYPE_SIGNAL, "type compatible"),
        (scores.semantic >= SEMANTIC_SIGNAL, "semantic tags aligned"),
        (scores.structural >= STRUCTURAL_SIGNAL, "similar depth"),
    ];

    let fired: Vec<String> = signals
        .iter()
        .filter(|(fires, _)| *fires)
        .map(|(_, label)| label.to_string())
        .collect();

    if fired.is_empty() {
        vec![FALLBACK_RATIONALE.to_string()]
    } else {
        fired
    }
}

/// Scores source fields against target fields
#[derive(Debug, Clone, Copy, Default)]
pub struct CandidateRanker {
    weights: ScoringWeights,
}

impl CandidateRanker {
    /// Create a ranker with the given weights
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    /// The weights this ranker applies
    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Raw sub-scores of one (source, target) pair
    pub fn sub_scores(&self, source: &SourceField, target: &TargetField) -> SubScores {
        SubScores {
            name: name_score(&source.name, &target.name),
            type_score: type_compatibility(&source.field_type, &target.field_type),
            semantic: tag_overlap(source.tags(), target.tags()),
            structural: structural_score(source, target),
        }
    }

    /// Score one (source, target) pair
    pub fn breakdown(&self, source: &SourceField, target: &TargetField) -> ConfidenceBreakdown {
        self.to_breakdown(&self.sub_scores(source, target))
    }

    fn to_breakdown(&self, s: &SubScores) -> ConfidenceBreakdown {
        let total = self.weights.combine(s.name, s.type_score, s.semantic, s.structural);
        ConfidenceBreakdown::new(s.name, s.type_score, s.semantic, s.structural, total)
    }

    /// Score one (source, target) pair into a candidate
    pub fn score(&self, source: &SourceField, target: &TargetField) -> MappingCandidate {
        let scores = self.sub_scores(source, target);
        let rationale = build_rationale(&scores);
        MappingCandidate::new(target.clone(), self.to_breakdown(&scores), rationale)
    }

    /// One candidate per target, in target order
    pub fn rank(&self, source: &SourceField, targets: &[TargetField]) -> Vec<MappingCandidate> {
        targets.iter().map(|target| self.score(source, target)).collect()
    }

    /// Same candidates as [`rank`](Self::rank), sorted by total (highest first)
    ///
    /// The sort is stable, so equal totals keep target order.
    pub fn rank_sorted(&self, source: &SourceField, targets: &[TargetField]) -> Vec<MappingCandidate> {
        let mut candidates = self.rank(source, targets);
        candidates.sort_by(|a, b| {
            b.breakdown
                .total
                .partial_cmp(&a.breakdown.total)
                .unwrap_or(Ordering::Equal)
        });
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldmap_domain::ConfidenceStatus;

    #[test]
    fn test_name_score_ignores_convention() {
        assert_eq!(name_score("customer_email", "customerEmail"), 1.0);
        assert_eq!(name_score("order-id", "ORDER_ID"), 1.0);
    }

    #[test]
    fn test_name_score_partial() {
        let score = name_score("customer_email", "email");
        assert!(score > 0.3 && score < 1.0, "got {}", score);
    }

    fn scores(name: f64, type_score: f64, semantic: f64, structural: f64) -> SubScores {
        SubScores {
            name,
            type_score,
            semantic,
            structural,
        }
    }

    #[test]
    fn test_rationale_order_is_fixed() {
        assert_eq!(
            build_rationale(&scores(0.9, 0.9, 0.9, 0.9)),
            vec![
                "strong name match",
                "type compatible",
                "semantic tags aligned",
                "similar depth",
            ]
        );
    }

    #[test]
    fn test_rationale_thresholds_are_inclusive() {
        assert_eq!(
            build_rationale(&scores(0.7, 0.69, 0.5, 0.0)),
            vec!["strong name match", "semantic tags aligned"]
        );
    }

    #[test]
    fn test_rationale_uses_unrounded_scores() {
        let raw = scores(0.6996, 0.6996, 0.4999, 0.6996);
        assert_eq!(build_rationale(&raw), vec![FALLBACK_RATIONALE]);

        let breakdown = ConfidenceBreakdown::new(raw.name, raw.type_score, raw.semantic, raw.structural, 0.5);
        assert_eq!(breakdown.name, 0.7);
        assert_eq!(breakdown.semantic, 0.5);
    }

    #[test]
    fn test_rationale_fallback() {
        assert_eq!(build_rationale(&scores(0.1, 0.25, 0.0, 0.4)), vec![FALLBACK_RATIONALE]);
    }

    #[test]
    fn test_custom_weights_change_total() {
        let source = SourceField::new("sku", "boolean");
        let target = TargetField::new("sku", "sku", "string", "product");

        let default_total = CandidateRanker::default().breakdown(&source, &target).total;
        let name_only = CandidateRanker::new(ScoringWeights::new(1.0, 0.0, 0.0, 0.0).unwrap());
        assert_eq!(name_only.breakdown(&source, &target).total, 1.0);
        assert!(default_total < 1.0);
    }

    #[test]
    fn test_total_is_clamped_with_heavy_weights() {
        let source = SourceField::new("sku", "string").with_tags(["identifier"]);
        let target = TargetField::new("sku", "sku", "string", "product").with_tags(["identifier"]);
        let ranker = CandidateRanker::new(ScoringWeights::new(1.0, 1.0, 1.0, 1.0).unwrap());
        let candidate = ranker.score(&source, &target);
        assert_eq!(candidate.breakdown.total, 1.0);
        assert_eq!(candidate.status, ConfidenceStatus::High);
    }

    #[test]
    fn test_rank_sorted_orders_by_total() {
        let source = SourceField::new("email", "string");
        let targets = vec![
            TargetField::new("created", "meta.created", "datetime", "order"),
            TargetField::new("email", "email", "string", "order"),
        ];
        let ranker = CandidateRanker::default();

        let unsorted = ranker.rank(&source, &targets);
        assert_eq!(unsorted[0].target.name, "created");

        let sorted = ranker.rank_sorted(&source, &targets);
        assert_eq!(sorted[0].target.name, "email");
        assert!(sorted[0].breakdown.total >= sorted[1].breakdown.total);
    }
}
