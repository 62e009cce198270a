//! Nesting depth comparison between source and target fields

use fieldmap_domain::{SourceField, TargetField};

/// Score lost per level of depth difference
pub const DEPTH_PENALTY: f64 = 0.15;

/// Number of dot-separated segments in a path
pub fn path_depth(path: &str) -> u32 {
    path.split('.').count() as u32
}

/// Depth of a source field: segments of its path, else of its name
pub fn source_depth(source: &SourceField) -> u32 {
    path_depth(source.structural_path())
}

/// Depth of a target field: declared depth, else segments of its path
pub fn target_depth(target: &TargetField) -> u32 {
    target.depth.unwrap_or_else(|| path_depth(&target.path))
}

/// `max(0, 1 - 0.15 * |source depth - target depth|)`
pub fn structural_score(source: &SourceField, target: &TargetField) -> f64 {
    let diff = source_depth(source).abs_diff(target_depth(target));
    (1.0 - DEPTH_PENALTY * f64::from(diff)).max(0.0)
}
