use crate::store::TemplateStore;
use crate::types::{LandmarkFrame, LandmarkPoint};

/// Winning label plus its mean per-point distance.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub label: String,
    pub score: f64,
}

/// Euclidean distance between two keypoints over (x, y, z).
pub fn point_distance(a: &LandmarkPoint, b: &LandmarkPoint) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    let dz = a.z - b.z;
    (dx * dx + dy * dy + dz * dz).sqrt()
}

/// Mean per-point distance between two equal-length frames.
///
/// Points are paired by positional index, not by id. Both sequences must be
/// built in the same canonical detector order upstream or the score is
/// meaningless; this is a caller precondition, not something validated here.
pub fn frame_distance(live: &[LandmarkPoint], template: &[LandmarkPoint]) -> f64 {
    debug_assert_eq!(live.len(), template.len());
    let total: f64 = live
        .iter()
        .zip(template)
        .map(|(a, b)| point_distance(a, b))
        .sum();
    total / template.len() as f64
}

/// Nearest-centroid classification of a live frame against every stored
/// template average.
///
/// A template is only considered when its point count equals the live
/// frame's (a mismatch is a silent skip, never an error). The strictly
/// lowest mean distance wins; ties keep the first template seen in store
/// order. Returns `None` when the store is empty, the live frame is empty,
/// or no template is compatible.
pub fn classify_frame(store: &TemplateStore, live: &LandmarkFrame) -> Option<MatchResult> {
    if live.is_empty() {
        return None;
    }

    let mut best: Option<MatchResult> = None;
    for template in store.templates() {
        if template.average.len() != live.len() {
            continue;
        }
        let score = frame_distance(live, &template.average);
        let is_better = match &best {
            Some(current) => score < current.score,
            None => true,
        };
        if is_better {
            best = Some(MatchResult { label: template.alias.clone(), score });
        }
    }
    best
}
