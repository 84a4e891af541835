use std::collections::HashMap;

use crate::types::{LandmarkFrame, LandmarkPoint};

/// Cap on raw frames kept alongside the average. This is a storage-size
/// limit, not a sampling strategy: we keep the first N and drop the rest.
pub const MAX_RETAINED_FRAMES: usize = 50;

/// Output of reducing one sign's capture run.
#[derive(Debug, Clone)]
pub struct BuiltTemplate {
    pub average: LandmarkFrame,
    /// First `MAX_RETAINED_FRAMES` input frames, in capture order
    pub retained: Vec<LandmarkFrame>,
    /// Total frames averaged (can exceed `retained.len()`)
    pub frames_sampled: usize,
}

/// Average many captured frames into one representative frame.
///
/// For each point id, the (x, y, z) vectors are summed across all frames and
/// divided by the total frame count. A point id missing from some frames is
/// still divided by the total count, not its presence count, matching the
/// accumulate-into-fixed-array behavior of the original extractor. Id order
/// in the output is first-seen order. Zero input frames yield an empty frame.
pub fn average_frames(frames: &[LandmarkFrame]) -> LandmarkFrame {
    if frames.is_empty() {
        return Vec::new();
    }

    let mut order: Vec<u32> = Vec::new();
    let mut accum: HashMap<u32, [f64; 3]> = HashMap::new();

    for frame in frames {
        for point in frame {
            let slot = accum.entry(point.id).or_insert_with(|| {
                order.push(point.id);
                [0.0; 3]
            });
            slot[0] += point.x;
            slot[1] += point.y;
            slot[2] += point.z;
        }
    }

    let count = frames.len() as f64;
    order
        .iter()
        .map(|id| {
            let sum = accum[id];
            LandmarkPoint {
                id: *id,
                x: sum[0] / count,
                y: sum[1] / count,
                z: sum[2] / count,
                visibility: None,
            }
        })
        .collect()
}

/// Reduce a capture run to its template: the average plus the retained
/// raw-frame sample. Pure function; persistence is the store's job.
pub fn build_template(frames: &[LandmarkFrame]) -> BuiltTemplate {
    let retained: Vec<LandmarkFrame> = frames
        .iter()
        .take(MAX_RETAINED_FRAMES)
        .cloned()
        .collect();

    BuiltTemplate {
        average: average_frames(frames),
        retained,
        frames_sampled: frames.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(id: u32, x: f64, y: f64, z: f64) -> LandmarkPoint {
        LandmarkPoint { id, x, y, z, visibility: None }
    }

    #[test]
    fn average_is_per_axis_mean() {
        let frames = vec![
            vec![point(0, 0.1, 0.2, 0.3), point(1, 0.5, 0.5, 0.0)],
            vec![point(0, 0.3, 0.4, 0.1), point(1, 0.7, 0.9, 0.2)],
        ];
        let avg = average_frames(&frames);
        assert_eq!(avg.len(), 2);
        assert!((avg[0].x - 0.2).abs() < 1e-12);
        assert!((avg[0].y - 0.3).abs() < 1e-12);
        assert!((avg[0].z - 0.2).abs() < 1e-12);
        assert!((avg[1].x - 0.6).abs() < 1e-12);
        assert!((avg[1].y - 0.7).abs() < 1e-12);
        assert!((avg[1].z - 0.1).abs() < 1e-12);
    }

    #[test]
    fn empty_input_yields_empty_template() {
        assert!(average_frames(&[]).is_empty());
        let built = build_template(&[]);
        assert!(built.average.is_empty());
        assert!(built.retained.is_empty());
        assert_eq!(built.frames_sampled, 0);
    }

    #[test]
    fn missing_point_divides_by_total_frame_count() {
        // id 1 appears in only one of two frames; its average still divides
        // by 2, as if the missing frame contributed (0,0,0).
        let frames = vec![
            vec![point(0, 0.2, 0.2, 0.0), point(1, 0.8, 0.4, 0.0)],
            vec![point(0, 0.4, 0.4, 0.0)],
        ];
        let avg = average_frames(&frames);
        assert_eq!(avg.len(), 2);
        assert!((avg[1].x - 0.4).abs() < 1e-12);
        assert!((avg[1].y - 0.2).abs() < 1e-12);
    }

    #[test]
    fn retains_first_fifty_frames_only() {
        let frames: Vec<LandmarkFrame> = (0..60)
            .map(|i| vec![point(0, i as f64, 0.0, 0.0)])
            .collect();
        let built = build_template(&frames);
        assert_eq!(built.retained.len(), MAX_RETAINED_FRAMES);
        assert_eq!(built.frames_sampled, 60);
        // First-N truncation, not sampling
        assert_eq!(built.retained[0][0].x, 0.0);
        assert_eq!(built.retained[49][0].x, 49.0);
    }

    #[test]
    fn id_order_is_first_seen() {
        let frames = vec![vec![point(5, 0.0, 0.0, 0.0), point(2, 0.0, 0.0, 0.0)]];
        let avg = average_frames(&frames);
        assert_eq!(avg[0].id, 5);
        assert_eq!(avg[1].id, 2);
    }
}
