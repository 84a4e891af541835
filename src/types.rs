use serde::{Deserialize, Serialize};

/// Points produced per frame by the full-body pose detector
pub const POSE_POINT_COUNT: usize = 33;
/// Points produced per frame by the single-hand detector
pub const HAND_POINT_COUNT: usize = 21;

/// A single tracked keypoint.
///
/// `x` and `y` are normalized to [0,1] relative to the image dimensions,
/// `z` is relative depth (unscaled). Some detectors omit `z` and/or the
/// visibility score; a missing `z` deserializes as 0.0 so it contributes
/// nothing to distance on that axis.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct LandmarkPoint {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
    /// Detector confidence in [0,1]; absent for hand landmarks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f64>,
}

/// One detector output: an ordered sequence of keypoints captured at one
/// instant. Length is fixed per detector mode (33 for pose, 21 for hand).
pub type LandmarkFrame = Vec<LandmarkPoint>;

/// Semantic roles for the pose landmarks the gesture rules care about,
/// mapped to the detector's point-id scheme (MediaPipe Pose indices).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoseLandmark {
    Nose,
    LeftWrist,
    RightWrist,
}

impl PoseLandmark {
    pub fn point_id(self) -> u32 {
        match self {
            PoseLandmark::Nose => 0,
            PoseLandmark::LeftWrist => 15,
            PoseLandmark::RightWrist => 16,
        }
    }

    /// Find this role's point in a frame by its id field.
    pub fn find(self, frame: &[LandmarkPoint]) -> Option<&LandmarkPoint> {
        let id = self.point_id();
        frame.iter().find(|p| p.id == id)
    }
}

/// Persisted record for one sign: the averaged template plus a bounded
/// sample of the raw frames it was built from.
///
/// Field names match the JSON layout written by the original landmark
/// extractor, so existing `*_landmarks.json` files load as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignTemplate {
    /// Label as given at extraction time (original casing)
    pub sign: String,
    /// Lowercased lookup key; older files may omit it, see TemplateStore
    #[serde(default)]
    pub alias: String,
    /// Source video reference the frames were captured from
    #[serde(default)]
    pub video: String,
    /// Total frames that went into the average (may exceed `frames.len()`)
    pub frames_sampled: usize,
    /// The averaged point set, one entry per point id
    pub average: LandmarkFrame,
    /// First N raw frames, kept for dataset export
    #[serde(default)]
    pub frames: Vec<LandmarkFrame>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extracted_at: Option<String>,
}
