use crate::types::{LandmarkFrame, LandmarkPoint, PoseLandmark};

/// Vertical slack below the nose within which a wrist still counts as
/// raised. Coordinate origin is top-left, so lower y means higher in frame.
pub const RAISE_MARGIN: f64 = 0.15;
/// Minimum detector confidence for a wrist to participate in the rules.
pub const VISIBILITY_THRESHOLD: f64 = 0.2;

/// Tunable rule thresholds; defaults match the shipped behavior.
#[derive(Debug, Clone, Copy)]
pub struct GestureThresholds {
    pub raise_margin: f64,
    pub visibility_threshold: f64,
}

impl Default for GestureThresholds {
    fn default() -> Self {
        Self {
            raise_margin: RAISE_MARGIN,
            visibility_threshold: VISIBILITY_THRESHOLD,
        }
    }
}

/// The canned greetings the rule engine can recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    BothHandsGreeting,
    LeftHandGreeting,
    RightHandGreeting,
}

impl Gesture {
    pub fn message(self) -> &'static str {
        match self {
            Gesture::BothHandsGreeting => "Greeting you with both hands raised!",
            Gesture::LeftHandGreeting => "Waved hello with the left hand.",
            Gesture::RightHandGreeting => "Waved hello with the right hand.",
        }
    }
}

/// Evaluate the wrist-greeting rules on one pose frame with the default
/// thresholds. Purely geometric: never consults the template store.
pub fn detect_gesture(frame: &LandmarkFrame) -> Option<Gesture> {
    detect_gesture_with(frame, GestureThresholds::default())
}

/// Rule order matters: both wrists raised wins over either single-hand rule,
/// which would otherwise also fire. Returns `None` when neither wrist is
/// raised or when the frame lacks the nose/wrist points; the caller
/// substitutes its generic fallback greeting.
pub fn detect_gesture_with(frame: &LandmarkFrame, thresholds: GestureThresholds) -> Option<Gesture> {
    let nose = PoseLandmark::Nose.find(frame)?;
    let left_wrist = PoseLandmark::LeftWrist.find(frame)?;
    let right_wrist = PoseLandmark::RightWrist.find(frame)?;

    let left_up = wrist_raised(left_wrist, nose.y, thresholds);
    let right_up = wrist_raised(right_wrist, nose.y, thresholds);

    if left_up && right_up {
        return Some(Gesture::BothHandsGreeting);
    }
    if left_up {
        return Some(Gesture::LeftHandGreeting);
    }
    if right_up {
        return Some(Gesture::RightHandGreeting);
    }
    None
}

fn wrist_raised(wrist: &LandmarkPoint, nose_y: f64, thresholds: GestureThresholds) -> bool {
    // Strict comparisons: exactly at the margin or threshold does not count
    wrist.y < nose_y + thresholds.raise_margin
        && wrist.visibility.unwrap_or(0.0) > thresholds.visibility_threshold
}
