//! End-to-end flow over a real data directory: build -> save -> load ->
//! classify -> export, the way the CLI drives the library.

use std::fs;
use std::path::PathBuf;

use sign_match::builder::{build_template, MAX_RETAINED_FRAMES};
use sign_match::export::export_dataset;
use sign_match::matcher::classify_frame;
use sign_match::store::TemplateStore;
use sign_match::types::{LandmarkFrame, LandmarkPoint, HAND_POINT_COUNT, POSE_POINT_COUNT};

fn temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("sign_match_flow_{}_{}", tag, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    dir
}

/// A full 33-point pose frame with every coordinate offset by `shift`.
fn pose_frame(shift: f64) -> LandmarkFrame {
    (0..POSE_POINT_COUNT)
        .map(|i| LandmarkPoint {
            id: i as u32,
            x: (i as f64 / POSE_POINT_COUNT as f64 + shift).min(1.0),
            y: (i as f64 / POSE_POINT_COUNT as f64) * 0.5 + shift,
            z: shift * 0.1,
            visibility: Some(0.9),
        })
        .collect()
}

#[test]
fn saved_templates_classify_their_own_average() {
    let dir = temp_dir("roundtrip");
    let writer = TemplateStore::new(&dir);

    // Two distinct signs, each averaged from a few noisy-ish captures
    let hello_frames = vec![pose_frame(0.00), pose_frame(0.02), pose_frame(0.04)];
    let thanks_frames = vec![pose_frame(0.40), pose_frame(0.42)];
    writer.save("Hello", "video://hello", &build_template(&hello_frames)).unwrap();
    writer.save("Thanks", "video://thanks", &build_template(&thanks_frames)).unwrap();

    // Fresh store simulates a new process reading what was persisted
    let reader = TemplateStore::new(&dir);
    assert_eq!(reader.len(), 2);

    let hello_avg = reader.lookup("HELLO").expect("case-insensitive lookup").average.clone();
    let result = classify_frame(&reader, &hello_avg).expect("must match something");
    assert_eq!(result.label, "hello");
    assert!(result.score < 1e-9, "own average should score ~0, got {}", result.score);

    // A frame near the thanks cluster goes to thanks
    let near_thanks = pose_frame(0.41);
    let result = classify_frame(&reader, &near_thanks).unwrap();
    assert_eq!(result.label, "thanks");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn hand_frame_never_matches_pose_templates() {
    let dir = temp_dir("gate");
    let writer = TemplateStore::new(&dir);
    writer.save("hello", "v", &build_template(&[pose_frame(0.0)])).unwrap();

    let reader = TemplateStore::new(&dir);
    let hand_frame: LandmarkFrame = (0..HAND_POINT_COUNT)
        .map(|i| LandmarkPoint { id: i as u32, x: 0.5, y: 0.5, z: 0.0, visibility: None })
        .collect();
    assert!(classify_frame(&reader, &hand_frame).is_none());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn long_capture_run_is_bounded_and_exportable() {
    let dir = temp_dir("export");
    let writer = TemplateStore::new(&dir);

    let long_run: Vec<LandmarkFrame> = (0..80).map(|i| pose_frame(i as f64 * 0.001)).collect();
    writer.save("wave", "video://wave", &build_template(&long_run)).unwrap();

    let reader = TemplateStore::new(&dir);
    let record = reader.lookup("wave").unwrap();
    assert_eq!(record.frames_sampled, 80);
    assert_eq!(record.frames.len(), MAX_RETAINED_FRAMES);

    let out = dir.join("dataset.json");
    let rows = export_dataset(&reader, &out, Some(20)).unwrap();
    assert_eq!(rows, 20);

    let rows = export_dataset(&reader, &out, None).unwrap();
    assert_eq!(rows, MAX_RETAINED_FRAMES);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn record_file_layout_matches_extractor_convention() {
    let dir = temp_dir("layout");
    let writer = TemplateStore::new(&dir);
    writer.save("MySign", "video://x", &build_template(&[pose_frame(0.0)])).unwrap();

    let path = dir.join("mysign_landmarks.json");
    assert!(path.exists(), "file name must be <lowercased-label>_landmarks.json");

    let payload: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(payload["sign"], "MySign");
    assert_eq!(payload["alias"], "mysign");
    assert_eq!(payload["frames_sampled"], 1);
    assert!(payload["average"].is_array());
    assert!(payload["frames"].is_array());

    let _ = fs::remove_dir_all(&dir);
}
