use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::*;
use std::fs::File;
use std::path::Path;

use sign_match::args::{Args, Command};
use sign_match::builder::build_template;
use sign_match::config::AppConfig;
use sign_match::export::{export_dataset, DEFAULT_FRAME_LIMIT};
use sign_match::gesture::detect_gesture_with;
use sign_match::matcher::classify_frame;
use sign_match::store::TemplateStore;
use sign_match::types::LandmarkFrame;

fn main() -> Result<()> {
    let args = Args::parse();

    // 0. Load Config
    let mut config = AppConfig::load()?;
    if let Some(dir) = args.data_dir {
        config.data_dir = dir;
    }

    // 1. Open the template store (lazy; no I/O until first lookup)
    let store = TemplateStore::new(&config.data_dir);

    match args.command {
        Command::Build { sign, video, frames, max_frames } => {
            let mut captured: Vec<LandmarkFrame> = read_json(&frames)?;
            if let Some(limit) = max_frames {
                captured.truncate(limit);
            }
            if captured.is_empty() {
                bail!("No landmarks in {}; check the capture or detection thresholds", frames.display());
            }

            let built = build_template(&captured);
            let out_path = store.save(&sign, &video, &built)?;
            println!(
                "{}",
                format!(
                    "Saved landmark data to {} ({} frames averaged, {} retained)",
                    out_path.display(),
                    built.frames_sampled,
                    built.retained.len()
                )
                .green()
            );
        }

        Command::Classify { frame } => {
            let live: LandmarkFrame = read_json(&frame)?;
            match classify_frame(&store, &live) {
                Some(result) => println!(
                    "{}",
                    format!("Matched sign: {} (mean distance {:.4})", result.label, result.score).green()
                ),
                None => println!("{}", "No matching sign.".yellow()),
            }
        }

        Command::Gesture { frame } => {
            let live: LandmarkFrame = read_json(&frame)?;
            match detect_gesture_with(&live, config.gesture.thresholds()) {
                Some(gesture) => println!("{}", gesture.message().green()),
                None => println!("{}", config.fallback_message),
            }
        }

        Command::Show { sign } => match store.lookup(&sign) {
            Some(record) => println!("{}", serde_json::to_string_pretty(record)?),
            None => println!("{}", format!("Sign landmarks not found: {}", sign).yellow()),
        },

        Command::Export { out, limit_frames } => {
            let limit = match limit_frames {
                Some(0) => None,
                Some(n) => Some(n),
                None => Some(DEFAULT_FRAME_LIMIT),
            };
            let count = export_dataset(&store, &out, limit)?;
            println!(
                "{}",
                format!("Exported {} samples to {}", count, out.display()).green()
            );
        }
    }

    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    serde_json::from_reader(file).with_context(|| format!("Failed to parse {}", path.display()))
}
