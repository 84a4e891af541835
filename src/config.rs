use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::gesture::{GestureThresholds, RAISE_MARGIN, VISIBILITY_THRESHOLD};

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory the template records live in
    pub data_dir: String,
    pub gesture: GestureConfig,
    /// Reply used when neither the rules nor the matcher produce anything
    pub fallback_message: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    pub raise_margin: f64,
    pub visibility_threshold: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
            gesture: GestureConfig::default(),
            fallback_message: "Hello! Nice to see you.".to_string(),
        }
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            raise_margin: RAISE_MARGIN,
            visibility_threshold: VISIBILITY_THRESHOLD,
        }
    }
}

impl GestureConfig {
    pub fn thresholds(&self) -> GestureThresholds {
        GestureThresholds {
            raise_margin: self.raise_margin,
            visibility_threshold: self.visibility_threshold,
        }
    }
}

impl AppConfig {
    const PATH: &'static str = "config.json";

    pub fn load() -> Result<Self> {
        let config = if Path::new(Self::PATH).exists() {
            let content = fs::read_to_string(Self::PATH)?;
            // Missing fields fall back to defaults via #[serde(default)]
            match serde_json::from_str::<AppConfig>(&content) {
                Ok(c) => c,
                Err(e) => {
                    println!("Error parsing config: {}. Loading defaults.", e);
                    Self::default()
                }
            }
        } else {
            Self::default()
        };

        // Save back so new fields show up in the file
        config.save()?;

        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(Self::PATH, content)?;
        Ok(())
    }
}
