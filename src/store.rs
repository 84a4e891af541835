use std::collections::HashMap;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use chrono::Local;

use crate::builder::BuiltTemplate;
use crate::types::SignTemplate;

/// File suffix every persisted template record carries; discovery is a
/// directory scan for this pattern.
pub const TEMPLATE_SUFFIX: &str = "_landmarks.json";

/// Durable mapping from sign label (case-insensitive) to its template record.
///
/// Records live as one JSON file per sign under `data_dir`, named
/// `<lowercased-label>_landmarks.json`, so two labels differing only in case
/// overwrite the same record. The in-memory index is populated lazily on
/// first lookup and never invalidated within a process lifetime; templates
/// written by another process after that point need a restart to show up.
pub struct TemplateStore {
    data_dir: PathBuf,
    index: OnceLock<TemplateIndex>,
}

struct TemplateIndex {
    /// Aliases in directory-scan order; tie-breaks in the matcher follow
    /// this order, which is filesystem-dependent and not stable across runs
    order: Vec<String>,
    by_alias: HashMap<String, SignTemplate>,
}

impl TemplateStore {
    /// Create a store over a data directory. No I/O happens until the first
    /// lookup or save.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            index: OnceLock::new(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Persist one sign's built template. The storage key is the lowercased
    /// label; a record for the same alias is overwritten whole. Returns the
    /// written file path.
    ///
    /// Note this does not touch an already-populated in-memory index:
    /// regeneration is an offline step and readers pick the record up on
    /// their next process start.
    pub fn save(&self, sign: &str, video: &str, built: &BuiltTemplate) -> Result<PathBuf> {
        let alias = sign.to_lowercase();
        let record = SignTemplate {
            sign: sign.to_string(),
            alias: alias.clone(),
            video: video.to_string(),
            frames_sampled: built.frames_sampled,
            average: built.average.clone(),
            frames: built.retained.clone(),
            extracted_at: Some(Local::now().to_rfc3339()),
        };

        if !self.data_dir.exists() {
            fs::create_dir_all(&self.data_dir)
                .with_context(|| format!("Failed to create data dir {}", self.data_dir.display()))?;
        }

        let out_path = self.data_dir.join(format!("{}{}", alias, TEMPLATE_SUFFIX));
        let file = File::create(&out_path)
            .with_context(|| format!("Failed to create {}", out_path.display()))?;
        serde_json::to_writer_pretty(file, &record)?;
        Ok(out_path)
    }

    /// Case-insensitive lookup. `None` is the domain-level "unknown sign"
    /// miss, not a failure.
    pub fn lookup(&self, label: &str) -> Option<&SignTemplate> {
        self.loaded().by_alias.get(&label.to_lowercase())
    }

    /// All loaded templates, in scan order.
    pub fn templates(&self) -> impl Iterator<Item = &SignTemplate> {
        let index = self.loaded();
        index.order.iter().filter_map(move |alias| index.by_alias.get(alias))
    }

    pub fn len(&self) -> usize {
        self.loaded().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loaded().order.is_empty()
    }

    // Populate-once: concurrent first lookups may race the scan, but each
    // race re-derives the same immutable data and OnceLock keeps one winner.
    fn loaded(&self) -> &TemplateIndex {
        self.index.get_or_init(|| self.scan())
    }

    fn scan(&self) -> TemplateIndex {
        let mut order = Vec::new();
        let mut by_alias = HashMap::new();

        let entries = match fs::read_dir(&self.data_dir) {
            Ok(entries) => entries,
            // Missing dir means no templates yet, an empty store
            Err(_) => return TemplateIndex { order, by_alias },
        };

        for entry in entries.flatten() {
            let path = entry.path();
            let name = match path.file_name().and_then(|n| n.to_str()) {
                Some(name) => name,
                None => continue,
            };
            if !name.ends_with(TEMPLATE_SUFFIX) {
                continue;
            }

            match load_record(&path) {
                Ok(record) => {
                    let alias = record.alias.to_lowercase();
                    if !by_alias.contains_key(&alias) {
                        order.push(alias.clone());
                    }
                    by_alias.insert(alias, record);
                }
                Err(e) => {
                    // Skip the one bad record, keep the rest of the store usable
                    println!("Skipping malformed template {}: {}", path.display(), e);
                }
            }
        }

        TemplateIndex { order, by_alias }
    }
}

fn load_record(path: &Path) -> Result<SignTemplate> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let mut record: SignTemplate = serde_json::from_reader(file)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    // Records from the first extractor version predate the alias field
    if record.alias.is_empty() {
        record.alias = record.sign.to_lowercase();
    }
    Ok(record)
}
