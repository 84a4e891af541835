use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::{Map, Number, Value};

use crate::store::TemplateStore;

/// Per-sign frame cap used when exporting from the CLI without an explicit
/// limit.
pub const DEFAULT_FRAME_LIMIT: usize = 100;

/// Flatten every stored sign's retained raw frames into one flat dataset
/// for external training: one row per frame with columns
/// `label, x_<id>, y_<id>, z_<id>` for each point in that sign's point set.
///
/// `limit_frames` caps rows per sign; `None` exports every retained frame.
/// Write-only utility, nothing here feeds back into matching. Returns the
/// number of rows written.
pub fn export_dataset(
    store: &TemplateStore,
    out_path: &Path,
    limit_frames: Option<usize>,
) -> Result<usize> {
    let mut rows: Vec<Value> = Vec::new();

    for template in store.templates() {
        let frames = match limit_frames {
            Some(limit) => &template.frames[..template.frames.len().min(limit)],
            None => &template.frames[..],
        };
        for frame in frames {
            let mut row = Map::new();
            row.insert("label".to_string(), Value::String(template.alias.clone()));
            for point in frame {
                row.insert(format!("x_{}", point.id), float_value(point.x));
                row.insert(format!("y_{}", point.id), float_value(point.y));
                row.insert(format!("z_{}", point.id), float_value(point.z));
            }
            rows.push(Value::Object(row));
        }
    }

    let file = File::create(out_path)
        .with_context(|| format!("Failed to create {}", out_path.display()))?;
    serde_json::to_writer_pretty(file, &rows)?;
    Ok(rows.len())
}

fn float_value(v: f64) -> Value {
    // NaN/inf never occur in normalized coordinates; fall back to 0 if they do
    Number::from_f64(v).map(Value::Number).unwrap_or_else(|| Value::from(0))
}
