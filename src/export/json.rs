//! JSON backup of learner progress.
//! Saves the whole progress record to a file and loads it back.

use crate::error::Result;
use crate::models::Progress;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Writes `progress` as pretty JSON to `path`.
pub fn export_progress_to_path(progress: &Progress, path: &Path) -> Result<()> {
    let json_string = serde_json::to_string_pretty(progress)?;
    let mut file = File::create(path)?;
    file.write_all(json_string.as_bytes())?;
    tracing::info!(path = %path.display(), "progress exported");
    Ok(())
}

/// Reads progress from a JSON file. Words are normalized while reading.
pub fn import_progress(path: &Path) -> Result<Progress> {
    let mut file = File::open(path)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;

    let progress: Progress = serde_json::from_str(&contents)?;

    tracing::info!(
        path = %path.display(),
        level = progress.current_level(),
        "progress imported"
    );
    Ok(progress)
}
