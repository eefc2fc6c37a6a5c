use std::path::Path;

use anyhow::{Context, Result};

use super::types::Manifest;

/// Save a manifest to a JSON file with pretty formatting.
pub fn save_manifest(manifest: &Manifest, path: &Path) -> Result<()> {
    let content = serde_json::to_string_pretty(manifest)
        .with_context(|| "failed to serialize manifest to JSON")?;

    std::fs::write(path, content)
        .with_context(|| format!("failed to write manifest: {}", path.display()))?;

    Ok(())
}

/// Convert an absolute path to a path relative to the base directory.
///
/// If the path cannot be made relative (e.g., different drive on Windows),
/// returns the original path as a string.
pub fn make_relative(path: &Path, base: &Path) -> String {
    if let Ok(relative) = path.strip_prefix(base) {
        relative.to_string_lossy().into_owned()
    } else {
        path.to_string_lossy().into_owned()
    }
}
