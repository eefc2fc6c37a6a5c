use std::path::Path;

use crate::cli::CompressionLevel;
use crate::config::{BackgroundRule, CompressConfig, DetectionConfig, Manifest};
use crate::error::SheetcutError;

/// Settings shared by every unit of a run
#[derive(Debug, Clone, Default)]
pub struct ProcessOptions {
    pub background: BackgroundRule,
    pub detection: DetectionConfig,
    pub compress: Option<CompressionLevel>,
}

impl ProcessOptions {
    pub fn from_manifest(manifest: &Manifest) -> Self {
        Self {
            background: manifest.background,
            detection: manifest.detection,
            compress: manifest.compress.as_ref().map(|c| match c {
                CompressConfig::Level(n) => CompressionLevel::Level(*n),
                CompressConfig::Max(_) => CompressionLevel::Max,
            }),
        }
    }
}

/// Names starting with `_` hold a sprite position without producing a file.
pub fn is_placeholder(name: &str) -> bool {
    name.starts_with('_')
}

pub(crate) fn ensure_dir(path: &Path) -> Result<(), SheetcutError> {
    if path.as_os_str().is_empty() || path.is_dir() {
        return Ok(());
    }
    std::fs::create_dir_all(path).map_err(|e| SheetcutError::CreateDir {
        path: path.to_path_buf(),
        source: e,
    })
}

pub(crate) fn ensure_parent_dir(path: &Path) -> Result<(), SheetcutError> {
    match path.parent() {
        Some(parent) => ensure_dir(parent),
        None => Ok(()),
    }
}
