use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::types::{Manifest, UnitConfig};
use crate::error::SheetcutError;

const SUPPORTED_VERSION: u32 = 1;

/// A loaded manifest with its associated directory.
///
/// Paths in the manifest are relative to the manifest file location,
/// so we need to track where it was loaded from.
#[derive(Debug, Clone)]
pub struct LoadedManifest {
    /// The parsed manifest
    pub manifest: Manifest,
    /// The directory containing the manifest file
    pub manifest_dir: PathBuf,
}

impl LoadedManifest {
    /// Load and validate a manifest file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest: {}", path.display()))?;

        let manifest: Manifest = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse manifest: {}", path.display()))?;

        let manifest_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        Self::new(manifest, manifest_dir)
    }

    /// Wrap an in-memory manifest whose relative paths resolve against `manifest_dir`.
    pub fn new(manifest: Manifest, manifest_dir: PathBuf) -> Result<Self> {
        validate(&manifest)?;
        Ok(Self {
            manifest,
            manifest_dir,
        })
    }

    /// Directory the unit sources are read from.
    pub fn source_dir(&self) -> PathBuf {
        self.manifest_dir.join(&self.manifest.source_dir)
    }

    /// Root directory all outputs are written under.
    pub fn output_root(&self) -> PathBuf {
        self.manifest_dir.join(&self.manifest.output_root)
    }

    /// Resolve a unit's source image path.
    pub fn resolve_source(&self, unit: &UnitConfig) -> PathBuf {
        self.source_dir().join(unit.source())
    }

    /// Resolve a path relative to the output root.
    pub fn resolve_output(&self, relative: &str) -> PathBuf {
        self.output_root().join(relative)
    }

    /// Output directories to create up front.
    pub fn resolve_directories(&self) -> Vec<PathBuf> {
        self.manifest
            .directories
            .iter()
            .map(|dir| self.resolve_output(dir))
            .collect()
    }
}

fn validate(manifest: &Manifest) -> Result<()> {
    if manifest.version != SUPPORTED_VERSION {
        return Err(SheetcutError::InvalidManifest(format!(
            "unsupported version {} (expected {})",
            manifest.version, SUPPORTED_VERSION
        ))
        .into());
    }

    for unit in &manifest.units {
        if let UnitConfig::Sheet(sheet) = unit {
            if sheet.names.is_empty() {
                return Err(SheetcutError::EmptyNameList(PathBuf::from(&sheet.source)).into());
            }
        }
    }

    Ok(())
}
