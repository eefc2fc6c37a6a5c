use serde::{Deserialize, Serialize};

use crate::cli::ResizeFilter;

/// Thresholds for recognising the checkered "no background" placeholder.
///
/// A pixel is background when it is close to the gray checker tile, when it
/// is white, or when it is a near-white neutral (anti-aliased tile edges).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundRule {
    /// Value of the gray checker tile on every channel
    pub gray_level: u8,
    /// Channels within this distance of `gray_level` count as gray
    pub gray_tolerance: u8,
    /// Channels all above this count as white
    pub white_min: u8,
    /// Channels all above this may count as near-white...
    pub near_white_min: u8,
    /// ...if no two neighbouring channels differ by this much
    pub near_white_spread: u8,
    /// Zero the color of cleared pixels as well as the alpha
    pub clear_color: bool,
}

impl Default for BackgroundRule {
    fn default() -> Self {
        Self {
            gray_level: 204,
            gray_tolerance: 15,
            white_min: 245,
            near_white_min: 230,
            near_white_spread: 10,
            clear_color: true,
        }
    }
}

/// Parameters of contour-based region detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Pixels with alpha above this are foreground
    pub alpha_threshold: u8,
    /// Dilation radius (2 = 5x5 square kernel)
    pub dilate_radius: u8,
    /// Number of dilation passes
    pub dilate_iterations: u32,
    /// Minimum enclosed contour area in pixels
    pub min_area: u32,
    /// Horizontal merge distance; defaults to `width / (expected * 2)`
    pub merge_gap: Option<u32>,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            alpha_threshold: 10,
            dilate_radius: 2,
            dilate_iterations: 2,
            min_area: 500,
            merge_gap: None,
        }
    }
}

/// How a sheet is divided into sprite regions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Contour detection, falling back to a grid when too few regions are found
    #[default]
    Contour,
    /// Equal-width columns only
    Grid,
}

/// PNG compression level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CompressConfig {
    /// Optimization level 0-6
    Level(u8),
    /// Maximum compression ("max")
    Max(String),
}

/// A sprite sheet split into named sprites
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetUnit {
    /// Source image, relative to the manifest's `source_dir`
    pub source: String,
    /// Output directory, relative to the manifest's `output_root`
    pub output_dir: String,
    /// Sprite names in left-to-right order; names starting with `_` are not written
    pub names: Vec<String>,
    /// Number of sprites on the sheet (defaults to the number of names)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_count: Option<usize>,
    #[serde(default)]
    pub strategy: Strategy,
    /// Overrides the manifest padding
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<u32>,
    /// Overrides `detection.min_area`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_area: Option<u32>,
}

/// A single image cleaned and trimmed as a whole
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleUnit {
    pub source: String,
    /// Output file, relative to the manifest's `output_root`
    pub output: String,
}

/// An image resized to a square, keeping its background
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IconUnit {
    pub source: String,
    pub output: String,
    #[serde(default = "default_icon_size")]
    pub size: u32,
    #[serde(default)]
    pub filter: ResizeFilter,
}

fn default_icon_size() -> u32 {
    1024
}

/// One unit of work in a manifest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UnitConfig {
    Sheet(SheetUnit),
    Single(SingleUnit),
    Icon(IconUnit),
}

impl UnitConfig {
    pub fn source(&self) -> &str {
        match self {
            UnitConfig::Sheet(unit) => &unit.source,
            UnitConfig::Single(unit) => &unit.source,
            UnitConfig::Icon(unit) => &unit.source,
        }
    }
}

/// Sheetcut manifest file structure.
///
/// `source_dir` and `output_root` are relative to the manifest file location;
/// unit sources are relative to `source_dir` and unit outputs to `output_root`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Manifest version (currently 1)
    pub version: u32,
    /// Directory holding the generated source images
    pub source_dir: String,
    /// Root of the output asset tree
    pub output_root: String,
    pub background: BackgroundRule,
    pub detection: DetectionConfig,
    /// Padding around detected regions before trimming
    pub padding: u32,
    /// PNG compression configuration (optional)
    pub compress: Option<CompressConfig>,
    /// Output directories to create before any unit runs
    pub directories: Vec<String>,
    pub units: Vec<UnitConfig>,
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            version: 1,
            source_dir: ".".to_string(),
            output_root: ".".to_string(),
            background: BackgroundRule::default(),
            detection: DetectionConfig::default(),
            padding: 10,
            compress: None,
            directories: Vec::new(),
            units: Vec::new(),
        }
    }
}

impl Manifest {
    /// A starter manifest showing each kind of unit
    pub fn template() -> Self {
        Self {
            source_dir: "raw".to_string(),
            output_root: "assets/sprites".to_string(),
            directories: vec!["obstacles".to_string(), "ui".to_string()],
            units: vec![
                UnitConfig::Sheet(SheetUnit {
                    source: "obstacles.png".to_string(),
                    output_dir: "obstacles".to_string(),
                    names: ["cone", "pothole", "manhole", "barrier"]
                        .map(String::from)
                        .to_vec(),
                    expected_count: Some(4),
                    strategy: Strategy::Contour,
                    padding: None,
                    min_area: None,
                }),
                UnitConfig::Sheet(SheetUnit {
                    source: "ui.png".to_string(),
                    output_dir: "ui".to_string(),
                    names: ["_reference", "coin", "pause", "settings"]
                        .map(String::from)
                        .to_vec(),
                    expected_count: None,
                    strategy: Strategy::Grid,
                    padding: Some(4),
                    min_area: None,
                }),
                UnitConfig::Single(SingleUnit {
                    source: "banner.png".to_string(),
                    output: "ui/banner.png".to_string(),
                }),
                UnitConfig::Icon(IconUnit {
                    source: "icon.png".to_string(),
                    output: "../icon.png".to_string(),
                    size: default_icon_size(),
                    filter: ResizeFilter::Lanczos3,
                }),
            ],
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_manifest_uses_defaults() {
        let manifest: Manifest = serde_json::from_str(
            r#"{
                "units": [
                    { "kind": "sheet", "source": "a.png", "output_dir": "out", "names": ["x", "y"] }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(manifest.version, 1);
        assert_eq!(manifest.padding, 10);
        assert_eq!(manifest.background, BackgroundRule::default());
        assert_eq!(manifest.detection.min_area, 500);

        let UnitConfig::Sheet(sheet) = &manifest.units[0] else {
            panic!("expected a sheet unit");
        };
        assert_eq!(sheet.strategy, Strategy::Contour);
        assert_eq!(sheet.expected_count, None);
        assert_eq!(sheet.names, vec!["x", "y"]);
    }

    #[test]
    fn test_partial_background_override() {
        let manifest: Manifest =
            serde_json::from_str(r#"{ "background": { "white_min": 200 } }"#).unwrap();

        assert_eq!(manifest.background.white_min, 200);
        assert_eq!(manifest.background.gray_level, 204);
    }

    #[test]
    fn test_icon_defaults() {
        let unit: UnitConfig =
            serde_json::from_str(r#"{ "kind": "icon", "source": "i.png", "output": "o.png" }"#)
                .unwrap();

        assert_eq!(
            unit,
            UnitConfig::Icon(IconUnit {
                source: "i.png".to_string(),
                output: "o.png".to_string(),
                size: 1024,
                filter: ResizeFilter::Lanczos3,
            })
        );
    }

    #[test]
    fn test_grid_strategy_name() {
        let unit: UnitConfig = serde_json::from_str(
            r#"{ "kind": "sheet", "source": "s.png", "output_dir": "o", "names": ["a"], "strategy": "grid" }"#,
        )
        .unwrap();

        assert!(matches!(unit, UnitConfig::Sheet(SheetUnit { strategy: Strategy::Grid, .. })));
    }

    #[test]
    fn test_template_round_trips() {
        let template = Manifest::template();
        let json = serde_json::to_string(&template).unwrap();
        let parsed: Manifest = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.units, template.units);
    }
}
