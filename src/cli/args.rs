use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::Strategy;

#[derive(Parser, Debug)]
#[command(name = "sheetcut")]
#[command(version, about = "Sprite sheet extractor", long_about = None)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Process every unit of a manifest
    Run(RunArgs),
    /// Split one sprite sheet into named sprites
    Sheet(SheetArgs),
    /// Remove the background of one image and trim it
    Single(SingleArgs),
    /// Resize one image to a square icon, keeping its background
    Icon(IconArgs),
    /// Write a starter manifest
    Init(InitArgs),
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Manifest file (JSON)
    pub manifest: PathBuf,

    /// Write a JSON report of every unit to FILE
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Compress PNG output (0-6 or 'max'), overriding the manifest
    #[arg(long, value_name = "LEVEL", default_missing_value = "2", num_args = 0..=1)]
    pub compress: Option<CompressionLevel>,
}

#[derive(Args, Debug, Clone)]
pub struct SheetArgs {
    /// Sprite sheet image
    pub input: PathBuf,

    /// Output directory for sprite files
    #[arg(short, long)]
    pub output: PathBuf,

    /// Sprite names in left-to-right order (names starting with '_' are not written)
    #[arg(short, long, value_delimiter = ',', required = true)]
    pub names: Vec<String>,

    /// Number of sprites on the sheet [default: number of names]
    #[arg(short, long)]
    pub expected: Option<usize>,

    /// Region strategy [default: contour]
    #[arg(short, long, value_enum, default_value_t)]
    pub strategy: Strategy,

    /// Padding around detected regions before trimming
    #[arg(short, long, default_value_t = 10)]
    pub padding: u32,

    /// Minimum sprite area in pixels
    #[arg(long, default_value_t = 500)]
    pub min_area: u32,

    /// Compress PNG output (0-6 or 'max'). Default level is 2 if flag is present without value.
    #[arg(long, value_name = "LEVEL", default_missing_value = "2", num_args = 0..=1)]
    pub compress: Option<CompressionLevel>,
}

#[derive(Args, Debug, Clone)]
pub struct SingleArgs {
    /// Source image
    pub input: PathBuf,

    /// Output PNG file
    #[arg(short, long)]
    pub output: PathBuf,

    /// Compress PNG output (0-6 or 'max')
    #[arg(long, value_name = "LEVEL", default_missing_value = "2", num_args = 0..=1)]
    pub compress: Option<CompressionLevel>,
}

#[derive(Args, Debug, Clone)]
pub struct IconArgs {
    /// Source image
    pub input: PathBuf,

    /// Output PNG file
    #[arg(short, long)]
    pub output: PathBuf,

    /// Edge length in pixels
    #[arg(long, default_value_t = 1024)]
    pub size: u32,

    /// Resize filter algorithm [default: lanczos3]
    #[arg(long, value_enum, default_value_t)]
    pub filter: ResizeFilter,

    /// Compress PNG output (0-6 or 'max')
    #[arg(long, value_name = "LEVEL", default_missing_value = "2", num_args = 0..=1)]
    pub compress: Option<CompressionLevel>,
}

#[derive(Args, Debug, Clone)]
pub struct InitArgs {
    /// Where to write the manifest
    #[arg(default_value = "sheetcut.json")]
    pub path: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Resize filter algorithm
#[derive(
    Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum ResizeFilter {
    /// Nearest neighbor (best for pixel art)
    #[value(name = "nearest")]
    Nearest,
    /// Bilinear interpolation
    #[value(name = "triangle")]
    Triangle,
    /// Cubic interpolation (bicubic)
    #[value(name = "catmull-rom", alias = "bicubic")]
    CatmullRom,
    /// Gaussian filter
    #[value(name = "gaussian")]
    Gaussian,
    /// Lanczos with window 3 (highest quality)
    #[default]
    #[value(name = "lanczos3")]
    Lanczos3,
}

impl ResizeFilter {
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            ResizeFilter::Nearest => image::imageops::FilterType::Nearest,
            ResizeFilter::Triangle => image::imageops::FilterType::Triangle,
            ResizeFilter::CatmullRom => image::imageops::FilterType::CatmullRom,
            ResizeFilter::Gaussian => image::imageops::FilterType::Gaussian,
            ResizeFilter::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// PNG compression level (0-6 or max)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionLevel {
    /// Optimization level 0-6
    Level(u8),
    /// Maximum compression
    Max,
}

impl std::str::FromStr for CompressionLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("max") {
            Ok(CompressionLevel::Max)
        } else {
            s.parse::<u8>()
                .map_err(|_e| format!("invalid compression level: {}", s))
                .and_then(|n| {
                    if n <= 6 {
                        Ok(CompressionLevel::Level(n))
                    } else {
                        Err(format!("compression level must be 0-6 or 'max', got {}", n))
                    }
                })
        }
    }
}

impl Default for CompressionLevel {
    fn default() -> Self {
        CompressionLevel::Level(2)
    }
}
