pub mod background;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod region;
pub mod sprite;

pub use background::remove_background;
pub use cli::{CliArgs, Command, CompressionLevel, ResizeFilter};
pub use config::{LoadedManifest, Manifest, Strategy};
pub use error::SheetcutError;
pub use pipeline::{BatchReport, SheetJob, UnitReport, UnitStatus, UnitWarning, run_manifest};
pub use region::{Rect, find_regions, grid_regions};
pub use sprite::{CroppedSprite, crop_region};
