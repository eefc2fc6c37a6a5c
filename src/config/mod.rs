mod load;
mod save;
mod types;

pub use load::LoadedManifest;
pub use save::{make_relative, save_manifest};
pub use types::{
    BackgroundRule, CompressConfig, DetectionConfig, IconUnit, Manifest, SheetUnit, SingleUnit,
    Strategy, UnitConfig,
};
