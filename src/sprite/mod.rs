mod cropper;
mod loader;
mod resizer;
mod trimmer;

pub use cropper::{CroppedSprite, crop_region};
pub use loader::load_rgba;
pub use resizer::resize_square;
pub use trimmer::{content_bounds, trim_transparent};
