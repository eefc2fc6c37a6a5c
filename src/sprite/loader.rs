use std::path::Path;

use image::{ImageReader, RgbaImage};

use crate::error::SheetcutError;

/// Decode an image file into RGBA8, whatever its stored color type.
pub fn load_rgba(path: &Path) -> Result<RgbaImage, SheetcutError> {
    let image = ImageReader::open(path)
        .map_err(|e| SheetcutError::ImageLoad {
            path: path.to_path_buf(),
            source: e.into(),
        })?
        .with_guessed_format()
        .map_err(|e| SheetcutError::ImageLoad {
            path: path.to_path_buf(),
            source: e.into(),
        })?
        .decode()
        .map_err(|e| SheetcutError::ImageLoad {
            path: path.to_path_buf(),
            source: e,
        })?
        .into_rgba8();

    Ok(image)
}
