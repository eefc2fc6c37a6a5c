use image::RgbaImage;

use super::trim_transparent;
use crate::region::Rect;

/// A sprite cut out of a sheet
#[derive(Debug, Clone)]
pub struct CroppedSprite {
    pub image: RgbaImage,
    /// Final extent of `image` in sheet coordinates
    pub bounds: Rect,
    /// Padded region the sprite was cut from, in sheet coordinates
    pub padded: Rect,
}

impl CroppedSprite {
    /// True when no pixel of the sprite is visible
    pub fn is_transparent(&self) -> bool {
        self.image.pixels().all(|p| p[3] == 0)
    }
}

/// Crop `region` grown by `padding` (clamped to the sheet), then trim
/// the result to its non-transparent content.
///
/// Returns `None` when the padded region has no area.
pub fn crop_region(sheet: &RgbaImage, region: Rect, padding: u32) -> Option<CroppedSprite> {
    let padded = region.expand_clamped(padding, sheet.width(), sheet.height());
    if padded.is_empty() {
        return None;
    }

    let coarse =
        image::imageops::crop_imm(sheet, padded.x, padded.y, padded.width, padded.height).to_image();
    let (image, kept) = trim_transparent(coarse);

    let bounds = Rect::new(padded.x + kept.x, padded.y + kept.y, kept.width, kept.height);

    Some(CroppedSprite {
        image,
        bounds,
        padded,
    })
}
