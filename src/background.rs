use image::{Rgba, RgbaImage};

use crate::config::BackgroundRule;

impl BackgroundRule {
    /// Whether a pixel's color looks like the checkered placeholder.
    ///
    /// Alpha is not considered; fully transparent pixels are skipped by
    /// [`remove_background`] before this is asked.
    pub fn is_background(&self, pixel: &Rgba<u8>) -> bool {
        let [r, g, b, _] = pixel.0;

        let is_gray = [r, g, b]
            .iter()
            .all(|&c| c.abs_diff(self.gray_level) < self.gray_tolerance);
        let is_white = r > self.white_min && g > self.white_min && b > self.white_min;
        let is_near_white = r > self.near_white_min
            && g > self.near_white_min
            && b > self.near_white_min
            && r.abs_diff(g) < self.near_white_spread
            && g.abs_diff(b) < self.near_white_spread;

        is_gray || is_white || is_near_white
    }
}

/// Make every placeholder pixel fully transparent, in place.
///
/// Returns the number of pixels that were cleared. Pixels that are already
/// fully transparent are left alone, so a second pass clears nothing.
pub fn remove_background(image: &mut RgbaImage, rule: &BackgroundRule) -> usize {
    let mut cleared = 0;

    for pixel in image.pixels_mut() {
        if pixel[3] == 0 || !rule.is_background(pixel) {
            continue;
        }

        if rule.clear_color {
            *pixel = Rgba([0, 0, 0, 0]);
        } else {
            pixel[3] = 0;
        }
        cleared += 1;
    }

    cleared
}
