use image::RgbaImage;

use crate::region::Rect;

/// Bounding box of the pixels that are not fully transparent.
///
/// Returns `None` when every pixel is transparent (or the image is empty).
pub fn content_bounds(image: &RgbaImage) -> Option<Rect> {
    let (width, height) = image.dimensions();

    if width == 0 || height == 0 {
        return None;
    }

    let mut min_x = width;
    let mut min_y = height;
    let mut max_x = 0u32;
    let mut max_y = 0u32;

    for (x, y, pixel) in image.enumerate_pixels() {
        if pixel[3] > 0 {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
    }

    if max_x < min_x || max_y < min_y {
        return None;
    }

    Some(Rect::new(min_x, min_y, max_x - min_x + 1, max_y - min_y + 1))
}

/// Trim transparent borders from an image.
///
/// Returns the trimmed image and the kept box in the input's coordinates.
/// A fully transparent image is returned unchanged.
pub fn trim_transparent(image: RgbaImage) -> (RgbaImage, Rect) {
    let full = Rect::new(0, 0, image.width(), image.height());

    match content_bounds(&image) {
        Some(bounds) if bounds != full => {
            let trimmed =
                image::imageops::crop_imm(&image, bounds.x, bounds.y, bounds.width, bounds.height)
                    .to_image();
            (trimmed, bounds)
        }
        _ => (image, full),
    }
}
