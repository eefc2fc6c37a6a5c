use image::RgbaImage;
use image::imageops::FilterType;

/// Resize an image to a `size` x `size` square, ignoring aspect ratio
pub fn resize_square(img: &RgbaImage, size: u32, filter: FilterType) -> RgbaImage {
    let size = size.max(1);
    image::imageops::resize(img, size, size, filter)
}
