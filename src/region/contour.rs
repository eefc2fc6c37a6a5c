use image::{GrayImage, Luma, RgbaImage};
use imageproc::contours::{BorderType, Contour, find_contours};
use imageproc::distance_transform::Norm;
use imageproc::morphology::dilate;
use log::debug;

use super::{Rect, default_merge_gap, merge_nearby};
use crate::config::DetectionConfig;

/// Outcome of contour-based region detection
#[derive(Debug, Clone)]
pub struct RegionSearch {
    /// Regions sorted left to right, after any merging
    pub regions: Vec<Rect>,
    /// Number of regions that passed the area filter, before merging
    pub detected: usize,
}

impl RegionSearch {
    pub fn was_merged(&self) -> bool {
        self.regions.len() != self.detected
    }
}

/// Binary mask of pixels whose alpha exceeds `alpha_threshold`
pub fn presence_mask(image: &RgbaImage, alpha_threshold: u8) -> GrayImage {
    let (width, height) = image.dimensions();
    GrayImage::from_fn(width, height, |x, y| {
        if image.get_pixel(x, y)[3] > alpha_threshold {
            Luma([255])
        } else {
            Luma([0])
        }
    })
}

/// Find sprite regions in a background-cleaned image.
///
/// The presence mask is dilated so fragments of one sprite join up, then the
/// bounding boxes of outermost contours with at least `min_area` enclosed
/// area are returned in left-to-right order. When `expected_count` is known
/// and exceeded, neighbouring boxes are merged.
pub fn find_regions(
    image: &RgbaImage,
    config: &DetectionConfig,
    min_area: u32,
    expected_count: Option<usize>,
) -> RegionSearch {
    let mut mask = presence_mask(image, config.alpha_threshold);
    for _ in 0..config.dilate_iterations {
        mask = dilate(&mask, Norm::LInf, config.dilate_radius);
    }

    // Traced on a framed copy so components touching the sheet edge stay outer borders
    let contours = find_contours::<i32>(&frame_mask(&mask));
    let mut regions: Vec<Rect> = contours
        .iter()
        .filter(|c| matches!(c.border_type, BorderType::Outer) && c.parent.is_none())
        .filter(|c| contour_area(c) >= f64::from(min_area))
        .filter_map(bounding_rect)
        .collect();
    regions.sort_by_key(|r| r.x);

    let detected = regions.len();
    debug!(
        "{} contours, {} regions above {} px",
        contours.len(),
        detected,
        min_area
    );

    if let Some(expected) = expected_count.filter(|&n| n > 0 && detected > n) {
        let gap = config
            .merge_gap
            .unwrap_or_else(|| default_merge_gap(image.width(), expected));
        regions = merge_nearby(&regions, gap);
        debug!("Merged {} regions into {} (gap {})", detected, regions.len(), gap);
    }

    RegionSearch { regions, detected }
}

/// Copy of `mask` with a one pixel background frame around it.
///
/// Contour coordinates on the framed mask are offset by one; see [`bounding_rect`].
fn frame_mask(mask: &GrayImage) -> GrayImage {
    let mut framed = GrayImage::new(mask.width() + 2, mask.height() + 2);
    image::imageops::replace(&mut framed, mask, 1, 1);
    framed
}

/// Polygon area enclosed by a traced border (shoelace formula)
fn contour_area(contour: &Contour<i32>) -> f64 {
    let points = &contour.points;
    if points.len() < 3 {
        return 0.0;
    }

    let twice_area: i64 = points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| i64::from(a.x) * i64::from(b.y) - i64::from(b.x) * i64::from(a.y))
        .sum();

    twice_area.unsigned_abs() as f64 / 2.0
}

/// Bounding box of a contour traced on a framed mask, in sheet coordinates
fn bounding_rect(contour: &Contour<i32>) -> Option<Rect> {
    let min_x = contour.points.iter().map(|p| p.x).min()?;
    let max_x = contour.points.iter().map(|p| p.x).max()?;
    let min_y = contour.points.iter().map(|p| p.y).min()?;
    let max_y = contour.points.iter().map(|p| p.y).max()?;

    // Undo the frame offset
    let x = u32::try_from(min_x - 1).ok()?;
    let y = u32::try_from(min_y - 1).ok()?;
    let width = u32::try_from(max_x - min_x + 1).ok()?;
    let height = u32::try_from(max_y - min_y + 1).ok()?;
    Some(Rect::new(x, y, width, height))
}
