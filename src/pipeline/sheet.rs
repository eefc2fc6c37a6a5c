use std::path::{Path, PathBuf};

use anyhow::Result;
use image::RgbaImage;
use log::{debug, info, warn};

use super::options::{ensure_dir, is_placeholder};
use super::{ProcessOptions, UnitReport, UnitWarning, WrittenSprite};
use crate::background::remove_background;
use crate::config::Strategy;
use crate::error::SheetcutError;
use crate::output::save_png;
use crate::region::{Rect, find_regions, grid_regions};
use crate::sprite::{crop_region, load_rgba};

/// One sprite sheet to split
#[derive(Debug, Clone)]
pub struct SheetJob {
    pub source: PathBuf,
    pub output_dir: PathBuf,
    /// Output names in left-to-right order
    pub names: Vec<String>,
    /// Sprites on the sheet; defaults to `names.len()`
    pub expected_count: Option<usize>,
    pub strategy: Strategy,
    pub padding: u32,
    pub min_area: u32,
}

impl SheetJob {
    fn expected(&self) -> usize {
        self.expected_count.unwrap_or(self.names.len())
    }
}

/// Split a sheet into `{output_dir}/{name}.png` files.
///
/// A missing source yields a `SourceMissing` report without touching the
/// filesystem. Decoding and write failures are returned as errors.
pub fn process_sheet(job: &SheetJob, options: &ProcessOptions) -> Result<UnitReport> {
    let label = file_label(&job.source);
    if !job.source.is_file() {
        warn!("Source not found, skipping: {}", job.source.display());
        return Ok(UnitReport::source_missing(label, job.source.clone()));
    }
    if job.names.is_empty() {
        return Err(SheetcutError::EmptyNameList(job.source.clone()).into());
    }

    let mut report = UnitReport::new(label, job.source.clone());
    let mut sheet = load_rgba(&job.source)?;
    info!(
        "Processing {} ({}x{})",
        report.label,
        sheet.width(),
        sheet.height()
    );

    let cleared = remove_background(&mut sheet, &options.background);
    debug!("Cleared {} background pixels", cleared);

    let regions = resolve_regions(&sheet, job, options, &mut report);

    ensure_dir(&job.output_dir)?;

    for (index, name) in job.names.iter().enumerate() {
        if is_placeholder(name) {
            debug!("  Skipping placeholder '{}'", name);
            report.skipped.push(name.clone());
            continue;
        }

        let Some(&region) = regions.get(index) else {
            report.warn(UnitWarning::MissingRegion { name: name.clone() });
            continue;
        };

        let Some(sprite) = crop_region(&sheet, region, job.padding) else {
            report.warn(UnitWarning::EmptyRegion { name: name.clone() });
            continue;
        };

        if sprite.is_transparent() {
            report.warn(UnitWarning::TransparentSprite { name: name.clone() });
        }

        let path = job.output_dir.join(format!("{name}.png"));
        save_png(&sprite.image, &path, options.compress)?;
        info!(
            "  Saved {}.png ({}x{})",
            name,
            sprite.image.width(),
            sprite.image.height()
        );

        report.written.push(WrittenSprite {
            name: name.clone(),
            path,
            width: sprite.image.width(),
            height: sprite.image.height(),
        });
    }

    Ok(report)
}

fn resolve_regions(
    sheet: &RgbaImage,
    job: &SheetJob,
    options: &ProcessOptions,
    report: &mut UnitReport,
) -> Vec<Rect> {
    let (width, height) = sheet.dimensions();

    match job.strategy {
        Strategy::Grid => grid_regions(width, height, job.expected()),
        Strategy::Contour => {
            let search = find_regions(sheet, &options.detection, job.min_area, Some(job.expected()));
            info!(
                "  Found {} sprite regions (expected {})",
                search.regions.len(),
                job.names.len()
            );

            if search.was_merged() {
                report.warn(UnitWarning::MergedRegions {
                    before: search.detected,
                    after: search.regions.len(),
                });
            }

            if search.regions.len() < job.names.len() {
                report.warn(UnitWarning::GridFallback {
                    found: search.regions.len(),
                    expected: job.names.len(),
                });
                grid_regions(width, height, job.names.len())
            } else {
                search.regions
            }
        }
    }
}

pub(crate) fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
