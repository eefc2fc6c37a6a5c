use std::path::Path;

use anyhow::Result;
use log::{info, warn};

use super::options::ensure_parent_dir;
use super::sheet::file_label;
use super::{UnitReport, WrittenSprite};
use crate::cli::{CompressionLevel, ResizeFilter};
use crate::output::save_png;
use crate::sprite::{load_rgba, resize_square};

/// Resize an image to a square icon. The background is kept as-is.
pub fn process_icon(
    source: &Path,
    output: &Path,
    size: u32,
    filter: ResizeFilter,
    compress: Option<CompressionLevel>,
) -> Result<UnitReport> {
    let label = file_label(source);
    if !source.is_file() {
        warn!("Source not found, skipping: {}", source.display());
        return Ok(UnitReport::source_missing(label, source.to_path_buf()));
    }

    let mut report = UnitReport::new(label, source.to_path_buf());
    let image = load_rgba(source)?;
    let resized = resize_square(&image, size, filter.to_image_filter());

    ensure_parent_dir(output)?;
    save_png(&resized, output, compress)?;
    info!(
        "Saved {} ({}x{})",
        file_label(output),
        resized.width(),
        resized.height()
    );

    report.written.push(WrittenSprite {
        name: output
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default(),
        path: output.to_path_buf(),
        width: resized.width(),
        height: resized.height(),
    });

    Ok(report)
}
