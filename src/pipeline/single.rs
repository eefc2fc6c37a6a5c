use std::path::Path;

use anyhow::Result;
use log::{info, warn};

use super::options::ensure_parent_dir;
use super::sheet::file_label;
use super::{ProcessOptions, UnitReport, UnitWarning, WrittenSprite};
use crate::background::remove_background;
use crate::output::save_png;
use crate::sprite::{load_rgba, trim_transparent};

/// Remove the placeholder background from a whole image and trim it.
pub fn process_single(source: &Path, output: &Path, options: &ProcessOptions) -> Result<UnitReport> {
    let label = file_label(source);
    if !source.is_file() {
        warn!("Source not found, skipping: {}", source.display());
        return Ok(UnitReport::source_missing(label, source.to_path_buf()));
    }

    let mut report = UnitReport::new(label, source.to_path_buf());
    let mut image = load_rgba(source)?;
    info!(
        "Processing single {} ({}x{})",
        report.label,
        image.width(),
        image.height()
    );

    remove_background(&mut image, &options.background);
    let (image, _) = trim_transparent(image);

    let name = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| report.label.clone());
    if image.pixels().all(|p| p[3] == 0) {
        report.warn(UnitWarning::TransparentSprite { name: name.clone() });
    }

    ensure_parent_dir(output)?;
    save_png(&image, output, options.compress)?;
    info!("  Saved {} ({}x{})", file_label(output), image.width(), image.height());

    report.written.push(WrittenSprite {
        name,
        path: output.to_path_buf(),
        width: image.width(),
        height: image.height(),
    });

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::UnitStatus;
    use image::{Rgba, RgbaImage};

    #[test]
    fn test_single_is_cleaned_and_trimmed() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("world.png");
        let mut img = RgbaImage::from_fn(120, 80, |x, y| {
            if (x / 10 + y / 10) % 2 == 0 {
                Rgba([204, 204, 204, 255])
            } else {
                Rgba([255, 255, 255, 255])
            }
        });
        for y in 30..50 {
            for x in 20..90 {
                img.put_pixel(x, y, Rgba([30, 120, 60, 255]));
            }
        }
        img.save(&source).unwrap();
        let output = dir.path().join("worlds").join("world_beach.png");

        let report = process_single(&source, &output, &ProcessOptions::default()).unwrap();

        assert!(report.is_completed());
        assert_eq!(report.written_names(), vec!["world_beach"]);
        let saved = image::open(&output).unwrap().into_rgba8();
        assert_eq!(saved.dimensions(), (70, 20));
    }

    #[test]
    fn test_all_background_is_flagged() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("blank.png");
        RgbaImage::from_pixel(10, 10, Rgba([255, 255, 255, 255]))
            .save(&source)
            .unwrap();
        let output = dir.path().join("blank_out.png");

        let report = process_single(&source, &output, &ProcessOptions::default()).unwrap();

        assert_eq!(report.warnings.len(), 1);
        assert!(output.exists());
    }

    #[test]
    fn test_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("nested").join("out.png");

        let report =
            process_single(&dir.path().join("none.png"), &output, &ProcessOptions::default())
                .unwrap();

        assert_eq!(report.status, UnitStatus::SourceMissing);
        assert!(!dir.path().join("nested").exists());
    }
}
