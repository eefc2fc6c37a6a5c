use anyhow::Result;
use log::{error, info};

use super::options::ensure_dir;
use super::{
    BatchReport, ProcessOptions, SheetJob, UnitReport, process_icon, process_sheet,
    process_single,
};
use crate::cli::CompressionLevel;
use crate::config::{LoadedManifest, UnitConfig, make_relative};

/// Run every unit of a manifest in order.
///
/// Units are independent: a unit whose source is missing is skipped, and a
/// unit that fails is recorded as failed while the rest still run. Only
/// failing to create the manifest's `directories` aborts the batch.
pub fn run_manifest(
    loaded: &LoadedManifest,
    compress_override: Option<CompressionLevel>,
) -> Result<BatchReport> {
    let manifest = &loaded.manifest;
    let mut options = ProcessOptions::from_manifest(manifest);
    if compress_override.is_some() {
        options.compress = compress_override;
    }

    for dir in loaded.resolve_directories() {
        ensure_dir(&dir)?;
    }

    let output_root = loaded.output_root();
    let mut report = BatchReport::default();

    for unit in &manifest.units {
        let unit_report = run_unit(loaded, unit, &options).unwrap_or_else(|e| {
            let source = loaded.resolve_source(unit);
            error!("{}: {:#}", unit.source(), e);
            UnitReport::failed(unit.source(), source, format!("{e:#}"))
        });

        for sprite in &unit_report.written {
            info!("  -> {}", make_relative(&sprite.path, &output_root));
        }
        report.units.push(unit_report);
    }

    info!(
        "{} units: {} files written, {} warnings, {} missing, {} failed",
        report.units.len(),
        report.written_count(),
        report.warning_count(),
        report.missing_count(),
        report.failed_count()
    );

    Ok(report)
}

fn run_unit(
    loaded: &LoadedManifest,
    unit: &UnitConfig,
    options: &ProcessOptions,
) -> Result<UnitReport> {
    let source = loaded.resolve_source(unit);

    match unit {
        UnitConfig::Sheet(sheet) => {
            let job = SheetJob {
                source,
                output_dir: loaded.resolve_output(&sheet.output_dir),
                names: sheet.names.clone(),
                expected_count: sheet.expected_count,
                strategy: sheet.strategy,
                padding: sheet.padding.unwrap_or(loaded.manifest.padding),
                min_area: sheet.min_area.unwrap_or(options.detection.min_area),
            };
            process_sheet(&job, options)
        }
        UnitConfig::Single(single) => {
            process_single(&source, &loaded.resolve_output(&single.output), options)
        }
        UnitConfig::Icon(icon) => process_icon(
            &source,
            &loaded.resolve_output(&icon.output),
            icon.size,
            icon.filter,
            options.compress,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ResizeFilter;
    use crate::config::{IconUnit, Manifest, SheetUnit, SingleUnit, Strategy};
    use crate::pipeline::UnitStatus;
    use image::{Rgba, RgbaImage};
    use std::path::Path;

    fn write_squares(path: &Path, count: u32) {
        let mut img = RgbaImage::from_pixel(100 * count, 100, Rgba([255, 255, 255, 255]));
        for i in 0..count {
            for y in 20..80 {
                for x in i * 100 + 20..i * 100 + 80 {
                    img.put_pixel(x, y, Rgba([120, 20, 160, 255]));
                }
            }
        }
        img.save(path).unwrap();
    }

    fn sheet_unit(source: &str, output_dir: &str, names: &[&str]) -> UnitConfig {
        UnitConfig::Sheet(SheetUnit {
            source: source.to_string(),
            output_dir: output_dir.to_string(),
            names: names.iter().map(|s| s.to_string()).collect(),
            expected_count: None,
            strategy: Strategy::Contour,
            padding: None,
            min_area: None,
        })
    }

    #[test]
    fn test_bad_unit_does_not_abort_batch() {
        let dir = tempfile::tempdir().unwrap();
        let raw = dir.path().join("raw");
        std::fs::create_dir(&raw).unwrap();
        write_squares(&raw.join("powerups.png"), 3);
        std::fs::write(raw.join("corrupt.png"), b"not an image").unwrap();
        RgbaImage::from_pixel(20, 20, Rgba([204, 204, 204, 255]))
            .save(raw.join("app.png"))
            .unwrap();

        let manifest = Manifest {
            source_dir: "raw".to_string(),
            output_root: "assets".to_string(),
            directories: vec!["empty".to_string()],
            units: vec![
                sheet_unit("corrupt.png", "broken", &["x"]),
                sheet_unit("missing.png", "gone", &["y"]),
                sheet_unit("powerups.png", "powerups", &["shield", "magnet", "speed_bolt"]),
                UnitConfig::Single(SingleUnit {
                    source: "powerups.png".to_string(),
                    output: "whole.png".to_string(),
                }),
                UnitConfig::Icon(IconUnit {
                    source: "app.png".to_string(),
                    output: "icon.png".to_string(),
                    size: 32,
                    filter: ResizeFilter::Lanczos3,
                }),
            ],
            ..Manifest::default()
        };
        let loaded = LoadedManifest::new(manifest, dir.path().to_path_buf()).unwrap();

        let report = run_manifest(&loaded, None).unwrap();

        assert_eq!(report.units.len(), 5);
        assert!(matches!(report.units[0].status, UnitStatus::Failed(_)));
        assert_eq!(report.units[1].status, UnitStatus::SourceMissing);
        assert_eq!(
            report.units[2].written_names(),
            vec!["shield", "magnet", "speed_bolt"]
        );
        assert!(report.units[3].is_completed());
        assert!(report.units[4].is_completed());
        assert_eq!(report.written_count(), 5);
        assert!(!report.is_success());

        let assets = dir.path().join("assets");
        assert!(assets.join("empty").is_dir());
        assert!(assets.join("powerups/magnet.png").is_file());
        assert!(assets.join("whole.png").is_file());
        assert!(assets.join("icon.png").is_file());
        assert!(!assets.join("gone").exists());
    }

    #[test]
    fn test_sheet_overrides_manifest_padding() {
        let dir = tempfile::tempdir().unwrap();
        write_squares(&dir.path().join("s.png"), 2);

        let mut unit = sheet_unit("s.png", "out", &["a", "b"]);
        if let UnitConfig::Sheet(sheet) = &mut unit {
            sheet.padding = Some(0);
            sheet.strategy = Strategy::Grid;
        }
        let manifest = Manifest {
            units: vec![unit],
            ..Manifest::default()
        };
        let loaded = LoadedManifest::new(manifest, dir.path().to_path_buf()).unwrap();

        let report = run_manifest(&loaded, Some(CompressionLevel::Level(1))).unwrap();

        assert!(report.is_success());
        let a = image::open(dir.path().join("out/a.png")).unwrap().into_rgba8();
        assert_eq!(a.dimensions(), (60, 60));
    }
}
