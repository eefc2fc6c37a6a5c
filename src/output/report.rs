use std::fs;
use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use crate::error::SheetcutError;
use crate::pipeline::BatchReport;

#[derive(Serialize)]
struct ReportFile<'a> {
    meta: Meta,
    #[serde(flatten)]
    report: &'a BatchReport,
}

#[derive(Serialize)]
struct Meta {
    app: &'static str,
    version: &'static str,
}

/// Write a batch report as pretty JSON
pub fn write_report(report: &BatchReport, path: &Path) -> Result<()> {
    let output = ReportFile {
        meta: Meta {
            app: "sheetcut",
            version: env!("CARGO_PKG_VERSION"),
        },
        report,
    };

    let content = serde_json::to_string_pretty(&output)?;

    fs::write(path, content).map_err(|e| SheetcutError::OutputWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{UnitReport, UnitStatus, UnitWarning};
    use std::path::PathBuf;

    #[test]
    fn test_report_json_shape() {
        let mut unit = UnitReport::new("shoes", PathBuf::from("shoes.png"));
        unit.warnings.push(UnitWarning::GridFallback {
            found: 1,
            expected: 4,
        });
        let mut missing = UnitReport::new("icon", PathBuf::from("icon.png"));
        missing.status = UnitStatus::SourceMissing;
        let report = BatchReport {
            units: vec![unit, missing],
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        write_report(&report, &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["meta"]["app"], "sheetcut");
        assert_eq!(value["units"][0]["label"], "shoes");
        assert_eq!(value["units"][0]["status"], "completed");
        assert_eq!(value["units"][0]["warnings"][0]["kind"], "grid_fallback");
        assert_eq!(value["units"][0]["warnings"][0]["expected"], 4);
        assert_eq!(value["units"][1]["status"], "source_missing");
    }
}
