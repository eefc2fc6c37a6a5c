use std::fmt;
use std::path::PathBuf;

use log::warn;
use serde::Serialize;

/// Something worth a human's attention that did not stop a unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UnitWarning {
    /// Contour detection found fewer regions than names; grid split used instead
    GridFallback { found: usize, expected: usize },
    /// Nearby regions were merged down toward the expected count
    MergedRegions { before: usize, after: usize },
    /// No region at this name's position
    MissingRegion { name: String },
    /// The region had no area after clamping; nothing written
    EmptyRegion { name: String },
    /// The sprite was written but has no visible pixels
    TransparentSprite { name: String },
}

impl fmt::Display for UnitWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitWarning::GridFallback { found, expected } => write!(
                f,
                "found {found} regions for {expected} names, using grid fallback"
            ),
            UnitWarning::MergedRegions { before, after } => {
                write!(f, "merged {before} regions into {after}")
            }
            UnitWarning::MissingRegion { name } => write!(f, "no region for '{name}'"),
            UnitWarning::EmptyRegion { name } => write!(f, "region for '{name}' is empty"),
            UnitWarning::TransparentSprite { name } => {
                write!(f, "sprite '{name}' is fully transparent")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitStatus {
    Completed,
    /// Source image did not exist; nothing was attempted
    SourceMissing,
    Failed(String),
}

/// A file written by a unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrittenSprite {
    pub name: String,
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// Outcome of one manifest unit
#[derive(Debug, Clone, Serialize)]
pub struct UnitReport {
    pub label: String,
    pub source: PathBuf,
    pub status: UnitStatus,
    pub written: Vec<WrittenSprite>,
    /// Placeholder names whose regions were consumed but not written
    pub skipped: Vec<String>,
    pub warnings: Vec<UnitWarning>,
}

impl UnitReport {
    pub fn new(label: impl Into<String>, source: PathBuf) -> Self {
        Self {
            label: label.into(),
            source,
            status: UnitStatus::Completed,
            written: Vec::new(),
            skipped: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn source_missing(label: impl Into<String>, source: PathBuf) -> Self {
        let mut report = Self::new(label, source);
        report.status = UnitStatus::SourceMissing;
        report
    }

    pub fn failed(label: impl Into<String>, source: PathBuf, message: String) -> Self {
        let mut report = Self::new(label, source);
        report.status = UnitStatus::Failed(message);
        report
    }

    /// Log a warning and keep it in the report
    pub fn warn(&mut self, warning: UnitWarning) {
        warn!("  {}: {}", self.label, warning);
        self.warnings.push(warning);
    }

    pub fn is_completed(&self) -> bool {
        self.status == UnitStatus::Completed
    }

    pub fn written_names(&self) -> Vec<&str> {
        self.written.iter().map(|s| s.name.as_str()).collect()
    }
}

/// Outcome of a whole manifest run
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub units: Vec<UnitReport>,
}

impl BatchReport {
    pub fn written_count(&self) -> usize {
        self.units.iter().map(|u| u.written.len()).sum()
    }

    pub fn warning_count(&self) -> usize {
        self.units.iter().map(|u| u.warnings.len()).sum()
    }

    pub fn missing_count(&self) -> usize {
        self.count_status(|s| matches!(s, UnitStatus::SourceMissing))
    }

    pub fn failed_count(&self) -> usize {
        self.count_status(|s| matches!(s, UnitStatus::Failed(_)))
    }

    pub fn is_success(&self) -> bool {
        self.failed_count() == 0
    }

    fn count_status(&self, pred: impl Fn(&UnitStatus) -> bool) -> usize {
        self.units.iter().filter(|u| pred(&u.status)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let mut ok = UnitReport::new("a", PathBuf::from("a.png"));
        ok.written.push(WrittenSprite {
            name: "coin".to_string(),
            path: PathBuf::from("ui/coin.png"),
            width: 10,
            height: 12,
        });
        ok.warn(UnitWarning::MissingRegion {
            name: "gear".to_string(),
        });
        let missing = UnitReport::source_missing("b", PathBuf::from("b.png"));
        let failed = UnitReport::failed("c", PathBuf::from("c.png"), "corrupt".to_string());

        let batch = BatchReport {
            units: vec![ok, missing, failed],
        };

        assert_eq!(batch.written_count(), 1);
        assert_eq!(batch.warning_count(), 1);
        assert_eq!(batch.missing_count(), 1);
        assert_eq!(batch.failed_count(), 1);
        assert!(!batch.is_success());
        assert_eq!(batch.units[0].written_names(), vec!["coin"]);
    }

    #[test]
    fn test_source_missing_records_status_only() {
        let report = UnitReport::source_missing("shoes", PathBuf::from("raw/shoes.png"));

        assert_eq!(report.status, UnitStatus::SourceMissing);
        assert!(report.warnings.is_empty());
        assert!(report.written.is_empty());
        assert!(!report.is_completed());
    }

    #[test]
    fn test_warning_display() {
        let warning = UnitWarning::GridFallback {
            found: 2,
            expected: 5,
        };
        assert_eq!(
            warning.to_string(),
            "found 2 regions for 5 names, using grid fallback"
        );
    }
}
