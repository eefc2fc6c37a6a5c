mod batch;
mod icon;
mod options;
mod report;
mod sheet;
mod single;

pub use batch::run_manifest;
pub use icon::process_icon;
pub use options::{ProcessOptions, is_placeholder};
pub use report::{BatchReport, UnitReport, UnitStatus, UnitWarning, WrittenSprite};
pub use sheet::{SheetJob, process_sheet};
pub use single::process_single;
