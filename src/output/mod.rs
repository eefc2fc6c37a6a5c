mod format;
mod report;

pub use format::save_png;
pub use report::write_report;
