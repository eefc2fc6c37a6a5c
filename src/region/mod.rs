mod contour;
mod grid;
mod merge;
mod rect;

pub use contour::{RegionSearch, find_regions, presence_mask};
pub use grid::grid_regions;
pub use merge::{default_merge_gap, merge_nearby};
pub use rect::Rect;
