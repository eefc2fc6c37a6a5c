use super::Rect;

/// Default horizontal merge distance for a sheet: `width / (expected * 2)`.
pub fn default_merge_gap(sheet_width: u32, expected_count: usize) -> u32 {
    let divisor = u32::try_from(expected_count.saturating_mul(2)).unwrap_or(u32::MAX);
    if divisor == 0 {
        return 0;
    }
    sheet_width / divisor
}

/// Merge left-to-right sorted regions whose horizontal gap is below `gap`.
///
/// Each region is folded into the previous accumulated region when it starts
/// before that region's right edge plus `gap`; otherwise it starts a new one.
pub fn merge_nearby(regions: &[Rect], gap: u32) -> Vec<Rect> {
    let mut merged: Vec<Rect> = Vec::with_capacity(regions.len());

    for region in regions {
        match merged.last_mut() {
            Some(last) if region.x < last.right().saturating_add(gap) => {
                *last = last.union(region);
            }
            _ => merged.push(*region),
        }
    }

    merged
}
