use super::Rect;

/// Split a canvas into `count` equal-width full-height columns.
///
/// Column width is `width / count` (floored); any remainder pixels on the
/// right edge belong to no column. Trimming to content happens later.
pub fn grid_regions(width: u32, height: u32, count: usize) -> Vec<Rect> {
    let Ok(columns) = u32::try_from(count) else {
        return Vec::new();
    };
    if columns == 0 {
        return Vec::new();
    }

    let column_width = width / columns;
    (0..columns)
        .map(|i| Rect::new(i * column_width, 0, column_width, height))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_even_split() {
        let regions = grid_regions(400, 100, 4);

        assert_eq!(regions.len(), 4);
        assert_eq!(regions[0], Rect::new(0, 0, 100, 100));
        assert_eq!(regions[3], Rect::new(300, 0, 100, 100));
    }

    #[test]
    fn test_remainder_is_dropped() {
        for (width, count) in [(500, 3), (101, 4), (7, 7), (1024, 6)] {
            let regions = grid_regions(width, 10, count);
            let expected_width = width / count as u32;

            assert_eq!(regions.len(), count);
            assert!(regions.iter().all(|r| r.width == expected_width));
            assert!(regions.iter().all(|r| r.height == 10));

            let total: u32 = regions.iter().map(|r| r.width).sum();
            assert!(total <= width);
            assert!(regions.last().is_some_and(|r| r.right() <= width));
        }
    }

    #[test]
    fn test_zero_count() {
        assert!(grid_regions(100, 100, 0).is_empty());
    }

    #[test]
    fn test_more_columns_than_pixels() {
        let regions = grid_regions(3, 10, 5);
        assert_eq!(regions.len(), 5);
        assert!(regions.iter().all(Rect::is_empty));
    }
}
