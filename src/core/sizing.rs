/// Pixel height allotted to one table row
pub const ROW_HEIGHT_PX: u32 = 25;

/// Table height before any fetch has completed
pub const INITIAL_HEIGHT_PX: u32 = 400;

/// Display height for a row count. Unbounded: large counts grow linearly.
pub fn compute_height(row_count: usize) -> u32 {
    u32::try_from(row_count)
        .unwrap_or(u32::MAX)
        .saturating_mul(ROW_HEIGHT_PX)
}

/// Terminal lines for a pixel height, one line per row
pub fn rows_for_height(height_px: u32) -> u16 {
    u16::try_from(height_px / ROW_HEIGHT_PX).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_height() {
        assert_eq!(compute_height(0), 0);
        assert_eq!(compute_height(2), 50);
        assert_eq!(compute_height(3), 75);
        assert_eq!(compute_height(10_000), 250_000);
    }

    #[test]
    fn test_compute_height_saturates() {
        assert_eq!(compute_height(usize::MAX), u32::MAX);
    }

    #[test]
    fn test_rows_for_height() {
        assert_eq!(rows_for_height(compute_height(7)), 7);
        assert_eq!(rows_for_height(0), 0);
        assert_eq!(rows_for_height(u32::MAX), u16::MAX);
    }

    #[test]
    fn test_initial_height_is_sixteen_rows() {
        assert_eq!(rows_for_height(INITIAL_HEIGHT_PX), 16);
    }
}
