use crate::types::{MAX_RESOLUTION, MIN_RESOLUTION, SizeRange};

/// Maps a file size onto a thumbnail resolution in
/// `[MIN_RESOLUTION, MAX_RESOLUTION]` by linear interpolation across the
/// batch's size range. A degenerate range (every file the same size, or a
/// single file) maps everything to the minimum rather than dividing by zero.
/// Sizes outside the range clamp; a zero-byte file sits below a nonzero
/// minimum and lands on `MIN_RESOLUTION`.
pub fn scale(size: u64, range: SizeRange) -> u32 {
    if range.span() == 0 {
        return MIN_RESOLUTION;
    }

    let ratio = (size as f64 - range.min as f64) / range.span() as f64;
    let resolution = ratio * f64::from(MAX_RESOLUTION - MIN_RESOLUTION) + f64::from(MIN_RESOLUTION);

    resolution
        .round()
        .clamp(f64::from(MIN_RESOLUTION), f64::from(MAX_RESOLUTION)) as u32
}
