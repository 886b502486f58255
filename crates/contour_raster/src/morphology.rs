//! Grey-scale erosion
//!
//! Erosion with a disc takes, for every pixel, the minimum coverage inside
//! the disc centered on it. The disc is decomposed into horizontal runs: one
//! sliding-window minimum per distinct run half-width, then a minimum over
//! the rows the disc spans. Pixels outside the extent count as empty, so
//! coverage touching the extent edge erodes inward from it.

use std::collections::VecDeque;

use crate::image::Extent;
use crate::mask::Coverage;

/// Erode `coverage` with a disc of `radius` pixels
///
/// Radii are rounded to whole pixels; any positive radius erodes by at least
/// one pixel. A non-positive radius returns the coverage unchanged, and a
/// disc too wide to fit anywhere in the extent empties it.
pub fn erode(coverage: &Coverage, radius: f32) -> Coverage {
    if radius.is_nan() || radius <= 0.0 || coverage.extent.is_empty() {
        return coverage.clone();
    }

    let Extent { width, height } = coverage.extent;
    let (w, h) = (width as usize, height as usize);
    let shorter = w.min(h);

    // Clamped in float space so huge or infinite radii never reach the cast
    let r = radius.round().clamp(1.0, shorter as f32) as usize;
    if 2 * r >= shorter {
        return Coverage::empty(coverage.extent);
    }

    // Half-width of the disc's horizontal run at each row offset; never
    // increases with the offset, so equal half-widths are contiguous
    let half_widths: Vec<usize> = (0..=r)
        .map(|dy| (((r * r - dy * dy) as f32).sqrt()).floor() as usize)
        .collect();

    let mut out = vec![0u8; w * h];
    // Rows whose disc leaves the extent vertically stay empty
    out[r * w..(h - r) * w].fill(u8::MAX);

    let mut dy = 0;
    while dy <= r {
        let hw = half_widths[dy];
        let runs = horizontal_min(&coverage.data, w, h, hw);

        while dy <= r && half_widths[dy] == hw {
            for y in r..h - r {
                let above = &runs[(y - dy) * w..(y - dy + 1) * w];
                let below = &runs[(y + dy) * w..(y + dy + 1) * w];
                let row = &mut out[y * w..(y + 1) * w];
                for ((value, &a), &b) in row.iter_mut().zip(above).zip(below) {
                    *value = (*value).min(a).min(b);
                }
            }
            dy += 1;
        }
    }

    tracing::trace!(radius = r, "eroded {}x{} coverage", width, height);

    Coverage {
        extent: coverage.extent,
        data: out,
    }
}

/// Minimum over `[x - hw, x + hw]` on every row, zero where the window
/// leaves the row
fn horizontal_min(data: &[u8], w: usize, h: usize, hw: usize) -> Vec<u8> {
    let mut out = vec![0u8; w * h];
    let window = 2 * hw + 1;
    if window > w {
        return out;
    }

    let mut deque: VecDeque<usize> = VecDeque::with_capacity(window);
    for y in 0..h {
        let row = &data[y * w..(y + 1) * w];
        deque.clear();

        for x in 0..w {
            while deque.back().is_some_and(|&i| row[i] >= row[x]) {
                deque.pop_back();
            }
            deque.push_back(x);

            if deque.front().is_some_and(|&i| i + window <= x) {
                deque.pop_front();
            }

            // Window [x + 1 - window, x] is complete; its center is x - hw
            if x + 1 >= window {
                if let Some(&i) = deque.front() {
                    out[y * w + x - hw] = row[i];
                }
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coverage(width: u32, height: u32, f: impl Fn(u32, u32) -> u8) -> Coverage {
        let mut data = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Coverage {
            extent: Extent::new(width, height),
            data,
        }
    }

    #[test]
    fn test_zero_radius_is_identity() {
        let input = coverage(5, 5, |x, y| (x * 40 + y) as u8);
        assert_eq!(erode(&input, 0.0), input);
        assert_eq!(erode(&input, -2.0), input);
    }

    #[test]
    fn test_extent_edge_erodes_inward() {
        let eroded = erode(&Coverage::opaque(Extent::new(10, 10)).unwrap(), 2.0);

        for y in 0..10 {
            for x in 0..10 {
                let inside = (2..8).contains(&x) && (2..8).contains(&y);
                assert_eq!(
                    eroded.at(x, y),
                    Some(if inside { 255 } else { 0 }),
                    "({x}, {y})"
                );
            }
        }
    }

    #[test]
    fn test_disc_footprint() {
        let input = coverage(11, 11, |x, y| if (x, y) == (5, 5) { 0 } else { 255 });
        let eroded = erode(&input, 2.0);

        assert_eq!(eroded.at(5, 5), Some(0));
        assert_eq!(eroded.at(5, 7), Some(0));
        assert_eq!(eroded.at(6, 6), Some(0));
        // Diagonal distance 2.83 lies outside the disc
        assert_eq!(eroded.at(7, 7), Some(255));
    }

    #[test]
    fn test_keeps_grey_minimum() {
        let input = coverage(9, 9, |x, _| if x == 4 { 100 } else { 255 });
        let eroded = erode(&input, 1.0);
        assert_eq!(eroded.at(3, 4), Some(100));
        assert_eq!(eroded.at(6, 4), Some(255));
    }

    #[test]
    fn test_radius_wider_than_extent() {
        let eroded = erode(&Coverage::opaque(Extent::new(4, 4)).unwrap(), 10.0);
        assert!(eroded.data.iter().all(|&c| c == 0));
    }

    #[test]
    fn test_huge_radius_empties_without_scaling_work() {
        let input = Coverage::opaque(Extent::new(12, 7)).unwrap();
        for radius in [4.0, 1.0e9, f32::MAX, f32::INFINITY] {
            assert_eq!(erode(&input, radius), Coverage::empty(input.extent), "{radius}");
        }
    }

    #[test]
    fn test_largest_fitting_radius_keeps_center() {
        // 2r + 1 == 7 rows: only the middle row survives
        let eroded = erode(&Coverage::opaque(Extent::new(11, 7)).unwrap(), 3.0);
        assert_eq!(eroded.at(5, 3), Some(255));
        assert_eq!(eroded.at(5, 2), Some(0));
        assert_eq!(eroded.at(2, 3), Some(0));
    }

    #[test]
    fn test_horizontal_min_windows() {
        let row = [9, 3, 7, 8, 1, 6];
        assert_eq!(horizontal_min(&row, 6, 1, 1), vec![0, 3, 3, 1, 1, 0]);
        assert_eq!(horizontal_min(&row, 6, 1, 0), row.to_vec());
    }
}
