/// The 8 unit steps ordered circularly: one index step is 45° of rotation,
/// so turning is index arithmetic mod 8. Even indices are diagonal steps,
/// odd indices are axis-aligned.
pub const STEPS: [[i64; 2]; 8] = [
    [1, 1],
    [1, 0],
    [1, -1],
    [0, -1],
    [-1, -1],
    [-1, 0],
    [-1, 1],
    [0, 1],
];

pub const COUNT: usize = STEPS.len();

/// Turn `delta` 45°-steps from `dir`.
#[inline]
pub fn rotate(dir: usize, delta: i32) -> usize {
    (dir as i32 + delta).rem_euclid(COUNT as i32) as usize
}

#[inline]
pub fn is_diagonal(dir: usize) -> bool {
    dir % 2 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_circular_unit_steps() {
        for dir in 0..COUNT {
            let [dx, dy] = STEPS[dir];
            assert!(dx.abs() <= 1 && dy.abs() <= 1);
            assert!(dx != 0 || dy != 0);
            // Neighboring indices differ by one 45° turn: the dot product
            // of consecutive steps is positive (angle < 90°).
            let [nx, ny] = STEPS[rotate(dir, 1)];
            assert!(dx * nx + dy * ny > 0);
            assert_ne!([dx, dy], [nx, ny]);
        }
    }

    #[test]
    fn parity_splits_diagonals_from_axis_steps() {
        for dir in 0..COUNT {
            let [dx, dy] = STEPS[dir];
            assert_eq!(is_diagonal(dir), dx != 0 && dy != 0);
        }
    }

    #[test]
    fn rotate_wraps_both_ways() {
        assert_eq!(rotate(7, 1), 0);
        assert_eq!(rotate(0, -1), 7);
        assert_eq!(rotate(3, -5), 6);
    }
}
