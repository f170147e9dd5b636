use crate::dirs;
use crate::grid::{self, Grid, UNCLAIMED};
use crate::rng::Rng;

const TAKEN: usize = usize::MAX;

/// Working set of unclaimed start positions. Flat position list plus a
/// per-cell slot index, so uniform picks and removals are O(1).
pub struct SeedPool {
    positions: Vec<(usize, usize)>,
    slots: Vec<usize>,
    w: usize,
}

impl SeedPool {
    pub fn new(w: usize, h: usize) -> Self {
        let mut positions = Vec::with_capacity(w * h);
        for y in 0..h {
            for x in 0..w {
                positions.push((x, y));
            }
        }
        let slots = (0..w * h).collect();
        Self { positions, slots, w }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Uniform pick. Does not remove: claimed cells leave the pool via
    /// `remove` as the wire grows over them.
    pub fn pick(&self, rng: &mut Rng) -> (usize, usize) {
        self.positions[rng.range_usize(self.positions.len())]
    }

    pub fn remove(&mut self, x: usize, y: usize) {
        let cell = y * self.w + x;
        let slot = self.slots[cell];
        debug_assert!(slot != TAKEN);
        self.positions.swap_remove(slot);
        if slot < self.positions.len() {
            let (mx, my) = self.positions[slot];
            self.slots[my * self.w + mx] = slot;
        }
        self.slots[cell] = TAKEN;
    }
}

/// Pick a wire's starting heading: scan the 8 directions in a shuffled
/// order and take the first one whose neighbor is a valid, unclaimed cell.
/// A fully enclosed seed keeps direction 0 as a placeholder; the wire then
/// terminates on its first growth attempt and stays single-celled.
pub fn initial_direction(
    owner: &Grid<u32>,
    x: i64,
    y: i64,
    wrap_x: bool,
    wrap_y: bool,
    rng: &mut Rng,
) -> usize {
    let mut order = [0usize, 1, 2, 3, 4, 5, 6, 7];
    for i in (1..order.len()).rev() {
        let j = rng.range_usize(i + 1);
        order.swap(i, j);
    }

    for &dir in &order {
        let [dx, dy] = dirs::STEPS[dir];
        let Some((nx, ny)) = grid::normalize(x + dx, y + dy, owner.w, owner.h, wrap_x, wrap_y)
        else {
            continue;
        };
        if owner.get(nx, ny) == UNCLAIMED {
            return dir;
        }
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_starts_full_and_drains() {
        let mut pool = SeedPool::new(3, 2);
        assert_eq!(pool.len(), 6);
        pool.remove(2, 1);
        pool.remove(0, 0);
        assert_eq!(pool.len(), 4);

        let mut rng = Rng::new(5);
        for _ in 0..100 {
            let (x, y) = pool.pick(&mut rng);
            assert!(!(x == 2 && y == 1));
            assert!(!(x == 0 && y == 0));
        }
    }

    #[test]
    fn remove_keeps_slot_map_consistent() {
        let mut pool = SeedPool::new(4, 4);
        // Drain in an arbitrary order; every removal must hit a live slot.
        for (x, y) in [(1, 1), (0, 0), (3, 3), (1, 1)] {
            if (x, y) == (1, 1) && pool.slots[y * 4 + x] == TAKEN {
                continue;
            }
            pool.remove(x, y);
        }
        assert_eq!(pool.len(), 13);
    }

    #[test]
    fn initial_direction_points_at_an_open_neighbor() {
        let owner = Grid::<u32>::filled(5, 5, UNCLAIMED);
        let mut rng = Rng::new(11);
        for _ in 0..20 {
            let dir = initial_direction(&owner, 2, 2, false, false, &mut rng);
            assert!(dir < dirs::COUNT);
        }
    }

    #[test]
    fn enclosed_seed_falls_back_to_placeholder() {
        // Claim everything except the center.
        let mut owner = Grid::<u32>::filled(3, 3, 1);
        owner.set(1, 1, UNCLAIMED);
        let mut rng = Rng::new(3);
        assert_eq!(initial_direction(&owner, 1, 1, false, false, &mut rng), 0);
    }

    #[test]
    fn corner_without_wraparound_skips_outside_neighbors() {
        let owner = Grid::<u32>::filled(4, 4, UNCLAIMED);
        let mut rng = Rng::new(17);
        for _ in 0..20 {
            let dir = initial_direction(&owner, 0, 0, false, false, &mut rng);
            let [dx, dy] = dirs::STEPS[dir];
            assert!(dx >= 0 && dy >= 0);
        }
    }
}
