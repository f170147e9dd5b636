use crate::config::Params;
use crate::dirs;
use crate::grid::{self, Grid, UNCLAIMED};
use crate::rng::Rng;

use super::seed::{SeedPool, initial_direction};

/// One finished trace: the ordered walk positions, first to last.
///
/// Positions are unwrapped walk coordinates. Under wraparound a path keeps
/// stepping past the pattern edge (x = W, W+1, ...) while the claimed grid
/// slot is the coordinate reduced modulo the pattern size, so consecutive
/// entries always differ by exactly one direction-table step and the
/// polyline renders seamlessly across tile seams.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Wire {
    pub cells: Vec<[i64; 2]>,
    pub last_dir: usize,
}

/// A diagonal step visually bisects the two cells flanking it. The step is
/// rejected when both flanks are claimed by two different wires: that is
/// exactly the geometry of one trace crossing another. A free flank, or
/// both flanks held by one wire, passes.
///
/// Normalization is per-axis, so the flank slots of the step from -> to are
/// (from.x, to.y) and (to.x, from.y) in grid space.
#[inline]
fn crossing_blocked(owner: &Grid<u32>, from: (usize, usize), to: (usize, usize)) -> bool {
    let a = owner.get(from.0, to.1);
    let b = owner.get(to.0, from.1);
    a != UNCLAIMED && b != UNCLAIMED && a != b
}

/// Grow one wire from an already-claimed start cell until it hits the
/// length cap or runs out of acceptable steps.
fn grow_wire(
    owner: &mut Grid<u32>,
    pool: &mut SeedPool,
    wire_id: u32,
    start: (usize, usize),
    params: &Params,
    rng: &mut Rng,
) -> Wire {
    let mut cur = [start.0 as i64, start.1 as i64];
    let mut cur_slot = start;
    let mut cells = vec![cur];
    let mut last_dir =
        initial_direction(owner, cur[0], cur[1], params.wrap_x, params.wrap_y, rng);

    while cells.len() < params.max_wire_len {
        // Candidate turns around the current heading: straight first, then
        // right/left in coin-flipped order.
        let mut deltas = if rng.coin() {
            [0i32, 1, -1]
        } else {
            [0i32, -1, 1]
        };
        let mut remaining = deltas.len();
        let mut accepted = false;

        while remaining > 0 {
            // Biased pop: u^straightness concentrates near 0, so higher
            // exponents favor the front of the list (keep going straight).
            let u = rng.next_f32().powf(params.straightness);
            let pick = ((u * remaining as f32) as usize).min(remaining - 1);
            let delta = deltas[pick];
            for i in pick..remaining - 1 {
                deltas[i] = deltas[i + 1];
            }
            remaining -= 1;

            let dir = dirs::rotate(last_dir, delta);
            let [dx, dy] = dirs::STEPS[dir];
            let to = [cur[0] + dx, cur[1] + dy];
            let Some(to_slot) = grid::normalize(
                to[0],
                to[1],
                owner.w,
                owner.h,
                params.wrap_x,
                params.wrap_y,
            ) else {
                continue;
            };
            if owner.get(to_slot.0, to_slot.1) != UNCLAIMED {
                continue;
            }
            if dirs::is_diagonal(dir) && crossing_blocked(owner, cur_slot, to_slot) {
                continue;
            }

            owner.set(to_slot.0, to_slot.1, wire_id);
            pool.remove(to_slot.0, to_slot.1);
            cells.push(to);
            cur = to;
            cur_slot = to_slot;
            last_dir = dir;
            accepted = true;
            break;
        }

        if !accepted {
            break;
        }
    }

    Wire { cells, last_dir }
}

/// Driver: keep seeding wires at random unclaimed cells until every cell
/// belongs to exactly one wire. The pool strictly shrinks (a wire claims at
/// least its seed cell), so this always terminates.
pub fn grow_wires(w: usize, h: usize, params: &Params, seed: u64) -> (Vec<Wire>, Grid<u32>) {
    let mut rng = Rng::new(seed);
    let mut owner = Grid::filled(w, h, UNCLAIMED);
    let mut pool = SeedPool::new(w, h);
    let mut wires = Vec::new();

    while !pool.is_empty() {
        let start = pool.pick(&mut rng);
        let wire_id = wires.len() as u32;
        owner.set(start.0, start.1, wire_id);
        pool.remove(start.0, start.1);
        wires.push(grow_wire(
            &mut owner, &mut pool, wire_id, start, params, &mut rng,
        ));
    }

    (wires, owner)
}
