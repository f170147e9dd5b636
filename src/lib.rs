pub mod config;
pub mod dirs;
pub mod grid;
pub mod render;
pub mod rng;
pub mod wires;

use std::time::Instant;

use config::Params;
use grid::Grid;
use wires::Wire;

pub struct Pattern {
    pub w: usize,
    pub h: usize,
    pub wires: Vec<Wire>,
    pub owner: Grid<u32>,
    pub mask: Grid<u8>,
    pub rgba: Vec<u8>,
}

pub struct Timing {
    pub name: &'static str,
    pub ms: f64,
}

/// Run the full pipeline: grow wires until the grid is exhausted, stamp the
/// pixel role mask, colorize. `w`/`h` are pattern dimensions in cells.
///
/// Callers validate `params` first; an invalid configuration here is a
/// caller bug.
pub fn generate(seed: u64, w: usize, h: usize, params: &Params) -> (Pattern, Vec<Timing>) {
    debug_assert!(params.validate(w, h).is_ok());

    let mut timings = Vec::new();
    let total_start = Instant::now();

    // 1. Grow wires over the cell grid
    let t = Instant::now();
    let (wires, owner) = wires::grow_wires(w, h, params, seed);
    timings.push(Timing {
        name: "wire_grow",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    // 2. Stamp traces and pads into the role mask
    let t = Instant::now();
    let mask = render::stamp_mask(&wires, w, h, params);
    timings.push(Timing {
        name: "stamp",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    // 3. Colorize
    let t = Instant::now();
    let rgba = render::colorize(&mask, &render::BOARD);
    timings.push(Timing {
        name: "colorize",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    let total_ms = total_start.elapsed().as_secs_f64() * 1000.0;
    timings.push(Timing {
        name: "TOTAL",
        ms: total_ms,
    });

    let pattern = Pattern {
        w,
        h,
        wires,
        owner,
        mask,
        rgba,
    };

    (pattern, timings)
}
