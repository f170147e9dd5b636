use rayon::prelude::*;

use crate::config::Params;
use crate::grid::{Grid, UNCLAIMED};
use crate::rng::splitmix32;
use crate::wires::Wire;

/// Raster role codes.
pub const BACKGROUND: u8 = 0;
pub const TRACE: u8 = 1;
pub const PAD: u8 = 2;

/// Colors for the three raster roles. The core never sees these; pick a
/// table at colorize time.
#[derive(Clone, Copy, Debug)]
pub struct RoleColors {
    pub background: [u8; 4],
    pub trace: [u8; 4],
    pub pad: [u8; 4],
}

/// Soldermask board look: dark green substrate, green traces, tinned pads.
pub const BOARD: RoleColors = RoleColors {
    background: [8, 46, 30, 255],
    trace: [52, 138, 90, 255],
    pad: [208, 213, 218, 255],
};

/// White-on-black mask output.
pub const MASK: RoleColors = RoleColors {
    background: [0, 0, 0, 255],
    trace: [255, 255, 255, 255],
    pad: [255, 255, 255, 255],
};

#[inline]
fn center(c: [i64; 2], cell_size: usize, off_x: i64, off_y: i64) -> (f32, f32) {
    let cs = cell_size as i64;
    (
        (c[0] * cs + cs / 2 + off_x) as f32,
        (c[1] * cs + cs / 2 + off_y) as f32,
    )
}

/// Pattern-size shifts along one axis whose copy of [min_c, max_c] touches
/// the canvas. Without wraparound only the identity shift applies.
fn axis_offsets(min_c: i64, max_c: i64, size: i64, wrap: bool, margin: i64) -> Vec<i64> {
    if !wrap {
        return vec![0];
    }
    let k_lo = (-margin - max_c).div_euclid(size);
    let k_hi = (size - 1 + margin - min_c).div_euclid(size);
    (k_lo..=k_hi).map(|k| k * size).collect()
}

/// All tile shifts needed to show every segment of this wire on canvas.
fn tile_offsets(wire: &Wire, pw: i64, ph: i64, params: &Params, margin: i64) -> Vec<(i64, i64)> {
    let cs = params.cell_size as i64;
    let mut min_x = i64::MAX;
    let mut max_x = i64::MIN;
    let mut min_y = i64::MAX;
    let mut max_y = i64::MIN;
    for c in &wire.cells {
        let px = c[0] * cs + cs / 2;
        let py = c[1] * cs + cs / 2;
        min_x = min_x.min(px);
        max_x = max_x.max(px);
        min_y = min_y.min(py);
        max_y = max_y.max(py);
    }

    let xs = axis_offsets(min_x, max_x, pw, params.wrap_x, margin);
    let ys = axis_offsets(min_y, max_y, ph, params.wrap_y, margin);
    let mut out = Vec::with_capacity(xs.len() * ys.len());
    for &oy in &ys {
        for &ox in &xs {
            out.push((ox, oy));
        }
    }
    out
}

/// Fill every pixel within `r` of the segment (x0,y0)-(x1,y1). A zero
/// length segment is a filled circle.
fn stamp_capsule(mask: &mut Grid<u8>, x0: f32, y0: f32, x1: f32, y1: f32, r: f32, role: u8) {
    let lo_x = (((x0.min(x1) - r).floor()) as i64).max(0);
    let hi_x = (((x0.max(x1) + r).ceil()) as i64).min(mask.w as i64 - 1);
    let lo_y = (((y0.min(y1) - r).floor()) as i64).max(0);
    let hi_y = (((y0.max(y1) + r).ceil()) as i64).min(mask.h as i64 - 1);
    if lo_x > hi_x || lo_y > hi_y {
        return;
    }

    let dx = x1 - x0;
    let dy = y1 - y0;
    let len_sq = dx * dx + dy * dy;
    let r_sq = r * r;

    for y in lo_y..=hi_y {
        for x in lo_x..=hi_x {
            let px = x as f32;
            let py = y as f32;
            let t = if len_sq > 0.0 {
                (((px - x0) * dx + (py - y0) * dy) / len_sq).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let ex = px - (x0 + t * dx);
            let ey = py - (y0 + t * dy);
            if ex * ex + ey * ey <= r_sq {
                mask.set(x as usize, y as usize, role);
            }
        }
    }
}

/// Rasterize wires into a pixel-space role mask. Wires shorter than
/// `min_wire_len` occupy their grid cells but draw nothing. Under
/// wraparound every wire is stamped at each pattern-size shift whose copy
/// reaches the canvas, so tile-crossing segments show on both sides of the
/// seam.
pub fn stamp_mask(wires: &[Wire], w: usize, h: usize, params: &Params) -> Grid<u8> {
    let pw = (w * params.cell_size) as i64;
    let ph = (h * params.cell_size) as i64;
    let mut mask = Grid::<u8>::new(pw as usize, ph as usize);

    let margin = params.trace_width.max(params.pad_radius).ceil() as i64 + 1;
    let drawn: Vec<&Wire> = wires
        .iter()
        .filter(|wr| wr.cells.len() >= params.min_wire_len)
        .collect();

    // Trace pass first; pads stamp afterwards and win overlaps.
    let r = params.trace_width / 2.0;
    for &wire in &drawn {
        for (off_x, off_y) in tile_offsets(wire, pw, ph, params, margin) {
            for pair in wire.cells.windows(2) {
                let (x0, y0) = center(pair[0], params.cell_size, off_x, off_y);
                let (x1, y1) = center(pair[1], params.cell_size, off_x, off_y);
                stamp_capsule(&mut mask, x0, y0, x1, y1, r, TRACE);
            }
        }
    }

    for &wire in &drawn {
        for (off_x, off_y) in tile_offsets(wire, pw, ph, params, margin) {
            let first = wire.cells[0];
            let last = wire.cells[wire.cells.len() - 1];
            for c in [first, last] {
                let (cx, cy) = center(c, params.cell_size, off_x, off_y);
                stamp_capsule(&mut mask, cx, cy, cx, cy, params.pad_radius, PAD);
            }
        }
    }

    mask
}

/// Map the role mask to RGBA through a color table.
pub fn colorize(mask: &Grid<u8>, colors: &RoleColors) -> Vec<u8> {
    let w = mask.w;
    let h = mask.h;
    let mut rgba = vec![0u8; w * h * 4];

    rgba.par_chunks_mut(w * 4).enumerate().for_each(|(y, row)| {
        for x in 0..w {
            let color = match mask.get(x, y) {
                PAD => colors.pad,
                TRACE => colors.trace,
                _ => colors.background,
            };
            row[x * 4..x * 4 + 4].copy_from_slice(&color);
        }
    });

    rgba
}

/// Diagnostic: one pixel per grid cell, colored by owning wire.
pub fn render_owners(owner: &Grid<u32>) -> Vec<u8> {
    let w = owner.w;
    let h = owner.h;
    let mut rgba = vec![0u8; w * h * 4];
    for i in 0..w * h {
        let id = owner.data[i];
        let color = if id == UNCLAIMED {
            [0, 0, 0, 255]
        } else {
            let hs = splitmix32(id.wrapping_mul(13).wrapping_add(7));
            [
                (hs & 0xFF) as u8 | 40,
                ((hs >> 8) & 0xFF) as u8 | 40,
                ((hs >> 16) & 0xFF) as u8 | 40,
                255,
            ]
        };
        rgba[i * 4..i * 4 + 4].copy_from_slice(&color);
    }
    rgba
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raster_params() -> Params {
        Params {
            min_wire_len: 1,
            cell_size: 8,
            trace_width: 2.0,
            pad_radius: 2.0,
            ..Params::default()
        }
    }

    fn wire(cells: Vec<[i64; 2]>) -> Wire {
        Wire { cells, last_dir: 0 }
    }

    #[test]
    fn short_wire_draws_nothing_but_long_wire_inks() {
        let mut params = raster_params();
        params.min_wire_len = 2;

        let single = [wire(vec![[1, 1]])];
        let mask = stamp_mask(&single, 4, 4, &params);
        assert!(mask.data.iter().all(|&v| v == BACKGROUND));

        let pair = [wire(vec![[1, 1], [2, 1]])];
        let mask = stamp_mask(&pair, 4, 4, &params);
        assert!(mask.data.iter().any(|&v| v == TRACE));
        assert!(mask.data.iter().any(|&v| v == PAD));
    }

    #[test]
    fn pads_sit_on_wire_endpoints() {
        let params = raster_params();
        let mask = stamp_mask(&[wire(vec![[0, 0], [1, 0], [2, 0]])], 4, 4, &params);
        // Endpoint cell centers are pads; the middle cell center is trace.
        assert_eq!(mask.get(4, 4), PAD);
        assert_eq!(mask.get(20, 4), PAD);
        assert_eq!(mask.get(12, 4), TRACE);
    }

    #[test]
    fn wrapped_wire_inks_both_sides_of_the_seam() {
        let mut params = raster_params();
        params.wrap_x = true;
        // Walk continues past the pattern edge: x = 3 then unwrapped x = 4.
        let mask = stamp_mask(&[wire(vec![[3, 0], [4, 0]])], 4, 4, &params);
        assert_ne!(mask.get(28, 4), BACKGROUND);
        assert_ne!(mask.get(0, 4), BACKGROUND);
    }

    #[test]
    fn colorize_applies_role_table() {
        let mut mask = Grid::<u8>::new(2, 1);
        mask.set(0, 0, TRACE);
        mask.set(1, 0, PAD);
        let rgba = colorize(&mask, &MASK);
        assert_eq!(&rgba[0..4], &[255, 255, 255, 255]);
        assert_eq!(&rgba[4..8], &[255, 255, 255, 255]);

        let rgba = colorize(&mask, &BOARD);
        assert_eq!(&rgba[0..4], &BOARD.trace);
        assert_eq!(&rgba[4..8], &BOARD.pad);
    }

    #[test]
    fn owner_layer_separates_wires_from_unclaimed() {
        let mut owner = Grid::<u32>::filled(2, 1, UNCLAIMED);
        owner.set(0, 0, 3);
        let rgba = render_owners(&owner);
        assert_ne!(&rgba[0..3], &[0, 0, 0]);
        assert_eq!(&rgba[4..8], &[0, 0, 0, 255]);
    }
}
