//! Temperature - ambient heat field and particle heat exchange
//!
//! The ambient field is a coarse grid (one cell per `CELL_SIZE`² pixels) that
//! diffuses once per completed frame and slowly relaxes toward the world's
//! ambient temperature. Material particles exchange heat with their direct
//! neighbours and with the ambient cell they sit in, then check their phase
//! change thresholds.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::behaviors::{UpdateContext, UpdateOutcome};
use crate::elements::{check_phase_change, is_energy, props};

pub const CELL_SIZE: u32 = 4;

const DIFFUSION_RATE: f32 = 0.25;
const AMBIENT_PULL: f32 = 0.01;
/// Fraction of the particle/air difference exchanged per update
const AIR_EXCHANGE: f32 = 0.05;
/// Air cells hold far more mass than one particle
const AIR_SHARE: f32 = 0.1;

const NEIGHBOURS: [(i32, i32); 4] = [(0, -1), (-1, 0), (1, 0), (0, 1)];

pub struct AmbientHeat {
    cells_x: u32,
    cells_y: u32,
    values: Vec<f32>,
    scratch: Vec<f32>,
}

impl AmbientHeat {
    pub fn new(width: u32, height: u32, ambient: f32) -> Self {
        let cells_x = ((width + CELL_SIZE - 1) / CELL_SIZE).max(1);
        let cells_y = ((height + CELL_SIZE - 1) / CELL_SIZE).max(1);
        let len = (cells_x as usize) * (cells_y as usize);
        Self {
            cells_x,
            cells_y,
            values: vec![ambient; len],
            scratch: vec![ambient; len],
        }
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.cells_x, self.cells_y)
    }

    #[inline]
    fn cell_for_pixel(&self, x: u32, y: u32) -> usize {
        let cx = (x / CELL_SIZE).min(self.cells_x - 1);
        let cy = (y / CELL_SIZE).min(self.cells_y - 1);
        (cy as usize) * (self.cells_x as usize) + (cx as usize)
    }

    #[inline]
    pub fn at_pixel(&self, x: u32, y: u32) -> f32 {
        self.values[self.cell_for_pixel(x, y)]
    }

    #[inline]
    pub fn add_at_pixel(&mut self, x: u32, y: u32, delta: f32) {
        let idx = self.cell_for_pixel(x, y);
        self.values[idx] += delta;
    }

    pub fn fill(&mut self, temp: f32) {
        self.values.fill(temp);
    }

    pub fn average(&self) -> f32 {
        self.values.iter().sum::<f32>() / self.values.len() as f32
    }

    /// One diffusion pass
    /// PARALLEL: rows are independent (read `values`, write `scratch`)
    pub fn diffuse(&mut self, ambient: f32) {
        let w = self.cells_x as usize;
        let h = self.cells_y as usize;
        let values = &self.values;

        #[cfg(feature = "parallel")]
        {
            self.scratch
                .par_chunks_mut(w)
                .enumerate()
                .for_each(|(y, row)| diffuse_row(values, row, w, h, y, ambient));
        }
        #[cfg(not(feature = "parallel"))]
        {
            for (y, row) in self.scratch.chunks_mut(w).enumerate() {
                diffuse_row(values, row, w, h, y, ambient);
            }
        }

        std::mem::swap(&mut self.values, &mut self.scratch);
    }
}

fn diffuse_row(values: &[f32], row: &mut [f32], w: usize, h: usize, y: usize, ambient: f32) {
    for (x, out) in row.iter_mut().enumerate() {
        let v = values[y * w + x];
        let left = if x > 0 { values[y * w + x - 1] } else { v };
        let right = if x + 1 < w { values[y * w + x + 1] } else { v };
        let up = if y > 0 { values[(y - 1) * w + x] } else { v };
        let down = if y + 1 < h { values[(y + 1) * w + x] } else { v };
        let avg = (left + right + up + down) * 0.25;
        let blended = v + (avg - v) * DIFFUSION_RATE;
        *out = blended + (ambient - blended) * AMBIENT_PULL;
    }
}

/// Heat exchange for the particle in `ctx`, followed by its phase check
pub fn process_particle_heat(ctx: &mut UpdateContext) -> UpdateOutcome {
    let Some(p) = ctx.store.get(ctx.index).copied().filter(|p| !p.is_empty()) else {
        return UpdateOutcome::IDLE;
    };
    if is_energy(p.kind) {
        return UpdateOutcome::IDLE;
    }
    let Some(me) = props(p.kind) else {
        return UpdateOutcome::IDLE;
    };
    if me.heat_conductivity == 0 {
        return UpdateOutcome::IDLE;
    }
    let k = me.heat_conductivity as f32 / 255.0;

    let mut total = p.temp;
    let mut count = 1.0f32;
    for (dx, dy) in NEIGHBOURS {
        let nx = p.x as i32 + dx;
        let ny = p.y as i32 + dy;
        if !ctx.store.in_bounds(nx, ny) {
            continue;
        }
        let Some(other) = ctx.store.at(nx as u32, ny as u32) else {
            continue;
        };
        let Some(op) = ctx.store.get(other) else {
            continue;
        };
        if props(op.kind).map(|pp| pp.heat_conductivity > 0).unwrap_or(false) {
            total += op.temp;
            count += 1.0;
        }
    }

    let avg = total / count;
    let mut temp = p.temp + (avg - p.temp) * k;

    let air = ctx.heat.at_pixel(p.x, p.y);
    let delta = (air - temp) * AIR_EXCHANGE * k;
    temp += delta;
    ctx.heat.add_at_pixel(p.x, p.y, -delta * AIR_SHARE);

    ctx.store.set_temp(ctx.index, temp);
    apply_phase_change(ctx)
}

/// Transmute the particle in `ctx` if its temperature crossed a threshold
pub fn apply_phase_change(ctx: &mut UpdateContext) -> UpdateOutcome {
    let Some(p) = ctx.store.get(ctx.index).copied().filter(|p| !p.is_empty()) else {
        return UpdateOutcome::IDLE;
    };
    match check_phase_change(p.kind, p.temp) {
        Some(new_kind) if ctx.store.transmute(ctx.index, new_kind) => UpdateOutcome {
            interesting: true,
            ..UpdateOutcome::IDLE
        },
        _ => UpdateOutcome::IDLE,
    }
}
