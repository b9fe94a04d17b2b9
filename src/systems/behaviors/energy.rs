//! EnergyBehavior - photons
//!
//! Photons travel on the energy layer one cell per update along their
//! velocity, pass over material that allows it, and die at the grid edge,
//! against opaque material, or when their life runs out.

use super::{Behavior, UpdateContext, UpdateOutcome};
use crate::elements::{has_flag, FLAG_LIFE_DECAY, FLAG_PHOTON_PASS};

pub struct EnergyBehavior;

#[inline]
fn unit_step(v: f32) -> i32 {
    if v > 0.0 { 1 } else if v < 0.0 { -1 } else { 0 }
}

impl EnergyBehavior {
    pub fn new() -> Self {
        Self
    }
}

impl Behavior for EnergyBehavior {
    fn update(&self, ctx: &mut UpdateContext) -> UpdateOutcome {
        let Some(p) = ctx.store.get(ctx.index).copied() else {
            return UpdateOutcome::IDLE;
        };

        if p.life > 0 && has_flag(p.kind, FLAG_LIFE_DECAY) {
            let life = p.life - 1;
            if life == 0 {
                ctx.store.kill(ctx.index);
                return UpdateOutcome::IDLE;
            }
            ctx.store.set_life(ctx.index, life);
        }

        let dx = unit_step(p.vx);
        let dy = unit_step(p.vy);
        if dx == 0 && dy == 0 {
            return UpdateOutcome::IDLE;
        }

        let nx = p.x as i32 + dx;
        let ny = p.y as i32 + dy;
        if !ctx.store.in_bounds(nx, ny) {
            ctx.store.kill(ctx.index);
            return UpdateOutcome::IDLE;
        }
        let (nx, ny) = (nx as u32, ny as u32);

        if let Some(blocker) = ctx.store.at(nx, ny) {
            if !has_flag(ctx.store.kind(blocker), FLAG_PHOTON_PASS) {
                ctx.store.kill(ctx.index);
                return UpdateOutcome::IDLE;
            }
        }

        if ctx.store.move_to(ctx.index, nx, ny) {
            UpdateOutcome::MOVED
        } else {
            // Another photon holds the cell; absorb into it
            ctx.store.kill(ctx.index);
            UpdateOutcome::IDLE
        }
    }
}
