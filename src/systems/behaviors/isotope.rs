//! IsotopeBehavior - experimental radioactive powder
//!
//! Moves like a powder. Occasionally emits a photon and heats up (only once
//! per particle until it cools below its starting point); a photon sitting on
//! top of it greatly raises the chance of a further emission. Every emission
//! is reported as an interesting change.

use super::{fall, Behavior, UpdateContext, UpdateOutcome};
use crate::core::random::{random_below, random_direction};
use crate::elements::{has_flag, props, EL_PHOTON, FLAG_RADIOACTIVE};

/// 1 in N chance of a spontaneous emission per update
const SPONTANEOUS_EMISSION: u32 = 6000;
/// 1 in N chance when stimulated by a photon
const STIMULATED_EMISSION: u32 = 80;
const EMISSION_HEAT: f32 = 10.0;

pub struct IsotopeBehavior;

impl IsotopeBehavior {
    pub fn new() -> Self {
        Self
    }

    /// Spawn a photon in a random neighbouring cell, heading away
    fn emit(&self, ctx: &mut UpdateContext, heat: f32) -> bool {
        let Some(p) = ctx.store.get(ctx.index).copied() else {
            return false;
        };
        let Some(photon_props) = props(EL_PHOTON) else {
            return false;
        };
        let (dx, dy) = random_direction(ctx.rng);
        let nx = p.x as i32 + dx;
        let ny = p.y as i32 + dy;
        if !ctx.store.in_bounds(nx, ny) {
            return false;
        }
        let temp = p.temp + heat;
        let Some(photon) = ctx.store.create(EL_PHOTON, nx as u32, ny as u32, temp, photon_props.lifetime) else {
            return false;
        };
        ctx.store.set_velocity(photon, dx as f32, dy as f32);
        ctx.store.set_temp(ctx.index, temp);
        true
    }
}

impl Behavior for IsotopeBehavior {
    fn update(&self, ctx: &mut UpdateContext) -> UpdateOutcome {
        let mut outcome = if fall(ctx) { UpdateOutcome::MOVED } else { UpdateOutcome::IDLE };

        let Some(p) = ctx.store.get(ctx.index).copied() else {
            return outcome;
        };

        if p.tmp == 0
            && has_flag(p.kind, FLAG_RADIOACTIVE)
            && random_below(ctx.rng, SPONTANEOUS_EMISSION) == 0
            && self.emit(ctx, EMISSION_HEAT)
        {
            ctx.store.set_tmp(ctx.index, 1);
            outcome.interesting = true;
            outcome.created = true;
        }

        let stimulated = ctx.store.energy_at(p.x, p.y).is_some();
        if stimulated && random_below(ctx.rng, STIMULATED_EMISSION) == 0 && self.emit(ctx, EMISSION_HEAT * 0.2) {
            outcome.interesting = true;
            outcome.created = true;
        }

        // Re-arm once cooled back down
        let cooled = ctx
            .store
            .get(ctx.index)
            .zip(props(p.kind))
            .map(|(now, base)| now.temp <= base.default_temp)
            .unwrap_or(false);
        if p.tmp != 0 && cooled {
            ctx.store.set_tmp(ctx.index, 0);
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::EL_ISOTOPE;
    use crate::spatial::ParticleStore;
    use crate::temperature::AmbientHeat;

    #[test]
    fn photon_on_top_stimulates_an_interesting_emission() {
        let mut store = ParticleStore::new(5, 4, 16);
        let mut heat = AmbientHeat::new(5, 4, 20.0);
        let mut rng = 2463534242;
        let isotope = store.create(EL_ISOTOPE, 2, 3, 24.0, 0).unwrap();
        store.create(EL_PHOTON, 2, 3, 700.0, 100).unwrap();

        let mut emitted = None;
        for frame in 0..5000 {
            let mut ctx = UpdateContext { store: &mut store, heat: &mut heat, index: isotope, frame, rng: &mut rng };
            let outcome = IsotopeBehavior::new().update(&mut ctx);
            if outcome.interesting {
                emitted = Some(outcome);
                break;
            }
        }

        assert!(emitted.is_some_and(|o| o.created));
        assert!(store.live_count() >= 3);
        assert!(store.get(isotope).unwrap().temp > 24.0);
    }
}
