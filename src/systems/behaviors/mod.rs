//! Behaviors - per-element update rules
//!
//! Each behavior updates one particle slot and reports what happened through
//! `UpdateOutcome`. The `interesting` bit is how element code asks the
//! particle debugger to stop: the engine folds it into its debug state after
//! every slot, so nothing here touches that state directly.

mod powder;
mod liquid;
mod gas;
mod energy;
mod isotope;

pub use powder::PowderBehavior;
pub use liquid::LiquidBehavior;
pub use gas::GasBehavior;
pub use energy::EnergyBehavior;
pub use isotope::IsotopeBehavior;

use crate::elements::{is_fluid, props, BehaviorKind, ElementId};
use crate::spatial::ParticleStore;
use crate::temperature::AmbientHeat;

/// Update context passed to behaviors
pub struct UpdateContext<'a> {
    pub store: &'a mut ParticleStore,
    pub heat: &'a mut AmbientHeat,
    pub index: usize,
    pub frame: u64,
    pub rng: &'a mut u32,
}

impl<'a> UpdateContext<'a> {
    /// Current element of the slot being updated
    #[inline]
    pub fn kind(&self) -> ElementId {
        self.store.kind(self.index)
    }

    #[inline]
    pub fn position(&self) -> Option<(u32, u32)> {
        self.store.get(self.index).filter(|p| !p.is_empty()).map(|p| (p.x, p.y))
    }
}

/// Result of updating one slot
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub moved: bool,
    /// Something worth stopping the step debugger for happened
    pub interesting: bool,
    /// New particles were spawned into free slots
    pub created: bool,
}

impl UpdateOutcome {
    pub const IDLE: UpdateOutcome = UpdateOutcome { moved: false, interesting: false, created: false };
    pub const MOVED: UpdateOutcome = UpdateOutcome { moved: true, interesting: false, created: false };

    #[inline]
    pub fn merge(self, other: UpdateOutcome) -> UpdateOutcome {
        UpdateOutcome {
            moved: self.moved || other.moved,
            interesting: self.interesting || other.interesting,
            created: self.created || other.created,
        }
    }
}

/// Behavior trait - each category implements this
pub trait Behavior {
    fn update(&self, ctx: &mut UpdateContext) -> UpdateOutcome;
}

/// Horizontal preference for this frame: (first, second)
#[inline]
pub fn get_random_dir(frame: u64, x: u32) -> (i32, i32) {
    let go_left = ((frame as u32).wrapping_add(x) & 1) == 1;
    if go_left { (-1, 1) } else { (1, -1) }
}

/// Try to move the current particle by (dx, dy).
///
/// Empty cells are always accepted. An occupied cell is accepted only when it
/// holds a fluid lighter than the mover, in which case the two swap.
pub fn try_move(ctx: &mut UpdateContext, dx: i32, dy: i32) -> bool {
    let Some((x, y)) = ctx.position() else {
        return false;
    };
    let nx = x as i32 + dx;
    let ny = y as i32 + dy;
    if !ctx.store.in_bounds(nx, ny) {
        return false;
    }
    let (nx, ny) = (nx as u32, ny as u32);

    match ctx.store.at(nx, ny) {
        None => ctx.store.move_to(ctx.index, nx, ny),
        Some(other) => {
            let other_kind = ctx.store.kind(other);
            let (Some(me), Some(them)) = (props(ctx.kind()), props(other_kind)) else {
                return false;
            };
            if is_fluid(other_kind) && me.weight > them.weight {
                ctx.store.swap_positions(ctx.index, other)
            } else {
                false
            }
        }
    }
}

/// Fall straight down, then diagonally
pub fn fall(ctx: &mut UpdateContext) -> bool {
    if try_move(ctx, 0, 1) {
        return true;
    }
    let Some((x, _)) = ctx.position() else {
        return false;
    };
    let (first, second) = get_random_dir(ctx.frame, x);
    try_move(ctx, first, 1) || try_move(ctx, second, 1)
}

/// Behavior registry - dispatch by behavior kind
pub struct BehaviorRegistry {
    powder: PowderBehavior,
    liquid: LiquidBehavior,
    gas: GasBehavior,
    energy: EnergyBehavior,
    isotope: IsotopeBehavior,
}

impl BehaviorRegistry {
    pub fn new() -> Self {
        Self {
            powder: PowderBehavior::new(),
            liquid: LiquidBehavior::new(),
            gas: GasBehavior::new(),
            energy: EnergyBehavior::new(),
            isotope: IsotopeBehavior::new(),
        }
    }

    pub fn update(&self, kind: BehaviorKind, ctx: &mut UpdateContext) -> UpdateOutcome {
        match kind {
            BehaviorKind::None => UpdateOutcome::IDLE,
            BehaviorKind::Powder => self.powder.update(ctx),
            BehaviorKind::Liquid => self.liquid.update(ctx),
            BehaviorKind::Gas => self.gas.update(ctx),
            BehaviorKind::Energy => self.energy.update(ctx),
            BehaviorKind::Isotope => self.isotope.update(ctx),
        }
    }
}

impl Default for BehaviorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{EL_SAND, EL_STEAM, EL_STONE, EL_WATER};

    fn ctx_for<'a>(
        store: &'a mut ParticleStore,
        heat: &'a mut AmbientHeat,
        rng: &'a mut u32,
        index: usize,
    ) -> UpdateContext<'a> {
        UpdateContext { store, heat, index, frame: 0, rng }
    }

    #[test]
    fn heavy_particles_sink_through_lighter_fluids() {
        let mut store = ParticleStore::new(4, 4, 8);
        let mut heat = AmbientHeat::new(4, 4, 20.0);
        let mut rng = 1;
        let sand = store.create(EL_SAND, 1, 1, 20.0, 0).unwrap();
        let water = store.create(EL_WATER, 1, 2, 20.0, 0).unwrap();

        let mut ctx = ctx_for(&mut store, &mut heat, &mut rng, sand);
        assert!(try_move(&mut ctx, 0, 1));
        assert_eq!(store.at(1, 2), Some(sand));
        assert_eq!(store.at(1, 1), Some(water));
    }

    #[test]
    fn light_fluids_do_not_displace_heavier_ones() {
        let mut store = ParticleStore::new(4, 4, 8);
        let mut heat = AmbientHeat::new(4, 4, 20.0);
        let mut rng = 1;
        let steam = store.create(EL_STEAM, 1, 2, 120.0, 0).unwrap();
        store.create(EL_WATER, 1, 1, 20.0, 0).unwrap();
        store.create(EL_STONE, 2, 2, 20.0, 0).unwrap();

        let mut ctx = ctx_for(&mut store, &mut heat, &mut rng, steam);
        assert!(!try_move(&mut ctx, 0, -1));
        assert!(!try_move(&mut ctx, 1, 0));
        assert!(!try_move(&mut ctx, 0, 5));
    }

    #[test]
    fn outcome_merge_keeps_interesting() {
        let a = UpdateOutcome { moved: true, ..UpdateOutcome::IDLE };
        let b = UpdateOutcome { interesting: true, created: true, ..UpdateOutcome::IDLE };
        assert_eq!(a.merge(b), UpdateOutcome { moved: true, interesting: true, created: true });
        assert_eq!(UpdateOutcome::IDLE.merge(UpdateOutcome::IDLE), UpdateOutcome::IDLE);
    }
}
