use crate::behaviors::{UpdateContext, UpdateOutcome};
use crate::elements::behavior_kind;
use crate::temperature::process_particle_heat;

use super::Simulation;

/// Update a single occupied slot: movement/behavior, then heat
pub(super) fn update_particle(sim: &mut Simulation, index: usize) -> UpdateOutcome {
    let kind = sim.store.kind(index);
    let behavior = behavior_kind(kind);

    let mut ctx = UpdateContext {
        store: &mut sim.store,
        heat: &mut sim.heat,
        index,
        frame: sim.frame,
        rng: &mut sim.rng_state,
    };

    let outcome = sim.behaviors.update(behavior, &mut ctx);

    // Killed or transmuted by its own behavior: nothing left to heat
    if ctx.kind() != kind {
        return outcome;
    }
    outcome.merge(process_particle_heat(&mut ctx))
}
