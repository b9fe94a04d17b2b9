use crate::behaviors::UpdateOutcome;
use crate::elements::EL_EMPTY;

use super::update::update_particle;
use super::Simulation;

pub(super) fn update_particles(sim: &mut Simulation, start: usize, end: usize) -> UpdateOutcome {
    sim.debug.interesting_change = false;

    let end = end.min(sim.store.capacity());
    let mut total = UpdateOutcome::IDLE;
    for index in start..end {
        if sim.store.kind(index) == EL_EMPTY {
            continue;
        }
        let outcome = update_particle(sim, index);
        sim.debug.most_recently_updated = Some(index);
        total = total.merge(outcome);
    }

    sim.debug.interesting_change = total.interesting;
    // Spawned particles took whatever slot was free
    if total.created {
        sim.debug.need_reload_particle_order = true;
    }
    total
}

pub(super) fn update_up_to(sim: &mut Simulation, up_to: usize) {
    let capacity = sim.store.capacity();
    let mut up_to = up_to.min(capacity);
    // Going backwards means "finish this frame"
    if up_to < sim.debug.next_to_update {
        up_to = capacity;
    }

    if sim.debug.next_to_update == 0 {
        begin_frame(sim);
    }

    let start = sim.debug.next_to_update;
    update_particles(sim, start, up_to);

    if up_to < capacity {
        sim.debug.next_to_update = up_to;
    } else {
        end_frame(sim);
    }
}

pub(super) fn complete_debug_update_particles(sim: &mut Simulation) {
    let capacity = sim.store.capacity();
    update_up_to(sim, capacity);
}

/// A whole frame. Mid-frame, this finishes the current one.
pub(super) fn step(sim: &mut Simulation) {
    let capacity = sim.store.capacity();
    update_up_to(sim, capacity);
}

fn begin_frame(sim: &mut Simulation) {
    sim.debug.most_recently_updated = None;
}

fn end_frame(sim: &mut Simulation) {
    sim.heat.diffuse(sim.ambient_temperature);
    sim.frame += 1;
    sim.debug.next_to_update = 0;
    sim.frame_render = true;
}
