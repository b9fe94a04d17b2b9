use crate::elements::{is_valid_element_id, props, EL_EMPTY};

use super::Simulation;

pub(super) fn create_particle(sim: &mut Simulation, x: u32, y: u32, element: u8) -> Option<usize> {
    // Validate element ID
    if element == EL_EMPTY || !is_valid_element_id(element) {
        return None;
    }
    let props = props(element)?;

    let index = sim
        .store
        .create(element, x, y, props.default_temp, props.lifetime)?;

    // Painted particles land in whatever slot was free
    sim.debug.need_reload_particle_order = true;
    sim.frame_render = true;
    Some(index)
}

/// Brush radius limited to the grid diagonal; anything larger covers the
/// same cells and would overflow `radius * radius`
fn clamp_radius(sim: &Simulation, radius: i32) -> i32 {
    let w = sim.store.width() as f64;
    let h = sim.store.height() as f64;
    let diagonal = (w * w + h * h).sqrt().ceil() as i32;
    radius.clamp(0, diagonal)
}

pub(super) fn add_particles_in_radius(sim: &mut Simulation, cx: i32, cy: i32, radius: i32, element: u8) -> usize {
    let mut added = 0;
    let radius = clamp_radius(sim, radius);
    let r2 = radius * radius;
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= r2 {
                let x = cx.saturating_add(dx);
                let y = cy.saturating_add(dy);
                if x >= 0 && y >= 0 && create_particle(sim, x as u32, y as u32, element).is_some() {
                    added += 1;
                }
            }
        }
    }
    added
}

pub(super) fn remove_particle(sim: &mut Simulation, x: u32, y: u32) -> bool {
    let Some(index) = sim.store.stack_edit_particle_id(x as i32, y as i32) else {
        return false;
    };
    let removed = sim.store.kill(index);
    if removed {
        sim.frame_render = true;
    }
    removed
}

pub(super) fn remove_particles_in_radius(sim: &mut Simulation, cx: i32, cy: i32, radius: i32) -> usize {
    let mut removed = 0;
    let radius = clamp_radius(sim, radius);
    let r2 = radius * radius;
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= r2 {
                let x = cx.saturating_add(dx);
                let y = cy.saturating_add(dy);
                // Energy and material layers both go
                while x >= 0 && y >= 0 && remove_particle(sim, x as u32, y as u32) {
                    removed += 1;
                }
            }
        }
    }
    removed
}

pub(super) fn clear(sim: &mut Simulation) {
    sim.store.clear();
    sim.heat.fill(sim.ambient_temperature);
    sim.frame = 0;
    sim.debug.next_to_update = 0;
    sim.debug.most_recently_updated = None;
    sim.debug.interesting_change = false;
    sim.debug.need_reload_particle_order = false;
    sim.frame_render = true;
}
