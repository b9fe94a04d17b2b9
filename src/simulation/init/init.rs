use crate::behaviors::BehaviorRegistry;
use crate::spatial::ParticleStore;
use crate::temperature::AmbientHeat;

use super::{DebugState, Simulation};

pub(super) const DEFAULT_AMBIENT: f32 = 20.0;

pub(super) fn create_simulation(
    width: u32,
    height: u32,
    capacity: Option<usize>,
    ambient: f32,
) -> Simulation {
    let width = width.max(1);
    let height = height.max(1);
    let capacity = capacity
        .unwrap_or((width as usize) * (height as usize))
        .max(1);

    Simulation {
        store: ParticleStore::new(width, height, capacity),
        behaviors: BehaviorRegistry::new(),
        heat: AmbientHeat::new(width, height, ambient),
        ambient_temperature: ambient,
        frame: 0,
        rng_state: 12345,
        frame_render: true,
        debug: DebugState::default(),
    }
}
