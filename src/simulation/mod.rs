//! Simulation - slot-ordered particle engine with a resumable update cursor
//!
//! A frame updates every occupied slot in index order. The frame can be
//! applied all at once (`step`) or in pieces (`update_up_to`): the engine
//! remembers the first slot it has not updated yet (`DebugState::next_to_update`)
//! and resumes from there. When the last slot has been updated the frame is
//! finished (ambient heat diffuses, the frame counter advances) and the cursor
//! goes back to 0.
//!
//! Element updates report interesting changes through their return value; the
//! engine folds them into `DebugState::interesting_change`, which the particle
//! debugger reads as a stop signal.

use crate::behaviors::BehaviorRegistry;
use crate::spatial::ParticleStore;
use crate::temperature::AmbientHeat;

#[path = "init/init.rs"]
mod init;
#[path = "commands/commands.rs"]
mod commands;
#[path = "step/update.rs"]
mod update;
#[path = "step/step.rs"]
mod step;

pub use crate::behaviors::UpdateOutcome;

/// Engine-owned stepping state read by the particle debugger
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DebugState {
    /// First slot not yet updated in the current frame, always < capacity
    pub next_to_update: usize,
    pub most_recently_updated: Option<usize>,
    /// Set when any update in the last run reported an interesting change
    pub interesting_change: bool,
    /// Paused mid-frame, advancing by partial frames
    pub subframe_mode: bool,
    /// Slots no longer follow scan order (particles were painted)
    pub need_reload_particle_order: bool,
}

/// The simulation world
pub struct Simulation {
    store: ParticleStore,
    behaviors: BehaviorRegistry,
    heat: AmbientHeat,

    // Settings
    ambient_temperature: f32,

    // State
    frame: u64,
    rng_state: u32,
    frame_render: bool,
    debug: DebugState,
}

impl Simulation {
    /// Create a world with one slot per cell
    pub fn new(width: u32, height: u32) -> Self {
        init::create_simulation(width, height, None, init::DEFAULT_AMBIENT)
    }

    /// Create a world with an explicit slot capacity (N)
    pub fn with_capacity(width: u32, height: u32, capacity: usize) -> Self {
        init::create_simulation(width, height, Some(capacity), init::DEFAULT_AMBIENT)
    }

    pub(crate) fn with_options(width: u32, height: u32, capacity: Option<usize>, ambient: f32) -> Self {
        init::create_simulation(width, height, capacity, ambient)
    }

    pub fn width(&self) -> u32 { self.store.width() }

    pub fn height(&self) -> u32 { self.store.height() }

    /// Number of particle slots (N)
    pub fn capacity(&self) -> usize { self.store.capacity() }

    pub fn particle_count(&self) -> usize { self.store.live_count() }

    pub fn frame(&self) -> u64 { self.frame }

    pub fn particles(&self) -> &ParticleStore { &self.store }

    pub fn ambient_heat(&self) -> &AmbientHeat { &self.heat }

    pub fn ambient_temperature(&self) -> f32 { self.ambient_temperature }

    pub fn set_ambient_temperature(&mut self, temp: f32) {
        self.ambient_temperature = temp;
    }

    // === DEBUG STATE ===

    pub fn debug(&self) -> &DebugState { &self.debug }

    pub fn next_to_update(&self) -> usize { self.debug.next_to_update }

    pub fn interesting_change_occurred(&self) -> bool { self.debug.interesting_change }

    pub fn subframe_mode(&self) -> bool { self.debug.subframe_mode }

    pub fn set_subframe_mode(&mut self, enabled: bool) {
        self.debug.subframe_mode = enabled;
    }

    pub fn need_reload_particle_order(&self) -> bool { self.debug.need_reload_particle_order }

    /// Request a redraw of the current state
    pub fn mark_frame_render(&mut self) {
        self.frame_render = true;
    }

    /// Whether a redraw was requested since the last call
    pub fn take_frame_render(&mut self) -> bool {
        std::mem::replace(&mut self.frame_render, false)
    }

    // === COMMANDS ===

    /// Add a particle at position, returning its slot
    pub fn create_particle(&mut self, x: u32, y: u32, element: u8) -> Option<usize> {
        commands::create_particle(self, x, y, element)
    }

    pub fn add_particle(&mut self, x: u32, y: u32, element: u8) -> bool {
        self.create_particle(x, y, element).is_some()
    }

    /// Add particles in radius (brush)
    pub fn add_particles_in_radius(&mut self, cx: i32, cy: i32, radius: i32, element: u8) -> usize {
        commands::add_particles_in_radius(self, cx, cy, radius, element)
    }

    /// Remove the frontmost particle at position
    pub fn remove_particle(&mut self, x: u32, y: u32) -> bool {
        commands::remove_particle(self, x, y)
    }

    pub fn remove_particles_in_radius(&mut self, cx: i32, cy: i32, radius: i32) -> usize {
        commands::remove_particles_in_radius(self, cx, cy, radius)
    }

    pub fn set_particle_temperature(&mut self, index: usize, temp: f32) -> bool {
        self.store.set_temp(index, temp)
    }

    /// Clear all particles and restart the frame
    pub fn clear(&mut self) {
        commands::clear(self)
    }

    /// Frontmost particle at (x, y), if any
    pub fn stack_edit_particle_id(&self, x: i32, y: i32) -> Option<usize> {
        self.store.stack_edit_particle_id(x, y)
    }

    /// Renumber particles in scan order.
    ///
    /// Only between frames: mid-frame the slots behind the cursor would be
    /// shuffled, so the reload is left pending and `false` is returned.
    pub fn reload_particle_order(&mut self) -> bool {
        if self.debug.next_to_update != 0 {
            self.debug.need_reload_particle_order = true;
            return false;
        }
        self.store.reload_order();
        self.debug.need_reload_particle_order = false;
        self.frame_render = true;
        true
    }

    // === STEPPING ===

    /// Update occupied slots in `[start, end)`
    pub fn update_particles(&mut self, start: usize, end: usize) -> UpdateOutcome {
        step::update_particles(self, start, end)
    }

    /// Advance the current frame up to (exclusive) slot `up_to`
    pub fn update_up_to(&mut self, up_to: usize) {
        step::update_up_to(self, up_to);
    }

    /// Finish the current frame from the cursor
    pub fn complete_debug_update_particles(&mut self) {
        step::complete_debug_update_particles(self);
    }

    /// Run a frame to completion
    pub fn step(&mut self) {
        step::step(self);
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
