//! SandboxModel - the application state the UI drives
//!
//! Owns the simulation together with the pieces of UI state that simulation
//! control depends on: pause state, the zoom overlay, the message log and
//! user settings. It is also the `DebugHost` the particle debugger runs
//! against.

mod message_log;
mod settings;
mod timing;
mod zoom;

pub use message_log::{LogEntry, MessageLog};
pub use settings::{SandboxSettings, DEFAULT_FRAME_STEP_KEY};
pub use timing::FrameTiming;
pub use zoom::ZoomWindow;

use crate::core::console;
use crate::debug::DebugHost;
use crate::elements::ElementId;
use crate::simulation::Simulation;
use crate::spatial::Point;

pub struct SandboxModel {
    sim: Simulation,
    settings: SandboxSettings,
    zoom: ZoomWindow,
    log: MessageLog,
    timing: FrameTiming,
    paused: bool,
}

impl SandboxModel {
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_settings(width, height, SandboxSettings::default())
    }

    pub fn with_settings(width: u32, height: u32, settings: SandboxSettings) -> Self {
        let sim = Simulation::with_options(
            width,
            height,
            settings.particle_capacity,
            settings.ambient_temperature,
        );
        Self {
            sim,
            log: MessageLog::new(settings.log_capacity),
            settings,
            zoom: ZoomWindow::disabled(),
            timing: FrameTiming::default(),
            paused: false,
        }
    }

    pub fn sim(&self) -> &Simulation { &self.sim }

    pub fn sim_mut(&mut self) -> &mut Simulation { &mut self.sim }

    pub fn settings(&self) -> &SandboxSettings { &self.settings }

    /// Replace the settings. A new particle capacity rebuilds the simulation
    /// (existing particles are lost); a new log capacity starts an empty log.
    pub fn apply_settings(&mut self, settings: SandboxSettings) {
        if settings.particle_capacity != self.settings.particle_capacity {
            self.sim = Simulation::with_options(
                self.sim.width(),
                self.sim.height(),
                settings.particle_capacity,
                settings.ambient_temperature,
            );
        }
        if settings.log_capacity != self.settings.log_capacity {
            self.log = MessageLog::new(settings.log_capacity);
        }
        self.sim.set_ambient_temperature(settings.ambient_temperature);
        self.settings = settings;
    }

    pub fn log(&self) -> &MessageLog { &self.log }

    pub fn take_log(&mut self) -> Vec<LogEntry> {
        self.log.take()
    }

    pub fn timing(&self) -> &FrameTiming { &self.timing }

    // === UI STATE ===

    pub fn paused(&self) -> bool { self.paused }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn zoom(&self) -> &ZoomWindow { &self.zoom }

    pub fn set_zoom(&mut self, zoom: ZoomWindow) {
        self.zoom = zoom;
    }

    pub fn adjust_zoom_coords(&self, position: Point) -> Point {
        self.zoom.adjust(position)
    }

    pub fn autoreload_enabled(&self) -> bool {
        self.settings.autoreload_particle_order
    }

    pub fn set_autoreload_enabled(&mut self, enabled: bool) {
        self.settings.autoreload_particle_order = enabled;
    }

    pub fn set_ambient_temperature(&mut self, temp: f32) {
        self.settings.ambient_temperature = temp;
        self.sim.set_ambient_temperature(temp);
    }

    /// User-facing progress message (also mirrored to the console)
    pub fn log_message(&mut self, message: impl Into<String>) {
        let message = message.into();
        console::log(&message);
        self.log.push(self.sim.frame(), message);
    }

    // === SIMULATION CONTROL ===

    pub fn add_particle(&mut self, x: u32, y: u32, element: ElementId) -> bool {
        self.sim.add_particle(x, y, element)
    }

    pub fn update_up_to(&mut self, up_to: usize) {
        self.sim.update_up_to(up_to);
    }

    /// Advance `frames` whole frames regardless of pause state
    pub fn frame_step(&mut self, frames: u32) {
        for _ in 0..frames {
            let sim = &mut self.sim;
            self.timing.measure(|| sim.step());
        }
    }

    /// One UI tick: a whole frame while running, nothing while paused
    pub fn tick(&mut self) {
        if self.paused {
            return;
        }
        self.frame_step(1);
    }

    /// Renumber particles; deferred (returns false) while a frame is in progress
    pub fn reload_particle_order(&mut self) -> bool {
        self.sim.reload_particle_order()
    }
}

impl DebugHost for SandboxModel {
    fn capacity(&self) -> usize {
        self.sim.capacity()
    }

    fn slot_type(&self, index: usize) -> ElementId {
        self.sim.particles().kind(index)
    }

    fn live_particle_count(&self) -> usize {
        self.sim.particle_count()
    }

    fn next_to_update(&self) -> usize {
        self.sim.next_to_update()
    }

    fn interesting_change_occurred(&self) -> bool {
        self.sim.interesting_change_occurred()
    }

    fn subframe_mode(&self) -> bool {
        self.sim.subframe_mode()
    }

    fn need_reload_particle_order(&self) -> bool {
        self.sim.need_reload_particle_order()
    }

    fn autoreload_enabled(&self) -> bool {
        SandboxModel::autoreload_enabled(self)
    }

    fn reload_particle_order(&mut self) {
        SandboxModel::reload_particle_order(self);
    }

    fn grid_size(&self) -> (i32, i32) {
        (self.sim.width() as i32, self.sim.height() as i32)
    }

    fn stack_edit_particle_id(&self, x: i32, y: i32) -> Option<usize> {
        self.sim.stack_edit_particle_id(x, y)
    }

    fn adjust_zoom_coords(&self, position: Point) -> Point {
        SandboxModel::adjust_zoom_coords(self, position)
    }

    fn mark_frame_render(&mut self) {
        self.sim.mark_frame_render();
    }

    fn update_up_to(&mut self, up_to: usize) {
        SandboxModel::update_up_to(self, up_to);
    }

    fn complete_debug_update_particles(&mut self) {
        self.sim.complete_debug_update_particles();
    }

    fn set_paused(&mut self, paused: bool) {
        SandboxModel::set_paused(self, paused);
    }

    fn frame_step(&mut self, frames: u32) {
        SandboxModel::frame_step(self, frames);
    }

    fn log_message(&mut self, message: String) {
        SandboxModel::log_message(self, message);
    }

    fn report_defect(&mut self, message: &str) {
        console::warn(message);
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
