use wasm_bindgen::prelude::*;

use crate::debug::{KeyOutcome, Modifiers, ParticleDebug};
use crate::model::{SandboxModel, SandboxSettings, ZoomWindow};
use crate::spatial::Point;

/// Sandbox handle for the UI: the model plus the particle debugger
#[wasm_bindgen]
pub struct Sandbox {
    model: SandboxModel,
}

#[wasm_bindgen]
impl Sandbox {
    /// Create a sandbox with default settings
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            model: SandboxModel::new(width, height),
        }
    }

    /// Create a sandbox from a settings JSON object
    #[wasm_bindgen(js_name = withSettings)]
    pub fn with_settings(width: u32, height: u32, json: String) -> Result<Sandbox, JsValue> {
        let settings = SandboxSettings::from_json(&json).map_err(|e| JsValue::from_str(&e))?;
        Ok(Self {
            model: SandboxModel::with_settings(width, height, settings),
        })
    }

    pub fn load_settings(&mut self, json: String) -> Result<(), JsValue> {
        let settings = SandboxSettings::from_json(&json).map_err(|e| JsValue::from_str(&e))?;
        self.model.apply_settings(settings);
        Ok(())
    }

    pub fn get_settings_json(&self) -> String {
        self.model.settings().to_json()
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 { self.model.sim().width() }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 { self.model.sim().height() }

    #[wasm_bindgen(getter)]
    pub fn particle_count(&self) -> u32 { self.model.sim().particle_count() as u32 }

    #[wasm_bindgen(getter)]
    pub fn capacity(&self) -> u32 { self.model.sim().capacity() as u32 }

    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u64 { self.model.sim().frame() }

    #[wasm_bindgen(getter)]
    pub fn paused(&self) -> bool { self.model.paused() }

    /// Last frame duration in milliseconds
    #[wasm_bindgen(getter)]
    pub fn last_frame_ms(&self) -> f64 { self.model.timing().last_ms() }

    pub fn set_paused(&mut self, paused: bool) {
        self.model.set_paused(paused);
    }

    pub fn set_ambient_temperature(&mut self, temp: f32) {
        self.model.set_ambient_temperature(temp);
    }

    // === PAINTING ===

    /// Add a particle at position
    pub fn add_particle(&mut self, x: u32, y: u32, element: u8) -> bool {
        self.model.add_particle(x, y, element)
    }

    /// Add particles in radius (brush)
    pub fn add_particles_in_radius(&mut self, cx: i32, cy: i32, radius: i32, element: u8) -> u32 {
        self.model.sim_mut().add_particles_in_radius(cx, cy, radius, element) as u32
    }

    pub fn remove_particle(&mut self, x: u32, y: u32) -> bool {
        self.model.sim_mut().remove_particle(x, y)
    }

    pub fn remove_particles_in_radius(&mut self, cx: i32, cy: i32, radius: i32) -> u32 {
        self.model.sim_mut().remove_particles_in_radius(cx, cy, radius) as u32
    }

    pub fn clear(&mut self) {
        self.model.sim_mut().clear();
    }

    /// Element at (x, y), frontmost layer first; 0 when empty or out of bounds
    pub fn element_at(&self, x: i32, y: i32) -> u8 {
        match self.model.sim().stack_edit_particle_id(x, y) {
            Some(id) => self.model.sim().particles().kind(id),
            None => 0,
        }
    }

    // === FRAME LOOP ===

    /// One UI tick: runs the debugger in subframe mode, a whole frame otherwise
    pub fn tick(&mut self) {
        if self.model.sim().subframe_mode() {
            self.debugger().update();
        } else {
            self.model.tick();
        }
    }

    pub fn frame_step(&mut self, frames: u32) {
        self.model.frame_step(frames);
    }

    /// Whether the view needs a redraw; clears the request
    pub fn take_frame_render(&mut self) -> bool {
        self.model.sim_mut().take_frame_render()
    }

    // === PARTICLE DEBUGGER ===

    #[wasm_bindgen(getter)]
    pub fn next_to_update(&self) -> u32 { self.model.sim().next_to_update() as u32 }

    #[wasm_bindgen(getter)]
    pub fn subframe_mode(&self) -> bool { self.model.sim().subframe_mode() }

    pub fn set_subframe_mode(&mut self, enabled: bool) {
        self.model.sim_mut().set_subframe_mode(enabled);
    }

    pub fn set_autoreload(&mut self, enabled: bool) {
        self.model.set_autoreload_enabled(enabled);
    }

    /// Renumber particles in scan order. Returns false (and keeps the
    /// reload pending) while a frame is partly updated.
    pub fn reload_particle_order(&mut self) -> bool {
        self.model.reload_particle_order()
    }

    pub fn set_zoom(
        &mut self,
        enabled: bool,
        scope_x: i32,
        scope_y: i32,
        scope_size: i32,
        factor: i32,
        window_x: i32,
        window_y: i32,
    ) {
        let zoom = if enabled {
            ZoomWindow::new(
                Point::new(scope_x, scope_y),
                scope_size,
                factor,
                Point::new(window_x, window_y),
            )
        } else {
            ZoomWindow::disabled()
        };
        self.model.set_zoom(zoom);
    }

    /// Run the subframe driver once; returns the number of advances
    pub fn debug_update(&mut self) -> u32 {
        self.debugger().update() as u32
    }

    /// Step the debugger (mode 0: next particle, 1: up to the particle at x, y).
    /// Returns false when nothing was stepped.
    pub fn debug_step(&mut self, mode: u8, x: i32, y: i32) -> bool {
        self.debugger().step_raw(mode, x, y).is_some()
    }

    /// Feed a key press to the debugger. Returns true when the key should
    /// propagate to other handlers.
    pub fn handle_key(&mut self, key: &str, shift: bool, ctrl: bool, alt: bool, x: i32, y: i32) -> bool {
        if !self.model.settings().debug_particles {
            return true;
        }
        let mut chars = key.chars();
        let (Some(key), None) = (chars.next(), chars.next()) else {
            return true;
        };
        let modifiers = Modifiers { shift, ctrl, alt };
        let outcome = self.debugger().handle_key(key, modifiers, Point::new(x, y));
        outcome == KeyOutcome::Propagate
    }

    /// Drain the message log as `[{ "frame": n, "message": "..." }]`
    pub fn take_log_json(&mut self) -> String {
        let entries = self.model.take_log();
        serde_json::to_string(&entries).unwrap_or_else(|_| "[]".to_string())
    }
}

impl Sandbox {
    fn debugger(&mut self) -> ParticleDebug<'_, SandboxModel> {
        let key = self.model.settings().frame_step_key;
        ParticleDebug::new(&mut self.model).with_frame_step_key(key)
    }

    pub fn model(&self) -> &SandboxModel {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut SandboxModel {
        &mut self.model
    }
}
