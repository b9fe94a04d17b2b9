//! SandboxSettings - user preferences loaded from JSON
//!
//! Every field is optional in the JSON; missing fields take their defaults.

use serde::{Deserialize, Serialize};

pub const DEFAULT_FRAME_STEP_KEY: char = 'f';

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SandboxSettings {
    /// Key that drives the particle debugger
    pub frame_step_key: char,
    /// Renumber particles in scan order before stepping a fresh frame
    pub autoreload_particle_order: bool,
    /// Number of log lines kept for the UI
    pub log_capacity: usize,
    /// Slot count (N); defaults to one slot per cell
    pub particle_capacity: Option<usize>,
    pub ambient_temperature: f32,
    /// Route the frame-step key to the particle debugger
    pub debug_particles: bool,
}

impl Default for SandboxSettings {
    fn default() -> Self {
        Self {
            frame_step_key: DEFAULT_FRAME_STEP_KEY,
            autoreload_particle_order: false,
            log_capacity: 64,
            particle_capacity: None,
            ambient_temperature: 20.0,
            debug_particles: true,
        }
    }
}

impl SandboxSettings {
    pub fn from_json(json: &str) -> Result<Self, String> {
        let settings: SandboxSettings = serde_json::from_str(json).map_err(|e| e.to_string())?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    fn validate(&self) -> Result<(), String> {
        if self.log_capacity == 0 {
            return Err("logCapacity must be at least 1".to_string());
        }
        if self.particle_capacity == Some(0) {
            return Err("particleCapacity must be at least 1".to_string());
        }
        if !self.ambient_temperature.is_finite() {
            return Err(format!("ambientTemperature is not finite: {}", self.ambient_temperature));
        }
        if self.frame_step_key.is_control() || self.frame_step_key.is_whitespace() {
            return Err(format!("frameStepKey is not a printable key: {:?}", self.frame_step_key));
        }
        Ok(())
    }
}
