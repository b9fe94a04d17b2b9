//! Particula Sandbox - falling-sand engine with a single-step particle debugger
//!
//! Architecture:
//! - core/        - console output, RNG
//! - domain/      - element table
//! - spatial/     - particle slots and position maps
//! - systems/     - element behaviors, heat
//! - simulation/  - engine with a resumable update cursor
//! - model/       - UI-side state (pause, zoom, log, settings)
//! - debug/       - particle debugger
//! - api/         - wasm facade

pub mod core;
pub mod spatial;
pub mod domain;
pub mod systems;
pub mod simulation;
pub mod model;
pub mod debug;
pub mod api;

// Short paths used throughout the crate
pub use domain::elements;
pub use systems::behaviors;
pub use systems::temperature;

use wasm_bindgen::prelude::*;

// Thread pool initialization for the parallel heat pass
#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
pub use wasm_bindgen_rayon::init_thread_pool;

#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    crate::core::console::log("Particula sandbox initialized");
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use api::wasm::Sandbox;
pub use debug::{DebugHost, KeyOutcome, Modifiers, ParticleDebug, StepMode, StepReport};
pub use model::{SandboxModel, SandboxSettings};
pub use simulation::{DebugState, Simulation};
pub use spatial::Point;

// Export element constants for JS
#[wasm_bindgen]
pub fn el_empty() -> u8 { domain::elements::EL_EMPTY }
#[wasm_bindgen]
pub fn el_stone() -> u8 { domain::elements::EL_STONE }
#[wasm_bindgen]
pub fn el_sand() -> u8 { domain::elements::EL_SAND }
#[wasm_bindgen]
pub fn el_water() -> u8 { domain::elements::EL_WATER }
#[wasm_bindgen]
pub fn el_steam() -> u8 { domain::elements::EL_STEAM }
#[wasm_bindgen]
pub fn el_photon() -> u8 { domain::elements::EL_PHOTON }
#[wasm_bindgen]
pub fn el_isotope() -> u8 { domain::elements::EL_ISOTOPE }

/// Element display name, empty for unknown ids
#[wasm_bindgen]
pub fn element_name(id: u8) -> String {
    domain::elements::props(id)
        .map(|p| p.name.to_string())
        .unwrap_or_default()
}
