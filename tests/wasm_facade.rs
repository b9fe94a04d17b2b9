#![cfg(target_arch = "wasm32")]

use particula_sandbox::{el_sand, Sandbox};
use wasm_bindgen_test::*;

#[wasm_bindgen_test]
fn sandbox_steps_one_particle_from_js() {
    let mut sandbox = Sandbox::new(32, 32);
    assert!(sandbox.add_particle(4, 4, el_sand()));
    sandbox.set_subframe_mode(true);

    assert!(sandbox.debug_step(0, 0, 0));
    assert_eq!(sandbox.next_to_update(), 1);

    sandbox.tick();
    assert_eq!(sandbox.next_to_update(), 0);
    assert_eq!(sandbox.frame(), 1);
    assert!(sandbox.take_frame_render());
}

#[wasm_bindgen_test]
fn invalid_settings_are_rejected() {
    assert!(Sandbox::with_settings(8, 8, r#"{"logCapacity":0}"#.to_string()).is_err());

    let mut sandbox = Sandbox::new(8, 8);
    assert!(sandbox.load_settings("not json".to_string()).is_err());
    assert!(sandbox.load_settings(r#"{"autoreloadParticleOrder":true}"#.to_string()).is_ok());
    assert!(sandbox.get_settings_json().contains("\"autoreloadParticleOrder\":true"));
}
