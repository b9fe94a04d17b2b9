//! Public API layer
//!
//! `wasm` exposes `Sandbox` to JavaScript.

pub mod wasm;
