//! Core utilities shared by every layer: console output and the RNG.

pub mod console;
pub mod random;
