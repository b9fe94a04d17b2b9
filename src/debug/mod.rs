//! Particle debugger
//!
//! Steps a running frame one particle (or particle run) at a time so the
//! update that causes a change can be isolated. The controller owns no
//! simulation state: it borrows a `DebugHost` for the duration of one call
//! and drives the host's resumable update cursor forward.

mod host;
mod input;
mod particle_debug;

pub use host::DebugHost;
pub use input::{KeyAction, KeyOutcome, Modifiers};
pub use particle_debug::{ParticleDebug, StepMode, StepReport};

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
