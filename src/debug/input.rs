use crate::spatial::Point;

use super::{DebugHost, ParticleDebug, StepMode};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers { shift: false, ctrl: false, alt: false };
    pub const SHIFT: Modifiers = Modifiers { shift: true, ctrl: false, alt: false };
    pub const CTRL: Modifiers = Modifiers { shift: false, ctrl: true, alt: false };
    pub const ALT: Modifiers = Modifiers { shift: false, ctrl: false, alt: true };
}

/// Whether outer key handlers should still see the key
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyOutcome {
    Consumed,
    Propagate,
}

impl KeyOutcome {
    pub fn propagates(self) -> bool {
        self == KeyOutcome::Propagate
    }
}

/// Frame-step key bindings
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// alt: next particle
    StepParticle,
    /// shift: up to the particle under the pointer
    StepToPointer,
    /// plain, mid-frame: rest of the frame
    FinishFrame,
    /// plain, between frames: one whole frame
    FrameStep,
}

impl<'a, H: DebugHost + ?Sized> ParticleDebug<'a, H> {
    /// Binding for a key press, `None` when the debugger does not handle it
    pub fn key_action(&self, key: char, modifiers: Modifiers) -> Option<KeyAction> {
        if !key.eq_ignore_ascii_case(&self.frame_step_key) || modifiers.ctrl {
            return None;
        }
        let action = if modifiers.alt {
            KeyAction::StepParticle
        } else if modifiers.shift {
            KeyAction::StepToPointer
        } else if self.host.next_to_update() > 0 {
            KeyAction::FinishFrame
        } else {
            KeyAction::FrameStep
        };
        Some(action)
    }

    pub fn handle_key(&mut self, key: char, modifiers: Modifiers, pointer: Point) -> KeyOutcome {
        let Some(action) = self.key_action(key, modifiers) else {
            return KeyOutcome::Propagate;
        };

        self.host.set_paused(true);
        match action {
            KeyAction::StepParticle => {
                self.step(StepMode::AdvanceOne, 0, 0);
            }
            KeyAction::StepToPointer => {
                let position = self.pointer_to_grid(pointer);
                self.step(StepMode::AdvanceToClick, position.x, position.y);
            }
            KeyAction::FinishFrame => {
                let message = format!(
                    "Updated particles from #{} to end due to frame step",
                    self.host.next_to_update()
                );
                self.host.complete_debug_update_particles();
                self.host.log_message(message);
            }
            KeyAction::FrameStep => self.host.frame_step(1),
        }
        KeyOutcome::Consumed
    }

    /// Clamp into the grid, then undo the zoom overlay
    fn pointer_to_grid(&self, pointer: Point) -> Point {
        let (width, height) = self.host.grid_size();
        let clamped = Point::new(
            pointer.x.clamp(0, (width - 1).max(0)),
            pointer.y.clamp(0, (height - 1).max(0)),
        );
        self.host.adjust_zoom_coords(clamped)
    }
}
