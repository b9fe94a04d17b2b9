//! PowderBehavior - sand and other granular material
//!
//! Falls straight down; when blocked, rolls to a free diagonal.

use super::{fall, Behavior, UpdateContext, UpdateOutcome};

pub struct PowderBehavior;

impl PowderBehavior {
    pub fn new() -> Self {
        Self
    }
}

impl Behavior for PowderBehavior {
    fn update(&self, ctx: &mut UpdateContext) -> UpdateOutcome {
        if fall(ctx) { UpdateOutcome::MOVED } else { UpdateOutcome::IDLE }
    }
}
