//! LiquidBehavior - falls like a powder, then spreads sideways

use super::{fall, get_random_dir, try_move, Behavior, UpdateContext, UpdateOutcome};

pub struct LiquidBehavior;

impl LiquidBehavior {
    pub fn new() -> Self {
        Self
    }
}

impl Behavior for LiquidBehavior {
    fn update(&self, ctx: &mut UpdateContext) -> UpdateOutcome {
        if fall(ctx) {
            return UpdateOutcome::MOVED;
        }
        let Some((x, _)) = ctx.position() else {
            return UpdateOutcome::IDLE;
        };
        let (first, second) = get_random_dir(ctx.frame, x);
        if try_move(ctx, first, 0) || try_move(ctx, second, 0) {
            UpdateOutcome::MOVED
        } else {
            UpdateOutcome::IDLE
        }
    }
}
