//! GasBehavior - rises, drifting sideways at random

use super::{get_random_dir, try_move, Behavior, UpdateContext, UpdateOutcome};
use crate::core::random::random_below;

pub struct GasBehavior;

impl GasBehavior {
    pub fn new() -> Self {
        Self
    }
}

impl Behavior for GasBehavior {
    fn update(&self, ctx: &mut UpdateContext) -> UpdateOutcome {
        let Some((x, _)) = ctx.position() else {
            return UpdateOutcome::IDLE;
        };
        let (first, second) = get_random_dir(ctx.frame, x);

        // One in four updates drifts instead of rising
        if random_below(ctx.rng, 4) == 0 && (try_move(ctx, first, 0) || try_move(ctx, second, 0)) {
            return UpdateOutcome::MOVED;
        }

        if try_move(ctx, 0, -1)
            || try_move(ctx, first, -1)
            || try_move(ctx, second, -1)
            || try_move(ctx, first, 0)
            || try_move(ctx, second, 0)
        {
            UpdateOutcome::MOVED
        } else {
            UpdateOutcome::IDLE
        }
    }
}
