use crate::elements::EL_EMPTY;
use crate::model::DEFAULT_FRAME_STEP_KEY;

use super::DebugHost;

/// How far `step` advances
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepMode {
    /// Up to and including the next occupied slot
    AdvanceOne,
    /// Up to and including the particle under the pointer, or to the end
    AdvanceToClick,
}

impl StepMode {
    /// Numeric mode as used by the presentation layer
    pub fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(StepMode::AdvanceOne),
            1 => Some(StepMode::AdvanceToClick),
            _ => None,
        }
    }
}

/// What one `step` did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepReport {
    /// Cursor before the advance
    pub from: usize,
    /// Last slot requested
    pub target: usize,
    /// The advance reached the end of the frame
    pub frame_completed: bool,
}

pub struct ParticleDebug<'a, H: DebugHost + ?Sized> {
    pub(super) host: &'a mut H,
    pub(super) frame_step_key: char,
}

impl<'a, H: DebugHost + ?Sized> ParticleDebug<'a, H> {
    pub fn new(host: &'a mut H) -> Self {
        Self {
            host,
            frame_step_key: DEFAULT_FRAME_STEP_KEY,
        }
    }

    pub fn with_frame_step_key(mut self, key: char) -> Self {
        self.frame_step_key = key;
        self
    }

    pub fn host(&self) -> &H {
        &*self.host
    }

    #[inline]
    fn last_index(&self) -> usize {
        self.host.capacity().saturating_sub(1)
    }

    /// First occupied slot at or after the cursor, else the last slot
    fn next_occupied(&self) -> usize {
        let last = self.last_index();
        let mut i = self.host.next_to_update().min(last);
        while i < last && self.host.slot_type(i) == EL_EMPTY {
            i += 1;
        }
        i
    }

    /// Per-tick driver while in subframe mode.
    ///
    /// Runs from occupied slot to occupied slot until the end of the frame or
    /// until an update reports an interesting change. Returns the number of
    /// advances made.
    pub fn update(&mut self) -> usize {
        if !self.host.subframe_mode() {
            return 0;
        }

        let last = self.last_index();
        let mut advances = 0;
        loop {
            let i = self.next_occupied();
            self.host.mark_frame_render();
            self.host.update_up_to(i + 1);
            advances += 1;
            if i >= last || self.host.interesting_change_occurred() {
                break;
            }
        }
        advances
    }

    pub fn step(&mut self, mode: StepMode, x: i32, y: i32) -> Option<StepReport> {
        self.reload_order_if_stale();

        let target = match mode {
            StepMode::AdvanceOne => {
                if self.host.live_particle_count() == 0 {
                    return None;
                }
                let i = self.next_occupied();
                let message = if self.host.slot_type(i) == EL_EMPTY {
                    "End of particles reached, updated sim".to_string()
                } else {
                    format!("Updated particle #{}", i)
                };
                self.host.log_message(message);
                i
            }
            StepMode::AdvanceToClick => self.click_target(x, y),
        };

        Some(self.advance_through(target))
    }

    /// `step` with a numeric mode; unknown modes are a caller bug
    pub fn step_raw(&mut self, mode: u8, x: i32, y: i32) -> Option<StepReport> {
        match StepMode::from_raw(mode) {
            Some(mode) => self.step(mode, x, y),
            None => {
                self.host
                    .report_defect(&format!("BUG: particle debug step called with unknown mode {}", mode));
                None
            }
        }
    }

    /// Particle under (x, y) when it is still ahead of the cursor
    fn click_target(&self, x: i32, y: i32) -> usize {
        let last = self.last_index();
        let (width, height) = self.host.grid_size();
        if x >= 0 && x < width && y >= 0 && y < height {
            if let Some(id) = self.host.stack_edit_particle_id(x, y) {
                if id >= self.host.next_to_update() && id <= last {
                    return id;
                }
            }
        }
        last
    }

    fn advance_through(&mut self, target: usize) -> StepReport {
        self.host.mark_frame_render();
        let from = self.host.next_to_update();
        self.host.update_up_to(target + 1);

        let frame_completed = self.host.next_to_update() == 0;
        let message = if frame_completed {
            format!("Updated particles from #{} to end", from)
        } else {
            format!("Updated particles from #{} through #{}", from, target)
        };
        self.host.log_message(message);

        StepReport {
            from,
            target,
            frame_completed,
        }
    }

    fn reload_order_if_stale(&mut self) {
        if self.host.next_to_update() == 0
            && self.host.need_reload_particle_order()
            && self.host.autoreload_enabled()
        {
            self.host.reload_particle_order();
            self.host.log_message("Particle order reloaded.".to_string());
        }
    }
}
