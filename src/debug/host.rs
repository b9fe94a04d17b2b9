use crate::elements::ElementId;
use crate::spatial::Point;

/// What the particle debugger needs from the engine and the UI model.
///
/// Slot indices run `0..capacity()`. `next_to_update()` is always below
/// `capacity()`; it returns to 0 whenever a frame completes.
pub trait DebugHost {
    /// Number of particle slots (N)
    fn capacity(&self) -> usize;
    /// Element in a slot, `EL_EMPTY` when unoccupied
    fn slot_type(&self, index: usize) -> ElementId;
    fn live_particle_count(&self) -> usize;

    fn next_to_update(&self) -> usize;
    /// Whether the last update run hit an interesting change
    fn interesting_change_occurred(&self) -> bool;
    fn subframe_mode(&self) -> bool;

    fn need_reload_particle_order(&self) -> bool;
    fn autoreload_enabled(&self) -> bool;
    fn reload_particle_order(&mut self);

    /// Grid width and height in cells
    fn grid_size(&self) -> (i32, i32);
    /// Frontmost particle at a grid position
    fn stack_edit_particle_id(&self, x: i32, y: i32) -> Option<usize>;
    /// Screen position to grid position through the zoom overlay
    fn adjust_zoom_coords(&self, position: Point) -> Point;

    fn mark_frame_render(&mut self);
    /// Update slots from the cursor up to (exclusive) `up_to`
    fn update_up_to(&mut self, up_to: usize);
    /// Update the rest of the current frame
    fn complete_debug_update_particles(&mut self);

    fn set_paused(&mut self, paused: bool);
    /// Run whole frames
    fn frame_step(&mut self, frames: u32);

    /// User-facing progress message
    fn log_message(&mut self, message: String);
    /// Developer-facing diagnostic for a programming error
    fn report_defect(&mut self, message: &str);
}
