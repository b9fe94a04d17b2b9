use std::collections::HashMap;

use proptest::prelude::*;

use super::*;
use crate::elements::{ElementId, EL_EMPTY, EL_SAND};
use crate::spatial::Point;

/// Engine stand-in: slots only carry a type, updates only move the cursor
struct ScriptedHost {
    slots: Vec<ElementId>,
    cursor: usize,
    interesting_slots: Vec<usize>,
    interesting: bool,
    subframe: bool,
    need_reload: bool,
    autoreload: bool,
    reloads: usize,
    size: (i32, i32),
    stack: HashMap<(i32, i32), usize>,
    zoom_offset: Point,
    // Next update finishes the frame whatever the target
    wrap_next_update: bool,
    renders: usize,
    update_calls: Vec<usize>,
    completes: usize,
    frames_stepped: u32,
    paused: bool,
    logs: Vec<String>,
    defects: Vec<String>,
}

impl ScriptedHost {
    fn new(capacity: usize) -> Self {
        Self {
            slots: vec![EL_EMPTY; capacity],
            cursor: 0,
            interesting_slots: Vec::new(),
            interesting: false,
            subframe: false,
            need_reload: false,
            autoreload: false,
            reloads: 0,
            size: (100, 100),
            stack: HashMap::new(),
            zoom_offset: Point::default(),
            wrap_next_update: false,
            renders: 0,
            update_calls: Vec::new(),
            completes: 0,
            frames_stepped: 0,
            paused: false,
            logs: Vec::new(),
            defects: Vec::new(),
        }
    }

    fn occupy(mut self, slots: &[usize]) -> Self {
        for &i in slots {
            self.slots[i] = EL_SAND;
        }
        self
    }

    fn at_cursor(mut self, cursor: usize) -> Self {
        self.cursor = cursor;
        self
    }
}

impl DebugHost for ScriptedHost {
    fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn slot_type(&self, index: usize) -> ElementId {
        self.slots.get(index).copied().unwrap_or(EL_EMPTY)
    }

    fn live_particle_count(&self) -> usize {
        self.slots.iter().filter(|&&t| t != EL_EMPTY).count()
    }

    fn next_to_update(&self) -> usize {
        self.cursor
    }

    fn interesting_change_occurred(&self) -> bool {
        self.interesting
    }

    fn subframe_mode(&self) -> bool {
        self.subframe
    }

    fn need_reload_particle_order(&self) -> bool {
        self.need_reload
    }

    fn autoreload_enabled(&self) -> bool {
        self.autoreload
    }

    fn reload_particle_order(&mut self) {
        self.reloads += 1;
        self.need_reload = false;
    }

    fn grid_size(&self) -> (i32, i32) {
        self.size
    }

    fn stack_edit_particle_id(&self, x: i32, y: i32) -> Option<usize> {
        self.stack.get(&(x, y)).copied()
    }

    fn adjust_zoom_coords(&self, position: Point) -> Point {
        Point::new(position.x + self.zoom_offset.x, position.y + self.zoom_offset.y)
    }

    fn mark_frame_render(&mut self) {
        self.renders += 1;
    }

    fn update_up_to(&mut self, up_to: usize) {
        self.update_calls.push(up_to);
        let n = self.slots.len();
        let mut up_to = up_to.min(n);
        if up_to < self.cursor || self.wrap_next_update {
            up_to = n;
        }
        self.wrap_next_update = false;
        self.interesting = (self.cursor..up_to)
            .any(|i| self.slots[i] != EL_EMPTY && self.interesting_slots.contains(&i));
        self.cursor = if up_to >= n { 0 } else { up_to };
    }

    fn complete_debug_update_particles(&mut self) {
        self.completes += 1;
        self.cursor = 0;
    }

    fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    fn frame_step(&mut self, frames: u32) {
        self.frames_stepped += frames;
    }

    fn log_message(&mut self, message: String) {
        self.logs.push(message);
    }

    fn report_defect(&mut self, message: &str) {
        self.defects.push(message.to_string());
    }
}

// === PERIODIC UPDATE ===

#[test]
fn update_does_nothing_outside_subframe_mode() {
    let mut host = ScriptedHost::new(100).occupy(&[5, 50]);

    let advances = ParticleDebug::new(&mut host).update();

    assert_eq!(advances, 0);
    assert!(host.update_calls.is_empty());
    assert!(host.logs.is_empty());
    assert_eq!(host.renders, 0);
}

#[test]
fn update_stops_exactly_at_the_interesting_particle() {
    let mut host = ScriptedHost::new(1000).occupy(&[500]);
    host.subframe = true;
    host.interesting_slots = vec![500];

    let advances = ParticleDebug::new(&mut host).update();

    assert_eq!(advances, 1);
    assert_eq!(host.update_calls, vec![501]);
    assert_eq!(host.cursor, 501);
    assert!(host.logs.is_empty());
}

#[test]
fn update_walks_occupied_slots_to_the_end_of_the_frame() {
    let mut host = ScriptedHost::new(20).occupy(&[3, 7]);
    host.subframe = true;

    let advances = ParticleDebug::new(&mut host).update();

    assert_eq!(advances, 3);
    assert_eq!(host.update_calls, vec![4, 8, 20]);
    assert_eq!(host.cursor, 0);
    assert_eq!(host.renders, 3);
}

#[test]
fn update_resumes_after_an_interesting_stop() {
    let mut host = ScriptedHost::new(10).occupy(&[2, 4, 9]);
    host.subframe = true;
    host.interesting_slots = vec![4];

    assert_eq!(ParticleDebug::new(&mut host).update(), 2);
    assert_eq!(host.cursor, 5);

    assert_eq!(ParticleDebug::new(&mut host).update(), 1);
    assert_eq!(host.update_calls, vec![3, 5, 10]);
    assert_eq!(host.cursor, 0);
}

// === STEP ===

#[test]
fn advance_one_with_no_particles_is_a_no_op() {
    let mut host = ScriptedHost::new(100).at_cursor(12);

    let report = ParticleDebug::new(&mut host).step(StepMode::AdvanceOne, 0, 0);

    assert_eq!(report, None);
    assert_eq!(host.cursor, 12);
    assert!(host.update_calls.is_empty());
    assert!(host.logs.is_empty());
    assert_eq!(host.renders, 0);
}

#[test]
fn advance_one_runs_through_the_next_occupied_slot() {
    let mut host = ScriptedHost::new(100).occupy(&[5, 40]).at_cursor(2);

    let report = ParticleDebug::new(&mut host).step(StepMode::AdvanceOne, 0, 0);

    assert_eq!(report, Some(StepReport { from: 2, target: 5, frame_completed: false }));
    assert_eq!(host.update_calls, vec![6]);
    assert_eq!(host.cursor, 6);
    assert_eq!(
        host.logs,
        vec!["Updated particle #5", "Updated particles from #2 through #5"]
    );
}

#[test]
fn advance_one_names_an_occupied_last_slot() {
    let mut host = ScriptedHost::new(1000).occupy(&[999]);

    let report = ParticleDebug::new(&mut host).step(StepMode::AdvanceOne, 0, 0).unwrap();

    assert_eq!(report.target, 999);
    assert!(report.frame_completed);
    assert_eq!(
        host.logs,
        vec!["Updated particle #999", "Updated particles from #0 to end"]
    );
}

#[test]
fn advance_one_past_the_last_particle_finishes_the_frame() {
    let mut host = ScriptedHost::new(100).occupy(&[10]).at_cursor(11);

    let report = ParticleDebug::new(&mut host).step(StepMode::AdvanceOne, 0, 0).unwrap();

    assert_eq!(report.target, 99);
    assert_eq!(host.cursor, 0);
    assert_eq!(
        host.logs,
        vec!["End of particles reached, updated sim", "Updated particles from #11 to end"]
    );
}

#[test]
fn click_ahead_of_the_cursor_targets_that_particle() {
    let mut host = ScriptedHost::new(100).occupy(&[30]).at_cursor(10);
    host.stack.insert((4, 5), 30);

    let report = ParticleDebug::new(&mut host).step(StepMode::AdvanceToClick, 4, 5).unwrap();

    assert_eq!(report, StepReport { from: 10, target: 30, frame_completed: false });
    assert_eq!(host.cursor, 31);
    assert_eq!(host.logs, vec!["Updated particles from #10 through #30"]);
}

#[test]
fn click_on_the_cursor_slot_itself_is_accepted() {
    let mut host = ScriptedHost::new(100).occupy(&[10]).at_cursor(10);
    host.stack.insert((1, 1), 10);

    let report = ParticleDebug::new(&mut host).step(StepMode::AdvanceToClick, 1, 1).unwrap();

    assert_eq!(report.target, 10);
    assert_eq!(host.cursor, 11);
}

#[test]
fn click_behind_the_cursor_is_the_same_as_clicking_nothing() {
    let mut behind = ScriptedHost::new(100).occupy(&[3, 30]).at_cursor(10);
    behind.stack.insert((4, 5), 3);
    let mut nothing = ScriptedHost::new(100).occupy(&[3, 30]).at_cursor(10);

    let a = ParticleDebug::new(&mut behind).step(StepMode::AdvanceToClick, 4, 5);
    let b = ParticleDebug::new(&mut nothing).step(StepMode::AdvanceToClick, 4, 5);

    assert_eq!(a, b);
    assert_eq!(a, Some(StepReport { from: 10, target: 99, frame_completed: true }));
    assert_eq!(behind.logs, nothing.logs);
    assert_eq!(behind.logs, vec!["Updated particles from #10 to end"]);
}

#[test]
fn click_outside_the_grid_runs_to_the_end() {
    let mut host = ScriptedHost::new(100).occupy(&[30]);
    host.stack.insert((100, 5), 30);
    host.stack.insert((5, -1), 30);

    let report = ParticleDebug::new(&mut host).step(StepMode::AdvanceToClick, 100, 5).unwrap();
    assert_eq!(report.target, 99);

    let report = ParticleDebug::new(&mut host).step(StepMode::AdvanceToClick, 5, -1).unwrap();
    assert_eq!(report.target, 99);
}

#[test]
fn wrapped_frame_is_reported_as_to_end() {
    let mut host = ScriptedHost::new(100).occupy(&[50]).at_cursor(10);
    host.stack.insert((7, 7), 50);
    host.wrap_next_update = true;

    let report = ParticleDebug::new(&mut host).step(StepMode::AdvanceToClick, 7, 7).unwrap();

    assert_eq!(report, StepReport { from: 10, target: 50, frame_completed: true });
    assert_eq!(host.logs, vec!["Updated particles from #10 to end"]);
}

#[test]
fn unknown_raw_mode_is_reported_without_touching_state() {
    let mut host = ScriptedHost::new(100).occupy(&[5]);
    host.need_reload = true;
    host.autoreload = true;

    let report = ParticleDebug::new(&mut host).step_raw(7, 0, 0);

    assert_eq!(report, None);
    assert_eq!(host.defects.len(), 1);
    assert!(host.defects[0].contains("unknown mode 7"));
    assert_eq!(host.cursor, 0);
    assert!(host.update_calls.is_empty());
    assert!(host.logs.is_empty());
    assert_eq!(host.renders, 0);
    assert_eq!(host.reloads, 0);
}

#[test]
fn raw_modes_map_to_step_modes() {
    assert_eq!(StepMode::from_raw(0), Some(StepMode::AdvanceOne));
    assert_eq!(StepMode::from_raw(1), Some(StepMode::AdvanceToClick));
    assert_eq!(StepMode::from_raw(2), None);

    let mut host = ScriptedHost::new(10).occupy(&[4]);
    let report = ParticleDebug::new(&mut host).step_raw(0, 0, 0).unwrap();
    assert_eq!(report.target, 4);
    assert!(host.defects.is_empty());
}

#[test]
fn stale_order_is_reloaded_at_a_frame_boundary_when_enabled() {
    let mut host = ScriptedHost::new(100).occupy(&[5]);
    host.need_reload = true;
    host.autoreload = true;

    ParticleDebug::new(&mut host).step(StepMode::AdvanceOne, 0, 0);

    assert_eq!(host.reloads, 1);
    assert_eq!(host.logs[0], "Particle order reloaded.");
    assert_eq!(host.logs.len(), 3);
}

#[test]
fn stale_order_is_left_alone_mid_frame_or_without_autoreload() {
    let mut mid_frame = ScriptedHost::new(100).occupy(&[5]).at_cursor(2);
    mid_frame.need_reload = true;
    mid_frame.autoreload = true;
    ParticleDebug::new(&mut mid_frame).step(StepMode::AdvanceOne, 0, 0);
    assert_eq!(mid_frame.reloads, 0);

    let mut disabled = ScriptedHost::new(100).occupy(&[5]);
    disabled.need_reload = true;
    ParticleDebug::new(&mut disabled).step(StepMode::AdvanceOne, 0, 0);
    assert_eq!(disabled.reloads, 0);
    assert!(disabled.logs.iter().all(|l| l != "Particle order reloaded."));
}

// === KEY BINDING ===

#[test]
fn ctrl_frame_step_key_propagates_without_side_effects() {
    let combos = [
        Modifiers::CTRL,
        Modifiers { shift: true, ctrl: true, alt: false },
        Modifiers { shift: false, ctrl: true, alt: true },
    ];
    for cursor in [0, 3] {
        for mods in combos {
            let mut host = ScriptedHost::new(100).occupy(&[5]).at_cursor(cursor);

            let outcome = ParticleDebug::new(&mut host).handle_key('f', mods, Point::new(1, 1));

            assert_eq!(outcome, KeyOutcome::Propagate);
            assert!(outcome.propagates());
            assert!(!host.paused);
            assert!(host.update_calls.is_empty());
            assert!(host.logs.is_empty());
            assert_eq!(host.completes, 0);
            assert_eq!(host.frames_stepped, 0);
            assert_eq!(host.cursor, cursor);
        }
    }
}

#[test]
fn other_keys_propagate() {
    let mut host = ScriptedHost::new(100).occupy(&[5]);

    let outcome = ParticleDebug::new(&mut host).handle_key('g', Modifiers::NONE, Point::new(0, 0));

    assert_eq!(outcome, KeyOutcome::Propagate);
    assert!(!host.paused);
}

#[test]
fn alt_steps_one_particle_and_pauses() {
    let mut host = ScriptedHost::new(100).occupy(&[5]);

    let outcome = ParticleDebug::new(&mut host).handle_key('f', Modifiers::ALT, Point::new(70, 70));

    assert_eq!(outcome, KeyOutcome::Consumed);
    assert!(host.paused);
    assert_eq!(host.cursor, 6);
    assert_eq!(host.logs.last().map(String::as_str), Some("Updated particles from #0 through #5"));
}

#[test]
fn shift_clamps_the_pointer_into_the_grid() {
    let mut host = ScriptedHost::new(100).occupy(&[20]);
    host.size = (50, 40);
    host.stack.insert((49, 0), 20);

    let outcome = ParticleDebug::new(&mut host).handle_key('f', Modifiers::SHIFT, Point::new(500, -30));

    assert_eq!(outcome, KeyOutcome::Consumed);
    assert!(host.paused);
    assert_eq!(host.cursor, 21);
    assert_eq!(host.logs, vec!["Updated particles from #0 through #20"]);
}

#[test]
fn shift_maps_the_pointer_through_the_zoom_overlay() {
    let mut host = ScriptedHost::new(100).occupy(&[20]);
    host.zoom_offset = Point::new(-10, 3);
    host.stack.insert((15, 8), 20);

    ParticleDebug::new(&mut host).handle_key('F', Modifiers::SHIFT, Point::new(25, 5));

    assert_eq!(host.cursor, 21);
}

#[test]
fn plain_key_mid_frame_finishes_the_frame() {
    let mut host = ScriptedHost::new(100).occupy(&[50]).at_cursor(42);

    let outcome = ParticleDebug::new(&mut host).handle_key('f', Modifiers::NONE, Point::new(0, 0));

    assert_eq!(outcome, KeyOutcome::Consumed);
    assert!(host.paused);
    assert_eq!(host.completes, 1);
    assert_eq!(host.cursor, 0);
    assert_eq!(host.frames_stepped, 0);
    assert_eq!(host.logs, vec!["Updated particles from #42 to end due to frame step"]);
}

#[test]
fn plain_key_between_frames_steps_a_whole_frame() {
    let mut host = ScriptedHost::new(100).occupy(&[50]);

    let outcome = ParticleDebug::new(&mut host).handle_key('f', Modifiers::NONE, Point::new(0, 0));

    assert_eq!(outcome, KeyOutcome::Consumed);
    assert!(host.paused);
    assert_eq!(host.frames_stepped, 1);
    assert_eq!(host.completes, 0);
    assert!(host.logs.is_empty());
}

#[test]
fn frame_step_key_is_configurable() {
    let mut host = ScriptedHost::new(100).occupy(&[50]);

    let outcome = ParticleDebug::new(&mut host)
        .with_frame_step_key('g')
        .handle_key('f', Modifiers::NONE, Point::new(0, 0));
    assert_eq!(outcome, KeyOutcome::Propagate);

    let outcome = ParticleDebug::new(&mut host)
        .with_frame_step_key('g')
        .handle_key('g', Modifiers::NONE, Point::new(0, 0));
    assert_eq!(outcome, KeyOutcome::Consumed);
    assert_eq!(host.frames_stepped, 1);
}

#[test]
fn key_actions_follow_modifier_priority() {
    let mut host = ScriptedHost::new(100);
    {
        let debug = ParticleDebug::new(&mut host);
        let both = Modifiers { shift: true, ctrl: false, alt: true };
        assert_eq!(debug.key_action('f', both), Some(KeyAction::StepParticle));
        assert_eq!(debug.key_action('f', Modifiers::SHIFT), Some(KeyAction::StepToPointer));
        assert_eq!(debug.key_action('f', Modifiers::NONE), Some(KeyAction::FrameStep));
        assert_eq!(debug.key_action('f', Modifiers::CTRL), None);
        assert_eq!(debug.key_action('x', Modifiers::NONE), None);
    }

    host.cursor = 7;
    let debug = ParticleDebug::new(&mut host);
    assert_eq!(debug.key_action('f', Modifiers::NONE), Some(KeyAction::FinishFrame));
    assert_eq!(debug.host().next_to_update(), 7);
}

// === PROPERTIES ===

fn arb_grid() -> impl Strategy<Value = (Vec<bool>, usize)> {
    (1usize..200).prop_flat_map(|n| (proptest::collection::vec(any::<bool>(), n), 0..n))
}

fn host_for(occupied: &[bool], cursor: usize) -> ScriptedHost {
    let slots: Vec<usize> = occupied
        .iter()
        .enumerate()
        .filter(|(_, &o)| o)
        .map(|(i, _)| i)
        .collect();
    ScriptedHost::new(occupied.len()).occupy(&slots).at_cursor(cursor)
}

proptest! {
    #[test]
    fn advance_one_targets_the_next_occupied_slot((occupied, cursor) in arb_grid()) {
        let n = occupied.len();
        let mut host = host_for(&occupied, cursor);

        let report = ParticleDebug::new(&mut host).step(StepMode::AdvanceOne, 0, 0);

        if !occupied.iter().any(|&o| o) {
            prop_assert_eq!(report, None);
            prop_assert_eq!(host.cursor, cursor);
            prop_assert!(host.update_calls.is_empty());
        } else {
            let expected = (cursor..n).find(|&i| occupied[i]).unwrap_or(n - 1);
            let report = report.unwrap();
            prop_assert_eq!(report.from, cursor);
            prop_assert_eq!(report.target, expected);
            if expected + 1 == n {
                prop_assert_eq!(host.cursor, 0);
            } else {
                prop_assert_eq!(host.cursor, expected + 1);
                prop_assert!(host.cursor > cursor);
            }

            let last = host.logs.last().unwrap();
            if host.cursor == 0 {
                prop_assert!(last.ends_with("to end"));
            } else {
                let suffix = format!("through #{}", expected);
                prop_assert!(last.ends_with(&suffix));
            }
        }
    }

    #[test]
    fn click_behind_the_cursor_matches_a_click_on_nothing(
        (occupied, cursor) in arb_grid(),
        behind in any::<proptest::sample::Index>()
    ) {
        prop_assume!(cursor > 0);
        let id = behind.index(cursor);

        let mut clicked = host_for(&occupied, cursor);
        clicked.stack.insert((1, 1), id);
        let mut empty = host_for(&occupied, cursor);

        let a = ParticleDebug::new(&mut clicked).step(StepMode::AdvanceToClick, 1, 1);
        let b = ParticleDebug::new(&mut empty).step(StepMode::AdvanceToClick, 1, 1);

        prop_assert_eq!(a, b);
        prop_assert_eq!(clicked.cursor, empty.cursor);
        prop_assert_eq!(clicked.logs, empty.logs);
    }

    #[test]
    fn periodic_update_always_terminates_at_a_stop_or_frame_end(
        (occupied, cursor) in arb_grid(),
        pick in any::<proptest::sample::Index>()
    ) {
        let n = occupied.len();
        let mut host = host_for(&occupied, cursor);
        host.subframe = true;
        let flagged = pick.index(n);
        host.interesting_slots = vec![flagged];

        let advances = ParticleDebug::new(&mut host).update();

        prop_assert!(advances >= 1 && advances <= n);
        if occupied[flagged] && flagged >= cursor && flagged < n - 1 {
            prop_assert_eq!(host.cursor, flagged + 1);
        } else {
            prop_assert_eq!(host.cursor, 0);
        }
    }
}
