use std::collections::HashSet;

use freefly::core::{Controller, CursorMode, Key, MouseButton, PushEvent, PushEventKind};
use freefly::input::{InputDispatcher, KeyBinding, KeyPhase};
use glam::Vec2;

/// Polled state the test scripts tick by tick
#[derive(Default)]
struct ScriptedController {
    down: HashSet<Key>,
    cursor: Option<Vec2>,
    now: f64,
    mode: Option<CursorMode>,
    subscribed: HashSet<PushEventKind>,
    queued: Vec<PushEvent>,
}

impl ScriptedController {
    fn push(&mut self, event: PushEvent) {
        // A real source drops events nobody subscribed to
        if self.subscribed.contains(&event.kind()) {
            self.queued.push(event);
        }
    }
}

impl Controller for ScriptedController {
    fn is_down(&self, key: Key) -> bool {
        self.down.contains(&key)
    }

    fn cursor_position(&self) -> Option<Vec2> {
        self.cursor
    }

    fn time(&self) -> f64 {
        self.now
    }

    fn set_cursor_mode(&mut self, mode: CursorMode) {
        self.mode = Some(mode);
    }

    fn set_subscribed(&mut self, kind: PushEventKind, subscribed: bool) {
        if subscribed {
            self.subscribed.insert(kind);
        } else {
            self.subscribed.remove(&kind);
            self.queued.retain(|event| event.kind() != kind);
        }
    }

    fn take_events(&mut self, out: &mut Vec<PushEvent>) {
        out.append(&mut self.queued);
    }
}

/// What fired, in order
type Log = Vec<String>;

fn logging_binding(name: &'static str) -> KeyBinding<Log> {
    KeyBinding::new()
        .on_pressed(move |log: &mut Log, _| log.push(format!("{} pressed", name)))
        .on_held(move |log: &mut Log, _| log.push(format!("{} held", name)))
        .on_released(move |log: &mut Log, _| log.push(format!("{} released", name)))
}

fn dispatcher() -> InputDispatcher<Log, ScriptedController> {
    InputDispatcher::new(ScriptedController::default())
}

fn tick(input: &mut InputDispatcher<Log, ScriptedController>, log: &mut Log, down: &[Key]) {
    let source = input.source_mut();
    source.down = down.iter().copied().collect();
    source.now += 1.0 / 60.0;
    input.update(log);
}

#[cfg(test)]
mod key_phase_tests {
    use super::*;

    #[test]
    fn test_press_hold_release_sequence() {
        let mut input = dispatcher();
        input.register_key_binding(Key::KeyW, logging_binding("w"));

        let mut log = Log::new();
        let samples = [true, true, true, false, false];
        let mut fired_per_tick = Vec::new();

        for down in samples {
            let before = log.len();
            let keys: &[Key] = if down { &[Key::KeyW] } else { &[] };
            tick(&mut input, &mut log, keys);
            fired_per_tick.push(log[before..].to_vec());
        }

        assert_eq!(
            fired_per_tick,
            vec![
                vec!["w pressed".to_string()],
                vec!["w held".to_string()],
                vec!["w held".to_string()],
                vec!["w released".to_string()],
                vec![],
            ]
        );
        assert_eq!(input.phase(Key::KeyW), Some(KeyPhase::Idle));
    }

    #[test]
    fn test_held_does_not_fire_on_press_tick() {
        let mut input = dispatcher();
        input.register_key_binding(
            Key::Space,
            KeyBinding::new().on_held(|log: &mut Log, _| log.push("held".into())),
        );

        let mut log = Log::new();
        tick(&mut input, &mut log, &[Key::Space]);
        assert!(log.is_empty(), "on_held must wait for the second down tick");

        tick(&mut input, &mut log, &[Key::Space]);
        assert_eq!(log, vec!["held"]);
    }

    #[test]
    fn test_tap_within_one_tick_gap() {
        // Released -> Pressed without passing through Idle
        let mut input = dispatcher();
        input.register_key_binding(Key::KeyE, logging_binding("e"));

        let mut log = Log::new();
        tick(&mut input, &mut log, &[Key::KeyE]);
        tick(&mut input, &mut log, &[]);
        tick(&mut input, &mut log, &[Key::KeyE]);

        assert_eq!(log, vec!["e pressed", "e released", "e pressed"]);
    }

    #[test]
    fn test_keys_fire_in_registration_order() {
        let mut input = dispatcher();
        input.register_key_binding(Key::KeyS, logging_binding("s"));
        input.register_key_binding(Key::KeyA, logging_binding("a"));
        input.register_key_binding(Key::KeyD, logging_binding("d"));

        let mut log = Log::new();
        tick(&mut input, &mut log, &[Key::KeyA, Key::KeyD, Key::KeyS]);

        assert_eq!(log, vec!["s pressed", "a pressed", "d pressed"]);
    }

    #[test]
    fn test_delta_time_passed_to_callbacks() {
        let mut input: InputDispatcher<Vec<f32>, _> =
            InputDispatcher::new(ScriptedController::default());
        input.register_key_binding(
            Key::KeyW,
            KeyBinding::new()
                .on_pressed(|deltas: &mut Vec<f32>, dt| deltas.push(dt))
                .on_held(|deltas: &mut Vec<f32>, dt| deltas.push(dt)),
        );
        input.source_mut().down.insert(Key::KeyW);

        let mut deltas = Vec::new();
        input.source_mut().now = 10.0;
        input.update(&mut deltas);
        input.source_mut().now = 10.25;
        input.update(&mut deltas);
        input.source_mut().now = 10.75;
        input.update(&mut deltas);

        assert_eq!(deltas, vec![0.0, 0.25, 0.5]);
    }
}

#[cfg(test)]
mod binding_tests {
    use super::*;

    #[test]
    fn test_empty_binding_is_not_tracked() {
        let mut input = dispatcher();
        input.register_key_binding(Key::KeyQ, KeyBinding::new());

        assert_eq!(input.tracked_keys().count(), 0);
        assert_eq!(input.phase(Key::KeyQ), None);
    }

    #[test]
    fn test_unbinding_stops_callbacks_while_held() {
        let mut input = dispatcher();
        input.register_key_binding(Key::KeyW, logging_binding("w"));

        let mut log = Log::new();
        tick(&mut input, &mut log, &[Key::KeyW]);
        tick(&mut input, &mut log, &[Key::KeyW]);
        assert_eq!(log.len(), 2);

        input.register_key_binding(Key::KeyW, KeyBinding::new());
        assert_eq!(input.tracked_keys().count(), 0);

        for _ in 0..3 {
            tick(&mut input, &mut log, &[Key::KeyW]);
        }
        tick(&mut input, &mut log, &[]);
        assert_eq!(log.len(), 2, "no callback may fire after unbinding");
    }

    #[test]
    fn test_rebinding_replaces_callbacks() {
        let mut input = dispatcher();
        input.register_key_binding(Key::KeyR, logging_binding("old"));
        input.register_key_binding(Key::KeyR, logging_binding("new"));

        let mut log = Log::new();
        tick(&mut input, &mut log, &[Key::KeyR]);

        assert_eq!(log, vec!["new pressed"]);
        assert_eq!(input.tracked_keys().collect::<Vec<_>>(), vec![Key::KeyR]);
    }

    #[test]
    fn test_binding_with_only_release() {
        let mut input = dispatcher();
        input.register_key_binding(
            Key::KeyR,
            KeyBinding::new().on_released(|log: &mut Log, _| log.push("reset".into())),
        );

        let mut log = Log::new();
        tick(&mut input, &mut log, &[Key::KeyR]);
        tick(&mut input, &mut log, &[Key::KeyR]);
        assert!(log.is_empty());

        tick(&mut input, &mut log, &[]);
        assert_eq!(log, vec!["reset"]);
    }
}

#[cfg(test)]
mod mouse_tests {
    use super::*;

    type Moves = Vec<(Vec2, Vec2)>;

    fn move_dispatcher() -> InputDispatcher<Moves, ScriptedController> {
        let mut input = InputDispatcher::new(ScriptedController::default());
        input.set_mouse_move_callback(Some(Box::new(
            |moves: &mut Moves, delta: Vec2, position: Vec2| moves.push((delta, position)),
        )));
        input
    }

    #[test]
    fn test_first_sample_only_seeds() {
        let mut input = move_dispatcher();
        let mut moves = Moves::new();

        input.source_mut().cursor = Some(Vec2::new(400.0, 300.0));
        input.update(&mut moves);
        assert!(moves.is_empty(), "first sample must not report the absolute position");

        input.source_mut().cursor = Some(Vec2::new(410.0, 295.0));
        input.update(&mut moves);
        assert_eq!(moves, vec![(Vec2::new(10.0, -5.0), Vec2::new(410.0, 295.0))]);
    }

    #[test]
    fn test_stationary_cursor_reports_zero_delta() {
        let mut input = move_dispatcher();
        let mut moves = Moves::new();

        input.source_mut().cursor = Some(Vec2::new(5.0, 5.0));
        input.update(&mut moves);
        input.update(&mut moves);

        assert_eq!(moves, vec![(Vec2::ZERO, Vec2::new(5.0, 5.0))]);
    }

    #[test]
    fn test_no_cursor_no_callback() {
        let mut input = move_dispatcher();
        let mut moves = Moves::new();

        input.update(&mut moves);
        input.update(&mut moves);

        assert!(moves.is_empty());
    }

    #[test]
    fn test_replacing_callback_reseeds() {
        let mut input = move_dispatcher();
        let mut moves = Moves::new();

        input.source_mut().cursor = Some(Vec2::new(0.0, 0.0));
        input.update(&mut moves);

        input.set_mouse_move_callback(Some(Box::new(
            |moves: &mut Moves, delta: Vec2, position: Vec2| moves.push((delta, position)),
        )));
        input.source_mut().cursor = Some(Vec2::new(100.0, 100.0));
        input.update(&mut moves);

        assert!(moves.is_empty());
    }

    #[test]
    fn test_scroll_delivered_during_update() {
        let mut input: InputDispatcher<Vec<f32>, _> =
            InputDispatcher::new(ScriptedController::default());

        input.source_mut().push(PushEvent::Scroll(1.0));
        input.set_mouse_scroll_callback(Some(Box::new(|offsets: &mut Vec<f32>, offset: f32| {
            offsets.push(offset)
        })));
        assert!(input.source().subscribed.contains(&PushEventKind::Scroll));

        input.source_mut().push(PushEvent::Scroll(-2.0));
        input.source_mut().push(PushEvent::Scroll(0.5));

        let mut offsets = Vec::new();
        input.update(&mut offsets);
        assert_eq!(offsets, vec![-2.0, 0.5], "events before subscribing are dropped");

        input.update(&mut offsets);
        assert_eq!(offsets.len(), 2, "events are delivered once");
    }

    #[test]
    fn test_push_events_run_before_keys() {
        let mut input = dispatcher();
        input.register_key_binding(Key::KeyW, logging_binding("w"));
        input.set_mouse_button_callback(Some(Box::new(
            |log: &mut Log, button: MouseButton, pressed: bool| {
                log.push(format!("{:?} {}", button, pressed))
            },
        )));

        input.source_mut().push(PushEvent::MouseButton {
            button: MouseButton::Right,
            pressed: true,
        });

        let mut log = Log::new();
        tick(&mut input, &mut log, &[Key::KeyW]);

        assert_eq!(log, vec!["Right true", "w pressed"]);
    }

    #[test]
    fn test_clearing_scroll_callback_unsubscribes() {
        let mut input: InputDispatcher<Vec<f32>, _> =
            InputDispatcher::new(ScriptedController::default());
        input.set_mouse_scroll_callback(Some(Box::new(|offsets: &mut Vec<f32>, offset: f32| {
            offsets.push(offset)
        })));
        input.source_mut().push(PushEvent::Scroll(3.0));

        input.set_mouse_scroll_callback(None);
        assert!(!input.source().subscribed.contains(&PushEventKind::Scroll));

        let mut offsets = Vec::new();
        input.update(&mut offsets);
        assert!(offsets.is_empty());
    }
}

#[cfg(test)]
mod reset_tests {
    use super::*;

    #[test]
    fn test_reset_drops_everything() {
        let mut input = dispatcher();
        input.register_key_binding(Key::KeyW, logging_binding("w"));
        input.set_mouse_move_callback(Some(Box::new(
            |log: &mut Log, _delta: Vec2, _position: Vec2| log.push("move".into()),
        )));
        input.set_mouse_scroll_callback(Some(Box::new(|log: &mut Log, _offset: f32| {
            log.push("scroll".into())
        })));
        input.set_mouse_button_callback(Some(Box::new(
            |log: &mut Log, _button: MouseButton, _pressed: bool| log.push("button".into()),
        )));
        input.source_mut().push(PushEvent::Scroll(1.0));

        input.reset();

        assert_eq!(input.tracked_keys().count(), 0);
        assert!(input.source().subscribed.is_empty());

        let mut log = Log::new();
        input.source_mut().cursor = Some(Vec2::ZERO);
        tick(&mut input, &mut log, &[Key::KeyW]);
        input.source_mut().cursor = Some(Vec2::ONE);
        tick(&mut input, &mut log, &[Key::KeyW]);

        assert!(log.is_empty());
    }

    #[test]
    fn test_dispatcher_usable_after_reset() {
        let mut input = dispatcher();
        input.register_key_binding(Key::KeyW, logging_binding("w"));
        input.reset();
        input.register_key_binding(Key::KeyS, logging_binding("s"));

        let mut log = Log::new();
        tick(&mut input, &mut log, &[Key::KeyW, Key::KeyS]);

        assert_eq!(log, vec!["s pressed"]);
    }

    #[test]
    fn test_two_dispatchers_are_independent() {
        let mut first = dispatcher();
        let mut second = dispatcher();
        first.register_key_binding(Key::KeyW, logging_binding("first"));
        second.register_key_binding(Key::KeyW, logging_binding("second"));

        let (mut first_log, mut second_log) = (Log::new(), Log::new());
        tick(&mut first, &mut first_log, &[Key::KeyW]);
        tick(&mut second, &mut second_log, &[]);

        assert_eq!(first_log, vec!["first pressed"]);
        assert!(second_log.is_empty());
        assert_eq!(second.source().mode, Some(CursorMode::Disabled));
    }
}
