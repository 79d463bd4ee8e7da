//! Integration tests: wheel events → scroll action → host calls.

mod common;

use common::{FakeHost, init_logging};
use pretty_assertions::assert_eq;
use zpo_core::{
    HostVersion, MemoryStore, Modifiers, PanRequest, Point, ScrollAction, SettingKey,
    SettingsStore, Vec2, WheelEvent, WheelOutcome, ZoomPanController,
};

fn controller(version: &str) -> ZoomPanController {
    let version: HostVersion = version.parse().unwrap();
    ZoomPanController::setup(&version, &mut MemoryStore::new(), &mut FakeHost::default())
}

fn wheel(delta_y: f64, modifiers: Modifiers) -> WheelEvent {
    WheelEvent {
        delta: Vec2::new(0.0, delta_y),
        wheel_delta: None,
        client: Point::new(600.0, 400.0),
        modifiers,
    }
}

const CTRL: Modifiers = Modifiers {
    shift: false,
    ctrl: true,
    alt: false,
    meta: false,
};
const SHIFT: Modifiers = Modifiers {
    shift: true,
    ctrl: false,
    alt: false,
    meta: false,
};
const ALT: Modifiers = Modifiers {
    shift: false,
    ctrl: false,
    alt: true,
    meta: false,
};

// ─── Guards ─────────────────────────────────────────────────────────────

#[test]
fn canvas_not_ready_only_blocks_browser_zoom() {
    init_logging();
    let mut ctl = controller("10.291");
    let store = MemoryStore::new();
    let mut host = FakeHost {
        ready: false,
        ..FakeHost::default()
    };

    let plain = ctl.on_wheel(&wheel(-100.0, Modifiers::NONE), 0.0, &store, &mut host);
    assert_eq!(plain, WheelOutcome::default());

    let ctrl = ctl.on_wheel(&wheel(-100.0, CTRL), 0.0, &store, &mut host);
    assert!(ctrl.consumed);
    assert_eq!(ctrl.performed, None);

    let meta = Modifiers {
        meta: true,
        ..Modifiers::NONE
    };
    assert!(ctl.on_wheel(&wheel(-100.0, meta), 0.0, &store, &mut host).consumed);
    assert!(host.pans.is_empty());
}

#[test]
fn cursor_off_canvas_is_ignored() {
    let mut ctl = controller("10.291");
    let store = MemoryStore::new();
    let mut host = FakeHost {
        over_canvas: false,
        ..FakeHost::default()
    };
    let outcome = ctl.on_wheel(&wheel(-100.0, Modifiers::NONE), 0.0, &store, &mut host);
    assert!(!outcome.consumed);
    assert!(host.pans.is_empty());
}

#[test]
fn unbound_combo_is_consumed_without_action() {
    let mut ctl = controller("10.291");
    let store = MemoryStore::new();
    let mut host = FakeHost::default();
    let outcome = ctl.on_wheel(&wheel(-100.0, ALT), 0.0, &store, &mut host);
    assert_eq!(
        outcome,
        WheelOutcome {
            consumed: true,
            performed: None,
        }
    );
    assert!(host.pans.is_empty());
}

// ─── Zoom ───────────────────────────────────────────────────────────────

#[test]
fn default_wheel_zooms_in_fixed_steps() {
    let mut ctl = controller("10.291");
    let store = MemoryStore::new();
    let mut host = FakeHost::default();

    let outcome = ctl.on_wheel(&wheel(-3.0, Modifiers::NONE), 0.0, &store, &mut host);
    assert_eq!(outcome.performed, Some(ScrollAction::Zoom));
    assert_eq!(host.pans[0].scale, Some(1.05));

    ctl.on_wheel(&wheel(250.0, Modifiers::NONE), 10.0, &store, &mut host);
    assert_eq!(host.pans[1].scale, Some(1.05 * 0.95));
}

#[test]
fn zoom_keeps_cursor_world_point() {
    let mut ctl = controller("10.291");
    let mut store = MemoryStore::new();
    store.set(SettingKey::ZoomSpeedMultiplier, 1.0.into());
    let mut host = FakeHost::default();

    let mut event = wheel(-200.0, Modifiers::NONE);
    event.client = Point::new(100.0, 700.0);
    let before = host.view.to_world(event.client);
    ctl.on_wheel(&event, 0.0, &store, &mut host);
    let after = host.view.to_world(event.client);
    assert!((after - before).hypot() < 1e-9, "{after:?} vs {before:?}");
    assert!(host.view.scale > 1.0);
}

#[test]
fn zoom_past_max_clamps_scale_only() {
    let mut ctl = controller("10.291");
    let mut store = MemoryStore::new();
    store.set(SettingKey::ZoomSpeedMultiplier, 1.0.into());
    let mut host = FakeHost::default();
    host.view.scale = 2.5;

    let mut event = wheel(-2000.0, Modifiers::NONE);
    event.client = Point::new(10.0, 10.0);
    ctl.on_wheel(&event, 0.0, &store, &mut host);
    assert_eq!(host.pans, vec![PanRequest::scale(3.0)]);
    assert_eq!(host.view.pivot, Point::new(2000.0, 1500.0));
}

// ─── Pan ────────────────────────────────────────────────────────────────

#[test]
fn alternative_bindings_pan_and_horizontal_pan() {
    let store = MemoryStore::from_json(include_str!("fixtures/alternative_bindings.json")).unwrap();
    let mut ctl = controller("10.291");
    let mut host = FakeHost::default();
    host.view.scale = 2.0;

    let mut event = wheel(40.0, Modifiers::NONE);
    event.delta.x = -20.0;
    let outcome = ctl.on_wheel(&event, 0.0, &store, &mut host);
    assert_eq!(outcome.performed, Some(ScrollAction::Pan));
    // multiplier 2 / scale 2 = 1
    assert_eq!(host.pans[0], PanRequest::to(Point::new(1980.0, 1540.0)));

    let outcome = ctl.on_wheel(&wheel(30.0, SHIFT), 1.0, &store, &mut host);
    assert_eq!(outcome.performed, Some(ScrollAction::HorizontalPan));
    assert_eq!(host.pans[1], PanRequest::to(Point::new(2010.0, 1540.0)));

    let outcome = ctl.on_wheel(&wheel(-100.0, CTRL), 2.0, &store, &mut host);
    assert_eq!(outcome.performed, Some(ScrollAction::Zoom));
}

#[test]
fn inverted_vertical_pan() {
    let mut store = MemoryStore::new();
    store.set(SettingKey::PanModifier, "".into());
    store.set(SettingKey::ZoomModifier, "disabled".into());
    store.set(SettingKey::InvertVerticalScroll, true.into());
    let mut ctl = controller("10.291");
    let mut host = FakeHost::default();

    ctl.on_wheel(&wheel(50.0, Modifiers::NONE), 0.0, &store, &mut host);
    assert_eq!(host.pans[0], PanRequest::to(Point::new(2000.0, 1450.0)));
}

// ─── Rotate ─────────────────────────────────────────────────────────────

#[test]
fn rotate_selected_objects() {
    let mut ctl = controller("10.291");
    let store = MemoryStore::new();
    let mut host = FakeHost::with_selection(2);

    let mut event = wheel(100.0, CTRL);
    event.wheel_delta = Some(-120.0);
    let outcome = ctl.on_wheel(&event, 1000.0, &store, &mut host);
    assert_eq!(outcome.performed, Some(ScrollAction::Rotate));

    let outcome = ctl.on_wheel(&wheel(100.0, SHIFT), 2000.0, &store, &mut host);
    assert_eq!(outcome.performed, Some(ScrollAction::RotateSnap));

    assert_eq!(host.rotations, vec![(-120.0, false), (100.0, true)]);
    assert!(host.pans.is_empty());
}

#[test]
fn rotate_without_target_does_nothing() {
    let mut ctl = controller("10.291");
    let store = MemoryStore::new();
    let mut host = FakeHost::with_selection(0);

    let outcome = ctl.on_wheel(&wheel(100.0, CTRL), 1000.0, &store, &mut host);
    assert_eq!(
        outcome,
        WheelOutcome {
            consumed: true,
            performed: None,
        }
    );
    assert!(host.rotations.is_empty());
    // Rotation modifiers never fall through to zoom or pan.
    assert!(host.pans.is_empty());

    // The limiter was not touched, so an immediate retry with a target works.
    host.layer.controlled = 1;
    let outcome = ctl.on_wheel(&wheel(100.0, CTRL), 1001.0, &store, &mut host);
    assert_eq!(outcome.performed, Some(ScrollAction::Rotate));
}

#[test]
fn rotate_on_non_placeables_layer_is_skipped() {
    let mut ctl = controller("10.291");
    let store = MemoryStore::new();
    let mut host = FakeHost::with_selection(1);
    host.layer.placeables = false;

    let outcome = ctl.on_wheel(&wheel(100.0, CTRL), 0.0, &store, &mut host);
    assert_eq!(outcome.performed, None);
    assert!(host.rotations.is_empty());
}

#[test]
fn hovered_object_rotates_on_uncontrolled_layer() {
    let mut ctl = controller("10.291");
    let store = MemoryStore::new();
    let mut host = FakeHost::default();
    host.layer.placeables = true;
    host.layer.hovered = true;

    let outcome = ctl.on_wheel(&wheel(100.0, CTRL), 0.0, &store, &mut host);
    assert_eq!(outcome.performed, Some(ScrollAction::Rotate));
}

#[test]
fn rotation_rate_limit_uses_mouse_manager_constant() {
    let mut ctl = controller("10.291");
    let store = MemoryStore::new();
    let mut host = FakeHost::with_selection(1);

    assert!(ctl.on_wheel(&wheel(1.0, CTRL), 1000.0, &store, &mut host).performed.is_some());
    assert!(ctl.on_wheel(&wheel(1.0, CTRL), 1030.0, &store, &mut host).performed.is_none());
    assert!(ctl.on_wheel(&wheel(1.0, CTRL), 1050.0, &store, &mut host).performed.is_some());
    assert_eq!(host.rotations.len(), 2);
}

#[test]
fn rotation_rate_limit_uses_keyboard_constant_on_old_hosts() {
    let mut ctl = controller("0.8.9");
    let store = MemoryStore::new();
    let mut host = FakeHost::with_selection(1);

    assert!(ctl.on_wheel(&wheel(1.0, CTRL), 1000.0, &store, &mut host).performed.is_some());
    assert!(ctl.on_wheel(&wheel(1.0, CTRL), 1060.0, &store, &mut host).performed.is_none());
    assert!(ctl.on_wheel(&wheel(1.0, CTRL), 1100.0, &store, &mut host).performed.is_some());
}

#[test]
fn shared_combo_goes_to_first_registered_action() {
    let mut store = MemoryStore::new();
    store.set(SettingKey::ZoomModifier, "ctrl".into());
    let mut ctl = controller("10.291");
    let mut host = FakeHost::with_selection(1);

    // rotate-modifier defaults to ctrl too, but zoom registered first.
    let outcome = ctl.on_wheel(&wheel(-100.0, CTRL), 0.0, &store, &mut host);
    assert_eq!(outcome.performed, Some(ScrollAction::Zoom));
    assert!(host.rotations.is_empty());
}
