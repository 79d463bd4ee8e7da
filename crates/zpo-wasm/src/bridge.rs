//! Imported JS objects and their core adapter implementations.
//!
//! The JS side hands us three small facade objects wrapping the live engine:
//! `SettingsBridge` (module settings), `CanvasBridge` (the canvas and its
//! active layer), and `InteractionBridge` (one pointer interaction manager
//! plus the event being handled).

use js_sys::Float64Array;
use wasm_bindgen::prelude::*;
use zpo_core::compat::RateLimitSource;
use zpo_core::middle_mouse::{InteractionAction, InteractionState};
use zpo_core::{
    ActiveLayer, AnimatedPan, CanvasDimensions, CanvasHost, InteractionManager, PanRequest,
    Point, SettingKey, SettingValue, SettingsStore, Size, Vec2, ViewTransform,
};

#[wasm_bindgen]
extern "C" {
    pub type SettingsBridge;

    /// Read `namespace.key`; `undefined` when unset.
    #[wasm_bindgen(method)]
    fn get(this: &SettingsBridge, key: &str) -> JsValue;

    #[wasm_bindgen(method)]
    fn set(this: &SettingsBridge, key: &str, value: JsValue);

    pub type CanvasBridge;

    #[wasm_bindgen(method, js_name = isReady)]
    fn is_ready(this: &CanvasBridge) -> bool;

    #[wasm_bindgen(method, js_name = isOverCanvas)]
    fn is_over_canvas(this: &CanvasBridge, x: f64, y: f64) -> bool;

    /// `[scale, pivotX, pivotY, worldTransform.tx, worldTransform.ty]`
    #[wasm_bindgen(method, js_name = viewState)]
    fn view_state(this: &CanvasBridge) -> Float64Array;

    /// `[width, height, gridSize]`
    #[wasm_bindgen(method)]
    fn dimensions(this: &CanvasBridge) -> Float64Array;

    /// `[innerWidth, innerHeight]`
    #[wasm_bindgen(method, js_name = windowSize)]
    fn window_size(this: &CanvasBridge) -> Float64Array;

    #[wasm_bindgen(method, js_name = layerHasPlaceables)]
    fn layer_has_placeables(this: &CanvasBridge) -> bool;

    #[wasm_bindgen(method, js_name = layerControllable)]
    fn layer_controllable(this: &CanvasBridge) -> bool;

    #[wasm_bindgen(method, js_name = layerControlledCount)]
    fn layer_controlled_count(this: &CanvasBridge) -> u32;

    #[wasm_bindgen(method, js_name = layerHovered)]
    fn layer_hovered(this: &CanvasBridge) -> bool;

    #[wasm_bindgen(method)]
    fn rotate(this: &CanvasBridge, delta: f64, snap: bool);

    #[wasm_bindgen(method)]
    fn pan(this: &CanvasBridge, x: Option<f64>, y: Option<f64>, scale: Option<f64>);

    #[wasm_bindgen(method, js_name = animatePan)]
    fn animate_pan(this: &CanvasBridge, x: f64, y: f64, duration: f64);

    #[wasm_bindgen(method, js_name = setStageScale)]
    fn set_stage_scale(this: &CanvasBridge, scale: f64);

    /// `"mouse"` or `"keyboard"`.
    #[wasm_bindgen(method, js_name = wheelRateLimit)]
    fn wheel_rate_limit(this: &CanvasBridge, source: &str) -> f64;

    #[wasm_bindgen(method, js_name = maxZoom)]
    fn max_zoom(this: &CanvasBridge) -> f64;

    #[wasm_bindgen(method, js_name = setMaxZoom)]
    fn set_max_zoom(this: &CanvasBridge, max_zoom: f64);

    #[wasm_bindgen(method, js_name = setMiddleClickAutoscrollSuppressed)]
    fn set_middle_click_autoscroll_suppressed(this: &CanvasBridge, suppressed: bool);

    pub type InteractionBridge;

    #[wasm_bindgen(method)]
    fn state(this: &InteractionBridge) -> i32;

    #[wasm_bindgen(method, js_name = setState)]
    fn set_state(this: &InteractionBridge, state: i32);

    #[wasm_bindgen(method)]
    fn can(this: &InteractionBridge, action: &str) -> bool;

    #[wasm_bindgen(method, js_name = captureEvent)]
    fn capture_event(this: &InteractionBridge);

    #[wasm_bindgen(method, js_name = stopPropagation)]
    fn stop_propagation(this: &InteractionBridge);

    #[wasm_bindgen(method, js_name = beginRightDrag)]
    fn begin_right_drag(this: &InteractionBridge);

    #[wasm_bindgen(method)]
    fn callback(this: &InteractionBridge, action: &str);

    #[wasm_bindgen(method, js_name = activateDragEvents)]
    fn activate_drag_events(this: &InteractionBridge);
}

// ─── Settings ────────────────────────────────────────────────────────────

impl SettingsStore for SettingsBridge {
    fn get(&self, key: SettingKey) -> Option<SettingValue> {
        value_from_js(&SettingsBridge::get(self, key.as_str()))
    }

    fn set(&mut self, key: SettingKey, value: SettingValue) {
        SettingsBridge::set(self, key.as_str(), value_to_js(&value));
    }
}

pub(crate) fn value_from_js(value: &JsValue) -> Option<SettingValue> {
    if let Some(b) = value.as_bool() {
        Some(SettingValue::Bool(b))
    } else if let Some(n) = value.as_f64() {
        Some(SettingValue::Number(n))
    } else {
        value.as_string().map(SettingValue::Text)
    }
}

pub(crate) fn value_to_js(value: &SettingValue) -> JsValue {
    match value {
        SettingValue::Bool(b) => JsValue::from_bool(*b),
        SettingValue::Number(n) => JsValue::from_f64(*n),
        SettingValue::Text(s) => JsValue::from_str(s),
    }
}

// ─── Canvas ──────────────────────────────────────────────────────────────

/// Read element `idx`, or `fallback` if the JS side sent a short array.
fn at(values: &[f64], idx: usize, fallback: f64) -> f64 {
    values.get(idx).copied().unwrap_or(fallback)
}

/// The stage transform maps `pivot` to `pivot * scale + t`.
pub(crate) fn view_from_state(v: &[f64]) -> ViewTransform {
    let scale = at(v, 0, 1.0);
    let pivot = Point::new(at(v, 1, 0.0), at(v, 2, 0.0));
    let t = Vec2::new(at(v, 3, 0.0), at(v, 4, 0.0));
    ViewTransform::new(scale, pivot, (pivot.to_vec2() * scale + t).to_point())
}

impl CanvasHost for CanvasBridge {
    fn is_ready(&self) -> bool {
        CanvasBridge::is_ready(self)
    }

    fn is_over_canvas(&self, client: Point) -> bool {
        CanvasBridge::is_over_canvas(self, client.x, client.y)
    }

    fn view(&self) -> ViewTransform {
        view_from_state(&self.view_state().to_vec())
    }

    fn dimensions(&self) -> CanvasDimensions {
        let d = CanvasBridge::dimensions(self).to_vec();
        CanvasDimensions {
            width: at(&d, 0, 0.0),
            height: at(&d, 1, 0.0),
            size: at(&d, 2, 100.0),
        }
    }

    fn window_size(&self) -> Size {
        let w = CanvasBridge::window_size(self).to_vec();
        Size::new(at(&w, 0, 0.0), at(&w, 1, 0.0))
    }

    fn active_layer(&self) -> ActiveLayer {
        ActiveLayer {
            placeables: self.layer_has_placeables(),
            controllable: self.layer_controllable(),
            controlled: self.layer_controlled_count() as usize,
            hovered: self.layer_hovered(),
        }
    }

    fn rotate_targets(&mut self, delta: f64, snap: bool) {
        self.rotate(delta, snap);
    }

    fn pan(&mut self, request: PanRequest) {
        CanvasBridge::pan(self, request.x, request.y, request.scale);
    }

    fn animate_pan(&mut self, pan: AnimatedPan) {
        CanvasBridge::animate_pan(self, pan.x, pan.y, pan.duration);
    }

    fn set_stage_scale(&mut self, scale: f64) {
        CanvasBridge::set_stage_scale(self, scale);
    }

    fn wheel_rate_limit_ms(&self, source: RateLimitSource) -> f64 {
        self.wheel_rate_limit(rate_limit_name(source))
    }

    fn max_zoom(&self) -> f64 {
        CanvasBridge::max_zoom(self)
    }

    fn set_max_zoom(&mut self, max_zoom: f64) {
        CanvasBridge::set_max_zoom(self, max_zoom);
    }

    fn set_middle_click_autoscroll_suppressed(&mut self, suppressed: bool) {
        CanvasBridge::set_middle_click_autoscroll_suppressed(self, suppressed);
    }
}

pub(crate) fn rate_limit_name(source: RateLimitSource) -> &'static str {
    match source {
        RateLimitSource::MouseManager => "mouse",
        RateLimitSource::KeyboardManager => "keyboard",
    }
}

// ─── Interaction ─────────────────────────────────────────────────────────

impl InteractionManager for InteractionBridge {
    fn state(&self) -> InteractionState {
        InteractionState::from_code(InteractionBridge::state(self)).unwrap_or(InteractionState::None)
    }

    fn set_state(&mut self, state: InteractionState) {
        InteractionBridge::set_state(self, state.code());
    }

    fn can(&self, action: InteractionAction) -> bool {
        InteractionBridge::can(self, action.as_str())
    }

    fn capture_event(&mut self) {
        InteractionBridge::capture_event(self);
    }

    fn stop_propagation(&mut self) {
        InteractionBridge::stop_propagation(self);
    }

    fn begin_right_drag(&mut self) {
        InteractionBridge::begin_right_drag(self);
    }

    fn callback(&mut self, action: InteractionAction) {
        InteractionBridge::callback(self, action.as_str());
    }

    fn activate_drag_events(&mut self) {
        InteractionBridge::activate_drag_events(self);
    }
}
