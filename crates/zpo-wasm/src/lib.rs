//! WASM bridge for Zoom/Pan Options: exposes the controller to the module's
//! JS shim.
//!
//! Built with `wasm-pack build --target web`. The shim registers settings from
//! [`settings_schema`], constructs one [`ZoomPanOptions`] on `init`, installs
//! the patches listed by [`ZoomPanOptions::hooks`], and forwards each patched
//! call here. Structured results go back as JSON strings.

mod bridge;
mod logger;

pub use bridge::{CanvasBridge, InteractionBridge, SettingsBridge};

use serde_json::json;
use wasm_bindgen::prelude::*;
use zpo_core::settings::{SettingKind, schema};
use zpo_core::compat::ConstrainStrategy;
use zpo_core::{
    HostVersion, ModifierCombo, Modifiers, MouseButton, MouseDownOutcome, PanRequest, Point,
    SettingKey, Vec2, WheelEvent, ZoomPanController,
};

/// Live controller plus the JS objects it drives.
#[wasm_bindgen]
pub struct ZoomPanOptions {
    controller: ZoomPanController,
    settings: SettingsBridge,
    canvas: CanvasBridge,
}

#[wasm_bindgen]
impl ZoomPanOptions {
    /// Run startup against the host's version string (e.g. `"10.291"`).
    #[wasm_bindgen(constructor)]
    pub fn new(
        version: &str,
        settings: SettingsBridge,
        canvas: CanvasBridge,
        log_level: Option<String>,
    ) -> Result<ZoomPanOptions, JsError> {
        console_error_panic_hook_setup();
        logger::init(logger::parse_level(log_level.as_deref().unwrap_or("info")));

        let version: HostVersion = version.parse().map_err(|e: String| JsError::new(&e))?;
        let mut settings = settings;
        let mut canvas = canvas;
        let controller = ZoomPanController::setup(&version, &mut settings, &mut canvas);
        Ok(Self {
            controller,
            settings,
            canvas,
        })
    }

    /// Patches to install, as JSON: `[{"target":..,"mode":..,"handler":..}]`.
    pub fn hooks(&self) -> String {
        serde_json::to_string(&self.controller.hooks()).unwrap_or_else(|_| "[]".to_string())
    }

    /// Whether constraint customization needs the post-pan notification.
    #[wasm_bindgen(js_name = usesPanHook)]
    pub fn uses_pan_hook(&self) -> bool {
        self.controller.compat().constrain == ConstrainStrategy::PanHook
    }

    /// Wheel handler. Returns `true` when the caller must `preventDefault()`.
    ///
    /// `wheel_delta` is the legacy `event.wheelDelta`, `undefined` in Firefox.
    #[wasm_bindgen(js_name = onWheel)]
    #[allow(clippy::too_many_arguments)]
    pub fn on_wheel(
        &mut self,
        delta_x: f64,
        delta_y: f64,
        wheel_delta: Option<f64>,
        client_x: f64,
        client_y: f64,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
        now_ms: f64,
    ) -> bool {
        let event = WheelEvent {
            delta: Vec2::new(delta_x, delta_y),
            wheel_delta,
            client: Point::new(client_x, client_y),
            modifiers: Modifiers::new(shift, ctrl, alt, meta),
        };
        self.controller
            .on_wheel(&event, now_ms, &self.settings, &mut self.canvas)
            .consumed
    }

    /// Drag-near-edge handler. Returns the started pan as JSON, or `null`.
    #[wasm_bindgen(js_name = onDragCanvasPan)]
    pub fn on_drag_canvas_pan(&mut self, client_x: f64, client_y: f64, now_ms: f64) -> String {
        let pan = self.controller.on_drag_canvas_pan(
            Point::new(client_x, client_y),
            now_ms,
            &self.settings,
            &mut self.canvas,
        );
        serde_json::to_string(&pan).unwrap_or_else(|_| "null".to_string())
    }

    /// Pointer-down wrapper. Returns `"delegate"` when the caller must run
    /// the original handler.
    #[wasm_bindgen(js_name = onMouseDown)]
    pub fn on_mouse_down(&self, button: i16, mim: InteractionBridge) -> String {
        let mut mim = mim;
        let outcome =
            self.controller
                .on_mouse_down(MouseButton::from_code(button), &self.settings, &mut mim);
        outcome_name(outcome).to_string()
    }

    /// Replacement constrain-view. Returns `{"scale":..,"x":..,"y":..}`.
    #[wasm_bindgen(js_name = constrainView)]
    pub fn constrain_view(&self, x: Option<f64>, y: Option<f64>, scale: Option<f64>) -> String {
        let view = self.controller.constrain_view(
            &PanRequest { x, y, scale },
            &self.settings,
            &self.canvas,
        );
        json!({ "scale": view.scale, "x": view.pivot.x, "y": view.pivot.y }).to_string()
    }

    /// Post-pan notification. Returns the corrected stage scale, if any.
    #[wasm_bindgen(js_name = onCanvasPan)]
    pub fn on_canvas_pan(&mut self, constrained_scale: f64) -> Option<f64> {
        self.controller
            .on_canvas_pan(constrained_scale, &self.settings, &mut self.canvas)
    }

    /// Settings dialog change callback. Returns `false` for unknown keys.
    #[wasm_bindgen(js_name = onSettingChanged)]
    pub fn on_setting_changed(&mut self, key: &str, value: JsValue) -> bool {
        let Ok(key) = key.parse::<SettingKey>() else {
            log::warn!("unknown setting '{key}'");
            return false;
        };
        let Some(value) = bridge::value_from_js(&value) else {
            return false;
        };
        self.controller.on_setting_changed(key, &value, &mut self.canvas);
        true
    }
}

fn outcome_name(outcome: MouseDownOutcome) -> &'static str {
    match outcome {
        MouseDownOutcome::Delegate => "delegate",
        MouseDownOutcome::Swallow => "swallow",
        MouseDownOutcome::Refused => "refused",
        MouseDownOutcome::Handled => "handled",
    }
}

// ─── Standalone functions (no canvas needed) ─────────────────────────────

/// Setting registrations for `game.settings.register`, as a JSON array.
#[wasm_bindgen(js_name = settingsSchema)]
pub fn settings_schema() -> String {
    schema_json().to_string()
}

fn schema_json() -> serde_json::Value {
    let entries: Vec<serde_json::Value> = schema()
        .into_iter()
        .map(|d| {
            let mut entry = json!({
                "key": d.key.as_str(),
                "name": d.name,
                "hint": d.hint,
                "type": kind_name(d.kind),
                "scope": "client",
                "config": d.config,
                "default": d.default,
            });
            if d.kind == SettingKind::Combo {
                let choices: serde_json::Map<String, serde_json::Value> = ModifierCombo::choices()
                    .map(|combo| (combo.as_key(), json!(combo.label())))
                    .collect();
                entry["choices"] = serde_json::Value::Object(choices);
            }
            if let Some(effect) = d.effect {
                entry["onChange"] = json!(format!("{effect:?}"));
            }
            entry
        })
        .collect();
    serde_json::Value::Array(entries)
}

fn kind_name(kind: SettingKind) -> &'static str {
    match kind {
        SettingKind::Bool => "Boolean",
        SettingKind::Number => "Number",
        SettingKind::Combo | SettingKind::Text => "String",
    }
}

// ─── Panic hook for WASM debugging ───────────────────────────────────────

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("{} WASM panic: {info}", logger::PREFIX);
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}
