//! Entry points the host hooks call into.
//!
//! One [`ZoomPanController`] is built at startup by [`ZoomPanController::setup`].
//! It owns the version strategy and the two throttles; settings are re-read
//! from the store on every event.

use crate::compat::{ConstrainStrategy, HookRegistration, HostCompat, HostVersion};
use crate::edge_pan::{AnimatedPan, EdgePanner};
use crate::host::CanvasHost;
use crate::middle_mouse::{InteractionManager, MouseButton, MouseDownOutcome, handle_mouse_down};
use crate::migrate::migrate_legacy_mode;
use crate::modes::{ModeMap, ScrollAction};
use crate::modifiers::Modifiers;
use crate::pan::{plan_horizontal_pan, plan_pan};
use crate::rotation::RotationLimiter;
use crate::settings::{SettingEffect, SettingKey, SettingValue, Settings, SettingsStore};
use crate::view::{
    ConstraintContext, PanRequest, ViewTransform, ZoomBounds, constrain_view, reclamp_after_pan,
};
use crate::zoom::plan_zoom;
use kurbo::{Point, Vec2};

/// A wheel event as the browser reports it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelEvent {
    pub delta: Vec2,
    /// Legacy `wheelDelta`; absent in Firefox.
    pub wheel_delta: Option<f64>,
    pub client: Point,
    pub modifiers: Modifiers,
}

impl WheelEvent {
    /// Delta used for rotation: `wheelDelta` when present, else `deltaY`.
    pub fn rotation_delta(&self) -> f64 {
        self.wheel_delta.unwrap_or(self.delta.y)
    }
}

/// What the wheel handler did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WheelOutcome {
    /// The browser default must be prevented.
    pub consumed: bool,
    /// The action that changed host state, if any.
    pub performed: Option<ScrollAction>,
}

/// Per-session controller.
#[derive(Debug, Clone)]
pub struct ZoomPanController {
    compat: HostCompat,
    rotation: RotationLimiter,
    edge: EdgePanner,
}

impl ZoomPanController {
    pub fn new(compat: HostCompat) -> Self {
        Self {
            compat,
            rotation: RotationLimiter::new(),
            edge: EdgePanner::new(),
        }
    }

    /// Startup: migrate legacy settings, pick the version strategy, and push
    /// the stored max zoom and middle-click state to the host.
    pub fn setup(
        version: &HostVersion,
        store: &mut impl SettingsStore,
        host: &mut impl CanvasHost,
    ) -> Self {
        log::info!("Initializing Zoom/Pan Options");
        if let Some(preset) = migrate_legacy_mode(store) {
            log::debug!("applied legacy preset {}", preset.as_str());
        }

        let controller = Self::new(HostCompat::detect(version));
        let settings = Settings::load(&*store);
        for effect in SettingEffect::initial(&settings) {
            apply_effect(effect, host);
        }
        log::info!("Done setting up Zoom/Pan Options.");
        controller
    }

    pub fn compat(&self) -> HostCompat {
        self.compat
    }

    /// Prototype patches the host shim must install.
    pub fn hooks(&self) -> Vec<HookRegistration> {
        self.compat.hooks()
    }

    // ─── Wheel ───────────────────────────────────────────────────────────

    /// Replacement for the host's wheel handler.
    pub fn on_wheel(
        &mut self,
        event: &WheelEvent,
        now_ms: f64,
        store: &impl SettingsStore,
        host: &mut impl CanvasHost,
    ) -> WheelOutcome {
        let settings = Settings::load(store);
        let mode = ModeMap::from_settings(&settings).resolve(&event.modifiers);

        // Ctrl/meta + wheel zooms the whole page unless prevented.
        let mut outcome = WheelOutcome {
            consumed: event.modifiers.is_zoom_hardware(),
            performed: None,
        };

        if !host.is_ready() || !host.is_over_canvas(event.client) {
            return outcome;
        }
        outcome.consumed = true;

        let Some(action) = mode else {
            log::trace!("no scroll action for '{}'", event.modifiers.combo_key());
            return outcome;
        };

        outcome.performed = match action {
            ScrollAction::Rotate | ScrollAction::RotateSnap => {
                self.rotate(event, action, now_ms, host).then_some(action)
            }
            ScrollAction::Zoom => {
                let view = host.view();
                let bounds =
                    ZoomBounds::derive(&host.dimensions(), host.window_size(), host.max_zoom());
                let plan = plan_zoom(&view, event.client, event.delta.y, &settings, &bounds);
                host.pan(plan.request);
                Some(action)
            }
            ScrollAction::HorizontalPan => {
                host.pan(plan_horizontal_pan(&host.view(), event.delta.y, &settings));
                Some(action)
            }
            ScrollAction::Pan => {
                host.pan(plan_pan(&host.view(), event.delta, &settings));
                Some(action)
            }
        };
        outcome
    }

    fn rotate(
        &mut self,
        event: &WheelEvent,
        action: ScrollAction,
        now_ms: f64,
        host: &mut impl CanvasHost,
    ) -> bool {
        let layer = host.active_layer();
        if !layer.placeables || !layer.has_rotation_target() {
            return false;
        }
        let min_interval = host.wheel_rate_limit_ms(self.compat.rate_limit);
        if !self.rotation.try_accept(now_ms, min_interval) {
            return false;
        }
        host.rotate_targets(event.rotation_delta(), action == ScrollAction::RotateSnap);
        true
    }

    // ─── Drag ────────────────────────────────────────────────────────────

    /// Replacement for the host's drag-to-edge pan.
    pub fn on_drag_canvas_pan(
        &mut self,
        cursor: Point,
        now_ms: f64,
        store: &impl SettingsStore,
        host: &mut impl CanvasHost,
    ) -> Option<AnimatedPan> {
        let settings = Settings::load(store);
        let pan = self.edge.on_drag_move(
            cursor,
            now_ms,
            &host.view(),
            &host.dimensions(),
            host.window_size(),
            &settings,
        )?;
        host.animate_pan(pan);
        Some(pan)
    }

    /// Wrapper around the host's pointer-down handling.
    pub fn on_mouse_down(
        &self,
        button: MouseButton,
        store: &impl SettingsStore,
        mim: &mut impl InteractionManager,
    ) -> MouseDownOutcome {
        let enabled = Settings::load(store).middle_mouse_pan;
        handle_mouse_down(enabled, button, mim)
    }

    // ─── View constraints ────────────────────────────────────────────────

    /// Replacement for the host's constrain-view function.
    pub fn constrain_view(
        &self,
        request: &PanRequest,
        store: &impl SettingsStore,
        host: &impl CanvasHost,
    ) -> ViewTransform {
        let settings = Settings::load(store);
        constrain_view(
            request,
            &ConstraintContext {
                current: host.view(),
                dims: host.dimensions(),
                window: host.window_size(),
                max_zoom: host.max_zoom(),
                round: !settings.disable_zoom_rounding,
            },
        )
    }

    /// Post-pan notification, for hosts whose constrain-view is private.
    ///
    /// Undoes the host's 1% rounding when rounding is disabled. Returns the
    /// scale written back to the stage, if any.
    pub fn on_canvas_pan(
        &self,
        constrained_scale: f64,
        store: &impl SettingsStore,
        host: &mut impl CanvasHost,
    ) -> Option<f64> {
        if self.compat.constrain != ConstrainStrategy::PanHook {
            return None;
        }
        let settings = Settings::load(store);
        let scale = reclamp_after_pan(
            constrained_scale,
            &host.dimensions(),
            host.window_size(),
            host.max_zoom(),
            settings.disable_zoom_rounding,
        )?;
        host.set_stage_scale(scale);
        Some(scale)
    }

    // ─── Settings ────────────────────────────────────────────────────────

    /// A setting changed in the settings dialog.
    pub fn on_setting_changed(
        &self,
        key: SettingKey,
        value: &SettingValue,
        host: &mut impl CanvasHost,
    ) -> Option<SettingEffect> {
        let effect = SettingEffect::for_change(key, value)?;
        apply_effect(effect, host);
        Some(effect)
    }
}

fn apply_effect(effect: SettingEffect, host: &mut impl CanvasHost) {
    match effect {
        SettingEffect::MiddleClickAutoscroll(suppressed) => {
            host.set_middle_click_autoscroll_suppressed(suppressed)
        }
        SettingEffect::MaxZoom(max_zoom) => host.set_max_zoom(max_zoom),
    }
}
