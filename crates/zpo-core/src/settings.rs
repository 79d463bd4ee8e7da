//! Settings schema, host settings store, and the typed settings snapshot.
//!
//! Settings live in the host's per-user store under the `zoom-pan-options`
//! namespace. Handlers never hold on to store values: each event builds a
//! fresh [`Settings`] snapshot via [`Settings::load`], so a change in the
//! settings dialog applies to the very next wheel tick.

use crate::modifiers::{MODIFIER_CHOICES, ModifierCombo, Modifiers};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Namespace for every key this module registers.
pub const MODULE_ID: &str = "zoom-pan-options";

// ─── Keys ────────────────────────────────────────────────────────────────

/// Every setting the module registers, in registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SettingKey {
    ZoomAroundCursor,
    MiddleMousePan,
    DisableZoomRounding,
    MinMaxZoomOverride,
    ZoomModifier,
    PanModifier,
    HorizontalPanModifier,
    RotateModifier,
    RotateSnapModifier,
    ZoomSpeedMultiplier,
    PanSpeedMultiplier,
    InvertVerticalScroll,
    PadValueWhenDragging,
    ShiftValueWhenDragging,
    /// Deprecated single "mode" preset. Only read by the migrator.
    PanZoomMode,
}

impl SettingKey {
    pub const ALL: [SettingKey; 15] = [
        Self::ZoomAroundCursor,
        Self::MiddleMousePan,
        Self::DisableZoomRounding,
        Self::MinMaxZoomOverride,
        Self::ZoomModifier,
        Self::PanModifier,
        Self::HorizontalPanModifier,
        Self::RotateModifier,
        Self::RotateSnapModifier,
        Self::ZoomSpeedMultiplier,
        Self::PanSpeedMultiplier,
        Self::InvertVerticalScroll,
        Self::PadValueWhenDragging,
        Self::ShiftValueWhenDragging,
        Self::PanZoomMode,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ZoomAroundCursor => "zoom-around-cursor",
            Self::MiddleMousePan => "middle-mouse-pan",
            Self::DisableZoomRounding => "disable-zoom-rounding",
            Self::MinMaxZoomOverride => "min-max-zoom-override",
            Self::ZoomModifier => "zoom-modifier",
            Self::PanModifier => "pan-modifier",
            Self::HorizontalPanModifier => "horizontal-pan-modifier",
            Self::RotateModifier => "rotate-modifier",
            Self::RotateSnapModifier => "rotate-snap-modifier",
            Self::ZoomSpeedMultiplier => "zoom-speed-multiplier",
            Self::PanSpeedMultiplier => "pan-speed-multiplier",
            Self::InvertVerticalScroll => "invert-vertical-scroll",
            Self::PadValueWhenDragging => "pad-value-when-dragging",
            Self::ShiftValueWhenDragging => "shift-value-when-dragging",
            Self::PanZoomMode => "pan-zoom-mode",
        }
    }

    /// Store key including the module namespace, e.g. `zoom-pan-options.zoom-modifier`.
    pub fn qualified(self) -> String {
        format!("{MODULE_ID}.{}", self.as_str())
    }

    pub fn descriptor(self) -> SettingDescriptor {
        let (name, hint, kind) = match self {
            Self::ZoomAroundCursor => (
                "Zoom around cursor",
                "Center zooming around cursor. Does not apply to zooming with pageup or pagedown.",
                SettingKind::Bool,
            ),
            Self::MiddleMousePan => (
                "Middle-mouse to pan",
                "Middle mouse press will pan the canvas, instead of the default of doing nothing.",
                SettingKind::Bool,
            ),
            Self::DisableZoomRounding => (
                "Disable zoom rounding",
                "Disables the default rounding of zoom to the nearest 1%. Makes zooming smoother, especially on touchpads.",
                SettingKind::Bool,
            ),
            Self::MinMaxZoomOverride => (
                "Minimum/maximum zoom override",
                "Override for the minimum and maximum zoom scale limits. 3 is the default (x3 and x0.333 scaling).",
                SettingKind::Number,
            ),
            Self::ZoomModifier => (
                "Scroll to Zoom Modifiers",
                "Key to hold to zoom.",
                SettingKind::Combo,
            ),
            Self::PanModifier => (
                "Scroll to Pan Modifiers",
                "Key to hold to pan.",
                SettingKind::Combo,
            ),
            Self::HorizontalPanModifier => (
                "Scroll to Pan Horizontally Modifiers",
                "Key to hold to pan horizontally. Useful if your mouse doesn't support horizontal scrolling.",
                SettingKind::Combo,
            ),
            Self::RotateModifier => (
                "Scroll to Rotate Modifiers",
                "Key to hold to rotate an item.",
                SettingKind::Combo,
            ),
            Self::RotateSnapModifier => (
                "Scroll to Snap Rotate Modifiers",
                "Key to hold to rotate an item and snap to the grid.",
                SettingKind::Combo,
            ),
            Self::ZoomSpeedMultiplier => (
                "Zoom speed",
                "Multiplies zoom speed. 0.1 or 10 might be better for some touchpads. 0 for the default fixed 5% step, which ignores scroll intensity.",
                SettingKind::Number,
            ),
            Self::PanSpeedMultiplier => (
                "Pan speed",
                "Multiplies pan speed. 1 is close to the pan speed when right-click-dragging the canvas.",
                SettingKind::Number,
            ),
            Self::InvertVerticalScroll => (
                "Invert vertical scroll",
                "If set, you will scroll up when dragging/scrolling down.",
                SettingKind::Bool,
            ),
            Self::PadValueWhenDragging => (
                "\"pad\" value when dragging something to the edge of the screen",
                "Distance from the screen edge, in pixels, that starts panning while dragging. Default is 50px.",
                SettingKind::Number,
            ),
            Self::ShiftValueWhenDragging => (
                "\"shift\" value when dragging something to the edge of the screen",
                "Panning distance in grid spaces while dragging near the screen edge. Default is 3.",
                SettingKind::Number,
            ),
            Self::PanZoomMode => ("Pan/zoom mode (legacy)", "", SettingKind::Text),
        };

        SettingDescriptor {
            key: self,
            name,
            hint,
            kind,
            default: Settings::default().value_of(self),
            choices: if kind == SettingKind::Combo {
                &MODIFIER_CHOICES[..]
            } else {
                &[]
            },
            config: self != Self::PanZoomMode,
            effect: match self {
                Self::MiddleMousePan => Some(EffectKind::MiddleClickAutoscroll),
                Self::MinMaxZoomOverride => Some(EffectKind::MaxZoom),
                _ => None,
            },
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bare = s
            .strip_prefix(MODULE_ID)
            .and_then(|rest| rest.strip_prefix('.'))
            .unwrap_or(s);
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == bare)
            .ok_or_else(|| format!("unknown setting '{s}'"))
    }
}

// ─── Schema ──────────────────────────────────────────────────────────────

/// Value type a setting is registered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKind {
    Bool,
    Number,
    /// String restricted to [`MODIFIER_CHOICES`].
    Combo,
    Text,
}

/// Side effect a setting triggers on the host when changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    MiddleClickAutoscroll,
    MaxZoom,
}

/// Registration metadata for one setting.
#[derive(Debug, Clone)]
pub struct SettingDescriptor {
    pub key: SettingKey,
    pub name: &'static str,
    pub hint: &'static str,
    pub kind: SettingKind,
    /// `None` only for the legacy mode key.
    pub default: Option<SettingValue>,
    pub choices: &'static [&'static str],
    /// Shown in the settings dialog.
    pub config: bool,
    pub effect: Option<EffectKind>,
}

/// Full schema, in registration order.
pub fn schema() -> Vec<SettingDescriptor> {
    SettingKey::ALL.iter().map(|key| key.descriptor()).collect()
}

// ─── Values ──────────────────────────────────────────────────────────────

/// A raw value as held by the host store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl SettingValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Numbers, plus numeric strings (the host coerces `Number` settings
    /// from form input).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
            Self::Bool(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for SettingValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<ModifierCombo> for SettingValue {
    fn from(value: ModifierCombo) -> Self {
        Self::Text(value.as_key())
    }
}

// ─── Store ───────────────────────────────────────────────────────────────

/// The host's per-user settings store, scoped to this module's namespace.
pub trait SettingsStore {
    fn get(&self, key: SettingKey) -> Option<SettingValue>;
    fn set(&mut self, key: SettingKey, value: SettingValue);
}

/// In-process store keyed by qualified name (`zoom-pan-options.<key>`).
///
/// Serializes to the same flat JSON object the host keeps in its client
/// settings storage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryStore {
    values: BTreeMap<String, SettingValue>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("invalid settings JSON: {e}"))
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self.values).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn remove(&mut self, key: SettingKey) -> Option<SettingValue> {
        self.values.remove(&key.qualified())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: SettingKey) -> Option<SettingValue> {
        self.values.get(&key.qualified()).cloned()
    }

    fn set(&mut self, key: SettingKey, value: SettingValue) {
        self.values.insert(key.qualified(), value);
    }
}

// ─── Snapshot ────────────────────────────────────────────────────────────

/// Typed view of every setting, read once per event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Settings {
    pub zoom_around_cursor: bool,
    pub middle_mouse_pan: bool,
    pub disable_zoom_rounding: bool,
    /// Max zoom; min zoom is its reciprocal unless the scene is larger.
    pub min_max_zoom_override: f64,
    pub zoom_modifier: ModifierCombo,
    pub pan_modifier: ModifierCombo,
    pub horizontal_pan_modifier: ModifierCombo,
    pub rotate_modifier: ModifierCombo,
    pub rotate_snap_modifier: ModifierCombo,
    /// `0` selects the fixed 5% step.
    pub zoom_speed_multiplier: f64,
    pub pan_speed_multiplier: f64,
    pub invert_vertical_scroll: bool,
    /// Screen pixels from the window edge that trigger drag panning.
    pub pad_value_when_dragging: f64,
    /// Grid spaces shifted per drag pan.
    pub shift_value_when_dragging: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            zoom_around_cursor: true,
            middle_mouse_pan: false,
            disable_zoom_rounding: true,
            min_max_zoom_override: 3.0,
            zoom_modifier: ModifierCombo::NONE,
            pan_modifier: ModifierCombo::Disabled,
            horizontal_pan_modifier: ModifierCombo::Disabled,
            rotate_modifier: ModifierCombo::Keys(Modifiers {
                ctrl: true,
                ..Modifiers::NONE
            }),
            rotate_snap_modifier: ModifierCombo::Keys(Modifiers {
                shift: true,
                ..Modifiers::NONE
            }),
            zoom_speed_multiplier: 0.0,
            pan_speed_multiplier: 1.0,
            invert_vertical_scroll: false,
            pad_value_when_dragging: 50.0,
            shift_value_when_dragging: 3.0,
        }
    }
}

impl Settings {
    /// Read every key from `store`, falling back to defaults for missing or
    /// mistyped values.
    pub fn load(store: &impl SettingsStore) -> Self {
        let mut settings = Self::default();
        for key in SettingKey::ALL {
            if let Some(value) = store.get(key)
                && let Err(e) = settings.apply(key, &value)
            {
                log::warn!("ignoring setting {key}: {e}");
            }
        }
        settings
    }

    /// Overwrite one field from a raw store value.
    ///
    /// Combo strings outside the choice set resolve to `disabled`.
    pub fn apply(&mut self, key: SettingKey, value: &SettingValue) -> Result<(), String> {
        match key {
            SettingKey::ZoomAroundCursor => self.zoom_around_cursor = expect_bool(key, value)?,
            SettingKey::MiddleMousePan => self.middle_mouse_pan = expect_bool(key, value)?,
            SettingKey::DisableZoomRounding => {
                self.disable_zoom_rounding = expect_bool(key, value)?
            }
            SettingKey::MinMaxZoomOverride => {
                self.min_max_zoom_override = expect_number(key, value)?
            }
            SettingKey::ZoomModifier => self.zoom_modifier = expect_combo(key, value)?,
            SettingKey::PanModifier => self.pan_modifier = expect_combo(key, value)?,
            SettingKey::HorizontalPanModifier => {
                self.horizontal_pan_modifier = expect_combo(key, value)?
            }
            SettingKey::RotateModifier => self.rotate_modifier = expect_combo(key, value)?,
            SettingKey::RotateSnapModifier => {
                self.rotate_snap_modifier = expect_combo(key, value)?
            }
            SettingKey::ZoomSpeedMultiplier => {
                self.zoom_speed_multiplier = expect_number(key, value)?
            }
            SettingKey::PanSpeedMultiplier => {
                self.pan_speed_multiplier = expect_number(key, value)?
            }
            SettingKey::InvertVerticalScroll => {
                self.invert_vertical_scroll = expect_bool(key, value)?
            }
            SettingKey::PadValueWhenDragging => {
                self.pad_value_when_dragging = expect_number(key, value)?
            }
            SettingKey::ShiftValueWhenDragging => {
                self.shift_value_when_dragging = expect_number(key, value)?
            }
            SettingKey::PanZoomMode => {}
        }
        Ok(())
    }

    /// Current value of `key` in store representation.
    pub fn value_of(&self, key: SettingKey) -> Option<SettingValue> {
        let value = match key {
            SettingKey::ZoomAroundCursor => self.zoom_around_cursor.into(),
            SettingKey::MiddleMousePan => self.middle_mouse_pan.into(),
            SettingKey::DisableZoomRounding => self.disable_zoom_rounding.into(),
            SettingKey::MinMaxZoomOverride => self.min_max_zoom_override.into(),
            SettingKey::ZoomModifier => self.zoom_modifier.into(),
            SettingKey::PanModifier => self.pan_modifier.into(),
            SettingKey::HorizontalPanModifier => self.horizontal_pan_modifier.into(),
            SettingKey::RotateModifier => self.rotate_modifier.into(),
            SettingKey::RotateSnapModifier => self.rotate_snap_modifier.into(),
            SettingKey::ZoomSpeedMultiplier => self.zoom_speed_multiplier.into(),
            SettingKey::PanSpeedMultiplier => self.pan_speed_multiplier.into(),
            SettingKey::InvertVerticalScroll => self.invert_vertical_scroll.into(),
            SettingKey::PadValueWhenDragging => self.pad_value_when_dragging.into(),
            SettingKey::ShiftValueWhenDragging => self.shift_value_when_dragging.into(),
            SettingKey::PanZoomMode => return None,
        };
        Some(value)
    }
}

fn expect_bool(key: SettingKey, value: &SettingValue) -> Result<bool, String> {
    value
        .as_bool()
        .ok_or_else(|| format!("expected a boolean for {key}, got {value:?}"))
}

fn expect_number(key: SettingKey, value: &SettingValue) -> Result<f64, String> {
    value
        .as_f64()
        .filter(|n| n.is_finite())
        .ok_or_else(|| format!("expected a number for {key}, got {value:?}"))
}

fn expect_combo(key: SettingKey, value: &SettingValue) -> Result<ModifierCombo, String> {
    let raw = value
        .as_str()
        .ok_or_else(|| format!("expected a modifier combo for {key}, got {value:?}"))?;
    Ok(raw.parse().unwrap_or_else(|e| {
        log::warn!("{key}: {e}; treating as disabled");
        ModifierCombo::Disabled
    }))
}

// ─── Effects ─────────────────────────────────────────────────────────────

/// A host-side change triggered by a settings update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettingEffect {
    /// Suppress (or restore) the browser's middle-click autoscroll.
    MiddleClickAutoscroll(bool),
    /// Replace the host's global max-zoom constant.
    MaxZoom(f64),
}

impl SettingEffect {
    /// The effect of `key` changing to `value`, if it has one.
    pub fn for_change(key: SettingKey, value: &SettingValue) -> Option<Self> {
        match key.descriptor().effect? {
            EffectKind::MiddleClickAutoscroll => value.as_bool().map(Self::MiddleClickAutoscroll),
            EffectKind::MaxZoom => value
                .as_f64()
                .filter(|n| n.is_finite())
                .map(Self::MaxZoom),
        }
    }

    /// Effects to apply once at startup so the host matches the stored values.
    pub fn initial(settings: &Settings) -> [Self; 2] {
        [
            Self::MiddleClickAutoscroll(settings.middle_mouse_pan),
            Self::MaxZoom(settings.min_max_zoom_override),
        ]
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────
