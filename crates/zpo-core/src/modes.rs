//! Scroll modes: which action a wheel event performs for the held modifiers.
//!
//! Each action is bound to one modifier combo in settings. Actions are
//! registered in a fixed order and the first action to claim a combo keeps
//! it; later actions bound to the same combo are shadowed.

use crate::modifiers::{ModifierCombo, Modifiers};
use crate::settings::{SettingKey, Settings};
use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// What a wheel tick does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollAction {
    Zoom,
    Rotate,
    /// Rotate and snap to the grid's angle steps.
    RotateSnap,
    Pan,
    /// Vertical wheel delta pans horizontally.
    HorizontalPan,
}

impl ScrollAction {
    /// Claim order when two actions share a combo.
    pub const REGISTRATION_ORDER: [ScrollAction; 5] = [
        Self::Zoom,
        Self::Rotate,
        Self::RotateSnap,
        Self::Pan,
        Self::HorizontalPan,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Zoom => "zoom",
            Self::Rotate => "rotate",
            Self::RotateSnap => "rotate-snap",
            Self::Pan => "pan",
            Self::HorizontalPan => "horizontal-pan",
        }
    }

    pub fn setting_key(self) -> SettingKey {
        match self {
            Self::Zoom => SettingKey::ZoomModifier,
            Self::Rotate => SettingKey::RotateModifier,
            Self::RotateSnap => SettingKey::RotateSnapModifier,
            Self::Pan => SettingKey::PanModifier,
            Self::HorizontalPan => SettingKey::HorizontalPanModifier,
        }
    }

    pub fn is_rotation(self) -> bool {
        matches!(self, Self::Rotate | Self::RotateSnap)
    }

    fn combo_in(self, settings: &Settings) -> ModifierCombo {
        match self {
            Self::Zoom => settings.zoom_modifier,
            Self::Rotate => settings.rotate_modifier,
            Self::RotateSnap => settings.rotate_snap_modifier,
            Self::Pan => settings.pan_modifier,
            Self::HorizontalPan => settings.horizontal_pan_modifier,
        }
    }
}

/// An action that lost its combo to an earlier-registered action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shadowed {
    pub action: ScrollAction,
    pub by: ScrollAction,
    pub combo: Modifiers,
}

/// Lookup from held modifiers to scroll action.
#[derive(Debug, Clone, Default)]
pub struct ModeMap {
    by_combo: HashMap<Modifiers, ScrollAction>,
    shadowed: Vec<Shadowed>,
}

impl ModeMap {
    pub fn from_settings(settings: &Settings) -> Self {
        let mut map = Self::default();
        for action in ScrollAction::REGISTRATION_ORDER {
            let ModifierCombo::Keys(mods) = action.combo_in(settings) else {
                continue;
            };
            match map.by_combo.entry(mods) {
                Entry::Vacant(slot) => {
                    slot.insert(action);
                }
                Entry::Occupied(slot) => {
                    let by = *slot.get();
                    log::debug!(
                        "{} shadowed by {} on '{}'",
                        action.as_str(),
                        by.as_str(),
                        mods.combo_key()
                    );
                    map.shadowed.push(Shadowed {
                        action,
                        by,
                        combo: mods,
                    });
                }
            }
        }
        map
    }

    pub fn resolve(&self, mods: &Modifiers) -> Option<ScrollAction> {
        self.by_combo.get(mods).copied()
    }

    /// Actions that can never fire with the current bindings.
    pub fn shadowed(&self) -> &[Shadowed] {
        &self.shadowed
    }

    pub fn len(&self) -> usize {
        self.by_combo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_combo.is_empty()
    }
}
