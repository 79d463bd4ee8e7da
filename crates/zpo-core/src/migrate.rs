//! Migration from the single "pan/zoom mode" preset to per-action modifiers.
//!
//! Older releases stored one `pan-zoom-mode` value. At startup, a recognized
//! preset is expanded into the five modifier settings, overwriting them.
//! The legacy value itself is left in place.

use crate::modifiers::ModifierCombo;
use crate::settings::{SettingKey, SettingValue, SettingsStore};

/// A legacy pan/zoom preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegacyPreset {
    Mouse,
    Touchpad,
    Alternative,
}

impl LegacyPreset {
    /// Parse a stored legacy value. `Default` and `DefaultMouse` are old
    /// names for `Mouse`.
    pub fn from_stored(value: &str) -> Option<Self> {
        match value {
            "Mouse" | "DefaultMouse" | "Default" => Some(Self::Mouse),
            "Touchpad" => Some(Self::Touchpad),
            "Alternative" => Some(Self::Alternative),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mouse => "Mouse",
            Self::Touchpad => "Touchpad",
            Self::Alternative => "Alternative",
        }
    }

    /// The modifier settings this preset expands to.
    pub fn assignments(self) -> [(SettingKey, &'static str); 5] {
        let (zoom, rotate, rotate_snap, horizontal_pan, pan) = match self {
            Self::Mouse => ("", "ctrl", "shift", "disabled", "disabled"),
            Self::Touchpad => ("ctrl", "shift", "shift-ctrl", "disabled", "disabled"),
            Self::Alternative => ("ctrl", "shift-alt", "ctrl-alt", "shift", ""),
        };
        [
            (SettingKey::ZoomModifier, zoom),
            (SettingKey::RotateModifier, rotate),
            (SettingKey::RotateSnapModifier, rotate_snap),
            (SettingKey::HorizontalPanModifier, horizontal_pan),
            (SettingKey::PanModifier, pan),
        ]
    }
}

/// Expand a stored legacy preset into the per-action modifier settings.
///
/// Returns the preset applied, or `None` when there is nothing to migrate.
/// Running this again while the legacy value is still set rewrites the
/// modifier settings again.
pub fn migrate_legacy_mode(store: &mut impl SettingsStore) -> Option<LegacyPreset> {
    let stored = store.get(SettingKey::PanZoomMode)?;
    let raw = stored.as_str()?;
    let preset = LegacyPreset::from_stored(raw)?;

    if raw != preset.as_str() {
        log::info!(
            "Migrating old setting '{}': '{raw}' to '{}'",
            SettingKey::PanZoomMode,
            preset.as_str()
        );
        store.set(SettingKey::PanZoomMode, preset.as_str().into());
    }

    let summary: Vec<String> = preset
        .assignments()
        .iter()
        .map(|(key, combo)| format!("{key}: '{combo}'"))
        .collect();
    log::info!(
        "Migrating old setting '{}' ({}) to {}",
        SettingKey::PanZoomMode,
        preset.as_str(),
        summary.join(", ")
    );

    for (key, combo) in preset.assignments() {
        debug_assert!(combo.parse::<ModifierCombo>().is_ok(), "{combo}");
        store.set(key, SettingValue::Text(combo.to_string()));
    }
    Some(preset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{MemoryStore, Settings};
    use pretty_assertions::assert_eq;

    fn store_with(mode: &str) -> MemoryStore {
        let mut store = MemoryStore::new();
        store.set(SettingKey::PanZoomMode, mode.into());
        store
    }

    fn combo(store: &MemoryStore, key: SettingKey) -> String {
        store
            .get(key)
            .and_then(|v| v.as_str().map(String::from))
            .unwrap_or_default()
    }

    #[test]
    fn touchpad_preset() {
        let mut store = store_with("Touchpad");
        assert_eq!(migrate_legacy_mode(&mut store), Some(LegacyPreset::Touchpad));
        assert_eq!(combo(&store, SettingKey::ZoomModifier), "ctrl");
        assert_eq!(combo(&store, SettingKey::RotateModifier), "shift");
        assert_eq!(combo(&store, SettingKey::RotateSnapModifier), "shift-ctrl");
        assert_eq!(combo(&store, SettingKey::HorizontalPanModifier), "disabled");
        assert_eq!(combo(&store, SettingKey::PanModifier), "disabled");
    }

    #[test]
    fn alternative_preset() {
        let mut store = store_with("Alternative");
        migrate_legacy_mode(&mut store);
        let settings = Settings::load(&store);
        assert_eq!(settings.zoom_modifier.as_key(), "ctrl");
        assert_eq!(settings.rotate_modifier.as_key(), "shift-alt");
        assert_eq!(settings.rotate_snap_modifier.as_key(), "ctrl-alt");
        assert_eq!(settings.horizontal_pan_modifier.as_key(), "shift");
        assert_eq!(settings.pan_modifier, ModifierCombo::NONE);
    }

    #[test]
    fn old_mouse_names_are_renamed_and_migrated() {
        for old in ["Default", "DefaultMouse"] {
            let mut store = store_with(old);
            store.set(SettingKey::ZoomModifier, "alt".into());
            assert_eq!(migrate_legacy_mode(&mut store), Some(LegacyPreset::Mouse));
            assert_eq!(combo(&store, SettingKey::PanZoomMode), "Mouse");
            assert_eq!(combo(&store, SettingKey::ZoomModifier), "");
            assert_eq!(combo(&store, SettingKey::RotateModifier), "ctrl");
            assert_eq!(combo(&store, SettingKey::RotateSnapModifier), "shift");
        }
    }

    #[test]
    fn absent_or_unknown_is_noop() {
        let mut store = MemoryStore::new();
        assert_eq!(migrate_legacy_mode(&mut store), None);
        assert!(store.is_empty());

        let mut store = store_with("AutoDetect");
        assert_eq!(migrate_legacy_mode(&mut store), None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn rerun_overwrites_again() {
        let mut store = store_with("Touchpad");
        migrate_legacy_mode(&mut store);
        store.set(SettingKey::ZoomModifier, "meta".into());
        migrate_legacy_mode(&mut store);
        assert_eq!(combo(&store, SettingKey::ZoomModifier), "ctrl");
    }

    #[test]
    fn every_assignment_is_a_valid_combo() {
        for preset in [
            LegacyPreset::Mouse,
            LegacyPreset::Touchpad,
            LegacyPreset::Alternative,
        ] {
            for (_, combo) in preset.assignments() {
                assert!(combo.parse::<ModifierCombo>().is_ok(), "{combo}");
            }
        }
    }
}
