//! Modifier-key classification.
//!
//! Held modifiers are reduced to a canonical combo string in the fixed order
//! shift → ctrl → alt → meta, joined by `-` (`""` when nothing is held).
//! Users bind each scroll action to one of these combos, or to `disabled`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

/// Canonical modifier order. Combo strings always list keys in this order.
const ORDER: [&str; 4] = ["shift", "ctrl", "alt", "meta"];

const DISABLED: &str = "disabled";

/// Every combo a user can pick, in the order the settings UI lists them.
pub const MODIFIER_CHOICES: [&str; 17] = [
    "",
    "shift",
    "ctrl",
    "alt",
    "meta",
    "shift-ctrl",
    "shift-alt",
    "shift-meta",
    "ctrl-alt",
    "ctrl-meta",
    "alt-meta",
    "shift-ctrl-alt",
    "shift-ctrl-meta",
    "shift-alt-meta",
    "ctrl-alt-meta",
    "shift-ctrl-alt-meta",
    DISABLED,
];

/// Modifier keys held during an input event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    /// Cmd on macOS, the Windows key elsewhere.
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub fn new(shift: bool, ctrl: bool, alt: bool, meta: bool) -> Self {
        Self {
            shift,
            ctrl,
            alt,
            meta,
        }
    }

    fn flags(&self) -> [bool; 4] {
        [self.shift, self.ctrl, self.alt, self.meta]
    }

    /// The canonical combo string, e.g. `"shift-alt"`.
    pub fn combo_key(&self) -> String {
        let held: SmallVec<[&str; 4]> = ORDER
            .iter()
            .zip(self.flags())
            .filter(|(_, on)| *on)
            .map(|(name, _)| *name)
            .collect();
        held.join("-")
    }

    pub fn combo(&self) -> ModifierCombo {
        ModifierCombo::Keys(*self)
    }

    /// Ctrl and meta both trigger browser-level page zoom on wheel.
    pub fn is_zoom_hardware(&self) -> bool {
        self.ctrl || self.meta
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }
}

/// A combo value as stored in settings: a set of held keys or `disabled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ModifierCombo {
    Keys(Modifiers),
    /// Never matches any event.
    Disabled,
}

impl ModifierCombo {
    pub const NONE: Self = Self::Keys(Modifiers::NONE);

    /// All selectable combos, in display order.
    pub fn choices() -> impl Iterator<Item = ModifierCombo> {
        MODIFIER_CHOICES
            .iter()
            .filter_map(|key| key.parse::<ModifierCombo>().ok())
    }

    pub fn as_key(&self) -> String {
        match self {
            Self::Keys(mods) => mods.combo_key(),
            Self::Disabled => DISABLED.to_string(),
        }
    }

    /// Human-readable label, e.g. `"Shift + Ctrl"`.
    pub fn label(&self) -> String {
        match self {
            Self::Disabled => "Disabled".to_string(),
            Self::Keys(mods) if mods.is_empty() => "-".to_string(),
            Self::Keys(mods) => {
                let names: SmallVec<[&str; 4]> = ["Shift", "Ctrl", "Alt", "Meta"]
                    .iter()
                    .zip(mods.flags())
                    .filter(|(_, on)| *on)
                    .map(|(name, _)| *name)
                    .collect();
                names.join(" + ")
            }
        }
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self, Self::Disabled)
    }
}

impl fmt::Display for ModifierCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_key())
    }
}

impl FromStr for ModifierCombo {
    type Err = String;

    /// Accepts only canonical combos: known key names, each at most once,
    /// in shift-ctrl-alt-meta order.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == DISABLED {
            return Ok(Self::Disabled);
        }
        if s.is_empty() {
            return Ok(Self::NONE);
        }

        let mut flags = [false; 4];
        let mut last: Option<usize> = None;
        for part in s.split('-') {
            let idx = ORDER
                .iter()
                .position(|name| *name == part)
                .ok_or_else(|| format!("unknown modifier '{part}' in combo '{s}'"))?;
            if last.is_some_and(|prev| idx <= prev) {
                return Err(format!(
                    "modifier combo '{s}' is not in shift-ctrl-alt-meta order"
                ));
            }
            flags[idx] = true;
            last = Some(idx);
        }

        Ok(Self::Keys(Modifiers::new(flags[0], flags[1], flags[2], flags[3])))
    }
}

impl TryFrom<String> for ModifierCombo {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ModifierCombo> for String {
    fn from(combo: ModifierCombo) -> Self {
        combo.as_key()
    }
}

impl Default for ModifierCombo {
    fn default() -> Self {
        Self::NONE
    }
}
