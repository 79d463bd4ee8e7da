//! Host version detection and compatibility strategy.
//!
//! The host moved its wheel entry point, its wheel rate-limit constant, and
//! made its view-constraint function private across releases. Everything
//! version-dependent is decided once, at startup, by [`HostCompat::detect`].

use serde::Serialize;
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Last release with wheel handling on the keyboard manager.
const KEYBOARD_WHEEL_LAST: [u32; 2] = [9, 231];
/// Last release with an overridable `_constrainView`.
const CONSTRAIN_OVERRIDE_LAST: [u32; 2] = [10, 269];

/// A dotted numeric host version, compared component by component.
///
/// Missing trailing components count as zero, so `9.231` == `9.231.0`.
#[derive(Debug, Clone)]
pub struct HostVersion {
    parts: SmallVec<[u32; 4]>,
}

impl HostVersion {
    pub fn from_parts(parts: &[u32]) -> Self {
        Self {
            parts: SmallVec::from_slice(parts),
        }
    }

    pub fn parts(&self) -> &[u32] {
        &self.parts
    }

    /// Strictly newer than `other`.
    pub fn is_newer_than(&self, other: &HostVersion) -> bool {
        self > other
    }

    fn component(&self, idx: usize) -> u32 {
        self.parts.get(idx).copied().unwrap_or(0)
    }
}

impl FromStr for HostVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("empty host version".to_string());
        }
        let parts = trimmed
            .split('.')
            .map(|part| {
                part.parse::<u32>()
                    .map_err(|_| format!("invalid version component '{part}' in '{s}'"))
            })
            .collect::<Result<SmallVec<[u32; 4]>, String>>()?;
        Ok(Self { parts })
    }
}

impl PartialEq for HostVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HostVersion {}

impl PartialOrd for HostVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HostVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.parts.len().max(other.parts.len());
        (0..len)
            .map(|i| self.component(i).cmp(&other.component(i)))
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl fmt::Display for HostVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{part}")?;
        }
        Ok(())
    }
}

// ─── Strategy ────────────────────────────────────────────────────────────

/// Where the host dispatches wheel events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelHook {
    MouseManager,
    KeyboardManager,
}

/// Where the host keeps its minimum interval between wheel rotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitSource {
    /// `game.mouse.MOUSE_WHEEL_RATE_LIMIT`
    MouseManager,
    /// `KeyboardManager.MOUSE_WHEEL_RATE_LIMIT`
    KeyboardManager,
}

/// How view constraints (zoom clamp, rounding) are customized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstrainStrategy {
    /// Replace the host's constrain-view function outright.
    Override,
    /// The function is private; re-clamp after each pan notification.
    PanHook,
}

/// How a hook is installed into the host prototype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PatchMode {
    /// Our handler replaces the original.
    Override,
    /// Our handler decides per call whether to run the original.
    Mixed,
}

/// Which controller entry point a hook forwards to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum HookHandler {
    Wheel,
    ConstrainView,
    DragCanvasPan,
    MouseDown,
}

/// One prototype patch the host shim must install.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HookRegistration {
    pub target: &'static str,
    pub mode: PatchMode,
    pub handler: HookHandler,
}

/// Version-dependent behavior, selected once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostCompat {
    pub wheel_hook: WheelHook,
    pub rate_limit: RateLimitSource,
    pub constrain: ConstrainStrategy,
}

impl HostCompat {
    pub fn detect(version: &HostVersion) -> Self {
        let keyboard_last = HostVersion::from_parts(&KEYBOARD_WHEEL_LAST);
        let override_last = HostVersion::from_parts(&CONSTRAIN_OVERRIDE_LAST);

        let mouse_manager = version.is_newer_than(&keyboard_last);
        let compat = Self {
            wheel_hook: if mouse_manager {
                WheelHook::MouseManager
            } else {
                WheelHook::KeyboardManager
            },
            rate_limit: if mouse_manager {
                RateLimitSource::MouseManager
            } else {
                RateLimitSource::KeyboardManager
            },
            constrain: if version.is_newer_than(&override_last) {
                ConstrainStrategy::PanHook
            } else {
                ConstrainStrategy::Override
            },
        };
        log::debug!("host {version}: {compat:?}");
        compat
    }

    /// Prototype patches for this host, in install order.
    ///
    /// Under [`ConstrainStrategy::PanHook`] no constrain-view patch is listed;
    /// the shim subscribes to the host's pan notification instead.
    pub fn hooks(&self) -> Vec<HookRegistration> {
        let mut hooks = vec![HookRegistration {
            target: match self.wheel_hook {
                WheelHook::MouseManager => "MouseManager.prototype._onWheel",
                WheelHook::KeyboardManager => "KeyboardManager.prototype._onWheel",
            },
            mode: PatchMode::Override,
            handler: HookHandler::Wheel,
        }];
        if self.constrain == ConstrainStrategy::Override {
            hooks.push(HookRegistration {
                target: "Canvas.prototype._constrainView",
                mode: PatchMode::Override,
                handler: HookHandler::ConstrainView,
            });
        }
        hooks.push(HookRegistration {
            target: "Canvas.prototype._onDragCanvasPan",
            mode: PatchMode::Override,
            handler: HookHandler::DragCanvasPan,
        });
        hooks.push(HookRegistration {
            target: "MouseInteractionManager.prototype._handleMouseDown",
            mode: PatchMode::Mixed,
            handler: HookHandler::MouseDown,
        });
        hooks
    }
}
