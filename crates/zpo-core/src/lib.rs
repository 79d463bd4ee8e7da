//! Zoom/Pan Options core: modifier-based scroll modes and the zoom, pan,
//! rotate, and edge-pan behavior that replaces the host canvas defaults.
//!
//! Host-agnostic. The engine is reached only through [`host::CanvasHost`],
//! [`middle_mouse::InteractionManager`], and [`settings::SettingsStore`].

pub mod compat;
pub mod controller;
pub mod edge_pan;
pub mod host;
pub mod middle_mouse;
pub mod migrate;
pub mod modes;
pub mod modifiers;
pub mod pan;
pub mod rotation;
pub mod settings;
pub mod view;
pub mod zoom;

pub use compat::{HostCompat, HostVersion};
pub use controller::{WheelEvent, WheelOutcome, ZoomPanController};
pub use edge_pan::AnimatedPan;
pub use host::{ActiveLayer, CanvasHost};
pub use middle_mouse::{InteractionManager, MouseButton, MouseDownOutcome};
pub use modes::{ModeMap, ScrollAction};
pub use modifiers::{ModifierCombo, Modifiers};
pub use settings::{MODULE_ID, MemoryStore, SettingKey, SettingValue, Settings, SettingsStore};
pub use view::{CanvasDimensions, PanRequest, ViewTransform, ZoomBounds};

// Re-export kurbo geometry so hosts don't need a direct dependency
pub use kurbo::{Point, Size, Vec2};
