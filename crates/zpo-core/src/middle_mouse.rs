//! Middle-mouse drag panning.
//!
//! The host only pans on right-drag. A middle press is rerouted through the
//! same interaction-manager transitions the host runs for a right click, so
//! the host's own right-drag handlers do the panning. While the feature is
//! on, buttons other than left and middle do nothing on the canvas.

use serde::Serialize;

/// Mouse button from `MouseEvent.button`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Primary,
    Middle,
    Secondary,
    Other(i16),
}

impl MouseButton {
    pub fn from_code(code: i16) -> Self {
        match code {
            0 => Self::Primary,
            1 => Self::Middle,
            2 => Self::Secondary,
            other => Self::Other(other),
        }
    }
}

/// Interaction manager state, in the host's numeric order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum InteractionState {
    None = 0,
    Hover = 1,
    Clicked = 2,
    Drag = 3,
    Drop = 4,
}

impl InteractionState {
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::None),
            1 => Some(Self::Hover),
            2 => Some(Self::Clicked),
            3 => Some(Self::Drag),
            4 => Some(Self::Drop),
            _ => None,
        }
    }

    pub fn code(self) -> i32 {
        self as i32
    }
}

/// Interaction verbs borrowed from the host's right-click handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum InteractionAction {
    ClickRight,
    DragRight,
}

impl InteractionAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ClickRight => "clickRight",
            Self::DragRight => "dragRight",
        }
    }
}

/// The host's per-object pointer interaction state machine.
pub trait InteractionManager {
    fn state(&self) -> InteractionState;

    fn set_state(&mut self, state: InteractionState);

    /// Host permission check for `action` on the current event.
    fn can(&self, action: InteractionAction) -> bool;

    /// Make this manager current and record the event's object and local
    /// origin.
    fn capture_event(&mut self);

    fn stop_propagation(&mut self);

    /// Mark the gesture as a right-button drag.
    fn begin_right_drag(&mut self);

    fn callback(&mut self, action: InteractionAction);

    fn activate_drag_events(&mut self);
}

/// What the pointer-down wrapper decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MouseDownOutcome {
    /// Run the host's original handler.
    Delegate,
    /// Do nothing, not even the original handler.
    Swallow,
    /// A middle press the host does not permit here.
    Refused,
    /// Rerouted as a right-button drag.
    Handled,
}

/// Handle a pointer-down on a canvas object.
pub fn handle_mouse_down(
    enabled: bool,
    button: MouseButton,
    mim: &mut impl InteractionManager,
) -> MouseDownOutcome {
    if !enabled || button == MouseButton::Primary {
        return MouseDownOutcome::Delegate;
    }
    if button != MouseButton::Middle {
        return MouseDownOutcome::Swallow;
    }

    if !matches!(
        mim.state(),
        InteractionState::Hover | InteractionState::Clicked | InteractionState::Drag
    ) {
        return MouseDownOutcome::Delegate;
    }
    mim.capture_event();

    let action = InteractionAction::ClickRight;
    if !mim.can(action) {
        return MouseDownOutcome::Refused;
    }
    mim.stop_propagation();
    mim.begin_right_drag();

    if mim.state() == InteractionState::Hover {
        mim.set_state(InteractionState::Clicked);
    }
    log::debug!("middle mouse | {}", action.as_str());
    mim.callback(action);

    if mim.state() < InteractionState::Drag && mim.can(InteractionAction::DragRight) {
        mim.activate_drag_events();
    }
    MouseDownOutcome::Handled
}
