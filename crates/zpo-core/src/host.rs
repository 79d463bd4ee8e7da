//! Host engine adapter.
//!
//! The controller never touches host globals directly. Everything it reads
//! or writes on the canvas goes through [`CanvasHost`], which the WASM
//! bridge implements over the live engine and tests implement in memory.

use crate::compat::RateLimitSource;
use crate::edge_pan::AnimatedPan;
use crate::view::{CanvasDimensions, PanRequest, ViewTransform};
use kurbo::{Point, Size};

/// What the controller needs to know about the active canvas layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActiveLayer {
    /// The layer holds placeable objects that can be rotated.
    pub placeables: bool,
    /// Objects on this layer are controlled (selected) rather than hovered.
    pub controllable: bool,
    /// Number of controlled objects.
    pub controlled: usize,
    /// An object is hovered.
    pub hovered: bool,
}

impl ActiveLayer {
    /// Controllable layers rotate their selection; others rotate the
    /// hovered object.
    pub fn has_rotation_target(&self) -> bool {
        if self.controllable {
            self.controlled > 0
        } else {
            self.hovered
        }
    }
}

/// Capabilities the controller needs from the host canvas.
pub trait CanvasHost {
    /// The canvas exists and finished drawing.
    fn is_ready(&self) -> bool;

    /// The element under `client` is the canvas surface itself.
    fn is_over_canvas(&self, client: Point) -> bool;

    fn view(&self) -> ViewTransform;

    fn dimensions(&self) -> CanvasDimensions;

    fn window_size(&self) -> Size;

    fn active_layer(&self) -> ActiveLayer;

    /// Rotate the layer's targets by a wheel delta, optionally snapping.
    fn rotate_targets(&mut self, delta: f64, snap: bool);

    /// Pan/zoom through the host, which applies its own view constraint.
    fn pan(&mut self, request: PanRequest);

    /// Start an animated pan; the host owns it from here.
    fn animate_pan(&mut self, pan: AnimatedPan);

    /// Set the stage scale directly, bypassing constraints.
    fn set_stage_scale(&mut self, scale: f64);

    /// Minimum interval between wheel rotations, in milliseconds.
    fn wheel_rate_limit_ms(&self, source: RateLimitSource) -> f64;

    fn max_zoom(&self) -> f64;

    fn set_max_zoom(&mut self, max_zoom: f64);

    /// Stop the browser showing its autoscroll icon on middle-click.
    fn set_middle_click_autoscroll_suppressed(&mut self, suppressed: bool);
}
