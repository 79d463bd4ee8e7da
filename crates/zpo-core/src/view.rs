//! View transform, zoom bounds, and view constraints.
//!
//! The host draws the scene with a uniform `scale` around a world-space
//! `pivot`, which lands on the screen point `origin` (the window center).

use kurbo::{Point, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Fraction of the window (in world units) the pivot may travel past the
/// scene edges.
const PIVOT_PAD_RATIO: f64 = 0.4;

/// Current pan/zoom state of the canvas stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub scale: f64,
    /// World point at the center of the view.
    pub pivot: Point,
    /// Screen point the pivot is drawn at.
    pub origin: Point,
}

impl ViewTransform {
    pub fn new(scale: f64, pivot: Point, origin: Point) -> Self {
        Self {
            scale,
            pivot,
            origin,
        }
    }

    /// Screen (client) coordinates → world coordinates.
    pub fn to_world(&self, screen: Point) -> Point {
        self.pivot + (screen - self.origin) / self.scale
    }

    /// World coordinates → screen (client) coordinates.
    pub fn to_screen(&self, world: Point) -> Point {
        self.origin + (world - self.pivot) * self.scale
    }

    /// Translation of the world → screen transform (`worldTransform.tx/ty`).
    pub fn translation(&self) -> Vec2 {
        self.origin.to_vec2() - self.pivot.to_vec2() * self.scale
    }

    /// The transform after applying `request`; unset fields keep their value.
    pub fn with(&self, request: &PanRequest) -> Self {
        Self {
            scale: request.scale.unwrap_or(self.scale),
            pivot: Point::new(
                request.x.unwrap_or(self.pivot.x),
                request.y.unwrap_or(self.pivot.y),
            ),
            origin: self.origin,
        }
    }
}

/// Scene size and grid size, in world units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasDimensions {
    pub width: f64,
    pub height: f64,
    /// Grid cell size in world units.
    pub size: f64,
}

/// A pan request as the host's `canvas.pan` accepts it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PanRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
}

impl PanRequest {
    pub fn to(pivot: Point) -> Self {
        Self {
            x: Some(pivot.x),
            y: Some(pivot.y),
            scale: None,
        }
    }

    pub fn scale(scale: f64) -> Self {
        Self {
            scale: Some(scale),
            ..Self::default()
        }
    }

    pub fn to_scaled(pivot: Point, scale: f64) -> Self {
        Self {
            scale: Some(scale),
            ..Self::to(pivot)
        }
    }
}

// ─── Zoom bounds ─────────────────────────────────────────────────────────

/// Allowed zoom range for the current scene and window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomBounds {
    pub min: f64,
    pub max: f64,
}

impl ZoomBounds {
    /// Max is the configured max zoom; min lets the whole scene fit in the
    /// window but is never looser than `1 / max_zoom`.
    pub fn derive(dims: &CanvasDimensions, window: Size, max_zoom: f64) -> Self {
        let ratio = (dims.width / window.width)
            .max(dims.height / window.height)
            .max(max_zoom);
        Self {
            min: 1.0 / ratio,
            max: max_zoom,
        }
    }

    pub fn contains(&self, scale: f64) -> bool {
        scale >= self.min && scale <= self.max
    }

    pub fn clamp(&self, scale: f64) -> f64 {
        scale.max(self.min).min(self.max)
    }
}

/// Round to the nearest 1%.
pub fn round_to_percent(scale: f64) -> f64 {
    (scale * 100.0).round() / 100.0
}

// ─── Constraints ─────────────────────────────────────────────────────────

/// Everything a view constraint needs from the host.
#[derive(Debug, Clone, Copy)]
pub struct ConstraintContext {
    pub current: ViewTransform,
    pub dims: CanvasDimensions,
    pub window: Size,
    pub max_zoom: f64,
    /// Round the scale to the nearest 1%.
    pub round: bool,
}

/// Constrain a requested view: full replacement of the host's
/// constrain-view function.
///
/// Unset or unchanged components keep the current value. The scale is
/// clamped into [`ZoomBounds`], then the pivot is clamped so the scene edge
/// never drifts more than 40% of the window past the view center.
pub fn constrain_view(request: &PanRequest, ctx: &ConstraintContext) -> ViewTransform {
    let current = ctx.current;
    let bounds = ZoomBounds::derive(&ctx.dims, ctx.window, ctx.max_zoom);

    let scale = match request.scale {
        Some(s) if s.is_finite() && s != current.scale => {
            let clamped = bounds.clamp(s);
            if ctx.round {
                round_to_percent(clamped)
            } else {
                clamped
            }
        }
        _ => current.scale,
    };

    let x = match request.x {
        Some(x) if x.is_finite() && x != current.pivot.x => {
            let pad = PIVOT_PAD_RATIO * (ctx.window.width / scale);
            x.max(-pad).min(ctx.dims.width + pad)
        }
        _ => current.pivot.x,
    };
    let y = match request.y {
        Some(y) if y.is_finite() && y != current.pivot.y => {
            let pad = PIVOT_PAD_RATIO * (ctx.window.height / scale);
            y.max(-pad).min(ctx.dims.height + pad)
        }
        _ => current.pivot.y,
    };

    ViewTransform {
        scale,
        pivot: Point::new(x, y),
        origin: current.origin,
    }
}

/// Re-clamp the scale the host already constrained, without its rounding.
///
/// Used after each pan notification when the constrain-view function cannot
/// be replaced. Returns `None` when rounding is wanted (host result stands).
pub fn reclamp_after_pan(
    constrained_scale: f64,
    dims: &CanvasDimensions,
    window: Size,
    max_zoom: f64,
    disable_rounding: bool,
) -> Option<f64> {
    if !disable_rounding {
        return None;
    }
    Some(ZoomBounds::derive(dims, window, max_zoom).clamp(constrained_scale))
}
