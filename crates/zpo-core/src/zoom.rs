//! Wheel zoom, optionally anchored at the cursor.

use crate::settings::Settings;
use crate::view::{PanRequest, ViewTransform, ZoomBounds, round_to_percent};
use kurbo::Point;

/// Delta-to-scale rate at multiplier 1.
const ZOOM_RATE: f64 = 0.0005;
/// Fixed steps used when the speed multiplier is zero.
const FIXED_ZOOM_IN: f64 = 1.05;
const FIXED_ZOOM_OUT: f64 = 0.95;

/// Scale factor for a wheel delta.
///
/// A zero multiplier ignores scroll intensity and steps 5% per tick,
/// in for negative deltas, out otherwise.
pub fn zoom_factor(delta_y: f64, multiplier: f64) -> f64 {
    if multiplier == 0.0 {
        if delta_y < 0.0 {
            FIXED_ZOOM_IN
        } else {
            FIXED_ZOOM_OUT
        }
    } else {
        1.0 - delta_y * ZOOM_RATE * multiplier
    }
}

/// Result of a zoom computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomPlan {
    pub request: PanRequest,
    /// The unclamped scale fell outside the bounds.
    pub limited: bool,
}

/// Plan a zoom for one wheel tick.
///
/// Out-of-range requests only set the clamped scale: the pivot is left
/// alone so hitting a limit never jumps the view. In range, and with
/// cursor anchoring on, the pivot moves so the world point under `cursor`
/// stays under it at the new scale.
pub fn plan_zoom(
    view: &ViewTransform,
    cursor: Point,
    delta_y: f64,
    settings: &Settings,
    bounds: &ZoomBounds,
) -> ZoomPlan {
    let factor = zoom_factor(delta_y, settings.zoom_speed_multiplier);
    let requested = view.scale * factor;
    let finish = |scale: f64| {
        if settings.disable_zoom_rounding {
            scale
        } else {
            round_to_percent(scale)
        }
    };

    if !bounds.contains(requested) {
        let clamped = finish(bounds.clamp(requested));
        log::info!("scale limit reached ({requested}).");
        return ZoomPlan {
            request: PanRequest::scale(clamped),
            limited: true,
        };
    }

    let scale = finish(requested);
    if !settings.zoom_around_cursor {
        return ZoomPlan {
            request: PanRequest::scale(scale),
            limited: false,
        };
    }

    ZoomPlan {
        request: PanRequest::to_scaled(anchored_pivot(view, cursor, scale), scale),
        limited: false,
    }
}

/// Pivot that keeps the world point under `cursor` fixed when the scale
/// changes from `view.scale` to `new_scale`.
pub fn anchored_pivot(view: &ViewTransform, cursor: Point, new_scale: f64) -> Point {
    let anchor = view.to_world(cursor);
    let keep = view.scale / new_scale;
    anchor + (view.pivot - anchor) * keep
}
