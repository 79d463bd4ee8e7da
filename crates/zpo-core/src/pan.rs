//! Wheel panning.

use crate::settings::Settings;
use crate::view::{PanRequest, ViewTransform};
use kurbo::Vec2;

/// Pan by a wheel delta given in screen pixels.
///
/// The delta is converted to world units at the current scale and scaled by
/// the pan speed multiplier; the vertical axis flips when inverted scrolling
/// is on.
pub fn plan_pan(view: &ViewTransform, delta: Vec2, settings: &Settings) -> PanRequest {
    let multiplier = settings.pan_speed_multiplier / view.scale;
    let invert = if settings.invert_vertical_scroll {
        -1.0
    } else {
        1.0
    };
    let offset = Vec2::new(delta.x * multiplier, delta.y * multiplier * invert);
    PanRequest::to(view.pivot + offset)
}

/// Pan horizontally using the vertical wheel delta, for wheels without a
/// horizontal axis.
pub fn plan_horizontal_pan(view: &ViewTransform, delta_y: f64, settings: &Settings) -> PanRequest {
    plan_pan(view, Vec2::new(delta_y, 0.0), settings)
}
