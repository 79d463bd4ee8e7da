//! Edge panning while dragging.
//!
//! While something is dragged near the window edge the canvas scrolls
//! towards that edge by a few grid spaces, at most once per interval.

use crate::settings::Settings;
use crate::view::{CanvasDimensions, ViewTransform};
use kurbo::{Point, Size, Vec2};
use serde::Serialize;

/// Minimum time between two edge pans; also the pan animation duration.
pub const EDGE_PAN_INTERVAL_MS: f64 = 200.0;

/// An animated pan handed off to the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnimatedPan {
    pub x: f64,
    pub y: f64,
    pub duration: f64,
}

impl AnimatedPan {
    pub fn target(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Throttled edge panner. Owns the timestamp of the last attempt.
#[derive(Debug, Clone, Default)]
pub struct EdgePanner {
    last_attempt_ms: Option<f64>,
}

impl EdgePanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle one drag-move at screen position `cursor`.
    ///
    /// Calls inside the throttle window are ignored. Otherwise the window is
    /// restarted and, if the cursor is within the pad distance of an edge, a
    /// pan towards that edge is returned.
    pub fn on_drag_move(
        &mut self,
        cursor: Point,
        now_ms: f64,
        view: &ViewTransform,
        dims: &CanvasDimensions,
        window: Size,
        settings: &Settings,
    ) -> Option<AnimatedPan> {
        if let Some(last) = self.last_attempt_ms
            && now_ms - last < EDGE_PAN_INTERVAL_MS
        {
            return None;
        }
        self.last_attempt_ms = Some(now_ms);

        let pad = settings.pad_value_when_dragging;
        let shift = dims.size * settings.shift_value_when_dragging / view.scale;

        let dx = edge_shift(cursor.x, window.width, pad, shift);
        let dy = edge_shift(cursor.y, window.height, pad, shift);
        if dx == 0.0 && dy == 0.0 {
            return None;
        }

        let target = view.pivot + Vec2::new(dx, dy);
        log::trace!("edge pan by ({dx}, {dy})");
        Some(AnimatedPan {
            x: target.x,
            y: target.y,
            duration: EDGE_PAN_INTERVAL_MS,
        })
    }
}

fn edge_shift(pos: f64, extent: f64, pad: f64, shift: f64) -> f64 {
    if pos < pad {
        -shift
    } else if pos > extent - pad {
        shift
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const WINDOW: Size = Size::new(1200.0, 900.0);
    const DIMS: CanvasDimensions = CanvasDimensions {
        width: 5000.0,
        height: 4000.0,
        size: 100.0,
    };

    fn view() -> ViewTransform {
        ViewTransform::new(2.0, Point::new(2500.0, 2000.0), Point::new(600.0, 450.0))
    }

    #[test]
    fn left_edge_pans_left_by_scaled_shift() {
        let mut panner = EdgePanner::new();
        let pan = panner
            .on_drag_move(Point::new(10.0, 450.0), 1000.0, &view(), &DIMS, WINDOW, &Settings::default())
            .unwrap();
        // 100 * 3 / 2
        assert_eq!(pan.target(), Point::new(2350.0, 2000.0));
        assert_eq!(pan.duration, EDGE_PAN_INTERVAL_MS);
    }

    #[test]
    fn corner_pans_both_axes() {
        let mut panner = EdgePanner::new();
        let pan = panner
            .on_drag_move(Point::new(1190.0, 895.0), 0.0, &view(), &DIMS, WINDOW, &Settings::default())
            .unwrap();
        assert_eq!(pan.target(), Point::new(2650.0, 2150.0));
    }

    #[test]
    fn center_does_nothing() {
        let mut panner = EdgePanner::new();
        let pan = panner.on_drag_move(
            Point::new(600.0, 450.0),
            0.0,
            &view(),
            &DIMS,
            WINDOW,
            &Settings::default(),
        );
        assert_eq!(pan, None);
    }

    #[test]
    fn throttled_within_interval() {
        let mut panner = EdgePanner::new();
        let settings = Settings::default();
        let cursor = Point::new(5.0, 450.0);
        assert!(panner.on_drag_move(cursor, 1000.0, &view(), &DIMS, WINDOW, &settings).is_some());
        assert!(panner.on_drag_move(cursor, 1150.0, &view(), &DIMS, WINDOW, &settings).is_none());
        assert!(panner.on_drag_move(cursor, 1199.0, &view(), &DIMS, WINDOW, &settings).is_none());
        assert!(panner.on_drag_move(cursor, 1200.0, &view(), &DIMS, WINDOW, &settings).is_some());
    }

    #[test]
    fn non_edge_call_still_restarts_window() {
        let mut panner = EdgePanner::new();
        let settings = Settings::default();
        assert!(
            panner
                .on_drag_move(Point::new(600.0, 450.0), 0.0, &view(), &DIMS, WINDOW, &settings)
                .is_none()
        );
        assert!(
            panner
                .on_drag_move(Point::new(5.0, 5.0), 100.0, &view(), &DIMS, WINDOW, &settings)
                .is_none()
        );
    }

    #[test]
    fn custom_pad_and_shift() {
        let mut panner = EdgePanner::new();
        let settings = Settings {
            pad_value_when_dragging: 150.0,
            shift_value_when_dragging: 1.0,
            ..Settings::default()
        };
        let pan = panner
            .on_drag_move(Point::new(600.0, 120.0), 0.0, &view(), &DIMS, WINDOW, &settings)
            .unwrap();
        assert_eq!(pan.target(), Point::new(2500.0, 1950.0));
    }
}
