//! In-memory host used by the integration tests.

#![allow(dead_code)]

use zpo_core::compat::RateLimitSource;
use zpo_core::{
    ActiveLayer, AnimatedPan, CanvasDimensions, CanvasHost, PanRequest, Point, Size,
    ViewTransform,
};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Records every call the controller makes and applies pans directly.
#[derive(Debug)]
pub struct FakeHost {
    pub ready: bool,
    pub over_canvas: bool,
    pub view: ViewTransform,
    pub dims: CanvasDimensions,
    pub window: Size,
    pub layer: ActiveLayer,
    pub max_zoom: f64,
    pub mouse_rate_limit_ms: f64,
    pub keyboard_rate_limit_ms: f64,
    pub autoscroll_suppressed: bool,
    pub pans: Vec<PanRequest>,
    pub animated: Vec<AnimatedPan>,
    pub rotations: Vec<(f64, bool)>,
    pub stage_scales: Vec<f64>,
}

impl Default for FakeHost {
    fn default() -> Self {
        Self {
            ready: true,
            over_canvas: true,
            view: ViewTransform::new(1.0, Point::new(2000.0, 1500.0), Point::new(600.0, 400.0)),
            dims: CanvasDimensions {
                width: 4000.0,
                height: 3000.0,
                size: 100.0,
            },
            window: Size::new(1200.0, 800.0),
            layer: ActiveLayer::default(),
            max_zoom: 3.0,
            mouse_rate_limit_ms: 50.0,
            keyboard_rate_limit_ms: 100.0,
            autoscroll_suppressed: false,
            pans: Vec::new(),
            animated: Vec::new(),
            rotations: Vec::new(),
            stage_scales: Vec::new(),
        }
    }
}

impl FakeHost {
    pub fn with_selection(count: usize) -> Self {
        Self {
            layer: ActiveLayer {
                placeables: true,
                controllable: true,
                controlled: count,
                hovered: false,
            },
            ..Self::default()
        }
    }
}

impl CanvasHost for FakeHost {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn is_over_canvas(&self, _client: Point) -> bool {
        self.over_canvas
    }

    fn view(&self) -> ViewTransform {
        self.view
    }

    fn dimensions(&self) -> CanvasDimensions {
        self.dims
    }

    fn window_size(&self) -> Size {
        self.window
    }

    fn active_layer(&self) -> ActiveLayer {
        self.layer
    }

    fn rotate_targets(&mut self, delta: f64, snap: bool) {
        self.rotations.push((delta, snap));
    }

    fn pan(&mut self, request: PanRequest) {
        self.pans.push(request);
        self.view = self.view.with(&request);
    }

    fn animate_pan(&mut self, pan: AnimatedPan) {
        self.animated.push(pan);
    }

    fn set_stage_scale(&mut self, scale: f64) {
        self.stage_scales.push(scale);
        self.view.scale = scale;
    }

    fn wheel_rate_limit_ms(&self, source: RateLimitSource) -> f64 {
        match source {
            RateLimitSource::MouseManager => self.mouse_rate_limit_ms,
            RateLimitSource::KeyboardManager => self.keyboard_rate_limit_ms,
        }
    }

    fn max_zoom(&self) -> f64 {
        self.max_zoom
    }

    fn set_max_zoom(&mut self, max_zoom: f64) {
        self.max_zoom = max_zoom;
    }

    fn set_middle_click_autoscroll_suppressed(&mut self, suppressed: bool) {
        self.autoscroll_suppressed = suppressed;
    }
}
