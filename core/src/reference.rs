use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::normalize::CanvasSize;
use crate::route::{RouteIndex, ROUTE_COUNT};
use crate::settings::clamp_finite;

pub const REF_OPACITY_DEFAULT: f64 = 0.35;
pub const REF_SCALE_MIN: f64 = 0.25;
pub const REF_SCALE_MAX: f64 = 4.0;
pub const REF_ROTATE_MIN_DEG: f64 = -180.0;
pub const REF_ROTATE_MAX_DEG: f64 = 180.0;
/// Slider shift range as a fraction of the canvas size on each axis.
pub const REF_SHIFT_LIMIT_RATIO: f64 = 0.3;

/// Placement of a route's reference photo over the map.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RefAdjust {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
    pub rotate: f64,
    pub opacity: f64,
}

impl Default for RefAdjust {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale: 1.0,
            rotate: 0.0,
            opacity: REF_OPACITY_DEFAULT,
        }
    }
}

impl RefAdjust {
    pub fn set_opacity(&mut self, value: f64) {
        self.opacity = clamp_finite(value, 0.0, 1.0, REF_OPACITY_DEFAULT);
    }

    pub fn set_scale(&mut self, value: f64) {
        self.scale = clamp_finite(value, REF_SCALE_MIN, REF_SCALE_MAX, 1.0);
    }

    pub fn set_rotate(&mut self, value: f64) {
        self.rotate = clamp_finite(value, REF_ROTATE_MIN_DEG, REF_ROTATE_MAX_DEG, 0.0);
    }

    /// Slider writes are held inside [`shift_limits`]; drags are not.
    pub fn set_shift_x(&mut self, value: f64, canvas: CanvasSize) {
        let (max_x, _) = shift_limits(canvas);
        self.x = clamp_finite(value, -max_x, max_x, 0.0);
    }

    pub fn set_shift_y(&mut self, value: f64, canvas: CanvasSize) {
        let (_, max_y) = shift_limits(canvas);
        self.y = clamp_finite(value, -max_y, max_y, 0.0);
    }

    pub(crate) fn is_valid(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.scale.is_finite()
            && self.rotate.is_finite()
            && self.opacity.is_finite()
    }
}

pub fn default_adjustments() -> [RefAdjust; ROUTE_COUNT] {
    [RefAdjust::default(); ROUTE_COUNT]
}

/// Symmetric `(max_x, max_y)` pixel shift allowed by the sliders.
pub fn shift_limits(canvas: CanvasSize) -> (f64, f64) {
    (
        (canvas.width() * REF_SHIFT_LIMIT_RATIO).round(),
        (canvas.height() * REF_SHIFT_LIMIT_RATIO).round(),
    )
}

/// Affine placement for drawing the overlay image: translate to `center`,
/// rotate, scale, then draw into `dest` (centred on the origin).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayTransform {
    pub center: Point,
    pub rotate_rad: f64,
    pub scale: f64,
    pub opacity: f64,
    pub dest_x: f64,
    pub dest_y: f64,
    pub dest_width: f64,
    pub dest_height: f64,
}

impl OverlayTransform {
    pub fn new(adjust: &RefAdjust, canvas: CanvasSize) -> Self {
        let w = canvas.width();
        let h = canvas.height();
        Self {
            center: Point::new(w / 2.0 + adjust.x, h / 2.0 + adjust.y),
            rotate_rad: adjust.rotate.to_radians(),
            scale: adjust.scale,
            opacity: adjust.opacity,
            dest_x: -w / 2.0,
            dest_y: -h / 2.0,
            dest_width: w,
            dest_height: h,
        }
    }
}

/// Pointer drag that slides the overlay.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RefDrag {
    route: RouteIndex,
    start: Point,
    origin: Point,
}

impl RefDrag {
    pub fn begin(route: RouteIndex, start: Point, adjust: &RefAdjust) -> Self {
        Self {
            route,
            start,
            origin: Point::new(adjust.x, adjust.y),
        }
    }

    pub fn route(&self) -> RouteIndex {
        self.route
    }

    pub fn apply(&self, point: Point, adjust: &mut RefAdjust) {
        adjust.x = self.origin.x + (point.x - self.start.x);
        adjust.y = self.origin.y + (point.y - self.start.y);
    }
}

/// One slot per route for independently loaded images. Loads may land in
/// any order; readers only ever see what has arrived so far.
#[derive(Clone, Debug)]
pub struct ImageSlots<T> {
    slots: [Option<T>; ROUTE_COUNT],
}

impl<T> Default for ImageSlots<T> {
    fn default() -> Self {
        Self {
            slots: std::array::from_fn(|_| None),
        }
    }
}

impl<T> ImageSlots<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve(&mut self, route: RouteIndex, image: T) {
        self.slots[route.get()] = Some(image);
    }

    pub fn get(&self, route: RouteIndex) -> Option<&T> {
        self.slots[route.get()].as_ref()
    }

    pub fn is_ready(&self, route: RouteIndex) -> bool {
        self.slots[route.get()].is_some()
    }
}
