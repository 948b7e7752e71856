use serde::{Deserialize, Serialize};

use crate::capture::DrawMode;

pub const STROKE_MIN: f64 = 1.0;
pub const STROKE_MAX: f64 = 24.0;
pub const STROKE_DEFAULT: f64 = 6.0;

pub const TOLERANCE_PERCENT_MIN: f64 = 0.0;
pub const TOLERANCE_PERCENT_MAX: f64 = 100.0;
pub const TOLERANCE_PERCENT_DEFAULT: f64 = 6.0;

pub const MAP_SCALE_PERCENT_MIN: f64 = 25.0;
pub const MAP_SCALE_PERCENT_MAX: f64 = 400.0;
pub const MAP_SCALE_PERCENT_DEFAULT: f64 = 100.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub stroke: f64,
    pub tolerance: f64,
    pub click_to_draw: bool,
    pub smooth_path: bool,
    pub show_ideal_in_test: bool,
    pub show_ref: bool,
    pub ref_adjust_mode: bool,
    pub show_ref_side: bool,
    pub map_scale: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            stroke: STROKE_DEFAULT,
            tolerance: TOLERANCE_PERCENT_DEFAULT,
            click_to_draw: true,
            smooth_path: true,
            show_ideal_in_test: false,
            show_ref: true,
            ref_adjust_mode: false,
            show_ref_side: false,
            map_scale: MAP_SCALE_PERCENT_DEFAULT,
        }
    }
}

impl Settings {
    pub fn draw_mode(&self) -> DrawMode {
        DrawMode::from_click_to_draw(self.click_to_draw)
    }

    /// Tolerance as the fraction used by the scorer.
    pub fn tolerance_fraction(&self) -> f64 {
        self.tolerance / 100.0
    }

    pub fn set_stroke(&mut self, value: f64) {
        self.stroke = clamp_finite(value, STROKE_MIN, STROKE_MAX, STROKE_DEFAULT);
    }

    pub fn set_tolerance(&mut self, value: f64) {
        self.tolerance = clamp_finite(
            value,
            TOLERANCE_PERCENT_MIN,
            TOLERANCE_PERCENT_MAX,
            TOLERANCE_PERCENT_DEFAULT,
        );
    }

    pub fn set_map_scale(&mut self, value: f64) {
        self.map_scale = clamp_finite(
            value,
            MAP_SCALE_PERCENT_MIN,
            MAP_SCALE_PERCENT_MAX,
            MAP_SCALE_PERCENT_DEFAULT,
        );
    }

    /// Pulls every numeric field back into range.
    pub fn sanitized(mut self) -> Self {
        self.set_stroke(self.stroke);
        self.set_tolerance(self.tolerance);
        self.set_map_scale(self.map_scale);
        self
    }
}

pub(crate) fn clamp_finite(value: f64, min: f64, max: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        fallback
    }
}
