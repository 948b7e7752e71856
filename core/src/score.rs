use crate::geometry::{distance, is_drawable, Point};
use crate::normalize::{denormalize, CanvasSize};
use crate::resample::resample;
use crate::route::Route;

/// Samples taken from each path in one comparison.
pub const SAMPLE_COUNT: usize = 200;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoreResult {
    /// Match quality in `[0, 1]`.
    pub score: f64,
    pub pass: bool,
    /// Mean sample distance divided by the canvas diagonal.
    pub normalized_distance: f64,
}

impl ScoreResult {
    pub fn percentage(&self) -> u32 {
        (self.score * 100.0).round() as u32
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Evaluation {
    /// Either the ideal or the attempt has fewer than two points.
    InsufficientData,
    Scored(ScoreResult),
}

/// Index-aligned comparison of two device-space paths.
///
/// Samples are paired by position along each path, so an attempt traced in
/// the opposite direction scores poorly even when it covers the same ground.
/// Both paths must be drawable; use [`evaluate`] when that is not known.
pub fn compare(
    ideal: &[Point],
    attempt: &[Point],
    tolerance_fraction: f64,
    canvas: CanvasSize,
) -> ScoreResult {
    let ideal_pts = resample(ideal, SAMPLE_COUNT);
    let attempt_pts = resample(attempt, SAMPLE_COUNT);
    let total: f64 = ideal_pts
        .iter()
        .zip(attempt_pts.iter())
        .map(|(a, b)| distance(*a, *b))
        .sum();
    let mean = total / SAMPLE_COUNT as f64;
    let normalized_distance = mean / canvas.diagonal();

    if tolerance_fraction <= 0.0 {
        let exact = normalized_distance == 0.0;
        return ScoreResult {
            score: if exact { 1.0 } else { 0.0 },
            pass: exact,
            normalized_distance,
        };
    }

    ScoreResult {
        score: (1.0 - normalized_distance / tolerance_fraction).max(0.0),
        pass: normalized_distance <= tolerance_fraction,
        normalized_distance,
    }
}

/// Scores a stored route against the current canvas.
pub fn evaluate(route: &Route, canvas: CanvasSize, tolerance_fraction: f64) -> Evaluation {
    if !is_drawable(&route.ideal) || !is_drawable(&route.attempt) {
        return Evaluation::InsufficientData;
    }
    let ideal = denormalize(&route.ideal, canvas);
    let attempt = denormalize(&route.attempt, canvas);
    Evaluation::Scored(compare(&ideal, &attempt, tolerance_fraction, canvas))
}
