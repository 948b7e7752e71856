use crate::geometry::{distance, is_drawable, Point};
use crate::normalize::denormalize;
use crate::reference::OverlayTransform;
use crate::route::PathMode;
use crate::session::PracticeSession;

/// Arc length between direction markers, in CSS pixels.
pub const ARROW_SPACING: f64 = 36.0;
pub const ARROW_MIN_SIZE: f64 = 6.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrokeRole {
    Ideal,
    IdealFaded,
    Attempt,
    InProgressIdeal,
    InProgressAttempt,
}

impl StrokeRole {
    pub fn css_color(self) -> &'static str {
        match self {
            StrokeRole::Ideal | StrokeRole::InProgressIdeal => "rgba(55, 197, 255, 0.9)",
            StrokeRole::IdealFaded => "rgba(55, 197, 255, 0.6)",
            StrokeRole::Attempt | StrokeRole::InProgressAttempt => "rgba(255, 179, 71, 0.9)",
        }
    }
}

/// Triangle marker pointing along the path. The tip sits at `position`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArrowMarker {
    pub position: Point,
    /// Heading in radians, canvas orientation.
    pub angle: f64,
    pub size: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    pub role: StrokeRole,
    pub points: Vec<Point>,
    pub width: f64,
    pub arrows: Vec<ArrowMarker>,
}

impl Stroke {
    fn new(role: StrokeRole, points: Vec<Point>, width: f64) -> Self {
        let arrows = arrow_markers(&points, ARROW_SPACING, width);
        Self {
            role,
            points,
            width,
            arrows,
        }
    }
}

/// Everything one frame draws on top of the map, in paint order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    pub overlay: Option<OverlayTransform>,
    pub strokes: Vec<Stroke>,
}

/// Places markers every `spacing` pixels of arc length. The running
/// distance carries over segment boundaries; zero-length segments are
/// skipped.
pub fn arrow_markers(path: &[Point], spacing: f64, stroke: f64) -> Vec<ArrowMarker> {
    if !is_drawable(path) || !(spacing > 0.0) {
        return Vec::new();
    }
    let size = ARROW_MIN_SIZE.max(stroke + 2.0);
    let mut markers = Vec::new();
    let mut carried = 0.0;
    for pair in path.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let seg = distance(a, b);
        if seg == 0.0 {
            continue;
        }
        let dx = (b.x - a.x) / seg;
        let dy = (b.y - a.y) / seg;
        let angle = dy.atan2(dx);
        let mut t = spacing - carried;
        while t <= seg {
            markers.push(ArrowMarker {
                position: Point::new(a.x + dx * t, a.y + dy * t),
                angle,
                size,
            });
            t += spacing;
        }
        carried = seg - (t - spacing);
    }
    markers
}

/// Builds the frame for the session's active route. `reference_ready`
/// says whether that route's reference image has loaded. Without a canvas
/// there is nothing to draw.
pub fn build_scene(session: &PracticeSession, reference_ready: bool) -> Scene {
    let Some(canvas) = session.canvas() else {
        return Scene::default();
    };
    let settings = session.settings();
    let mode = session.mode();
    let width = settings.stroke;

    let overlay = (mode == PathMode::Ideal && settings.show_ref && reference_ready)
        .then(|| OverlayTransform::new(session.active_ref_adjust(), canvas));

    let route = session.active_route();
    let mut strokes = Vec::new();
    let ideal_role = match mode {
        PathMode::Ideal => Some(StrokeRole::Ideal),
        PathMode::Test if settings.show_ideal_in_test => Some(StrokeRole::IdealFaded),
        PathMode::Test => None,
    };
    if let Some(role) = ideal_role {
        if is_drawable(&route.ideal) {
            strokes.push(Stroke::new(role, denormalize(&route.ideal, canvas), width));
        }
    }
    if is_drawable(&route.attempt) {
        strokes.push(Stroke::new(
            StrokeRole::Attempt,
            denormalize(&route.attempt, canvas),
            width,
        ));
    }

    let live = session.in_progress();
    if is_drawable(live) {
        let role = match mode {
            PathMode::Ideal => StrokeRole::InProgressIdeal,
            PathMode::Test => StrokeRole::InProgressAttempt,
        };
        strokes.push(Stroke::new(role, live.to_vec(), width));
    }

    Scene { overlay, strokes }
}
