use crate::capture::CaptureMachine;
use crate::feedback::Feedback;
use crate::geometry::{is_drawable, Path, Point};
use crate::normalize::{normalize, CanvasSize};
use crate::persisted::PersistedState;
use crate::reference::{default_adjustments, RefAdjust, RefDrag};
use crate::route::{empty_routes, PathMode, Route, RouteIndex, ROUTE_COUNT};
use crate::score::{evaluate, Evaluation};
use crate::settings::Settings;
use crate::smooth::smooth;

/// What an operation did, for the shell to act on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Update {
    pub feedback: Option<Feedback>,
    /// Persisted data changed and should be saved.
    pub changed: bool,
}

impl Update {
    fn changed() -> Self {
        Self {
            feedback: None,
            changed: true,
        }
    }

    fn feedback(feedback: Feedback) -> Self {
        Self {
            feedback: Some(feedback),
            changed: false,
        }
    }

    fn merge(self, later: Update) -> Update {
        Update {
            feedback: later.feedback.or(self.feedback),
            changed: self.changed || later.changed,
        }
    }
}

/// All mutable practice state, owned in one place.
#[derive(Clone, Debug)]
pub struct PracticeSession {
    routes: [Route; ROUTE_COUNT],
    ref_adjust: [RefAdjust; ROUTE_COUNT],
    settings: Settings,
    mode: PathMode,
    route: RouteIndex,
    capture: CaptureMachine,
    ref_drag: Option<RefDrag>,
    canvas: Option<CanvasSize>,
}

impl Default for PracticeSession {
    fn default() -> Self {
        Self::new()
    }
}

impl PracticeSession {
    pub fn new() -> Self {
        Self {
            routes: empty_routes(),
            ref_adjust: default_adjustments(),
            settings: Settings::default(),
            mode: PathMode::Ideal,
            route: RouteIndex::default(),
            capture: CaptureMachine::new(),
            ref_drag: None,
            canvas: None,
        }
    }

    pub fn from_persisted(state: PersistedState) -> Self {
        Self {
            routes: state.routes,
            ref_adjust: state.ref_adjust,
            settings: state.settings.sanitized(),
            ..Self::new()
        }
    }

    pub fn to_persisted(&self) -> PersistedState {
        PersistedState {
            routes: self.routes.clone(),
            settings: self.settings.clone(),
            ref_adjust: self.ref_adjust,
        }
    }

    pub fn routes(&self) -> &[Route; ROUTE_COUNT] {
        &self.routes
    }

    pub fn route(&self, index: RouteIndex) -> &Route {
        &self.routes[index.get()]
    }

    pub fn active_route(&self) -> &Route {
        self.route(self.route)
    }

    pub fn route_index(&self) -> RouteIndex {
        self.route
    }

    pub fn mode(&self) -> PathMode {
        self.mode
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn ref_adjust(&self, index: RouteIndex) -> &RefAdjust {
        &self.ref_adjust[index.get()]
    }

    pub fn active_ref_adjust(&self) -> &RefAdjust {
        self.ref_adjust(self.route)
    }

    pub fn canvas(&self) -> Option<CanvasSize> {
        self.canvas
    }

    /// Device-space points of the stroke being drawn.
    pub fn in_progress(&self) -> &[Point] {
        self.capture.in_progress()
    }

    pub fn is_capturing(&self) -> bool {
        self.capture.is_capturing()
    }

    pub fn is_dragging_reference(&self) -> bool {
        self.ref_drag.is_some()
    }

    /// `None` until a background map gives the canvas a size; pointer input
    /// is ignored until then.
    pub fn set_canvas(&mut self, canvas: Option<CanvasSize>) {
        self.canvas = canvas;
    }

    /// Whether a press should keep the pointer captured by the canvas.
    /// Drag strokes stay uncaptured so leaving the canvas ends them.
    pub fn wants_pointer_capture(&self) -> bool {
        self.canvas.is_some() && (self.settings.click_to_draw || self.reference_drag_armed())
    }

    fn reference_drag_armed(&self) -> bool {
        self.mode == PathMode::Ideal && self.settings.show_ref && self.settings.ref_adjust_mode
    }

    pub fn pointer_down(&mut self, point: Point) -> Update {
        if self.canvas.is_none() {
            return Update::default();
        }
        if self.reference_drag_armed() {
            self.ref_drag = Some(RefDrag::begin(self.route, point, self.active_ref_adjust()));
            return Update::default();
        }
        match self.capture.press(point, self.settings.draw_mode()) {
            Some(path) => self.store(path),
            None => Update::default(),
        }
    }

    pub fn pointer_move(&mut self, point: Point) -> Update {
        if let Some(drag) = self.ref_drag {
            drag.apply(point, &mut self.ref_adjust[drag.route().get()]);
            return Update::changed();
        }
        self.capture.motion(point);
        Update::default()
    }

    pub fn pointer_up(&mut self) -> Update {
        if self.ref_drag.take().is_some() {
            return Update::default();
        }
        match self.capture.release(self.settings.draw_mode()) {
            Some(path) => self.store(path),
            None => Update::default(),
        }
    }

    pub fn pointer_leave(&mut self) -> Update {
        if self.ref_drag.take().is_some() {
            return Update::default();
        }
        match self.capture.leave(self.settings.draw_mode()) {
            Some(path) => self.store(path),
            None => Update::default(),
        }
    }

    /// Switching away mid-stroke keeps the work: an open stroke or a
    /// multi-point buffer is finalized first. A lone point is dropped.
    fn commit_pending(&mut self) -> Update {
        self.ref_drag = None;
        if !self.capture.has_pending() {
            return Update::default();
        }
        match self.capture.finish() {
            Some(path) => self.store(path),
            None => Update::default(),
        }
    }

    fn store(&mut self, path: Path) -> Update {
        let Some(canvas) = self.canvas else {
            return Update::default();
        };
        let path = if self.settings.smooth_path {
            smooth(&path)
        } else {
            path
        };
        let normalized = normalize(&path, canvas);
        let mode = self.mode;
        *self.routes[self.route.get()].slot_mut(mode) = normalized;

        let feedback = match mode {
            PathMode::Ideal => Feedback::IdealSaved,
            PathMode::Test => {
                if !is_drawable(&self.active_route().ideal) {
                    Feedback::IdealRequired
                } else {
                    self.evaluate_active()
                        .and_then(Feedback::from_evaluation)
                        .unwrap_or(Feedback::IdealRequired)
                }
            }
        };
        Update {
            feedback: Some(feedback),
            changed: true,
        }
    }

    /// Scores the active route against the current canvas.
    pub fn evaluate_active(&self) -> Option<Evaluation> {
        let canvas = self.canvas?;
        Some(evaluate(
            self.active_route(),
            canvas,
            self.settings.tolerance_fraction(),
        ))
    }

    pub fn set_mode(&mut self, mode: PathMode) -> Update {
        let committed = self.commit_pending();
        self.mode = mode;
        let feedback = match mode {
            PathMode::Ideal => Feedback::IdealMode,
            PathMode::Test => self
                .evaluate_active()
                .and_then(Feedback::from_evaluation)
                .unwrap_or(Feedback::DrawFromMemory),
        };
        committed.merge(Update::feedback(feedback))
    }

    pub fn set_route(&mut self, route: RouteIndex) -> Update {
        let committed = self.commit_pending();
        self.route = route;
        committed
    }

    /// Clears the active mode's path on the active route and any stroke in
    /// progress.
    pub fn clear_current(&mut self) -> Update {
        self.capture.cancel();
        let mode = self.mode;
        self.routes[self.route.get()].slot_mut(mode).clear();
        let feedback = match mode {
            PathMode::Ideal => Feedback::IdealCleared,
            PathMode::Test => Feedback::AttemptCleared,
        };
        Update {
            feedback: Some(feedback),
            changed: true,
        }
    }

    pub fn clear_ideal(&mut self) -> Update {
        self.routes[self.route.get()].ideal.clear();
        Update::changed()
    }

    pub fn clear_all(&mut self) -> Update {
        self.routes = empty_routes();
        Update::changed()
    }

    pub fn set_stroke(&mut self, value: f64) -> Update {
        self.settings.set_stroke(value);
        Update::changed()
    }

    pub fn set_tolerance(&mut self, value: f64) -> Update {
        self.settings.set_tolerance(value);
        Update::changed()
    }

    pub fn set_click_to_draw(&mut self, value: bool) -> Update {
        self.settings.click_to_draw = value;
        Update::changed()
    }

    pub fn set_smooth_path(&mut self, value: bool) -> Update {
        self.settings.smooth_path = value;
        Update::changed()
    }

    pub fn set_ref_adjust_mode(&mut self, value: bool) -> Update {
        self.settings.ref_adjust_mode = value;
        Update::changed()
    }

    pub fn set_map_scale(&mut self, value: f64) -> Update {
        self.settings.set_map_scale(value);
        Update::changed()
    }

    pub fn reset_map_scale(&mut self) -> Update {
        self.settings.map_scale = Settings::default().map_scale;
        Update::changed()
    }

    /// Only meaningful while testing.
    pub fn toggle_ideal_in_test(&mut self) -> Update {
        if self.mode != PathMode::Test {
            return Update::default();
        }
        self.settings.show_ideal_in_test = !self.settings.show_ideal_in_test;
        Update::changed()
    }

    /// Only meaningful while drawing the ideal.
    pub fn toggle_reference(&mut self) -> Update {
        if self.mode != PathMode::Ideal {
            return Update::default();
        }
        self.settings.show_ref = !self.settings.show_ref;
        Update::changed()
    }

    pub fn toggle_reference_beside(&mut self) -> Update {
        if self.mode != PathMode::Ideal {
            return Update::default();
        }
        self.settings.show_ref_side = !self.settings.show_ref_side;
        Update::changed()
    }

    fn active_ref_adjust_mut(&mut self) -> &mut RefAdjust {
        &mut self.ref_adjust[self.route.get()]
    }

    pub fn set_ref_opacity(&mut self, value: f64) -> Update {
        self.active_ref_adjust_mut().set_opacity(value);
        Update::changed()
    }

    pub fn set_ref_scale(&mut self, value: f64) -> Update {
        self.active_ref_adjust_mut().set_scale(value);
        Update::changed()
    }

    pub fn set_ref_rotate(&mut self, value: f64) -> Update {
        self.active_ref_adjust_mut().set_rotate(value);
        Update::changed()
    }

    pub fn set_ref_shift_x(&mut self, value: f64) -> Update {
        let Some(canvas) = self.canvas else {
            return Update::default();
        };
        self.active_ref_adjust_mut().set_shift_x(value, canvas);
        Update::changed()
    }

    pub fn set_ref_shift_y(&mut self, value: f64) -> Update {
        let Some(canvas) = self.canvas else {
            return Update::default();
        };
        self.active_ref_adjust_mut().set_shift_y(value, canvas);
        Update::changed()
    }

    pub fn reset_ref_adjust(&mut self) -> Update {
        *self.active_ref_adjust_mut() = RefAdjust::default();
        Update::changed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> PracticeSession {
        let mut session = PracticeSession::new();
        session.set_canvas(CanvasSize::new(800.0, 600.0));
        session
    }

    fn draw_drag(session: &mut PracticeSession, points: &[Point]) -> Update {
        let mut update = session.pointer_down(points[0]);
        for point in &points[1..] {
            update = update.merge(session.pointer_move(*point));
        }
        update.merge(session.pointer_up())
    }

    #[test]
    fn input_is_ignored_without_canvas() {
        let mut session = PracticeSession::new();
        session.pointer_down(Point::new(10.0, 10.0));
        assert!(!session.is_capturing());
        assert!(session.in_progress().is_empty());
    }

    #[test]
    fn drag_stroke_is_stored_normalized() {
        let mut session = session();
        session.set_smooth_path(false);
        session.set_click_to_draw(false);
        let update = draw_drag(
            &mut session,
            &[Point::new(80.0, 60.0), Point::new(400.0, 60.0)],
        );
        assert_eq!(update.feedback, Some(Feedback::IdealSaved));
        assert!(update.changed);
        assert_eq!(
            session.active_route().ideal,
            vec![Point::new(0.1, 0.1), Point::new(0.5, 0.1)]
        );
        assert!(!session.is_capturing());
    }

    #[test]
    fn smoothing_applies_before_store() {
        let mut session = session();
        session.set_click_to_draw(false);
        draw_drag(
            &mut session,
            &[
                Point::new(0.0, 0.0),
                Point::new(300.0, 300.0),
                Point::new(600.0, 0.0),
            ],
        );
        let ideal = &session.active_route().ideal;
        assert_eq!(ideal[1], Point::new(300.0 / 800.0, 100.0 / 600.0));
    }

    #[test]
    fn attempt_without_ideal_reports_missing_ideal() {
        let mut session = session();
        session.set_click_to_draw(false);
        session.set_mode(PathMode::Test);
        let update = draw_drag(&mut session, &[Point::new(0.0, 0.0), Point::new(50.0, 0.0)]);
        assert_eq!(update.feedback, Some(Feedback::IdealRequired));
        assert_eq!(session.active_route().attempt.len(), 2);
    }

    #[test]
    fn mode_switch_finalizes_open_click_stroke() {
        let mut session = session();
        session.pointer_down(Point::new(100.0, 100.0));
        session.pointer_move(Point::new(200.0, 100.0));
        assert!(session.is_capturing());
        let update = session.set_mode(PathMode::Test);
        assert!(update.changed);
        assert_eq!(update.feedback, Some(Feedback::DrawFromMemory));
        assert_eq!(session.route(RouteIndex::default()).ideal.len(), 2);
        assert!(!session.is_capturing());
    }

    #[test]
    fn route_switch_discards_stray_point() {
        let mut session = session();
        session.pointer_down(Point::new(100.0, 100.0));
        let update = session.set_route(RouteIndex::new(2).unwrap());
        assert!(!update.changed);
        assert!(session.routes().iter().all(|route| route.ideal.is_empty()));
        assert_eq!(session.route_index().get(), 2);
    }

    #[test]
    fn drag_strokes_do_not_hold_the_pointer() {
        let mut session = session();
        assert!(session.wants_pointer_capture());
        session.set_click_to_draw(false);
        assert!(!session.wants_pointer_capture());

        session.pointer_down(Point::new(10.0, 10.0));
        session.pointer_move(Point::new(60.0, 10.0));
        let update = session.pointer_leave();
        assert!(update.changed);
        assert_eq!(session.active_route().ideal.len(), 2);
        assert!(!session.is_capturing());

        session.set_ref_adjust_mode(true);
        assert!(session.wants_pointer_capture());
        assert!(!PracticeSession::new().wants_pointer_capture());
    }

    #[test]
    fn reference_drag_moves_overlay_instead_of_drawing() {
        let mut session = session();
        session.set_ref_adjust_mode(true);
        session.pointer_down(Point::new(10.0, 10.0));
        assert!(session.is_dragging_reference());
        let update = session.pointer_move(Point::new(40.0, 25.0));
        assert!(update.changed);
        session.pointer_up();
        assert!(!session.is_dragging_reference());
        assert_eq!(session.active_ref_adjust().x, 30.0);
        assert_eq!(session.active_ref_adjust().y, 15.0);
        assert!(session.in_progress().is_empty());
    }

    #[test]
    fn toggles_respect_mode() {
        let mut session = session();
        assert!(!session.toggle_ideal_in_test().changed);
        assert!(session.toggle_reference().changed);
        assert!(!session.settings().show_ref);
        session.set_mode(PathMode::Test);
        assert!(!session.toggle_reference_beside().changed);
        assert!(session.toggle_ideal_in_test().changed);
        assert!(session.settings().show_ideal_in_test);
    }

    #[test]
    fn clear_current_targets_active_slot() {
        let mut session = session();
        session.set_click_to_draw(false);
        draw_drag(&mut session, &[Point::new(0.0, 0.0), Point::new(50.0, 0.0)]);
        session.set_mode(PathMode::Test);
        draw_drag(&mut session, &[Point::new(0.0, 5.0), Point::new(50.0, 5.0)]);
        let update = session.clear_current();
        assert_eq!(update.feedback, Some(Feedback::AttemptCleared));
        assert!(session.active_route().attempt.is_empty());
        assert_eq!(session.active_route().ideal.len(), 2);
        session.clear_all();
        assert!(session.active_route().ideal.is_empty());
    }

    #[test]
    fn tolerance_percent_scores_as_fraction() {
        let mut session = session();
        session.set_smooth_path(false);
        session.set_click_to_draw(false);
        draw_drag(&mut session, &[Point::new(100.0, 100.0), Point::new(700.0, 100.0)]);
        session.set_mode(PathMode::Test);
        draw_drag(&mut session, &[Point::new(100.0, 150.0), Point::new(700.0, 150.0)]);

        session.set_tolerance(6.0);
        let Some(Evaluation::Scored(loose)) = session.evaluate_active() else {
            panic!("expected a score");
        };
        assert!(loose.pass);
        assert_eq!(loose.percentage(), 17);

        session.set_tolerance(4.0);
        let Some(Evaluation::Scored(tight)) = session.evaluate_active() else {
            panic!("expected a score");
        };
        assert!(!tight.pass);
        assert_eq!(tight.score, 0.0);
    }

    #[test]
    fn persisted_round_trip_keeps_routes_and_settings() {
        let mut session = session();
        session.set_click_to_draw(false);
        session.set_tolerance(9.0);
        draw_drag(&mut session, &[Point::new(0.0, 0.0), Point::new(80.0, 60.0)]);
        let restored = PracticeSession::from_persisted(session.to_persisted());
        assert_eq!(restored.routes(), session.routes());
        assert_eq!(restored.settings(), session.settings());
        assert_eq!(restored.mode(), PathMode::Ideal);
        assert!(restored.canvas().is_none());
    }
}
