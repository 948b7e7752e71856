use route_recall_core::{
    build_scene, from_json, to_json, CanvasSize, Feedback, PathMode, Point, PracticeSession,
    RouteIndex, StrokeRole,
};

fn session() -> PracticeSession {
    let mut session = PracticeSession::new();
    session.set_canvas(CanvasSize::new(800.0, 600.0));
    session.set_smooth_path(false);
    session
}

fn click_line(session: &mut PracticeSession, y: f64) -> Option<Feedback> {
    session.pointer_down(Point::new(100.0, y));
    session.pointer_move(Point::new(400.0, y));
    session.pointer_move(Point::new(700.0, y));
    session.pointer_down(Point::new(700.0, y)).feedback
}

#[test]
fn ideal_then_attempt_scores_the_route() {
    let mut session = session();
    assert_eq!(click_line(&mut session, 100.0), Some(Feedback::IdealSaved));

    let update = session.set_mode(PathMode::Test);
    assert_eq!(update.feedback, Some(Feedback::DrawFromMemory));

    assert_eq!(click_line(&mut session, 150.0), Some(Feedback::Matched(17)));

    session.set_mode(PathMode::Ideal);
    let update = session.set_mode(PathMode::Test);
    assert_eq!(update.feedback, Some(Feedback::Matched(17)));
}

#[test]
fn far_attempt_reports_mismatch() {
    let mut session = session();
    click_line(&mut session, 100.0);
    session.set_mode(PathMode::Test);
    assert_eq!(click_line(&mut session, 220.0), Some(Feedback::Mismatched(0)));
}

#[test]
fn switching_route_mid_stroke_saves_to_the_old_route() {
    let mut session = session();
    session.pointer_down(Point::new(100.0, 100.0));
    session.pointer_move(Point::new(300.0, 100.0));
    let second = RouteIndex::new(1).unwrap();
    let update = session.set_route(second);
    assert!(update.changed);
    assert_eq!(session.route(RouteIndex::new(0).unwrap()).ideal.len(), 2);
    assert!(session.route(second).ideal.is_empty());
    assert!(!session.is_capturing());
}

#[test]
fn routes_are_independent() {
    let mut session = session();
    click_line(&mut session, 100.0);
    session.set_route(RouteIndex::new(2).unwrap());
    click_line(&mut session, 300.0);
    let first = session.route(RouteIndex::new(0).unwrap());
    let third = session.route(RouteIndex::new(2).unwrap());
    assert_ne!(first.ideal, third.ideal);
    assert!(session.route(RouteIndex::new(1).unwrap()).ideal.is_empty());
}

#[test]
fn saved_session_reloads_with_scene_intact() {
    let mut session = session();
    click_line(&mut session, 100.0);
    session.set_ref_opacity(0.8);

    let raw = to_json(&session.to_persisted()).unwrap();
    let (state, report) = from_json(&raw).unwrap();
    assert!(report.is_clean());

    let mut restored = PracticeSession::from_persisted(state);
    restored.set_canvas(CanvasSize::new(400.0, 300.0));
    let scene = build_scene(&restored, true);
    assert_eq!(scene.strokes[0].role, StrokeRole::Ideal);
    let start = scene.strokes[0].points[0];
    assert!((start.x - 50.0).abs() < 1e-9);
    assert!((start.y - 50.0).abs() < 1e-9);
    assert_eq!(scene.overlay.map(|overlay| overlay.opacity), Some(0.8));
}
