pub mod capture;
pub mod catalog;
pub mod controls;
pub mod feedback;
pub mod geometry;
pub mod layout;
pub mod normalize;
pub mod persisted;
pub mod reference;
pub mod resample;
pub mod route;
pub mod scene;
pub mod score;
pub mod session;
pub mod settings;
pub mod smooth;

pub use capture::{CaptureMachine, DrawMode, MIN_MOTION_SQ};
pub use catalog::{route_by_value, route_entry, DEFAULT_MAP_SRC, ROUTE_CATALOG};
pub use controls::{fullscreen_label, ref_slider_values, toggle_views, ButtonView, ToggleViews};
pub use feedback::Feedback;
pub use geometry::{distance, is_drawable, path_length, Path, Point};
pub use layout::{fit_canvas, CanvasLayout};
pub use normalize::{denormalize, normalize, CanvasSize};
pub use persisted::{from_json, to_json, LoadReport, PersistError, PersistedState, STORE_KEY};
pub use reference::{shift_limits, ImageSlots, OverlayTransform, RefAdjust, RefDrag};
pub use resample::resample;
pub use route::{PathMode, Route, RouteIndex, ROUTE_COUNT};
pub use scene::{arrow_markers, build_scene, ArrowMarker, Scene, Stroke, StrokeRole};
pub use score::{compare, evaluate, Evaluation, ScoreResult, SAMPLE_COUNT};
pub use session::{PracticeSession, Update};
pub use settings::Settings;
pub use smooth::smooth;
