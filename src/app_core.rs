use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsValue;
use web_sys::{HtmlCanvasElement, HtmlImageElement};

use crate::persisted_store;
use crate::renderer;
use route_recall_core::controls::RefSliderValues;
use route_recall_core::{
    build_scene, fit_canvas, ref_slider_values, route_entry, shift_limits, toggle_views,
    CanvasLayout, Feedback, ImageSlots, PathMode, PracticeSession, RouteIndex, Settings,
    ToggleViews, Update,
};

pub(crate) type AppSubscriber = Rc<dyn Fn()>;

/// Owns the practice session plus everything the browser adds around it:
/// loaded images, canvas layout and the feedback line.
pub(crate) struct AppCore {
    state: RefCell<AppState>,
    subscribers: Rc<RefCell<Vec<AppSubscriber>>>,
}

struct AppState {
    session: PracticeSession,
    map: Option<HtmlImageElement>,
    references: ImageSlots<HtmlImageElement>,
    layout: Option<CanvasLayout>,
    frame_width: f64,
    dpr: f64,
    fullscreen: bool,
    feedback: Option<Feedback>,
    revision: u64,
}

#[derive(Clone, PartialEq)]
pub(crate) struct AppSnapshot {
    pub(crate) revision: u64,
    pub(crate) mode: PathMode,
    pub(crate) route: RouteIndex,
    pub(crate) settings: Settings,
    pub(crate) toggles: ToggleViews,
    pub(crate) ref_sliders: RefSliderValues,
    pub(crate) shift_limits: Option<(f64, f64)>,
    pub(crate) feedback: Option<Feedback>,
    pub(crate) has_map: bool,
    pub(crate) fullscreen: bool,
    /// Source of the photo shown beside the map, when that panel is open.
    pub(crate) reference_beside: Option<&'static str>,
}

impl AppCore {
    pub(crate) fn new(session: PracticeSession) -> Rc<Self> {
        Rc::new(Self {
            state: RefCell::new(AppState::new(session)),
            subscribers: Rc::new(RefCell::new(Vec::new())),
        })
    }

    pub(crate) fn subscribe(&self, subscriber: AppSubscriber) -> AppSubscription {
        self.subscribers.borrow_mut().push(subscriber.clone());
        AppSubscription {
            subscriber,
            subscribers: Rc::clone(&self.subscribers),
        }
    }

    fn notify(&self) {
        let subscribers = self.subscribers.borrow().clone();
        for subscriber in subscribers {
            (subscriber)();
        }
    }

    pub(crate) fn snapshot(&self) -> AppSnapshot {
        self.state.borrow().snapshot()
    }

    /// Runs one session operation, then saves and notifies as it asks.
    pub(crate) fn apply<F>(&self, op: F)
    where
        F: FnOnce(&mut PracticeSession) -> Update,
    {
        let persisted = {
            let mut state = self.state.borrow_mut();
            let update = op(&mut state.session);
            if update.feedback.is_some() {
                state.feedback = update.feedback;
            }
            state.refresh_layout();
            state.revision = state.revision.wrapping_add(1);
            update.changed.then(|| state.session.to_persisted())
        };
        if let Some(persisted) = persisted {
            persisted_store::save_state(&persisted);
        }
        self.notify();
    }

    /// Hover moves with no stroke or drag open change nothing.
    pub(crate) fn wants_motion(&self) -> bool {
        let state = self.state.borrow();
        state.session.is_capturing() || state.session.is_dragging_reference()
    }

    pub(crate) fn wants_pointer_capture(&self) -> bool {
        self.state.borrow().session.wants_pointer_capture()
    }

    fn mutate<F>(&self, mutator: F)
    where
        F: FnOnce(&mut AppState),
    {
        {
            let mut state = self.state.borrow_mut();
            mutator(&mut state);
            state.refresh_layout();
            state.revision = state.revision.wrapping_add(1);
        }
        self.notify();
    }

    pub(crate) fn set_map(&self, image: HtmlImageElement) {
        self.mutate(|state| state.map = Some(image));
    }

    pub(crate) fn set_reference(&self, route: RouteIndex, image: HtmlImageElement) {
        self.mutate(|state| state.references.resolve(route, image));
    }

    /// Width available to the canvas and the current device pixel ratio.
    pub(crate) fn set_frame(&self, frame_width: f64, dpr: f64) {
        {
            let state = self.state.borrow();
            if state.frame_width == frame_width && state.dpr == dpr {
                return;
            }
        }
        self.mutate(|state| {
            state.frame_width = frame_width;
            state.dpr = dpr;
        });
    }

    pub(crate) fn toggle_fullscreen(&self) {
        self.mutate(|state| state.fullscreen = !state.fullscreen);
    }

    /// Leaves fullscreen and puts the map scale back to 100%.
    pub(crate) fn reset_fullscreen(&self) {
        self.mutate(|state| state.fullscreen = false);
        self.apply(|session| session.reset_map_scale());
    }

    pub(crate) fn draw(&self, canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
        let state = self.state.borrow();
        let route = state.session.route_index();
        let reference = state.references.get(route);
        let scene = build_scene(&state.session, reference.is_some());
        renderer::draw_frame(
            canvas,
            state.layout.as_ref(),
            state.map.as_ref(),
            reference,
            &scene,
        )
    }
}

pub(crate) struct AppSubscription {
    subscriber: AppSubscriber,
    subscribers: Rc<RefCell<Vec<AppSubscriber>>>,
}

impl Drop for AppSubscription {
    fn drop(&mut self) {
        let mut subscribers = self.subscribers.borrow_mut();
        subscribers.retain(|item| !Rc::ptr_eq(item, &self.subscriber));
    }
}

impl AppState {
    fn new(session: PracticeSession) -> Self {
        Self {
            session,
            map: None,
            references: ImageSlots::new(),
            layout: None,
            frame_width: 0.0,
            dpr: 1.0,
            fullscreen: false,
            feedback: Some(Feedback::IdealMode),
            revision: 0,
        }
    }

    fn refresh_layout(&mut self) {
        self.layout = self.map.as_ref().and_then(|map| {
            fit_canvas(
                f64::from(map.natural_width()),
                f64::from(map.natural_height()),
                self.frame_width,
                self.fullscreen,
                self.session.settings().map_scale,
                self.dpr,
            )
        });
        self.session
            .set_canvas(self.layout.and_then(|layout| layout.canvas()));
    }

    fn snapshot(&self) -> AppSnapshot {
        let session = &self.session;
        let route = session.route_index();
        let settings = session.settings().clone();
        let reference_beside = (settings.show_ref_side && self.references.is_ready(route))
            .then(|| route_entry(route).reference_src);
        AppSnapshot {
            revision: self.revision,
            mode: session.mode(),
            route,
            settings,
            toggles: toggle_views(session),
            ref_sliders: ref_slider_values(session),
            shift_limits: session.canvas().map(shift_limits),
            feedback: self.feedback,
            has_map: self.map.is_some(),
            fullscreen: self.fullscreen,
            reference_beside,
        }
    }
}
