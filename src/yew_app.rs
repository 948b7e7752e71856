use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use web_sys::{
    Element, Event, HtmlCanvasElement, HtmlInputElement, HtmlSelectElement, InputEvent,
    PointerEvent,
};
use yew::prelude::*;

use crate::app_core::AppCore;
use crate::images;
use crate::input::{client_to_canvas, device_pixel_ratio, frame_width};
use route_recall_core::reference::{
    REF_ROTATE_MAX_DEG, REF_ROTATE_MIN_DEG, REF_SCALE_MAX, REF_SCALE_MIN,
};
use route_recall_core::settings::{
    MAP_SCALE_PERCENT_MAX, MAP_SCALE_PERCENT_MIN, STROKE_MAX, STROKE_MIN, TOLERANCE_PERCENT_MAX,
    TOLERANCE_PERCENT_MIN,
};
use route_recall_core::{
    fullscreen_label, route_by_value, PathMode, PracticeSession, Update, ROUTE_CATALOG,
};

#[derive(Properties)]
pub(crate) struct AppProps {
    pub(crate) core: Rc<AppCore>,
}

impl PartialEq for AppProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.core, &other.core)
    }
}

type SessionOp = fn(&mut PracticeSession) -> Update;
type SessionValueOp = fn(&mut PracticeSession, f64) -> Update;
type SessionFlagOp = fn(&mut PracticeSession, bool) -> Update;

fn on_button(app_core: &Rc<AppCore>, op: SessionOp) -> Callback<MouseEvent> {
    let app_core = app_core.clone();
    Callback::from(move |_: MouseEvent| app_core.apply(op))
}

/// Range inputs report integers; `divisor` maps them back to the stored unit.
fn on_slider(app_core: &Rc<AppCore>, divisor: f64, op: SessionValueOp) -> Callback<InputEvent> {
    let app_core = app_core.clone();
    Callback::from(move |event: InputEvent| {
        let input: HtmlInputElement = event.target_unchecked_into();
        let Ok(value) = input.value().parse::<f64>() else {
            return;
        };
        app_core.apply(|session| op(session, value / divisor));
    })
}

fn on_checkbox(app_core: &Rc<AppCore>, op: SessionFlagOp) -> Callback<Event> {
    let app_core = app_core.clone();
    Callback::from(move |event: Event| {
        let input: HtmlInputElement = event.target_unchecked_into();
        let checked = input.checked();
        app_core.apply(|session| op(session, checked));
    })
}

fn pointer_target(event: &PointerEvent) -> Option<HtmlCanvasElement> {
    event
        .current_target()
        .and_then(|target| target.dyn_into::<HtmlCanvasElement>().ok())
}

fn measure_frame(app_core: &AppCore, frame_ref: &NodeRef) {
    if let Some(frame) = frame_ref.cast::<Element>() {
        app_core.set_frame(frame_width(&frame), device_pixel_ratio());
    }
}

fn set_body_fullscreen(fullscreen: bool) {
    let Some(body) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.body())
    else {
        return;
    };
    let _ = body.class_list().toggle_with_force("fullscreen", fullscreen);
}

fn fmt_value(value: f64) -> String {
    format!("{}", value.round())
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    let app_core = props.core.clone();
    let snapshot = use_state(|| app_core.snapshot());
    let canvas_ref = use_node_ref();
    let frame_ref = use_node_ref();

    {
        let app_core = app_core.clone();
        let snapshot = snapshot.clone();
        use_effect_with((), move |_| {
            let app_core_for_cb = app_core.clone();
            let subscription = app_core.subscribe(Rc::new(move || {
                snapshot.set(app_core_for_cb.snapshot());
            }));
            move || drop(subscription)
        });
    }

    {
        let app_core = app_core.clone();
        let frame_ref = frame_ref.clone();
        use_effect_with((snapshot.fullscreen, snapshot.has_map), move |(fullscreen, _)| {
            set_body_fullscreen(*fullscreen);
            measure_frame(&app_core, &frame_ref);
            let listener = web_sys::window().map(|window| {
                let app_core = app_core.clone();
                let frame_ref = frame_ref.clone();
                EventListener::new(&window, "resize", move |_| {
                    measure_frame(&app_core, &frame_ref);
                })
            });
            move || drop(listener)
        });
    }

    {
        let canvas_ref = canvas_ref.clone();
        use_effect_with((), move |_| {
            let mut listeners = Vec::new();
            if let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() {
                for kind in ["touchstart", "touchmove", "touchend"] {
                    listeners.push(EventListener::new_with_options(
                        &canvas,
                        kind,
                        EventListenerOptions::enable_prevent_default(),
                        |event: &Event| event.prevent_default(),
                    ));
                }
            }
            move || drop(listeners)
        });
    }

    {
        let app_core = app_core.clone();
        let canvas_ref = canvas_ref.clone();
        use_effect_with(snapshot.revision, move |_| {
            if let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() {
                if let Err(err) = app_core.draw(&canvas) {
                    gloo::console::warn!("render failed", err);
                }
            }
        });
    }

    let on_pointer_down = {
        let app_core = app_core.clone();
        Callback::from(move |event: PointerEvent| {
            let Some(canvas) = pointer_target(&event) else {
                return;
            };
            event.prevent_default();
            let point = client_to_canvas(f64::from(event.client_x()), f64::from(event.client_y()), &canvas);
            if app_core.wants_pointer_capture() {
                let _ = canvas.set_pointer_capture(event.pointer_id());
            }
            app_core.apply(|session| session.pointer_down(point));
        })
    };
    let on_pointer_move = {
        let app_core = app_core.clone();
        Callback::from(move |event: PointerEvent| {
            if !app_core.wants_motion() {
                return;
            }
            let Some(canvas) = pointer_target(&event) else {
                return;
            };
            event.prevent_default();
            let point = client_to_canvas(f64::from(event.client_x()), f64::from(event.client_y()), &canvas);
            app_core.apply(|session| session.pointer_move(point));
        })
    };
    let on_pointer_up = {
        let app_core = app_core.clone();
        Callback::from(move |_: PointerEvent| app_core.apply(|session| session.pointer_up()))
    };
    let on_pointer_leave = {
        let app_core = app_core.clone();
        Callback::from(move |_: PointerEvent| app_core.apply(|session| session.pointer_leave()))
    };

    let on_mode_ideal = {
        let app_core = app_core.clone();
        Callback::from(move |_: MouseEvent| app_core.apply(|session| session.set_mode(PathMode::Ideal)))
    };
    let on_mode_test = {
        let app_core = app_core.clone();
        Callback::from(move |_: MouseEvent| app_core.apply(|session| session.set_mode(PathMode::Test)))
    };
    let on_route_change = {
        let app_core = app_core.clone();
        Callback::from(move |event: Event| {
            let select: HtmlSelectElement = event.target_unchecked_into();
            if let Some(route) = route_by_value(&select.value()) {
                app_core.apply(|session| session.set_route(route));
            }
        })
    };
    let on_map_file = {
        let app_core = app_core.clone();
        Callback::from(move |event: Event| {
            let input: HtmlInputElement = event.target_unchecked_into();
            if let Some(file) = input.files().and_then(|files| files.get(0)) {
                images::load_uploaded_map(app_core.clone(), file);
            }
        })
    };
    let on_toggle_fullscreen = {
        let app_core = app_core.clone();
        Callback::from(move |_: MouseEvent| app_core.toggle_fullscreen())
    };
    let on_reset_fullscreen = {
        let app_core = app_core.clone();
        Callback::from(move |_: MouseEvent| app_core.reset_fullscreen())
    };

    let on_stroke = on_slider(&app_core, 1.0, PracticeSession::set_stroke);
    let on_tolerance = on_slider(&app_core, 1.0, PracticeSession::set_tolerance);
    let on_map_scale = on_slider(&app_core, 1.0, PracticeSession::set_map_scale);
    let on_ref_opacity = on_slider(&app_core, 100.0, PracticeSession::set_ref_opacity);
    let on_ref_scale = on_slider(&app_core, 100.0, PracticeSession::set_ref_scale);
    let on_ref_rotate = on_slider(&app_core, 1.0, PracticeSession::set_ref_rotate);
    let on_ref_shift_x = on_slider(&app_core, 1.0, PracticeSession::set_ref_shift_x);
    let on_ref_shift_y = on_slider(&app_core, 1.0, PracticeSession::set_ref_shift_y);
    let on_click_to_draw = on_checkbox(&app_core, PracticeSession::set_click_to_draw);
    let on_smooth_path = on_checkbox(&app_core, PracticeSession::set_smooth_path);
    let on_ref_adjust_mode = on_checkbox(&app_core, PracticeSession::set_ref_adjust_mode);
    let on_ref_reset = on_button(&app_core, PracticeSession::reset_ref_adjust);
    let on_clear_current = on_button(&app_core, PracticeSession::clear_current);
    let on_clear_ideal = on_button(&app_core, PracticeSession::clear_ideal);
    let on_clear_all = on_button(&app_core, PracticeSession::clear_all);
    let on_toggle_ideal = on_button(&app_core, PracticeSession::toggle_ideal_in_test);
    let on_toggle_ref = on_button(&app_core, PracticeSession::toggle_reference);
    let on_toggle_ref_side = on_button(&app_core, PracticeSession::toggle_reference_beside);

    let snap = &*snapshot;
    let settings = &snap.settings;
    let sliders = snap.ref_sliders;
    let (shift_max_x, shift_max_y) = snap.shift_limits.unwrap_or((0.0, 0.0));
    let route_options: Html = ROUTE_CATALOG
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            html! {
                <option value={index.to_string()} selected={index == snap.route.get()}>
                    {entry.label}
                </option>
            }
        })
        .collect();
    let feedback = snap
        .feedback
        .map(|feedback| feedback.to_string())
        .unwrap_or_default();
    let empty_hint = if snap.has_map {
        html! {}
    } else {
        html! {
            <div class="empty-hint">{ "Load a map image to start drawing" }</div>
        }
    };
    let reference_beside = if let Some(src) = snap.reference_beside {
        html! {
            <div class="ref-side active">
                <img src={src} alt="Reference" />
            </div>
        }
    } else {
        html! {}
    };

    html! {
        <div class="app">
            <div class="controls">
                <div class="control">
                    <label for="map-input">{ "Map image" }</label>
                    <input id="map-input" type="file" accept="image/*" onchange={on_map_file} />
                </div>
                <div class="control mode">
                    <button
                        class={classes!((snap.mode == PathMode::Ideal).then_some("active"))}
                        onclick={on_mode_ideal}
                    >
                        { "Ideal" }
                    </button>
                    <button
                        class={classes!((snap.mode == PathMode::Test).then_some("active"))}
                        onclick={on_mode_test}
                    >
                        { "Test" }
                    </button>
                </div>
                <div class="control">
                    <label for="route-select">{ "Route" }</label>
                    <select id="route-select" onchange={on_route_change}>
                        {route_options}
                    </select>
                </div>
                <div class="control">
                    <label for="stroke-size">
                        { "Stroke" }
                        <span class="control-value">{ fmt_value(settings.stroke) }</span>
                    </label>
                    <input
                        id="stroke-size"
                        type="range"
                        min={STROKE_MIN.to_string()}
                        max={STROKE_MAX.to_string()}
                        step="1"
                        value={settings.stroke.to_string()}
                        oninput={on_stroke}
                    />
                </div>
                <div class="control">
                    <label for="tolerance">
                        { "Tolerance %" }
                        <span class="control-value">{ fmt_value(settings.tolerance) }</span>
                    </label>
                    <input
                        id="tolerance"
                        type="range"
                        min={TOLERANCE_PERCENT_MIN.to_string()}
                        max={TOLERANCE_PERCENT_MAX.to_string()}
                        step="1"
                        value={settings.tolerance.to_string()}
                        oninput={on_tolerance}
                    />
                </div>
                <div class="control">
                    <label>
                        <input
                            type="checkbox"
                            checked={settings.click_to_draw}
                            onchange={on_click_to_draw}
                        />
                        { "Click to start and finish" }
                    </label>
                    <label>
                        <input
                            type="checkbox"
                            checked={settings.smooth_path}
                            onchange={on_smooth_path}
                        />
                        { "Smooth path" }
                    </label>
                </div>
                <div class="control toggles">
                    <button
                        disabled={!snap.toggles.ideal_in_test.enabled}
                        onclick={on_toggle_ideal}
                    >
                        { snap.toggles.ideal_in_test.label }
                    </button>
                    <button disabled={!snap.toggles.reference.enabled} onclick={on_toggle_ref}>
                        { snap.toggles.reference.label }
                    </button>
                    <button
                        disabled={!snap.toggles.reference_beside.enabled}
                        onclick={on_toggle_ref_side}
                    >
                        { snap.toggles.reference_beside.label }
                    </button>
                </div>
                <div class="control reference">
                    <label>
                        <input
                            type="checkbox"
                            checked={settings.ref_adjust_mode}
                            onchange={on_ref_adjust_mode}
                        />
                        { "Drag reference" }
                    </label>
                    <label for="ref-opacity">
                        { "Opacity %" }
                        <span class="control-value">{ fmt_value(sliders.opacity_percent) }</span>
                    </label>
                    <input
                        id="ref-opacity"
                        type="range"
                        min="0"
                        max="100"
                        step="1"
                        value={sliders.opacity_percent.to_string()}
                        oninput={on_ref_opacity}
                    />
                    <label for="ref-scale">
                        { "Scale %" }
                        <span class="control-value">{ fmt_value(sliders.scale_percent) }</span>
                    </label>
                    <input
                        id="ref-scale"
                        type="range"
                        min={(REF_SCALE_MIN * 100.0).to_string()}
                        max={(REF_SCALE_MAX * 100.0).to_string()}
                        step="1"
                        value={sliders.scale_percent.to_string()}
                        oninput={on_ref_scale}
                    />
                    <label for="ref-rotate">
                        { "Rotate" }
                        <span class="control-value">{ fmt_value(sliders.rotate_deg) }</span>
                    </label>
                    <input
                        id="ref-rotate"
                        type="range"
                        min={REF_ROTATE_MIN_DEG.to_string()}
                        max={REF_ROTATE_MAX_DEG.to_string()}
                        step="1"
                        value={sliders.rotate_deg.to_string()}
                        oninput={on_ref_rotate}
                    />
                    <label for="ref-shift-x">{ "Shift X" }</label>
                    <input
                        id="ref-shift-x"
                        type="range"
                        min={(-shift_max_x).to_string()}
                        max={shift_max_x.to_string()}
                        step="1"
                        value={sliders.shift_x.to_string()}
                        oninput={on_ref_shift_x}
                    />
                    <label for="ref-shift-y">{ "Shift Y" }</label>
                    <input
                        id="ref-shift-y"
                        type="range"
                        min={(-shift_max_y).to_string()}
                        max={shift_max_y.to_string()}
                        step="1"
                        value={sliders.shift_y.to_string()}
                        oninput={on_ref_shift_y}
                    />
                    <button onclick={on_ref_reset}>{ "Reset reference" }</button>
                </div>
                <div class="control">
                    <label for="map-scale">
                        { "Map scale %" }
                        <span class="control-value">{ fmt_value(settings.map_scale) }</span>
                    </label>
                    <input
                        id="map-scale"
                        type="range"
                        min={MAP_SCALE_PERCENT_MIN.to_string()}
                        max={MAP_SCALE_PERCENT_MAX.to_string()}
                        step="5"
                        value={settings.map_scale.to_string()}
                        oninput={on_map_scale}
                    />
                    <button onclick={on_toggle_fullscreen}>{ fullscreen_label(snap.fullscreen) }</button>
                    <button onclick={on_reset_fullscreen}>{ "Reset view" }</button>
                </div>
                <div class="control clear">
                    <button onclick={on_clear_current}>{ "Clear current" }</button>
                    <button onclick={on_clear_ideal}>{ "Clear ideal" }</button>
                    <button onclick={on_clear_all}>{ "Clear all routes" }</button>
                </div>
            </div>
            <div class="stage">
                <div
                    class={classes!("canvas-wrap", snap.fullscreen.then_some("fullscreen"))}
                    ref={frame_ref}
                >
                    <canvas
                        ref={canvas_ref}
                        onpointerdown={on_pointer_down}
                        onpointermove={on_pointer_move}
                        onpointerup={on_pointer_up}
                        onpointerleave={on_pointer_leave}
                    />
                    {empty_hint}
                </div>
                {reference_beside}
            </div>
            <div class="result">{ feedback }</div>
        </div>
    }
}

pub(crate) fn run_app(core: Rc<AppCore>) {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };
    let root = document
        .get_element_by_id("app-root")
        .or_else(|| document.body().map(Element::from));
    let Some(root) = root else {
        return;
    };
    let _app_handle = yew::Renderer::<App>::with_root_and_props(root, AppProps { core }).render();
}
