use crate::route::PathMode;
use crate::session::PracticeSession;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ButtonView {
    pub enabled: bool,
    pub label: &'static str,
}

impl ButtonView {
    const fn enabled(label: &'static str) -> Self {
        Self {
            enabled: true,
            label,
        }
    }

    const fn disabled(label: &'static str) -> Self {
        Self {
            enabled: false,
            label,
        }
    }
}

/// State of the three visibility toggles. Each is only live in one mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToggleViews {
    pub ideal_in_test: ButtonView,
    pub reference: ButtonView,
    pub reference_beside: ButtonView,
}

pub fn toggle_views(session: &PracticeSession) -> ToggleViews {
    let settings = session.settings();
    match session.mode() {
        PathMode::Ideal => ToggleViews {
            ideal_in_test: ButtonView::disabled("Ideal shown"),
            reference: ButtonView::enabled(if settings.show_ref {
                "Hide reference"
            } else {
                "Show reference"
            }),
            reference_beside: ButtonView::enabled(if settings.show_ref_side {
                "Hide beside"
            } else {
                "Reference beside"
            }),
        },
        PathMode::Test => ToggleViews {
            ideal_in_test: ButtonView::enabled(if settings.show_ideal_in_test {
                "Hide ideal"
            } else {
                "Show ideal"
            }),
            reference: ButtonView::disabled("Reference in ideal mode"),
            reference_beside: ButtonView::disabled("Reference beside"),
        },
    }
}

pub fn fullscreen_label(fullscreen: bool) -> &'static str {
    if fullscreen {
        "Exit fullscreen"
    } else {
        "Fullscreen"
    }
}

/// Slider positions for the active route's reference adjustment, in the
/// integer units the range inputs use.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RefSliderValues {
    pub opacity_percent: f64,
    pub scale_percent: f64,
    pub rotate_deg: f64,
    pub shift_x: f64,
    pub shift_y: f64,
}

pub fn ref_slider_values(session: &PracticeSession) -> RefSliderValues {
    let adjust = session.active_ref_adjust();
    RefSliderValues {
        opacity_percent: (adjust.opacity * 100.0).round(),
        scale_percent: (adjust.scale * 100.0).round(),
        rotate_deg: adjust.rotate.round(),
        shift_x: adjust.x.round(),
        shift_y: adjust.y.round(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggles_follow_mode() {
        let mut session = PracticeSession::new();
        let views = toggle_views(&session);
        assert!(!views.ideal_in_test.enabled);
        assert!(views.reference.enabled);
        assert_eq!(views.reference.label, "Hide reference");

        session.set_mode(PathMode::Test);
        let views = toggle_views(&session);
        assert!(views.ideal_in_test.enabled);
        assert_eq!(views.ideal_in_test.label, "Show ideal");
        assert!(!views.reference.enabled);
        assert!(!views.reference_beside.enabled);
    }

    #[test]
    fn sliders_use_percent_units() {
        let mut session = PracticeSession::new();
        session.set_ref_opacity(0.426);
        session.set_ref_scale(1.5);
        let values = ref_slider_values(&session);
        assert_eq!(values.opacity_percent, 43.0);
        assert_eq!(values.scale_percent, 150.0);
        assert_eq!(values.shift_x, 0.0);
    }
}
