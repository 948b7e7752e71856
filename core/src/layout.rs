use crate::normalize::CanvasSize;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasLayout {
    pub css_width: f64,
    pub css_height: f64,
    pub backing_width: u32,
    pub backing_height: u32,
    pub dpr: f64,
}

impl CanvasLayout {
    /// Paths live in CSS pixels, so this is the size they normalize against.
    pub fn canvas(&self) -> Option<CanvasSize> {
        CanvasSize::new(self.css_width, self.css_height)
    }
}

/// Sizes the canvas for a map image of `natural_*` pixels inside a frame
/// `frame_width` wide. The map never scales up to fit; the user map scale
/// only applies in fullscreen.
pub fn fit_canvas(
    natural_width: f64,
    natural_height: f64,
    frame_width: f64,
    fullscreen: bool,
    map_scale_percent: f64,
    dpr: f64,
) -> Option<CanvasLayout> {
    if !(natural_width > 0.0 && natural_height > 0.0) {
        return None;
    }
    let fit = (frame_width / natural_width).min(1.0);
    let user = if fullscreen { map_scale_percent / 100.0 } else { 1.0 };
    let css_width = (natural_width * fit * user).round();
    let css_height = (natural_height * fit * user).round();
    let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
    Some(CanvasLayout {
        css_width,
        css_height,
        backing_width: (css_width * dpr).round().max(0.0) as u32,
        backing_height: (css_height * dpr).round().max(0.0) as u32,
        dpr,
    })
}
