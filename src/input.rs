use web_sys::{DomRect, Element, HtmlCanvasElement};

use route_recall_core::Point;

pub(crate) trait HasClientRect {
    fn client_rect(&self) -> DomRect;
}

impl HasClientRect for HtmlCanvasElement {
    fn client_rect(&self) -> DomRect {
        self.get_bounding_client_rect()
    }
}

impl HasClientRect for Element {
    fn client_rect(&self) -> DomRect {
        self.get_bounding_client_rect()
    }
}

/// Pointer position relative to the element's top-left corner, in CSS
/// pixels. Paths are captured in this space.
pub(crate) fn client_to_canvas(client_x: f64, client_y: f64, element: &impl HasClientRect) -> Point {
    let rect = element.client_rect();
    offset_in_rect(client_x, client_y, rect.left(), rect.top())
}

fn offset_in_rect(client_x: f64, client_y: f64, left: f64, top: f64) -> Point {
    Point::new(client_x - left, client_y - top)
}

/// Width the canvas may fill, read from its container.
pub(crate) fn frame_width(element: &impl HasClientRect) -> f64 {
    element.client_rect().width().max(0.0)
}

pub(crate) fn device_pixel_ratio() -> f64 {
    web_sys::window()
        .map(|window| window.device_pixel_ratio())
        .filter(|dpr| dpr.is_finite() && *dpr > 0.0)
        .unwrap_or(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedRect(f64, f64, f64, f64);

    impl HasClientRect for FixedRect {
        fn client_rect(&self) -> DomRect {
            DomRect::new_with_x_and_y_and_width_and_height(self.0, self.1, self.2, self.3)
                .unwrap()
        }
    }

    #[test]
    fn offsets_are_relative_to_rect_origin() {
        assert_eq!(offset_in_rect(130.0, 75.5, 30.0, 25.5), Point::new(100.0, 50.0));
        assert_eq!(offset_in_rect(10.0, 10.0, 30.0, 25.0), Point::new(-20.0, -15.0));
    }

    #[wasm_bindgen_test::wasm_bindgen_test]
    fn client_coords_map_into_element() {
        let rect = FixedRect(40.0, 60.0, 800.0, 600.0);
        assert_eq!(client_to_canvas(440.0, 360.0, &rect), Point::new(400.0, 300.0));
        assert_eq!(frame_width(&rect), 800.0);
    }
}
