use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use route_recall_core::{ArrowMarker, CanvasLayout, OverlayTransform, Scene, Stroke};

/// Arrow head half-width as a fraction of its length.
const ARROW_SPREAD: f64 = 0.6;

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    Ok(canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("no 2d context"))?
        .dyn_into::<CanvasRenderingContext2d>()?)
}

/// Paints one frame: map, reference overlay, then the scene's strokes.
/// Without a map or layout the canvas is just cleared.
pub(crate) fn draw_frame(
    canvas: &HtmlCanvasElement,
    layout: Option<&CanvasLayout>,
    map: Option<&HtmlImageElement>,
    reference: Option<&HtmlImageElement>,
    scene: &Scene,
) -> Result<(), JsValue> {
    let ctx = context_2d(canvas)?;
    let (Some(layout), Some(map)) = (layout, map) else {
        ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
        ctx.clear_rect(0.0, 0.0, f64::from(canvas.width()), f64::from(canvas.height()));
        return Ok(());
    };
    apply_layout(canvas, &ctx, layout)?;
    ctx.clear_rect(0.0, 0.0, layout.css_width, layout.css_height);
    ctx.draw_image_with_html_image_element_and_dw_and_dh(
        map,
        0.0,
        0.0,
        layout.css_width,
        layout.css_height,
    )?;
    if let (Some(overlay), Some(image)) = (scene.overlay.as_ref(), reference) {
        draw_overlay(&ctx, overlay, image)?;
    }
    for stroke in &scene.strokes {
        draw_stroke(&ctx, stroke);
        for arrow in &stroke.arrows {
            draw_arrow(&ctx, arrow, stroke.role.css_color())?;
        }
    }
    Ok(())
}

/// Sizes the element in CSS pixels and the backing store in device pixels,
/// then scales drawing so scene coordinates stay in CSS pixels.
fn apply_layout(
    canvas: &HtmlCanvasElement,
    ctx: &CanvasRenderingContext2d,
    layout: &CanvasLayout,
) -> Result<(), JsValue> {
    let style = canvas.style();
    style.set_property("width", &format!("{}px", layout.css_width))?;
    style.set_property("height", &format!("{}px", layout.css_height))?;
    if canvas.width() != layout.backing_width {
        canvas.set_width(layout.backing_width);
    }
    if canvas.height() != layout.backing_height {
        canvas.set_height(layout.backing_height);
    }
    ctx.set_transform(layout.dpr, 0.0, 0.0, layout.dpr, 0.0, 0.0)
}

fn draw_overlay(
    ctx: &CanvasRenderingContext2d,
    overlay: &OverlayTransform,
    image: &HtmlImageElement,
) -> Result<(), JsValue> {
    ctx.save();
    ctx.set_global_alpha(overlay.opacity);
    let drawn = ctx
        .translate(overlay.center.x, overlay.center.y)
        .and_then(|_| ctx.rotate(overlay.rotate_rad))
        .and_then(|_| ctx.scale(overlay.scale, overlay.scale))
        .and_then(|_| {
            ctx.draw_image_with_html_image_element_and_dw_and_dh(
                image,
                overlay.dest_x,
                overlay.dest_y,
                overlay.dest_width,
                overlay.dest_height,
            )
        });
    ctx.restore();
    drawn
}

fn draw_stroke(ctx: &CanvasRenderingContext2d, stroke: &Stroke) {
    let Some((first, rest)) = stroke.points.split_first() else {
        return;
    };
    ctx.set_stroke_style_str(stroke.role.css_color());
    ctx.set_line_width(stroke.width);
    ctx.set_line_join("round");
    ctx.set_line_cap("round");
    ctx.begin_path();
    ctx.move_to(first.x, first.y);
    for point in rest {
        ctx.line_to(point.x, point.y);
    }
    ctx.stroke();
}

fn draw_arrow(
    ctx: &CanvasRenderingContext2d,
    arrow: &ArrowMarker,
    color: &str,
) -> Result<(), JsValue> {
    ctx.save();
    ctx.set_fill_style_str(color);
    let placed = ctx
        .translate(arrow.position.x, arrow.position.y)
        .and_then(|_| ctx.rotate(arrow.angle));
    if placed.is_ok() {
        let spread = arrow.size * ARROW_SPREAD;
        ctx.begin_path();
        ctx.move_to(0.0, 0.0);
        ctx.line_to(-arrow.size, spread);
        ctx.line_to(-arrow.size, -spread);
        ctx.close_path();
        ctx.fill();
    }
    ctx.restore();
    placed
}
