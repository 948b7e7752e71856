use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{File, HtmlImageElement};

use crate::app_core::AppCore;
use route_recall_core::{route_entry, RouteIndex, DEFAULT_MAP_SRC};

/// Resolves once the browser has the image, or fails on a load error.
async fn load_image(src: &str) -> Result<HtmlImageElement, String> {
    let img = HtmlImageElement::new().map_err(|_| "failed to create image".to_string())?;
    let src_owned = src.to_string();
    let promise = js_sys::Promise::new(&mut |resolve, reject| {
        let onload = Closure::once(move || {
            let _ = resolve.call0(&JsValue::NULL);
        });
        let onerror = Closure::once(move || {
            let _ = reject.call1(&JsValue::NULL, &JsValue::from_str("image_load_failed"));
        });
        img.set_onload(Some(onload.as_ref().unchecked_ref()));
        img.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        img.set_src(&src_owned);
        onload.forget();
        onerror.forget();
    });
    JsFuture::from(promise)
        .await
        .map_err(|_| format!("failed to load image {src}"))?;
    img.set_onload(None);
    img.set_onerror(None);
    Ok(img)
}

/// Starts the bundled map and the three reference photos. Each load lands in
/// its own slot whenever it finishes; a missing file is only logged.
pub(crate) fn load_bundled(core: Rc<AppCore>) {
    {
        let core = core.clone();
        spawn_local(async move {
            match load_image(DEFAULT_MAP_SRC).await {
                Ok(image) => core.set_map(image),
                Err(err) => log_missing(&err),
            }
        });
    }
    for route in RouteIndex::all() {
        let core = core.clone();
        spawn_local(async move {
            match load_image(route_entry(route).reference_src).await {
                Ok(image) => core.set_reference(route, image),
                Err(err) => log_missing(&err),
            }
        });
    }
}

/// Replaces the map with a user supplied file.
pub(crate) fn load_uploaded_map(core: Rc<AppCore>, file: File) {
    spawn_local(async move {
        let url = match web_sys::Url::create_object_url_with_blob(&file) {
            Ok(url) => url,
            Err(_) => {
                log_missing("failed to read uploaded map");
                return;
            }
        };
        let result = load_image(&url).await;
        let _ = web_sys::Url::revoke_object_url(&url);
        match result {
            Ok(image) => core.set_map(image),
            Err(err) => log_missing(&err),
        }
    });
}

fn log_missing(err: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        gloo::console::log!("images:", err.to_string());
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = err;
}
