use web_sys::Storage;

use route_recall_core::{from_json, to_json, PersistedState, STORE_KEY};

fn local_storage() -> Result<Storage, String> {
    let window = web_sys::window().ok_or_else(|| "window unavailable".to_string())?;
    window
        .local_storage()
        .map_err(js_err)?
        .ok_or_else(|| "local storage unavailable".to_string())
}

fn js_err(err: wasm_bindgen::JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

/// Reads the saved blob. Anything unreadable falls back to defaults; fields
/// that were dropped are logged.
pub(crate) fn load_state() -> PersistedState {
    match try_load_state() {
        Ok(Some(state)) => state,
        Ok(None) => PersistedState::default(),
        Err(err) => {
            #[cfg(target_arch = "wasm32")]
            {
                gloo::console::warn!("persisted state: load failed", err);
            }
            #[cfg(not(target_arch = "wasm32"))]
            let _ = err;
            PersistedState::default()
        }
    }
}

fn try_load_state() -> Result<Option<PersistedState>, String> {
    let storage = local_storage()?;
    let Some(raw) = storage.get_item(STORE_KEY).map_err(js_err)? else {
        return Ok(None);
    };
    if raw.is_empty() {
        return Ok(None);
    }
    let (state, report) = from_json(&raw).map_err(|err| err.to_string())?;
    if !report.is_clean() {
        #[cfg(target_arch = "wasm32")]
        {
            gloo::console::warn!(
                "persisted state: reset fields",
                report.rejected.join(", ")
            );
        }
    }
    Ok(Some(state))
}

pub(crate) fn save_state(state: &PersistedState) {
    if let Err(err) = try_save_state(state) {
        #[cfg(target_arch = "wasm32")]
        {
            gloo::console::warn!("persisted state: save failed", err);
        }
        #[cfg(not(target_arch = "wasm32"))]
        let _ = err;
    }
}

fn try_save_state(state: &PersistedState) -> Result<(), String> {
    let raw = to_json(state).map_err(|err| err.to_string())?;
    local_storage()?.set_item(STORE_KEY, &raw).map_err(js_err)
}
