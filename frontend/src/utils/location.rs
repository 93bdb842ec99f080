use super::storage::window;

/// Current URL fragment including the leading `#`, or an empty string.
pub fn current_fragment() -> String {
    window()
        .ok()
        .and_then(|w| w.location().hash().ok())
        .unwrap_or_default()
}

pub fn current_origin() -> Option<String> {
    window().ok().and_then(|w| w.location().origin().ok())
}

/// Drops the fragment from the address bar without reloading, so a bearer
/// token delivered in it does not linger in history.
pub fn scrub_fragment() {
    let Ok(win) = window() else {
        return;
    };
    let location = win.location();
    let (Ok(path), Ok(search)) = (location.pathname(), location.search()) else {
        return;
    };
    if let Ok(history) = win.history() {
        let clean = format!("{}{}", path, search);
        if history
            .replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&clean))
            .is_err()
        {
            log::warn!("Could not remove the reset token from the address bar");
        }
    }
}

/// Reloads the page with its current URL, fragment included.
pub fn reload() {
    if let Ok(win) = window() {
        if win.location().reload().is_err() {
            log::warn!("Page reload failed");
        }
    }
}
