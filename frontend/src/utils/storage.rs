use web_sys::{Storage, Window};

/// Browser window. Host builds (SSR and native tests) never have one.
pub fn window() -> Result<Window, String> {
    if cfg!(not(target_arch = "wasm32")) {
        return Err("No window object".to_string());
    }
    web_sys::window().ok_or_else(|| "No window object".to_string())
}

pub fn local_storage() -> Result<Storage, String> {
    window()?
        .local_storage()
        .map_err(|_| "No localStorage".to_string())?
        .ok_or_else(|| "No localStorage".to_string())
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;

    #[test]
    fn host_build_has_no_browser_globals() {
        assert!(window().is_err());
        assert!(local_storage().is_err());
    }
}
