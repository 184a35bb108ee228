use crate::models::AccountInfo;
use serde::{Deserialize, Serialize};

pub(crate) const TOKEN_KEY: &str = "creatorpulse_token";
pub(crate) const USER_KEY: &str = "creatorpulse_user";

/// Fallible token retrieval used when composing API requests.
///
/// The token is written by the login flow after the external auth provider
/// hands us back to the app. Any failure here (no window, storage access
/// denied) degrades to an unauthenticated request rather than an error.
pub(crate) fn session_token() -> Option<String> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|s| s.get_item(TOKEN_KEY).ok().flatten())
}

pub(crate) fn save_session_token(token: &str) {
    if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
        let _ = storage.set_item(TOKEN_KEY, token);
    }
}

pub(crate) fn clear_session() {
    if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
        let _ = storage.remove_item(TOKEN_KEY);
        let _ = storage.remove_item(USER_KEY);
    }
}

pub(crate) fn save_user_to_storage(user: &AccountInfo) {
    save_json_to_storage(USER_KEY, user);
}

pub(crate) fn load_user_from_storage() -> Option<AccountInfo> {
    load_json_from_storage(USER_KEY)
}

pub(crate) fn load_json_from_storage<T: for<'de> Deserialize<'de>>(key: &str) -> Option<T> {
    let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten())?;
    let json = storage.get_item(key).ok().flatten()?;
    serde_json::from_str(&json).ok()
}

pub(crate) fn save_json_to_storage<T: Serialize>(key: &str, value: &T) {
    if let Ok(json) = serde_json::to_string(value) {
        if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
            let _ = storage.set_item(key, &json);
        }
    }
}

// WASM-only tests (run with `cargo test --target wasm32-unknown-unknown` + wasm-bindgen-test-runner)
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn session_token_roundtrip() {
        clear_session();
        assert!(session_token().is_none());

        save_session_token("jwt-1");
        assert_eq!(session_token().as_deref(), Some("jwt-1"));

        clear_session();
        assert!(session_token().is_none());
    }

    #[wasm_bindgen_test]
    fn user_storage_roundtrip() {
        let user = AccountInfo {
            extra: serde_json::json!({"email": "creator@example.com", "name": "Creator"}),
        };
        save_user_to_storage(&user);
        let loaded = load_user_from_storage().expect("should load user from localStorage");
        assert_eq!(loaded.extra["email"], "creator@example.com");
        clear_session();
    }
}
