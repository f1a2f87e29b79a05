//! Синхронизация параметров адресной строки (`window.location.search`).
//!
//! The shell owns the `active` parameter (current tab); every other pair
//! belongs to the active tab's view.

pub use contracts::domain::a001_object::QueryPairs;
use web_sys::window;

pub const ACTIVE_PARAM: &str = "active";

pub fn parse_search(search: &str) -> QueryPairs {
    serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default()
}

/// `"?k=v&..."`, or an empty string for no pairs.
pub fn to_search(pairs: &QueryPairs) -> String {
    if pairs.is_empty() {
        return String::new();
    }
    match serde_qs::to_string(pairs) {
        Ok(qs) => format!("?{}", qs),
        Err(e) => {
            log::warn!("query not encoded: {}", e);
            String::new()
        }
    }
}

/// Splits the shell's tab key off the view parameters.
pub fn split_active(mut pairs: QueryPairs) -> (Option<String>, QueryPairs) {
    let active = pairs.remove(ACTIVE_PARAM);
    (active, pairs)
}

pub fn compose(active: Option<&str>, view_pairs: &QueryPairs) -> QueryPairs {
    let mut pairs = view_pairs.clone();
    if let Some(key) = active {
        pairs.insert(ACTIVE_PARAM.to_string(), key.to_string());
    }
    pairs
}

pub fn current_search() -> String {
    window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

pub fn read_location() -> QueryPairs {
    parse_search(&current_search())
}

/// Replaces the address bar query without adding a history entry.
pub fn replace_location(pairs: &QueryPairs) {
    let new_search = to_search(pairs);
    if current_search() == new_search {
        return;
    }
    let Some(w) = window() else {
        return;
    };
    let path = w.location().pathname().unwrap_or_default();
    if let Ok(history) = w.history() {
        let _ = history.replace_state_with_url(
            &wasm_bindgen::JsValue::NULL,
            "",
            Some(&format!("{}{}", path, new_search)),
        );
    }
}
