//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs.

use std::sync::atomic::{AtomicU16, Ordering};

/// Порт backend по умолчанию
pub const DEFAULT_API_PORT: u16 = 3000;

static API_PORT: AtomicU16 = AtomicU16::new(DEFAULT_API_PORT);

/// Переопределяет порт backend (из `AppConfig`).
pub fn set_api_port(port: u16) {
    API_PORT.store(port, Ordering::Relaxed);
}

/// Get the base URL for API requests
///
/// Constructs the API base URL from the current window location,
/// using the configured backend port (3000 unless overridden).
///
/// # Returns
/// - API base URL like "http://localhost:3000"
/// - Empty string if window is not available
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    base_for(&protocol, &hostname, API_PORT.load(Ordering::Relaxed))
}

fn base_for(protocol: &str, hostname: &str, port: u16) -> String {
    format!("{}//{}:{}", protocol, hostname, port)
}

/// Build a full API URL from a path
///
/// # Example
/// ```rust,ignore
/// let url = api_url("/api/catalog/objects/42");
/// ```
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// Query string from ordered pairs, values percent-encoded.
pub fn query_string<K, V>(pairs: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    pairs
        .iter()
        .map(|(k, v)| {
            format!(
                "{}={}",
                urlencoding::encode(k.as_ref()),
                urlencoding::encode(v.as_ref())
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_for() {
        assert_eq!(base_for("https:", "plant.local", 3000), "https://plant.local:3000");
    }

    #[test]
    fn test_query_string_encodes_values() {
        let qs = query_string(&[("page", "2"), ("org_name", "Цех 1")]);
        assert_eq!(qs, "page=2&org_name=%D0%A6%D0%B5%D1%85%201");
        assert_eq!(query_string::<&str, &str>(&[]), "");
    }
}
