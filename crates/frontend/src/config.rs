use gloo_net::http::Request;
use serde::Deserialize;
use serde_json::Value;

/// Режим клиента. В `MAIN` зоны и титулы WBS не используются.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ClientMode {
    Main,
    #[serde(other)]
    Standard,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AppConfig {
    pub client: ClientMode,
    pub api_port: u16,
    pub list_page_size: u32,
    pub scroll_restore_delay_ms: u32,
}

impl AppConfig {
    pub fn is_main_mode(&self) -> bool {
        self.client == ClientMode::Main
    }

    /// Зоны и титулы WBS показываются только вне режима `MAIN`.
    pub fn uses_zones(&self) -> bool {
        !self.is_main_mode()
    }
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"{
    "client": "STANDARD",
    "api_port": 3000,
    "list_page_size": 50,
    "scroll_restore_delay_ms": 500
}"#;

/// Keys present in `overlay` replace the embedded defaults.
fn merge(overlay: Option<Value>) -> Result<AppConfig, serde_json::Error> {
    let mut config: Value = serde_json::from_str(DEFAULT_CONFIG)?;
    if let (Some(Value::Object(over)), Value::Object(base)) = (overlay, &mut config) {
        for (k, v) in over {
            base.insert(k, v);
        }
    }
    serde_json::from_value(config)
}

pub fn default_config() -> AppConfig {
    match merge(None) {
        Ok(config) => config,
        Err(e) => panic!("embedded config is invalid: {e}"),
    }
}

/// Load configuration
///
/// Search order:
/// 1. `/config.json` served next to the application
/// 2. Falls back to embedded default config
pub async fn load_config() -> AppConfig {
    let overlay = match Request::get("/config.json").send().await {
        Ok(resp) if resp.ok() => match resp.json::<Value>().await {
            Ok(v) => Some(v),
            Err(e) => {
                log::warn!("config.json is not valid JSON: {}", e);
                None
            }
        },
        Ok(resp) => {
            log::info!("config.json not found ({}), using defaults", resp.status());
            None
        }
        Err(e) => {
            log::info!("config.json unavailable: {}", e);
            None
        }
    };

    match merge(overlay) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("config.json rejected: {}", e);
            default_config()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = default_config();
        assert_eq!(config.client, ClientMode::Standard);
        assert_eq!(config.api_port, 3000);
        assert_eq!(config.scroll_restore_delay_ms, 500);
        assert!(config.uses_zones());
    }

    #[test]
    fn test_override_replaces_only_given_keys() {
        let config = merge(Some(serde_json::json!({ "client": "MAIN" }))).unwrap();
        assert!(config.is_main_mode());
        assert!(!config.uses_zones());
        assert_eq!(config.list_page_size, 50);
    }

    #[test]
    fn test_unknown_client_is_standard() {
        let config = merge(Some(serde_json::json!({ "client": "CONTRACTOR" }))).unwrap();
        assert_eq!(config.client, ClientMode::Standard);
    }

    #[test]
    fn test_bad_override_is_an_error() {
        assert!(merge(Some(serde_json::json!({ "api_port": "x" }))).is_err());
    }
}
