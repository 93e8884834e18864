//! Build-time configuration for the backend endpoint with an optional runtime
//! override. In the browser the override is read from
//! `window.MENTORSHIP_CONFIG` so static deployments can retarget the backend
//! without rebuilding; natively it comes from the process environment.
//! Configuration values are public; do not store secrets here.

use std::time::Duration;

/// Environment variable naming the backend base URL, at build time and natively at runtime.
pub const API_BASE_URL_VAR: &str = "MENTORSHIP_API_BASE_URL";
/// Backend used when nothing is configured (local development server).
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api/v1";
/// Timeout applied to every backend request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Client configuration derived from build-time environment variables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub request_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        let api_base_url = option_env!("MENTORSHIP_API_BASE_URL")
            .and_then(normalize_runtime_value)
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        Self {
            api_base_url,
            request_timeout: REQUEST_TIMEOUT,
        }
    }
}

impl AppConfig {
    /// Loads config from build-time values and applies runtime overrides.
    #[must_use]
    pub fn load() -> Self {
        let mut config = Self::default();

        if let Some(runtime) = runtime_config() {
            apply_runtime_overrides(&mut config, runtime);
        }

        config
    }

    /// Config pointing at an explicit backend, used by tests and embedders.
    #[must_use]
    pub fn with_base_url(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            request_timeout: REQUEST_TIMEOUT,
        }
    }
}

#[derive(Default)]
struct RuntimeConfig {
    api_base_url: Option<String>,
}

fn apply_runtime_overrides(config: &mut AppConfig, runtime: RuntimeConfig) {
    if let Some(value) = runtime.api_base_url {
        config.api_base_url = value;
    }
}

#[cfg(target_arch = "wasm32")]
fn runtime_config() -> Option<RuntimeConfig> {
    use js_sys::{Object, Reflect};
    use wasm_bindgen::JsValue;

    let window = web_sys::window()?;
    let config = Reflect::get(&window, &JsValue::from_str("MENTORSHIP_CONFIG")).ok()?;
    if config.is_null() || config.is_undefined() {
        return None;
    }
    let object = Object::from(config);

    let api_base_url = Reflect::get(&object, &JsValue::from_str("api_base_url"))
        .ok()?
        .as_string()
        .and_then(|value| normalize_runtime_value(&value));

    Some(RuntimeConfig { api_base_url })
}

#[cfg(not(target_arch = "wasm32"))]
fn runtime_config() -> Option<RuntimeConfig> {
    let api_base_url = std::env::var(API_BASE_URL_VAR)
        .ok()
        .and_then(|value| normalize_runtime_value(&value));

    Some(RuntimeConfig { api_base_url })
}

fn normalize_runtime_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{
        apply_runtime_overrides, normalize_runtime_value, AppConfig, RuntimeConfig,
        API_BASE_URL_VAR, REQUEST_TIMEOUT,
    };

    #[test]
    fn normalize_runtime_value_trims_and_rejects_empty() {
        assert_eq!(normalize_runtime_value(""), None);
        assert_eq!(normalize_runtime_value("   "), None);
        assert_eq!(
            normalize_runtime_value("  https://api.mentorship.dev/api/v1 "),
            Some("https://api.mentorship.dev/api/v1".to_string())
        );
    }

    #[test]
    fn apply_runtime_overrides_ignores_missing_values() {
        let mut config = AppConfig::with_base_url("https://api.default");
        apply_runtime_overrides(
            &mut config,
            RuntimeConfig {
                api_base_url: normalize_runtime_value("  "),
            },
        );
        assert_eq!(config.api_base_url, "https://api.default");
    }

    #[test]
    fn load_prefers_process_environment() {
        temp_env::with_var(API_BASE_URL_VAR, Some(" https://api.override/api/v1 "), || {
            let config = AppConfig::load();
            assert_eq!(config.api_base_url, "https://api.override/api/v1");
            assert_eq!(config.request_timeout, REQUEST_TIMEOUT);
        });
    }

    #[test]
    fn load_falls_back_when_environment_is_blank() {
        temp_env::with_var(API_BASE_URL_VAR, Some(""), || {
            assert_eq!(AppConfig::load(), AppConfig::default());
        });
    }

    #[test]
    fn timeout_is_fifteen_seconds() {
        assert_eq!(AppConfig::default().request_timeout.as_secs(), 15);
    }
}
