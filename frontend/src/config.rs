use serde::{Deserialize, Serialize};
use std::{sync::OnceLock, time::Duration};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";
pub const API_BASE_URL_ENV: &str = "API_BASE_URL";

/// Lets the logout dismissal animation finish before the session is dropped.
pub const LOGOUT_ANIMATION_DELAY: Duration = Duration::from_millis(500);
pub const MODAL_OPEN_DELAY: Duration = Duration::from_millis(10);
pub const MODAL_CLOSE_DELAY: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub api_base_url: Option<String>,
}

static API_BASE_URL: OnceLock<String> = OnceLock::new();

fn cache_base_url(value: &str) -> String {
    let value = value.trim_end_matches('/').to_string();
    let _ = API_BASE_URL.set(value.clone());
    API_BASE_URL.get().cloned().unwrap_or(value)
}

#[cfg(target_arch = "wasm32")]
mod source {
    use super::RuntimeConfig;

    fn read_key(obj: &js_sys::Object, key: &str) -> Option<String> {
        js_sys::Reflect::get(obj, &key.into())
            .ok()
            .filter(|v| !v.is_undefined() && !v.is_null())
            .and_then(|v| v.as_string())
    }

    // Optional global written by env.js: window.__DASHBOARD_ENV = { API_BASE_URL: "..." }
    pub fn from_globals() -> Option<String> {
        let window = web_sys::window()?;
        let any = js_sys::Reflect::get(&window, &"__DASHBOARD_ENV".into()).ok()?;
        if any.is_undefined() || any.is_null() {
            return None;
        }
        let obj = js_sys::Object::from(any);
        read_key(&obj, "API_BASE_URL").or_else(|| read_key(&obj, "api_base_url"))
    }

    pub async fn fetch_runtime_config() -> Option<RuntimeConfig> {
        let origin = web_sys::window()?.location().origin().ok()?;
        let resp = reqwest::get(format!("{}/config.json", origin)).await.ok()?;
        if !resp.status().is_success() {
            return None;
        }
        resp.json::<RuntimeConfig>().await.ok()
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod source {
    use super::{RuntimeConfig, API_BASE_URL_ENV};

    pub fn from_globals() -> Option<String> {
        std::env::var(API_BASE_URL_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())
    }

    pub async fn fetch_runtime_config() -> Option<RuntimeConfig> {
        None
    }
}

/// Resolves the backend base URL once: globals/env first, then
/// `config.json`, then [`DEFAULT_API_BASE_URL`].
pub async fn await_api_base_url() -> String {
    if let Some(cached) = API_BASE_URL.get() {
        return cached.clone();
    }
    if let Some(existing) = source::from_globals() {
        log::debug!("api base url taken from environment");
        return cache_base_url(&existing);
    }
    if let Some(url) = source::fetch_runtime_config()
        .await
        .and_then(|cfg| cfg.api_base_url)
    {
        log::debug!("api base url taken from config.json");
        return cache_base_url(&url);
    }
    cache_base_url(DEFAULT_API_BASE_URL)
}

pub async fn init() {
    let url = await_api_base_url().await;
    log::info!("runtime config initialized (api: {url})");
}
