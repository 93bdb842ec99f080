use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::{sync::OnceLock, time::Duration};

pub const DEFAULT_AUTH_URL: &str = "http://localhost:54321/auth/v1";
pub const DEFAULT_LOGIN_PATH: &str = "/admin";
pub const DEFAULT_FORGOT_PASSWORD_PATH: &str = "/admin/forgot-password";
pub const DEFAULT_RESET_PASSWORD_PATH: &str = "/admin/reset-password";
pub const DEFAULT_SUCCESS_REDIRECT_DELAY_MS: u64 = 3_000;
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 15_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Base URL of the auth provider, e.g. `https://<project>.supabase.co/auth/v1`.
    pub auth_url: String,
    /// Public API key sent as the `apikey` header.
    pub anon_key: Option<String>,
    /// Origin used to build the link embedded in reset emails. Falls back to
    /// the current page origin.
    pub site_url: Option<String>,
    pub login_path: String,
    pub forgot_password_path: String,
    pub reset_password_path: String,
    pub success_redirect_delay_ms: u64,
    pub request_timeout_ms: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            auth_url: DEFAULT_AUTH_URL.to_string(),
            anon_key: None,
            site_url: None,
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            forgot_password_path: DEFAULT_FORGOT_PASSWORD_PATH.to_string(),
            reset_password_path: DEFAULT_RESET_PASSWORD_PATH.to_string(),
            success_redirect_delay_ms: DEFAULT_SUCCESS_REDIRECT_DELAY_MS,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
        }
    }
}

impl RuntimeConfig {
    pub fn success_redirect_delay(&self) -> Duration {
        Duration::from_millis(self.success_redirect_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Cleans up values loaded from untrusted globals or `config.json`:
    /// trailing slashes, blank keys and relative route paths. Page paths may
    /// not be `/` (it redirects to login) and may not share a route.
    pub fn normalized(mut self) -> Self {
        let defaults = Self::default();
        self.auth_url = self.auth_url.trim().trim_end_matches('/').to_string();
        if self.auth_url.is_empty() {
            self.auth_url = defaults.auth_url;
        }
        self.anon_key = self.anon_key.filter(|k| !k.trim().is_empty());
        self.site_url = self
            .site_url
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty());
        self.login_path = normalize_path(&self.login_path, &defaults.login_path);
        self.forgot_password_path =
            normalize_path(&self.forgot_password_path, &defaults.forgot_password_path);
        self.reset_password_path =
            normalize_path(&self.reset_password_path, &defaults.reset_password_path);
        if self.login_path == self.forgot_password_path
            || self.login_path == self.reset_password_path
            || self.forgot_password_path == self.reset_password_path
        {
            log::warn!("Configured page paths collide; using default routes");
            self.login_path = defaults.login_path;
            self.forgot_password_path = defaults.forgot_password_path;
            self.reset_password_path = defaults.reset_password_path;
        }
        if self.request_timeout_ms == 0 {
            self.request_timeout_ms = defaults.request_timeout_ms;
        }
        self
    }

    /// Absolute URL the reset email should link back to.
    pub fn reset_redirect_url(&self, page_origin: Option<&str>) -> Option<String> {
        let origin = self
            .site_url
            .as_deref()
            .or(page_origin)
            .map(|o| o.trim_end_matches('/'))
            .filter(|o| !o.is_empty())?;
        Some(format!("{}{}", origin, self.reset_password_path))
    }
}

fn normalize_path(value: &str, fallback: &str) -> String {
    let trimmed = value.trim().trim_matches('/');
    if trimmed.is_empty() {
        return fallback.to_string();
    }
    format!("/{}", trimmed)
}

static RUNTIME_CONFIG: OnceLock<RuntimeConfig> = OnceLock::new();

fn cache_config(cfg: RuntimeConfig) -> RuntimeConfig {
    RUNTIME_CONFIG.get_or_init(|| cfg).clone()
}

/// Resolved configuration, or defaults when [`init`] has not completed.
pub fn current() -> RuntimeConfig {
    RUNTIME_CONFIG.get().cloned().unwrap_or_default()
}

pub async fn await_runtime_config() -> RuntimeConfig {
    if let Some(cached) = RUNTIME_CONFIG.get() {
        return cached.clone();
    }
    if let Some(existing) = browser::snapshot_from_globals() {
        return cache_config(existing.normalized());
    }
    match browser::fetch_runtime_config().await {
        Ok(cfg) => {
            browser::write_window_config(&cfg);
            cache_config(cfg.normalized())
        }
        Err(err) => {
            log::warn!("Falling back to default runtime config: {:#}", err);
            cache_config(RuntimeConfig::default())
        }
    }
}

pub async fn init() {
    let cfg = await_runtime_config().await;
    log::info!(
        "Runtime config resolved (auth_url={}, anon_key={})",
        cfg.auth_url,
        if cfg.anon_key.is_some() { "set" } else { "unset" }
    );
}

mod browser {
    use super::*;
    use wasm_bindgen::JsValue;

    const ENV_GLOBAL: &str = "__ADMIN_CONSOLE_ENV";
    const CONFIG_GLOBAL: &str = "__ADMIN_CONSOLE_CONFIG";

    fn read_global(name: &str) -> Option<RuntimeConfig> {
        let window = crate::utils::storage::window().ok()?;
        let any = js_sys::Reflect::get(&window, &name.into()).ok()?;
        if any.is_undefined() || any.is_null() {
            return None;
        }
        let json = js_sys::JSON::stringify(&any).ok()?.as_string()?;
        serde_json::from_str::<RuntimeConfig>(&json)
            .map_err(|err| log::warn!("Ignoring malformed window.{}: {}", name, err))
            .ok()
    }

    pub(super) fn snapshot_from_globals() -> Option<RuntimeConfig> {
        read_global(ENV_GLOBAL).or_else(|| read_global(CONFIG_GLOBAL))
    }

    pub(super) fn write_window_config(cfg: &RuntimeConfig) {
        let Ok(window) = crate::utils::storage::window() else {
            return;
        };
        let Ok(json) = serde_json::to_string(cfg) else {
            return;
        };
        if let Ok(value) = js_sys::JSON::parse(&json) {
            let _ = js_sys::Reflect::set(&window, &JsValue::from_str(CONFIG_GLOBAL), &value);
        }
    }

    fn config_json_url() -> anyhow::Result<String> {
        let window = crate::utils::storage::window().map_err(anyhow::Error::msg)?;
        let href = window
            .location()
            .href()
            .map_err(|_| anyhow::anyhow!("window.location.href is unavailable"))?;
        let base = url::Url::parse(&href).context("page URL is not absolute")?;
        Ok(base.join("./config.json")?.to_string())
    }

    pub(super) async fn fetch_runtime_config() -> anyhow::Result<RuntimeConfig> {
        let url = config_json_url()?;
        let resp = reqwest::get(&url)
            .await
            .with_context(|| format!("failed to fetch {}", url))?;
        if !resp.status().is_success() {
            bail!("{} returned {}", url, resp.status());
        }
        resp.json::<RuntimeConfig>()
            .await
            .context("config.json is not a valid runtime config")
    }
}
