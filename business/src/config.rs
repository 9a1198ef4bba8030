use std::env::vars;
use std::time::Duration;

use anyhow::Context as _;
use log::info;
use serde::Deserialize;
use ustr::Ustr;

/// Prefix shared by every environment override.
const ENV_PREFIX: &str = "LOANPAY";

const DEFAULT_LOGOUT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct BusinessConfig {
    pub api_base_url: String,
    /// Upper bound for the best-effort logout notification.
    pub logout_timeout: Duration,
}

/// Environment overrides, read from `LOANPAY_*` variables.
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    api_base_url: Option<String>,
    logout_timeout_secs: Option<u64>,
}

impl BusinessConfig {
    pub fn new(base_url: String) -> Self {
        Self {
            api_base_url: base_url,
            logout_timeout: DEFAULT_LOGOUT_TIMEOUT,
        }
    }

    /// Builds the config from the build defaults, overridden by
    /// `LOANPAY_API_BASE_URL` and `LOANPAY_LOGOUT_TIMEOUT_SECS`.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_vars(vars())
    }

    fn from_vars(vars: impl IntoIterator<Item = (String, String)>) -> anyhow::Result<Self> {
        let raw: RawConfig = serde_env::from_iter_with_prefix(vars, ENV_PREFIX)
            .context("Failed to read LOANPAY_* environment")?;

        let mut config = Self::default();
        if let Some(base_url) = raw.api_base_url {
            config.api_base_url = base_url.trim_end_matches('/').to_owned();
        }
        if let Some(secs) = raw.logout_timeout_secs {
            config.logout_timeout = Duration::from_secs(secs);
        }

        info!(
            "BusinessConfig: api_base_url='{}', logout_timeout={:?}",
            config.api_base_url, config.logout_timeout
        );
        Ok(config)
    }

    pub fn api_url(&self) -> Ustr {
        if self.api_base_url.is_empty() {
            Ustr::from("/api")
        } else {
            Ustr::from(&format!("{}/api", self.api_base_url))
        }
    }

    /// `POST` target for starting a gateway checkout.
    pub fn payment_initialize_url(&self) -> String {
        format!("{}/payment/initialize", self.api_url())
    }

    pub fn logout_url(&self) -> String {
        format!("{}/auth/logout", self.api_url())
    }
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self {
            api_base_url: if cfg!(target_arch = "wasm32") {
                String::new()
            } else if cfg!(feature = "env_prod") {
                "https://loanpay.app".to_owned()
            } else {
                "http://localhost:5000".to_owned()
            },
            logout_timeout: DEFAULT_LOGOUT_TIMEOUT,
        }
    }
}
