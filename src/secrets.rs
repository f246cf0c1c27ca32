// secrets
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::env;
use std::str::FromStr;
use tracing::info;

pub static SECRET_MANAGER: Lazy<SecretManager> = Lazy::new(SecretManager::from_env);

/// Every key the service reads. Anything else in the environment is ignored.
const KEYS: &[&str] = &[
    "PORT",
    "BACKEND_URL",
    "RESOLVER_URL",
    "RESOLVER_TIMEOUT_SECS",
    "LOG_LEVEL",
];

const DEV_DEFAULTS: &[(&str, &str)] = &[
    ("PORT", "8000"),
    ("BACKEND_URL", "http://localhost:8000"),
    ("RESOLVER_URL", "http://localhost:3001/api/song/url"),
    ("RESOLVER_TIMEOUT_SECS", "10"),
    ("LOG_LEVEL", "debug"),
];

// No RESOLVER_URL here: production has to point at a real upstream.
const PROD_DEFAULTS: &[(&str, &str)] = &[
    ("PORT", "8000"),
    ("RESOLVER_TIMEOUT_SECS", "10"),
    ("LOG_LEVEL", "info"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Dev,
    Prod,
}

pub struct SecretManager {
    mode: Mode,
    secrets: HashMap<String, String>,
}

impl SecretManager {
    fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the manager from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let mode = match lookup("MODE") {
            Some(mode) if mode.eq_ignore_ascii_case("prod") => Mode::Prod,
            _ => Mode::Dev,
        };
        let defaults = match mode {
            Mode::Dev => DEV_DEFAULTS,
            Mode::Prod => PROD_DEFAULTS,
        };

        let secrets = KEYS
            .iter()
            .filter_map(|&key| {
                lookup(key)
                    .or_else(|| {
                        defaults
                            .iter()
                            .find(|(default_key, _)| *default_key == key)
                            .map(|(_, value)| value.to_string())
                    })
                    .map(|value| (key.to_string(), value))
            })
            .collect();

        SecretManager { mode, secrets }
    }

    pub fn get(&self, key: &str) -> String {
        self.secrets.get(key).cloned().unwrap_or_default()
    }

    /// `None` when the key is unset or does not parse as `T`.
    pub fn get_parsed<T: FromStr>(&self, key: &str) -> Option<T> {
        self.secrets.get(key).and_then(|value| value.parse().ok())
    }

    /// Logs which secrets are configured, NOT their values.
    pub fn log_configured(&self) {
        let mut configured: Vec<&str> = self.secrets.keys().map(String::as_str).collect();
        configured.sort_unstable();
        info!("Mode: {:?}, secrets configured: {:?}", self.mode, configured);
    }
}
