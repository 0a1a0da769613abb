//! # Runtime Configuration Module
//!
//! Environment variable-based configuration for controller behavior.
//!
//! ## Environment Variables
//!
//! ### `REST_PARAM_FALLBACK`
//!
//! Decides when `Controller::param(name, default)` returns `default`:
//!
//! - `falsy` (default): whenever the value is missing **or** loosely false
//!   (`null`, `false`, `0`, `0.0`, `""`, `"0"`, `[]`, `{}`)
//! - `absent` (alias `strict`): only when the parameter is missing
//!
//! Unknown values are logged and treated as `falsy`.
//!
//! ## Usage
//!
//! ```rust
//! use rest_controller::runtime_config::RuntimeConfig;
//!
//! let config = RuntimeConfig::from_env();
//! println!("Param fallback: {:?}", config.param_fallback);
//! ```
//!
//! ```bash
//! # A literal 0 or empty string is a real value, not "missing"
//! export REST_PARAM_FALLBACK=absent
//! ```

use crate::request::is_falsy;
use serde_json::Value;
use std::env;
use tracing::warn;

/// Environment variable read by [`RuntimeConfig::from_env`]
pub const PARAM_FALLBACK_ENV: &str = "REST_PARAM_FALLBACK";

/// When a parameter lookup falls back to the caller's default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParamFallback {
    /// Missing or loosely false values yield the default
    #[default]
    Falsy,
    /// Only missing values yield the default
    Absent,
}

impl ParamFallback {
    /// Parse a config value, case-insensitively
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "falsy" => Some(ParamFallback::Falsy),
            "absent" | "strict" => Some(ParamFallback::Absent),
            _ => None,
        }
    }

    /// Whether a looked-up value should be replaced by the caller's default
    #[must_use]
    pub fn use_default(self, value: Option<&Value>) -> bool {
        match (self, value) {
            (_, None) => true,
            (ParamFallback::Falsy, Some(v)) => is_falsy(v),
            (ParamFallback::Absent, Some(_)) => false,
        }
    }
}

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Param fallback policy (default: [`ParamFallback::Falsy`])
    pub param_fallback: ParamFallback,
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let param_fallback = match env::var(PARAM_FALLBACK_ENV) {
            Ok(val) => ParamFallback::parse(&val).unwrap_or_else(|| {
                warn!(
                    variable = PARAM_FALLBACK_ENV,
                    value = %val,
                    "Unknown param fallback, using falsy"
                );
                ParamFallback::Falsy
            }),
            Err(_) => ParamFallback::Falsy,
        };
        RuntimeConfig { param_fallback }
    }
}
