//! Loading [`DiffConfig`] from text.
//!
//! Both formats share the field names of [`DiffConfig`]; missing fields fall
//! back to their defaults. A TOML config looks like:
//!
//! ```toml
//! identity_key = "id"
//! strategy = "auto"
//!
//! [identity_keys]
//! products = "sku"
//! ```

use differ_engine::DiffConfig;
use tracing::debug;

use crate::error::{SdkError, SdkResult};

/// Parse a configuration from a TOML document.
pub fn load_config_toml(text: &str) -> SdkResult<DiffConfig> {
    let config: DiffConfig = toml::from_str(text).map_err(|e| SdkError::Config(e.to_string()))?;
    debug!(strategy = ?config.strategy, overrides = config.identity_keys.len(), "loaded toml config");
    Ok(config)
}

/// Parse a configuration from a JSON document.
pub fn load_config_json(text: &str) -> SdkResult<DiffConfig> {
    let config: DiffConfig = serde_json::from_str(text).map_err(|e| SdkError::Config(e.to_string()))?;
    debug!(strategy = ?config.strategy, overrides = config.identity_keys.len(), "loaded json config");
    Ok(config)
}
