//! Helpers for loading configuration values from the environment.

use crate::ConfigError;
use std::{env, time::Duration};

/// Load a variable from the environment, if it is set
pub fn load_string_opt(key: &str) -> Option<String> {
    env::var(key).ok()
}

/// Load a variable from the environment, if it is set
pub fn load_u64_opt(key: &str) -> Result<Option<u64>, ConfigError> {
    load_string_opt(key).map(|val| val.parse::<u64>()).transpose().map_err(Into::into)
}

/// Load a duration in whole seconds from the environment, if it is set
pub fn load_secs_opt(key: &str) -> Result<Option<Duration>, ConfigError> {
    load_u64_opt(key).map(|secs| secs.map(Duration::from_secs))
}
