//! Environment-driven configuration.

use std::env;
use std::str::FromStr;

use crate::error::AppError;

pub mod flow;
pub mod rules;

pub use flow::FlowConfig;
pub use rules::RulesConfig;

/// Everything the room flow service needs to run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineConfig {
    pub rules: RulesConfig,
    pub flow: FlowConfig,
}

impl EngineConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            rules: RulesConfig::from_env()?,
            flow: FlowConfig::from_env()?,
        })
    }
}

/// Read an optional variable. Unset or blank means `None`.
fn opt_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Parse an optional numeric variable, rejecting garbage.
fn parse_var<T: FromStr>(name: &str) -> Result<Option<T>, AppError> {
    opt_var(name)
        .map(|raw| {
            raw.trim().parse::<T>().map_err(|_| {
                AppError::config(format!("Environment variable '{name}' has invalid value '{raw}'"))
            })
        })
        .transpose()
}
