// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

mod args;
mod error;
mod log;
mod subscription;
mod substrate;

pub use args::{Args, Command, RangeArgs, SelectionArgs};
pub use error::ConfigError;
pub use log::LogConfig;
pub use subscription::{FetchErrorPolicy, HeadKind, SubscriptionConfig, SubscriptionError};
pub use substrate::SubstrateConfig;

use serde::Deserialize;
use std::path::Path;

const ENV_PREFIX: &str = "EVL_";

/// Flat view of the `EVL_*` environment variables, split into sections by
/// [`ListenerConfig`].
#[derive(Debug, Deserialize)]
struct EnvConfig {
    #[serde(default = "substrate::default_url")]
    substrate_url: String,

    #[serde(default = "log::default_level")]
    log_level: String,
    #[serde(default)]
    log_json: bool,
    #[serde(default)]
    log_strip_ansi: bool,
    #[serde(default)]
    log_write: bool,
    #[serde(default = "log::default_write_path")]
    log_write_path: String,
    #[serde(default = "log::default_write_max_file_size")]
    log_write_max_file_size: u64,
    #[serde(default = "log::default_write_max_files")]
    log_write_max_files: usize,

    #[serde(default)]
    subscription_heads: HeadKind,
    #[serde(default = "subscription::default_channel_capacity")]
    subscription_channel_capacity: usize,
    #[serde(default = "subscription::default_max_in_flight")]
    subscription_max_in_flight: usize,
    #[serde(default)]
    subscription_on_fetch_error: FetchErrorPolicy,
}

impl From<EnvConfig> for ListenerConfig {
    fn from(env: EnvConfig) -> Self {
        Self {
            substrate: SubstrateConfig {
                url: env.substrate_url,
            },
            log: LogConfig {
                level: env.log_level.to_lowercase(),
                json: env.log_json,
                strip_ansi: env.log_strip_ansi,
                write: env.log_write,
                write_path: env.log_write_path,
                write_max_file_size: env.log_write_max_file_size,
                write_max_files: env.log_write_max_files,
            },
            subscription: SubscriptionConfig {
                heads: env.subscription_heads,
                channel_capacity: env.subscription_channel_capacity,
                max_in_flight: env.subscription_max_in_flight,
                on_fetch_error: env.subscription_on_fetch_error,
            },
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListenerConfig {
    pub substrate: SubstrateConfig,
    pub log: LogConfig,
    pub subscription: SubscriptionConfig,
}

impl ListenerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars())
    }

    /// Load `env_file` into the process environment (if it exists) and then
    /// read the configuration from the environment.
    ///
    /// Variables already set in the environment take precedence over the file.
    pub fn load(env_file: &str) -> Result<Self, ConfigError> {
        if Path::new(env_file).exists() {
            dotenv::from_filename(env_file).map_err(|source| ConfigError::EnvFileError {
                path: env_file.to_string(),
                source,
            })?;
        }
        Self::from_env()
    }

    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let env = envy::prefixed(ENV_PREFIX).from_iter::<_, EnvConfig>(vars)?;
        let config = Self::from(env);
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.substrate.validate()?;
        self.log.validate()?;
        self.subscription.validate()?;
        Ok(())
    }
}
