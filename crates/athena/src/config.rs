// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 athena contributors

//! Extension configuration.
//!
//! Two levels, as in the rest of the extension:
//!
//! - **Static**: [`ExtensionConfig`] values, built from defaults or the
//!   environment (`ATHENA_DUPLICATE_FIELDS`, `ATHENA_UNKNOWN_TYPES`).
//! - **Runtime**: [`RuntimeConfig`], an atomically swappable holder read on
//!   every type construction. [`RuntimeConfig::global`] backs the C ABI.
//!
//! # Example
//!
//! ```rust
//! use athena::{DuplicatePolicy, ExtensionConfig, RuntimeConfig};
//!
//! let runtime = RuntimeConfig::new(ExtensionConfig::default());
//! runtime.set_duplicate_policy(DuplicatePolicy::Reject);
//! assert_eq!(runtime.load().duplicate_policy, DuplicatePolicy::Reject);
//! ```

use std::str::FromStr;
use std::sync::{Arc, OnceLock};

use arc_swap::ArcSwap;
use thiserror::Error;

/// Environment variable selecting the duplicate member name policy.
pub const ENV_DUPLICATE_FIELDS: &str = "ATHENA_DUPLICATE_FIELDS";

/// Environment variable selecting how unknown catalog type names map.
pub const ENV_UNKNOWN_TYPES: &str = "ATHENA_UNKNOWN_TYPES";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {var} (expected one of: {expected})")]
    InvalidValue {
        var: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// How repeated STRUCT member names are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Keep every member in order; lookups by name find the first.
    #[default]
    Allow,
    /// Fail with `TypeError::DuplicateFieldName`.
    Reject,
}

impl FromStr for DuplicatePolicy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "allow" => Ok(Self::Allow),
            "reject" => Ok(Self::Reject),
            _ => Err(()),
        }
    }
}

/// How catalog type names without a mapping are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownTypePolicy {
    /// Fail with `TypeError::UnknownTypeName`.
    #[default]
    Error,
    /// Read the column as VARCHAR.
    Varchar,
}

impl FromStr for UnknownTypePolicy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "varchar" => Ok(Self::Varchar),
            _ => Err(()),
        }
    }
}

/// Extension settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExtensionConfig {
    pub duplicate_policy: DuplicatePolicy,
    pub unknown_type_policy: UnknownTypePolicy,
}

impl ExtensionConfig {
    /// Read settings from the process environment. Unset variables keep
    /// their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read settings through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(value) = lookup(ENV_DUPLICATE_FIELDS) {
            config.duplicate_policy = value.parse().map_err(|()| ConfigError::InvalidValue {
                var: ENV_DUPLICATE_FIELDS,
                value,
                expected: "allow, reject",
            })?;
        }
        if let Some(value) = lookup(ENV_UNKNOWN_TYPES) {
            config.unknown_type_policy = value.parse().map_err(|()| ConfigError::InvalidValue {
                var: ENV_UNKNOWN_TYPES,
                value,
                expected: "error, varchar",
            })?;
        }
        Ok(config)
    }
}

/// Swappable holder for the active [`ExtensionConfig`].
///
/// Reads are a single atomic load; writers replace the whole value.
#[derive(Debug)]
pub struct RuntimeConfig {
    current: ArcSwap<ExtensionConfig>,
}

impl RuntimeConfig {
    pub fn new(config: ExtensionConfig) -> Self {
        Self {
            current: ArcSwap::from_pointee(config),
        }
    }

    /// Process-wide instance, seeded from the environment on first use.
    ///
    /// An invalid environment falls back to defaults and logs the problem.
    pub fn global() -> &'static RuntimeConfig {
        static GLOBAL: OnceLock<RuntimeConfig> = OnceLock::new();
        GLOBAL.get_or_init(|| {
            let config = ExtensionConfig::from_env().unwrap_or_else(|e| {
                log::warn!("{}; using default configuration", e);
                ExtensionConfig::default()
            });
            RuntimeConfig::new(config)
        })
    }

    /// Snapshot of the current settings.
    pub fn load(&self) -> Arc<ExtensionConfig> {
        self.current.load_full()
    }

    pub fn store(&self, config: ExtensionConfig) {
        log::debug!("configuration updated: {:?}", config);
        self.current.store(Arc::new(config));
    }

    /// Apply `f` to the current settings and publish the result.
    pub fn update(&self, f: impl Fn(&mut ExtensionConfig)) {
        self.current.rcu(|current| {
            let mut next = **current;
            f(&mut next);
            next
        });
    }

    pub fn set_duplicate_policy(&self, policy: DuplicatePolicy) {
        self.update(|c| c.duplicate_policy = policy);
    }

    pub fn set_unknown_type_policy(&self, policy: UnknownTypePolicy) {
        self.update(|c| c.unknown_type_policy = policy);
    }

    /// Re-read the environment and replace the settings.
    pub fn reload_env(&self) -> Result<(), ConfigError> {
        let config = ExtensionConfig::from_env()?;
        self.store(config);
        Ok(())
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::new(ExtensionConfig::default())
    }
}
