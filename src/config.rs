// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Caseview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Caseview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Layered configuration.
//!
//! Resolution order (highest priority last):
//! 1. Built-in defaults
//! 2. TOML file: `caseview.toml` in the working directory, or an explicit `--config` path
//! 3. Environment variables: `CASEVIEW_*`, with `__` separating nested keys
//!    (`CASEVIEW_LAYOUT__DIRECTION=LR`, `CASEVIEW_STORE__DURABLE=true`)
//!
//! Command-line flags are applied on top by the binary.
//!
//! ```toml
//! [layout]
//! direction = "TB"
//! rank_spacing = 120
//!
//! [visibility]
//! debounce_ms = 100
//!
//! [store]
//! state_dir = ".caseview/state"
//! durable = false
//! ```

use std::ops::Deref;
use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::layout::LayoutOptions;
use crate::mapper::MapperOptions;
use crate::store::WriteDurability;
use crate::visibility::VisibilityOptions;

pub const DEFAULT_CONFIG_FILE: &str = "caseview.toml";
pub const ENV_PREFIX: &str = "CASEVIEW_";

/// Boxed wrapper for figment::Error to keep `Result` small.
#[derive(Debug)]
pub struct ConfigError(Box<figment::Error>);

impl Deref for ConfigError {
    type Target = figment::Error;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&*self.0)
    }
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self(Box::new(err))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Directory for persisted visibility maps. Without it, state lives in memory only.
    pub state_dir: Option<PathBuf>,
    /// Fsync every write.
    pub durable: bool,
}

impl StoreSettings {
    pub fn durability(&self) -> WriteDurability {
        if self.durable {
            WriteDurability::Durable
        } else {
            WriteDurability::BestEffort
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub mapper: MapperOptions,
    pub layout: LayoutOptions,
    pub visibility: VisibilityOptions,
    pub store: StoreSettings,
}

impl Settings {
    /// The provider stack behind [`Settings::load`].
    pub fn figment(config_path: Option<&Path>) -> Figment {
        let file = config_path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
        Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Resolves defaults, file and environment.
    ///
    /// An explicit `config_path` must exist; the default `caseview.toml` is optional.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            if !path.is_file() {
                return Err(figment::Error::from(format!(
                    "config file {} does not exist",
                    path.display()
                ))
                .into());
            }
        }

        let settings: Settings = Self::figment(config_path).extract()?;
        tracing::debug!(?settings, "resolved settings");
        Ok(settings)
    }
}
