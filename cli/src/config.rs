//! CLI configuration file: a `projector` section and a `log` section.
//!
//! ```yaml
//! projector:
//!   digest: sha256
//!   address_format: checksum
//! log:
//!   level: info
//!   components:
//!     chainbundle-projector: debug
//! ```

use anyhow::{Context, Result};
use chainbundle_core::config::{self as core_config, ProjectorConfig};
use chainbundle_observability::LogConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default)]
    pub projector: ProjectorConfig,
    #[serde(default)]
    pub log: LogConfig,
}

impl CliConfig {
    pub fn load(path: &Path) -> Result<Self> {
        core_config::load_file(path)
            .with_context(|| format!("load config file '{}'", path.display()))
    }

    /// Load `path` if given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }
}
