//! Projector configuration.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::fingerprint::DigestAlgorithm;

/// How address bytes are rendered in output records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressFormat {
    /// Comma-separated decimal byte values, e.g. `"160,184,105"`
    #[default]
    ByteList,
    /// `0x` + lowercase hex
    Hex,
    /// EIP-55 mixed-case hex (20-byte addresses only)
    Checksum,
}

/// Knobs for the record projector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectorConfig {
    /// Digest used to fingerprint raw input
    #[serde(default)]
    pub digest: DigestAlgorithm,
    /// Rendering for `from`, `to` and `spender`
    #[serde(default)]
    pub address_format: AddressFormat,
    /// Log a warning when a block number does not fit in 32 bits
    #[serde(default = "default_true")]
    pub warn_on_block_narrowing: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ProjectorConfig {
    fn default() -> Self {
        Self {
            digest: DigestAlgorithm::default(),
            address_format: AddressFormat::default(),
            warn_on_block_narrowing: true,
        }
    }
}

impl ProjectorConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load from a `.yaml`/`.yml` or `.json` file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        load_file(path)
    }
}

/// Deserialize any config type from a `.yaml`/`.yml` or `.json` file,
/// picking the format by extension.
pub fn load_file<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, ConfigError> {
    let path = path.as_ref();
    let format = path.extension().and_then(|e| e.to_str());
    if !matches!(format, Some("yaml" | "yml" | "json")) {
        return Err(ConfigError::UnsupportedFormat {
            path: path.display().to_string(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    match format {
        Some("json") => Ok(serde_json::from_str(&content)?),
        _ => Ok(serde_yaml::from_str(&content)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_uses_defaults() {
        let cfg = ProjectorConfig::from_yaml_str("{}").unwrap();
        assert_eq!(cfg, ProjectorConfig::default());
        assert!(cfg.warn_on_block_narrowing);
        assert_eq!(cfg.digest, DigestAlgorithm::Keccak256);
        assert_eq!(cfg.address_format, AddressFormat::ByteList);
    }

    #[test]
    fn yaml_overrides() {
        let cfg = ProjectorConfig::from_yaml_str(
            "digest: sha256\naddress_format: hex\nwarn_on_block_narrowing: false\n",
        )
        .unwrap();
        assert_eq!(cfg.digest, DigestAlgorithm::Sha256);
        assert_eq!(cfg.address_format, AddressFormat::Hex);
        assert!(!cfg.warn_on_block_narrowing);
    }

    #[test]
    fn json_config() {
        let cfg = ProjectorConfig::from_json_str(r#"{"address_format":"checksum"}"#).unwrap();
        assert_eq!(cfg.address_format, AddressFormat::Checksum);
        assert_eq!(cfg.digest, DigestAlgorithm::Keccak256);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let path = std::env::temp_dir().join("chainbundle-config-test.toml");
        std::fs::write(&path, "digest = 'sha256'").unwrap();
        let err = ProjectorConfig::from_path(&path).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat { .. }));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn yaml_file_loads_by_extension() {
        let path = std::env::temp_dir().join("chainbundle-config-test.yml");
        std::fs::write(&path, "address_format: checksum\n").unwrap();
        let cfg = ProjectorConfig::from_path(&path).unwrap();
        assert_eq!(cfg.address_format, AddressFormat::Checksum);
        let _ = std::fs::remove_file(&path);
    }
}
