//! Content fingerprint of a raw input bundle.
//!
//! The fingerprint is a digest of the exact input bytes, never of the
//! decoded structure, so it exists even when decoding fails. Every record
//! projected from a bundle is namespaced under its fingerprint.
//!
//! Keccak-256 is the default digest; SHA-256 is available for hosts that
//! key their storage that way.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;
use tiny_keccak::{Hasher, Keccak};

/// Digest algorithm used to fingerprint raw input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestAlgorithm {
    #[default]
    Keccak256,
    Sha256,
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DigestAlgorithm::Keccak256 => write!(f, "keccak256"),
            DigestAlgorithm::Sha256 => write!(f, "sha256"),
        }
    }
}

impl FromStr for DigestAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "keccak256" | "keccak" => Ok(DigestAlgorithm::Keccak256),
            "sha256" | "sha-256" => Ok(DigestAlgorithm::Sha256),
            other => Err(format!("unknown digest algorithm '{other}'")),
        }
    }
}

/// Lowercase, `0x`-prefixed hex digest of a raw input bundle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Hash `bytes` with the given algorithm.
    pub fn compute(bytes: &[u8], algorithm: DigestAlgorithm) -> Self {
        let digest: [u8; 32] = match algorithm {
            DigestAlgorithm::Keccak256 => keccak256(bytes),
            DigestAlgorithm::Sha256 => Sha256::digest(bytes).into(),
        };
        Self(format!("0x{}", hex::encode(digest)))
    }

    /// Keccak-256 fingerprint (the default).
    pub fn keccak256(bytes: &[u8]) -> Self {
        Self::compute(bytes, DigestAlgorithm::Keccak256)
    }

    pub fn as_hex(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn keccak256(bytes: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    let mut output = [0u8; 32];
    hasher.update(bytes);
    hasher.finalize(&mut output);
    output
}
