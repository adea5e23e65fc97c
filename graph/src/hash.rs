//! Domain-separated SHA-256.
//!
//! Graph digests and derivation fingerprints both go through
//! [`canonical_hash`]. Each role has its own null-terminated prefix, so the
//! same payload hashed for two roles gives two different digests.

use std::fmt;

use sha2::{Digest, Sha256};

/// Prefix for whole-graph digests.
pub const DOMAIN_RECIPE_GRAPH: &[u8] = b"CRUCIBLE::RECIPE_GRAPH::V1\0";

/// Prefix for derivation fingerprints.
pub const DOMAIN_DERIVATION: &[u8] = b"CRUCIBLE::DERIVATION::V1\0";

const SCHEME: &str = "sha256";
const DIGEST_LEN: usize = 32;

/// A SHA-256 digest. Displays as `sha256:<64 hex chars>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentHash([u8; DIGEST_LEN]);

impl ContentHash {
    /// Read back the text form produced by `Display`.
    ///
    /// Returns `None` for any other scheme or a digest that is not exactly
    /// 32 bytes of hex.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let hex_part = text.strip_prefix(SCHEME)?.strip_prefix(':')?;
        let mut digest = [0u8; DIGEST_LEN];
        hex::decode_to_slice(hex_part, &mut digest).ok()?;
        Some(Self(digest))
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Lowercase hex of the digest, without the scheme.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{SCHEME}:{}", self.to_hex())
    }
}

/// Hash `data` under `domain`.
#[must_use]
pub fn canonical_hash(domain: &[u8], data: &[u8]) -> ContentHash {
    let digest = Sha256::new().chain_update(domain).chain_update(data).finalize();
    ContentHash(digest.into())
}
