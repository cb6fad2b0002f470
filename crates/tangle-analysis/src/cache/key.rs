//! BLAKE3 hashing for the incremental cache.

use blake3::Hasher;
use tangle_config::TangleConfig;

use super::CacheError;

/// Current cache format version. Increment when the cache file shape changes.
const CACHE_FORMAT_VERSION: u32 = 1;

/// Lowercase hex BLAKE3 digest of a file's content.
pub fn content_hash(content: &str) -> String {
    blake3::hash(content.as_bytes()).to_hex().to_string()
}

/// Fingerprint of everything that can change how a file is classified.
///
/// Any difference in the configuration, however small, yields a different
/// fingerprint and so invalidates the whole cache.
pub fn config_fingerprint(config: &TangleConfig) -> Result<String, CacheError> {
    let canonical = config
        .to_canonical_json()
        .map_err(|e| CacheError::Fingerprint(e.to_string()))?;

    let mut hasher = Hasher::new();
    hasher.update(&CACHE_FORMAT_VERSION.to_le_bytes());
    hasher.update(canonical.as_bytes());
    Ok(hasher.finalize().to_hex().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_hash_is_hex_and_stable() {
        let hash = content_hash("export const a = 1;");
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_eq!(hash, content_hash("export const a = 1;"));
        assert_ne!(hash, content_hash("export const a = 2;"));
    }

    #[test]
    fn every_tracking_flag_changes_the_fingerprint() {
        let base = TangleConfig::default();
        let fingerprint = config_fingerprint(&base).unwrap();

        let mut third_party = base.clone();
        third_party.dependency_tracking.third_party = true;
        let mut builtin = base.clone();
        builtin.dependency_tracking.builtin = true;
        let mut type_only = base.clone();
        type_only.dependency_tracking.type_only = false;

        for changed in [third_party, builtin, type_only] {
            assert_ne!(config_fingerprint(&changed).unwrap(), fingerprint);
        }
        assert_eq!(config_fingerprint(&base).unwrap(), fingerprint);
    }
}
