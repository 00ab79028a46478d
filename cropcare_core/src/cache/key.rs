//! Cache key construction.

use sha2::{Digest, Sha256};

/// Build a logical key from an operation name and its canonicalized arguments.
///
/// ```
/// use cropcare_core::cache::fingerprint;
/// assert_eq!(fingerprint("treatments", &["anthracnose", "high"]), "treatments:anthracnose:high");
/// ```
pub fn fingerprint(operation: &str, args: &[&str]) -> String {
    let mut key = String::from(operation);
    for arg in args {
        key.push(':');
        key.push_str(arg);
    }
    key
}

/// Maps logical keys onto namespaced physical keys
#[derive(Clone, Debug)]
pub struct KeySpace {
    namespace: String,
    long_key_threshold: usize,
}

impl KeySpace {
    pub fn new(namespace: impl Into<String>, long_key_threshold: usize) -> Self {
        Self {
            namespace: namespace.into(),
            long_key_threshold,
        }
    }

    /// Physical key for a logical key.
    ///
    /// Logical keys longer than the threshold are replaced by their SHA-256
    /// hex digest so physical keys stay bounded.
    pub fn physical(&self, logical: &str) -> String {
        if logical.chars().count() > self.long_key_threshold {
            let digest = Sha256::digest(logical.as_bytes());
            format!("{}:{}", self.namespace, hex::encode(digest))
        } else {
            format!("{}:{}", self.namespace, logical)
        }
    }

    /// Physical prefix used for bulk invalidation
    pub fn prefix(&self, logical_prefix: &str) -> String {
        format!("{}:{}", self.namespace, logical_prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_without_args() {
        assert_eq!(fingerprint("supported_diseases", &[]), "supported_diseases");
    }

    #[test]
    fn test_short_keys_are_namespaced() {
        let keys = KeySpace::new("crop_api", 200);
        assert_eq!(keys.physical("disease_info:anthracnose"), "crop_api:disease_info:anthracnose");
        assert_eq!(keys.prefix("disease_info:"), "crop_api:disease_info:");
    }

    #[test]
    fn test_long_keys_are_hashed_deterministically() {
        let keys = KeySpace::new("crop_api", 200);
        let long = "x".repeat(201);

        let first = keys.physical(&long);
        assert_eq!(first, keys.physical(&long));
        // namespace + ':' + 64 hex chars
        assert_eq!(first.len(), "crop_api:".len() + 64);
        assert!(!first.contains(&long));
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let keys = KeySpace::new("ns", 200);
        let exact = "y".repeat(200);
        assert_eq!(keys.physical(&exact), format!("ns:{}", exact));
    }
}
