use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Digest used to derive dictionary keys from phrases
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FingerprintAlgorithm {
    /// Matches keys in dictionaries produced by earlier versions of the tool
    #[default]
    Sha1,
    Sha256,
}

/// Case- and surrounding-whitespace-insensitive form of a phrase.
///
/// Only characters up to U+0020 are trimmed, so a trailing no-break space is part of
/// the phrase. Existing SHA-1 dictionaries were keyed this way.
pub fn normalize(phrase: &str) -> String {
    phrase.to_lowercase().trim_matches(|c: char| c <= ' ').to_string()
}

/// Computes the hex-encoded fingerprint of a phrase.
///
/// Phrases that differ only in letter case or leading/trailing whitespace share a
/// fingerprint.
///
/// # Arguments
/// * `algorithm` - Digest to apply
/// * `phrase` - Source phrase, normalized before hashing
pub fn fingerprint(algorithm: FingerprintAlgorithm, phrase: &str) -> String {
    let normalized = normalize(phrase);

    match algorithm {
        FingerprintAlgorithm::Sha1 => {
            let mut hasher = sha1::Sha1::new();
            hasher.update(normalized.as_bytes());
            hex::encode(hasher.finalize())
        }
        FingerprintAlgorithm::Sha256 => {
            let mut hasher = Sha256::new();
            hasher.update(normalized.as_bytes());
            hex::encode(hasher.finalize())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha1_fingerprint_matches_known_digest() {
        assert_eq!(
            fingerprint(FingerprintAlgorithm::Sha1, "hello world"),
            "2aae6c35c94fcfb415dbe95f408b9ce91ee846ed"
        );
    }

    #[test]
    fn test_sha256_fingerprint_matches_known_digest() {
        assert_eq!(
            fingerprint(FingerprintAlgorithm::Sha256, "hello world"),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn test_case_and_whitespace_do_not_change_fingerprint() {
        for algorithm in [FingerprintAlgorithm::Sha1, FingerprintAlgorithm::Sha256] {
            let base = fingerprint(algorithm, "hello world");
            assert_eq!(fingerprint(algorithm, "  Hello World\t"), base);
            assert_eq!(fingerprint(algorithm, "HELLO WORLD\n"), base);
        }
    }

    #[test]
    fn test_inner_whitespace_is_significant() {
        let a = fingerprint(FingerprintAlgorithm::Sha1, "hello world");
        let b = fingerprint(FingerprintAlgorithm::Sha1, "hello  world");
        assert_ne!(a, b);
    }

    #[test]
    fn test_non_ascii_phrases() {
        let a = fingerprint(FingerprintAlgorithm::Sha1, "ÉCOLE");
        let b = fingerprint(FingerprintAlgorithm::Sha1, "école ");
        assert_eq!(a, b);
        assert_eq!(a.len(), 40);
    }

    #[test]
    fn test_only_ascii_space_and_controls_are_trimmed() {
        let nbsp = fingerprint(FingerprintAlgorithm::Sha1, "Hello\u{a0}");
        assert_eq!(nbsp, hex::encode(sha1::Sha1::digest("hello\u{a0}".as_bytes())));
        assert_ne!(nbsp, fingerprint(FingerprintAlgorithm::Sha1, "hello"));

        let controls = fingerprint(FingerprintAlgorithm::Sha1, "\u{1}Hello\u{0}");
        assert_eq!(controls, hex::encode(sha1::Sha1::digest("hello".as_bytes())));

        assert_eq!(normalize("\u{3000}Ok\u{2003}"), "\u{3000}ok\u{2003}");
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  Save File  "), "save file");
        assert_eq!(normalize(""), "");
    }
}
