mod fingerprinting;
mod translation_cache;

pub use fingerprinting::{fingerprint, normalize, FingerprintAlgorithm};
pub use translation_cache::{TranslationCache, UNKNOWN_PLACEHOLDER};
