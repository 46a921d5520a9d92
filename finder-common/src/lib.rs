//! Common types and utilities shared across the question finder crates.
//!
//! This crate holds the glue-level error type, secret masking, and the
//! observability helpers every binary and integration test goes through.
//! It stays dependency-light so the rest of the workspace can lean on it
//! freely.
//!
//! # Overview
//!
//! - [`observability`]: centralised tracing/logging initialisation
//! - [`FinderError`] and [`Result`]: shared error handling for glue code
//! - [`mask_secret`]: render credentials safely in logs and health output
//!
//! # Examples
//!
//! ```rust
//! use finder_common::mask_secret;
//!
//! assert_eq!(mask_secret("AIzaSyExampleKey1234"), "AIza...1234 (len=20)");
//! ```

pub mod observability;

/// Error types used by the glue layers (configuration, binaries).
///
/// Domain failures of the generation pipeline have their own typed
/// taxonomy in `finder-pipeline`; this type covers everything around it.
#[derive(thiserror::Error, Debug)]
pub enum FinderError {
    /// Configuration was incomplete or invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenient alias for results that use [`FinderError`].
pub type Result<T> = std::result::Result<T, FinderError>;

/// Mask a secret for display, keeping a short prefix and suffix plus the length.
///
/// Secrets of eight characters or fewer are fully hidden.
pub fn mask_secret(raw: &str) -> String {
    let chars: Vec<char> = raw.chars().collect();
    if chars.len() <= 8 {
        return format!("**** (len={})", chars.len());
    }
    let prefix: String = chars[..4].iter().collect();
    let suffix: String = chars[chars.len() - 4..].iter().collect();
    format!("{prefix}...{suffix} (len={})", chars.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_long_secrets() {
        assert_eq!(mask_secret("abcdefghijkl"), "abcd...ijkl (len=12)");
    }

    #[test]
    fn hides_short_secrets_entirely() {
        assert_eq!(mask_secret("abc"), "**** (len=3)");
        assert_eq!(mask_secret(""), "**** (len=0)");
    }
}
