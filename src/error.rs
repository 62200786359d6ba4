//! Error types for locale negotiation and translation lookup

use thiserror::Error;

/// Errors surfaced by catalog construction and locale selection.
///
/// Negotiation failures, missing translations, and malformed numeric input
/// are deliberately *not* represented here: those paths degrade to fallback
/// output instead of failing the surrounding request.
#[derive(Debug, Error)]
pub enum Error {
    /// Catalog was constructed without any locale table
    #[error("locale catalog is empty")]
    EmptyCatalog,

    /// Default locale is not a member of the catalog
    #[error("default locale not in catalog: {0}")]
    UnknownDefault(String),

    /// A catalog key failed the configured key-format validator
    #[error("invalid locale key for {format:?} catalog: {key}")]
    InvalidLocaleKey {
        key: String,
        format: crate::KeyFormat,
    },

    /// Process-global handle was initialized a second time
    #[error("i18n already initialized for this process")]
    AlreadyInitialized,

    /// Explicit locale override named an identifier absent from the catalog
    #[error("unknown locale: {0}")]
    UnknownLocale(String),

    /// A preference tag or catalog key could not be parsed
    #[error("invalid locale tag: {0}")]
    InvalidTag(String),

    /// IO error while loading translation tables
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parse error while loading translation tables
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}
