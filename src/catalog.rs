//! Locale catalog: registered translation tables plus the default locale
//!
//! The catalog is constructed once at startup and never mutated afterward.
//! All request-time components read it through a shared reference.

use crate::{Error, Locale, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Reserved translation key holding the locale's decimal separator.
pub const DECIMAL_MARK_KEY: &str = "decimalMark";

/// Reserved translation key holding the locale's thousands separator.
pub const THOUSANDS_MARK_KEY: &str = "thousandsMark";

/// Validation and canonical form applied to catalog keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyFormat {
    /// Bare ISO 639-1 codes: exactly two ASCII lowercase letters (`en`).
    #[default]
    LanguageOnly,
    /// BCP 47-like tags in canonical form (`en`, `pt-BR`).
    Bcp47,
}

impl KeyFormat {
    fn validate(&self, key: &str) -> bool {
        match self {
            KeyFormat::LanguageOnly => {
                key.len() == 2 && key.chars().all(|c| c.is_ascii_lowercase())
            }
            KeyFormat::Bcp47 => Locale::parse(key).map(|l| l.tag() == key).unwrap_or(false),
        }
    }
}

/// Translation table for a single locale.
///
/// Plain string-to-string entries. Plural forms use lowercase dot suffixes
/// (`apple.zero`, `apple.one`, `apple.other`); the reserved keys
/// [`DECIMAL_MARK_KEY`] and [`THOUSANDS_MARK_KEY`] configure number
/// formatting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Translations {
    entries: HashMap<String, String>,
}

impl Translations {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an entry.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Look up an entry.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|s| s.as_str())
    }

    /// Parse from a flat JSON object of string values.
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: HashMap<String, String> = serde_json::from_str(json)?;
        Ok(Self { entries })
    }
}

impl From<HashMap<String, String>> for Translations {
    fn from(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }
}

impl<const N: usize> From<[(&str, &str); N]> for Translations {
    fn from(pairs: [(&str, &str); N]) -> Self {
        let entries = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self { entries }
    }
}

/// Immutable registry of locale identifiers and their translation tables.
#[derive(Debug, Clone)]
pub struct Catalog {
    tables: HashMap<String, Translations>,
    default_key: String,
    key_format: KeyFormat,
}

impl Catalog {
    /// Build a catalog from tables and a default locale key.
    ///
    /// Fails when the catalog is empty, when any key fails the `key_format`
    /// validator, or when the default is not a member. These are startup
    /// configuration errors; callers should abort on them.
    pub fn new(
        tables: HashMap<String, Translations>,
        default_key: impl Into<String>,
        key_format: KeyFormat,
    ) -> Result<Self> {
        if tables.is_empty() {
            return Err(Error::EmptyCatalog);
        }

        for key in tables.keys() {
            if !key_format.validate(key) {
                return Err(Error::InvalidLocaleKey {
                    key: key.clone(),
                    format: key_format,
                });
            }
        }

        let default_key = default_key.into();
        if !tables.contains_key(&default_key) {
            return Err(Error::UnknownDefault(default_key));
        }

        Ok(Self {
            tables,
            default_key,
            key_format,
        })
    }

    /// Load a catalog from a directory of `<key>.json` files.
    ///
    /// Each file must contain a flat JSON object of string values; the file
    /// stem is the locale key (`locales/en.json` registers `en`).
    pub fn from_dir(
        dir: impl AsRef<Path>,
        default_key: impl Into<String>,
        key_format: KeyFormat,
    ) -> Result<Self> {
        let dir = dir.as_ref();
        let mut tables = HashMap::new();

        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }

            let key = path
                .file_stem()
                .and_then(|s| s.to_str())
                .ok_or_else(|| Error::InvalidTag(path.display().to_string()))?
                .to_string();

            let content = fs::read_to_string(&path)?;
            tables.insert(key, Translations::from_json(&content)?);
        }

        Self::new(tables, default_key, key_format)
    }

    /// Exact membership test. No base-language reduction happens here;
    /// reduction is the negotiator's job.
    pub fn has(&self, key: &str) -> bool {
        self.tables.contains_key(key)
    }

    /// Translation table for a registered locale.
    pub fn translations(&self, key: &str) -> Option<&Translations> {
        self.tables.get(key)
    }

    /// The configured default locale key.
    pub fn default_key(&self) -> &str {
        &self.default_key
    }

    /// The key format this catalog validates against.
    pub fn key_format(&self) -> KeyFormat {
        self.key_format
    }

    /// All registered locale keys, sorted.
    pub fn sorted_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.tables.keys().cloned().collect();
        keys.sort();
        keys
    }
}
