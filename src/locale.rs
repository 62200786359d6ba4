//! Locale tags and Accept-Language parsing
//!
//! A [`Locale`] is the parsed form of a client preference tag or a catalog
//! key. Catalog keys stay strings; parsing only happens at the negotiation
//! boundary.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A language tag with an optional region (e.g. `en`, `fr-CA`).
///
/// Script and variant subtags are accepted on input and discarded; the
/// negotiation rules in this crate only distinguish exact tags from
/// base-language matches.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locale {
    /// Language code (ISO 639-1/2, lowercase)
    pub language: String,
    /// Optional region code (ISO 3166-1 alpha-2 uppercase, or UN M.49 digits)
    pub region: Option<String>,
}

impl Locale {
    /// Create a locale from a language and optional region.
    pub fn new(language: impl Into<String>, region: Option<impl Into<String>>) -> Self {
        Self {
            language: language.into().to_lowercase(),
            region: region.map(|r| r.into().to_uppercase()),
        }
    }

    /// Parse a BCP 47-like tag (e.g. `en-US`, `pt_BR`, `zh-Hans-CN`).
    pub fn parse(tag: &str) -> Result<Self> {
        let mut parts = tag.split(['-', '_']);

        let language = parts.next().unwrap_or("").to_lowercase();
        if !(2..=3).contains(&language.len())
            || !language.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Err(Error::InvalidTag(tag.to_string()));
        }

        let mut region = None;
        for part in parts {
            if part.len() == 2 && part.chars().all(|c| c.is_ascii_alphabetic()) {
                region = Some(part.to_uppercase());
            } else if part.len() == 3 && part.chars().all(|c| c.is_ascii_digit()) {
                region = Some(part.to_string());
            }
            // Script and variant subtags are ignored.
        }

        Ok(Self { language, region })
    }

    /// Canonical tag form (`en`, `en-US`).
    pub fn tag(&self) -> String {
        match &self.region {
            Some(region) => format!("{}-{}", self.language, region),
            None => self.language.clone(),
        }
    }

    /// True when both language and region are equal.
    pub fn matches_exactly(&self, other: &Locale) -> bool {
        self == other
    }

    /// True when the base language is equal, regardless of region.
    pub fn same_language(&self, other: &Locale) -> bool {
        self.language == other.language
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for Locale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Locale::parse(s)
    }
}

// ============================================================================
// Accept-Language Parsing
// ============================================================================

/// One entry of a client preference list.
///
/// `locale` is `None` for the `*` wildcard. Weight is the RFC 7231 quality
/// value; entries with `q=0` never appear in a parsed list.
#[derive(Debug, Clone, PartialEq)]
pub struct Preference {
    pub locale: Option<Locale>,
    pub weight: f32,
}

/// Parse an Accept-Language header into an ordered preference list.
///
/// Entries are stable-sorted by quality descending, so equal-quality tags
/// keep the client's order. Malformed entries and zero-quality entries are
/// dropped rather than reported; a garbage header yields an empty list.
///
/// # Example
///
/// ```
/// use parlance::parse_accept_language;
///
/// let prefs = parse_accept_language("fr-CA,fr;q=0.9,en;q=0.8,da;q=0");
/// assert_eq!(prefs.len(), 3); // da;q=0 is dropped
/// assert_eq!(prefs[0].locale.as_ref().unwrap().tag(), "fr-CA");
/// ```
pub fn parse_accept_language(header: &str) -> Vec<Preference> {
    let mut entries: Vec<Preference> = header
        .split(',')
        .filter_map(|part| {
            let part = part.trim();
            if part.is_empty() {
                return None;
            }

            let mut split = part.splitn(2, ';');
            let tag = split.next()?.trim();

            let weight = split
                .next()
                .and_then(|q| {
                    let q = q.trim();
                    q.strip_prefix("q=").and_then(|v| v.parse::<f32>().ok())
                })
                .unwrap_or(1.0);

            if weight <= 0.0 {
                return None;
            }

            let locale = if tag == "*" {
                None
            } else {
                Some(Locale::parse(tag).ok()?)
            };

            Some(Preference { locale, weight })
        })
        .collect();

    // Stable sort: ties keep client order.
    entries.sort_by(|a, b| b.weight.partial_cmp(&a.weight).unwrap_or(std::cmp::Ordering::Equal));
    entries
}
