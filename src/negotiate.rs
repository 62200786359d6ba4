//! Locale negotiation over weighted preference lists
//!
//! The [`Negotiator`] is built once from the catalog and matches parsed
//! preference lists against the fixed candidate set. Matching never fails:
//! the weakest outcome is the default locale with [`Confidence::No`].

use crate::catalog::Catalog;
use crate::locale::{Locale, Preference, parse_accept_language};
use crate::request::RequestContext;

/// How well a negotiated locale satisfies the client's preferences.
///
/// Ordered weakest-first so callers can compare with `>`:
/// a strategy "wins" when its confidence is strictly above `No`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Confidence {
    /// Nothing matched; the default locale was returned as a fallback.
    No,
    /// Matched only through a `*` wildcard (adopts the default).
    Low,
    /// Base language matched a registered locale; region differed or was absent.
    High,
    /// A preference tag matched a registered locale exactly.
    Exact,
}

/// Outcome of a negotiation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Negotiated {
    /// The winning catalog key. Always a registered key.
    pub key: String,
    /// Index into the preference list of the entry that matched, when any did.
    pub preference_index: Option<usize>,
    pub confidence: Confidence,
}

/// Matches preference lists against the registered locales.
///
/// Candidates keep the catalog's default first so it acts as the tie-break
/// within a confidence tier.
#[derive(Debug, Clone)]
pub struct Negotiator {
    candidates: Vec<(String, Locale)>,
    default_key: String,
}

impl Negotiator {
    /// Build the candidate set from a catalog. Keys that fail to parse as
    /// locale tags are skipped; catalog validation makes that unreachable in
    /// practice.
    pub fn new(catalog: &Catalog) -> Self {
        let default_key = catalog.default_key().to_string();

        let mut candidates = Vec::new();
        for key in catalog.sorted_keys() {
            if let Ok(locale) = Locale::parse(&key) {
                if key == default_key {
                    candidates.insert(0, (key, locale));
                } else {
                    candidates.push((key, locale));
                }
            }
        }

        Self {
            candidates,
            default_key,
        }
    }

    /// Match an ordered, weighted preference list against the candidates.
    ///
    /// Preferences are examined most-preferred first. For each one, an exact
    /// tag match beats a base-language match; the first preference that
    /// matches at all wins. A wildcard adopts the default with `Low`
    /// confidence. An empty or unmatched list returns the default with `No`.
    pub fn negotiate(&self, preferences: &[Preference]) -> Negotiated {
        for (index, preference) in preferences.iter().enumerate() {
            let Some(tag) = &preference.locale else {
                return Negotiated {
                    key: self.default_key.clone(),
                    preference_index: Some(index),
                    confidence: Confidence::Low,
                };
            };

            for (key, candidate) in &self.candidates {
                if candidate.matches_exactly(tag) {
                    return Negotiated {
                        key: key.clone(),
                        preference_index: Some(index),
                        confidence: Confidence::Exact,
                    };
                }
            }

            for (key, candidate) in &self.candidates {
                if candidate.same_language(tag) {
                    return Negotiated {
                        key: key.clone(),
                        preference_index: Some(index),
                        confidence: Confidence::High,
                    };
                }
            }
        }

        self.no_match()
    }

    /// Parse a raw Accept-Language-style string and negotiate it.
    pub fn negotiate_str(&self, raw: &str) -> Negotiated {
        self.negotiate(&parse_accept_language(raw))
    }

    /// The default locale with `No` confidence.
    pub fn no_match(&self) -> Negotiated {
        Negotiated {
            key: self.default_key.clone(),
            preference_index: None,
            confidence: Confidence::No,
        }
    }
}

// ============================================================================
// Matching strategies
// ============================================================================

/// One pluggable source of locale preferences for a request.
///
/// Strategies are tried in registration order; the first whose confidence is
/// strictly above [`Confidence::No`] wins. Implementations must not fail:
/// a strategy with nothing usable returns [`Negotiator::no_match`].
pub trait Matcher: Send + Sync {
    fn attempt(&self, ctx: &RequestContext, negotiator: &Negotiator) -> Negotiated;
}

/// Matches the `Accept-Language` request header.
#[derive(Debug, Default)]
pub struct AcceptLanguageMatcher;

impl AcceptLanguageMatcher {
    pub fn new() -> Self {
        Self
    }
}

impl Matcher for AcceptLanguageMatcher {
    fn attempt(&self, ctx: &RequestContext, negotiator: &Negotiator) -> Negotiated {
        match ctx.header("Accept-Language") {
            Some(raw) => negotiator.negotiate_str(raw),
            None => negotiator.no_match(),
        }
    }
}

/// Matches a query or form parameter carrying a single locale tag.
#[derive(Debug)]
pub struct ParamMatcher {
    name: String,
}

impl ParamMatcher {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Matcher for ParamMatcher {
    fn attempt(&self, ctx: &RequestContext, negotiator: &Negotiator) -> Negotiated {
        let value = ctx.query(&self.name).or_else(|| ctx.form(&self.name));
        match value {
            Some(raw) => negotiator.negotiate_str(raw),
            None => negotiator.no_match(),
        }
    }
}
