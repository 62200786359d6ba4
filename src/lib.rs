//! Locale negotiation and translation lookup for HTTP request pipelines
//!
//! Parlance sits next to a request handler and answers two questions:
//! which locale should this client get, and what does this translation key
//! say in it. It provides:
//!
//! - **Locale negotiation**: weighted `Accept-Language` lists matched
//!   against the registered catalog, with confidence tiers
//! - **Per-request resolution**: memo → persisted cookie → ordered matching
//!   strategies → default, with at most one cookie write per request
//! - **Translation lookup**: plural-form fallback (`.zero`/`.one`/`.other`),
//!   printf-style arguments, and a `{{.n}}` count placeholder
//! - **Number formatting**: locale-configured decimal and thousands marks
//!
//! # Quick Start
//!
//! ```rust
//! use parlance::{Catalog, I18n, I18nConfig, KeyFormat, RequestContext, Translations};
//! use std::collections::HashMap;
//!
//! let mut en = Translations::new();
//! en.set("hello", "Hello %s,");
//! en.set("coins.zero", "Your wallet is empty.");
//! en.set("coins.one", "You have a single and precious coin.");
//! en.set("coins.other", "You have {{.n}} coins.");
//!
//! let mut tables = HashMap::new();
//! tables.insert("en".to_string(), en);
//! let catalog = Catalog::new(tables, "en", KeyFormat::LanguageOnly)?;
//! let i18n = I18n::new(catalog, I18nConfig::default());
//!
//! // Per request: build a context from the host's request parts.
//! let mut ctx = RequestContext::new()
//!     .with_header("Accept-Language", "en-US,en;q=0.9");
//!
//! assert_eq!(i18n.locale(&mut ctx), "en");
//! assert_eq!(i18n.tn(&mut ctx, "coins", 500u32, &[]), "You have 500 coins.");
//!
//! // Flush the persisted preference onto the host response.
//! for cookie in ctx.take_set_cookies() {
//!     // response.headers.insert("Set-Cookie", cookie);
//!     let _ = cookie;
//! }
//! # Ok::<(), parlance::Error>(())
//! ```
//!
//! # Locale matching
//!
//! Strategies run in registration order; the first with confidence above
//! "no match" wins. The defaults try a `locale` query/form parameter, then
//! the `Accept-Language` header. A preference tag matching a registered
//! tag exactly is `Exact`; a base-language hit is `High`; a `*` wildcard
//! adopts the default with `Low`.
//!
//! # Missing translations
//!
//! Lookup never fails. A key with no translation renders as the key itself
//! ([`MissingKeys::Key`], the default) or as an empty string
//! ([`MissingKeys::Empty`]) for production.

mod catalog;
mod client;
mod config;
mod error;
mod format;
#[cfg(feature = "handlebars")]
mod helpers;
mod locale;
mod negotiate;
mod request;
mod translate;

pub use catalog::{Catalog, DECIMAL_MARK_KEY, KeyFormat, THOUSANDS_MARK_KEY, Translations};
pub use client::I18n;
pub use config::{DEFAULT_COOKIE_MAX_AGE, I18nConfig, MissingKeys};
pub use error::Error;
pub use format::{Numeric, format_number};
#[cfg(feature = "handlebars")]
pub use helpers::register_helpers;
pub use locale::{Locale, Preference, parse_accept_language};
pub use negotiate::{AcceptLanguageMatcher, Confidence, Matcher, Negotiated, Negotiator, ParamMatcher};
pub use request::RequestContext;
pub use translate::COUNT_PLACEHOLDER;

/// Result type for catalog and resolver operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Prelude for common imports
pub mod prelude {
    pub use crate::{
        Catalog, Confidence, Error, I18n, I18nConfig, KeyFormat, MissingKeys, Numeric,
        RequestContext, Result, Translations, parse_accept_language,
    };
}
