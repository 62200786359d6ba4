//! Per-request locale resolution and the shared `I18n` handle
//!
//! `I18n` bundles the catalog, the negotiator, and the ordered matching
//! strategies behind one cheaply clonable handle. Resolution for a request
//! runs at most once; the outcome is memoized on the `RequestContext` and,
//! when persistence is on, written back as a long-lived cookie.

use crate::catalog::Catalog;
use crate::config::I18nConfig;
use crate::format::{Numeric, format_number};
use crate::negotiate::{AcceptLanguageMatcher, Confidence, Matcher, Negotiator, ParamMatcher};
use crate::request::RequestContext;
use crate::translate;
use crate::{Error, Result};
use log::{debug, warn};
use once_cell::sync::OnceCell;
use std::fmt::Display;
use std::sync::Arc;

static GLOBAL: OnceCell<I18n> = OnceCell::new();

struct Inner {
    catalog: Catalog,
    negotiator: Negotiator,
    matchers: Vec<Box<dyn Matcher>>,
    config: I18nConfig,
}

/// Locale resolver and translation lookup handle.
///
/// Built once at startup; clones share the same catalog and configuration.
#[derive(Clone)]
pub struct I18n {
    inner: Arc<Inner>,
}

impl I18n {
    /// Create a handle with the default matching strategies: the `locale`
    /// query/form parameter first, then the `Accept-Language` header.
    pub fn new(catalog: Catalog, config: I18nConfig) -> Self {
        Self::with_matchers(
            catalog,
            config,
            vec![
                Box::new(ParamMatcher::new("locale")),
                Box::new(AcceptLanguageMatcher::new()),
            ],
        )
    }

    /// Create a handle with explicit matching strategies, tried in order.
    pub fn with_matchers(
        catalog: Catalog,
        config: I18nConfig,
        matchers: Vec<Box<dyn Matcher>>,
    ) -> Self {
        let negotiator = Negotiator::new(&catalog);
        Self {
            inner: Arc::new(Inner {
                catalog,
                negotiator,
                matchers,
                config,
            }),
        }
    }

    /// Register the process-global handle.
    ///
    /// First call wins; a second call fails with
    /// [`Error::AlreadyInitialized`] and leaves the first registration
    /// untouched. Bootstrap code should abort startup on failure.
    pub fn init(catalog: Catalog, config: I18nConfig) -> Result<I18n> {
        let handle = Self::new(catalog, config);
        GLOBAL
            .set(handle.clone())
            .map_err(|_| Error::AlreadyInitialized)?;
        Ok(handle)
    }

    /// The process-global handle, when [`I18n::init`] has run.
    pub fn global() -> Option<I18n> {
        GLOBAL.get().cloned()
    }

    /// The registered catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// The negotiator built from the catalog.
    pub fn negotiator(&self) -> &Negotiator {
        &self.inner.negotiator
    }

    /// The configured default locale key.
    pub fn default_locale(&self) -> &str {
        self.inner.catalog.default_key()
    }

    /// Sorted list of all registered locale keys.
    pub fn sorted_locales(&self) -> Vec<String> {
        self.inner.catalog.sorted_keys()
    }

    /// Resolve the locale for this request, determining it if needed.
    ///
    /// Resolution order: the request memo, then a valid persisted cookie,
    /// then the matching strategies in registration order (first confidence
    /// above [`Confidence::No`] wins), then the default. Only the strategy
    /// path writes the persistence cookie, so a request carrying a valid
    /// cookie never re-writes it.
    pub fn locale(&self, ctx: &mut RequestContext) -> String {
        if let Some(key) = ctx.locale() {
            return key.to_string();
        }

        if self.inner.config.persist {
            if let Some(value) = ctx.cookie(&self.inner.config.cookie_name) {
                if self.inner.catalog.has(value) {
                    let key = value.to_string();
                    ctx.memoize_locale(key.clone());
                    return key;
                }
                // Stale cookie: the locale is no longer registered.
            }
        }

        let mut winner = None;
        for matcher in &self.inner.matchers {
            let negotiated = matcher.attempt(ctx, &self.inner.negotiator);
            if negotiated.confidence > Confidence::No {
                debug!(
                    "negotiated locale {} (confidence {:?})",
                    negotiated.key, negotiated.confidence
                );
                winner = Some(negotiated.key);
                break;
            }
        }

        let key = winner.unwrap_or_else(|| {
            debug!("no locale matched, using default {}", self.default_locale());
            self.default_locale().to_string()
        });

        if self.inner.config.persist {
            ctx.push_set_cookie(self.locale_cookie(&key));
        }
        ctx.memoize_locale(key.clone());
        key
    }

    /// Explicitly set the locale for this request.
    ///
    /// Fails with [`Error::UnknownLocale`] when `key` is not registered,
    /// leaving the request state untouched. On success the memo is
    /// overwritten and, with persistence on, the cookie is re-written.
    pub fn set_locale(&self, ctx: &mut RequestContext, key: &str) -> Result<()> {
        if !self.inner.catalog.has(key) {
            warn!("refusing to set unknown locale {key}");
            return Err(Error::UnknownLocale(key.to_string()));
        }

        if self.inner.config.persist {
            ctx.push_set_cookie(self.locale_cookie(key));
        }
        ctx.memoize_locale(key.to_string());
        Ok(())
    }

    fn locale_cookie(&self, key: &str) -> String {
        let config = &self.inner.config;
        format!(
            "{}={}; Path={}; Max-Age={}; SameSite=Lax",
            config.cookie_name, key, config.cookie_path, config.cookie_max_age
        )
    }

    // ========================================================================
    // Translation and formatting, request-scoped
    // ========================================================================

    /// Translate `key` for this request's locale.
    pub fn t(&self, ctx: &mut RequestContext, key: &str, args: &[&dyn Display]) -> String {
        let locale = self.locale(ctx);
        self.translate(&locale, key, None, args)
    }

    /// Translate `key` with pluralization for this request's locale.
    pub fn tn(
        &self,
        ctx: &mut RequestContext,
        key: &str,
        count: impl Into<Numeric>,
        args: &[&dyn Display],
    ) -> String {
        let locale = self.locale(ctx);
        self.translate(&locale, key, Some(count.into()), args)
    }

    /// Like [`I18n::t`] but with line breaks rewritten as `<br>`.
    pub fn t_html(&self, ctx: &mut RequestContext, key: &str, args: &[&dyn Display]) -> String {
        translate::to_html(&self.t(ctx, key, args))
    }

    /// Like [`I18n::tn`] but with line breaks rewritten as `<br>`.
    pub fn tn_html(
        &self,
        ctx: &mut RequestContext,
        key: &str,
        count: impl Into<Numeric>,
        args: &[&dyn Display],
    ) -> String {
        translate::to_html(&self.tn(ctx, key, count, args))
    }

    /// Format a number for this request's locale.
    pub fn fmt_num(&self, ctx: &mut RequestContext, value: impl Into<Numeric>) -> String {
        let locale = self.locale(ctx);
        self.format_number(&locale, value)
    }

    // ========================================================================
    // Translation and formatting against an explicit locale
    // ========================================================================

    /// Translate `key` against an explicit locale key.
    pub fn translate(
        &self,
        locale: &str,
        key: &str,
        count: Option<Numeric>,
        args: &[&dyn Display],
    ) -> String {
        translate::resolve(
            &self.inner.catalog,
            locale,
            key,
            count.as_ref(),
            args,
            self.inner.config.missing_keys,
        )
    }

    /// Format a number against an explicit locale key.
    pub fn format_number(&self, locale: &str, value: impl Into<Numeric>) -> String {
        format_number(self.inner.catalog.translations(locale), &value.into())
    }
}
