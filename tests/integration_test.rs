//! Integration tests for parlance

use parlance::*;
use std::collections::HashMap;

fn catalog() -> Catalog {
    let mut en = Translations::new();
    en.set("hello", "Hello %s,");
    en.set("apple.zero", "no apples");
    en.set("apple.one", "one apple");
    en.set("apple.other", "{{.n}} apples");

    let mut fr = Translations::new();
    fr.set("decimalMark", ",");
    fr.set("thousandsMark", ".");
    fr.set("hello", "Bonjour %s,");
    fr.set("apple.other", "{{.n}} pommes");

    let mut tables = HashMap::new();
    tables.insert("en".to_string(), en);
    tables.insert("fr".to_string(), fr);
    Catalog::new(tables, "en", KeyFormat::LanguageOnly).unwrap()
}

#[test]
fn negotiate_persist_and_round_trip() {
    let i18n = I18n::new(catalog(), I18nConfig::default());

    // First request: no cookie, negotiation runs and persists the result.
    let mut first = RequestContext::new().with_header("Accept-Language", "fr-CA,en;q=0.5");
    assert_eq!(i18n.locale(&mut first), "fr");

    let cookies = first.take_set_cookies();
    assert_eq!(cookies.len(), 1);
    let cookie = &cookies[0];
    assert!(cookie.starts_with("locale=fr;"));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("Max-Age=94608000"));

    // Second request: only the persisted value, no header. Resolution must
    // adopt it without negotiating and without re-writing the cookie.
    let mut second = RequestContext::new().with_cookie("locale", "fr");
    assert_eq!(i18n.locale(&mut second), "fr");
    assert!(second.set_cookies().is_empty());
}

#[test]
fn repeated_resolution_is_memoized_with_one_write() {
    let i18n = I18n::new(catalog(), I18nConfig::default());
    let mut ctx = RequestContext::new().with_header("Accept-Language", "fr");

    let a = i18n.locale(&mut ctx);
    let b = i18n.locale(&mut ctx);
    assert_eq!(a, b);
    assert_eq!(ctx.set_cookies().len(), 1);
}

#[test]
fn pluralized_translation_end_to_end() {
    let i18n = I18n::new(catalog(), I18nConfig::default());
    let mut ctx = RequestContext::new().with_header("Accept-Language", "en");

    assert_eq!(i18n.tn(&mut ctx, "apple", 0u32, &[]), "no apples");
    assert_eq!(i18n.tn(&mut ctx, "apple", 1u32, &[]), "one apple");
    assert_eq!(i18n.tn(&mut ctx, "apple", 7u32, &[]), "7 apples");
}

#[test]
fn translation_with_format_arguments() {
    let i18n = I18n::new(catalog(), I18nConfig::default());
    let mut ctx = RequestContext::new().with_query_param("locale", "fr");

    assert_eq!(i18n.t(&mut ctx, "hello", &[&"John Doe"]), "Bonjour John Doe,");
}

#[test]
fn missing_key_policy_split() {
    let dev = I18n::new(catalog(), I18nConfig::default());
    let prod = I18n::new(
        catalog(),
        I18nConfig::default().with_missing_keys(MissingKeys::Empty),
    );

    let mut ctx = RequestContext::new();
    assert_eq!(dev.t(&mut ctx, "unknown.key", &[]), "unknown.key");

    let mut ctx = RequestContext::new();
    assert_eq!(prod.t(&mut ctx, "unknown.key", &[]), "");
}

#[test]
fn number_formatting_per_locale() {
    let i18n = I18n::new(catalog(), I18nConfig::default());

    let mut fr = RequestContext::new().with_header("Accept-Language", "fr");
    assert_eq!(i18n.fmt_num(&mut fr, 1234567.5), "1.234.567,5");

    let mut en = RequestContext::new().with_header("Accept-Language", "en");
    assert_eq!(i18n.fmt_num(&mut en, 1234567.5), "1,234,567.5");

    // Malformed pre-rendered input is returned unchanged.
    let mut fr = RequestContext::new().with_header("Accept-Language", "fr");
    assert_eq!(i18n.fmt_num(&mut fr, "12.34.56"), "12.34.56");
}

#[test]
fn explicit_set_locale() {
    let i18n = I18n::new(catalog(), I18nConfig::default());
    let mut ctx = RequestContext::new().with_header("Accept-Language", "en");

    assert!(matches!(
        i18n.set_locale(&mut ctx, "de"),
        Err(Error::UnknownLocale(_))
    ));
    assert!(ctx.locale().is_none());

    i18n.set_locale(&mut ctx, "fr").unwrap();
    assert_eq!(i18n.locale(&mut ctx), "fr");
    assert_eq!(i18n.t(&mut ctx, "hello", &[&"Jo"]), "Bonjour Jo,");
}

#[test]
fn global_init_is_first_call_wins() {
    let first = I18n::init(catalog(), I18nConfig::default());
    assert!(first.is_ok());

    // Second initialization must fail and must not disturb the first.
    let second = I18n::init(catalog(), I18nConfig::new().with_persist(false));
    assert!(matches!(second, Err(Error::AlreadyInitialized)));

    let global = I18n::global().expect("global handle registered");
    let mut ctx = RequestContext::new().with_header("Accept-Language", "fr");
    assert_eq!(global.locale(&mut ctx), "fr");
    // Persistence from the *first* configuration is still in effect.
    assert_eq!(ctx.set_cookies().len(), 1);
}

#[test]
fn matcher_order_is_caller_configured() {
    // Header strategy registered before the parameter strategy: the header
    // wins even though a locale parameter is present.
    let i18n = I18n::with_matchers(
        catalog(),
        I18nConfig::default(),
        vec![
            Box::new(AcceptLanguageMatcher::new()),
            Box::new(ParamMatcher::new("locale")),
        ],
    );

    let mut ctx = RequestContext::new()
        .with_header("Accept-Language", "en")
        .with_query_param("locale", "fr");
    assert_eq!(i18n.locale(&mut ctx), "en");
}

#[cfg(feature = "handlebars")]
#[test]
fn handlebars_rendering_end_to_end() {
    let i18n = I18n::new(catalog(), I18nConfig::default());
    let mut registry = handlebars::Handlebars::new();
    register_helpers(&mut registry, &i18n);

    let mut ctx = RequestContext::new().with_header("Accept-Language", "fr");
    let locale = i18n.locale(&mut ctx);

    let out = registry
        .render_template(
            r#"{{trans "hello" name}} {{transn "apple" n}}"#,
            &serde_json::json!({"locale": locale, "name": "John", "n": 3}),
        )
        .unwrap();
    assert_eq!(out, "Bonjour John, 3 pommes");
}
