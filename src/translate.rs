//! Translation resolution: plural-form fallback and substitution
//!
//! Resolution walks the plural-suffixed keys (`<key>.zero`, `<key>.one`,
//! `<key>.other`, then the bare key), fills printf-style verbs from the
//! positional arguments, and finally replaces the count placeholder with
//! the locale-formatted count. The placeholder pass runs last so the
//! placeholder text can never be consumed as a format verb.

use crate::catalog::{Catalog, Translations};
use crate::config::MissingKeys;
use crate::format::{Numeric, format_number};
use std::fmt::Display;

/// Literal token inside a translation value replaced by the formatted count.
pub const COUNT_PLACEHOLDER: &str = "{{.n}}";

/// Resolve `key` against `locale`'s table.
///
/// `count` of `None` means "not a countable translation": the `.zero` and
/// `.one` probes are skipped and resolution starts at `.other`. A locale
/// with no table at all falls straight through to the missing-key policy.
pub(crate) fn resolve(
    catalog: &Catalog,
    locale: &str,
    key: &str,
    count: Option<&Numeric>,
    args: &[&dyn Display],
    missing: MissingKeys,
) -> String {
    let table = catalog.translations(locale);

    let template = table.and_then(|t| lookup_plural(t, key, count));

    let Some(template) = template else {
        return match missing {
            MissingKeys::Key => key.to_string(),
            MissingKeys::Empty => String::new(),
        };
    };

    let mut out = apply_args(template, args);

    if let Some(n) = count {
        if out.contains(COUNT_PLACEHOLDER) {
            out = out.replace(COUNT_PLACEHOLDER, &format_number(table, n));
        }
    }

    out
}

/// HTML-safe rendering: line breaks become `<br>` markup.
pub(crate) fn to_html(s: &str) -> String {
    s.replace('\n', "<br>")
}

/// Plural-form lookup, first hit wins:
/// `.zero` (count 0) → `.one` (count 1) → `.other` → bare key.
fn lookup_plural<'a>(table: &'a Translations, key: &str, count: Option<&Numeric>) -> Option<&'a str> {
    if let Some(n) = count {
        if n.is_zero() {
            if let Some(v) = table.get(&format!("{key}.zero")) {
                return Some(v);
            }
        } else if n.is_one() {
            if let Some(v) = table.get(&format!("{key}.one")) {
                return Some(v);
            }
        }
    }

    if let Some(v) = table.get(&format!("{key}.other")) {
        return Some(v);
    }

    table.get(key)
}

/// Fill printf-style verbs (`%s`, `%d`, `%f`, `%v`) left-to-right from
/// `args`; `%%` escapes a literal percent. Verbs beyond the supplied
/// arguments are left in place rather than reported.
fn apply_args(template: &str, args: &[&dyn Display]) -> String {
    if args.is_empty() && !template.contains('%') {
        return template.to_string();
    }

    let mut out = String::with_capacity(template.len());
    let mut next_arg = 0;
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        match chars.peek() {
            Some('%') => {
                chars.next();
                out.push('%');
            }
            Some(verb @ ('s' | 'd' | 'f' | 'v')) => {
                if let Some(arg) = args.get(next_arg) {
                    out.push_str(&arg.to_string());
                    next_arg += 1;
                    chars.next();
                } else {
                    out.push('%');
                    out.push(*verb);
                    chars.next();
                }
            }
            _ => out.push('%'),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::KeyFormat;
    use std::collections::HashMap;

    fn catalog() -> Catalog {
        let mut en = Translations::new();
        en.set("hello", "Hello %s,");
        en.set("apple.zero", "no apples");
        en.set("apple.one", "one apple");
        en.set("apple.other", "{{.n}} apples");
        en.set("coins", "coins: {{.n}}");
        en.set("bio", "line one\nline two");

        let mut fr = Translations::new();
        fr.set("decimalMark", ",");
        fr.set("thousandsMark", " ");
        fr.set("apple.other", "{{.n}} pommes");

        let mut tables = HashMap::new();
        tables.insert("en".to_string(), en);
        tables.insert("fr".to_string(), fr);
        Catalog::new(tables, "en", KeyFormat::LanguageOnly).unwrap()
    }

    fn t(locale: &str, key: &str, count: Option<Numeric>) -> String {
        resolve(
            &catalog(),
            locale,
            key,
            count.as_ref(),
            &[],
            MissingKeys::Key,
        )
    }

    #[test]
    fn plural_forms() {
        assert_eq!(t("en", "apple", Some(0u8.into())), "no apples");
        assert_eq!(t("en", "apple", Some(1u8.into())), "one apple");
        assert_eq!(t("en", "apple", Some(7u8.into())), "7 apples");
    }

    #[test]
    fn no_count_skips_zero_and_one_forms() {
        // Without a count, `.other` is used even though `.zero` exists.
        assert_eq!(t("en", "apple", None), "{{.n}} apples");
    }

    #[test]
    fn count_formatted_with_locale_marks() {
        assert_eq!(
            t("fr", "apple", Some(1234567u64.into())),
            "1 234 567 pommes"
        );
    }

    #[test]
    fn bare_key_fallback() {
        assert_eq!(t("en", "coins", Some(3u8.into())), "coins: 3");
    }

    #[test]
    fn missing_key_policies() {
        let c = catalog();
        assert_eq!(
            resolve(&c, "en", "nope", None, &[], MissingKeys::Key),
            "nope"
        );
        assert_eq!(
            resolve(&c, "en", "nope", None, &[], MissingKeys::Empty),
            ""
        );
    }

    #[test]
    fn unknown_locale_degrades_to_missing_key_policy() {
        let c = catalog();
        assert_eq!(
            resolve(&c, "xx", "apple", Some(&1u8.into()), &[], MissingKeys::Empty),
            ""
        );
    }

    #[test]
    fn format_args_substitution() {
        let c = catalog();
        let out = resolve(&c, "en", "hello", None, &[&"John Doe"], MissingKeys::Key);
        assert_eq!(out, "Hello John Doe,");
    }

    #[test]
    fn apply_args_verbs_and_escapes() {
        assert_eq!(apply_args("%s has %d items", &[&"a", &3]), "a has 3 items");
        assert_eq!(apply_args("100%% sure", &[]), "100% sure");
        assert_eq!(apply_args("50% off", &[]), "50% off");
        // Exhausted arguments leave the verb visible.
        assert_eq!(apply_args("%s and %s", &[&"x"]), "x and %s");
    }

    #[test]
    fn placeholder_replaced_after_args() {
        let en = Translations::from([("mix.other", "%s sees {{.n}} birds")]);
        let mut tables = HashMap::new();
        tables.insert("en".to_string(), en);
        let c = Catalog::new(tables, "en", KeyFormat::LanguageOnly).unwrap();

        let out = resolve(&c, "en", "mix", Some(&2u8.into()), &[&"Ada"], MissingKeys::Key);
        assert_eq!(out, "Ada sees 2 birds");
    }

    #[test]
    fn html_variant_rewrites_line_breaks() {
        assert_eq!(to_html("line one\nline two"), "line one<br>line two");
    }
}
