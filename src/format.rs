//! Locale-aware number rendering
//!
//! Numbers are first normalized to a canonical decimal string, then marked
//! up with the locale's separators. Formatting is pure: malformed input is
//! returned unchanged rather than rejected.

use crate::catalog::{DECIMAL_MARK_KEY, THOUSANDS_MARK_KEY, Translations};

/// A numeric value acceptable to the formatter and the plural resolver.
///
/// A closed set of representations with one normalization point,
/// [`Numeric::to_decimal_string`]. Pre-rendered text is carried through
/// as-is so callers can hand over values they already formatted.
#[derive(Debug, Clone, PartialEq)]
pub enum Numeric {
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Text(String),
}

impl Numeric {
    /// Canonical decimal form: base-10 integers without separators, floats
    /// in their shortest round-trippable form, text unchanged.
    pub fn to_decimal_string(&self) -> String {
        match self {
            Numeric::Unsigned(n) => n.to_string(),
            Numeric::Signed(n) => n.to_string(),
            Numeric::Float(n) => n.to_string(),
            Numeric::Text(s) => s.clone(),
        }
    }

    pub(crate) fn is_zero(&self) -> bool {
        match self {
            Numeric::Unsigned(n) => *n == 0,
            Numeric::Signed(n) => *n == 0,
            Numeric::Float(n) => *n == 0.0,
            Numeric::Text(s) => s == "0",
        }
    }

    pub(crate) fn is_one(&self) -> bool {
        match self {
            Numeric::Unsigned(n) => *n == 1,
            Numeric::Signed(n) => *n == 1,
            Numeric::Float(n) => *n == 1.0,
            Numeric::Text(s) => s == "1",
        }
    }
}

macro_rules! numeric_from_unsigned {
    ($($t:ty),*) => {$(
        impl From<$t> for Numeric {
            fn from(n: $t) -> Self {
                Numeric::Unsigned(n as u64)
            }
        }
    )*};
}

macro_rules! numeric_from_signed {
    ($($t:ty),*) => {$(
        impl From<$t> for Numeric {
            fn from(n: $t) -> Self {
                Numeric::Signed(n as i64)
            }
        }
    )*};
}

numeric_from_unsigned!(u8, u16, u32, u64, usize);
numeric_from_signed!(i8, i16, i32, i64, isize);

impl From<f64> for Numeric {
    fn from(n: f64) -> Self {
        Numeric::Float(n)
    }
}

impl From<f32> for Numeric {
    fn from(n: f32) -> Self {
        // Rendered at f32 precision: widening to f64 changes the shortest
        // decimal form ("0.1" becomes "0.10000000149...").
        Numeric::Text(n.to_string())
    }
}

impl From<&str> for Numeric {
    fn from(s: &str) -> Self {
        Numeric::Text(s.to_string())
    }
}

impl From<String> for Numeric {
    fn from(s: String) -> Self {
        Numeric::Text(s)
    }
}

/// Separators for a locale: the reserved `decimalMark` / `thousandsMark`
/// entries, defaulting to `.` and `,`.
pub(crate) fn marks(table: Option<&Translations>) -> (String, String) {
    let decimal = table
        .and_then(|t| t.get(DECIMAL_MARK_KEY))
        .unwrap_or(".")
        .to_string();
    let thousands = table
        .and_then(|t| t.get(THOUSANDS_MARK_KEY))
        .unwrap_or(",")
        .to_string();
    (decimal, thousands)
}

/// Format a number with the separators configured in `table`.
///
/// The integer part is grouped every three digits from the right, with the
/// sign excluded from grouping. Input with more than one `.` cannot be a
/// number and is returned unchanged.
pub fn format_number(table: Option<&Translations>, value: &Numeric) -> String {
    let raw = value.to_decimal_string();

    if raw.matches('.').count() > 1 {
        return raw;
    }

    let (decimal_mark, thousands_mark) = marks(table);

    let (int_part, frac_part) = match raw.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (raw.as_str(), None),
    };

    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    let chars: Vec<char> = digits.chars().collect();
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            grouped.push_str(&thousands_mark);
        }
        grouped.push(*c);
    }

    match frac_part {
        Some(frac) => format!("{sign}{grouped}{decimal_mark}{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn french_marks() -> Translations {
        let mut t = Translations::new();
        t.set(DECIMAL_MARK_KEY, ",");
        t.set(THOUSANDS_MARK_KEY, ".");
        t
    }

    #[test]
    fn default_marks_without_table() {
        assert_eq!(format_number(None, &Numeric::from(1234567u64)), "1,234,567");
    }

    #[test]
    fn swapped_marks() {
        let t = french_marks();
        assert_eq!(
            format_number(Some(&t), &Numeric::from(1234567.5)),
            "1.234.567,5"
        );
    }

    #[test]
    fn two_decimal_points_returned_unchanged() {
        let t = french_marks();
        assert_eq!(format_number(Some(&t), &Numeric::from("12.34.56")), "12.34.56");
    }

    #[test]
    fn small_integers_not_grouped() {
        assert_eq!(format_number(None, &Numeric::from(7u8)), "7");
        assert_eq!(format_number(None, &Numeric::from(999u32)), "999");
        assert_eq!(format_number(None, &Numeric::from(1000u32)), "1,000");
    }

    #[test]
    fn negative_numbers_group_without_sign() {
        assert_eq!(format_number(None, &Numeric::from(-123456i64)), "-123,456");
        assert_eq!(format_number(None, &Numeric::from(-1234.5)), "-1,234.5");
    }

    #[test]
    fn float_shortest_form() {
        assert_eq!(Numeric::from(1234567.5).to_decimal_string(), "1234567.5");
        assert_eq!(Numeric::from(2.0f64).to_decimal_string(), "2");
        assert_eq!(Numeric::from(0.1f32).to_decimal_string(), "0.1");
    }

    #[test]
    fn pre_rendered_text_passes_through() {
        assert_eq!(format_number(None, &Numeric::from("1234.5")), "1,234.5");
    }

    #[test]
    fn zero_and_one_detection() {
        assert!(Numeric::from(0u8).is_zero());
        assert!(Numeric::from(0.0).is_zero());
        assert!(Numeric::from(1i32).is_one());
        assert!(!Numeric::from(2u8).is_zero());
        assert!(Numeric::from("1").is_one());
    }
}
