//! String to field type conversion
//!
//! Every value a source produces is a string; [`Coerce`] turns it into the
//! declared type of the field it is assigned to.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::CoerceError;

/// Types a raw configuration string can be converted into.
pub trait Coerce: Sized {
    /// Parses `raw`.
    fn coerce(raw: &str) -> Result<Self, CoerceError>;
}

macro_rules! coerce_from_str {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Coerce for $ty {
                fn coerce(raw: &str) -> Result<Self, CoerceError> {
                    raw.trim()
                        .parse()
                        .map_err(|_| CoerceError::invalid(raw, stringify!($ty)))
                }
            }
        )+
    };
}

coerce_from_str!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

/// Accepts `true/false`, `1/0`, `yes/no` and `on/off`, ignoring case.
impl Coerce for bool {
    fn coerce(raw: &str) -> Result<Self, CoerceError> {
        let value = raw.trim();
        for truthy in ["true", "1", "yes", "on"] {
            if value.eq_ignore_ascii_case(truthy) {
                return Ok(true);
            }
        }
        for falsy in ["false", "0", "no", "off"] {
            if value.eq_ignore_ascii_case(falsy) {
                return Ok(false);
            }
        }
        Err(CoerceError::invalid(raw, "bool"))
    }
}

impl Coerce for char {
    fn coerce(raw: &str) -> Result<Self, CoerceError> {
        let mut chars = raw.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(CoerceError::invalid(raw, "char")),
        }
    }
}

impl Coerce for String {
    fn coerce(raw: &str) -> Result<Self, CoerceError> {
        Ok(raw.to_owned())
    }
}

impl Coerce for PathBuf {
    fn coerce(raw: &str) -> Result<Self, CoerceError> {
        Ok(PathBuf::from(raw))
    }
}

/// Human-readable durations: `250ms`, `30s`, `1m 30s`, `2h`.
impl Coerce for Duration {
    fn coerce(raw: &str) -> Result<Self, CoerceError> {
        humantime::parse_duration(raw.trim())
            .map_err(|e| CoerceError::new(format!("cannot parse `{raw}` as duration: {e}")))
    }
}

/// The empty string is `None`.
impl<T: Coerce> Coerce for Option<T> {
    fn coerce(raw: &str) -> Result<Self, CoerceError> {
        if raw.trim().is_empty() {
            Ok(None)
        } else {
            T::coerce(raw).map(Some)
        }
    }
}

/// Comma-separated elements; the empty string is an empty vector.
impl<T: Coerce> Coerce for Vec<T> {
    fn coerce(raw: &str) -> Result<Self, CoerceError> {
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        raw.split(',').map(|item| T::coerce(item.trim())).collect()
    }
}

impl<T: Coerce> Coerce for Box<T> {
    fn coerce(raw: &str) -> Result<Self, CoerceError> {
        T::coerce(raw).map(Box::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("true", true)]
    #[case("TRUE", true)]
    #[case("1", true)]
    #[case("yes", true)]
    #[case("On", true)]
    #[case("false", false)]
    #[case("0", false)]
    #[case("no", false)]
    #[case("off", false)]
    fn bool_spellings(#[case] raw: &str, #[case] expected: bool) {
        assert_eq!(bool::coerce(raw).unwrap(), expected);
    }

    #[test]
    fn bool_rejects_other_words() {
        let err = bool::coerce("maybe").unwrap_err();
        assert_eq!(err.to_string(), "cannot parse `maybe` as bool");
    }

    #[test]
    fn numbers_trim_whitespace() {
        assert_eq!(u16::coerce(" 8080 ").unwrap(), 8080);
        assert_eq!(i32::coerce("-3").unwrap(), -3);
        assert_eq!(f64::coerce("0.25").unwrap(), 0.25);
        assert!(u8::coerce("256").is_err());
        assert!(u8::coerce("-1").is_err());
    }

    #[test]
    fn durations_use_human_syntax() {
        assert_eq!(Duration::coerce("30s").unwrap(), Duration::from_secs(30));
        assert_eq!(Duration::coerce("1m 30s").unwrap(), Duration::from_secs(90));
        assert!(Duration::coerce("soon").is_err());
    }

    #[test]
    fn options_and_lists() {
        assert_eq!(Option::<u8>::coerce("").unwrap(), None);
        assert_eq!(Option::<u8>::coerce("7").unwrap(), Some(7));
        assert_eq!(Vec::<u16>::coerce("80, 443").unwrap(), vec![80, 443]);
        assert_eq!(Vec::<String>::coerce("").unwrap(), Vec::<String>::new());
        assert!(Vec::<u16>::coerce("80,http").is_err());
    }

    #[test]
    fn single_char() {
        assert_eq!(char::coerce("x").unwrap(), 'x');
        assert!(char::coerce("xy").is_err());
        assert!(char::coerce("").is_err());
    }
}
