//! Dynamic view over field values
//!
//! Validators are selected by name at run time, so they cannot be generic over
//! the field type. Every field is therefore presented to them as a [`Value`]:
//! a borrowed, kind-tagged view produced through the [`Reflect`] trait.
//!
//! Pointer-like wrappers are dereferenced while reflecting: `Option::None`
//! becomes [`Value::Nil`], `Some(x)`, `Box<x>`, `Arc<x>` and `&x` all reflect
//! as `x` itself.

use std::borrow::Cow;
use std::collections::VecDeque;
use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use crate::record::Record;

// ============================================================================
// KIND
// ============================================================================

/// Coarse classification of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Absent value (`None`, missing embedded record).
    Nil,
    /// Boolean.
    Bool,
    /// Signed integer of any width.
    Int,
    /// Unsigned integer of any width.
    Uint,
    /// Floating point number.
    Float,
    /// String-like value (strings, chars, paths).
    Str,
    /// Ordered sequence.
    Seq,
    /// Record with declared fields.
    Record,
}

impl Kind {
    /// Lower-case name of the kind, as used in error messages.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Nil => "nil",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Uint => "uint",
            Self::Float => "float",
            Self::Str => "string",
            Self::Seq => "sequence",
            Self::Record => "record",
        }
    }

    /// Whether the kind is one of the numeric kinds.
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Int | Self::Uint | Self::Float)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// VALUE
// ============================================================================

/// A borrowed, dynamically typed view of a field value.
#[derive(Clone)]
pub enum Value<'a> {
    /// Absent value.
    Nil,
    /// Boolean.
    Bool(bool),
    /// Signed integer, widened to `i64`.
    Int(i64),
    /// Unsigned integer, widened to `u64`.
    Uint(u64),
    /// Floating point number, widened to `f64`.
    Float(f64),
    /// String-like value.
    Str(Cow<'a, str>),
    /// Ordered sequence of element values.
    Seq(Vec<Value<'a>>),
    /// A record whose fields can be inspected.
    Record(&'a dyn Record),
}

impl<'a> Value<'a> {
    /// Builds a value from anything reflectable.
    pub fn of<T: Reflect + ?Sized>(value: &'a T) -> Self {
        value.reflect()
    }

    /// Returns the kind of this value.
    pub const fn kind(&self) -> Kind {
        match self {
            Self::Nil => Kind::Nil,
            Self::Bool(_) => Kind::Bool,
            Self::Int(_) => Kind::Int,
            Self::Uint(_) => Kind::Uint,
            Self::Float(_) => Kind::Float,
            Self::Str(_) => Kind::Str,
            Self::Seq(_) => Kind::Seq,
            Self::Record(_) => Kind::Record,
        }
    }

    /// Returns `true` for [`Value::Nil`].
    pub const fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    /// Returns `true` if the value is the zero value of its type.
    ///
    /// Nil, `false`, `0`, `0.0`, the empty string and the empty sequence are
    /// zero. A record is zero when every one of its declared fields is zero;
    /// fields hidden with `#[record(skip)]` are not declared and never count.
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Nil => true,
            Self::Bool(b) => !b,
            Self::Int(i) => *i == 0,
            Self::Uint(u) => *u == 0,
            Self::Float(f) => *f == 0.0,
            Self::Str(s) => s.is_empty(),
            Self::Seq(items) => items.is_empty(),
            Self::Record(record) => {
                let ty = record.record_type();
                ty.descriptors()
                    .iter()
                    .all(|desc| record.field(desc.name).is_none_or(|v| v.is_zero()))
            }
        }
    }

    /// Normalizes numeric kinds to `f64`. Other kinds yield `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Uint(u) => Some(*u as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the string slice for [`Value::Str`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the elements for [`Value::Seq`].
    pub fn as_seq(&self) -> Option<&[Value<'a>]> {
        match self {
            Self::Seq(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the record for [`Value::Record`].
    pub fn as_record(&self) -> Option<&'a dyn Record> {
        match self {
            Self::Record(record) => Some(*record),
            _ => None,
        }
    }
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => f.write_str("Nil"),
            Self::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Self::Int(i) => f.debug_tuple("Int").field(i).finish(),
            Self::Uint(u) => f.debug_tuple("Uint").field(u).finish(),
            Self::Float(x) => f.debug_tuple("Float").field(x).finish(),
            Self::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Self::Seq(items) => f.debug_tuple("Seq").field(items).finish(),
            Self::Record(record) => f
                .debug_tuple("Record")
                .field(&record.record_type().name())
                .finish(),
        }
    }
}

/// String representation used when values are compared against literal
/// parameters (`required_if`, `oneof`).
impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => f.write_str("<nil>"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Uint(u) => write!(f, "{u}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Str(s) => f.write_str(s),
            Self::Seq(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Record(record) => write!(f, "{{{}}}", record.record_type().name()),
        }
    }
}

// ============================================================================
// REFLECT
// ============================================================================

/// Types that can present themselves as a [`Value`].
///
/// Implemented for the primitive types, strings, paths, pointer-like
/// wrappers and collections. `#[derive(Record)]` implements it for records.
pub trait Reflect {
    /// Returns the dynamic view of `self`.
    fn reflect(&self) -> Value<'_>;
}

macro_rules! reflect_as {
    ($variant:ident($target:ty): $($ty:ty),+ $(,)?) => {
        $(
            impl Reflect for $ty {
                #[inline]
                fn reflect(&self) -> Value<'_> {
                    Value::$variant(<$target>::from(*self))
                }
            }
        )+
    };
}

reflect_as!(Int(i64): i8, i16, i32, i64);
reflect_as!(Uint(u64): u8, u16, u32, u64);
reflect_as!(Float(f64): f32, f64);

impl Reflect for isize {
    #[inline]
    fn reflect(&self) -> Value<'_> {
        Value::Int(*self as i64)
    }
}

impl Reflect for usize {
    #[inline]
    fn reflect(&self) -> Value<'_> {
        Value::Uint(*self as u64)
    }
}

impl Reflect for bool {
    #[inline]
    fn reflect(&self) -> Value<'_> {
        Value::Bool(*self)
    }
}

impl Reflect for char {
    fn reflect(&self) -> Value<'_> {
        Value::Str(Cow::Owned(self.to_string()))
    }
}

impl Reflect for str {
    #[inline]
    fn reflect(&self) -> Value<'_> {
        Value::Str(Cow::Borrowed(self))
    }
}

impl Reflect for String {
    #[inline]
    fn reflect(&self) -> Value<'_> {
        Value::Str(Cow::Borrowed(self.as_str()))
    }
}

impl Reflect for Cow<'_, str> {
    #[inline]
    fn reflect(&self) -> Value<'_> {
        Value::Str(Cow::Borrowed(self.as_ref()))
    }
}

impl Reflect for Path {
    fn reflect(&self) -> Value<'_> {
        Value::Str(self.to_string_lossy())
    }
}

impl Reflect for PathBuf {
    fn reflect(&self) -> Value<'_> {
        self.as_path().reflect()
    }
}

/// Durations reflect as their length in nanoseconds.
impl Reflect for Duration {
    fn reflect(&self) -> Value<'_> {
        Value::Uint(u64::try_from(self.as_nanos()).unwrap_or(u64::MAX))
    }
}

impl<T: Reflect> Reflect for Option<T> {
    fn reflect(&self) -> Value<'_> {
        match self {
            Some(inner) => inner.reflect(),
            None => Value::Nil,
        }
    }
}

impl<T: Reflect + ?Sized> Reflect for &T {
    #[inline]
    fn reflect(&self) -> Value<'_> {
        (**self).reflect()
    }
}

impl<T: Reflect + ?Sized> Reflect for Box<T> {
    #[inline]
    fn reflect(&self) -> Value<'_> {
        (**self).reflect()
    }
}

impl<T: Reflect + ?Sized> Reflect for Arc<T> {
    #[inline]
    fn reflect(&self) -> Value<'_> {
        (**self).reflect()
    }
}

impl<T: Reflect + ?Sized> Reflect for Rc<T> {
    #[inline]
    fn reflect(&self) -> Value<'_> {
        (**self).reflect()
    }
}

impl<T: Reflect> Reflect for [T] {
    fn reflect(&self) -> Value<'_> {
        Value::Seq(self.iter().map(Reflect::reflect).collect())
    }
}

impl<T: Reflect, const N: usize> Reflect for [T; N] {
    fn reflect(&self) -> Value<'_> {
        self.as_slice().reflect()
    }
}

impl<T: Reflect> Reflect for Vec<T> {
    fn reflect(&self) -> Value<'_> {
        self.as_slice().reflect()
    }
}

impl<T: Reflect> Reflect for VecDeque<T> {
    fn reflect(&self) -> Value<'_> {
        Value::Seq(self.iter().map(Reflect::reflect).collect())
    }
}

impl Reflect for Value<'_> {
    fn reflect(&self) -> Value<'_> {
        self.clone()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::nil(Value::Nil, true)]
    #[case::false_(Value::Bool(false), true)]
    #[case::true_(Value::Bool(true), false)]
    #[case::zero_int(Value::Int(0), true)]
    #[case::neg_int(Value::Int(-3), false)]
    #[case::zero_uint(Value::Uint(0), true)]
    #[case::zero_float(Value::Float(0.0), true)]
    #[case::float(Value::Float(0.5), false)]
    #[case::empty_str(Value::Str(Cow::Borrowed("")), true)]
    #[case::str(Value::Str(Cow::Borrowed("x")), false)]
    #[case::empty_seq(Value::Seq(Vec::new()), true)]
    #[case::seq(Value::Seq(vec![Value::Int(0)]), false)]
    fn zero_values(#[case] value: Value<'static>, #[case] zero: bool) {
        assert_eq!(value.is_zero(), zero);
    }

    #[test]
    fn option_dereferences() {
        let none: Option<u32> = None;
        assert!(none.reflect().is_nil());
        assert_eq!(Some(7u32).reflect().as_f64(), Some(7.0));
        assert!(Some(0i32).reflect().is_zero());
    }

    #[test]
    fn pointers_dereference() {
        let boxed = Box::new(String::from("hello"));
        assert_eq!(boxed.reflect().as_str(), Some("hello"));

        let shared = Arc::new(3.5f32);
        assert_eq!(shared.reflect().kind(), Kind::Float);
    }

    #[test]
    fn sequences_reflect_elements() {
        let items = vec![1u8, 0, 2];
        let value = items.reflect();
        assert_eq!(value.kind(), Kind::Seq);
        let elements = value.as_seq().unwrap();
        assert_eq!(elements.len(), 3);
        assert!(elements[1].is_zero());
    }

    #[test]
    fn display_matches_comparison_format() {
        assert_eq!(Value::Nil.to_string(), "<nil>");
        assert_eq!(Value::Float(2.0).to_string(), "2");
        assert_eq!(Value::Float(1.5).to_string(), "1.5");
        assert_eq!(vec!["a", "b"].reflect().to_string(), "[a b]");
    }

    #[test]
    fn numeric_normalization() {
        assert_eq!((-4i16).reflect().as_f64(), Some(-4.0));
        assert_eq!(u64::MAX.reflect().kind(), Kind::Uint);
        assert_eq!("12".reflect().as_f64(), None);
        assert!(Kind::Uint.is_numeric());
        assert!(!Kind::Str.is_numeric());
    }

    #[test]
    fn paths_reflect_as_strings() {
        let path = PathBuf::from("/tmp/data");
        assert_eq!(path.reflect().as_str(), Some("/tmp/data"));
    }
}
