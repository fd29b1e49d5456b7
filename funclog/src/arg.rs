//! Unresolved arguments, as supplied by call sites
use crate::{loggable::Loggable, value::Value};
use std::{
    borrow::Cow,
    collections::{BTreeMap, HashMap},
    fmt,
    hash::BuildHasher,
};

/// A value that has not been resolved yet.
///
/// Nothing inside an `Arg` is evaluated until the argument is normalized: deferred
/// computations are not called and structured values are not asked for their representation.
pub enum Arg<'a> {
    Value(Value),
    Seq(Vec<Arg<'a>>),
    Map(Vec<(String, Arg<'a>)>),
    Object(Box<dyn Loggable + 'a>),
    Deferred(Box<dyn FnOnce() -> Arg<'a> + 'a>),
}

impl<'a> Arg<'a> {
    /// Wraps a zero-argument computation, called only when the argument is normalized.
    pub fn deferred<F, R>(func: F) -> Self
    where
        F: FnOnce() -> R + 'a,
        R: IntoArg<'a>,
    {
        Arg::Deferred(Box::new(move || func().into_arg()))
    }

    pub fn object<L: Loggable + 'a>(loggable: L) -> Self {
        Arg::Object(Box::new(loggable))
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, Arg::Deferred(_))
    }

    /// Resolves the argument into a plain value, evaluating deferred computations and asking
    /// structured values for their representation.
    pub fn into_value(self) -> Value {
        match self {
            Arg::Value(value) => value,
            Arg::Deferred(func) => func().into_value(),
            Arg::Object(loggable) => loggable.log().into_value(),
            Arg::Seq(items) => Value::Seq(items.into_iter().map(Arg::into_value).collect()),
            Arg::Map(entries) => Value::Map(
                entries
                    .into_iter()
                    .map(|(key, arg)| (key, arg.into_value()))
                    .collect(),
            ),
        }
    }
}

impl fmt::Debug for Arg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Arg::Seq(items) => f.debug_tuple("Seq").field(items).finish(),
            Arg::Map(entries) => f.debug_tuple("Map").field(entries).finish(),
            Arg::Object(_) => f.write_str("Object(..)"),
            Arg::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

/// Conversion into an unresolved argument.
///
/// Every [`Loggable`] converts into [`Arg::Object`], so structured values keep their own
/// representation wherever they are nested.
pub trait IntoArg<'a> {
    fn into_arg(self) -> Arg<'a>;
}

impl<'a> IntoArg<'a> for Arg<'a> {
    fn into_arg(self) -> Arg<'a> {
        self
    }
}

impl<'a> IntoArg<'a> for Value {
    fn into_arg(self) -> Arg<'a> {
        Arg::Value(self)
    }
}

impl<'a> IntoArg<'a> for &Value {
    fn into_arg(self) -> Arg<'a> {
        Arg::Value(self.clone())
    }
}

impl<'a, T: Loggable + 'a> IntoArg<'a> for T {
    fn into_arg(self) -> Arg<'a> {
        Arg::Object(Box::new(self))
    }
}

macro_rules! impl_into_arg_scalar {
    ($($t:ty),+) => {
        $(
            impl<'a> IntoArg<'a> for $t {
                fn into_arg(self) -> Arg<'a> {
                    Arg::Value(Value::from(self))
                }
            }

            impl<'a> IntoArg<'a> for &$t {
                fn into_arg(self) -> Arg<'a> {
                    Arg::Value(Value::from(*self))
                }
            }
        )+
    };
}

impl_into_arg_scalar!(
    i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, bool, char
);

impl<'a> IntoArg<'a> for () {
    fn into_arg(self) -> Arg<'a> {
        Arg::Value(Value::Null)
    }
}

impl<'a> IntoArg<'a> for &str {
    fn into_arg(self) -> Arg<'a> {
        Arg::Value(Value::from(self))
    }
}

impl<'a> IntoArg<'a> for &&str {
    fn into_arg(self) -> Arg<'a> {
        Arg::Value(Value::from(*self))
    }
}

impl<'a> IntoArg<'a> for String {
    fn into_arg(self) -> Arg<'a> {
        Arg::Value(Value::String(self))
    }
}

impl<'a> IntoArg<'a> for &String {
    fn into_arg(self) -> Arg<'a> {
        Arg::Value(Value::String(self.clone()))
    }
}

impl<'a> IntoArg<'a> for Cow<'_, str> {
    fn into_arg(self) -> Arg<'a> {
        Arg::Value(Value::String(self.into_owned()))
    }
}

impl<'a, T: IntoArg<'a>> IntoArg<'a> for Option<T> {
    fn into_arg(self) -> Arg<'a> {
        self.map_or(Arg::Value(Value::Null), IntoArg::into_arg)
    }
}

impl<'a, T> IntoArg<'a> for &'a Option<T>
where
    &'a T: IntoArg<'a>,
{
    fn into_arg(self) -> Arg<'a> {
        self.as_ref().map_or(Arg::Value(Value::Null), IntoArg::into_arg)
    }
}

impl<'a, T: IntoArg<'a>> IntoArg<'a> for Vec<T> {
    fn into_arg(self) -> Arg<'a> {
        Arg::Seq(self.into_iter().map(IntoArg::into_arg).collect())
    }
}

impl<'a, T: IntoArg<'a>, const N: usize> IntoArg<'a> for [T; N] {
    fn into_arg(self) -> Arg<'a> {
        Arg::Seq(self.into_iter().map(IntoArg::into_arg).collect())
    }
}

impl<'a, T> IntoArg<'a> for &'a Vec<T>
where
    &'a T: IntoArg<'a>,
{
    fn into_arg(self) -> Arg<'a> {
        self.as_slice().into_arg()
    }
}

impl<'a, T> IntoArg<'a> for &'a [T]
where
    &'a T: IntoArg<'a>,
{
    fn into_arg(self) -> Arg<'a> {
        Arg::Seq(self.iter().map(IntoArg::into_arg).collect())
    }
}

impl<'a, K, V, S> IntoArg<'a> for HashMap<K, V, S>
where
    K: fmt::Display,
    V: IntoArg<'a>,
    S: BuildHasher,
{
    fn into_arg(self) -> Arg<'a> {
        Arg::Map(
            self.into_iter()
                .map(|(key, value)| (key.to_string(), value.into_arg()))
                .collect(),
        )
    }
}

impl<'a, K, V, S> IntoArg<'a> for &'a HashMap<K, V, S>
where
    K: fmt::Display,
    &'a V: IntoArg<'a>,
    S: BuildHasher,
{
    fn into_arg(self) -> Arg<'a> {
        Arg::Map(
            self.iter()
                .map(|(key, value)| (key.to_string(), value.into_arg()))
                .collect(),
        )
    }
}

impl<'a, K, V> IntoArg<'a> for BTreeMap<K, V>
where
    K: fmt::Display,
    V: IntoArg<'a>,
{
    fn into_arg(self) -> Arg<'a> {
        Arg::Map(
            self.into_iter()
                .map(|(key, value)| (key.to_string(), value.into_arg()))
                .collect(),
        )
    }
}

impl<'a, K, V> IntoArg<'a> for &'a BTreeMap<K, V>
where
    K: fmt::Display,
    &'a V: IntoArg<'a>,
{
    fn into_arg(self) -> Arg<'a> {
        Arg::Map(
            self.iter()
                .map(|(key, value)| (key.to_string(), value.into_arg()))
                .collect(),
        )
    }
}
