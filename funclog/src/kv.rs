//! Labeled values, optionally computed on demand
use crate::arg::{Arg, IntoArg};

/// A value paired with the key used to label it in structured logs.
///
/// The value may be a deferred computation: it is evaluated only if the log call it is handed
/// to turns out to be enabled, and at most once. Pairs are moved into the log call and dropped
/// when it returns.
#[derive(Debug)]
pub struct KeyValuePair<'a> {
    key: String,
    value: Arg<'a>,
}

impl<'a> KeyValuePair<'a> {
    pub fn new(key: impl Into<String>, value: impl IntoArg<'a>) -> Self {
        Self {
            key: key.into(),
            value: value.into_arg(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &Arg<'a> {
        &self.value
    }

    /// True while the value still awaits evaluation.
    pub fn is_deferred(&self) -> bool {
        self.value.is_deferred()
    }

    pub fn into_parts(self) -> (String, Arg<'a>) {
        (self.key, self.value)
    }
}

/// Pairs a key with a value that is already known.
pub fn kvp<'a>(key: impl Into<String>, value: impl IntoArg<'a>) -> KeyValuePair<'a> {
    KeyValuePair::new(key, value)
}

/// Pairs a key with a computation evaluated only if the event is enabled.
///
/// ```
/// use funclog::kv::kfp;
/// let items = vec![1, 2, 3];
/// let pair = kfp("size", || items.len());
/// assert!(pair.is_deferred());
/// ```
pub fn kfp<'a, F, R>(key: impl Into<String>, func: F) -> KeyValuePair<'a>
where
    F: FnOnce() -> R + 'a,
    R: IntoArg<'a>,
{
    KeyValuePair::new(key, Arg::deferred(func))
}

/// Like [`kfp`], for a one-argument function applied to `param` on evaluation.
///
/// ```
/// use funclog::kv::kfp1;
/// let pair = kfp1("length", |s: &str| s.trim().len(), "  Four ");
/// assert_eq!(pair.key(), "length");
/// ```
pub fn kfp1<'a, F, T, R>(key: impl Into<String>, func: F, param: T) -> KeyValuePair<'a>
where
    F: FnOnce(T) -> R + 'a,
    T: 'a,
    R: IntoArg<'a>,
{
    kfp(key, move || func(param))
}

/// Like [`kfp`], for a two-argument function applied to `first` and `second` on evaluation.
pub fn kfp2<'a, F, T, U, R>(
    key: impl Into<String>,
    func: F,
    first: T,
    second: U,
) -> KeyValuePair<'a>
where
    F: FnOnce(T, U) -> R + 'a,
    T: 'a,
    U: 'a,
    R: IntoArg<'a>,
{
    kfp(key, move || func(first, second))
}
