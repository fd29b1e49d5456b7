//! Types that know how to render themselves as structured fields
//!
//! Implementing [`Loggable`] marks a type whose preferred logged form is a set of structured
//! properties rather than a single scalar. By default every declared field is captured, as
//! produced by [`LogFields`] (usually derived). That is not always appropriate: a credential
//! should not log its secret. Overriding [`Loggable::log_format`] replaces the default dump with
//! exactly the entries added to a [`Builder`], which can also rename them.
//!
//! ```
//! use funclog::prelude::*;
//!
//! #[derive(LogFields)]
//! struct Credential {
//!     username: String,
//!     secret: String,
//!     joined_year: u16,
//! }
//!
//! impl Loggable for Credential {
//!     fn log_format(&self) -> Option<Builder> {
//!         Some(
//!             Builder::new()
//!                 .with("user", &self.username)
//!                 .with("joined", self.joined_year),
//!         )
//!     }
//! }
//!
//! let credential = Credential {
//!     username: String::from("alice"),
//!     secret: String::from("hunter2"),
//!     joined_year: 2019,
//! };
//! assert_eq!(credential.log().to_string(), "{user=alice, joined=2019}");
//! ```
use crate::{
    arg::IntoArg,
    argument::StructuredArgument,
    value::Value,
};

/// Full structural dump of a value's own declared fields, keyed by field name.
///
/// `#[derive(LogFields)]` implements it for structs: named fields use their name, tuple fields
/// their index. Field values are resolved through [`IntoArg`], so a nested [`Loggable`] field
/// contributes its own representation.
pub trait LogFields {
    fn log_fields(&self) -> Builder;
}

/// Capability of a value to be logged as a set of structured properties.
pub trait Loggable: LogFields {
    /// Custom representation. `None` keeps the default field dump.
    fn log_format(&self) -> Option<Builder> {
        None
    }

    /// Evaluates the object in its current state.
    fn log(&self) -> StructuredArgument {
        self.log_format()
            .unwrap_or_else(|| self.log_fields())
            .build()
    }
}

impl<T: LogFields + ?Sized> LogFields for &T {
    fn log_fields(&self) -> Builder {
        (**self).log_fields()
    }
}

impl<T: Loggable + ?Sized> Loggable for &T {
    fn log_format(&self) -> Option<Builder> {
        (**self).log_format()
    }

    fn log(&self) -> StructuredArgument {
        (**self).log()
    }
}

impl<T: LogFields + ?Sized> LogFields for Box<T> {
    fn log_fields(&self) -> Builder {
        (**self).log_fields()
    }
}

impl<T: Loggable + ?Sized> Loggable for Box<T> {
    fn log_format(&self) -> Option<Builder> {
        (**self).log_format()
    }

    fn log(&self) -> StructuredArgument {
        (**self).log()
    }
}

/// Accumulates the entries of a logged representation.
///
/// Values are resolved as they are added; this only ever runs while a log call is being
/// normalized.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Builder {
    added: Vec<(String, Value)>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a property; a second value for the same key replaces the first one in place.
    #[must_use]
    pub fn with<'a>(mut self, key: impl Into<String>, value: impl IntoArg<'a>) -> Self {
        let key = key.into();
        let value = value.into_arg().into_value();
        match self.added.iter_mut().find(|(name, _)| *name == key) {
            Some(entry) => entry.1 = value,
            None => self.added.push((key, value)),
        }
        self
    }

    pub fn len(&self) -> usize {
        self.added.len()
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty()
    }

    pub fn build(self) -> StructuredArgument {
        StructuredArgument::Entries(self.added)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::prelude::*;

    #[derive(LogFields)]
    struct Point {
        x: i32,
        y: i32,
    }

    impl Loggable for Point {}

    #[derive(LogFields)]
    struct Segment(Point, Point);

    impl Loggable for Segment {
        fn log_format(&self) -> Option<Builder> {
            Some(Builder::new().with("from", &self.0).with("to", &self.1))
        }
    }

    #[derive(LogFields)]
    struct Tagged<T> {
        label: &'static str,
        inner: T,
    }

    impl<T> Loggable for Tagged<T> where for<'x> &'x T: IntoArg<'x> {}

    #[test]
    fn test_builder_last_write_wins() {
        let argument = Builder::new()
            .with("a", 1)
            .with("b", 2)
            .with("a", 3)
            .build();
        assert_eq!(argument.to_string(), "{a=3, b=2}");
    }

    #[test]
    fn test_default_dump() {
        let point = Point { x: 1, y: -2 };
        assert_eq!(point.log().to_string(), "{x=1, y=-2}");
    }

    #[test]
    fn test_nested_loggable_uses_its_representation() {
        let segment = Segment(Point { x: 0, y: 0 }, Point { x: 3, y: 4 });
        assert_eq!(
            segment.log().to_string(),
            "{from={x=0, y=0}, to={x=3, y=4}}"
        );
        assert_eq!(segment.log_fields().len(), 2);
        assert_eq!(
            segment.log_fields().build().to_string(),
            "{0={x=0, y=0}, 1={x=3, y=4}}"
        );
    }

    #[test]
    fn test_reflects_current_state() {
        let mut point = Point { x: 1, y: 1 };
        let before = point.log();
        point.x = 5;
        assert_eq!(before.to_string(), "{x=1, y=1}");
        assert_eq!(point.log().to_string(), "{x=5, y=1}");
    }

    #[test]
    fn test_generic_struct_dump() {
        let count = Tagged {
            label: "count",
            inner: 5,
        };
        assert_eq!(count.log().to_string(), "{label=count, inner=5}");
        let origin = Tagged {
            label: "origin",
            inner: Point { x: 0, y: 0 },
        };
        assert_eq!(
            origin.log().to_string(),
            "{label=origin, inner={x=0, y=0}}"
        );
        let path = Tagged {
            label: "path",
            inner: vec![1, 2],
        };
        assert_eq!(path.log_fields().build().to_string(), "{label=path, inner=[1, 2]}");
    }
}
