//! Conversion of call arguments into a flat sequence of structured fields
//!
//! Each value about to become a field is dispatched in this order, first match wins:
//! 1. a deferred computation is called and its result dispatched again;
//! 2. a structured value contributes its own representation (override or field dump), even
//!    when it could also be seen as a collection;
//! 3. a sequence becomes one array field under the label;
//! 4. a mapping becomes one field holding all of its entries;
//! 5. anything else becomes a plain `label=value` field.
//!
//! Nothing here fails or performs I/O. A panic raised by a deferred computation unwinds
//! through the log call into the caller.
use crate::{
    arg::{Arg, IntoArg},
    argument::StructuredArgument,
    kv::KeyValuePair,
    loggable::Loggable,
    value::Value,
};

/// Resolves one labeled argument into a single field.
///
/// The label is lost when the argument resolves to a structured value or a mapping, which
/// carry their own labels.
pub fn structure(label: &str, value: Arg<'_>) -> StructuredArgument {
    match value {
        Arg::Deferred(func) => structure(label, func()),
        Arg::Object(loggable) => loggable.log(),
        Arg::Seq(items) => {
            StructuredArgument::array(label, items.into_iter().map(Arg::into_value).collect())
        }
        Arg::Value(Value::Seq(items)) => StructuredArgument::array(label, items),
        Arg::Map(entries) => StructuredArgument::Entries(
            entries
                .into_iter()
                .map(|(key, arg)| (key, arg.into_value()))
                .collect(),
        ),
        Arg::Value(Value::Map(entries)) => StructuredArgument::Entries(entries),
        Arg::Value(value) => StructuredArgument::KeyValue {
            key: label.to_owned(),
            value,
        },
    }
}

/// One field per structured value, in order.
pub fn structure_loggables<L: Loggable>(loggables: &[L]) -> Vec<StructuredArgument> {
    loggables.iter().map(Loggable::log).collect()
}

/// One field per mapping entry, labeled with the entry's key.
///
/// The order is the iteration order of `entries`.
pub fn structure_map<'a, I, K, V>(entries: I) -> Vec<StructuredArgument>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: IntoArg<'a>,
{
    entries
        .into_iter()
        .map(|(key, value)| structure(key.as_ref(), value.into_arg()))
        .collect()
}

/// One field per pair, in order.
pub fn structure_pairs<'a, I>(pairs: I) -> Vec<StructuredArgument>
where
    I: IntoIterator<Item = KeyValuePair<'a>>,
{
    pairs
        .into_iter()
        .map(|pair| {
            let (key, value) = pair.into_parts();
            structure(&key, value)
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::kv::{kfp, kvp};
    use crate::prelude::*;
    use std::cell::Cell;
    use std::collections::BTreeMap;

    #[derive(LogFields)]
    struct Tag {
        name: String,
        secret: String,
    }

    impl Loggable for Tag {
        fn log_format(&self) -> Option<Builder> {
            Some(Builder::new().with("tag", &self.name))
        }
    }

    #[test]
    fn test_plain_value() {
        assert_eq!(
            structure("answer", 42.into_arg()),
            StructuredArgument::kv("answer", 42)
        );
    }

    #[test]
    fn test_deferred_yields_sequence() {
        let field = structure("baz", Arg::deferred(|| vec!["Foo Bar"]));
        assert_eq!(field.to_string(), "baz=[Foo Bar]");
        assert!(matches!(field, StructuredArgument::Array { .. }));
    }

    #[test]
    fn test_deferred_yields_mapping_ignores_label() {
        let mut map = BTreeMap::new();
        map.insert("1", 1);
        map.insert("Marco", 2);
        let field = structure("ignored", Arg::deferred(move || map));
        assert_eq!(field.key(), None);
        assert_eq!(field.to_string(), "{1=1, Marco=2}");
    }

    #[test]
    fn test_deferred_yields_deferred() {
        let field = structure("depth", Arg::deferred(|| Arg::deferred(|| 2)));
        assert_eq!(field, StructuredArgument::kv("depth", 2));
    }

    #[test]
    fn test_structured_value_wins() {
        let tag = Tag {
            name: String::from("blue"),
            secret: String::from("hidden"),
        };
        let field = structure("ignored", (&tag).into_arg());
        assert_eq!(field.to_string(), "{tag=blue}");
        assert_eq!(tag.log_fields().len(), 2);
    }

    #[test]
    fn test_structure_pairs_evaluates_once_in_order() {
        let calls = Cell::new(0);
        let fields = structure_pairs(vec![
            kfp("first", || {
                calls.set(calls.get() + 1);
                "a"
            }),
            kvp("second", 2),
        ]);
        assert_eq!(calls.get(), 1);
        assert_eq!(
            fields,
            vec![
                StructuredArgument::kv("first", "a"),
                StructuredArgument::kv("second", 2)
            ]
        );
    }

    #[test]
    fn test_structure_map() {
        let mut map = BTreeMap::new();
        map.insert(String::from("nested"), vec![1, 2]);
        map.insert(String::from("empty"), vec![]);
        let fields = structure_map(&map);
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].to_string(), "empty=[]");
        assert_eq!(fields[1].to_string(), "nested=[1, 2]");
    }
}
