/// Builds a `Vec<KeyValuePair>` from `key => value` items.
///
/// ```
/// use funclog::prelude::*;
///
/// let capital = "Boise";
/// let pairs = kv_pairs!["Idaho" => capital, "Nevada" => "Carson City"];
/// assert_eq!(pairs.len(), 2);
/// assert_eq!(pairs[1].key(), "Nevada");
/// ```
#[macro_export]
macro_rules! kv_pairs {
    ($($key:expr => $value:expr),* $(,)?) => {
        vec![$($crate::kv::KeyValuePair::new($key, $value)),*]
    };
}
