//! Ordered name/value attributes attached to systems and connections.
//!
//! [`Attributes`] is an immutable mapping that keeps insertion order. Setting
//! a value produces a new mapping instead of editing the existing one.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered set of `(name, value)` pairs with unique names.
///
/// # Examples
///
/// ```
/// use landskape_core::attributes::Attributes;
///
/// let attrs = Attributes::new()
///     .with("team", "payments")
///     .with("owner", "alice");
/// assert_eq!(attrs.value("team"), "payments");
/// assert_eq!(attrs.value("missing"), "");
///
/// // An empty value removes the attribute
/// let attrs = attrs.with("team", "");
/// assert_eq!(attrs.get("team"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(IndexMap<String, String>);

impl Attributes {
    /// Creates an empty attribute set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of this set with `name` set to `value`.
    ///
    /// An empty `name` leaves the set unchanged. An empty `value` removes the
    /// attribute. Replacing an existing attribute keeps its position.
    pub fn with(&self, name: &str, value: &str) -> Self {
        if name.is_empty() {
            return self.clone();
        }

        let mut entries = self.0.clone();
        if value.is_empty() {
            entries.shift_remove(name);
        } else if let Some(existing) = entries.get_mut(name) {
            *existing = value.to_string();
        } else {
            entries.insert(name.to_string(), value.to_string());
        }
        Self(entries)
    }

    /// Returns a copy of this set without the attribute `name`.
    pub fn without(&self, name: &str) -> Self {
        self.with(name, "")
    }

    /// Returns the value of `name`, if present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Returns the value of `name`, or an empty string when absent.
    pub fn value(&self, name: &str) -> &str {
        self.get(name).unwrap_or_default()
    }

    /// Iterates over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<N, V> FromIterator<(N, V)> for Attributes
where
    N: AsRef<str>,
    V: AsRef<str>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        iter.into_iter().fold(Self::new(), |attrs, (name, value)| {
            attrs.with(name.as_ref(), value.as_ref())
        })
    }
}
