//! Connection filter criteria.
//!
//! A [`ConnectionsFilter`] is built fresh for every request. Each of its four
//! criteria is a set of accepted values; an empty set puts no constraint on
//! that dimension.

use indexmap::IndexSet;

use crate::model::Connection;

/// Criteria selecting the connections that take part in a diagram.
///
/// # Examples
///
/// ```
/// use landskape_core::{filter::ConnectionsFilter, model::Connection};
///
/// let filter = ConnectionsFilter::from_params("", "", "http, jdbc", "");
/// assert!(filter.admits(&Connection::new("a", "b", "http")));
/// assert!(!filter.admits(&Connection::new("a", "b", "ftp")));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionsFilter {
    froms: IndexSet<String>,
    tos: IndexSet<String>,
    types: IndexSet<String>,
    centers: IndexSet<String>,
}

impl ConnectionsFilter {
    /// Creates a filter that admits every connection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a filter from comma-separated parameter values.
    ///
    /// # Arguments
    ///
    /// * `from` - Accepted source system identifiers.
    /// * `to` - Accepted target system identifiers.
    /// * `types` - Accepted connection types.
    /// * `center` - Systems that every admitted connection must touch.
    pub fn from_params(from: &str, to: &str, types: &str, center: &str) -> Self {
        Self {
            froms: parse_list(from),
            tos: parse_list(to),
            types: parse_list(types),
            centers: parse_list(center),
        }
    }

    pub fn with_froms<I, S>(mut self, froms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.froms = collect_set(froms);
        self
    }

    pub fn with_tos<I, S>(mut self, tos: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tos = collect_set(tos);
        self
    }

    pub fn with_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.types = collect_set(types);
        self
    }

    pub fn with_centers<I, S>(mut self, centers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.centers = collect_set(centers);
        self
    }

    pub fn froms(&self) -> &IndexSet<String> {
        &self.froms
    }

    pub fn tos(&self) -> &IndexSet<String> {
        &self.tos
    }

    pub fn types(&self) -> &IndexSet<String> {
        &self.types
    }

    pub fn centers(&self) -> &IndexSet<String> {
        &self.centers
    }

    /// Returns `true` when no criterion is set.
    pub fn is_unconstrained(&self) -> bool {
        self.froms.is_empty()
            && self.tos.is_empty()
            && self.types.is_empty()
            && self.centers.is_empty()
    }

    /// Checks whether a single connection satisfies every criterion.
    ///
    /// With a non-empty center set, the connection must have at least one
    /// endpoint among the centers.
    pub fn admits(&self, connection: &Connection) -> bool {
        accepts(&self.froms, connection.from())
            && accepts(&self.tos, connection.to())
            && accepts(&self.types, connection.kind())
            && (self.centers.is_empty()
                || self.centers.contains(connection.from())
                || self.centers.contains(connection.to()))
    }
}

fn accepts(set: &IndexSet<String>, value: &str) -> bool {
    set.is_empty() || set.contains(value)
}

fn collect_set<I, S>(values: I) -> IndexSet<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    values
        .into_iter()
        .map(Into::into)
        .filter(|value: &String| !value.is_empty())
        .collect()
}

/// Splits a comma-separated list, trimming entries and dropping empty ones.
fn parse_list(value: &str) -> IndexSet<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}
