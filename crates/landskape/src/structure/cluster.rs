//! Grouping of diagram nodes by the value of one system attribute.

use indexmap::{IndexMap, map::Entry};
use log::{debug, trace};

use landskape_core::store::{StoreError, SystemStore};

use super::GraphModel;

/// Nodes sharing one cluster label, in node order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterGroup<'a> {
    label: &'a str,
    nodes: Vec<&'a str>,
}

impl<'a> ClusterGroup<'a> {
    /// Returns the cluster label; empty for unclustered nodes.
    pub fn label(&self) -> &'a str {
        self.label
    }

    pub fn nodes(&self) -> &[&'a str] {
        &self.nodes
    }
}

/// Cluster label of every node in a [`GraphModel`].
///
/// Labels are kept in node order, which makes the order of groups their
/// first appearance across the nodes rather than any string ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClusterAssignment {
    labels: IndexMap<String, String>,
}

impl ClusterAssignment {
    /// Gives every node of `graph` the empty label.
    pub fn unclustered(graph: &GraphModel) -> Self {
        Self {
            labels: graph
                .nodes()
                .map(|node| (node.to_string(), String::new()))
                .collect(),
        }
    }

    /// Labels each node with the value of `attribute` on its system.
    ///
    /// An empty `attribute` means no clustering. Unknown systems and systems
    /// without the attribute get the empty label.
    ///
    /// # Errors
    ///
    /// Returns the [`StoreError`] of the first failed system lookup.
    pub fn assign<S>(graph: &GraphModel, attribute: &str, systems: &S) -> Result<Self, StoreError>
    where
        S: SystemStore + ?Sized,
    {
        if attribute.is_empty() {
            return Ok(Self::unclustered(graph));
        }

        let mut labels = IndexMap::with_capacity(graph.nodes_count());
        for node in graph.nodes() {
            let label = systems
                .system(node)?
                .map(|system| system.attributes().value(attribute).to_string())
                .unwrap_or_default();
            trace!(node = node, label = label.as_str(); "Cluster label resolved");
            labels.insert(node.to_string(), label);
        }

        let assignment = Self { labels };
        debug!(
            attribute = attribute,
            clusters_count = assignment.groups().len();
            "Clusters assigned"
        );
        Ok(assignment)
    }

    /// Returns the label of `node`, if it is part of the assignment.
    pub fn label(&self, node: &str) -> Option<&str> {
        self.labels.get(node).map(String::as_str)
    }

    /// Returns `true` if at least one node has a non-empty label.
    pub fn is_active(&self) -> bool {
        self.labels.values().any(|label| !label.is_empty())
    }

    /// Groups nodes by label, ordered by first appearance of each label.
    pub fn groups(&self) -> Vec<ClusterGroup<'_>> {
        let mut groups: IndexMap<&str, Vec<&str>> = IndexMap::new();
        for (node, label) in &self.labels {
            match groups.entry(label.as_str()) {
                Entry::Occupied(mut entry) => entry.get_mut().push(node.as_str()),
                Entry::Vacant(entry) => {
                    entry.insert(vec![node.as_str()]);
                }
            }
        }
        groups
            .into_iter()
            .map(|(label, nodes)| ClusterGroup { label, nodes })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use landskape_core::{
        model::{Connection, System},
        store::InMemoryStore,
    };

    use super::*;

    fn graph() -> GraphModel {
        GraphModel::from_connections(vec![
            Connection::new("A", "B", "http"),
            Connection::new("B", "C", "jdbc"),
        ])
    }

    fn store() -> InMemoryStore {
        let mut store = InMemoryStore::new();
        store.save_system(System::new("A").with_attribute("team", "X"));
        store.save_system(System::new("B").with_attribute("team", "Y"));
        store.save_system(System::new("C").with_attribute("tier", "gold"));
        store
    }

    struct FailingStore;

    impl SystemStore for FailingStore {
        fn system(&self, _id: &str) -> Result<Option<System>, StoreError> {
            Err(StoreError::Unavailable("offline".to_string()))
        }
    }

    #[test]
    fn test_labels_follow_attribute() {
        let assignment = ClusterAssignment::assign(&graph(), "team", &store()).unwrap();
        assert_eq!(assignment.label("A"), Some("X"));
        assert_eq!(assignment.label("B"), Some("Y"));
        assert_eq!(assignment.label("C"), Some(""));
        assert!(assignment.is_active());
    }

    #[test]
    fn test_groups_in_first_appearance_order() {
        let assignment = ClusterAssignment::assign(&graph(), "team", &store()).unwrap();
        let labels: Vec<_> = assignment.groups().iter().map(|g| g.label()).collect();
        assert_eq!(labels, vec!["X", "Y", ""]);
    }

    #[test]
    fn test_groups_do_not_sort_labels() {
        let mut store = InMemoryStore::new();
        store.save_system(System::new("A").with_attribute("team", "zulu"));
        store.save_system(System::new("B").with_attribute("team", "alpha"));
        store.save_system(System::new("C").with_attribute("team", "zulu"));

        let assignment = ClusterAssignment::assign(&graph(), "team", &store).unwrap();
        let groups = assignment.groups();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].label(), "zulu");
        assert_eq!(groups[0].nodes(), &["A", "C"]);
        assert_eq!(groups[1].label(), "alpha");
    }

    #[test]
    fn test_empty_attribute_means_no_clustering() {
        let assignment = ClusterAssignment::assign(&graph(), "", &FailingStore).unwrap();
        assert!(!assignment.is_active());
        assert_eq!(assignment.groups().len(), 1);
        assert_eq!(assignment.label("B"), Some(""));
    }

    #[test]
    fn test_unknown_system_is_unclustered() {
        let assignment =
            ClusterAssignment::assign(&graph(), "team", &InMemoryStore::new()).unwrap();
        assert!(!assignment.is_active());
    }

    #[test]
    fn test_store_failure_propagates() {
        let result = ClusterAssignment::assign(&graph(), "team", &FailingStore);
        assert!(matches!(result, Err(StoreError::Unavailable(_))));
    }
}
