//! Integration tests for the DiagramBuilder API
//!
//! These tests go through the public API from store to DOT text and check
//! the text with an independent DOT parser.

use dot_structures::{Attribute, Edge, EdgeTy, Graph, Id, Node, NodeId, Stmt, Subgraph, Vertex};
use proptest::prelude::*;

use landskape::{
    DiagramBuilder, DiagramRequest, LandskapeError,
    config::{AppConfig, RendererConfig, StyleConfig},
    render::{Diagram, OutputFormat},
};
use landskape_core::{
    filter::ConnectionsFilter,
    model::{Connection, System},
    store::{ConnectionStore, InMemoryStore, StoreError, SystemStore},
};

fn landscape() -> InMemoryStore {
    let mut store = InMemoryStore::new();
    store.save_system(System::new("A").with_attribute("team", "X"));
    store.save_system(System::new("B").with_attribute("team", "Y"));
    store.save_system(System::new("C"));
    store.add_connection(Connection::new("A", "B", "http"));
    store.add_connection(Connection::new("B", "C", "jdbc"));
    store.add_connection(Connection::new("A", "C", "ftp"));
    store
}

/// Store ignoring the filter and returning everything it has.
struct UnfilteredStore(Vec<Connection>);

impl ConnectionStore for UnfilteredStore {
    fn connections(&self, _filter: &ConnectionsFilter) -> Result<Vec<Connection>, StoreError> {
        Ok(self.0.clone())
    }
}

struct BrokenStore;

impl ConnectionStore for BrokenStore {
    fn connections(&self, _filter: &ConnectionsFilter) -> Result<Vec<Connection>, StoreError> {
        Err(StoreError::Unavailable("datastore offline".to_string()))
    }
}

fn dot_request(filter: ConnectionsFilter) -> DiagramRequest {
    DiagramRequest::new(filter).with_format(OutputFormat::Dot)
}

/// Decodes a quoted DOT string as produced by the parser.
fn decode(id: &Id) -> String {
    let raw = match id {
        Id::Escaped(raw) | Id::Plain(raw) | Id::Html(raw) | Id::Anonymous(raw) => raw.as_str(),
    };
    let inner = raw
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(raw);

    let mut decoded = String::new();
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            decoded.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => decoded.push('\n'),
            Some(other) => decoded.push(other),
            None => decoded.push('\\'),
        }
    }
    decoded
}

fn collect_nodes(stmts: &[Stmt], nodes: &mut Vec<String>) {
    for stmt in stmts {
        match stmt {
            Stmt::Node(Node {
                id: NodeId(id, _), ..
            }) => nodes.push(decode(id)),
            Stmt::Subgraph(Subgraph { stmts, .. }) => collect_nodes(stmts, nodes),
            _ => {}
        }
    }
}

fn collect_edges(stmts: &[Stmt]) -> Vec<(String, String)> {
    stmts
        .iter()
        .filter_map(|stmt| match stmt {
            Stmt::Edge(Edge {
                ty: EdgeTy::Pair(Vertex::N(NodeId(from, _)), Vertex::N(NodeId(to, _))),
                ..
            }) => Some((decode(from), decode(to))),
            _ => None,
        })
        .collect()
}

/// Returns the decoded `label` among `attributes`, if any.
fn label_of(attributes: &[Attribute]) -> Option<String> {
    attributes
        .iter()
        .find(|Attribute(key, _)| decode(key) == "label")
        .map(|Attribute(_, value)| decode(value))
}

/// Labels of the subgraphs, in output order. Unboxed subgraphs carry none.
fn collect_cluster_labels(stmts: &[Stmt]) -> Vec<String> {
    stmts
        .iter()
        .filter_map(|stmt| match stmt {
            Stmt::Subgraph(Subgraph { stmts, .. }) => {
                let attributes: Vec<Attribute> = stmts
                    .iter()
                    .filter_map(|inner| match inner {
                        Stmt::Attribute(attribute) => Some(attribute.clone()),
                        _ => None,
                    })
                    .collect();
                label_of(&attributes)
            }
            _ => None,
        })
        .collect()
}

fn collect_edge_labels(stmts: &[Stmt]) -> Vec<String> {
    stmts
        .iter()
        .filter_map(|stmt| match stmt {
            Stmt::Edge(Edge { attributes, .. }) => label_of(attributes),
            _ => None,
        })
        .collect()
}

fn parse(text: &str) -> Vec<Stmt> {
    match graphviz_rust::parse(text).expect("output should be valid DOT") {
        Graph::DiGraph { stmts, .. } => stmts,
        Graph::Graph { .. } => panic!("expected a digraph"),
    }
}

#[test]
fn test_builder_api_exists() {
    let _builder = DiagramBuilder::default();
}

#[test]
fn test_types_filter_keeps_shared_endpoint() {
    let store = landscape();
    let builder = DiagramBuilder::default();
    let request = dot_request(ConnectionsFilter::new().with_types(["http", "jdbc"]));

    let graph = builder.build_graph(&store, &request).unwrap();
    assert_eq!(graph.nodes().collect::<Vec<_>>(), vec!["A", "B", "C"]);
    assert_eq!(
        graph.edges(),
        &[
            Connection::new("A", "B", "http"),
            Connection::new("B", "C", "jdbc"),
        ]
    );
}

#[test]
fn test_center_filter_keeps_touching_edges() {
    let store = landscape();
    let builder = DiagramBuilder::default();
    let request = dot_request(ConnectionsFilter::new().with_centers(["B"]));

    let graph = builder.build_graph(&store, &request).unwrap();
    assert_eq!(
        graph.edges(),
        &[
            Connection::new("A", "B", "http"),
            Connection::new("B", "C", "jdbc"),
        ]
    );
}

#[test]
fn test_filter_reapplied_over_unfiltered_store() {
    let store = UnfilteredStore(vec![
        Connection::new("A", "B", "http"),
        Connection::new("B", "C", "jdbc"),
        Connection::new("A", "C", "ftp"),
    ]);
    let builder = DiagramBuilder::default();
    let request = dot_request(ConnectionsFilter::new().with_froms(["A"]).with_types(["ftp"]));

    let graph = builder.build_graph(&store, &request).unwrap();
    assert_eq!(graph.edges(), &[Connection::new("A", "C", "ftp")]);
    assert!(!graph.contains_node("B"));
}

#[test]
fn test_clusters_emitted_in_first_appearance_order() {
    let store = landscape();
    let builder = DiagramBuilder::default();
    let request = dot_request(ConnectionsFilter::new()).with_cluster("team");

    let text = builder.describe(&store, &store, &request).unwrap();
    let x = text.find(r#"label="X";"#).expect("cluster X");
    let y = text.find(r#"label="Y";"#).expect("cluster Y");
    let rest = text.find(r#"subgraph "unclustered""#).expect("unclustered group");
    assert!(x < y && y < rest);
}

#[test]
fn test_no_subgraphs_without_cluster_attribute() {
    let store = landscape();
    let builder = DiagramBuilder::default();

    let text = builder
        .describe(&store, &store, &dot_request(ConnectionsFilter::new()))
        .unwrap();
    assert!(!text.contains("subgraph"));
}

#[test]
fn test_empty_selection_is_valid_dot() {
    let store = landscape();
    let builder = DiagramBuilder::default();
    let request = dot_request(ConnectionsFilter::new().with_types(["smtp"]));

    let text = builder.describe(&store, &store, &request).unwrap();
    let stmts = parse(&text);
    let mut nodes = Vec::new();
    collect_nodes(&stmts, &mut nodes);
    assert!(nodes.is_empty());
}

#[test]
fn test_output_parses_and_declares_every_edge_endpoint() {
    let store = landscape();
    let builder = DiagramBuilder::default();
    let request = dot_request(ConnectionsFilter::new()).with_cluster("team");

    let text = builder.describe(&store, &store, &request).unwrap();
    let stmts = parse(&text);

    let mut nodes = Vec::new();
    collect_nodes(&stmts, &mut nodes);
    assert_eq!(nodes, vec!["A", "B", "C"]);

    let edges = collect_edges(&stmts);
    assert_eq!(edges.len(), 3);
    for (from, to) in &edges {
        assert!(nodes.contains(from), "{from} is not declared");
        assert!(nodes.contains(to), "{to} is not declared");
    }
}

#[test]
fn test_adversarial_values_survive_round_trip() {
    let tricky = r#"pay"ments; {core} \ team"#;
    let mut store = InMemoryStore::new();
    store.save_system(System::new(tricky).with_attribute("team", r#"a"b;c"#));
    store.save_system(System::new("db}").with_attribute("team", "x\ny"));
    store.add_connection(Connection::new(tricky, "db}", r#"jdbc";drop"#));

    let builder = DiagramBuilder::new(AppConfig::new(
        RendererConfig::default(),
        StyleConfig::plain().with_font_name(r#"Font "Mono""#),
    ));
    let request = dot_request(ConnectionsFilter::new()).with_cluster("team");
    let text = builder.describe(&store, &store, &request).unwrap();

    let stmts = parse(&text);
    let mut nodes = Vec::new();
    collect_nodes(&stmts, &mut nodes);
    assert_eq!(nodes, vec![tricky.to_string(), "db}".to_string()]);
    assert_eq!(
        collect_edges(&stmts),
        vec![(tricky.to_string(), "db}".to_string())]
    );
    assert_eq!(
        collect_cluster_labels(&stmts),
        vec![r#"a"b;c"#.to_string(), "x\ny".to_string()]
    );
    assert_eq!(collect_edge_labels(&stmts), vec![r#"jdbc";drop"#.to_string()]);
}

#[test]
fn test_nul_character_is_a_serialization_error() {
    let mut store = InMemoryStore::new();
    store.add_connection(Connection::new("a\0", "b", "http"));
    let builder = DiagramBuilder::default();

    let result = builder.describe(&store, &store, &dot_request(ConnectionsFilter::new()));
    assert!(matches!(result, Err(LandskapeError::Serialize(_))));
}

#[test]
fn test_store_failure_fails_request() {
    let systems = InMemoryStore::new();
    let builder = DiagramBuilder::default();

    let result = builder.describe(&BrokenStore, &systems, &dot_request(ConnectionsFilter::new()));
    assert!(matches!(result, Err(LandskapeError::Store(_))));
}

#[tokio::test]
async fn test_dot_format_never_starts_renderer() {
    let store = landscape();
    let config = AppConfig::new(
        RendererConfig::new("/nonexistent/landskape-renderer"),
        StyleConfig::default(),
    );
    let builder = DiagramBuilder::new(config);
    let request = dot_request(ConnectionsFilter::new());

    let diagram = builder.render(&store, &store, &request).await.unwrap();
    let expected = builder.describe(&store, &store, &request).unwrap();
    assert_eq!(diagram, Diagram::Text(expected));
}

#[tokio::test]
async fn test_missing_renderer_is_reported() {
    let scratch = tempfile::tempdir().unwrap();
    let store = landscape();
    let config = AppConfig::new(
        RendererConfig::new("/nonexistent/landskape-renderer").with_scratch_dir(scratch.path()),
        StyleConfig::default(),
    );
    let builder = DiagramBuilder::new(config);
    let request = DiagramRequest::new(ConnectionsFilter::new());

    let result = builder.render(&store, &store, &request).await;
    assert!(matches!(result, Err(LandskapeError::RenderProcess(_))));
    assert_eq!(std::fs::read_dir(scratch.path()).unwrap().count(), 0);
}

// ===================
// Properties
// ===================

fn label_strategy() -> impl Strategy<Value = String> {
    r#"[a-zA-Z0-9 ;{}"\\\n-]{1,10}"#
}

fn landscape_strategy() -> impl Strategy<Value = (Vec<(String, String, String)>, Vec<String>)> {
    (
        prop::collection::vec((label_strategy(), label_strategy(), label_strategy()), 0..8),
        prop::collection::vec(label_strategy(), 0..4),
    )
}

fn store_from(connections: &[(String, String, String)], teams: &[String]) -> InMemoryStore {
    let mut store = InMemoryStore::new();
    for (index, (from, to, kind)) in connections.iter().enumerate() {
        store.add_connection(Connection::new(from.as_str(), to.as_str(), kind.as_str()));
        if let Some(team) = teams.get(index % teams.len().max(1)) {
            store.save_system(System::new(from.as_str()).with_attribute("team", team));
        }
    }
    store
}

proptest! {
    #[test]
    fn serialization_is_deterministic((connections, teams) in landscape_strategy()) {
        let builder = DiagramBuilder::default();
        let request = dot_request(ConnectionsFilter::new()).with_cluster("team");

        let first_store = store_from(&connections, &teams);
        let second_store = store_from(&connections, &teams);
        let first = builder.describe(&first_store, &first_store, &request).unwrap();
        let second = builder.describe(&second_store, &second_store, &request).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn identifiers_decode_to_original((connections, teams) in landscape_strategy()) {
        let store = store_from(&connections, &teams);
        let builder = DiagramBuilder::default();
        let request = dot_request(ConnectionsFilter::new()).with_cluster("team");

        let graph = builder.build_graph(&store, &request).unwrap();
        let text = builder.describe(&store, &store, &request).unwrap();

        let mut nodes = Vec::new();
        collect_nodes(&parse(&text), &mut nodes);
        let expected: Vec<String> = graph.nodes().map(str::to_string).collect();
        let mut sorted_nodes = nodes.clone();
        let mut sorted_expected = expected.clone();
        sorted_nodes.sort();
        sorted_expected.sort();
        prop_assert_eq!(sorted_nodes, sorted_expected);

        let stmts = parse(&text);
        let kinds: Vec<String> = graph
            .edges()
            .iter()
            .map(|edge| edge.kind().to_string())
            .collect();
        prop_assert_eq!(collect_edge_labels(&stmts), kinds);

        let mut labels: Vec<String> = Vec::new();
        for node in graph.nodes() {
            let label = store
                .system(node)
                .unwrap()
                .map(|system| system.attributes().value("team").to_string())
                .unwrap_or_default();
            if !label.is_empty() && !labels.contains(&label) {
                labels.push(label);
            }
        }
        prop_assert_eq!(collect_cluster_labels(&stmts), labels);
    }
}
