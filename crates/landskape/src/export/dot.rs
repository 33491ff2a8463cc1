//! Graphviz DOT writer.
//!
//! [`DotWriter`] emits a [`GraphModel`] and its [`ClusterAssignment`] as one
//! `digraph` block. The output depends only on the order of the model's nodes
//! and edges, so the same input always gives byte-identical text.
//!
//! Every identifier and value is written as a quoted DOT string, which keeps
//! user data containing quotes, semicolons or braces syntactically inert.

use std::{fmt::Write as _, io};

use log::{debug, trace};
use thiserror::Error;

use crate::{
    config::StyleConfig,
    structure::{ClusterAssignment, GraphModel},
};

/// Name of the emitted `digraph`.
const GRAPH_NAME: &str = "landskape";

/// Subgraph holding unlabelled nodes when other nodes are clustered.
const UNCLUSTERED_NAME: &str = "unclustered";

/// Indentation per nesting level.
const INDENT: &str = "  ";

/// Errors raised while writing a graph description.
#[derive(Debug, Error)]
pub enum SerializeError {
    #[error("value {value:?} contains a NUL character")]
    NulCharacter { value: String },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Writer for the DOT description of one diagram.
///
/// # Examples
///
/// ```
/// use landskape::{
///     export::DotWriter,
///     structure::{ClusterAssignment, GraphModel},
/// };
/// use landskape_core::model::Connection;
///
/// let graph = GraphModel::from_connections(vec![Connection::new("web", "db", "jdbc")]);
/// let clusters = ClusterAssignment::unclustered(&graph);
/// let dot = DotWriter::new(&graph, &clusters).to_string().unwrap();
/// assert!(dot.contains(r#""web" -> "db" [label="jdbc"];"#));
/// ```
#[derive(Debug)]
pub struct DotWriter<'a> {
    graph: &'a GraphModel,
    clusters: &'a ClusterAssignment,
    style: Option<&'a StyleConfig>,
}

impl<'a> DotWriter<'a> {
    /// Creates a writer without any graph-wide style statements.
    pub fn new(graph: &'a GraphModel, clusters: &'a ClusterAssignment) -> Self {
        Self {
            graph,
            clusters,
            style: None,
        }
    }

    /// Emits the given style as default graph, node, and edge attributes.
    pub fn with_style(mut self, style: &'a StyleConfig) -> Self {
        self.style = Some(style);
        self
    }

    /// Returns the complete description as a string.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError::NulCharacter`] if any emitted value contains
    /// a NUL character, which DOT cannot represent.
    pub fn to_string(&self) -> Result<String, SerializeError> {
        let mut out = String::new();
        self.render(&mut out)?;
        debug!(bytes = out.len(); "DOT description written");
        trace!(dot = out.as_str(); "DOT description");
        Ok(out)
    }

    /// Writes the description into `sink`.
    ///
    /// The text is rendered completely before the first byte reaches `sink`,
    /// so nothing is written if serialization fails.
    pub fn write_to<W: io::Write>(&self, sink: &mut W) -> Result<(), SerializeError> {
        let text = self.to_string()?;
        sink.write_all(text.as_bytes())?;
        Ok(())
    }

    fn render(&self, out: &mut String) -> Result<(), SerializeError> {
        line(out, 0, &format!("digraph {GRAPH_NAME} {{"));

        if let Some(style) = self.style {
            self.render_style(out, style)?;
        }

        if self.clusters.is_active() {
            self.render_clustered_nodes(out)?;
        } else {
            for node in self.graph.nodes() {
                render_node(out, 1, node)?;
            }
        }

        for edge in self.graph.edges() {
            let statement = format!(
                "{} -> {} [label={}];",
                quote(edge.from())?,
                quote(edge.to())?,
                quote(edge.kind())?
            );
            line(out, 1, &statement);
        }

        line(out, 0, "}");
        Ok(())
    }

    fn render_style(&self, out: &mut String, style: &StyleConfig) -> Result<(), SerializeError> {
        if let Some(rank_direction) = style.rank_direction() {
            line(out, 1, &format!("graph [rankdir={}];", quote(rank_direction)?));
        }

        let mut node_attributes = Vec::new();
        if let Some(shape) = style.node_shape() {
            node_attributes.push(format!("shape={}", quote(shape)?));
        }
        if let Some(font_name) = style.font_name() {
            node_attributes.push(format!("fontname={}", quote(font_name)?));
            line(out, 1, &format!("edge [fontname={}];", quote(font_name)?));
        }
        if !node_attributes.is_empty() {
            line(out, 1, &format!("node [{}];", node_attributes.join(", ")));
        }
        Ok(())
    }

    fn render_clustered_nodes(&self, out: &mut String) -> Result<(), SerializeError> {
        let mut cluster_index = 0;
        for group in self.clusters.groups() {
            if group.label().is_empty() {
                line(out, 1, &format!("subgraph {} {{", quote(UNCLUSTERED_NAME)?));
            } else {
                let name = format!("cluster_{cluster_index}");
                cluster_index += 1;
                line(out, 1, &format!("subgraph {} {{", quote(&name)?));
                line(out, 2, &format!("label={};", quote(group.label())?));
            }
            for node in group.nodes() {
                render_node(out, 2, node)?;
            }
            line(out, 1, "}");
        }
        Ok(())
    }
}

fn render_node(out: &mut String, depth: usize, node: &str) -> Result<(), SerializeError> {
    let quoted = quote(node)?;
    line(out, depth, &format!("{quoted} [label={quoted}];"));
    Ok(())
}

fn line(out: &mut String, depth: usize, statement: &str) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
    // Writing into a String cannot fail.
    let _ = writeln!(out, "{statement}");
}

/// Quotes `value` as a DOT string.
///
/// Backslashes and double quotes are escaped and newlines become `\n`.
fn quote(value: &str) -> Result<String, SerializeError> {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for ch in value.chars() {
        match ch {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\0' => {
                return Err(SerializeError::NulCharacter {
                    value: value.to_string(),
                });
            }
            _ => quoted.push(ch),
        }
    }
    quoted.push('"');
    Ok(quoted)
}
