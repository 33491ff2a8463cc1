//! Landskape - diagrams of IT landscapes.
//!
//! Systems and the typed connections between them are filtered, optionally
//! clustered by a system attribute, serialized as Graphviz DOT, and rendered
//! to an image by an external renderer.

pub mod config;
pub mod export;
pub mod filter;
pub mod render;
pub mod structure;

mod error;

pub use error::{LandskapeError, RenderProcessError};

use log::{debug, info, trace};

use landskape_core::{
    filter::ConnectionsFilter,
    store::{ConnectionStore, SystemStore},
};

use config::AppConfig;
use export::DotWriter;
use filter::CenterScope;
use render::{Diagram, OutputFormat, Renderer};
use structure::{ClusterAssignment, GraphModel};

/// Parameters of one diagram request.
///
/// # Examples
///
/// ```
/// use landskape::{DiagramRequest, render::OutputFormat};
///
/// let request = DiagramRequest::from_params("", "", "http,jdbc", "", "team", "dot", "svg")
///     .expect("valid parameters");
/// assert_eq!(request.cluster(), "team");
/// assert_eq!(request.format(), &OutputFormat::Dot);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DiagramRequest {
    filter: ConnectionsFilter,
    cluster: String,
    format: OutputFormat,
    center_scope: CenterScope,
}

impl DiagramRequest {
    /// Creates a request for the default image format without clustering.
    pub fn new(filter: ConnectionsFilter) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    /// Builds a request from its textual parameters.
    ///
    /// `from`, `to`, `types` and `center` are comma-separated lists. An empty
    /// `format` selects `default_format`.
    ///
    /// # Errors
    ///
    /// Returns [`LandskapeError::InvalidFormat`] for an unusable format name.
    pub fn from_params(
        from: &str,
        to: &str,
        types: &str,
        center: &str,
        cluster: &str,
        format: &str,
        default_format: &str,
    ) -> Result<Self, LandskapeError> {
        Ok(Self {
            filter: ConnectionsFilter::from_params(from, to, types, center),
            cluster: cluster.trim().to_string(),
            format: OutputFormat::parse(format, default_format)?,
            center_scope: CenterScope::default(),
        })
    }

    /// Groups nodes by the value of the given system attribute.
    pub fn with_cluster(mut self, attribute: impl Into<String>) -> Self {
        self.cluster = attribute.into();
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_center_scope(mut self, center_scope: CenterScope) -> Self {
        self.center_scope = center_scope;
        self
    }

    pub fn filter(&self) -> &ConnectionsFilter {
        &self.filter
    }

    /// Returns the cluster attribute name; empty means no clustering.
    pub fn cluster(&self) -> &str {
        &self.cluster
    }

    pub fn format(&self) -> &OutputFormat {
        &self.format
    }

    pub fn center_scope(&self) -> CenterScope {
        self.center_scope
    }
}

/// Builder turning stored connections into rendered diagrams.
///
/// The builder keeps only configuration, so one instance can serve any
/// number of concurrent requests.
///
/// # Examples
///
/// ```rust,no_run
/// use landskape::{DiagramBuilder, DiagramRequest, config::AppConfig};
/// use landskape_core::{filter::ConnectionsFilter, model::Connection, store::InMemoryStore};
///
/// # async fn example() -> Result<(), landskape::LandskapeError> {
/// let mut store = InMemoryStore::new();
/// store.add_connection(Connection::new("web", "db", "jdbc"));
///
/// let builder = DiagramBuilder::new(AppConfig::default());
/// let request = DiagramRequest::new(ConnectionsFilter::new());
/// let svg = builder.render(&store, &store, &request).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct DiagramBuilder {
    config: AppConfig,
    renderer: Renderer,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        let renderer = Renderer::new(config.renderer().clone());
        Self { config, renderer }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Fetches the connections for `request` and builds the graph model.
    ///
    /// The filter is applied again after retrieval, whatever the store did
    /// with it.
    ///
    /// # Errors
    ///
    /// Returns [`LandskapeError::Store`] if the connections cannot be retrieved.
    pub fn build_graph<C>(
        &self,
        connections: &C,
        request: &DiagramRequest,
    ) -> Result<GraphModel, LandskapeError>
    where
        C: ConnectionStore + ?Sized,
    {
        let retrieved = connections.connections(request.filter())?;
        debug!(retrieved = retrieved.len(); "Connections retrieved");

        let admitted = filter::admit(retrieved, request.filter(), request.center_scope());
        Ok(GraphModel::from_connections(admitted))
    }

    /// Produces the DOT description for `request`.
    ///
    /// # Errors
    ///
    /// Returns [`LandskapeError::Store`] for failed lookups and
    /// [`LandskapeError::Serialize`] for values DOT cannot carry.
    pub fn describe<C, S>(
        &self,
        connections: &C,
        systems: &S,
        request: &DiagramRequest,
    ) -> Result<String, LandskapeError>
    where
        C: ConnectionStore + ?Sized,
        S: SystemStore + ?Sized,
    {
        info!(
            cluster = request.cluster(),
            format = request.format().name();
            "Building diagram"
        );
        trace!(request:?; "Diagram request");

        let graph = self.build_graph(connections, request)?;
        let clusters = ClusterAssignment::assign(&graph, request.cluster(), systems)?;
        let text = DotWriter::new(&graph, &clusters)
            .with_style(self.config.style())
            .to_string()?;

        debug!(
            nodes_count = graph.nodes_count(),
            edges_count = graph.edges().len(),
            clustered = clusters.is_active();
            "Diagram serialized"
        );
        Ok(text)
    }

    /// Produces the diagram for `request` in its requested format.
    ///
    /// The description format returns the text without starting the
    /// renderer. Dropping the returned future cancels a running render and
    /// removes its scratch artifacts.
    ///
    /// # Errors
    ///
    /// Any error of [`describe`](Self::describe) or [`Renderer::render`].
    pub async fn render<C, S>(
        &self,
        connections: &C,
        systems: &S,
        request: &DiagramRequest,
    ) -> Result<Diagram, LandskapeError>
    where
        C: ConnectionStore + ?Sized,
        S: SystemStore + ?Sized,
    {
        let text = self.describe(connections, systems, request)?;
        self.renderer.render(text, request.format()).await
    }
}
