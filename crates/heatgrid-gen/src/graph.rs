//! Machine-graph neighbourhood model.
//!
//! The generator walks a small typed graph: heat elements wired to each
//! other by directional edges, plus the utility endpoints that inject
//! boundary temperatures, gather output, and carry control commands. The
//! graph is owned externally; generation only reads it.
//!
//! Adjacency is stored as insertion-ordered vectors. Iteration order is
//! part of the contract: byte-determinism and the last-write-wins slot
//! tie-break both depend on it.

use heatgrid_layout::Direction;

/// Index of a vertex within its graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(
    /// Position in the graph's vertex list.
    pub usize,
);

/// Index of an edge within its graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(
    /// Position in the graph's edge list.
    pub usize,
);

/// A heat element — the one vertex kind that generates a specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeatElement {
    /// Temperature written into the element's state region.
    pub initial_temperature: i32,
}

/// What a vertex is, as a tagged variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexKind {
    /// A simulated heat element.
    HeatElement(HeatElement),
    /// An external-injection endpoint feeding boundary temperatures.
    LiveInjector,
    /// An aggregation endpoint gathering element output.
    Gatherer,
    /// A control-fabric endpoint sending stop/pause/resume.
    CommandSource,
}

/// Binary identity: every endpoint kind maps to a fixed on-chip binary.
pub trait HasBinary {
    /// File name of the binary this vertex runs.
    fn binary_file_name(&self) -> &'static str;
}

impl HasBinary for VertexKind {
    fn binary_file_name(&self) -> &'static str {
        match self {
            Self::HeatElement(_) => "heat_demo.aplx",
            Self::LiveInjector => "reverse_iptag_multicast_source.aplx",
            Self::Gatherer => "live_packet_gather.aplx",
            Self::CommandSource => "command_sender.aplx",
        }
    }
}

/// A vertex: a label for diagnostics plus its kind.
#[derive(Debug, Clone)]
pub struct Vertex {
    /// Human-readable label, carried into every error.
    pub label: String,
    /// Vertex kind.
    pub kind: VertexKind,
}

/// What an edge carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    /// A spatial neighbour link, tagged with the direction slot it feeds.
    Heat(Direction),
    /// A control-command link. Commands are marked by kind, not direction.
    Command,
    /// Plain data, e.g. element output towards a gatherer.
    Data,
}

/// A directed edge between two vertices.
#[derive(Debug, Clone)]
pub struct Edge {
    /// Source vertex.
    pub source: VertexId,
    /// Destination vertex.
    pub target: VertexId,
    /// Edge kind.
    pub kind: EdgeKind,
    /// Human-readable label, carried into every error.
    pub label: String,
}

/// Insertion-ordered directed graph of vertices and edges.
#[derive(Debug, Clone, Default)]
pub struct MachineGraph {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    incoming: Vec<Vec<EdgeId>>,
    outgoing: Vec<Vec<EdgeId>>,
}

impl MachineGraph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vertex, returning its id.
    pub fn add_vertex(&mut self, label: impl Into<String>, kind: VertexKind) -> VertexId {
        let id = VertexId(self.vertices.len());
        self.vertices.push(Vertex {
            label: label.into(),
            kind,
        });
        self.incoming.push(Vec::new());
        self.outgoing.push(Vec::new());
        id
    }

    /// Add a directed edge, returning its id.
    pub fn add_edge(
        &mut self,
        source: VertexId,
        target: VertexId,
        kind: EdgeKind,
        label: impl Into<String>,
    ) -> EdgeId {
        let id = EdgeId(self.edges.len());
        self.edges.push(Edge {
            source,
            target,
            kind,
            label: label.into(),
        });
        self.outgoing[source.0].push(id);
        self.incoming[target.0].push(id);
        id
    }

    /// Vertex by id.
    #[must_use]
    pub fn vertex(&self, id: VertexId) -> &Vertex {
        &self.vertices[id.0]
    }

    /// Edge by id.
    #[must_use]
    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.0]
    }

    /// All vertex ids in insertion order.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> {
        (0..self.vertices.len()).map(VertexId)
    }

    /// Ids of all heat elements in insertion order.
    pub fn heat_elements(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertex_ids()
            .filter(|id| matches!(self.vertex(*id).kind, VertexKind::HeatElement(_)))
    }

    /// Incoming edges of a vertex in insertion order.
    pub fn incoming(&self, id: VertexId) -> impl Iterator<Item = (EdgeId, &Edge)> {
        self.incoming[id.0].iter().map(|&e| (e, self.edge(e)))
    }

    /// Outgoing edges of a vertex in insertion order.
    pub fn outgoing(&self, id: VertexId) -> impl Iterator<Item = (EdgeId, &Edge)> {
        self.outgoing[id.0].iter().map(|&e| (e, self.edge(e)))
    }

    /// Total vertex count.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Total edge count.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
