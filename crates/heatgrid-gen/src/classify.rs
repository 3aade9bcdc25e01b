//! Neighbourhood classification.
//!
//! Splits the edges touching one heat element into the semantic buckets the
//! generator writes from: four directional-neighbour slots, four
//! injected-input slots, an optional command channel, and an optional unique
//! output channel. Edges matching no predicate are kept in an unclassified
//! bucket and ignored — real graphs carry traffic this core does not care
//! about.

use heatgrid_layout::Direction;
use tracing::debug;

use crate::error::{GenError, Result};
use crate::graph::{EdgeId, EdgeKind, MachineGraph, VertexId, VertexKind};

/// Classified neighbourhood of one heat element.
#[derive(Debug, Clone)]
pub struct Neighbourhood {
    /// Directional-neighbour edge per direction slot.
    pub directional: [Option<EdgeId>; Direction::COUNT],
    /// Injected-input edge per direction slot.
    pub injected: [Option<EdgeId>; Direction::COUNT],
    /// The command channel, if wired.
    pub command: Option<EdgeId>,
    /// The unique output channel, if wired.
    pub output: Option<EdgeId>,
    /// Incoming edges matching no predicate.
    pub unclassified: Vec<EdgeId>,
    /// Edges displaced by a later claim on the same slot.
    ///
    /// When two edges claim one direction slot the later one wins; the
    /// earlier is recorded here so the ambiguity is observable rather than
    /// silent.
    pub displaced: Vec<EdgeId>,
}

impl Neighbourhood {
    /// Classify every edge touching `vertex`.
    ///
    /// Incoming edges are walked in insertion order, then outgoing edges.
    /// A second output channel is a hard configuration error, raised before
    /// any region is reserved or written.
    ///
    /// # Errors
    ///
    /// [`GenError::MultipleOutputChannels`] with the full bucket context.
    pub fn classify(graph: &MachineGraph, vertex: VertexId) -> Result<Self> {
        let mut buckets = Self {
            directional: [None; Direction::COUNT],
            injected: [None; Direction::COUNT],
            command: None,
            output: None,
            unclassified: Vec::new(),
            displaced: Vec::new(),
        };

        for (edge_id, edge) in graph.incoming(vertex) {
            match (edge.kind, &graph.vertex(edge.source).kind) {
                (EdgeKind::Heat(direction), VertexKind::HeatElement(_)) => {
                    buckets.claim_slot(graph, vertex, Slot::Directional, direction, edge_id);
                }
                (EdgeKind::Heat(direction), VertexKind::LiveInjector) => {
                    buckets.claim_slot(graph, vertex, Slot::Injected, direction, edge_id);
                }
                (EdgeKind::Command, _) => {
                    if let Some(previous) = buckets.command.replace(edge_id) {
                        debug!(
                            vertex = %graph.vertex(vertex).label,
                            displaced = %graph.edge(previous).label,
                            winner = %graph.edge(edge_id).label,
                            "duplicate command channel, last wins"
                        );
                        buckets.displaced.push(previous);
                    }
                }
                _ => buckets.unclassified.push(edge_id),
            }
        }

        for (edge_id, edge) in graph.outgoing(vertex) {
            if !matches!(graph.vertex(edge.target).kind, VertexKind::Gatherer) {
                continue;
            }
            if let Some(first) = buckets.output {
                return Err(GenError::MultipleOutputChannels {
                    vertex: graph.vertex(vertex).label.clone(),
                    first: graph.edge(first).label.clone(),
                    second: graph.edge(edge_id).label.clone(),
                    context: buckets.describe(graph),
                });
            }
            buckets.output = Some(edge_id);
        }

        Ok(buckets)
    }

    /// Number of bound directional and injected slots.
    ///
    /// A core with zero live inputs cannot run; generation refuses to emit
    /// its image.
    #[must_use]
    pub fn live_input_count(&self) -> usize {
        self.directional.iter().flatten().count() + self.injected.iter().flatten().count()
    }

    /// Render every bucket with edge labels, for error context.
    #[must_use]
    pub fn describe(&self, graph: &MachineGraph) -> String {
        let slot_set = |slots: &[Option<EdgeId>; Direction::COUNT]| {
            Direction::ALL
                .iter()
                .map(|d| match slots[d.slot()] {
                    Some(edge) => format!("{d}={}", graph.edge(edge).label),
                    None => format!("{d}=<unbound>"),
                })
                .collect::<Vec<_>>()
                .join(", ")
        };
        let name = |edge: Option<EdgeId>| {
            edge.map_or_else(|| "<none>".to_string(), |e| graph.edge(e).label.clone())
        };
        let list = |edges: &[EdgeId]| {
            edges
                .iter()
                .map(|&e| graph.edge(e).label.clone())
                .collect::<Vec<_>>()
                .join(", ")
        };
        format!(
            "directional [{}]; injected [{}]; command {}; output {}; unclassified [{}]; displaced [{}]",
            slot_set(&self.directional),
            slot_set(&self.injected),
            name(self.command),
            name(self.output),
            list(&self.unclassified),
            list(&self.displaced),
        )
    }

    fn claim_slot(
        &mut self,
        graph: &MachineGraph,
        vertex: VertexId,
        set: Slot,
        direction: Direction,
        edge_id: EdgeId,
    ) {
        let slots = match set {
            Slot::Directional => &mut self.directional,
            Slot::Injected => &mut self.injected,
        };
        if let Some(previous) = slots[direction.slot()].replace(edge_id) {
            debug!(
                vertex = %graph.vertex(vertex).label,
                %direction,
                displaced = %graph.edge(previous).label,
                winner = %graph.edge(edge_id).label,
                "duplicate direction slot, last wins"
            );
            self.displaced.push(previous);
        }
    }
}

enum Slot {
    Directional,
    Injected,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{EdgeKind, HeatElement};

    fn element(graph: &mut MachineGraph, label: &str) -> VertexId {
        graph.add_vertex(
            label,
            VertexKind::HeatElement(HeatElement {
                initial_temperature: 0,
            }),
        )
    }

    #[test]
    fn buckets_are_disjoint() {
        let mut graph = MachineGraph::new();
        let core = element(&mut graph, "core");
        let north = element(&mut graph, "north");
        let injector = graph.add_vertex("inj", VertexKind::LiveInjector);
        let gatherer = graph.add_vertex("gather", VertexKind::Gatherer);
        let commander = graph.add_vertex("cmd", VertexKind::CommandSource);

        let e_dir = graph.add_edge(north, core, EdgeKind::Heat(Direction::North), "n->core");
        let e_inj = graph.add_edge(injector, core, EdgeKind::Heat(Direction::West), "inj->core");
        let e_cmd = graph.add_edge(commander, core, EdgeKind::Command, "cmd->core");
        let e_out = graph.add_edge(core, gatherer, EdgeKind::Data, "core->gather");

        let buckets = Neighbourhood::classify(&graph, core).unwrap();
        assert_eq!(buckets.directional[Direction::North.slot()], Some(e_dir));
        assert_eq!(buckets.injected[Direction::West.slot()], Some(e_inj));
        assert_eq!(buckets.command, Some(e_cmd));
        assert_eq!(buckets.output, Some(e_out));
        assert!(buckets.unclassified.is_empty());
        assert_eq!(buckets.live_input_count(), 2);
    }

    #[test]
    fn unmatched_edges_are_ignored_not_errored() {
        let mut graph = MachineGraph::new();
        let core = element(&mut graph, "core");
        let gatherer = graph.add_vertex("gather", VertexKind::Gatherer);
        let north = element(&mut graph, "north");

        // Plain data into the core, and a heat-tagged edge from a gatherer:
        // neither matches a predicate.
        let e_data = graph.add_edge(north, core, EdgeKind::Data, "data->core");
        let e_odd = graph.add_edge(gatherer, core, EdgeKind::Heat(Direction::East), "odd");

        let buckets = Neighbourhood::classify(&graph, core).unwrap();
        assert_eq!(buckets.unclassified, vec![e_data, e_odd]);
        assert_eq!(buckets.live_input_count(), 0);
    }

    #[test]
    fn duplicate_slot_last_wins_and_records_displaced() {
        let mut graph = MachineGraph::new();
        let core = element(&mut graph, "core");
        let a = element(&mut graph, "a");
        let b = element(&mut graph, "b");

        let first = graph.add_edge(a, core, EdgeKind::Heat(Direction::East), "a->core");
        let second = graph.add_edge(b, core, EdgeKind::Heat(Direction::East), "b->core");

        let buckets = Neighbourhood::classify(&graph, core).unwrap();
        assert_eq!(buckets.directional[Direction::East.slot()], Some(second));
        assert_eq!(buckets.displaced, vec![first]);
        assert_eq!(buckets.live_input_count(), 1);
    }

    #[test]
    fn second_output_channel_is_a_hard_error() {
        let mut graph = MachineGraph::new();
        let core = element(&mut graph, "core");
        let g1 = graph.add_vertex("g1", VertexKind::Gatherer);
        let g2 = graph.add_vertex("g2", VertexKind::Gatherer);
        graph.add_edge(core, g1, EdgeKind::Data, "core->g1");
        graph.add_edge(core, g2, EdgeKind::Data, "core->g2");

        let err = Neighbourhood::classify(&graph, core).unwrap_err();
        match err {
            GenError::MultipleOutputChannels {
                vertex,
                first,
                second,
                context,
            } => {
                assert_eq!(vertex, "core");
                assert_eq!(first, "core->g1");
                assert_eq!(second, "core->g2");
                assert!(context.contains("output core->g1"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn describe_names_every_bucket() {
        let mut graph = MachineGraph::new();
        let core = element(&mut graph, "core");
        let north = element(&mut graph, "north");
        graph.add_edge(north, core, EdgeKind::Heat(Direction::North), "n->core");

        let buckets = Neighbourhood::classify(&graph, core).unwrap();
        let context = buckets.describe(&graph);
        assert!(context.contains("NORTH=n->core"));
        assert!(context.contains("EAST=<unbound>"));
        assert!(context.contains("command <none>"));
    }
}
