//! Demo lattice builder.
//!
//! Builds a width × height grid of heat elements with the surrounding
//! utility vertices — boundary injectors, one gatherer, one command source —
//! and a routing table with a deterministic key assignment. This is what
//! the CLI and the integration tests drive; real deployments get their
//! graph and keys from the placement stage instead.
//!
//! Key scheme (deterministic, documented so images are reproducible):
//!
//! - element `i` in row-major order transmits with key `(i + 1) * 0x10`,
//!   and every heat edge it feeds carries that key;
//! - the four boundary injectors use `0x4000_0000 + slot`;
//! - the command source owns the single block `0x7FFF_0000/0xFFFF_FFFC`
//!   (stop, pause, resume = base, base+1, base+2).

use heatgrid_layout::Direction;

use crate::graph::{EdgeKind, HeatElement, MachineGraph, VertexId, VertexKind};
use crate::keys::{KeyMask, RoutingKey, RoutingTable, DATA_PARTITION};

/// Base key of the per-direction boundary injectors.
pub const INJECTOR_KEY_BASE: u32 = 0x4000_0000;

/// Key block owned by the command source.
pub const COMMAND_KEY_GROUP: KeyMask = KeyMask {
    key: 0x7FFF_0000,
    mask: 0xFFFF_FFFC,
};

/// Builder for a demo heat-grid lattice.
#[derive(Debug, Clone)]
pub struct GridBuilder {
    width: usize,
    height: usize,
    wrap: bool,
    inject: bool,
    initial_temperature: i32,
}

impl GridBuilder {
    /// A lattice of `width × height` elements, open boundaries, no
    /// injection, all elements starting at temperature 0.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            wrap: false,
            inject: false,
            initial_temperature: 0,
        }
    }

    /// Wrap the lattice into a torus.
    #[must_use]
    pub fn wrap(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }

    /// Feed open boundaries from per-direction live injectors.
    #[must_use]
    pub fn inject_boundaries(mut self, inject: bool) -> Self {
        self.inject = inject;
        self
    }

    /// Initial temperature for every element.
    #[must_use]
    pub fn initial_temperature(mut self, temperature: i32) -> Self {
        self.initial_temperature = temperature;
        self
    }

    /// Build the graph and its routing table.
    #[must_use]
    pub fn build(self) -> GridDemo {
        let mut graph = MachineGraph::new();
        let mut table = RoutingTable::new();

        let mut elements = Vec::with_capacity(self.width * self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                let id = graph.add_vertex(
                    format!("heat({x},{y})"),
                    VertexKind::HeatElement(HeatElement {
                        initial_temperature: self.initial_temperature,
                    }),
                );
                table.set_partition_key(id, DATA_PARTITION, RoutingKey(element_key(elements.len())));
                elements.push(id);
            }
        }

        let injectors: Option<[VertexId; Direction::COUNT]> = self.inject.then(|| {
            Direction::ALL.map(|d| {
                let id = graph.add_vertex(format!("injector({d})"), VertexKind::LiveInjector);
                table.set_partition_key(
                    id,
                    DATA_PARTITION,
                    RoutingKey(INJECTOR_KEY_BASE + d.slot() as u32),
                );
                id
            })
        });

        // Neighbour wiring: the slot tagged EAST is fed by the element one
        // step east, and so on.
        for y in 0..self.height {
            for x in 0..self.width {
                let cell = elements[y * self.width + x];
                for direction in Direction::ALL {
                    let (dx, dy) = direction.offset();
                    let nx = x as i64 + dx;
                    let ny = y as i64 + dy;
                    if let Some((nx, ny)) = self.resolve(nx, ny) {
                        let source = elements[ny * self.width + nx];
                        let edge = graph.add_edge(
                            source,
                            cell,
                            EdgeKind::Heat(direction),
                            format!("heat({nx},{ny})->heat({x},{y})"),
                        );
                        table.set_edge_key(
                            edge,
                            RoutingKey(element_key(ny * self.width + nx)),
                        );
                    } else if let Some(injectors) = &injectors {
                        let injector = injectors[direction.slot()];
                        let edge = graph.add_edge(
                            injector,
                            cell,
                            EdgeKind::Heat(direction),
                            format!("injector({direction})->heat({x},{y})"),
                        );
                        table.set_edge_key(
                            edge,
                            RoutingKey(INJECTOR_KEY_BASE + direction.slot() as u32),
                        );
                    }
                }
            }
        }

        let gatherer = graph.add_vertex("gatherer", VertexKind::Gatherer);
        let commander = graph.add_vertex("commander", VertexKind::CommandSource);
        for (index, &cell) in elements.iter().enumerate() {
            let (x, y) = (index % self.width, index / self.width);
            graph.add_edge(
                cell,
                gatherer,
                EdgeKind::Data,
                format!("heat({x},{y})->gatherer"),
            );
            let command = graph.add_edge(
                commander,
                cell,
                EdgeKind::Command,
                format!("commander->heat({x},{y})"),
            );
            table.set_edge_key_groups(command, vec![COMMAND_KEY_GROUP]);
        }

        GridDemo {
            graph,
            table,
            elements,
            width: self.width,
            height: self.height,
        }
    }

    /// Map a possibly out-of-range coordinate onto the lattice, or `None`
    /// on an open boundary.
    fn resolve(&self, x: i64, y: i64) -> Option<(usize, usize)> {
        let (w, h) = (self.width as i64, self.height as i64);
        if (0..w).contains(&x) && (0..h).contains(&y) {
            #[allow(clippy::cast_sign_loss)]
            return Some((x as usize, y as usize));
        }
        if self.wrap {
            #[allow(clippy::cast_sign_loss)]
            return Some(((x.rem_euclid(w)) as usize, (y.rem_euclid(h)) as usize));
        }
        None
    }
}

/// Transmission key for the element at row-major index `i`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn element_key(index: usize) -> u32 {
    (index as u32 + 1) * 0x10
}

/// A built demo lattice: the graph, its routing table, and the element
/// index.
#[derive(Debug, Clone)]
pub struct GridDemo {
    /// The machine graph.
    pub graph: MachineGraph,
    /// Populated routing table.
    pub table: RoutingTable,
    elements: Vec<VertexId>,
    width: usize,
    height: usize,
}

impl GridDemo {
    /// Element at `(x, y)`.
    #[must_use]
    pub fn element(&self, x: usize, y: usize) -> VertexId {
        self.elements[y * self.width + x]
    }

    /// All cells as `(x, y, vertex)` in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, VertexId)> + '_ {
        self.elements
            .iter()
            .enumerate()
            .map(|(i, &id)| (i % self.width, i / self.width, id))
    }

    /// Lattice width.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Lattice height.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Neighbourhood;
    use crate::keys::KeyLookup;

    #[test]
    fn open_grid_corner_has_two_neighbours() {
        let demo = GridBuilder::new(3, 3).build();
        let buckets = Neighbourhood::classify(&demo.graph, demo.element(0, 0)).unwrap();
        // Corner (0,0): east and north neighbours only.
        assert!(buckets.directional[Direction::East.slot()].is_some());
        assert!(buckets.directional[Direction::North.slot()].is_some());
        assert!(buckets.directional[Direction::West.slot()].is_none());
        assert!(buckets.directional[Direction::South.slot()].is_none());
        assert_eq!(buckets.live_input_count(), 2);
    }

    #[test]
    fn torus_binds_all_four_slots_everywhere() {
        let demo = GridBuilder::new(3, 3).wrap(true).build();
        for (_, _, cell) in demo.cells() {
            let buckets = Neighbourhood::classify(&demo.graph, cell).unwrap();
            assert_eq!(buckets.live_input_count(), 4);
        }
    }

    #[test]
    fn injected_boundaries_fill_the_open_slots() {
        let demo = GridBuilder::new(2, 2).inject_boundaries(true).build();
        let buckets = Neighbourhood::classify(&demo.graph, demo.element(0, 0)).unwrap();
        // Open west and south boundaries come from injectors.
        assert!(buckets.injected[Direction::West.slot()].is_some());
        assert!(buckets.injected[Direction::South.slot()].is_some());
        assert!(buckets.directional[Direction::East.slot()].is_some());
        assert!(buckets.directional[Direction::North.slot()].is_some());
        assert_eq!(buckets.live_input_count(), 4);
    }

    #[test]
    fn every_cell_has_gatherer_and_command_wiring() {
        let demo = GridBuilder::new(2, 3).build();
        for (_, _, cell) in demo.cells() {
            let buckets = Neighbourhood::classify(&demo.graph, cell).unwrap();
            assert!(buckets.output.is_some());
            let command = buckets.command.expect("command channel");
            let groups = demo.table.edge_key_groups(command).unwrap();
            assert_eq!(groups, [COMMAND_KEY_GROUP]);
        }
    }

    #[test]
    fn edge_keys_match_source_transmission_keys() {
        let demo = GridBuilder::new(3, 1).build();
        let middle = demo.element(1, 0);
        let buckets = Neighbourhood::classify(&demo.graph, middle).unwrap();
        let east = buckets.directional[Direction::East.slot()].unwrap();
        let east_source = demo.graph.edge(east).source;
        assert_eq!(
            demo.table.edge_key(east),
            demo.table.partition_key(east_source, DATA_PARTITION)
        );
    }
}
