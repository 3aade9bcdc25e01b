//! Generation contract tests
//!
//! Exercises the per-core generator against hand-built neighbourhoods:
//! image length, sentinel slots, command-key ordering, the failure
//! taxonomy, and the concrete reference layout.

use heatgrid_gen::{
    generate_spec, EdgeKind, GenConfig, GenError, HeatElement, KeyMask, MachineGraph, RoutingKey,
    RoutingTable, VertexId, VertexKind, DATA_PARTITION,
};
use heatgrid_layout::{Direction, Region, RegionPlan, UNBOUND_KEY};

fn element(graph: &mut MachineGraph, label: &str, temperature: i32) -> VertexId {
    graph.add_vertex(
        label,
        VertexKind::HeatElement(HeatElement {
            initial_temperature: temperature,
        }),
    )
}

/// The reference neighbourhood: directional inputs from NORTH (key 42) and
/// WEST (key 7), no injected inputs, no command channel, one output edge,
/// own key 100, temperature 20.
fn reference_setup() -> (MachineGraph, RoutingTable, VertexId) {
    let mut graph = MachineGraph::new();
    let core = element(&mut graph, "core", 20);
    let north = element(&mut graph, "north", 0);
    let west = element(&mut graph, "west", 0);
    let gatherer = graph.add_vertex("gatherer", VertexKind::Gatherer);

    let e_north = graph.add_edge(north, core, EdgeKind::Heat(Direction::North), "north->core");
    let e_west = graph.add_edge(west, core, EdgeKind::Heat(Direction::West), "west->core");
    graph.add_edge(core, gatherer, EdgeKind::Data, "core->gatherer");

    let mut table = RoutingTable::new();
    table.set_partition_key(core, DATA_PARTITION, RoutingKey(100));
    table.set_edge_key(e_north, RoutingKey(42));
    table.set_edge_key(e_west, RoutingKey(7));

    (graph, table, core)
}

#[test]
fn valid_neighbourhood_fills_exactly_the_planned_bytes() {
    let (graph, table, core) = reference_setup();
    let image = generate_spec(&graph, core, &table, &GenConfig::default()).unwrap();
    assert_eq!(image.total_len(), RegionPlan::total_bytes());
}

#[test]
fn reference_layout_region_by_region() {
    let (graph, table, core) = reference_setup();
    let image = generate_spec(&graph, core, &table, &GenConfig::default()).unwrap();

    assert_eq!(
        image.region_values(Region::NeighbourKeys).unwrap(),
        vec![-1, 42, 7, -1, -1, -1, -1, -1]
    );
    assert_eq!(
        image.region_values(Region::CommandKeys).unwrap(),
        vec![-1, -1, -1]
    );
    assert_eq!(
        image.region_words(Region::Transmission).unwrap(),
        vec![1, 100]
    );
    assert_eq!(image.region_values(Region::TempValue).unwrap(), vec![20]);
}

#[test]
fn header_carries_timer_period() {
    let (graph, table, core) = reference_setup();
    let config = GenConfig {
        timestep_us: 1000,
        time_scale: 2,
        ..GenConfig::default()
    };
    let image = generate_spec(&graph, core, &table, &config).unwrap();
    let header = image.region_words(Region::System).unwrap();
    assert_eq!(header.len(), 4);
    assert_eq!(header[1], 2000);
}

#[test]
fn unbound_slot_bytes_are_the_signed_sentinel() {
    let (graph, table, core) = reference_setup();
    let image = generate_spec(&graph, core, &table, &GenConfig::default()).unwrap();
    let bytes = image.region_bytes(Region::NeighbourKeys).unwrap();
    // EAST slot is unbound.
    assert_eq!(&bytes[0..4], &[0xFF, 0xFF, 0xFF, 0xFF]);
    let east = i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    assert_eq!(east, UNBOUND_KEY);
    assert_ne!(east, 0);
}

#[test]
fn missing_transmission_key_writes_zero_flag() {
    let (graph, _, core) = reference_setup();
    // Table with edge keys but no partition key for the core itself.
    let mut table = RoutingTable::new();
    for (edge_id, _) in graph.incoming(core) {
        table.set_edge_key(edge_id, RoutingKey(42));
    }
    let image = generate_spec(&graph, core, &table, &GenConfig::default()).unwrap();
    assert_eq!(image.region_words(Region::Transmission).unwrap(), vec![0, 0]);
}

#[test]
fn command_keys_are_written_in_ascending_order() {
    let (mut graph, mut table, core) = reference_setup();
    let commander = graph.add_vertex("commander", VertexKind::CommandSource);
    let command = graph.add_edge(commander, core, EdgeKind::Command, "commander->core");
    // Three single-key groups, deliberately unsorted: {17, 5, 9}.
    table.set_edge_key_groups(
        command,
        vec![
            KeyMask { key: 17, mask: u32::MAX },
            KeyMask { key: 5, mask: u32::MAX },
            KeyMask { key: 9, mask: u32::MAX },
        ],
    );
    let image = generate_spec(&graph, core, &table, &GenConfig::default()).unwrap();
    assert_eq!(
        image.region_words(Region::CommandKeys).unwrap(),
        vec![5, 9, 17]
    );
}

#[test]
fn command_block_is_enumerated_ascending_from_one_group() {
    let (mut graph, mut table, core) = reference_setup();
    let commander = graph.add_vertex("commander", VertexKind::CommandSource);
    let command = graph.add_edge(commander, core, EdgeKind::Command, "commander->core");
    table.set_edge_key_groups(
        command,
        vec![KeyMask {
            key: 0x30,
            mask: 0xFFFF_FFFC,
        }],
    );
    let image = generate_spec(&graph, core, &table, &GenConfig::default()).unwrap();
    assert_eq!(
        image.region_words(Region::CommandKeys).unwrap(),
        vec![0x30, 0x31, 0x32]
    );
}

#[test]
fn wrong_command_key_count_fails() {
    let (mut graph, mut table, core) = reference_setup();
    let commander = graph.add_vertex("commander", VertexKind::CommandSource);
    let command = graph.add_edge(commander, core, EdgeKind::Command, "commander->core");
    // A group spanning only two keys.
    table.set_edge_key_groups(
        command,
        vec![KeyMask {
            key: 0x30,
            mask: 0xFFFF_FFFE,
        }],
    );
    let err = generate_spec(&graph, core, &table, &GenConfig::default()).unwrap_err();
    match err {
        GenError::CommandKeyCount {
            vertex,
            expected,
            actual,
        } => {
            assert_eq!(vertex, "core");
            assert_eq!(expected, 3);
            assert_eq!(actual, 2);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn zero_live_inputs_fails_with_context() {
    let mut graph = MachineGraph::new();
    let core = element(&mut graph, "lonely", 0);
    let gatherer = graph.add_vertex("gatherer", VertexKind::Gatherer);
    graph.add_edge(core, gatherer, EdgeKind::Data, "lonely->gatherer");

    let table = RoutingTable::new();
    let err = generate_spec(&graph, core, &table, &GenConfig::default()).unwrap_err();
    match err {
        GenError::NoLiveInputs { vertex, context } => {
            assert_eq!(vertex, "lonely");
            assert!(context.contains("EAST=<unbound>"));
            assert!(context.contains("lonely->gatherer"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn multiple_output_channels_fail() {
    let (mut graph, table, core) = reference_setup();
    let second = graph.add_vertex("gatherer2", VertexKind::Gatherer);
    graph.add_edge(core, second, EdgeKind::Data, "core->gatherer2");

    let err = generate_spec(&graph, core, &table, &GenConfig::default()).unwrap_err();
    assert!(matches!(err, GenError::MultipleOutputChannels { .. }));
}

#[test]
fn bound_edge_without_key_fails() {
    let (graph, _, core) = reference_setup();
    // Table with the partition key but no edge keys.
    let mut table = RoutingTable::new();
    table.set_partition_key(core, DATA_PARTITION, RoutingKey(100));
    let err = generate_spec(&graph, core, &table, &GenConfig::default()).unwrap_err();
    match err {
        GenError::MissingEdgeKey { vertex, edge } => {
            assert_eq!(vertex, "core");
            assert_eq!(edge, "north->core");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn non_element_vertices_do_not_generate() {
    let mut graph = MachineGraph::new();
    let gatherer = graph.add_vertex("gatherer", VertexKind::Gatherer);
    let table = RoutingTable::new();
    let err = generate_spec(&graph, gatherer, &table, &GenConfig::default()).unwrap_err();
    assert!(matches!(err, GenError::NotASpecSource { .. }));
}

#[test]
fn duplicate_direction_slot_uses_the_later_edge() {
    let mut graph = MachineGraph::new();
    let core = element(&mut graph, "core", 0);
    let a = element(&mut graph, "a", 0);
    let b = element(&mut graph, "b", 0);
    let first = graph.add_edge(a, core, EdgeKind::Heat(Direction::East), "a->core");
    let second = graph.add_edge(b, core, EdgeKind::Heat(Direction::East), "b->core");

    let mut table = RoutingTable::new();
    table.set_edge_key(first, RoutingKey(11));
    table.set_edge_key(second, RoutingKey(22));

    let image = generate_spec(&graph, core, &table, &GenConfig::default()).unwrap();
    let slots = image.region_values(Region::NeighbourKeys).unwrap();
    assert_eq!(slots[Direction::East.slot()], 22);
}

#[test]
fn generation_is_idempotent() {
    let (graph, table, core) = reference_setup();
    let config = GenConfig::default();
    let first = generate_spec(&graph, core, &table, &config).unwrap();
    let second = generate_spec(&graph, core, &table, &config).unwrap();
    assert_eq!(first.data(), second.data());
}
