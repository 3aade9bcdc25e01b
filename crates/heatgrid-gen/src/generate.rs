//! Per-core data specification generation.
//!
//! Orchestrates classification, region planning, key resolution, and region
//! writing into one core's memory image. Generation is a pure terminating
//! computation: for a fixed graph and routing table the output is
//! bit-identical across runs, because every table written to bytes is
//! walked in a fixed order (direction slots in enum order, command keys
//! explicitly sorted, graph adjacency in insertion order).

use heatgrid_image::{MemoryImage, SpecWriter};
use heatgrid_layout::{
    simulation_header, Region, RegionPlan, COMMAND_WORDS, UNBOUND_KEY,
};
use tracing::{debug, info, warn};

use crate::classify::Neighbourhood;
use crate::config::GenConfig;
use crate::error::{GenError, Result};
use crate::graph::{EdgeId, HasBinary, HeatElement, MachineGraph, VertexId, VertexKind};
use crate::keys::{KeyLookup, DATA_PARTITION};

/// Everything one generation pass reads. The pass owns no shared mutable
/// state, so many passes can run concurrently against one graph and one
/// routing table.
pub struct GenContext<'a> {
    /// The machine graph (read-only).
    pub graph: &'a MachineGraph,
    /// The vertex being generated for.
    pub vertex: VertexId,
    /// Routing-key lookup (read-only, shared).
    pub keys: &'a dyn KeyLookup,
    /// Generation parameters.
    pub config: &'a GenConfig,
}

/// Capability of producing a hardware-loadable data specification.
pub trait GeneratesSpec {
    /// Generate the memory image for one core instance.
    ///
    /// # Errors
    ///
    /// Any [`GenError`]; all of them abort this core only.
    fn generate_spec(&self, ctx: &GenContext<'_>) -> Result<MemoryImage>;
}

impl GeneratesSpec for HeatElement {
    fn generate_spec(&self, ctx: &GenContext<'_>) -> Result<MemoryImage> {
        let label = &ctx.graph.vertex(ctx.vertex).label;
        debug!(vertex = %label, "generating data specification");

        // Classification first: a multi-output or dead configuration must
        // abort before anything is reserved or written.
        let buckets = Neighbourhood::classify(ctx.graph, ctx.vertex)?;
        if buckets.live_input_count() == 0 {
            return Err(GenError::NoLiveInputs {
                vertex: label.clone(),
                context: buckets.describe(ctx.graph),
            });
        }

        let mut writer = SpecWriter::new();
        for entry in RegionPlan::standard().entries() {
            writer.reserve(entry.region, entry.size, entry.label)?;
        }

        // Header block, format owned by the firmware convention.
        writer.focus(Region::System)?;
        let kind = &ctx.graph.vertex(ctx.vertex).kind;
        writer.write_words(&simulation_header(
            kind.binary_file_name(),
            ctx.config.timestep_us,
            ctx.config.time_scale,
        ))?;

        // This core's own transmission key.
        writer.focus(Region::Transmission)?;
        match ctx.keys.partition_key(ctx.vertex, DATA_PARTITION) {
            Some(key) => writer.write_words(&[1, key.0])?,
            None => {
                debug!(vertex = %label, "no outgoing key, transmitting disabled");
                writer.write_words(&[0, 0])?;
            }
        }

        // Neighbour slots, then injected slots, both in fixed direction
        // order. Unbound slots carry the sentinel so the firmware can index
        // by slot.
        writer.focus(Region::NeighbourKeys)?;
        write_slot_set(ctx, &mut writer, &buckets.directional)?;
        write_slot_set(ctx, &mut writer, &buckets.injected)?;

        writer.focus(Region::CommandKeys)?;
        write_command_keys(ctx, &mut writer, &buckets)?;

        writer.focus(Region::TempValue)?;
        writer.write_i32(self.initial_temperature)?;

        let image = writer.finish()?;
        info!(
            vertex = %label,
            bytes = image.total_len(),
            live_inputs = buckets.live_input_count(),
            "data specification complete"
        );
        Ok(image)
    }
}

fn write_slot_set(
    ctx: &GenContext<'_>,
    writer: &mut SpecWriter,
    slots: &[Option<EdgeId>],
) -> Result<()> {
    for slot in slots {
        match slot {
            Some(edge) => {
                let key =
                    ctx.keys
                        .edge_key(*edge)
                        .ok_or_else(|| GenError::MissingEdgeKey {
                            vertex: ctx.graph.vertex(ctx.vertex).label.clone(),
                            edge: ctx.graph.edge(*edge).label.clone(),
                        })?;
                writer.write_word(key.0)?;
            }
            None => writer.write_i32(UNBOUND_KEY)?,
        }
    }
    Ok(())
}

fn write_command_keys(
    ctx: &GenContext<'_>,
    writer: &mut SpecWriter,
    buckets: &Neighbourhood,
) -> Result<()> {
    let label = &ctx.graph.vertex(ctx.vertex).label;
    let Some(command_edge) = buckets.command else {
        for _ in 0..COMMAND_WORDS {
            writer.write_i32(UNBOUND_KEY)?;
        }
        warn!(
            vertex = %label,
            "no command channel wired; core will not accept stop/pause/resume"
        );
        return Ok(());
    };

    let groups =
        ctx.keys
            .edge_key_groups(command_edge)
            .ok_or_else(|| GenError::MissingEdgeKey {
                vertex: label.clone(),
                edge: ctx.graph.edge(command_edge).label.clone(),
            })?;

    let mut keys: Vec<u32> = Vec::with_capacity(COMMAND_WORDS);
    for group in groups {
        keys.extend(group.keys(COMMAND_WORDS));
    }
    if keys.len() != COMMAND_WORDS {
        return Err(GenError::CommandKeyCount {
            vertex: label.clone(),
            expected: COMMAND_WORDS,
            actual: keys.len(),
        });
    }
    // The firmware assigns stop/pause/resume by ascending key order.
    keys.sort_unstable();
    writer.write_words(&keys)?;
    Ok(())
}

/// Generate the specification for one vertex.
///
/// # Errors
///
/// [`GenError::NotASpecSource`] for vertices that are not heat elements,
/// otherwise whatever [`GeneratesSpec::generate_spec`] returns.
pub fn generate_spec(
    graph: &MachineGraph,
    vertex: VertexId,
    keys: &dyn KeyLookup,
    config: &GenConfig,
) -> Result<MemoryImage> {
    let ctx = GenContext {
        graph,
        vertex,
        keys,
        config,
    };
    match &graph.vertex(vertex).kind {
        VertexKind::HeatElement(element) => element.generate_spec(&ctx),
        _ => Err(GenError::NotASpecSource {
            vertex: graph.vertex(vertex).label.clone(),
        }),
    }
}

/// Generate specifications for every heat element in the graph.
///
/// One core's configuration error never aborts the batch: each element's
/// result is returned alongside its id, failures logged and kept.
pub fn generate_all(
    graph: &MachineGraph,
    keys: &dyn KeyLookup,
    config: &GenConfig,
) -> Vec<(VertexId, Result<MemoryImage>)> {
    graph
        .heat_elements()
        .map(|vertex| {
            let result = generate_spec(graph, vertex, keys, config);
            if let Err(error) = &result {
                warn!(
                    vertex = %graph.vertex(vertex).label,
                    %error,
                    "specification generation failed"
                );
            }
            (vertex, result)
        })
        .collect()
}
