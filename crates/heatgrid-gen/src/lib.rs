//! Data specification generation for heat-grid simulation cores.
//!
//! Each core on the machine runs a fixed-function simulation binary that
//! expects a precisely laid-out memory image: a simulation header, its own
//! transmission key, the keys of its neighbours and boundary injectors, the
//! control command keys, and its initial temperature. This crate turns a
//! typed graph neighbourhood plus a routing-key table into that image.
//!
//! ```text
//! MachineGraph ──► Neighbourhood ──► ordered slot map
//!                        │
//!                        ▼
//!            generate_spec ──► KeyLookup per slot ──► SpecWriter ──► MemoryImage
//! ```
//!
//! Generation is single-threaded and synchronous per core, and
//! embarrassingly parallel across cores: a pass owns its writer and buckets
//! exclusively and only shares the read-only [`KeyLookup`].
//!
//! # Example
//!
//! ```
//! use heatgrid_gen::{generate_all, GenConfig, GridBuilder};
//!
//! let demo = GridBuilder::new(3, 3).wrap(true).initial_temperature(20).build();
//! let results = generate_all(&demo.graph, &demo.table, &GenConfig::default());
//! assert!(results.iter().all(|(_, r)| r.is_ok()));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_truncation)]

mod classify;
mod config;
mod error;
mod generate;
mod graph;
mod grid;
mod keys;
mod resources;

pub use classify::Neighbourhood;
pub use config::GenConfig;
pub use error::{GenError, Result};
pub use generate::{generate_all, generate_spec, GenContext, GeneratesSpec};
pub use graph::{
    Edge, EdgeId, EdgeKind, HasBinary, HeatElement, MachineGraph, Vertex, VertexId, VertexKind,
};
pub use grid::{element_key, GridBuilder, GridDemo, COMMAND_KEY_GROUP, INJECTOR_KEY_BASE};
pub use keys::{KeyLookup, KeyMask, RoutingKey, RoutingTable, DATA_PARTITION};
pub use resources::{
    ResourceRequirements, HEAT_ELEMENT_CPU_CYCLES, HEAT_ELEMENT_FAST_MEMORY_BYTES,
};

/// Commonly used types.
pub mod prelude {
    pub use crate::{
        generate_all, generate_spec, GenConfig, GenError, GridBuilder, KeyLookup, MachineGraph,
        Neighbourhood, Result, RoutingKey, RoutingTable,
    };
}
