//! Memory-image contract for the `heat_demo.aplx` simulation core.
//!
//! This crate has **no dependencies** and **no I/O** — it is a pure model of
//! the firmware's view of a core's memory image: region ordinals, declared
//! sizes, direction-slot order, the unbound-slot sentinel, command-slot
//! order, and the simulation header word convention.
//!
//! Everything here is a compatibility surface with the on-chip binary, which
//! indexes the image by fixed region ordinal and fixed intra-region offset.
//! Changing region order, any declared size, the sentinel value, or the
//! little-endian word encoding is a breaking format change.
//!
//! # Crate organisation
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`region`] | Region ordinals, declared sizes, labels, the layout plan |
//! | [`direction`] | The fixed EAST/NORTH/WEST/SOUTH slot order |
//! | [`command`] | Command slots (stop/pause/resume) and their key ordering |
//! | [`header`] | Simulation header block word convention |

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod command;
pub mod direction;
pub mod header;
pub mod region;

pub use command::{CommandSlot, COMMAND_WORDS};
pub use direction::Direction;
pub use header::{binary_magic, simulation_header, SYSTEM_WORDS};
pub use region::{Region, RegionEntry, RegionPlan, UNBOUND_KEY, WORD_BYTES};
