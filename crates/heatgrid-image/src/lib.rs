//! Region-based binary image writer for heat-grid cores.
//!
//! This crate turns a sequence of region reservations and little-endian
//! word writes into a finalized, hardware-loadable [`MemoryImage`]. The
//! region set, sizes, and encoding come from [`heatgrid_layout`]; this crate
//! enforces them while the image is being built.
//!
//! # Example
//!
//! ```
//! use heatgrid_image::SpecWriter;
//! use heatgrid_layout::{Region, RegionPlan};
//!
//! # fn main() -> heatgrid_image::Result<()> {
//! let mut writer = SpecWriter::new();
//! for entry in RegionPlan::standard().entries() {
//!     writer.reserve(entry.region, entry.size, entry.label)?;
//! }
//! writer.focus(Region::System)?;
//! writer.write_words(&[0xABCD, 1000, 0, 0])?;
//! # for region in [Region::Transmission, Region::NeighbourKeys,
//! #                Region::CommandKeys, Region::TempValue] {
//! #     writer.focus(region)?;
//! # }
//! let image = writer.finish()?;
//! assert_eq!(image.total_len(), RegionPlan::total_bytes());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

mod error;
mod image;
mod writer;

pub use error::{Result, SpecError};
pub use image::{image_file_name, ImageEntry, MemoryImage};
pub use writer::SpecWriter;
