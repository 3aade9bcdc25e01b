//! Finalized memory image with per-region introspection.

use std::fs;
use std::path::Path;

use bytes::Bytes;
use heatgrid_layout::{Region, RegionPlan};

use crate::error::{Result, SpecError};

/// One region's placement within a finalized image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    /// The region.
    pub region: Region,
    /// Byte offset within the image.
    pub offset: usize,
    /// Region size in bytes.
    pub size: usize,
    /// Region label.
    pub label: String,
}

/// A finalized, hardware-loadable memory image for one core.
///
/// The blob is immutable; `Bytes` makes handing copies to concurrent
/// loaders cheap.
#[derive(Debug, Clone)]
pub struct MemoryImage {
    data: Bytes,
    entries: Vec<ImageEntry>,
}

impl MemoryImage {
    pub(crate) fn from_parts(data: Vec<u8>, entries: Vec<ImageEntry>) -> Self {
        Self {
            data: Bytes::from(data),
            entries,
        }
    }

    /// Reinterpret a raw blob as a standard-plan image.
    ///
    /// # Errors
    ///
    /// [`SpecError::BadImageLength`] if the blob does not match the standard
    /// plan's total size.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() != RegionPlan::total_bytes() {
            return Err(SpecError::BadImageLength {
                expected: RegionPlan::total_bytes(),
                actual: data.len(),
            });
        }
        let entries = RegionPlan::standard()
            .entries()
            .iter()
            .map(|e| ImageEntry {
                region: e.region,
                offset: e.offset,
                size: e.size,
                label: e.label.to_string(),
            })
            .collect();
        Ok(Self {
            data: Bytes::copy_from_slice(data),
            entries,
        })
    }

    /// Load a standard-plan image from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or has the wrong length.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("loading image from {}", path.display());
        let data = fs::read(path)?;
        Self::from_bytes(&data)
    }

    /// Persist the image blob.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, &self.data)?;
        Ok(())
    }

    /// Total image length in bytes.
    #[must_use]
    pub fn total_len(&self) -> usize {
        self.data.len()
    }

    /// True if the image holds no regions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The raw blob.
    #[must_use]
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Region placements in image order.
    #[must_use]
    pub fn entries(&self) -> &[ImageEntry] {
        &self.entries
    }

    /// Raw bytes of one region, if present in the image.
    #[must_use]
    pub fn region_bytes(&self, region: Region) -> Option<&[u8]> {
        let entry = self.entries.iter().find(|e| e.region == region)?;
        Some(&self.data[entry.offset..entry.offset + entry.size])
    }

    /// One region decoded as little-endian 32-bit words.
    #[must_use]
    pub fn region_words(&self, region: Region) -> Option<Vec<u32>> {
        let bytes = self.region_bytes(region)?;
        Some(
            bytes
                .chunks_exact(4)
                .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
                .collect(),
        )
    }

    /// One region decoded as little-endian signed words. Key slots use this
    /// view so the unbound sentinel reads back as −1.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn region_values(&self, region: Region) -> Option<Vec<i32>> {
        self.region_words(region)
            .map(|words| words.into_iter().map(|w| w as i32).collect())
    }
}

/// File name for one core's image, keyed by its placement.
///
/// The loader on the host side expects
/// `{hostname}_dataSpec_{x}_{y}_{p}.dat`.
#[must_use]
pub fn image_file_name(hostname: &str, x: u32, y: u32, p: u32) -> String {
    format!("{hostname}_dataSpec_{x}_{y}_{p}.dat")
}
