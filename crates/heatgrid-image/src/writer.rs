//! Append-only, refocusable region writer.
//!
//! A [`SpecWriter`] builds one core's memory image region by region: reserve
//! every region up front, switch focus between them, append little-endian
//! 32-bit words, then [`finish`](SpecWriter::finish) into an immutable
//! [`MemoryImage`]. Writes never cross a region's declared size.

use heatgrid_layout::Region;
use tracing::trace;

use crate::error::{Result, SpecError};
use crate::image::{ImageEntry, MemoryImage};

struct ReservedRegion {
    size: usize,
    label: String,
    buf: Vec<u8>,
    focused: bool,
}

/// Region-based binary writer for one core's memory image.
///
/// Finalization consumes the writer, so writes after [`finish`] are rejected
/// at compile time.
///
/// [`finish`]: SpecWriter::finish
pub struct SpecWriter {
    regions: Vec<Option<ReservedRegion>>,
    focus: Option<Region>,
}

impl SpecWriter {
    /// Create a writer with no regions reserved.
    #[must_use]
    pub fn new() -> Self {
        let mut regions = Vec::with_capacity(Region::COUNT);
        regions.resize_with(Region::COUNT, || None);
        Self {
            regions,
            focus: None,
        }
    }

    /// Declare a region with its size and label.
    ///
    /// # Errors
    ///
    /// [`SpecError::DuplicateRegion`] if the region is already reserved;
    /// [`SpecError::InvalidSize`] if `size_bytes` is zero.
    pub fn reserve(
        &mut self,
        region: Region,
        size_bytes: usize,
        label: impl Into<String>,
    ) -> Result<()> {
        if size_bytes == 0 {
            return Err(SpecError::InvalidSize { region });
        }
        let slot = &mut self.regions[region.ordinal()];
        if slot.is_some() {
            return Err(SpecError::DuplicateRegion { region });
        }
        let label = label.into();
        trace!(%region, size_bytes, %label, "reserved region");
        *slot = Some(ReservedRegion {
            size: size_bytes,
            label,
            buf: Vec::with_capacity(size_bytes),
            focused: false,
        });
        Ok(())
    }

    /// Switch the write focus to a reserved region.
    ///
    /// # Errors
    ///
    /// [`SpecError::UnknownRegion`] if the region was never reserved.
    pub fn focus(&mut self, region: Region) -> Result<()> {
        match &mut self.regions[region.ordinal()] {
            Some(reserved) => {
                reserved.focused = true;
                self.focus = Some(region);
                Ok(())
            }
            None => Err(SpecError::UnknownRegion { region }),
        }
    }

    /// Append one unsigned 32-bit word, little-endian, at the focused
    /// region's cursor.
    ///
    /// # Errors
    ///
    /// [`SpecError::NoFocus`] if no region is focused;
    /// [`SpecError::RegionOverflow`] if the word would cross the region's
    /// declared size.
    pub fn write_word(&mut self, value: u32) -> Result<()> {
        let (region, reserved) = self.focused_mut()?;
        Self::check_fit(region, reserved, 4)?;
        reserved.buf.extend_from_slice(&value.to_le_bytes());
        Ok(())
    }

    /// Append one signed 32-bit word, little-endian. Used for the unbound
    /// slot sentinel and the temperature scalar.
    ///
    /// # Errors
    ///
    /// Same as [`write_word`](Self::write_word).
    #[allow(clippy::cast_sign_loss)]
    pub fn write_i32(&mut self, value: i32) -> Result<()> {
        self.write_word(value as u32)
    }

    /// Append a contiguous word sequence.
    ///
    /// The whole sequence is checked against the declared size up front, so
    /// a failing call writes nothing.
    ///
    /// # Errors
    ///
    /// Same as [`write_word`](Self::write_word).
    pub fn write_words(&mut self, values: &[u32]) -> Result<()> {
        let (region, reserved) = self.focused_mut()?;
        Self::check_fit(region, reserved, values.len() * 4)?;
        for value in values {
            reserved.buf.extend_from_slice(&value.to_le_bytes());
        }
        Ok(())
    }

    /// Bytes written so far to a region, if reserved.
    #[must_use]
    pub fn written(&self, region: Region) -> Option<usize> {
        self.regions[region.ordinal()]
            .as_ref()
            .map(|r| r.buf.len())
    }

    /// Finalize the layout into an immutable [`MemoryImage`].
    ///
    /// Unwritten tails of reserved regions are zero-filled. Regions are laid
    /// out contiguously in ordinal order.
    ///
    /// # Errors
    ///
    /// [`SpecError::IncompleteRegion`] if any reserved region was never
    /// focused, or if the [`Region::System`] header was not written to its
    /// full declared size.
    pub fn finish(self) -> Result<MemoryImage> {
        let mut entries = Vec::new();
        let mut data = Vec::new();
        let mut offset = 0;

        for region in Region::ALL {
            let Some(reserved) = &self.regions[region.ordinal()] else {
                continue;
            };
            if !reserved.focused {
                return Err(SpecError::IncompleteRegion {
                    region,
                    written: 0,
                    declared: reserved.size,
                });
            }
            if region == Region::System && reserved.buf.len() < reserved.size {
                return Err(SpecError::IncompleteRegion {
                    region,
                    written: reserved.buf.len(),
                    declared: reserved.size,
                });
            }
            data.extend_from_slice(&reserved.buf);
            data.resize(offset + reserved.size, 0);
            entries.push(ImageEntry {
                region,
                offset,
                size: reserved.size,
                label: reserved.label.clone(),
            });
            offset += reserved.size;
        }

        trace!(total_bytes = data.len(), "finalized image");
        Ok(MemoryImage::from_parts(data, entries))
    }

    fn focused_mut(&mut self) -> Result<(Region, &mut ReservedRegion)> {
        let region = self.focus.ok_or(SpecError::NoFocus)?;
        let reserved = self.regions[region.ordinal()]
            .as_mut()
            .ok_or(SpecError::UnknownRegion { region })?;
        Ok((region, reserved))
    }

    fn check_fit(region: Region, reserved: &ReservedRegion, bytes: usize) -> Result<()> {
        if reserved.buf.len() + bytes > reserved.size {
            return Err(SpecError::RegionOverflow {
                region,
                cursor: reserved.buf.len(),
                attempted: bytes,
                declared: reserved.size,
            });
        }
        Ok(())
    }
}

impl Default for SpecWriter {
    fn default() -> Self {
        Self::new()
    }
}
