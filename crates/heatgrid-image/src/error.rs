//! Error types for image writing and loading.

use heatgrid_layout::Region;
use thiserror::Error;

/// Result type alias for image operations.
pub type Result<T> = std::result::Result<T, SpecError>;

/// Errors that can occur while building or loading a memory image.
#[derive(Debug, Error)]
pub enum SpecError {
    /// A region was reserved twice.
    #[error("Region {region} already reserved")]
    DuplicateRegion {
        /// The region that was re-reserved.
        region: Region,
    },

    /// A region was reserved with a zero size.
    ///
    /// The firmware indexes fixed offsets into every region, so an empty
    /// region is never meaningful.
    #[error("Region {region} reserved with zero size")]
    InvalidSize {
        /// The offending region.
        region: Region,
    },

    /// Write focus was switched to a region that was never reserved.
    #[error("Region {region} is not reserved")]
    UnknownRegion {
        /// The unreserved region.
        region: Region,
    },

    /// A write was attempted with no region focused.
    #[error("No region is focused for writing")]
    NoFocus,

    /// A write would run past the region's declared size.
    #[error(
        "Write of {attempted} byte(s) at offset {cursor} overflows region \
         {region} (declared {declared} bytes)"
    )]
    RegionOverflow {
        /// The region being written.
        region: Region,
        /// Cursor position at the time of the write.
        cursor: usize,
        /// Bytes the write would have appended.
        attempted: usize,
        /// Declared region size.
        declared: usize,
    },

    /// The layout was finalized with a region in an unusable state.
    #[error(
        "Region {region} incomplete at finalize: {written} of {declared} \
         byte(s) written"
    )]
    IncompleteRegion {
        /// The incomplete region.
        region: Region,
        /// Bytes actually written.
        written: usize,
        /// Declared region size.
        declared: usize,
    },

    /// A loaded image does not match the standard plan length.
    #[error("Image is {actual} byte(s), expected {expected}")]
    BadImageLength {
        /// Expected length from the standard plan.
        expected: usize,
        /// Actual byte count.
        actual: usize,
    },

    /// I/O error while persisting or loading an image.
    #[error("I/O error: {source}")]
    Io {
        /// Underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}
