//! Region ordinals, declared sizes, and the fixed layout plan.
//!
//! The firmware locates each region by its ordinal and reads fixed offsets
//! within it. Region sizes are independent of how many connections an
//! element actually has — unbound slots are written as the sentinel, never
//! omitted.

use core::fmt;

use crate::command::COMMAND_WORDS;
use crate::direction::Direction;
use crate::header::SYSTEM_WORDS;

/// Bytes per word. Every value in the image is a little-endian 32-bit word.
pub const WORD_BYTES: usize = 4;

/// Sentinel written to a key slot with no bound connection.
///
/// Encodes little-endian as `FF FF FF FF`; valid keys are non-negative, so
/// the sentinel is distinct from every key including 0.
pub const UNBOUND_KEY: i32 = -1;

/// Words in the transmission region: `has_key` flag + key.
pub const TRANSMISSION_WORDS: usize = 2;

/// Slot sets in the neighbour-key region: element neighbours, then
/// injected inputs.
pub const NEIGHBOUR_SLOT_SETS: usize = 2;

/// Words in the temperature region: one initial scalar.
pub const TEMP_WORDS: usize = 1;

/// A region of the per-core memory image, ordinal-mapped.
///
/// The discriminant is the region ordinal the firmware indexes by; the
/// declaration order here is the image order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Region {
    /// Simulation header block.
    System = 0,
    /// Outgoing `has_key` flag and key.
    Transmission = 1,
    /// Four element-neighbour slots, then four injected-input slots.
    NeighbourKeys = 2,
    /// Stop, pause, resume keys in ascending key order.
    CommandKeys = 3,
    /// Initial temperature scalar.
    TempValue = 4,
}

impl Region {
    /// Number of regions in the image.
    pub const COUNT: usize = 5;

    /// All regions in image order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::System,
        Self::Transmission,
        Self::NeighbourKeys,
        Self::CommandKeys,
        Self::TempValue,
    ];

    /// Region ordinal — the firmware's index for this region.
    #[must_use]
    pub const fn ordinal(self) -> usize {
        self as usize
    }

    /// Region for an ordinal, if in range.
    #[must_use]
    pub const fn from_ordinal(ordinal: usize) -> Option<Self> {
        match ordinal {
            0 => Some(Self::System),
            1 => Some(Self::Transmission),
            2 => Some(Self::NeighbourKeys),
            3 => Some(Self::CommandKeys),
            4 => Some(Self::TempValue),
            _ => None,
        }
    }

    /// Declared size of this region in bytes.
    #[must_use]
    pub const fn size_bytes(self) -> usize {
        match self {
            Self::System => SYSTEM_WORDS * WORD_BYTES,
            Self::Transmission => TRANSMISSION_WORDS * WORD_BYTES,
            Self::NeighbourKeys => NEIGHBOUR_SLOT_SETS * Direction::COUNT * WORD_BYTES,
            Self::CommandKeys => COMMAND_WORDS * WORD_BYTES,
            Self::TempValue => TEMP_WORDS * WORD_BYTES,
        }
    }

    /// Human-readable label, written into diagnostics and the image index.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::System => "systemInfo",
            Self::Transmission => "transmission",
            Self::NeighbourKeys => "neighbourKeys",
            Self::CommandKeys => "commands",
            Self::TempValue => "temp",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self, self.ordinal())
    }
}

/// One row of the layout plan: a region with its image offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionEntry {
    /// The region.
    pub region: Region,
    /// Byte offset of the region within the image.
    pub offset: usize,
    /// Declared size in bytes.
    pub size: usize,
    /// Region label.
    pub label: &'static str,
}

/// The ordered region table with cumulative offsets.
///
/// Regions are laid out contiguously in ordinal order with no padding.
#[derive(Debug, Clone)]
pub struct RegionPlan {
    entries: [RegionEntry; Region::COUNT],
}

impl RegionPlan {
    /// The standard heat-element plan.
    #[must_use]
    pub fn standard() -> Self {
        let mut offset = 0;
        let entries = Region::ALL.map(|region| {
            let entry = RegionEntry {
                region,
                offset,
                size: region.size_bytes(),
                label: region.label(),
            };
            offset += entry.size;
            entry
        });
        Self { entries }
    }

    /// All entries in image order.
    #[must_use]
    pub fn entries(&self) -> &[RegionEntry] {
        &self.entries
    }

    /// Entry for one region.
    #[must_use]
    pub fn entry(&self, region: Region) -> &RegionEntry {
        &self.entries[region.ordinal()]
    }

    /// Total image size in bytes — the sum of all declared region sizes.
    #[must_use]
    pub const fn total_bytes() -> usize {
        (SYSTEM_WORDS
            + TRANSMISSION_WORDS
            + NEIGHBOUR_SLOT_SETS * Direction::COUNT
            + COMMAND_WORDS
            + TEMP_WORDS)
            * WORD_BYTES
    }
}

impl Default for RegionPlan {
    fn default() -> Self {
        Self::standard()
    }
}
