//! The fixed direction-slot order for neighbour and injected-input keys.
//!
//! The firmware reads four 32-bit key slots per slot set, always in
//! EAST, NORTH, WEST, SOUTH order. Slots for unbound directions carry the
//! sentinel, never a shorter table — the firmware indexes by slot, not by
//! count.

use core::fmt;

/// One of the four spatial neighbour directions.
///
/// The discriminant is the slot index in the neighbour-key and
/// injected-key tables. The order is a firmware contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    /// Slot 0.
    East = 0,
    /// Slot 1.
    North = 1,
    /// Slot 2.
    West = 2,
    /// Slot 3.
    South = 3,
}

impl Direction {
    /// Number of direction slots per slot set.
    pub const COUNT: usize = 4;

    /// All directions in firmware slot order.
    pub const ALL: [Self; Self::COUNT] = [Self::East, Self::North, Self::West, Self::South];

    /// Slot index within a key table.
    #[must_use]
    pub const fn slot(self) -> usize {
        self as usize
    }

    /// The direction a packet sent this way arrives from.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::East => Self::West,
            Self::North => Self::South,
            Self::West => Self::East,
            Self::South => Self::North,
        }
    }

    /// Unit grid step towards this direction, as `(dx, dy)`.
    ///
    /// Used by lattice builders to locate the neighbour that feeds a given
    /// slot: the EAST slot is fed by the element at `(x + 1, y)`.
    #[must_use]
    pub const fn offset(self) -> (i64, i64) {
        match self {
            Self::East => (1, 0),
            Self::North => (0, 1),
            Self::West => (-1, 0),
            Self::South => (0, -1),
        }
    }

    /// Direction for a slot index, if in range.
    #[must_use]
    pub const fn from_slot(slot: usize) -> Option<Self> {
        match slot {
            0 => Some(Self::East),
            1 => Some(Self::North),
            2 => Some(Self::West),
            3 => Some(Self::South),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::East => "EAST",
            Self::North => "NORTH",
            Self::West => "WEST",
            Self::South => "SOUTH",
        };
        f.write_str(name)
    }
}
