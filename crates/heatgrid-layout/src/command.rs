//! Command slots and their wire ordering.
//!
//! A core that accepts control commands receives exactly three routing keys.
//! The firmware assigns meanings by ascending key order — stop takes the
//! lowest key, pause the middle, resume the highest — so the producer must
//! sort the resolved keys before writing them. The coupling between sort
//! order and command identity is inherited from the wire convention.

use core::fmt;

/// Words in the command-key region.
pub const COMMAND_WORDS: usize = 3;

/// One of the three command-key slots, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CommandSlot {
    /// Lowest key.
    Stop = 0,
    /// Middle key.
    Pause = 1,
    /// Highest key.
    Resume = 2,
}

impl CommandSlot {
    /// All slots in wire order.
    pub const ALL: [Self; COMMAND_WORDS] = [Self::Stop, Self::Pause, Self::Resume];

    /// Slot index within the command-key region.
    #[must_use]
    pub const fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for CommandSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Stop => "STOP",
            Self::Pause => "PAUSE",
            Self::Resume => "RESUME",
        };
        f.write_str(name)
    }
}
