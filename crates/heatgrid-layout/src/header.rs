//! Simulation header block convention.
//!
//! The first region of every image is a fixed metadata block the firmware
//! reads before touching anything else. The word layout:
//!
//! | Word | Content |
//! |------|---------|
//! | 0 | application magic — FNV-1a hash of the binary file name |
//! | 1 | timer period in µs (`timestep_us × time_scale`) |
//! | 2 | control flags (reserved, 0) |
//! | 3 | recording-region size (0 — recording is handled off-core) |

/// Words in the simulation header block.
pub const SYSTEM_WORDS: usize = 4;

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// Application magic for a binary file name.
///
/// FNV-1a over the name's UTF-8 bytes. Must stay a stable pure function:
/// the magic feeds the deterministic image and the firmware compares it
/// against its own compiled-in value to reject mismatched loads.
#[must_use]
pub fn binary_magic(binary_name: &str) -> u32 {
    let mut hash = FNV_OFFSET_BASIS;
    for byte in binary_name.bytes() {
        hash ^= u32::from(byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Build the simulation header block for one core.
///
/// `timestep_us` is the simulation timestep; `time_scale` stretches it to
/// the wall-clock timer period the firmware programs.
#[must_use]
pub fn simulation_header(
    binary_name: &str,
    timestep_us: u32,
    time_scale: u32,
) -> [u32; SYSTEM_WORDS] {
    [
        binary_magic(binary_name),
        timestep_us.saturating_mul(time_scale),
        0, // control flags, reserved
        0, // recording-region size, recording handled off-core
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn magic_is_stable_and_name_sensitive() {
        let a = binary_magic("heat_demo.aplx");
        let b = binary_magic("heat_demo.aplx");
        assert_eq!(a, b);
        assert_ne!(a, binary_magic("other.aplx"));
    }

    #[test]
    fn fnv1a_known_vector() {
        // FNV-1a("a") = 0xe40c292c
        assert_eq!(binary_magic("a"), 0xe40c_292c);
    }

    #[test]
    fn timer_period_scales() {
        let header = simulation_header("heat_demo.aplx", 1000, 3);
        assert_eq!(header[1], 3000);
        assert_eq!(header[2], 0);
        assert_eq!(header[3], 0);
    }
}
