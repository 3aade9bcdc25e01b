//! Generation configuration.
//!
//! One explicit struct constructed at process start and threaded through
//! every generation call — there is no ambient global configuration.

/// Parameters shared by every core's generation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenConfig {
    /// Simulation timestep in microseconds.
    pub timestep_us: u32,
    /// Wall-clock stretch factor applied to the timestep.
    pub time_scale: u32,
    /// Extra shared-memory bytes declared per core for host-side buffering,
    /// on top of the region total.
    pub buffer_allowance_bytes: usize,
    /// How often the host polls a core for buffered output, in microseconds.
    /// Consumed by the host-side readback collaborator; carried here so the
    /// declaration surface is complete.
    pub host_poll_interval_us: u32,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            timestep_us: 1000,
            time_scale: 1,
            buffer_allowance_bytes: 256,
            host_poll_interval_us: 50_000,
        }
    }
}
