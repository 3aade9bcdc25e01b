//! Per-core resource declaration.
//!
//! Advisory figures handed to the external placement/admission service so
//! it can fit cores onto hardware. Nothing here is enforced during
//! generation.

use heatgrid_layout::RegionPlan;

use crate::config::GenConfig;
use crate::graph::HeatElement;

/// CPU cycles a heat element consumes per simulation step.
pub const HEAT_ELEMENT_CPU_CYCLES: u32 = 45;

/// Fast (tightly-coupled) memory a heat element needs, in bytes.
pub const HEAT_ELEMENT_FAST_MEMORY_BYTES: u32 = 34;

/// Resource requirements declared for one core instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceRequirements {
    /// CPU budget in cycles per simulation step.
    pub cpu_cycles_per_step: u32,
    /// Local fast-memory budget in bytes.
    pub fast_memory_bytes: u32,
    /// Region-backed shared-memory budget in bytes.
    pub shared_memory_bytes: usize,
}

impl HeatElement {
    /// Resources this element declares for admission.
    ///
    /// The shared-memory figure is the true region total plus the
    /// configured buffering allowance.
    #[must_use]
    pub fn resources_required(&self, config: &GenConfig) -> ResourceRequirements {
        ResourceRequirements {
            cpu_cycles_per_step: HEAT_ELEMENT_CPU_CYCLES,
            fast_memory_bytes: HEAT_ELEMENT_FAST_MEMORY_BYTES,
            shared_memory_bytes: RegionPlan::total_bytes() + config.buffer_allowance_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_memory_covers_regions_plus_allowance() {
        let element = HeatElement {
            initial_temperature: 0,
        };
        let config = GenConfig {
            buffer_allowance_bytes: 100,
            ..GenConfig::default()
        };
        let resources = element.resources_required(&config);
        assert_eq!(resources.shared_memory_bytes, RegionPlan::total_bytes() + 100);
        assert_eq!(resources.cpu_cycles_per_step, 45);
        assert_eq!(resources.fast_memory_bytes, 34);
    }
}
