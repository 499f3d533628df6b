//! Memory-to-rate tiers.
//!
//! Thresholds are strict upper bounds checked in order; the first match wins.

/// Workloads below 512 MiB.
const TIER_1_LIMIT: u64 = 536_870_912;
/// Workloads below 1 GiB.
const TIER_2_LIMIT: u64 = 1_073_741_824;
/// Workloads below 2 GiB.
const TIER_3_LIMIT: u64 = 2_147_483_648;

/// Requests per second for a workload with `memory_bytes` of memory.
pub fn request_rate(memory_bytes: u64) -> u32 {
    if memory_bytes < TIER_1_LIMIT {
        20
    } else if memory_bytes < TIER_2_LIMIT {
        40
    } else if memory_bytes < TIER_3_LIMIT {
        80
    } else {
        160
    }
}
