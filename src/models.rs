// Wire model: the per-request telemetry snapshot

use serde::{Deserialize, Serialize};

/// Load averages as reported by the kernel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadAvg {
    #[serde(rename = "1m")]
    pub one: f64,
    #[serde(rename = "5m")]
    pub five: f64,
    #[serde(rename = "15m")]
    pub fifteen: f64,
}

/// Memory usage in megabytes, rounded to one decimal at computation time.
/// `free_mb` is backed by MemAvailable (reclaimable cache counts as free),
/// and `used_mb = total_mb - free_mb` exactly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MemStats {
    #[serde(rename = "totalMB")]
    pub total_mb: f64,
    #[serde(rename = "usedMB")]
    pub used_mb: f64,
    #[serde(rename = "freeMB")]
    pub free_mb: f64,
}

/// One immutable snapshot per request. Every field is independently
/// optional: a probe that fails serializes as `null` and never disturbs
/// the others.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SysInfoSnapshot {
    pub ipv4: Option<String>,
    pub cpu_temp_c: Option<f64>,
    pub gpu_temp_c: Option<f64>,
    pub cpu_count: Option<u32>,
    pub load: Option<LoadAvg>,
    pub uptime_sec: Option<f64>,
    pub mem: Option<MemStats>,
}

/// Round to one decimal place.
pub fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}
