// Linux file probes: thermal zones, /proc/loadavg, /proc/uptime, /proc/meminfo.

use std::path::{Path, PathBuf};

use crate::models::{LoadAvg, MemStats, round1};

/// CPU die temperature in Celsius. Candidate paths are tried in order;
/// the first whose first line parses as integer millidegrees wins.
pub(super) fn read_cpu_temp_c(paths: &[PathBuf]) -> Option<f64> {
    paths
        .iter()
        .find_map(|p| read_millidegrees(p))
        .map(|milli| milli as f64 / 1000.0)
}

fn read_millidegrees(path: &Path) -> Option<i64> {
    let raw = std::fs::read_to_string(path).ok()?;
    raw.lines().next()?.trim().parse().ok()
}

pub(super) fn read_load_avg(path: &Path) -> Option<LoadAvg> {
    let raw = std::fs::read_to_string(path).ok()?;
    parse_load_avg(&raw)
}

/// First three whitespace-separated fields of a /proc/loadavg line.
/// All three must parse or the whole group is absent.
pub fn parse_load_avg(raw: &str) -> Option<LoadAvg> {
    let mut fields = raw.split_whitespace();
    let one = fields.next()?.parse().ok()?;
    let five = fields.next()?.parse().ok()?;
    let fifteen = fields.next()?.parse().ok()?;
    Some(LoadAvg { one, five, fifteen })
}

/// Seconds since boot: first field of /proc/uptime.
pub(super) fn read_uptime_sec(path: &Path) -> Option<f64> {
    let raw = std::fs::read_to_string(path).ok()?;
    raw.split_whitespace().next()?.parse().ok()
}

pub(super) fn read_mem_stats(path: &Path) -> Option<MemStats> {
    let raw = std::fs::read_to_string(path).ok()?;
    parse_mem_stats(&raw)
}

/// Extracts MemTotal and MemAvailable from /proc/meminfo (`Key: value kB`
/// lines, values in kibibytes). Both keys are required. MemAvailable, not
/// MemFree, backs `free_mb` so reclaimable cache counts as free.
pub fn parse_mem_stats(raw: &str) -> Option<MemStats> {
    let mut total_bytes: Option<u64> = None;
    let mut available_bytes: Option<u64> = None;
    for line in raw.lines() {
        let Some((key, rest)) = line.split_once(':') else {
            continue;
        };
        let Some(value) = rest.split_whitespace().next() else {
            continue;
        };
        let Ok(kib) = value.parse::<u64>() else {
            continue;
        };
        match key {
            "MemTotal" => total_bytes = Some(kib * 1024),
            "MemAvailable" => available_bytes = Some(kib * 1024),
            _ => {}
        }
    }

    let total = total_bytes?;
    let available = available_bytes?;
    let used = total.saturating_sub(available);
    let to_mb = |bytes: u64| round1(bytes as f64 / (1024.0 * 1024.0));
    Some(MemStats {
        total_mb: to_mb(total),
        used_mb: to_mb(used),
        free_mb: to_mb(available),
    })
}
