// Config loading and validation tests

use pisysd::config::AppConfig;
use std::collections::HashMap;

fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn load(vars: HashMap<String, String>) -> anyhow::Result<AppConfig> {
    AppConfig::load_from(|key| vars.get(key).cloned())
}

#[test]
fn test_defaults_when_nothing_is_set() {
    let config = load(env(&[])).expect("load");
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 9000);
    assert_eq!(config.probes.gpu_temp_cmd, "vcgencmd measure_temp");
}

#[test]
fn test_env_overrides() {
    let config = load(env(&[
        ("SYSINFO_HOST", "0.0.0.0"),
        ("SYSINFO_PORT", "8081"),
        ("GPU_TEMP_CMD", "cat /tmp/gpu_temp"),
    ]))
    .expect("load");
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 8081);
    assert_eq!(config.probes.gpu_temp_cmd, "cat /tmp/gpu_temp");
}

#[test]
fn test_rejects_non_numeric_port() {
    let err = load(env(&[("SYSINFO_PORT", "ninethousand")])).unwrap_err();
    assert!(err.to_string().contains("SYSINFO_PORT"));
}

#[test]
fn test_rejects_port_zero() {
    let err = load(env(&[("SYSINFO_PORT", "0")])).unwrap_err();
    assert!(err.to_string().contains("SYSINFO_PORT"));
}

#[test]
fn test_rejects_empty_host() {
    let err = load(env(&[("SYSINFO_HOST", "")])).unwrap_err();
    assert!(err.to_string().contains("SYSINFO_HOST"));
}
