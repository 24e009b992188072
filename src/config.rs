// Environment-based configuration with fixed defaults

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 9000;
pub const DEFAULT_GPU_TEMP_CMD: &str = "vcgencmd measure_temp";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub probes: ProbeConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Full command line for the GPU temperature query, shell-word split
    /// before execution.
    pub gpu_temp_cmd: String,
}

impl AppConfig {
    /// Load from the process environment: SYSINFO_HOST, SYSINFO_PORT,
    /// GPU_TEMP_CMD. Unset variables take the fixed defaults.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(|key| std::env::var(key).ok())
    }

    /// Load through an injectable variable lookup (e.g. for tests).
    pub fn load_from(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let host = lookup("SYSINFO_HOST").unwrap_or_else(|| DEFAULT_HOST.into());
        let port = match lookup("SYSINFO_PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| {
                anyhow::anyhow!("SYSINFO_PORT must be a port number, got {:?}", raw)
            })?,
            None => DEFAULT_PORT,
        };
        let gpu_temp_cmd = lookup("GPU_TEMP_CMD").unwrap_or_else(|| DEFAULT_GPU_TEMP_CMD.into());

        let config = AppConfig {
            server: ServerConfig { host, port },
            probes: ProbeConfig { gpu_temp_cmd },
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            !self.server.host.is_empty(),
            "SYSINFO_HOST must be non-empty"
        );
        anyhow::ensure!(
            self.server.port > 0,
            "SYSINFO_PORT must be between 1 and 65535, got {}",
            self.server.port
        );
        Ok(())
    }
}
