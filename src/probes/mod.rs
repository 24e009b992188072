// Best-effort telemetry probes, assembled into one snapshot per request.
// Every probe has exactly two outcomes: a value, or None. I/O failures,
// parse failures and missing binaries all collapse into None; no probe's
// failure can disturb another's result.

pub mod ipv4;
mod linux;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tracing::instrument;

use crate::models::SysInfoSnapshot;

pub use linux::{parse_load_avg, parse_mem_stats};

/// Captures a command's stdout, or fails. Injectable so tests can swap in
/// a fake without touching the real OS command table.
pub trait CommandRunner: Send + Sync {
    /// Runs `argv` and returns its stdout as UTF-8. Spawn failure, nonzero
    /// exit status and non-UTF-8 output are all errors.
    fn run(&self, argv: &[String]) -> anyhow::Result<String>;
}

/// Runs commands against the real OS.
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, argv: &[String]) -> anyhow::Result<String> {
        let (program, args) = argv.split_first().context("empty command line")?;
        let output = std::process::Command::new(program)
            .args(args)
            .output()
            .with_context(|| format!("spawn {}", program))?;
        anyhow::ensure!(
            output.status.success(),
            "{} exited with {}",
            program,
            output.status
        );
        Ok(String::from_utf8(output.stdout)?)
    }
}

/// File paths the probes read. Defaults point at the live kernel
/// interfaces; tests point them at a temp directory.
#[derive(Debug, Clone)]
pub struct ProbeSources {
    pub cpu_temp_paths: Vec<PathBuf>,
    pub loadavg_path: PathBuf,
    pub uptime_path: PathBuf,
    pub meminfo_path: PathBuf,
}

impl Default for ProbeSources {
    fn default() -> Self {
        Self {
            cpu_temp_paths: vec![
                "/sys/class/thermal/thermal_zone0/temp".into(),
                "/sys/devices/virtual/thermal/thermal_zone0/temp".into(),
            ],
            loadavg_path: "/proc/loadavg".into(),
            uptime_path: "/proc/uptime".into(),
            meminfo_path: "/proc/meminfo".into(),
        }
    }
}

pub struct ProbeRepo {
    sources: ProbeSources,
    gpu_temp_cmd: String,
    runner: Arc<dyn CommandRunner>,
}

impl ProbeRepo {
    pub fn new(gpu_temp_cmd: impl Into<String>) -> Self {
        Self::with_sources(ProbeSources::default(), gpu_temp_cmd, Arc::new(SystemRunner))
    }

    /// Repo over custom sources and runner (e.g. for tests).
    pub fn with_sources(
        sources: ProbeSources,
        gpu_temp_cmd: impl Into<String>,
        runner: Arc<dyn CommandRunner>,
    ) -> Self {
        Self {
            sources,
            gpu_temp_cmd: gpu_temp_cmd.into(),
            runner,
        }
    }

    /// Runs every probe once and merges the results. Probes share no
    /// state, so order is irrelevant; there are no retries.
    #[instrument(skip(self), fields(repo = "probes", operation = "snapshot"))]
    pub async fn snapshot(&self) -> SysInfoSnapshot {
        let (ipv4, cpu_temp_c, gpu_temp_c, load, uptime_sec, mem) = tokio::join!(
            self.primary_ipv4(),
            self.cpu_temp_c(),
            self.gpu_temp_c(),
            self.load_avg(),
            self.uptime_sec(),
            self.mem(),
        );
        SysInfoSnapshot {
            ipv4,
            cpu_temp_c,
            gpu_temp_c,
            cpu_count: self.cpu_count(),
            load,
            uptime_sec,
            mem,
        }
    }

    #[instrument(skip(self), fields(probe = "cpu_temp"))]
    pub async fn cpu_temp_c(&self) -> Option<f64> {
        let paths = self.sources.cpu_temp_paths.clone();
        tokio::task::spawn_blocking(move || linux::read_cpu_temp_c(&paths))
            .await
            .ok()
            .flatten()
    }

    #[instrument(skip(self), fields(probe = "gpu_temp"))]
    pub async fn gpu_temp_c(&self) -> Option<f64> {
        let cmd = self.gpu_temp_cmd.clone();
        let runner = self.runner.clone();
        tokio::task::spawn_blocking(move || {
            let argv = shell_words::split(&cmd).ok()?;
            let out = runner.run(&argv).ok()?;
            parse_gpu_temp(&out)
        })
        .await
        .ok()
        .flatten()
    }

    pub fn cpu_count(&self) -> Option<u32> {
        std::thread::available_parallelism()
            .ok()
            .map(|n| n.get() as u32)
    }

    #[instrument(skip(self), fields(probe = "loadavg"))]
    pub async fn load_avg(&self) -> Option<crate::models::LoadAvg> {
        let path = self.sources.loadavg_path.clone();
        tokio::task::spawn_blocking(move || linux::read_load_avg(&path))
            .await
            .ok()
            .flatten()
    }

    #[instrument(skip(self), fields(probe = "uptime"))]
    pub async fn uptime_sec(&self) -> Option<f64> {
        let path = self.sources.uptime_path.clone();
        tokio::task::spawn_blocking(move || linux::read_uptime_sec(&path))
            .await
            .ok()
            .flatten()
    }

    #[instrument(skip(self), fields(probe = "meminfo"))]
    pub async fn mem(&self) -> Option<crate::models::MemStats> {
        let path = self.sources.meminfo_path.clone();
        tokio::task::spawn_blocking(move || linux::read_mem_stats(&path))
            .await
            .ok()
            .flatten()
    }

    #[instrument(skip(self), fields(probe = "ipv4"))]
    pub async fn primary_ipv4(&self) -> Option<String> {
        let runner = self.runner.clone();
        tokio::task::spawn_blocking(move || ipv4::discover(runner.as_ref()))
            .await
            .ok()
            .flatten()
    }
}

/// Parses `vcgencmd measure_temp` style output, typically `temp=54.0'C`:
/// the quote is stripped, the `temp=` token located and its `C` removed.
/// A bare float as the whole output is accepted as a fallback.
pub fn parse_gpu_temp(out: &str) -> Option<f64> {
    let text = out.replace('\'', "");
    let text = text.trim();
    for token in text.split_whitespace() {
        if let Some(value) = token.strip_prefix("temp=") {
            return value.replace('C', "").parse().ok();
        }
    }
    text.parse().ok()
}
