// Host vitals for the dashboard: CPU load, RAM use, and the first GPU.
//
// Linux only. CPU load is the busy share of jiffies since the previous read,
// so the first read after startup reports 0.0.

use crate::error::{JarvisError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use tokio::process::Command;
use tracing::debug;

const PROC_STAT: &str = "/proc/stat";
const PROC_MEMINFO: &str = "/proc/meminfo";
const KIB_PER_GIB: f64 = 1024.0 * 1024.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RamUsage {
    pub percent: f64,
    pub used_gb: f64,
    pub total_gb: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpuUsage {
    pub name: String,
    pub load: f64,
    pub memory_used: f64,
    pub memory_total: f64,
    pub temperature: f64,
}

/// Body of `GET /stats`. `gpu` is null when no GPU can be read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemVitals {
    pub cpu: f64,
    pub ram: RamUsage,
    pub gpu: Option<GpuUsage>,
}

#[async_trait]
pub trait VitalsReader: Send + Sync {
    async fn read(&self) -> Result<SystemVitals>;
}

/// Aggregate jiffies from the `cpu` line of /proc/stat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuTimes {
    pub busy: u64,
    pub total: u64,
}

pub fn parse_cpu_times(stat: &str) -> Option<CpuTimes> {
    let line = stat.lines().find(|line| line.starts_with("cpu "))?;
    let fields: Vec<u64> = line
        .split_whitespace()
        .skip(1)
        .map(str::parse::<u64>)
        .collect::<std::result::Result<_, _>>()
        .ok()?;
    if fields.len() < 4 {
        return None;
    }

    let total: u64 = fields.iter().sum();
    // idle + iowait
    let idle = fields[3] + fields.get(4).copied().unwrap_or(0);
    Some(CpuTimes {
        busy: total.saturating_sub(idle),
        total,
    })
}

/// Busy percentage between two samples, 0.0 when no time has passed.
pub fn cpu_percent(previous: CpuTimes, current: CpuTimes) -> f64 {
    let total = current.total.saturating_sub(previous.total);
    if total == 0 {
        return 0.0;
    }
    let busy = current.busy.saturating_sub(previous.busy);
    round2(busy as f64 * 100.0 / total as f64)
}

pub fn parse_meminfo(meminfo: &str) -> Option<RamUsage> {
    let field = |name: &str| -> Option<u64> {
        meminfo
            .lines()
            .find_map(|line| line.strip_prefix(name)?.strip_prefix(':'))?
            .split_whitespace()
            .next()?
            .parse()
            .ok()
    };

    let total = field("MemTotal")?;
    if total == 0 {
        return None;
    }
    let available = field("MemAvailable").or_else(|| field("MemFree"))?;
    let used = total.saturating_sub(available);

    Some(RamUsage {
        percent: round2(used as f64 * 100.0 / total as f64),
        used_gb: round2(used as f64 / KIB_PER_GIB),
        total_gb: round2(total as f64 / KIB_PER_GIB),
    })
}

/// First line of `nvidia-smi --format=csv,noheader,nounits` output for
/// name, utilization, memory used, memory total, temperature.
pub fn parse_nvidia_smi(output: &str) -> Option<GpuUsage> {
    let line = output.lines().next()?;
    let parts: Vec<&str> = line.split(',').map(str::trim).collect();
    if parts.len() < 5 || parts[0].is_empty() {
        return None;
    }

    Some(GpuUsage {
        name: parts[0].to_string(),
        load: parts[1].parse().ok()?,
        memory_used: parts[2].parse().ok()?,
        memory_total: parts[3].parse().ok()?,
        temperature: parts[4].parse().ok()?,
    })
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Reads /proc and asks `nvidia-smi` for the GPU
#[derive(Debug, Default)]
pub struct ProcVitals {
    last_cpu: Mutex<Option<CpuTimes>>,
}

impl ProcVitals {
    pub fn new() -> Self {
        Self::default()
    }

    async fn cpu(&self) -> Result<f64> {
        let stat = tokio::fs::read_to_string(PROC_STAT).await?;
        let current = parse_cpu_times(&stat)
            .ok_or_else(|| JarvisError::Vitals("unreadable cpu line".to_string()))?;

        let mut last = self
            .last_cpu
            .lock()
            .map_err(|_| JarvisError::Vitals("cpu sample lock poisoned".to_string()))?;
        let percent = last.map(|previous| cpu_percent(previous, current)).unwrap_or(0.0);
        *last = Some(current);

        Ok(percent)
    }

    async fn gpu(&self) -> Option<GpuUsage> {
        let output = Command::new("nvidia-smi")
            .args([
                "--query-gpu=name,utilization.gpu,memory.used,memory.total,temperature.gpu",
                "--format=csv,noheader,nounits",
            ])
            .output()
            .await
            .ok()
            .filter(|o| o.status.success())?;

        let gpu = parse_nvidia_smi(&String::from_utf8_lossy(&output.stdout));
        if gpu.is_none() {
            debug!("nvidia-smi output not understood");
        }
        gpu
    }
}

#[async_trait]
impl VitalsReader for ProcVitals {
    async fn read(&self) -> Result<SystemVitals> {
        let cpu = self.cpu().await?;
        let meminfo = tokio::fs::read_to_string(PROC_MEMINFO).await?;
        let ram = parse_meminfo(&meminfo)
            .ok_or_else(|| JarvisError::Vitals("unreadable meminfo".to_string()))?;

        Ok(SystemVitals {
            cpu,
            ram,
            gpu: self.gpu().await,
        })
    }
}
