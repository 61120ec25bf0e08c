//! Types that mirror the producer's JSON snapshot.
//!
//! Every optional section is an `Option`, never a zero/empty sentinel, so the
//! presentation code has to decide what "absent" looks like.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryUsage {
    pub total: u64,
    pub used: u64,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TempSensor {
    #[serde(default)]
    pub label: Option<String>,
    pub current: f64,
    #[serde(default)]
    pub high: Option<f64>,
    #[serde(default)]
    pub critical: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FanSensor {
    #[serde(default)]
    pub label: Option<String>,
    // RPM
    pub current: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Battery {
    pub percent: f64,
    // negative values are producer sentinels (unknown / on mains)
    pub secsleft: i64,
    pub power_plugged: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiskUsage {
    pub total: u64,
    pub used: u64,
    pub free: u64,
    pub percent: f64,
}

/// Cumulative counters since boot; only ever grow for a given source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetIo {
    pub bytes_sent: u64,
    pub bytes_recv: u64,
    pub packets_sent: u64,
    pub packets_recv: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetRate {
    pub up_bps: f64,
    pub down_bps: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessInfo {
    pub pid: u32,
    // null for processes the producer was denied access to
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    pub cpu_percent: f64,
    pub memory_percent: f64,
}

/// One complete telemetry reading. Each inbound message carries a full
/// snapshot; there are no deltas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub source: String,
    pub machine: String,
    pub now_iso: String,
    pub cpu_percent: f64,
    #[serde(default)]
    pub cpu_cores: Option<u32>,
    #[serde(default)]
    pub load_avg: Option<(f64, f64, f64)>,
    pub mem: MemoryUsage,
    pub swap: MemoryUsage,
    #[serde(default)]
    pub temps: IndexMap<String, Vec<TempSensor>>,
    #[serde(default)]
    pub fans: IndexMap<String, Vec<FanSensor>>,
    #[serde(default)]
    pub battery: Option<Battery>,
    pub disk: IndexMap<String, DiskUsage>,
    pub net_io: NetIo,
    pub net_rate: NetRate,
    pub boot_time: f64,
    // already ordered by the producer
    pub top_procs: Vec<ProcessInfo>,
}

impl Snapshot {
    pub fn from_json(payload: &str) -> Result<Self, ParseError> {
        Ok(serde_json::from_str(payload)?)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use serde_json::{json, Value};

    /// A fully populated snapshot shaped like a Linux producer's output,
    /// including the extra fields the client ignores.
    pub fn snapshot_value(cpu: f64) -> Value {
        json!({
            "source": "host",
            "machine": "box-01",
            "now_iso": "2025-03-01T12:30:00.123456+00:00",
            "cpu_percent": cpu,
            "cpu_cores": 8,
            "load_avg": [0.52, 0.61, 0.70],
            "mem": {"total": 16000000000u64, "available": 9000000000u64, "percent": 43.8,
                    "used": 7000000000u64, "free": 1000000000u64},
            "swap": {"total": 2000000000u64, "used": 0, "free": 2000000000u64, "percent": 0.0,
                     "sin": 0, "sout": 0},
            "temps": {
                "coretemp": [
                    {"label": "Package id 0", "current": 45.0, "high": 90.0, "critical": 100.0},
                    {"label": "", "current": 44.0, "high": null, "critical": null}
                ]
            },
            "fans": {},
            "battery": null,
            "disk": {
                "/": {"total": 500000000000u64, "used": 120000000000u64, "free": 380000000000u64, "percent": 24.0},
                "/etc/hosts": {"total": 500000000000u64, "used": 120000000000u64, "free": 380000000000u64, "percent": 24.0},
                "/data": {"total": 2000000000000u64, "used": 1500000000000u64, "free": 500000000000u64, "percent": 75.0}
            },
            "net_io": {"bytes_sent": 123456789, "bytes_recv": 987654321, "packets_sent": 1000,
                       "packets_recv": 2000, "errin": 0, "errout": 0, "dropin": 0, "dropout": 0},
            "net_rate": {"up_bps": 1500000.0, "down_bps": 500.0},
            "boot_time": 1740800000.0,
            "top_procs": [
                {"pid": 42, "name": "postgres", "username": "postgres", "cpu_percent": 12.5, "memory_percent": 3.25},
                {"pid": 7, "name": "kworker", "username": null, "cpu_percent": 1.0, "memory_percent": 0.0}
            ]
        })
    }

    pub fn snapshot_json(cpu: f64) -> String {
        snapshot_value(cpu).to_string()
    }

    pub fn snapshot(cpu: f64) -> super::Snapshot {
        serde_json::from_value(snapshot_value(cpu)).expect("fixture parses")
    }
}
