//! Display-ready values derived from a snapshot, recomputed on every render.
//!
//! Everything here is pure: no I/O, no state, and the snapshot is only
//! borrowed.

use std::borrow::Cow;

use chrono::{DateTime, Local};

use crate::format::{bps_fmt, bytes_fmt, gb_pair, time_left};
use crate::types::{Battery, DiskUsage, MemoryUsage, Snapshot};

/// Container bind-mounts of single files; they shadow the root filesystem
/// and would show up as duplicate disks.
pub const HIDDEN_MOUNTS: [&str; 3] = ["/etc/hosts", "/etc/hostname", "/etc/resolv.conf"];

pub const NOT_AVAILABLE: &str = "N/A";
pub const NO_BATTERY: &str = "No battery info";

/// Gauge fill for a temperature reading.
///
/// With a positive `high` threshold this is `current / high * 100`. Without
/// one there is no physical scale, so the reading in °C is used directly and
/// capped at 100 to keep the bar in bounds.
pub fn temp_pct(current: f64, high: Option<f64>) -> f64 {
    match high {
        Some(h) if h > 0.0 => current / h * 100.0,
        _ => current.min(100.0),
    }
}

/// Sensor label, or `sensor_<index>` when missing or blank.
pub fn sensor_label(label: Option<&str>, index: usize) -> Cow<'_, str> {
    match label {
        Some(l) if !l.trim().is_empty() => Cow::Borrowed(l),
        _ => Cow::Owned(format!("sensor_{index}")),
    }
}

/// Mounts to show, in producer order. Exact path match only.
pub fn visible_disks(s: &Snapshot) -> impl Iterator<Item = (&str, &DiskUsage)> + '_ {
    s.disk
        .iter()
        .filter(|(mount, _)| !HIDDEN_MOUNTS.contains(&mount.as_str()))
        .map(|(mount, d)| (mount.as_str(), d))
}

/// Which sensor cards to draw and how wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorLayout {
    Hidden,
    TempsOnly,
    FansOnly,
    Split,
}

impl SensorLayout {
    pub fn for_snapshot(s: &Snapshot) -> Self {
        match (!s.temps.is_empty(), !s.fans.is_empty()) {
            (true, true) => Self::Split,
            (true, false) => Self::TempsOnly,
            (false, true) => Self::FansOnly,
            (false, false) => Self::Hidden,
        }
    }

    pub fn shows_temps(self) -> bool {
        matches!(self, Self::TempsOnly | Self::Split)
    }

    pub fn shows_fans(self) -> bool {
        matches!(self, Self::FansOnly | Self::Split)
    }

    /// A lone section takes the whole row.
    pub fn full_width(self) -> bool {
        matches!(self, Self::TempsOnly | Self::FansOnly)
    }
}

pub fn load_avg_text(load: Option<(f64, f64, f64)>) -> String {
    match load {
        Some((one, five, fifteen)) => format!("{one:.2}  {five:.2}  {fifteen:.2}"),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Capture time in local time; the raw string if it is not RFC 3339.
pub fn captured_at(now_iso: &str) -> String {
    match DateTime::parse_from_rfc3339(now_iso) {
        Ok(t) => t
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        Err(_) => now_iso.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UsageCard {
    pub percent_text: String,
    pub detail: String,
    pub fill: f64,
}

impl UsageCard {
    fn from_memory(m: &MemoryUsage) -> Self {
        Self {
            percent_text: format!("{:.1}%", m.percent),
            detail: gb_pair(m.used, m.total),
            fill: m.percent,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TempRow {
    pub label: String,
    pub current: String,
    pub high: Option<String>,
    pub fill: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FanRow {
    pub label: String,
    pub rpm: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SensorGroup<R> {
    pub chip: String,
    pub rows: Vec<R>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BatteryView {
    Present {
        percent_text: String,
        detail: String,
        fill: f64,
    },
    Unavailable,
}

impl BatteryView {
    pub fn from_battery(b: Option<&Battery>) -> Self {
        let Some(b) = b else {
            return Self::Unavailable;
        };
        let plugged = if b.power_plugged { "Yes" } else { "No" };
        let left = time_left(b.secsleft).unwrap_or_else(|| "time left unknown".into());
        Self::Present {
            percent_text: format!("{}%", b.percent),
            detail: format!("Plugged: {plugged} • {left}"),
            fill: b.percent,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NetView {
    pub up: String,
    pub down: String,
    pub sent: String,
    pub recv: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiskRow {
    pub mount: String,
    pub used: String,
    pub total: String,
    pub percent_text: String,
    pub fill: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProcRow {
    pub pid: String,
    pub name: String,
    pub user: String,
    pub cpu: String,
    pub mem: String,
}

/// Everything one render needs, derived from a single snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotView {
    pub source: String,
    pub machine: String,
    pub captured_at: String,
    pub cpu: UsageCard,
    pub mem: UsageCard,
    pub swap: UsageCard,
    pub load_avg: String,
    pub sensors: SensorLayout,
    pub temps: Vec<SensorGroup<TempRow>>,
    pub fans: Vec<SensorGroup<FanRow>>,
    pub battery: BatteryView,
    pub net: NetView,
    pub disks: Vec<DiskRow>,
    pub procs: Vec<ProcRow>,
}

impl SnapshotView {
    pub fn derive(s: &Snapshot) -> Self {
        let temps = s
            .temps
            .iter()
            .map(|(chip, sensors)| SensorGroup {
                chip: chip.clone(),
                rows: sensors
                    .iter()
                    .enumerate()
                    .map(|(i, t)| TempRow {
                        label: sensor_label(t.label.as_deref(), i).into_owned(),
                        current: format!("{:.1}°C", t.current),
                        high: t
                            .high
                            .filter(|h| *h != 0.0)
                            .map(|h| format!("/ {h:.1}°C")),
                        fill: temp_pct(t.current, t.high),
                    })
                    .collect(),
            })
            .collect();

        let fans = s
            .fans
            .iter()
            .map(|(chip, sensors)| SensorGroup {
                chip: chip.clone(),
                rows: sensors
                    .iter()
                    .enumerate()
                    .map(|(i, f)| FanRow {
                        label: sensor_label(f.label.as_deref(), i).into_owned(),
                        rpm: format!("{} RPM", f.current),
                    })
                    .collect(),
            })
            .collect();

        let disks = visible_disks(s)
            .map(|(mount, d)| DiskRow {
                mount: mount.to_string(),
                used: bytes_fmt(d.used),
                total: bytes_fmt(d.total),
                percent_text: format!("{}%", d.percent),
                fill: d.percent,
            })
            .collect();

        let procs = s
            .top_procs
            .iter()
            .map(|p| ProcRow {
                pid: p.pid.to_string(),
                name: p.name.clone().unwrap_or_else(|| "?".into()),
                user: p.username.clone().unwrap_or_else(|| "?".into()),
                cpu: format!("{:.1}", p.cpu_percent),
                mem: format!("{:.2}", p.memory_percent),
            })
            .collect();

        Self {
            source: s.source.clone(),
            machine: s.machine.clone(),
            captured_at: captured_at(&s.now_iso),
            cpu: UsageCard {
                percent_text: format!("{:.1}%", s.cpu_percent),
                detail: s
                    .cpu_cores
                    .map(|n| format!("{n} cores"))
                    .unwrap_or_else(|| format!("cores {NOT_AVAILABLE}")),
                fill: s.cpu_percent,
            },
            mem: UsageCard::from_memory(&s.mem),
            swap: UsageCard::from_memory(&s.swap),
            load_avg: load_avg_text(s.load_avg),
            sensors: SensorLayout::for_snapshot(s),
            temps,
            fans,
            battery: BatteryView::from_battery(s.battery.as_ref()),
            net: NetView {
                up: format!("Up: {}", bps_fmt(s.net_rate.up_bps)),
                down: format!("Down: {}", bps_fmt(s.net_rate.down_bps)),
                sent: format!("Total Sent: {}", bytes_fmt(s.net_io.bytes_sent)),
                recv: format!("Total Recv: {}", bytes_fmt(s.net_io.bytes_recv)),
            },
            disks,
            procs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::fixtures::snapshot;
    use crate::types::{FanSensor, TempSensor};

    #[test]
    fn temp_fill() {
        assert_eq!(temp_pct(45.0, Some(90.0)), 50.0);
        assert_eq!(temp_pct(150.0, None), 100.0);
        assert_eq!(temp_pct(50.0, None), 50.0);
        // zero or negative threshold falls back
        assert_eq!(temp_pct(70.0, Some(0.0)), 70.0);
        assert_eq!(temp_pct(120.0, Some(-5.0)), 100.0);
    }

    #[test]
    fn label_fallback() {
        assert_eq!(sensor_label(Some("  "), 2), "sensor_2");
        assert_eq!(sensor_label(Some(""), 0), "sensor_0");
        assert_eq!(sensor_label(None, 5), "sensor_5");
        assert_eq!(sensor_label(Some("Core 0"), 1), "Core 0");
    }

    #[test]
    fn container_mounts_are_hidden() {
        let s = snapshot(1.0);
        let mounts: Vec<&str> = visible_disks(&s).map(|(m, _)| m).collect();
        assert_eq!(mounts, ["/", "/data"]);
    }

    #[test]
    fn hidden_mounts_match_exactly() {
        let mut s = snapshot(1.0);
        let d = s.disk["/"].clone();
        s.disk.insert("/etc/hosts.d".into(), d.clone());
        s.disk.insert("/etc".into(), d);
        let mounts: Vec<&str> = visible_disks(&s).map(|(m, _)| m).collect();
        assert_eq!(mounts, ["/", "/data", "/etc/hosts.d", "/etc"]);
    }

    #[test]
    fn sensor_layout_gating() {
        let mut s = snapshot(1.0);
        assert_eq!(SensorLayout::for_snapshot(&s), SensorLayout::TempsOnly);
        assert!(SensorLayout::TempsOnly.full_width());

        s.fans.insert(
            "thinkpad".into(),
            vec![FanSensor {
                label: None,
                current: 2400,
            }],
        );
        let both = SensorLayout::for_snapshot(&s);
        assert_eq!(both, SensorLayout::Split);
        assert!(!both.full_width());
        assert!(both.shows_temps() && both.shows_fans());

        s.temps.clear();
        assert_eq!(SensorLayout::for_snapshot(&s), SensorLayout::FansOnly);
        s.fans.clear();
        let none = SensorLayout::for_snapshot(&s);
        assert_eq!(none, SensorLayout::Hidden);
        assert!(!none.shows_temps() && !none.shows_fans());
    }

    #[test]
    fn load_avg_placeholder() {
        assert_eq!(load_avg_text(None), "N/A");
        assert_eq!(load_avg_text(Some((1.0, 0.5, 0.25))), "1.00  0.50  0.25");
    }

    #[test]
    fn battery_placeholder_and_detail() {
        assert_eq!(BatteryView::from_battery(None), BatteryView::Unavailable);
        let b = Battery {
            percent: 76.0,
            secsleft: 5_400,
            power_plugged: false,
        };
        assert_eq!(
            BatteryView::from_battery(Some(&b)),
            BatteryView::Present {
                percent_text: "76%".into(),
                detail: "Plugged: No • 1h 30m left".into(),
                fill: 76.0,
            }
        );
        let on_mains = Battery {
            secsleft: -2,
            power_plugged: true,
            ..b
        };
        match BatteryView::from_battery(Some(&on_mains)) {
            BatteryView::Present { detail, .. } => {
                assert_eq!(detail, "Plugged: Yes • time left unknown")
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn captured_at_falls_back_to_raw() {
        assert_eq!(captured_at("yesterday"), "yesterday");
        let local = captured_at("2025-03-01T12:30:00+00:00");
        assert_eq!(local.len(), "2025-03-01 12:30:00".len());
    }

    #[test]
    fn derive_full_view() {
        let s = snapshot(12.34);
        let v = SnapshotView::derive(&s);
        assert_eq!(v.machine, "box-01");
        assert_eq!(v.cpu.percent_text, "12.3%");
        assert_eq!(v.cpu.detail, "8 cores");
        assert_eq!(v.mem.detail, "7.00 / 16.00 GB");
        assert_eq!(v.swap.percent_text, "0.0%");
        assert_eq!(v.load_avg, "0.52  0.61  0.70");
        assert_eq!(v.sensors, SensorLayout::TempsOnly);
        assert_eq!(v.battery, BatteryView::Unavailable);

        let rows = &v.temps[0].rows;
        assert_eq!(v.temps[0].chip, "coretemp");
        assert_eq!(rows[0].label, "Package id 0");
        assert_eq!(rows[0].high.as_deref(), Some("/ 90.0°C"));
        assert_eq!(rows[0].fill, 50.0);
        assert_eq!(rows[1].label, "sensor_1");
        assert_eq!(rows[1].high, None);
        assert_eq!(rows[1].fill, 44.0);

        assert_eq!(v.net.up, "Up: 1.50 Mbps");
        assert_eq!(v.net.down, "Down: 500 bps");
        assert_eq!(v.net.sent, "Total Sent: 123.46 MB");

        assert_eq!(v.disks.len(), 2);
        assert_eq!(v.disks[1].mount, "/data");
        assert_eq!(v.disks[1].used, "1500.00 GB");
        assert_eq!(v.disks[1].percent_text, "75%");

        assert_eq!(v.procs[0].pid, "42");
        assert_eq!(v.procs[0].mem, "3.25");
        assert_eq!(v.procs[1].user, "?");
    }

    #[test]
    fn missing_process_name_and_core_count() {
        let mut s = snapshot(1.0);
        s.top_procs[1].name = None;
        s.cpu_cores = None;
        let v = SnapshotView::derive(&s);
        assert_eq!(v.procs[0].name, "postgres");
        assert_eq!(v.procs[1].name, "?");
        assert_eq!(v.cpu.detail, "cores N/A");
    }

    #[test]
    fn fan_rows_use_label_fallback() {
        let mut s = snapshot(1.0);
        s.fans.insert(
            "asus".into(),
            vec![
                FanSensor {
                    label: Some("cpu_fan".into()),
                    current: 1200,
                },
                FanSensor {
                    label: Some(" ".into()),
                    current: 0,
                },
            ],
        );
        s.temps.insert(
            "acpitz".into(),
            vec![TempSensor {
                label: None,
                current: 27.8,
                high: None,
                critical: None,
            }],
        );
        let v = SnapshotView::derive(&s);
        assert_eq!(v.fans[0].rows[0].rpm, "1200 RPM");
        assert_eq!(v.fans[0].rows[1].label, "sensor_1");
        assert_eq!(v.temps[1].rows[0].label, "sensor_0");
    }
}
