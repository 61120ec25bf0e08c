//! Human-readable byte counts and bit rates.
//!
//! Thresholds are decimal (1e3/1e6/1e9), not 1024-based, so the numbers line
//! up with what the producer reports for link speeds and disk sizes.

const GIGA: f64 = 1e9;
const MEGA: f64 = 1e6;
const KILO: f64 = 1e3;

/// Format a byte count: `999 B`, `1.50 KB`, `2.50 MB`, `3.20 GB`.
pub fn bytes_fmt(n: u64) -> String {
    let v = n as f64;
    if v >= GIGA {
        format!("{:.2} GB", v / GIGA)
    } else if v >= MEGA {
        format!("{:.2} MB", v / MEGA)
    } else if v >= KILO {
        format!("{:.2} KB", v / KILO)
    } else {
        format!("{n} B")
    }
}

/// Format a bit rate: `500 bps`, `1.50 Mbps`. Negative input is treated as zero.
pub fn bps_fmt(b: f64) -> String {
    let b = if b.is_finite() { b.max(0.0) } else { 0.0 };
    if b >= GIGA {
        format!("{:.2} Gbps", b / GIGA)
    } else if b >= MEGA {
        format!("{:.2} Mbps", b / MEGA)
    } else if b >= KILO {
        format!("{:.2} Kbps", b / KILO)
    } else {
        format!("{b:.0} bps")
    }
}

pub fn bytes_to_gb(n: u64) -> f64 {
    n as f64 / GIGA
}

/// `used / total GB` label for the memory and swap cards.
pub fn gb_pair(used: u64, total: u64) -> String {
    format!("{:.2} / {:.2} GB", bytes_to_gb(used), bytes_to_gb(total))
}

/// Battery runtime as `"{h}h {m}m left"`.
///
/// Producers report negative sentinels when the runtime is unknown or the
/// machine is on mains power; those have no meaningful duration.
pub fn time_left(secs: i64) -> Option<String> {
    if secs < 0 {
        return None;
    }
    let h = secs / 3600;
    let m = (secs % 3600) / 60;
    Some(format!("{h}h {m}m left"))
}
