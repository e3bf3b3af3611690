//! Human-readable rendering of sizes, durations and usage levels

use serde::Serialize;

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 3_600;
const SECONDS_PER_DAY: u64 = 86_400;

/// Format bytes as human readable string
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    const THRESHOLD: u64 = 1024;

    if bytes < THRESHOLD {
        return format!("{} B", bytes);
    }

    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= THRESHOLD as f64 && unit_index < UNITS.len() - 1 {
        size /= THRESHOLD as f64;
        unit_index += 1;
    }

    format!("{:.2} {}", size, UNITS[unit_index])
}

/// Format a megabyte figure, switching to GB past 1024 MB
pub fn format_megabytes(mb: f64) -> String {
    if mb >= 1024.0 {
        format!("{:.2} GB", mb / 1024.0)
    } else {
        format!("{:.2} MB", mb)
    }
}

/// Format server uptime as "N days, N hours, N minutes".
///
/// Days and hours appear only when nonzero. Minutes appear when nonzero or when
/// nothing else would be printed.
pub fn format_uptime(seconds: u64) -> String {
    let days = seconds / SECONDS_PER_DAY;
    let hours = (seconds % SECONDS_PER_DAY) / SECONDS_PER_HOUR;
    let minutes = (seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;

    let mut parts = Vec::with_capacity(3);
    if days > 0 {
        parts.push(plural(days, "day"));
    }
    if hours > 0 {
        parts.push(plural(hours, "hour"));
    }
    if minutes > 0 || parts.is_empty() {
        parts.push(plural(minutes, "minute"));
    }

    parts.join(", ")
}

/// Format an average TTL in its largest whole unit. Zero means no TTL data.
pub fn format_ttl(seconds: u64) -> String {
    if seconds == 0 {
        "no TTL".to_string()
    } else if seconds < SECONDS_PER_MINUTE {
        plural(seconds, "second")
    } else if seconds < SECONDS_PER_HOUR {
        plural(seconds / SECONDS_PER_MINUTE, "minute")
    } else if seconds < SECONDS_PER_DAY {
        plural(seconds / SECONDS_PER_HOUR, "hour")
    } else {
        plural(seconds / SECONDS_PER_DAY, "day")
    }
}

fn plural(count: u64, unit: &str) -> String {
    if count == 1 {
        format!("1 {}", unit)
    } else {
        format!("{} {}s", count, unit)
    }
}

/// Severity bucket for a usage percentage, rendered as a style tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageLevel {
    Normal,
    Warning,
    Critical,
}

impl UsageLevel {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 90.0 {
            UsageLevel::Critical
        } else if percentage >= 70.0 {
            UsageLevel::Warning
        } else {
            UsageLevel::Normal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UsageLevel::Normal => "normal",
            UsageLevel::Warning => "warning",
            UsageLevel::Critical => "critical",
        }
    }
}

impl std::fmt::Display for UsageLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
