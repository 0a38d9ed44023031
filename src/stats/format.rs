// SI-scaled bitrate rendering.

const UNITS: [&str; 4] = ["bps", "Kbps", "Mbps", "Gbps"];

/// Renders a non-negative bitrate as "<magnitude><prefix>bps", picking the
/// largest tier in {none, K, M, G} that keeps at most 3 digits before the
/// decimal: tier = floor(log10(n) / 3), clamped to [0, 3]. Zero is tier 0.
pub fn scale_bps(n: f64, decimals: usize) -> String {
    let tier = if n <= 0.0 {
        0
    } else {
        ((n.log10() / 3.0).floor() as i32).clamp(0, 3) as usize
    };
    let scaled = n / 1000f64.powi(tier as i32);
    format!("{scaled:.decimals$}{}", UNITS[tier])
}

/// Document preset: one decimal place.
pub fn format_document(n: f64) -> String {
    scale_bps(n, 1)
}

/// Terminal/table preset: whole numbers.
pub fn format_table(n: f64) -> String {
    scale_bps(n, 0)
}
