//! Presentation helpers shared by the native demo and the web bindings

/// Short-scale formatting: `1.5K`, `2M`, `3.2B`; below 1000 the whole part
pub fn format_number_short(n: f64) -> String {
    const SCALES: [(f64, &str); 3] = [(1e9, "B"), (1e6, "M"), (1e3, "K")];
    for (scale, suffix) in SCALES {
        if n >= scale {
            return if n % scale == 0.0 {
                format!("{:.0}{suffix}", n / scale)
            } else {
                format!("{:.1}{suffix}", n / scale)
            };
        }
    }
    format!("{:.0}", n.trunc())
}
