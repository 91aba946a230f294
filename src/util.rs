pub fn mean(data: &[f64]) -> Option<f64> {
    let sum = data.iter().sum::<f64>();
    let count = data.len();

    match count {
        positive if positive > 0 => Some(sum / count as f64),
        _ => None,
    }
}

/// Round to a fixed number of decimal places.
///
/// The exact binary value decides the direction, and an exact half goes up:
/// 1.25 becomes 1.3, while 1.15 (stored as 1.1499...) becomes 1.1.
pub fn round_to(value: f64, places: u32) -> f64 {
    // exact halves at `places` decimals are the odd multiples of 2^-(places + 1)
    let halves = value * 2_f64.powi(places as i32 + 1);
    if halves.fract() == 0.0 && halves.rem_euclid(2.0) == 1.0 {
        let factor = 10_f64.powi(places as i32);
        return ((value * factor).floor() + 1.0) / factor;
    }
    // float formatting is correctly rounded from the exact value
    format!("{:.*}", places as usize, value)
        .parse()
        .unwrap_or(value)
}

/// `MM:SS`, minutes zero-padded and allowed to grow past 99
pub fn format_clock(total_seconds: u64) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// `<m>m <s>s` as shown on the dashboard
pub fn format_minutes_seconds(total_seconds: u64) -> String {
    format!("{}m {}s", total_seconds / 60, total_seconds % 60)
}
