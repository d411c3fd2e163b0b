//! Small UI helpers: rates, truncation, uptime text.

pub fn human_rate(bytes_per_sec: f64) -> String {
    const K: f64 = 1024.0;
    let b = bytes_per_sec.max(0.0);
    if b < K { return format!("{b:.0}B/s"); }
    let kb = b / K;
    if kb < K { return format!("{kb:.1}KB/s"); }
    let mb = kb / K;
    if mb < K { return format!("{mb:.1}MB/s"); }
    format!("{:.2}GB/s", mb / K)
}

pub fn truncate_middle(s: &str, max: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= max { return s.to_string(); }
    if max <= 3 { return "...".into(); }
    let keep = max - 3;
    let left = keep / 2;
    let right = keep - left;
    let head: String = chars[..left].iter().collect();
    let tail: String = chars[chars.len() - right..].iter().collect();
    format!("{head}...{tail}")
}

/// Day count from `"X days, HH:MM:SS"` / `"HH:MM:SS"`.
pub fn uptime_days(uptime: &str) -> String {
    let Some((days, _)) = uptime.split_once(',') else {
        return "0 days".into();
    };
    let digits: String = days.chars().filter(char::is_ascii_digit).collect();
    match digits.parse::<u64>() {
        Ok(1) => "1 day".into(),
        Ok(n) => format!("{n} days"),
        Err(_) => uptime.to_string(),
    }
}

/// `"Hh Mm"` from the clock part of an uptime string.
pub fn uptime_detail(uptime: &str) -> String {
    let clock = uptime
        .split_once(',')
        .map(|(_, rest)| rest)
        .unwrap_or(uptime)
        .trim();
    let mut parts = clock.split(':').map(|p| p.trim().parse::<u64>());
    match (parts.next(), parts.next(), parts.next()) {
        (Some(Ok(h)), Some(Ok(m)), Some(Ok(_))) => format!("{h}h {m}m"),
        _ => clock.to_string(),
    }
}
