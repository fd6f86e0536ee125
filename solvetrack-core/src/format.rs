//! Human-readable rendering helpers shared by report front ends.

/// Minutes as `"45m"`, `"1h 05m"` or `"12.5m"`.
pub fn minutes_display(minutes: f64) -> String {
    let minutes = (minutes * 10.0).round() / 10.0;
    if minutes <= 0.0 {
        return "0m".to_string();
    }
    if minutes < 60.0 {
        if minutes.fract() == 0.0 {
            return format!("{}m", minutes as u64);
        }
        return format!("{:.1}m", minutes);
    }
    let whole = minutes.round() as u64;
    format!("{}h {:02}m", whole / 60, whole % 60)
}

/// Compact XP: `"950"`, `"1.2K"`, `"3.4M"`.
pub fn xp_display(xp: u64) -> String {
    if xp >= 1_000_000 {
        format!("{:.1}M", xp as f64 / 1_000_000.0)
    } else if xp >= 1_000 {
        format!("{:.1}K", xp as f64 / 1_000.0)
    } else {
        xp.to_string()
    }
}

/// `"1 day"`, `"3 days"`.
pub fn plural(count: u64, word: &str) -> String {
    if count == 1 {
        format!("{} {}", count, word)
    } else {
        format!("{} {}s", count, word)
    }
}

/// Text progress bar `width` cells wide. Percentages past 100 render full.
pub fn progress_bar(percent: u32, width: usize) -> String {
    let filled = (percent.min(100) as usize * width) / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

/// Single-character shade for a calendar intensity level 0..=5.
pub fn intensity_glyph(level: u8) -> char {
    match level {
        0 => '.',
        1 => '░',
        2 | 3 => '▒',
        4 => '▓',
        _ => '█',
    }
}
