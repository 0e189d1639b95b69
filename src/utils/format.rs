// src/utils/format.rs
use chrono::{Local, NaiveDateTime};

// Format a duration for display
pub fn format_time_ago(time: NaiveDateTime) -> String {
    format_time_between(time, Local::now().naive_local())
}

fn format_time_between(time: NaiveDateTime, now: NaiveDateTime) -> String {
    let duration = now.signed_duration_since(time);

    let seconds = duration.num_seconds();

    if seconds < 0 {
        "just now".to_string()
    } else if seconds < 60 {
        format!("{} seconds ago", seconds)
    } else if seconds < 3600 {
        format!("{} minutes ago", duration.num_minutes())
    } else if seconds < 86400 {
        format!("{} hours ago", duration.num_hours())
    } else if seconds < 2592000 {
        format!("{} days ago", duration.num_days())
    } else if seconds < 31536000 {
        format!("{} months ago", duration.num_days() / 30)
    } else {
        format!("{} years ago", duration.num_days() / 365)
    }
}

// Truncate a string if it's too long, counting characters rather than bytes
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
