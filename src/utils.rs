use unicode_width::UnicodeWidthChar;

/// Truncate to at most `max_width` terminal columns, ending with "..." when cut.
pub fn truncate_string(s: &str, max_width: usize) -> String {
    let total: usize = s.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= max_width {
        return s.to_string();
    }

    let budget = max_width.saturating_sub(3);
    let mut out = String::new();
    let mut width = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > budget {
            break;
        }
        out.push(c);
        width += w;
    }
    out.push_str("...");
    out
}

/// `m:ss`
pub fn format_time(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

pub fn recommendation(score: u8) -> &'static str {
    if score >= 90 {
        "Excellent work! You're ready for advanced topics."
    } else if score >= 80 {
        "Good job! Review the topics you missed and try some practice problems."
    } else {
        "Focus on fundamentals. Review the explanations before moving forward."
    }
}
