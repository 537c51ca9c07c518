/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// 4 and up → green, 2.5 and up → yellow, anything lower → red.
/// Unrated (0) stays grey.
pub fn color_for_rating(rating: f32) -> &'static str {
    if rating <= 0.0 {
        GREY
    } else if rating >= 4.0 {
        GREEN
    } else if rating >= 2.5 {
        YELLOW
    } else {
        RED
    }
}

/// Grey out blank values, e.g. a missing comment.
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "-" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}

pub fn paint(color: &str, value: &str) -> String {
    format!("{color}{value}{RESET}")
}
