//! Terminal size detection.

use glance_render::DEFAULT_MAX_WIDTH;
use terminal_size::{terminal_size, Height, Width};

/// Rows assumed when the terminal height cannot be detected.
pub const DEFAULT_HEIGHT: usize = 40;

/// The terminal width: the attached terminal, then `$COLUMNS`, then 150.
pub fn terminal_width() -> usize {
    match terminal_size() {
        Some((Width(w), _)) if w > 0 => w as usize,
        _ => env_size("COLUMNS").unwrap_or(DEFAULT_MAX_WIDTH),
    }
}

/// The terminal height: the attached terminal, then `$LINES`, then 40.
pub fn terminal_height() -> usize {
    match terminal_size() {
        Some((_, Height(h))) if h > 0 => h as usize,
        _ => env_size("LINES").unwrap_or(DEFAULT_HEIGHT),
    }
}

fn env_size(name: &str) -> Option<usize> {
    std::env::var(name)
        .ok()
        .and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|&size| size > 0)
}
