//! Display-width measurement, slicing and padding.
//!
//! All functions count terminal columns rather than bytes or chars: CJK and
//! other wide characters take two columns, combining marks take none, and
//! ANSI escape sequences are carried through without counting toward width.
//!
//! These helpers never add an ellipsis. Deciding when and how to mark a cut
//! belongs to the table renderer.

use console::{measure_text_width, pad_str, Alignment};
use unicode_width::UnicodeWidthChar;

/// Returns the display width of a string, ignoring ANSI escape codes.
///
/// # Example
///
/// ```rust
/// use glance_render::width::display_width;
///
/// assert_eq!(display_width("hello"), 5);
/// assert_eq!(display_width("日本"), 4);
/// assert_eq!(display_width("\x1b[31mred\x1b[0m"), 3);
/// ```
pub fn display_width(s: &str) -> usize {
    measure_text_width(s)
}

/// Returns the longest prefix of `s` whose display width is at most `max_width`.
///
/// A wide character that would straddle the limit is dropped entirely, so the
/// result can be one column narrower than `max_width`.
///
/// # Example
///
/// ```rust
/// use glance_render::width::slice_to_width;
///
/// assert_eq!(slice_to_width("Hello World", 5), "Hello");
/// assert_eq!(slice_to_width("日本語", 3), "日");
/// assert_eq!(slice_to_width("short", 10), "short");
/// ```
pub fn slice_to_width(s: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    if measure_text_width(s) <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let mut in_escape = false;

    for c in s.chars() {
        if c == '\x1b' {
            result.push(c);
            in_escape = true;
            continue;
        }

        if in_escape {
            result.push(c);
            // CSI sequences end with a letter or '~'
            if c.is_ascii_alphabetic() || c == '~' {
                in_escape = false;
            }
            continue;
        }

        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width {
            break;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

/// Pads `s` on the right with spaces until it is `width` columns wide.
///
/// Strings already at least `width` wide are returned unchanged.
///
/// ```rust
/// use glance_render::width::ljust;
///
/// assert_eq!(ljust("ab", 4), "ab  ");
/// assert_eq!(ljust("abcdef", 4), "abcdef");
/// ```
pub fn ljust(s: &str, width: usize) -> String {
    pad_str(s, width, Alignment::Left, None).into_owned()
}

/// Pads `s` on the left with spaces until it is `width` columns wide.
///
/// ```rust
/// use glance_render::width::rjust;
///
/// assert_eq!(rjust("42", 5), "   42");
/// assert_eq!(rjust("hello", 3), "hello");
/// ```
pub fn rjust(s: &str, width: usize) -> String {
    pad_str(s, width, Alignment::Right, None).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_width_ascii() {
        assert_eq!(display_width("hello"), 5);
        assert_eq!(display_width(""), 0);
        assert_eq!(display_width(" "), 1);
    }

    #[test]
    fn display_width_wide_and_combining() {
        assert_eq!(display_width("日本語"), 6);
        assert_eq!(display_width("e\u{301}"), 1);
        assert_eq!(display_width("\u{200b}"), 0);
    }

    #[test]
    fn display_width_ignores_ansi() {
        assert_eq!(display_width("\x1b[1;32mbold green\x1b[0m"), 10);
    }

    #[test]
    fn slice_to_width_zero() {
        assert_eq!(slice_to_width("hello", 0), "");
        assert_eq!(slice_to_width("", 0), "");
    }

    #[test]
    fn slice_to_width_exact_fit() {
        assert_eq!(slice_to_width("12345", 5), "12345");
    }

    #[test]
    fn slice_to_width_wide_boundary() {
        // "日" is 2 columns, so a limit of 3 fits one and a half
        assert_eq!(slice_to_width("日本", 3), "日");
        assert_eq!(display_width(&slice_to_width("日本", 3)), 2);
    }

    #[test]
    fn slice_to_width_keeps_ansi() {
        let sliced = slice_to_width("\x1b[31mhello\x1b[0m", 3);
        assert!(sliced.starts_with("\x1b[31m"));
        assert_eq!(display_width(&sliced), 3);
    }

    #[test]
    fn ljust_and_rjust_pad_wide_text() {
        assert_eq!(ljust("日", 4), "日  ");
        assert_eq!(rjust("日", 4), "  日");
    }

    #[test]
    fn padding_with_zero_width() {
        assert_eq!(ljust("", 0), "");
        assert_eq!(rjust("abc", 0), "abc");
        assert_eq!(ljust("", 3), "   ");
    }
}
