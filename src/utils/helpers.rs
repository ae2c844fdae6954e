//! Helpers for quickview.
//!
//! Width-aware text shortening, size and time formatting, and displaying
//! the home directory as "~".

use chrono::{DateTime, Local};
use humansize::{DECIMAL, format_size};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use std::path::{MAIN_SEPARATOR, Path};
use std::time::SystemTime;

const ELLIPSIS: &str = "...";

/// Util function to shorten home directory to ~.
pub fn shorten_home_path<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();
    if let Some(home_dir) = dirs::home_dir()
        && let Ok(stripped) = path.strip_prefix(&home_dir)
    {
        if stripped.as_os_str().is_empty() {
            return "~".to_string();
        } else {
            let mut short = stripped.display().to_string();
            if short.starts_with(MAIN_SEPARATOR) {
                short.remove(0);
            }
            return format!("~{}{}", MAIN_SEPARATOR, short);
        }
    }
    path.display().to_string()
}

/// Last path component, or the whole path for roots.
pub fn display_name(path: &Path) -> String {
    match path.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => path.display().to_string(),
    }
}

/// Longest prefix of `text` that fits in `width` cells.
fn take_prefix(text: &str, width: usize) -> &str {
    let mut used = 0;
    for (idx, ch) in text.char_indices() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            return &text[..idx];
        }
        used += w;
    }
    text
}

/// Longest suffix of `text` that fits in `width` cells.
fn take_suffix(text: &str, width: usize) -> &str {
    let mut used = 0;
    for (idx, ch) in text.char_indices().rev() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            return &text[idx + ch.len_utf8()..];
        }
        used += w;
    }
    text
}

/// Cuts `text` to `width` cells, ending in "..." when something was dropped.
pub fn ellipsize_end(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width <= ELLIPSIS.len() {
        return take_prefix(text, width).to_string();
    }
    format!("{}{}", take_prefix(text, width - ELLIPSIS.len()), ELLIPSIS)
}

/// Cuts `text` to `width` cells, starting with "..." when something was
/// dropped. Keeps the end of a path visible.
pub fn ellipsize_start(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width <= ELLIPSIS.len() {
        return take_suffix(text, width).to_string();
    }
    format!("{}{}", ELLIPSIS, take_suffix(text, width - ELLIPSIS.len()))
}

/// Cuts `text` to `width` cells keeping a third of the room for the start
/// and the rest for the end, joined by "...".
pub fn ellipsize_middle(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let room = width.saturating_sub(ELLIPSIS.len());
    let head = room / 3;
    let tail = room - head;
    if head == 0 || tail == 0 {
        return ellipsize_end(text, width);
    }
    format!(
        "{}{}{}",
        take_prefix(text, head),
        ELLIPSIS,
        take_suffix(text, tail)
    )
}

/// Human readable file size.
pub fn format_file_size(size: u64) -> String {
    format_size(size, DECIMAL)
}

/// Local modification time, or "-" when unknown.
pub fn format_file_time(modified: Option<SystemTime>) -> String {
    modified
        .map(|mtime| {
            let dt: DateTime<Local> = DateTime::from(mtime);
            dt.format("%Y-%m-%d %H:%M:%S").to_string()
        })
        .unwrap_or_else(|| "-".to_string())
}
