//! The always-visible panes: directory list, content preview in Normal mode,
//! info pane and status bar.

use crate::app::{AppState, Preview};
use crate::core::{DirPreview, DirectoryEntry};
use crate::screen::{Attr, RegionId, ScreenBackend};
use crate::utils::{
    display_name, ellipsize_end, ellipsize_middle, ellipsize_start, format_file_size,
    format_file_time, shorten_home_path,
};

use unicode_width::UnicodeWidthStr;

/// Right-hand side of the status bar.
pub fn version_label() -> String {
    format!("quickView v{}", env!("CARGO_PKG_VERSION"))
}

/// How an entry is named in lists: directories in brackets.
fn list_label(entry: &DirectoryEntry, width: usize) -> String {
    if entry.is_dir() {
        format!("[{}]", ellipsize_end(entry.name(), width.saturating_sub(2)))
    } else {
        ellipsize_end(entry.name(), width)
    }
}

pub fn draw_list(screen: &mut dyn ScreenBackend, region: RegionId, state: &AppState) {
    let size = screen.region_size(region);
    let width = size.width as usize;

    screen.clear_region(region);
    screen.draw_border(region);
    screen.draw_text(region, 0, 2, " Directory ");

    let dir = display_name(state.current_dir());
    screen.draw_text(region, 1, 1, &ellipsize_start(&dir, width.saturating_sub(4)));
    screen.draw_hline(region, 2, 1, size.width.saturating_sub(2));

    let inner = width.saturating_sub(2);
    let list = state.list();
    for (row, idx) in list.visible().enumerate() {
        let Some(entry) = state.entries().get(idx) else {
            break;
        };
        let mut label = list_label(entry, width.saturating_sub(4));
        let y = 3 + row as u16;
        if idx == list.selected() {
            let pad = inner.saturating_sub(label.width());
            label.extend(std::iter::repeat_n(' ', pad));
            screen.set_attr(region, Attr::Selected, false, false);
            screen.draw_text(region, y, 1, &label);
            screen.clear_attr(region, Attr::Selected, false, false);
        } else {
            screen.draw_text(region, y, 1, &label);
        }
    }
}

/// Content pane in Normal mode.
pub fn draw_content(screen: &mut dyn ScreenBackend, region: RegionId, state: &AppState) {
    let height = screen.region_size(region).height;
    let center = height / 2;

    screen.clear_region(region);
    screen.draw_border(region);

    match state.selected_entry() {
        Some(entry) if entry.is_dir() => draw_dir_preview(screen, region, entry, state.preview()),
        Some(_) => {
            screen.center_text(region, center.saturating_sub(1), "File Preview");
            screen.center_text(region, center + 1, "File details shown in info panel below");
        }
        None => {
            screen.center_text(region, center.saturating_sub(2), "Content Area");
            screen.center_text(region, center, "Directory contents shown here");
            screen.center_text(region, center + 2, "Use arrow keys to navigate files");
            screen.center_text(region, center + 3, "Press Enter to open directories");
        }
    }
}

fn draw_dir_preview(
    screen: &mut dyn ScreenBackend,
    region: RegionId,
    entry: &DirectoryEntry,
    preview: &Preview,
) {
    let size = screen.region_size(region);
    let width = size.width as usize;

    screen.draw_text(region, 1, 2, "Contents:");
    let path = shorten_home_path(entry.path());
    screen.draw_text(region, 2, 2, &ellipsize_middle(&path, width.saturating_sub(6)));
    screen.draw_hline(region, 3, 2, size.width.saturating_sub(4));

    match preview {
        Preview::Directory(p) => draw_preview_entries(screen, region, p),
        Preview::Error(_) => screen.draw_text(region, 5, 2, "Error reading directory"),
        Preview::None => {}
    }
}

fn draw_preview_entries(screen: &mut dyn ScreenBackend, region: RegionId, preview: &DirPreview) {
    let size = screen.region_size(region);
    let width = (size.width as usize).saturating_sub(6);
    let rows = size.height.saturating_sub(6) as usize;

    for (i, entry) in preview.entries().iter().take(rows).enumerate() {
        let label = list_label(entry, width);
        let y = 4 + i as u16;
        if entry.is_dir() {
            screen.set_attr(region, Attr::Directory, false, false);
            screen.draw_text(region, y, 2, &label);
            screen.clear_attr(region, Attr::Directory, false, false);
        } else {
            screen.draw_text(region, y, 2, &label);
        }
    }

    if preview.total() > rows {
        let more = format!("... and {} more items", preview.total() - rows);
        screen.draw_text(region, size.height.saturating_sub(2), 2, &more);
    }
}

pub fn draw_info(screen: &mut dyn ScreenBackend, region: RegionId, state: &AppState) {
    let size = screen.region_size(region);

    screen.clear_region(region);
    screen.draw_border(region);
    screen.draw_text(region, 0, 2, " Info ");

    match state.selected_entry() {
        Some(entry) if entry.is_dir() => draw_dir_info(screen, region, entry, state.preview()),
        Some(entry) => draw_file_info(screen, region, entry),
        None => screen.center_text(region, size.height / 2, "No file selected"),
    }
}

fn draw_dir_info(
    screen: &mut dyn ScreenBackend,
    region: RegionId,
    entry: &DirectoryEntry,
    preview: &Preview,
) {
    let size = screen.region_size(region);
    let width = (size.width as usize).saturating_sub(4);

    let name = ellipsize_end(&display_name(entry.path()), width.saturating_sub(2));
    screen.draw_text(region, 1, 2, &format!("[{name}]"));
    screen.draw_text(region, 2, 2, "Directory");
    let totals = match preview {
        Preview::Directory(p) => format!("Total: {} dirs, {} files", p.dirs(), p.files()),
        _ => "Error reading contents".to_string(),
    };
    screen.draw_text(region, 3, 2, &totals);
    draw_path_row(screen, region, entry);
}

fn draw_file_info(screen: &mut dyn ScreenBackend, region: RegionId, entry: &DirectoryEntry) {
    let size = screen.region_size(region);
    let width = (size.width as usize).saturating_sub(4);

    screen.draw_text(region, 1, 2, &ellipsize_end(entry.name(), width));

    let type_info = if entry.is_regular_file() {
        match entry.size() {
            Some(bytes) => format!("File ({})", format_file_size(bytes)),
            None => "File (size unknown)".to_string(),
        }
    } else if entry.is_symlink() {
        "Symbolic Link".to_string()
    } else {
        "Special File".to_string()
    };
    screen.draw_text(region, 2, 2, &ellipsize_end(&type_info, width));

    if entry.is_regular_file() {
        if let Some(ext) = entry.extension()
            && size.height > 3
        {
            screen.draw_text(region, 3, 2, &format!("Ext: {ext}"));
        }
        if size.height > 6 {
            let modified = format!("Modified: {}", format_file_time(entry.modified()));
            screen.draw_text(region, 4, 2, &ellipsize_end(&modified, width));
        }
    }
    draw_path_row(screen, region, entry);
}

/// Full path on the second to last row, if the pane is tall enough.
fn draw_path_row(screen: &mut dyn ScreenBackend, region: RegionId, entry: &DirectoryEntry) {
    let size = screen.region_size(region);
    if size.height <= 4 {
        return;
    }
    let path = shorten_home_path(entry.path());
    let shown = ellipsize_start(&path, (size.width as usize).saturating_sub(4));
    screen.draw_text(region, size.height - 2, 2, &shown);
}

/// Left part of the status bar for the current selection.
pub fn status_summary(state: &AppState) -> Option<String> {
    let entry = state.selected_entry()?;
    let name = entry.name();
    let summary = if entry.is_dir() {
        format!("[DIR] {name}")
    } else if entry.is_regular_file() {
        match entry.size() {
            Some(bytes) => format!("{name} ({})", format_file_size(bytes)),
            None => format!("{name} (size unknown)"),
        }
    } else {
        format!("{name} (special file)")
    };
    Some(summary)
}

pub fn draw_status(screen: &mut dyn ScreenBackend, region: RegionId, state: &AppState) {
    let width = screen.region_size(region).width;
    let version = version_label();
    let version_width = version.width() as u16;

    screen.clear_region(region);
    screen.set_attr(region, Attr::StatusBar, false, false);
    screen.draw_text(region, 0, 0, &" ".repeat(width as usize));

    let room = (width as usize).saturating_sub(version.width() + 3);
    let left = match status_summary(state) {
        Some(summary) => format!(
            "{summary} | {} | {}",
            display_name(state.current_dir()),
            state.status()
        ),
        None => state.status().to_string(),
    };
    screen.draw_text(region, 0, 1, &ellipsize_end(&left, room));
    if width > version_width + 1 {
        screen.draw_text(region, 0, width - version_width - 1, &version);
    }
    screen.clear_attr(region, Attr::StatusBar, false, false);
}
