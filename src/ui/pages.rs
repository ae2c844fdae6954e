//! Full-page content pane views: help, about and the file viewer.

use crate::app::AppState;
use crate::screen::region::clip_to_width;
use crate::screen::{RegionId, ScreenBackend};
use crate::ui::panes::version_label;
use crate::utils::ellipsize_end;

/// Help text as (row, column, text).
const HELP_LINES: &[(u16, u16, &str)] = &[
    (2, 2, "Welcome to quickView!"),
    (3, 2, "====================="),
    (5, 2, "File Browser Navigation:"),
    (6, 4, "UP/DOWN  - Navigate file list"),
    (7, 4, "PgUp/PgDn- Page through file list"),
    (8, 4, "HOME/END - Go to top/bottom of list"),
    (9, 4, "ENTER    - Enter directory/select file"),
    (10, 4, "LEFT     - Go to parent directory"),
    (12, 2, "File Viewing (press 'v' on a file):"),
    (13, 4, "UP/DOWN  - Scroll line by line"),
    (14, 4, "PgUp/PgDn- Scroll page by page"),
    (15, 4, "HOME/END - Go to top/bottom"),
    (17, 2, "Interface Layout:"),
    (18, 4, "Left Panel    - File browser"),
    (19, 4, "Top Right     - Directory/file contents"),
    (20, 4, "Bottom Right  - File/directory information"),
    (21, 4, "Status Bar    - Current selection details"),
    (23, 2, "General Commands:"),
    (24, 4, "v, V     - View files (opens images in viewer)"),
    (25, 4, "h, H     - Show this help"),
    (26, 4, "a, A     - Show about information"),
    (27, 4, "q, Q     - Quit application"),
    (28, 4, "ESC      - Quit application"),
    (30, 2, "Press any key to start browsing files..."),
];

/// Footer listing the file viewer keys.
const VIEWER_KEYS: &str = "UP/DOWN:scroll PgUp/PgDn:page HOME/END:top/bottom ESC:exit";

pub fn draw_help(screen: &mut dyn ScreenBackend, region: RegionId) {
    screen.clear_region(region);
    screen.draw_border(region);
    for &(row, col, text) in HELP_LINES {
        screen.draw_text(region, row, col, text);
    }
}

pub fn draw_about(screen: &mut dyn ScreenBackend, region: RegionId) {
    screen.clear_region(region);
    screen.draw_border(region);
    screen.center_text(region, 5, &version_label());
    screen.center_text(region, 7, "A keyboard-driven terminal file browser");
    screen.center_text(region, 9, "Built with Rust, ratatui and crossterm");
    screen.center_text(region, 11, "Press any key to return...");
}

/// Footer line of the file viewer: visible line range plus the keys, or just
/// the keys when everything fits.
pub fn file_view_footer(offset: usize, viewport: usize, total: usize) -> String {
    if total > viewport {
        let last = (offset + viewport).min(total);
        format!("Lines {}-{} of {} | {}", offset + 1, last, total, VIEWER_KEYS)
    } else {
        VIEWER_KEYS.to_string()
    }
}

pub fn draw_file_view(screen: &mut dyn ScreenBackend, region: RegionId, state: &AppState) {
    let size = screen.region_size(region);
    let inner = (size.width as usize).saturating_sub(4);

    screen.clear_region(region);
    screen.draw_border(region);

    let Some(text) = state.text().filter(|t| !t.is_empty()) else {
        screen.center_text(region, size.height / 2, "No file content to display");
        screen.center_text(region, size.height / 2 + 2, "Press any key to return...");
        return;
    };

    let title = format!(
        "File: {}",
        ellipsize_end(&text.file_name(), inner.saturating_sub(6))
    );
    screen.draw_text(region, 1, 2, &title);
    screen.draw_hline(region, 2, 2, size.width.saturating_sub(4));

    let pager = state.pager();
    for (row, idx) in pager.visible().enumerate() {
        if let Some(line) = text.lines().get(idx) {
            screen.draw_text(region, 3 + row as u16, 2, &clip_to_width(line, inner));
        }
    }

    let footer = file_view_footer(pager.offset(), pager.viewport(), text.len());
    screen.draw_text(
        region,
        size.height.saturating_sub(2),
        2,
        &clip_to_width(&footer, inner),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn footer_shows_range_only_when_scrollable() {
        assert_eq!(
            file_view_footer(180, 20, 200),
            format!("Lines 181-200 of 200 | {VIEWER_KEYS}")
        );
        assert_eq!(
            file_view_footer(0, 20, 45),
            format!("Lines 1-20 of 45 | {VIEWER_KEYS}")
        );
        assert_eq!(file_view_footer(0, 20, 20), VIEWER_KEYS);
    }

    #[test]
    fn help_rows_are_unique() {
        let mut rows: Vec<u16> = HELP_LINES.iter().map(|&(r, _, _)| r).collect();
        rows.dedup();
        assert_eq!(rows.len(), HELP_LINES.len());
    }
}
