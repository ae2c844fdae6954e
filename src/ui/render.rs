//! Top-level renderer.

use crate::app::{AppState, DisplayMode};
use crate::screen::ScreenBackend;
use crate::ui::layout::ScreenLayout;
use crate::ui::{pages, panes};

use std::io;

/// Draws all four regions for the current state and flushes the screen.
///
/// The content pane depends on the display mode; the list, info pane and
/// status bar are always drawn.
pub fn draw_interface(
    screen: &mut dyn ScreenBackend,
    layout: &ScreenLayout,
    state: &AppState,
) -> io::Result<()> {
    panes::draw_list(screen, layout.list.id, state);

    let content = layout.content.id;
    match state.mode() {
        DisplayMode::Normal => panes::draw_content(screen, content, state),
        DisplayMode::Help => pages::draw_help(screen, content),
        DisplayMode::About => pages::draw_about(screen, content),
        DisplayMode::FileView => pages::draw_file_view(screen, content, state),
    }

    panes::draw_info(screen, layout.info.id, state);
    panes::draw_status(screen, layout.status.id, state);
    screen.flush_all()
}
