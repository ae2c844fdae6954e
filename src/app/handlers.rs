//! Command handlers of the controller.
//!
//! Each handler mutates the [AppState](crate::app::AppState) and publishes a
//! one-line status. Recoverable failures never leave this module as errors;
//! they become status messages.

use crate::app::controller::{App, KeypressResult};
use crate::app::keymap::{Command, ScrollCommand};
use crate::app::mode::DisplayMode;
use crate::app::nav::ListView;
use crate::app::pager::PagedView;
use crate::app::state::DEFAULT_HINT;
use crate::core::{is_image_file, load_directory, load_text_file};
use crate::screen::ScreenBackend;

use std::io;
use std::path::PathBuf;

impl<S: ScreenBackend> App<S> {
    pub(super) fn on_command(&mut self, cmd: Command) -> io::Result<KeypressResult> {
        match cmd {
            Command::Up => self.move_selection(ListView::step_up, None),
            Command::Down => self.move_selection(ListView::step_down, None),
            Command::PageUp => self.move_selection(ListView::page_up, Some("Page up in file list")),
            Command::PageDown => {
                self.move_selection(ListView::page_down, Some("Page down in file list"))
            }
            Command::Home => self.move_selection(ListView::home, Some("Top of file list")),
            Command::End => self.move_selection(ListView::end, Some("Bottom of file list")),
            Command::Enter => self.enter_selected()?,
            Command::Parent => self.go_parent()?,
            Command::View => return self.view_selected(),
            Command::Help => {
                let state = self.state_mut();
                state.set_mode(DisplayMode::Help);
                state.set_status("Help screen - Press any key to return");
            }
            Command::About => {
                let state = self.state_mut();
                state.set_mode(DisplayMode::About);
                state.set_status("About screen - Press any key to return");
            }
            Command::Quit => {
                let state = self.state_mut();
                state.stop();
                state.set_status("Goodbye!");
                return Ok(KeypressResult::Quit);
            }
        }
        Ok(KeypressResult::Consumed)
    }

    pub(super) fn on_scroll(&mut self, cmd: ScrollCommand) {
        let (op, moved_msg, still_msg): (fn(&mut PagedView) -> bool, &str, &str) = match cmd {
            ScrollCommand::LineUp => (PagedView::line_up, "Scrolled up", "Already at top of file"),
            ScrollCommand::LineDown => {
                (PagedView::line_down, "Scrolled down", "Already at end of file")
            }
            ScrollCommand::PageUp => (PagedView::page_up, "Page up", "Page up"),
            ScrollCommand::PageDown => (PagedView::page_down, "Page down", "Page down"),
            ScrollCommand::Home => (PagedView::home, "Top of file", "Top of file"),
            ScrollCommand::End => (PagedView::end, "End of file", "End of file"),
        };
        let state = self.state_mut();
        let moved = op(state.pager_mut());
        state.set_status(if moved { moved_msg } else { still_msg });
    }

    /// Any key on a help, about or file page goes back to browsing.
    pub(super) fn on_dismiss(&mut self) {
        let state = self.state_mut();
        if state.mode() == DisplayMode::FileView {
            state.close_text();
        }
        state.set_mode(DisplayMode::Normal);
        state.set_status(DEFAULT_HINT);
    }

    pub(super) fn on_unbound(&mut self) {
        self.state_mut().set_status(DEFAULT_HINT);
    }

    pub(super) fn on_resize(&mut self) -> io::Result<()> {
        self.rebuild_layout()?;
        self.screen_mut().force_redraw()?;
        self.state_mut().set_status("Terminal resized");
        Ok(())
    }

    fn move_selection(&mut self, op: fn(&mut ListView) -> bool, status: Option<&str>) {
        let state = self.state_mut();
        if op(state.list_mut()) {
            state.refresh_preview();
            state.mark_dirty();
        }
        if let Some(status) = status {
            state.set_status(status);
        }
    }

    /// Opens the selected directory. Files are left alone; their details are
    /// already in the info pane and status bar.
    fn enter_selected(&mut self) -> io::Result<()> {
        let target = match self.state().selected_entry() {
            Some(entry) if entry.is_dir() => entry.path().to_path_buf(),
            _ => return Ok(()),
        };
        self.change_directory(target)
    }

    fn go_parent(&mut self) -> io::Result<()> {
        match self.state().current_dir().parent() {
            Some(parent) => {
                let parent = parent.to_path_buf();
                self.change_directory(parent)
            }
            None => {
                self.state_mut().set_status("Already at the root directory");
                Ok(())
            }
        }
    }

    /// Loads `dir` synchronously. A "Loading directory..." status is drawn
    /// first so slow directories give feedback.
    pub(super) fn change_directory(&mut self, dir: PathBuf) -> io::Result<()> {
        log::info!("entering {}", dir.display());
        self.state_mut().set_status("Loading directory...");
        self.redraw()?;

        let dir = dir.canonicalize().unwrap_or(dir);
        let listing = load_directory(&dir);
        self.state_mut().apply_listing(dir, listing);
        Ok(())
    }

    fn view_selected(&mut self) -> io::Result<KeypressResult> {
        let Some(entry) = self.state().selected_entry() else {
            self.state_mut().set_status("No file selected");
            return Ok(KeypressResult::Consumed);
        };
        if !entry.is_regular_file() {
            self.state_mut().set_status("Cannot view: not a regular file");
            return Ok(KeypressResult::Consumed);
        }
        let path = entry.path().to_path_buf();

        if is_image_file(&path) {
            if let Err(e) = self.viewer_mut().open(&path) {
                log::warn!("image viewer failed for {}: {}", path.display(), e);
            }
            self.state_mut().set_status("Image opened in default viewer");
            return Ok(KeypressResult::Recovered);
        }

        let limits = self.config().limits();
        match load_text_file(&path, limits) {
            Ok(text) => {
                let state = self.state_mut();
                state.open_text(text);
                state.set_mode(DisplayMode::FileView);
                state.set_status("File view - Press any key to return");
            }
            Err(e) => {
                log::warn!("cannot view {}: {}", path.display(), e);
                self.state_mut().set_status(e.status_message());
            }
        }
        Ok(KeypressResult::Consumed)
    }
}
