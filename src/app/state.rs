//! Application state of quickview.
//!
//! [AppState] holds everything the renderers need: the current directory and
//! its entries, the list and pager positions, the display mode, the loaded
//! text and the status message. Only the controller mutates it; renderers
//! get a shared reference.

use crate::app::mode::DisplayMode;
use crate::app::nav::ListView;
use crate::app::pager::PagedView;
use crate::core::{DirPreview, DirectoryEntry, Listing, TextBuffer, preview_directory};

use std::path::{Path, PathBuf};

/// Hint shown when there is nothing more specific to say.
pub const DEFAULT_HINT: &str =
    "Use arrows to navigate, Enter to select, 'v' to view files, 'h' for help, 'q' to quit";

/// Preview of the selected entry for the content and info panes.
#[derive(Debug, Clone, Default)]
pub enum Preview {
    #[default]
    None,
    Directory(DirPreview),
    Error(String),
}

pub struct AppState {
    current_dir: PathBuf,
    entries: Vec<DirectoryEntry>,
    list: ListView,
    mode: DisplayMode,
    text: Option<TextBuffer>,
    pager: PagedView,
    preview: Preview,
    preview_cap: usize,
    status: String,
    dirty: bool,
    running: bool,
}

impl AppState {
    pub fn new(current_dir: PathBuf, preview_cap: usize) -> Self {
        Self {
            current_dir,
            entries: Vec::new(),
            list: ListView::default(),
            mode: DisplayMode::Normal,
            text: None,
            pager: PagedView::default(),
            preview: Preview::None,
            preview_cap,
            status: DEFAULT_HINT.to_string(),
            dirty: true,
            running: true,
        }
    }

    // Getters / Accessors

    #[inline]
    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    #[inline]
    pub fn entries(&self) -> &[DirectoryEntry] {
        &self.entries
    }

    #[inline]
    pub fn list(&self) -> &ListView {
        &self.list
    }

    #[inline]
    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    #[inline]
    pub fn text(&self) -> Option<&TextBuffer> {
        self.text.as_ref()
    }

    #[inline]
    pub fn pager(&self) -> &PagedView {
        &self.pager
    }

    #[inline]
    pub fn preview(&self) -> &Preview {
        &self.preview
    }

    #[inline]
    pub fn status(&self) -> &str {
        &self.status
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn selected_entry(&self) -> Option<&DirectoryEntry> {
        self.entries.get(self.list.selected())
    }

    // Mutation, controller only

    pub(crate) fn list_mut(&mut self) -> &mut ListView {
        &mut self.list
    }

    pub(crate) fn pager_mut(&mut self) -> &mut PagedView {
        &mut self.pager
    }

    pub(crate) fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
        self.dirty = true;
    }

    pub(crate) fn set_mode(&mut self, mode: DisplayMode) {
        if self.mode != mode {
            log::debug!("mode {} -> {}", self.mode.name(), mode.name());
        }
        self.mode = mode;
        self.dirty = true;
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    pub(crate) fn stop(&mut self) {
        self.running = false;
    }

    /// Replaces the directory contents. Selection, list offset, the loaded
    /// text and its offset all go back to the start.
    pub(crate) fn apply_listing(&mut self, dir: PathBuf, listing: Listing) {
        self.current_dir = dir;
        self.entries = listing.entries;
        self.list.reset(self.entries.len());
        self.text = None;
        self.pager.reset(0);
        self.status = listing.status;
        self.refresh_preview();
        self.dirty = true;
    }

    /// Installs a loaded text and scrolls it to the top.
    pub(crate) fn open_text(&mut self, text: TextBuffer) {
        self.pager.reset(text.len());
        self.text = Some(text);
        self.dirty = true;
    }

    pub(crate) fn close_text(&mut self) {
        self.text = None;
        self.pager.reset(0);
        self.dirty = true;
    }

    /// Re-reads the preview of the selected entry.
    pub(crate) fn refresh_preview(&mut self) {
        self.preview = match self.selected_entry() {
            Some(entry) if entry.is_dir() => {
                match preview_directory(entry.path(), self.preview_cap) {
                    Ok(preview) => Preview::Directory(preview),
                    Err(e) => {
                        log::debug!("cannot preview {}: {}", entry.path().display(), e);
                        Preview::Error(e.to_string())
                    }
                }
            }
            _ => Preview::None,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::load_directory;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn applying_a_listing_resets_positions() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = TempDir::new()?;
        for i in 0..30 {
            fs::write(tmp.path().join(format!("file_{i:02}.txt")), "x")?;
        }
        let mut state = AppState::new(tmp.path().to_path_buf(), 100);
        state.list_mut().set_viewport(5);
        state.apply_listing(tmp.path().to_path_buf(), load_directory(tmp.path()));
        state.list_mut().end();
        state.open_text(TextBuffer::from_lines(
            tmp.path().join("file_00.txt"),
            vec!["x".into(); 50],
            false,
        ));
        state.pager_mut().set_viewport(10);
        state.pager_mut().end();
        assert!(state.list().offset() > 0);
        assert!(state.pager().offset() > 0);

        state.apply_listing(tmp.path().to_path_buf(), load_directory(tmp.path()));
        assert_eq!(state.list().selected(), 0);
        assert_eq!(state.list().offset(), 0);
        assert_eq!(state.pager().offset(), 0);
        assert!(state.text().is_none());
        assert_eq!(state.status(), "Loaded 30 entries");
        Ok(())
    }

    #[test]
    fn preview_follows_the_selection() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = TempDir::new()?;
        fs::create_dir(tmp.path().join("child"))?;
        fs::write(tmp.path().join("child").join("inner.txt"), "x")?;
        fs::write(tmp.path().join("z.txt"), "x")?;

        let mut state = AppState::new(tmp.path().to_path_buf(), 100);
        state.apply_listing(tmp.path().to_path_buf(), load_directory(tmp.path()));
        // ".." is selected first
        assert!(matches!(state.preview(), Preview::Directory(_)));

        state.list_mut().step_down();
        state.refresh_preview();
        match state.preview() {
            Preview::Directory(p) => assert_eq!(p.files(), 1),
            other => panic!("unexpected preview {other:?}"),
        }

        state.list_mut().step_down();
        state.refresh_preview();
        assert!(matches!(state.preview(), Preview::None));
        Ok(())
    }
}
