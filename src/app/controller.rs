//! The application controller.
//!
//! [App] owns the screen backend, the four regions, the state and the image
//! viewer. It blocks for one key at a time, routes it through the display
//! mode, lets the handlers mutate the state and redraws when the state is
//! dirty. It is generic over [ScreenBackend] and never names a concrete
//! terminal type.

use crate::app::keymap::Keymap;
use crate::app::mode::{Dispatch, DisplayMode, dispatch};
use crate::app::state::AppState;
use crate::config::Config;
use crate::core::{ImageViewer, SystemViewer};
use crate::screen::{Key, ScreenBackend};
use crate::ui::{self, layout::ScreenLayout};

use std::io;

/// Status shown while the help page is up right after start.
pub const BOOTSTRAP_HINT: &str = "Help screen - Press any key to start browsing files";

/// Outcome of one processed key.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum KeypressResult {
    /// Nothing bound to the key.
    Continue,
    /// The key was handled.
    Consumed,
    /// The user asked to leave.
    Quit,
    /// An external program may have drawn over the terminal.
    Recovered,
}

pub struct App<S: ScreenBackend> {
    screen: S,
    layout: Option<ScreenLayout>,
    state: AppState,
    keymap: Keymap,
    config: Config,
    viewer: Box<dyn ImageViewer>,
    active: bool,
}

impl<S: ScreenBackend> App<S> {
    /// Builds the controller. Nothing touches the terminal until [App::init].
    pub fn new(screen: S, config: Config) -> Self {
        let state = AppState::new(config.start_dir().to_path_buf(), config.preview_cap());
        Self {
            screen,
            layout: None,
            state,
            keymap: Keymap::new(),
            config,
            viewer: Box::new(SystemViewer::detect()),
            active: false,
        }
    }

    /// Replaces the image viewer.
    pub fn with_viewer(mut self, viewer: impl ImageViewer + 'static) -> Self {
        self.viewer = Box::new(viewer);
        self
    }

    // Getters / Accessors

    #[inline]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    #[inline]
    pub fn screen(&self) -> &S {
        &self.screen
    }

    #[inline]
    pub fn screen_mut(&mut self) -> &mut S {
        &mut self.screen
    }

    #[inline]
    pub fn layout(&self) -> Option<&ScreenLayout> {
        self.layout.as_ref()
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub(super) fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    pub(super) fn viewer_mut(&mut self) -> &mut dyn ImageViewer {
        self.viewer.as_mut()
    }

    /// Enters full-screen mode, creates the regions, loads the start
    /// directory and shows the help page.
    pub fn init(&mut self) -> io::Result<()> {
        self.screen.init()?;
        self.active = true;
        self.screen.hide_cursor()?;
        log::debug!("debug output enabled: {}", self.config.debug());

        self.rebuild_layout()?;
        let start = self.config.start_dir().to_path_buf();
        self.change_directory(start)?;

        self.state.set_mode(DisplayMode::Help);
        self.state.set_status(BOOTSTRAP_HINT);
        self.redraw()?;
        log::info!("initialized in {}", self.state.current_dir().display());
        Ok(())
    }

    /// Runs until the user quits. Errors from the backend end the loop.
    pub fn run(&mut self) -> io::Result<()> {
        while self.state.is_running() {
            let key = self.screen.next_key()?;
            if self.handle_key(key)? == KeypressResult::Recovered {
                self.screen.force_redraw()?;
                self.state.mark_dirty();
            }
            self.viewer.reap();
            self.redraw_if_dirty()?;
        }
        log::info!("main loop finished");
        Ok(())
    }

    /// Processes one key. Resize is handled before the mode is consulted and
    /// never changes it.
    pub fn handle_key(&mut self, key: Key) -> io::Result<KeypressResult> {
        log::debug!("key {:?} in {} mode", key, self.state.mode().name());
        match dispatch(self.state.mode(), key, &self.keymap) {
            Dispatch::Resize => {
                self.on_resize()?;
                Ok(KeypressResult::Consumed)
            }
            Dispatch::Browse(cmd) => self.on_command(cmd),
            Dispatch::Scroll(cmd) => {
                self.on_scroll(cmd);
                Ok(KeypressResult::Consumed)
            }
            Dispatch::Dismiss => {
                self.on_dismiss();
                Ok(KeypressResult::Consumed)
            }
            Dispatch::Ignore => {
                self.on_unbound();
                Ok(KeypressResult::Continue)
            }
        }
    }

    /// Redraws everything if the state changed since the last draw.
    pub fn redraw_if_dirty(&mut self) -> io::Result<()> {
        if self.state.is_dirty() {
            self.redraw()?;
        }
        Ok(())
    }

    pub(super) fn redraw(&mut self) -> io::Result<()> {
        if let Some(layout) = &self.layout {
            ui::draw_interface(&mut self.screen, layout, &self.state)?;
        }
        self.state.clear_dirty();
        Ok(())
    }

    /// Destroys any regions and creates four new ones for the current screen
    /// size. The engines pick up the new viewport heights.
    pub(super) fn rebuild_layout(&mut self) -> io::Result<()> {
        let size = self.screen.screen_size()?;
        let layout = match self.layout.take() {
            Some(old) => old.rebuild(&mut self.screen, size),
            None => ScreenLayout::create(&mut self.screen, size),
        };
        self.state.list_mut().set_viewport(layout.list_viewport());
        self.state.pager_mut().set_viewport(layout.content_viewport());
        self.layout = Some(layout);
        self.state.mark_dirty();
        Ok(())
    }

    /// Destroys the regions and restores the terminal. Safe to call more
    /// than once.
    pub fn shutdown(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        self.viewer.reap();
        if let Some(layout) = self.layout.take() {
            layout.destroy(&mut self.screen);
        }
        self.screen.show_cursor()?;
        self.screen.shutdown()?;
        log::info!("shut down");
        Ok(())
    }
}

impl<S: ScreenBackend> Drop for App<S> {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            log::warn!("failed to restore the terminal: {e}");
        }
    }
}
