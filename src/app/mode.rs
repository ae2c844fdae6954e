//! Display modes and input dispatch.
//!
//! The mode decides what a key means. [dispatch] is a pure function from
//! the current mode and a key to what the controller should do with it;
//! the controller performs the actual transition.

use crate::app::keymap::{Command, Keymap, ScrollCommand};
use crate::screen::Key;

/// What the content pane currently shows and how input is consumed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum DisplayMode {
    #[default]
    Normal,
    Help,
    About,
    FileView,
}

impl DisplayMode {
    pub fn name(self) -> &'static str {
        match self {
            DisplayMode::Normal => "normal",
            DisplayMode::Help => "help",
            DisplayMode::About => "about",
            DisplayMode::FileView => "file view",
        }
    }
}

/// Result of routing one key.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Dispatch {
    /// The terminal changed size. Handled the same way in every mode.
    Resize,
    /// A browsing command, only produced in Normal mode.
    Browse(Command),
    /// A scroll command, only produced in FileView mode.
    Scroll(ScrollCommand),
    /// Leave the current page and go back to Normal.
    Dismiss,
    /// Nothing bound to this key in Normal mode.
    Ignore,
}

/// Routes `key` according to `mode`.
pub fn dispatch(mode: DisplayMode, key: Key, keymap: &Keymap) -> Dispatch {
    if key == Key::Resize {
        return Dispatch::Resize;
    }
    match mode {
        DisplayMode::Normal => keymap
            .command(key)
            .map_or(Dispatch::Ignore, Dispatch::Browse),
        DisplayMode::Help | DisplayMode::About => Dispatch::Dismiss,
        DisplayMode::FileView => keymap
            .scroll(key)
            .map_or(Dispatch::Dismiss, Dispatch::Scroll),
    }
}
