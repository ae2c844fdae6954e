//! Screen backend contract for quickview.
//!
//! Everything the rest of the crate knows about the terminal goes through the
//! [ScreenBackend] trait: regions, text, attributes, key input and flushing.
//! The controller and the renderers never touch a concrete terminal type.
//!
//! Two unrelated implementations exist:
//! - [direct]: immediate-mode, writes crossterm commands straight to the output.
//! - [buffered]: retained-mode, every region owns a ratatui buffer which is
//!   composed into a ratatui frame on flush.
//!
//! [platform_screen] picks the one used on the current platform.

pub mod buffered;
pub mod direct;
pub mod keys;
pub mod region;

pub use buffered::BufferedScreen;
pub use direct::DirectScreen;
pub use keys::{CrosstermKeys, Key, KeySource};
pub use region::{Attr, Pen, RegionArena, RegionId};

use ratatui::layout::Size;
use std::io;

/// Capability interface every rendering facility implements.
///
/// Region handles that are unknown (destroyed, or never created) must be
/// accepted silently by every drawing call. Drawing never fails because text
/// is too long or a row is outside the region, it is clipped instead.
pub trait ScreenBackend {
    /// Puts the terminal in full-screen mode. Calling it twice is harmless.
    fn init(&mut self) -> io::Result<()>;

    /// Restores the terminal. Calling it twice, or before `init`, is harmless.
    fn shutdown(&mut self) -> io::Result<()>;

    /// Current screen size in character cells.
    fn screen_size(&mut self) -> io::Result<Size>;

    /// Blocks until the next key event and returns it normalized.
    fn next_key(&mut self) -> io::Result<Key>;

    fn create_region(&mut self, height: u16, width: u16, top: u16, left: u16) -> RegionId;
    fn destroy_region(&mut self, region: RegionId);

    /// Size of the region as it fits on the screen right now.
    /// Unknown regions report a zero size.
    fn region_size(&self, region: RegionId) -> Size;

    fn clear_region(&mut self, region: RegionId);
    fn draw_border(&mut self, region: RegionId);
    fn draw_text(&mut self, region: RegionId, row: u16, col: u16, text: &str);
    fn draw_hline(&mut self, region: RegionId, row: u16, col: u16, len: u16);

    fn set_attr(&mut self, region: RegionId, attr: Attr, bold: bool, reverse: bool);
    fn clear_attr(&mut self, region: RegionId, attr: Attr, bold: bool, reverse: bool);

    fn flush_region(&mut self, region: RegionId) -> io::Result<()>;
    fn flush_all(&mut self) -> io::Result<()>;

    fn hide_cursor(&mut self) -> io::Result<()>;
    fn show_cursor(&mut self) -> io::Result<()>;

    fn has_colors(&self) -> bool;

    /// Discards whatever the terminal shows and repaints from scratch on the
    /// next flush. Used after an external program had the terminal.
    fn force_redraw(&mut self) -> io::Result<()>;

    /// Draws `text` horizontally centered on `row`.
    fn center_text(&mut self, region: RegionId, row: u16, text: &str) {
        let width = self.region_size(region).width as usize;
        let text_width = unicode_width::UnicodeWidthStr::width(text);
        let col = width.saturating_sub(text_width) / 2;
        self.draw_text(region, row, col as u16, text);
    }
}

/// The screen implementation used on this platform.
#[cfg(not(windows))]
pub type PlatformScreen = BufferedScreen<ratatui::backend::CrosstermBackend<io::Stdout>, CrosstermKeys>;

/// The screen implementation used on this platform.
#[cfg(windows)]
pub type PlatformScreen = DirectScreen<io::Stdout, CrosstermKeys>;

/// Builds the screen for the current platform, reading keys from crossterm.
#[cfg(not(windows))]
pub fn platform_screen() -> io::Result<PlatformScreen> {
    BufferedScreen::stdout(CrosstermKeys)
}

/// Builds the screen for the current platform, reading keys from crossterm.
#[cfg(windows)]
pub fn platform_screen() -> io::Result<PlatformScreen> {
    DirectScreen::stdout(CrosstermKeys)
}

/// Puts the real terminal into raw mode on the alternate screen.
pub(crate) fn enter_raw_terminal() -> io::Result<()> {
    crossterm::terminal::enable_raw_mode()?;
    crossterm::execute!(
        io::stdout(),
        crossterm::terminal::EnterAlternateScreen,
        crossterm::cursor::Hide
    )
}

/// Undoes [enter_raw_terminal].
pub(crate) fn leave_raw_terminal() -> io::Result<()> {
    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(
        io::stdout(),
        crossterm::terminal::LeaveAlternateScreen,
        crossterm::cursor::Show
    )
}
