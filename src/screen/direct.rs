//! Immediate-mode screen writing crossterm commands.
//!
//! Nothing is retained: every drawing call is queued to the writer at
//! absolute coordinates right away and a flush pushes the queue out.

use crate::screen::region::{Look, Pen, RegionArena, RegionId, clip_to_width, visible_area};
use crate::screen::{Attr, Key, KeySource, ScreenBackend};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    style::{Attribute, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use ratatui::layout::{Rect, Size};
use unicode_width::UnicodeWidthStr;

use std::io::{self, Write};

struct Pane {
    area: Rect,
    pen: Pen,
}

/// [ScreenBackend] that writes straight to a terminal stream.
pub struct DirectScreen<W: Write, K: KeySource> {
    out: W,
    keys: K,
    panes: RegionArena<Pane>,
    screen: Size,
    colors: bool,
    raw_mode: bool,
    active: bool,
    failed: Option<io::Error>,
}

impl<K: KeySource> DirectScreen<io::Stdout, K> {
    /// Screen on the real terminal.
    pub fn stdout(keys: K) -> io::Result<Self> {
        let (width, height) = crossterm::terminal::size()?;
        Ok(Self {
            out: io::stdout(),
            keys,
            panes: RegionArena::new(),
            screen: Size::new(width, height),
            colors: crossterm::style::available_color_count() >= 8,
            raw_mode: true,
            active: false,
            failed: None,
        })
    }
}

impl<W: Write, K: KeySource> DirectScreen<W, K> {
    /// Screen over any writer with a fixed size. No terminal modes are touched
    /// and the size is never queried from the real terminal.
    pub fn with_writer(out: W, keys: K, screen: Size, colors: bool) -> Self {
        Self {
            out,
            keys,
            panes: RegionArena::new(),
            screen,
            colors,
            raw_mode: false,
            active: false,
            failed: None,
        }
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    /// Queues `text` at an absolute position with the given look.
    /// The first write error is kept and returned by the next flush.
    fn put(&mut self, x: u16, y: u16, text: &str, look: Look) {
        if let Err(e) = self.queue_styled(x, y, text, look)
            && self.failed.is_none()
        {
            self.failed = Some(e);
        }
    }

    fn flush_out(&mut self) -> io::Result<()> {
        if let Some(e) = self.failed.take() {
            return Err(e);
        }
        self.out.flush()
    }

    fn queue_styled(&mut self, x: u16, y: u16, text: &str, look: Look) -> io::Result<()> {
        queue!(self.out, MoveTo(x, y))?;
        if !look.is_plain() {
            if let Some(fg) = look.fg {
                queue!(self.out, SetForegroundColor(fg.to_crossterm()))?;
            }
            if let Some(bg) = look.bg {
                queue!(self.out, SetBackgroundColor(bg.to_crossterm()))?;
            }
            if look.bold {
                queue!(self.out, SetAttribute(Attribute::Bold))?;
            }
            if look.reverse {
                queue!(self.out, SetAttribute(Attribute::Reverse))?;
            }
        }
        queue!(self.out, Print(text))?;
        if !look.is_plain() {
            queue!(self.out, SetAttribute(Attribute::Reset), ResetColor)?;
        }
        Ok(())
    }

    fn visible(&self, region: RegionId) -> Option<(Rect, Look)> {
        let pane = self.panes.get(region)?;
        Some((visible_area(pane.area, self.screen), pane.pen.look(self.colors)))
    }
}

impl<W: Write, K: KeySource> ScreenBackend for DirectScreen<W, K> {
    fn init(&mut self) -> io::Result<()> {
        if self.active {
            return Ok(());
        }
        if self.raw_mode {
            super::enter_raw_terminal()?;
            let (width, height) = crossterm::terminal::size()?;
            self.screen = Size::new(width, height);
        }
        queue!(self.out, Clear(ClearType::All))?;
        self.out.flush()?;
        self.active = true;
        log::debug!("direct screen initialized, colors: {}", self.colors);
        Ok(())
    }

    fn shutdown(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.panes.clear();
        self.active = false;
        self.out.flush()?;
        if self.raw_mode {
            super::leave_raw_terminal()?;
        }
        log::debug!("direct screen shut down");
        Ok(())
    }

    fn screen_size(&mut self) -> io::Result<Size> {
        if self.raw_mode {
            let (width, height) = crossterm::terminal::size()?;
            self.screen = Size::new(width, height);
        }
        Ok(self.screen)
    }

    fn next_key(&mut self) -> io::Result<Key> {
        self.keys.read_key()
    }

    fn create_region(&mut self, height: u16, width: u16, top: u16, left: u16) -> RegionId {
        self.panes.insert(Pane {
            area: Rect::new(left, top, width, height),
            pen: Pen::default(),
        })
    }

    fn destroy_region(&mut self, region: RegionId) {
        self.panes.remove(region);
    }

    fn region_size(&self, region: RegionId) -> Size {
        match self.visible(region) {
            Some((area, _)) => Size::new(area.width, area.height),
            None => Size::new(0, 0),
        }
    }

    fn clear_region(&mut self, region: RegionId) {
        let Some((area, _)) = self.visible(region) else {
            return;
        };
        let blank = " ".repeat(area.width as usize);
        for y in area.top()..area.bottom() {
            self.put(area.x, y, &blank, Look::default());
        }
    }

    fn draw_border(&mut self, region: RegionId) {
        let Some((area, look)) = self.visible(region) else {
            return;
        };
        if area.width < 2 || area.height < 2 {
            return;
        }
        let inner = (area.width - 2) as usize;
        let top = format!("┌{}┐", "─".repeat(inner));
        let bottom = format!("└{}┘", "─".repeat(inner));
        self.put(area.x, area.y, &top, look);
        for y in area.y + 1..area.bottom() - 1 {
            self.put(area.x, y, "│", look);
            self.put(area.right() - 1, y, "│", look);
        }
        self.put(area.x, area.bottom() - 1, &bottom, look);
    }

    fn draw_text(&mut self, region: RegionId, row: u16, col: u16, text: &str) {
        let Some((area, look)) = self.visible(region) else {
            return;
        };
        if row >= area.height || col >= area.width {
            return;
        }
        let clipped = clip_to_width(text, (area.width - col) as usize);
        if clipped.width() == 0 {
            return;
        }
        self.put(area.x + col, area.y + row, &clipped, look);
    }

    fn draw_hline(&mut self, region: RegionId, row: u16, col: u16, len: u16) {
        let Some((area, look)) = self.visible(region) else {
            return;
        };
        if row >= area.height || col >= area.width {
            return;
        }
        let len = len.min(area.width - col) as usize;
        let rule = "─".repeat(len);
        self.put(area.x + col, area.y + row, &rule, look);
    }

    fn set_attr(&mut self, region: RegionId, attr: Attr, bold: bool, reverse: bool) {
        if let Some(pane) = self.panes.get_mut(region) {
            pane.pen.set(attr, bold, reverse);
        }
    }

    fn clear_attr(&mut self, region: RegionId, attr: Attr, bold: bool, reverse: bool) {
        if let Some(pane) = self.panes.get_mut(region) {
            pane.pen.clear(attr, bold, reverse);
        }
    }

    fn flush_region(&mut self, region: RegionId) -> io::Result<()> {
        if self.panes.get(region).is_none() {
            return Ok(());
        }
        self.flush_out()
    }

    fn flush_all(&mut self) -> io::Result<()> {
        self.flush_out()
    }

    fn hide_cursor(&mut self) -> io::Result<()> {
        queue!(self.out, Hide)?;
        self.out.flush()
    }

    fn show_cursor(&mut self) -> io::Result<()> {
        queue!(self.out, Show)?;
        self.out.flush()
    }

    fn has_colors(&self) -> bool {
        self.colors
    }

    fn force_redraw(&mut self) -> io::Result<()> {
        queue!(self.out, ResetColor, Clear(ClearType::All))?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    fn screen() -> DirectScreen<Vec<u8>, VecDeque<Key>> {
        DirectScreen::with_writer(Vec::new(), VecDeque::new(), Size::new(40, 10), false)
    }

    fn output(s: &DirectScreen<Vec<u8>, VecDeque<Key>>) -> String {
        String::from_utf8_lossy(s.writer()).into_owned()
    }

    #[test]
    fn draws_clipped_text() -> Result<(), Box<dyn std::error::Error>> {
        let mut s = screen();
        let r = s.create_region(2, 4, 0, 0);
        s.draw_text(r, 0, 1, "hello");
        s.flush_all()?;
        let out = output(&s);
        assert!(out.contains("hel"));
        assert!(!out.contains("hell"));
        Ok(())
    }

    #[test]
    fn destroyed_region_writes_nothing() -> Result<(), Box<dyn std::error::Error>> {
        let mut s = screen();
        let r = s.create_region(2, 10, 0, 0);
        s.destroy_region(r);
        s.draw_text(r, 0, 0, "ghost");
        s.draw_border(r);
        s.clear_region(r);
        s.flush_region(r)?;
        assert!(s.writer().is_empty());
        assert_eq!(s.region_size(r), Size::new(0, 0));
        Ok(())
    }

    #[test]
    fn reverse_video_without_colors() -> Result<(), Box<dyn std::error::Error>> {
        let mut s = screen();
        let r = s.create_region(1, 20, 9, 0);
        s.set_attr(r, Attr::StatusBar, false, false);
        s.draw_text(r, 0, 0, "status");
        s.flush_all()?;
        // SGR 7 is reverse video
        assert!(output(&s).contains("\u{1b}[7m"));
        Ok(())
    }

    #[test]
    fn border_is_skipped_for_tiny_regions() {
        let mut s = screen();
        let r = s.create_region(1, 1, 0, 0);
        s.draw_border(r);
        assert!(s.writer().is_empty());
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_errors_surface_on_flush() {
        let mut s = DirectScreen::with_writer(ClosedPipe, VecDeque::new(), Size::new(10, 2), true);
        let r = s.create_region(2, 10, 0, 0);
        s.draw_text(r, 0, 0, "lost");
        let err = s.flush_all().err().map(|e| e.kind());
        assert_eq!(err, Some(io::ErrorKind::BrokenPipe));
        assert!(s.flush_all().is_ok());
    }
}
