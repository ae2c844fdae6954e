//! Retained-mode screen built on ratatui.
//!
//! Each region owns a ratatui [Buffer] positioned at its screen origin.
//! Drawing only touches that buffer; flushing composes every live region into
//! one ratatui frame and lets ratatui diff it against what is on screen.

use crate::screen::region::{Pen, RegionArena, RegionId, clip_to_width, visible_area};
use crate::screen::{Attr, Key, KeySource, ScreenBackend};

use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::buffer::Buffer;
use ratatui::layout::{Rect, Size};
use ratatui::symbols::line;
use ratatui::widgets::{Block, Widget};

use std::error::Error;
use std::io;

struct Canvas {
    area: Rect,
    buffer: Buffer,
    pen: Pen,
}

/// [ScreenBackend] over a ratatui [Terminal].
///
/// Works with any ratatui backend; `CrosstermBackend` at runtime and
/// `TestBackend` in tests.
pub struct BufferedScreen<B: Backend, K: KeySource> {
    terminal: Terminal<B>,
    keys: K,
    regions: RegionArena<Canvas>,
    colors: bool,
    raw_mode: bool,
    active: bool,
}

fn backend_err<E: Into<Box<dyn Error + Send + Sync>>>(err: E) -> io::Error {
    io::Error::other(err)
}

impl<K: KeySource> BufferedScreen<CrosstermBackend<io::Stdout>, K> {
    /// Screen on the real terminal. `init` switches to raw mode and the
    /// alternate screen.
    pub fn stdout(keys: K) -> io::Result<Self> {
        let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        let colors = crossterm::style::available_color_count() >= 8;
        Ok(Self {
            terminal,
            keys,
            regions: RegionArena::new(),
            colors,
            raw_mode: true,
            active: false,
        })
    }
}

impl<B, K> BufferedScreen<B, K>
where
    B: Backend,
    B::Error: Send + Sync + 'static,
    K: KeySource,
{
    /// Screen over an arbitrary ratatui backend. No terminal modes are touched.
    pub fn new(backend: B, keys: K, colors: bool) -> io::Result<Self> {
        let terminal = Terminal::new(backend).map_err(backend_err)?;
        Ok(Self {
            terminal,
            keys,
            regions: RegionArena::new(),
            colors,
            raw_mode: false,
            active: false,
        })
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }

    pub fn keys_mut(&mut self) -> &mut K {
        &mut self.keys
    }

    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    fn screen_rect(&self) -> Size {
        self.terminal
            .size()
            .unwrap_or_else(|_| Size::new(0, 0))
    }

    fn canvas_mut(&mut self, region: RegionId) -> Option<&mut Canvas> {
        self.regions.get_mut(region)
    }

    fn compose(&mut self) -> io::Result<()> {
        let regions = &self.regions;
        self.terminal
            .draw(|frame| {
                let frame_area = frame.area();
                let buf = frame.buffer_mut();
                for canvas in regions.values() {
                    let area = canvas.area.intersection(frame_area);
                    for y in area.top()..area.bottom() {
                        for x in area.left()..area.right() {
                            if let (Some(dst), Some(src)) =
                                (buf.cell_mut((x, y)), canvas.buffer.cell((x, y)))
                            {
                                *dst = src.clone();
                            }
                        }
                    }
                }
            })
            .map_err(backend_err)?;
        Ok(())
    }
}

impl<B, K> ScreenBackend for BufferedScreen<B, K>
where
    B: Backend,
    B::Error: Send + Sync + 'static,
    K: KeySource,
{
    fn init(&mut self) -> io::Result<()> {
        if self.active {
            return Ok(());
        }
        if self.raw_mode {
            super::enter_raw_terminal()?;
        }
        self.terminal.clear().map_err(backend_err)?;
        self.active = true;
        log::debug!("buffered screen initialized, colors: {}", self.colors);
        Ok(())
    }

    fn shutdown(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.regions.clear();
        self.active = false;
        if self.raw_mode {
            super::leave_raw_terminal()?;
        }
        log::debug!("buffered screen shut down");
        Ok(())
    }

    fn screen_size(&mut self) -> io::Result<Size> {
        self.terminal.size().map_err(backend_err)
    }

    fn next_key(&mut self) -> io::Result<Key> {
        self.keys.read_key()
    }

    fn create_region(&mut self, height: u16, width: u16, top: u16, left: u16) -> RegionId {
        let area = Rect::new(left, top, width, height);
        self.regions.insert(Canvas {
            area,
            buffer: Buffer::empty(area),
            pen: Pen::default(),
        })
    }

    fn destroy_region(&mut self, region: RegionId) {
        self.regions.remove(region);
    }

    fn region_size(&self, region: RegionId) -> Size {
        match self.regions.get(region) {
            Some(canvas) => {
                let visible = visible_area(canvas.area, self.screen_rect());
                Size::new(visible.width, visible.height)
            }
            None => Size::new(0, 0),
        }
    }

    fn clear_region(&mut self, region: RegionId) {
        if let Some(canvas) = self.canvas_mut(region) {
            canvas.buffer.reset();
        }
    }

    fn draw_border(&mut self, region: RegionId) {
        let colors = self.colors;
        if let Some(canvas) = self.canvas_mut(region) {
            if canvas.area.width < 2 || canvas.area.height < 2 {
                return;
            }
            let style = canvas.pen.look(colors).to_style();
            Block::bordered()
                .border_style(style)
                .render(canvas.area, &mut canvas.buffer);
        }
    }

    fn draw_text(&mut self, region: RegionId, row: u16, col: u16, text: &str) {
        let colors = self.colors;
        let Some(canvas) = self.canvas_mut(region) else {
            return;
        };
        if row >= canvas.area.height || col >= canvas.area.width {
            return;
        }
        let room = (canvas.area.width - col) as usize;
        let clipped = clip_to_width(text, room);
        let style = canvas.pen.look(colors).to_style();
        canvas.buffer.set_stringn(
            canvas.area.x + col,
            canvas.area.y + row,
            clipped,
            room,
            style,
        );
    }

    fn draw_hline(&mut self, region: RegionId, row: u16, col: u16, len: u16) {
        let colors = self.colors;
        let Some(canvas) = self.canvas_mut(region) else {
            return;
        };
        if row >= canvas.area.height {
            return;
        }
        let style = canvas.pen.look(colors).to_style();
        let end = col.saturating_add(len).min(canvas.area.width);
        for x in col..end {
            if let Some(cell) = canvas
                .buffer
                .cell_mut((canvas.area.x + x, canvas.area.y + row))
            {
                cell.set_symbol(line::HORIZONTAL).set_style(style);
            }
        }
    }

    fn set_attr(&mut self, region: RegionId, attr: Attr, bold: bool, reverse: bool) {
        if let Some(canvas) = self.canvas_mut(region) {
            canvas.pen.set(attr, bold, reverse);
        }
    }

    fn clear_attr(&mut self, region: RegionId, attr: Attr, bold: bool, reverse: bool) {
        if let Some(canvas) = self.canvas_mut(region) {
            canvas.pen.clear(attr, bold, reverse);
        }
    }

    // ratatui diffs whole frames, so presenting one region presents them all.
    fn flush_region(&mut self, region: RegionId) -> io::Result<()> {
        if self.regions.get(region).is_none() {
            return Ok(());
        }
        self.compose()
    }

    fn flush_all(&mut self) -> io::Result<()> {
        self.compose()
    }

    fn hide_cursor(&mut self) -> io::Result<()> {
        self.terminal.hide_cursor().map_err(backend_err)
    }

    fn show_cursor(&mut self) -> io::Result<()> {
        self.terminal.show_cursor().map_err(backend_err)
    }

    fn has_colors(&self) -> bool {
        self.colors
    }

    fn force_redraw(&mut self) -> io::Result<()> {
        self.terminal.clear().map_err(backend_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use std::collections::VecDeque;

    type TestScreen = BufferedScreen<TestBackend, VecDeque<Key>>;

    fn screen(width: u16, height: u16) -> Result<TestScreen, Box<dyn std::error::Error>> {
        Ok(BufferedScreen::new(
            TestBackend::new(width, height),
            VecDeque::new(),
            true,
        )?)
    }

    fn row_text(screen: &TestScreen, y: u16) -> String {
        let buf = screen.terminal().backend().buffer();
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn text_is_clipped_to_the_region() -> Result<(), Box<dyn std::error::Error>> {
        let mut s = screen(20, 4)?;
        s.init()?;
        let r = s.create_region(1, 5, 1, 2);
        s.draw_text(r, 0, 0, "abcdefghij");
        s.flush_all()?;
        assert_eq!(row_text(&s, 1), "  abcde             ");
        Ok(())
    }

    #[test]
    fn unknown_regions_are_ignored() -> Result<(), Box<dyn std::error::Error>> {
        let mut s = screen(10, 3)?;
        let r = s.create_region(3, 10, 0, 0);
        s.destroy_region(r);
        s.draw_text(r, 0, 0, "nope");
        s.draw_border(r);
        s.draw_hline(r, 1, 0, 10);
        s.set_attr(r, Attr::Selected, true, true);
        s.clear_region(r);
        s.flush_region(r)?;
        assert_eq!(s.region_size(r), Size::new(0, 0));
        assert_eq!(s.region_count(), 0);
        Ok(())
    }

    #[test]
    fn region_size_shrinks_when_the_screen_does() -> Result<(), Box<dyn std::error::Error>> {
        let mut s = screen(80, 24)?;
        let r = s.create_region(23, 60, 0, 20);
        assert_eq!(s.region_size(r), Size::new(60, 23));
        s.terminal_mut().backend_mut().resize(40, 10);
        assert_eq!(s.region_size(r), Size::new(20, 10));
        Ok(())
    }

    #[test]
    fn border_and_rule_use_line_symbols() -> Result<(), Box<dyn std::error::Error>> {
        let mut s = screen(6, 4)?;
        let r = s.create_region(4, 6, 0, 0);
        s.draw_border(r);
        s.draw_hline(r, 2, 1, 4);
        s.flush_all()?;
        assert_eq!(row_text(&s, 0), "┌────┐");
        assert_eq!(row_text(&s, 2), "│────│");
        Ok(())
    }

    #[test]
    fn selected_attribute_is_applied() -> Result<(), Box<dyn std::error::Error>> {
        let mut s = screen(10, 2)?;
        let r = s.create_region(2, 10, 0, 0);
        s.set_attr(r, Attr::Selected, false, false);
        s.draw_text(r, 0, 0, "sel");
        s.clear_attr(r, Attr::Selected, false, false);
        s.draw_text(r, 1, 0, "plain");
        s.flush_all()?;
        let buf = s.terminal().backend().buffer();
        assert_eq!(buf[(0, 0)].bg, ratatui::style::Color::Yellow);
        assert_eq!(buf[(0, 1)].bg, ratatui::style::Color::Reset);
        Ok(())
    }
}
