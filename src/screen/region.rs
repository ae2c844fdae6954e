//! Region handles, the region arena and text attributes.
//!
//! Regions are identified by [RegionId]s handed out by a [RegionArena].
//! Ids are never reused, so a handle kept across a resize simply stops
//! resolving instead of pointing at a different region.

use ratatui::layout::{Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use std::collections::BTreeMap;
use unicode_width::UnicodeWidthChar;

/// Opaque handle of a backend-owned region.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RegionId(u32);

/// Arena of regions ordered by creation.
#[derive(Debug)]
pub struct RegionArena<T> {
    slots: BTreeMap<RegionId, T>,
    next: u32,
}

impl<T> RegionArena<T> {
    pub fn new() -> Self {
        Self {
            slots: BTreeMap::new(),
            next: 0,
        }
    }

    pub fn insert(&mut self, value: T) -> RegionId {
        let id = RegionId(self.next);
        self.next = self.next.wrapping_add(1);
        self.slots.insert(id, value);
        id
    }

    pub fn remove(&mut self, id: RegionId) -> Option<T> {
        self.slots.remove(&id)
    }

    pub fn get(&self, id: RegionId) -> Option<&T> {
        self.slots.get(&id)
    }

    pub fn get_mut(&mut self, id: RegionId) -> Option<&mut T> {
        self.slots.get_mut(&id)
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.slots.values()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }
}

impl<T> Default for RegionArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Named text attribute.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Attr {
    #[default]
    Normal,
    StatusBar,
    Selected,
    Error,
    Directory,
}

/// Small palette shared by both backends.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Paint {
    White,
    Black,
    Blue,
    Yellow,
    Red,
    Green,
}

impl Paint {
    pub fn to_ratatui(self) -> Color {
        match self {
            Paint::White => Color::White,
            Paint::Black => Color::Black,
            Paint::Blue => Color::Blue,
            Paint::Yellow => Color::Yellow,
            Paint::Red => Color::Red,
            Paint::Green => Color::Green,
        }
    }

    pub fn to_crossterm(self) -> crossterm::style::Color {
        use crossterm::style::Color as C;
        match self {
            Paint::White => C::White,
            Paint::Black => C::Black,
            Paint::Blue => C::DarkBlue,
            Paint::Yellow => C::DarkYellow,
            Paint::Red => C::DarkRed,
            Paint::Green => C::DarkGreen,
        }
    }
}

/// Concrete look of a cell after the attribute was resolved against the
/// terminal's color capability.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct Look {
    pub fg: Option<Paint>,
    pub bg: Option<Paint>,
    pub bold: bool,
    pub reverse: bool,
}

impl Look {
    pub fn to_style(self) -> Style {
        let mut style = Style::default();
        if let Some(fg) = self.fg {
            style = style.fg(fg.to_ratatui());
        }
        if let Some(bg) = self.bg {
            style = style.bg(bg.to_ratatui());
        }
        if self.bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.reverse {
            style = style.add_modifier(Modifier::REVERSED);
        }
        style
    }

    pub fn is_plain(&self) -> bool {
        *self == Look::default()
    }
}

/// The current drawing attribute of a region.
///
/// `set` switches the attribute and adds modifiers; `clear` drops the named
/// attribute (if it is the active one) and removes the given modifiers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct Pen {
    attr: Attr,
    bold: bool,
    reverse: bool,
}

impl Pen {
    pub fn set(&mut self, attr: Attr, bold: bool, reverse: bool) {
        self.attr = attr;
        self.bold |= bold;
        self.reverse |= reverse;
    }

    pub fn clear(&mut self, attr: Attr, bold: bool, reverse: bool) {
        if self.attr == attr {
            self.attr = Attr::Normal;
        }
        if bold {
            self.bold = false;
        }
        if reverse {
            self.reverse = false;
        }
    }

    pub fn attr(&self) -> Attr {
        self.attr
    }

    /// Resolves the pen. Without color support every named attribute falls
    /// back to reverse video and/or bold.
    pub fn look(&self, colors: bool) -> Look {
        let mut look = Look {
            fg: None,
            bg: None,
            bold: self.bold,
            reverse: self.reverse,
        };
        match (self.attr, colors) {
            (Attr::Normal, _) => {}
            (Attr::StatusBar, true) => {
                look.fg = Some(Paint::White);
                look.bg = Some(Paint::Blue);
            }
            (Attr::Selected, true) => {
                look.fg = Some(Paint::Black);
                look.bg = Some(Paint::Yellow);
            }
            (Attr::Error, true) => {
                look.fg = Some(Paint::White);
                look.bg = Some(Paint::Red);
            }
            (Attr::Directory, true) => look.fg = Some(Paint::Green),
            (Attr::StatusBar | Attr::Selected, false) => look.reverse = true,
            (Attr::Error, false) => {
                look.reverse = true;
                look.bold = true;
            }
            (Attr::Directory, false) => look.bold = true,
        }
        look
    }
}

/// The part of `area` that is still on a screen of `screen` cells.
pub fn visible_area(area: Rect, screen: Size) -> Rect {
    area.intersection(Rect::new(0, 0, screen.width, screen.height))
}

/// Cuts `text` so it occupies at most `max_width` cells.
///
/// Control characters are replaced by `.` so they never reach the terminal.
pub fn clip_to_width(text: &str, max_width: usize) -> String {
    let mut out = String::with_capacity(text.len().min(max_width * 4));
    let mut used = 0;
    for ch in text.chars() {
        let ch = if ch.is_control() { '.' } else { ch };
        let w = ch.width().unwrap_or(0);
        if used + w > max_width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out
}
