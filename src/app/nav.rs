//! Selection and scroll state of the directory list.
//!
//! [ListView] keeps a selected index and a scroll offset over a list of `len`
//! entries shown `viewport` rows at a time. After every operation on a
//! non-empty list the selection is visible and the offset never scrolls past
//! the last full page:
//!
//! `offset <= selected < offset + viewport` and `offset <= len - viewport`.

/// Selection and scroll offset of a list.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ListView {
    selected: usize,
    offset: usize,
    len: usize,
    viewport: usize,
}

impl Default for ListView {
    fn default() -> Self {
        Self::new(1)
    }
}

impl ListView {
    pub fn new(viewport: usize) -> Self {
        Self {
            selected: 0,
            offset: 0,
            len: 0,
            viewport: viewport.max(1),
        }
    }

    #[inline]
    pub fn selected(&self) -> usize {
        self.selected
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn viewport(&self) -> usize {
        self.viewport
    }

    /// Largest offset that still fills the viewport.
    #[inline]
    pub fn max_offset(&self) -> usize {
        self.len.saturating_sub(self.viewport)
    }

    /// Index range of the rows currently on screen.
    pub fn visible(&self) -> std::ops::Range<usize> {
        self.offset..self.len.min(self.offset + self.viewport)
    }

    /// Starts over with a freshly loaded list of `len` entries.
    pub fn reset(&mut self, len: usize) {
        self.len = len;
        self.selected = 0;
        self.offset = 0;
    }

    /// Changes the entry count in place, keeping the selection where it can.
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        self.settle();
    }

    /// Changes the number of visible rows. Zero counts as one.
    pub fn set_viewport(&mut self, viewport: usize) {
        self.viewport = viewport.max(1);
        self.settle();
    }

    pub fn step_up(&mut self) -> bool {
        self.apply(|v| v.selected = v.selected.saturating_sub(1))
    }

    pub fn step_down(&mut self) -> bool {
        self.apply(|v| v.selected = (v.selected + 1).min(v.len - 1))
    }

    pub fn page_up(&mut self) -> bool {
        self.apply(|v| {
            v.selected = v.selected.saturating_sub(v.viewport);
            v.offset = v.selected;
        })
    }

    pub fn page_down(&mut self) -> bool {
        self.apply(|v| {
            v.selected = (v.selected + v.viewport).min(v.len - 1);
            v.offset = (v.selected + 1).saturating_sub(v.viewport);
        })
    }

    pub fn home(&mut self) -> bool {
        self.apply(|v| {
            v.selected = 0;
            v.offset = 0;
        })
    }

    pub fn end(&mut self) -> bool {
        self.apply(|v| {
            v.selected = v.len - 1;
            v.offset = v.max_offset();
        })
    }

    /// Runs `op` on a non-empty list, restores the invariant and reports
    /// whether anything changed.
    fn apply(&mut self, op: impl FnOnce(&mut Self)) -> bool {
        if self.len == 0 {
            return false;
        }
        let before = (self.selected, self.offset);
        op(self);
        self.settle();
        before != (self.selected, self.offset)
    }

    /// Pulls selection and offset back into range. The selection wins over
    /// the offset when they disagree.
    fn settle(&mut self) {
        if self.len == 0 {
            self.selected = 0;
            self.offset = 0;
            return;
        }
        self.selected = self.selected.min(self.len - 1);
        if self.offset > self.selected {
            self.offset = self.selected;
        }
        if self.selected >= self.offset + self.viewport {
            self.offset = self.selected + 1 - self.viewport;
        }
        self.offset = self.offset.min(self.max_offset());
    }
}
