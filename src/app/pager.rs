//! Scroll state of the file viewer.
//!
//! Unlike [ListView](crate::app::nav::ListView) there is no selection, only a
//! top line. The offset always stays within `0..=max(0, len - viewport)`.

/// Top line of a paged text view.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PagedView {
    offset: usize,
    len: usize,
    viewport: usize,
}

impl Default for PagedView {
    fn default() -> Self {
        Self::new(1)
    }
}

impl PagedView {
    pub fn new(viewport: usize) -> Self {
        Self {
            offset: 0,
            len: 0,
            viewport: viewport.max(1),
        }
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

    #[inline]
    pub fn max_offset(&self) -> usize {
        self.len.saturating_sub(self.viewport)
    }

    /// Line indices currently on screen.
    pub fn visible(&self) -> std::ops::Range<usize> {
        self.offset..self.len.min(self.offset + self.viewport)
    }

    #[inline]
    pub fn at_top(&self) -> bool {
        self.offset == 0
    }

    #[inline]
    pub fn at_end(&self) -> bool {
        self.offset >= self.max_offset()
    }

    /// Starts a new text of `len` lines at the top.
    pub fn reset(&mut self, len: usize) {
        self.len = len;
        self.offset = 0;
    }

    /// Changes the number of visible lines. Zero counts as one.
    pub fn set_viewport(&mut self, viewport: usize) {
        self.viewport = viewport.max(1);
        self.offset = self.offset.min(self.max_offset());
    }

    pub fn line_up(&mut self) -> bool {
        self.scroll_to(self.offset.saturating_sub(1))
    }

    pub fn line_down(&mut self) -> bool {
        self.scroll_to(self.offset.saturating_add(1))
    }

    pub fn page_up(&mut self) -> bool {
        self.scroll_to(self.offset.saturating_sub(self.viewport))
    }

    pub fn page_down(&mut self) -> bool {
        self.scroll_to(self.offset.saturating_add(self.viewport))
    }

    pub fn home(&mut self) -> bool {
        self.scroll_to(0)
    }

    pub fn end(&mut self) -> bool {
        self.scroll_to(self.max_offset())
    }

    /// Moves to `target` clamped to the valid range; true if the offset changed.
    fn scroll_to(&mut self, target: usize) -> bool {
        let target = target.min(self.max_offset());
        let moved = target != self.offset;
        self.offset = target;
        moved
    }
}
