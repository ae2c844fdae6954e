//! Screen partitioning for quickview.
//!
//! The screen is split into four regions: the directory list on the left,
//! the content pane on the right, the info pane below the content pane and a
//! one-row status bar along the bottom. [compute_layout] is pure; the
//! [ScreenLayout] owns the backend regions created from it.

use crate::screen::{RegionId, ScreenBackend};

use ratatui::layout::{Rect, Size};

/// Rows of the directory list taken by border, title, path and rule.
pub const LIST_CHROME_ROWS: u16 = 4;
/// Rows of the content pane taken by border, title, rule and footer.
pub const CONTENT_CHROME_ROWS: u16 = 5;

/// Percentage of the usable height given to the info pane.
const INFO_PERCENT: u16 = 10;

/// The four rectangles of the interface.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LayoutAreas {
    pub list: Rect,
    pub content: Rect,
    pub info: Rect,
    pub status: Rect,
}

/// Splits a screen of `size` cells into the four panes.
///
/// Zero sizes are treated as one cell so a collapsed terminal still yields
/// a valid (if useless) layout.
pub fn compute_layout(size: Size) -> LayoutAreas {
    let width = size.width.max(1);
    let height = size.height.max(1);

    let available = height - 1;
    let dir_width = width / 4;
    let right_width = width - dir_width;
    let info_height = ((available as u32 * INFO_PERCENT as u32) / 100) as u16;
    let content_height = available - info_height;

    LayoutAreas {
        list: Rect::new(0, 0, dir_width, available),
        content: Rect::new(dir_width, 0, right_width, content_height),
        info: Rect::new(dir_width, content_height, right_width, info_height),
        status: Rect::new(0, available, width, 1),
    }
}

/// A backend region and the rectangle it was created with.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Region {
    pub id: RegionId,
    pub area: Rect,
}

impl Region {
    fn create(screen: &mut dyn ScreenBackend, area: Rect) -> Self {
        let id = screen.create_region(area.height, area.width, area.y, area.x);
        Self { id, area }
    }
}

/// The live regions of the interface.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ScreenLayout {
    pub list: Region,
    pub content: Region,
    pub info: Region,
    pub status: Region,
}

impl ScreenLayout {
    /// Creates the four regions for a screen of `size`.
    pub fn create(screen: &mut dyn ScreenBackend, size: Size) -> Self {
        let areas = compute_layout(size);
        let layout = Self {
            list: Region::create(screen, areas.list),
            content: Region::create(screen, areas.content),
            info: Region::create(screen, areas.info),
            status: Region::create(screen, areas.status),
        };
        log::debug!("layout created for {}x{}: {:?}", size.width, size.height, areas);
        layout
    }

    /// Destroys all four regions. The handles are dead afterwards.
    pub fn destroy(self, screen: &mut dyn ScreenBackend) {
        for region in self.regions() {
            screen.destroy_region(region.id);
        }
    }

    /// Destroys this layout and creates a fresh one for `size`.
    pub fn rebuild(self, screen: &mut dyn ScreenBackend, size: Size) -> Self {
        self.destroy(screen);
        Self::create(screen, size)
    }

    /// Regions in drawing order.
    pub fn regions(&self) -> [Region; 4] {
        [self.list, self.content, self.info, self.status]
    }

    pub fn areas(&self) -> LayoutAreas {
        LayoutAreas {
            list: self.list.area,
            content: self.content.area,
            info: self.info.area,
            status: self.status.area,
        }
    }

    /// Number of entries the directory list can show.
    pub fn list_viewport(&self) -> usize {
        self.list.area.height.saturating_sub(LIST_CHROME_ROWS).max(1) as usize
    }

    /// Number of text lines the content pane can show in file view.
    pub fn content_viewport(&self) -> usize {
        self.content
            .area
            .height
            .saturating_sub(CONTENT_CHROME_ROWS)
            .max(1) as usize
    }
}
