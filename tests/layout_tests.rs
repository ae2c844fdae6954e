//! Layout tests for quickview
//!
//! Checks the four-region split and region recreation against a ratatui
//! test backend.

use quickview_tui::screen::{BufferedScreen, Key, ScreenBackend};
use quickview_tui::ui::{ScreenLayout, compute_layout};

use ratatui::backend::TestBackend;
use ratatui::layout::{Rect, Size};
use std::collections::VecDeque;
use std::error;

type TestScreen = BufferedScreen<TestBackend, VecDeque<Key>>;

fn screen(width: u16, height: u16) -> Result<TestScreen, Box<dyn error::Error>> {
    Ok(BufferedScreen::new(
        TestBackend::new(width, height),
        VecDeque::new(),
        true,
    )?)
}

#[test]
fn test_layout_matches_reference_geometry() {
    let areas = compute_layout(Size::new(120, 40));
    assert_eq!(areas.list, Rect::new(0, 0, 30, 39));
    assert_eq!(areas.content, Rect::new(30, 0, 90, 36));
    assert_eq!(areas.info, Rect::new(30, 36, 90, 3));
    assert_eq!(areas.status, Rect::new(0, 39, 120, 1));
}

#[test]
fn test_layout_never_panics_on_small_screens() {
    for width in 0..12 {
        for height in 0..8 {
            let areas = compute_layout(Size::new(width, height));
            assert_eq!(areas.status.height, 1);
            assert_eq!(areas.status.y, height.max(1) - 1);
        }
    }
}

#[test]
fn test_rebuild_replaces_all_regions() -> Result<(), Box<dyn error::Error>> {
    let mut s = screen(80, 24)?;
    let layout = ScreenLayout::create(&mut s, Size::new(80, 24));
    assert_eq!(s.region_count(), 4);
    assert_eq!(layout.list_viewport(), 19);
    assert_eq!(layout.content_viewport(), 16);

    let old = layout.regions();
    s.terminal_mut().backend_mut().resize(40, 10);
    let size = s.screen_size()?;
    let layout = layout.rebuild(&mut s, size);

    assert_eq!(s.region_count(), 4);
    for region in old {
        assert_eq!(s.region_size(region.id), Size::new(0, 0));
    }
    assert_eq!(layout.areas(), compute_layout(Size::new(40, 10)));
    assert_eq!(layout.list_viewport(), 5);
    assert_eq!(layout.content_viewport(), 4);

    layout.destroy(&mut s);
    assert_eq!(s.region_count(), 0);
    Ok(())
}

#[test]
fn test_viewports_are_at_least_one_row() -> Result<(), Box<dyn error::Error>> {
    let mut s = screen(3, 2)?;
    let layout = ScreenLayout::create(&mut s, Size::new(3, 2));
    assert_eq!(layout.list_viewport(), 1);
    assert_eq!(layout.content_viewport(), 1);
    Ok(())
}
