//! Rendering for quickview.
//!
//! - [layout]: splitting the screen into the four regions.
//! - [render]: the top-level [draw_interface] entry point.
//! - [panes]: directory list, content preview, info pane and status bar.
//! - [pages]: help, about and file view pages of the content pane.
//!
//! Renderers only read the [AppState](crate::app::AppState) and talk to the
//! terminal through [ScreenBackend](crate::screen::ScreenBackend).

pub mod layout;
pub mod pages;
pub mod panes;
pub mod render;

pub use layout::{LayoutAreas, Region, ScreenLayout, compute_layout};
pub use render::draw_interface;
