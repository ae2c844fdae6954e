//! Application layer of quickview.
//!
//! - [controller]: the [App] that owns the screen, the layout and the state
//!   and runs the key loop.
//! - [handlers]: what each command does to the state.
//! - [mode] and [keymap]: display modes and key routing.
//! - [nav] and [pager]: selection and scroll engines.
//! - [state]: the [AppState] shared with the renderers.

pub mod controller;
pub mod handlers;
pub mod keymap;
pub mod mode;
pub mod nav;
pub mod pager;
pub mod state;

pub use controller::{App, KeypressResult};
pub use keymap::{Command, Keymap, ScrollCommand};
pub use mode::{Dispatch, DisplayMode, dispatch};
pub use nav::ListView;
pub use pager::PagedView;
pub use state::{AppState, DEFAULT_HINT, Preview};
