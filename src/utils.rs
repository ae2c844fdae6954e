//! Miscellaneous utilities for quickview.
//!
//! - [cli]: argument parsing and logger setup.
//! - [helpers]: text shortening, size/time formatting and home path display.

pub mod cli;
pub mod helpers;

pub use helpers::{
    display_name, ellipsize_end, ellipsize_middle, ellipsize_start, format_file_size,
    format_file_time, shorten_home_path,
};
