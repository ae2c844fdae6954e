//! Filesystem side of quickview.
//!
//! - [fm]: directory entries, listing, sorting and directory previews.
//! - [content]: loading text files for the file viewer.
//! - [image]: image detection and the external viewer.

pub mod content;
pub mod fm;
pub mod image;

pub use content::{ContentError, ContentLimits, TextBuffer, load_text_file};
pub use fm::{
    DirPreview, DirectoryEntry, EntryKind, Listing, browse_dir, load_directory, preview_directory,
    sort_entries,
};
pub use image::{ImageViewer, SystemViewer, is_image_file};
