//! Directory browsing for quickview.
//!
//! Provides [DirectoryEntry], the directory enumeration used by the list and
//! by the directory preview, and the ordering shared by both: directories
//! first, then names compared case-insensitively.

use std::fs::{self, Metadata};
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Name shown for the synthetic parent entry.
pub const PARENT_NAME: &str = "..";

/// What a directory entry is, without following symlinks.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
    Symlink,
    Other,
}

/// One entry of a directory listing, captured when the directory was read.
#[derive(Debug, Clone)]
pub struct DirectoryEntry {
    path: PathBuf,
    name: String,
    flags: u8,
    size: Option<u64>,
    modified: Option<SystemTime>,
}

impl DirectoryEntry {
    const IS_DIR: u8 = 1 << 0;
    const IS_FILE: u8 = 1 << 1;
    const IS_SYMLINK: u8 = 1 << 2;
    const IS_PARENT: u8 = 1 << 3;

    /// Reads the entry at `path`. Symlinks keep their own kind but remember
    /// whether they resolve to a directory or a regular file.
    pub fn from_path(path: PathBuf) -> io::Result<Self> {
        let link_meta = fs::symlink_metadata(&path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());

        let mut flags = 0u8;
        let target = if link_meta.file_type().is_symlink() {
            flags |= Self::IS_SYMLINK;
            fs::metadata(&path).ok()
        } else {
            Some(link_meta)
        };
        flags |= Self::target_flags(target.as_ref());

        Ok(Self {
            name,
            flags,
            size: target.as_ref().filter(|m| m.is_file()).map(Metadata::len),
            modified: target.as_ref().and_then(|m| m.modified().ok()),
            path,
        })
    }

    /// The `..` entry pointing at `parent`.
    pub fn parent_link(parent: &Path) -> Self {
        Self {
            path: parent.to_path_buf(),
            name: PARENT_NAME.to_string(),
            flags: Self::IS_DIR | Self::IS_PARENT,
            size: None,
            modified: None,
        }
    }

    fn target_flags(meta: Option<&Metadata>) -> u8 {
        match meta {
            Some(m) if m.is_dir() => Self::IS_DIR,
            Some(m) if m.is_file() => Self::IS_FILE,
            _ => 0,
        }
    }

    // Accessors

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn size(&self) -> Option<u64> {
        self.size
    }

    #[inline]
    pub fn modified(&self) -> Option<SystemTime> {
        self.modified
    }

    pub fn kind(&self) -> EntryKind {
        if self.flags & Self::IS_SYMLINK != 0 {
            EntryKind::Symlink
        } else if self.flags & Self::IS_DIR != 0 {
            EntryKind::Directory
        } else if self.flags & Self::IS_FILE != 0 {
            EntryKind::File
        } else {
            EntryKind::Other
        }
    }

    /// True for directories and for symlinks that resolve to one.
    #[inline]
    pub fn is_dir(&self) -> bool {
        self.flags & Self::IS_DIR != 0
    }

    /// True for regular files and for symlinks that resolve to one.
    #[inline]
    pub fn is_regular_file(&self) -> bool {
        self.flags & Self::IS_FILE != 0
    }

    #[inline]
    pub fn is_symlink(&self) -> bool {
        self.flags & Self::IS_SYMLINK != 0
    }

    #[inline]
    pub fn is_parent_link(&self) -> bool {
        self.flags & Self::IS_PARENT != 0
    }

    /// Lower-cased extension with its dot, if any.
    pub fn extension(&self) -> Option<String> {
        if self.is_parent_link() {
            return None;
        }
        self.path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
    }
}

/// Result of loading a directory for the list.
#[derive(Debug, Clone)]
pub struct Listing {
    pub entries: Vec<DirectoryEntry>,
    pub status: String,
}

/// First entries of a directory plus counts over the whole directory.
#[derive(Debug, Clone, Default)]
pub struct DirPreview {
    entries: Vec<DirectoryEntry>,
    total: usize,
    dirs: usize,
    files: usize,
}

impl DirPreview {
    #[inline]
    pub fn entries(&self) -> &[DirectoryEntry] {
        &self.entries
    }

    #[inline]
    pub fn total(&self) -> usize {
        self.total
    }

    #[inline]
    pub fn dirs(&self) -> usize {
        self.dirs
    }

    #[inline]
    pub fn files(&self) -> usize {
        self.files
    }
}

/// Reads the entries of `path` in enumeration order.
///
/// Entries that fail to read are skipped.
pub fn browse_dir(path: &Path) -> io::Result<Vec<DirectoryEntry>> {
    let mut entries = Vec::with_capacity(256);
    for entry in fs::read_dir(path)? {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                log::debug!("skipping unreadable entry in {}: {}", path.display(), e);
                continue;
            }
        };
        match DirectoryEntry::from_path(entry.path()) {
            Ok(e) => entries.push(e),
            Err(e) => log::debug!("skipping {}: {}", entry.path().display(), e),
        }
    }
    Ok(entries)
}

/// Directories first, then by case-insensitive name. Stable.
pub fn sort_entries(entries: &mut [DirectoryEntry]) {
    entries.sort_by_cached_key(|e| (!e.is_dir(), e.name().to_lowercase()));
}

/// Loads `path` for the directory list.
///
/// The result starts with a `..` entry whenever `path` has a parent. If the
/// directory cannot be read only that entry remains and the status carries
/// the error.
pub fn load_directory(path: &Path) -> Listing {
    let mut entries = Vec::new();
    if let Some(parent) = path.parent() {
        entries.push(DirectoryEntry::parent_link(parent));
    }

    match browse_dir(path) {
        Ok(mut found) => {
            sort_entries(&mut found);
            let count = found.len();
            entries.append(&mut found);
            log::info!("loaded {} ({} entries)", path.display(), count);
            Listing {
                entries,
                status: format!("Loaded {count} entries"),
            }
        }
        Err(e) => {
            log::warn!("error loading directory {}: {}", path.display(), e);
            Listing {
                entries,
                status: format!("Error loading directory: {e}"),
            }
        }
    }
}

/// Reads up to `cap` entries of `path` for a preview, sorted like the list.
/// Counts cover every entry of the directory.
pub fn preview_directory(path: &Path, cap: usize) -> io::Result<DirPreview> {
    let mut preview = DirPreview::default();
    for entry in browse_dir(path)? {
        preview.total += 1;
        if entry.is_dir() {
            preview.dirs += 1;
        } else {
            preview.files += 1;
        }
        if preview.entries.len() < cap {
            preview.entries.push(entry);
        }
    }
    sort_entries(&mut preview.entries);
    Ok(preview)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    #[test]
    fn parent_link_is_a_directory() {
        let p = DirectoryEntry::parent_link(Path::new("/tmp"));
        assert!(p.is_dir());
        assert!(p.is_parent_link());
        assert_eq!(p.name(), "..");
        assert_eq!(p.kind(), EntryKind::Directory);
        assert_eq!(p.extension(), None);
    }

    #[test]
    fn entry_kinds() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = TempDir::new()?;
        let file = tmp.path().join("Notes.TXT");
        fs::write(&file, "hello")?;
        fs::create_dir(tmp.path().join("sub"))?;

        let f = DirectoryEntry::from_path(file)?;
        assert_eq!(f.kind(), EntryKind::File);
        assert_eq!(f.size(), Some(5));
        assert_eq!(f.extension().as_deref(), Some(".txt"));
        assert!(f.is_regular_file());

        let d = DirectoryEntry::from_path(tmp.path().join("sub"))?;
        assert_eq!(d.kind(), EntryKind::Directory);
        assert_eq!(d.size(), None);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn symlink_to_directory_sorts_with_directories() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = TempDir::new()?;
        fs::create_dir(tmp.path().join("real"))?;
        File::create(tmp.path().join("a_file"))?;
        std::os::unix::fs::symlink(tmp.path().join("real"), tmp.path().join("z_link"))?;

        let mut entries = browse_dir(tmp.path())?;
        sort_entries(&mut entries);
        let names: Vec<_> = entries.iter().map(|e| e.name()).collect();
        assert_eq!(names, ["real", "z_link", "a_file"]);
        assert_eq!(entries[1].kind(), EntryKind::Symlink);
        assert!(entries[1].is_dir());
        Ok(())
    }

    #[test]
    fn load_directory_puts_parent_first() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = TempDir::new()?;
        File::create(tmp.path().join("b.txt"))?;
        fs::create_dir(tmp.path().join("A"))?;

        let listing = load_directory(tmp.path());
        assert_eq!(listing.status, "Loaded 2 entries");
        let names: Vec<_> = listing.entries.iter().map(|e| e.name()).collect();
        assert_eq!(names, ["..", "A", "b.txt"]);
        assert_eq!(Some(listing.entries[0].path()), tmp.path().parent());
        Ok(())
    }

    #[test]
    fn missing_directory_reports_error() {
        let listing = load_directory(Path::new("/path/does/not/exist"));
        assert!(listing.status.starts_with("Error loading directory: "));
        assert_eq!(listing.entries.len(), 1);
        assert!(listing.entries[0].is_parent_link());
    }

    #[test]
    fn preview_caps_entries_but_counts_all() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = TempDir::new()?;
        for i in 0..12 {
            File::create(tmp.path().join(format!("f{i:02}")))?;
        }
        for i in 0..3 {
            fs::create_dir(tmp.path().join(format!("d{i}")))?;
        }
        let preview = preview_directory(tmp.path(), 5)?;
        assert_eq!(preview.entries().len(), 5);
        assert_eq!(preview.total(), 15);
        assert_eq!((preview.dirs(), preview.files()), (3, 12));
        Ok(())
    }
}
