//! Loading text files for the file viewer.
//!
//! Files are read line by line into a [TextBuffer] of display-ready lines.
//! Limits on byte size and line count come from [ContentLimits].

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Spaces a tab expands to.
const TAB_WIDTH: usize = 4;

/// Upper bounds for loading a file into the viewer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ContentLimits {
    pub max_bytes: u64,
    pub max_lines: usize,
}

impl Default for ContentLimits {
    fn default() -> Self {
        Self {
            max_bytes: 10 * 1024 * 1024,
            max_lines: 10_000,
        }
    }
}

/// Why a file could not be shown.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("not a regular file")]
    NotRegularFile,
    #[error("file is {size} bytes, limit is {limit}")]
    TooLarge { size: u64, limit: u64 },
    #[error("cannot open file: {0}")]
    Unreadable(#[source] io::Error),
    #[error("{0}")]
    Read(#[source] io::Error),
}

impl ContentError {
    /// One-line message for the status bar.
    pub fn status_message(&self) -> String {
        match self {
            ContentError::NotRegularFile => "Cannot view: not a regular file".to_string(),
            ContentError::TooLarge { limit, .. } => format!(
                "Error: File too large to view (>{})",
                humansize::format_size(*limit, humansize::BINARY)
            ),
            ContentError::Unreadable(_) => "Error: Cannot open file".to_string(),
            ContentError::Read(e) => format!("Error reading file: {e}"),
        }
    }
}

/// Display-ready lines of a text file.
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    path: PathBuf,
    lines: Vec<String>,
    truncated: bool,
}

impl TextBuffer {
    pub fn from_lines(path: PathBuf, lines: Vec<String>, truncated: bool) -> Self {
        Self {
            path,
            lines,
            truncated,
        }
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// True when the file had more lines than the limit. The last line is
    /// then the truncation notice.
    #[inline]
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Decodes one raw line. Each invalid UTF-8 sequence becomes a single `.`.
fn decode_line(raw: &[u8]) -> String {
    let mut out = String::with_capacity(raw.len());
    for chunk in raw.utf8_chunks() {
        out.push_str(chunk.valid());
        if !chunk.invalid().is_empty() {
            out.push('.');
        }
    }
    out
}

/// Makes one raw line printable: tabs become spaces, other control
/// characters become `.`.
pub fn sanitize_line(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '\t' => out.extend(std::iter::repeat_n(' ', TAB_WIDTH)),
            c if c.is_control() => out.push('.'),
            c => out.push(c),
        }
    }
    out
}

/// Reads `path` into a [TextBuffer].
///
/// Symlinks are followed. Invalid UTF-8 becomes `.`, line endings (`\n` or
/// `\r\n`) are stripped. When the file has more than `max_lines` lines the
/// rest is dropped and a notice line is appended.
pub fn load_text_file(path: &Path, limits: ContentLimits) -> Result<TextBuffer, ContentError> {
    let meta = fs::metadata(path).map_err(ContentError::Unreadable)?;
    if !meta.is_file() {
        return Err(ContentError::NotRegularFile);
    }
    if meta.len() > limits.max_bytes {
        return Err(ContentError::TooLarge {
            size: meta.len(),
            limit: limits.max_bytes,
        });
    }

    let file = File::open(path).map_err(ContentError::Unreadable)?;
    let mut reader = BufReader::new(file);
    let mut lines = Vec::new();
    let mut raw = Vec::new();

    while lines.len() < limits.max_lines {
        raw.clear();
        let n = reader.read_until(b'\n', &mut raw).map_err(ContentError::Read)?;
        if n == 0 {
            break;
        }
        if raw.last() == Some(&b'\n') {
            raw.pop();
            if raw.last() == Some(&b'\r') {
                raw.pop();
            }
        }
        lines.push(sanitize_line(&decode_line(&raw)));
    }

    let truncated = !reader.fill_buf().map_err(ContentError::Read)?.is_empty();
    if truncated {
        lines.push(format!(
            "... (file truncated at {} lines)",
            limits.max_lines
        ));
    }
    log::debug!(
        "loaded {} ({} lines, truncated: {})",
        path.display(),
        lines.len(),
        truncated
    );

    Ok(TextBuffer::from_lines(path.to_path_buf(), lines, truncated))
}
