//! Image detection and the external image viewer.
//!
//! Images are never rendered in the terminal. They are handed to whatever
//! viewer the host provides, started detached with its output discarded.
//! Viewers are never waited for; finished ones are collected by [ImageViewer::reap].

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

/// Extensions treated as images, lower case and without the dot.
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "bmp", "tiff", "tif", "webp", "svg", "ico", "ppm", "pgm", "pbm",
    "xpm", "pcx", "tga",
];

/// Viewers tried in order on Linux and other Unix systems.
#[cfg(all(unix, not(target_os = "macos")))]
const UNIX_VIEWERS: &[&str] = &["xdg-open", "eog", "feh", "display", "gwenview", "ristretto"];

/// True if the extension of `path` is a known image extension, in any case.
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

/// Something that can show an image outside the terminal.
pub trait ImageViewer {
    /// Starts the viewer and returns without waiting for it.
    fn open(&mut self, path: &Path) -> io::Result<()>;

    /// Collects viewers that have exited. Never blocks.
    fn reap(&mut self) {}
}

/// The host's default image viewer.
#[derive(Debug, Default)]
pub struct SystemViewer {
    program: Option<PathBuf>,
    running: Vec<Child>,
}

impl SystemViewer {
    /// Looks up the viewer program once. Nothing is spawned here.
    pub fn detect() -> Self {
        let program = Self::find_program();
        match &program {
            Some(p) => log::debug!("image viewer: {}", p.display()),
            None => log::warn!("no image viewer found"),
        }
        Self {
            program,
            running: Vec::new(),
        }
    }

    /// Viewer processes started but not yet collected.
    #[inline]
    pub fn running(&self) -> usize {
        self.running.len()
    }

    #[inline]
    pub fn program(&self) -> Option<&Path> {
        self.program.as_deref()
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    fn find_program() -> Option<PathBuf> {
        UNIX_VIEWERS.iter().find_map(|name| which::which(name).ok())
    }

    #[cfg(target_os = "macos")]
    fn find_program() -> Option<PathBuf> {
        which::which("open").ok()
    }

    #[cfg(windows)]
    fn find_program() -> Option<PathBuf> {
        which::which("cmd").ok()
    }

    #[cfg(not(any(unix, windows)))]
    fn find_program() -> Option<PathBuf> {
        None
    }

    #[cfg(windows)]
    fn command(program: &Path, image: &Path) -> Command {
        let mut cmd = Command::new(program);
        cmd.args(["/C", "start", ""]).arg(image);
        cmd
    }

    #[cfg(not(windows))]
    fn command(program: &Path, image: &Path) -> Command {
        let mut cmd = Command::new(program);
        cmd.arg(image);
        cmd
    }
}

impl ImageViewer for SystemViewer {
    fn open(&mut self, path: &Path) -> io::Result<()> {
        let program = self.program.as_deref().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "no image viewer available")
        })?;
        let child = Self::command(program, path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        log::info!(
            "launched {} for {} (pid {})",
            program.display(),
            path.display(),
            child.id()
        );
        self.running.push(child);
        self.reap();
        Ok(())
    }

    fn reap(&mut self) {
        self.running.retain_mut(|child| match child.try_wait() {
            Ok(Some(status)) => {
                log::debug!("viewer {} exited: {}", child.id(), status);
                false
            }
            Ok(None) => true,
            Err(e) => {
                log::warn!("cannot check viewer {}: {}", child.id(), e);
                false
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extensions_are_case_insensitive() {
        assert!(is_image_file(Path::new("photo.JPG")));
        assert!(is_image_file(Path::new("/a/b/icon.Svg")));
        assert!(is_image_file(Path::new("scan.tif")));
        assert!(!is_image_file(Path::new("notes.txt")));
        assert!(!is_image_file(Path::new("png")));
        assert!(!is_image_file(Path::new(".png.bak")));
    }

    #[test]
    fn missing_viewer_is_an_error() {
        let mut viewer = SystemViewer::default();
        let err = viewer.open(Path::new("x.png")).err().map(|e| e.kind());
        assert_eq!(err, Some(io::ErrorKind::NotFound));
    }

    #[cfg(unix)]
    #[test]
    fn finished_viewers_are_collected() -> Result<(), Box<dyn std::error::Error>> {
        let mut viewer = SystemViewer {
            program: Some(which::which("true")?),
            running: Vec::new(),
        };
        for _ in 0..3 {
            viewer.open(Path::new("x.png"))?;
        }
        for _ in 0..100 {
            viewer.reap();
            if viewer.running() == 0 {
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(20));
        }
        assert_eq!(viewer.running(), 0);
        Ok(())
    }
}
