//! Navigation tests for quickview
//!
//! Exercises the list and pager engines with random command sequences and
//! checks the directory ordering on real temporary directories.

use quickview_tui::app::{ListView, PagedView};
use quickview_tui::core::{DirectoryEntry, browse_dir, load_directory, sort_entries};

use rand::Rng;
use std::error;
use std::fs::{self, File};
use tempfile::tempdir;

fn assert_list_invariant(view: &ListView, context: &str) {
    if view.is_empty() {
        assert_eq!((view.selected(), view.offset()), (0, 0), "{context}");
        return;
    }
    assert!(view.offset() <= view.selected(), "{context}: offset past selection");
    assert!(
        view.selected() < view.offset() + view.viewport(),
        "{context}: selection below the viewport"
    );
    assert!(
        view.offset() <= view.len().saturating_sub(view.viewport()),
        "{context}: offset past the last page"
    );
    assert!(view.selected() < view.len(), "{context}: selection out of range");
}

#[test]
fn test_list_random_operations_keep_invariant() {
    let mut rng = rand::rng();
    for _ in 0..200 {
        let len = rng.random_range(1..80);
        let viewport = rng.random_range(0..25);
        let mut view = ListView::new(viewport);
        view.reset(len);

        for step in 0..300 {
            match rng.random_range(0..9) {
                0 => {
                    view.step_up();
                }
                1 => {
                    view.step_down();
                }
                2 => {
                    view.page_up();
                }
                3 => {
                    view.page_down();
                }
                4 => {
                    view.home();
                }
                5 => {
                    view.end();
                }
                6 => view.set_viewport(rng.random_range(0..30)),
                7 => view.set_len(rng.random_range(1..80)),
                _ => {
                    view.step_down();
                    view.step_down();
                }
            }
            assert_list_invariant(&view, &format!("len {len}, step {step}"));
        }
    }
}

#[test]
fn test_list_home_and_end() {
    for (len, viewport) in [(1, 1), (5, 10), (10, 10), (11, 10), (100, 7)] {
        let mut view = ListView::new(viewport);
        view.reset(len);
        view.end();
        assert_eq!(
            (view.selected(), view.offset()),
            (len - 1, len.saturating_sub(viewport))
        );
        view.home();
        assert_eq!((view.selected(), view.offset()), (0, 0));
    }
}

#[test]
fn test_pager_random_operations_stay_in_range() {
    let mut rng = rand::rng();
    for _ in 0..200 {
        let len = rng.random_range(0..500);
        let mut pager = PagedView::new(rng.random_range(0..40));
        pager.reset(len);
        for _ in 0..200 {
            match rng.random_range(0..7) {
                0 => pager.line_up(),
                1 => pager.line_down(),
                2 => pager.page_up(),
                3 => pager.page_down(),
                4 => pager.home(),
                5 => pager.end(),
                _ => {
                    pager.set_viewport(rng.random_range(0..40));
                    false
                }
            };
            assert!(pager.offset() <= pager.len().saturating_sub(pager.viewport()));
        }
    }
}

#[test]
fn test_sort_mixed_case_dirs_first() -> Result<(), Box<dyn error::Error>> {
    let dir = tempdir()?;
    for name in ["beta", "Alpha", "delta", "Charlie", "echo", "Foxtrot"] {
        fs::create_dir(dir.path().join(name))?;
    }
    for name in ["zulu.txt", "Apple.md", "banana.rs", "Cherry"] {
        File::create(dir.path().join(name))?;
    }

    let listing = load_directory(dir.path());
    assert_eq!(listing.status, "Loaded 10 entries");

    let names: Vec<&str> = listing.entries.iter().map(|e| e.name()).collect();
    assert_eq!(
        names,
        [
            "..", "Alpha", "beta", "Charlie", "delta", "echo", "Foxtrot", "Apple.md", "banana.rs",
            "Cherry", "zulu.txt"
        ]
    );
    Ok(())
}

// needs a case-sensitive filesystem
#[cfg(target_os = "linux")]
#[test]
fn test_sort_is_stable_and_idempotent() -> Result<(), Box<dyn error::Error>> {
    let dir = tempdir()?;
    for name in ["readme", "README", "ReadMe", "other"] {
        File::create(dir.path().join(name))?;
    }

    let enumerated = browse_dir(dir.path())?;
    let mut sorted = enumerated.clone();
    sort_entries(&mut sorted);

    let variants = |list: &[DirectoryEntry]| -> Vec<String> {
        list.iter()
            .map(|e| e.name().to_string())
            .filter(|n| n.eq_ignore_ascii_case("readme"))
            .collect()
    };
    // case-only differences keep the enumeration order
    assert_eq!(variants(&enumerated), variants(&sorted));
    assert_eq!(sorted.first().map(|e| e.name()), Some("other"));

    let mut twice = sorted.clone();
    sort_entries(&mut twice);
    let a: Vec<_> = sorted.iter().map(|e| e.name()).collect();
    let b: Vec<_> = twice.iter().map(|e| e.name()).collect();
    assert_eq!(a, b);
    Ok(())
}

#[test]
fn test_empty_directory() -> Result<(), Box<dyn error::Error>> {
    let dir = tempdir()?;
    let listing = load_directory(dir.path());
    assert_eq!(listing.status, "Loaded 0 entries");
    assert_eq!(listing.entries.len(), 1);

    let mut view = ListView::new(10);
    view.reset(0);
    assert!(!view.step_down());
    assert!(!view.end());
    assert_eq!((view.selected(), view.offset()), (0, 0));
    Ok(())
}
