//! Normalized key codes and key sources.
//!
//! Backends translate their native events into [Key] so that the state
//! machine never sees a crossterm type.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use std::collections::VecDeque;
use std::io;

/// Backend-independent key code.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    Home,
    End,
    Enter,
    Esc,
    Resize,
    Unknown,
    Char(char),
}

impl From<KeyEvent> for Key {
    fn from(key: KeyEvent) -> Self {
        match key.code {
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::Enter | KeyCode::Char('\n') | KeyCode::Char('\r') => Key::Enter,
            KeyCode::Esc => Key::Esc,
            KeyCode::Char(c) => Key::Char(c),
            _ => Key::Unknown,
        }
    }
}

/// Blocking supplier of key events.
pub trait KeySource {
    fn read_key(&mut self) -> io::Result<Key>;
}

/// Reads keys from the real terminal through crossterm.
///
/// Only key presses are reported; releases and repeats of the kitty protocol
/// are dropped. Terminal resizes arrive as [Key::Resize].
#[derive(Debug, Default, Clone, Copy)]
pub struct CrosstermKeys;

impl KeySource for CrosstermKeys {
    fn read_key(&mut self) -> io::Result<Key> {
        loop {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => return Ok(Key::from(key)),
                Event::Resize(_, _) => return Ok(Key::Resize),
                _ => continue,
            }
        }
    }
}

/// A pre-recorded key sequence. Reading past the end is an `UnexpectedEof`.
impl KeySource for VecDeque<Key> {
    fn read_key(&mut self) -> io::Result<Key> {
        self.pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no more scripted keys"))
    }
}
