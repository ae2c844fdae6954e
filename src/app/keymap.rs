//! Key bindings for quickview.
//!
//! Maps normalized [Key]s to browser commands and to file viewer scroll
//! commands. The bindings are fixed; letters are bound in both cases.

use crate::screen::Key;
use std::collections::HashMap;

/// Commands available while browsing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
    Enter,
    Parent,
    View,
    Help,
    About,
    Quit,
}

/// Commands available in the file viewer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScrollCommand {
    LineUp,
    LineDown,
    PageUp,
    PageDown,
    Home,
    End,
}

/// Stores the mapping from key to command for each input context.
#[derive(Debug, Clone)]
pub struct Keymap {
    browse: HashMap<Key, Command>,
    scroll: HashMap<Key, ScrollCommand>,
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new()
    }
}

impl Keymap {
    #[rustfmt::skip]
    pub fn new() -> Self {
        let mut browse = HashMap::new();
        let mut scroll = HashMap::new();

        macro_rules! bind {
            ($map:ident, [$($key:expr),+], $cmd:expr) => {
                $( $map.insert($key, $cmd); )+
            };
        }

        use Command as C;
        use ScrollCommand as S;

        bind!(browse, [Key::Up],                            C::Up);
        bind!(browse, [Key::Down],                          C::Down);
        bind!(browse, [Key::PageUp],                        C::PageUp);
        bind!(browse, [Key::PageDown],                      C::PageDown);
        bind!(browse, [Key::Home],                          C::Home);
        bind!(browse, [Key::End],                           C::End);
        bind!(browse, [Key::Enter, Key::Right],             C::Enter);
        bind!(browse, [Key::Left],                          C::Parent);
        bind!(browse, [Key::Char('v'), Key::Char('V')],     C::View);
        bind!(browse, [Key::Char('h'), Key::Char('H')],     C::Help);
        bind!(browse, [Key::Char('a'), Key::Char('A')],     C::About);
        bind!(browse, [Key::Char('q'), Key::Char('Q'), Key::Esc], C::Quit);

        bind!(scroll, [Key::Up],                            S::LineUp);
        bind!(scroll, [Key::Down],                          S::LineDown);
        bind!(scroll, [Key::PageUp],                        S::PageUp);
        bind!(scroll, [Key::PageDown],                      S::PageDown);
        bind!(scroll, [Key::Home],                          S::Home);
        bind!(scroll, [Key::End],                           S::End);

        Self { browse, scroll }
    }

    #[inline]
    pub fn command(&self, key: Key) -> Option<Command> {
        self.browse.get(&key).copied()
    }

    #[inline]
    pub fn scroll(&self, key: Key) -> Option<ScrollCommand> {
        self.scroll.get(&key).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_are_case_insensitive() {
        let km = Keymap::new();
        for (lower, upper, cmd) in [
            ('v', 'V', Command::View),
            ('h', 'H', Command::Help),
            ('a', 'A', Command::About),
            ('q', 'Q', Command::Quit),
        ] {
            assert_eq!(km.command(Key::Char(lower)), Some(cmd));
            assert_eq!(km.command(Key::Char(upper)), Some(cmd));
        }
        assert_eq!(km.command(Key::Esc), Some(Command::Quit));
        assert_eq!(km.command(Key::Char('x')), None);
    }

    #[test]
    fn scroll_keys_only_cover_motion() {
        let km = Keymap::new();
        assert_eq!(km.scroll(Key::End), Some(ScrollCommand::End));
        assert_eq!(km.scroll(Key::Enter), None);
        assert_eq!(km.scroll(Key::Char('q')), None);
        assert_eq!(km.scroll(Key::Left), None);
    }
}
