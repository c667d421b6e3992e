use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::feed::Feed;

use super::entry::{ListEntry, to_list_entries};
use super::list::{FilterList, FilterState};

mod event_loop;
mod render;
mod runtime;

pub use self::render::draw;
pub(crate) use self::runtime::run;

/// Input to the transition function.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Msg {
    Key(KeyEvent),
    Resize { width: u16, height: u16 },
    Tick,
}

/// Side effect requested by a transition; the runner executes it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Cmd {
    Quit,
    OpenBrowser(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Screen {
    Listing,
    Detail { selected: ListEntry },
}

/// Presentation state of one session.
#[derive(Debug)]
pub struct App {
    pub(crate) list: FilterList<ListEntry>,
    pub(crate) screen: Screen,
    quit: bool,
}

impl App {
    pub fn new(title: String, entries: Vec<ListEntry>, width: u16, height: u16) -> Self {
        Self {
            list: FilterList::new(title, entries, width, height),
            screen: Screen::Listing,
            quit: false,
        }
    }

    pub fn from_feed(feed: &Feed, width: u16, height: u16) -> Self {
        Self::new(feed.title.clone(), to_list_entries(&feed.items), width, height)
    }

    /// Untitled, empty session used when the feed could not be loaded.
    pub fn empty(width: u16, height: u16) -> Self {
        Self::new(String::new(), Vec::new(), width, height)
    }

    pub fn entries(&self) -> &[ListEntry] {
        self.list.items()
    }

    pub fn title(&self) -> &str {
        self.list.title()
    }

    pub fn is_detail(&self) -> bool {
        matches!(self.screen, Screen::Detail { .. })
    }

    /// The entry captured on activation; `None` outside the detail view.
    pub fn selected(&self) -> Option<&ListEntry> {
        match &self.screen {
            Screen::Detail { selected } => Some(selected),
            Screen::Listing => None,
        }
    }

    pub fn highlighted(&self) -> Option<&ListEntry> {
        self.list.selected_item()
    }

    /// Last known terminal size as `(width, height)`.
    pub fn size(&self) -> (u16, u16) {
        self.list.size()
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        match msg {
            Msg::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Msg::Key(_) | Msg::Tick => None,
            Msg::Resize { width, height } => {
                self.list.set_size(width, height);
                None
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<Cmd> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(self.quit());
        }

        // Typed filter text owns every other key.
        if self.list.filter_state() == FilterState::Filtering {
            self.list.handle_key(key);
            return None;
        }

        match key.code {
            KeyCode::Char('q') => Some(self.quit()),
            KeyCode::Enter if !self.is_detail() => {
                if let Some(entry) = self.list.selected_item().cloned() {
                    self.screen = Screen::Detail { selected: entry };
                }
                None
            }
            KeyCode::Esc if self.is_detail() => {
                self.screen = Screen::Listing;
                None
            }
            // Only meaningful with an entry open.
            KeyCode::Char('o') => self.selected().map(|e| Cmd::OpenBrowser(e.link.clone())),
            _ if !self.is_detail() => {
                self.list.handle_key(key);
                None
            }
            _ => None,
        }
    }

    fn quit(&mut self) -> Cmd {
        self.quit = true;
        Cmd::Quit
    }
}

#[cfg(test)]
#[path = "../tests/tui_shell/app_tests.rs"]
mod tests;
