use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{List, ListItem, ListState, Paragraph};

use super::entry::ListRow;
use super::input::Input;
use super::markdown::plain_text;
use super::suggest::rank_matches;
use super::theme::Theme;

// Title, description and one blank spacer line.
const ROW_HEIGHT: u16 = 3;
// Header, status and help lines.
const CHROME_HEIGHT: u16 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FilterState {
    Unfiltered,
    Filtering,
    Applied,
}

/// Scrollable, filterable list of rows with a single highlighted entry.
#[derive(Debug)]
pub(crate) struct FilterList<T> {
    title: String,
    items: Vec<T>,
    // Indices into `items`, in display order.
    visible: Vec<usize>,
    cursor: usize,
    width: u16,
    height: u16,
    state: FilterState,
    input: Input,
}

impl<T: ListRow> FilterList<T> {
    pub(crate) fn new(title: String, items: Vec<T>, width: u16, height: u16) -> Self {
        let visible = (0..items.len()).collect();
        Self {
            title,
            items,
            visible,
            cursor: 0,
            width,
            height,
            state: FilterState::Unfiltered,
            input: Input::default(),
        }
    }

    pub(crate) fn title(&self) -> &str {
        &self.title
    }

    pub(crate) fn items(&self) -> &[T] {
        &self.items
    }

    pub(crate) fn visible_items(&self) -> impl Iterator<Item = &T> {
        self.visible.iter().map(|&i| &self.items[i])
    }

    pub(crate) fn selected_item(&self) -> Option<&T> {
        self.visible.get(self.cursor).map(|&i| &self.items[i])
    }

    #[cfg(test)]
    pub(crate) fn cursor(&self) -> usize {
        self.cursor
    }

    pub(crate) fn filter_state(&self) -> FilterState {
        self.state
    }

    #[cfg(test)]
    pub(crate) fn filter_query(&self) -> &str {
        &self.input.buf
    }

    pub(crate) fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    pub(crate) fn set_size(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    pub(crate) fn per_page(&self) -> usize {
        (self.height.saturating_sub(CHROME_HEIGHT) / ROW_HEIGHT).max(1) as usize
    }

    pub(crate) fn handle_key(&mut self, key: KeyEvent) {
        if self.state == FilterState::Filtering {
            self.handle_filter_key(key);
            return;
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.move_up(1),
            KeyCode::Down | KeyCode::Char('j') => self.move_down(1),
            KeyCode::PageUp => self.move_up(self.per_page()),
            KeyCode::PageDown => self.move_down(self.per_page()),
            KeyCode::Home | KeyCode::Char('g') => self.cursor = 0,
            KeyCode::End | KeyCode::Char('G') => {
                self.cursor = self.visible.len().saturating_sub(1);
            }
            KeyCode::Char('/') => {
                self.state = FilterState::Filtering;
                self.input.move_end();
            }
            KeyCode::Esc if self.state == FilterState::Applied => self.reset_filter(),
            _ => {}
        }
    }

    fn handle_filter_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.reset_filter(),
            KeyCode::Enter => {
                self.state = if self.input.buf.is_empty() {
                    FilterState::Unfiltered
                } else {
                    FilterState::Applied
                };
            }
            KeyCode::Up => self.move_up(1),
            KeyCode::Down => self.move_down(1),
            KeyCode::Left => self.input.move_left(),
            KeyCode::Right => self.input.move_right(),
            KeyCode::Home => self.input.move_home(),
            KeyCode::End => self.input.move_end(),
            KeyCode::Backspace => {
                self.input.backspace();
                self.refilter();
            }
            KeyCode::Delete => {
                self.input.delete();
                self.refilter();
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.input.clear();
                self.refilter();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.input.insert_char(c);
                self.refilter();
            }
            _ => {}
        }
    }

    pub(crate) fn reset_filter(&mut self) {
        self.input.clear();
        self.state = FilterState::Unfiltered;
        self.refilter();
    }

    fn refilter(&mut self) {
        let q = self.input.buf.trim();
        self.visible = if q.is_empty() {
            (0..self.items.len()).collect()
        } else {
            rank_matches(q, self.items.iter().map(|it| it.filter_value()))
        };
        self.cursor = 0;
    }

    fn move_up(&mut self, n: usize) {
        self.cursor = self.cursor.saturating_sub(n);
    }

    fn move_down(&mut self, n: usize) {
        if self.visible.is_empty() {
            self.cursor = 0;
            return;
        }
        let max = self.visible.len().saturating_sub(1);
        self.cursor = (self.cursor + n).min(max);
    }

    pub(crate) fn render(&self, frame: &mut ratatui::Frame, area: Rect, theme: &Theme) {
        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        if self.state == FilterState::Filtering {
            let line = Line::from(vec![
                Span::styled("Filter: ", theme.filter_prompt),
                Span::raw(self.input.buf.as_str()),
            ]);
            frame.render_widget(Paragraph::new(line), parts[0]);
            let x = filter_cursor_x(self.input.cursor, parts[0].width);
            frame.set_cursor_position((parts[0].x.saturating_add(x), parts[0].y));
        } else {
            let line = Line::from(Span::styled(format!(" {} ", self.title), theme.title));
            frame.render_widget(Paragraph::new(line), parts[0]);
        }

        frame.render_widget(
            Paragraph::new(Line::from(self.status_spans(theme))),
            parts[1],
        );

        let rows: Vec<ListItem> = self
            .visible_items()
            .enumerate()
            .map(|(i, item)| self.row(item, i == self.cursor, theme))
            .collect();
        let mut state = ListState::default();
        if !self.visible.is_empty() {
            state.select(Some(self.cursor.min(self.visible.len() - 1)));
        }
        frame.render_stateful_widget(List::new(rows), parts[2], &mut state);

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(self.help_line(), theme.help))),
            parts[3],
        );
    }

    fn status_spans(&self, theme: &Theme) -> Vec<Span<'static>> {
        let total = self.items.len();
        if total == 0 {
            return vec![Span::styled("No items.", theme.status)];
        }
        let noun = if total == 1 { "item" } else { "items" };
        let q = self.input.buf.trim();
        if q.is_empty() {
            return vec![Span::styled(format!("{} {}", total, noun), theme.status)];
        }
        if self.visible.is_empty() {
            return vec![Span::styled("Nothing matched", theme.status)];
        }
        vec![
            Span::styled(format!("\u{201c}{}\u{201d} ", q), theme.match_count),
            Span::styled(
                format!("{} of {} {}", self.visible.len(), total, noun),
                theme.status,
            ),
        ]
    }

    fn help_line(&self) -> &'static str {
        match self.state {
            FilterState::Filtering => "enter apply filter \u{2022} esc cancel",
            FilterState::Applied => {
                "\u{2191}/k up \u{2022} \u{2193}/j down \u{2022} / filter \u{2022} esc clear filter \u{2022} enter open \u{2022} q quit"
            }
            FilterState::Unfiltered => {
                "\u{2191}/k up \u{2022} \u{2193}/j down \u{2022} / filter \u{2022} enter open \u{2022} q quit"
            }
        }
    }

    fn row(&self, item: &T, selected: bool, theme: &Theme) -> ListItem<'static> {
        let (bar, title_style, desc_style) = if selected {
            ("\u{2502} ", theme.selected_title, theme.selected_description)
        } else {
            ("  ", theme.row_title, theme.row_description)
        };
        let room = self.width.saturating_sub(2) as usize;
        let desc = truncate(&plain_text(item.description()), room);
        ListItem::new(Text::from(vec![
            Line::from(vec![
                Span::styled(bar, title_style),
                Span::styled(item.title().to_string(), title_style),
            ]),
            Line::from(vec![
                Span::styled(bar, desc_style),
                Span::styled(desc, desc_style),
            ]),
            Line::from(""),
        ]))
    }
}

// Column of the text cursor behind the "Filter: " prompt.
fn filter_cursor_x(cursor: usize, width: u16) -> u16 {
    u16::try_from(cursor)
        .unwrap_or(u16::MAX)
        .saturating_add("Filter: ".len() as u16)
        .min(width)
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out: String = s.chars().take(max - 1).collect();
    out.push('\u{2026}');
    out
}

#[cfg(test)]
#[path = "../tests/tui_shell/list_tests.rs"]
mod tests;
