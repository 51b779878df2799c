//! Activity log panel: bounded history with follow-the-tail scrolling.

use std::collections::VecDeque;

use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, List, ListItem};
use ratatui::Frame;

use crate::styles::ColorTheme;

/// Entries kept before the oldest is dropped.
pub const DEFAULT_LOG_CAPACITY: usize = 500;

/// Bounded log history and its scroll position.
#[derive(Debug, Clone)]
pub struct ActivityLog {
    entries: VecDeque<String>,
    capacity: usize,
    /// Index of the first visible entry.
    offset: usize,
    /// Whether new entries move the view to the bottom.
    follow: bool,
}

impl ActivityLog {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: capacity.max(1),
            offset: 0,
            follow: true,
        }
    }

    /// Append an entry, evicting the oldest past capacity.
    pub fn push(&mut self, entry: impl Into<String>) {
        self.entries.push_back(entry.into());
        if self.entries.len() > self.capacity {
            self.entries.pop_front();
            self.offset = self.offset.saturating_sub(1);
        }
        if self.follow {
            self.offset = self.last_index();
        }
    }

    fn last_index(&self) -> usize {
        self.entries.len().saturating_sub(1)
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.follow = false;
        self.offset = self.offset.saturating_sub(lines);
    }

    /// Scroll down; reaching the bottom resumes following.
    pub fn scroll_down(&mut self, lines: usize) {
        self.offset = (self.offset + lines).min(self.last_index());
        if self.offset == self.last_index() {
            self.follow = true;
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[must_use]
    pub fn is_following(&self) -> bool {
        self.follow
    }

    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Entries visible in a window of `height` lines.
    ///
    /// While following, the window ends at the newest entry.
    pub fn visible(&self, height: usize) -> impl Iterator<Item = &str> {
        let start = if self.follow {
            self.entries.len().saturating_sub(height)
        } else {
            self.offset
        };
        self.entries.iter().skip(start).take(height).map(String::as_str)
    }
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_CAPACITY)
    }
}

/// Render the activity log.
pub fn render_logs(frame: &mut Frame, area: Rect, log: &ActivityLog) {
    let theme = ColorTheme::default();
    let height = area.height.saturating_sub(2) as usize; // borders

    let items: Vec<ListItem> = log
        .visible(height)
        .map(|entry| {
            let style = if entry.contains("ERROR") {
                theme.error_style()
            } else if entry.contains("WARN") {
                theme.key_style()
            } else {
                theme.text_style()
            };
            ListItem::new(Line::raw(entry.to_string())).style(style)
        })
        .collect();

    let title = if log.is_following() {
        " Activity ".to_string()
    } else {
        format!(" Activity ({}/{}) ", log.offset() + 1, log.len())
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(theme.border_style(false)),
    );
    frame.render_widget(list, area);
}
