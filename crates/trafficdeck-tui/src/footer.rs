//! TUI footer panel.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::keymap::InputMode;
use crate::styles::ColorTheme;

/// Key hints for a mode as `(key, description)`.
#[must_use]
pub fn hints(mode: InputMode) -> &'static [(&'static str, &'static str)] {
    match mode {
        InputMode::Browse => &[
            ("q", "quit"),
            ("tab", "category"),
            ("1-9", "jump"),
            ("f", "apply"),
            ("↑↓", "logs"),
        ],
        InputMode::Form => &[
            ("esc", "back"),
            ("↑↓", "field"),
            ("←→", "interest"),
            ("enter", "submit"),
            ("ctrl+c", "cancel"),
        ],
    }
}

/// Render the footer panel with keyboard shortcuts.
pub fn render_footer(frame: &mut Frame, area: Rect, mode: InputMode) {
    let theme = ColorTheme::default();
    let mut spans = Vec::new();
    for (i, (key, description)) in hints(mode).iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" | "));
        }
        spans.push(Span::styled(*key, theme.key_style()));
        spans.push(Span::raw(format!(": {description}")));
    }

    let block = Block::default().borders(Borders::TOP);
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}
