//! TUI header panel.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use trafficdeck_core::format::format_thousands;

use crate::styles::ColorTheme;

/// Render the header with the live lead counter.
pub fn render_header(frame: &mut Frame, area: Rect, live_counter: u64, live: bool) {
    let theme = ColorTheme::default();
    let indicator = if live {
        Span::styled("● LIVE", theme.success_style())
    } else {
        Span::styled("○ PAUSED", theme.muted_style())
    };
    let text = vec![Line::from(vec![
        Span::styled("TrafficDeck", theme.header_style()),
        Span::raw(" Performance Dashboard"),
        Span::raw(" | "),
        indicator,
        Span::raw(format!(" {} active leads", format_thousands(live_counter))),
    ])];

    let block = Block::default().borders(Borders::BOTTOM);

    frame.render_widget(Paragraph::new(text).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn row(live_counter: u64, live: bool) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 2)).unwrap();
        let buf = terminal
            .draw(|frame| render_header(frame, frame.area(), live_counter, live))
            .unwrap();
        (0..buf.area.width)
            .map(|x| buf.buffer[(x, 0)].symbol().to_string())
            .collect()
    }

    #[test]
    fn shows_grouped_counter() {
        let content = row(1247, true);
        assert!(content.contains("1,247 active leads"));
        assert!(content.contains("LIVE"));
    }

    #[test]
    fn shows_paused_when_feed_stopped() {
        assert!(row(0, false).contains("PAUSED"));
    }
}
