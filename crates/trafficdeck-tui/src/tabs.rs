//! Category tab bar.

use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Tabs};
use ratatui::Frame;

use crate::styles::ColorTheme;

/// Tab title for the category at `index`, e.g. `1 GAMBLING`.
#[must_use]
pub fn tab_title(index: usize, key: &str) -> String {
    format!("{} {}", index + 1, key.to_uppercase())
}

/// Render the category tabs with `active` highlighted.
pub fn render_tabs(frame: &mut Frame, area: Rect, keys: &[&str], active: usize) {
    let theme = ColorTheme::default();
    let titles: Vec<Line> = keys
        .iter()
        .enumerate()
        .map(|(i, key)| Line::raw(tab_title(i, key)))
        .collect();

    let tabs = Tabs::new(titles)
        .select(active)
        .style(theme.muted_style())
        .highlight_style(theme.header_style())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Case Studies ")
                .border_style(theme.border_style(false)),
        );
    frame.render_widget(tabs, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn titles_are_numbered() {
        assert_eq!(tab_title(0, "gambling"), "1 GAMBLING");
        assert_eq!(tab_title(2, "crypto"), "3 CRYPTO");
    }

    #[test]
    fn render_lists_every_tab() {
        let mut terminal = Terminal::new(TestBackend::new(60, 3)).unwrap();
        let buf = terminal
            .draw(|frame| render_tabs(frame, frame.area(), &["gambling", "nutra", "crypto"], 1))
            .unwrap();
        let content: String = (0..buf.area.width)
            .map(|x| buf.buffer[(x, 1)].symbol().to_string())
            .collect();
        assert!(content.contains("GAMBLING"));
        assert!(content.contains("NUTRA"));
        assert!(content.contains("CRYPTO"));
    }
}
