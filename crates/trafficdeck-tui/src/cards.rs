//! Case-study cards: title, curve and metric grid per record.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use trafficdeck_core::dashboard::card_delay;
use trafficdeck_core::{synthesize, CaseRecord, CurveOptions, CurveSpec};

use crate::chart::render_curve;
use crate::metrics::{render_metrics, METRICS_PER_ROW};
use crate::styles::ColorTheme;

/// A case record with its curve, synthesized once per tab switch.
#[derive(Debug, Clone)]
pub struct CaseCard {
    pub record: CaseRecord,
    /// `None` when the record's series could not be synthesized.
    pub curve: Option<CurveSpec>,
}

impl CaseCard {
    /// Build a card, logging (not failing) on a bad series.
    #[must_use]
    pub fn new(record: CaseRecord, opts: &CurveOptions) -> Self {
        let curve = match synthesize(&record.series, opts) {
            Ok(curve) => Some(curve),
            Err(err) => {
                tracing::warn!(title = %record.title, %err, "case curve skipped");
                None
            }
        };
        Self { record, curve }
    }
}

/// Render the cards of the active tab side by side.
///
/// `elapsed` is the time since the tab was shown; card `i` appears after
/// its stagger delay and animates from there.
#[allow(clippy::cast_possible_truncation)]
pub fn render_cards(frame: &mut Frame, area: Rect, cards: &[CaseCard], elapsed: f64) {
    if cards.is_empty() {
        return;
    }
    let slots = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, cards.len() as u32); cards.len()])
        .split(area);

    for (i, (card, slot)) in cards.iter().zip(slots.iter()).enumerate() {
        let local = elapsed - card_delay(i);
        if local < 0.0 {
            continue;
        }
        render_card(frame, *slot, card, local);
    }
}

#[allow(clippy::cast_possible_truncation)]
fn render_card(frame: &mut Frame, area: Rect, card: &CaseCard, elapsed: f64) {
    let theme = ColorTheme::default();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", card.record.title))
        .title_style(theme.header_style())
        .border_style(theme.border_style(false));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let metric_rows = card.record.metrics.len().div_ceil(METRICS_PER_ROW) as u16;
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),           // vertical
            Constraint::Min(2),              // curve
            Constraint::Length(metric_rows), // metrics
        ])
        .split(inner);

    let vertical = Line::from(Span::styled(
        card.record.vertical.to_uppercase(),
        theme.muted_style(),
    ));
    frame.render_widget(Paragraph::new(vertical), parts[0]);

    if let Some(curve) = &card.curve {
        render_curve(frame, parts[1], curve, elapsed);
    }
    render_metrics(frame, parts[2], &card.record.metrics, elapsed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use trafficdeck_core::DatasetGroup;

    fn cards(key: &str) -> Vec<CaseCard> {
        DatasetGroup::builtin()
            .get(key)
            .unwrap()
            .iter()
            .cloned()
            .map(|r| CaseCard::new(r, &CurveOptions::default()))
            .collect()
    }

    fn screen(cards: &[CaseCard], elapsed: f64) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 14)).unwrap();
        let buf = terminal
            .draw(|frame| render_cards(frame, frame.area(), cards, elapsed))
            .unwrap();
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(buf.buffer[(x, y)].symbol());
            }
        }
        out
    }

    #[test]
    fn builtin_cards_have_curves() {
        for card in cards("nutra") {
            assert!(card.curve.is_some());
        }
    }

    #[test]
    fn second_card_waits_for_its_stagger() {
        let cards = cards("gambling");
        let early = screen(&cards, 0.1);
        assert!(early.contains("Casino Blitz Campaign"));
        assert!(!early.contains("Sports Betting Rush"));

        let later = screen(&cards, 0.25);
        assert!(later.contains("Sports Betting Rush"));
    }

    #[test]
    fn fully_revealed_card_shows_metrics() {
        let screen = screen(&cards("crypto"), 10.0);
        assert!(screen.contains("DeFi Token Launch"));
        assert!(screen.contains("$92,340"));
        assert!(screen.contains("4.1M"));
    }

    #[test]
    fn bad_series_renders_without_curve() {
        let record = CaseRecord {
            title: "Broken".into(),
            vertical: "Test".into(),
            series: vec![f64::NAN],
            metrics: Vec::new(),
        };
        let card = CaseCard::new(record, &CurveOptions::default());
        assert!(card.curve.is_none());
        assert!(screen(&[card], 5.0).contains("Broken"));
    }

    #[test]
    fn empty_card_list() {
        assert!(screen(&[], 1.0).trim().is_empty());
    }
}
