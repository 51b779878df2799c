//! Metric grid shown under each case-study chart.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use trafficdeck_core::dashboard::metric_delay;
use trafficdeck_core::format::{format_metric_for_key, metric_icon};
use trafficdeck_core::Metric;

use crate::styles::ColorTheme;

/// Metrics laid out per grid row.
pub const METRICS_PER_ROW: usize = 2;

/// Display text of a metric, e.g. `📈 ROAS 340%`.
#[must_use]
pub fn metric_text(metric: &Metric) -> (String, String) {
    (
        format!("{} {}", metric_icon(&metric.key), metric.key.to_uppercase()),
        format_metric_for_key(&metric.key, metric.value),
    )
}

/// How many metrics are visible `elapsed` seconds after the card appeared.
#[must_use]
pub fn visible_metrics(count: usize, elapsed: f64) -> usize {
    (0..count).take_while(|&i| metric_delay(i) <= elapsed).count()
}

/// Render `metrics` as a grid, revealing them one by one.
#[allow(clippy::cast_possible_truncation)]
pub fn render_metrics(frame: &mut Frame, area: Rect, metrics: &[Metric], elapsed: f64) {
    let theme = ColorTheme::default();
    let visible = visible_metrics(metrics.len(), elapsed);
    let rows = metrics.chunks(METRICS_PER_ROW);

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(1); rows.len()])
        .split(area);

    for (row_index, (row, row_area)) in rows.zip(row_areas.iter()).enumerate() {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, METRICS_PER_ROW as u32); METRICS_PER_ROW])
            .split(*row_area);
        for (col, (metric, cell)) in row.iter().zip(cells.iter()).enumerate() {
            if row_index * METRICS_PER_ROW + col >= visible {
                continue;
            }
            let (label, value) = metric_text(metric);
            let line = Line::from(vec![
                Span::styled(label, theme.muted_style()),
                Span::raw(" "),
                Span::styled(value, theme.success_style()),
            ]);
            frame.render_widget(Paragraph::new(line), *cell);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use trafficdeck_core::DatasetGroup;

    fn casino_metrics() -> Vec<Metric> {
        DatasetGroup::builtin().get("gambling").unwrap()[0]
            .metrics
            .clone()
    }

    #[test]
    fn metric_text_formats_by_kind() {
        let metrics = casino_metrics();
        assert_eq!(metric_text(&metrics[0]), ("📈 ROAS".into(), "340%".into()));
        assert_eq!(metric_text(&metrics[1]).1, "$45,280");
        assert_eq!(metric_text(&metrics[2]).1, "2.1M");
        assert_eq!(metric_text(&metrics[3]).1, "8.4%");
    }

    #[test]
    fn metrics_reveal_in_order() {
        assert_eq!(visible_metrics(4, 0.0), 0);
        assert_eq!(visible_metrics(4, 0.3), 1);
        assert_eq!(visible_metrics(4, 0.45), 2);
        assert_eq!(visible_metrics(4, 10.0), 4);
    }

    #[test]
    fn render_full_grid() {
        let metrics = casino_metrics();
        let mut terminal = Terminal::new(TestBackend::new(60, 2)).unwrap();
        let buf = terminal
            .draw(|frame| render_metrics(frame, frame.area(), &metrics, 10.0))
            .unwrap();
        let all: String = (0..buf.area.height)
            .flat_map(|y| (0..buf.area.width).map(move |x| (x, y)))
            .map(|pos| buf.buffer[pos].symbol().to_string())
            .collect();
        assert!(all.contains("340%"));
        assert!(all.contains("$45,280"));
        assert!(all.contains("8.4%"));
    }

    #[test]
    fn render_hides_unrevealed() {
        let metrics = casino_metrics();
        let mut terminal = Terminal::new(TestBackend::new(60, 2)).unwrap();
        let buf = terminal
            .draw(|frame| render_metrics(frame, frame.area(), &metrics, 0.0))
            .unwrap();
        let all: String = (0..buf.area.width)
            .map(|x| buf.buffer[(x, 0)].symbol().to_string())
            .collect();
        assert!(!all.contains("340%"));
    }
}
