//! Braille rendering of a synthesized case-study curve.
//!
//! Each character cell encodes a 2-wide x 4-tall grid of dots. The curve
//! is sampled once per dot column and only drawn up to the last point
//! whose reveal delay has elapsed.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use trafficdeck_core::constants::VIEWPORT_EXTENT;
use trafficdeck_core::CurveSpec;

use crate::styles::ColorTheme;

/// Braille character base offset (Unicode block U+2800).
const BRAILLE_BASE: u32 = 0x2800;

/// Dot bits of the left and right column, top row first.
const BRAILLE_LEFT: [u32; 4] = [0x01, 0x02, 0x04, 0x40];
const BRAILLE_RIGHT: [u32; 4] = [0x08, 0x10, 0x20, 0x80];

/// Horizontal extent of the curve visible `elapsed` seconds in.
///
/// `None` until the first point is revealed.
#[must_use]
pub fn reveal_limit(curve: &CurveSpec, elapsed: f64) -> Option<f64> {
    match curve.revealed(elapsed) {
        0 => None,
        n => Some(curve.points[n - 1].x),
    }
}

/// Braille lines showing `curve` up to horizontal position `limit`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
#[must_use]
pub fn curve_lines(
    curve: &CurveSpec,
    limit: f64,
    char_width: usize,
    char_height: usize,
) -> Vec<Line<'static>> {
    if char_width == 0 || char_height == 0 {
        return Vec::new();
    }

    let dot_cols = char_width * 2;
    let dot_rows = char_height * 4;
    let max_row = (dot_rows - 1) as f64;

    // Dot row per column, or None where nothing is drawn.
    let rows: Vec<Option<usize>> = (0..dot_cols)
        .map(|col| {
            let x = if dot_cols > 1 {
                col as f64 / (dot_cols - 1) as f64 * VIEWPORT_EXTENT
            } else {
                0.0
            };
            if x > limit {
                return None;
            }
            curve.sample(x).map(|y| {
                let clamped = y.clamp(0.0, VIEWPORT_EXTENT);
                (clamped / VIEWPORT_EXTENT * max_row).round() as usize
            })
        })
        .collect();

    let mut lines = Vec::with_capacity(char_height);
    for row in 0..char_height {
        let mut line = String::with_capacity(char_width * 3);
        for col in 0..char_width {
            let mut braille = BRAILLE_BASE;
            for (side, bits) in [BRAILLE_LEFT, BRAILLE_RIGHT].iter().enumerate() {
                if let Some(dot_row) = rows[col * 2 + side] {
                    if dot_row / 4 == row {
                        braille |= bits[dot_row % 4];
                    }
                }
            }
            if let Some(ch) = char::from_u32(braille) {
                line.push(ch);
            }
        }
        lines.push(Line::raw(line));
    }
    lines
}

/// Render the revealed part of `curve` into `area`.
pub fn render_curve(frame: &mut Frame, area: Rect, curve: &CurveSpec, elapsed: f64) {
    let Some(limit) = reveal_limit(curve, elapsed) else {
        return;
    };
    let theme = ColorTheme::default();
    let lines = curve_lines(curve, limit, area.width as usize, area.height as usize);
    let paragraph = Paragraph::new(lines).style(Style::default().fg(theme.primary));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use trafficdeck_core::chart_curve;

    fn text(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn nothing_before_first_reveal() {
        let curve = chart_curve(&[0.2, 0.8]).unwrap();
        assert_eq!(reveal_limit(&curve, 0.5), None);
        assert_eq!(reveal_limit(&curve, 1.0), Some(0.0));
        assert_eq!(reveal_limit(&curve, 1.2), Some(100.0));
    }

    #[test]
    fn line_dimensions() {
        let curve = chart_curve(&[0.2, 0.5, 0.3, 0.8]).unwrap();
        let lines = text(&curve_lines(&curve, 100.0, 12, 4));
        assert_eq!(lines.len(), 4);
        for line in &lines {
            assert_eq!(line.chars().count(), 12);
        }
    }

    #[test]
    fn characters_are_braille() {
        let curve = chart_curve(&[0.1, 0.9, 0.4]).unwrap();
        for line in text(&curve_lines(&curve, 100.0, 8, 3)) {
            for ch in line.chars() {
                assert!((0x2800..=0x28FF).contains(&(ch as u32)));
            }
        }
    }

    #[test]
    fn one_dot_per_column_when_fully_revealed() {
        let curve = chart_curve(&[0.0, 1.0, 0.5]).unwrap();
        let lines = text(&curve_lines(&curve, 100.0, 10, 5));
        let dots: u32 = lines
            .iter()
            .flat_map(|l| l.chars())
            .map(|ch| (ch as u32 - BRAILLE_BASE).count_ones())
            .sum();
        assert_eq!(dots, 20);
    }

    #[test]
    fn partial_reveal_leaves_right_side_blank() {
        let curve = chart_curve(&[0.5, 0.5, 0.5]).unwrap();
        let lines = text(&curve_lines(&curve, 50.0, 10, 2));
        let blank = char::from_u32(BRAILLE_BASE).unwrap();
        for line in &lines {
            assert!(line.chars().skip(6).all(|c| c == blank));
        }
        assert!(lines.iter().any(|l| l.chars().take(5).any(|c| c != blank)));
    }

    #[test]
    fn high_values_sit_near_top() {
        let curve = chart_curve(&[1.0, 1.0]).unwrap();
        let lines = text(&curve_lines(&curve, 100.0, 4, 5));
        let blank = char::from_u32(BRAILLE_BASE).unwrap();
        // y = 20 of 100 lands in the top fifth of the grid.
        assert!(lines[0].chars().chain(lines[1].chars()).any(|c| c != blank));
        assert!(lines[4].chars().all(|c| c == blank));
    }

    #[test]
    fn zero_area() {
        let curve = chart_curve(&[0.5]).unwrap();
        assert!(curve_lines(&curve, 100.0, 0, 4).is_empty());
        assert!(curve_lines(&curve, 100.0, 4, 0).is_empty());
    }

    #[test]
    fn render_does_not_panic() {
        let curve = chart_curve(&[0.2, 0.5, 0.3, 0.8, 0.6, 0.9, 0.7]).unwrap();
        let mut terminal = Terminal::new(TestBackend::new(30, 6)).unwrap();
        for elapsed in [0.0, 1.0, 1.35, 5.0] {
            terminal
                .draw(|frame| render_curve(frame, frame.area(), &curve, elapsed))
                .unwrap();
        }
    }
}
