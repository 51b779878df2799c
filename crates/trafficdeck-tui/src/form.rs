//! Application form panel.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use trafficdeck_core::workflow::{interest_label, INTEREST_OPTIONS};
use trafficdeck_core::{FormField, Phase, SubmissionState};

use crate::styles::ColorTheme;

/// Interest key after (or before) `current` in option order.
///
/// An unset or unknown key starts from the first (or last) option.
#[must_use]
pub fn cycle_interest(current: &str, forward: bool) -> &'static str {
    let n = INTEREST_OPTIONS.len();
    let next = match INTEREST_OPTIONS.iter().position(|(k, _)| *k == current) {
        Some(i) if forward => (i + 1) % n,
        Some(i) => (i + n - 1) % n,
        None if forward => 0,
        None => n - 1,
    };
    INTEREST_OPTIONS[next].0
}

fn field_value(state: &SubmissionState, field: FormField) -> String {
    let raw = state.fields.get(field);
    match field {
        FormField::Interest => interest_label(raw).unwrap_or(raw).to_string(),
        _ => raw.to_string(),
    }
}

/// Render the form. `focus` is the field receiving keystrokes, if any.
pub fn render_form(frame: &mut Frame, area: Rect, state: &SubmissionState, focus: Option<FormField>) {
    let theme = ColorTheme::default();
    let mut lines = Vec::new();

    if state.phase == Phase::Succeeded {
        lines.push(Line::styled("ACCESS GRANTED", theme.success_style()));
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            "Your application has been submitted. We will contact you via Telegram within 24 hours.",
            theme.text_style(),
        ));
    } else {
        for field in FormField::ALL {
            let focused = focus == Some(field);
            let marker = if focused { "▶ " } else { "  " };
            let value = field_value(state, field);
            let value_span = if value.is_empty() {
                Span::styled(field.placeholder(), theme.muted_style())
            } else {
                Span::styled(value, theme.text_style())
            };
            let mut spans = vec![
                Span::styled(marker, theme.key_style()),
                Span::styled(format!("{}: ", field.label()), theme.header_style()),
                value_span,
            ];
            if focused && state.phase == Phase::Editing {
                spans.push(Span::styled("▏", theme.key_style()));
            }
            lines.push(Line::from(spans));
        }
        lines.push(Line::raw(""));

        let button_style = match state.phase {
            Phase::Submitting => theme.key_style(),
            _ => theme.success_style(),
        };
        lines.push(Line::styled(
            format!("[ {} ]", state.phase.status_label()),
            button_style,
        ));
        if let Some(err) = &state.last_error {
            lines.push(Line::styled(format!("✗ {err}"), theme.error_style()));
        }
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" ACCESS NODE TERMINAL ")
        .border_style(theme.border_style(focus.is_some()));
    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
