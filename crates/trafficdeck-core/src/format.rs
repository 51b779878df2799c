//! Display formatting for dashboard metrics.

use std::fmt;

/// How a metric value is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    /// Rendered with a trailing `%` (`roas`, `ctr`).
    Percentage,
    /// Rendered as dollars with thousands separators (`profit`).
    Currency,
    /// Rendered in millions with one decimal (`impressions`).
    LargeCount,
    /// Anything else: the value as-is.
    Raw,
}

impl MetricKind {
    /// Classify a metric key. Unknown keys map to [`MetricKind::Raw`].
    #[must_use]
    pub fn for_key(key: &str) -> Self {
        match key.to_ascii_lowercase().as_str() {
            "roas" | "ctr" => Self::Percentage,
            "profit" => Self::Currency,
            "impressions" => Self::LargeCount,
            _ => Self::Raw,
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Percentage => "percentage",
            Self::Currency => "currency",
            Self::LargeCount => "large-count",
            Self::Raw => "raw",
        };
        f.write_str(name)
    }
}

/// Format a metric value for display.
#[must_use]
pub fn format_metric(kind: MetricKind, value: f64) -> String {
    match kind {
        MetricKind::Percentage => format!("{value}%"),
        MetricKind::Currency => format_currency(value),
        MetricKind::LargeCount => format!("{:.1}M", value / 1_000_000.0),
        MetricKind::Raw => value.to_string(),
    }
}

/// Format a metric by its catalog key.
#[must_use]
pub fn format_metric_for_key(key: &str, value: f64) -> String {
    format_metric(MetricKind::for_key(key), value)
}

/// Icon shown next to a metric.
#[must_use]
pub fn metric_icon(key: &str) -> &'static str {
    match key.to_ascii_lowercase().as_str() {
        "roas" => "📈",
        "profit" => "💰",
        "impressions" => "👁",
        "ctr" => "🎯",
        _ => "📊",
    }
}

/// Format a number with thousand separators.
#[must_use]
pub fn format_thousands(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().enumerate() {
        if i > 0 && (s.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return format!("${value}");
    }
    let sign = if value < 0.0 { "-" } else { "" };
    let cents = (value.abs() * 100.0).round() as u64;
    let (whole, frac) = (cents / 100, cents % 100);
    if frac == 0 {
        format!("{sign}${}", format_thousands(whole))
    } else {
        format!("{sign}${}.{frac:02}", format_thousands(whole))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_by_key() {
        assert_eq!(MetricKind::for_key("roas"), MetricKind::Percentage);
        assert_eq!(MetricKind::for_key("CTR"), MetricKind::Percentage);
        assert_eq!(MetricKind::for_key("profit"), MetricKind::Currency);
        assert_eq!(MetricKind::for_key("impressions"), MetricKind::LargeCount);
        assert_eq!(MetricKind::for_key("bounce"), MetricKind::Raw);
    }

    #[test]
    fn percentage() {
        assert_eq!(format_metric(MetricKind::Percentage, 340.0), "340%");
        assert_eq!(format_metric(MetricKind::Percentage, 8.4), "8.4%");
    }

    #[test]
    fn currency() {
        assert_eq!(format_metric(MetricKind::Currency, 45_280.0), "$45,280");
        assert_eq!(format_metric(MetricKind::Currency, 999.0), "$999");
        assert_eq!(format_metric(MetricKind::Currency, 1_234.5), "$1,234.50");
        assert_eq!(format_metric(MetricKind::Currency, -1_000.0), "-$1,000");
    }

    #[test]
    fn large_count() {
        assert_eq!(format_metric(MetricKind::LargeCount, 2_100_000.0), "2.1M");
        assert_eq!(format_metric(MetricKind::LargeCount, 4_100_000.0), "4.1M");
        assert_eq!(format_metric(MetricKind::LargeCount, 0.0), "0.0M");
    }

    #[test]
    fn raw_passthrough() {
        assert_eq!(format_metric(MetricKind::Raw, 12.25), "12.25");
        assert_eq!(format_metric_for_key("unheard-of", 7.0), "7");
    }

    #[test]
    fn non_finite_values_do_not_panic() {
        for kind in [
            MetricKind::Percentage,
            MetricKind::Currency,
            MetricKind::LargeCount,
            MetricKind::Raw,
        ] {
            let _ = format_metric(kind, f64::NAN);
            let _ = format_metric(kind, f64::INFINITY);
        }
    }

    #[test]
    fn thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(42), "42");
        assert_eq!(format_thousands(1_234), "1,234");
        assert_eq!(format_thousands(1_000_000), "1,000,000");
    }

    #[test]
    fn icons() {
        assert_eq!(metric_icon("profit"), "💰");
        assert_eq!(metric_icon("whatever"), "📊");
    }
}
