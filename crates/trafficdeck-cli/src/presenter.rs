//! Catalog presentation with `console` styling.

use std::fmt::Write as _;

use console::style;

use trafficdeck_core::format::{format_metric_for_key, metric_icon};
use trafficdeck_core::{CaseRecord, DashboardState, DatasetGroup};

/// Applies terminal styles unless color is disabled.
#[derive(Debug, Clone, Copy)]
pub struct Styler {
    color: bool,
}

impl Styler {
    #[must_use]
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Color unless `NO_COLOR` is set or stdout is not a color terminal.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(std::env::var_os("NO_COLOR").is_none() && console::colors_enabled())
    }

    #[must_use]
    pub fn heading(&self, text: &str) -> String {
        if self.color {
            style(text).bold().cyan().to_string()
        } else {
            text.to_string()
        }
    }

    #[must_use]
    pub fn value(&self, text: &str) -> String {
        if self.color {
            style(text).green().to_string()
        } else {
            text.to_string()
        }
    }

    #[must_use]
    pub fn dim(&self, text: &str) -> String {
        if self.color {
            style(text).dim().to_string()
        } else {
            text.to_string()
        }
    }

    /// `[OK] text`
    #[must_use]
    pub fn ok(&self, text: &str) -> String {
        if self.color {
            format!("{} {text}", style("[OK]").green().bold())
        } else {
            format!("[OK] {text}")
        }
    }

    /// `[ERROR] text`
    #[must_use]
    pub fn error(&self, text: &str) -> String {
        if self.color {
            format!("{} {text}", style("[ERROR]").red().bold())
        } else {
            format!("[ERROR] {text}")
        }
    }
}

/// Renders the catalog and the live counter as plain text.
#[derive(Debug, Clone, Copy)]
pub struct CatalogPresenter {
    styler: Styler,
    quiet: bool,
}

impl CatalogPresenter {
    #[must_use]
    pub fn new(styler: Styler, quiet: bool) -> Self {
        Self { styler, quiet }
    }

    /// Render every category, or only `only` when given.
    ///
    /// Quiet mode lists case titles without metrics.
    #[must_use]
    pub fn render(&self, catalog: &DatasetGroup, only: Option<&str>) -> String {
        let mut out = String::new();
        for category in catalog
            .categories()
            .iter()
            .filter(|c| only.is_none() || only == Some(c.key.as_str()))
        {
            if self.quiet {
                for case in &category.cases {
                    let _ = writeln!(out, "{}\t{}", category.key, case.title);
                }
                continue;
            }
            let _ = writeln!(
                out,
                "{}",
                self.styler
                    .heading(&format!("=== {} ===", category.key.to_uppercase()))
            );
            for case in &category.cases {
                out.push_str(&self.render_case(case));
            }
        }
        out
    }

    fn render_case(&self, case: &CaseRecord) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "  {} {}",
            case.title,
            self.styler.dim(&format!("({})", case.vertical))
        );
        for metric in &case.metrics {
            let _ = writeln!(
                out,
                "    {} {:<12} {}",
                metric_icon(&metric.key),
                metric.key.to_uppercase(),
                self.styler
                    .value(&format_metric_for_key(&metric.key, metric.value))
            );
        }
        out
    }

    /// One-line dashboard status.
    #[must_use]
    pub fn render_state(&self, state: &DashboardState) -> String {
        format!(
            "{} {} | live leads: {}",
            self.styler.heading("TrafficDeck"),
            state.active_category,
            self.styler
                .value(&trafficdeck_core::format::format_thousands(state.live_counter))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(quiet: bool) -> CatalogPresenter {
        CatalogPresenter::new(Styler::new(false), quiet)
    }

    #[test]
    fn lists_all_categories_with_metrics() {
        let out = plain(false).render(&DatasetGroup::builtin(), None);
        assert!(out.contains("=== GAMBLING ==="));
        assert!(out.contains("=== CRYPTO ==="));
        assert!(out.contains("Casino Blitz Campaign (Gambling)"));
        assert!(out.contains(&format!("{:<12} {}", "ROAS", "340%")));
        assert!(out.contains("$45,280"));
        assert!(out.contains("2.1M"));
    }

    #[test]
    fn filters_one_category() {
        let out = plain(false).render(&DatasetGroup::builtin(), Some("nutra"));
        assert!(out.contains("Weight Loss Revolution"));
        assert!(!out.contains("GAMBLING"));
    }

    #[test]
    fn quiet_lists_titles() {
        let out = plain(true).render(&DatasetGroup::builtin(), Some("crypto"));
        assert_eq!(
            out,
            "crypto\tDeFi Token Launch\ncrypto\tNFT Marketplace Boost\n"
        );
    }

    #[test]
    fn state_line() {
        let state = DashboardState {
            active_category: "gambling".into(),
            live_counter: 1247,
        };
        assert_eq!(
            plain(false).render_state(&state),
            "TrafficDeck gambling | live leads: 1,247"
        );
    }

    #[test]
    fn styler_without_color_is_plain() {
        let styler = Styler::new(false);
        assert_eq!(styler.ok("done"), "[OK] done");
        assert_eq!(styler.error("bad"), "[ERROR] bad");
        assert_eq!(styler.heading("x"), "x");
    }

    #[test]
    fn styler_with_color_keeps_text() {
        let styler = Styler::new(true);
        assert!(styler.value("340%").contains("340%"));
    }
}
