//! Curve output formatting.

use std::fmt::Write as _;
use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use trafficdeck_core::CurveSpec;

/// Format a duration for display.
#[must_use]
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 1.0 {
        format!("{:.0}ms", secs * 1000.0)
    } else {
        format!("{secs:.2}s")
    }
}

/// Human-readable curve report: path data, points and reveal delays.
///
/// In quiet mode only the path data is returned.
#[must_use]
pub fn curve_text(curve: &CurveSpec, quiet: bool) -> String {
    if quiet {
        return curve.path_data();
    }
    let mut out = String::new();
    if curve.is_degenerate() {
        let _ = writeln!(out, "path:   (single point, no path)");
    } else {
        let _ = writeln!(out, "path:   {}", curve.path_data());
    }
    let _ = writeln!(out, "points: {}", curve.points.len());
    for (point, delay) in curve.points.iter().zip(&curve.reveal_delays) {
        let _ = writeln!(
            out,
            "  ({:>6.2}, {:>6.2})  reveal at {delay:.1}s",
            point.x, point.y
        );
    }
    out.trim_end().to_string()
}

/// Curve as pretty JSON.
///
/// # Errors
///
/// Returns the serializer error, which only occurs for non-finite values.
pub fn curve_json(curve: &CurveSpec) -> serde_json::Result<String> {
    serde_json::to_string_pretty(curve)
}

/// Write `contents` to a file, replacing it.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be created or written.
pub fn write_to_file(path: &Path, contents: &str) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    writeln!(file, "{contents}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use trafficdeck_core::chart_curve;

    #[test]
    fn format_duration_units() {
        assert_eq!(format_duration(Duration::from_millis(42)), "42ms");
        assert_eq!(format_duration(Duration::from_millis(3_010)), "3.01s");
    }

    #[test]
    fn quiet_is_path_only() {
        let curve = chart_curve(&[0.0, 1.0]).unwrap();
        assert_eq!(curve_text(&curve, true), "M 0,100 C 50,100 50,20 100,20");
    }

    #[test]
    fn text_lists_points_and_delays() {
        let curve = chart_curve(&[0.2, 0.5, 0.3, 0.8]).unwrap();
        let text = curve_text(&curve, false);
        assert!(text.starts_with("path:   M 0,84"));
        assert!(text.contains("points: 4"));
        assert!(text.contains("(100.00,  36.00)  reveal at 1.3s"));
    }

    #[test]
    fn degenerate_curve_text() {
        let curve = chart_curve(&[0.5]).unwrap();
        assert!(curve_text(&curve, false).contains("single point"));
    }

    #[test]
    fn json_has_tagged_commands() {
        let curve = chart_curve(&[0.0, 1.0]).unwrap();
        let json: serde_json::Value = serde_json::from_str(&curve_json(&curve).unwrap()).unwrap();
        assert_eq!(json["commands"][0]["cmd"], "move_to");
        assert_eq!(json["commands"][1]["cmd"], "cubic_to");
        assert_eq!(json["points"][1]["y"], 20.0);
    }

    #[test]
    fn write_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("curve.txt");
        write_to_file(&path, "M 0,60").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "M 0,60\n");
    }
}
