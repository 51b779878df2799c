//! Curve synthesis: turns a sparse series into a smooth chart path.
//!
//! Points are spread evenly across a 0-100 horizontal range and scaled
//! into the lower `viewport_height_fraction` of a 0-100 vertical range
//! (y grows downwards, so larger values sit higher). Consecutive points
//! are joined by cubic Bézier segments whose two control points share
//! the horizontal midpoint and take the heights of the segment's start
//! and end point respectively. The curve touches every point (C0) but
//! its tangent may break at interior points.

use std::fmt::Write as _;

use serde::Serialize;

use crate::constants::{
    DEFAULT_REVEAL_BASE, DEFAULT_REVEAL_STEP, DEFAULT_VIEWPORT_HEIGHT_FRACTION, VIEWPORT_EXTENT,
};
use crate::error::DeckError;

/// Iterations used when inverting a segment's x(t).
const SAMPLE_ITERATIONS: usize = 60;

/// A point in the normalized 0-100 chart space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One drawing instruction of a synthesized path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum PathCommand {
    /// Start the path at a point.
    MoveTo { to: Point2D },
    /// Cubic Bézier from the current point to `to`.
    CubicTo {
        c1: Point2D,
        c2: Point2D,
        to: Point2D,
    },
}

/// Tunables for [`synthesize`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveOptions {
    /// Fraction of the viewport height covered by a value of 1.0.
    pub viewport_height_fraction: f64,
    /// Reveal delay of the first point, in seconds.
    pub reveal_base: f64,
    /// Reveal delay added per point, in seconds. Must be positive.
    pub reveal_step: f64,
}

impl Default for CurveOptions {
    fn default() -> Self {
        Self {
            viewport_height_fraction: DEFAULT_VIEWPORT_HEIGHT_FRACTION,
            reveal_base: DEFAULT_REVEAL_BASE,
            reveal_step: DEFAULT_REVEAL_STEP,
        }
    }
}

impl CurveOptions {
    /// Override the viewport height fraction.
    #[must_use]
    pub fn with_viewport(mut self, fraction: f64) -> Self {
        self.viewport_height_fraction = fraction;
        self
    }

    fn validate(&self) -> Result<(), DeckError> {
        if !self.viewport_height_fraction.is_finite() {
            return Err(DeckError::InvalidInput(
                "viewport height fraction must be finite".into(),
            ));
        }
        if !self.reveal_base.is_finite() {
            return Err(DeckError::InvalidInput("reveal base must be finite".into()));
        }
        if !(self.reveal_step.is_finite() && self.reveal_step > 0.0) {
            return Err(DeckError::InvalidInput(
                "reveal step must be a positive number".into(),
            ));
        }
        Ok(())
    }
}

/// Geometry and timing of a synthesized chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurveSpec {
    /// One point per series value, in input order.
    pub points: Vec<Point2D>,
    /// Path through every point. Empty for a single-point series.
    pub commands: Vec<PathCommand>,
    /// Seconds before each point is revealed; strictly increasing.
    pub reveal_delays: Vec<f64>,
}

impl CurveSpec {
    /// Whether the curve consists of a lone point with no path.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.commands.is_empty()
    }

    /// Render the path as SVG path data (`M x,y C ...`).
    ///
    /// Returns an empty string for a degenerate curve.
    #[must_use]
    pub fn path_data(&self) -> String {
        let mut out = String::new();
        for (i, command) in self.commands.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            // Writing to a String cannot fail.
            let _ = match command {
                PathCommand::MoveTo { to } => write!(out, "M {},{}", to.x, to.y),
                PathCommand::CubicTo { c1, c2, to } => write!(
                    out,
                    "C {},{} {},{} {},{}",
                    c1.x, c1.y, c2.x, c2.y, to.x, to.y
                ),
            };
        }
        out
    }

    /// Evaluate the path's y-coordinate at horizontal position `x`.
    ///
    /// Returns `None` when `x` lies outside the curve's horizontal span.
    /// At a data point's x the point's exact y is returned.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn sample(&self, x: f64) -> Option<f64> {
        if let Some(p) = self.points.iter().find(|p| p.x == x) {
            return Some(p.y);
        }
        self.points.windows(2).find_map(|pair| {
            let (start, end) = (pair[0], pair[1]);
            if x < start.x || x > end.x {
                return None;
            }
            let mid = (start.x + end.x) / 2.0;
            let t = invert_monotone(|t| bezier(start.x, mid, mid, end.x, t), x);
            Some(bezier(start.y, start.y, end.y, end.y, t))
        })
    }

    /// Number of points visible `elapsed` seconds into the reveal animation.
    #[must_use]
    pub fn revealed(&self, elapsed: f64) -> usize {
        self.reveal_delays.iter().take_while(|&&d| d <= elapsed).count()
    }
}

/// Synthesize a chart curve from `series`.
///
/// # Errors
///
/// Returns [`DeckError::InvalidInput`] for an empty series, a non-finite
/// value, a value too large to place in chart space, invalid options, or
/// a reveal step too small to keep the delays strictly increasing after
/// `reveal_base`.
pub fn synthesize(series: &[f64], opts: &CurveOptions) -> Result<CurveSpec, DeckError> {
    if series.is_empty() {
        return Err(DeckError::InvalidInput("series must not be empty".into()));
    }
    if let Some(i) = series.iter().position(|v| !v.is_finite()) {
        return Err(DeckError::InvalidInput(format!(
            "series value at index {i} is not finite"
        )));
    }
    opts.validate()?;

    let points = place_points(series, opts.viewport_height_fraction);
    if let Some(i) = points.iter().position(|p| !p.y.is_finite()) {
        return Err(DeckError::InvalidInput(format!(
            "series value at index {i} is out of range"
        )));
    }
    let commands = if points.len() < 2 {
        Vec::new()
    } else {
        build_commands(&points)
    };
    let reveal_delays = reveal_delays(points.len(), opts.reveal_base, opts.reveal_step);
    let unordered = reveal_delays.windows(2).any(|w| w[0] >= w[1]);
    if unordered || reveal_delays.iter().any(|d| !d.is_finite()) {
        return Err(DeckError::InvalidInput(format!(
            "reveal step {} cannot order {} points after base {}",
            opts.reveal_step,
            points.len(),
            opts.reveal_base
        )));
    }

    tracing::trace!(points = points.len(), "synthesized curve");

    Ok(CurveSpec {
        points,
        commands,
        reveal_delays,
    })
}

#[allow(clippy::cast_precision_loss)]
fn place_points(series: &[f64], fraction: f64) -> Vec<Point2D> {
    let n = series.len();
    let step = if n > 1 {
        VIEWPORT_EXTENT / (n - 1) as f64
    } else {
        0.0
    };
    series
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            Point2D::new(
                i as f64 * step,
                VIEWPORT_EXTENT - value * VIEWPORT_EXTENT * fraction,
            )
        })
        .collect()
}

fn build_commands(points: &[Point2D]) -> Vec<PathCommand> {
    let mut commands = Vec::with_capacity(points.len());
    commands.push(PathCommand::MoveTo { to: points[0] });
    for pair in points.windows(2) {
        let (prev, point) = (pair[0], pair[1]);
        let control_x = (prev.x + point.x) / 2.0;
        commands.push(PathCommand::CubicTo {
            c1: Point2D::new(control_x, prev.y),
            c2: Point2D::new(control_x, point.y),
            to: point,
        });
    }
    commands
}

#[allow(clippy::cast_precision_loss)]
fn reveal_delays(n: usize, base: f64, step: f64) -> Vec<f64> {
    (0..n).map(|i| base + i as f64 * step).collect()
}

/// One coordinate of a cubic Bézier at parameter `t`.
fn bezier(p0: f64, p1: f64, p2: f64, p3: f64, t: f64) -> f64 {
    let u = 1.0 - t;
    u * u * u * p0 + 3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t * p3
}

/// Find `t` in [0, 1] with `f(t) == target` for a non-decreasing `f`.
///
/// Midpoint control points keep a segment's x(t) strictly increasing,
/// so bisection always converges.
fn invert_monotone(f: impl Fn(f64) -> f64, target: f64) -> f64 {
    let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
    for _ in 0..SAMPLE_ITERATIONS {
        let mid = (lo + hi) / 2.0;
        if f(mid) < target {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    (lo + hi) / 2.0
}
