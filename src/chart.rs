// 🍩 Pie / Donut Chart Geometry
//
// Turns weighted segments into SVG path data. Angles are in degrees, 0° is
// 12 o'clock and slices run clockwise in input order:
//
//   start(i) = sweep(0) + ... + sweep(i-1)
//   sweep(i) = value(i) / Σvalue × 360
//
// The donut hole is a filled circle drawn over the slices.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt::Write as _;
use tracing::warn;

use crate::error::{DashboardError, Result};
use crate::utils::chart_aria_label;

/// Hole radius as a fraction of the outer radius
pub const HOLE_RATIO: f64 = 0.35;

/// Sweeps within this of 360° are drawn as a full ring
const FULL_CIRCLE_EPSILON: f64 = 1e-9;

// ============================================================================
// INPUT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieSegment {
    pub value: f64,
    pub color: String,
    pub label: String,
}

impl PieSegment {
    pub fn new(value: f64, color: &str, label: &str) -> Self {
        PieSegment {
            value,
            color: color.to_string(),
            label: label.to_string(),
        }
    }
}

// ============================================================================
// OUTPUT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slice {
    pub label: String,
    pub color: String,
    pub start_angle: f64,
    pub sweep: f64,
    pub large_arc: bool,
    /// Independently rounded share; legend totals may be 99 or 101
    pub percentage: u32,
    /// SVG path data, empty for zero-valued segments
    pub path: String,
}

impl Slice {
    pub fn end_angle(&self) -> f64 {
        self.start_angle + self.sweep
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: String,
    pub percentage: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieChart {
    pub size: f64,
    pub radius: f64,
    pub hole_radius: f64,
    pub total: f64,
    pub slices: Vec<Slice>,
}

impl PieChart {
    /// Lay out `segments` in a `size` × `size` box
    ///
    /// Rejects empty input and inputs whose values sum to zero, since no share
    /// can be computed. Negative or non-finite values are rejected too.
    pub fn layout(segments: &[PieSegment], size: f64) -> Result<PieChart> {
        if let Some(bad) = segments
            .iter()
            .find(|s| !s.value.is_finite() || s.value < 0.0)
        {
            warn!(label = %bad.label, value = bad.value, "rejected pie segment");
            return Err(DashboardError::InvalidSegment {
                label: bad.label.clone(),
                value: bad.value,
            });
        }

        // Shares come from values scaled by the largest one so huge inputs
        // cannot overflow the sum
        let max = segments.iter().map(|s| s.value).fold(0.0_f64, f64::max);
        if max <= 0.0 {
            warn!(segments = segments.len(), "pie chart has no positive total");
            return Err(DashboardError::EmptyChart {
                segments: segments.len(),
            });
        }

        let scaled_total: f64 = segments.iter().map(|s| s.value / max).sum();
        let total: f64 = segments.iter().map(|s| s.value).sum();

        let radius = size / 2.0;
        let center = (radius, radius);
        let mut cumulative = 0.0;

        let slices = segments
            .iter()
            .map(|segment| {
                let share = (segment.value / max) / scaled_total;
                let sweep = share * 360.0;
                let start_angle = cumulative;
                cumulative += sweep;

                let large_arc = sweep > 180.0;
                let path = if sweep == 0.0 {
                    String::new()
                } else if sweep >= 360.0 - FULL_CIRCLE_EPSILON {
                    full_ring_path(center, radius)
                } else {
                    wedge_path(center, radius, start_angle, start_angle + sweep, large_arc)
                };

                Slice {
                    label: segment.label.clone(),
                    color: segment.color.clone(),
                    start_angle,
                    sweep,
                    large_arc,
                    percentage: (share * 100.0).round() as u32,
                    path,
                }
            })
            .collect();

        Ok(PieChart {
            size,
            radius,
            hole_radius: radius * HOLE_RATIO,
            total,
            slices,
        })
    }

    pub fn legend(&self) -> Vec<LegendEntry> {
        self.slices
            .iter()
            .map(|s| LegendEntry {
                label: s.label.clone(),
                color: s.color.clone(),
                percentage: s.percentage,
            })
            .collect()
    }

    /// Textual legend, one `"Label: NN%"` line per segment
    pub fn legend_lines(&self) -> Vec<String> {
        self.slices
            .iter()
            .map(|s| format!("{}: {}%", s.label, s.percentage))
            .collect()
    }

    /// Render the donut as a standalone SVG document
    pub fn to_svg(&self, title: &str, hole_color: &str) -> String {
        let label = chart_aria_label(
            title,
            self.slices.iter().map(|s| (s.label.as_str(), s.percentage)),
        );

        let mut svg = String::new();
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {s} {s}" width="{s}" height="{s}" role="img" aria-label="{label}">"#,
            s = fmt_num(self.size),
            label = escape_attr(&label),
        );
        let _ = writeln!(svg, "  <title>{}</title>", escape_attr(title));

        for slice in self.slices.iter().filter(|s| !s.path.is_empty()) {
            let _ = writeln!(
                svg,
                r#"  <path d="{}" fill="{}"><title>{}: {}%</title></path>"#,
                slice.path,
                escape_attr(&slice.color),
                escape_attr(&slice.label),
                slice.percentage,
            );
        }

        let _ = writeln!(
            svg,
            r#"  <circle cx="{c}" cy="{c}" r="{r}" fill="{fill}"/>"#,
            c = fmt_num(self.radius),
            r = fmt_num(self.hole_radius),
            fill = escape_attr(hole_color),
        );
        svg.push_str("</svg>\n");
        svg
    }
}

// ============================================================================
// GEOMETRY
// ============================================================================

/// Point on the circle at `angle` degrees clockwise from 12 o'clock
pub fn polar_to_cartesian(center: (f64, f64), radius: f64, angle: f64) -> (f64, f64) {
    let radians = (angle - 90.0) * PI / 180.0;
    (
        center.0 + radius * radians.cos(),
        center.1 + radius * radians.sin(),
    )
}

fn wedge_path(center: (f64, f64), radius: f64, start: f64, end: f64, large_arc: bool) -> String {
    let (x1, y1) = polar_to_cartesian(center, radius, start);
    let (x2, y2) = polar_to_cartesian(center, radius, end);

    format!(
        "M {cx} {cy} L {x1} {y1} A {r} {r} 0 {large} 1 {x2} {y2} Z",
        cx = fmt_num(center.0),
        cy = fmt_num(center.1),
        x1 = fmt_num(x1),
        y1 = fmt_num(y1),
        r = fmt_num(radius),
        large = u8::from(large_arc),
        x2 = fmt_num(x2),
        y2 = fmt_num(y2),
    )
}

/// A 360° arc has coincident endpoints and renders nothing; use two halves
fn full_ring_path(center: (f64, f64), radius: f64) -> String {
    let (cx, cy) = center;
    format!(
        "M {cx} {top} A {r} {r} 0 1 1 {cx} {bottom} A {r} {r} 0 1 1 {cx} {top} Z",
        cx = fmt_num(cx),
        top = fmt_num(cy - radius),
        bottom = fmt_num(cy + radius),
        r = fmt_num(radius),
    )
}

/// Two decimals, trailing zeros trimmed, no "-0"
fn fmt_num(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    let text = format!("{:.2}", rounded);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn escape_attr(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<PieSegment> {
        vec![
            PieSegment::new(45.0, "#F7931A", "Bitcoin"),
            PieSegment::new(30.0, "#627EEA", "Ethereum"),
            PieSegment::new(15.0, "#14F195", "Solana"),
            PieSegment::new(10.0, "#2775CA", "USD Coin"),
        ]
    }

    #[test]
    fn test_sweeps_sum_to_full_circle() {
        let inputs = vec![
            sample(),
            vec![PieSegment::new(1.0, "#000", "a"), PieSegment::new(2.0, "#111", "b")],
            vec![
                PieSegment::new(0.1, "#000", "a"),
                PieSegment::new(0.2, "#111", "b"),
                PieSegment::new(0.3, "#222", "c"),
                PieSegment::new(7.0, "#333", "d"),
            ],
        ];

        for segments in inputs {
            let chart = PieChart::layout(&segments, 200.0).unwrap();
            let sum: f64 = chart.slices.iter().map(|s| s.sweep).sum();
            assert!((sum - 360.0).abs() < 1e-6, "sum was {}", sum);
        }
    }

    #[test]
    fn test_slices_are_contiguous_in_input_order() {
        let chart = PieChart::layout(&sample(), 200.0).unwrap();

        assert_eq!(chart.slices[0].start_angle, 0.0);
        for pair in chart.slices.windows(2) {
            assert!((pair[1].start_angle - pair[0].end_angle()).abs() < 1e-9);
        }

        let labels: Vec<&str> = chart.slices.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Bitcoin", "Ethereum", "Solana", "USD Coin"]);
        assert!((chart.slices[1].start_angle - 162.0).abs() < 1e-9);
    }

    #[test]
    fn test_reordering_changes_layout() {
        let mut reversed = sample();
        reversed.reverse();

        let a = PieChart::layout(&sample(), 200.0).unwrap();
        let b = PieChart::layout(&reversed, 200.0).unwrap();

        assert_eq!(b.slices[0].label, "USD Coin");
        assert!((b.slices[0].sweep - 36.0).abs() < 1e-9);
        assert_ne!(a.slices[0].path, b.slices[0].path);
    }

    #[test]
    fn test_large_arc_flag() {
        let segments = vec![
            PieSegment::new(3.0, "#000", "major"),
            PieSegment::new(1.0, "#111", "minor"),
        ];
        let chart = PieChart::layout(&segments, 100.0).unwrap();

        assert!(chart.slices[0].large_arc);
        assert!(chart.slices[0].path.contains(" 0 1 1 "));
        assert!(!chart.slices[1].large_arc);
        assert!(chart.slices[1].path.contains(" 0 0 1 "));
    }

    #[test]
    fn test_exact_half_is_not_large_arc() {
        let segments = vec![
            PieSegment::new(1.0, "#000", "left"),
            PieSegment::new(1.0, "#111", "right"),
        ];
        let chart = PieChart::layout(&segments, 100.0).unwrap();

        assert!(chart.slices.iter().all(|s| (s.sweep - 180.0).abs() < 1e-9));
        assert!(chart.slices.iter().all(|s| !s.large_arc));
    }

    #[test]
    fn test_first_slice_starts_at_twelve_oclock() {
        let chart = PieChart::layout(&sample(), 200.0).unwrap();
        assert!(chart.slices[0].path.starts_with("M 100 100 L 100 0 A 100 100"));
    }

    #[test]
    fn test_polar_to_cartesian_clockwise() {
        let (x, y) = polar_to_cartesian((50.0, 50.0), 50.0, 90.0);
        assert!((x - 100.0).abs() < 1e-9);
        assert!((y - 50.0).abs() < 1e-9);

        let (x, y) = polar_to_cartesian((50.0, 50.0), 50.0, 180.0);
        assert!((x - 50.0).abs() < 1e-9);
        assert!((y - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_segment_draws_full_ring() {
        let chart = PieChart::layout(&[PieSegment::new(5.0, "#F7931A", "Bitcoin")], 100.0).unwrap();
        let slice = &chart.slices[0];

        assert!((slice.sweep - 360.0).abs() < 1e-9);
        assert!(slice.large_arc);
        assert_eq!(slice.percentage, 100);
        assert_eq!(slice.path.matches(" A ").count(), 2);
    }

    #[test]
    fn test_zero_valued_segment_has_no_path() {
        let segments = vec![
            PieSegment::new(2.0, "#000", "a"),
            PieSegment::new(0.0, "#111", "empty"),
            PieSegment::new(2.0, "#222", "b"),
        ];
        let chart = PieChart::layout(&segments, 100.0).unwrap();

        assert!(chart.slices[1].path.is_empty());
        assert_eq!(chart.slices[1].sweep, 0.0);
        assert!((chart.slices[2].start_angle - 180.0).abs() < 1e-9);
        assert!(!chart.to_svg("t", "#fff").contains("<title>empty"));
    }

    #[test]
    fn test_zero_total_is_rejected() {
        let segments = vec![
            PieSegment::new(0.0, "#000", "a"),
            PieSegment::new(0.0, "#111", "b"),
        ];

        assert!(matches!(
            PieChart::layout(&segments, 100.0),
            Err(DashboardError::EmptyChart { segments: 2 })
        ));
        assert!(matches!(
            PieChart::layout(&[], 100.0),
            Err(DashboardError::EmptyChart { segments: 0 })
        ));
    }

    #[test]
    fn test_huge_values_still_fill_the_circle() {
        let segments = vec![
            PieSegment::new(f64::MAX, "#000", "a"),
            PieSegment::new(f64::MAX, "#111", "b"),
        ];
        let chart = PieChart::layout(&segments, 100.0).unwrap();

        let sum: f64 = chart.slices.iter().map(|s| s.sweep).sum();
        assert!((sum - 360.0).abs() < 1e-6, "sum was {}", sum);
        assert!((chart.slices[0].sweep - 180.0).abs() < 1e-9);
        assert!(chart.slices.iter().all(|s| !s.path.is_empty()));
        assert_eq!(chart.legend_lines(), vec!["a: 50%", "b: 50%"]);
    }

    #[test]
    fn test_negative_and_nan_values_are_rejected() {
        let negative = vec![
            PieSegment::new(-1.0, "#000", "neg"),
            PieSegment::new(3.0, "#111", "ok"),
        ];
        let nan = vec![PieSegment::new(f64::NAN, "#000", "nan")];

        assert!(matches!(
            PieChart::layout(&negative, 100.0),
            Err(DashboardError::InvalidSegment { ref label, .. }) if label == "neg"
        ));
        assert!(PieChart::layout(&nan, 100.0).is_err());
    }

    #[test]
    fn test_percentages_are_rounded_independently() {
        let thirds = vec![
            PieSegment::new(1.0, "#000", "a"),
            PieSegment::new(1.0, "#111", "b"),
            PieSegment::new(1.0, "#222", "c"),
        ];
        let chart = PieChart::layout(&thirds, 100.0).unwrap();

        // Each third rounds to 33 on its own
        assert!(chart.legend().iter().all(|e| e.percentage == 33));
    }

    #[test]
    fn test_hole_radius() {
        let chart = PieChart::layout(&sample(), 200.0).unwrap();
        assert!((chart.hole_radius - 35.0).abs() < 1e-9);
        assert!(chart
            .to_svg("Allocation", "#ffffff")
            .contains(r#"<circle cx="100" cy="100" r="35""#));
    }

    #[test]
    fn test_legend_lines() {
        let chart = PieChart::layout(&sample(), 200.0).unwrap();
        assert_eq!(
            chart.legend_lines(),
            vec!["Bitcoin: 45%", "Ethereum: 30%", "Solana: 15%", "USD Coin: 10%"]
        );
    }

    #[test]
    fn test_svg_is_labelled_and_escaped() {
        let segments = vec![
            PieSegment::new(1.0, "#000", "A & B"),
            PieSegment::new(1.0, "#111", "C"),
        ];
        let svg = PieChart::layout(&segments, 100.0).unwrap().to_svg("Mix", "#fff");

        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"role="img""#));
        assert!(svg.contains(r#"aria-label="Mix: A &amp; B 50%, C 50%""#));
        assert_eq!(svg.matches("<path").count(), 2);
    }

    #[test]
    fn test_fmt_num() {
        assert_eq!(fmt_num(100.0), "100");
        assert_eq!(fmt_num(12.5), "12.5");
        assert_eq!(fmt_num(-0.0001), "0");
        assert_eq!(fmt_num(3.14159), "3.14");
    }
}
