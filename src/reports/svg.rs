//! SVG line-chart rendering for traffic series.

use crate::Result;
use crate::traffic::Series;
use core::fmt::Write;

const CHART_WIDTH: f64 = 800.0;
const CHART_HEIGHT: f64 = 300.0;
const MARGIN_LEFT: f64 = 60.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 80.0;
const PLOT_WIDTH: f64 = CHART_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
const PLOT_HEIGHT: f64 = CHART_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
const GRID_DIVISIONS: u64 = 4;
const MAX_X_TICKS: usize = 12;
const MARKER_RADIUS: f64 = 3.0;

const LINE_COLOR: &str = "#1f77b4";
const GRID_COLOR: &str = "#dddddd";
const TEXT_COLOR: &str = "#333333";

/// Render a label/value series as a standalone SVG line chart.
///
/// The series is drawn as-is, in label order; callers are expected to skip
/// rendering entirely when the series is empty.
pub fn generate<W: Write>(series: &Series, title: &str, x_label: &str, y_label: &str, writer: &mut W) -> Result<()> {
    let max_value = round_max(series.values.iter().copied().max().unwrap_or(0));

    writeln!(
        writer,
        "<svg xmlns='http://www.w3.org/2000/svg' width='{CHART_WIDTH}' height='{CHART_HEIGHT}' \
         viewBox='0 0 {CHART_WIDTH} {CHART_HEIGHT}' font-family='sans-serif' font-size='11'>"
    )?;
    writeln!(writer, "<rect width='{CHART_WIDTH}' height='{CHART_HEIGHT}' fill='white'/>")?;
    writeln!(
        writer,
        "<text x='{:.1}' y='{:.1}' text-anchor='middle' font-size='15' fill='{TEXT_COLOR}'>{}</text>",
        CHART_WIDTH / 2.0,
        MARGIN_TOP / 2.0,
        escape(title)
    )?;

    write_grid(writer, max_value)?;
    write_points(writer, series, max_value)?;
    write_axis_labels(writer, x_label, y_label)?;

    writeln!(writer, "</svg>")?;
    Ok(())
}

fn write_grid<W: Write>(writer: &mut W, max_value: u64) -> Result<()> {
    for division in 0..=GRID_DIVISIONS {
        let value = max_value * division / GRID_DIVISIONS;
        let y = value_to_y(value, max_value);
        writeln!(
            writer,
            "<line x1='{MARGIN_LEFT}' y1='{y:.1}' x2='{:.1}' y2='{y:.1}' stroke='{GRID_COLOR}'/>",
            MARGIN_LEFT + PLOT_WIDTH
        )?;
        writeln!(
            writer,
            "<text x='{:.1}' y='{:.1}' text-anchor='end' fill='{TEXT_COLOR}'>{value}</text>",
            MARGIN_LEFT - 6.0,
            y + 4.0
        )?;
    }
    Ok(())
}

fn write_points<W: Write>(writer: &mut W, series: &Series, max_value: u64) -> Result<()> {
    let count = series.values.len();
    let tick_step = count.div_ceil(MAX_X_TICKS).max(1);

    let mut points = String::new();
    for (index, value) in series.values.iter().enumerate() {
        let x = index_to_x(index, count);
        let y = value_to_y(*value, max_value);
        write!(points, "{x:.1},{y:.1} ")?;
    }
    writeln!(
        writer,
        "<polyline points='{}' fill='none' stroke='{LINE_COLOR}' stroke-width='1.5'/>",
        points.trim_end()
    )?;

    for (index, (label, value)) in series.labels.iter().zip(&series.values).enumerate() {
        let x = index_to_x(index, count);
        let y = value_to_y(*value, max_value);
        writeln!(
            writer,
            "<circle cx='{x:.1}' cy='{y:.1}' r='{MARKER_RADIUS}' fill='{LINE_COLOR}'><title>{}: {value}</title></circle>",
            escape(label)
        )?;

        if index % tick_step == 0 || index + 1 == count {
            let tick_y = MARGIN_TOP + PLOT_HEIGHT + 14.0;
            writeln!(
                writer,
                "<text x='{x:.1}' y='{tick_y:.1}' text-anchor='end' fill='{TEXT_COLOR}' \
                 transform='rotate(-45 {x:.1} {tick_y:.1})'>{}</text>",
                escape(label)
            )?;
        }
    }
    Ok(())
}

fn write_axis_labels<W: Write>(writer: &mut W, x_label: &str, y_label: &str) -> Result<()> {
    writeln!(
        writer,
        "<text x='{:.1}' y='{:.1}' text-anchor='middle' font-size='12' fill='{TEXT_COLOR}'>{}</text>",
        MARGIN_LEFT + PLOT_WIDTH / 2.0,
        CHART_HEIGHT - 8.0,
        escape(x_label)
    )?;

    let y_mid = MARGIN_TOP + PLOT_HEIGHT / 2.0;
    writeln!(
        writer,
        "<text x='14' y='{y_mid:.1}' text-anchor='middle' font-size='12' fill='{TEXT_COLOR}' \
         transform='rotate(-90 14 {y_mid:.1})'>{}</text>",
        escape(y_label)
    )?;
    Ok(())
}

/// Horizontal position of the point at `index` out of `count`; a single
/// point sits in the middle of the plot.
fn index_to_x(index: usize, count: usize) -> f64 {
    if count <= 1 {
        return MARGIN_LEFT + PLOT_WIDTH / 2.0;
    }

    #[expect(clippy::cast_precision_loss, reason = "point counts are far below 2^52")]
    let fraction = index as f64 / (count - 1) as f64;
    MARGIN_LEFT + fraction * PLOT_WIDTH
}

fn value_to_y(value: u64, max_value: u64) -> f64 {
    #[expect(clippy::cast_precision_loss, reason = "traffic counts are far below 2^52")]
    let fraction = value as f64 / max_value.max(1) as f64;
    MARGIN_TOP + PLOT_HEIGHT - fraction * PLOT_HEIGHT
}

/// Round up to the nearest 1/2/5 × 10^k so the axis maximum lands on a
/// round number. Values near `u64::MAX` have no round candidate above them,
/// so they saturate instead of overflowing.
fn round_max(value: u64) -> u64 {
    let mut scale = 1u64;
    loop {
        for multiplier in [1u64, 2, 5] {
            let Some(candidate) = multiplier.checked_mul(scale) else {
                return u64::MAX;
            };
            if candidate >= value {
                return candidate;
            }
        }
        let Some(next) = scale.checked_mul(10) else {
            return u64::MAX;
        };
        scale = next;
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;").replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(entries: &[(&str, u64)]) -> Series {
        Series {
            labels: entries.iter().map(|(label, _)| (*label).to_string()).collect(),
            values: entries.iter().map(|(_, value)| *value).collect(),
        }
    }

    fn render(series: &Series) -> String {
        let mut svg = String::new();
        generate(series, "Daily Unique Visitors", "date", "unique visitors", &mut svg).unwrap();
        svg
    }

    #[test]
    fn output_is_a_standalone_svg_document() {
        let svg = render(&series(&[("2025-11-26", 4), ("2025-11-27", 5)]));

        assert!(svg.starts_with("<svg "));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains("xmlns='http://www.w3.org/2000/svg'"));
    }

    #[test]
    fn output_contains_title_axis_labels_and_points() {
        let svg = render(&series(&[("2025-11-26", 4), ("2025-11-27", 5)]));

        assert!(svg.contains("Daily Unique Visitors"));
        assert!(svg.contains(">date</text>"));
        assert!(svg.contains(">unique visitors</text>"));
        assert!(svg.contains("<polyline"));
        assert_eq!(svg.matches("<circle").count(), 2);
    }

    #[test]
    fn single_point_renders_without_panicking() {
        let svg = render(&series(&[("2025-11-26", 4)]));
        assert_eq!(svg.matches("<circle").count(), 1);
    }

    #[test]
    fn zero_values_render_on_the_baseline() {
        let svg = render(&series(&[("2025-11-26", 0), ("2025-11-27", 0)]));
        assert!(svg.contains("<polyline"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let data = series(&[("2025-11-26", 4), ("2025-11-27", 5), ("2025-11-28", 1)]);
        assert_eq!(render(&data), render(&data));
    }

    #[test]
    fn labels_are_escaped() {
        let svg = render(&series(&[("<bad&label>", 1)]));

        assert!(svg.contains("&lt;bad&amp;label&gt;"));
        assert!(!svg.contains("<bad&label>"));
    }

    #[test]
    fn round_max_picks_round_axis_maxima() {
        assert_eq!(round_max(0), 1);
        assert_eq!(round_max(1), 1);
        assert_eq!(round_max(2), 2);
        assert_eq!(round_max(3), 5);
        assert_eq!(round_max(7), 10);
        assert_eq!(round_max(12), 20);
        assert_eq!(round_max(47), 50);
        assert_eq!(round_max(51), 100);
        assert_eq!(round_max(100), 100);
    }

    #[test]
    fn round_max_saturates_near_u64_max() {
        // 10^19 is the largest power of ten with round candidates in range.
        assert_eq!(round_max(10_000_000_000_000_000_000), 10_000_000_000_000_000_000);
        assert_eq!(round_max(10_000_000_000_000_000_001), u64::MAX);
        assert_eq!(round_max(u64::MAX), u64::MAX);
    }
}
