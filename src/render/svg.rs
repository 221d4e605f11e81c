use crate::render::plan::{BarChart, LineChart, Rgb};
use anyhow::{Context, bail};
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use std::path::Path;

const CHART_SIZE: (u32, u32) = (900, 600);
const TITLE_FONT: (&str, u32) = ("sans-serif", 28);
const LABEL_FONT: (&str, u32) = ("sans-serif", 16);
const AXIS_DESC_FONT: (&str, u32) = ("sans-serif", 20);

/// Caller-supplied text for one chart.
#[derive(Debug, Clone, Copy)]
pub struct ChartText<'a> {
    pub title: &'a str,
    pub x_desc: &'a str,
    pub y_desc: &'a str,
}

/// Draw a line chart plan to an SVG file.
///
/// Curves are drawn per contiguous run of present values, so a missing
/// point is a visible gap rather than an interpolated segment. Point
/// markers keep isolated samples visible.
pub fn write_line_chart(chart: &LineChart, text: &ChartText<'_>, path: &Path) -> anyhow::Result<()> {
    if chart.x_labels.is_empty() {
        bail!("line chart {:?} has no x labels to plot", text.title);
    }

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let n = chart.x_labels.len();
    let y_top = y_top(chart.curves.iter().flat_map(|c| c.points.iter().flatten().copied()));
    let x_labels = &chart.x_labels;

    let mut ctx = ChartBuilder::on(&root)
        .caption(text.title, TITLE_FONT)
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(-0.5..(n as f64 - 0.5), 0.0..y_top)?;

    ctx.configure_mesh()
        .disable_x_mesh()
        .x_labels(n)
        .x_label_formatter(&|x| category_label(x_labels, *x))
        .x_desc(text.x_desc)
        .y_desc(text.y_desc)
        .label_style(LABEL_FONT)
        .axis_desc_style(AXIS_DESC_FONT)
        .draw()?;

    for curve in &chart.curves {
        let color = rgb(curve.style.color);

        // Zero-radius anchor so every curve gets a legend entry, present
        // points or not.
        ctx.draw_series(std::iter::once(Circle::new((0.0, 0.0), 0, color.filled())))?
            .label(curve.name.as_str())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
            });

        for run in present_runs(&curve.points) {
            if run.len() < 2 {
                continue;
            }
            if curve.style.dashed {
                ctx.draw_series(DashedLineSeries::new(run, 8, 5, color.stroke_width(2)))?;
            } else {
                ctx.draw_series(LineSeries::new(run, color.stroke_width(2)))?;
            }
        }

        let markers = curve
            .points
            .iter()
            .enumerate()
            .filter_map(|(i, p)| p.map(|v| (i as f64, v)));
        ctx.draw_series(markers.map(|p| Circle::new(p, 3, color.filled())))?;
    }

    ctx.configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font(LABEL_FONT)
        .draw()?;

    root.present()
        .with_context(|| format!("write chart {}", path.display()))?;
    Ok(())
}

/// Draw a grouped bar chart plan to an SVG file. Zero values draw
/// zero-height bars, keeping one slot per structure in every group.
pub fn write_bar_chart(chart: &BarChart, text: &ChartText<'_>, path: &Path) -> anyhow::Result<()> {
    if chart.x_labels.is_empty() {
        bail!("bar chart {:?} has no x labels to plot", text.title);
    }

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let n = chart.x_labels.len();
    let y_top = y_top(chart.series.iter().flat_map(|s| s.values.iter().copied()));
    let x_labels = &chart.x_labels;

    let mut ctx = ChartBuilder::on(&root)
        .caption(text.title, TITLE_FONT)
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(-0.5..(n as f64 - 0.5), 0.0..y_top)?;

    ctx.configure_mesh()
        .disable_x_mesh()
        .x_labels(n)
        .x_label_formatter(&|x| category_label(x_labels, *x))
        .x_desc(text.x_desc)
        .y_desc(text.y_desc)
        .label_style(LABEL_FONT)
        .axis_desc_style(AXIS_DESC_FONT)
        .draw()?;

    let num_series = chart.series.len();
    let bar_width = 0.8 / num_series.max(1) as f64;

    for (series_idx, series) in chart.series.iter().enumerate() {
        let color = rgb(series.color);

        ctx.draw_series(std::iter::once(Circle::new((0.0, 0.0), 0, color.filled())))?
            .label(series.name.as_str())
            .legend(move |(x, y)| {
                Rectangle::new([(x, y - 5), (x + 20, y + 5)], color.filled())
            });

        for (size_idx, &value) in series.values.iter().enumerate() {
            let x_center = size_idx as f64;
            let x_offset = (series_idx as f64 - (num_series as f64 - 1.0) / 2.0) * bar_width;
            let x_left = x_center + x_offset - bar_width / 2.0 + 0.02;
            let x_right = x_center + x_offset + bar_width / 2.0 - 0.02;

            ctx.draw_series(std::iter::once(Rectangle::new(
                [(x_left, 0.0), (x_right, value)],
                color.filled(),
            )))?;
        }
    }

    ctx.configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font(LABEL_FONT)
        .draw()?;

    root.present()
        .with_context(|| format!("write chart {}", path.display()))?;
    Ok(())
}

fn rgb(c: Rgb) -> RGBColor {
    RGBColor(c.0, c.1, c.2)
}

/// Upper y bound with headroom; a chart with no points still gets valid
/// axes.
fn y_top(values: impl Iterator<Item = f64>) -> f64 {
    let max = values.fold(0.0_f64, f64::max);
    if max > 0.0 { max * 1.15 } else { 1.0 }
}

/// Categorical tick label: only positions that round onto an index get
/// text, everything else stays blank.
fn category_label(labels: &[String], x: f64) -> String {
    let idx = x.round() as usize;
    if idx < labels.len() && (x - idx as f64).abs() < 0.3 {
        labels[idx].clone()
    } else {
        String::new()
    }
}

/// Split a point row into contiguous runs of present values, as
/// (x index, value) coordinates.
fn present_runs(points: &[Option<f64>]) -> Vec<Vec<(f64, f64)>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();
    for (i, point) in points.iter().enumerate() {
        match point {
            Some(v) => current.push((i as f64, *v)),
            None => {
                if !current.is_empty() {
                    runs.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}
