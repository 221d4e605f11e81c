use crate::model::{Metric, PerformanceTable, SizeLabel, Structure};

/// Flat RGB so plans stay independent of the drawing backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const BLUE: Rgb = Rgb(31, 119, 180);
pub const ORANGE: Rgb = Rgb(255, 127, 14);
pub const GREEN: Rgb = Rgb(0, 128, 0);
pub const RED: Rgb = Rgb(255, 0, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineStyle {
    pub color: Rgb,
    pub dashed: bool,
}

/// One curve: points parallel to the x labels, `None` meaning a gap.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    pub name: String,
    pub style: LineStyle,
    pub points: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    pub x_labels: Vec<String>,
    pub curves: Vec<Curve>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    pub name: String,
    pub color: Rgb,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub x_labels: Vec<String>,
    pub series: Vec<BarSeries>,
}

/// Plan the line chart for one metric: one curve per named structure in the
/// table, alphabetical, with a gap wherever the metric was not reported.
pub fn line_chart(table: &PerformanceTable, metric: Metric) -> LineChart {
    let sizes: Vec<SizeLabel> = table.sizes().collect();

    let x_labels = match metric {
        Metric::Delete => deletion_axis_labels(&sizes),
        _ => sizes.iter().map(|s| s.to_string()).collect(),
    };

    let mut curves = Vec::new();
    for structure in table.structures() {
        // Bulk insert/delete timings are not comparable for the flat
        // container; its curve is dropped from those charts.
        if structure == Structure::SeqVector
            && matches!(metric, Metric::Insert | Metric::Delete)
        {
            continue;
        }

        curves.push(Curve {
            name: structure.name().to_string(),
            style: curve_style(structure),
            points: metric_points(table, &sizes, structure, metric),
        });
    }

    // The insert chart overlays the vEB-tree's one-shot build time against
    // the competitors' incremental inserts.
    if metric == Metric::Insert {
        curves.push(Curve {
            name: "vEB-tree build".to_string(),
            style: LineStyle {
                color: RED,
                dashed: true,
            },
            points: metric_points(table, &sizes, Structure::VebTree, Metric::Construction),
        });
    }

    LineChart { x_labels, curves }
}

/// Plan the grouped construction-time bar chart. Unlike the line charts, a
/// missing construction value becomes a zero-height bar so every group
/// keeps one slot per structure.
pub fn construction_bars(table: &PerformanceTable) -> BarChart {
    let sizes: Vec<SizeLabel> = table.sizes().collect();

    let series = table
        .structures()
        .into_iter()
        .map(|structure| BarSeries {
            name: structure.name().to_string(),
            color: curve_style(structure).color,
            values: sizes
                .iter()
                .map(|&size| {
                    table
                        .metrics(size, structure)
                        .and_then(|m| m.construction)
                        .unwrap_or(0.0)
                })
                .collect(),
        })
        .collect();

    BarChart {
        x_labels: sizes.iter().map(|s| s.to_string()).collect(),
        series,
    }
}

fn metric_points(
    table: &PerformanceTable,
    sizes: &[SizeLabel],
    structure: Structure,
    metric: Metric,
) -> Vec<Option<f64>> {
    sizes
        .iter()
        .map(|&size| table.metrics(size, structure).and_then(|m| m.get(metric)))
        .collect()
}

/// Fixed per-structure styles; the vEB-tree is always the solid green curve.
fn curve_style(structure: Structure) -> LineStyle {
    match structure {
        Structure::BstSet => LineStyle {
            color: BLUE,
            dashed: false,
        },
        Structure::SeqVector => LineStyle {
            color: ORANGE,
            dashed: true,
        },
        Structure::VebTree => LineStyle {
            color: GREEN,
            dashed: false,
        },
    }
}

/// The delete benchmark removes half the elements, so its x axis shows
/// "deleted/total": 8M becomes "4M/8M". A 1M run deletes half a million,
/// written "0.5M/1M".
fn deletion_axis_labels(sizes: &[SizeLabel]) -> Vec<String> {
    sizes
        .iter()
        .map(|size| {
            let x = size.millions();
            if x == 1 {
                format!("0.5M/{x}M")
            } else {
                format!("{}M/{x}M", x / 2)
            }
        })
        .collect()
}
