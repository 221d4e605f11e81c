use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod log;
mod model;
mod render;

use model::Metric;
use render::ChartText;

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "vebbench-viz")]
#[command(about = "vEB-tree benchmark chart generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render comparison charts from a directory of benchmark logs.
    Charts {
        /// Directory holding exp_<n>M.log files.
        #[arg(long)]
        logs: PathBuf,

        #[arg(short = 'o', long)]
        out: PathBuf,

        /// Metrics to render as line charts, in order.
        #[arg(
            long,
            value_delimiter = ',',
            default_values_t = [Metric::Insert, Metric::Query, Metric::Successor, Metric::Delete]
        )]
        metrics: Vec<Metric>,

        /// Also render the grouped construction-time bar chart.
        #[arg(long)]
        construction_bars: bool,

        /// Print the aggregated table as JSON before rendering.
        #[arg(long)]
        dump_table: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Commands::Charts {
            logs,
            out,
            metrics,
            construction_bars,
            dump_table,
        } => {
            // 1) Scan the log directory for size-tagged files.
            let files = log::scan_log_dir(&logs)?;

            // 2) Parse each file and commit its record into the table.
            let parser = log::LogParser::new()?;
            let mut table = model::PerformanceTable::new();
            for (size, path) in files {
                let record = parser.parse_file(&path)?;
                table.commit(size, record.structure, record.metrics);
            }

            // Nothing to plot is reported, not rendered.
            if table.is_empty() {
                eprintln!("WARN: no performance data parsed from {}", logs.display());
                return Ok(());
            }

            if dump_table {
                println!("{}", serde_json::to_string_pretty(&table.to_json())?);
            }

            // 3) One line chart per requested metric.
            std::fs::create_dir_all(&out)?;
            for metric in metrics {
                let chart = render::line_chart(&table, metric);
                let path = out.join(format!("line_{metric}_performance.svg"));
                render::write_line_chart(&chart, &line_chart_text(metric), &path)?;
                println!("Wrote {}", path.display());
            }

            // 4) Optional construction-time bar chart.
            if construction_bars {
                let chart = render::construction_bars(&table);
                let path = out.join("bar_construction_time.svg");
                render::write_bar_chart(&chart, &bar_chart_text(), &path)?;
                println!("Wrote {}", path.display());
            }
        }
    }

    Ok(())
}

fn line_chart_text(metric: Metric) -> ChartText<'static> {
    match metric {
        Metric::Construction => ChartText {
            title: "Construction Performance vs Data Size",
            x_desc: "Data Size",
            y_desc: "Build Time (secs)",
        },
        Metric::Insert => ChartText {
            title: "Insert Performance vs Data Size",
            x_desc: "Data Size",
            y_desc: "Insert Time (secs)",
        },
        Metric::Query => ChartText {
            title: "Query Performance vs Data Size",
            x_desc: "Data Size",
            y_desc: "Query Time (secs)",
        },
        Metric::Successor => ChartText {
            title: "Successor Query Performance vs Data Size",
            x_desc: "Data Size",
            y_desc: "Successor Time (secs)",
        },
        Metric::Delete => ChartText {
            title: "Half Deletion Performance",
            x_desc: "Deletion Size/Data Size",
            y_desc: "Delete Time (secs)",
        },
    }
}

fn bar_chart_text() -> ChartText<'static> {
    ChartText {
        title: "vEB-tree Construction Time vs Data Size",
        x_desc: "Data Size",
        y_desc: "Build Time (secs)",
    }
}
