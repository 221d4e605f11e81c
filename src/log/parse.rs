use crate::model::{Metric, MetricSet, Structure};
use anyhow::Context;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Everything one log file contributes to the table: the structure that was
/// active after the last line, plus the most recent match per metric.
///
/// `structure` stays `None` for files that never produced a header line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileRecord {
    pub structure: Option<Structure>,
    pub metrics: MetricSet,
}

/// Line patterns for the benchmark log format, compiled once.
///
/// Timing lines look like:
/// Time to insert 8000000 items: 1.234567 secs
pub struct LogParser {
    patterns: [(Metric, Regex); 5],
}

impl LogParser {
    pub fn new() -> anyhow::Result<Self> {
        const NUMBER: &str = r"([0-9]+(?:\.[0-9]+)?)";
        let timing = |action: &str| Regex::new(&format!("Time to {action}: {NUMBER} secs"));

        Ok(LogParser {
            patterns: [
                (Metric::Construction, timing("construction")?),
                (Metric::Insert, timing("insert .*?")?),
                (Metric::Query, timing("query .*?")?),
                (Metric::Successor, timing("successor query .*?")?),
                (Metric::Delete, timing("delete .*?")?),
            ],
        })
    }

    /// Parse one file into the record committed to the table.
    pub fn parse_file(&self, path: &Path) -> anyhow::Result<FileRecord> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read log file {}", path.display()))?;
        Ok(self.parse_lines(text.lines()))
    }

    /// Left-fold over lines: the active structure and the accumulated
    /// metrics travel in the accumulator rather than in shared state.
    pub fn parse_lines<'a>(&self, lines: impl Iterator<Item = &'a str>) -> FileRecord {
        lines.fold(FileRecord::default(), |acc, line| self.scan_line(acc, line))
    }

    /// Fold step. A header line swaps the active structure (last header
    /// wins); a timing line overwrites that metric's slot; any other line
    /// passes the accumulator through unchanged.
    fn scan_line(&self, mut acc: FileRecord, line: &str) -> FileRecord {
        if let Some(structure) = Structure::from_header_line(line) {
            acc.structure = Some(structure);
        }

        for (metric, re) in &self.patterns {
            if let Some(caps) = re.captures(line) {
                if let Ok(secs) = caps[1].parse::<f64>() {
                    acc.metrics.set(*metric, secs);
                }
            }
        }

        acc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(lines: &[&str]) -> FileRecord {
        LogParser::new().unwrap().parse_lines(lines.iter().copied())
    }

    #[test]
    fn parses_one_structure_section() {
        let record = parse(&[
            "Testing van Emde Boas Tree...",
            "Time to construction: 2.481903 secs",
            "Time to insert 8000000 items: 1.102938 secs",
            "Time to query 8000000 items: 0.523411 secs",
            "Time to successor query 8000000 items: 0.611203 secs",
            "Time to delete 4000000 items: 0.907745 secs",
        ]);

        assert_eq!(record.structure, Some(Structure::VebTree));
        assert_eq!(record.metrics.construction, Some(2.481903));
        assert_eq!(record.metrics.insert, Some(1.102938));
        assert_eq!(record.metrics.query, Some(0.523411));
        assert_eq!(record.metrics.successor, Some(0.611203));
        assert_eq!(record.metrics.delete, Some(0.907745));
    }

    #[test]
    fn last_header_wins_across_sections() {
        let record = parse(&[
            "Testing Binary Search Tree (BST) by std::set...",
            "Time to insert 1000000 items: 3.000000 secs",
            "Testing sequencial model by std::vector...",
            "Time to insert 1000000 items: 5.500000 secs",
        ]);

        assert_eq!(record.structure, Some(Structure::SeqVector));
        // Each metric holds its most recent match.
        assert_eq!(record.metrics.insert, Some(5.5));
    }

    #[test]
    fn file_without_header_yields_unset_structure() {
        let record = parse(&["Time to query 100 items: 0.125000 secs"]);

        assert_eq!(record.structure, None);
        assert_eq!(record.metrics.query, Some(0.125));
    }

    #[test]
    fn unmatched_lines_leave_metrics_absent() {
        let record = parse(&[
            "Testing van Emde Boas Tree...",
            "Find in vEB-tree failed. Item: 42",
            "random chatter",
            "",
        ]);

        assert_eq!(record.structure, Some(Structure::VebTree));
        assert_eq!(record.metrics, MetricSet::default());
    }

    #[test]
    fn successor_lines_do_not_bleed_into_query() {
        let record = parse(&["Time to successor query 100 items: 0.750000 secs"]);

        assert_eq!(record.metrics.successor, Some(0.75));
        assert_eq!(record.metrics.query, None);
    }

    #[test]
    fn captured_numeral_round_trips() {
        let record = parse(&["Time to query 100 items: 0.123456 secs"]);

        let secs = record.metrics.query.unwrap();
        assert_eq!(format!("{secs:.6}"), "0.123456");
    }
}
