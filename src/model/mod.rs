//! Aggregated performance model: size labels, structures under test, the
//! timing metrics, and the table the renderer reads.
//!
//! The table is built once during ingestion and treated as read-only input
//! to every render call afterwards.

use clap::ValueEnum;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Benchmark input cardinality in millions of elements, displayed as "8M".
///
/// `Ord` is numeric, so size-keyed maps iterate in ascending data size
/// rather than lexical label order ("10M" sorts after "8M").
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SizeLabel(u64);

impl SizeLabel {
    pub fn new(millions: u64) -> Self {
        SizeLabel(millions)
    }

    pub fn millions(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SizeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}M", self.0)
    }
}

/// One data structure under test, named by the canonical label used in
/// chart legends.
///
/// Variant order is the alphabetical order of the canonical names, so
/// sorted iteration matches legend order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Structure {
    #[serde(rename = "std::set")]
    BstSet,
    #[serde(rename = "std::vector")]
    SeqVector,
    #[serde(rename = "vEB-tree")]
    VebTree,
}

impl Structure {
    /// Map a log header line to the structure it announces.
    ///
    /// "sequencial" is the literal marker the benchmark harness emits.
    pub fn from_header_line(line: &str) -> Option<Structure> {
        if line.contains("Testing Binary Search Tree (BST) by std::set") {
            Some(Structure::BstSet)
        } else if line.contains("Testing sequencial model by std::vector") {
            Some(Structure::SeqVector)
        } else if line.contains("Testing van Emde Boas Tree") {
            Some(Structure::VebTree)
        } else {
            None
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Structure::BstSet => "std::set",
            Structure::SeqVector => "std::vector",
            Structure::VebTree => "vEB-tree",
        }
    }
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One timed operation category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Metric {
    Construction,
    Insert,
    Query,
    Successor,
    Delete,
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Metric::Construction => "construction",
            Metric::Insert => "insert",
            Metric::Query => "query",
            Metric::Successor => "successor",
            Metric::Delete => "delete",
        })
    }
}

/// Five independently optional timings in seconds for one (size, structure)
/// pair. An absent field means the log never reported that operation, not
/// that it took zero seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MetricSet {
    pub construction: Option<f64>,
    pub insert: Option<f64>,
    pub query: Option<f64>,
    pub successor: Option<f64>,
    pub delete: Option<f64>,
}

impl MetricSet {
    pub fn get(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Construction => self.construction,
            Metric::Insert => self.insert,
            Metric::Query => self.query,
            Metric::Successor => self.successor,
            Metric::Delete => self.delete,
        }
    }

    pub fn set(&mut self, metric: Metric, secs: f64) {
        let slot = match metric {
            Metric::Construction => &mut self.construction,
            Metric::Insert => &mut self.insert,
            Metric::Query => &mut self.query,
            Metric::Successor => &mut self.successor,
            Metric::Delete => &mut self.delete,
        };
        *slot = Some(secs);
    }
}

/// Aggregated results: size -> structure -> timings.
///
/// The `None` structure key collects values from files that never produced
/// a header line; that is a defined shape of the input, not an error.
#[derive(Debug, Default)]
pub struct PerformanceTable {
    entries: BTreeMap<SizeLabel, BTreeMap<Option<Structure>, MetricSet>>,
}

impl PerformanceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit one file's accumulated record. A later commit for the same
    /// (size, structure) key replaces the earlier one.
    pub fn commit(&mut self, size: SizeLabel, structure: Option<Structure>, metrics: MetricSet) {
        self.entries.entry(size).or_default().insert(structure, metrics);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Size labels in ascending numeric order.
    pub fn sizes(&self) -> impl Iterator<Item = SizeLabel> + '_ {
        self.entries.keys().copied()
    }

    /// Distinct named structures appearing anywhere in the table, in
    /// alphabetical order. Header-less entries have no name and are not
    /// listed here.
    pub fn structures(&self) -> Vec<Structure> {
        let mut out: Vec<Structure> = self
            .entries
            .values()
            .flat_map(|per_structure| per_structure.keys())
            .filter_map(|s| *s)
            .collect();
        out.sort();
        out.dedup();
        out
    }

    pub fn metrics(&self, size: SizeLabel, structure: Structure) -> Option<&MetricSet> {
        self.entries.get(&size)?.get(&Some(structure))
    }

    /// JSON view of the table, sizes ascending. Header-less entries are
    /// keyed as "?".
    pub fn to_json(&self) -> serde_json::Value {
        let mut sizes = serde_json::Map::new();
        for (size, per_structure) in &self.entries {
            let mut structures = serde_json::Map::new();
            for (structure, metrics) in per_structure {
                let key = structure.map_or_else(|| "?".to_string(), |s| s.name().to_string());
                structures.insert(key, serde_json::json!(metrics));
            }
            sizes.insert(size.to_string(), serde_json::Value::Object(structures));
        }
        serde_json::Value::Object(sizes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn only(metric: Metric, secs: f64) -> MetricSet {
        let mut ms = MetricSet::default();
        ms.set(metric, secs);
        ms
    }

    #[test]
    fn sizes_iterate_in_numeric_order() {
        let mut table = PerformanceTable::new();
        for millions in [16, 1, 8, 2] {
            table.commit(
                SizeLabel::new(millions),
                Some(Structure::VebTree),
                only(Metric::Query, 0.5),
            );
        }

        let labels: Vec<String> = table.sizes().map(|s| s.to_string()).collect();
        assert_eq!(labels, ["1M", "2M", "8M", "16M"]);
    }

    #[test]
    fn later_commit_replaces_earlier_for_same_key() {
        let mut table = PerformanceTable::new();
        let size = SizeLabel::new(4);
        table.commit(size, Some(Structure::BstSet), only(Metric::Insert, 1.0));
        table.commit(size, Some(Structure::BstSet), only(Metric::Insert, 2.0));

        let ms = table.metrics(size, Structure::BstSet).unwrap();
        assert_eq!(ms.insert, Some(2.0));
    }

    #[test]
    fn structures_are_alphabetical_and_deduped() {
        let mut table = PerformanceTable::new();
        table.commit(
            SizeLabel::new(1),
            Some(Structure::VebTree),
            only(Metric::Query, 0.1),
        );
        table.commit(
            SizeLabel::new(2),
            Some(Structure::BstSet),
            only(Metric::Query, 0.2),
        );
        table.commit(
            SizeLabel::new(2),
            Some(Structure::VebTree),
            only(Metric::Query, 0.3),
        );
        table.commit(SizeLabel::new(2), None, only(Metric::Query, 0.4));

        assert_eq!(table.structures(), [Structure::BstSet, Structure::VebTree]);
    }

    #[test]
    fn header_less_entries_are_kept_but_unnamed() {
        let mut table = PerformanceTable::new();
        table.commit(SizeLabel::new(8), None, only(Metric::Delete, 3.5));

        assert!(!table.is_empty());
        assert!(table.structures().is_empty());
        assert_eq!(table.metrics(SizeLabel::new(8), Structure::VebTree), None);

        let json = table.to_json();
        assert_eq!(json["8M"]["?"]["delete"], serde_json::json!(3.5));
    }

    #[test]
    fn absent_metrics_stay_absent() {
        let ms = only(Metric::Successor, 0.25);
        assert_eq!(ms.get(Metric::Successor), Some(0.25));
        assert_eq!(ms.get(Metric::Construction), None);
        assert_eq!(ms.get(Metric::Delete), None);
    }
}
