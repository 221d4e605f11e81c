use crate::model::SizeLabel;
use anyhow::Context;
use regex::Regex;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Filename pattern carrying the data size: "exp_<n>M.log".
///
/// One pattern serves as both the inclusion filter and the sort key, so a
/// file either contributes a table entry or is skipped entirely.
const FILE_NAME_RE: &str = r"^exp_([0-9]+)M\.log$";

/// List the size-tagged log files in `dir`, ascending by data size.
///
/// Files whose names do not match the pattern contribute nothing. A missing
/// directory yields an empty list; the caller decides how to report that.
pub fn scan_log_dir(dir: &Path) -> anyhow::Result<Vec<(SizeLabel, PathBuf)>> {
    let re = Regex::new(FILE_NAME_RE)?;

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(e).with_context(|| format!("read log directory {}", dir.display()));
        }
    };

    let mut out = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("read log directory {}", dir.display()))?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if let Some(size) = size_from_file_name(&re, name) {
            out.push((size, entry.path()));
        }
    }

    out.sort_by_key(|(size, _)| *size);
    Ok(out)
}

fn size_from_file_name(re: &Regex, name: &str) -> Option<SizeLabel> {
    let caps = re.captures(name)?;
    let millions: u64 = caps.get(1)?.as_str().parse().ok()?;
    Some(SizeLabel::new(millions))
}
