//! Plain-text block reports.
//!
//! A report is one line per block type, `"<id>: <count> instances\n"`, in
//! tally order, with no header or summary. An empty tally renders as an
//! empty string.

use crate::block_id::BlockId;
use crate::config::CensusConfig;
use crate::error::{ParseReportError, ReportError};
use crate::tally::BlockTally;
use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

const COUNT_SEPARATOR: &str = ": ";
const COUNT_SUFFIX: &str = " instances";

pub fn render_report(tally: &BlockTally) -> String {
    let mut out = String::new();
    for (id, count) in tally.iter() {
        // Writing into a String cannot fail.
        let _ = writeln!(out, "{}{}{}{}", id, COUNT_SEPARATOR, count, COUNT_SUFFIX);
    }
    out
}

/// Reads a rendered report back into a tally, keeping line order.
///
/// An id listed more than once has its counts summed; a sum past
/// `u64::MAX` is an error.
pub fn parse_report(text: &str) -> Result<BlockTally, ParseReportError> {
    let mut tally = BlockTally::new();
    for (index, line) in text.lines().enumerate() {
        let malformed = || ParseReportError::Malformed {
            line: index + 1,
            content: line.to_string(),
        };
        let (id, rest) = line.rsplit_once(COUNT_SEPARATOR).ok_or_else(malformed)?;
        let count = rest
            .strip_suffix(COUNT_SUFFIX)
            .and_then(|n| n.parse::<u64>().ok())
            .ok_or_else(malformed)?;
        tally
            .try_record_many(&BlockId::new(id), count)
            .ok_or_else(|| ParseReportError::CountOverflow {
                line: index + 1,
                id: id.to_string(),
            })?;
    }
    Ok(tally)
}

/// Destination for rendered reports.
pub trait ReportSink {
    /// Rejects names this sink cannot store. Called before the region is
    /// scanned, so a bad name costs no scan.
    fn check_name(&self, name: &str) -> Result<(), ReportError> {
        if name.is_empty() {
            return Err(ReportError::EmptyName);
        }
        Ok(())
    }

    /// Stores `report` under `name`, replacing anything already stored
    /// there, and returns where it went.
    fn persist(&self, report: &str, name: &str) -> Result<PathBuf, ReportError>;
}

/// Writes reports as files inside one output directory.
#[derive(Debug, Clone)]
pub struct FileReportSink {
    output_dir: PathBuf,
    extension: String,
}

impl FileReportSink {
    pub fn new(output_dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        FileReportSink {
            output_dir: output_dir.into(),
            extension: extension.into(),
        }
    }

    pub fn from_config(config: &CensusConfig) -> Self {
        Self::new(config.output_dir.clone(), config.extension.clone())
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Path a report called `name` is written to. The extension is appended
    /// unless `name` already ends with it (case-sensitive).
    pub fn report_path(&self, name: &str) -> PathBuf {
        if name.ends_with(&self.extension) {
            self.output_dir.join(name)
        } else {
            self.output_dir.join(format!("{}{}", name, self.extension))
        }
    }
}

impl ReportSink for FileReportSink {
    /// A name must be a single plain path component, so every report lands
    /// directly inside the output directory.
    fn check_name(&self, name: &str) -> Result<(), ReportError> {
        if name.is_empty() {
            return Err(ReportError::EmptyName);
        }
        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) if !name.contains(['/', '\\']) => Ok(()),
            _ => Err(ReportError::InvalidName(name.to_string())),
        }
    }

    fn persist(&self, report: &str, name: &str) -> Result<PathBuf, ReportError> {
        self.check_name(name)?;
        let path = self.report_path(name);
        let io_err = |source| ReportError::Io {
            path: path.clone(),
            source,
        };

        std::fs::create_dir_all(&self.output_dir).map_err(io_err)?;
        let result = File::create(&path).and_then(|file| {
            let mut writer = BufWriter::new(file);
            writer.write_all(report.as_bytes())?;
            writer.flush()
        });
        match result {
            Ok(()) => {
                debug!("Wrote {} bytes to {}", report.len(), path.display());
                Ok(path)
            }
            Err(e) => {
                warn!("Failed to write report {}: {}", path.display(), e);
                Err(io_err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tally(entries: &[(&str, u64)]) -> BlockTally {
        entries
            .iter()
            .map(|(id, n)| (BlockId::new(*id), *n))
            .collect()
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "block_census_report_{}_{}",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_render_single_entry() {
        assert_eq!(render_report(&tally(&[("stone", 1)])), "stone: 1 instances\n");
    }

    #[test]
    fn test_render_empty_tally() {
        assert_eq!(render_report(&BlockTally::new()), "");
    }

    #[test]
    fn test_render_keeps_tally_order() {
        let report = render_report(&tally(&[
            ("game:rock-granite", 40),
            ("game:clay-blue", 3),
            ("game:log-oak-ud", 12),
        ]));
        assert_eq!(
            report,
            "game:rock-granite: 40 instances\ngame:clay-blue: 3 instances\ngame:log-oak-ud: 12 instances\n"
        );
    }

    #[test]
    fn test_parse_recovers_rendered_entries() {
        let original = tally(&[("game:rock-granite", 40), ("odd: name", 2), ("x", 1)]);
        let parsed = parse_report(&render_report(&original)).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_parse_rejects_bad_line() {
        let err = parse_report("stone: 1 instances\nstone 2\n").unwrap_err();
        match err {
            ParseReportError::Malformed { line, content } => {
                assert_eq!(line, 2);
                assert_eq!(content, "stone 2");
            }
            other => panic!("Expected Malformed, got {:?}", other),
        }
        assert!(parse_report("stone: many instances\n").is_err());
    }

    #[test]
    fn test_parse_rejects_overflowing_counts() {
        let err = parse_report("a: 18446744073709551615 instances\nb: 3 instances\na: 1 instances\n")
            .unwrap_err();
        assert_eq!(
            err,
            ParseReportError::CountOverflow {
                line: 3,
                id: "a".to_string()
            }
        );
    }

    #[test]
    fn test_parse_sums_repeated_ids() {
        let tally = parse_report("a: 2 instances\nb: 1 instances\na: 3 instances\n").unwrap();
        assert_eq!(tally.get("a"), Some(5));
        assert_eq!(tally.len(), 2);
    }

    #[test]
    fn test_report_path_appends_extension_once() {
        let sink = FileReportSink::new("Recipes", ".txt");
        assert_eq!(sink.report_path("house"), PathBuf::from("Recipes/house.txt"));
        assert_eq!(sink.report_path("house.txt"), PathBuf::from("Recipes/house.txt"));
        assert_eq!(sink.report_path("house.TXT"), PathBuf::from("Recipes/house.TXT.txt"));
    }

    #[test]
    fn test_persist_writes_and_overwrites() {
        let dir = scratch_dir("overwrite");
        let sink = FileReportSink::new(&dir, ".txt");

        let path = sink.persist("stone: 1 instances\n", "tower").unwrap();
        assert_eq!(path, dir.join("tower.txt"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "stone: 1 instances\n");

        sink.persist("", "tower.txt").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_persist_rejects_empty_name() {
        let sink = FileReportSink::new(scratch_dir("empty_name"), ".txt");
        assert!(matches!(sink.persist("x", ""), Err(ReportError::EmptyName)));
    }

    #[test]
    fn test_names_outside_output_dir_are_rejected() {
        let root = scratch_dir("escape");
        let sink = FileReportSink::new(root.join("Recipes"), ".txt");

        for name in ["../escaped", "/tmp/block_census_abs", "sub/dir", "..", ".", "a\\b"] {
            assert!(
                matches!(sink.persist("x: 1 instances\n", name), Err(ReportError::InvalidName(n)) if n == name),
                "{} was accepted",
                name
            );
        }
        assert!(!root.join("escaped.txt").exists());
        assert!(!root.join("Recipes").exists());
        assert!(sink.check_name("tower").is_ok());
        assert!(sink.check_name("tower.v2.txt").is_ok());
    }

    #[test]
    fn test_persist_io_failure() {
        let dir = scratch_dir("io_failure");
        std::fs::create_dir_all(&dir).unwrap();
        // A directory where the report file should go makes the create fail.
        std::fs::create_dir_all(dir.join("blocked.txt")).unwrap();
        let sink = FileReportSink::new(&dir, ".txt");

        match sink.persist("stone: 1 instances\n", "blocked") {
            Err(ReportError::Io { path, .. }) => assert_eq!(path, dir.join("blocked.txt")),
            other => panic!("Expected Io error, got {:?}", other),
        }

        let _ = std::fs::remove_dir_all(&dir);
    }
}
