//! Per-operator state and the count pipeline.
//!
//! A [`Session`] holds the two marked corners of one operator. [`Census`]
//! owns everything that is shared between sessions (counter settings and
//! the report sink) and runs normalize, scan, render, persist for a session.

use crate::accessor::BlockAccessor;
use crate::block_position::BlockPosition;
use crate::bounding_box::BoundingBox;
use crate::config::{CensusConfig, ReportOrder};
use crate::counter::BlockCounter;
use crate::error::{CensusError, Result};
use crate::report::{render_report, FileReportSink, ReportSink};
use crate::tally::BlockTally;
use std::path::PathBuf;
use tracing::debug;

/// Corners marked by one operator. Both start unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    start: Option<BlockPosition>,
    end: Option<BlockPosition>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_start(&mut self, pos: BlockPosition) -> BlockPosition {
        self.start = Some(pos);
        pos
    }

    pub fn mark_end(&mut self, pos: BlockPosition) -> BlockPosition {
        self.end = Some(pos);
        pos
    }

    pub fn start(&self) -> Option<BlockPosition> {
        self.start
    }

    pub fn end(&self) -> Option<BlockPosition> {
        self.end
    }

    /// Box spanned by the marked corners. Start is checked before end.
    pub fn region(&self) -> Result<BoundingBox> {
        let start = self.start.ok_or(CensusError::MissingStart)?;
        let end = self.end.ok_or(CensusError::MissingEnd)?;
        Ok(BoundingBox::from_corners(start, end))
    }
}

/// Result of a successful count.
#[derive(Debug, Clone)]
pub struct CountOutcome {
    pub region: BoundingBox,
    pub tally: BlockTally,
    pub report: String,
    pub path: PathBuf,
}

impl CountOutcome {
    /// Operator facing summary followed by the report itself.
    pub fn message(&self) -> String {
        format!(
            "Counted {} blocks of {} types, saved to {}\n{}",
            self.tally.total(),
            self.tally.len(),
            self.path.display(),
            self.report
        )
    }
}

pub struct Census<S> {
    counter: BlockCounter,
    sink: S,
    order: ReportOrder,
}

impl Census<FileReportSink> {
    pub fn from_config(config: &CensusConfig) -> Self {
        let sink = FileReportSink::from_config(config);
        debug!(
            "Reports go to {} (empty block {}, max volume {:?})",
            sink.output_dir().display(),
            config.empty_block,
            config.max_volume
        );
        Census {
            counter: BlockCounter::from_config(config),
            sink,
            order: config.order,
        }
    }
}

impl<S: ReportSink> Census<S> {
    pub fn new(counter: BlockCounter, sink: S, order: ReportOrder) -> Self {
        Census {
            counter,
            sink,
            order,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Counts the session's region and saves the report as `name`.
    ///
    /// Missing corners, a missing name and a name the sink refuses are all
    /// rejected before any block is read. A failed write comes back as
    /// [`CensusError::Report`]. The session is never modified, so a failed
    /// count can simply be retried.
    pub fn count<A>(&self, session: &Session, name: Option<&str>, accessor: &A) -> Result<CountOutcome>
    where
        A: BlockAccessor + ?Sized,
    {
        let region = session.region()?;
        let name = match name {
            Some(name) if !name.is_empty() => name,
            _ => return Err(CensusError::MissingFilename),
        };
        self.sink.check_name(name)?;

        let mut tally = self.counter.count(&region, accessor)?;
        if self.order == ReportOrder::Alphabetical {
            tally = tally.sorted_by_name();
        }
        let report = render_report(&tally);
        let path = self.sink.persist(&report, name)?;

        Ok(CountOutcome {
            region,
            tally,
            report,
            path,
        })
    }
}
