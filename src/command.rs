//! The `bc` text command.
//!
//! ```text
//! bc start            mark the caller's block as the start corner
//! bc end              mark the caller's block as the end corner
//! bc count <name>     count the marked region and save it as <name>
//! ```

use crate::accessor::BlockAccessor;
use crate::block_position::BlockPosition;
use crate::error::{CensusError, Result};
use crate::report::ReportSink;
use crate::session::{Census, Session};
use std::str::FromStr;

pub const HELP: &str = "Counts all unique blocks and their number in a region.
bc start: register starting block.
bc end: register ending block.
bc count <filename>: save a list of all blocks in the defined region.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    End,
    /// Filename is optional at parse time so that a missing name is reported
    /// after the corner checks.
    Count { filename: Option<String> },
    Help,
}

impl FromStr for Command {
    type Err = CensusError;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        match words.next() {
            Some("bc") | Some("/bc") => {}
            Some(other) => return Err(CensusError::UnknownCommand(other.to_string())),
            None => return Err(CensusError::UnknownCommand(String::new())),
        }

        let command = match words.next() {
            None | Some("help") => Command::Help,
            Some("start") => Command::Start,
            Some("end") => Command::End,
            Some("count") => Command::Count {
                filename: words.next().map(str::to_string),
            },
            Some(other) => return Err(CensusError::UnknownCommand(format!("bc {}", other))),
        };

        if let Some(extra) = words.next() {
            return Err(CensusError::InvalidArgument(format!(
                "Unexpected argument '{}'",
                extra
            )));
        }
        Ok(command)
    }
}

/// Runs `command` for a caller standing at `caller_pos` and returns the
/// message to show them.
pub fn execute<A, S>(
    command: &Command,
    census: &Census<S>,
    session: &mut Session,
    caller_pos: (f64, f64, f64),
    accessor: &A,
) -> Result<String>
where
    A: BlockAccessor + ?Sized,
    S: ReportSink,
{
    match command {
        Command::Start => {
            let pos = session.mark_start(BlockPosition::from_entity_pos(caller_pos));
            Ok(format!("Start Point Set! At {}", pos))
        }
        Command::End => {
            let pos = session.mark_end(BlockPosition::from_entity_pos(caller_pos));
            Ok(format!("End Point Set! At {}", pos))
        }
        Command::Count { filename } => census
            .count(session, filename.as_deref(), accessor)
            .map(|outcome| outcome.message()),
        Command::Help => Ok(HELP.to_string()),
    }
}
