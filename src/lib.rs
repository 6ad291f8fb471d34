//! Block census: count every block type inside a cuboid of a voxel world.
//!
//! Two marked corners are normalized into a [`BoundingBox`], every cell in
//! it is read through a [`BlockAccessor`], non-empty block ids are tallied
//! in first-seen order, and the tally is rendered as a plain-text report
//! that a [`ReportSink`] saves.
//!
//! ```
//! use block_census::{count_region, render_report, BoundingBox, SparseWorld};
//!
//! let mut world = SparseWorld::default();
//! world.set_block((0, 0, 0), "game:rock-granite");
//! world.set_block((0, 0, 1), "game:rock-granite");
//!
//! let region = BoundingBox::from_corners((0, 0, 1), (0, 0, 0));
//! let tally = count_region(&region, &world, "game:air");
//! assert_eq!(render_report(&tally), "game:rock-granite: 2 instances\n");
//! ```

pub mod accessor;
pub mod block_id;
pub mod block_position;
pub mod bounding_box;
pub mod command;
pub mod config;
pub mod counter;
pub mod error;
pub mod report;
pub mod session;
pub mod tally;

pub use accessor::{BlockAccessor, SparseWorld};
pub use block_id::{BlockId, DEFAULT_EMPTY_BLOCK};
pub use block_position::BlockPosition;
pub use bounding_box::BoundingBox;
pub use command::{execute, Command};
pub use config::{CensusConfig, ReportOrder};
pub use counter::{count_region, BlockCounter};
pub use error::{CensusError, ParseReportError, ReportError};
pub use report::{parse_report, render_report, FileReportSink, ReportSink};
pub use session::{Census, CountOutcome, Session};
pub use tally::BlockTally;
