//! Interchange with external collaborators.
//!
//! - [`FlatRecord`] / [`parse_records`] / [`write_records`]: the flat
//!   `item,time,resource` row format used to store problem definitions.
//! - [`ScheduleReport`]: the resolved best schedule, ready for a chart
//!   renderer or a text dump.

mod records;
mod report;

pub use records::{parse_records, write_records, FlatRecord, RECORD_HEADER};
pub use report::{ResourceReport, ScheduleReport, SlotReport};
