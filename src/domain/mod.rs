//! Domain layer: reading types, the in-memory reading store, and
//! calendar arithmetic.
//!
//! This module contains the server-side domain model: timestamped
//! readings, the append-only per-series log with range aggregation,
//! and month-window / leap-year arithmetic used by the reports.

pub mod calendar;
pub mod reading;
pub mod reading_log;

pub use calendar::MonthWindow;
pub use reading::{DailyBucket, Reading, ReadingSeries};
pub use reading_log::ReadingLog;
