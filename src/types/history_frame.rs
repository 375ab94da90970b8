//! A typed wrapper around the assembled observation history table.

use chrono::NaiveDateTime;
use polars::prelude::*;

/// Name of the hourly timestamp column.
pub const COL_TIME: &str = "Time";
/// Name of the place label column.
pub const COL_PLACE: &str = "Place";

/// The assembled observation history.
///
/// One row per (hour, place) pair, ordered by place first and time second.
/// Columns, in order: `Time`, `Place`, then one `f64` column per
/// [`Feature`](crate::Feature) in the canonical table order
/// (`Temperature`, `TotalCloudCover`, `WindDirection`, `WindSpeedMS`,
/// `Humidity`, `Precipitation1h`).
///
/// The underlying [`DataFrame`] is public for direct processing or export;
/// the helper methods cover the common slicing operations.
#[derive(Debug, Clone)]
pub struct HistoryFrame {
    /// The history table itself.
    pub frame: DataFrame,
}

impl HistoryFrame {
    pub(crate) fn new(frame: DataFrame) -> Self {
        Self { frame }
    }

    /// The table as a [`LazyFrame`] for further query composition.
    pub fn lazy(&self) -> LazyFrame {
        self.frame.clone().lazy()
    }

    /// Rows belonging to a single place, time order preserved.
    pub fn for_place(&self, place: &str) -> LazyFrame {
        self.lazy().filter(col(COL_PLACE).eq(lit(place)))
    }

    /// Rows within an inclusive timestamp range, across all places.
    pub fn between(&self, start: NaiveDateTime, end: NaiveDateTime) -> LazyFrame {
        self.lazy().filter(
            col(COL_TIME)
                .gt_eq(lit(start))
                .and(col(COL_TIME).lt_eq(lit(end))),
        )
    }
}
