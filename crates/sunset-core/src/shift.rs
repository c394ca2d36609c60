//! # Shift Partitioning
//!
//! Divides the sale history into ordered, half-open time windows bounded
//! by explicit closing events.
//!
//! ## Timeline Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  closings:        T1              T2              T3                    │
//! │                    │               │               │                    │
//! │  ──────────────────┼───────────────┼───────────────┼──────────────▶     │
//! │  epoch             │               │               │            now     │
//! │                    │               │               │                    │
//! │  [  shift 0      ) [  shift 1    ) [  shift 2    ) [  shift 3 (open)    │
//! │                                                                         │
//! │  Every window is half-open: a record stamped exactly at a closing       │
//! │  belongs to the shift that STARTS there, never the one just closed.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! With `n` closings there are always `n + 1` addressable shifts; the last
//! one is open-ended and bounded by whatever "now" the caller passes in.
//! This module never reads the clock itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::types::SalesRecord;

// =============================================================================
// Shift Window
// =============================================================================

/// One half-open time window `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ShiftWindow {
    #[ts(as = "String")]
    pub start: DateTime<Utc>,

    #[ts(as = "String")]
    pub end: DateTime<Utc>,
}

impl ShiftWindow {
    /// Whether `at` falls inside the window.
    ///
    /// Half-open on purpose: `start` is in, `end` is out. This boundary
    /// rule decides which sales a cashier answers for, so it must be exact.
    #[inline]
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at < self.end
    }
}

/// Filters history down to the records dated inside `window`.
pub fn records_in(history: &[SalesRecord], window: &ShiftWindow) -> Vec<SalesRecord> {
    history
        .iter()
        .filter(|record| window.contains(record.date))
        .cloned()
        .collect()
}

// =============================================================================
// Shift Log
// =============================================================================

/// The ordered sequence of shift-closing timestamps.
///
/// ## Invariant
/// Closings are strictly increasing, and all of them lie after the epoch.
/// Both ingest paths (`from_closings` for a service snapshot, `close` for
/// a new closing) enforce this, so every window derived from the log is
/// well-formed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShiftLog {
    closings: Vec<DateTime<Utc>>,
}

impl ShiftLog {
    /// Empty log: one open shift reaching back to the epoch.
    pub fn new() -> ShiftLog {
        ShiftLog::default()
    }

    /// Builds a log from a service snapshot, rejecting any closing that is
    /// not strictly after its predecessor.
    pub fn from_closings(closings: Vec<DateTime<Utc>>) -> CoreResult<ShiftLog> {
        let mut log = ShiftLog::new();
        for at in closings {
            log.close(at)?;
        }
        Ok(log)
    }

    /// Records a new shift closing.
    ///
    /// Fails with `NonMonotonic` if `at` is not strictly after the latest
    /// closing (guards against clock skew and duplicate clicks); the log
    /// is unchanged on failure.
    pub fn close(&mut self, at: DateTime<Utc>) -> CoreResult<()> {
        let last = self.last_closing();
        if at <= last {
            return Err(CoreError::NonMonotonic { last, attempted: at });
        }
        self.closings.push(at);
        Ok(())
    }

    /// The recorded closings, oldest first.
    pub fn closings(&self) -> &[DateTime<Utc>] {
        &self.closings
    }

    /// Number of addressable shifts: one more than the closing count.
    #[inline]
    pub fn shift_count(&self) -> usize {
        self.closings.len() + 1
    }

    /// Index of the currently open shift, always the highest valid index.
    #[inline]
    pub fn open_index(&self) -> usize {
        self.closings.len()
    }

    /// The window for shift `index`.
    ///
    /// Shift 0 starts at the epoch; the open shift ends at `now`. Indexes
    /// past the open shift fail with `OutOfRange`.
    pub fn window_for(&self, index: usize, now: DateTime<Utc>) -> CoreResult<ShiftWindow> {
        if index > self.open_index() {
            return Err(CoreError::OutOfRange {
                field: "shift index".to_string(),
                value: index as i64,
                min: 0,
                max: self.open_index() as i64,
            });
        }

        let start = if index == 0 {
            DateTime::UNIX_EPOCH
        } else {
            self.closings[index - 1]
        };
        let end = if index < self.closings.len() {
            self.closings[index]
        } else {
            now
        };

        Ok(ShiftWindow { start, end })
    }

    fn last_closing(&self) -> DateTime<Utc> {
        self.closings.last().copied().unwrap_or(DateTime::UNIX_EPOCH)
    }
}

// =============================================================================
// Cursor
// =============================================================================

/// A clamped position over an indexed range `[0, last]`.
///
/// Used for stepping through shifts (and day buckets) one at a time.
/// Stepping past either end is a no-op, never an error and never a wrap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    index: usize,
}

impl Cursor {
    /// Cursor at position 0.
    pub fn new() -> Cursor {
        Cursor::default()
    }

    /// Cursor at a specific position. The caller picks a valid one;
    /// `clamp_to` repairs it if the range later shrinks.
    pub fn at(index: usize) -> Cursor {
        Cursor { index }
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Steps forward, stopping at `last`.
    pub fn next(&mut self, last: usize) {
        if self.index < last {
            self.index += 1;
        }
    }

    /// Steps backward, stopping at 0.
    pub fn prev(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    /// Pulls the cursor back into `[0, last]` after the range shrank.
    pub fn clamp_to(&mut self, last: usize) {
        if self.index > last {
            self.index = last;
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::SaleLine;

    fn ts(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    fn record_at(date: DateTime<Utc>) -> SalesRecord {
        SalesRecord {
            date,
            items: vec![SaleLine {
                name: "Doodh Patti".to_string(),
                price: Money::from_rupees(150),
                quantity: 1,
            }],
            total: Money::from_rupees(150),
        }
    }

    #[test]
    fn test_empty_log_has_one_open_shift() {
        let log = ShiftLog::new();
        let now = ts("2024-03-01T12:00:00Z");

        assert_eq!(log.shift_count(), 1);
        assert_eq!(log.open_index(), 0);

        let window = log.window_for(0, now).unwrap();
        assert_eq!(window.start, DateTime::UNIX_EPOCH);
        assert_eq!(window.end, now);
    }

    #[test]
    fn test_close_must_be_strictly_increasing() {
        let mut log = ShiftLog::new();
        let t1 = ts("2024-03-01T14:00:00Z");

        log.close(t1).unwrap();

        // same instant again: duplicate click
        let err = log.close(t1).unwrap_err();
        assert!(matches!(err, CoreError::NonMonotonic { .. }));

        // earlier instant: clock skew
        assert!(log.close(ts("2024-03-01T13:59:59Z")).is_err());

        // log untouched by the rejected closings
        assert_eq!(log.closings(), &[t1]);

        log.close(ts("2024-03-01T22:00:00Z")).unwrap();
        assert_eq!(log.shift_count(), 3);
    }

    #[test]
    fn test_from_closings_validates_order() {
        let t1 = ts("2024-03-01T14:00:00Z");
        let t2 = ts("2024-03-01T22:00:00Z");

        let log = ShiftLog::from_closings(vec![t1, t2]).unwrap();
        assert_eq!(log.closings(), &[t1, t2]);

        assert!(ShiftLog::from_closings(vec![t2, t1]).is_err());
        assert!(ShiftLog::from_closings(vec![t1, t1]).is_err());
    }

    #[test]
    fn test_windows_tile_the_timeline() {
        let t1 = ts("2024-03-01T14:00:00Z");
        let t2 = ts("2024-03-01T22:00:00Z");
        let now = ts("2024-03-02T10:00:00Z");
        let log = ShiftLog::from_closings(vec![t1, t2]).unwrap();

        let w0 = log.window_for(0, now).unwrap();
        let w1 = log.window_for(1, now).unwrap();
        let w2 = log.window_for(2, now).unwrap();

        assert_eq!((w0.start, w0.end), (DateTime::UNIX_EPOCH, t1));
        assert_eq!((w1.start, w1.end), (t1, t2));
        assert_eq!((w2.start, w2.end), (t2, now));

        let err = log.window_for(3, now).unwrap_err();
        assert!(matches!(
            err,
            CoreError::OutOfRange {
                value: 3,
                min: 0,
                max: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_record_at_closing_belongs_to_next_shift() {
        let t1 = ts("2024-03-01T14:00:00Z");
        let now = ts("2024-03-01T20:00:00Z");
        let log = ShiftLog::from_closings(vec![t1]).unwrap();

        let w0 = log.window_for(0, now).unwrap();
        let w1 = log.window_for(1, now).unwrap();

        assert!(!w0.contains(t1));
        assert!(w1.contains(t1));
    }

    #[test]
    fn test_records_partition_without_overlap_or_gap() {
        let t1 = ts("2024-03-01T14:00:00Z");
        let t2 = ts("2024-03-01T22:00:00Z");
        let now = ts("2024-03-02T10:00:00Z");
        let log = ShiftLog::from_closings(vec![t1, t2]).unwrap();

        let history = vec![
            record_at(ts("2024-03-01T09:00:00Z")),
            record_at(t1),
            record_at(ts("2024-03-01T18:30:00Z")),
            record_at(t2),
            record_at(ts("2024-03-02T09:59:59Z")),
        ];

        let mut seen = 0;
        for index in 0..log.shift_count() {
            let window = log.window_for(index, now).unwrap();
            seen += records_in(&history, &window).len();
        }
        assert_eq!(seen, history.len());

        let w0 = records_in(&history, &log.window_for(0, now).unwrap());
        let w1 = records_in(&history, &log.window_for(1, now).unwrap());
        assert_eq!(w0.len(), 1);
        assert_eq!(w1.len(), 2);
        assert_eq!(w1[0].date, t1);
    }

    #[test]
    fn test_cursor_clamps_at_both_ends() {
        let mut cursor = Cursor::new();

        cursor.prev();
        assert_eq!(cursor.index(), 0);

        cursor.next(2);
        cursor.next(2);
        assert_eq!(cursor.index(), 2);

        cursor.next(2);
        assert_eq!(cursor.index(), 2);

        cursor.prev();
        assert_eq!(cursor.index(), 1);
    }

    #[test]
    fn test_cursor_clamp_to_after_range_shrinks() {
        let mut cursor = Cursor::at(5);
        cursor.clamp_to(2);
        assert_eq!(cursor.index(), 2);

        cursor.clamp_to(4);
        assert_eq!(cursor.index(), 2);
    }
}
