//! # History Desk
//!
//! The versioned snapshot of everything already sold.
//!
//! ## Snapshot Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        History Desk State                               │
//! │                                                                         │
//! │   ┌───────────────────┐   ┌───────────────────┐                        │
//! │   │ records           │   │ closings          │      version: u64      │
//! │   │ [SalesRecord]     │   │ ShiftLog          │      bumped on every   │
//! │   │ append-only log   │   │ strictly ordered  │      refresh / close   │
//! │   └────────┬──────────┘   └─────────┬─────────┘                        │
//! │            │                        │                                   │
//! │            ▼                        ▼                                   │
//! │   ┌─────────────────────────────────────────────┐                      │
//! │   │ pure projections (sunset-core::report)      │                      │
//! │   │  day_groups · export_day · export_shift ·   │                      │
//! │   │  search · search_current_shift              │                      │
//! │   └─────────────────────────────────────────────┘                      │
//! │                                                                         │
//! │   shift cursor ──┐                                                      │
//! │   day cursor ────┴── clamped navigation, never an error                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Readers holding a summary from version *n* can detect staleness by
//! comparing against `version()` after the next mutation.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use sunset_client::PosBackend;
use sunset_core::report::{self, DaySummary, SearchHits, ShiftSummary};
use sunset_core::types::SalesRecord;
use sunset_core::{Cursor, ShiftLog};
use tracing::{debug, info};

use crate::error::SessionResult;

/// Sales records, the shift log, and the two reporting cursors.
pub struct HistoryDesk {
    backend: Arc<dyn PosBackend>,
    records: Vec<SalesRecord>,
    closings: ShiftLog,
    version: u64,
    shift_cursor: Cursor,
    day_cursor: Cursor,
}

impl HistoryDesk {
    pub fn new(backend: Arc<dyn PosBackend>) -> Self {
        HistoryDesk {
            backend,
            records: Vec::new(),
            closings: ShiftLog::new(),
            version: 0,
            shift_cursor: Cursor::new(),
            day_cursor: Cursor::new(),
        }
    }

    // =========================================================================
    // Snapshot
    // =========================================================================

    /// Replaces the snapshot with the service's history and closings.
    ///
    /// Both lists are fetched before anything local changes, so a failure
    /// mid-way leaves the previous snapshot fully intact. The first load
    /// lands the shift cursor on the open shift; later refreshes keep the
    /// operator's position, clamped to the new range.
    pub async fn refresh(&mut self) -> SessionResult<()> {
        let records = self.backend.list_history().await?;
        let closings = self.backend.list_shift_closings().await?;
        let log = ShiftLog::from_closings(closings)?;
        debug!(
            records = records.len(),
            shifts = log.shift_count(),
            "history refreshed"
        );

        let first_load = self.version == 0;
        self.records = records;
        self.closings = log;
        self.version += 1;
        if first_load {
            self.shift_cursor = Cursor::at(self.closings.open_index());
        } else {
            self.shift_cursor.clamp_to(self.closings.open_index());
        }
        Ok(())
    }

    /// Snapshot generation. Any mutation here increments it.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn shift_count(&self) -> usize {
        self.closings.shift_count()
    }

    // =========================================================================
    // Shift Closing
    // =========================================================================

    /// Ends the current shift at the service's authoritative time.
    ///
    /// The returned stamp passes through the shift log's monotonic guard
    /// before it is adopted; a skewed service clock is rejected and the
    /// local log stays as it was. The cursor then jumps to the freshly
    /// opened shift.
    pub async fn close_shift(&mut self) -> SessionResult<DateTime<Utc>> {
        let stamp = self.backend.close_shift().await?;
        self.closings.close(stamp)?;
        self.version += 1;
        self.shift_cursor = Cursor::at(self.closings.open_index());
        info!(%stamp, shifts = self.closings.shift_count(), "shift closed");
        Ok(stamp)
    }

    // =========================================================================
    // Shift Navigation
    // =========================================================================

    pub fn shift_index(&self) -> usize {
        self.shift_cursor.index()
    }

    /// Steps toward the open shift, stopping there.
    pub fn next_shift(&mut self) -> usize {
        self.shift_cursor.next(self.closings.open_index());
        self.shift_cursor.index()
    }

    /// Steps toward the first shift, stopping at it.
    pub fn previous_shift(&mut self) -> usize {
        self.shift_cursor.prev();
        self.shift_cursor.index()
    }

    /// Summary of the shift under the cursor, priced from its records.
    pub fn export_shift(&self, now: DateTime<Utc>) -> SessionResult<ShiftSummary> {
        Ok(report::shift_summary(
            &self.closings,
            self.shift_cursor.index(),
            &self.records,
            now,
        )?)
    }

    /// Search scoped to the shift under the cursor.
    pub fn search_current_shift(
        &self,
        term: &str,
        now: DateTime<Utc>,
    ) -> SessionResult<SearchHits> {
        let summary = self.export_shift(now)?;
        Ok(report::search(&summary.records, term))
    }

    /// Search over the whole history snapshot.
    pub fn search(&self, term: &str) -> SearchHits {
        report::search(&self.records, term)
    }

    // =========================================================================
    // Day Navigation
    // =========================================================================

    /// All records bucketed by local calendar day, first-seen order.
    pub fn day_groups<Tz: TimeZone>(&self, tz: &Tz) -> Vec<DaySummary> {
        report::group_by_day(&self.records, tz)
    }

    pub fn day_index(&self) -> usize {
        self.day_cursor.index()
    }

    /// Steps toward the last day group, stopping there. The bound depends
    /// on the zone because the buckets do.
    pub fn next_day<Tz: TimeZone>(&mut self, tz: &Tz) -> usize {
        let last = self.day_groups(tz).len().saturating_sub(1);
        self.day_cursor.next(last);
        self.day_cursor.index()
    }

    /// Steps toward the first day group, stopping at it.
    pub fn previous_day(&mut self) -> usize {
        self.day_cursor.prev();
        self.day_cursor.index()
    }

    /// Summary of the day group under the cursor, or `None` while the
    /// history is empty. A cursor past the end reads the last group.
    pub fn export_day<Tz: TimeZone>(&self, tz: &Tz) -> Option<DaySummary> {
        let groups = self.day_groups(tz);
        if groups.is_empty() {
            return None;
        }
        let index = self.day_cursor.index().min(groups.len() - 1);
        groups.into_iter().nth(index)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{record_at, ts, FakeBackend};
    use chrono::FixedOffset;
    use sunset_core::Money;

    fn desk_with(backend: Arc<FakeBackend>) -> HistoryDesk {
        HistoryDesk::new(backend)
    }

    #[tokio::test]
    async fn test_refresh_builds_the_versioned_snapshot() {
        let backend = Arc::new(FakeBackend::new());
        backend.push_history(record_at(ts("2025-03-01T10:00:00Z"), "Chicken Karahi", 2000, 1));
        backend.push_history(record_at(ts("2025-03-01T15:00:00Z"), "Doodh Patti", 250, 2));
        backend.push_closing(ts("2025-03-01T12:00:00Z"));

        let mut desk = desk_with(backend);
        assert_eq!(desk.version(), 0);

        desk.refresh().await.unwrap();

        assert_eq!(desk.version(), 1);
        assert_eq!(desk.records().len(), 2);
        assert_eq!(desk.shift_count(), 2);
        // First load lands on the open shift.
        assert_eq!(desk.shift_index(), 1);
    }

    #[tokio::test]
    async fn test_version_counts_every_mutation() {
        let backend = Arc::new(FakeBackend::new());
        let mut desk = desk_with(backend);

        desk.refresh().await.unwrap();
        desk.refresh().await.unwrap();
        desk.close_shift().await.unwrap();

        assert_eq!(desk.version(), 3);
    }

    #[tokio::test]
    async fn test_close_shift_adopts_the_service_stamp() {
        let backend = Arc::new(FakeBackend::new());
        backend.set_now(ts("2025-03-01T17:00:00Z"));
        let mut desk = desk_with(backend);
        desk.refresh().await.unwrap();

        let stamp = desk.close_shift().await.unwrap();

        assert_eq!(stamp, ts("2025-03-01T17:00:00Z"));
        assert_eq!(desk.shift_count(), 2);
        assert_eq!(desk.shift_index(), 1);
    }

    #[tokio::test]
    async fn test_skewed_service_clock_is_rejected() {
        let backend = Arc::new(FakeBackend::new());
        backend.set_now(ts("2025-03-01T17:00:00Z"));
        let mut desk = desk_with(backend.clone());
        desk.refresh().await.unwrap();
        desk.close_shift().await.unwrap();
        let version = desk.version();

        // The service clock going backwards must not corrupt the log.
        backend.set_now(ts("2025-03-01T16:00:00Z"));
        let err = desk.close_shift().await.unwrap_err();

        assert_eq!(err.code(), "NON_MONOTONIC");
        assert_eq!(desk.shift_count(), 2);
        assert_eq!(desk.version(), version);
    }

    #[tokio::test]
    async fn test_shift_navigation_clamps_at_both_ends() {
        let backend = Arc::new(FakeBackend::new());
        backend.push_closing(ts("2025-03-01T12:00:00Z"));
        backend.push_closing(ts("2025-03-01T17:00:00Z"));
        let mut desk = desk_with(backend);
        desk.refresh().await.unwrap();

        assert_eq!(desk.shift_index(), 2);
        assert_eq!(desk.next_shift(), 2);
        assert_eq!(desk.previous_shift(), 1);
        assert_eq!(desk.previous_shift(), 0);
        assert_eq!(desk.previous_shift(), 0);
    }

    #[tokio::test]
    async fn test_search_current_shift_sees_only_its_window() {
        let backend = Arc::new(FakeBackend::new());
        backend.push_history(record_at(ts("2025-03-01T10:00:00Z"), "Chicken Karahi", 2000, 1));
        backend.push_history(record_at(ts("2025-03-01T14:00:00Z"), "Doodh Patti", 250, 2));
        backend.push_closing(ts("2025-03-01T12:00:00Z"));
        let mut desk = desk_with(backend);
        desk.refresh().await.unwrap();

        let now = ts("2025-03-01T18:00:00Z");

        // Cursor starts on the open shift, which only has the chai.
        let open = desk.search_current_shift("karahi", now).unwrap();
        assert!(open.records.is_empty());

        desk.previous_shift();
        let first = desk.search_current_shift("karahi", now).unwrap();
        assert_eq!(first.records.len(), 1);
        assert_eq!(first.total_quantity, 1);

        // Whole-history search is cursor-independent.
        assert_eq!(desk.search("karahi").total_quantity, 1);
    }

    #[tokio::test]
    async fn test_export_shift_prices_from_the_lines() {
        let backend = Arc::new(FakeBackend::new());
        backend.push_history(record_at(ts("2025-03-01T10:00:00Z"), "Chicken Karahi", 2000, 2));
        let mut desk = desk_with(backend);
        desk.refresh().await.unwrap();

        let summary = desk.export_shift(ts("2025-03-01T18:00:00Z")).unwrap();
        assert_eq!(summary.label, "Shift 1 of 1");
        assert_eq!(summary.total_quantity, 2);
        assert_eq!(summary.total_amount, Money::from_rupees(4000));
    }

    #[tokio::test]
    async fn test_day_navigation_walks_the_groups() {
        let backend = Arc::new(FakeBackend::new());
        backend.push_history(record_at(ts("2025-03-01T10:00:00Z"), "Chicken Karahi", 2000, 1));
        backend.push_history(record_at(ts("2025-03-02T11:00:00Z"), "Doodh Patti", 250, 1));
        let mut desk = desk_with(backend);
        desk.refresh().await.unwrap();

        assert_eq!(desk.day_groups(&Utc).len(), 2);
        assert_eq!(
            desk.export_day(&Utc).unwrap().date,
            ts("2025-03-01T00:00:00Z").date_naive()
        );

        assert_eq!(desk.next_day(&Utc), 1);
        assert_eq!(desk.next_day(&Utc), 1);
        assert_eq!(
            desk.export_day(&Utc).unwrap().date,
            ts("2025-03-02T00:00:00Z").date_naive()
        );
        assert_eq!(desk.previous_day(), 0);
    }

    #[tokio::test]
    async fn test_export_day_respects_the_zone() {
        let backend = Arc::new(FakeBackend::new());
        backend.push_history(record_at(ts("2025-03-01T22:00:00Z"), "Chicken Karahi", 2000, 1));
        let mut desk = desk_with(backend);
        desk.refresh().await.unwrap();

        let karachi = FixedOffset::east_opt(5 * 3600).unwrap();
        let local = desk.export_day(&karachi).unwrap();
        assert_eq!(local.date.to_string(), "2025-03-02");

        let utc = desk.export_day(&Utc).unwrap();
        assert_eq!(utc.date.to_string(), "2025-03-01");
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_the_snapshot() {
        let backend = Arc::new(FakeBackend::new());
        backend.push_history(record_at(ts("2025-03-01T10:00:00Z"), "Chicken Karahi", 2000, 1));
        let mut desk = desk_with(backend.clone());
        desk.refresh().await.unwrap();

        backend.set_offline(true);
        let err = desk.refresh().await.unwrap_err();

        assert!(err.is_transient());
        assert_eq!(desk.version(), 1);
        assert_eq!(desk.records().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_history_has_no_day_to_export() {
        let backend = Arc::new(FakeBackend::new());
        let desk = desk_with(backend);
        assert!(desk.export_day(&Utc).is_none());
    }
}
