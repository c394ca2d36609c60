//! # Sales Aggregation
//!
//! Pure projections over the sale history: day buckets, name search, and
//! per-shift summaries.
//!
//! ## Aggregation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  history: [SalesRecord]                                                 │
//! │      │                                                                  │
//! │      ├── group_by_day(tz) ──────────▶ [DaySummary]                      │
//! │      │                                 (first-seen date order)          │
//! │      │                                                                  │
//! │      ├── search(term) ──────────────▶ SearchHits                        │
//! │      │                                 (matched records + quantity)     │
//! │      │                                                                  │
//! │      └── shift_summary(log, index) ─▶ ShiftSummary                      │
//! │                                        (windowed records + totals)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every summary carries its own totals so the receipt and export side
//! never re-derives a number. Amounts are always summed from the line
//! figures (price × quantity), not from the records' stored totals, so a
//! record whose total includes service tax does not inflate a report.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreResult;
use crate::money::Money;
use crate::shift::{records_in, ShiftLog, ShiftWindow};
use crate::types::{matches_ignore_case, SalesRecord};

// =============================================================================
// Summary Types
// =============================================================================

/// All sales that fell on one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DaySummary {
    /// Calendar date in the time zone the grouping was asked for.
    #[ts(as = "String")]
    pub date: NaiveDate,

    /// Units sold across every line of every record that day.
    pub total_quantity: i64,

    /// Line-derived takings for the day.
    pub total_amount: Money,

    pub records: Vec<SalesRecord>,
}

/// Result of a name search over the history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SearchHits {
    /// Records with at least one matching line, in history order.
    pub records: Vec<SalesRecord>,

    /// Units summed over the matching lines only. A record that also
    /// sells other items does not drag those quantities in.
    pub total_quantity: i64,
}

/// Everything the reporting side needs to render one shift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ShiftSummary {
    pub index: usize,

    /// Human label, e.g. `"Shift 2 of 3"`.
    pub label: String,

    pub window: ShiftWindow,

    pub total_quantity: i64,

    pub total_amount: Money,

    pub records: Vec<SalesRecord>,
}

// =============================================================================
// Aggregation Operations
// =============================================================================

/// Buckets records by calendar day in the given time zone.
///
/// Days appear in the order their dates are first seen in the input; no
/// sorting happens here. The same instant can land on different days in
/// different zones, which is why the zone is an explicit argument.
pub fn group_by_day<Tz: TimeZone>(records: &[SalesRecord], tz: &Tz) -> Vec<DaySummary> {
    let mut days: Vec<DaySummary> = Vec::new();

    for record in records {
        let date = record.date.with_timezone(tz).date_naive();
        let slot = match days.iter().position(|day| day.date == date) {
            Some(slot) => slot,
            None => {
                days.push(DaySummary {
                    date,
                    total_quantity: 0,
                    total_amount: Money::zero(),
                    records: Vec::new(),
                });
                days.len() - 1
            }
        };

        let day = &mut days[slot];
        day.total_quantity += record.total_quantity();
        day.total_amount += record.line_amount();
        day.records.push(record.clone());
    }

    days
}

/// Case-insensitive substring search against line-item names.
///
/// Returns the records containing at least one match, plus the quantity
/// summed over matching lines alone. A blank term matches everything.
pub fn search(records: &[SalesRecord], term: &str) -> SearchHits {
    let mut hits = SearchHits {
        records: Vec::new(),
        total_quantity: 0,
    };

    for record in records {
        let matched: i64 = record
            .items
            .iter()
            .filter(|line| matches_ignore_case(&line.name, term))
            .map(|line| line.quantity)
            .sum();

        if matched > 0 {
            hits.total_quantity += matched;
            hits.records.push(record.clone());
        }
    }

    hits
}

/// Builds the full summary for shift `index`.
///
/// Fails with `OutOfRange` when `index` is past the open shift, exactly
/// as [`ShiftLog::window_for`] does.
pub fn shift_summary(
    log: &ShiftLog,
    index: usize,
    history: &[SalesRecord],
    now: DateTime<Utc>,
) -> CoreResult<ShiftSummary> {
    let window = log.window_for(index, now)?;
    let records = records_in(history, &window);

    let total_quantity = records.iter().map(SalesRecord::total_quantity).sum();
    let total_amount = records.iter().map(SalesRecord::line_amount).sum();

    Ok(ShiftSummary {
        index,
        label: format!("Shift {} of {}", index + 1, log.shift_count()),
        window,
        total_quantity,
        total_amount,
        records,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
