use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::time_of_day::{Minutes, format_minutes};

pub const MAX_DAILY_DJ_BOOKINGS: i64 = 2;
pub const PHOTOBOOTH_UNITS: i64 = 2;
/// An existing booking starting at or after this time is assumed to run into
/// the evening and closes the day.
pub const FULL_DAY_CUTOFF: Minutes = 11 * 60;
pub const MIN_GAP_MINUTES: Minutes = 3 * 60;
pub const MANUAL_BLOCK_REASON: &str = "Date manually blocked";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResult {
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub can_double_book: bool,
    pub bookings_count: i64,
    pub max_bookings: i64,
}

impl AvailabilityResult {
    fn available(can_double_book: bool, bookings_count: i64, max_bookings: i64) -> Self {
        Self {
            available: true,
            reason: None,
            can_double_book,
            bookings_count,
            max_bookings,
        }
    }

    fn unavailable(reason: String, bookings_count: i64, max_bookings: i64) -> Self {
        Self {
            available: false,
            reason: Some(reason),
            can_double_book: false,
            bookings_count,
            max_bookings,
        }
    }

    /// Staff blocks win over everything else.
    pub fn manually_blocked(max_bookings: i64) -> Self {
        Self::unavailable(MANUAL_BLOCK_REASON.to_string(), 0, max_bookings)
    }
}

/// Confirmed slot already on the calendar, in minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExistingSlot {
    pub start: Minutes,
    pub end: Minutes,
}

/// The window being asked about. Overview calls leave both ends at minute 0,
/// which makes the gap arithmetic meaningless for slot-level decisions.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CandidateWindow {
    pub start: Minutes,
    pub end: Minutes,
}

/// Photobooth capacity counts every non-cancelled booking of the family on the
/// date, whichever unit it names.
pub fn evaluate_photobooth(active_bookings: i64) -> AvailabilityResult {
    if active_bookings < PHOTOBOOTH_UNITS {
        AvailabilityResult::available(false, active_bookings, PHOTOBOOTH_UNITS)
    } else {
        AvailabilityResult::unavailable(
            format!(
                "All {} photobooth units are booked for this date",
                PHOTOBOOTH_UNITS
            ),
            active_bookings,
            PHOTOBOOTH_UNITS,
        )
    }
}

/// Same-day double-booking rules for a DJ. `slots` must be ordered by start.
pub fn evaluate_dj(slots: &[ExistingSlot], candidate: CandidateWindow) -> AvailabilityResult {
    let count = slots.len() as i64;

    let existing = match slots {
        [] => return AvailabilityResult::available(true, 0, MAX_DAILY_DJ_BOOKINGS),
        [existing] => *existing,
        _ => {
            return AvailabilityResult::unavailable(
                format!(
                    "Maximum {} bookings already reached for this date",
                    MAX_DAILY_DJ_BOOKINGS
                ),
                count,
                MAX_DAILY_DJ_BOOKINGS,
            );
        }
    };

    if existing.start >= FULL_DAY_CUTOFF {
        return AvailabilityResult::unavailable(
            format!(
                "Date is fully booked (existing booking starts at {})",
                format_minutes(existing.start)
            ),
            count,
            MAX_DAILY_DJ_BOOKINGS,
        );
    }

    let gap_minutes = gap_between(existing, candidate);
    if gap_minutes >= MIN_GAP_MINUTES {
        AvailabilityResult::available(true, count, MAX_DAILY_DJ_BOOKINGS)
    } else {
        AvailabilityResult::unavailable(
            format!(
                "Need at least 3 hours between bookings (gap is {:.1} hours)",
                f64::from(gap_minutes) / 60.0
            ),
            count,
            MAX_DAILY_DJ_BOOKINGS,
        )
    }
}

/// Minutes between the existing slot and the candidate, measured on whichever
/// side of the existing slot the candidate starts. Negative when they overlap.
fn gap_between(existing: ExistingSlot, candidate: CandidateWindow) -> Minutes {
    if candidate.start >= existing.end {
        candidate.start.saturating_sub(existing.end)
    } else {
        existing.start.saturating_sub(candidate.end)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DayAvailability {
    pub available: bool,
    pub bookings: i64,
    pub remaining_slots: i64,
    pub capacity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocked: Option<bool>,
}

impl DayAvailability {
    pub fn blocked(capacity: i64) -> Self {
        Self {
            available: false,
            bookings: 0,
            remaining_slots: 0,
            capacity,
            blocked: Some(true),
        }
    }

    pub fn photobooth(active_bookings: i64) -> Self {
        Self {
            available: active_bookings < PHOTOBOOTH_UNITS,
            bookings: active_bookings,
            remaining_slots: (PHOTOBOOTH_UNITS - active_bookings).max(0),
            capacity: PHOTOBOOTH_UNITS,
            blocked: None,
        }
    }

    /// Calendar cell for a DJ. A lone slot starting at or after the cutoff
    /// closes the day just as it does for a slot-level check.
    pub fn dj(slots: &[ExistingSlot]) -> Self {
        let bookings = slots.len() as i64;
        let day_closed = matches!(slots, [only] if only.start >= FULL_DAY_CUTOFF);
        let remaining_slots = if day_closed {
            0
        } else {
            (MAX_DAILY_DJ_BOOKINGS - bookings).max(0)
        };

        Self {
            available: remaining_slots > 0,
            bookings,
            remaining_slots,
            capacity: MAX_DAILY_DJ_BOOKINGS,
            blocked: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAvailabilityBlockRequest {
    pub provider: String,
    pub date: NaiveDate,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListAvailabilityBlocksQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// Every date of the given month, or `None` for an invalid year/month.
pub fn days_in_month(year: i32, month: u32) -> Option<Vec<NaiveDate>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    Some(
        first
            .iter_days()
            .take_while(|day| chrono::Datelike::month(day) == month)
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(start: Minutes, end: Minutes) -> ExistingSlot {
        ExistingSlot { start, end }
    }

    fn window(start: Minutes, end: Minutes) -> CandidateWindow {
        CandidateWindow { start, end }
    }

    #[test]
    fn empty_day_allows_double_booking() {
        let result = evaluate_dj(&[], window(18 * 60, 23 * 60));
        assert!(result.available);
        assert!(result.can_double_book);
        assert_eq!(result.bookings_count, 0);
        assert_eq!(result.max_bookings, 2);
    }

    #[test]
    fn two_slots_fill_the_day() {
        let result = evaluate_dj(
            &[slot(8 * 60, 10 * 60), slot(14 * 60, 16 * 60)],
            window(20 * 60, 22 * 60),
        );
        assert!(!result.available);
        assert!(!result.can_double_book);
        assert!(result.reason.unwrap().contains("Maximum 2"));
    }

    #[test]
    fn slot_starting_at_cutoff_blocks_any_window() {
        for candidate in [window(0, 0), window(6 * 60, 7 * 60), window(20 * 60, 23 * 60)] {
            let result = evaluate_dj(&[slot(11 * 60, 13 * 60)], candidate);
            assert!(!result.available, "candidate {candidate:?}");
        }
    }

    #[test]
    fn slot_starting_just_before_cutoff_uses_gap_rule() {
        let result = evaluate_dj(&[slot(10 * 60 + 59, 12 * 60)], window(15 * 60, 18 * 60));
        assert!(result.available);
        assert!(result.can_double_book);
    }

    #[test]
    fn three_hour_gap_after_existing_slot_is_allowed() {
        let result = evaluate_dj(&[slot(10 * 60, 14 * 60)], window(17 * 60, 21 * 60));
        assert!(result.available);
        assert_eq!(result.bookings_count, 1);
    }

    #[test]
    fn gap_one_minute_short_is_rejected() {
        let result = evaluate_dj(&[slot(10 * 60, 14 * 60)], window(16 * 60 + 59, 21 * 60));
        assert!(!result.available);
        let reason = result.reason.unwrap();
        assert!(reason.contains("3 hours"), "got: {reason}");
    }

    #[test]
    fn gap_is_reported_with_one_decimal() {
        let result = evaluate_dj(&[slot(9 * 60, 12 * 60)], window(13 * 60 + 30, 17 * 60));
        assert_eq!(
            result.reason.as_deref(),
            Some("Need at least 3 hours between bookings (gap is 1.5 hours)")
        );
    }

    #[test]
    fn gap_before_existing_slot_is_symmetric() {
        let result = evaluate_dj(&[slot(10 * 60 + 30, 14 * 60)], window(6 * 60, 7 * 60 + 30));
        assert!(result.available);

        let result = evaluate_dj(&[slot(10 * 60 + 30, 14 * 60)], window(6 * 60, 8 * 60));
        assert!(!result.available);
    }

    #[test]
    fn extreme_candidate_times_do_not_overflow_the_gap() {
        let result = evaluate_dj(&[slot(9 * 60, 10 * 60)], window(i32::MIN, i32::MIN + 60));
        assert!(result.available);

        let result = evaluate_dj(&[slot(9 * 60, 10 * 60)], window(i32::MAX - 60, i32::MAX));
        assert!(result.available);
    }

    #[test]
    fn overlapping_candidate_is_rejected() {
        let result = evaluate_dj(&[slot(9 * 60, 12 * 60)], window(10 * 60, 13 * 60));
        assert!(!result.available);
    }

    #[test]
    fn photobooth_pool_has_two_units() {
        assert!(evaluate_photobooth(0).available);
        assert!(evaluate_photobooth(1).available);
        let full = evaluate_photobooth(2);
        assert!(!full.available);
        assert_eq!(full.bookings_count, 2);
        assert_eq!(full.max_bookings, 2);
    }

    #[test]
    fn manual_block_reason_is_stable() {
        let result = AvailabilityResult::manually_blocked(2);
        assert!(!result.available);
        assert_eq!(result.reason.as_deref(), Some("Date manually blocked"));
    }

    #[test]
    fn calendar_cell_closes_day_after_late_slot() {
        let cell = DayAvailability::dj(&[slot(18 * 60, 23 * 60)]);
        assert!(!cell.available);
        assert_eq!(cell.remaining_slots, 0);

        let cell = DayAvailability::dj(&[slot(8 * 60, 10 * 60)]);
        assert!(cell.available);
        assert_eq!(cell.remaining_slots, 1);
    }

    #[test]
    fn month_days_cover_the_whole_month() {
        assert_eq!(days_in_month(2024, 2).unwrap().len(), 29);
        assert_eq!(days_in_month(2025, 12).unwrap().len(), 31);
        assert!(days_in_month(2025, 13).is_none());
    }
}
