//! Business Hours Model
//!
//! Weekly open/close windows for a venue and the open/closed state derived
//! from them. The API serves one row per window per weekday; a venue open
//! past midnight is emitted as two rows (today truncated at end-of-day,
//! tomorrow starting at 00:00). A same-day row whose close is not after its
//! open therefore covers `[open, midnight)` only.

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Minutes in a day; also the clamped close bound for end-of-day rows
pub const MINUTES_PER_DAY: u16 = 1440;

/// Lead window (minutes) used for the UI's "opening soon" / "closing soon"
const DEFAULT_LEAD_MINUTES: u16 = 30;

/// Day of week as served by the places API
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Day {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
    /// Defensive decoding: any unrecognized day string
    #[serde(other)]
    Other,
}

impl Day {
    /// Short display name
    pub fn text(&self) -> &'static str {
        match self {
            Day::Mon => "Mon",
            Day::Tue => "Tue",
            Day::Wed => "Wed",
            Day::Thu => "Thu",
            Day::Fri => "Fri",
            Day::Sat => "Sat",
            Day::Sun => "Sun",
            Day::Other => "Day",
        }
    }

    /// Full display name
    pub fn full_name(&self) -> &'static str {
        match self {
            Day::Mon => "Monday",
            Day::Tue => "Tuesday",
            Day::Wed => "Wednesday",
            Day::Thu => "Thursday",
            Day::Fri => "Friday",
            Day::Sat => "Saturday",
            Day::Sun => "Sunday",
            Day::Other => "Day",
        }
    }

    pub fn from_weekday(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => Day::Mon,
            Weekday::Tue => Day::Tue,
            Weekday::Wed => Day::Wed,
            Weekday::Thu => Day::Thu,
            Weekday::Fri => Day::Fri,
            Weekday::Sat => Day::Sat,
            Weekday::Sun => Day::Sun,
        }
    }
}

/// Open/closed state derived from a schedule, never stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpenState {
    Open,
    Opening,
    Closed,
    Closing,
    /// The schedule is empty
    Unknown,
}

/// Errors from the strict time-string decode boundary
///
/// Unknown day strings are NOT an error (they decode to [`Day::Other`]);
/// only malformed `HH:mm` values and empty windows reject a row.
#[derive(Debug, Error)]
pub enum HourError {
    #[error("Invalid time string: {0}")]
    InvalidTime(String),

    #[error("Invalid window: open={open} close={close}")]
    InvalidWindow { open: String, close: String },
}

/// Raw business-hours row as served by the places API
///
/// `open`/`close` are 24-hour `HH:mm`; `"24:00"` and `"23:59"` both mark
/// end-of-day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hour {
    pub day: Day,
    pub open: String,
    pub close: String,
}

/// Parse `HH:mm` into minutes since midnight. `"24:00"` maps to 1440.
fn parse_minutes(time: &str) -> Result<u16, HourError> {
    let invalid = || HourError::InvalidTime(time.to_string());

    let (hour, minute) = time.split_once(':').ok_or_else(invalid)?;
    let hour: u16 = hour.parse().map_err(|_| invalid())?;
    let minute: u16 = minute.parse().map_err(|_| invalid())?;

    if hour > 24 || minute > 59 || (hour == 24 && minute != 0) {
        return Err(invalid());
    }
    Ok(hour * 60 + minute)
}

fn format_minute(minute: u16) -> String {
    let hour = (minute / 60) % 24;
    let min = minute % 60;
    let suffix = if hour < 12 { "am" } else { "pm" };
    let display = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{}:{:02}{}", display, min, suffix)
}

/// Close bounds of 1440 ("24:00") and 1439 ("23:59") both render as
/// "Midnight"; the API emits either for end-of-day.
fn format_close(minute: u16) -> String {
    if minute >= MINUTES_PER_DAY - 1 {
        "Midnight".to_string()
    } else {
        format_minute(minute)
    }
}

/// Validated open/close window on one weekday
///
/// `open_minute` in `[0, 1440)`, `close_minute` in `(0, 1440]`.
/// `close_minute <= open_minute` marks an overnight row: this row covers
/// `[open_minute, midnight)` and the continuation is the next day's row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub day: Day,
    pub open_minute: u16,
    pub close_minute: u16,
}

impl Interval {
    /// Close bound of the window on this day, clamped to end-of-day for
    /// overnight rows. Never wraps.
    fn effective_close(&self) -> u16 {
        if self.close_minute <= self.open_minute {
            MINUTES_PER_DAY
        } else {
            self.close_minute
        }
    }

    /// Half-open containment: `open <= minute < close`
    fn contains(&self, minute: u16) -> bool {
        self.open_minute <= minute && minute < self.effective_close()
    }

    /// Inside the window and within `lead` minutes of the close bound
    fn is_closing(&self, minute: u16, lead: u16) -> bool {
        self.contains(minute) && self.effective_close() - minute <= lead
    }

    /// Within `lead` minutes before the open bound
    fn is_opening(&self, minute: u16, lead: u16) -> bool {
        let lower = self.open_minute.saturating_sub(lead);
        lower <= minute && minute < self.open_minute
    }

    /// "11:00am - 2:00pm" display form
    pub fn time_range(&self) -> String {
        format!(
            "{} - {}",
            format_minute(self.open_minute),
            format_close(self.close_minute)
        )
    }
}

impl TryFrom<&Hour> for Interval {
    type Error = HourError;

    fn try_from(hour: &Hour) -> Result<Self, HourError> {
        let open_minute = parse_minutes(&hour.open)?;
        let close_minute = parse_minutes(&hour.close)?;

        if open_minute >= MINUTES_PER_DAY || close_minute == 0 || open_minute == close_minute {
            return Err(HourError::InvalidWindow {
                open: hour.open.clone(),
                close: hour.close.clone(),
            });
        }

        Ok(Interval {
            day: hour.day,
            open_minute,
            close_minute,
        })
    }
}

/// Immutable weekly schedule for a venue
///
/// Built once from the decoded rows, queried repeatedly against a
/// caller-supplied now. Pure and lock-free; safe to share across threads.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Schedule {
    intervals: Vec<Interval>,
}

impl Schedule {
    /// Strict decode boundary: every row must carry well-formed times.
    ///
    /// Intervals are kept sorted by `(day, open)` so grouped output is
    /// deterministic.
    pub fn from_hours(hours: &[Hour]) -> Result<Self, HourError> {
        let mut intervals = hours
            .iter()
            .map(Interval::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        intervals.sort_by_key(|i| (i.day, i.open_minute, i.close_minute));
        Ok(Schedule { intervals })
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    /// Classify the venue's state at `now`.
    ///
    /// First match wins, across all of the day's rows, in the order
    /// closing > open > opening; no match is closed. An empty schedule is
    /// [`OpenState::Unknown`] regardless of `now`.
    pub fn state_at(
        &self,
        now: NaiveDateTime,
        opening_lead: u16,
        closing_lead: u16,
    ) -> OpenState {
        if self.intervals.is_empty() {
            return OpenState::Unknown;
        }

        let day = Day::from_weekday(now.weekday());
        let minute = (now.hour() * 60 + now.minute()) as u16;
        let today = self.intervals.iter().filter(|i| i.day == day);

        let mut open = false;
        let mut opening = false;
        for interval in today {
            if interval.is_closing(minute, closing_lead) {
                return OpenState::Closing;
            }
            open |= interval.contains(minute);
            opening |= interval.is_opening(minute, opening_lead);
        }

        if open {
            OpenState::Open
        } else if opening {
            OpenState::Opening
        } else {
            OpenState::Closed
        }
    }

    /// [`Schedule::state_at`] with the UI's default 30-minute lead windows
    pub fn state_now(&self, now: NaiveDateTime) -> OpenState {
        self.state_at(now, DEFAULT_LEAD_MINUTES, DEFAULT_LEAD_MINUTES)
    }

    /// All of `day`'s windows as `"11:00am - 2:00pm, 6:00pm - 10:00pm"`,
    /// or `"Closed"` when the day has none
    pub fn today(&self, day: Day) -> String {
        let ranges: Vec<String> = self
            .intervals
            .iter()
            .filter(|i| i.day == day)
            .map(Interval::time_range)
            .collect();

        if ranges.is_empty() {
            "Closed".to_string()
        } else {
            ranges.join(", ")
        }
    }

    /// Build the per-day formatted view
    pub fn grouped(&self) -> Grouped {
        Grouped::new(self)
    }
}

/// Per-day formatted view of a schedule, built once
#[derive(Debug, Clone)]
pub struct Grouped {
    day_hours: BTreeMap<Day, String>,
}

impl Grouped {
    fn new(schedule: &Schedule) -> Self {
        let mut day_hours: BTreeMap<Day, String> = BTreeMap::new();
        // Intervals arrive sorted by (day, open), so ranges concatenate in
        // ascending open order.
        for interval in schedule.intervals() {
            let range = interval.time_range();
            day_hours
                .entry(interval.day)
                .and_modify(|text| {
                    text.push_str(", ");
                    text.push_str(&range);
                })
                .or_insert(range);
        }
        Grouped { day_hours }
    }

    /// Total lookup: days without a window resolve to "Closed"
    pub fn day(&self, day: Day) -> &str {
        self.day_hours
            .get(&day)
            .map(String::as_str)
            .unwrap_or("Closed")
    }

    /// Header line for the current day, e.g. `"Monday: 11:00am - 2:00pm"`
    pub fn today_summary(&self, now: NaiveDateTime) -> String {
        let day = Day::from_weekday(now.weekday());
        format!("{}: {}", day.full_name(), self.day(day))
    }
}
