//! Date and time formatting with day-rollover caching.
//!
//! The time string is recomputed on every minute tick, but the date and
//! weekday strings only change once a day. [`ClockText`] caches a day key
//! (`year*1000 + day_of_year`) and skips the date recomputation entirely
//! while the key is unchanged, mirroring how rarely those regions repaint.
//!
//! # Formats
//!
//! - Time: `"HH:MM"` in 24-hour mode; `"H:MM"` in 12-hour mode, where a
//!   single leading zero is stripped (`"09:05"` becomes `"9:05"`; `"12:30"`
//!   is untouched since 12-hour hours run 1–12 and never produce `"00:xx"`).
//! - Date: `"{day}{suffix} of {month}"` with the English ordinal suffix and
//!   the full month name, e.g. `"23rd of September"`.
//! - Weekday: the full English weekday name.

use core::fmt::Write;

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use heapless::String;

// =============================================================================
// Tick Units Bitmask
// =============================================================================

/// Bitmask of calendar units that rolled over on a tick, as delivered by the
/// platform tick service. The dispatcher uses [`TimeUnits::HOUR`] to detect
/// hour boundaries for the hourly vibration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct TimeUnits(u8);

impl TimeUnits {
    /// The minute changed (set on every tick).
    pub const MINUTE: TimeUnits = TimeUnits(1 << 0);
    /// The hour changed.
    pub const HOUR: TimeUnits = TimeUnits(1 << 1);
    /// The calendar day changed.
    pub const DAY: TimeUnits = TimeUnits(1 << 2);

    /// Combine two unit masks.
    #[inline]
    pub const fn union(self, other: TimeUnits) -> TimeUnits {
        TimeUnits(self.0 | other.0)
    }

    /// Whether all units in `other` rolled over.
    #[inline]
    pub const fn contains(self, other: TimeUnits) -> bool {
        self.0 & other.0 == other.0
    }
}

/// Compute which units rolled over between two consecutive tick timestamps.
pub fn units_between(prev: NaiveDateTime, now: NaiveDateTime) -> TimeUnits {
    let mut units = TimeUnits::default();
    if prev.minute() != now.minute() || prev.hour() != now.hour() || prev.date() != now.date() {
        units = units.union(TimeUnits::MINUTE);
    }
    if prev.hour() != now.hour() || prev.date() != now.date() {
        units = units.union(TimeUnits::HOUR);
    }
    if prev.date() != now.date() {
        units = units.union(TimeUnits::DAY);
    }
    units
}

// =============================================================================
// Name and Suffix Lookup
// =============================================================================

/// English ordinal suffix for a day of month.
pub const fn ordinal_suffix(day: u32) -> &'static str {
    match day {
        1 | 21 | 31 => "st",
        2 | 22 => "nd",
        3 | 23 => "rd",
        _ => "th",
    }
}

/// Full English month name for a 1-based month number.
const fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        _ => "December",
    }
}

/// Full English weekday name.
const fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

// =============================================================================
// Clock Text State
// =============================================================================

/// Owns the three time-related display strings and the day-rollover cache.
pub struct ClockText {
    /// Cached `year*1000 + day_of_year`; `None` before the first update.
    day_key: Option<i32>,
    time_text: String<8>,
    date_text: String<24>,
    wday_text: String<12>,
    /// Number of date/weekday recomputations performed. Exists to prove the
    /// day-key cache works; see the unit tests.
    date_recomputes: u32,
}

impl ClockText {
    /// Create empty clock text; nothing is rendered until the first update.
    pub const fn new() -> Self {
        Self {
            day_key: None,
            time_text: String::new(),
            date_text: String::new(),
            wday_text: String::new(),
            date_recomputes: 0,
        }
    }

    /// Recompute display strings for a tick timestamp.
    ///
    /// The time string is always rewritten. The date and weekday strings are
    /// rewritten if and only if the calendar day changed since the previous
    /// call. Returns whether the date strings were recomputed.
    pub fn update(
        &mut self,
        now: NaiveDateTime,
        use_24h: bool,
    ) -> bool {
        let day_key = now.year() * 1000 + now.ordinal0() as i32;
        let day_changed = self.day_key != Some(day_key);

        if day_changed {
            self.day_key = Some(day_key);
            self.date_recomputes += 1;

            let day = now.day();
            self.date_text.clear();
            let _ = write!(
                self.date_text,
                "{}{} of {}",
                day,
                ordinal_suffix(day),
                month_name(now.month())
            );

            self.wday_text.clear();
            let _ = self.wday_text.push_str(weekday_name(now.weekday()));
        }

        self.time_text.clear();
        if use_24h {
            let _ = write!(self.time_text, "{:02}:{:02}", now.hour(), now.minute());
        } else {
            // 12-hour hours run 1-12, so at most one leading zero is dropped
            let (_, hour12) = now.hour12();
            let _ = write!(self.time_text, "{}:{:02}", hour12, now.minute());
        }

        day_changed
    }

    /// Current time string ("14:05" / "2:05").
    #[inline]
    pub fn time(&self) -> &str {
        &self.time_text
    }

    /// Current date string ("23rd of September").
    #[inline]
    pub fn date(&self) -> &str {
        &self.date_text
    }

    /// Current weekday string ("Tuesday").
    #[inline]
    pub fn weekday(&self) -> &str {
        &self.wday_text
    }

    #[cfg(test)]
    fn recompute_count(&self) -> u32 {
        self.date_recomputes
    }
}

impl Default for ClockText {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
