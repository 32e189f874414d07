// Activity gate - decides whether incoming messages are processed at all.
//
// The bot goes quiet during fixed evening windows on some weekdays. The
// schedule is a plain table so it can be tested without touching the clock.

use chrono::{DateTime, Datelike, NaiveTime, TimeZone, Utc, Weekday};
use chrono_tz::Tz;
use std::collections::HashMap;

/// Source of "now". Swapped for a fixed clock in tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A time-of-day range during which the bot ignores messages.
/// Both ends are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuietWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl QuietWindow {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    fn contains(&self, time: NaiveTime) -> bool {
        time >= self.start && time <= self.end
    }
}

/// Weekly quiet-hours table evaluated in a fixed timezone.
#[derive(Debug, Clone)]
pub struct ActivitySchedule {
    timezone: Tz,
    quiet_windows: HashMap<Weekday, Vec<QuietWindow>>,
}

impl ActivitySchedule {
    /// An empty schedule: always active.
    pub fn new(timezone: Tz) -> Self {
        Self {
            timezone,
            quiet_windows: HashMap::new(),
        }
    }

    /// Tuesday, Thursday and Saturday from 21:45 to 23:55 are quiet.
    pub fn evening_quiet_hours(timezone: Tz) -> Self {
        let window = QuietWindow::new(hm(21, 45), hm(23, 55));

        Self::new(timezone)
            .with_window(Weekday::Tue, window)
            .with_window(Weekday::Thu, window)
            .with_window(Weekday::Sat, window)
    }

    pub fn with_window(mut self, day: Weekday, window: QuietWindow) -> Self {
        self.quiet_windows.entry(day).or_default().push(window);
        self
    }

    /// Whether messages arriving at `now` should be processed.
    ///
    /// `now` may carry any offset; it is converted into the schedule's
    /// timezone before the weekday and time-of-day are checked.
    pub fn is_active<T: TimeZone>(&self, now: &DateTime<T>) -> bool {
        let local = now.with_timezone(&self.timezone);

        let Some(windows) = self.quiet_windows.get(&local.weekday()) else {
            return true;
        };

        let time = local.time();
        !windows.iter().any(|w| w.contains(time))
    }
}

impl Default for ActivitySchedule {
    fn default() -> Self {
        Self::evening_quiet_hours(chrono_tz::Europe::Moscow)
    }
}

// Only called with literal in-range values.
fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Europe::Moscow;

    /// Moscow wall-clock time on a given date. 2024-06-03 is a Monday.
    fn moscow(day: u32, hour: u32, minute: u32, second: u32) -> DateTime<Tz> {
        Moscow
            .with_ymd_and_hms(2024, 6, day, hour, minute, second)
            .single()
            .unwrap()
    }

    #[test]
    fn test_quiet_days_inside_window_are_inactive() {
        let schedule = ActivitySchedule::default();

        // Tuesday, Thursday, Saturday
        for day in [4, 6, 8] {
            assert!(!schedule.is_active(&moscow(day, 21, 45, 0)), "day {day} start");
            assert!(!schedule.is_active(&moscow(day, 22, 30, 0)), "day {day} middle");
            assert!(!schedule.is_active(&moscow(day, 23, 55, 0)), "day {day} end");
        }
    }

    #[test]
    fn test_window_edges_are_inclusive() {
        let schedule = ActivitySchedule::default();

        assert!(schedule.is_active(&moscow(4, 21, 44, 59)));
        assert!(!schedule.is_active(&moscow(4, 21, 45, 0)));
        assert!(!schedule.is_active(&moscow(4, 23, 55, 0)));
        assert!(schedule.is_active(&moscow(4, 23, 55, 1)));
    }

    #[test]
    fn test_other_days_are_always_active() {
        let schedule = ActivitySchedule::default();

        // Monday, Wednesday, Friday, Sunday
        for day in [3, 5, 7, 9] {
            assert!(schedule.is_active(&moscow(day, 22, 0, 0)), "day {day}");
        }
    }

    #[test]
    fn test_utc_input_is_converted_to_schedule_timezone() {
        let schedule = ActivitySchedule::default();

        // 19:00 UTC on Tuesday is 22:00 in Moscow (UTC+3)
        let tuesday_evening = Utc.with_ymd_and_hms(2024, 6, 4, 19, 0, 0).unwrap();
        assert!(!schedule.is_active(&tuesday_evening));

        // 21:00 UTC on Tuesday is already 00:00 Wednesday in Moscow
        let after_midnight = Utc.with_ymd_and_hms(2024, 6, 4, 21, 0, 0).unwrap();
        assert!(schedule.is_active(&after_midnight));
    }

    #[test]
    fn test_custom_table() {
        let schedule = ActivitySchedule::new(chrono_tz::UTC)
            .with_window(Weekday::Mon, QuietWindow::new(hm(9, 0), hm(10, 0)));

        let monday_nine_thirty = Utc.with_ymd_and_hms(2024, 6, 3, 9, 30, 0).unwrap();
        let tuesday_nine_thirty = Utc.with_ymd_and_hms(2024, 6, 4, 9, 30, 0).unwrap();

        assert!(!schedule.is_active(&monday_nine_thirty));
        assert!(schedule.is_active(&tuesday_nine_thirty));
        assert!(ActivitySchedule::new(chrono_tz::UTC).is_active(&monday_nine_thirty));
    }
}
