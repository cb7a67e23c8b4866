use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use derive_more::{Display, From};
use getset::CopyGetters;
use indexmap::IndexMap;

/// Vendor-defined code for a category of bookable time window.
#[derive(Clone, Copy, PartialEq, Eq, Debug, From, Display)]
pub struct SlotTypeId(i64);
impl Default for SlotTypeId {
    fn default() -> Self {
        Self(1128)
    }
}

#[derive(Clone, PartialEq, Eq, Hash, Debug, From, Display)]
pub struct CourtName(String);

#[derive(Debug, thiserror::Error)]
pub enum WindowError {
    #[error("not a valid time: {0:?}")]
    InvalidTimeOfDay(String),
    #[error("earliest date must be before latest date: {0} vs {1}")]
    DatesReversed(NaiveDate, NaiveDate),
    #[error("earliest time must be before latest time: {0} vs {1}")]
    TimesReversed(NaiveTime, NaiveTime),
}

/// The requested range.
/// The date parts bound the days to query.
/// The time parts bound the accepted slot start times on each of those days.
#[derive(Clone, Copy, PartialEq, Eq, Debug, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct TimeWindow {
    earliest: NaiveDateTime,
    latest: NaiveDateTime,
}

impl TimeWindow {
    pub fn new(
        earliest_date: NaiveDate,
        latest_date: NaiveDate,
        earliest_time: NaiveTime,
        latest_time: NaiveTime,
    ) -> Result<Self, WindowError> {
        use chrono::Timelike;
        // A latest hour of 0 stands for the end of that day.
        let latest_time = if latest_time.hour() == 0 {
            NaiveTime::from_hms_opt(23, 59, 0).unwrap()
        } else {
            latest_time
        };
        if earliest_date > latest_date {
            return Err(WindowError::DatesReversed(earliest_date, latest_date));
        }
        if earliest_time > latest_time {
            return Err(WindowError::TimesReversed(earliest_time, latest_time));
        }
        Ok(Self {
            earliest: earliest_date.and_time(earliest_time),
            latest: latest_date.and_time(latest_time),
        })
    }

    pub fn earliest_date(&self) -> NaiveDate {
        self.earliest.date()
    }

    pub fn latest_date(&self) -> NaiveDate {
        self.latest.date()
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        (self.earliest_date()..=self.latest_date()).contains(&date)
    }

    /// Both ends are inclusive.
    pub fn contains_time_of_day(&self, time: NaiveTime) -> bool {
        (self.earliest.time()..=self.latest.time()).contains(&time)
    }
}

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct SlotKey {
    pub date: NaiveDate,
    pub court: CourtName,
}
impl std::fmt::Display for SlotKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.date.format("%B %d, %Y"), self.court)
    }
}

/// What to do with the remaining date blocks once a day without appointments is found.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, clap::ValueEnum)]
pub enum EmptyDayPolicy {
    /// Discard everything collected so far and stop.
    #[default]
    Abort,
    /// Leave that day out and keep going.
    Skip,
}

#[derive(Debug, Default)]
pub struct Schedule {
    /// Open slot start times in document order, grouped by day and court.
    pub slots: IndexMap<SlotKey, Vec<NaiveDateTime>>,
    /// Date blocks that had no appointments at all, in document order.
    pub empty_days: Vec<EmptyDay>,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct EmptyDay {
    pub label: String,
    /// Number of slot groups that precede this day.
    pub position: usize,
}

impl Schedule {
    pub fn push(&mut self, key: SlotKey, time: NaiveDateTime) {
        self.slots.entry(key).or_default().push(time);
    }

    pub fn push_empty_day(&mut self, label: String) {
        let position = self.slots.len();
        self.empty_days.push(EmptyDay { label, position });
    }

    pub fn empty_day_labels(&self) -> Vec<&str> {
        self.empty_days.iter().map(|day| day.label.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};

    use super::{SlotKey, TimeWindow, WindowError};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }
    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn window_accepts_ordered_bounds() {
        let window = TimeWindow::new(date(2026, 10, 19), date(2026, 10, 21), hm(9, 0), hm(11, 0))
            .unwrap();
        assert_eq!(window.earliest(), date(2026, 10, 19).and_time(hm(9, 0)));
        assert_eq!(window.latest(), date(2026, 10, 21).and_time(hm(11, 0)));

        // Same day and same time are both fine.
        TimeWindow::new(date(2026, 10, 19), date(2026, 10, 19), hm(9, 0), hm(9, 0)).unwrap();
    }

    #[test]
    fn window_rejects_reversed_dates() {
        let result = TimeWindow::new(date(2026, 10, 20), date(2026, 10, 19), hm(9, 0), hm(11, 0));
        assert!(matches!(result, Err(WindowError::DatesReversed(..))));
    }

    #[test]
    fn window_rejects_reversed_times() {
        let result = TimeWindow::new(date(2026, 10, 19), date(2026, 10, 20), hm(12, 0), hm(11, 0));
        assert!(matches!(result, Err(WindowError::TimesReversed(..))));
    }

    #[test]
    fn midnight_latest_time_means_end_of_day() {
        let window = TimeWindow::new(date(2026, 10, 19), date(2026, 10, 19), hm(22, 0), hm(0, 0))
            .unwrap();
        assert_eq!(window.latest().time(), hm(23, 59));
        assert!(window.contains_time_of_day(hm(23, 0)));

        let window = TimeWindow::new(date(2026, 10, 19), date(2026, 10, 19), hm(0, 0), hm(0, 30))
            .unwrap();
        assert_eq!(window.latest().time(), hm(23, 59));
    }

    #[test]
    fn time_of_day_bounds_are_inclusive() {
        let window = TimeWindow::new(date(2026, 10, 19), date(2026, 10, 19), hm(9, 0), hm(11, 0))
            .unwrap();
        assert!(window.contains_time_of_day(hm(9, 0)));
        assert!(window.contains_time_of_day(hm(10, 30)));
        assert!(window.contains_time_of_day(hm(11, 0)));
        assert!(!window.contains_time_of_day(hm(11, 30)));
        assert!(!window.contains_time_of_day(hm(8, 59)));
    }

    #[test]
    fn slot_key_display() {
        let key = SlotKey {
            date: date(2026, 10, 5),
            court: "Court 3".to_owned().into(),
        };
        assert_eq!(key.to_string(), "October 05, 2026, Court 3");
    }
}
