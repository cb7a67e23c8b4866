use std::io::{self, Write};

use crate::schema::{Schedule, TimeWindow};

pub fn write_banner(w: &mut impl Write, window: &TimeWindow) -> io::Result<()> {
    writeln!(w, "Finding slots between")?;
    writeln!(
        w,
        "{} - {}",
        window.earliest().format("%b %d, %Y"),
        window.latest().format("%b %d, %Y")
    )?;
    writeln!(
        w,
        "Starting between {}-{}",
        window.earliest().format("%H:%M"),
        window.latest().format("%H:%M")
    )?;
    writeln!(w)
}

/// Prints each day and court followed by its slot times.
/// Notices for days without appointments appear where those days were on the page.
pub fn write_schedule(w: &mut impl Write, schedule: &Schedule) -> io::Result<()> {
    let mut empty_days = schedule.empty_days.iter().peekable();
    for (i, (key, times)) in schedule.slots.iter().enumerate() {
        while let Some(day) = empty_days.next_if(|day| day.position <= i) {
            writeln!(w, "{} has no appointments", day.label)?;
        }
        writeln!(w, "{key}")?;
        for time in times {
            writeln!(w, "{}", time.format("%H:%M"))?;
        }
    }
    for day in empty_days {
        writeln!(w, "{} has no appointments", day.label)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};

    use super::{write_banner, write_schedule};
    use crate::schema::{Schedule, SlotKey, TimeWindow};

    #[test]
    fn banner() {
        let window = TimeWindow::new(
            NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
            NaiveDate::from_ymd_opt(2026, 11, 2).unwrap(),
            NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
            NaiveTime::from_hms_opt(0, 0, 0).unwrap(),
        )
        .unwrap();
        let mut out = Vec::new();
        write_banner(&mut out, &window).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Finding slots between\nOct 19, 2026 - Nov 02, 2026\nStarting between 09:30-23:59\n\n"
        );
    }

    #[test]
    fn schedule() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let at = |h, m| date.and_time(NaiveTime::from_hms_opt(h, m, 0).unwrap());
        let mut schedule = Schedule::default();
        let court = |name: &str| SlotKey {
            date,
            court: name.to_owned().into(),
        };
        schedule.push(court("Court 2"), at(22, 0));
        schedule.push(court("Court 1"), at(7, 5));
        schedule.push(court("Court 2"), at(23, 0));

        let mut out = Vec::new();
        write_schedule(&mut out, &schedule).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "October 19, 2026, Court 2\n22:00\n23:00\n\
             October 19, 2026, Court 1\n07:05\n"
        );
    }

    #[test]
    fn empty_day_notices_in_page_order() {
        let at = |d, h| {
            NaiveDate::from_ymd_opt(2026, 10, d)
                .unwrap()
                .and_time(NaiveTime::from_hms_opt(h, 0, 0).unwrap())
        };
        let key = |d| SlotKey {
            date: NaiveDate::from_ymd_opt(2026, 10, d).unwrap(),
            court: "Court 1".to_owned().into(),
        };
        let mut schedule = Schedule::default();
        schedule.push_empty_day("Sunday October 18, 2026".to_owned());
        schedule.push(key(19), at(19, 10));
        schedule.push_empty_day("Tuesday October 20, 2026".to_owned());
        schedule.push(key(21), at(21, 10));
        schedule.push_empty_day("Thursday October 22, 2026".to_owned());

        let mut out = Vec::new();
        write_schedule(&mut out, &schedule).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Sunday October 18, 2026 has no appointments\n\
             October 19, 2026, Court 1\n10:00\n\
             Tuesday October 20, 2026 has no appointments\n\
             October 21, 2026, Court 1\n10:00\n\
             Thursday October 22, 2026 has no appointments\n"
        );
    }
}
