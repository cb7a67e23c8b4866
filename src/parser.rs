use anyhow::{bail, Context};
use itertools::Itertools;
use log::{debug, warn};
use scraper::{ElementRef, Html};

use crate::{
    chrono_util::{parse_block_date, parse_slot_time},
    schema::{EmptyDayPolicy, Schedule, SlotKey, TimeWindow},
};

pub fn parse(html: &str, window: &TimeWindow, policy: EmptyDayPolicy) -> anyhow::Result<Schedule> {
    parse_document(&Html::parse_document(html), window, policy)
}

/// Collects the open slots of every date block whose start time falls inside `window`.
pub fn parse_document(
    html: &Html,
    window: &TimeWindow,
    policy: EmptyDayPolicy,
) -> anyhow::Result<Schedule> {
    let mut schedule = Schedule::default();
    for block in html.select(selector!("div.appointment-date-block")) {
        if block
            .select(selector!("p#no_appointments_message"))
            .next()
            .is_some()
        {
            let label = block_label(block);
            warn!("{label} has no appointments");
            match policy {
                EmptyDayPolicy::Abort => {
                    let mut schedule = Schedule::default();
                    schedule.push_empty_day(label);
                    return Ok(schedule);
                }
                EmptyDayPolicy::Skip => {
                    schedule.push_empty_day(label);
                    continue;
                }
            }
        }
        parse_block(block, window, &mut schedule)?;
    }
    Ok(schedule)
}

fn parse_block(block: ElementRef, window: &TimeWindow, schedule: &mut Schedule) -> anyhow::Result<()> {
    let heading = block
        .select(selector!("h1"))
        .next()
        .context("Date heading not found in a date block")?
        .text()
        .collect::<String>();
    let date = parse_block_date(&heading)
        .with_context(|| format!("Unexpected date heading: {heading:?}"))?;
    if !window.contains_date(date) {
        bail!(
            "Date {date} lies outside {} - {}.  The page format has probably changed.",
            window.earliest_date(),
            window.latest_date()
        );
    }
    debug!("Parsing slots on {date}");

    for court in block.select(selector!("div.healcode-trainer")) {
        let name = links_under(court, "div")
            .next()
            .with_context(|| format!("Court name not found on {date}"))?
            .text()
            .collect::<String>()
            .trim()
            .to_owned();
        let times = links_under(court, "span")
            .map(|a| {
                let text = a.text().collect::<String>();
                parse_slot_time(&text)
                    .with_context(|| format!("Unexpected slot time {text:?} for {name} on {date}"))
            })
            .try_collect::<_, Vec<_>, _>()?;
        debug!("{name}: {} slots listed", times.len());
        let key = SlotKey {
            date,
            court: name.into(),
        };
        for time in times {
            if window.contains_time_of_day(time) {
                schedule.push(key.clone(), date.and_time(time));
            }
        }
    }
    Ok(())
}

/// Every `a` whose parent is a `parent` element strictly inside `scope`, in document order.
/// Unlike a `parent > a` selector, `scope` and its ancestors never count as the parent.
fn links_under<'a>(
    scope: ElementRef<'a>,
    parent: &'static str,
) -> impl Iterator<Item = ElementRef<'a>> {
    scope
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .filter(move |e| e.value().name() == parent)
        .flat_map(|e| e.children().filter_map(ElementRef::wrap))
        .filter(|e| e.value().name() == "a")
}

/// The heading of a date block, or its own text when there is no heading.
fn block_label(block: ElementRef) -> String {
    let text = match block.select(selector!("h1")).next() {
        Some(h1) => h1.text().collect::<String>(),
        None => block
            .children()
            .filter_map(|node| node.value().as_text())
            .map(|text| &**text)
            .collect(),
    };
    match text.trim() {
        "" => "A day".to_owned(),
        text => text.to_owned(),
    }
}
