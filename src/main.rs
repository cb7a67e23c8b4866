use std::{io, path::PathBuf};

use anyhow::Context;
use chrono::{NaiveDate, NaiveTime};
use clap::{error::ErrorKind, CommandFactory, Parser};
use court_finder::{
    api::{decode_response, ScheduleQuery, WidgetClient},
    chrono_util::parse_time_of_day,
    parser,
    report::{write_banner, write_schedule},
    schema::{EmptyDayPolicy, SlotTypeId, TimeWindow},
};
use log::info;

/// Crawl the McCarren tennis booking widget and find open slots.
/// Might take a while for a large date range.
#[derive(Parser)]
#[command(name = "court-finder")]
struct Opts {
    /// Earliest date to play. Format YYYY-MM-DD.
    #[arg(long = "ed", value_name = "EARLIEST_DATE")]
    earliest_date: NaiveDate,
    /// Latest date to play. Format YYYY-MM-DD.
    #[arg(long = "ld", value_name = "LATEST_DATE")]
    latest_date: NaiveDate,
    /// Earliest start time. Format HH or HH:MM.
    #[arg(long = "et", value_name = "EARLIEST_TIME", value_parser = parse_time_of_day)]
    earliest_time: NaiveTime,
    /// Latest start time. Format HH or HH:MM; an hour of 0 means the end of the day.
    #[arg(long = "lt", value_name = "LATEST_TIME", value_parser = parse_time_of_day)]
    latest_time: NaiveTime,
    /// ID of the desired time slot category. IDs are for 1 hour slots only.
    ///
    ///     weekday 5-14  :   14
    ///     weekday 14-18 :    5
    ///     weekday 18-22 :   18
    ///     weekday 22-0  : 1128
    ///     weekend 5-8   :   35
    ///     weekend 8-19  :   25
    ///     weekend 19-0  :   29
    #[arg(long = "id", default_value_t = 1128, verbatim_doc_comment)]
    slot_type: i64,
    /// What to do once a day without appointments turns up.
    #[arg(long, value_enum, default_value_t)]
    empty_days: EmptyDayPolicy,
    /// Also write the raw widget response here, for replaying with `parse_saved_response`.
    #[arg(long)]
    save_response: Option<PathBuf>,
}

impl Opts {
    /// Reversed bounds are reported like any other bad argument.
    fn window(&self) -> Result<TimeWindow, clap::Error> {
        TimeWindow::new(
            self.earliest_date,
            self.latest_date,
            self.earliest_time,
            self.latest_time,
        )
        .map_err(|e| Opts::command().error(ErrorKind::ValueValidation, e))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let opts = Opts::parse();
    let window = opts.window().unwrap_or_else(|e| e.exit());

    write_banner(&mut io::stdout().lock(), &window)?;

    let query = ScheduleQuery::builder()
        .start_date(window.earliest_date())
        .end_date(window.latest_date())
        .slot_type(SlotTypeId::from(opts.slot_type))
        .build();
    let body = WidgetClient::new()?.fetch_raw(&query).await?;
    if let Some(path) = &opts.save_response {
        fs_err::write(path, &body)?;
        info!("Saved the raw response to {path:?}.");
    }
    let html = decode_response(&body).context("Unexpected response from the widget")?;
    let schedule = parser::parse(&html, &window, opts.empty_days)?;

    write_schedule(&mut io::stdout().lock(), &schedule)?;
    Ok(())
}
