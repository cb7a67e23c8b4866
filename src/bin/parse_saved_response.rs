use std::{io, path::PathBuf};

use anyhow::Context;
use chrono::{NaiveDate, NaiveTime};
use clap::Parser;
use court_finder::{
    api::decode_response,
    chrono_util::parse_time_of_day,
    parser,
    report::{write_banner, write_schedule},
    schema::{EmptyDayPolicy, TimeWindow},
};
use fs_err::read_to_string;

/// Run a response saved with `court-finder --save-response` through the parser again.
#[derive(Parser)]
struct Opts {
    input_file: PathBuf,
    #[arg(long = "ed")]
    earliest_date: NaiveDate,
    #[arg(long = "ld")]
    latest_date: NaiveDate,
    #[arg(long = "et", value_parser = parse_time_of_day)]
    earliest_time: NaiveTime,
    #[arg(long = "lt", value_parser = parse_time_of_day)]
    latest_time: NaiveTime,
    #[arg(long, value_enum, default_value_t)]
    empty_days: EmptyDayPolicy,
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let opts = Opts::parse();
    let window = TimeWindow::new(
        opts.earliest_date,
        opts.latest_date,
        opts.earliest_time,
        opts.latest_time,
    )?;

    let body = read_to_string(&opts.input_file)?;
    let html = decode_response(&body)
        .with_context(|| format!("{:?} is not a widget response", opts.input_file))?;
    let schedule = parser::parse(&html, &window, opts.empty_days)?;

    let mut stdout = io::stdout().lock();
    write_banner(&mut stdout, &window)?;
    write_schedule(&mut stdout, &schedule)?;
    Ok(())
}
