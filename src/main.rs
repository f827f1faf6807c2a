use std::{fs, path::PathBuf, process};

use chrono::{Datelike, Days, Local, NaiveDate};
use clap::Parser;
use dialoguer::Input;

use coursetable::{
    filter, ics, logging, parser, timetable, CourseParser, CourseStore, Error, StoreConfig,
};

#[derive(Parser)]
#[clap(version, about, long_about = None)]
struct Args {
    /// JSON file of course records, `{"kbList": [...]}` or a plain array
    #[clap(value_parser)]
    input: PathBuf,

    /// First day of the term (YYYY-MM-DD), asked if missing
    #[clap(short, long)]
    first_day: Option<String>,

    /// Week to show, default to the current one
    #[clap(short, long, value_name = "WEEK NUMBER")]
    week: Option<u32>,

    /// Amount of weeks in the term
    #[clap(short = 'n', long, default_value_t = 20)]
    week_num: u32,

    /// Color palette
    #[clap(short, long, default_value_t = 0)]
    palette: usize,

    /// Choose courses and which one goes on top when they overlap
    #[clap(short, long)]
    interactive: bool,

    /// Export to iCalendar format (.ics)
    #[clap(short, long, value_name = "FILE NAME")]
    export: Option<String>,

    /// Print the week as JSON
    #[clap(short, long)]
    json: bool,

    /// Width of a day in the table
    #[clap(short, long, default_value_t = 20)]
    cell_length: usize,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();
    logging::init(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Error> {
    let config = StoreConfig::new()
        .with_week_num(args.week_num)
        .with_color_array_index(args.palette);
    config.validate()?;

    tracing::info!(file = %args.input.display(), "reading courses");
    let raws = parser::from_json(&fs::read_to_string(&args.input)?)?;
    let courses = CourseParser::new(config.week_num()).parse_all(&raws)?;

    let mut store = CourseStore::new(config);
    store.set_course_list(courses);

    let date = match args.first_day {
        None => Input::new()
            .with_prompt("First day of the term")
            .default(this_monday().format("%Y-%m-%d").to_string())
            .interact_text()?,
        Some(day) => day,
    };
    store.set_start_day(parse_date(&date)?);

    if let Some(week) = args.week {
        store.set_current_week_index(week.saturating_sub(1));
    }

    if args.interactive {
        filter::courses(&mut store)?;
        filter::conflicts(&mut store)?;
    }

    if let Some(mut filename) = args.export {
        // Export the calendar
        ics::export(&store, &mut filename)?;
        println!("Calendar exported => {filename}");
    } else if args.json {
        println!("{}", serde_json::to_string_pretty(&store.snapshot())?);
    } else {
        // Show the calendar
        timetable::display(&store, args.cell_length);
    }

    Ok(())
}

fn parse_date(input: &str) -> Result<NaiveDate, Error> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|source| Error::InvalidDate {
        input: input.to_owned(),
        source,
    })
}

/// Monday of the current week
fn this_monday() -> NaiveDate {
    let today = Local::now().date_naive();
    let back = Days::new(u64::from(today.weekday().num_days_from_monday()));
    today.checked_sub_days(back).unwrap_or(today)
}
