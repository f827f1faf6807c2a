use std::path::Path;

use chrono::{Days, NaiveDateTime, NaiveTime, Utc};
use ::ics::{
    escape_text,
    properties::{Categories, DtEnd, DtStart, Location, Summary},
    Event, ICalendar,
};

use crate::error::Error;
use crate::store::CourseStore;
use crate::timetable::models::{Course, TIME_SLOTS};

/// One meeting of a course on the calendar
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatedCourse<'a> {
    pub course: &'a Course,
    /// 1-based academic week
    pub week: u32,
    pub dtstart: NaiveDateTime,
    pub dtend: NaiveDateTime,
}

fn clock(course: &Course, (hour, minute): (u32, u32)) -> Result<NaiveTime, Error> {
    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| Error::Export {
        title: course.title.clone(),
        reason: format!("invalid clock time {hour:02}:{minute:02}"),
    })
}

/// Date every meeting of every course of the term
pub fn build(store: &CourseStore) -> Result<Vec<DatedCourse<'_>>, Error> {
    let mut semester = vec![];

    for course in store.course_list() {
        let (Some(first), Some(last)) = (TIME_SLOTS.get(course.start), TIME_SLOTS.get(course.end()))
        else {
            return Err(Error::Export {
                title: course.title.clone(),
                reason: format!("slots {}..={} are not in the day", course.start, course.end()),
            });
        };
        let start = clock(course, first.start)?;
        let end = clock(course, last.end)?;

        for &week in &course.weeks {
            // Weeks of the record past the term are not on the calendar
            if week == 0 || week > store.week_num() {
                continue;
            }
            let offset = u64::from(week - 1) * 7 + u64::from(course.weekday.saturating_sub(1));
            let date = store
                .start_date()
                .checked_add_days(Days::new(offset))
                .ok_or_else(|| Error::Export {
                    title: course.title.clone(),
                    reason: format!("week {week} is past the calendar"),
                })?;

            semester.push(DatedCourse {
                course,
                week,
                dtstart: date.and_time(start),
                dtend: date.and_time(end),
            });
        }
    }
    semester.sort_by_key(|dated| dated.dtstart);
    tracing::debug!(count = semester.len(), "events built");

    Ok(semester)
}

/// Turn the dated courses into an iCalendar
pub fn calendar<'a>(courses: &'a [DatedCourse<'a>]) -> ICalendar<'a> {
    let mut calendar = ICalendar::new("2.0", "-//coursetable//timetable//EN");
    let dtstamp = Utc::now().format("%Y%m%dT%H%M%SZ").to_string();

    for dated in courses {
        let mut event = Event::new(uuid::Uuid::new_v4().to_string(), dtstamp.clone());

        // Floating time, the calendar shows it in the local timezone
        event.push(DtStart::new(dated.dtstart.format("%Y%m%dT%H%M%S").to_string()));
        event.push(DtEnd::new(dated.dtend.format("%Y%m%dT%H%M%S").to_string()));

        event.push(Summary::new(escape_text(dated.course.title.as_str())));
        if !dated.course.location.is_empty() {
            event.push(Location::new(escape_text(dated.course.location.as_str())));
        }
        event.push(Categories::new(format!("Week {}", dated.week)));

        calendar.add_event(event);
    }

    calendar
}

/// Export the term to an .ics file, adding the extension if missing
pub fn export(store: &CourseStore, filename: &mut String) -> Result<(), Error> {
    let courses = build(store)?;

    if !Path::new(filename.as_str())
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("ics"))
    {
        filename.push_str(".ics");
    }

    calendar(&courses).save_file(filename.as_str())?;
    tracing::info!(events = courses.len(), file = %filename, "calendar exported");

    Ok(())
}
