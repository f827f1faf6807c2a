//! Terminal table and calendar export of a small term.

use chrono::{NaiveDate, NaiveDateTime};
use coursetable::{ics, timetable, Course, CourseStore, StoreConfig};

fn course(
    title: &str,
    location: &str,
    weekday: u8,
    start: usize,
    duration: usize,
    weeks: &[u32],
) -> Course {
    Course {
        title: title.to_owned(),
        location: location.to_owned(),
        weekday,
        weeks: weeks.to_vec(),
        start,
        duration,
    }
}

fn store() -> CourseStore {
    let mut store = CourseStore::new(StoreConfig::new().with_week_num(4));
    let start = NaiveDate::from_ymd_opt(2024, 2, 26).unwrap();
    store.set_start_day_at(start, start.and_hms_opt(10, 0, 0).unwrap());
    store.set_course_list(vec![
        course("Algebra", "A101", 1, 0, 2, &[1, 2]),
        course("Physics", "B202", 1, 0, 1, &[1]),
        course("History", "", 3, 4, 3, &[2, 5]),
    ]);
    store
}

fn dt(month: u32, day: u32, h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, month, day)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
}

#[test]
fn table_shows_week_and_conflicts() {
    let store = store();
    let table = timetable::render(&store, 16);
    let lines: Vec<&str> = table.lines().collect();

    // Top, header, then a separator and a row per slot, then the bottom
    assert_eq!(lines.len(), 2 + 2 * 13 + 1);
    assert!(lines[0].starts_with('┌'));
    assert!(lines[1].contains("W1/4"));
    assert!(lines[1].contains("Mon 26"));
    assert!(lines[1].contains("Fri 1"));
    assert!(lines[3].starts_with("│08:30-09:15│"));
    assert!(lines[3].contains("Algebra (+1)"));
    // The room goes under the title, no line in between
    assert!(lines[5].contains("A101"));
    let open = format!("├{}┼{}┼", "─".repeat(11), " ".repeat(16));
    assert!(lines[4].starts_with(&open));
    assert!(lines.last().unwrap().starts_with('└'));
}

#[test]
fn table_of_empty_week() {
    let mut store = store();
    store.set_current_week_index(3);
    let table = timetable::render(&store, 12);
    assert!(!table.contains("Algebra"));
    assert!(!table.contains("History"));
}

#[test]
fn every_meeting_is_dated() {
    let store = store();
    let events = ics::build(&store).unwrap();

    // Week 5 of History is past the 4 weeks term
    assert_eq!(events.len(), 4);
    assert_eq!(events[0].dtstart, dt(2, 26, 8, 30));
    assert_eq!(events[0].dtend, dt(2, 26, 10, 5));
    let history = events
        .iter()
        .find(|e| e.course.title == "History")
        .unwrap();
    // Wednesday of the second week
    assert_eq!(history.dtstart, dt(3, 6, 12, 10));
    assert_eq!(history.dtend, dt(3, 6, 14, 45));
    assert_eq!(history.week, 2);
}

#[test]
fn course_past_the_day_can_not_be_exported() {
    let mut store = store();
    store.set_course_list(vec![course("Late", "", 2, 12, 2, &[1])]);
    assert!(ics::build(&store).is_err());
}

#[test]
fn calendar_file_is_written() {
    let store = store();
    let mut filename = std::env::temp_dir()
        .join(format!("coursetable-{}", std::process::id()))
        .to_string_lossy()
        .into_owned();
    ics::export(&store, &mut filename).unwrap();
    assert!(filename.ends_with(".ics"));

    let content = std::fs::read_to_string(&filename).unwrap();
    std::fs::remove_file(&filename).unwrap();
    assert!(content.starts_with("BEGIN:VCALENDAR"));
    assert_eq!(content.matches("BEGIN:VEVENT").count(), 4);
    assert!(content.contains("SUMMARY:Algebra"));
    assert!(content.contains("DTSTART:20240226T083000"));
}
