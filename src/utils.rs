use crate::timetable::models::{Course, TIME_SLOTS, WEEKDAY_NAMES};

pub mod models;

use models::{Position, TabChar};

/// Horizontal line of the table, `skip` leaves the cells of a running course open
pub fn line_table(hour_width: usize, cell_length: usize, skip: &[bool], position: Position) -> String {
    let (left, joint, right) = position.joints();
    let bar = TabChar::Bh.val().to_string();

    let mut line = String::new();
    line.push(left.val());
    line.push_str(&bar.repeat(hour_width));
    for &open in skip {
        line.push(joint.val());
        if open {
            line.push_str(&" ".repeat(cell_length));
        } else {
            line.push_str(&bar.repeat(cell_length));
        }
    }
    line.push(right.val());

    line
}

/// Cut the text to fit in `width` chars
pub fn etc_str(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_owned();
    }

    let mut short: String = text.chars().take(width.saturating_sub(1)).collect();
    short.push('…');
    short
}

/// Name showed to the users
pub fn describe(course: &Course) -> String {
    let day = usize::from(course.weekday)
        .checked_sub(1)
        .and_then(|i| WEEKDAY_NAMES.get(i))
        .unwrap_or(&"?");
    let hours = match (TIME_SLOTS.get(course.start), TIME_SLOTS.get(course.end())) {
        (Some(first), Some(last)) => format!(
            "{:02}:{:02}-{:02}:{:02}",
            first.start.0, first.start.1, last.end.0, last.end.1
        ),
        _ => format!("slot {}", course.start),
    };

    if course.location.is_empty() {
        format!("{} - {day} {hours}", course.title)
    } else {
        format!("{} - {day} {hours} ({})", course.title, course.location)
    }
}
