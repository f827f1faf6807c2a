use crate::store::CourseStore;
use crate::utils::{
    self, etc_str,
    models::{Position, TabChar},
};

pub mod models;

use models::{Course, DAYS_PER_WEEK, SLOT_COUNT, TIME_SLOTS, WEEKDAY_NAMES};

// Cell length for hours, "08:30-09:15"
const HOUR_WIDTH: usize = 11;

#[derive(Clone, Debug, PartialEq)]
enum Cell {
    Empty,
    /// First slot of a course, with the amount of other courses starting there
    Start(String, usize),
    /// Following slots of a course
    Continue(String),
}

/// Column of the course's day, if it is a real day
fn day_index(course: &Course) -> Option<usize> {
    usize::from(course.weekday)
        .checked_sub(1)
        .filter(|&day| day < DAYS_PER_WEEK)
}

/// Lay the courses of the current week on a slot × day grid
fn cells(store: &CourseStore) -> Vec<[Cell; DAYS_PER_WEEK]> {
    let mut grid: Vec<[Cell; DAYS_PER_WEEK]> = (0..SLOT_COUNT)
        .map(|_| std::array::from_fn(|_| Cell::Empty))
        .collect();
    let courses = store.week_course_list();

    // Running courses first, a course start always wins over them
    for course in &courses {
        let Some(day) = day_index(course) else {
            continue;
        };
        let rows = grid
            .iter_mut()
            .enumerate()
            .skip(course.start + 1)
            .take(course.duration.saturating_sub(1));
        for (i, row) in rows {
            if row[day] == Cell::Empty {
                // The room goes under the title
                let text = if i == course.start + 1 {
                    course.location.clone()
                } else {
                    String::new()
                };
                row[day] = Cell::Continue(text);
            }
        }
    }

    for course in &courses {
        let (Some(day), Some(row)) = (day_index(course), grid.get_mut(course.start)) else {
            continue;
        };
        // The first course of the list is the one on top
        if !matches!(row[day], Cell::Start(..)) {
            let others = store.conflict_courses(course).len().saturating_sub(1);
            row[day] = Cell::Start(course.title.clone(), others);
        }
    }

    grid
}

/// Draw the current week as a table
pub fn render(store: &CourseStore, cell_length: usize) -> String {
    let sep = TabChar::Bv.val();
    let grid = cells(store);
    let mut lines = vec![];

    // Top of the tab
    let closed = [false; DAYS_PER_WEEK];
    lines.push(utils::line_table(
        HOUR_WIDTH,
        cell_length,
        &closed,
        Position::Top,
    ));

    // Week number then the days of the week
    let mut header = format!(
        "{sep}{:^HOUR_WIDTH$}{sep}",
        format!(
            "W{}/{}",
            store.current_week_index().saturating_add(1),
            store.week_num()
        )
    );
    for (name, day) in WEEKDAY_NAMES.iter().zip(store.current_week_day_array()) {
        header.push_str(&format!("{:^cell_length$}{sep}", format!("{name} {day}")));
    }
    lines.push(header);

    for (i, row) in grid.iter().enumerate() {
        // Keep the cells of a running course open
        let open = row.each_ref().map(|cell| matches!(cell, Cell::Continue(_)));
        lines.push(utils::line_table(
            HOUR_WIDTH,
            cell_length,
            &open,
            Position::Middle,
        ));

        let mut line = format!("{sep}{:^HOUR_WIDTH$}", TIME_SLOTS[i].to_string());
        for cell in row {
            let text = match cell {
                Cell::Empty => String::new(),
                Cell::Start(title, 0) => etc_str(title, cell_length),
                Cell::Start(title, others) => {
                    let suffix = format!(" (+{others})");
                    let room = cell_length.saturating_sub(suffix.chars().count());
                    format!("{}{suffix}", etc_str(title, room))
                }
                Cell::Continue(text) => etc_str(text, cell_length),
            };
            line.push_str(&format!("{sep}{text:^cell_length$}"));
        }
        line.push(sep);
        lines.push(line);
    }

    // Bottom of the table
    lines.push(utils::line_table(
        HOUR_WIDTH,
        cell_length,
        &closed,
        Position::Bottom,
    ));

    lines.join("\n")
}

/// Display the current week
pub fn display(store: &CourseStore, cell_length: usize) {
    println!("{}", render(store, cell_length));
}
