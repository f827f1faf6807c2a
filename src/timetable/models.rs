use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of class periods in a day
pub const SLOT_COUNT: usize = 13;

/// Number of paired-slot groups used by the occupancy grid
pub const SLOT_GROUPS: usize = SLOT_COUNT.div_ceil(2);

/// Number of days in a week
pub const DAYS_PER_WEEK: usize = 7;

/// Default amount of weeks in a term
pub const DEFAULT_WEEK_NUM: u32 = 20;

/// Short names of the days, Monday first
pub const WEEKDAY_NAMES: [&str; DAYS_PER_WEEK] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Clock times of every class period, as `(hour, minute)`
pub const TIME_SLOTS: [TimeSlot; SLOT_COUNT] = [
    TimeSlot::new((8, 30), (9, 15)),
    TimeSlot::new((9, 20), (10, 5)),
    TimeSlot::new((10, 25), (11, 15)),
    TimeSlot::new((11, 20), (12, 0)),
    TimeSlot::new((12, 10), (12, 55)),
    TimeSlot::new((13, 0), (13, 45)),
    TimeSlot::new((14, 45), (14, 45)),
    TimeSlot::new((14, 50), (15, 35)),
    TimeSlot::new((15, 45), (16, 30)),
    TimeSlot::new((16, 35), (17, 20)),
    TimeSlot::new((17, 30), (18, 15)),
    TimeSlot::new((18, 30), (19, 15)),
    TimeSlot::new((19, 20), (20, 5)),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeSlot {
    /// Hour and minute when the period starts
    pub start: (u32, u32),
    /// Hour and minute when the period ends
    pub end: (u32, u32),
}

impl TimeSlot {
    const fn new(start: (u32, u32), end: (u32, u32)) -> Self {
        Self { start, end }
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}-{:02}:{:02}",
            self.start.0, self.start.1, self.end.0, self.end.1
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Course's name
    pub title: String,

    /// Room where the course takes place
    pub location: String,

    /// Day of the week, from 1 (Monday) to 7 (Sunday)
    #[serde(rename = "week")]
    pub weekday: u8,

    /// Academic weeks the course meets, 1-based and ascending
    pub weeks: Vec<u32>,

    /// Time the course starts, as an index into [`TIME_SLOTS`] :
    /// - 0 => first possible class of the day
    /// - 1 => second possible class of the day
    /// - etc.
    pub start: usize,

    /// Number of time slots the course takes up in the timetable
    pub duration: usize,
}

impl Course {
    /// Identity used for conflicts, deletion and caching
    pub fn key(&self) -> CourseKey {
        CourseKey {
            title: self.title.clone(),
            weekday: self.weekday,
            start: self.start,
        }
    }

    /// True if `other` occupies the same title, day and starting slot
    pub fn same_slot_occupant(&self, other: &Course) -> bool {
        self.title == other.title && self.weekday == other.weekday && self.start == other.start
    }

    /// True if the course meets during the given 1-based week
    pub fn meets_in(&self, week: u32) -> bool {
        self.weeks.contains(&week)
    }

    /// Index of the last slot the course takes up
    pub fn end(&self) -> usize {
        (self.start + self.duration).saturating_sub(1)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CourseKey {
    pub title: String,
    pub weekday: u8,
    pub start: usize,
}
