//! The in-memory schedule of one user.
//!
//! [`CourseStore`] owns the course list, the week the user is looking at and the start
//! of the term. Every view of the current week is derived from those on read. Conflict
//! sets are memoized in a [`ConflictIndex`] and colors in a [`ColorMap`]; both are
//! owned by the store and keyed by title, day and starting slot.
//!
//! Mutations take `&mut self`: sharing a store between threads needs an outer lock.

use chrono::{Datelike, Days, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use serde::Serialize;

use crate::config::StoreConfig;
use crate::timetable::models::{Course, DAYS_PER_WEEK, SLOT_GROUPS};

pub mod color;
pub mod conflict;

pub use color::ColorMap;
pub use conflict::ConflictIndex;

/// 0-based position of a 1-based week
fn week_slot(week: u32) -> Option<usize> {
    usize::try_from(week).ok()?.checked_sub(1)
}

/// Course starts per week, day and paired-slot group
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OccupancyGrid {
    cells: Vec<[[u32; SLOT_GROUPS]; DAYS_PER_WEEK]>,
}

impl OccupancyGrid {
    fn new(week_num: u32) -> Self {
        Self {
            cells: vec![
                [[0; SLOT_GROUPS]; DAYS_PER_WEEK];
                usize::try_from(week_num).unwrap_or_default()
            ],
        }
    }

    /// Cells outside the grid are ignored
    fn bump(&mut self, week: u32, weekday: u8, group: usize) {
        let cell = week_slot(week)
            .and_then(|w| self.cells.get_mut(w))
            .and_then(|days| days.get_mut(usize::from(weekday).checked_sub(1)?))
            .and_then(|groups| groups.get_mut(group));
        if let Some(cell) = cell {
            *cell += 1;
        }
    }

    /// Count for a 1-based week and weekday, zero outside the grid
    pub fn get(&self, week: u32, weekday: u8, group: usize) -> u32 {
        self.week(week)
            .and_then(|days| days.get(usize::from(weekday).checked_sub(1)?))
            .and_then(|groups| groups.get(group))
            .copied()
            .unwrap_or(0)
    }

    /// Every day of a 1-based week
    pub fn week(&self, week: u32) -> Option<&[[u32; SLOT_GROUPS]; DAYS_PER_WEEK]> {
        self.cells.get(week_slot(week)?)
    }

    pub fn weeks(&self) -> usize {
        self.cells.len()
    }
}

/// A visible course with its derived attributes
#[derive(Debug, Serialize)]
pub struct CourseView<'a> {
    #[serde(flatten)]
    pub course: &'a Course,
    pub color: &'static str,
    /// Amount of courses starting at the same day and slot, itself included
    pub conflicts: usize,
}

/// Plain data of the current week, for renderers
#[derive(Debug, Serialize)]
pub struct WeekSnapshot<'a> {
    /// 1-based
    pub week: u32,
    pub week_num: u32,
    pub is_started: bool,
    pub month: u32,
    pub days: [u32; DAYS_PER_WEEK],
    pub courses: Vec<CourseView<'a>>,
}

#[derive(Clone, Debug)]
pub struct CourseStore {
    start_date: NaiveDate,
    is_started: bool,
    week_num: u32,
    original_week_index: u32,
    current_week_index: u32,
    /// Today's weekday, 0 for Monday
    today_weekday_index: u32,
    current_month: u32,
    color_array_index: usize,
    /// Sorted by `(weekday, start)` when replaced, reordered by [`Self::set_course_item_top`]
    course_list: Vec<Course>,
    conflicts: ConflictIndex,
    colors: ColorMap,
}

impl CourseStore {
    /// Empty store whose term starts today
    pub fn new(config: StoreConfig) -> Self {
        let now = Local::now().naive_local();
        let mut store = Self {
            start_date: now.date(),
            is_started: false,
            week_num: config.week_num(),
            original_week_index: 0,
            current_week_index: 0,
            today_weekday_index: now.weekday().num_days_from_monday(),
            current_month: now.month(),
            color_array_index: config.color_array_index(),
            course_list: vec![],
            conflicts: ConflictIndex::default(),
            colors: ColorMap::default(),
        };
        store.set_current_week_index(0);

        store
    }

    /// Set the first day of the term and jump to the week containing today
    pub fn set_start_day(&mut self, date: NaiveDate) {
        self.set_start_day_at(date, Local::now().naive_local());
    }

    /// Set the first day of the term, `now` being the current wall-clock time
    pub fn set_start_day_at(&mut self, date: NaiveDate, now: NaiveDateTime) {
        self.start_date = date;
        let elapsed = now - date.and_time(NaiveTime::MIN);
        self.is_started = elapsed > TimeDelta::zero();
        self.original_week_index = u32::try_from(elapsed.num_weeks().max(0)).unwrap_or(u32::MAX);
        self.today_weekday_index = now.weekday().num_days_from_monday();
        tracing::debug!(
            %date,
            started = self.is_started,
            week_index = self.original_week_index,
            "term start set"
        );

        self.set_current_week_index(self.original_week_index);
    }

    /// Look at another week, 0-based; no bound check
    pub fn set_current_week_index(&mut self, index: u32) {
        self.conflicts.clear();
        self.current_week_index = index;
        self.current_month = self.week_start(index).map_or(0, |date| date.month());
        tracing::debug!(index, month = self.current_month, "current week changed");
    }

    /// Replace every course, sorted by day then starting slot
    pub fn set_course_list(&mut self, mut courses: Vec<Course>) {
        self.conflicts.clear();
        courses.sort_by_key(|course| (course.weekday, course.start));
        self.course_list = courses;
        tracing::debug!(count = self.course_list.len(), "course list replaced");

        self.reset_course_colors();
    }

    /// Switch palette, every color is assigned again
    pub fn set_color_array_index(&mut self, index: usize) {
        self.color_array_index = index;
        tracing::debug!(index, "palette changed");

        self.reset_course_colors();
    }

    /// Courses meeting during the current week
    pub fn week_course_list(&self) -> Vec<&Course> {
        let week = self.current_week();
        self.course_list
            .iter()
            .filter(|course| course.meets_in(week))
            .collect()
    }

    /// Course starts of every week, by day and paired-slot group.
    ///
    /// A course taking more than two slots also counts in the following group.
    pub fn parsed_course_list(&self) -> OccupancyGrid {
        let mut grid = OccupancyGrid::new(self.week_num);
        for course in &self.course_list {
            let group = course.start / 2;
            for &week in &course.weeks {
                grid.bump(week, course.weekday, group);
                if course.duration > 2 {
                    grid.bump(week, course.weekday, group + 1);
                }
            }
        }

        grid
    }

    /// Day of the month of every day of the current week, zero past the calendar
    pub fn current_week_day_array(&self) -> [u32; DAYS_PER_WEEK] {
        let Some(first) = self.week_start(self.current_week_index) else {
            return [0; DAYS_PER_WEEK];
        };

        std::array::from_fn(|i| {
            u64::try_from(i)
                .ok()
                .and_then(|i| first.checked_add_days(Days::new(i)))
                .map_or(0, |date| date.day())
        })
    }

    /// Courses of the current week starting at the same day and slot as `course`
    pub fn conflict_courses(&self, course: &Course) -> Vec<&Course> {
        conflict::find(&self.course_list, self.current_week(), course)
    }

    /// Same as [`Self::conflict_courses`], memoized until the next mutation
    pub fn conflict_courses_cached(&mut self, course: &Course) -> &[Course] {
        let week = self.current_week();
        let courses = &self.course_list;
        self.conflicts.get_or_insert_with(course.key(), || {
            conflict::find(courses, week, course)
                .into_iter()
                .cloned()
                .collect()
        })
    }

    /// Move `course` in front of the list, replacing its other occurrences
    pub fn set_course_item_top(&mut self, course: Course) {
        self.delete_course_item(&course);
        tracing::debug!(title = %course.title, "course raised");
        self.course_list.insert(0, course);
    }

    /// Remove every course with the same title, day and starting slot
    pub fn delete_course_item(&mut self, course: &Course) {
        self.conflicts.clear();
        let before = self.course_list.len();
        self.course_list
            .retain(|item| !item.same_slot_occupant(course));
        tracing::debug!(
            title = %course.title,
            removed = before - self.course_list.len(),
            "course deleted"
        );
    }

    /// Remove every course with this title
    pub fn delete_course_item_by_title(&mut self, title: &str) {
        self.conflicts.clear();
        let before = self.course_list.len();
        self.course_list.retain(|item| item.title != title);
        tracing::debug!(
            title,
            removed = before - self.course_list.len(),
            "courses deleted"
        );
    }

    /// Assign colors again, first seen title first
    pub fn reset_course_colors(&mut self) {
        self.colors
            .reset(&self.course_list, color::palette(self.color_array_index));
    }

    pub fn course_color(&self, course: &Course) -> &'static str {
        self.colors
            .get(&course.title)
            .unwrap_or(color::FALLBACK_COLOR)
    }

    /// Everything a renderer needs about the current week
    pub fn snapshot(&self) -> WeekSnapshot<'_> {
        let courses = self
            .week_course_list()
            .into_iter()
            .map(|course| CourseView {
                course,
                color: self.course_color(course),
                conflicts: self.conflict_courses(course).len(),
            })
            .collect();

        WeekSnapshot {
            week: self.current_week(),
            week_num: self.week_num,
            is_started: self.is_started,
            month: self.current_month,
            days: self.current_week_day_array(),
            courses,
        }
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn is_started(&self) -> bool {
        self.is_started
    }

    pub fn week_num(&self) -> u32 {
        self.week_num
    }

    pub fn original_week_index(&self) -> u32 {
        self.original_week_index
    }

    pub fn current_week_index(&self) -> u32 {
        self.current_week_index
    }

    pub fn today_weekday_index(&self) -> u32 {
        self.today_weekday_index
    }

    /// Calendar month of the first day of the current week, zero past the calendar
    pub fn current_month(&self) -> u32 {
        self.current_month
    }

    pub fn color_array_index(&self) -> usize {
        self.color_array_index
    }

    pub fn course_list(&self) -> &[Course] {
        &self.course_list
    }

    /// 1-based number of the current week
    fn current_week(&self) -> u32 {
        self.current_week_index.saturating_add(1)
    }

    fn week_start(&self, index: u32) -> Option<NaiveDate> {
        self.start_date
            .checked_add_days(Days::new(u64::from(index) * 7))
    }
}

impl Default for CourseStore {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(title: &str, weekday: u8, start: usize, duration: usize, weeks: &[u32]) -> Course {
        Course {
            title: title.to_owned(),
            location: "B101".to_owned(),
            weekday,
            weeks: weeks.to_vec(),
            start,
            duration,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn noon(y: i32, m: u32, d: u32) -> NaiveDateTime {
        date(y, m, d).and_hms_opt(12, 0, 0).unwrap()
    }

    #[test]
    fn start_day_before_term() {
        let mut store = CourseStore::default();
        store.set_start_day_at(date(2024, 2, 26), noon(2024, 2, 20));
        assert!(!store.is_started());
        assert_eq!(store.original_week_index(), 0);
        assert_eq!(store.current_week_index(), 0);
        assert_eq!(store.current_month(), 2);
    }

    #[test]
    fn start_day_counts_whole_weeks() {
        let mut store = CourseStore::default();
        // Wednesday of the third week
        store.set_start_day_at(date(2024, 2, 26), noon(2024, 3, 13));
        assert!(store.is_started());
        assert_eq!(store.original_week_index(), 2);
        assert_eq!(store.current_week_index(), 2);
        assert_eq!(store.today_weekday_index(), 2);
        assert_eq!(store.current_month(), 3);
    }

    #[test]
    fn start_day_itself_is_started_after_midnight() {
        let mut store = CourseStore::default();
        store.set_start_day_at(date(2024, 2, 26), noon(2024, 2, 26));
        assert!(store.is_started());
        assert_eq!(store.original_week_index(), 0);
        assert_eq!(store.today_weekday_index(), 0);
    }

    #[test]
    fn week_index_clears_conflict_cache() {
        let mut store = CourseStore::default();
        let a = course("A", 1, 0, 2, &[1]);
        store.set_course_list(vec![a.clone()]);
        assert_eq!(store.conflict_courses_cached(&a).len(), 1);
        store.set_current_week_index(1);
        assert!(store.conflicts.is_empty());
        assert!(store.conflict_courses_cached(&a).is_empty());
    }

    #[test]
    fn grid_skips_out_of_range_entries() {
        let mut store = CourseStore::new(StoreConfig::new().with_week_num(2));
        store.set_course_list(vec![
            course("A", 1, 0, 1, &[1, 3]),
            course("B", 9, 0, 1, &[1]),
            course("C", 7, 12, 3, &[2]),
        ]);
        let grid = store.parsed_course_list();
        assert_eq!(grid.weeks(), 2);
        assert_eq!(grid.get(1, 1, 0), 1);
        assert_eq!(grid.get(2, 7, 6), 1);
        assert_eq!(grid.get(3, 1, 0), 0);
        assert_eq!(grid.get(0, 1, 0), 0);
        assert!(grid.week(0).is_none());
    }

    #[test]
    fn grid_has_one_entry_per_week() {
        let store = CourseStore::new(StoreConfig::new().with_week_num(0));
        assert_eq!(store.parsed_course_list().weeks(), 0);

        let store = CourseStore::new(StoreConfig::new().with_week_num(20));
        let grid = store.parsed_course_list();
        assert_eq!(grid.weeks(), 20);
        assert!(grid.week(20).is_some());
        assert!(grid.week(21).is_none());
    }

    #[test]
    fn day_array_degrades_past_calendar() {
        let mut store = CourseStore::default();
        store.set_start_day_at(date(2024, 2, 26), noon(2024, 2, 26));
        store.set_current_week_index(u32::MAX);
        assert_eq!(store.current_week_day_array(), [0; DAYS_PER_WEEK]);
        assert_eq!(store.current_month(), 0);
        assert!(store.week_course_list().is_empty());
    }

    #[test]
    fn palette_change_recolors() {
        let mut store = CourseStore::default();
        let a = course("A", 1, 0, 2, &[1]);
        store.set_course_list(vec![a.clone()]);
        assert_eq!(store.course_color(&a), color::PALETTES[0][0]);
        store.set_color_array_index(1);
        assert_eq!(store.course_color(&a), color::PALETTES[1][0]);
        assert_eq!(
            store.course_color(&course("Unknown", 1, 0, 1, &[1])),
            color::FALLBACK_COLOR
        );
    }

    #[test]
    fn snapshot_lists_visible_courses() {
        let mut store = CourseStore::default();
        store.set_start_day_at(date(2024, 2, 26), noon(2024, 2, 27));
        store.set_course_list(vec![
            course("A", 1, 0, 2, &[1, 2]),
            course("B", 1, 0, 1, &[1]),
            course("C", 3, 4, 2, &[2]),
        ]);
        let snapshot = store.snapshot();
        assert_eq!(snapshot.week, 1);
        assert_eq!(snapshot.days, [26, 27, 28, 29, 1, 2, 3]);
        assert_eq!(snapshot.courses.len(), 2);
        assert!(snapshot.courses.iter().all(|view| view.conflicts == 2));

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["courses"][0]["title"], "A");
        assert_eq!(json["courses"][0]["color"], color::PALETTES[0][0]);
    }
}
