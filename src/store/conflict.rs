use std::collections::HashMap;

use crate::timetable::models::{Course, CourseKey};

/// Courses visible in `week` (1-based) that start at the same day and slot as `course`
pub fn find<'a>(courses: &'a [Course], week: u32, course: &Course) -> Vec<&'a Course> {
    courses
        .iter()
        .filter(|item| {
            item.meets_in(week) && item.weekday == course.weekday && item.start == course.start
        })
        .collect()
}

/// Memoized conflict sets, only ever cleared as a whole
#[derive(Clone, Debug, Default)]
pub struct ConflictIndex {
    sets: HashMap<CourseKey, Vec<Course>>,
}

impl ConflictIndex {
    /// Cached set for `key`, computed by `compute` on a miss
    pub fn get_or_insert_with<F>(&mut self, key: CourseKey, compute: F) -> &[Course]
    where
        F: FnOnce() -> Vec<Course>,
    {
        self.sets
            .entry(key)
            .or_insert_with_key(|key| {
                tracing::trace!(
                    title = %key.title,
                    weekday = key.weekday,
                    start = key.start,
                    "conflict cache miss"
                );
                compute()
            })
            .as_slice()
    }

    pub fn clear(&mut self) {
        self.sets.clear();
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(title: &str, weekday: u8, start: usize, weeks: &[u32]) -> Course {
        Course {
            title: title.to_owned(),
            location: String::new(),
            weekday,
            weeks: weeks.to_vec(),
            start,
            duration: 2,
        }
    }

    #[test]
    fn find_matches_day_slot_and_week() {
        let courses = [
            course("A", 1, 0, &[1, 2]),
            course("B", 1, 0, &[1]),
            course("C", 1, 2, &[1]),
            course("D", 2, 0, &[1]),
        ];
        let titles = |week| {
            find(&courses, week, &courses[0])
                .into_iter()
                .map(|c| c.title.as_str())
                .collect::<Vec<_>>()
        };
        assert_eq!(titles(1), ["A", "B"]);
        assert_eq!(titles(2), ["A"]);
        assert!(titles(3).is_empty());
    }

    #[test]
    fn index_computes_once_until_cleared() {
        let mut index = ConflictIndex::default();
        let a = course("A", 1, 0, &[1]);
        let mut calls = 0;
        for _ in 0..3 {
            index.get_or_insert_with(a.key(), || {
                calls += 1;
                vec![a.clone()]
            });
        }
        assert_eq!(calls, 1);
        assert_eq!(index.len(), 1);

        index.clear();
        assert!(index.is_empty());
        let set = index.get_or_insert_with(a.key(), Vec::new);
        assert!(set.is_empty());
    }
}
