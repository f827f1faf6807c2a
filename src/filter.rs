use dialoguer::{MultiSelect, Select};

use crate::error::Error;
use crate::store::CourseStore;
use crate::timetable::models::Course;
use crate::utils::describe;

const DISCLAIMER: &str = "(select with SPACE, confirm with ENTER)";

/// Every title once, in list order
pub fn titles(store: &CourseStore) -> Vec<String> {
    let mut titles: Vec<String> = vec![];
    for course in store.course_list() {
        if !titles.contains(&course.title) {
            titles.push(course.title.clone());
        }
    }

    titles
}

/// Courses of the current week sharing a day and starting slot, top course first
pub fn conflict_groups(store: &CourseStore) -> Vec<Vec<Course>> {
    let mut groups: Vec<Vec<Course>> = vec![];
    for course in store.week_course_list() {
        if groups
            .iter()
            .any(|group| group[0].weekday == course.weekday && group[0].start == course.start)
        {
            continue;
        }

        let conflicts = store.conflict_courses(course);
        if conflicts.len() > 1 {
            groups.push(conflicts.into_iter().cloned().collect());
        }
    }

    groups
}

/// Exclude some courses
pub fn courses(store: &mut CourseStore) -> Result<(), Error> {
    let multiselected = titles(store);
    if multiselected.is_empty() {
        return Ok(());
    }

    let defaults = vec![true; multiselected.len()];
    let selections = MultiSelect::new()
        .with_prompt(format!("Choose your courses {DISCLAIMER}"))
        .items(&multiselected)
        .defaults(&defaults)
        .interact()?;

    // Remove courses not followed
    for (i, title) in multiselected.iter().enumerate() {
        if !selections.contains(&i) {
            store.delete_course_item_by_title(title);
        }
    }

    Ok(())
}

/// Pick which course shows up when several start at the same time
pub fn conflicts(store: &mut CourseStore) -> Result<(), Error> {
    for group in conflict_groups(store) {
        let items: Vec<String> = group.iter().map(describe).collect();
        let selection = Select::new()
            .with_prompt("Courses overlap, which one goes on top?")
            .items(&items)
            .default(0)
            .interact()?;

        store.set_course_item_top(group[selection].clone());
    }

    Ok(())
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
    fn titles_are_unique_and_ordered() {
        let mut store = CourseStore::default();
        store.set_course_list(vec![
            course("B", 2, 0, &[1]),
            course("A", 1, 0, &[1]),
            course("B", 3, 0, &[1]),
        ]);
        assert_eq!(titles(&store), ["A", "B"]);
    }

    #[test]
    fn groups_only_hold_real_conflicts() {
        let mut store = CourseStore::default();
        store.set_course_list(vec![
            course("A", 1, 0, &[1]),
            course("B", 1, 0, &[1]),
            course("C", 1, 2, &[1]),
            course("D", 2, 4, &[1]),
            course("E", 2, 4, &[2]),
        ]);
        let groups = conflict_groups(&store);
        assert_eq!(groups.len(), 1);
        let names: Vec<&str> = groups[0].iter().map(|c| c.title.as_str()).collect();
        assert_eq!(names, ["A", "B"]);
    }
}
