use std::collections::HashMap;

use crate::timetable::models::Course;

/// Color given to a title with no assignment
pub const FALLBACK_COLOR: &str = "#FFFFFF";

/// Selectable palettes, one color per distinct title
pub const PALETTES: [&[&str]; 2] = [
    &[
        "#FFDC72", "#CE7CF4", "#FF7171", "#66CC99", "#FF9966", "#66CCCC", "#6699CC", "#99CC99",
        "#669966", "#66CCFF", "#99CC66", "#FF9999", "#81CC74",
    ],
    &[
        "#99CCFF", "#FFCC99", "#CCCCFF", "#99CCCC", "#A1D699", "#7397db", "#ff9983", "#87D7EB",
        "#99CC99",
    ],
];

/// Palette at `index`, wrapping past the last one
pub fn palette(index: usize) -> &'static [&'static str] {
    if index >= PALETTES.len() {
        tracing::warn!(index, available = PALETTES.len(), "palette index wraps");
    }
    PALETTES[index % PALETTES.len()]
}

/// Title to color assignment, rebuilt from scratch on every change
#[derive(Clone, Debug, Default)]
pub struct ColorMap {
    colors: HashMap<String, &'static str>,
}

impl ColorMap {
    /// Give every distinct title the next palette color, in list order
    pub fn reset(&mut self, courses: &[Course], palette: &[&'static str]) {
        self.colors.clear();
        if palette.is_empty() {
            return;
        }
        for course in courses {
            let next = palette[self.colors.len() % palette.len()];
            self.colors.entry(course.title.clone()).or_insert(next);
        }
    }

    pub fn get(&self, title: &str) -> Option<&'static str> {
        self.colors.get(title).copied()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(title: &str) -> Course {
        Course {
            title: title.to_owned(),
            location: String::new(),
            weekday: 1,
            weeks: vec![1],
            start: 0,
            duration: 1,
        }
    }

    #[test]
    fn first_seen_title_gets_first_color() {
        let mut map = ColorMap::default();
        let courses = [course("B"), course("A"), course("B"), course("C")];
        map.reset(&courses, PALETTES[0]);
        assert_eq!(map.get("B"), Some(PALETTES[0][0]));
        assert_eq!(map.get("A"), Some(PALETTES[0][1]));
        assert_eq!(map.get("C"), Some(PALETTES[0][2]));
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn colors_cycle_past_palette_length() {
        let mut map = ColorMap::default();
        let palette: &[&str] = &["red", "blue"];
        let courses = [course("A"), course("B"), course("C")];
        map.reset(&courses, palette);
        assert_eq!(map.get("C"), Some("red"));
    }

    #[test]
    fn reset_forgets_previous_titles() {
        let mut map = ColorMap::default();
        map.reset(&[course("A")], PALETTES[0]);
        map.reset(&[course("B")], PALETTES[1]);
        assert_eq!(map.get("A"), None);
        assert_eq!(map.get("B"), Some(PALETTES[1][0]));
    }

    #[test]
    fn palette_wraps() {
        assert_eq!(palette(PALETTES.len()), PALETTES[0]);
        assert_eq!(palette(1), PALETTES[1]);
    }
}
