//! Weekly class timetable.
//!
//! Raw course records are parsed into [`Course`]s by the [`parser`], then held by a
//! [`CourseStore`] which tracks the week being looked at and derives every view of it:
//! courses of the week, occupancy grid, day numbers, conflicts and colors.
//!
//! ```
//! use coursetable::{CourseParser, CourseStore, RawCourse};
//!
//! let raw = RawCourse {
//!     title: "Algebra".to_owned(),
//!     location: "B101".to_owned(),
//!     weekday: "1".to_owned(),
//!     slots: "0-1".to_owned(),
//!     weeks: "1-8,10".to_owned(),
//! };
//! let courses = CourseParser::default().parse_all(&[raw]).unwrap();
//!
//! let mut store = CourseStore::default();
//! store.set_course_list(courses);
//! assert_eq!(store.week_course_list().len(), 1);
//! ```

pub mod config;
pub mod error;
pub mod filter;
pub mod ics;
pub mod logging;
pub mod parser;
pub mod store;
pub mod timetable;
pub mod utils;

pub use config::StoreConfig;
pub use error::{ConfigError, Error, ParseError};
pub use parser::{CourseParser, RawCourse};
pub use store::{CourseStore, OccupancyGrid, WeekSnapshot};
pub use timetable::models::{Course, CourseKey, TimeSlot, TIME_SLOTS};
