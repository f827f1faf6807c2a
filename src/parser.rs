//! Conversion of raw course records into [`Course`]s.
//!
//! A raw record carries three codes:
//! - the weekday, `1` (Monday) to `7` (Sunday);
//! - the slot range, `start-end`, inclusive, optionally followed by `节`;
//! - the week-spec, comma-separated tokens `n` or `a-b`, each optionally followed by
//!   `周` and by an odd/even qualifier `(单)` / `(双)`.
//!
//! Anything outside this grammar is rejected.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::error::{Error, ParseError};
use crate::timetable::models::{Course, DEFAULT_WEEK_NUM, SLOT_COUNT};

static SLOT_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<start>\d+)-(?P<end>\d+)节?$").expect("slot range pattern is valid")
});

static WEEK_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<start>\d+)(?:-(?P<end>\d+))?周?(?:[(（](?P<parity>[单双])[)）])?$")
        .expect("week token pattern is valid")
});

/// A course record as provided by the timetable source
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct RawCourse {
    #[serde(alias = "kcmc")]
    pub title: String,
    #[serde(alias = "cdmc", default)]
    pub location: String,
    /// Weekday code
    #[serde(alias = "xqj")]
    pub weekday: String,
    /// Slot range code
    #[serde(alias = "jc")]
    pub slots: String,
    /// Week-spec code
    #[serde(alias = "zcd")]
    pub weeks: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDocument {
    Wrapped {
        #[serde(rename = "kbList")]
        kb_list: Vec<RawCourse>,
    },
    List(Vec<RawCourse>),
}

/// Read raw records from JSON, either `{"kbList": [...]}` or a bare array
pub fn from_json(json: &str) -> Result<Vec<RawCourse>, Error> {
    let document: RawDocument = serde_json::from_str(json)?;
    let records = match document {
        RawDocument::Wrapped { kb_list } => kb_list,
        RawDocument::List(list) => list,
    };
    tracing::debug!(count = records.len(), "raw records read");

    Ok(records)
}

/// Turns raw records into courses for a term of `week_num` weeks
#[derive(Clone, Copy, Debug)]
pub struct CourseParser {
    week_num: u32,
}

impl CourseParser {
    pub fn new(week_num: u32) -> Self {
        Self { week_num }
    }

    pub fn week_num(&self) -> u32 {
        self.week_num
    }

    /// Parse one record
    pub fn parse(&self, raw: &RawCourse) -> Result<Course, ParseError> {
        let weekday = parse_weekday(&raw.weekday)?;
        let (start, duration) = parse_slot_range(&raw.slots)?;
        let weeks = parse_weeks(&raw.weeks, self.week_num)?;

        Ok(Course {
            title: raw.title.clone(),
            location: raw.location.clone(),
            weekday,
            weeks,
            start,
            duration,
        })
    }

    /// Parse a whole batch, the first malformed record aborts it
    pub fn parse_all(&self, raws: &[RawCourse]) -> Result<Vec<Course>, Error> {
        let courses = raws
            .iter()
            .enumerate()
            .map(|(index, raw)| {
                self.parse(raw).map_err(|source| Error::Record {
                    index,
                    title: raw.title.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(count = courses.len(), "courses parsed");

        Ok(courses)
    }
}

impl Default for CourseParser {
    fn default() -> Self {
        Self::new(DEFAULT_WEEK_NUM)
    }
}

/// Read a weekday code, 1 for Monday up to 7 for Sunday
pub fn parse_weekday(code: &str) -> Result<u8, ParseError> {
    let invalid = || ParseError::InvalidWeekday {
        code: code.to_owned(),
    };
    let code = code.trim();
    if code.is_empty() || !code.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    match number::<u8>(code)? {
        day @ 1..=7 => Ok(day),
        _ => Err(invalid()),
    }
}

/// Read a slot range, returns `(start, duration)`
pub fn parse_slot_range(code: &str) -> Result<(usize, usize), ParseError> {
    let captures = SLOT_RANGE
        .captures(code.trim())
        .ok_or_else(|| ParseError::InvalidSlotRange {
            code: code.to_owned(),
        })?;

    let start: usize = number(&captures["start"])?;
    let end: usize = number(&captures["end"])?;
    if end < start {
        return Err(ParseError::InvertedRange {
            code: code.to_owned(),
        });
    }
    if end >= SLOT_COUNT {
        return Err(ParseError::SlotOutOfRange {
            end,
            last: SLOT_COUNT - 1,
        });
    }

    Ok((start, end - start + 1))
}

/// Expand a week-spec into every week it names, in order.
///
/// Every week must lie in `1..=week_num`; ranges are checked before they are expanded.
pub fn parse_weeks(code: &str, week_num: u32) -> Result<Vec<u32>, ParseError> {
    let mut weeks = vec![];
    for token in code.split(',').map(str::trim) {
        let captures = WEEK_TOKEN
            .captures(token)
            .ok_or_else(|| ParseError::InvalidWeekToken {
                token: token.to_owned(),
            })?;

        let start: u32 = number(&captures["start"])?;
        let end: u32 = match captures.name("end") {
            Some(end) => number(end.as_str())?,
            None => start,
        };
        if end < start {
            return Err(ParseError::InvertedRange {
                code: token.to_owned(),
            });
        }

        // Remainder kept by the qualifier: odd (单) or even (双) weeks only
        let parity = captures.name("parity").map(|p| match p.as_str() {
            "单" => 1,
            _ => 0,
        });
        let kept = |week: u32| parity.map_or(true, |p| week % 2 == p);

        // First and last week the token keeps
        let first = if kept(start) {
            Some(start)
        } else {
            start.checked_add(1)
        };
        let last = if kept(end) {
            Some(end)
        } else {
            end.checked_sub(1)
        };
        let (Some(first), Some(last)) = (first, last) else {
            continue;
        };
        if first > last {
            continue;
        }

        if first == 0 {
            return Err(ParseError::WeekOutOfRange { week: 0, week_num });
        }
        if last > week_num {
            let over = week_num + 1;
            let week = if first > week_num {
                first
            } else if kept(over) {
                over
            } else {
                over + 1
            };
            return Err(ParseError::WeekOutOfRange { week, week_num });
        }

        let step = if parity.is_some() { 2 } else { 1 };
        weeks.extend((first..=last).step_by(step));
    }

    if weeks.is_empty() {
        return Err(ParseError::EmptyWeeks {
            code: code.to_owned(),
        });
    }

    Ok(weeks)
}

fn number<T: std::str::FromStr>(token: &str) -> Result<T, ParseError> {
    token.parse().map_err(|_| ParseError::InvalidNumber {
        token: token.to_owned(),
    })
}
