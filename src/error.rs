//! Error types for the coursetable crate.

/// Failure to read one field of a raw course record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A numeric token does not fit the expected integer type.
    #[error("invalid number `{token}`")]
    InvalidNumber {
        /// The offending token.
        token: String,
    },

    /// The weekday code is not an integer between 1 and 7.
    #[error("invalid weekday code `{code}`")]
    InvalidWeekday {
        /// The offending code.
        code: String,
    },

    /// The slot code does not match `start-end`.
    #[error("invalid slot range `{code}`")]
    InvalidSlotRange {
        /// The offending code.
        code: String,
    },

    /// A week-spec token does not match `n` or `a-b`.
    #[error("invalid week token `{token}`")]
    InvalidWeekToken {
        /// The offending token.
        token: String,
    },

    /// A range ends before it starts.
    #[error("range `{code}` ends before it starts")]
    InvertedRange {
        /// The offending range.
        code: String,
    },

    /// The last slot of a course is past the end of the day.
    #[error("slot {end} is past the last slot ({last})")]
    SlotOutOfRange {
        /// Last slot taken by the course.
        end: usize,
        /// Last valid slot index.
        last: usize,
    },

    /// A week is outside `[1, week_num]`.
    #[error("week {week} is outside 1..={week_num}")]
    WeekOutOfRange {
        /// The offending week.
        week: u32,
        /// Amount of weeks in the term.
        week_num: u32,
    },

    /// The week-spec expands to no week at all.
    #[error("week spec `{code}` selects no week")]
    EmptyWeeks {
        /// The offending week-spec.
        code: String,
    },
}

/// Invalid store configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The term must have at least one week.
    #[error("week count must be >= 1, got {week_num}")]
    InvalidWeekNum {
        /// The invalid week count.
        week_num: u32,
    },

    /// No palette exists at this index.
    #[error("unknown palette {index}, {available} available")]
    UnknownPalette {
        /// The requested palette.
        index: usize,
        /// Amount of palettes.
        available: usize,
    },
}

/// Error type for every fallible operation of the crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// One record of an import batch could not be parsed; the batch is dropped.
    #[error("record {index} (`{title}`): {source}")]
    Record {
        /// Position of the record in the batch.
        index: usize,
        /// Title of the record.
        title: String,
        /// Underlying parse failure.
        #[source]
        source: ParseError,
    },

    #[error("invalid course data: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    /// A date given by the user could not be read.
    #[error("invalid date `{input}`, expected YYYY-MM-DD")]
    InvalidDate {
        /// The raw input.
        input: String,
        /// Underlying chrono failure.
        #[source]
        source: chrono::ParseError,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A course can not be placed on the calendar.
    #[error("course `{title}` can not be dated: {reason}")]
    Export {
        /// Title of the course.
        title: String,
        /// What went wrong.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_messages() {
        let e = ParseError::InvalidSlotRange {
            code: "3~4".to_owned(),
        };
        assert_eq!(e.to_string(), "invalid slot range `3~4`");

        let e = ParseError::WeekOutOfRange {
            week: 21,
            week_num: 20,
        };
        assert_eq!(e.to_string(), "week 21 is outside 1..=20");
    }

    #[test]
    fn record_error_names_the_record() {
        let e = Error::Record {
            index: 4,
            title: "Algebra".to_owned(),
            source: ParseError::EmptyWeeks {
                code: "2(单)".to_owned(),
            },
        };
        assert_eq!(
            e.to_string(),
            "record 4 (`Algebra`): week spec `2(单)` selects no week"
        );
        assert!(std::error::Error::source(&e).is_some());
    }

    #[test]
    fn config_error_message() {
        let e = ConfigError::UnknownPalette {
            index: 5,
            available: 2,
        };
        assert_eq!(e.to_string(), "unknown palette 5, 2 available");
    }

    #[test]
    fn errors_are_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<ParseError>();
        assert_impl::<ConfigError>();
        assert_impl::<Error>();
    }
}
