//! Configuration of a [`CourseStore`](crate::store::CourseStore).

use crate::error::ConfigError;
use crate::store::color::PALETTES;
use crate::timetable::models::DEFAULT_WEEK_NUM;

/// Term length and active palette.
///
/// # Example
///
/// ```
/// use coursetable::config::StoreConfig;
///
/// let config = StoreConfig::new().with_week_num(18).with_color_array_index(1);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    /// Amount of weeks in the term.
    week_num: u32,
    /// Palette used to color courses.
    color_array_index: usize,
}

impl StoreConfig {
    /// Defaults: `week_num = 20`, `color_array_index = 0`.
    pub fn new() -> Self {
        Self {
            week_num: DEFAULT_WEEK_NUM,
            color_array_index: 0,
        }
    }

    #[must_use]
    pub fn with_week_num(mut self, week_num: u32) -> Self {
        self.week_num = week_num;
        self
    }

    #[must_use]
    pub fn with_color_array_index(mut self, color_array_index: usize) -> Self {
        self.color_array_index = color_array_index;
        self
    }

    pub fn week_num(&self) -> u32 {
        self.week_num
    }

    pub fn color_array_index(&self) -> usize {
        self.color_array_index
    }

    /// Rejects an empty term and unknown palettes.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.week_num < 1 {
            return Err(ConfigError::InvalidWeekNum {
                week_num: self.week_num,
            });
        }
        if self.color_array_index >= PALETTES.len() {
            return Err(ConfigError::UnknownPalette {
                index: self.color_array_index,
                available: PALETTES.len(),
            });
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new()
    }
}
