//! Search filter state: date, hour window, minimum duration and studio selection.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::selection::Selection;
use crate::CoreError;

pub const DEFAULT_START_HOUR: u8 = 16;
pub const DEFAULT_END_HOUR: u8 = 22;
pub const DEFAULT_MIN_HOURS: u8 = 2;

/// Inclusive bounds for one of the hour controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourRange {
    pub min: u8,
    pub max: u8,
}

impl HourRange {
    #[must_use]
    pub fn contains(self, value: u8) -> bool {
        (self.min..=self.max).contains(&value)
    }

    #[must_use]
    pub fn clamp(self, value: u8) -> u8 {
        value.clamp(self.min, self.max)
    }
}

/// The three independently clamped numeric controls of the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HourField {
    Start,
    End,
    MinDuration,
}

impl HourField {
    #[must_use]
    pub fn range(self) -> HourRange {
        match self {
            HourField::Start | HourField::End => HourRange { min: 0, max: 24 },
            HourField::MinDuration => HourRange { min: 1, max: 6 },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub date: NaiveDate,
    pub start_hour: u8,
    pub end_hour: u8,
    pub min_hours: u8,
    pub selection: Selection,
}

impl Filter {
    /// Filter for `date` with the default 16–22 window and a 2 hour minimum.
    #[must_use]
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            start_hour: DEFAULT_START_HOUR,
            end_hour: DEFAULT_END_HOUR,
            min_hours: DEFAULT_MIN_HOURS,
            selection: Selection::default(),
        }
    }

    /// Filter for the local calendar day.
    #[must_use]
    pub fn today() -> Self {
        Self::new(chrono::Local::now().date_naive())
    }

    #[must_use]
    pub fn hour(&self, field: HourField) -> u8 {
        match field {
            HourField::Start => self.start_hour,
            HourField::End => self.end_hour,
            HourField::MinDuration => self.min_hours,
        }
    }

    /// Sets `field`, clamping to its range. Other fields are not consulted.
    pub fn set_hour(&mut self, field: HourField, value: u8) {
        let value = field.range().clamp(value);
        match field {
            HourField::Start => self.start_hour = value,
            HourField::End => self.end_hour = value,
            HourField::MinDuration => self.min_hours = value,
        }
    }

    /// The "+" control: no-op at the upper bound.
    pub fn increment(&mut self, field: HourField) {
        let current = self.hour(field);
        if current < field.range().max {
            self.set_hour(field, current + 1);
        }
    }

    /// The "−" control: no-op at the lower bound.
    pub fn decrement(&mut self, field: HourField) {
        let current = self.hour(field);
        if current > field.range().min {
            self.set_hour(field, current - 1);
        }
    }

    /// True when the window is empty or reversed. Representable on purpose;
    /// the backend decides what such a window means.
    #[must_use]
    pub fn window_is_inverted(&self) -> bool {
        self.start_hour >= self.end_hour
    }

    /// # Errors
    ///
    /// Returns [`CoreError::NoStudioSelected`] when the selection is empty.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.selection.is_empty() {
            return Err(CoreError::NoStudioSelected);
        }
        Ok(())
    }
}
