use std::fmt;
use std::str::FromStr;

use chrono::{Month, Weekday};

use crate::error::ExploreError;

/// Months covered by the datasets, in filter order.
pub const FILTER_MONTHS: [Month; 6] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
];

pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

const ALL: &str = "all";

/// A value with a canonical, capitalized display name that user input is
/// matched against.
pub trait Named: Copy {
    fn name(&self) -> &'static str;
}

impl Named for Month {
    fn name(&self) -> &'static str {
        Month::name(self)
    }
}

impl Named for Weekday {
    fn name(&self) -> &'static str {
        weekday_name(*self)
    }
}

/// Full English weekday name, as found in the derived `day_of_week` column.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Exact, case-insensitive match of `input` against the names of `choices`.
pub fn parse_choice<T: Named>(input: &str, choices: &[T]) -> Option<T> {
    let input = input.trim();
    choices
        .iter()
        .copied()
        .find(|c| c.name().eq_ignore_ascii_case(input))
}

// ── City ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum City {
    Chicago,
    NewYork,
    Washington,
}

impl City {
    pub const ALL: [City; 3] = [City::Chicago, City::NewYork, City::Washington];

    /// CSV file backing this city, relative to the data directory.
    pub fn file_name(self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYork => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }
}

impl Named for City {
    fn name(&self) -> &'static str {
        match self {
            City::Chicago => "Chicago",
            City::NewYork => "New York",
            City::Washington => "Washington",
        }
    }
}

impl FromStr for City {
    type Err = ExploreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice(s, &City::ALL)
            .ok_or_else(|| ExploreError::InvalidSelection(format!("unknown city '{}'", s.trim())))
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── Selection ───────────────────────────────────────────────────────────────

/// Either no restriction, or a single value to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T: Named> Selection<T> {
    /// Accepts "all" or one of `choices`, case-insensitively.
    pub fn parse(input: &str, choices: &[T]) -> Result<Self, ExploreError> {
        if input.trim().eq_ignore_ascii_case(ALL) {
            return Ok(Selection::All);
        }
        parse_choice(input, choices)
            .map(Selection::Only)
            .ok_or_else(|| ExploreError::InvalidSelection(format!("'{}'", input.trim())))
    }
}

impl<T: Named> fmt::Display for Selection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => f.write_str("All"),
            Selection::Only(v) => f.write_str(v.name()),
        }
    }
}

// ── FilterSpec ──────────────────────────────────────────────────────────────

/// Validated city/month/day selection for one session iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSpec {
    pub city: City,
    pub month: Selection<Month>,
    pub day: Selection<Weekday>,
}

impl FilterSpec {
    pub fn new(city: City, month: Selection<Month>, day: Selection<Weekday>) -> Self {
        Self { city, month, day }
    }

    /// No month or day restriction.
    pub fn unfiltered(city: City) -> Self {
        Self::new(city, Selection::All, Selection::All)
    }

    /// 1-based month number to keep, if any.
    pub fn month_number(&self) -> Option<i32> {
        match self.month {
            Selection::All => None,
            Selection::Only(m) => Some(m.number_from_month() as i32),
        }
    }

    /// Capitalized weekday name to keep, if any.
    pub fn day_name(&self) -> Option<&'static str> {
        match self.day {
            Selection::All => None,
            Selection::Only(d) => Some(weekday_name(d)),
        }
    }
}
