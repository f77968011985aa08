use std::fmt;

use chrono::Month;
use polars::prelude::*;
use tracing::debug;

use crate::error::ExploreError;
use crate::schema::{demographics, derived, frequency, trip};

/// Outcome of a statistic over a column that some cities do not provide.
#[derive(Debug, Clone, PartialEq)]
pub enum Field<T> {
    Value(T),
    /// The column exists but no row has a value.
    Empty,
    /// The city's dataset has no such column.
    Missing,
}

// ── Reporters ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct TimeStats {
    pub month: Option<Month>,
    pub day: Option<String>,
    pub hour: Option<i64>,
}

/// Most frequent month, weekday and start hour. When several values share
/// the highest count, any one of them may be reported.
pub fn time_stats(df: &DataFrame) -> Result<TimeStats, ExploreError> {
    let month = mode_i64(series(df, derived::MONTH)?)?
        .and_then(|m| u8::try_from(m).ok())
        .and_then(|m| Month::try_from(m).ok());
    let day = mode_string(series(df, derived::DAY_OF_WEEK)?)?;
    let hour = mode_i64(series(df, derived::HOUR)?)?;

    Ok(TimeStats { month, day, hour })
}

#[derive(Debug, Clone, PartialEq)]
pub struct StationStats {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl StationStats {
    /// The "most frequent combination" of stations: the most common start
    /// paired with the most common end, each counted on its own. This is
    /// not the most frequent origin/destination pair.
    pub fn combination(&self) -> Option<(&str, &str)> {
        Some((self.start.as_deref()?, self.end.as_deref()?))
    }
}

pub fn station_stats(df: &DataFrame) -> Result<StationStats, ExploreError> {
    Ok(StationStats {
        start: mode_string(series(df, trip::START_STATION)?)?,
        end: mode_string(series(df, trip::END_STATION)?)?,
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct DurationStats {
    /// Sum of trip durations in hours, rounded to 2 decimals.
    pub total_hours: f64,
    /// Mean trip duration in minutes, rounded to 2 decimals.
    pub mean_minutes: Option<f64>,
}

pub fn duration_stats(df: &DataFrame) -> Result<DurationStats, ExploreError> {
    let s = series(df, trip::TRIP_DURATION)?;

    let total = s.sum_reduce()?.value().try_extract::<f64>().unwrap_or(0.0);
    let mean = s.mean_reduce().value().try_extract::<f64>().ok();

    Ok(DurationStats {
        total_hours: round2(total / 3600.0),
        mean_minutes: mean.map(|m| round2(m / 60.0)),
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserStats {
    pub user_types: Vec<(String, u64)>,
    pub genders: Field<Vec<(String, u64)>>,
    pub earliest_birth_year: Field<i64>,
    pub most_recent_birth_year: Field<i64>,
    pub most_common_birth_year: Field<i64>,
}

/// User type counts, plus gender counts and birth-year extremes where the
/// city provides them. Each demographic field degrades on its own.
pub fn user_stats(df: &DataFrame) -> Result<UserStats, ExploreError> {
    let user_types = frequencies(series(df, trip::USER_TYPE)?)?;

    let genders = match optional_series(df, demographics::GENDER) {
        Some(s) => Field::Value(frequencies(s)?),
        None => Field::Missing,
    };

    let earliest_birth_year = birth_year(df, |s| {
        Ok(s.min_reduce()?.value().try_extract::<f64>().ok().map(|y| y as i64))
    })?;
    let most_recent_birth_year = birth_year(df, |s| {
        Ok(s.max_reduce()?.value().try_extract::<f64>().ok().map(|y| y as i64))
    })?;
    let most_common_birth_year = birth_year(df, mode_i64)?;

    Ok(UserStats {
        user_types,
        genders,
        earliest_birth_year,
        most_recent_birth_year,
        most_common_birth_year,
    })
}

fn birth_year<F>(df: &DataFrame, query: F) -> Result<Field<i64>, ExploreError>
where
    F: FnOnce(&Series) -> Result<Option<i64>, ExploreError>,
{
    let Some(s) = optional_series(df, demographics::BIRTH_YEAR) else {
        return Ok(Field::Missing);
    };
    Ok(match query(s)? {
        Some(year) => Field::Value(year),
        None => Field::Empty,
    })
}

// ── Frequency helpers ───────────────────────────────────────────────────────

fn series<'a>(df: &'a DataFrame, column: &str) -> Result<&'a Series, ExploreError> {
    Ok(df.column(column)?.as_materialized_series())
}

fn optional_series<'a>(df: &'a DataFrame, column: &str) -> Option<&'a Series> {
    match df.column(column) {
        Ok(c) => Some(c.as_materialized_series()),
        Err(_) => {
            debug!("{}", ExploreError::MissingColumn(column.to_string()));
            None
        }
    }
}

/// Count of each distinct non-null value, most frequent first. Values with
/// equal counts keep the order of their first appearance.
fn value_counts(s: &Series) -> Result<DataFrame, ExploreError> {
    let name = s.name().clone();
    let counts = s
        .clone()
        .into_frame()
        .lazy()
        .filter(col(name.clone()).is_not_null())
        .group_by_stable([col(name)])
        .agg([len().alias(frequency::COUNT)])
        .sort(
            [frequency::COUNT],
            SortMultipleOptions::default()
                .with_order_descending(true)
                .with_maintain_order(true),
        )
        .collect()?;
    Ok(counts)
}

/// Distinct values rendered as strings, with their counts, most frequent first.
pub fn frequencies(s: &Series) -> Result<Vec<(String, u64)>, ExploreError> {
    let counts = value_counts(s)?;
    let values = counts
        .column(s.name().as_str())?
        .as_materialized_series()
        .cast(&DataType::String)?;
    let totals = counts
        .column(frequency::COUNT)?
        .as_materialized_series()
        .cast(&DataType::UInt64)?;

    let pairs = values
        .str()?
        .into_iter()
        .zip(totals.u64()?.into_iter())
        .filter_map(|(value, count)| Some((value?.to_string(), count?)))
        .collect();
    Ok(pairs)
}

pub fn mode_string(s: &Series) -> Result<Option<String>, ExploreError> {
    Ok(frequencies(s)?.into_iter().next().map(|(value, _)| value))
}

/// Most frequent value of a numeric column, truncated to an integer.
pub fn mode_i64(s: &Series) -> Result<Option<i64>, ExploreError> {
    let counts = value_counts(s)?;
    if counts.height() == 0 {
        return Ok(None);
    }
    let values = counts
        .column(s.name().as_str())?
        .as_materialized_series()
        .cast(&DataType::Int64)?;
    Ok(values.i64()?.get(0))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ── Display ─────────────────────────────────────────────────────────────────

const NO_TRIPS: &str = "not available (no trips match the filters)";

struct OrNoTrips<'a, T>(&'a Option<T>);

impl<T: fmt::Display> fmt::Display for OrNoTrips<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{v}"),
            None => f.write_str(NO_TRIPS),
        }
    }
}

fn write_counts(f: &mut fmt::Formatter<'_>, counts: &[(String, u64)]) -> fmt::Result {
    if counts.is_empty() {
        return writeln!(f, "  {NO_TRIPS}");
    }
    let width = counts.iter().map(|(v, _)| v.len()).max().unwrap_or(0);
    for (value, count) in counts {
        writeln!(f, "  {value:<width$}  {count}")?;
    }
    Ok(())
}

fn write_birth_year(f: &mut fmt::Formatter<'_>, label: &str, year: &Field<i64>) -> fmt::Result {
    match year {
        Field::Value(y) => writeln!(f, "\nThe {label} year of birth is {y}"),
        Field::Empty => writeln!(f, "\nThe {label} year of birth is {NO_TRIPS}"),
        Field::Missing => writeln!(f, "\nBirth year data is not available for this city"),
    }
}

impl fmt::Display for TimeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let month = self.month.map(|m| m.name());
        writeln!(f, "\nMost common month is {}", OrNoTrips(&month))?;
        writeln!(f, "\nMost common day is {}", OrNoTrips(&self.day))?;
        writeln!(f, "\nMost common start hour is {}", OrNoTrips(&self.hour))
    }
}

impl fmt::Display for StationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\nMost common start station is {}", OrNoTrips(&self.start))?;
        writeln!(f, "\nMost common end station is {}", OrNoTrips(&self.end))?;
        match self.combination() {
            Some((start, end)) => writeln!(
                f,
                "\nThe most frequent combination of start station and end station is: {start} and {end}."
            ),
            None => writeln!(
                f,
                "\nThe most frequent combination of start station and end station is {NO_TRIPS}"
            ),
        }
    }
}

impl fmt::Display for DurationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\nThe total travel time is {:.2} hours.", self.total_hours)?;
        match self.mean_minutes {
            Some(m) => writeln!(f, "\nThe mean travel time is {m:.2} minutes."),
            None => writeln!(f, "\nThe mean travel time is {NO_TRIPS}"),
        }
    }
}

impl fmt::Display for UserStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\nUser type counts:")?;
        write_counts(f, &self.user_types)?;

        match &self.genders {
            Field::Value(counts) => {
                writeln!(f, "\nGender counts:")?;
                write_counts(f, counts)?;
            }
            Field::Empty | Field::Missing => {
                writeln!(f, "\nGender data is not available for this city")?;
            }
        }

        write_birth_year(f, "earliest", &self.earliest_birth_year)?;
        write_birth_year(f, "most recent", &self.most_recent_birth_year)?;
        write_birth_year(f, "most common", &self.most_common_birth_year)
    }
}
