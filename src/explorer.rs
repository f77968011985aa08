use std::fs::File;
use std::path::{Path, PathBuf};

use polars::datatypes::TimeUnit;
use polars::prelude::StrptimeOptions;
use polars::prelude::*;
use tracing::{debug, info};

use crate::error::ExploreError;
use crate::filter::FilterSpec;
use crate::schema::*;

/// Loads city datasets from a data directory and applies a `FilterSpec`.
pub struct TripExplorer {
    base_path: PathBuf,
}

impl TripExplorer {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    // ── Data loading ────────────────────────────────────────────────────────

    /// Load the dataset for `spec.city`, derive the calendar columns and keep
    /// only the rows matching the month and day filters.
    ///
    /// Required columns: Start Time, Trip Duration, Start Station,
    /// End Station, User Type. Gender and Birth Year are kept when present.
    /// Source row order is preserved.
    pub fn load(&self, spec: &FilterSpec) -> Result<DataFrame, ExploreError> {
        let path = self.base_path.join(spec.city.file_name());
        info!(
            city = %spec.city,
            month = %spec.month,
            day = %spec.day,
            "loading {}",
            path.display()
        );

        let raw = Self::read_csv_as_strings(&path)?;
        Self::require_columns(&raw, &trip::REQUIRED)?;
        let total = raw.height();

        let df = Self::parse_datetime_column(raw, trip::START_TIME, START_TIME_FORMAT)?;
        let df = Self::parse_float_column(df, trip::TRIP_DURATION)?;
        let df = Self::parse_float_column(df, demographics::BIRTH_YEAR)?;
        let df = Self::derive_calendar_columns(df)?;
        let df = Self::apply_filters(df, spec)?;

        info!(rows = df.height(), total, "loaded {}", spec.city);
        Ok(df)
    }

    // ── Filtering ───────────────────────────────────────────────────────────

    fn apply_filters(df: DataFrame, spec: &FilterSpec) -> Result<DataFrame, ExploreError> {
        let mut lazy = df.lazy();

        if let Some(month) = spec.month_number() {
            lazy = lazy.filter(col(derived::MONTH).eq(lit(month)));
        }
        if let Some(day) = spec.day_name() {
            lazy = lazy.filter(col(derived::DAY_OF_WEEK).eq(lit(day)));
        }

        Ok(lazy.collect()?)
    }

    /// Add month (1-12), full weekday name and hour (0-23) from the start time.
    fn derive_calendar_columns(df: DataFrame) -> Result<DataFrame, ExploreError> {
        let df = df
            .lazy()
            .with_columns([
                col(trip::START_TIME)
                    .dt()
                    .month()
                    .cast(DataType::Int32)
                    .alias(derived::MONTH),
                col(trip::START_TIME)
                    .dt()
                    .strftime("%A")
                    .alias(derived::DAY_OF_WEEK),
                col(trip::START_TIME)
                    .dt()
                    .hour()
                    .cast(DataType::Int32)
                    .alias(derived::HOUR),
            ])
            .collect()?;
        Ok(df)
    }

    // ── Private helpers ─────────────────────────────────────────────────────

    /// Read a CSV file with all columns as String dtype.
    /// Trims whitespace from column names.
    fn read_csv_as_strings(path: &Path) -> Result<DataFrame, ExploreError> {
        let file = File::open(path).map_err(|source| ExploreError::MissingResource {
            path: path.to_path_buf(),
            source,
        })?;

        let mut df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0)) // all columns as String
            .into_reader_with_file_handle(file)
            .finish()?;

        let trimmed: Vec<String> = df
            .get_column_names_str()
            .iter()
            .map(|c| c.trim().to_string())
            .collect();
        df.set_column_names(trimmed.as_slice())?;

        debug!(rows = df.height(), columns = ?trimmed, "read {}", path.display());
        Ok(df)
    }

    fn require_columns(df: &DataFrame, required: &[&str]) -> Result<(), ExploreError> {
        for &col_name in required {
            if df.column(col_name).is_err() {
                return Err(ExploreError::MissingColumn(col_name.to_string()));
            }
        }
        Ok(())
    }

    /// Parse a string column to Datetime. Any value not matching `format`
    /// is a malformed row.
    fn parse_datetime_column(
        df: DataFrame,
        column: &str,
        format: &str,
    ) -> Result<DataFrame, ExploreError> {
        df.lazy()
            .with_columns([col(column)
                .str()
                .strip_chars(lit(" \t\r\n"))
                .str()
                .to_datetime(
                    Some(TimeUnit::Microseconds),
                    None,
                    StrptimeOptions {
                        format: Some(format.into()),
                        strict: true,
                        ..Default::default()
                    },
                    lit("raise"),
                )])
            .collect()
            .map_err(|e| ExploreError::MalformedRow(format!("{column}: {e}")))
    }

    /// Parse a string column to Float64 if it exists. Empty cells stay null;
    /// anything else that is not a number is a malformed row.
    fn parse_float_column(df: DataFrame, column: &str) -> Result<DataFrame, ExploreError> {
        if df.column(column).is_err() {
            return Ok(df);
        }
        df.lazy()
            .with_columns([col(column)
                .str()
                .strip_chars(lit(" \t\r\n"))
                .strict_cast(DataType::Float64)])
            .collect()
            .map_err(|e| ExploreError::MalformedRow(format!("{column}: {e}")))
    }
}
