use std::fmt::Display;
use std::io::{BufRead, Write};
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::error::ExploreError;
use crate::explorer::TripExplorer;
use crate::prompt::{ask, is_yes, select_filters, SEPARATOR};
use crate::stats::{duration_stats, station_stats, time_stats, user_stats};
use crate::viewer::view_rows;

/// Run selection → load → reports → row viewer until the user declines to
/// restart. A dataset that fails to load is reported and the user is sent
/// back to selection.
pub fn run<R: BufRead, W: Write>(
    explorer: &TripExplorer,
    input: &mut R,
    out: &mut W,
) -> Result<(), ExploreError> {
    loop {
        let spec = select_filters(input, out)?;

        let df = match explorer.load(&spec) {
            Ok(df) => df,
            Err(e) => {
                warn!(city = %spec.city, "load failed: {e}");
                writeln!(out, "\nCould not load data for {}: {e}", spec.city)?;
                writeln!(out, "Please make another selection.")?;
                writeln!(out, "{SEPARATOR}")?;
                continue;
            }
        };

        report(out, "the most frequent times of travel", || time_stats(&df))?;
        report(out, "the most popular stations and trip", || station_stats(&df))?;
        report(out, "trip duration", || duration_stats(&df))?;
        report(out, "user stats", || user_stats(&df))?;
        view_rows(&df, input, out)?;

        let answer = ask(input, out, "\nWould you like to restart? Enter yes or no.\n")?;
        if !is_yes(&answer) {
            info!("session finished");
            return Ok(());
        }
    }
}

/// Compute one report, print it with its wall-clock time, and close it
/// with a separator.
fn report<W, T, F>(out: &mut W, title: &str, compute: F) -> Result<(), ExploreError>
where
    W: Write,
    T: Display,
    F: FnOnce() -> Result<T, ExploreError>,
{
    writeln!(out, "\nCalculating {title}...")?;

    let started = Instant::now();
    let stats = compute()?;
    let elapsed = started.elapsed();
    debug!(report = title, elapsed_us = elapsed.as_micros() as u64, "report computed");

    write!(out, "{stats}")?;
    writeln!(out, "\nThis took {:.4} seconds.", elapsed.as_secs_f64())?;
    writeln!(out, "{SEPARATOR}")?;
    Ok(())
}
