use std::fmt::Display;
use std::io::{BufRead, Write};

use tracing::debug;

use crate::error::ExploreError;
use crate::filter::{City, FilterSpec, Selection, FILTER_MONTHS, WEEKDAYS};

pub const SEPARATOR: &str = "----------------------------------------";

/// Write `question`, then read one answer line, trimmed and lowercased.
///
/// Returns `InputClosed` once the input is exhausted.
pub fn ask<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    question: &str,
) -> Result<String, ExploreError> {
    write!(out, "{question}")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(ExploreError::InputClosed);
    }
    Ok(line.trim().to_lowercase())
}

/// Only an exact "yes" (any case) counts as consent.
pub fn is_yes(answer: &str) -> bool {
    answer.eq_ignore_ascii_case("yes")
}

/// Ask until `parse` accepts the answer. There is no retry limit.
fn choose<R, W, T, F>(
    input: &mut R,
    out: &mut W,
    question: &str,
    retry_hint: &str,
    parse: F,
) -> Result<T, ExploreError>
where
    R: BufRead,
    W: Write,
    T: Display,
    F: Fn(&str) -> Result<T, ExploreError>,
{
    loop {
        let answer = ask(input, out, question)?;
        match parse(&answer) {
            Ok(choice) => {
                writeln!(out, "\nYou chose {choice}.")?;
                return Ok(choice);
            }
            Err(e) => {
                debug!("{e}");
                writeln!(out, "\nInvalid choice. {retry_hint}")?;
            }
        }
    }
}

/// Interactively build the city/month/day selection for one iteration.
pub fn select_filters<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
) -> Result<FilterSpec, ExploreError> {
    writeln!(out, "Hello! Let's explore some US bikeshare data!")?;

    let city = choose(
        input,
        out,
        "\nWould you like to see data for Chicago, New York, or Washington?\n",
        "Please choose Chicago, New York or Washington.",
        |s| s.parse::<City>(),
    )?;
    let month = choose(
        input,
        out,
        "\nWhich month from January to June? Enter all for no month filter.\n",
        "Please choose January, February, March, April, May, June or all.",
        |s| Selection::parse(s, &FILTER_MONTHS),
    )?;
    let day = choose(
        input,
        out,
        "\nWhich day of the week? Enter all for no day filter.\n",
        "Please choose Monday, Tuesday, Wednesday, Thursday, Friday, Saturday, Sunday or all.",
        |s| Selection::parse(s, &WEEKDAYS),
    )?;

    writeln!(out, "{SEPARATOR}")?;
    Ok(FilterSpec::new(city, month, day))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Month, Weekday};
    use std::io::Cursor;

    #[test]
    fn reprompts_until_every_field_is_valid() {
        let mut input = Cursor::new("boston\nCHICAGO\njuly\n4\nApril\nmon\nMonday\n");
        let mut out = Vec::new();

        let spec = select_filters(&mut input, &mut out).unwrap();
        assert_eq!(
            spec,
            FilterSpec::new(
                City::Chicago,
                Selection::Only(Month::April),
                Selection::Only(Weekday::Mon),
            )
        );

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("Invalid choice.").count(), 4);
        assert!(text.contains("You chose Chicago."));
        assert!(text.contains("You chose April."));
        assert!(text.contains("You chose Monday."));
        assert!(text.ends_with(&format!("{SEPARATOR}\n")));
    }

    #[test]
    fn case_variants_select_the_same_filters() {
        let upper = select_filters(&mut Cursor::new("NEW YORK\nALL\nALL\n"), &mut Vec::new());
        let lower = select_filters(&mut Cursor::new("new york\nall\nall\n"), &mut Vec::new());
        assert_eq!(upper.unwrap(), lower.unwrap());
    }

    #[test]
    fn closed_input_ends_selection() {
        let err = select_filters(&mut Cursor::new("chicago\n"), &mut Vec::new()).unwrap_err();
        assert!(matches!(err, ExploreError::InputClosed));
    }

    #[test]
    fn ask_trims_and_lowercases() {
        let mut out = Vec::new();
        let answer = ask(&mut Cursor::new("  YeS \r\n"), &mut out, "Continue?").unwrap();
        assert_eq!(answer, "yes");
        assert!(is_yes(&answer));
        assert!(!is_yes("y"));
        assert!(!is_yes("yess"));
        assert_eq!(out, b"Continue?");
    }
}
