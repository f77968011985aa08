use std::io::{BufRead, Write};

use polars::prelude::DataFrame;
use tracing::debug;

use crate::error::ExploreError;
use crate::prompt::{ask, is_yes};

pub const PAGE_SIZE: usize = 5;

/// Walks a table in fixed-size pages, in row order.
pub struct RowPager<'a> {
    df: &'a DataFrame,
    offset: usize,
}

impl<'a> RowPager<'a> {
    pub fn new(df: &'a DataFrame) -> Self {
        Self { df, offset: 0 }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Rows `[offset, offset + PAGE_SIZE)`; empty once past the end.
    pub fn next_page(&mut self) -> DataFrame {
        let page = self.df.slice(self.offset as i64, PAGE_SIZE);
        self.offset += PAGE_SIZE;
        page
    }
}

/// Show raw rows five at a time for as long as the user answers "yes".
/// Returns the number of pages shown.
pub fn view_rows<R: BufRead, W: Write>(
    df: &DataFrame,
    input: &mut R,
    out: &mut W,
) -> Result<usize, ExploreError> {
    let mut pager = RowPager::new(df);
    let mut pages = 0;

    let mut answer = ask(
        input,
        out,
        "\nWould you like to view 5 rows of individual trip data? Enter yes or no\n",
    )?;
    while is_yes(&answer) {
        writeln!(out, "{}", pager.next_page())?;
        pages += 1;
        answer = ask(input, out, "\nDo you wish to continue? Enter yes or no\n")?;
    }

    debug!(pages, offset = pager.offset(), "row viewing finished");
    writeln!(
        out,
        "\nNo problem. Answer yes next time to see 5 rows of trip data."
    )?;
    Ok(pages)
}
