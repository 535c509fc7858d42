use std::fmt;

use crate::error::ExtractError;

use super::patterns::{self, DateShape, DateToken};

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Day/month/year with numeric bounds checked. Built only through [`normalize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CanonicalDate {
    year: i32,
    month: u32,
    day: u32,
}

impl CanonicalDate {
    fn new(day: u32, month: u32, year: i32) -> Result<Self, ExtractError> {
        if !(1..=31).contains(&day) || !(1..=12).contains(&month) {
            return Err(ExtractError::DateOutOfRange { day, month });
        }
        Ok(CanonicalDate { year, month, day })
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }
}

impl fmt::Display for CanonicalDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}.{:02}.{:04}", self.day, self.month, self.year)
    }
}

/// A normalized date together with the text it was matched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedDate {
    pub text: String,
    pub date: CanonicalDate,
}

pub fn month_number(token: &str) -> Result<u32, ExtractError> {
    MONTHS
        .iter()
        .position(|m| *m == token)
        .map(|i| i as u32 + 1)
        .ok_or_else(|| ExtractError::UnrecognizedMonth(token.to_string()))
}

pub fn normalize(token: &DateToken<'_>) -> Result<CanonicalDate, ExtractError> {
    let day = parse_digits(token.day, token)?;
    let month = match token.shape {
        DateShape::Numeric => parse_digits(token.month, token)?,
        DateShape::Word => month_number(token.month)?,
    };
    let year = parse_digits(token.year, token)? as i32;
    // Two-digit years in the rosters all belong to the 1900s.
    let year = if token.year.len() == 2 { 1900 + year } else { year };
    CanonicalDate::new(day, month, year)
}

fn parse_digits(digits: &str, token: &DateToken<'_>) -> Result<u32, ExtractError> {
    // The recognizers only capture ASCII digits here, so this cannot fail on matched input.
    digits.parse().map_err(|_| ExtractError::DateOutOfRange {
        day: token.day.parse().unwrap_or(0),
        month: token.month.parse().unwrap_or(0),
    })
}

/// First date on the line, numeric shape first. `None` when the line holds no date at all.
pub fn find_date(line: &str) -> Option<Result<MatchedDate, ExtractError>> {
    let token = patterns::any_date(line)?;
    Some(normalize(&token).map(|date| MatchedDate {
        text: token.text.to_string(),
        date,
    }))
}
