use std::fmt;

use serde::Serialize;

use crate::error::ExtractError;

use super::dates::CanonicalDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ZodiacSign {
    Capricorn,
    Aquarius,
    Pisces,
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
}

/// (sign, first (month, day), last (month, day)), both ends inclusive.
/// Capricorn is the only range that wraps past the end of the year.
const BOUNDARIES: [(ZodiacSign, (u32, u32), (u32, u32)); 12] = [
    (ZodiacSign::Capricorn, (12, 22), (1, 19)),
    (ZodiacSign::Aquarius, (1, 20), (2, 17)),
    (ZodiacSign::Pisces, (2, 18), (3, 19)),
    (ZodiacSign::Aries, (3, 20), (4, 19)),
    (ZodiacSign::Taurus, (4, 20), (5, 20)),
    (ZodiacSign::Gemini, (5, 21), (6, 20)),
    (ZodiacSign::Cancer, (6, 21), (7, 22)),
    (ZodiacSign::Leo, (7, 23), (8, 22)),
    (ZodiacSign::Virgo, (8, 23), (9, 22)),
    (ZodiacSign::Libra, (9, 23), (10, 22)),
    (ZodiacSign::Scorpio, (10, 23), (11, 21)),
    (ZodiacSign::Sagittarius, (11, 22), (12, 21)),
];

impl ZodiacSign {
    pub const ALL: [ZodiacSign; 12] = [
        ZodiacSign::Capricorn,
        ZodiacSign::Aquarius,
        ZodiacSign::Pisces,
        ZodiacSign::Aries,
        ZodiacSign::Taurus,
        ZodiacSign::Gemini,
        ZodiacSign::Cancer,
        ZodiacSign::Leo,
        ZodiacSign::Virgo,
        ZodiacSign::Libra,
        ZodiacSign::Scorpio,
        ZodiacSign::Sagittarius,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ZodiacSign::Capricorn => "Capricorn",
            ZodiacSign::Aquarius => "Aquarius",
            ZodiacSign::Pisces => "Pisces",
            ZodiacSign::Aries => "Aries",
            ZodiacSign::Taurus => "Taurus",
            ZodiacSign::Gemini => "Gemini",
            ZodiacSign::Cancer => "Cancer",
            ZodiacSign::Leo => "Leo",
            ZodiacSign::Virgo => "Virgo",
            ZodiacSign::Libra => "Libra",
            ZodiacSign::Scorpio => "Scorpio",
            ZodiacSign::Sagittarius => "Sagittarius",
        }
    }

    pub fn from_name(name: &str) -> Option<ZodiacSign> {
        Self::ALL.into_iter().find(|s| s.name() == name)
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Longest day of each month in any year, so 29 February is always accepted.
fn max_day(month: u32) -> u32 {
    match month {
        2 => 29,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

fn in_range(from: (u32, u32), to: (u32, u32), key: (u32, u32)) -> bool {
    if from <= to {
        from <= key && key <= to
    } else {
        key >= from || key <= to
    }
}

pub fn sign_for(month: u32, day: u32) -> Result<ZodiacSign, ExtractError> {
    if !(1..=12).contains(&month) || day == 0 || day > max_day(month) {
        return Err(ExtractError::DateOutOfRange { day, month });
    }
    let key = (month, day);
    BOUNDARIES
        .iter()
        .find(|(_, from, to)| in_range(*from, *to, key))
        .map(|(sign, _, _)| *sign)
        .ok_or(ExtractError::DateOutOfRange { day, month })
}

/// Plain year difference, no adjustment for whether the birthday has passed.
pub fn age(reference_year: i32, dob: &CanonicalDate) -> i32 {
    reference_year - dob.year()
}

pub fn compute(reference_year: i32, dob: &CanonicalDate) -> Result<(i32, ZodiacSign), ExtractError> {
    let sign = sign_for(dob.month(), dob.day())?;
    Ok((age(reference_year, dob), sign))
}
