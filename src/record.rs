use crate::error::ExtractError;
use crate::parser::dates::{CanonicalDate, MatchedDate};
use crate::parser::zodiac::{self, ZodiacSign};

/// One player row. Age and sign are derived at construction and never change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerRecord {
    tournament_year: i32,
    country: String,
    date_of_birth: CanonicalDate,
    date_text: String,
    height_cm: u32,
    weight_kg: Option<u32>,
    age: i32,
    zodiac_sign: ZodiacSign,
}

impl PlayerRecord {
    pub fn new(
        tournament_year: i32,
        country: &str,
        dob: MatchedDate,
        height_cm: u32,
        weight_kg: Option<u32>,
    ) -> Result<Self, ExtractError> {
        let (age, zodiac_sign) = zodiac::compute(tournament_year, &dob.date)?;
        Ok(PlayerRecord {
            tournament_year,
            country: country.to_string(),
            date_of_birth: dob.date,
            date_text: dob.text,
            height_cm,
            weight_kg,
            age,
            zodiac_sign,
        })
    }

    pub fn tournament_year(&self) -> i32 {
        self.tournament_year
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn date_of_birth(&self) -> &CanonicalDate {
        &self.date_of_birth
    }

    /// The date exactly as it appeared in the source text.
    pub fn date_text(&self) -> &str {
        &self.date_text
    }

    pub fn height_cm(&self) -> u32 {
        self.height_cm
    }

    pub fn weight_kg(&self) -> Option<u32> {
        self.weight_kg
    }

    pub fn age(&self) -> i32 {
        self.age
    }

    pub fn zodiac_sign(&self) -> ZodiacSign {
        self.zodiac_sign
    }

    /// `[year, country, dob, height, age, sign]`, plus `weight` when the layout provides one.
    pub fn to_row(&self) -> Vec<String> {
        let mut row = vec![
            self.tournament_year.to_string(),
            self.country.clone(),
            self.date_text.clone(),
            self.height_cm.to_string(),
            self.age.to_string(),
            self.zodiac_sign.to_string(),
        ];
        if let Some(w) = self.weight_kg {
            row.push(w.to_string());
        }
        row
    }
}
