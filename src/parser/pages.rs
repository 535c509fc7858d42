use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::error::IntegrityWarning;
use crate::record::PlayerRecord;

use super::dates::{normalize, MatchedDate};
use super::patterns::{self, DateToken, HeightWeight};
use super::Extraction;

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Collapse every whitespace run (newlines included) into one space.
pub fn flatten_page(raw: &str) -> String {
    WHITESPACE_RE.replace_all(raw, " ").into_owned()
}

/// Walks player rows of one page: a birth date, then the next height/weight pair.
/// Stops once the country name no longer occurs ahead of the cursor,
/// or when either token is missing.
pub struct RowCursor<'t> {
    rows: &'t str,
    country: &'t str,
    pos: usize,
}

impl<'t> RowCursor<'t> {
    pub fn new(rows: &'t str, country: &'t str) -> Self {
        RowCursor {
            rows,
            country,
            pos: 0,
        }
    }
}

impl<'t> Iterator for RowCursor<'t> {
    type Item = (DateToken<'t>, HeightWeight<'t>);

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.rows.get(self.pos..)?;
        if !rest.contains(self.country) {
            return None;
        }
        let date = patterns::numeric_date(rest)?;
        let hw = patterns::height_weight(&rest[date.end..])?;
        self.pos += date.end + hw.end;
        Some((date, hw))
    }
}

/// Extract every player row from one flattened page.
pub fn extract_page(tournament_year: i32, page: &str, out: &mut Extraction) {
    let Some(start) = patterns::column_header_end(page) else {
        debug!("page has no column header, skipped");
        return;
    };
    let rows = &page[start..];
    let Some((country, _)) = patterns::country_name(rows) else {
        debug!("page has no country name, skipped");
        return;
    };

    let mut emitted = 0;
    for (token, hw) in RowCursor::new(rows, country) {
        let built = normalize(&token).and_then(|date| {
            let dob = MatchedDate {
                text: token.text.to_string(),
                date,
            };
            PlayerRecord::new(
                tournament_year,
                country,
                dob,
                hw.height_cm,
                Some(hw.weight_kg),
            )
        });
        match built {
            Ok(record) => {
                out.records.push(record);
                emitted += 1;
            }
            Err(e) => {
                let warning = IntegrityWarning::RejectedRecord {
                    country: country.to_string(),
                    date: token.text.to_string(),
                    reason: e.to_string(),
                };
                warn!(country, "{}", warning);
                out.warnings.push(warning);
            }
        }
    }
    debug!(country, emitted, "page done");
}

pub fn extract_pages<S: AsRef<str>>(tournament_year: i32, pages: &[S]) -> Extraction {
    let mut out = Extraction::default();
    for raw in pages {
        let page = flatten_page(raw.as_ref());
        extract_page(tournament_year, &page, &mut out);
    }
    out
}
