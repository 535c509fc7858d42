use tracing::{debug, warn};

use crate::error::IntegrityWarning;
use crate::record::PlayerRecord;

use super::dates::{find_date, MatchedDate};
use super::patterns::{is_section_header, plausible_height};
use super::Extraction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    AwaitingHeader,
    HeaderSeen,
    CollectingFields,
}

/// Fields gathered for one country between two section headers.
#[derive(Debug, Default)]
struct SectionBuffer {
    country: String,
    dates: Vec<MatchedDate>,
    heights: Vec<u32>,
    errors: Vec<String>,
}

impl SectionBuffer {
    fn new(country: &str) -> Self {
        SectionBuffer {
            country: country.to_string(),
            ..Default::default()
        }
    }

    fn is_empty(&self) -> bool {
        self.dates.is_empty() && self.heights.is_empty() && self.errors.is_empty()
    }

    /// Nth date goes with Nth height. Any failed field or count mismatch drops the whole group.
    fn into_pairs(self) -> Result<(String, Vec<(MatchedDate, u32)>), IntegrityWarning> {
        if !self.errors.is_empty() {
            return Err(IntegrityWarning::RejectedFields {
                country: self.country,
                errors: self.errors,
            });
        }
        if self.dates.len() != self.heights.len() {
            return Err(IntegrityWarning::CountMismatch {
                country: self.country,
                dates: self.dates.into_iter().map(|d| d.text).collect(),
                heights: self.heights,
            });
        }
        let pairs = self.dates.into_iter().zip(self.heights).collect();
        Ok((self.country, pairs))
    }
}

/// Per-document state machine over text lines. Build a fresh one for every document.
#[derive(Debug)]
pub struct LineExtractor {
    tournament_year: i32,
    state: State,
    section: Option<SectionBuffer>,
    out: Extraction,
}

impl LineExtractor {
    pub fn new(tournament_year: i32) -> Self {
        LineExtractor {
            tournament_year,
            state: State::AwaitingHeader,
            section: None,
            out: Extraction::default(),
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn feed(&mut self, raw: &str) {
        let line = raw.trim();

        if is_section_header(line) {
            self.flush();
            self.state = State::HeaderSeen;
            return;
        }

        match self.state {
            State::AwaitingHeader => {}
            State::HeaderSeen => {
                if !line.is_empty() {
                    debug!(country = %line, "section started");
                    self.section = Some(SectionBuffer::new(line));
                    self.state = State::CollectingFields;
                }
            }
            State::CollectingFields => {
                let Some(section) = self.section.as_mut() else {
                    return;
                };
                if let Some(found) = find_date(line) {
                    match found {
                        Ok(date) => section.dates.push(date),
                        Err(e) => {
                            debug!(country = %section.country, line, error = %e, "rejected date");
                            section.errors.push(format!("{}: {}", line, e));
                        }
                    }
                } else if let Some(height) = plausible_height(line) {
                    section.heights.push(height);
                }
            }
        }
    }

    fn flush(&mut self) {
        let Some(section) = self.section.take() else {
            return;
        };
        if section.is_empty() {
            return;
        }
        match section.into_pairs() {
            Ok((country, pairs)) => {
                for (dob, height) in pairs {
                    let date_text = dob.text.clone();
                    match PlayerRecord::new(self.tournament_year, &country, dob, height, None) {
                        Ok(record) => self.out.records.push(record),
                        Err(e) => self.warn(IntegrityWarning::RejectedRecord {
                            country: country.clone(),
                            date: date_text,
                            reason: e.to_string(),
                        }),
                    }
                }
            }
            Err(warning) => self.warn(warning),
        }
    }

    fn warn(&mut self, warning: IntegrityWarning) {
        warn!(country = %warning.country(), "{}", warning);
        self.out.warnings.push(warning);
    }

    /// Ends the document. The open section is not flushed: without a closing
    /// header its group is dropped and reported as `unterminated`.
    pub fn finish(mut self) -> Extraction {
        if let Some(section) = self.section.take() {
            if !section.is_empty() {
                warn!(
                    country = %section.country,
                    dates = section.dates.len(),
                    heights = section.heights.len(),
                    "last section has no closing header, dropped"
                );
                self.out.unterminated = Some(section.country);
            }
        }
        self.out
    }
}

pub fn extract_lines(tournament_year: i32, text: &str) -> Extraction {
    let mut extractor = LineExtractor::new(tournament_year);
    for line in text.lines() {
        extractor.feed(line);
    }
    extractor.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::zodiac::ZodiacSign;

    fn run(lines: &[&str]) -> Extraction {
        extract_lines(2014, &lines.join("\n"))
    }

    #[test]
    fn two_sections_last_one_dropped() {
        let out = run(&[
            "List of Players",
            "Brazil",
            "15.07.1981",
            "182",
            "List of Players",
            "France",
            "20.03.1990",
            "178",
        ]);
        assert_eq!(out.records.len(), 1);
        let r = &out.records[0];
        assert_eq!(r.country(), "Brazil");
        assert_eq!(r.date_text(), "15.07.1981");
        assert_eq!(r.height_cm(), 182);
        assert_eq!(r.age(), 2014 - 1981);
        assert_eq!(r.zodiac_sign(), ZodiacSign::Cancer);
        assert_eq!(out.unterminated.as_deref(), Some("France"));
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn trailing_header_flushes_last_section() {
        let out = run(&[
            "List of Players",
            "Brazil",
            "15.07.1981",
            "182",
            "List of Players",
            "France",
            "20.03.1990",
            "178",
            "List of Players",
        ]);
        assert_eq!(out.records.len(), 2);
        let r = &out.records[1];
        assert_eq!(r.country(), "France");
        assert_eq!(r.height_cm(), 178);
        assert_eq!(r.age(), 2014 - 1990);
        assert_eq!(r.zodiac_sign(), ZodiacSign::Aries);
        assert!(out.unterminated.is_none());
    }

    #[test]
    fn mismatch_drops_only_that_section() {
        let out = run(&[
            "List of Players",
            "Chile",
            "01.02.1990",
            "03.04.1991",
            "180",
            "List of Players",
            "Ghana",
            "05.06.1992",
            "175",
            "List of Players",
        ]);
        assert_eq!(out.records.len(), 1);
        assert_eq!(out.records[0].country(), "Ghana");
        assert_eq!(out.warnings.len(), 1);
        match &out.warnings[0] {
            IntegrityWarning::CountMismatch {
                country,
                dates,
                heights,
            } => {
                assert_eq!(country, "Chile");
                assert_eq!(dates, &vec!["01.02.1990".to_string(), "03.04.1991".to_string()]);
                assert_eq!(heights, &vec![180]);
            }
            other => panic!("unexpected warning: {:?}", other),
        }
    }

    #[test]
    fn pairs_in_accumulation_order() {
        let out = run(&[
            "List of Players",
            "Italy",
            "01.01.1980",
            "02.02.1985",
            "170",
            "190",
            "List of Players",
        ]);
        let got: Vec<_> = out
            .records
            .iter()
            .map(|r| (r.date_text().to_string(), r.height_cm()))
            .collect();
        assert_eq!(
            got,
            vec![("01.01.1980".to_string(), 170), ("02.02.1985".to_string(), 190)]
        );
    }

    #[test]
    fn country_is_first_non_blank_after_header() {
        let out = run(&["List of Players", "", "   ", "  Korea Republic  ", "10.10.1988", "176", "List of Players"]);
        assert_eq!(out.records[0].country(), "Korea Republic");
    }

    #[test]
    fn lines_before_first_header_ignored() {
        let out = run(&["15.07.1981", "182", "List of Players", "Spain", "List of Players"]);
        assert!(out.records.is_empty());
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn noise_and_out_of_window_numbers_ignored() {
        let out = run(&[
            "List of Players",
            "Japan",
            "1",
            "GK",
            "KAWASHIMA Eiji",
            "20 Mar 83",
            "23",
            "185",
            "210",
            "List of Players",
        ]);
        assert_eq!(out.records.len(), 1);
        assert_eq!(out.records[0].height_cm(), 185);
        assert_eq!(out.records[0].date_text(), "20 Mar 83");
        assert_eq!(out.records[0].date_of_birth().year(), 1983);
    }

    #[test]
    fn bad_month_drops_section() {
        let out = run(&[
            "List of Players",
            "Togo",
            "20 Foo 83",
            "185",
            "List of Players",
            "Iran",
            "11.11.1991",
            "181",
            "List of Players",
        ]);
        assert_eq!(out.records.len(), 1);
        assert_eq!(out.records[0].country(), "Iran");
        assert!(matches!(
            &out.warnings[0],
            IntegrityWarning::RejectedFields { country, .. } if country == "Togo"
        ));
    }

    #[test]
    fn off_calendar_date_drops_only_that_record() {
        let out = run(&[
            "List of Players",
            "Serbia",
            "31.04.1990",
            "01.05.1990",
            "188",
            "190",
            "List of Players",
        ]);
        assert_eq!(out.records.len(), 1);
        assert_eq!(out.records[0].date_text(), "01.05.1990");
        assert!(matches!(
            &out.warnings[0],
            IntegrityWarning::RejectedRecord { date, .. } if date == "31.04.1990"
        ));
    }

    #[test]
    fn state_transitions() {
        let mut x = LineExtractor::new(2010);
        assert_eq!(x.state(), State::AwaitingHeader);
        x.feed("List of Players");
        assert_eq!(x.state(), State::HeaderSeen);
        x.feed("");
        assert_eq!(x.state(), State::HeaderSeen);
        x.feed("Spain");
        assert_eq!(x.state(), State::CollectingFields);
        x.feed("List of Players");
        assert_eq!(x.state(), State::HeaderSeen);
    }

    #[test]
    fn fixture_2010() {
        let text = std::fs::read_to_string("tests/fixtures/2010_roster.txt").unwrap();
        let out = extract_lines(2010, &text);
        let countries: Vec<&str> = out.records.iter().map(|r| r.country()).collect();
        assert_eq!(countries, vec!["Algeria", "Algeria", "Algeria", "Argentina", "Argentina"]);
        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.warnings[0].country(), "Australia");
        assert_eq!(out.unterminated.as_deref(), Some("Brazil"));
        assert!(out.records.iter().all(|r| r.weight_kg().is_none()));
    }
}
