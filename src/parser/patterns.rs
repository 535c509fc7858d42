use std::sync::LazyLock;

use regex::Regex;

/// Line that opens a new country's roster in the line-sequential layout.
pub const SECTION_HEADER: &str = "List of Players";
/// Last column title on paginated roster pages; player rows follow it.
pub const COLUMN_KEYWORD: &str = "Height Weight";

pub const MIN_HEIGHT_CM: u32 = 156;
pub const MAX_HEIGHT_CM: u32 = 209;

static NUMERIC_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{2})\.(\d{2})\.(\d{4})").unwrap());
static WORD_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{2})\s+([A-Za-z]{3})\s+(\d{4}|\d{2})\b").unwrap());
static HEIGHT_WEIGHT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{3})\s(\d{2,3})\s").unwrap());
static COUNTRY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\D+").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateShape {
    /// `15.07.1981`
    Numeric,
    /// `15 Jul 1981` or `15 Jul 81`
    Word,
}

/// A date-shaped token. `start`/`end` are byte offsets into the searched text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateToken<'t> {
    pub shape: DateShape,
    pub text: &'t str,
    pub day: &'t str,
    pub month: &'t str,
    pub year: &'t str,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeightWeight<'t> {
    pub text: &'t str,
    pub height_cm: u32,
    pub weight_kg: u32,
    pub start: usize,
    pub end: usize,
}

pub fn numeric_date(text: &str) -> Option<DateToken<'_>> {
    date_token(&NUMERIC_DATE_RE, DateShape::Numeric, text)
}

pub fn word_date(text: &str) -> Option<DateToken<'_>> {
    date_token(&WORD_DATE_RE, DateShape::Word, text)
}

/// Numeric shape wins when a line carries both.
pub fn any_date(text: &str) -> Option<DateToken<'_>> {
    numeric_date(text).or_else(|| word_date(text))
}

fn date_token<'t>(re: &Regex, shape: DateShape, text: &'t str) -> Option<DateToken<'t>> {
    let caps = re.captures(text)?;
    let whole = caps.get(0)?;
    Some(DateToken {
        shape,
        text: whole.as_str(),
        day: caps.get(1)?.as_str(),
        month: caps.get(2)?.as_str(),
        year: caps.get(3)?.as_str(),
        start: whole.start(),
        end: whole.end(),
    })
}

pub fn height_weight(text: &str) -> Option<HeightWeight<'_>> {
    let caps = HEIGHT_WEIGHT_RE.captures(text)?;
    let whole = caps.get(0)?;
    Some(HeightWeight {
        text: whole.as_str().trim(),
        height_cm: caps.get(1)?.as_str().parse().ok()?,
        weight_kg: caps.get(2)?.as_str().parse().ok()?,
        start: whole.start(),
        end: whole.end(),
    })
}

/// A line that is nothing but an integer inside the height window.
/// Anything outside it is treated as a shirt number or page noise.
pub fn plausible_height(line: &str) -> Option<u32> {
    let line = line.trim();
    if line.is_empty() || !line.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value: u32 = line.parse().ok()?;
    (MIN_HEIGHT_CM..=MAX_HEIGHT_CM)
        .contains(&value)
        .then_some(value)
}

pub fn is_section_header(line: &str) -> bool {
    line.trim() == SECTION_HEADER
}

/// Offset just past the first column-header keyword.
pub fn column_header_end(page: &str) -> Option<usize> {
    page.find(COLUMN_KEYWORD).map(|i| i + COLUMN_KEYWORD.len())
}

/// Leading run of non-digits, trimmed. Returns the name and the offset where the run ends.
pub fn country_name(rows: &str) -> Option<(&str, usize)> {
    let m = COUNTRY_RE.find(rows)?;
    let name = m.as_str().trim();
    if name.is_empty() {
        None
    } else {
        Some((name, m.end()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_date_inside_line() {
        let t = numeric_date("3 GK MARTINEZ 15.07.1981 Club").unwrap();
        assert_eq!(t.shape, DateShape::Numeric);
        assert_eq!(t.text, "15.07.1981");
        assert_eq!((t.day, t.month, t.year), ("15", "07", "1981"));
        assert_eq!(&"3 GK MARTINEZ 15.07.1981 Club"[t.start..t.end], "15.07.1981");
    }

    #[test]
    fn word_date_two_and_four_digit_years() {
        let t = word_date("15 Jul 81").unwrap();
        assert_eq!((t.day, t.month, t.year), ("15", "Jul", "81"));
        let t = word_date("born 02  Feb   1974 in Rome").unwrap();
        assert_eq!((t.day, t.month, t.year), ("02", "Feb", "1974"));
        assert_eq!(t.text, "02  Feb   1974");
    }

    #[test]
    fn word_date_rejects_partial_years() {
        assert!(word_date("15 Jul 198").is_none());
        assert!(word_date("15 July 1981").is_none());
    }

    #[test]
    fn any_date_prefers_numeric() {
        let t = any_date("15 Jul 81 / 16.07.1981").unwrap();
        assert_eq!(t.shape, DateShape::Numeric);
        assert_eq!(t.text, "16.07.1981");
        assert!(any_date("no date here 1981").is_none());
    }

    #[test]
    fn height_weight_pair() {
        let hw = height_weight("Real Madrid CF 182 75 4 DF").unwrap();
        assert_eq!(hw.text, "182 75");
        assert_eq!((hw.height_cm, hw.weight_kg), (182, 75));
        let hw = height_weight("x 195 102 y").unwrap();
        assert_eq!((hw.height_cm, hw.weight_kg), (195, 102));
        assert!(height_weight("182 75").is_none());
    }

    #[test]
    fn height_window_is_inclusive() {
        assert_eq!(plausible_height("156"), Some(156));
        assert_eq!(plausible_height(" 209 "), Some(209));
        assert_eq!(plausible_height("155"), None);
        assert_eq!(plausible_height("210"), None);
        assert_eq!(plausible_height("18"), None);
        assert_eq!(plausible_height("182cm"), None);
        assert_eq!(plausible_height(""), None);
        assert_eq!(plausible_height("99999999999999999999"), None);
    }

    #[test]
    fn section_header_is_exact() {
        assert!(is_section_header("List of Players"));
        assert!(is_section_header("  List of Players  "));
        assert!(!is_section_header("List of Players (cont.)"));
        assert!(!is_section_header("list of players"));
    }

    #[test]
    fn country_is_leading_non_digit_run() {
        let rows = " Argentina 1 GK ARMANI";
        let (name, end) = country_name(rows).unwrap();
        assert_eq!(name, "Argentina");
        assert_eq!(&rows[end..end + 1], "1");
        assert!(country_name("12 GK").is_none());
        assert!(country_name("   ").is_none());
    }

    #[test]
    fn column_keyword_offset() {
        let page = "Name Birth Date Club Height Weight Brazil 1 GK";
        let end = column_header_end(page).unwrap();
        assert_eq!(&page[end..], " Brazil 1 GK");
        assert!(column_header_end("no header").is_none());
    }
}
