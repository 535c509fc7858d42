//! Read an output CSV back and aggregate it: players per year, per zodiac sign, mean age and size.

use std::collections::BTreeMap;
use std::io;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use serde::Serialize;
use tracing::debug;

use crate::error::ExtractError;
use crate::parser::zodiac::ZodiacSign;

#[derive(Debug, Default, Serialize)]
pub struct Summary {
    pub players: usize,
    pub skipped_rows: usize,
    pub by_year: BTreeMap<i32, usize>,
    pub by_sign: BTreeMap<ZodiacSign, usize>,
    pub mean_age: Option<f64>,
    pub mean_height_cm: Option<f64>,
    pub mean_weight_kg: Option<f64>,
}

struct Row {
    year: i32,
    height_cm: u32,
    age: i32,
    sign: ZodiacSign,
    weight_kg: Option<u32>,
}

fn parse_row(rec: &StringRecord) -> Option<Row> {
    let weight_kg = match rec.get(6) {
        Some(w) if !w.trim().is_empty() => Some(w.trim().parse().ok()?),
        _ => None,
    };
    Some(Row {
        year: rec.get(0)?.trim().parse().ok()?,
        height_cm: rec.get(3)?.trim().parse().ok()?,
        age: rec.get(4)?.trim().parse().ok()?,
        sign: ZodiacSign::from_name(rec.get(5)?.trim())?,
        weight_kg,
    })
}

fn mean(sum: f64, n: usize) -> Option<f64> {
    (n > 0).then(|| sum / n as f64)
}

pub fn summarize_reader<R: io::Read>(reader: R) -> Result<Summary, ExtractError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut summary = Summary::default();
    let (mut age_sum, mut height_sum, mut weight_sum, mut weighed) = (0i64, 0u64, 0u64, 0usize);

    for result in rdr.records() {
        let rec = result?;
        let Some(row) = parse_row(&rec) else {
            debug!(row = ?rec, "unparseable row skipped");
            summary.skipped_rows += 1;
            continue;
        };
        summary.players += 1;
        *summary.by_year.entry(row.year).or_default() += 1;
        *summary.by_sign.entry(row.sign).or_default() += 1;
        age_sum += i64::from(row.age);
        height_sum += u64::from(row.height_cm);
        if let Some(w) = row.weight_kg {
            weight_sum += u64::from(w);
            weighed += 1;
        }
    }

    summary.mean_age = mean(age_sum as f64, summary.players);
    summary.mean_height_cm = mean(height_sum as f64, summary.players);
    summary.mean_weight_kg = mean(weight_sum as f64, weighed);
    Ok(summary)
}

pub fn summarize(path: &Path) -> Result<Summary, ExtractError> {
    let file = std::fs::File::open(path).map_err(|e| ExtractError::io(path, e))?;
    summarize_reader(file)
}

fn fmt_mean(v: Option<f64>) -> String {
    v.map(|x| format!("{:.1}", x)).unwrap_or_else(|| "-".into())
}

pub fn print_table(summary: &Summary) {
    println!("Players:      {}", summary.players);
    if summary.skipped_rows > 0 {
        println!("Skipped rows: {}", summary.skipped_rows);
    }
    println!("Mean age:     {}", fmt_mean(summary.mean_age));
    println!("Mean height:  {}", fmt_mean(summary.mean_height_cm));
    println!("Mean weight:  {}", fmt_mean(summary.mean_weight_kg));

    println!("\n{:>6} | {:>7}", "Year", "Players");
    println!("{}", "-".repeat(16));
    for (year, n) in &summary.by_year {
        println!("{:>6} | {:>7}", year, n);
    }

    println!("\n{:<12} | {:>7} | {:>6}", "Sign", "Players", "Share");
    println!("{}", "-".repeat(31));
    for sign in ZodiacSign::ALL {
        let n = summary.by_sign.get(&sign).copied().unwrap_or(0);
        let share = if summary.players > 0 {
            100.0 * n as f64 / summary.players as f64
        } else {
            0.0
        };
        println!("{:<12} | {:>7} | {:>5.1}%", sign.name(), n, share);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
2014,Brazil,15.07.1981,182,33,Cancer
2014,France,20.03.1990,178,24,Aries
2018,Peru,20.03.1990,180,28,Aries,77
not,a,valid,row
";

    #[test]
    fn counts_and_means() {
        let s = summarize_reader(CSV.as_bytes()).unwrap();
        assert_eq!(s.players, 3);
        assert_eq!(s.skipped_rows, 1);
        assert_eq!(s.by_year.get(&2014), Some(&2));
        assert_eq!(s.by_year.get(&2018), Some(&1));
        assert_eq!(s.by_sign.get(&ZodiacSign::Aries), Some(&2));
        assert_eq!(s.by_sign.get(&ZodiacSign::Cancer), Some(&1));
        assert!((s.mean_age.unwrap() - 85.0 / 3.0).abs() < 1e-9);
        assert!((s.mean_height_cm.unwrap() - 180.0).abs() < 1e-9);
        assert_eq!(s.mean_weight_kg, Some(77.0));
    }

    #[test]
    fn empty_input() {
        let s = summarize_reader("".as_bytes()).unwrap();
        assert_eq!(s.players, 0);
        assert!(s.mean_age.is_none());
        assert!(s.by_sign.is_empty());
    }

    #[test]
    fn json_uses_sign_names() {
        let s = summarize_reader(CSV.as_bytes()).unwrap();
        let v = serde_json::to_value(&s).unwrap();
        assert_eq!(v["by_sign"]["Aries"], 2);
        assert_eq!(v["players"], 3);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = summarize(Path::new("no/such/players.csv")).unwrap_err();
        assert!(matches!(err, ExtractError::Io { .. }));
    }
}
