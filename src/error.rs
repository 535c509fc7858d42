use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("input file must be in PDF format: {0}")]
    UnsupportedFormat(String),

    #[error("unrecognized month abbreviation: {0:?}")]
    UnrecognizedMonth(String),

    #[error("date out of range: day {day}, month {month}")]
    DateOutOfRange { day: u32, month: u32 },

    #[error("file name does not start with a tournament year: {0}")]
    MissingYear(String),

    #[error("text conversion failed for {}: {}", .path.display(), .reason)]
    Conversion { path: PathBuf, reason: String },

    #[error("failed to access {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl ExtractError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ExtractError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Recoverable data problems. A warning drops a section or a record, never the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrityWarning {
    CountMismatch {
        country: String,
        dates: Vec<String>,
        heights: Vec<u32>,
    },
    RejectedFields {
        country: String,
        errors: Vec<String>,
    },
    RejectedRecord {
        country: String,
        date: String,
        reason: String,
    },
}

impl IntegrityWarning {
    pub fn country(&self) -> &str {
        match self {
            IntegrityWarning::CountMismatch { country, .. }
            | IntegrityWarning::RejectedFields { country, .. }
            | IntegrityWarning::RejectedRecord { country, .. } => country,
        }
    }
}

impl fmt::Display for IntegrityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrityWarning::CountMismatch {
                country,
                dates,
                heights,
            } => write!(
                f,
                "Problem with the country of: {} ({} dates {:?}, {} heights {:?})",
                country,
                dates.len(),
                dates,
                heights.len(),
                heights
            ),
            IntegrityWarning::RejectedFields { country, errors } => write!(
                f,
                "Dropped section for {}: {}",
                country,
                errors.join("; ")
            ),
            IntegrityWarning::RejectedRecord {
                country,
                date,
                reason,
            } => write!(f, "Dropped record {} for {}: {}", date, country, reason),
        }
    }
}
