//! Thin wrapper around the external PDF-to-text program (`pdftotext` by default).

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, warn};

use crate::error::ExtractError;

const PAGE_BREAK: char = '\x0c';

#[derive(Debug, Clone)]
pub struct Converter {
    program: String,
}

impl Converter {
    pub fn new(program: impl Into<String>) -> Self {
        Converter {
            program: program.into(),
        }
    }

    /// Same base name, `.txt` suffix.
    pub fn text_path(pdf: &Path) -> PathBuf {
        pdf.with_extension("txt")
    }

    /// Run `<program> <pdf> <txt>`. Failures are logged only; the caller
    /// finds out by reading `txt`.
    pub fn to_text_file(&self, pdf: &Path, txt: &Path) {
        debug!(program = %self.program, pdf = %pdf.display(), "converting to text file");
        match Command::new(&self.program).arg(pdf).arg(txt).status() {
            Ok(status) if status.success() => {}
            Ok(status) => warn!(program = %self.program, pdf = %pdf.display(), %status, "converter exited with failure"),
            Err(e) => warn!(program = %self.program, pdf = %pdf.display(), error = %e, "converter could not be started"),
        }
    }

    /// Run `<program> <pdf> -` and split stdout into pages on form feeds.
    pub fn page_texts(&self, pdf: &Path) -> Result<Vec<String>, ExtractError> {
        let output = Command::new(&self.program)
            .arg(pdf)
            .arg("-")
            .output()
            .map_err(|e| ExtractError::Conversion {
                path: pdf.to_path_buf(),
                reason: e.to_string(),
            })?;
        if !output.status.success() {
            return Err(ExtractError::Conversion {
                path: pdf.to_path_buf(),
                reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        let text = String::from_utf8_lossy(&output.stdout);
        Ok(split_pages(&text))
    }
}

/// Split on form feeds, dropping pages with no visible text.
pub fn split_pages(text: &str) -> Vec<String> {
    text.split(PAGE_BREAK)
        .filter(|p| !p.trim().is_empty())
        .map(str::to_string)
        .collect()
}
