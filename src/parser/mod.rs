pub mod dates;
pub mod layout;
pub mod lines;
pub mod pages;
pub mod patterns;
pub mod zodiac;

use std::path::Path;

use tracing::{debug, info};

use crate::convert::Converter;
use crate::error::{ExtractError, IntegrityWarning};
use crate::record::PlayerRecord;
use crate::settings::Settings;
use layout::DocumentLayout;

#[derive(Debug, Default)]
pub struct Extraction {
    pub records: Vec<PlayerRecord>,
    pub warnings: Vec<IntegrityWarning>,
    /// Country of a trailing section dropped because no header closed it.
    pub unterminated: Option<String>,
}

/// Leading four digits of the file name, e.g. `2014_WC.pdf` -> 2014.
pub fn tournament_year(path: &Path) -> Result<i32, ExtractError> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let year = name
        .get(..4)
        .filter(|y| y.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|y| y.parse().ok());
    year.ok_or(ExtractError::MissingYear(name))
}

/// Dispatch on layout, obtain the text and run the matching extractor.
/// Returns before touching the converter if the suffix or year is wrong.
pub fn extract_document(
    path: &Path,
    settings: &Settings,
    converter: &Converter,
) -> Result<(DocumentLayout, Extraction), ExtractError> {
    let identifier = path.to_string_lossy();
    let layout = layout::select(&identifier, &settings.paginated_marker)?;
    let year = tournament_year(path)?;
    info!(path = %identifier, %layout, year, "extracting");

    let extraction = match layout {
        DocumentLayout::PaginatedKeyworded => {
            let texts = converter.page_texts(path)?;
            debug!(pages = texts.len(), "pages captured");
            pages::extract_pages(year, &texts)
        }
        DocumentLayout::LineSequential => {
            let txt = Converter::text_path(path);
            if settings.reuse_text && txt.exists() {
                debug!(txt = %txt.display(), "reusing existing text rendition");
            } else {
                converter.to_text_file(path, &txt);
            }
            let text = std::fs::read_to_string(&txt).map_err(|e| ExtractError::io(&txt, e))?;
            lines::extract_lines(year, &text)
        }
    };

    Ok((layout, extraction))
}
