//! Player roster extraction from World Cup squad-list PDFs.
//!
//! The documents are converted to text by an external program, scanned for
//! country sections and player fields, and written out as CSV rows with a
//! derived age and zodiac sign.

pub mod convert;
pub mod error;
pub mod parser;
pub mod record;
pub mod settings;
pub mod sink;
pub mod summary;
