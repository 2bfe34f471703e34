//! Opening the input file and building the CSV reader.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use strc_model::CodePage;
use tracing::debug;

use crate::decode::DecodingReader;
use crate::error::{IngestError, Result};

/// Opens `path` and wraps it in a decoder for `code_page`.
pub fn open_input(path: &Path, code_page: CodePage) -> Result<DecodingReader<File>> {
    let file = File::open(path).map_err(|source| IngestError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), code_page = code_page.as_str(), "opened input");
    Ok(DecodingReader::new(file, code_page))
}

/// Builds a comma-delimited reader over decoded UTF-8.
///
/// Headers are not interpreted here; the first record is returned like any
/// other and the caller decides whether it is a header. Records of any width
/// are accepted, so a header never fixes the field count; width checks
/// against the first data record belong to the caller.
pub fn csv_reader<R: Read>(input: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(true)
        .double_quote(true)
        .from_reader(input)
}
