//! Creating the output sink and the CSV writer on top of it.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use csv::{QuoteStyle, Terminator, WriterBuilder};
use strc_model::{CodePage, LineEnding, OutputSettings};
use tracing::debug;

use crate::encode::EncodingWriter;
use crate::error::{OutputError, Result};

/// The UTF-8 byte-order mark.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Creates `path`, or locks stdout when no path is given.
pub fn open_sink(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path).map_err(|source| OutputError::Create {
                path: path.to_path_buf(),
                source,
            })?;
            debug!(path = %path.display(), "created output");
            Ok(Box::new(BufWriter::new(file)))
        }
        None => {
            debug!("writing output to stdout");
            Ok(Box::new(BufWriter::new(io::stdout().lock())))
        }
    }
}

/// Writes the BOM when the settings ask for one, then wraps `sink` in an
/// encoder for `code_page`. CP932 output never gets a BOM.
pub fn open_output<W: Write>(
    mut sink: W,
    code_page: CodePage,
    settings: &OutputSettings,
) -> Result<EncodingWriter<W>> {
    if code_page.is_utf8() && settings.utf8_bom {
        sink.write_all(UTF8_BOM).map_err(OutputError::Bom)?;
    }
    Ok(EncodingWriter::new(sink, code_page))
}

/// Builds a CSV writer that quotes only when needed and ends records with
/// `line_ending`. Records may differ in length.
pub fn csv_writer<W: Write>(sink: W, line_ending: LineEnding) -> csv::Writer<W> {
    let terminator = match line_ending {
        LineEnding::Crlf => Terminator::CRLF,
        LineEnding::Lf => Terminator::Any(b'\n'),
    };
    WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quote_style(QuoteStyle::Necessary)
        .terminator(terminator)
        .from_writer(sink)
}
