//! Output codec for strcleaner.
//!
//! The CSV writer produces UTF-8; an [`EncodingWriter`] re-encodes it into
//! the configured code page on its way to the sink. The UTF-8 byte-order mark
//! is written directly to the sink before any record.

mod encode;
mod error;
mod writer;

pub use encode::EncodingWriter;
pub use error::{OutputError, Result};
pub use writer::{UTF8_BOM, csv_writer, open_output, open_sink};
