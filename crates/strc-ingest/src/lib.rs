//! Input codec for strcleaner.
//!
//! Bytes from the input file are decoded from the configured code page into
//! UTF-8 by a [`DecodingReader`] before the CSV parser sees them, so the
//! parser and everything downstream only deal with UTF-8.

mod decode;
mod error;
mod reader;

pub use decode::DecodingReader;
pub use error::{IngestError, Result};
pub use reader::{csv_reader, open_input};
