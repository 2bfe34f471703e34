//! Streaming code page to UTF-8 decoding.

use std::io::{self, Read};

use encoding_rs::{CoderResult, Decoder, SHIFT_JIS, UTF_8};
use strc_model::CodePage;

const CHUNK: usize = 8 * 1024;

/// A [`Read`] adapter that yields UTF-8 decoded from `code_page`.
///
/// A leading UTF-8 BOM is stripped. Malformed byte sequences decode to
/// U+FFFD rather than failing the read.
pub struct DecodingReader<R> {
    inner: R,
    decoder: Decoder,
    input: Vec<u8>,
    input_pos: usize,
    input_len: usize,
    output: Vec<u8>,
    output_pos: usize,
    output_len: usize,
    eof: bool,
    finished: bool,
}

impl<R: Read> DecodingReader<R> {
    pub fn new(inner: R, code_page: CodePage) -> Self {
        let decoder = match code_page {
            CodePage::Utf8 => UTF_8.new_decoder_with_bom_removal(),
            CodePage::Cp932 => SHIFT_JIS.new_decoder_without_bom_handling(),
        };
        let output_capacity = decoder
            .max_utf8_buffer_length(CHUNK)
            .unwrap_or(CHUNK * 3 + 16);
        Self {
            inner,
            decoder,
            input: vec![0; CHUNK],
            input_pos: 0,
            input_len: 0,
            output: vec![0; output_capacity],
            output_pos: 0,
            output_len: 0,
            eof: false,
            finished: false,
        }
    }

    /// Decodes the next chunk into the output buffer.
    fn fill(&mut self) -> io::Result<()> {
        if self.input_pos == self.input_len && !self.eof {
            let read = loop {
                match self.inner.read(&mut self.input) {
                    Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                    result => break result?,
                }
            };
            self.input_pos = 0;
            self.input_len = read;
            self.eof = read == 0;
        }
        let (result, read, written, _) = self.decoder.decode_to_utf8(
            &self.input[self.input_pos..self.input_len],
            &mut self.output,
            self.eof,
        );
        self.input_pos += read;
        self.output_pos = 0;
        self.output_len = written;
        if self.eof && result == CoderResult::InputEmpty {
            self.finished = true;
        }
        Ok(())
    }
}

impl<R: Read> Read for DecodingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        loop {
            if self.output_pos < self.output_len {
                let available = &self.output[self.output_pos..self.output_len];
                let count = available.len().min(buf.len());
                buf[..count].copy_from_slice(&available[..count]);
                self.output_pos += count;
                return Ok(count);
            }
            if self.finished {
                return Ok(0);
            }
            self.fill()?;
        }
    }
}
