//! Streaming UTF-8 to code page encoding.

use std::io::{self, Write};

use encoding_rs::{Encoder, EncoderResult, SHIFT_JIS};
use strc_model::CodePage;

use crate::error::OutputError;

/// A [`Write`] adapter that accepts UTF-8 and writes `code_page` bytes.
///
/// UTF-8 output passes through untouched. For CP932, writes may split a
/// UTF-8 sequence; the incomplete tail is held until the next write. A
/// character CP932 cannot represent fails the write with
/// [`io::ErrorKind::InvalidData`] wrapping [`OutputError::Unmappable`].
pub struct EncodingWriter<W: Write> {
    inner: W,
    encoder: Option<Encoder>,
    code_page: CodePage,
    pending: Vec<u8>,
    encoded: Vec<u8>,
}

impl<W: Write> EncodingWriter<W> {
    pub fn new(inner: W, code_page: CodePage) -> Self {
        let encoder = match code_page {
            CodePage::Utf8 => None,
            CodePage::Cp932 => Some(SHIFT_JIS.new_encoder()),
        };
        Self {
            inner,
            encoder,
            code_page,
            pending: Vec::new(),
            encoded: Vec::new(),
        }
    }

    /// Flushes and returns the sink, failing if a UTF-8 sequence was left
    /// incomplete.
    pub fn finish(mut self) -> io::Result<W> {
        if !self.pending.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                OutputError::IncompleteUtf8,
            ));
        }
        self.inner.flush()?;
        Ok(self.inner)
    }

    fn encode(&mut self, text: &str) -> io::Result<()> {
        let Some(encoder) = self.encoder.as_mut() else {
            return self.inner.write_all(text.as_bytes());
        };
        self.encoded.clear();
        let mut rest = text;
        loop {
            let needed = encoder
                .max_buffer_length_from_utf8_without_replacement(rest.len())
                .unwrap_or(rest.len() * 2 + 16);
            self.encoded.reserve(needed);
            let (result, read) =
                encoder.encode_from_utf8_to_vec_without_replacement(rest, &mut self.encoded, false);
            rest = &rest[read..];
            match result {
                EncoderResult::InputEmpty => break,
                EncoderResult::OutputFull => {}
                EncoderResult::Unmappable(ch) => {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidData,
                        OutputError::Unmappable {
                            ch,
                            code_page: self.code_page.as_str(),
                        },
                    ));
                }
            }
        }
        self.inner.write_all(&self.encoded)
    }
}

impl<W: Write> Write for EncodingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.encoder.is_none() {
            return self.inner.write(buf);
        }
        self.pending.extend_from_slice(buf);
        let valid = match std::str::from_utf8(&self.pending) {
            Ok(text) => text.len(),
            Err(err) if err.error_len().is_none() => err.valid_up_to(),
            Err(err) => return Err(io::Error::new(io::ErrorKind::InvalidData, err)),
        };
        let pending = std::mem::take(&mut self.pending);
        let (complete, tail) = pending.split_at(valid);
        // `complete` was validated above
        let text = std::str::from_utf8(complete)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
        let result = self.encode(text);
        self.pending = tail.to_vec();
        result.map(|()| buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_passes_through() {
        let mut writer = EncodingWriter::new(Vec::new(), CodePage::Utf8);
        writer.write_all("名前,ｱ\r\n".as_bytes()).unwrap();
        assert_eq!(writer.finish().unwrap(), "名前,ｱ\r\n".as_bytes());
    }

    #[test]
    fn encodes_cp932() {
        let mut writer = EncodingWriter::new(Vec::new(), CodePage::Cp932);
        writer.write_all("日本語,ｱ".as_bytes()).unwrap();
        assert_eq!(writer.finish().unwrap(), b"\x93\xFA\x96\x7B\x8C\xEA,\xB1");
    }

    #[test]
    fn split_sequences_are_joined() {
        let bytes = "日本".as_bytes();
        let mut writer = EncodingWriter::new(Vec::new(), CodePage::Cp932);
        for byte in bytes {
            writer.write_all(std::slice::from_ref(byte)).unwrap();
        }
        assert_eq!(writer.finish().unwrap(), b"\x93\xFA\x96\x7B");
    }

    #[test]
    fn unmappable_character_fails() {
        let mut writer = EncodingWriter::new(Vec::new(), CodePage::Cp932);
        let err = writer.write_all("ok😀".as_bytes()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert!(err.to_string().contains("cp932"), "{err}");
    }

    #[test]
    fn incomplete_tail_fails_on_finish() {
        let mut writer = EncodingWriter::new(Vec::new(), CodePage::Cp932);
        writer.write_all(&"日".as_bytes()[..2]).unwrap();
        assert!(writer.finish().is_err());
    }
}
