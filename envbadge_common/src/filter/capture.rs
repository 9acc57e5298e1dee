use core::fmt;

use axum::body::{to_bytes, Body, Bytes};
use encoding_rs::{Encoding, UTF_8};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("Failed to read the downstream response body: {0}")]
    Read(#[source] axum::Error),
    #[error("The downstream response body is not valid UTF-8 text")]
    NotText(#[from] std::str::Utf8Error),
    #[error("The downstream response body is not valid {0} text")]
    Undecodable(&'static str),
}

/// In-memory sink for the text of a downstream response.
///
/// Only character data can be captured. There is no way to write raw bytes, so binary payloads
/// have to be kept away from the shim instead of being lossily decoded into it.
#[derive(Debug, Default)]
pub struct CaptureShim {
    buffer: String,
}

impl CaptureShim {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain `body` into a fresh shim. Fails if the body exceeds `limit` bytes or is not text in
    /// `encoding`.
    pub async fn capture(
        body: Body,
        limit: usize,
        encoding: &'static Encoding,
    ) -> Result<Self, CaptureError> {
        let bytes = Self::read(body, limit).await?;
        Self::decode(&bytes, encoding)
    }

    pub async fn read(body: Body, limit: usize) -> Result<Bytes, CaptureError> {
        to_bytes(body, limit).await.map_err(CaptureError::Read)
    }

    /// Decoding never substitutes replacement characters, malformed input is an error.
    pub fn decode(bytes: &[u8], encoding: &'static Encoding) -> Result<Self, CaptureError> {
        let mut shim = Self::new();

        if encoding == UTF_8 {
            shim.writer().write(std::str::from_utf8(bytes)?);
        } else {
            let text = encoding
                .decode_without_bom_handling_and_without_replacement(bytes)
                .ok_or(CaptureError::Undecodable(encoding.name()))?;
            shim.writer().write(&text);
        }

        Ok(shim)
    }

    /// Every writer appends to the same buffer, in the order the writes happen.
    pub fn writer(&mut self) -> CaptureWriter<'_> {
        CaptureWriter {
            buffer: &mut self.buffer,
        }
    }

    pub fn captured_output(&self) -> &str {
        &self.buffer
    }

    pub fn into_output(self) -> String {
        self.buffer
    }
}

pub struct CaptureWriter<'a> {
    buffer: &'a mut String,
}

impl CaptureWriter<'_> {
    pub fn write(&mut self, text: &str) {
        self.buffer.push_str(text);
    }
}

impl fmt::Write for CaptureWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write(s);
        Ok(())
    }
}
