//! Streaming-safe WAV/RIFF header writer.
//!
//! File I/O is out of scope for this crate, but a caller streaming
//! normalized bytes to an unseekable sink (a pipe, a socket) still needs
//! a well-formed header it can write up front, before the final byte
//! count is known. This module produces exactly that: a 44-byte
//! canonical PCM header with the RIFF and `data` chunk sizes set to the
//! conventional "streaming" sentinels rather than a computed length.
//!
//! The sentinels (`0x80000024` for the RIFF chunk, `0x80000000` for the
//! `data` chunk) are a long-standing convention for PCM streams whose
//! total length isn't known in advance; many decoders accept them in
//! place of an exact byte count. Reproducing them bit-for-bit, rather
//! than writing zero or the exact size, is the point of this module.

use crate::{error::Result, format::SampleFormat, sink::ByteSink};

const RIFF_STREAMING_SIZE: u32 = 0x8000_0024;
const DATA_STREAMING_SIZE: u32 = 0x8000_0000;
const FMT_CHUNK_SIZE: u32 = 16;
const PCM_FORMAT_TAG: u16 = 1;

/// Writes a 44-byte canonical `RIFF`/`WAVE`/`fmt `/`data` header for a
/// PCM stream of unknown final length, using the streaming-size
/// sentinels in place of real chunk sizes.
///
/// `format` determines `bits_per_sample`; `channels` and `sample_rate`
/// are written verbatim into the `fmt ` chunk.
#[must_use]
pub fn streaming_header(format: SampleFormat, channels: u16, sample_rate: u32) -> Vec<u8> {
    let bits_per_sample = (format.bytes_per_sample() * 8) as u16;
    let block_align = channels * (bits_per_sample / 8);
    let byte_rate = sample_rate * u32::from(block_align);

    let mut header = Vec::with_capacity(44);
    header.extend_from_slice(b"RIFF");
    header.extend_from_slice(&RIFF_STREAMING_SIZE.to_le_bytes());
    header.extend_from_slice(b"WAVE");

    header.extend_from_slice(b"fmt ");
    header.extend_from_slice(&FMT_CHUNK_SIZE.to_le_bytes());
    header.extend_from_slice(&PCM_FORMAT_TAG.to_le_bytes());
    header.extend_from_slice(&channels.to_le_bytes());
    header.extend_from_slice(&sample_rate.to_le_bytes());
    header.extend_from_slice(&byte_rate.to_le_bytes());
    header.extend_from_slice(&block_align.to_le_bytes());
    header.extend_from_slice(&bits_per_sample.to_le_bytes());

    header.extend_from_slice(b"data");
    header.extend_from_slice(&DATA_STREAMING_SIZE.to_le_bytes());

    debug_assert_eq!(header.len(), 44);
    header
}

/// A [`ByteSink`] that writes the streaming WAV header once, up front,
/// then forwards every subsequent normalized byte straight through to an
/// inner `std::io::Write`.
///
/// Because the header carries the streaming-size sentinels rather than a
/// computed length, nothing needs to seek back and patch the header once
/// the final byte count is known: `close` is a plain flush-then-drop, the
/// same as any other terminal collaborator in this crate's pipeline.
pub struct WavWriter<W> {
    inner: W,
    header_written: bool,
    format: SampleFormat,
    channels: u16,
    sample_rate: u32,
}

impl<W: std::io::Write> WavWriter<W> {
    /// Wraps `inner`, deferring the header write to the first call to
    /// [`ByteSink::write`].
    pub const fn new(inner: W, format: SampleFormat, channels: u16, sample_rate: u32) -> Self {
        Self {
            inner,
            header_written: false,
            format,
            channels,
            sample_rate,
        }
    }

    /// Consumes the writer, returning the wrapped `inner` value.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: std::io::Write> ByteSink for WavWriter<W> {
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        if !self.header_written {
            let header = streaming_header(self.format, self.channels, self.sample_rate);
            self.inner.write_all(&header)?;
            self.header_written = true;
        }
        self.inner.write_all(bytes)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }
}
