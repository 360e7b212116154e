//! Downstream byte-sink abstraction.
//!
//! The normalizer never changes encoding: it writes bytes in the same
//! format it reads. `ByteSink` is the capability the normalizer's output
//! side needs from its downstream collaborator (a buffered file, a pipe
//! to an external encoder process, or in tests an in-memory buffer). The
//! normalizer owns its sink exclusively for its lifetime; nothing else
//! writes to it concurrently.

use crate::error::Result;

/// A downstream consumer of encoded PCM bytes.
pub trait ByteSink {
    /// Writes `bytes` downstream.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::unavailable`] (or a conversion of
    /// one) if the downstream write fails.
    fn write(&mut self, bytes: &[u8]) -> Result<()>;

    /// Flushes any buffered bytes downstream without closing it.
    fn flush(&mut self) -> Result<()>;

    /// Closes the sink. Implementations should treat this as implying a
    /// flush.
    fn close(&mut self) -> Result<()>;
}

/// An in-memory [`ByteSink`], useful for tests and for collecting output
/// that will be written to disk afterward.
#[derive(Debug, Default, Clone)]
pub struct BufferSink {
    buf: Vec<u8>,
    closed: bool,
}

impl BufferSink {
    /// Creates an empty buffer sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes written so far.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.buf
    }

    /// `true` once [`ByteSink::close`] has been called.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.closed
    }
}

impl ByteSink for BufferSink {
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        self.buf.extend_from_slice(bytes);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.closed = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_sink_accumulates_and_closes() {
        let mut sink = BufferSink::new();
        sink.write(&[1, 2, 3]).unwrap();
        sink.write(&[4]).unwrap();
        assert_eq!(sink.bytes(), &[1, 2, 3, 4]);
        assert!(!sink.is_closed());
        sink.close().unwrap();
        assert!(sink.is_closed());
    }
}
