//! The normalizer pipeline: the orchestration that ties the delay line,
//! rolling maxima, gain controllers, and DC-offset estimators together
//! into a single push-style filter.
//!
//! Composition replaces the inheritance chain a filter/monitor/normalizer
//! hierarchy might suggest: a [`SampleSink`] is the capability a
//! collaborator needs to accept decoded samples; [`Normalizer`] is the
//! only implementation of it this crate ships, and it forwards encoded
//! bytes to an inner [`ByteSink`] once the pipeline has processed them.

use crate::{
    config::NormalizerConfig,
    dc_offset::DcOffset,
    error::Result,
    format::Decoder,
    gain::GainController,
    monitor::Monitor,
    rolling_max::RollingMax,
    sink::ByteSink,
    window::RollingWindow,
};

/// A consumer of already-decoded, interleaved PCM samples.
///
/// This is the seam [`Normalizer`] implements; a pure pass-through
/// implementation (one that does no normalization at all) also
/// satisfies it, which is how the codec round-trip check below is framed.
pub trait SampleSink {
    /// Accepts one decoded sample from source channel `channel`.
    fn push(&mut self, channel: usize, sample: i32) -> Result<()>;

    /// Drains any buffered look-ahead and forwards it downstream.
    fn flush(&mut self) -> Result<()>;

    /// Flushes, then closes the sink (and whatever it wraps).
    fn close(&mut self) -> Result<()>;
}

/// The streaming peak normalizer.
///
/// Owns one [`RollingWindow`] shared by all channels, one
/// [`RollingMax`]/[`GainController`] pair per gain track (one track
/// total, or one per channel, depending on
/// [`NormalizerConfig::per_channel`]), one [`DcOffset`] per channel, and
/// a byte [`Decoder`] that turns the incoming stream into samples before
/// they reach the pipeline.
pub struct Normalizer<S: ByteSink> {
    config: NormalizerConfig,
    decoder: Decoder,
    window: RollingWindow,
    rolling_max: Vec<RollingMax>,
    gain: Vec<GainController>,
    dc_offset: Vec<DcOffset>,
    monitor: Monitor,
    channel_cursor: usize,
    dc_offset_enabled: bool,
    sink: S,
}

impl<S: ByteSink> Normalizer<S> {
    /// Builds a normalizer around `sink`, returning it paired with the
    /// receiving end of its monitor channel.
    #[must_use]
    pub fn new(config: NormalizerConfig, sink: S) -> (Self, std::sync::mpsc::Receiver<crate::monitor::Event>) {
        let channels = config.channels() as usize;
        let track_count = config.gain_track_count();
        let n_p = config.per_track_window_len();
        let max_amplitude = config.format().max_amplitude();

        let rolling_max = (0..track_count).map(|_| RollingMax::new(n_p)).collect();
        let gain = (0..track_count)
            .map(|_| GainController::new(config.max_gain(), n_p, max_amplitude))
            .collect();
        let dc_offset = (0..channels)
            .map(|_| DcOffset::new(config.sample_rate()))
            .collect();
        let (monitor, events) = Monitor::new(channels, config.sample_rate(), 256);

        let dc_offset_enabled = config.dc_offset_enabled();
        debug!(
            "normalizer: {channels} channel(s), {track_count} gain track(s), window {n_p} samples/track"
        );

        (
            Self {
                decoder: config.format().decoder(),
                window: RollingWindow::new(config.window_len_samples()),
                rolling_max,
                gain,
                dc_offset,
                monitor,
                channel_cursor: 0,
                dc_offset_enabled,
                config,
                sink,
            },
            events,
        )
    }

    /// The current DC-bias estimate tracked for `channel`.
    #[must_use]
    pub fn dc_offset(&self, channel: usize) -> f64 {
        self.dc_offset[channel].estimate()
    }

    /// The current gain applied to `channel`'s track (or the shared
    /// track, if per-channel normalization is off).
    #[must_use]
    pub fn gain(&self, channel: usize) -> f64 {
        let track = self.gain_track(channel);
        self.gain[track].gain()
    }

    /// Number of samples currently buffered in the delay line.
    #[must_use]
    pub fn window_size(&self) -> usize {
        self.window.size()
    }

    /// A reference to the downstream sink, mainly useful for inspecting
    /// an in-memory sink in tests.
    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Enables or disables DC-offset removal at runtime.
    pub fn set_dc_offset_enabled(&mut self, enabled: bool) {
        self.dc_offset_enabled = enabled;
    }

    /// Resets all pipeline state to its initial, just-constructed values
    /// without reallocating the window or per-track buffers, so the same
    /// `Normalizer` can be reused across a seek or a new track.
    pub fn reset(&mut self) {
        debug!("resetting normalizer state");
        self.decoder = self.config.format().decoder();
        self.window = RollingWindow::new(self.window.capacity());
        for rolling_max in &mut self.rolling_max {
            *rolling_max = RollingMax::new(rolling_max.capacity());
        }
        for gain in &mut self.gain {
            gain.reset();
        }
        for dc in &mut self.dc_offset {
            dc.reset();
        }
        self.monitor.reset();
        self.channel_cursor = 0;
    }

    fn gain_track(&self, channel: usize) -> usize {
        if self.config.per_channel() { channel } else { 0 }
    }

    /// Feeds raw bytes from the source stream into the normalizer.
    ///
    /// Bytes that don't complete a sample are buffered by the codec and
    /// have no other effect; a completed sample runs the full pipeline
    /// of `push`.
    ///
    /// # Errors
    ///
    /// See [`SampleSink::push`].
    pub fn write(&mut self, bytes: &[u8]) -> Result<()> {
        for &byte in bytes {
            if self.decoder.update(byte) {
                let sample = self.decoder.get();
                let channel = self.channel_cursor;
                self.push(channel, sample)?;
                self.channel_cursor = (self.channel_cursor + 1) % self.config.channels() as usize;
            }
        }
        Ok(())
    }

    /// Emits one window-ejected sample through the codec and downstream
    /// sink, after applying `gain` and clamping to the format's range.
    fn emit(&mut self, ejected: i32, gain: f64) -> Result<()> {
        let y = (f64::from(ejected) * gain).round() as i64;
        let clamped = self.config.format().clamp(y);
        if i64::from(clamped) != y {
            warn!("saturation: {y} clamped to {clamped} at gain {gain:.3}");
        }
        let mut bytes = Vec::with_capacity(self.config.format().bytes_per_sample());
        self.config.format().encode(clamped, &mut bytes)?;
        self.sink.write(&bytes)
    }
}

impl<S: ByteSink> SampleSink for Normalizer<S> {
    fn push(&mut self, channel: usize, sample: i32) -> Result<()> {
        let track = self.gain_track(channel);

        let current_max = self.rolling_max[track].get();
        let g = self.gain[track].update(current_max);

        // The estimator always stays warm, even while disabled, so that
        // re-enabling it resumes from a live bias rather than a cold one.
        self.dc_offset[channel].update(sample);
        let adjusted = if self.dc_offset_enabled {
            self.dc_offset[channel].correct(sample)
        } else {
            sample
        };

        let was_full = self.window.is_full();
        let ejected = self.window.add(adjusted);

        if was_full {
            self.emit(ejected, g)?;
        }

        self.rolling_max[track].remove(ejected.abs());
        self.rolling_max[track].add(adjusted.abs())?;

        let amplitude = f64::from(adjusted.abs()) / f64::from(self.config.format().max_amplitude());
        self.monitor.observe(channel, amplitude, g);

        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        let channels = self.config.channels() as usize;
        // The oldest buffered sample was pushed `window.size()` channel
        // slots before the one `channel_cursor` is about to receive;
        // walk forward from there so each drained sample is attributed
        // to the channel (and gain track) it actually came from.
        let mut drain_channel = (self.channel_cursor + channels - self.window.size() % channels) % channels;

        // The window must be fully drained (and its rolling maxima kept in
        // sync) even if a downstream write fails partway through: the
        // first error is remembered and returned only once every buffered
        // sample has been processed, per the short-write-during-close
        // contract.
        let mut first_err = None;
        while !self.window.is_empty() {
            let v = self.window.remove();
            let track = self.gain_track(drain_channel);
            let g = self.gain[track].gain();
            self.rolling_max[track].remove(v.abs());
            if let Err(e) = self.emit(v, g) {
                first_err.get_or_insert(e);
            }
            drain_channel = (drain_channel + 1) % channels;
        }
        if let Some(e) = first_err {
            return Err(e);
        }
        self.sink.flush()
    }

    fn close(&mut self) -> Result<()> {
        debug!("closing normalizer");
        let flush_result = self.flush();
        let close_result = self.sink.close();
        flush_result?;
        close_result
    }
}

/// A [`SampleSink`] that applies no gain, no DC correction, and no
/// look-ahead delay: every sample is encoded and forwarded immediately.
///
/// This isolates codec symmetry from the rest of the pipeline: decoding
/// a byte stream and re-encoding it through this sink must reproduce
/// the input exactly, for any valid input, independent of windowing or
/// gain behavior.
pub struct PassThrough<S: ByteSink> {
    format: crate::format::SampleFormat,
    sink: S,
}

impl<S: ByteSink> PassThrough<S> {
    /// Wraps `sink`, encoding samples in `format` with no other
    /// processing.
    pub const fn new(format: crate::format::SampleFormat, sink: S) -> Self {
        Self { format, sink }
    }
}

impl<S: ByteSink> SampleSink for PassThrough<S> {
    fn push(&mut self, _channel: usize, sample: i32) -> Result<()> {
        let mut bytes = Vec::with_capacity(self.format.bytes_per_sample());
        self.format.encode(sample, &mut bytes)?;
        self.sink.write(&bytes)
    }

    fn flush(&mut self) -> Result<()> {
        self.sink.flush()
    }

    fn close(&mut self) -> Result<()> {
        self.sink.flush()?;
        self.sink.close()
    }
}
