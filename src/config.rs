//! Construction-time configuration for the normalizer.
//!
//! Parsing configuration from a file or command line is out of scope for
//! this crate (see the crate-level docs); this module only validates the
//! handful of numeric parameters the pipeline itself needs.

use crate::{
    error::{Error, Result},
    format::SampleFormat,
};

/// Validated construction parameters for a [`crate::normalizer::Normalizer`].
#[derive(Debug, Clone, Copy)]
pub struct NormalizerConfig {
    format: SampleFormat,
    channels: u32,
    sample_rate: u32,
    window_seconds: f64,
    max_gain: f64,
    per_channel: bool,
    dc_offset_enabled: bool,
}

impl NormalizerConfig {
    /// Validates and constructs a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::invalid_argument`] if `channels` is 0, `sample_rate`
    /// is 0, `window_seconds` is not positive, or `max_gain` is below
    /// unity.
    pub fn new(
        format: SampleFormat,
        channels: u32,
        sample_rate: u32,
        window_seconds: f64,
        max_gain: f64,
        per_channel: bool,
        dc_offset_enabled: bool,
    ) -> Result<Self> {
        if channels == 0 {
            error!("invalid normalizer config: channels must be >= 1");
            return Err(Error::invalid_argument("channels must be >= 1"));
        }
        if sample_rate == 0 {
            error!("invalid normalizer config: sample_rate must be > 0");
            return Err(Error::invalid_argument("sample_rate must be > 0"));
        }
        if !(window_seconds > 0.0) {
            error!("invalid normalizer config: window_seconds must be > 0");
            return Err(Error::invalid_argument("window_seconds must be > 0"));
        }
        if !(max_gain >= 1.0) {
            error!("invalid normalizer config: max_gain must be >= 1.0");
            return Err(Error::invalid_argument("max_gain must be >= 1.0"));
        }

        Ok(Self {
            format,
            channels,
            sample_rate,
            window_seconds,
            max_gain,
            per_channel,
            dc_offset_enabled,
        })
    }

    #[must_use]
    pub const fn format(&self) -> SampleFormat {
        self.format
    }

    #[must_use]
    pub const fn channels(&self) -> u32 {
        self.channels
    }

    #[must_use]
    pub const fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    #[must_use]
    pub const fn max_gain(&self) -> f64 {
        self.max_gain
    }

    #[must_use]
    pub const fn per_channel(&self) -> bool {
        self.per_channel
    }

    #[must_use]
    pub const fn dc_offset_enabled(&self) -> bool {
        self.dc_offset_enabled
    }

    /// Total window length in individual interleaved samples,
    /// `N = floor(sample_rate * channels * window_seconds)`.
    #[must_use]
    pub fn window_len_samples(&self) -> usize {
        (f64::from(self.sample_rate) * f64::from(self.channels) * self.window_seconds) as usize
    }

    /// Per-gain-track window length `N_p`: `N / channels` when
    /// per-channel normalization is on, else `N`.
    #[must_use]
    pub fn per_track_window_len(&self) -> usize {
        let n = self.window_len_samples();
        if self.per_channel {
            (n / self.channels as usize).max(1)
        } else {
            n.max(1)
        }
    }

    /// Number of independent gain tracks `K`: `channels` when
    /// per-channel normalization is on, else 1.
    #[must_use]
    pub fn gain_track_count(&self) -> usize {
        if self.per_channel {
            self.channels as usize
        } else {
            1
        }
    }
}
