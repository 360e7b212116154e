//! Streaming PCM peak normalizer with bounded look-ahead.
//!
//! **pcm-normalize** is a library that implements a push-style audio
//! filter: feed it interleaved PCM bytes in one of three formats, and it
//! emits bytes in the same format with a time-varying gain applied so
//! peak amplitude approaches, but never exceeds, full scale. Gain is
//! computed from a sliding look-ahead window rather than from the whole
//! stream, so the filter can run on live or unbounded input with a fixed
//! memory footprint and a fixed, predictable latency.
//!
//! # Core Features
//!
//! * **Peak normalization**: an asymmetrically-ramped gain (fast
//!   multiplicative attack, slower linear release) tracks a rolling
//!   maximum maintained in amortized O(1) per sample via a monotonic
//!   deque.
//! * **DC-offset removal**: an optional single-pole IIR filter per
//!   channel removes slowly drifting bias before it reaches the delay
//!   line.
//! * **Format support**: 8-bit PCM and 16-bit PCM in both little- and
//!   big-endian byte order, with partial samples buffered correctly
//!   across write calls.
//! * **Live monitoring**: amplitude and gain are surfaced via a
//!   non-blocking channel, subsampled to roughly 30 Hz per channel, for
//!   a UI meter or logger to consume without ever stalling the pipeline.
//!
//! # Architecture
//!
//! * **Pipeline primitives**
//!   - [`window`]: the fixed-capacity delay line (rolling-window FIFO)
//!   - [`rolling_max`]: the monotonic-deque rolling maximum
//!   - [`gain`]: the asymmetric-ramp gain controller
//!   - [`dc_offset`]: the per-channel DC-bias estimator
//!
//! * **Orchestration**
//!   - [`normalizer`]: ties the primitives together into a
//!     [`normalizer::SampleSink`] implementation with flush/close
//!     semantics
//!   - [`monitor`]: subsampled, non-blocking amplitude/gain event
//!     dispatch
//!   - [`format`]: the PCM codec (sample format, decoder state machine,
//!     encoder)
//!   - [`sink`]: the downstream byte-sink capability the normalizer
//!     writes encoded bytes to
//!
//! * **Configuration and errors**
//!   - [`config`]: validated construction parameters
//!   - [`mod@error`]: error types and handling
//!
//! * **Collaborators**
//!   - [`wav`]: a bit-exact streaming RIFF/WAV header writer
//!
//! # Example
//!
//! ```rust
//! use pcm_normalize::{
//!     config::NormalizerConfig, format::SampleFormat, normalizer::{Normalizer, SampleSink},
//!     sink::BufferSink,
//! };
//!
//! # fn example() -> pcm_normalize::error::Result<()> {
//! let config = NormalizerConfig::new(
//!     SampleFormat::Pcm16Le,
//!     2,      // channels
//!     44100,  // sample_rate
//!     1.0,    // window_seconds
//!     30.0,   // max_gain
//!     false,  // per_channel
//!     true,   // dc_offset_enabled
//! )?;
//!
//! let (mut normalizer, _events) = Normalizer::new(config, BufferSink::new());
//! normalizer.write(&[0x00, 0x01, 0x00, 0x01])?;
//! normalizer.close()?;
//! # Ok(())
//! # }
//! ```
//!
//! # Out of Scope
//!
//! File I/O, audio device capture/playback, GUI meters, and
//! configuration-file parsing are deliberately outside this crate; it
//! normalizes bytes already in memory and hands encoded bytes to
//! whatever [`sink::ByteSink`] the caller provides.
//!
//! # Error Handling
//!
//! Errors are handled through the types in the [`mod@error`] module, with
//! most functions returning [`Result`](error::Result).
//!
//! # Concurrency
//!
//! The normalizer itself is single-threaded: all pipeline state is
//! mutated only by the thread calling [`normalizer::Normalizer::write`].
//! Monitor events cross to a consumer thread over a non-blocking
//! channel; see [`monitor`] for details.

#![deny(clippy::all)]
#![doc(test(attr(ignore)))]
#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![warn(rust_2024_compatibility)]
#![warn(future_incompatible)]

#[macro_use]
extern crate log;

pub mod config;
pub mod dc_offset;
pub mod error;
pub mod format;
pub mod gain;
pub mod monitor;
pub mod normalizer;
pub mod rolling_max;
pub mod sink;
pub mod wav;
pub mod window;
