//! Non-blocking monitor event dispatch.
//!
//! The normalizer runs on the audio thread; a UI meter or logger lives
//! elsewhere. `Monitor` hands observations across that boundary the way
//! the rest of this codebase hands stream errors and track changes
//! across thread boundaries: a bounded `std::sync::mpsc` channel that is
//! never blocked on. A full channel (an inattentive or absent consumer)
//! just drops the event; the subsampling counter keeps advancing
//! regardless of whether anyone is listening.

use std::sync::mpsc;

/// One observation surfaced to a monitor subscriber.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// Peak amplitude seen on `channel`'s incoming samples, sampled at
    /// roughly 30 Hz.
    Amplitude { channel: usize, amplitude: f64 },
    /// Current gain applied to `channel`'s track, sampled at roughly
    /// 30 Hz alongside amplitude.
    Gain { channel: usize, gain: f64 },
}

/// Subsamples per-channel amplitude/gain observations and dispatches
/// them over a non-blocking channel.
#[derive(Debug)]
pub struct Monitor {
    sender: mpsc::SyncSender<Event>,
    subsample_period: usize,
    counters: Vec<usize>,
}

impl Monitor {
    /// Creates a monitor for `channels` channels sampled at `sample_rate`
    /// Hz, dispatching on a channel with room for `capacity` pending
    /// events, and returns the paired receiver.
    ///
    /// # Panics
    ///
    /// Panics if `channels` is zero.
    #[must_use]
    pub fn new(channels: usize, sample_rate: u32, capacity: usize) -> (Self, mpsc::Receiver<Event>) {
        assert!(channels > 0, "monitor needs at least one channel");
        let (sender, receiver) = mpsc::sync_channel(capacity);
        let subsample_period = ((sample_rate / 30).max(1)) as usize;
        (
            Self {
                sender,
                subsample_period,
                counters: vec![0; channels],
            },
            receiver,
        )
    }

    /// Resets every channel's subsample counter, as after a seek or
    /// stream restart.
    pub fn reset(&mut self) {
        self.counters.fill(0);
    }

    /// Records one incoming-sample observation for `channel`. Every
    /// `subsample_period`-th call for that channel emits both an
    /// [`Event::Amplitude`] and an [`Event::Gain`]; calls in between are
    /// cheap counter increments.
    ///
    /// Dispatch never blocks: if the receiver isn't keeping up (or has
    /// been dropped), the event is silently discarded.
    pub fn observe(&mut self, channel: usize, amplitude: f64, gain: f64) {
        let counter = &mut self.counters[channel];
        *counter += 1;
        if *counter < self.subsample_period {
            return;
        }
        *counter = 0;
        let _ = self.sender.try_send(Event::Amplitude { channel, amplitude });
        let _ = self.sender.try_send(Event::Gain { channel, gain });
    }
}
