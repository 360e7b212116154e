//! Gain controller: the smooth, asymmetrically-ramped amplification
//! factor applied to one track (either one channel, when per-channel
//! normalization is on, or the shared track when it's off).

/// Per-track gain state.
///
/// Every emitted sample consults the current rolling maximum for this
/// track and updates `g` under an asymmetric ramp: multiplicative growth
/// capped at `r = 1 + 1 / n_p` per sample when the signal is quieter
/// than the current gain calls for, and a linear decay toward the target
/// when it must attenuate. The linear decay guarantees convergence to
/// the target within `n_p` samples.
#[derive(Debug, Clone)]
pub struct GainController {
    max_gain: f64,
    n_p: f64,
    ramp_ceiling: f64,
    max_amplitude: f64,
    gain: f64,
}

impl GainController {
    /// Creates a controller for a track whose rolling maximum has window
    /// length `n_p` samples, with ceiling `max_gain` and format peak
    /// `max_amplitude` (the `M` of the sample format in use).
    #[must_use]
    pub fn new(max_gain: f64, n_p: usize, max_amplitude: i32) -> Self {
        let n_p = n_p as f64;
        Self {
            max_gain,
            n_p,
            ramp_ceiling: 1.0 + 1.0 / n_p,
            max_amplitude: f64::from(max_amplitude),
            gain: 1.0,
        }
    }

    /// Current gain.
    #[must_use]
    pub const fn gain(&self) -> f64 {
        self.gain
    }

    /// Resets the gain to unity, as after a seek or stream restart.
    pub fn reset(&mut self) {
        self.gain = 1.0;
    }

    /// Updates the gain from the track's current rolling maximum and
    /// returns the new value.
    ///
    /// `rolling_max` is the non-negative peak magnitude seen in the
    /// look-ahead window; `0` is treated as "no signal", for which the
    /// target is simply the gain ceiling.
    pub fn update(&mut self, rolling_max: i32) -> f64 {
        let clip_gain = if rolling_max == 0 {
            self.max_gain
        } else {
            self.max_amplitude / f64::from(rolling_max)
        };
        let target = self.max_gain.min(clip_gain);

        self.gain = if target > self.gain {
            (self.gain * self.ramp_ceiling).min(target)
        } else {
            // Additive decrement scaled by distance from the ceiling. Can
            // briefly drive gain below 1.0 when a sample-aligned spike
            // pushes `target` under unity; this is expected, not a bug.
            (self.gain - (self.max_gain - target) / self.n_p).max(target)
        };
        self.gain
    }
}
