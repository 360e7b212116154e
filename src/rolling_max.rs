//! Rolling maximum over a sliding window, maintained online via a
//! monotonic deque.
//!
//! The deque lives in a ring buffer of capacity `N_p` and tracks a
//! non-increasing sequence of values via two indices: `max_idx` (the
//! current maximum, at the "front") and `min_idx` (the most recently
//! appended entry, at the "back"). Callers pair every [`RollingMax::add`]
//! with a matching [`RollingMax::remove`] of the value that logically
//! left the window; amortized cost per pair is O(1) because each sample
//! is inserted and evicted from the deque at most once.
//!
//! Ties are broken by strict-greater comparison on insert: an incoming
//! value evicts any buffered entry that is less than *or equal to* it.
//! Value alone can't tell two equal samples apart, so every stored entry
//! also carries the monotonic insertion index of the sample it
//! represents; `remove` expires the front of the deque by that index —
//! the logical age of the sample actually leaving the window — rather
//! than by re-matching the value the caller passes in. Two counters,
//! `next_in` and `next_out`, hand out and track those indices; they only
//! ever increase, so a dominated duplicate that never made it into the
//! deque is silently skipped when its own `remove` comes due, instead of
//! being confused with whichever later, larger duplicate is still live.

use crate::error::{Error, Result};

/// Online rolling maximum backed by a monotonic deque.
#[derive(Debug, Clone)]
pub struct RollingMax {
    buf: Vec<(i32, u64)>,
    max_idx: usize,
    min_idx: usize,
    empty: bool,
    next_in: u64,
    next_out: u64,
}

impl RollingMax {
    /// Allocates a deque with capacity `n_p` (the per-gain-track window
    /// length in samples).
    ///
    /// # Panics
    ///
    /// Panics if `n_p` is zero.
    #[must_use]
    pub fn new(n_p: usize) -> Self {
        assert!(n_p > 0, "rolling maximum capacity must be > 0");
        Self {
            buf: vec![(0, 0); n_p],
            max_idx: 0,
            min_idx: 0,
            empty: true,
            next_in: 0,
            next_out: 0,
        }
    }

    /// Capacity `N_p` this deque was constructed with.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Current maximum of the active set. Returns `0` before the first
    /// `add`.
    #[must_use]
    pub fn get(&self) -> i32 {
        if self.empty { 0 } else { self.buf[self.max_idx].0 }
    }

    /// Inserts `v` as the newest sample.
    ///
    /// # Errors
    ///
    /// Returns [`Error::internal`] if the deque has no room left, which
    /// only happens if the caller issues more `add`s than matching
    /// `remove`s.
    pub fn add(&mut self, v: i32) -> Result<()> {
        let capacity = self.buf.len();
        let idx = self.next_in;
        self.next_in += 1;

        if self.empty {
            self.buf[0] = (v, idx);
            self.max_idx = 0;
            self.min_idx = 0;
            self.empty = false;
            return Ok(());
        }

        if v > self.buf[self.min_idx].0 {
            // Walk backward toward the front, dropping any dominated
            // entries, then settle on the slot just past the last
            // surviving (strictly greater) entry. Their original
            // insertion indices are discarded along with their values;
            // the slot now remembers only `v`'s own index, so a later
            // `remove` can't mistake it for the sample it replaced.
            let mut pos = self.min_idx;
            while pos != self.max_idx {
                let prev = (pos + capacity - 1) % capacity;
                if self.buf[prev].0 <= v {
                    pos = prev;
                } else {
                    break;
                }
            }
            self.buf[pos] = (v, idx);
            self.min_idx = pos;
        } else {
            let next = (self.min_idx + 1) % capacity;
            if next == self.max_idx {
                return Err(Error::internal(
                    "rolling maximum overflow: more add() than remove() calls",
                ));
            }
            self.min_idx = next;
            self.buf[self.min_idx] = (v, idx);
        }

        Ok(())
    }

    /// Notifies the deque that `v`, the oldest sample still logically in
    /// the window, is leaving it.
    ///
    /// Expiry is tracked by insertion index, not by re-matching `v`
    /// against the current front: the deque already knows which sample
    /// index is next due to expire, one per `remove` call in the same
    /// order samples were `add`ed, so this only pops the front when that
    /// index is the one actually stored there. If the expiring sample
    /// was dominated and dropped during `add` in favor of a later,
    /// greater value, the front still belongs to that later value and
    /// nothing is popped — exactly as if the expiring sample had never
    /// needed to be in the deque at all.
    pub fn remove(&mut self, v: i32) {
        if self.empty {
            return;
        }
        let expiring = self.next_out;
        self.next_out += 1;

        if self.buf[self.max_idx].1 == expiring {
            debug_assert_eq!(
                self.buf[self.max_idx].0, v,
                "removed value does not match the sample leaving the window"
            );
            if self.max_idx == self.min_idx {
                self.empty = true;
            } else {
                self.max_idx = (self.max_idx + 1) % self.buf.len();
            }
        }
    }
}
