//! Periodic re-anchoring
//!
//! The exponential and trigonometric recurrences accumulate rounding error
//! for as long as they run. [`Anchored`] bounds it by re-evaluating the
//! wrapped generator directly at its current position every `interval`
//! produced values. Without an interval it is a transparent pass-through.

use super::Generator;
use std::num::NonZeroU64;
use tracing::{debug, trace};

/// Generator wrapper that re-anchors on a fixed cadence
#[derive(Debug, Clone)]
pub struct Anchored<G> {
    inner: G,
    interval: Option<NonZeroU64>,
    /// Values produced since the last anchor
    since_anchor: u64,
}

impl<G: Generator> Anchored<G> {
    /// Re-anchor `inner` every `interval` produced values
    ///
    /// The interval is rounded up to whole elements, and the count starts
    /// from the element boundary at or before the current position, so
    /// multi-lane generators are always re-anchored on an element boundary.
    ///
    /// # Example
    /// ```
    /// use std::num::NonZeroU64;
    /// use lanegen::generator::{Anchored, ExpGenerator, Generator};
    ///
    /// let interval = NonZeroU64::new(1024).unwrap();
    /// let mut env = Anchored::new(ExpGenerator::<f32, 8>::new(0.0, -1e-4), interval);
    /// let mut frame = [0.0f32; 4096];
    /// env.produce(&mut frame);
    /// assert_eq!(env.position(), 4096);
    /// ```
    pub fn new(inner: G, interval: NonZeroU64) -> Self {
        let lanes = inner.lanes_per_element() as u64;
        let rounded = interval.get().div_ceil(lanes) * lanes;
        let since_anchor = inner.position() % lanes;
        Self {
            inner,
            interval: NonZeroU64::new(rounded),
            since_anchor,
        }
    }

    /// Wrap `inner` without ever re-anchoring
    pub fn unanchored(inner: G) -> Self {
        Self {
            inner,
            interval: None,
            since_anchor: 0,
        }
    }

    pub fn interval(&self) -> Option<NonZeroU64> {
        self.interval
    }

    pub fn inner(&self) -> &G {
        &self.inner
    }

    pub fn into_inner(self) -> G {
        self.inner
    }
}

impl<G: Generator> Generator for Anchored<G> {
    type Sample = G::Sample;

    fn produce(&mut self, out: &mut [G::Sample]) {
        let Some(interval) = self.interval.map(NonZeroU64::get) else {
            self.inner.produce(out);
            return;
        };

        let mut rest = out;
        while !rest.is_empty() {
            let room = (interval - self.since_anchor).min(rest.len() as u64) as usize;
            let (head, tail) = std::mem::take(&mut rest).split_at_mut(room);
            self.inner.produce(head);
            self.since_anchor += room as u64;
            rest = tail;

            if self.since_anchor >= interval {
                let position = self.inner.position();
                if self.inner.reanchor() {
                    trace!(position, "re-anchored generator");
                    self.since_anchor = 0;
                } else {
                    // Retry at the next element boundary
                    let lanes = self.inner.lanes_per_element() as u64;
                    self.since_anchor = interval - (lanes - position % lanes);
                    debug!(position, "re-anchor postponed to the next element");
                }
            }
        }
    }

    fn resync(&mut self, start: G::Sample) {
        self.inner.resync(start);
        self.since_anchor = 0;
    }

    fn reanchor(&mut self) -> bool {
        let anchored = self.inner.reanchor();
        if anchored {
            self.since_anchor = 0;
        }
        anchored
    }

    fn position(&self) -> u64 {
        self.inner.position()
    }

    fn start(&self) -> G::Sample {
        self.inner.start()
    }

    fn step(&self) -> G::Sample {
        self.inner.step()
    }

    fn width(&self) -> usize {
        self.inner.width()
    }

    fn lanes_per_element(&self) -> usize {
        self.inner.lanes_per_element()
    }
}
