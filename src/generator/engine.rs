//! Width adaptation
//!
//! Serves a request for `N` lanes from a generator whose internal width is `W`:
//! - `N == W`: hand out the look-ahead batch, then step it with `next`
//! - `N < W`: hand out its first `N` lanes, then `shift` by `N`
//! - `N > W`: split into a low and a high part and serve them in order
//!
//! The low part of a split is the largest power of two below `N`, so a request
//! of 10 lanes against width 4 is served as 4 + 4 + 2.

use super::{BatchGenerator, Recurrence};
use num_traits::Float;
use std::ops::Range;

/// Fill `out` from the generator's main channel
pub(crate) fn fill<R, T, const W: usize>(gen: &mut BatchGenerator<R, T, W>, out: &mut [T])
where
    R: Recurrence<T, W>,
    T: Float,
{
    let len = out.len();
    fill_with(gen, 0, len, &mut |gen: &BatchGenerator<R, T, W>, lanes: Range<usize>, at: usize| {
        let len = lanes.len();
        out[at..at + len].copy_from_slice(&gen.core.value.as_slice()[lanes]);
    });
}

/// Serve `len` lanes, reporting each consumed piece to `emit`
///
/// `emit` receives the generator before it advances, the lane range of the
/// look-ahead batch being consumed, and the output offset of that range.
pub(crate) fn fill_with<R, T, F, const W: usize>(
    gen: &mut BatchGenerator<R, T, W>,
    offset: usize,
    len: usize,
    emit: &mut F,
) where
    R: Recurrence<T, W>,
    T: Float,
    F: FnMut(&BatchGenerator<R, T, W>, Range<usize>, usize),
{
    if len == 0 {
        return;
    }

    if len == W {
        emit(gen, 0..W, offset);
        gen.recurrence.next(&mut gen.core.value);
    } else if len < W {
        emit(gen, 0..len, offset);
        gen.recurrence.shift(&mut gen.core.value, len);
    } else {
        let low = low_len(len);
        fill_with(gen, offset, low, emit);
        fill_with(gen, offset + low, len - low, emit);
        return;
    }

    gen.core.position += len as u64;
}

/// Largest power of two strictly below `len` (`len >= 2`)
fn low_len(len: usize) -> usize {
    debug_assert!(len >= 2);
    1 << (usize::BITS - 1 - (len - 1).leading_zeros())
}
