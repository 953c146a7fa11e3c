//! L4 Atomic Layer: Circular index arithmetic
//!
//! Every "shortest path around the loop" question in the carousel goes
//! through these functions, so click-to-navigate, external sync and card
//! projection all agree on direction.
//!
//! Tie-break: when both directions are equally long (`|d| == len / 2` on an
//! even-length loop) the forward (positive) direction wins, everywhere.

/// Shortest signed step count from `from` to `to` on a loop of `len` items.
///
/// The result `d` satisfies `(from + d).rem_euclid(len) == to` and
/// `-len/2 < d <= len/2`. Returns 0 for `len <= 1`.
#[inline]
pub fn wrap_delta(from: usize, to: usize, len: usize) -> i64 {
    if len <= 1 {
        return 0;
    }
    let n = len as i64;
    let mut d = (to as i64 - from as i64).rem_euclid(n);
    if d * 2 > n {
        d -= n;
    }
    d
}

/// Continuous counterpart of [`wrap_delta`]: fold a real offset into
/// `(-len/2, len/2]`. A single-item loop keeps only the fractional drift.
#[inline]
pub fn wrap_offset(offset: f64, len: usize) -> f64 {
    if len == 0 {
        return 0.0;
    }
    let n = len as f64;
    let r = offset.rem_euclid(n);
    if r * 2.0 > n {
        r - n
    } else {
        r
    }
}

/// Map an unbounded continuous position onto a discrete index in `[0, len)`.
///
/// The position is reduced modulo `len` before rounding, so a raw position
/// of `-1.0` on six items is index 5.
#[inline]
pub fn normalize_index(position: f64, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let r = position.rem_euclid(len as f64);
    (r.round() as usize) % len
}
