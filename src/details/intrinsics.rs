//! Word-level bit helpers used by the bit-parallel recurrences.

/// Integer division rounding towards positive infinity.
#[inline]
pub(crate) fn ceil_div(a: usize, divisor: usize) -> usize {
    a.div_ceil(divisor)
}

/// Adds `a + b + carry_in` and reports whether the sum overflowed.
#[inline]
pub(crate) fn carrying_add(a: u64, b: u64, carry_in: bool) -> (u64, bool) {
    let (sum, c1) = a.overflowing_add(b);
    let (sum, c2) = sum.overflowing_add(u64::from(carry_in));
    (sum, c1 || c2)
}

/// Mask with the lowest `n` bits set. `n` may be 64.
#[inline]
pub(crate) fn bit_mask_lsb(n: usize) -> u64 {
    if n >= 64 {
        !0_u64
    } else {
        (1_u64 << n) - 1
    }
}

/// Isolates the lowest set bit.
#[inline]
pub(crate) fn blsi(a: u64) -> u64 {
    a & a.wrapping_neg()
}

/// Clears the lowest set bit.
#[inline]
pub(crate) fn blsr(a: u64) -> u64 {
    a & a.wrapping_sub(1)
}

#[inline]
pub(crate) fn popcount(a: u64) -> usize {
    a.count_ones() as usize
}
