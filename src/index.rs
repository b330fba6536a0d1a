//! Wrap-around index arithmetic for power-of-two sized buffers.

/// The smallest capacity a `RingDeque` is ever allowed to have.
pub const MIN_CAPACITY: usize = 4;

/// Returns true if `capacity` is a power of two no smaller than [`MIN_CAPACITY`].
pub fn is_valid_capacity(capacity: usize) -> bool {
    capacity >= MIN_CAPACITY && capacity.is_power_of_two()
}

/// `(index + offset) mod capacity`. `capacity` must be a power of two.
#[inline(always)]
pub fn wrap_add(index: usize, offset: usize, capacity: usize) -> usize {
    debug_assert!(capacity.is_power_of_two());
    index.wrapping_add(offset) & (capacity - 1)
}

/// `(index - offset) mod capacity`, never underflowing. `capacity` must be a power of two.
#[inline(always)]
pub fn wrap_sub(index: usize, offset: usize, capacity: usize) -> usize {
    debug_assert!(capacity.is_power_of_two());
    index.wrapping_sub(offset) & (capacity - 1)
}
