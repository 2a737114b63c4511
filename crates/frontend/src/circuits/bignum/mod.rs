//! Arbitrary-precision bignum arithmetic for circuits.
//!
//! This module provides operations on big integers represented as vectors of `Wire` elements,
//! where each `Wire` holds a `limb_bits`-wide limb. The representation uses little-endian
//! ordering, meaning the least significant limb is at index 0.
//!
//! Limb products are computed exactly in the field, so a multiplication costs one gate per limb
//! pair and the carries are split off once per column.

mod add;
mod biguint;
mod mul;
mod reduce;

#[cfg(test)]
mod tests;

pub use add::add;
pub use biguint::{BigUint, assert_eq, assert_zero, range_check};
pub use mul::{mul, square};
pub use reduce::{ModReduce, assert_lt, mod_reduce, mod_reduce_wide};
