//! Unsafe, centralized reads of `MaybeUninit<T>` payload slots.
//!
//! Every layout stores its payload as `MaybeUninit<T>`, so the vacant state
//! is genuinely uninitialized rather than a sentinel. These helpers are the
//! single place where payload bits are interpreted as `T`:
//! - by-value copies (`read_copy`, `read_unaligned_copy`)
//! - conversion to references (`assume_init_ref` / `assume_init_mut`)
//!
//! ## Core invariant
//! For all callers in this crate, a payload slot is initialized *exactly
//! when* the owning slot's discriminant is set: from the moment
//! `occupied`/`fill` completes until `clear` completes. The discriminant
//! check itself happens in the calling layout module (or is documented as
//! the caller's precondition on the unchecked accessors).

use core::mem::MaybeUninit;

/// Copies an initialized payload out of a slot.
///
/// # Safety
/// - `slot` must be initialized.
#[inline(always)]
pub(crate) unsafe fn read_copy<T: Copy>(slot: &MaybeUninit<T>) -> T {
    // SAFETY: caller asserts `slot` is initialized; `T: Copy` makes this a
    // plain bitwise read with no ownership transfer.
    unsafe { *slot.assume_init_ref() }
}

/// Copies an initialized payload out of a possibly unaligned slot.
///
/// # Safety
/// - `slot` must point to an initialized `MaybeUninit<T>` that is valid for
///   reads. The pointer may be unaligned (packed storage).
#[inline(always)]
pub(crate) unsafe fn read_unaligned_copy<T: Copy>(slot: *const MaybeUninit<T>) -> T {
    // SAFETY: caller asserts initialization and readability;
    // `read_unaligned` tolerates any alignment.
    unsafe { slot.cast::<T>().read_unaligned() }
}

/// Interprets an initialized slot as `&T`.
///
/// # Safety
/// - `slot` must be initialized and sufficiently aligned for `T`.
#[inline(always)]
pub(crate) unsafe fn assume_init_ref<T>(slot: &MaybeUninit<T>) -> &T {
    // SAFETY: caller asserts `slot` is initialized.
    unsafe { slot.assume_init_ref() }
}

/// Interprets an initialized slot as `&mut T`.
///
/// # Safety
/// - `slot` must be initialized and sufficiently aligned for `T`.
/// - The returned `&mut T` is exclusive for its lifetime by construction
///   (it reborrows `slot`).
#[inline(always)]
pub(crate) unsafe fn assume_init_mut<T>(slot: &mut MaybeUninit<T>) -> &mut T {
    // SAFETY: caller asserts `slot` is initialized and exclusive.
    unsafe { slot.assume_init_mut() }
}
