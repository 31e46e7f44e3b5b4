//! `PackedSlot` - the packed layout.
//!
//! No padding anywhere, including between the payload and the discriminant:
//! the size is exactly `size_of::<T>() + 1` and the alignment is 1. The
//! payload therefore may land on any byte boundary, which rules out handing
//! out references to it - a `&T` must be aligned. This layout is by-value
//! only: reads go through `read_unaligned`, writes through field assignment
//! (the compiler emits the unaligned stores), and there are no
//! `as_ref_unchecked`/`as_mut_unchecked` accessors. Expect the unaligned
//! access cost on architectures that care.

use core::fmt;
use core::mem::MaybeUninit;
use core::ptr;

use zerocopy::FromZeroes;

use super::raw;

/// A value-semantic optional slot with no padding at all.
///
/// Same logical contract as [`Slot`](super::Slot), minus the by-reference
/// accessors (a packed payload may be unaligned). Meant for packed records
/// and wire-adjacent structs where every byte counts.
///
/// # Examples
///
/// ```
/// use core::mem::size_of;
/// use stow::PackedSlot;
///
/// assert_eq!(size_of::<PackedSlot<u64>>(), size_of::<u64>() + 1);
///
/// let slot = PackedSlot::occupied(0xABu8);
/// assert_eq!(slot.unwrap_or(0), 0xAB);
/// ```
#[repr(C, packed)]
pub struct PackedSlot<T: Copy> {
    value: MaybeUninit<T>,
    occupied: bool,
}

impl<T: Copy> PackedSlot<T> {
    /// Creates a vacant slot. The payload bits are left uninitialized.
    #[inline(always)]
    pub const fn vacant() -> Self {
        Self {
            value: MaybeUninit::uninit(),
            occupied: false,
        }
    }

    /// Creates a slot holding `value`.
    #[inline(always)]
    pub const fn occupied(value: T) -> Self {
        Self {
            value: MaybeUninit::new(value),
            occupied: true,
        }
    }

    /// Returns `true` if the slot holds a value.
    #[inline(always)]
    pub const fn is_occupied(&self) -> bool {
        self.occupied
    }

    /// Returns `true` if the slot holds nothing.
    #[inline(always)]
    pub const fn is_vacant(&self) -> bool {
        !self.occupied
    }

    /// Empties the slot in place.
    ///
    /// The payload bits are left as they were but are no longer meaningful.
    #[inline(always)]
    pub fn clear(&mut self) {
        self.occupied = false;
    }

    /// Stores `value` in place, overwriting any previous payload.
    #[inline(always)]
    pub fn fill(&mut self, value: T) {
        self.value = MaybeUninit::new(value);
        self.occupied = true;
    }

    /// Stores `value` and returns the slot's previous state.
    #[inline]
    pub fn replace(&mut self, value: T) -> Self {
        let prior = *self;
        self.fill(value);
        prior
    }

    /// Empties the slot and returns its previous state.
    #[inline]
    pub fn take(&mut self) -> Self {
        let prior = *self;
        self.clear();
        prior
    }

    /// Reads the payload without checking the discriminant.
    ///
    /// # Safety
    /// The slot must be occupied. Calling this on a vacant slot reads
    /// uninitialized memory; debug builds catch the violation with an
    /// assertion.
    #[inline(always)]
    pub unsafe fn get_unchecked(&self) -> T {
        debug_assert!(self.occupied, "get_unchecked on a vacant slot");
        // SAFETY: caller guarantees occupancy; `addr_of!` projects the
        // packed field without forming a reference, and the read tolerates
        // the missing alignment.
        unsafe { raw::read_unaligned_copy(ptr::addr_of!(self.value)) }
    }

    /// Converts to the std vocabulary.
    #[inline]
    pub fn to_option(self) -> Option<T> {
        if self.occupied {
            // SAFETY: discriminant checked.
            Some(unsafe { self.get_unchecked() })
        } else {
            None
        }
    }

    /// Returns `other` if both slots are occupied, a vacant slot otherwise.
    ///
    /// Both operands are ordinary arguments and are always fully evaluated
    /// before the combinator runs.
    #[inline]
    pub fn and(self, other: Self) -> Self {
        if self.occupied && other.occupied {
            other
        } else {
            Self::vacant()
        }
    }

    /// First-present-wins: returns `self` if it is occupied (regardless of
    /// `other`'s state), otherwise returns `other`.
    #[inline]
    pub fn or(self, other: Self) -> Self {
        if self.occupied {
            self
        } else {
            other
        }
    }

    /// Returns the single occupied operand if exactly one is occupied;
    /// a vacant slot when the operands agree (both occupied ties to vacant,
    /// not an error).
    #[inline]
    pub fn xor(self, other: Self) -> Self {
        match (self.occupied, other.occupied) {
            (true, false) => self,
            (false, true) => other,
            _ => Self::vacant(),
        }
    }

    /// Returns the payload, or `default` when vacant.
    #[inline]
    pub fn unwrap_or(self, default: T) -> T {
        if self.occupied {
            // SAFETY: discriminant checked.
            unsafe { self.get_unchecked() }
        } else {
            default
        }
    }
}

impl<T: Copy + FromZeroes> PackedSlot<T> {
    /// Returns the payload, or the payload type's zero value when vacant.
    #[inline]
    pub fn unwrap_or_zeroed(self) -> T {
        if self.occupied {
            // SAFETY: discriminant checked.
            unsafe { self.get_unchecked() }
        } else {
            T::new_zeroed()
        }
    }

    /// Returns the payload when occupied; when vacant, runs `on_vacant`
    /// exactly once for its side effects and returns the payload type's zero
    /// value. The callback cannot influence the returned zero.
    #[inline]
    pub fn unwrap_or_zeroed_else(self, on_vacant: impl FnOnce()) -> T {
        if self.occupied {
            // SAFETY: discriminant checked.
            unsafe { self.get_unchecked() }
        } else {
            on_vacant();
            T::new_zeroed()
        }
    }
}

impl<T: Copy> Clone for PackedSlot<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Copy> Copy for PackedSlot<T> {}

impl<T: Copy> Default for PackedSlot<T> {
    fn default() -> Self {
        Self::vacant()
    }
}

impl<T: Copy> From<T> for PackedSlot<T> {
    fn from(value: T) -> Self {
        Self::occupied(value)
    }
}

impl<T: Copy> From<Option<T>> for PackedSlot<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Self::occupied(v),
            None => Self::vacant(),
        }
    }
}

impl<T: Copy> From<PackedSlot<T>> for Option<T> {
    fn from(slot: PackedSlot<T>) -> Self {
        slot.to_option()
    }
}

impl<T: Copy + PartialEq> PartialEq for PackedSlot<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self.occupied, other.occupied) {
            // SAFETY: both discriminants checked; comparison is by value.
            (true, true) => unsafe { self.get_unchecked() == other.get_unchecked() },
            (false, false) => true,
            _ => false,
        }
    }
}

impl<T: Copy + Eq> Eq for PackedSlot<T> {}

impl<T: Copy + fmt::Debug> fmt::Debug for PackedSlot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.occupied {
            // SAFETY: discriminant checked; the payload is copied out so no
            // reference into the packed struct is formed.
            let value = unsafe { self.get_unchecked() };
            f.debug_tuple("Occupied").field(&value).finish()
        } else {
            f.write_str("Vacant")
        }
    }
}
