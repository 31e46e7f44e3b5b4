//! `PaddedSlot` - the pointer-width-padded layout.
//!
//! The discriminant and the payload each get their own pointer-width slot:
//! the discriminant is widened to a full `usize` word, and the payload
//! shares its bytes with a `usize` so instantiations smaller than a word
//! still occupy one. The total size is therefore always a multiple of the
//! platform word, uniform across same-sized payloads.
//!
//! Unlike the other layouts, every byte of a `PaddedSlot` is initialized
//! deterministically: fresh-vacant slots are all-zero, and `fill`/`occupied`
//! zero the body word before writing the payload. That is what makes
//! whole-value byte comparison (`as_bytes`) meaningful - the other layouts
//! leave padding bytes unspecified and make no such guarantee.
//!
//! ## Platform assumptions
//! The padding scheme assumes `align_of::<T>() <= align_of::<usize>()`;
//! a post-monomorphization assertion rejects over-aligned payloads. Payloads
//! whose size is not a multiple of the word leave the body word's rounding
//! bytes zeroed at rest; byte comparison treats them like any other byte.

use core::fmt;
use core::mem::{self, MaybeUninit};
use core::slice;

use zerocopy::FromZeroes;

use super::raw;

/// Payload storage sharing its bytes with a word, so payloads smaller than
/// a pointer still occupy (and deterministically initialize) a full word.
#[repr(C)]
union BodyWord<T: Copy> {
    value: MaybeUninit<T>,
    pad: usize,
}

impl<T: Copy> BodyWord<T> {
    /// A body word with every byte zeroed, including bytes past the payload
    /// when `T` is smaller than the word.
    const fn zeroed() -> Self {
        // SAFETY: a fully zeroed `BodyWord` is a valid value for the
        // `MaybeUninit` interpretation, which has no bit-validity
        // requirement.
        unsafe { MaybeUninit::<Self>::zeroed().assume_init() }
    }
}

impl<T: Copy> Clone for BodyWord<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Copy> Copy for BodyWord<T> {}

/// A value-semantic optional slot padded to a multiple of the pointer width.
///
/// Same logical contract as [`Slot`](super::Slot); the physical layout
/// additionally guarantees that `size_of::<PaddedSlot<T>>()` is a multiple
/// of `size_of::<usize>()` and that whole-value byte comparison is
/// well-defined (see [`as_bytes`](Self::as_bytes)).
///
/// # Examples
///
/// ```
/// use core::mem::size_of;
/// use stow::PaddedSlot;
///
/// assert_eq!(size_of::<PaddedSlot<u8>>() % size_of::<usize>(), 0);
///
/// let a = PaddedSlot::occupied(5u64);
/// let b = PaddedSlot::occupied(5u64);
/// assert_eq!(a.as_bytes(), b.as_bytes());
/// ```
#[repr(C)]
pub struct PaddedSlot<T: Copy> {
    /// Discriminant widened to a full word: 0 = vacant, 1 = occupied.
    header: usize,
    body: BodyWord<T>,
}

impl<T: Copy> PaddedSlot<T> {
    /// Post-monomorphization guard for the padding scheme's alignment
    /// assumption.
    const PAYLOAD_FITS_WORD_ALIGN: () = assert!(
        mem::align_of::<T>() <= mem::align_of::<usize>(),
        "PaddedSlot payloads must not require more than pointer alignment",
    );

    /// Creates a vacant slot with every byte zeroed.
    #[inline(always)]
    pub const fn vacant() -> Self {
        let () = Self::PAYLOAD_FITS_WORD_ALIGN;
        Self {
            header: 0,
            body: BodyWord::zeroed(),
        }
    }

    /// Creates a slot holding `value`. Bytes of the body word past the
    /// payload stay zeroed.
    #[inline(always)]
    pub const fn occupied(value: T) -> Self {
        let mut slot = Self::vacant();
        slot.header = 1;
        slot.body.value = MaybeUninit::new(value);
        slot
    }

    /// Returns `true` if the slot holds a value.
    #[inline(always)]
    pub const fn is_occupied(&self) -> bool {
        self.header != 0
    }

    /// Returns `true` if the slot holds nothing.
    #[inline(always)]
    pub const fn is_vacant(&self) -> bool {
        self.header == 0
    }

    /// Empties the slot in place.
    ///
    /// Re-zeroes the whole value rather than only the discriminant word, so
    /// every vacant `PaddedSlot` is byte-identical regardless of history.
    #[inline(always)]
    pub fn clear(&mut self) {
        *self = Self::vacant();
    }

    /// Stores `value` in place, overwriting any previous payload. The body
    /// word is zeroed first so its rounding bytes stay deterministic.
    #[inline(always)]
    pub fn fill(&mut self, value: T) {
        self.body = BodyWord::zeroed();
        self.body.value = MaybeUninit::new(value);
        self.header = 1;
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
    /// The slot must be occupied. Calling this on a vacant slot reads the
    /// zeroed body word as a `T` whose validity is not guaranteed; debug
    /// builds catch the violation with an assertion.
    #[inline(always)]
    pub unsafe fn get_unchecked(&self) -> T {
        debug_assert!(self.is_occupied(), "get_unchecked on a vacant slot");
        // SAFETY: caller guarantees occupancy; the `value` interpretation of
        // the body word is the active one whenever the discriminant is set.
        unsafe { raw::read_copy(&self.body.value) }
    }

    /// Borrows the payload without checking the discriminant.
    ///
    /// # Safety
    /// The slot must be occupied.
    #[inline(always)]
    pub unsafe fn as_ref_unchecked(&self) -> &T {
        debug_assert!(self.is_occupied(), "as_ref_unchecked on a vacant slot");
        // SAFETY: caller guarantees occupancy; the body word is at least as
        // aligned as `T` (alignment guard above).
        unsafe { raw::assume_init_ref(&self.body.value) }
    }

    /// Mutably borrows the payload without checking the discriminant,
    /// permitting in-place mutation.
    ///
    /// # Safety
    /// The slot must be occupied.
    #[inline(always)]
    pub unsafe fn as_mut_unchecked(&mut self) -> &mut T {
        debug_assert!(self.is_occupied(), "as_mut_unchecked on a vacant slot");
        // SAFETY: caller guarantees occupancy; `&mut self` makes the borrow
        // exclusive.
        unsafe { raw::assume_init_mut(&mut self.body.value) }
    }

    /// Converts to the std vocabulary.
    #[inline]
    pub fn to_option(self) -> Option<T> {
        if self.is_occupied() {
            // SAFETY: discriminant checked.
            Some(unsafe { raw::read_copy(&self.body.value) })
        } else {
            None
        }
    }

    /// Views the slot's bytes for whole-value comparison.
    ///
    /// Every byte of a `PaddedSlot` is initialized by construction, so the
    /// returned slice is fully defined. Two slots that are both fresh-vacant,
    /// or both occupied with bitwise-equal payloads, have equal bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        // SAFETY: all bytes are initialized by construction (vacant zeroes
        // both words; `fill` re-zeroes the body word before the payload is
        // written), and the slice borrows `self`.
        unsafe { slice::from_raw_parts((self as *const Self).cast::<u8>(), mem::size_of::<Self>()) }
    }

    /// Returns `other` if both slots are occupied, a vacant slot otherwise.
    ///
    /// Both operands are ordinary arguments and are always fully evaluated
    /// before the combinator runs.
    #[inline]
    pub fn and(self, other: Self) -> Self {
        if self.is_occupied() && other.is_occupied() {
            other
        } else {
            Self::vacant()
        }
    }

    /// First-present-wins: returns `self` if it is occupied (regardless of
    /// `other`'s state), otherwise returns `other`.
    #[inline]
    pub fn or(self, other: Self) -> Self {
        if self.is_occupied() {
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
        match (self.is_occupied(), other.is_occupied()) {
            (true, false) => self,
            (false, true) => other,
            _ => Self::vacant(),
        }
    }

    /// Returns the payload, or `default` when vacant.
    #[inline]
    pub fn unwrap_or(self, default: T) -> T {
        if self.is_occupied() {
            // SAFETY: discriminant checked.
            unsafe { raw::read_copy(&self.body.value) }
        } else {
            default
        }
    }
}

impl<T: Copy + FromZeroes> PaddedSlot<T> {
    /// Returns the payload, or the payload type's zero value when vacant.
    #[inline]
    pub fn unwrap_or_zeroed(self) -> T {
        if self.is_occupied() {
            // SAFETY: discriminant checked.
            unsafe { raw::read_copy(&self.body.value) }
        } else {
            T::new_zeroed()
        }
    }

    /// Returns the payload when occupied; when vacant, runs `on_vacant`
    /// exactly once for its side effects and returns the payload type's zero
    /// value. The callback cannot influence the returned zero.
    #[inline]
    pub fn unwrap_or_zeroed_else(self, on_vacant: impl FnOnce()) -> T {
        if self.is_occupied() {
            // SAFETY: discriminant checked.
            unsafe { raw::read_copy(&self.body.value) }
        } else {
            on_vacant();
            T::new_zeroed()
        }
    }
}

impl<T: Copy> Clone for PaddedSlot<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Copy> Copy for PaddedSlot<T> {}

impl<T: Copy> Default for PaddedSlot<T> {
    fn default() -> Self {
        Self::vacant()
    }
}

impl<T: Copy> From<T> for PaddedSlot<T> {
    fn from(value: T) -> Self {
        Self::occupied(value)
    }
}

impl<T: Copy> From<Option<T>> for PaddedSlot<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Self::occupied(v),
            None => Self::vacant(),
        }
    }
}

impl<T: Copy> From<PaddedSlot<T>> for Option<T> {
    fn from(slot: PaddedSlot<T>) -> Self {
        slot.to_option()
    }
}

impl<T: Copy + PartialEq> PartialEq for PaddedSlot<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self.is_occupied(), other.is_occupied()) {
            (true, true) => {
                // SAFETY: both discriminants checked.
                unsafe { raw::read_copy(&self.body.value) == raw::read_copy(&other.body.value) }
            }
            (false, false) => true,
            _ => false,
        }
    }
}

impl<T: Copy + Eq> Eq for PaddedSlot<T> {}

impl<T: Copy + fmt::Debug> fmt::Debug for PaddedSlot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_occupied() {
            // SAFETY: discriminant checked.
            f.debug_tuple("Occupied")
                .field(unsafe { raw::assume_init_ref::<T>(&self.body.value) })
                .finish()
        } else {
            f.write_str("Vacant")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PaddedSlot;
    use core::mem::size_of;

    #[test]
    fn vacant_and_occupied_round_trip() {
        let vacant: PaddedSlot<u32> = PaddedSlot::vacant();
        assert!(vacant.is_vacant());
        assert!(!vacant.is_occupied());

        let occupied = PaddedSlot::occupied(111u32);
        assert!(occupied.is_occupied());
        // SAFETY: constructed occupied.
        assert_eq!(unsafe { occupied.get_unchecked() }, 111);
    }

    #[test]
    fn fill_and_clear_match_fresh_construction() {
        let mut slot = PaddedSlot::vacant();
        slot.fill(111u64);
        assert_eq!(slot, PaddedSlot::occupied(111));

        slot.clear();
        assert_eq!(slot, PaddedSlot::vacant());
        assert_eq!(slot.as_bytes(), PaddedSlot::<u64>::vacant().as_bytes());
    }

    #[test]
    fn size_is_word_multiple() {
        assert_eq!(size_of::<PaddedSlot<u8>>() % size_of::<usize>(), 0);
        assert_eq!(size_of::<PaddedSlot<u64>>() % size_of::<usize>(), 0);
        assert_eq!(size_of::<PaddedSlot<[u8; 3]>>() % size_of::<usize>(), 0);
    }

    #[test]
    fn equal_payloads_give_equal_bytes() {
        // A payload smaller than the word: the rounding bytes must stay
        // deterministic through fill as well as construction.
        let a = PaddedSlot::occupied(7u8);
        let mut b = PaddedSlot::vacant();
        b.fill(7u8);
        assert_eq!(a.as_bytes(), b.as_bytes());

        let c = PaddedSlot::occupied(8u8);
        assert_ne!(a.as_bytes(), c.as_bytes());
    }

    #[test]
    fn const_constructors_seed_statics() {
        static SLOT: PaddedSlot<u32> = PaddedSlot::occupied(4);
        assert_eq!(SLOT.unwrap_or(0), 4);
    }
}
