//! `Slot` - the compact (default) layout.
//!
//! Field order is left to the compiler (`repr(Rust)`), which packs the
//! discriminant into whatever slack the payload's alignment leaves. This is
//! the layout to reach for unless a size or byte-comparison guarantee is
//! needed; there is no cross-type size relationship between instantiations,
//! and padding bytes are unspecified, so whole-value byte comparison is not
//! meaningful here (see `PaddedSlot` for that).

use core::fmt;
use core::mem::MaybeUninit;

use zerocopy::FromZeroes;

use super::raw;

/// A value-semantic optional slot in the compact layout.
///
/// Either holds exactly one `T` or holds nothing. The vacant state keeps the
/// payload bits uninitialized; the discriminant is the only source of truth,
/// and every safe accessor checks it first.
///
/// # Examples
///
/// ```
/// use stow::Slot;
///
/// let mut slot = Slot::vacant();
/// assert!(slot.is_vacant());
///
/// slot.fill(7);
/// assert!(slot.is_occupied());
/// assert_eq!(slot.unwrap_or(0), 7);
/// ```
#[derive(Clone, Copy)]
pub struct Slot<T: Copy> {
    value: MaybeUninit<T>,
    occupied: bool,
}

impl<T: Copy> Slot<T> {
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
        // SAFETY: caller guarantees the slot is occupied, so the payload is
        // initialized.
        unsafe { raw::read_copy(&self.value) }
    }

    /// Borrows the payload without checking the discriminant.
    ///
    /// # Safety
    /// The slot must be occupied.
    #[inline(always)]
    pub unsafe fn as_ref_unchecked(&self) -> &T {
        debug_assert!(self.occupied, "as_ref_unchecked on a vacant slot");
        // SAFETY: caller guarantees occupancy.
        unsafe { raw::assume_init_ref(&self.value) }
    }

    /// Mutably borrows the payload without checking the discriminant,
    /// permitting in-place mutation.
    ///
    /// # Safety
    /// The slot must be occupied.
    #[inline(always)]
    pub unsafe fn as_mut_unchecked(&mut self) -> &mut T {
        debug_assert!(self.occupied, "as_mut_unchecked on a vacant slot");
        // SAFETY: caller guarantees occupancy; `&mut self` makes the borrow
        // exclusive.
        unsafe { raw::assume_init_mut(&mut self.value) }
    }

    /// Converts to the std vocabulary.
    #[inline]
    pub fn to_option(self) -> Option<T> {
        if self.occupied {
            // SAFETY: discriminant checked.
            Some(unsafe { raw::read_copy(&self.value) })
        } else {
            None
        }
    }

    /// Returns `other` if both slots are occupied, a vacant slot otherwise.
    ///
    /// Both operands are ordinary arguments and are always fully evaluated
    /// before the combinator runs; there is no laziness here.
    ///
    /// ```
    /// use stow::Slot;
    ///
    /// assert_eq!(Slot::occupied(1).and(Slot::occupied(2)), Slot::occupied(2));
    /// assert_eq!(Slot::occupied(1).and(Slot::vacant()), Slot::vacant());
    /// ```
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
    ///
    /// ```
    /// use stow::Slot;
    ///
    /// assert_eq!(Slot::occupied(1).or(Slot::occupied(2)), Slot::occupied(1));
    /// assert_eq!(Slot::vacant().or(Slot::occupied(2)), Slot::occupied(2));
    /// ```
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
    ///
    /// `default` is evaluated eagerly by ordinary call semantics whether or
    /// not it is used.
    #[inline]
    pub fn unwrap_or(self, default: T) -> T {
        if self.occupied {
            // SAFETY: discriminant checked.
            unsafe { raw::read_copy(&self.value) }
        } else {
            default
        }
    }
}

impl<T: Copy + FromZeroes> Slot<T> {
    /// Returns the payload, or the payload type's zero value when vacant.
    ///
    /// The `FromZeroes` bound is the capability that makes "zero value"
    /// well-defined for the payload: only types for which the all-zeroes bit
    /// pattern is valid can use the zeroed-fallback extractors.
    #[inline]
    pub fn unwrap_or_zeroed(self) -> T {
        if self.occupied {
            // SAFETY: discriminant checked.
            unsafe { raw::read_copy(&self.value) }
        } else {
            T::new_zeroed()
        }
    }

    /// Returns the payload when occupied; when vacant, runs `on_vacant`
    /// exactly once for its side effects and returns the payload type's zero
    /// value.
    ///
    /// The callback cannot influence the returned zero - its signature
    /// returns `()`. When occupied it is never invoked.
    ///
    /// ```
    /// use stow::Slot;
    ///
    /// let slot: Slot<u32> = Slot::vacant();
    /// let mut missed = false;
    /// let value = slot.unwrap_or_zeroed_else(|| missed = true);
    /// assert_eq!(value, 0);
    /// assert!(missed);
    /// ```
    #[inline]
    pub fn unwrap_or_zeroed_else(self, on_vacant: impl FnOnce()) -> T {
        if self.occupied {
            // SAFETY: discriminant checked.
            unsafe { raw::read_copy(&self.value) }
        } else {
            on_vacant();
            T::new_zeroed()
        }
    }
}

impl<T: Copy> Default for Slot<T> {
    fn default() -> Self {
        Self::vacant()
    }
}

impl<T: Copy> From<T> for Slot<T> {
    fn from(value: T) -> Self {
        Self::occupied(value)
    }
}

impl<T: Copy> From<Option<T>> for Slot<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Self::occupied(v),
            None => Self::vacant(),
        }
    }
}

impl<T: Copy> From<Slot<T>> for Option<T> {
    fn from(slot: Slot<T>) -> Self {
        slot.to_option()
    }
}

impl<T: Copy + PartialEq> PartialEq for Slot<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self.occupied, other.occupied) {
            // SAFETY: both discriminants checked.
            (true, true) => unsafe { raw::read_copy(&self.value) == raw::read_copy(&other.value) },
            (false, false) => true,
            _ => false,
        }
    }
}

impl<T: Copy + Eq> Eq for Slot<T> {}

impl<T: Copy + fmt::Debug> fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.occupied {
            // SAFETY: discriminant checked.
            f.debug_tuple("Occupied")
                .field(unsafe { raw::assume_init_ref::<T>(&self.value) })
                .finish()
        } else {
            f.write_str("Vacant")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Slot;

    #[test]
    fn vacant_reports_both_predicates() {
        let slot: Slot<i32> = Slot::vacant();
        assert!(slot.is_vacant());
        assert!(!slot.is_occupied());
    }

    #[test]
    fn occupied_reads_back_unchecked() {
        let slot = Slot::occupied(111);
        assert!(slot.is_occupied());
        assert!(!slot.is_vacant());
        // SAFETY: constructed occupied.
        assert_eq!(unsafe { slot.get_unchecked() }, 111);
    }

    #[test]
    fn fill_and_clear_transition_in_place() {
        let mut slot = Slot::vacant();
        slot.fill(111);
        assert_eq!(slot, Slot::occupied(111));

        slot.fill(222);
        assert_eq!(slot, Slot::occupied(222));

        slot.clear();
        assert_eq!(slot, Slot::vacant());
    }

    #[test]
    fn replace_and_take_return_prior_state() {
        let mut slot = Slot::occupied(1);
        assert_eq!(slot.replace(2), Slot::occupied(1));
        assert_eq!(slot.take(), Slot::occupied(2));
        assert!(slot.is_vacant());
        assert_eq!(slot.take(), Slot::vacant());
    }

    #[test]
    fn mutation_through_unchecked_mut_borrow() {
        let mut slot = Slot::occupied(10);
        // SAFETY: occupied.
        unsafe { *slot.as_mut_unchecked() += 5 };
        assert_eq!(slot.to_option(), Some(15));
    }

    #[test]
    fn option_bridges_round_trip() {
        assert_eq!(Slot::from(Some(3)).to_option(), Some(3));
        assert_eq!(Slot::<i32>::from(None).to_option(), None);
        assert_eq!(Slot::from(3), Slot::occupied(3));
    }

    #[test]
    fn default_is_vacant() {
        assert!(Slot::<u8>::default().is_vacant());
    }

    #[test]
    fn const_constructors_seed_statics() {
        static VACANT: Slot<u64> = Slot::vacant();
        static OCCUPIED: Slot<u64> = Slot::occupied(9);
        assert!(VACANT.is_vacant());
        assert_eq!(OCCUPIED.unwrap_or(0), 9);
    }
}
