//! Inline destructuring of optional slots.
//!
//! These macros expand to plain `if`/`else` control flow in the caller's own
//! scope. That is the point: a companion (`else`) arm is ordinary code in the
//! enclosing function, so it can use non-local control flow - `return`,
//! `break`, `continue`, `?` - to escape, which a closure-based API would
//! trap. The slot expression is evaluated exactly once, the binding is
//! introduced only after the discriminant check, and exactly one of the two
//! arms runs.
//!
//! Both macros are layout-agnostic: they work with any slot type exposing
//! the common contract. The by-reference form does not apply to
//! `PackedSlot`, which never hands out payload references.

/// Runs a block with a copy of the payload when the slot is occupied.
///
/// The bound variable is a by-value copy of the payload (`T: Copy`). An
/// optional `else` arm runs exactly when the slot is vacant; the two arms
/// are mutually exclusive and the `else` arm may exit the enclosing
/// function or loop.
///
/// # Examples
///
/// ```rust
/// use stow::{if_occupied, Slot};
///
/// let slot = Slot::occupied(21);
///
/// if_occupied!(slot, v => {
///     assert_eq!(v, 21);
/// } else {
///     unreachable!();
/// });
/// ```
///
/// Early return from the companion arm:
///
/// ```rust
/// use stow::{if_occupied, Slot};
///
/// fn doubled_or_bail(slot: Slot<i64>) -> i64 {
///     if_occupied!(slot, v => {
///         return v * 2;
///     } else {
///         return -1;
///     });
/// }
///
/// assert_eq!(doubled_or_bail(Slot::occupied(4)), 8);
/// assert_eq!(doubled_or_bail(Slot::vacant()), -1);
/// ```
#[macro_export]
macro_rules! if_occupied {
    ($slot:expr, $var:ident => $body:block else $fallback:block) => {
        match &$slot {
            __stow_slot => {
                if __stow_slot.is_occupied() {
                    // SAFETY: discriminant checked on the line above.
                    let $var = unsafe { __stow_slot.get_unchecked() };
                    $body
                } else {
                    $fallback
                }
            }
        }
    };
    ($slot:expr, $var:ident => $body:block) => {
        match &$slot {
            __stow_slot => {
                if __stow_slot.is_occupied() {
                    // SAFETY: discriminant checked on the line above.
                    let $var = unsafe { __stow_slot.get_unchecked() };
                    $body
                }
            }
        }
    };
}

/// Runs a block with a mutable borrow of the payload when the slot is
/// occupied, permitting in-place mutation.
///
/// The bound variable is a `&mut T` aliasing the payload inside the slot.
/// Otherwise identical to [`if_occupied!`]: optional `else` arm, mutually
/// exclusive arms, non-local exits propagate. Compact and padded layouts
/// only - a packed payload may be unaligned, so it cannot be borrowed.
///
/// # Examples
///
/// ```rust
/// use stow::{if_occupied_mut, Slot};
///
/// let mut slot = Slot::occupied(10);
///
/// if_occupied_mut!(slot, v => {
///     *v += 5;
/// });
///
/// assert_eq!(slot.unwrap_or(0), 15);
/// ```
#[macro_export]
macro_rules! if_occupied_mut {
    ($slot:expr, $var:ident => $body:block else $fallback:block) => {
        match &mut $slot {
            __stow_slot => {
                if __stow_slot.is_occupied() {
                    // SAFETY: discriminant checked on the line above.
                    let $var = unsafe { __stow_slot.as_mut_unchecked() };
                    $body
                } else {
                    $fallback
                }
            }
        }
    };
    ($slot:expr, $var:ident => $body:block) => {
        match &mut $slot {
            __stow_slot => {
                if __stow_slot.is_occupied() {
                    // SAFETY: discriminant checked on the line above.
                    let $var = unsafe { __stow_slot.as_mut_unchecked() };
                    $body
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::{PaddedSlot, Slot};

    #[test]
    fn present_runs_primary_with_payload() {
        let slot = Slot::occupied(123);
        let mut received = 0;

        if_occupied!(slot, value => {
            received = value;
        });

        assert_eq!(received, 123);
    }

    #[test]
    fn absent_skips_primary() {
        let slot: Slot<i32> = Slot::vacant();

        if_occupied!(slot, value => {
            let _ = value;
            panic!("primary arm ran for a vacant slot");
        });
    }

    #[test]
    fn absent_runs_companion_exactly_once() {
        let slot: Slot<i32> = Slot::vacant();
        let mut companion_runs = 0;

        if_occupied!(slot, value => {
            let _ = value;
            panic!("primary arm ran for a vacant slot");
        } else {
            companion_runs += 1;
        });

        assert_eq!(companion_runs, 1);
    }

    #[test]
    fn companion_can_return_out_of_the_caller() {
        fn inner(slot: Slot<i32>) -> i32 {
            if_occupied!(slot, value => {
                let _ = value;
            } else {
                return -1;
            });
            0
        }

        assert_eq!(inner(Slot::vacant()), -1);
        assert_eq!(inner(Slot::occupied(5)), 0);
    }

    #[test]
    fn mut_binding_mutates_in_place() {
        let mut slot = PaddedSlot::occupied(40u32);

        if_occupied_mut!(slot, value => {
            *value += 2;
        } else {
            panic!("companion arm ran for an occupied slot");
        });

        assert_eq!(slot.to_option(), Some(42));
    }

    #[test]
    fn slot_expression_evaluates_once() {
        let mut calls = 0;
        let mut slots = [Slot::occupied(7)];
        let mut index = || {
            calls += 1;
            0
        };

        if_occupied_mut!(slots[index()], value => {
            *value += 1;
        });

        assert_eq!(calls, 1);
        assert_eq!(slots[0].to_option(), Some(8));
    }
}
