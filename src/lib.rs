//! # `stow` - Value-Semantic Optional Slots
//!
//! A foundational, zero-allocation "optional value" primitive: a slot that
//! either holds exactly one value of a caller-chosen type or holds nothing,
//! together with a boolean-style combinator algebra and inline destructuring
//! macros for working with it without null-pointer or uninitialized-read
//! hazards.
//!
//! Unlike `core::option::Option`, a slot commits to an explicit physical
//! layout at the declaration site, which makes it suitable for embedding in
//! layout-sensitive structs, statics, and packed records throughout a larger
//! codebase.
//!
//! ## Layout Policies
//!
//! One logical container, three physical layouts:
//!
//! 1. **Compact** ([`Slot<T>`]): the default. Field order is left to the
//!    compiler, which packs the discriminant into whatever slack the payload
//!    leaves. Smallest in the common case; no cross-type size relationship.
//!
//! 2. **Padded** ([`PaddedSlot<T>`]): the discriminant and the payload each
//!    get their own pointer-width slot, so the total size is always a
//!    multiple of the platform word and every byte is initialized
//!    deterministically. This is what makes whole-value byte comparison
//!    ([`PaddedSlot::as_bytes`]) meaningful and gives uniform struct sizes
//!    across instantiations.
//!
//! 3. **Packed** ([`PackedSlot<T>`]): no padding anywhere; the size is
//!    exactly `size_of::<T>() + 1`. The payload may land unaligned, so this
//!    layout is by-value only - it never hands out references to the payload.
//!
//! All three expose the identical logical API; only size and alignment
//! differ. Payloads are plain `Copy` data: the slots never allocate, never
//! run drop glue, and add no concurrency guarantees or hazards beyond those
//! of the payload type itself.
//!
//! ## Safety Guarantees
//!
//! - The vacant state stores a genuinely uninitialized payload
//!   (`MaybeUninit<T>`), not a sentinel, and safe code can never observe it:
//!   every safe accessor checks the discriminant first.
//! - The only way to read a payload without a check is through the
//!   `unsafe` unchecked accessors, whose precondition (the slot is occupied)
//!   is additionally enforced by a `debug_assert!` in debug builds.
//! - All interpretation of payload bits is centralized in one audited
//!   module (`slot::raw`), each operation carrying its own safety contract.
//!
//! ## Example
//!
//! ```rust
//! use stow::{if_occupied, Slot};
//!
//! let primary: Slot<u32> = Slot::vacant();
//! let fallback = Slot::occupied(8080);
//!
//! // First-present-wins composition.
//! let port = primary.or(fallback);
//! assert_eq!(port.unwrap_or(80), 8080);
//!
//! if_occupied!(port, p => {
//!     assert_eq!(p, 8080);
//! } else {
//!     unreachable!();
//! });
//! ```

#![no_std]
#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::inline_always)]

pub mod slot;

mod macros;

pub use slot::{PackedSlot, PaddedSlot, Slot};

// The capability bound required by the zeroed-fallback extractors,
// re-exported so downstream code doesn't need a direct zerocopy dependency.
pub use zerocopy::FromZeroes;
