//! Lazy stage combinators.
//!
//! Each function here is a factory: it takes a user function and optional
//! parameters and returns a [`Stage`](crate::stage::Stage) that wraps its
//! input sequence without pulling from it. Factories are pure, so calling
//! one twice yields two independent stages.
//!
//! # Overview
//!
//! - [`apply`] / [`try_apply`]: map each element
//! - [`keep`] / [`exclude`] (and `try_` forms): filter by predicate
//! - [`exclude_none`]: drop `None` elements
//! - [`unique`] / [`unique_by`] / [`try_unique_by`]: drop repeated elements or keys
//! - [`splat`] / [`try_splat`]: call a function with tuple fields as arguments
//! - [`project`] / [`kproject`]: read named fields (feature `record`)
//! - [`splat_into`] / [`ksplat`]: rebuild values from rows (feature `record`)
//! - [`tap`] / [`puts`] / [`trace`]: observe elements in passing
//!
//! # Laws
//!
//! - **Partition**: `keep(p)` and `exclude(p)` over the same input are
//!   disjoint, cover it entirely and preserve relative order.
//! - **Dedupe idempotence**: `unique_by(k)` followed by `unique_by(k)` equals
//!   `unique_by(k)` alone.
//! - **Tap identity**: a tap never changes the sequence.

mod filter;
mod map;
#[cfg(feature = "record")]
mod project;
mod splat;
mod tap;
mod unique;

pub use filter::{
    ExcludeNone, Filter, Filtered, Present, TryFilter, TryFiltered, exclude, exclude_none, keep,
    try_exclude, try_keep,
};
pub use map::{Apply, Mapped, TryApply, TryMapped, apply, try_apply};
#[cfg(feature = "record")]
pub use project::{Project, Projected, Row, Unpack, Unpacked, kproject, ksplat, project, splat_into};
pub use splat::{Splat, SplatFn, Splatted, TrySplat, TrySplatted, splat, try_splat};
pub use tap::{Observer, Print, Tap, Tapped, Trace, puts, tap, trace};
pub use unique::{
    Deduped, KeyFn, SelfKey, TryDeduped, TryUnique, Unique, try_unique_by, unique, unique_by,
};
