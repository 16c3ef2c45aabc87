//! # lazypipe
//!
//! Composable, lazy sequence-transformation stages and a composer that
//! chains them into one pipeline.
//!
//! ## Overview
//!
//! A pipeline starts from a source (any collection, range or iterator) and
//! runs it through stages, left to right. Lazy stages wrap their input and
//! do no work until elements are pulled; terminal stages pull everything.
//!
//! - **Sequences**: [`seq::Seq`], the lazy sequence every stage returns
//! - **Stages**: map, filter, dedupe, projection, unpacking and taps in
//!   [`combinators`]
//! - **Terminals**: [`terminal::materialize`], [`terminal::drain`]
//! - **Reduction**: [`aggregate::aggregate`], [`aggregate::aggregate_from`]
//!   and their fallible `try_` forms
//! - **Composition**: [`p!`] and [`compose::compose`]
//!
//! Faults travel inside the sequence and surface when the faulty element is
//! pulled; see [`PipelineError`].
//!
//! ## Feature Flags
//!
//! - `record`: projection stages and the [`record::Record`] trait
//! - `derive`: `#[derive(Record)]`
//! - `fxhash`: `FxHash` for the dedupe seen-set
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use lazypipe::prelude::*;
//!
//! let source = vec![Some(0), None, None, Some(1), Some(2), Some(3), Some(4),
//!                   Some(5), Some(6), Some(7), Some(8), Some(9)];
//! let result = p!(
//!     source,
//!     exclude_none(),
//!     keep(|value: &i32| value % 2 == 0),
//!     apply(|value: i32| value * 2),
//!     materialize(),
//! )
//! .unwrap();
//! assert_eq!(result, vec![0, 4, 8, 12, 16]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

// Lets `#[derive(Record)]` output resolve `::lazypipe` inside this crate.
#[cfg(feature = "derive")]
extern crate self as lazypipe;

/// Prelude module for convenient imports.
///
/// Re-exports the stage factories, the [`Stage`](crate::stage::Stage)
/// trait and the [`p!`] macro.
///
/// # Usage
///
/// ```rust
/// use lazypipe::prelude::*;
/// ```
pub mod prelude {
    pub use crate::aggregate::{aggregate, aggregate_from, try_aggregate, try_aggregate_from};
    pub use crate::combinators::*;
    pub use crate::error::PipelineError;
    pub use crate::p;
    pub use crate::seq::{IntoSeq, Seq, seq};
    pub use crate::stage::{Stage, boxed};
    pub use crate::terminal::{drain, materialize};

    #[cfg(feature = "record")]
    pub use crate::Record;
}

pub mod aggregate;
pub mod combinators;
pub mod compose;
mod error;
#[cfg(feature = "record")]
pub mod record;
pub mod seq;
pub mod stage;
pub mod terminal;

pub use error::{PipelineError, Result};

#[cfg(feature = "record")]
pub use record::Record;

#[cfg(feature = "derive")]
pub use lazypipe_derive::Record;

#[cfg(feature = "record")]
#[doc(hidden)]
pub mod __private {
    pub use serde::Serialize;
}
