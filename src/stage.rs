//! The [`Stage`] trait: one step of a pipeline.
//!
//! A stage takes the running value of a pipeline (usually a lazy sequence)
//! and produces the next one. Lazy stages wrap their input without pulling
//! from it; terminal stages pull eagerly and report the first fault.
//!
//! Any `FnOnce(Input) -> Output` is a stage, so arbitrary callables can be
//! mixed with the combinators of this crate.
//!
//! # Examples
//!
//! ```rust
//! use lazypipe::prelude::*;
//!
//! let total = p!(
//!     vec![1, 2, 3],
//!     apply(|value: i32| value * 10),
//!     materialize(),
//!     |values: Vec<i32>| values.iter().sum::<i32>(),
//! )
//! .unwrap();
//! assert_eq!(total, 60);
//! ```

use std::marker::PhantomData;

use crate::error::Result;
use crate::seq::{BoxedSeq, IntoSeq, Seq};

/// A unary step of a pipeline.
///
/// Stage values hold configuration only (a user function and its
/// parameters). Any per-run state, such as the seen-set of
/// [`unique`](crate::combinators::unique), is allocated inside [`apply`],
/// so two applications never share it.
///
/// [`apply`]: Stage::apply
pub trait Stage<Input> {
    /// The value this stage produces.
    type Output;

    /// Runs the stage on `input`.
    ///
    /// # Errors
    ///
    /// Lazy stages never fail here. Terminal stages return the first fault
    /// they pull from `input`, or their own fault.
    fn apply(self, input: Input) -> Result<Self::Output>;
}

impl<Input, Output, F> Stage<Input> for F
where
    F: FnOnce(Input) -> Output,
{
    type Output = Output;

    #[inline]
    fn apply(self, input: Input) -> Result<Output> {
        Ok(self(input))
    }
}

/// Stage that erases the concrete type of its input sequence.
///
/// Created by [`boxed`].
pub struct Boxed<'a> {
    lifetime: PhantomData<fn() -> &'a ()>,
}

impl<'a, S> Stage<S> for Boxed<'a>
where
    S: IntoSeq,
    S::IntoSeq: 'a,
{
    type Output = BoxedSeq<'a, S::Item>;

    fn apply(self, input: S) -> Result<Self::Output> {
        Ok(Seq::new(input.into_seq()).boxed())
    }
}

impl Clone for Boxed<'_> {
    fn clone(&self) -> Self {
        boxed()
    }
}

/// Returns a stage converting any sequence into a [`BoxedSeq`].
///
/// Runtime-assembled pipelines need a single running type; see
/// [`compose`](crate::compose::compose).
pub const fn boxed<'a>() -> Boxed<'a> {
    Boxed {
        lifetime: PhantomData,
    }
}
