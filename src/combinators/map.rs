//! Element-wise mapping stages: [`apply`] and [`try_apply`].

use crate::error::{PipelineError, Result};
use crate::seq::{IntoSeq, Seq};
use crate::stage::Stage;

/// Stage mapping every element through a function.
///
/// Created by [`apply`].
#[derive(Clone)]
pub struct Apply<F> {
    function: F,
}

/// Returns a stage where element `i` of the output is `function(element i)`.
///
/// The stage is length-preserving and lazy: `function` runs when an element
/// is pulled, never before.
///
/// # Examples
///
/// ```rust
/// use lazypipe::prelude::*;
///
/// let result = p!(vec![1, 2, 3], apply(|value: i32| value + 1), materialize()).unwrap();
/// assert_eq!(result, vec![2, 3, 4]);
/// ```
pub const fn apply<F>(function: F) -> Apply<F> {
    Apply { function }
}

impl<S, B, F> Stage<S> for Apply<F>
where
    S: IntoSeq,
    F: FnMut(S::Item) -> B,
{
    type Output = Seq<Mapped<S::IntoSeq, F>>;

    fn apply(self, input: S) -> Result<Self::Output> {
        Ok(Seq::new(Mapped {
            inner: input.into_seq(),
            function: self.function,
        }))
    }
}

/// Lazy sequence produced by [`apply`].
#[derive(Clone)]
pub struct Mapped<I, F> {
    inner: I,
    function: F,
}

impl<A, B, I, F> Iterator for Mapped<I, F>
where
    I: Iterator<Item = Result<A>>,
    F: FnMut(A) -> B,
{
    type Item = Result<B>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|item| item.map(&mut self.function))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// Stage mapping every element through a fallible function.
///
/// Created by [`try_apply`].
#[derive(Clone)]
pub struct TryApply<F> {
    function: F,
}

/// Returns a stage mapping elements through a function that may fail.
///
/// An `Err` from `function` is surfaced as [`PipelineError::User`] at the
/// pull of the offending element, and the sequence halts there.
///
/// # Examples
///
/// ```rust
/// use lazypipe::prelude::*;
///
/// let parsed = p!(
///     vec!["1", "2", "x", "4"],
///     try_apply(|text: &str| text.parse::<i32>()),
/// )
/// .unwrap();
///
/// let pulled: Vec<_> = parsed.collect();
/// assert_eq!(pulled.len(), 3);
/// assert!(pulled[2].is_err());
/// ```
pub const fn try_apply<F>(function: F) -> TryApply<F> {
    TryApply { function }
}

impl<S, B, E, F> Stage<S> for TryApply<F>
where
    S: IntoSeq,
    F: FnMut(S::Item) -> std::result::Result<B, E>,
    E: Into<anyhow::Error>,
{
    type Output = Seq<TryMapped<S::IntoSeq, F>>;

    fn apply(self, input: S) -> Result<Self::Output> {
        Ok(Seq::new(TryMapped {
            inner: input.into_seq(),
            function: self.function,
        }))
    }
}

/// Lazy sequence produced by [`try_apply`].
#[derive(Clone)]
pub struct TryMapped<I, F> {
    inner: I,
    function: F,
}

impl<A, B, E, I, F> Iterator for TryMapped<I, F>
where
    I: Iterator<Item = Result<A>>,
    F: FnMut(A) -> std::result::Result<B, E>,
    E: Into<anyhow::Error>,
{
    type Item = Result<B>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.inner.next()?;
        Some(item.and_then(|value| (self.function)(value).map_err(PipelineError::user)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
