//! Folding a sequence into a single value.
//!
//! Aggregation is eager: applying the stage pulls the whole input.
//!
//! - [`aggregate`]: no seed, the first element starts the fold
//! - [`aggregate_from`]: an explicit seed starts the fold
//! - [`try_aggregate`] / [`try_aggregate_from`]: the same, with a reduce
//!   function that may fail
//!
//! Having two constructors keeps "no seed" distinct from every seed value,
//! including `None` and `()`.

use tracing::{Level, event};

use crate::error::{PipelineError, Result};
use crate::seq::IntoSeq;
use crate::stage::Stage;

/// Seedless fold stage.
///
/// Created by [`aggregate`].
#[derive(Clone)]
pub struct Aggregate<F> {
    function: F,
}

/// Returns a stage folding `acc = function(acc, element)` left to right,
/// starting from the first element.
///
/// Applying it to an empty sequence fails with
/// [`PipelineError::EmptyReduction`].
///
/// # Examples
///
/// ```rust
/// use lazypipe::prelude::*;
/// use lazypipe::PipelineError;
///
/// let sum = p!(vec![1, 2, 3, 4], aggregate(|acc: i32, value: i32| acc + value)).unwrap();
/// assert_eq!(sum, 10);
///
/// let empty: Vec<i32> = Vec::new();
/// let fault = p!(empty, aggregate(|acc: i32, value: i32| acc + value)).unwrap_err();
/// assert!(matches!(fault, PipelineError::EmptyReduction));
/// ```
pub const fn aggregate<F>(function: F) -> Aggregate<F> {
    Aggregate { function }
}

impl<S, F> Stage<S> for Aggregate<F>
where
    S: IntoSeq,
    F: FnMut(S::Item, S::Item) -> S::Item,
{
    type Output = S::Item;

    fn apply(mut self, input: S) -> Result<Self::Output> {
        let mut sequence = input.into_seq();
        let Some(first) = sequence.next() else {
            event!(Level::DEBUG, "seedless aggregate over empty sequence");
            return Err(PipelineError::EmptyReduction);
        };
        let mut accumulator = first?;
        for item in sequence {
            accumulator = (self.function)(accumulator, item?);
        }
        Ok(accumulator)
    }
}

/// Seeded fold stage.
///
/// Created by [`aggregate_from`].
#[derive(Clone)]
pub struct AggregateFrom<T, F> {
    seed: T,
    function: F,
}

/// Returns a stage folding `acc = function(acc, element)` left to right,
/// starting from `seed`.
///
/// An empty input yields `seed` unchanged.
///
/// # Examples
///
/// ```rust
/// use lazypipe::prelude::*;
///
/// let sum = p!(Vec::<i32>::new(), aggregate_from(0, |acc: i32, value: i32| acc + value)).unwrap();
/// assert_eq!(sum, 0);
///
/// let longest = p!(
///     vec!["a", "abc", "ab"],
///     aggregate_from(None, |acc: Option<usize>, word: &str| {
///         Some(acc.map_or(word.len(), |length| length.max(word.len())))
///     }),
/// )
/// .unwrap();
/// assert_eq!(longest, Some(3));
/// ```
pub const fn aggregate_from<T, F>(seed: T, function: F) -> AggregateFrom<T, F> {
    AggregateFrom { seed, function }
}

impl<S, T, F> Stage<S> for AggregateFrom<T, F>
where
    S: IntoSeq,
    F: FnMut(T, S::Item) -> T,
{
    type Output = T;

    fn apply(mut self, input: S) -> Result<T> {
        let mut accumulator = self.seed;
        for item in input.into_seq() {
            accumulator = (self.function)(accumulator, item?);
        }
        Ok(accumulator)
    }
}

/// Seedless fold stage with a fallible reduce function.
///
/// Created by [`try_aggregate`].
#[derive(Clone)]
pub struct TryAggregate<F> {
    function: F,
}

/// Like [`aggregate`], but `function` may fail.
///
/// The first `Err` from `function` stops the fold and is returned as
/// [`PipelineError::User`]; no further elements are pulled.
///
/// # Examples
///
/// ```rust
/// use lazypipe::prelude::*;
///
/// let checked_sum = |acc: i32, value: i32| {
///     acc.checked_add(value).ok_or_else(|| anyhow::anyhow!("sum overflowed"))
/// };
///
/// assert_eq!(p!(vec![1, 2, 3], try_aggregate(checked_sum)).unwrap(), 6);
///
/// let fault = p!(vec![i32::MAX, 1], try_aggregate(checked_sum)).unwrap_err();
/// assert_eq!(fault.to_string(), "sum overflowed");
/// ```
pub const fn try_aggregate<F>(function: F) -> TryAggregate<F> {
    TryAggregate { function }
}

impl<S, E, F> Stage<S> for TryAggregate<F>
where
    S: IntoSeq,
    F: FnMut(S::Item, S::Item) -> std::result::Result<S::Item, E>,
    E: Into<anyhow::Error>,
{
    type Output = S::Item;

    fn apply(mut self, input: S) -> Result<Self::Output> {
        let mut sequence = input.into_seq();
        let Some(first) = sequence.next() else {
            event!(Level::DEBUG, "seedless aggregate over empty sequence");
            return Err(PipelineError::EmptyReduction);
        };
        let mut accumulator = first?;
        for item in sequence {
            accumulator = (self.function)(accumulator, item?).map_err(reduce_fault)?;
        }
        Ok(accumulator)
    }
}

/// Seeded fold stage with a fallible reduce function.
///
/// Created by [`try_aggregate_from`].
#[derive(Clone)]
pub struct TryAggregateFrom<T, F> {
    seed: T,
    function: F,
}

/// Like [`aggregate_from`], but `function` may fail.
///
/// # Examples
///
/// ```rust
/// use lazypipe::prelude::*;
///
/// let total = p!(
///     vec!["4", "5", "six"],
///     try_aggregate_from(0, |acc: u32, text: &str| text.parse::<u32>().map(|value| acc + value)),
/// );
/// assert!(total.unwrap_err().user_error::<std::num::ParseIntError>().is_some());
/// ```
pub const fn try_aggregate_from<T, F>(seed: T, function: F) -> TryAggregateFrom<T, F> {
    TryAggregateFrom { seed, function }
}

impl<S, T, E, F> Stage<S> for TryAggregateFrom<T, F>
where
    S: IntoSeq,
    F: FnMut(T, S::Item) -> std::result::Result<T, E>,
    E: Into<anyhow::Error>,
{
    type Output = T;

    fn apply(mut self, input: S) -> Result<T> {
        let mut accumulator = self.seed;
        for item in input.into_seq() {
            accumulator = (self.function)(accumulator, item?).map_err(reduce_fault)?;
        }
        Ok(accumulator)
    }
}

fn reduce_fault<E: Into<anyhow::Error>>(error: E) -> PipelineError {
    let fault = PipelineError::user(error);
    event!(Level::DEBUG, %fault, "aggregate stopped at reduce fault");
    fault
}
