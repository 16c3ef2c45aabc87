//! Filtering stages.
//!
//! [`keep`] and [`exclude`] are duals: for the same predicate their outputs
//! partition the input, each preserving relative order.

use crate::error::{PipelineError, Result};
use crate::seq::{IntoSeq, Seq};
use crate::stage::Stage;

/// Stage retaining the elements whose predicate result equals `retain`.
///
/// Created by [`keep`] and [`exclude`].
#[derive(Clone)]
pub struct Filter<P> {
    predicate: P,
    retain: bool,
}

/// Returns a stage retaining elements for which `predicate` is `true`.
///
/// # Examples
///
/// ```rust
/// use lazypipe::prelude::*;
///
/// let evens = p!(0..10, keep(|value: &i32| value % 2 == 0), materialize()).unwrap();
/// assert_eq!(evens, vec![0, 2, 4, 6, 8]);
/// ```
pub const fn keep<P>(predicate: P) -> Filter<P> {
    Filter {
        predicate,
        retain: true,
    }
}

/// Returns a stage removing elements for which `predicate` is `true`.
///
/// # Examples
///
/// ```rust
/// use lazypipe::prelude::*;
///
/// let large = p!(0..20, exclude(|value: &i32| *value < 10), materialize()).unwrap();
/// assert_eq!(large, (10..20).collect::<Vec<_>>());
/// ```
pub const fn exclude<P>(predicate: P) -> Filter<P> {
    Filter {
        predicate,
        retain: false,
    }
}

impl<S, P> Stage<S> for Filter<P>
where
    S: IntoSeq,
    P: FnMut(&S::Item) -> bool,
{
    type Output = Seq<Filtered<S::IntoSeq, P>>;

    fn apply(self, input: S) -> Result<Self::Output> {
        Ok(Seq::new(Filtered {
            inner: input.into_seq(),
            predicate: self.predicate,
            retain: self.retain,
        }))
    }
}

/// Lazy sequence produced by [`keep`] and [`exclude`].
#[derive(Clone)]
pub struct Filtered<I, P> {
    inner: I,
    predicate: P,
    retain: bool,
}

impl<A, I, P> Iterator for Filtered<I, P>
where
    I: Iterator<Item = Result<A>>,
    P: FnMut(&A) -> bool,
{
    type Item = Result<A>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.inner.next()? {
                Ok(value) if (self.predicate)(&value) != self.retain => {}
                item => return Some(item),
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.inner.size_hint().1)
    }
}

/// Stage filtering with a fallible predicate.
///
/// Created by [`try_keep`] and [`try_exclude`].
#[derive(Clone)]
pub struct TryFilter<P> {
    predicate: P,
    retain: bool,
}

/// Like [`keep`], but the predicate may fail.
///
/// A predicate error is surfaced as [`PipelineError::User`] in place of the
/// element being tested.
pub const fn try_keep<P>(predicate: P) -> TryFilter<P> {
    TryFilter {
        predicate,
        retain: true,
    }
}

/// Like [`exclude`], but the predicate may fail.
pub const fn try_exclude<P>(predicate: P) -> TryFilter<P> {
    TryFilter {
        predicate,
        retain: false,
    }
}

impl<S, E, P> Stage<S> for TryFilter<P>
where
    S: IntoSeq,
    P: FnMut(&S::Item) -> std::result::Result<bool, E>,
    E: Into<anyhow::Error>,
{
    type Output = Seq<TryFiltered<S::IntoSeq, P>>;

    fn apply(self, input: S) -> Result<Self::Output> {
        Ok(Seq::new(TryFiltered {
            inner: input.into_seq(),
            predicate: self.predicate,
            retain: self.retain,
        }))
    }
}

/// Lazy sequence produced by [`try_keep`] and [`try_exclude`].
#[derive(Clone)]
pub struct TryFiltered<I, P> {
    inner: I,
    predicate: P,
    retain: bool,
}

impl<A, E, I, P> Iterator for TryFiltered<I, P>
where
    I: Iterator<Item = Result<A>>,
    P: FnMut(&A) -> std::result::Result<bool, E>,
    E: Into<anyhow::Error>,
{
    type Item = Result<A>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let value = match self.inner.next()? {
                Ok(value) => value,
                Err(error) => return Some(Err(error)),
            };
            match (self.predicate)(&value) {
                Ok(verdict) if verdict == self.retain => return Some(Ok(value)),
                Ok(_) => {}
                Err(error) => return Some(Err(PipelineError::user(error))),
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.inner.size_hint().1)
    }
}

/// Stage dropping `None` elements and unwrapping the rest.
///
/// Created by [`exclude_none`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ExcludeNone;

/// Returns a stage that removes `None` elements from a sequence of options.
///
/// The surviving elements are unwrapped, so `Option<T>` in gives `T` out.
///
/// # Examples
///
/// ```rust
/// use lazypipe::prelude::*;
///
/// let present = p!(vec![None, Some(1), None, Some(2)], exclude_none(), materialize()).unwrap();
/// assert_eq!(present, vec![1, 2]);
/// ```
pub const fn exclude_none() -> ExcludeNone {
    ExcludeNone
}

impl<S, T> Stage<S> for ExcludeNone
where
    S: IntoSeq<Item = Option<T>>,
{
    type Output = Seq<Present<S::IntoSeq>>;

    fn apply(self, input: S) -> Result<Self::Output> {
        Ok(Seq::new(Present {
            inner: input.into_seq(),
        }))
    }
}

/// Lazy sequence produced by [`exclude_none`].
#[derive(Debug, Clone)]
pub struct Present<I> {
    inner: I,
}

impl<T, I> Iterator for Present<I>
where
    I: Iterator<Item = Result<Option<T>>>,
{
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.inner.next()? {
                Ok(Some(value)) => return Some(Ok(value)),
                Ok(None) => {}
                Err(error) => return Some(Err(error)),
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.inner.size_hint().1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seq::seq;
    use rstest::rstest;

    fn run<S>(stage: S, input: Vec<i32>) -> Vec<i32>
    where
        S: Stage<Vec<i32>>,
        S::Output: Iterator<Item = Result<i32>>,
    {
        stage
            .apply(input)
            .unwrap()
            .map(Result::unwrap)
            .collect()
    }

    #[rstest]
    #[case(vec![], vec![])]
    #[case(vec![1, 3, 5], vec![])]
    #[case(vec![4, 1, 2, 7, 8], vec![4, 2, 8])]
    fn test_keep_even(#[case] input: Vec<i32>, #[case] expected: Vec<i32>) {
        assert_eq!(run(keep(|value: &i32| value % 2 == 0), input), expected);
    }

    #[rstest]
    #[case(vec![], vec![])]
    #[case(vec![1, 3, 5], vec![1, 3, 5])]
    #[case(vec![4, 1, 2, 7, 8], vec![1, 7])]
    fn test_exclude_even(#[case] input: Vec<i32>, #[case] expected: Vec<i32>) {
        assert_eq!(run(exclude(|value: &i32| value % 2 == 0), input), expected);
    }

    #[test]
    fn test_exclude_none_unwraps_survivors() {
        let input = vec![None, None, Some(0), None, Some(1), Some(2), None];
        let output: Vec<i32> = exclude_none()
            .apply(seq(input))
            .unwrap()
            .map(Result::unwrap)
            .collect();
        assert_eq!(output, vec![0, 1, 2]);
    }

    #[test]
    fn test_try_keep_surfaces_predicate_fault() {
        let mut output = try_keep(|value: &i32| {
            if *value < 0 {
                Err(anyhow::anyhow!("negative: {value}"))
            } else {
                Ok(*value > 1)
            }
        })
        .apply(vec![1, 2, -3, 4])
        .unwrap();

        assert_eq!(output.next().unwrap().unwrap(), 2);
        assert_eq!(output.next().unwrap().unwrap_err().to_string(), "negative: -3");
        assert!(output.next().is_none());
    }

    #[test]
    fn test_try_exclude_retains_false_verdicts() {
        let output: Vec<i32> = try_exclude(|value: &i32| Ok::<_, anyhow::Error>(*value > 2))
            .apply(vec![1, 2, 3, 4])
            .unwrap()
            .map(Result::unwrap)
            .collect();
        assert_eq!(output, vec![1, 2]);
    }
}
