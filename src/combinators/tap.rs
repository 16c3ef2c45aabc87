//! Pass-through stages that observe elements.
//!
//! A tap re-yields every element unchanged after handing a reference to an
//! [`Observer`]. Faults pass through unobserved.

use std::borrow::Cow;
use std::fmt::Debug;

use tracing::{Level, event};

use crate::error::Result;
use crate::seq::{IntoSeq, Seq};
use crate::stage::Stage;

/// Something that looks at each element flowing through a tap.
pub trait Observer<A> {
    /// Observes one element.
    fn observe(&mut self, item: &A);
}

impl<A, F> Observer<A> for F
where
    F: FnMut(&A),
{
    #[inline]
    fn observe(&mut self, item: &A) {
        self(item);
    }
}

/// Prints each element's `Debug` form on its own stdout line.
#[derive(Debug, Clone, Copy, Default)]
pub struct Print;

impl<A: Debug> Observer<A> for Print {
    fn observe(&mut self, item: &A) {
        println!("{item:?}");
    }
}

/// Emits a `tracing` debug event per element, tagged with a label.
#[derive(Debug, Clone)]
pub struct Trace {
    label: Cow<'static, str>,
}

impl<A: Debug> Observer<A> for Trace {
    fn observe(&mut self, item: &A) {
        event!(target: "lazypipe::tap", Level::DEBUG, label = %self.label, ?item, "element");
    }
}

/// Identity stage with a side effect.
///
/// Created by [`tap`], [`puts`] and [`trace`].
#[derive(Debug, Clone)]
pub struct Tap<O> {
    observer: O,
}

/// Returns a stage that hands each element to `observer` and re-yields it.
///
/// # Examples
///
/// ```rust
/// use lazypipe::prelude::*;
///
/// let mut seen = Vec::new();
/// let values = p!(
///     vec![1, 2, 3],
///     tap(|value: &i32| seen.push(*value)),
///     materialize(),
/// )
/// .unwrap();
/// assert_eq!(values, seen);
/// ```
pub const fn tap<O>(observer: O) -> Tap<O> {
    Tap { observer }
}

/// Returns a stage that prints each element to stdout as it passes.
///
/// Nothing is printed until the sequence is pulled; pair it with
/// [`drain`](crate::terminal::drain) to force the output.
pub const fn puts() -> Tap<Print> {
    tap(Print)
}

/// Returns a stage that logs each element as a `tracing` debug event with
/// target `lazypipe::tap`.
pub fn trace(label: impl Into<Cow<'static, str>>) -> Tap<Trace> {
    tap(Trace {
        label: label.into(),
    })
}

impl<S, O> Stage<S> for Tap<O>
where
    S: IntoSeq,
    O: Observer<S::Item>,
{
    type Output = Seq<Tapped<S::IntoSeq, O>>;

    fn apply(self, input: S) -> Result<Self::Output> {
        Ok(Seq::new(Tapped {
            inner: input.into_seq(),
            observer: self.observer,
        }))
    }
}

/// Lazy sequence produced by [`tap`], [`puts`] and [`trace`].
pub struct Tapped<I, O> {
    inner: I,
    observer: O,
}

impl<A, I, O> Iterator for Tapped<I, O>
where
    I: Iterator<Item = Result<A>>,
    O: Observer<A>,
{
    type Item = Result<A>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.inner.next()?;
        if let Ok(value) = &item {
            self.observer.observe(value);
        }
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;
    use crate::seq::seq;

    #[test]
    fn test_tap_observes_only_pulled_elements() {
        let mut observed = Vec::new();
        {
            let mut output = tap(|value: &u32| observed.push(*value))
                .apply(seq(10_u32..))
                .unwrap();
            assert_eq!(output.next().unwrap().unwrap(), 10);
            assert_eq!(output.next().unwrap().unwrap(), 11);
        }
        assert_eq!(observed, vec![10, 11]);
    }

    #[test]
    fn test_tap_skips_faults() {
        let mut count = 0;
        let items: Vec<Result<i32>> = vec![Ok(1), Err(PipelineError::EmptyReduction)];
        let output: Vec<Result<i32>> = tap(|_: &i32| count += 1)
            .apply(Seq::new(items.into_iter()))
            .unwrap()
            .collect();
        assert_eq!(output.len(), 2);
        assert_eq!(count, 1);
    }

    #[test]
    fn test_puts_passes_elements_through() {
        let output: Vec<&str> = puts()
            .apply(vec!["a", "b"])
            .unwrap()
            .map(Result::unwrap)
            .collect();
        assert_eq!(output, vec!["a", "b"]);
    }
}
