//! The lazy sequence abstraction shared by every stage.
//!
//! A lazy sequence is an iterator of `Result<T, PipelineError>`: elements are
//! produced on demand, in order, at most once each, and a fault travels
//! in-band as an `Err` item so that it surfaces exactly when the element that
//! caused it is pulled.
//!
//! - [`Seq`]: the wrapper every stage returns. It halts after the first fault.
//! - [`seq`]: lifts any iterable (finite or infinite) into a [`Seq`].
//! - [`IntoSeq`]: anything a pipeline can start from.
//!
//! # Examples
//!
//! ```rust
//! use lazypipe::seq::seq;
//!
//! let mut naturals = seq(0..);
//! assert_eq!(naturals.next().unwrap().unwrap(), 0);
//! assert_eq!(naturals.next().unwrap().unwrap(), 1);
//! ```

use std::collections::VecDeque;
use std::iter::FusedIterator;
use std::ops::{Range, RangeFrom, RangeInclusive};

use crate::error::Result;

/// A lazy sequence that stops after yielding its first fault.
///
/// Once an `Err` item has been pulled (or the underlying iterator is
/// exhausted), every further pull returns `None`. Consumption is one-shot:
/// a drained `Seq` cannot be replayed.
#[derive(Debug, Clone)]
pub struct Seq<I> {
    inner: I,
    halted: bool,
}

impl<I> Seq<I> {
    /// Wraps an iterator of results.
    pub const fn new(inner: I) -> Self {
        Self {
            inner,
            halted: false,
        }
    }

    /// Returns `true` once the sequence is exhausted or has faulted.
    pub const fn is_halted(&self) -> bool {
        self.halted
    }
}

impl<T, I> Seq<I>
where
    I: Iterator<Item = Result<T>>,
{
    /// Erases the concrete iterator type.
    ///
    /// Useful when stages are chosen at runtime, see
    /// [`compose`](crate::compose::compose).
    pub fn boxed<'a>(self) -> BoxedSeq<'a, T>
    where
        I: 'a,
    {
        let erased: Box<dyn Iterator<Item = Result<T>> + 'a> = Box::new(self);
        Seq::new(erased)
    }
}

impl<T, I> Iterator for Seq<I>
where
    I: Iterator<Item = Result<T>>,
{
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.halted {
            return None;
        }
        let item = self.inner.next();
        if !matches!(item, Some(Ok(_))) {
            self.halted = true;
        }
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.halted {
            (0, Some(0))
        } else {
            // A fault can end the sequence early, so no lower bound holds.
            (0, self.inner.size_hint().1)
        }
    }
}

impl<T, I> FusedIterator for Seq<I> where I: Iterator<Item = Result<T>> {}

/// A type-erased lazy sequence.
pub type BoxedSeq<'a, T> = Seq<Box<dyn Iterator<Item = Result<T>> + 'a>>;

/// Lifts plain elements into `Ok` items.
#[derive(Debug, Clone)]
pub struct Lift<I> {
    inner: I,
}

impl<I: Iterator> Iterator for Lift<I> {
    type Item = Result<I::Item>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(Ok)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// Wraps an arbitrary iterable into a lazy sequence.
///
/// Nothing is pulled from `iterable` until the returned sequence is.
///
/// # Examples
///
/// ```rust
/// use lazypipe::seq::seq;
///
/// let doubled: Vec<i32> = seq(vec![1, 2, 3])
///     .map(|item| item.map(|value| value * 2))
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(doubled, vec![2, 4, 6]);
/// ```
pub fn seq<I: IntoIterator>(iterable: I) -> Seq<Lift<I::IntoIter>> {
    Seq::new(Lift {
        inner: iterable.into_iter(),
    })
}

/// Conversion into a lazy sequence.
///
/// Every stage accepts any `IntoSeq` as its input, which lets a pipeline
/// start from a collection, a range, or the output of another pipeline.
/// An existing [`Seq`] converts to itself and is never re-wrapped.
pub trait IntoSeq {
    /// The element type of the sequence.
    type Item;

    /// The lazy sequence produced.
    type IntoSeq: Iterator<Item = Result<Self::Item>>;

    /// Converts `self` into a lazy sequence.
    fn into_seq(self) -> Self::IntoSeq;
}

impl<T, I> IntoSeq for Seq<I>
where
    I: Iterator<Item = Result<T>>,
{
    type Item = T;
    type IntoSeq = Self;

    #[inline]
    fn into_seq(self) -> Self {
        self
    }
}

impl<I: Iterator> IntoSeq for Lift<I> {
    type Item = I::Item;
    type IntoSeq = Seq<Self>;

    fn into_seq(self) -> Self::IntoSeq {
        Seq::new(self)
    }
}

impl<T> IntoSeq for Vec<T> {
    type Item = T;
    type IntoSeq = Seq<Lift<std::vec::IntoIter<T>>>;

    fn into_seq(self) -> Self::IntoSeq {
        seq(self)
    }
}

impl<T, const N: usize> IntoSeq for [T; N] {
    type Item = T;
    type IntoSeq = Seq<Lift<std::array::IntoIter<T, N>>>;

    fn into_seq(self) -> Self::IntoSeq {
        seq(self)
    }
}

impl<T> IntoSeq for VecDeque<T> {
    type Item = T;
    type IntoSeq = Seq<Lift<std::collections::vec_deque::IntoIter<T>>>;

    fn into_seq(self) -> Self::IntoSeq {
        seq(self)
    }
}

macro_rules! impl_into_seq_for_range {
    ($($range:ident),+ $(,)?) => {
        $(
            impl<A> IntoSeq for $range<A>
            where
                $range<A>: Iterator<Item = A>,
            {
                type Item = A;
                type IntoSeq = Seq<Lift<Self>>;

                fn into_seq(self) -> Self::IntoSeq {
                    seq(self)
                }
            }
        )+
    };
}

impl_into_seq_for_range!(Range, RangeInclusive, RangeFrom);
