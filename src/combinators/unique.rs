//! Order-preserving deduplication.
//!
//! The seen-set grows with the number of distinct keys encountered and is
//! never pruned. It is allocated when the stage is applied, so every run
//! starts empty.

use std::hash::Hash;

use crate::error::{PipelineError, Result};
use crate::seq::{IntoSeq, Seq};
use crate::stage::Stage;

#[cfg(feature = "fxhash")]
type SeenSet<K> = rustc_hash::FxHashSet<K>;

#[cfg(not(feature = "fxhash"))]
type SeenSet<K> = std::collections::HashSet<K>;

/// Derives the uniqueness key of an element.
pub trait KeyFn<A> {
    /// The key type.
    type Key: Eq + Hash;

    /// Returns the key of `item`.
    fn key(&mut self, item: &A) -> Self::Key;
}

impl<A, K, F> KeyFn<A> for F
where
    F: FnMut(&A) -> K,
    K: Eq + Hash,
{
    type Key = K;

    #[inline]
    fn key(&mut self, item: &A) -> K {
        self(item)
    }
}

/// Uses a clone of the element itself as its key.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelfKey;

impl<A> KeyFn<A> for SelfKey
where
    A: Clone + Eq + Hash,
{
    type Key = A;

    #[inline]
    fn key(&mut self, item: &A) -> A {
        item.clone()
    }
}

/// Stage emitting each key's first element only.
///
/// Created by [`unique`] and [`unique_by`].
#[derive(Clone)]
pub struct Unique<K> {
    key_fn: K,
}

/// Returns a stage that drops elements equal to an earlier one.
///
/// # Examples
///
/// ```rust
/// use lazypipe::prelude::*;
///
/// let letters = p!("AAAABBBCCDAABBB".chars(), seq, unique(), materialize()).unwrap();
/// assert_eq!(letters, vec!['A', 'B', 'C', 'D']);
/// ```
pub const fn unique() -> Unique<SelfKey> {
    Unique { key_fn: SelfKey }
}

/// Returns a stage that drops elements whose key was already seen.
///
/// The first element carrying a given key is emitted; later ones are not.
///
/// # Examples
///
/// ```rust
/// use lazypipe::prelude::*;
///
/// let letters = p!(
///     "ABBCcAD".chars(),
///     seq,
///     unique_by(|letter: &char| letter.to_ascii_lowercase()),
///     materialize(),
/// )
/// .unwrap();
/// assert_eq!(letters, vec!['A', 'B', 'C', 'D']);
/// ```
pub const fn unique_by<F>(key_fn: F) -> Unique<F> {
    Unique { key_fn }
}

impl<S, K> Stage<S> for Unique<K>
where
    S: IntoSeq,
    K: KeyFn<S::Item>,
{
    type Output = Seq<Deduped<S::IntoSeq, K, K::Key>>;

    fn apply(self, input: S) -> Result<Self::Output> {
        Ok(Seq::new(Deduped {
            inner: input.into_seq(),
            key_fn: self.key_fn,
            seen: SeenSet::default(),
        }))
    }
}

/// Lazy sequence produced by [`unique`] and [`unique_by`].
pub struct Deduped<I, F, K> {
    inner: I,
    key_fn: F,
    seen: SeenSet<K>,
}

impl<A, I, F, K> Iterator for Deduped<I, F, K>
where
    I: Iterator<Item = Result<A>>,
    F: KeyFn<A, Key = K>,
    K: Eq + Hash,
{
    type Item = Result<A>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.inner.next()? {
                Ok(value) => {
                    if self.seen.insert(self.key_fn.key(&value)) {
                        return Some(Ok(value));
                    }
                }
                Err(error) => return Some(Err(error)),
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.inner.size_hint().1)
    }
}

/// Stage deduplicating by a key function that may fail.
///
/// Created by [`try_unique_by`].
#[derive(Clone)]
pub struct TryUnique<F> {
    key_fn: F,
}

/// Like [`unique_by`], but the key function may fail.
///
/// A key error is surfaced as [`PipelineError::User`] in place of the
/// element being keyed, and the sequence halts there.
///
/// # Examples
///
/// ```rust
/// use lazypipe::prelude::*;
///
/// let mut ids = p!(
///     vec!["1", "01", "x", "2"],
///     try_unique_by(|text: &&str| text.parse::<u32>()),
/// )
/// .unwrap();
///
/// assert_eq!(ids.next().unwrap().unwrap(), "1");
/// assert!(ids.next().unwrap().is_err());
/// assert!(ids.next().is_none());
/// ```
pub const fn try_unique_by<F>(key_fn: F) -> TryUnique<F> {
    TryUnique { key_fn }
}

impl<S, F, K, E> Stage<S> for TryUnique<F>
where
    S: IntoSeq,
    F: FnMut(&S::Item) -> std::result::Result<K, E>,
    K: Eq + Hash,
    E: Into<anyhow::Error>,
{
    type Output = Seq<TryDeduped<S::IntoSeq, F, K>>;

    fn apply(self, input: S) -> Result<Self::Output> {
        Ok(Seq::new(TryDeduped {
            inner: input.into_seq(),
            key_fn: self.key_fn,
            seen: SeenSet::default(),
        }))
    }
}

/// Lazy sequence produced by [`try_unique_by`].
pub struct TryDeduped<I, F, K> {
    inner: I,
    key_fn: F,
    seen: SeenSet<K>,
}

impl<A, E, I, F, K> Iterator for TryDeduped<I, F, K>
where
    I: Iterator<Item = Result<A>>,
    F: FnMut(&A) -> std::result::Result<K, E>,
    K: Eq + Hash,
    E: Into<anyhow::Error>,
{
    type Item = Result<A>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let value = match self.inner.next()? {
                Ok(value) => value,
                Err(error) => return Some(Err(error)),
            };
            match (self.key_fn)(&value) {
                Ok(key) => {
                    if self.seen.insert(key) {
                        return Some(Ok(value));
                    }
                }
                Err(error) => return Some(Err(PipelineError::user(error))),
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.inner.size_hint().1)
    }
}
