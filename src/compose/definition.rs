//! Pipelines assembled at runtime.
//!
//! [`p!`](crate::p!) needs its stages spelled out in code. When the list of
//! stages is data (built from configuration, user choices, and so on), use
//! [`compose`] over a vector of [`Entry`] values instead. All entries share
//! one running type, usually a [`BoxedSeq`].

use std::fmt;

use tracing::{Level, event};

use crate::error::{PipelineError, Result};
use crate::seq::{BoxedSeq, IntoSeq, Seq};
use crate::stage::Stage;

/// A stage with its type erased, taking and returning the running type `T`.
pub type BoxedStage<'a, T> = Box<dyn FnOnce(T) -> Result<T> + 'a>;

/// One entry of a pipeline definition.
pub enum Entry<'a, T> {
    /// The initial value. Must be the first entry, and only the first.
    Source(T),
    /// A step applied to the running value.
    Stage(BoxedStage<'a, T>),
}

impl<'a, T> Entry<'a, T> {
    /// Wraps a source value.
    pub const fn source(value: T) -> Self {
        Self::Source(value)
    }

    /// Wraps a stage whose output has the running type.
    pub fn stage<S>(stage: S) -> Self
    where
        S: Stage<T, Output = T> + 'a,
    {
        Self::Stage(Box::new(move |input| stage.apply(input)))
    }

    /// Returns `true` for a source entry.
    pub const fn is_source(&self) -> bool {
        matches!(self, Self::Source(_))
    }
}

impl<'a, A: 'a> Entry<'a, BoxedSeq<'a, A>> {
    /// Wraps a stage producing any sequence of `A`, erasing its output so
    /// that it fits the running type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazypipe::prelude::*;
    /// use lazypipe::compose::{Entry, compose};
    ///
    /// let doubled = true;
    /// let mut entries = vec![Entry::source(seq(1..=4).boxed())];
    /// if doubled {
    ///     entries.push(Entry::erased(apply(|value: i32| value * 2)));
    /// }
    /// entries.push(Entry::erased(keep(|value: &i32| *value > 2)));
    ///
    /// let output = compose(entries).and_then(|sequence| materialize().apply(sequence));
    /// assert_eq!(output.unwrap(), vec![4, 6, 8]);
    /// ```
    pub fn erased<S>(stage: S) -> Self
    where
        S: Stage<BoxedSeq<'a, A>> + 'a,
        S::Output: IntoSeq<Item = A>,
        <S::Output as IntoSeq>::IntoSeq: 'a,
    {
        Self::Stage(Box::new(move |input| {
            stage
                .apply(input)
                .map(|output| Seq::new(output.into_seq()).boxed())
        }))
    }
}

impl<T: fmt::Debug> fmt::Debug for Entry<'_, T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source(value) => formatter.debug_tuple("Source").field(value).finish(),
            Self::Stage(_) => formatter.write_str("Stage(..)"),
        }
    }
}

/// Runs a pipeline definition: the first entry is the source, every later
/// entry a stage applied to the running value, left to right.
///
/// The definition is checked before any stage runs.
///
/// # Errors
///
/// - [`PipelineError::EmptyPipeline`] for no entries
/// - [`PipelineError::MissingSource`] if the first entry is a stage
/// - [`PipelineError::UnexpectedSource`] if a later entry is a source
/// - the first fault returned by a stage; remaining stages are skipped
///
/// # Examples
///
/// ```rust
/// use lazypipe::PipelineError;
/// use lazypipe::compose::{Entry, compose};
///
/// let entries = vec![
///     Entry::source(3),
///     Entry::stage(|value: i32| value + 1),
///     Entry::stage(|value: i32| value * 10),
/// ];
/// assert_eq!(compose(entries).unwrap(), 40);
///
/// let nothing: Vec<Entry<'_, i32>> = Vec::new();
/// assert!(matches!(compose(nothing), Err(PipelineError::EmptyPipeline)));
/// ```
pub fn compose<'a, T, E>(entries: E) -> Result<T>
where
    E: IntoIterator<Item = Entry<'a, T>>,
{
    let mut entries = entries.into_iter();
    let source = match entries.next() {
        None => return Err(PipelineError::EmptyPipeline),
        Some(Entry::Stage(_)) => return Err(PipelineError::MissingSource),
        Some(Entry::Source(value)) => value,
    };

    let stages = entries
        .enumerate()
        .map(|(offset, entry)| match entry {
            Entry::Stage(stage) => Ok(stage),
            Entry::Source(_) => Err(PipelineError::UnexpectedSource {
                position: offset + 1,
            }),
        })
        .collect::<Result<Vec<_>>>()?;

    event!(Level::TRACE, stages = stages.len(), "running composed pipeline");

    stages
        .into_iter()
        .enumerate()
        .try_fold(source, |current, (index, stage)| {
            stage(current).inspect_err(|error| {
                event!(Level::DEBUG, stage = index + 1, %error, "pipeline stage failed");
            })
        })
}
