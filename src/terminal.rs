//! Terminal stages: force evaluation of a lazy sequence.
//!
//! [`materialize`] collects every element in order; [`drain`] pulls and
//! discards them, which is how side effects of a [`tap`](crate::combinators::tap)
//! are forced without keeping results. Both stop at the first fault and
//! return it.
//!
//! Draining or materializing an infinite sequence never returns.

use tracing::{Level, event};

use crate::error::Result;
use crate::seq::IntoSeq;
use crate::stage::Stage;

/// Stage collecting a sequence into a `Vec`.
///
/// Created by [`materialize`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Materialize;

/// Returns a stage that pulls every element into a `Vec`, preserving order.
///
/// Later stages receive the `Vec` as their source.
///
/// # Examples
///
/// ```rust
/// use lazypipe::prelude::*;
///
/// let values = p!(0..4, materialize()).unwrap();
/// assert_eq!(values, vec![0, 1, 2, 3]);
/// ```
pub const fn materialize() -> Materialize {
    Materialize
}

impl<S: IntoSeq> Stage<S> for Materialize {
    type Output = Vec<S::Item>;

    fn apply(self, input: S) -> Result<Self::Output> {
        let collected: Result<Vec<S::Item>> = input.into_seq().collect();
        match &collected {
            Ok(values) => event!(Level::TRACE, count = values.len(), "materialized sequence"),
            Err(error) => event!(Level::DEBUG, %error, "materialize stopped at fault"),
        }
        collected
    }
}

/// Stage consuming a sequence without keeping anything.
///
/// Created by [`drain`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Drain;

/// Returns a stage that pulls and discards every element, then yields an
/// empty `Vec`.
///
/// # Examples
///
/// ```rust
/// use lazypipe::prelude::*;
///
/// let mut count = 0;
/// let rest = p!(0..5, tap(|_: &i32| count += 1), drain()).unwrap();
/// assert!(rest.is_empty());
/// assert_eq!(count, 5);
/// ```
pub const fn drain() -> Drain {
    Drain
}

impl<S: IntoSeq> Stage<S> for Drain {
    type Output = Vec<S::Item>;

    fn apply(self, input: S) -> Result<Self::Output> {
        let mut count = 0_usize;
        for item in input.into_seq() {
            if let Err(error) = item {
                event!(Level::DEBUG, %error, drained = count, "drain stopped at fault");
                return Err(error);
            }
            count += 1;
        }
        event!(Level::TRACE, count, "drained sequence");
        Ok(Vec::new())
    }
}
