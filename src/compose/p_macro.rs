//! The `p!` macro: the pipeline composer.
//!
//! `p!` folds a source through stages from left to right, applying each
//! stage to the running value with [`Stage::apply`](crate::stage::Stage::apply).

/// Runs a source through a series of stages from left to right.
///
/// `p!(x, f, g, h)` applies `f` to `x`, `g` to that result and `h` to the
/// next, returning `Ok` of the final value. This is a left fold over
/// application, not composition of the stage functions: each stage sees the
/// running value as its single argument.
///
/// # Syntax
///
/// - `p!(x)` - Returns `Ok(x)` with `x` untouched
/// - `p!(x, f)` - Returns `f` applied to `x`
/// - `p!(x, f, g, ...)` - Applies `f`, then `g`, and so on
/// - `p!()` - Rejected at compile time: a pipeline needs a source
///
/// The source may be anything implementing
/// [`IntoSeq`](crate::seq::IntoSeq): an owned `Vec`, array or `VecDeque`, a
/// range, or the lazy output of another pipeline. Slices and borrowing
/// iterators such as `items.iter()` are not `IntoSeq`; lift them with
/// [`seq`](crate::seq::seq) first, as in `p!(seq(items.iter()), ...)`.
///
/// # Errors
///
/// Stops at the first stage that fails and returns its
/// [`PipelineError`](crate::PipelineError); later stages are not applied.
/// Lazy stages never fail when applied, so faults inside elements only
/// surface where the sequence is pulled (for example in
/// [`materialize`](crate::terminal::materialize)).
///
/// # Examples
///
/// ## A lazy pipeline, forced at the end
///
/// ```
/// use lazypipe::prelude::*;
///
/// let source = vec![Some(0), None, None, Some(1), Some(2), Some(3), Some(4)];
/// let result = p!(
///     source,
///     exclude_none(),
///     keep(|value: &i32| value % 2 == 0),
///     apply(|value: i32| value * 2),
///     materialize(),
/// );
/// assert_eq!(result.unwrap(), vec![0, 4, 8]);
/// ```
///
/// ## Source only
///
/// ```
/// use lazypipe::p;
///
/// let source = vec![1, 2, 3];
/// assert_eq!(p!(source).unwrap(), vec![1, 2, 3]);
/// ```
///
/// ## Any callable is a stage
///
/// ```
/// use lazypipe::p;
///
/// fn to_string(value: i32) -> String { value.to_string() }
/// fn length(text: String) -> usize { text.len() }
///
/// assert_eq!(p!(12345, to_string, length).unwrap(), 5);
/// ```
///
/// ## Borrowed sources
///
/// ```
/// use lazypipe::prelude::*;
///
/// let names = vec!["ada".to_owned(), "grace".to_owned()];
/// let lengths = p!(seq(names.iter()), apply(|name: &String| name.len()), materialize());
/// assert_eq!(lengths.unwrap(), vec![3, 5]);
/// assert_eq!(names.len(), 2);
/// ```
///
/// ## No entries
///
/// ```compile_fail
/// use lazypipe::p;
///
/// let nothing = p!();
/// ```
#[macro_export]
macro_rules! p {
    () => {
        ::core::compile_error!("p! needs at least a source entry")
    };

    // Source only: return it untouched
    ($source:expr $(,)?) => {
        ::core::result::Result::<_, $crate::PipelineError>::Ok($source)
    };

    // Source and stages: fold left to right, stopping at the first fault
    ($source:expr, $($stage:expr),+ $(,)?) => {
        'pipeline: {
            let current = $source;
            $(
                let current = match $crate::stage::Stage::apply($stage, current) {
                    ::core::result::Result::Ok(next) => next,
                    ::core::result::Result::Err(fault) => {
                        break 'pipeline ::core::result::Result::Err(fault)
                    }
                };
            )+
            ::core::result::Result::<_, $crate::PipelineError>::Ok(current)
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::PipelineError;
    use crate::aggregate::aggregate;
    use crate::combinators::{apply, keep};
    use crate::seq::seq;
    use crate::terminal::materialize;

    #[test]
    fn test_p_source_only() {
        let result = p!(42);
        assert_eq!(result.unwrap(), 42);
    }

    #[test]
    fn test_p_single_stage() {
        let double = |value: i32| value * 2;
        assert_eq!(p!(5, double).unwrap(), 10);
    }

    #[test]
    fn test_p_applies_left_to_right() {
        let add_one = |value: i32| value + 1;
        let double = |value: i32| value * 2;
        // double(5) = 10, add_one(10) = 11
        assert_eq!(p!(5, double, add_one).unwrap(), 11);
    }

    #[test]
    fn test_p_stops_at_failing_stage() {
        let mut reached = false;
        let result = p!(
            Vec::<i32>::new(),
            aggregate(|acc: i32, value: i32| acc + value),
            |value: i32| {
                reached = true;
                value
            },
        );
        assert!(matches!(result, Err(PipelineError::EmptyReduction)));
        assert!(!reached);
    }

    #[test]
    fn test_p_mixes_stages_and_callables() {
        let result = p!(
            vec![1, 2, 3],
            apply(|value: i32| value * 3),
            materialize(),
            |values: Vec<i32>| values.into_iter().rev().collect::<Vec<_>>(),
        );
        assert_eq!(result.unwrap(), vec![9, 6, 3]);
    }

    #[test]
    fn test_p_borrowed_source_through_seq() {
        let values = [4, 7, 10];
        let result = p!(
            seq(values.iter()),
            keep(|value: &&i32| **value > 5),
            apply(|value: &i32| value * 2),
            materialize(),
        );
        assert_eq!(result.unwrap(), vec![14, 20]);
        assert_eq!(values.len(), 3);
    }
}
