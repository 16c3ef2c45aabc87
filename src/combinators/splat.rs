//! Positional unpacking: call a function with a tuple element's fields as
//! its arguments.
//!
//! For rows produced by projection, see
//! [`splat_into`](crate::combinators::splat_into).

use crate::error::{PipelineError, Result};
use crate::seq::{IntoSeq, Seq};
use crate::stage::Stage;

/// A function callable with the fields of the tuple `Args` as arguments.
///
/// Implemented for every `FnMut` of arity 0 to 8.
pub trait SplatFn<Args> {
    /// The function's return type.
    type Output;

    /// Calls the function with `args` unpacked.
    fn call_splat(&mut self, args: Args) -> Self::Output;
}

macro_rules! impl_splat_fn {
    ($($argument:ident $binding:ident),*) => {
        impl<F, R, $($argument),*> SplatFn<($($argument,)*)> for F
        where
            F: FnMut($($argument),*) -> R,
        {
            type Output = R;

            #[inline]
            fn call_splat(&mut self, ($($binding,)*): ($($argument,)*)) -> R {
                self($($binding),*)
            }
        }
    };
}

impl_splat_fn!();
impl_splat_fn!(A a);
impl_splat_fn!(A a, B b);
impl_splat_fn!(A a, B b, C c);
impl_splat_fn!(A a, B b, C c, D d);
impl_splat_fn!(A a, B b, C c, D d, E e);
impl_splat_fn!(A a, B b, C c, D d, E e, G g);
impl_splat_fn!(A a, B b, C c, D d, E e, G g, H h);
impl_splat_fn!(A a, B b, C c, D d, E e, G g, H h, J j);

/// Stage applying a function to unpacked tuple elements.
///
/// Created by [`splat`].
#[derive(Clone)]
pub struct Splat<F> {
    function: F,
}

/// Returns a stage mapping each tuple `(a, b, ..)` to `function(a, b, ..)`.
///
/// # Examples
///
/// ```rust
/// use lazypipe::prelude::*;
///
/// #[derive(Debug, PartialEq)]
/// struct Span {
///     start: u32,
///     end: u32,
/// }
///
/// impl Span {
///     fn new(start: u32, end: u32) -> Self {
///         Self { start, end }
///     }
/// }
///
/// let spans = p!(vec![(0_u32, 4_u32), (4, 9)], splat(Span::new), materialize()).unwrap();
/// assert_eq!(spans, vec![Span::new(0, 4), Span::new(4, 9)]);
/// ```
pub const fn splat<F>(function: F) -> Splat<F> {
    Splat { function }
}

impl<S, F> Stage<S> for Splat<F>
where
    S: IntoSeq,
    F: SplatFn<S::Item>,
{
    type Output = Seq<Splatted<S::IntoSeq, F>>;

    fn apply(self, input: S) -> Result<Self::Output> {
        Ok(Seq::new(Splatted {
            inner: input.into_seq(),
            function: self.function,
        }))
    }
}

/// Lazy sequence produced by [`splat`].
#[derive(Clone)]
pub struct Splatted<I, F> {
    inner: I,
    function: F,
}

impl<A, I, F> Iterator for Splatted<I, F>
where
    I: Iterator<Item = Result<A>>,
    F: SplatFn<A>,
{
    type Item = Result<F::Output>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let function = &mut self.function;
        self.inner
            .next()
            .map(|item| item.map(|args| function.call_splat(args)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// Stage applying a fallible function to unpacked tuple elements.
///
/// Created by [`try_splat`].
#[derive(Clone)]
pub struct TrySplat<F> {
    function: F,
}

/// Like [`splat`], but the function may fail.
///
/// An `Err` from `function` is surfaced as [`PipelineError::User`] at the
/// pull of the offending element, and the sequence halts there.
///
/// # Examples
///
/// ```rust
/// use lazypipe::prelude::*;
///
/// let ratios = p!(
///     vec![(6_u32, 3_u32), (1, 0), (8, 2)],
///     try_splat(|numerator: u32, denominator: u32| {
///         numerator
///             .checked_div(denominator)
///             .ok_or_else(|| anyhow::anyhow!("division by zero"))
///     }),
///     materialize(),
/// );
/// assert_eq!(ratios.unwrap_err().to_string(), "division by zero");
/// ```
pub const fn try_splat<F>(function: F) -> TrySplat<F> {
    TrySplat { function }
}

impl<S, B, E, F> Stage<S> for TrySplat<F>
where
    S: IntoSeq,
    F: SplatFn<S::Item, Output = std::result::Result<B, E>>,
    E: Into<anyhow::Error>,
{
    type Output = Seq<TrySplatted<S::IntoSeq, F>>;

    fn apply(self, input: S) -> Result<Self::Output> {
        Ok(Seq::new(TrySplatted {
            inner: input.into_seq(),
            function: self.function,
        }))
    }
}

/// Lazy sequence produced by [`try_splat`].
#[derive(Clone)]
pub struct TrySplatted<I, F> {
    inner: I,
    function: F,
}

impl<A, B, E, I, F> Iterator for TrySplatted<I, F>
where
    I: Iterator<Item = Result<A>>,
    F: SplatFn<A, Output = std::result::Result<B, E>>,
    E: Into<anyhow::Error>,
{
    type Item = Result<B>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.inner.next()?;
        Some(item.and_then(|args| self.function.call_splat(args).map_err(PipelineError::user)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
