//! Projection to rows and construction from rows.
//!
//! [`project`] and [`kproject`] read named fields through [`Record`];
//! [`splat_into`] and [`ksplat`] build values back from the rows they
//! produce. Field names are fixed when the stage is created.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::record::{Fields, Record, Value, construct};
use crate::seq::{IntoSeq, Seq};
use crate::stage::Stage;

/// Stage mapping elements to the values of named fields.
///
/// Created by [`project`] and [`kproject`].
#[derive(Debug, Clone)]
pub struct Project<Out> {
    names: Vec<String>,
    row: PhantomData<fn() -> Out>,
}

fn names_of<N>(names: N) -> Vec<String>
where
    N: IntoIterator,
    N::Item: Into<String>,
{
    names.into_iter().map(Into::into).collect()
}

/// Returns a stage mapping each element to the ordered list of its `names`
/// field values.
///
/// An element lacking one of the fields surfaces
/// [`PipelineError::MissingField`](crate::PipelineError::MissingField) when
/// it is pulled.
///
/// # Examples
///
/// ```rust
/// use lazypipe::prelude::*;
/// use serde_json::json;
///
/// #[derive(lazypipe::Record)]
/// struct Reading {
///     sensor: String,
///     celsius: f64,
/// }
///
/// let rows = p!(
///     vec![Reading { sensor: "t1".into(), celsius: 21.5 }],
///     project(["celsius", "sensor"]),
///     materialize(),
/// )
/// .unwrap();
/// assert_eq!(rows, vec![vec![json!(21.5), json!("t1")]]);
/// ```
pub fn project<N>(names: N) -> Project<Vec<Value>>
where
    N: IntoIterator,
    N::Item: Into<String>,
{
    Project {
        names: names_of(names),
        row: PhantomData,
    }
}

/// Returns a stage mapping each element to a name-to-value mapping of its
/// `names` fields.
///
/// # Examples
///
/// ```rust
/// use lazypipe::prelude::*;
/// use serde_json::json;
///
/// #[derive(lazypipe::Record)]
/// struct Reading {
///     sensor: String,
///     celsius: f64,
/// }
///
/// let rows = p!(
///     vec![Reading { sensor: "t1".into(), celsius: 21.5 }],
///     kproject(["sensor"]),
///     materialize(),
/// )
/// .unwrap();
/// assert_eq!(rows[0]["sensor"], json!("t1"));
/// assert_eq!(rows[0].len(), 1);
/// ```
pub fn kproject<N>(names: N) -> Project<Fields>
where
    N: IntoIterator,
    N::Item: Into<String>,
{
    Project {
        names: names_of(names),
        row: PhantomData,
    }
}

/// A row shape a projection can produce.
pub trait Row: Sized {
    /// Reads `names` from `record`.
    ///
    /// # Errors
    ///
    /// Returns the first field lookup fault.
    fn read<R: Record>(record: &R, names: &[String]) -> Result<Self>;
}

impl Row for Vec<Value> {
    fn read<R: Record>(record: &R, names: &[String]) -> Result<Self> {
        names.iter().map(|name| record.field(name)).collect()
    }
}

impl Row for Fields {
    fn read<R: Record>(record: &R, names: &[String]) -> Result<Self> {
        names
            .iter()
            .map(|name| Ok((name.clone(), record.field(name)?)))
            .collect()
    }
}

impl<S, Out> Stage<S> for Project<Out>
where
    S: IntoSeq,
    S::Item: Record,
    Out: Row,
{
    type Output = Seq<Projected<S::IntoSeq, Out>>;

    fn apply(self, input: S) -> Result<Self::Output> {
        Ok(Seq::new(Projected {
            inner: input.into_seq(),
            names: self.names,
            row: PhantomData,
        }))
    }
}

/// Lazy sequence produced by [`project`] and [`kproject`].
pub struct Projected<I, Out> {
    inner: I,
    names: Vec<String>,
    row: PhantomData<fn() -> Out>,
}

impl<A, I, Out> Iterator for Projected<I, Out>
where
    I: Iterator<Item = Result<A>>,
    A: Record,
    Out: Row,
{
    type Item = Result<Out>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.inner.next()?;
        Some(item.and_then(|record| Out::read(&record, &self.names)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// Stage building values of `T` from rows.
///
/// Created by [`splat_into`] and [`ksplat`].
pub struct Unpack<T, In> {
    target: PhantomData<fn(In) -> T>,
}

impl<T, In> Clone for Unpack<T, In> {
    fn clone(&self) -> Self {
        Self {
            target: PhantomData,
        }
    }
}

/// Returns a stage constructing a `T` from each positional row, as produced
/// by [`project`].
///
/// Row values fill `T`'s fields in declaration order. Trailing fields may be
/// omitted when they carry `#[serde(default)]`; anything that does not fit
/// surfaces [`PipelineError::Decode`](crate::PipelineError::Decode).
pub const fn splat_into<T>() -> Unpack<T, Vec<Value>> {
    Unpack {
        target: PhantomData,
    }
}

/// Returns a stage constructing a `T` from each name-to-value mapping, as
/// produced by [`kproject`].
///
/// # Examples
///
/// ```rust
/// use lazypipe::prelude::*;
/// use lazypipe::record::Fields;
/// use serde::Deserialize;
/// use serde_json::json;
///
/// #[derive(Debug, PartialEq, Deserialize)]
/// struct Window {
///     width: u32,
///     #[serde(default)]
///     height: u32,
/// }
///
/// let mut fields = Fields::new();
/// fields.insert("width".into(), json!(80));
///
/// let windows = p!(vec![fields], ksplat::<Window>(), materialize()).unwrap();
/// assert_eq!(windows, vec![Window { width: 80, height: 0 }]);
/// ```
pub const fn ksplat<T>() -> Unpack<T, Fields> {
    Unpack {
        target: PhantomData,
    }
}

impl<S, T, In> Stage<S> for Unpack<T, In>
where
    S: IntoSeq<Item = In>,
    In: Into<Value>,
    T: DeserializeOwned,
{
    type Output = Seq<Unpacked<S::IntoSeq, T>>;

    fn apply(self, input: S) -> Result<Self::Output> {
        Ok(Seq::new(Unpacked {
            inner: input.into_seq(),
            target: PhantomData,
        }))
    }
}

/// Lazy sequence produced by [`splat_into`] and [`ksplat`].
pub struct Unpacked<I, T> {
    inner: I,
    target: PhantomData<fn() -> T>,
}

impl<A, I, T> Iterator for Unpacked<I, T>
where
    I: Iterator<Item = Result<A>>,
    A: Into<Value>,
    T: DeserializeOwned,
{
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.inner.next()?;
        Some(item.and_then(|arguments| construct(arguments.into())))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

#[cfg(all(test, feature = "derive"))]
mod tests {
    use super::*;
    use crate::error::PipelineError;
    use crate::seq::seq;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Deserialize, crate::Record)]
    struct Thing {
        a: i64,
        b: i64,
        c: i64,
        #[serde(default = "one")]
        d: i64,
        #[serde(default = "two")]
        e: i64,
    }

    const fn one() -> i64 {
        1
    }

    const fn two() -> i64 {
        2
    }

    fn things() -> Vec<Thing> {
        (0..3)
            .map(|index| Thing {
                a: index,
                b: index + 1,
                c: index + 2,
                d: 1,
                e: 2,
            })
            .collect()
    }

    #[test]
    fn test_project_in_given_order() {
        let rows: Vec<Vec<Value>> = project(["e", "a"])
            .apply(things())
            .unwrap()
            .map(Result::unwrap)
            .collect();
        assert_eq!(
            rows,
            vec![
                vec![json!(2), json!(0)],
                vec![json!(2), json!(1)],
                vec![json!(2), json!(2)],
            ]
        );
    }

    #[test]
    fn test_project_missing_field_faults_on_pull() {
        let mut rows = project(vec!["a".to_owned(), "z".to_owned()])
            .apply(seq(things()))
            .unwrap();
        let fault = rows.next().unwrap().unwrap_err();
        assert!(matches!(fault, PipelineError::MissingField { ref field, .. } if field == "z"));
        assert!(rows.next().is_none());
    }

    #[test]
    fn test_kproject_then_ksplat_round_trips() {
        let rebuilt: Vec<Thing> = ksplat::<Thing>()
            .apply(
                kproject(["a", "b", "c", "d", "e"])
                    .apply(things())
                    .unwrap(),
            )
            .unwrap()
            .map(Result::unwrap)
            .collect();
        assert_eq!(rebuilt, things());
    }

    #[test]
    fn test_splat_into_fills_trailing_defaults() {
        let rows = vec![vec![json!(7), json!(8), json!(9)]];
        let built: Vec<Thing> = splat_into::<Thing>()
            .apply(rows)
            .unwrap()
            .map(Result::unwrap)
            .collect();
        assert_eq!(
            built,
            vec![Thing {
                a: 7,
                b: 8,
                c: 9,
                d: 1,
                e: 2,
            }]
        );
    }

    #[test]
    fn test_splat_into_rejects_short_row() {
        let mut built = splat_into::<Thing>().apply(vec![vec![json!(7)]]).unwrap();
        assert!(matches!(
            built.next(),
            Some(Err(PipelineError::Decode { .. }))
        ));
    }
}
