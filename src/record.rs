//! Named-field access for projection stages.
//!
//! [`Record`] is the capability an element needs to be projected: look up a
//! field by name and return its value as a [`Value`]. It is usually derived:
//!
//! ```rust
//! use lazypipe::record::Record;
//!
//! #[derive(lazypipe::Record)]
//! struct Point {
//!     x: i32,
//!     #[record(rename = "vertical")]
//!     y: i32,
//! }
//!
//! let point = Point { x: 1, y: 2 };
//! assert_eq!(point.field("x").unwrap(), 1);
//! assert_eq!(point.field("vertical").unwrap(), 2);
//! assert!(point.field("y").is_err());
//! ```
//!
//! Going the other way, projected rows are turned back into values through
//! `serde` (see [`splat_into`](crate::combinators::splat_into) and
//! [`ksplat`](crate::combinators::ksplat)), so defaults for omitted
//! arguments come from `#[serde(default)]`.

use serde::Serialize;
use serde::de::DeserializeOwned;

pub use serde_json::Value;

use crate::error::{PipelineError, Result};

/// A key-ordered mapping from field name to value.
pub type Fields = serde_json::Map<String, Value>;

/// Elements whose fields can be read by name.
pub trait Record {
    /// Returns the value of the field called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::MissingField`] if there is no such field and
    /// [`PipelineError::Encode`] if its value cannot be represented.
    fn field(&self, name: &str) -> Result<Value>;
}

impl Record for Fields {
    fn field(&self, name: &str) -> Result<Value> {
        self.get(name)
            .cloned()
            .ok_or_else(|| PipelineError::missing_field::<Self>(name))
    }
}

impl<R: Record + ?Sized> Record for &R {
    fn field(&self, name: &str) -> Result<Value> {
        (**self).field(name)
    }
}

impl<R: Record + ?Sized> Record for Box<R> {
    fn field(&self, name: &str) -> Result<Value> {
        (**self).field(name)
    }
}

/// Encodes one field value. Used by `#[derive(Record)]`.
///
/// # Errors
///
/// Returns [`PipelineError::Encode`] if `value` cannot be serialized.
pub fn encode_field<T>(name: &str, value: &T) -> Result<Value>
where
    T: Serialize + ?Sized,
{
    serde_json::to_value(value).map_err(|source| PipelineError::Encode {
        field: name.to_owned(),
        source,
    })
}

/// Builds a `T` from an unpacked argument list or mapping.
///
/// An array is read positionally, an object by field name.
///
/// # Errors
///
/// Returns [`PipelineError::Decode`] if the arguments do not fit `T`.
pub fn construct<T>(arguments: Value) -> Result<T>
where
    T: DeserializeOwned,
{
    serde_json::from_value(arguments).map_err(|source| PipelineError::Decode {
        target: std::any::type_name::<T>(),
        source,
    })
}
