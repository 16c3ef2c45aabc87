//! Derive macro for lazypipe's named-field access.
//!
//! This crate provides the procedural macro that implements
//! `lazypipe::record::Record` for structs, which is what projection stages
//! (`project`, `kproject`) need to read fields by name.
//!
//! # Available Derive Macros
//!
//! - [`Record`]: Generates field lookup by name for a named struct
//!
//! # Example
//!
//! ```rust,ignore
//! use lazypipe::Record;
//!
//! #[derive(Record)]
//! struct Point {
//!     x: i32,
//!     y: i32,
//! }
//!
//! let point = Point { x: 10, y: 20 };
//! assert_eq!(point.field("x").unwrap(), 10);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod record;

use proc_macro::TokenStream;

/// Derive macro implementing `lazypipe::record::Record` for a struct.
///
/// Every named field becomes readable by its name. Field values are encoded
/// with `serde`, so each field type must implement `serde::Serialize`.
///
/// # Requirements
///
/// - The struct must be a named struct (not a tuple or unit struct)
/// - Every field that is not skipped must implement `serde::Serialize`
///
/// # Field Attributes
///
/// - `#[record(rename = "name")]`: expose the field under another name
/// - `#[record(skip)]`: hide the field from lookups
///
/// # Generated Code
///
/// ```rust,ignore
/// impl lazypipe::record::Record for StructName {
///     fn field(&self, name: &str) -> lazypipe::Result<lazypipe::record::Value> {
///         match name {
///             "foo" => lazypipe::record::encode_field(name, &self.foo),
///             _ => Err(lazypipe::PipelineError::missing_field::<Self>(name)),
///         }
///     }
/// }
/// ```
///
/// # Example
///
/// ```rust,ignore
/// use lazypipe::Record;
///
/// #[derive(Record)]
/// struct Account {
///     #[record(rename = "id")]
///     account_id: u64,
///     #[record(skip)]
///     secret: String,
/// }
///
/// let account = Account { account_id: 7, secret: "x".into() };
/// assert_eq!(account.field("id").unwrap(), 7);
/// assert!(account.field("secret").is_err());
/// ```
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    record::derive_record_impl(input)
}
