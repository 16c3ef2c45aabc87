//! The pipeline composer.
//!
//! A pipeline is a source followed by stages. Composition is a left fold
//! over *application*: the source is handed to the first stage, its result
//! to the second, and so on.
//!
//! ```text
//! p!(x, f, g, h) = h(g(f(x)))
//! ```
//!
//! - [`p!`](crate::p!): stages written out in code; types may change at every step
//! - [`compose`]: stages held as data ([`Entry`] values sharing one type)
//!
//! # Laws
//!
//! - **Identity**: `p!(x) == Ok(x)` and `compose([Entry::source(x)]) == Ok(x)`
//! - **Sequencing**: `p!(x, f, g) == p!(p!(x, f)?, g)`

mod definition;
mod p_macro;

pub use definition::{BoxedStage, Entry, compose};

pub use crate::p;
