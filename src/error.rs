//! Error types for pipelines.
//!
//! Every fault a pipeline can observe is a [`PipelineError`]. Lazy stages
//! carry faults in-band as `Err` items, so an error surfaces only when the
//! element that produced it is pulled. Terminal stages and the composer
//! return the first fault they observe.

use thiserror::Error;

/// Represents the faults that can occur while building or running a pipeline.
///
/// # Examples
///
/// ```rust
/// use lazypipe::PipelineError;
///
/// let error = PipelineError::EmptyReduction;
/// assert_eq!(
///     format!("{error}"),
///     "cannot aggregate an empty sequence without a seed"
/// );
/// ```
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A caller-supplied function failed.
    ///
    /// The original error is kept as-is: its message is displayed unchanged
    /// and it can be recovered with [`PipelineError::user_error`].
    #[error(transparent)]
    User(#[from] anyhow::Error),

    /// A projection asked for a field the element does not have.
    #[error("{record} has no field named `{field}`")]
    MissingField {
        /// The requested field name.
        field: String,
        /// The type name of the element that lacked the field.
        record: &'static str,
    },

    /// A field value could not be encoded into a projection value.
    #[cfg(feature = "record")]
    #[error("failed to encode field `{field}`: {source}")]
    Encode {
        /// The field whose value failed to encode.
        field: String,
        /// The underlying serialization error.
        #[source]
        source: serde_json::Error,
    },

    /// A projected row could not be turned back into the target type.
    #[cfg(feature = "record")]
    #[error("failed to build {target} from unpacked arguments: {source}")]
    Decode {
        /// The type name of the value being constructed.
        target: &'static str,
        /// The underlying deserialization error.
        #[source]
        source: serde_json::Error,
    },

    /// A seedless aggregation was applied to an empty sequence.
    #[error("cannot aggregate an empty sequence without a seed")]
    EmptyReduction,

    /// The composer was given no entries at all.
    #[error("a pipeline needs at least a source entry")]
    EmptyPipeline,

    /// The first composer entry was a stage instead of a source.
    #[error("the first pipeline entry must be a source, found a stage")]
    MissingSource,

    /// A source entry appeared after the first position.
    #[error("pipeline entry {position} is a source; only the first entry may be a source")]
    UnexpectedSource {
        /// Zero-based index of the offending entry.
        position: usize,
    },
}

impl PipelineError {
    /// Wraps any caller error as a [`PipelineError::User`] fault.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazypipe::PipelineError;
    ///
    /// let error = PipelineError::user(std::fmt::Error);
    /// assert!(error.user_error::<std::fmt::Error>().is_some());
    /// ```
    pub fn user<E>(error: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        Self::User(error.into())
    }

    /// Builds a [`PipelineError::MissingField`] for the record type `R`.
    pub fn missing_field<R: ?Sized>(field: &str) -> Self {
        Self::MissingField {
            field: field.to_owned(),
            record: std::any::type_name::<R>(),
        }
    }

    /// Returns the caller error of type `E` if this is a user fault wrapping one.
    pub fn user_error<E>(&self) -> Option<&E>
    where
        E: std::fmt::Display + std::fmt::Debug + Send + Sync + 'static,
    {
        match self {
            Self::User(error) => error.downcast_ref::<E>(),
            _ => None,
        }
    }

    /// Returns `true` if this fault came from a caller-supplied function.
    pub const fn is_user(&self) -> bool {
        matches!(self, Self::User(_))
    }
}

/// Result type used throughout the crate.
pub type Result<T, E = PipelineError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Eq)]
    struct Boom(u8);

    impl std::fmt::Display for Boom {
        fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(formatter, "boom {}", self.0)
        }
    }

    impl std::error::Error for Boom {}

    #[test]
    fn test_user_fault_is_displayed_unchanged() {
        let error = PipelineError::user(Boom(7));
        assert_eq!(error.to_string(), "boom 7");
        assert_eq!(error.user_error::<Boom>(), Some(&Boom(7)));
        assert!(error.is_user());
    }

    #[test]
    fn test_missing_field_names_record_type() {
        let error = PipelineError::missing_field::<Boom>("z");
        let message = error.to_string();
        assert!(message.contains("Boom"));
        assert!(message.ends_with("has no field named `z`"));
        assert!(!error.is_user());
    }

    #[test]
    fn test_user_error_of_wrong_type_is_none() {
        let error = PipelineError::user(anyhow::anyhow!("plain"));
        assert!(error.user_error::<Boom>().is_none());
        assert!(PipelineError::EmptyPipeline.user_error::<Boom>().is_none());
    }
}
