//! Error types for attribute resolution.

use thiserror::Error;

/// Errors that can occur when resolving an attribute on an instance.
///
/// Resolution failures are surfaced directly to the caller and never
/// recovered internally. Declaring a nonexistent name untouchable is not an
/// error; the name simply never resolves and later reads fail with
/// [`AttributeError::NotFound`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AttributeError {
    /// The name is not defined on the backing type and was never patched in.
    #[error("type `{type_name}` has no attribute `{name}`")]
    NotFound {
        /// Name of the type the lookup ran against.
        type_name: String,
        /// The attribute name that failed to resolve.
        name: String,
    },

    /// A data read was attempted on a method-valued attribute.
    #[error("attribute `{name}` on type `{type_name}` is a method, not a data attribute")]
    NotData {
        /// Name of the type the lookup ran against.
        type_name: String,
        /// The attribute name that resolved to a method.
        name: String,
    },

    /// A call was attempted on a data-valued attribute.
    #[error("attribute `{name}` on type `{type_name}` is not callable")]
    NotCallable {
        /// Name of the type the lookup ran against.
        type_name: String,
        /// The attribute name that resolved to plain data.
        name: String,
    },
}

impl AttributeError {
    /// Create a not-found error.
    pub fn not_found(type_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self::NotFound {
            type_name: type_name.into(),
            name: name.into(),
        }
    }

    /// Create a not-data error.
    pub fn not_data(type_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self::NotData {
            type_name: type_name.into(),
            name: name.into(),
        }
    }

    /// Create a not-callable error.
    pub fn not_callable(type_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self::NotCallable {
            type_name: type_name.into(),
            name: name.into(),
        }
    }

    /// Whether this is the not-found variant.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
