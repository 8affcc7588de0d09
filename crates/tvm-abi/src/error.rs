//! Error types for ABI parsing, encoding and decoding.
//!
//! [`AbiError`] is the single error surfaced by this crate. Failures raised by
//! the external codec service or the contract provider arrive as
//! [`CollaboratorError`] and are passed through unchanged.

use thiserror::Error;

use crate::address::AddressError;
use crate::cell::CellError;

/// A failure reported by an external collaborator (codec service or provider).
///
/// # Example
///
/// ```ignore
/// use tvm_abi::CollaboratorError;
///
/// let err = CollaboratorError::new("encode", "ton-dev-cli exited with status 1");
/// assert_eq!(err.operation(), "encode");
/// ```
#[derive(Error, Debug)]
#[error("{operation} failed: {source}")]
pub struct CollaboratorError {
    operation: String,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
}

impl CollaboratorError {
    pub fn new(
        operation: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            operation: operation.into(),
            source: source.into(),
        }
    }

    /// Name of the collaborator call that failed.
    pub fn operation(&self) -> &str {
        &self.operation
    }
}

/// Errors that can occur while handling ABI types and values.
#[derive(Error, Debug)]
pub enum AbiError {
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    #[error("Malformed map descriptor '{0}': no top-level comma separates key and value")]
    MalformedMapDescriptor(String),

    #[error("Unsupported map key type '{0}'")]
    UnsupportedMapKey(String),

    #[error("Type '{0}' requires a non-empty component list")]
    MissingComponents(String),

    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),

    #[error("Decode shape mismatch: expected {expected}, found {found}")]
    DecodeShapeMismatch { expected: String, found: String },

    #[error("Type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },

    #[error("Integer {value} out of range for {ty}")]
    IntegerOutOfRange { value: String, ty: String },

    #[error("Invalid JSON for '{ty}': {message}")]
    InvalidJson { ty: String, message: String },

    #[error("Contract is not active")]
    ContractNotActive,

    #[error(transparent)]
    Cell(#[from] CellError),

    #[error(transparent)]
    Address(#[from] AddressError),

    #[error("Schema error: {0}")]
    Schema(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A [`Result`] type alias using [`AbiError`].
pub type Result<T> = std::result::Result<T, AbiError>;

impl AbiError {
    pub(crate) fn mismatch(expected: impl ToString, got: impl ToString) -> Self {
        Self::TypeMismatch {
            expected: expected.to_string(),
            got: got.to_string(),
        }
    }

    pub(crate) fn shape(expected: impl ToString, found: impl ToString) -> Self {
        Self::DecodeShapeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    pub(crate) fn json(ty: impl ToString, message: impl ToString) -> Self {
        Self::InvalidJson {
            ty: ty.to_string(),
            message: message.to_string(),
        }
    }

    /// Returns `true` if the failure came from an external collaborator.
    pub fn is_collaborator(&self) -> bool {
        matches!(self, Self::Collaborator(_))
    }

    /// Returns `true` for grammar failures on a type descriptor.
    pub fn is_unsupported_type(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedType(_)
                | Self::MalformedMapDescriptor(_)
                | Self::UnsupportedMapKey(_)
                | Self::MissingComponents(_)
        )
    }
}
