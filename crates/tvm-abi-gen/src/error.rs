//! Error type for binding generation.

use std::path::PathBuf;

use thiserror::Error;
use tvm_abi::AbiError;

/// Errors raised while building or writing a binding module.
#[derive(Error, Debug)]
pub enum GenError {
    /// Schema could not be loaded or declares an unsupported type.
    #[error(transparent)]
    Abi(#[from] AbiError),

    /// Two schema entries derive the same method or type name.
    #[error("'{name}' is generated twice in contract '{contract}'")]
    NameCollision { contract: String, name: String },

    /// The contract name yields no usable Rust identifier.
    #[error("'{0}' is not a valid contract name")]
    InvalidContractName(String),

    /// A requested contract has no schema file.
    #[error("no ABI file for contract '{contract}' at {}", path.display())]
    MissingAbi { contract: String, path: PathBuf },

    /// Reading or writing a file failed.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GenError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// A [`Result`] type alias using [`GenError`].
pub type Result<T> = std::result::Result<T, GenError>;
