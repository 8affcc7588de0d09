//! Cells, ABI type descriptors and the value codec behind generated TVM
//! contract bindings.
//!
//! A contract schema (`*.abi.json`) declares typed functions, getters and
//! state fields. This crate parses those declarations and converts native
//! values to and from the two wire forms a contract sees: getter stack items
//! and cells produced by an external codec service.
//!
//! # Module Organization
//!
//! - [`cell`]: Cells, builders, slices and bag-of-cells serialization
//! - [`address`]: Internal and external addresses with their text forms
//! - [`types`]: ABI type descriptors and their parser
//! - [`schema`]: Contract schema documents
//! - [`value`]: Dynamic native values
//! - [`json`]: JSON form of values exchanged with the codec service
//! - [`stack`]: Getter stack items and the tuple reader
//! - [`collab`]: Codec service and contract provider interfaces
//! - [`runtime`]: Helpers called by generated bindings
//! - [`prelude`]: Re-exports used by generated bindings
//! - `encode`/`decode`: The recursive [`WireCodec`]
//! - `logging`: Conditional logging macros (internal)
//!
//! # Features
//!
//! - `logging`: Enable tracing-based logging
//!
//! # Example
//!
//! ```ignore
//! use tvm_abi::prelude::*;
//!
//! let ty = AbiType::parse("map(address,uint256)", None)?;
//! let item = WireCodec::new(&codec).encode("balances", &ty, &value).await?;
//! ```

pub mod address;
pub mod cell;
pub mod collab;
mod convert;
mod decode;
mod encode;
pub mod error;
pub mod json;
#[macro_use]
pub(crate) mod logging;
pub mod prelude;
pub mod runtime;
pub mod schema;
pub mod stack;
pub mod types;
pub mod value;

pub use address::{Address, AddressError, ExternalAddress, StdAddress};
pub use cell::{Cell, CellBuilder, CellError, CellSlice, StateInit};
pub use collab::{
    AbiCodec, ContractProvider, ContractState, ExternalBodyRequest, ExternalHeader,
    InternalMessage, SendMode, SignedBody,
};
pub use convert::{FromAbi, IntoAbi};
pub use error::{AbiError, CollaboratorError, Result};
pub use schema::{AbiContract, AbiEvent, AbiFunction, AbiGetter, AbiParam};
pub use stack::{StackItem, TupleReader};
pub use types::{AbiType, Component, IntWidth};
pub use value::Value;

// Re-export the integer type used throughout the public API
pub use num_bigint::BigInt;

/// Recursive encoder and decoder between native values and wire items.
///
/// Composite values are delegated to the external codec service; everything
/// else is handled locally. Each value occupies exactly one wire item, so
/// decoding consumes items in the order encoding produced them.
///
/// # Example
///
/// ```ignore
/// use tvm_abi::{AbiType, TupleReader, Value, WireCodec};
///
/// let codec = WireCodec::new(&service);
/// let ty = AbiType::parse("optional(uint32)", None)?;
/// let item = codec.encode("limit", &ty, &Value::Null).await?;
///
/// let mut reader = TupleReader::new(vec![item]);
/// assert_eq!(codec.decode("limit", &ty, &mut reader).await?, Value::Null);
/// ```
#[derive(Clone, Copy)]
pub struct WireCodec<'a> {
    pub(crate) codec: &'a dyn AbiCodec,
}

impl<'a> WireCodec<'a> {
    pub fn new(codec: &'a dyn AbiCodec) -> Self {
        Self { codec }
    }
}
