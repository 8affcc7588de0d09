//! Re-exports for generated contract bindings.
//!
//! Generated modules start with `use tvm_abi::prelude::*;` and need nothing
//! else from this crate.

pub use std::collections::BTreeMap;

pub use crate::error::{AbiError, Result};
pub use crate::{
    AbiCodec, AbiParam, AbiType, Address, BigInt, Cell, ContractProvider, ExternalAddress,
    ExternalBodyRequest, ExternalHeader, FromAbi, InternalMessage, IntoAbi, SendMode, SignedBody,
    StackItem, StateInit, StdAddress, TupleReader, Value, WireCodec,
};
pub use crate::runtime::{
    JsonParams, StateVariables, contract_address, decode_arg, encode_arg, read_state_variables,
};
