//! Helpers called by generated contract bindings.
//!
//! Generated code stays thin: each method converts its typed arguments with
//! these functions and forwards the result to a collaborator.

use serde_json::{Map as JsonMap, Value as JsonValue};

use crate::address::StdAddress;
use crate::cell::StateInit;
use crate::collab::{AbiCodec, ContractProvider, ContractState};
use crate::convert::{FromAbi, IntoAbi};
use crate::error::{AbiError, Result};
use crate::json::{from_json, to_json};
use crate::logging::debug;
use crate::schema::AbiParam;
use crate::stack::{StackItem, TupleReader};
use crate::value::Value;
use crate::WireCodec;

/// Named parameters collected into the JSON object the codec service expects
/// for message bodies and initial data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonParams {
    fields: JsonMap<String, JsonValue>,
}

impl JsonParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert `value` to the parameter's declared type and add it.
    pub fn insert<T: IntoAbi>(&mut self, param: &AbiParam, value: T) -> Result<&mut Self> {
        let ty = param.abi_type()?;
        let value = value.into_abi(&ty)?;
        self.fields.insert(param.name.clone(), to_json(&value)?);
        Ok(self)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn into_json(self) -> JsonValue {
        JsonValue::Object(self.fields)
    }
}

/// Encode one getter argument into its wire item.
pub async fn encode_arg<T: IntoAbi>(
    codec: &dyn AbiCodec,
    param: &AbiParam,
    value: T,
) -> Result<StackItem> {
    let ty = param.abi_type()?;
    let value = value.into_abi(&ty)?;
    WireCodec::new(codec).encode(&param.name, &ty, &value).await
}

/// Decode one getter result from the reader.
pub async fn decode_arg<T: FromAbi>(
    codec: &dyn AbiCodec,
    param: &AbiParam,
    reader: &mut TupleReader,
) -> Result<T> {
    let ty = param.abi_type()?;
    let value = WireCodec::new(codec).decode(&param.name, &ty, reader).await?;
    T::from_abi(value, &ty)
}

/// Decoded persistent state of a contract, keyed by variable name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateVariables {
    fields: JsonMap<String, JsonValue>,
}

impl StateVariables {
    pub fn new(fields: JsonMap<String, JsonValue>) -> Self {
        Self { fields }
    }

    /// Read one variable as the parameter's declared type.
    pub fn field<T: FromAbi>(&self, param: &AbiParam) -> Result<T> {
        let ty = param.abi_type()?;
        let json = self.fields.get(&param.name).ok_or_else(|| {
            AbiError::shape(format!("state variable '{}'", param.name), "nothing")
        })?;
        T::from_abi(from_json(&ty, json)?, &ty)
    }

    /// A variable as a dynamic value.
    pub fn value(&self, param: &AbiParam) -> Result<Value> {
        self.field(param)
    }

    pub fn raw(&self) -> &JsonMap<String, JsonValue> {
        &self.fields
    }
}

/// Fetch the contract's state from the provider and decode it.
pub async fn read_state_variables(
    provider: &dyn ContractProvider,
    codec: &dyn AbiCodec,
    contract: &str,
) -> Result<StateVariables> {
    let ContractState::Active { code, data } = provider.state().await? else {
        debug!(contract, "state requested from inactive contract");
        return Err(AbiError::ContractNotActive);
    };
    let state = StateInit::new(code, data).to_cell()?;
    let fields = codec.decode_state(contract, &state).await?;
    Ok(StateVariables::new(fields))
}

/// Address a contract with this initial state will be deployed at.
pub fn contract_address(workchain: i32, init: &StateInit) -> Result<StdAddress> {
    Ok(StdAddress::new(workchain, init.to_cell()?.hash()))
}
