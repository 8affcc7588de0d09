//! Common test utilities and fixtures.
//!
//! [`JsonCellCodec`] stands in for the external codec service by storing the
//! JSON text of each value in a chain of cells. [`MockProvider`] records every
//! message and answers getters from a fixed table.

#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Map as JsonMap, Value as JsonValue, json};
use tvm_abi::{
    AbiCodec, AbiParam, Cell, CellBuilder, CollaboratorError, ContractProvider, ContractState,
    ExternalBodyRequest, InternalMessage, SignedBody, StackItem, TupleReader,
};

// =============================================================================
// Schemas
// =============================================================================

/// Counter contract with a nullable-address getter argument and map state.
pub const COUNTER_ABI: &str = r#"{
    "ABI version": 2,
    "version": "2.7",
    "header": ["time", "expire"],
    "functions": [
        { "name": "inc", "inputs": [], "outputs": [] },
        { "name": "grant", "inputs": [
            { "name": "user", "type": "address" },
            { "name": "value", "type": "uint256" }
        ], "outputs": [] }
    ],
    "getters": [
        { "name": "getCount", "inputs": [{ "name": "user", "type": "address" }],
          "outputs": [{ "name": "value0", "type": "uint256" }] }
    ],
    "fields": [
        { "name": "_pubkey", "type": "fixedbytes32", "init": true },
        { "name": "count", "type": "uint64" },
        { "name": "isAllowed", "type": "map(address,bool)", "init": true }
    ]
}"#;

// =============================================================================
// Cell chains
// =============================================================================

/// Bytes stored in each link of a chain (127 * 8 = 1016 bits).
const CHAIN_BYTES: usize = 127;

/// Store `bytes` across a chain of cells linked through their first reference.
pub fn bytes_to_chain(bytes: &[u8]) -> Cell {
    let mut next: Option<Cell> = None;
    let chunks: Vec<&[u8]> = bytes.chunks(CHAIN_BYTES).collect();
    for chunk in chunks.iter().rev() {
        let mut builder = CellBuilder::new();
        builder.store_bits(chunk, chunk.len() * 8).unwrap();
        if let Some(tail) = next.take() {
            builder.store_ref(tail).unwrap();
        }
        next = Some(builder.build());
    }
    next.unwrap_or_default()
}

pub fn chain_to_bytes(cell: &Cell) -> Vec<u8> {
    let mut out = Vec::new();
    let mut current = Some(cell);
    while let Some(cell) = current {
        let mut slice = cell.as_slice();
        out.extend(slice.load_bits(cell.bit_len()).unwrap());
        current = cell.refs().first();
    }
    out
}

pub fn json_to_chain(json: &JsonValue) -> Cell {
    bytes_to_chain(&serde_json::to_vec(json).unwrap())
}

pub fn chain_to_json(cell: &Cell) -> Result<JsonValue, serde_json::Error> {
    serde_json::from_slice(&chain_to_bytes(cell))
}

// =============================================================================
// Codec
// =============================================================================

/// In-memory codec service keeping JSON text inside cells.
#[derive(Default)]
pub struct JsonCellCodec {
    /// Answer for `decode_state`.
    pub state: JsonMap<String, JsonValue>,
    /// Every parameter passed to `encode`, in call order.
    pub encoded: Mutex<Vec<AbiParam>>,
}

impl JsonCellCodec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: JsonValue) -> Self {
        Self {
            state: state.as_object().cloned().unwrap_or_default(),
            ..Self::default()
        }
    }
}

#[async_trait]
impl AbiCodec for JsonCellCodec {
    async fn encode(&self, param: &AbiParam, value: &JsonValue) -> Result<Cell, CollaboratorError> {
        self.encoded.lock().unwrap().push(param.clone());
        Ok(json_to_chain(value))
    }

    async fn decode(&self, param: &AbiParam, cell: &Cell) -> Result<JsonValue, CollaboratorError> {
        if param.ty.ends_with("[]") {
            // Arrays arrive as a 32-bit count followed by the element data.
            let mut slice = cell.as_slice();
            let count = slice
                .load_uint(32)
                .map_err(|e| CollaboratorError::new("decode", e))?;
            let elements = slice
                .load_ref()
                .map_err(|e| CollaboratorError::new("decode", e))?;
            let json = chain_to_json(elements).map_err(|e| CollaboratorError::new("decode", e))?;
            let len = json.as_array().map(Vec::len).unwrap_or_default();
            if len as u64 != count {
                return Err(CollaboratorError::new(
                    "decode",
                    format!("array header says {count} elements, found {len}"),
                ));
            }
            return Ok(json);
        }
        chain_to_json(cell).map_err(|e| CollaboratorError::new("decode", e))
    }

    async fn decode_state(
        &self,
        _contract: &str,
        _state: &Cell,
    ) -> Result<JsonMap<String, JsonValue>, CollaboratorError> {
        Ok(self.state.clone())
    }

    async fn build_data(&self, contract: &str, params: &JsonValue) -> Result<Cell, CollaboratorError> {
        Ok(json_to_chain(&json!({ "contract": contract, "data": params })))
    }

    async fn internal_body(
        &self,
        contract: &str,
        function: &str,
        params: &JsonValue,
    ) -> Result<Cell, CollaboratorError> {
        Ok(json_to_chain(
            &json!({ "contract": contract, "function": function, "params": params }),
        ))
    }

    async fn external_body(&self, request: ExternalBodyRequest<'_>) -> Result<SignedBody, CollaboratorError> {
        let message = json_to_chain(&json!({
            "contract": request.contract,
            "function": request.function,
            "address": request.address.to_string(),
            "params": request.params,
            "signed": !request.secret_key.is_empty(),
        }));
        Ok(SignedBody {
            message,
            expire_at: request.header.expire_at().unwrap_or_default(),
        })
    }
}

/// Codec whose every call fails.
pub struct FailingCodec;

#[async_trait]
impl AbiCodec for FailingCodec {
    async fn encode(&self, _: &AbiParam, _: &JsonValue) -> Result<Cell, CollaboratorError> {
        Err(CollaboratorError::new("encode", "codec offline"))
    }

    async fn decode(&self, _: &AbiParam, _: &Cell) -> Result<JsonValue, CollaboratorError> {
        Err(CollaboratorError::new("decode", "codec offline"))
    }

    async fn decode_state(&self, _: &str, _: &Cell) -> Result<JsonMap<String, JsonValue>, CollaboratorError> {
        Err(CollaboratorError::new("decode_state", "codec offline"))
    }

    async fn build_data(&self, _: &str, _: &JsonValue) -> Result<Cell, CollaboratorError> {
        Err(CollaboratorError::new("build_data", "codec offline"))
    }

    async fn internal_body(&self, _: &str, _: &str, _: &JsonValue) -> Result<Cell, CollaboratorError> {
        Err(CollaboratorError::new("internal_body", "codec offline"))
    }

    async fn external_body(&self, _: ExternalBodyRequest<'_>) -> Result<SignedBody, CollaboratorError> {
        Err(CollaboratorError::new("external_body", "codec offline"))
    }
}

// =============================================================================
// Provider
// =============================================================================

/// Provider that records traffic and serves getters from a table.
pub struct MockProvider {
    pub state: ContractState,
    pub getters: HashMap<String, Vec<StackItem>>,
    pub internal: Mutex<Vec<InternalMessage>>,
    pub external: Mutex<Vec<Cell>>,
    pub calls: Mutex<Vec<(String, Vec<StackItem>)>>,
}

impl MockProvider {
    pub fn new(state: ContractState) -> Self {
        Self {
            state,
            getters: HashMap::new(),
            internal: Mutex::new(Vec::new()),
            external: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn active() -> Self {
        Self::new(ContractState::Active {
            code: Cell::empty(),
            data: Cell::empty(),
        })
    }

    pub fn with_getter(mut self, method: &str, result: Vec<StackItem>) -> Self {
        self.getters.insert(method.to_string(), result);
        self
    }
}

#[async_trait]
impl ContractProvider for MockProvider {
    async fn internal(&self, message: InternalMessage) -> Result<(), CollaboratorError> {
        self.internal.lock().unwrap().push(message);
        Ok(())
    }

    async fn external(&self, body: Cell) -> Result<(), CollaboratorError> {
        self.external.lock().unwrap().push(body);
        Ok(())
    }

    async fn get(&self, method: &str, args: Vec<StackItem>) -> Result<TupleReader, CollaboratorError> {
        self.calls.lock().unwrap().push((method.to_string(), args));
        self.getters
            .get(method)
            .cloned()
            .map(TupleReader::new)
            .ok_or_else(|| CollaboratorError::new("get", format!("no getter '{method}'")))
    }

    async fn state(&self) -> Result<ContractState, CollaboratorError> {
        Ok(self.state.clone())
    }
}
