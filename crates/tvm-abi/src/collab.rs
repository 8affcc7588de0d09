//! Collaborator interfaces: the external codec service and the contract
//! provider that carries messages to a deployed contract.
//!
//! Both are injected into generated bindings, so tests and alternative
//! backends can substitute their own implementations.

use std::ops::BitOr;

use async_trait::async_trait;
use serde_json::{Map as JsonMap, Value as JsonValue};

use crate::address::StdAddress;
use crate::cell::{Cell, StateInit};
use crate::error::CollaboratorError;
use crate::schema::AbiParam;
use crate::stack::{StackItem, TupleReader};

/// External service that knows the on-chain layout of composite values and
/// message bodies.
#[async_trait]
pub trait AbiCodec: Send + Sync {
    /// Encode a JSON value of the declared parameter type into a cell.
    async fn encode(&self, param: &AbiParam, value: &JsonValue) -> Result<Cell, CollaboratorError>;

    /// Decode a cell holding a value of the declared parameter type.
    ///
    /// Arrays arrive as a 32-bit element count followed by a reference to
    /// the element dictionary.
    async fn decode(&self, param: &AbiParam, cell: &Cell) -> Result<JsonValue, CollaboratorError>;

    /// Decode a contract's persistent data into named state variables.
    ///
    /// `state` is the contract's state-init cell (code and data).
    async fn decode_state(
        &self,
        contract: &str,
        state: &Cell,
    ) -> Result<JsonMap<String, JsonValue>, CollaboratorError>;

    /// Build initial data from init-field values.
    async fn build_data(&self, contract: &str, params: &JsonValue) -> Result<Cell, CollaboratorError>;

    /// Build the body of an internal message calling `function`.
    async fn internal_body(
        &self,
        contract: &str,
        function: &str,
        params: &JsonValue,
    ) -> Result<Cell, CollaboratorError>;

    /// Build and sign the body of an external message calling `function`.
    async fn external_body(&self, request: ExternalBodyRequest<'_>) -> Result<SignedBody, CollaboratorError>;
}

/// Channel for talking to one deployed contract.
#[async_trait]
pub trait ContractProvider: Send + Sync {
    async fn internal(&self, message: InternalMessage) -> Result<(), CollaboratorError>;

    async fn external(&self, body: Cell) -> Result<(), CollaboratorError>;

    /// Run a getter and return its result items.
    async fn get(&self, method: &str, args: Vec<StackItem>) -> Result<TupleReader, CollaboratorError>;

    async fn state(&self) -> Result<ContractState, CollaboratorError>;
}

/// Flags controlling how an outgoing message pays for itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SendMode(u8);

impl SendMode {
    pub const CARRY_ALL_REMAINING_BALANCE: SendMode = SendMode(128);
    pub const CARRY_ALL_REMAINING_INCOMING_VALUE: SendMode = SendMode(64);
    pub const DESTROY_ACCOUNT_IF_ZERO: SendMode = SendMode(32);
    pub const PAY_GAS_SEPARATELY: SendMode = SendMode(1);
    pub const IGNORE_ERRORS: SendMode = SendMode(2);
    pub const NONE: SendMode = SendMode(0);

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, other: SendMode) -> bool {
        self.0 & other.0 == other.0
    }
}

impl Default for SendMode {
    fn default() -> Self {
        Self::PAY_GAS_SEPARATELY
    }
}

impl BitOr for SendMode {
    type Output = SendMode;

    fn bitor(self, rhs: SendMode) -> SendMode {
        SendMode(self.0 | rhs.0)
    }
}

/// An internal message to the contract.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InternalMessage {
    /// Attached value in nanotons.
    pub value: u128,
    pub bounce: Option<bool>,
    pub send_mode: SendMode,
    pub body: Option<Cell>,
    pub init: Option<StateInit>,
}

impl InternalMessage {
    pub fn new(value: u128) -> Self {
        Self {
            value,
            ..Self::default()
        }
    }

    pub fn with_body(mut self, body: Cell) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_init(mut self, init: StateInit) -> Self {
        self.init = Some(init);
        self
    }

    pub fn with_bounce(mut self, bounce: Option<bool>) -> Self {
        self.bounce = bounce;
        self
    }

    pub fn with_send_mode(mut self, send_mode: Option<SendMode>) -> Self {
        self.send_mode = send_mode.unwrap_or_default();
        self
    }
}

/// Header fields of a signed external message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExternalHeader {
    /// Unix time in milliseconds.
    pub time: u64,
    /// Seconds until expiry, counted from `time`.
    pub lifetime: Option<u32>,
}

impl ExternalHeader {
    /// Expiry moment in Unix seconds, when a lifetime is set.
    pub fn expire_at(&self) -> Option<u32> {
        let lifetime = self.lifetime?;
        u32::try_from(self.time / 1000)
            .ok()
            .and_then(|now| now.checked_add(lifetime))
    }
}

/// Inputs for [`AbiCodec::external_body`].
#[derive(Debug, Clone, Copy)]
pub struct ExternalBodyRequest<'a> {
    pub contract: &'a str,
    pub function: &'a str,
    pub address: &'a StdAddress,
    pub header: &'a ExternalHeader,
    pub secret_key: &'a [u8],
    pub params: &'a JsonValue,
}

/// A signed external body together with its expiry time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedBody {
    pub message: Cell,
    pub expire_at: u32,
}

/// Account status as reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractState {
    Uninit,
    Active { code: Cell, data: Cell },
    Frozen,
}
