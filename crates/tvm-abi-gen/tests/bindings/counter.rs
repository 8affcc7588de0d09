// **********************************************
// This file is auto-generated. Do not modify it.
// **********************************************

#![allow(non_snake_case, clippy::too_many_arguments)]

use tvm_abi::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct CounterInit {
    pub _pubkey: Vec<u8>,
    pub isAllowed: BTreeMap<StdAddress, bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CounterState {
    pub _pubkey: Vec<u8>,
    pub _timestamp: BigInt,
    pub isAllowed: BTreeMap<StdAddress, bool>,
    pub count: BTreeMap<StdAddress, BigInt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GrantParams {
    pub user: Option<Address>,
    pub value: BigInt,
}

/// Client for the `Counter` contract.
#[derive(Debug, Clone, PartialEq)]
pub struct Counter {
    pub address: StdAddress,
    pub init: Option<StateInit>,
}

impl Counter {
    pub const CONTRACT_PATH: &str = "Counter";

    pub fn new(address: StdAddress) -> Self {
        Self { address, init: None }
    }

    /// Compute the address and initial state from constructor-flagged fields.
    pub async fn createFromABI(
        codec: &dyn AbiCodec,
        params: CounterInit,
        code: Cell,
        workchain: i32,
    ) -> Result<Self> {
        let mut json = JsonParams::new();
        json.insert(&AbiParam::new("_pubkey", "fixedbytes32"), params._pubkey)?;
        json.insert(&AbiParam::new("isAllowed", "map(address,bool)"), params.isAllowed)?;
        let data = codec.build_data(Self::CONTRACT_PATH, &json.into_json()).await?;
        let init = StateInit::new(code, data);
        Ok(Self {
            address: contract_address(workchain, &init)?,
            init: Some(init),
        })
    }

    /// Deploy with an empty internal message carrying the initial state.
    pub async fn sendDeploy(
        &self,
        provider: &dyn ContractProvider,
        value: u128,
    ) -> Result<()> {
        let mut message = InternalMessage::new(value);
        if let Some(init) = &self.init {
            message = message.with_init(init.clone());
        }
        provider.internal(message).await?;
        Ok(())
    }

    pub async fn getStateVariables(
        &self,
        provider: &dyn ContractProvider,
        codec: &dyn AbiCodec,
    ) -> Result<CounterState> {
        let state = read_state_variables(provider, codec, Self::CONTRACT_PATH).await?;
        Ok(CounterState {
            _pubkey: state.field(&AbiParam::new("_pubkey", "fixedbytes32"))?,
            _timestamp: state.field(&AbiParam::new("_timestamp", "uint64"))?,
            isAllowed: state.field(&AbiParam::new("isAllowed", "map(address,bool)"))?,
            count: state.field(&AbiParam::new("count", "map(address,uint256)"))?,
        })
    }

    pub async fn incBody(
        codec: &dyn AbiCodec,
    ) -> Result<Cell> {
        let json = JsonParams::new();
        Ok(codec.internal_body(Self::CONTRACT_PATH, "inc", &json.into_json()).await?)
    }

    pub async fn sendInc(
        &self,
        provider: &dyn ContractProvider,
        codec: &dyn AbiCodec,
        value: u128,
        bounce: Option<bool>,
        send_mode: Option<SendMode>,
    ) -> Result<()> {
        let body = Self::incBody(codec).await?;
        let message = InternalMessage::new(value)
            .with_body(body)
            .with_bounce(bounce)
            .with_send_mode(send_mode);
        provider.internal(message).await?;
        Ok(())
    }

    pub async fn incBodyExternal(
        &self,
        codec: &dyn AbiCodec,
        secret_key: &[u8],
        header: ExternalHeader,
    ) -> Result<SignedBody> {
        let json = JsonParams::new();
        let json = json.into_json();
        let request = ExternalBodyRequest {
            contract: Self::CONTRACT_PATH,
            function: "inc",
            address: &self.address,
            header: &header,
            secret_key,
            params: &json,
        };
        Ok(codec.external_body(request).await?)
    }

    /// Send the signed external message and return its expiry.
    pub async fn sendIncExternal(
        &self,
        provider: &dyn ContractProvider,
        codec: &dyn AbiCodec,
        secret_key: &[u8],
        header: ExternalHeader,
    ) -> Result<u32> {
        let signed = self.incBodyExternal(codec, secret_key, header).await?;
        provider.external(signed.message).await?;
        Ok(signed.expire_at)
    }

    pub async fn grantBody(
        codec: &dyn AbiCodec,
        params: GrantParams,
    ) -> Result<Cell> {
        let mut json = JsonParams::new();
        json.insert(&AbiParam::new("user", "address"), params.user)?;
        json.insert(&AbiParam::new("value", "uint256"), params.value)?;
        Ok(codec.internal_body(Self::CONTRACT_PATH, "grant", &json.into_json()).await?)
    }

    pub async fn sendGrant(
        &self,
        provider: &dyn ContractProvider,
        codec: &dyn AbiCodec,
        value: u128,
        params: GrantParams,
        bounce: Option<bool>,
        send_mode: Option<SendMode>,
    ) -> Result<()> {
        let body = Self::grantBody(codec, params).await?;
        let message = InternalMessage::new(value)
            .with_body(body)
            .with_bounce(bounce)
            .with_send_mode(send_mode);
        provider.internal(message).await?;
        Ok(())
    }

    pub async fn grantBodyExternal(
        &self,
        codec: &dyn AbiCodec,
        secret_key: &[u8],
        header: ExternalHeader,
        params: GrantParams,
    ) -> Result<SignedBody> {
        let mut json = JsonParams::new();
        json.insert(&AbiParam::new("user", "address"), params.user)?;
        json.insert(&AbiParam::new("value", "uint256"), params.value)?;
        let json = json.into_json();
        let request = ExternalBodyRequest {
            contract: Self::CONTRACT_PATH,
            function: "grant",
            address: &self.address,
            header: &header,
            secret_key,
            params: &json,
        };
        Ok(codec.external_body(request).await?)
    }

    /// Send the signed external message and return its expiry.
    pub async fn sendGrantExternal(
        &self,
        provider: &dyn ContractProvider,
        codec: &dyn AbiCodec,
        secret_key: &[u8],
        header: ExternalHeader,
        params: GrantParams,
    ) -> Result<u32> {
        let signed = self.grantBodyExternal(codec, secret_key, header, params).await?;
        provider.external(signed.message).await?;
        Ok(signed.expire_at)
    }

    pub async fn getCount(
        &self,
        provider: &dyn ContractProvider,
        codec: &dyn AbiCodec,
        user: Option<Address>,
    ) -> Result<BigInt> {
        let args = vec![
            encode_arg(codec, &AbiParam::new("user", "address"), user).await?,
        ];
        let mut stack = provider.get("getCount", args).await?;
        decode_arg(codec, &AbiParam::new("value0", "uint256"), &mut stack).await
    }

    pub async fn getIsAllowed(
        &self,
        provider: &dyn ContractProvider,
        codec: &dyn AbiCodec,
        user: Option<Address>,
    ) -> Result<bool> {
        let args = vec![
            encode_arg(codec, &AbiParam::new("user", "address"), user).await?,
        ];
        let mut stack = provider.get("isAllowed", args).await?;
        decode_arg(codec, &AbiParam::new("value0", "bool"), &mut stack).await
    }
}
