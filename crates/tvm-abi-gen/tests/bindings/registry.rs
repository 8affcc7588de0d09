// **********************************************
// This file is auto-generated. Do not modify it.
// **********************************************

#![allow(non_snake_case, clippy::too_many_arguments)]

use tvm_abi::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct RegistryInit {
    pub owner: Option<StdAddress>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegistryState {
    pub owner: Option<StdAddress>,
    pub entries: BTreeMap<BigInt, Cell>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GetEntriesParams {
    pub from: BigInt,
    pub limit: Option<BigInt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GetEntriesOutput {
    pub ids: Vec<BigInt>,
    pub owners: BTreeMap<BigInt, Option<Address>>,
}

/// Client for the `Registry` contract.
#[derive(Debug, Clone, PartialEq)]
pub struct Registry {
    pub address: StdAddress,
    pub init: Option<StateInit>,
}

impl Registry {
    pub const CONTRACT_PATH: &str = "Registry";

    pub fn new(address: StdAddress) -> Self {
        Self { address, init: None }
    }

    /// Compute the address and initial state from constructor-flagged fields.
    pub async fn createFromABI(
        codec: &dyn AbiCodec,
        params: RegistryInit,
        code: Cell,
        workchain: i32,
    ) -> Result<Self> {
        let mut json = JsonParams::new();
        json.insert(&AbiParam::new("owner", "address_std"), params.owner)?;
        let data = codec.build_data(Self::CONTRACT_PATH, &json.into_json()).await?;
        let init = StateInit::new(code, data);
        Ok(Self {
            address: contract_address(workchain, &init)?,
            init: Some(init),
        })
    }

    pub async fn getStateVariables(
        &self,
        provider: &dyn ContractProvider,
        codec: &dyn AbiCodec,
    ) -> Result<RegistryState> {
        let state = read_state_variables(provider, codec, Self::CONTRACT_PATH).await?;
        Ok(RegistryState {
            owner: state.field(&AbiParam::new("owner", "address_std"))?,
            entries: state.field(&AbiParam::new("entries", "map(uint32,cell)"))?,
        })
    }

    pub async fn constructorBody(
        codec: &dyn AbiCodec,
        owner: Option<StdAddress>,
    ) -> Result<Cell> {
        let mut json = JsonParams::new();
        json.insert(&AbiParam::new("owner", "address_std"), owner)?;
        Ok(codec.internal_body(Self::CONTRACT_PATH, "constructor", &json.into_json()).await?)
    }

    pub async fn sendConstructor(
        &self,
        provider: &dyn ContractProvider,
        codec: &dyn AbiCodec,
        value: u128,
        owner: Option<StdAddress>,
        bounce: Option<bool>,
        send_mode: Option<SendMode>,
    ) -> Result<()> {
        let body = Self::constructorBody(codec, owner).await?;
        let mut message = InternalMessage::new(value)
            .with_body(body)
            .with_bounce(bounce)
            .with_send_mode(send_mode);
        if let Some(init) = &self.init {
            message = message.with_init(init.clone());
        }
        provider.internal(message).await?;
        Ok(())
    }

    pub async fn constructorBodyExternal(
        &self,
        codec: &dyn AbiCodec,
        secret_key: &[u8],
        header: ExternalHeader,
        owner: Option<StdAddress>,
    ) -> Result<SignedBody> {
        let mut json = JsonParams::new();
        json.insert(&AbiParam::new("owner", "address_std"), owner)?;
        let json = json.into_json();
        let request = ExternalBodyRequest {
            contract: Self::CONTRACT_PATH,
            function: "constructor",
            address: &self.address,
            header: &header,
            secret_key,
            params: &json,
        };
        Ok(codec.external_body(request).await?)
    }

    /// Send the signed external message and return its expiry.
    pub async fn sendConstructorExternal(
        &self,
        provider: &dyn ContractProvider,
        codec: &dyn AbiCodec,
        secret_key: &[u8],
        header: ExternalHeader,
        owner: Option<StdAddress>,
    ) -> Result<u32> {
        let signed = self.constructorBodyExternal(codec, secret_key, header, owner).await?;
        provider.external(signed.message).await?;
        Ok(signed.expire_at)
    }

    pub async fn sendRecordBody(
        codec: &dyn AbiCodec,
        entry: (BigInt, String, Option<Vec<String>>,),
    ) -> Result<Cell> {
        let mut json = JsonParams::new();
        json.insert(&AbiParam::new("entry", "tuple").with_components(vec![AbiParam::new("id", "uint32"), AbiParam::new("type", "string"), AbiParam::new("tags", "optional(string[])")]), entry)?;
        Ok(codec.internal_body(Self::CONTRACT_PATH, "sendRecord", &json.into_json()).await?)
    }

    pub async fn sendRecord(
        &self,
        provider: &dyn ContractProvider,
        codec: &dyn AbiCodec,
        value: u128,
        entry: (BigInt, String, Option<Vec<String>>,),
        bounce: Option<bool>,
        send_mode: Option<SendMode>,
    ) -> Result<()> {
        let body = Self::sendRecordBody(codec, entry).await?;
        let message = InternalMessage::new(value)
            .with_body(body)
            .with_bounce(bounce)
            .with_send_mode(send_mode);
        provider.internal(message).await?;
        Ok(())
    }

    pub async fn sendRecordBodyExternal(
        &self,
        codec: &dyn AbiCodec,
        secret_key: &[u8],
        header: ExternalHeader,
        entry: (BigInt, String, Option<Vec<String>>,),
    ) -> Result<SignedBody> {
        let mut json = JsonParams::new();
        json.insert(&AbiParam::new("entry", "tuple").with_components(vec![AbiParam::new("id", "uint32"), AbiParam::new("type", "string"), AbiParam::new("tags", "optional(string[])")]), entry)?;
        let json = json.into_json();
        let request = ExternalBodyRequest {
            contract: Self::CONTRACT_PATH,
            function: "sendRecord",
            address: &self.address,
            header: &header,
            secret_key,
            params: &json,
        };
        Ok(codec.external_body(request).await?)
    }

    /// Send the signed external message and return its expiry.
    pub async fn sendRecordExternal(
        &self,
        provider: &dyn ContractProvider,
        codec: &dyn AbiCodec,
        secret_key: &[u8],
        header: ExternalHeader,
        entry: (BigInt, String, Option<Vec<String>>,),
    ) -> Result<u32> {
        let signed = self.sendRecordBodyExternal(codec, secret_key, header, entry).await?;
        provider.external(signed.message).await?;
        Ok(signed.expire_at)
    }

    pub async fn getEntries(
        &self,
        provider: &dyn ContractProvider,
        codec: &dyn AbiCodec,
        params: GetEntriesParams,
    ) -> Result<GetEntriesOutput> {
        let args = vec![
            encode_arg(codec, &AbiParam::new("from", "uint32"), params.from).await?,
            encode_arg(codec, &AbiParam::new("limit", "optional(uint8)"), params.limit).await?,
        ];
        let mut stack = provider.get("entries", args).await?;
        Ok(GetEntriesOutput {
            ids: decode_arg(codec, &AbiParam::new("ids", "uint32[]"), &mut stack).await?,
            owners: decode_arg(codec, &AbiParam::new("owners", "map(uint32,address)"), &mut stack).await?,
        })
    }

    pub async fn getVersion(
        &self,
        provider: &dyn ContractProvider,
        codec: &dyn AbiCodec,
    ) -> Result<BigInt> {
        let args = Vec::new();
        let mut stack = provider.get("getVersion", args).await?;
        decode_arg(codec, &AbiParam::new("value0", "varuint16"), &mut stack).await
    }
}
