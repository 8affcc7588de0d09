use futures::FutureExt;
use futures::future::BoxFuture;
use num_bigint::BigInt;

use crate::cell::{Cell, CellBuilder};
use crate::error::{AbiError, Result};
use crate::json::to_json;
use crate::logging::{debug, error, trace};
use crate::stack::StackItem;
use crate::types::AbiType;
use crate::value::Value;
use crate::WireCodec;

impl WireCodec<'_> {
    /// Encode a native value into exactly one wire item.
    ///
    /// Scalars are encoded locally. Strings, byte strings, maps and array
    /// contents are handed to the external codec as JSON and travel as the
    /// returned cell. Optionals and tuples recurse into their members.
    pub fn encode<'s>(
        &'s self,
        name: &'s str,
        ty: &'s AbiType,
        value: &'s Value,
    ) -> BoxFuture<'s, Result<StackItem>> {
        async move {
            trace!(name, ty = %ty, kind = value.kind(), "encoding wire item");
            match (ty, value) {
                (AbiType::Optional { .. }, Value::Null) => Ok(StackItem::Null),
                (AbiType::Optional { inner }, value) => self.encode(name, inner, value).await,

                (AbiType::Integer { .. }, Value::Int(i)) => {
                    ty.check_integer(i)?;
                    Ok(StackItem::Int(i.clone()))
                }

                (AbiType::Bool, Value::Bool(b)) => {
                    Ok(StackItem::Int(BigInt::from(if *b { -1 } else { 0 })))
                }

                (AbiType::Address { .. }, Value::Null) => {
                    let mut slice = CellBuilder::new();
                    slice.store_address(None)?;
                    Ok(StackItem::Slice(slice.build()))
                }
                (AbiType::Address { .. }, Value::Address(address)) => {
                    value.conforms(ty)?;
                    let mut slice = CellBuilder::new();
                    slice.store_address(Some(address))?;
                    Ok(StackItem::Slice(slice.build()))
                }

                (AbiType::Cell, Value::Cell(cell)) => Ok(StackItem::Cell(cell.clone())),

                (AbiType::String, Value::String(_))
                | (AbiType::Bytes { .. }, Value::Bytes(_))
                | (AbiType::Map { .. }, Value::Map(_)) => {
                    let cell = self.encode_cell(name, ty, value).await?;
                    Ok(StackItem::Cell(cell))
                }

                (AbiType::Array { .. }, Value::Array(items)) => {
                    let cell = self.encode_cell(name, ty, value).await?;
                    Ok(StackItem::Tuple(vec![
                        StackItem::Int(BigInt::from(items.len())),
                        StackItem::Cell(cell),
                    ]))
                }

                (AbiType::Tuple { components }, Value::Tuple(fields)) => {
                    let mut items = Vec::with_capacity(components.len());
                    for c in components {
                        let field = fields.get(&c.name).ok_or_else(|| {
                            AbiError::mismatch(format!("tuple field '{}'", c.name), "nothing")
                        })?;
                        items.push(self.encode(&c.name, &c.ty, field).await?);
                    }
                    Ok(StackItem::Tuple(items))
                }

                (ty, value) => Err(AbiError::mismatch(ty, value.kind())),
            }
        }
        .boxed()
    }

    /// Hand a composite value to the external codec and return its cell.
    async fn encode_cell(&self, name: &str, ty: &AbiType, value: &Value) -> Result<Cell> {
        value.conforms(ty)?;
        let param = ty.to_param(name);
        let json = to_json(value)?;
        debug!(name, ty = %ty, "encoding through external codec");
        self.codec.encode(&param, &json).await.map_err(|e| {
            error!(name, ty = %ty, error = %e, "external codec failed to encode");
            AbiError::from(e)
        })
    }
}
