use std::collections::BTreeMap;

use futures::FutureExt;
use futures::future::BoxFuture;

use crate::cell::{Cell, CellBuilder};
use crate::error::{AbiError, Result};
use crate::json::from_json;
use crate::logging::{debug, error, trace, warn};
use crate::stack::{StackItem, TupleReader};
use crate::types::AbiType;
use crate::value::Value;
use crate::WireCodec;

/// Width of the element count in front of an array's element dictionary.
const ARRAY_LENGTH_BITS: usize = 32;

impl WireCodec<'_> {
    /// Decode one value of type `ty` from the reader.
    ///
    /// Consumes exactly one wire item, the mirror of [`WireCodec::encode`].
    pub fn decode<'s>(
        &'s self,
        name: &'s str,
        ty: &'s AbiType,
        reader: &'s mut TupleReader,
    ) -> BoxFuture<'s, Result<Value>> {
        async move {
            trace!(name, ty = %ty, remaining = reader.remaining(), "decoding wire item");
            match ty {
                AbiType::Optional { inner } => {
                    if matches!(reader.peek()?, StackItem::Null) {
                        reader.pop()?;
                        Ok(Value::Null)
                    } else {
                        self.decode(name, inner, reader).await
                    }
                }

                AbiType::Integer { .. } => Ok(Value::Int(reader.read_big_number()?)),

                AbiType::Bool => Ok(Value::Bool(reader.read_boolean()?)),

                AbiType::Address { strict } => match reader.read_address()? {
                    None => Ok(Value::Null),
                    Some(address) if *strict && address.as_std().is_none() => {
                        Err(AbiError::shape(ty, "external address"))
                    }
                    Some(address) => Ok(Value::Address(address)),
                },

                AbiType::Cell => Ok(Value::Cell(reader.read_cell()?)),

                AbiType::String | AbiType::Bytes { .. } | AbiType::Map { .. } => {
                    let cell = reader.read_cell()?;
                    self.decode_cell(name, ty, &cell).await
                }

                AbiType::Array { .. } => {
                    let mut array = reader.read_tuple()?;
                    let len = array.read_big_number()?;
                    let elements = array.read_cell()?;
                    if array.remaining() != 0 {
                        warn!(name, extra = array.remaining(), "ignoring trailing array items");
                    }
                    let len = len
                        .to_biguint()
                        .ok_or_else(|| AbiError::shape("non-negative array length", &len))?;
                    let mut wrapped = CellBuilder::new();
                    wrapped
                        .store_big_uint(&len, ARRAY_LENGTH_BITS)?
                        .store_ref(elements)?;
                    self.decode_cell(name, ty, &wrapped.build()).await
                }

                AbiType::Tuple { components } => {
                    let mut nested = reader.read_tuple()?;
                    let mut fields = BTreeMap::new();
                    for c in components {
                        let value = self.decode(&c.name, &c.ty, &mut nested).await?;
                        fields.insert(c.name.clone(), value);
                    }
                    Ok(Value::Tuple(fields))
                }
            }
        }
        .boxed()
    }

    /// Ask the external codec to decode a composite cell, then read its JSON.
    async fn decode_cell(&self, name: &str, ty: &AbiType, cell: &Cell) -> Result<Value> {
        let param = ty.to_param(name);
        debug!(name, ty = %ty, "decoding through external codec");
        let json = self.codec.decode(&param, cell).await.map_err(|e| {
            error!(name, ty = %ty, error = %e, "external codec failed to decode");
            AbiError::from(e)
        })?;
        from_json(ty, &json)
    }
}
