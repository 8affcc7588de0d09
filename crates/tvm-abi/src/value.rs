//! Dynamic native values.
//!
//! [`Value`] is the runtime representation the codec works on. Generated
//! bindings never see it directly: they convert their typed arguments through
//! [`IntoAbi`](crate::IntoAbi) and [`FromAbi`](crate::FromAbi).

use std::collections::BTreeMap;

use num_bigint::BigInt;

use crate::address::Address;
use crate::cell::Cell;
use crate::error::{AbiError, Result};
use crate::types::AbiType;

/// A native value of some [`AbiType`].
///
/// `Null` stands for both an absent optional and a null address.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Int(BigInt),
    Bool(bool),
    String(String),
    Bytes(Vec<u8>),
    Cell(Cell),
    Address(Address),
    Array(Vec<Value>),
    /// Entries in no particular order.
    Map(Vec<(Value, Value)>),
    /// Fields keyed by component name.
    Tuple(BTreeMap<String, Value>),
}

impl Value {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Int(_) => "int",
            Self::Bool(_) => "bool",
            Self::String(_) => "string",
            Self::Bytes(_) => "bytes",
            Self::Cell(_) => "cell",
            Self::Address(_) => "address",
            Self::Array(_) => "array",
            Self::Map(_) => "map",
            Self::Tuple(_) => "tuple",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Field of a tuple value.
    pub fn field(&self, name: &str) -> Option<&Value> {
        match self {
            Self::Tuple(fields) => fields.get(name),
            _ => None,
        }
    }

    /// Check that this value has the shape of `ty` and that every integer
    /// fits its declared width.
    pub fn conforms(&self, ty: &AbiType) -> Result<()> {
        match (ty, self) {
            (AbiType::Optional { .. } | AbiType::Address { .. }, Value::Null) => Ok(()),
            (AbiType::Optional { inner }, value) => value.conforms(inner),
            (AbiType::Integer { .. }, Value::Int(i)) => ty.check_integer(i),
            (AbiType::Bool, Value::Bool(_))
            | (AbiType::String, Value::String(_))
            | (AbiType::Cell, Value::Cell(_))
            | (AbiType::Bytes { fixed: None }, Value::Bytes(_)) => Ok(()),
            (AbiType::Bytes { fixed: Some(n) }, Value::Bytes(bytes)) => {
                if bytes.len() == usize::from(*n) {
                    Ok(())
                } else {
                    Err(AbiError::mismatch(ty, format!("{} bytes", bytes.len())))
                }
            }
            (AbiType::Address { strict }, Value::Address(address)) => {
                if *strict && address.as_std().is_none() {
                    Err(AbiError::mismatch(ty, "external address"))
                } else {
                    Ok(())
                }
            }
            (AbiType::Array { element }, Value::Array(items)) => {
                items.iter().try_for_each(|item| item.conforms(element))
            }
            (AbiType::Map { key, value }, Value::Map(entries)) => {
                entries.iter().try_for_each(|(k, v)| {
                    if k.is_null() {
                        return Err(AbiError::mismatch(key, "null"));
                    }
                    k.conforms(key)?;
                    v.conforms(value)
                })
            }
            (AbiType::Tuple { components }, Value::Tuple(fields)) => {
                components.iter().try_for_each(|c| {
                    fields
                        .get(&c.name)
                        .ok_or_else(|| AbiError::mismatch(format!("tuple field '{}'", c.name), "nothing"))?
                        .conforms(&c.ty)
                })
            }
            (ty, value) => Err(AbiError::mismatch(ty, value.kind())),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Bytes(a), Self::Bytes(b)) => a == b,
            (Self::Cell(a), Self::Cell(b)) => a == b,
            (Self::Address(a), Self::Address(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Tuple(a), Self::Tuple(b)) => a == b,
            // Map equality ignores entry order.
            (Self::Map(a), Self::Map(b)) => {
                a.len() == b.len()
                    && a.iter().all(|(k, v)| {
                        b.iter().any(|(bk, bv)| bk == k && bv == v)
                    })
            }
            _ => false,
        }
    }
}

impl From<BigInt> for Value {
    fn from(value: BigInt) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Address> for Value {
    fn from(value: Address) -> Self {
        Self::Address(value)
    }
}

impl From<Cell> for Value {
    fn from(value: Cell) -> Self {
        Self::Cell(value)
    }
}
