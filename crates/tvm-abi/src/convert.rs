//! Conversions between Rust types used in generated bindings and [`Value`].
//!
//! Every conversion is directed by the declared [`AbiType`], so the same Rust
//! type can serve several ABI types (a `Vec<u8>` is either `bytes` or
//! `uint8[]`, an `Option<Address>` is either a nullable `address` or
//! `optional(address)`).

use std::collections::BTreeMap;

use num_bigint::BigInt;

use crate::address::{Address, StdAddress};
use crate::cell::Cell;
use crate::error::{AbiError, Result};
use crate::types::{AbiType, Component};
use crate::value::Value;

/// Convert a Rust value into a [`Value`] of the given type.
pub trait IntoAbi {
    fn into_abi(self, ty: &AbiType) -> Result<Value>;
}

/// Convert a [`Value`] of the given type into a Rust value.
pub trait FromAbi: Sized {
    fn from_abi(value: Value, ty: &AbiType) -> Result<Self>;
}

impl IntoAbi for Value {
    fn into_abi(self, ty: &AbiType) -> Result<Value> {
        self.conforms(ty)?;
        Ok(self)
    }
}

impl FromAbi for Value {
    fn from_abi(value: Value, _ty: &AbiType) -> Result<Self> {
        Ok(value)
    }
}

impl IntoAbi for BigInt {
    fn into_abi(self, ty: &AbiType) -> Result<Value> {
        ty.check_integer(&self)?;
        Ok(Value::Int(self))
    }
}

impl FromAbi for BigInt {
    fn from_abi(value: Value, ty: &AbiType) -> Result<Self> {
        match value {
            Value::Int(i) => Ok(i),
            other => Err(AbiError::mismatch(ty, other.kind())),
        }
    }
}

impl IntoAbi for u8 {
    fn into_abi(self, ty: &AbiType) -> Result<Value> {
        BigInt::from(self).into_abi(ty)
    }
}

impl FromAbi for u8 {
    fn from_abi(value: Value, ty: &AbiType) -> Result<Self> {
        let i = BigInt::from_abi(value, ty)?;
        u8::try_from(&i).map_err(|_| AbiError::IntegerOutOfRange {
            value: i.to_string(),
            ty: "uint8".to_string(),
        })
    }
}

impl IntoAbi for bool {
    fn into_abi(self, ty: &AbiType) -> Result<Value> {
        match ty {
            AbiType::Bool => Ok(Value::Bool(self)),
            other => Err(AbiError::mismatch(other, "bool")),
        }
    }
}

impl FromAbi for bool {
    fn from_abi(value: Value, ty: &AbiType) -> Result<Self> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(AbiError::mismatch(ty, other.kind())),
        }
    }
}

impl IntoAbi for String {
    fn into_abi(self, ty: &AbiType) -> Result<Value> {
        match ty {
            AbiType::String => Ok(Value::String(self)),
            other => Err(AbiError::mismatch(other, "string")),
        }
    }
}

impl IntoAbi for &str {
    fn into_abi(self, ty: &AbiType) -> Result<Value> {
        self.to_string().into_abi(ty)
    }
}

impl FromAbi for String {
    fn from_abi(value: Value, ty: &AbiType) -> Result<Self> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(AbiError::mismatch(ty, other.kind())),
        }
    }
}

impl IntoAbi for Cell {
    fn into_abi(self, ty: &AbiType) -> Result<Value> {
        match ty {
            AbiType::Cell => Ok(Value::Cell(self)),
            other => Err(AbiError::mismatch(other, "cell")),
        }
    }
}

impl FromAbi for Cell {
    fn from_abi(value: Value, ty: &AbiType) -> Result<Self> {
        match value {
            Value::Cell(c) => Ok(c),
            other => Err(AbiError::mismatch(ty, other.kind())),
        }
    }
}

impl IntoAbi for Address {
    fn into_abi(self, ty: &AbiType) -> Result<Value> {
        Value::Address(self).into_abi(ty)
    }
}

impl FromAbi for Address {
    fn from_abi(value: Value, ty: &AbiType) -> Result<Self> {
        match value {
            Value::Address(a) => Ok(a),
            other => Err(AbiError::mismatch(ty, other.kind())),
        }
    }
}

impl IntoAbi for StdAddress {
    fn into_abi(self, ty: &AbiType) -> Result<Value> {
        Address::Std(self).into_abi(ty)
    }
}

impl FromAbi for StdAddress {
    fn from_abi(value: Value, ty: &AbiType) -> Result<Self> {
        match Address::from_abi(value, ty)? {
            Address::Std(a) => Ok(a),
            Address::External(_) => Err(AbiError::mismatch(ty, "external address")),
        }
    }
}

/// Types whose values may be null without an `optional(...)` wrapper.
fn is_nullable(ty: &AbiType) -> bool {
    matches!(ty, AbiType::Optional { .. } | AbiType::Address { .. })
}

impl<T: IntoAbi> IntoAbi for Option<T> {
    fn into_abi(self, ty: &AbiType) -> Result<Value> {
        match (self, ty) {
            (None, ty) if is_nullable(ty) => Ok(Value::Null),
            (None, ty) => Err(AbiError::mismatch(ty, "null")),
            (Some(v), AbiType::Optional { inner }) => v.into_abi(inner),
            (Some(v), ty) => v.into_abi(ty),
        }
    }
}

impl<T: FromAbi> FromAbi for Option<T> {
    fn from_abi(value: Value, ty: &AbiType) -> Result<Self> {
        match (value, ty) {
            (Value::Null, _) => Ok(None),
            (v, AbiType::Optional { inner }) => T::from_abi(v, inner).map(Some),
            (v, ty) => T::from_abi(v, ty).map(Some),
        }
    }
}

impl<T: IntoAbi> IntoAbi for Vec<T> {
    fn into_abi(self, ty: &AbiType) -> Result<Value> {
        match ty {
            AbiType::Array { element } => self
                .into_iter()
                .map(|item| item.into_abi(element))
                .collect::<Result<Vec<_>>>()
                .map(Value::Array),
            AbiType::Bytes { .. } => {
                let byte = AbiType::uint(8);
                let bytes = self
                    .into_iter()
                    .map(|item| u8::from_abi(item.into_abi(&byte)?, &byte))
                    .collect::<Result<Vec<_>>>()?;
                Value::Bytes(bytes).into_abi(ty)
            }
            other => Err(AbiError::mismatch(other, "array")),
        }
    }
}

impl<T: FromAbi> FromAbi for Vec<T> {
    fn from_abi(value: Value, ty: &AbiType) -> Result<Self> {
        match (value, ty) {
            (Value::Array(items), AbiType::Array { element }) => items
                .into_iter()
                .map(|item| T::from_abi(item, element))
                .collect(),
            (Value::Bytes(bytes), AbiType::Bytes { .. }) => {
                let byte = AbiType::uint(8);
                bytes
                    .into_iter()
                    .map(|b| T::from_abi(Value::Int(b.into()), &byte))
                    .collect()
            }
            (other, ty) => Err(AbiError::mismatch(ty, other.kind())),
        }
    }
}

impl<K: IntoAbi, V: IntoAbi> IntoAbi for BTreeMap<K, V> {
    fn into_abi(self, ty: &AbiType) -> Result<Value> {
        let AbiType::Map { key, value } = ty else {
            return Err(AbiError::mismatch(ty, "map"));
        };
        self.into_iter()
            .map(|(k, v)| Ok((k.into_abi(key)?, v.into_abi(value)?)))
            .collect::<Result<Vec<_>>>()
            .map(Value::Map)
    }
}

impl<K: FromAbi + Ord, V: FromAbi> FromAbi for BTreeMap<K, V> {
    fn from_abi(value: Value, ty: &AbiType) -> Result<Self> {
        match (ty, value) {
            (AbiType::Map { key, value: value_ty }, Value::Map(entries)) => entries
                .into_iter()
                .map(|(k, v)| Ok((K::from_abi(k, key)?, V::from_abi(v, value_ty)?)))
                .collect(),
            (ty, other) => Err(AbiError::mismatch(ty, other.kind())),
        }
    }
}

fn tuple_components(ty: &AbiType, arity: usize) -> Result<&[Component]> {
    match ty {
        AbiType::Tuple { components } if components.len() == arity => Ok(components),
        AbiType::Tuple { components } => Err(AbiError::mismatch(
            format!("tuple of {arity} components"),
            format!("tuple of {}", components.len()),
        )),
        other => Err(AbiError::mismatch(other, "tuple")),
    }
}

fn component(components: &[Component], index: usize) -> Result<&Component> {
    components
        .get(index)
        .ok_or_else(|| AbiError::mismatch(format!("tuple component {index}"), "nothing"))
}

macro_rules! impl_tuple {
    ($arity:expr; $($name:ident $idx:tt),+) => {
        impl<$($name: IntoAbi),+> IntoAbi for ($($name,)+) {
            fn into_abi(self, ty: &AbiType) -> Result<Value> {
                let components = tuple_components(ty, $arity)?;
                let mut fields = BTreeMap::new();
                $(
                    let c = component(components, $idx)?;
                    fields.insert(c.name.clone(), self.$idx.into_abi(&c.ty)?);
                )+
                Ok(Value::Tuple(fields))
            }
        }

        impl<$($name: FromAbi),+> FromAbi for ($($name,)+) {
            fn from_abi(value: Value, ty: &AbiType) -> Result<Self> {
                let components = tuple_components(ty, $arity)?;
                let mut fields = match value {
                    Value::Tuple(fields) => fields,
                    other => return Err(AbiError::mismatch(ty, other.kind())),
                };
                Ok(($(
                    {
                        let c = component(components, $idx)?;
                        let field = fields
                            .remove(&c.name)
                            .ok_or_else(|| AbiError::mismatch(format!("tuple field '{}'", c.name), "nothing"))?;
                        <$name as FromAbi>::from_abi(field, &c.ty)?
                    },
                )+))
            }
        }
    };
}

impl_tuple!(1; A 0);
impl_tuple!(2; A 0, B 1);
impl_tuple!(3; A 0, B 1, C 2);
impl_tuple!(4; A 0, B 1, C 2, D 3);
impl_tuple!(5; A 0, B 1, C 2, D 3, E 4);
impl_tuple!(6; A 0, B 1, C 2, D 3, E 4, F 5);
impl_tuple!(7; A 0, B 1, C 2, D 3, E 4, F 5, G 6);
impl_tuple!(8; A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7);
