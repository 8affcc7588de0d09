//! JSON form of values, as exchanged with the external codec service.
//!
//! Integers travel as decimal strings, byte strings as lowercase hex, cells
//! as base64 bags of cells, standard addresses in raw form and external
//! addresses in compact form. Maps become objects keyed by the text form of
//! their keys.

use num_bigint::BigInt;
use num_traits::Num;
use serde_json::{Map as JsonMap, Value as JsonValue};

use crate::address::{Address, StdAddress};
use crate::cell::Cell;
use crate::error::{AbiError, Result};
use crate::logging::trace;
use crate::types::AbiType;
use crate::value::Value;

/// Serialize a value to its JSON form.
pub fn to_json(value: &Value) -> Result<JsonValue> {
    Ok(match value {
        Value::Null => JsonValue::Null,
        Value::Int(i) => JsonValue::String(i.to_string()),
        Value::Bool(b) => JsonValue::Bool(*b),
        Value::String(s) => JsonValue::String(s.clone()),
        Value::Bytes(b) => JsonValue::String(hex::encode(b)),
        Value::Cell(c) => JsonValue::String(c.to_base64()),
        Value::Address(a) => JsonValue::String(a.to_string()),
        Value::Array(items) => {
            JsonValue::Array(items.iter().map(to_json).collect::<Result<Vec<_>>>()?)
        }
        Value::Map(entries) => {
            let mut object = JsonMap::with_capacity(entries.len());
            for (k, v) in entries {
                object.insert(map_key(k)?, to_json(v)?);
            }
            JsonValue::Object(object)
        }
        Value::Tuple(fields) => {
            let mut object = JsonMap::with_capacity(fields.len());
            for (name, v) in fields {
                object.insert(name.clone(), to_json(v)?);
            }
            JsonValue::Object(object)
        }
    })
}

fn map_key(key: &Value) -> Result<String> {
    match key {
        Value::Int(i) => Ok(i.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::String(s) => Ok(s.clone()),
        Value::Bytes(b) => Ok(hex::encode(b)),
        Value::Address(a) => Ok(a.to_string()),
        other => Err(AbiError::UnsupportedMapKey(other.kind().to_string())),
    }
}

/// Read a JSON value of the given type.
pub fn from_json(ty: &AbiType, json: &JsonValue) -> Result<Value> {
    trace!(ty = %ty, "reading json value");
    match ty {
        AbiType::Optional { inner } => {
            if json.is_null() {
                Ok(Value::Null)
            } else {
                from_json(inner, json)
            }
        }
        AbiType::Integer { .. } => {
            let value = parse_integer(ty, json)?;
            ty.check_integer(&value)?;
            Ok(Value::Int(value))
        }
        AbiType::Bool => match json {
            JsonValue::Bool(b) => Ok(Value::Bool(*b)),
            JsonValue::String(s) if s == "true" => Ok(Value::Bool(true)),
            JsonValue::String(s) if s == "false" => Ok(Value::Bool(false)),
            other => Err(AbiError::json(ty, format!("expected a boolean, got {other}"))),
        },
        AbiType::String => Ok(Value::String(expect_str(ty, json)?.to_string())),
        AbiType::Bytes { fixed } => {
            let bytes = hex::decode(expect_str(ty, json)?).map_err(|e| AbiError::json(ty, e))?;
            if let Some(n) = fixed {
                if bytes.len() != usize::from(*n) {
                    return Err(AbiError::json(ty, format!("expected {n} bytes, got {}", bytes.len())));
                }
            }
            Ok(Value::Bytes(bytes))
        }
        AbiType::Cell => Ok(Value::Cell(Cell::from_base64(expect_str(ty, json)?)?)),
        AbiType::Address { strict } => {
            if json.is_null() {
                return Ok(Value::Null);
            }
            let text = expect_str(ty, json)?;
            let address = if *strict {
                Address::Std(StdAddress::from_raw_string(text)?)
            } else {
                Address::parse(text)?
            };
            Ok(Value::Address(address))
        }
        AbiType::Array { element } => match json {
            JsonValue::Array(items) => items
                .iter()
                .map(|item| from_json(element, item))
                .collect::<Result<Vec<_>>>()
                .map(Value::Array),
            other => Err(AbiError::json(ty, format!("expected an array, got {other}"))),
        },
        AbiType::Map { key, value } => {
            let object = expect_object(ty, json)?;
            object
                .iter()
                .map(|(k, v)| {
                    Ok((
                        from_json(key, &JsonValue::String(k.clone()))?,
                        from_json(value, v)?,
                    ))
                })
                .collect::<Result<Vec<_>>>()
                .map(Value::Map)
        }
        AbiType::Tuple { components } => {
            let object = expect_object(ty, json)?;
            components
                .iter()
                .map(|c| {
                    let field = object
                        .get(&c.name)
                        .ok_or_else(|| AbiError::json(ty, format!("missing field '{}'", c.name)))?;
                    Ok((c.name.clone(), from_json(&c.ty, field)?))
                })
                .collect::<Result<_>>()
                .map(Value::Tuple)
        }
    }
}

fn expect_str<'a>(ty: &AbiType, json: &'a JsonValue) -> Result<&'a str> {
    json.as_str()
        .ok_or_else(|| AbiError::json(ty, format!("expected a string, got {json}")))
}

fn expect_object<'a>(ty: &AbiType, json: &'a JsonValue) -> Result<&'a JsonMap<String, JsonValue>> {
    json.as_object()
        .ok_or_else(|| AbiError::json(ty, format!("expected an object, got {json}")))
}

/// Integers arrive as decimal or `0x` hex strings, or as JSON numbers.
fn parse_integer(ty: &AbiType, json: &JsonValue) -> Result<BigInt> {
    match json {
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(BigInt::from(i))
            } else if let Some(u) = n.as_u64() {
                Ok(BigInt::from(u))
            } else {
                Err(AbiError::json(ty, format!("{n} is not an integer")))
            }
        }
        JsonValue::String(s) => {
            let text = s.trim();
            let (negative, digits) = match text.strip_prefix('-') {
                Some(rest) => (true, rest),
                None => (false, text),
            };
            let magnitude = match digits
                .strip_prefix("0x")
                .or_else(|| digits.strip_prefix("0X"))
            {
                Some(hex_digits) => BigInt::from_str_radix(hex_digits, 16),
                None => BigInt::from_str_radix(digits, 10),
            }
            .map_err(|e| AbiError::json(ty, format!("'{s}': {e}")))?;
            Ok(if negative { -magnitude } else { magnitude })
        }
        other => Err(AbiError::json(ty, format!("expected an integer, got {other}"))),
    }
}
