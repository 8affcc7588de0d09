//! Native Rust type expressions for ABI types.
//!
//! The text produced here appears verbatim in generated signatures and
//! resolves against the runtime prelude (`BigInt`, `Address`, `Cell`, ...).

use tvm_abi::AbiType;

use crate::logging::warn;

/// Largest tuple arity with typed conversions in the runtime.
pub const MAX_TUPLE_ARITY: usize = 8;

/// Rust type for a parameter in any position other than a map key.
///
/// `address` maps to a nullable address so the none address can be passed;
/// an `optional(...)` around an address does not add a second layer.
pub fn rust_type(ty: &AbiType) -> String {
    match ty {
        AbiType::Integer { .. } => "BigInt".to_string(),
        AbiType::Bool => "bool".to_string(),
        AbiType::String => "String".to_string(),
        AbiType::Bytes { .. } => "Vec<u8>".to_string(),
        AbiType::Cell => "Cell".to_string(),
        AbiType::Address { strict: false } => "Option<Address>".to_string(),
        AbiType::Address { strict: true } => "Option<StdAddress>".to_string(),
        AbiType::Array { element } => format!("Vec<{}>", rust_type(element)),
        AbiType::Optional { inner } => match inner.as_ref() {
            AbiType::Address { .. } => rust_type(inner),
            other => format!("Option<{}>", rust_type(other)),
        },
        AbiType::Map { key, value } => {
            format!("BTreeMap<{}, {}>", rust_key_type(key), rust_type(value))
        }
        AbiType::Tuple { components } if components.len() > MAX_TUPLE_ARITY => {
            warn!(
                arity = components.len(),
                "tuple too wide for typed conversion, using Value"
            );
            "Value".to_string()
        }
        AbiType::Tuple { components } => {
            let items: Vec<String> = components.iter().map(|c| rust_type(&c.ty)).collect();
            format!("({},)", items.join(", "))
        }
    }
}

/// Rust type for a map key. Keys are never null, so addresses map to the
/// internal address type directly.
pub fn rust_key_type(ty: &AbiType) -> String {
    match ty {
        AbiType::Address { .. } => "StdAddress".to_string(),
        other => rust_type(other),
    }
}
