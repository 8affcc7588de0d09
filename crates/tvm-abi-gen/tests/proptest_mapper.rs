//! Property-based tests: parsing then mapping never panics.

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;
use tvm_abi::{AbiParam, AbiType};
use tvm_abi_gen::rust_type;

fn scalar() -> impl Strategy<Value = String> {
    prop_oneof![
        (1u16..=256).prop_map(|n| format!("uint{n}")),
        (1u16..=257).prop_map(|n| format!("int{n}")),
        prop_oneof![Just(16u16), Just(32u16)].prop_map(|n| format!("varuint{n}")),
        prop_oneof![Just(16u16), Just(32u16)].prop_map(|n| format!("varint{n}")),
        (1u16..=32).prop_map(|n| format!("fixedbytes{n}")),
        Just("bool".to_string()),
        Just("string".to_string()),
        Just("bytes".to_string()),
        Just("cell".to_string()),
        Just("address".to_string()),
        Just("address_std".to_string()),
    ]
}

fn map_key() -> impl Strategy<Value = String> {
    prop_oneof![
        (1u16..=256).prop_map(|n| format!("uint{n}")),
        Just("address".to_string()),
        Just("int32".to_string()),
    ]
}

/// Grammar-conforming descriptors without tuples.
fn descriptor() -> impl Strategy<Value = String> {
    scalar().prop_recursive(4, 32, 2, |inner| {
        prop_oneof![
            inner.clone().prop_map(|d| format!("{d}[]")),
            inner.clone().prop_map(|d| format!("optional({d})")),
            (map_key(), inner).prop_map(|(k, v)| format!("map({k},{v})")),
        ]
    })
}

proptest! {
    #[test]
    fn parse_then_map_is_total(desc in descriptor()) {
        let ty = AbiType::parse(&desc, None).unwrap();
        prop_assert!(!rust_type(&ty).is_empty());
        // The descriptor text survives a parse round trip.
        prop_assert_eq!(ty.to_string(), desc);
    }

    #[test]
    fn tuples_of_descriptors_map(descs in proptest::collection::vec(descriptor(), 1..10)) {
        let components: Vec<AbiParam> = descs
            .iter()
            .enumerate()
            .map(|(i, d)| AbiParam::new(format!("f{i}"), d.clone()))
            .collect();
        let ty = AbiType::parse("tuple[]", Some(&components)).unwrap();
        let mapped = rust_type(&ty);
        prop_assert!(mapped.starts_with("Vec<"));
    }

    #[test]
    fn arbitrary_text_never_panics(desc in "\\PC{0,40}") {
        if let Ok(ty) = AbiType::parse(&desc, None) {
            prop_assert!(!rust_type(&ty).is_empty());
        }
    }

    #[test]
    fn unknown_names_are_unsupported(name in "[a-z]{1,12}") {
        prop_assume!(AbiType::parse(&name, None).is_err());
        let err = AbiType::parse(&name, None).unwrap_err();
        prop_assert!(err.is_unsupported_type());
    }
}
