//! Encoding and decoding values through the wire codec.

#![allow(clippy::unwrap_used, clippy::unreachable)]

mod common;

use std::collections::BTreeMap;

use common::{FailingCodec, JsonCellCodec, chain_to_json};
use num_bigint::BigInt;
use serde_json::json;
use tvm_abi::{
    AbiError, AbiParam, AbiType, Address, Cell, ExternalAddress, StackItem, StdAddress,
    TupleReader, Value, WireCodec,
};

fn ty(descriptor: &str) -> AbiType {
    AbiType::parse(descriptor, None).unwrap()
}

fn std_addr(byte: u8) -> Address {
    Address::from(StdAddress::new(0, [byte; 32]))
}

async fn round_trip(codec: &JsonCellCodec, ty: &AbiType, value: &Value) -> (StackItem, Value) {
    let wire = WireCodec::new(codec);
    let item = wire.encode("arg", ty, value).await.unwrap();
    let mut reader = TupleReader::new(vec![item.clone()]);
    let decoded = wire.decode("arg", ty, &mut reader).await.unwrap();
    assert_eq!(reader.remaining(), 0, "decode must consume exactly one item");
    (item, decoded)
}

#[tokio::test]
async fn test_bool_wire_convention() {
    let codec = JsonCellCodec::new();
    let (item, decoded) = round_trip(&codec, &AbiType::Bool, &Value::Bool(true)).await;
    assert_eq!(item, StackItem::Int(BigInt::from(-1)));
    assert_eq!(decoded, Value::Bool(true));

    let (item, decoded) = round_trip(&codec, &AbiType::Bool, &Value::Bool(false)).await;
    assert_eq!(item, StackItem::Int(BigInt::from(0)));
    assert_eq!(decoded, Value::Bool(false));
}

#[tokio::test]
async fn test_integers_are_range_checked() {
    let codec = JsonCellCodec::new();
    let wire = WireCodec::new(&codec);
    let err = wire
        .encode("x", &ty("uint8"), &Value::Int(BigInt::from(256)))
        .await
        .unwrap_err();
    assert!(matches!(err, AbiError::IntegerOutOfRange { .. }));

    let big: BigInt = (BigInt::from(1) << 255u32) + 7;
    let (item, decoded) = round_trip(&codec, &ty("uint256"), &Value::Int(big.clone())).await;
    assert_eq!(item, StackItem::Int(big.clone()));
    assert_eq!(decoded, Value::Int(big));
}

#[tokio::test]
async fn test_addresses_travel_as_slices() {
    let codec = JsonCellCodec::new();
    let address = std_addr(0xab);
    let (item, decoded) = round_trip(&codec, &ty("address"), &Value::Address(address.clone())).await;
    assert!(matches!(item, StackItem::Slice(_)));
    assert_eq!(decoded, Value::Address(address));

    let (item, decoded) = round_trip(&codec, &ty("address"), &Value::Null).await;
    let StackItem::Slice(cell) = item else {
        unreachable!("address must encode as a slice");
    };
    assert_eq!(cell.bit_len(), 2, "null address is addr_none");
    assert_eq!(decoded, Value::Null);

    let external = Address::from(ExternalAddress::from_compact(":ABC").unwrap());
    let (_, decoded) = round_trip(&codec, &ty("address"), &Value::Address(external.clone())).await;
    assert_eq!(decoded, Value::Address(external.clone()));

    let err = WireCodec::new(&codec)
        .encode("a", &ty("address_std"), &Value::Address(external))
        .await
        .unwrap_err();
    assert!(matches!(err, AbiError::TypeMismatch { .. }));
}

#[tokio::test]
async fn test_cell_passes_through() {
    let codec = JsonCellCodec::new();
    let (item, decoded) = round_trip(&codec, &AbiType::Cell, &Value::Cell(Cell::empty())).await;
    assert_eq!(item, StackItem::Cell(Cell::empty()));
    assert_eq!(decoded, Value::Cell(Cell::empty()));
    assert!(codec.encoded.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_string_and_bytes_use_the_codec() {
    let codec = JsonCellCodec::new();
    let (item, decoded) = round_trip(&codec, &AbiType::String, &Value::String("héllo".into())).await;
    let StackItem::Cell(cell) = item else {
        unreachable!("string must encode as a cell");
    };
    assert_eq!(chain_to_json(&cell).unwrap(), json!("héllo"));
    assert_eq!(decoded, Value::String("héllo".into()));

    let bytes = Value::Bytes(vec![0xde, 0xad, 0xbe, 0xef]);
    let (_, decoded) = round_trip(&codec, &ty("bytes"), &bytes).await;
    assert_eq!(decoded, bytes);

    let seen: Vec<String> = codec.encoded.lock().unwrap().iter().map(|p| p.ty.clone()).collect();
    assert_eq!(seen, vec!["string", "bytes"]);
}

#[tokio::test]
async fn test_map_with_address_keys_beyond_float_precision() {
    let codec = JsonCellCodec::new();
    let map_ty = ty("map(address,uint256)");
    let huge: BigInt = BigInt::from(1u64 << 53) + 1;
    let value = Value::Map(vec![
        (Value::Address(std_addr(1)), Value::Int(huge.clone())),
        (Value::Address(std_addr(2)), Value::Int(BigInt::from(5))),
    ]);
    let (item, decoded) = round_trip(&codec, &map_ty, &value).await;

    let StackItem::Cell(cell) = item else {
        unreachable!("map must encode as a cell");
    };
    let json = chain_to_json(&cell).unwrap();
    let key = std_addr(1).to_string();
    assert_eq!(json[key.as_str()], json!(huge.to_string()));
    assert_eq!(decoded, value);
}

#[tokio::test]
async fn test_array_wire_shape() {
    let codec = JsonCellCodec::new();
    let array_ty = ty("uint32[]");
    let value = Value::Array(vec![Value::Int(1.into()), Value::Int(2.into()), Value::Int(3.into())]);
    let (item, decoded) = round_trip(&codec, &array_ty, &value).await;

    let StackItem::Tuple(items) = item else {
        unreachable!("array must encode as a tuple");
    };
    assert_eq!(items.len(), 2);
    assert_eq!(items.first(), Some(&StackItem::Int(BigInt::from(3))));
    assert!(matches!(items.get(1), Some(StackItem::Cell(_))));
    assert_eq!(decoded, value);
}

#[tokio::test]
async fn test_optional_discriminant() {
    let codec = JsonCellCodec::new();
    let opt = ty("optional(uint32)");

    let (item, decoded) = round_trip(&codec, &opt, &Value::Null).await;
    assert_eq!(item, StackItem::Null);
    assert_eq!(decoded, Value::Null);

    let (item, decoded) = round_trip(&codec, &opt, &Value::Int(9.into())).await;
    assert_eq!(item, StackItem::Int(BigInt::from(9)));
    assert_eq!(decoded, Value::Int(9.into()));
}

#[tokio::test]
async fn test_optional_composite_keeps_following_items_aligned() {
    let codec = JsonCellCodec::new();
    let wire = WireCodec::new(&codec);
    let opt_map = ty("optional(map(uint8,bool))");
    let next = ty("uint16");

    let items = vec![
        wire.encode("m", &opt_map, &Value::Null).await.unwrap(),
        wire.encode("n", &next, &Value::Int(77.into())).await.unwrap(),
    ];
    let mut reader = TupleReader::new(items);
    assert_eq!(wire.decode("m", &opt_map, &mut reader).await.unwrap(), Value::Null);
    assert_eq!(wire.decode("n", &next, &mut reader).await.unwrap(), Value::Int(77.into()));
}

#[tokio::test]
async fn test_tuple_decodes_into_named_fields() {
    let codec = JsonCellCodec::new();
    let components = vec![
        AbiParam::new("owner", "address"),
        AbiParam::new("balance", "uint128"),
        AbiParam::new("tags", "string[]"),
    ];
    let tuple_ty = AbiType::parse("tuple", Some(&components)).unwrap();
    let value = Value::Tuple(BTreeMap::from([
        ("owner".to_string(), Value::Address(std_addr(9))),
        ("balance".to_string(), Value::Int(BigInt::from(1_000_000_000u64))),
        (
            "tags".to_string(),
            Value::Array(vec![Value::String("a".into()), Value::String("b".into())]),
        ),
    ]));
    let (item, decoded) = round_trip(&codec, &tuple_ty, &value).await;

    let StackItem::Tuple(items) = item else {
        unreachable!("tuple must encode as a tuple");
    };
    assert_eq!(items.len(), 3);
    assert_eq!(decoded, value);
    assert_eq!(decoded.field("balance"), Some(&Value::Int(BigInt::from(1_000_000_000u64))));
}

#[tokio::test]
async fn test_nested_array_of_optional_maps() {
    let codec = JsonCellCodec::new();
    let nested = ty("optional(map(address,uint64))[]");
    let value = Value::Array(vec![
        Value::Map(vec![(Value::Address(std_addr(3)), Value::Int(BigInt::from(u64::MAX)))]),
        Value::Null,
        Value::Map(vec![]),
    ]);
    let (_, decoded) = round_trip(&codec, &nested, &value).await;
    assert_eq!(decoded, value);
}

#[tokio::test]
async fn test_type_mismatch_is_reported() {
    let codec = JsonCellCodec::new();
    let err = WireCodec::new(&codec)
        .encode("x", &AbiType::Bool, &Value::Int(1.into()))
        .await
        .unwrap_err();
    assert!(matches!(err, AbiError::TypeMismatch { .. }));
}

#[tokio::test]
async fn test_decode_shape_mismatch() {
    let codec = JsonCellCodec::new();
    let mut reader = TupleReader::new(vec![StackItem::Cell(Cell::empty())]);
    let err = WireCodec::new(&codec)
        .decode("x", &ty("uint8"), &mut reader)
        .await
        .unwrap_err();
    assert!(matches!(err, AbiError::DecodeShapeMismatch { .. }));
}

#[tokio::test]
async fn test_collaborator_failures_pass_through() {
    let codec = FailingCodec;
    let wire = WireCodec::new(&codec);
    let err = wire
        .encode("s", &AbiType::String, &Value::String("x".into()))
        .await
        .unwrap_err();
    assert!(err.is_collaborator());
    assert_eq!(err.to_string(), "encode failed: codec offline");

    let mut reader = TupleReader::new(vec![StackItem::Cell(Cell::empty())]);
    let err = wire.decode("s", &AbiType::String, &mut reader).await.unwrap_err();
    assert!(err.is_collaborator());
}
