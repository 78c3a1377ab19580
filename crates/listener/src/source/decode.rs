// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Decoding of the `System.Events` storage value into [`EventRecord`]s.
//!
//! The storage value is a `Vec<EventRecord>` where each record is a composite
//! of `phase`, `event` and `topics`. `event` is the runtime event enum: its
//! variant is the pallet, whose single field is the pallet's own event enum.
//! The variant of that inner enum is the event name and its fields are the
//! event data.

use crate::consts::BYTES_TYPE_TAG;
use crate::types::{EventRecord, RawField};
use scale_info::{PortableRegistry, TypeDef, TypeDefPrimitive};
use scale_value::scale::decode_as_type;
use scale_value::{Composite, Value, ValueDef};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("SCALE decoding failed")]
    Scale(#[from] scale_value::scale::DecodeError),

    #[error("{remaining} trailing bytes after decoding events")]
    TrailingBytes { remaining: usize },

    #[error("Unexpected shape of event data: {0}")]
    UnexpectedShape(&'static str),
}

/// Decode the raw `System.Events` storage value of one block
///
/// `events_type_id` is the type of the storage entry as declared in the
/// runtime metadata, resolved through `registry`.
pub fn decode_events(
    bytes: &[u8],
    events_type_id: u32,
    registry: &PortableRegistry,
) -> Result<Vec<EventRecord>, DecodeError> {
    let mut cursor = bytes;
    let value = decode_as_type(&mut cursor, events_type_id, registry)?;

    if !cursor.is_empty() {
        return Err(DecodeError::TrailingBytes {
            remaining: cursor.len(),
        });
    }

    let ValueDef::Composite(records) = value.value else {
        return Err(DecodeError::UnexpectedShape("events are not a sequence"));
    };

    records
        .into_values()
        .map(|record| event_record(record, registry))
        .collect()
}

fn event_record(
    record: Value<u32>,
    registry: &PortableRegistry,
) -> Result<EventRecord, DecodeError> {
    let ValueDef::Composite(record_fields) = record.value else {
        return Err(DecodeError::UnexpectedShape("event record is not a composite"));
    };

    // EventRecord has 3 fields: phase (0), event (1), topics (2)
    let event = match record_fields {
        Composite::Named(fields) => fields
            .into_iter()
            .find(|(name, _)| name == "event")
            .map(|(_, value)| value),
        Composite::Unnamed(fields) => fields.into_iter().nth(1),
    }
    .ok_or(DecodeError::UnexpectedShape("event record has no event"))?;

    let ValueDef::Variant(pallet_variant) = event.value else {
        return Err(DecodeError::UnexpectedShape("runtime event is not a variant"));
    };

    let inner_event = pallet_variant
        .values
        .into_values()
        .next()
        .ok_or(DecodeError::UnexpectedShape("pallet variant has no event"))?;

    let ValueDef::Variant(event_variant) = inner_event.value else {
        return Err(DecodeError::UnexpectedShape("pallet event is not a variant"));
    };

    let fields = event_variant
        .values
        .into_values()
        .map(|field| RawField {
            type_tag: type_tag(registry, field.context),
            value: field.remove_context(),
        })
        .collect();

    Ok(EventRecord {
        module: pallet_variant.name.to_lowercase(),
        name: event_variant.name,
        fields,
    })
}

/// Short display name for a type, in the form used by polkadot.js type
/// definitions (`Bytes`, `u128`, `Option<Balance>`, `[u8; 32]` ...).
///
/// `Vec<u8>` is always tagged [`BYTES_TYPE_TAG`].
pub fn type_tag(registry: &PortableRegistry, type_id: u32) -> String {
    let Some(ty) = registry.resolve(type_id) else {
        return format!("Type{}", type_id);
    };

    match &ty.type_def {
        TypeDef::Sequence(seq) if is_u8(registry, seq.type_param.id) => BYTES_TYPE_TAG.to_string(),
        TypeDef::Sequence(seq) => format!("Vec<{}>", type_tag(registry, seq.type_param.id)),
        TypeDef::Array(array) => {
            format!("[{}; {}]", type_tag(registry, array.type_param.id), array.len)
        }
        TypeDef::Tuple(tuple) => {
            let fields: Vec<String> = tuple
                .fields
                .iter()
                .map(|field| type_tag(registry, field.id))
                .collect();
            format!("({})", fields.join(", "))
        }
        TypeDef::Primitive(primitive) => primitive_name(primitive).to_string(),
        TypeDef::Compact(compact) => {
            format!("Compact<{}>", type_tag(registry, compact.type_param.id))
        }
        TypeDef::BitSequence(_) => "BitVec".to_string(),
        TypeDef::Composite(_) | TypeDef::Variant(_) => {
            let Some(ident) = ty.path.ident() else {
                return format!("Type{}", type_id);
            };

            let params: Vec<String> = ty
                .type_params
                .iter()
                .filter_map(|param| param.ty.as_ref())
                .map(|param| type_tag(registry, param.id))
                .collect();

            if params.is_empty() {
                ident
            } else {
                format!("{}<{}>", ident, params.join(", "))
            }
        }
    }
}

fn is_u8(registry: &PortableRegistry, type_id: u32) -> bool {
    registry
        .resolve(type_id)
        .is_some_and(|ty| matches!(ty.type_def, TypeDef::Primitive(TypeDefPrimitive::U8)))
}

fn primitive_name(primitive: &TypeDefPrimitive) -> &'static str {
    match primitive {
        TypeDefPrimitive::Bool => "bool",
        TypeDefPrimitive::Char => "char",
        TypeDefPrimitive::Str => "Text",
        TypeDefPrimitive::U8 => "u8",
        TypeDefPrimitive::U16 => "u16",
        TypeDefPrimitive::U32 => "u32",
        TypeDefPrimitive::U64 => "u64",
        TypeDefPrimitive::U128 => "u128",
        TypeDefPrimitive::U256 => "u256",
        TypeDefPrimitive::I8 => "i8",
        TypeDefPrimitive::I16 => "i16",
        TypeDefPrimitive::I32 => "i32",
        TypeDefPrimitive::I64 => "i64",
        TypeDefPrimitive::I128 => "i128",
        TypeDefPrimitive::I256 => "i256",
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use parity_scale_codec::Encode;
    use scale_info::TypeInfo;

    #[derive(Encode, TypeInfo)]
    pub enum Phase {
        ApplyExtrinsic(u32),
        Finalization,
        Initialization,
    }

    #[derive(Encode, TypeInfo)]
    pub struct Ticker(pub [u8; 12]);

    #[derive(Encode, TypeInfo)]
    pub enum AssetEvent {
        Transfer(Vec<u8>, u128),
        AssetFrozen { ticker: Ticker, memo: Option<Vec<u8>> },
    }

    #[derive(Encode, TypeInfo)]
    pub enum IdentityEvent {
        DidCreated(u64, Vec<[u8; 32]>),
    }

    #[derive(Encode, TypeInfo)]
    pub enum RuntimeEvent {
        Asset(AssetEvent),
        Identity(IdentityEvent),
    }

    #[derive(Encode, TypeInfo)]
    pub struct TestEventRecord {
        pub phase: Phase,
        pub event: RuntimeEvent,
        pub topics: Vec<[u8; 32]>,
    }

    pub fn record(event: RuntimeEvent) -> TestEventRecord {
        TestEventRecord {
            phase: Phase::ApplyExtrinsic(1),
            event,
            topics: vec![],
        }
    }

    fn registry() -> (PortableRegistry, u32) {
        let mut registry = scale_info::Registry::new();
        let id = registry
            .register_type(&scale_info::meta_type::<Vec<TestEventRecord>>())
            .id;
        (registry.into(), id)
    }

    #[test]
    fn test_decode_events_in_order() {
        let (registry, events_type_id) = registry();
        let bytes = vec![
            record(RuntimeEvent::Identity(IdentityEvent::DidCreated(7, vec![]))),
            record(RuntimeEvent::Asset(AssetEvent::Transfer(b"Hello".to_vec(), 1000))),
            TestEventRecord {
                phase: Phase::Finalization,
                event: RuntimeEvent::Asset(AssetEvent::AssetFrozen {
                    ticker: Ticker(*b"ACME\0\0\0\0\0\0\0\0"),
                    memo: None,
                }),
                topics: vec![[0u8; 32]],
            },
        ]
        .encode();

        let events = decode_events(&bytes, events_type_id, &registry).unwrap();
        assert_eq!(events.len(), 3);

        assert_eq!(events[0].module, "identity");
        assert_eq!(events[0].name, "DidCreated");

        assert_eq!(events[1].module, "asset");
        assert_eq!(events[1].name, "Transfer");
        assert_eq!(
            events[1].fields,
            vec![
                RawField::new("Bytes", Value::from_bytes(b"Hello")),
                RawField::new("u128", Value::u128(1000)),
            ]
        );

        assert_eq!(events[2].name, "AssetFrozen");
        let tags: Vec<&str> = events[2].fields.iter().map(|f| f.type_tag.as_str()).collect();
        assert_eq!(tags, vec!["Ticker", "Option<Bytes>"]);
    }

    #[test]
    fn test_type_tags_of_nested_types() {
        let (registry, events_type_id) = registry();
        let bytes = vec![record(RuntimeEvent::Identity(IdentityEvent::DidCreated(
            1,
            vec![[1u8; 32]],
        )))]
        .encode();

        let events = decode_events(&bytes, events_type_id, &registry).unwrap();
        let tags: Vec<&str> = events[0].fields.iter().map(|f| f.type_tag.as_str()).collect();
        assert_eq!(tags, vec!["u64", "Vec<[u8; 32]>"]);
    }

    #[test]
    fn test_decode_empty_events() {
        let (registry, events_type_id) = registry();
        let bytes = Vec::<TestEventRecord>::new().encode();
        assert!(decode_events(&bytes, events_type_id, &registry).unwrap().is_empty());
    }

    #[test]
    fn test_decode_truncated_events_fails() {
        let (registry, events_type_id) = registry();
        let mut bytes =
            vec![record(RuntimeEvent::Asset(AssetEvent::Transfer(b"Hello".to_vec(), 1)))]
                .encode();
        bytes.truncate(bytes.len() - 4);

        assert!(matches!(
            decode_events(&bytes, events_type_id, &registry),
            Err(DecodeError::Scale(_))
        ));
    }

    #[test]
    fn test_decode_trailing_bytes_fails() {
        let (registry, events_type_id) = registry();
        let mut bytes = Vec::<TestEventRecord>::new().encode();
        bytes.extend_from_slice(&[0xff, 0xff]);

        assert!(matches!(
            decode_events(&bytes, events_type_id, &registry),
            Err(DecodeError::TrailingBytes { remaining: 2 })
        ));
    }

    #[test]
    fn test_unknown_type_id() {
        let (registry, _) = registry();
        assert_eq!(type_tag(&registry, 9999), "Type9999");
    }
}
