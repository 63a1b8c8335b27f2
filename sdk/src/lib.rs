//! pblite
//!
//! Runtime support for pblite, the positional JSON encoding of Protocol
//! Buffers messages: a message is a JSON array in which the value at index
//! `i` belongs to the field numbered `i + 1`.
//!
//! Code produced by `pblite-compiler` implements the [`Message`] and
//! [`Enum`] traits and calls the `read_*` primitives here from its
//! positional dispatch.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde_json::Value;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PbliteError>;

#[derive(Debug, Error)]
pub enum PbliteError {
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("message \"{name}\" is invalid")]
    InvalidMessage {
        name:   String,
        source: Box<PbliteError>,
    },

    #[error("field {number} is invalid")]
    InvalidField {
        number: usize,
        source: Box<PbliteError>,
    },

    #[error("expected {expected} value but got '{actual}'")]
    ExpectedValue {
        expected: &'static str,
        actual:   Value,
    },
}

fn expected_value(expected: &'static str, actual: &Value) -> PbliteError {
    PbliteError::ExpectedValue {
        expected,
        actual: actual.clone(),
    }
}

fn invalid_message(name: String, source: PbliteError) -> PbliteError {
    PbliteError::InvalidMessage {
        name,
        source: Box::new(source),
    }
}

/// A decodable pblite message.
///
/// `set_field` is keyed by the zero-based wire position, i.e. the declared
/// field number minus one. Positions without a matching field must be
/// ignored so that payloads from newer schema revisions still decode.
pub trait Message: Sized + Default {
    fn get_name(&self) -> &str;

    fn set_field(&mut self, number: usize, field_value: &Value) -> Result<()>;

    fn from_vec(array: &[Value]) -> Result<Self> {
        let mut message = Self::default();
        for (number, field_value) in array.iter().enumerate() {
            if let Err(err) = message.set_field(number, field_value) {
                let name = message.get_name().to_owned();
                return Err(invalid_message(
                    name,
                    PbliteError::InvalidField {
                        number,
                        source: Box::new(err),
                    },
                ));
            }
        }
        Ok(message)
    }

    fn from_pblite(text: &str) -> Result<Self> {
        serde_json::from_str::<Value>(text)
            .map_err(PbliteError::from)
            .and_then(|value| read_message(&value))
            .map_err(|err| match err {
                err @ PbliteError::InvalidMessage { .. } => err,
                err => invalid_message(Self::default().get_name().to_owned(), err),
            })
    }
}

/// A decodable pblite enum. Wire numbers without a declared variant map to
/// the first declared variant, so the conversion can never fail.
pub trait Enum: Sized {
    fn from_u32(value: u32) -> Self;
}

pub fn read_string(value: &Value) -> Result<String> {
    value
        .as_str()
        .ok_or_else(|| expected_value("string", value))
        .map(|s| s.to_owned())
}

/// Accepts JSON booleans as well as the 0/1 numbers Hangouts payloads use.
pub fn read_bool(value: &Value) -> Result<bool> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::Number(_) => match value.as_u64() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(expected_value("0 or 1", value)),
        },
        _ => Err(expected_value("bool", value)),
    }
}

pub fn read_enum<E: Enum>(value: &Value) -> Result<E> {
    Ok(E::from_u32(read_uint32(value)?))
}

pub fn read_uint32(value: &Value) -> Result<u32> {
    value
        .as_u64()
        .ok_or_else(|| expected_value("u64", value))
        .and_then(|n| u32::try_from(n).map_err(|_| expected_value("u32", value)))
}

/// uint64 may arrive as a decimal string since JavaScript numbers lack the
/// precision for it.
pub fn read_uint64(value: &Value) -> Result<u64> {
    match value {
        Value::Number(n) => n.as_u64().ok_or_else(|| expected_value("u64", value)),
        Value::String(s) => s.parse::<u64>().map_err(|_| expected_value("u64", value)),
        _ => Err(expected_value("number or string", value)),
    }
}

pub fn read_double(value: &Value) -> Result<f64> {
    value.as_f64().ok_or_else(|| expected_value("f64", value))
}

/// bytes fields are base64 strings on the wire.
pub fn read_bytes(value: &Value) -> Result<Vec<u8>> {
    value
        .as_str()
        .ok_or_else(|| expected_value("string", value))
        .and_then(|s| BASE64.decode(s).map_err(|_| expected_value("base64", value)))
}

pub fn read_message<M: Message>(value: &Value) -> Result<M> {
    value
        .as_array()
        .ok_or_else(|| expected_value("array", value))
        .and_then(|vec| M::from_vec(vec))
}

/// Reader for repeated fields. `null` means the field is absent, which is
/// distinct from an empty array.
pub fn read_array<A>(
    value: &Value,
    read_elem: &dyn Fn(&Value) -> Result<A>,
) -> Result<Option<Vec<A>>> {
    match value {
        Value::Array(vec) => Ok(Some(vec.iter().map(read_elem).collect::<Result<_>>()?)),
        Value::Null => Ok(None),
        _ => Err(expected_value("array", value)),
    }
}

/// Reader for singular fields. `null` means the field is absent.
pub fn read_optional<A>(
    value: &Value,
    read_inner: &dyn Fn(&Value) -> Result<A>,
) -> Result<Option<A>> {
    match value {
        Value::Null => Ok(None),
        value => Ok(Some(read_inner(value)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    // Hand-written copies of what pblitec emits, so the produced contract is
    // pinned here next to the primitives it calls.

    #[derive(Debug, Default, PartialEq, Clone, Serialize)]
    struct I18nData {
        #[serde(skip_serializing_if = "Option::is_none")]
        #[serde(rename = "region_code")]
        region_code: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        #[serde(rename = "is_valid")]
        is_valid: Option<bool>,
        #[serde(skip_serializing_if = "Option::is_none")]
        #[serde(rename = "country_code")]
        country_code: Option<u32>,
    }
    impl Message for I18nData {
        fn get_name(&self) -> &str {
            "I18nData"
        }
        fn set_field(&mut self, number: usize, field_value: &Value) -> Result<()> {
            match number {
                0 => self.region_code = read_optional(field_value, &read_string)?,
                1 => self.is_valid = read_optional(field_value, &read_bool)?,
                2 => self.country_code = read_optional(field_value, &read_uint32)?,
                _ => {}
            };
            Ok(())
        }
    }

    #[derive(Debug, Default, PartialEq, Clone, Serialize)]
    struct PhoneNumber {
        #[serde(rename = "e164")]
        e164: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        #[serde(rename = "i18n_data")]
        i18n_data: Option<I18nData>,
    }
    impl Message for PhoneNumber {
        fn get_name(&self) -> &str {
            "PhoneNumber"
        }
        fn set_field(&mut self, number: usize, field_value: &Value) -> Result<()> {
            match number {
                0 => self.e164 = read_optional(field_value, &read_string)?.unwrap_or_default(),
                1 => self.i18n_data = read_optional(field_value, &read_message)?,
                _ => {}
            };
            Ok(())
        }
    }

    #[derive(Debug, Default, PartialEq, Clone, Serialize)]
    enum EventType {
        #[default]
        EventTypeUnknown,
        EventTypeCall,
    }
    impl Enum for EventType {
        fn from_u32(value: u32) -> Self {
            match value {
                0 => EventType::EventTypeUnknown,
                1 => EventType::EventTypeCall,
                _ => EventType::EventTypeUnknown,
            }
        }
    }

    // First declared value is not 0; unknown numbers (including 0) must still
    // fall back to it.
    #[derive(Debug, Default, PartialEq, Clone, Serialize)]
    enum LegacyCode {
        #[default]
        LegacyFive,
        LegacySix,
    }
    impl Enum for LegacyCode {
        fn from_u32(value: u32) -> Self {
            match value {
                5 => LegacyCode::LegacyFive,
                6 => LegacyCode::LegacySix,
                _ => LegacyCode::LegacyFive,
            }
        }
    }

    #[derive(Debug, Default, PartialEq, Clone, Serialize)]
    struct Event {
        #[serde(skip_serializing_if = "Option::is_none")]
        #[serde(rename = "latency")]
        latency: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        #[serde(rename = "timestamp")]
        timestamp: Option<u64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        #[serde(rename = "payload")]
        payload: Option<Vec<u8>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        #[serde(rename = "type")]
        type_pb: Option<EventType>,
        #[serde(skip_serializing_if = "Option::is_none")]
        #[serde(rename = "acks")]
        acks: Option<Vec<bool>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        #[serde(rename = "numbers")]
        numbers: Option<Vec<PhoneNumber>>,
    }
    impl Message for Event {
        fn get_name(&self) -> &str {
            "Event"
        }
        fn set_field(&mut self, number: usize, field_value: &Value) -> Result<()> {
            match number {
                0 => self.latency = read_optional(field_value, &read_double)?,
                1 => self.timestamp = read_optional(field_value, &read_uint64)?,
                2 => self.payload = read_optional(field_value, &read_bytes)?,
                3 => self.type_pb = read_optional(field_value, &read_enum)?,
                4 => self.acks = read_array(field_value, &read_bool)?,
                5 => self.numbers = read_array(field_value, &read_message)?,
                _ => {}
            };
            Ok(())
        }
    }

    #[test]
    fn decodes_nested_message() {
        let phone = PhoneNumber::from_pblite("[\"16067624137\",[\"CA\", 1, 123]]").unwrap();
        assert_eq!(
            phone,
            PhoneNumber {
                e164:      "16067624137".to_owned(),
                i18n_data: Some(I18nData {
                    region_code:  Some("CA".to_owned()),
                    is_valid:     Some(true),
                    country_code: Some(123),
                }),
            }
        );
    }

    #[test]
    fn required_field_defaults_on_null() {
        let phone = PhoneNumber::from_pblite("[null,[\"CA\", 1, 123]]").unwrap();
        assert_eq!(phone.e164, "");
        assert!(phone.i18n_data.is_some());
    }

    #[test]
    fn empty_array_yields_defaults() {
        let data = I18nData::from_pblite("[]").unwrap();
        assert_eq!(data, I18nData::default());
    }

    #[test]
    fn unknown_positions_are_ignored() {
        let data = I18nData::from_pblite("[null, null, null, 42, \"future\"]").unwrap();
        assert_eq!(data, I18nData::default());
    }

    #[test]
    fn absent_repeated_is_distinct_from_empty() {
        let absent = Event::from_pblite("[null, null, null, null, null]").unwrap();
        assert_eq!(absent.acks, None);

        let empty = Event::from_pblite("[null, null, null, null, []]").unwrap();
        assert_eq!(empty.acks, Some(vec![]));
    }

    #[test]
    fn repeated_fields_collect_in_order() {
        let event =
            Event::from_pblite("[null, null, null, null, [1, 0, true], [[\"1\"], [\"2\"]]]")
                .unwrap();
        assert_eq!(event.acks, Some(vec![true, false, true]));
        let numbers = event.numbers.unwrap();
        assert_eq!(numbers[0].e164, "1");
        assert_eq!(numbers[1].e164, "2");
    }

    #[test]
    fn uint64_accepts_number_and_string() {
        let event = Event::from_pblite("[null, 64]").unwrap();
        assert_eq!(event.timestamp, Some(64));
        let event = Event::from_pblite("[null, \"9007199254740993\"]").unwrap();
        assert_eq!(event.timestamp, Some(9007199254740993));
    }

    #[test]
    fn bytes_decode_from_base64() {
        let event = Event::from_pblite("[null, null, \"AAEC\"]").unwrap();
        assert_eq!(event.payload, Some(vec![0, 1, 2]));
        assert!(Event::from_pblite("[null, null, \"not base64!\"]").is_err());
    }

    #[test]
    fn enum_falls_back_to_first_declared_variant() {
        let event = Event::from_pblite("[null, null, null, 99]").unwrap();
        assert_eq!(event.type_pb, Some(EventType::EventTypeUnknown));

        assert_eq!(LegacyCode::from_u32(6), LegacyCode::LegacySix);
        assert_eq!(LegacyCode::from_u32(0), LegacyCode::LegacyFive);
        assert_eq!(LegacyCode::from_u32(u32::MAX), LegacyCode::LegacyFive);
    }

    #[test]
    fn bool_accepts_json_bool_and_numeric_forms() {
        let data = I18nData::from_pblite("[null, true]").unwrap();
        assert_eq!(data.is_valid, Some(true));
        let data = I18nData::from_pblite("[null, 0]").unwrap();
        assert_eq!(data.is_valid, Some(false));
        assert!(I18nData::from_pblite("[null, 2]").is_err());
        assert!(I18nData::from_pblite("[null, \"yes\"]").is_err());
    }

    #[test]
    fn non_array_input_reports_message_context() {
        let err = I18nData::from_pblite("1").unwrap_err();
        assert!(matches!(err, PbliteError::InvalidMessage { ref name, .. } if name == "I18nData"));

        let err = I18nData::from_pblite("[").unwrap_err();
        assert!(matches!(err, PbliteError::InvalidMessage { .. }));
    }

    #[test]
    fn field_errors_carry_position() {
        let err = I18nData::from_pblite("[null, null, \"\"]").unwrap_err();
        let PbliteError::InvalidMessage { name, source } = err else {
            panic!("expected InvalidMessage");
        };
        assert_eq!(name, "I18nData");
        assert!(matches!(*source, PbliteError::InvalidField { number: 2, .. }));
    }

    // The documented wire contract end to end: required bare field, optional
    // scalar, repeated scalars, positions = field number - 1.
    #[derive(Debug, Default, PartialEq, Clone, Serialize)]
    struct Subscription {
        #[serde(rename = "topic")]
        topic: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        #[serde(rename = "retries")]
        retries: Option<u32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        #[serde(rename = "flags")]
        flags: Option<Vec<bool>>,
    }
    impl Message for Subscription {
        fn get_name(&self) -> &str {
            "Subscription"
        }
        fn set_field(&mut self, number: usize, field_value: &Value) -> Result<()> {
            match number {
                0 => self.topic = read_optional(field_value, &read_string)?.unwrap_or_default(),
                1 => self.retries = read_optional(field_value, &read_uint32)?,
                2 => self.flags = read_array(field_value, &read_bool)?,
                _ => {}
            };
            Ok(())
        }
    }

    #[test]
    fn positional_contract_end_to_end() {
        let sub = Subscription::from_pblite("[null, 5, [true, false]]").unwrap();
        assert_eq!(
            sub,
            Subscription {
                topic:   String::new(),
                retries: Some(5),
                flags:   Some(vec![true, false]),
            }
        );

        let sub = Subscription::from_pblite("[\"updates\", null, null]").unwrap();
        assert_eq!(sub.topic, "updates");
        assert_eq!(sub.retries, None);
        assert_eq!(sub.flags, None);
    }
}
