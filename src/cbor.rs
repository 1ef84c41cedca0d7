//! CBOR serialization support for SenML
//!
//! Records are CBOR maps keyed by the integer labels of RFC 8428. Data
//! values are byte strings. When decoding, the JSON text labels are
//! accepted as well.

use ciborium::value::{Integer, Value};

use crate::{Pack, Record, Result, SenMLError, Unit};

const BVER: i64 = -1;
const BN: i64 = -2;
const BT: i64 = -3;
const BU: i64 = -4;
const BV: i64 = -5;
const BS: i64 = -6;
const N: i64 = 0;
const U: i64 = 1;
const V: i64 = 2;
const VS: i64 = 3;
const VB: i64 = 4;
const S: i64 = 5;
const T: i64 = 6;
const UT: i64 = 7;
const VD: i64 = 8;

impl Pack {
    /// Serialize to CBOR bytes
    pub fn to_cbor(&self) -> Result<Vec<u8>> {
        let value = Value::Array(self.records.iter().map(record_to_value).collect());
        let mut buffer = Vec::new();
        ciborium::ser::into_writer(&value, &mut buffer)?;
        Ok(buffer)
    }

    /// Deserialize from CBOR bytes
    pub fn from_cbor(bytes: &[u8]) -> Result<Self> {
        decode_pack(bytes).inspect_err(|e| tracing::debug!(error = %e, "failed to decode SenML CBOR"))
    }
}

fn decode_pack(bytes: &[u8]) -> Result<Pack> {
    let value: Value = ciborium::de::from_reader(bytes)?;
    let Value::Array(items) = value else {
        return Err(SenMLError::deserialization("SenML CBOR must be an array"));
    };
    items.into_iter().map(value_to_record).collect()
}

fn entry(label: i64, value: Value) -> (Value, Value) {
    (Value::Integer(Integer::from(label)), value)
}

fn record_to_value(record: &Record) -> Value {
    let mut map = Vec::new();

    if !record.base_name.is_empty() {
        map.push(entry(BN, Value::Text(record.base_name.clone())));
    }
    if record.base_time != 0.0 {
        map.push(entry(BT, Value::Float(record.base_time)));
    }
    if !record.base_unit.is_empty() {
        map.push(entry(BU, Value::Text(record.base_unit.to_string())));
    }
    if let Some(bv) = record.base_value {
        map.push(entry(BV, Value::Float(bv)));
    }
    if let Some(bs) = record.base_sum {
        map.push(entry(BS, Value::Float(bs)));
    }
    if record.version != 0 {
        map.push(entry(BVER, Value::Integer(Integer::from(record.version))));
    }
    if !record.name.is_empty() {
        map.push(entry(N, Value::Text(record.name.clone())));
    }
    if !record.unit.is_empty() {
        map.push(entry(U, Value::Text(record.unit.to_string())));
    }
    if record.time != 0.0 {
        map.push(entry(T, Value::Float(record.time)));
    }
    if record.update_time != 0.0 {
        map.push(entry(UT, Value::Float(record.update_time)));
    }
    if let Some(v) = record.value {
        map.push(entry(V, Value::Float(v)));
    }
    if !record.string_value.is_empty() {
        map.push(entry(VS, Value::Text(record.string_value.clone())));
    }
    if !record.data_value.is_empty() {
        map.push(entry(VD, Value::Bytes(record.data_value.clone())));
    }
    if let Some(vb) = record.bool_value {
        map.push(entry(VB, Value::Bool(vb)));
    }
    if let Some(s) = record.sum {
        map.push(entry(S, Value::Float(s)));
    }

    Value::Map(map)
}

/// Integer label of a map key, translating the JSON text labels
fn label(key: &Value) -> Option<i64> {
    match key {
        Value::Integer(i) => i64::try_from(*i).ok(),
        Value::Text(text) => match text.as_str() {
            "bver" => Some(BVER),
            "bn" => Some(BN),
            "bt" => Some(BT),
            "bu" => Some(BU),
            "bv" => Some(BV),
            "bs" => Some(BS),
            "n" => Some(N),
            "u" => Some(U),
            "v" => Some(V),
            "vs" => Some(VS),
            "vb" => Some(VB),
            "s" => Some(S),
            "t" => Some(T),
            "ut" => Some(UT),
            "vd" => Some(VD),
            _ => None,
        },
        _ => None,
    }
}

fn value_to_record(value: Value) -> Result<Record> {
    let Value::Map(entries) = value else {
        return Err(SenMLError::deserialization("SenML CBOR record must be a map"));
    };

    let mut record = Record::default();
    for (key, value) in entries {
        match label(&key) {
            Some(BN) => record.base_name = text("bn", value)?,
            Some(BT) => record.base_time = number("bt", &value)?,
            Some(BU) => record.base_unit = Unit::from(text("bu", value)?),
            Some(BV) => record.base_value = Some(number("bv", &value)?),
            Some(BS) => record.base_sum = Some(number("bs", &value)?),
            Some(BVER) => record.version = integer("bver", &value)?,
            Some(N) => record.name = text("n", value)?,
            Some(U) => record.unit = Unit::from(text("u", value)?),
            Some(T) => record.time = number("t", &value)?,
            Some(UT) => record.update_time = number("ut", &value)?,
            Some(V) => record.value = Some(number("v", &value)?),
            Some(VS) => record.string_value = text("vs", value)?,
            Some(VD) => record.data_value = bytes("vd", value)?,
            Some(VB) => match value {
                Value::Bool(vb) => record.bool_value = Some(vb),
                other => return Err(invalid("vb", &other)),
            },
            Some(S) => record.sum = Some(number("s", &value)?),
            _ => {}
        }
    }
    Ok(record)
}

fn invalid(field: &str, value: &Value) -> SenMLError {
    SenMLError::invalid_field_value(field, format!("{value:?}"))
}

fn text(field: &str, value: Value) -> Result<String> {
    match value {
        Value::Text(text) => Ok(text),
        other => Err(invalid(field, &other)),
    }
}

fn number(field: &str, value: &Value) -> Result<f64> {
    match value {
        Value::Float(f) => Ok(*f),
        Value::Integer(i) => Ok(i128::from(*i) as f64),
        other => Err(invalid(field, other)),
    }
}

fn integer(field: &str, value: &Value) -> Result<i32> {
    match value {
        Value::Integer(i) => i32::try_from(*i).map_err(|_| invalid(field, value)),
        other => Err(invalid(field, other)),
    }
}

fn bytes(field: &str, value: Value) -> Result<Vec<u8>> {
    match value {
        Value::Bytes(bytes) => Ok(bytes),
        Value::Text(text) => crate::record::data_value::decode(&text)
            .map_err(|_| SenMLError::invalid_field_value(field, text.clone())),
        other => Err(invalid(field, &other)),
    }
}
