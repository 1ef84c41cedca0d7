//! SenML Record types and values

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{Result, Unit};

/// A SenML Record is a single measurement, a carrier of base fields, or both
///
/// Base fields (`bn`, `bt`, `bu`, `bv`, `bs`) apply to this record and every
/// following record of the same pack until another record overrides them.
/// Fields at their zero value are treated as absent and are never encoded;
/// the optional numeric and boolean fields keep "absent" and "zero" apart.
///
/// Decoding is lenient: several measurement fields may be set at once, and
/// [`Record::measurement`] picks one of them in a fixed priority order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Record {
    /// Base Name - prefix for the names of this and following records
    #[serde(rename = "bn", skip_serializing_if = "String::is_empty")]
    pub base_name: String,

    /// Base Time - added to the time of this and following records
    #[serde(rename = "bt", skip_serializing_if = "is_zero")]
    pub base_time: f64,

    /// Base Unit - used when a record has no unit of its own
    #[serde(rename = "bu", skip_serializing_if = "Unit::is_empty")]
    pub base_unit: Unit,

    /// Base Value - added to the numeric values of following records
    #[serde(rename = "bv", skip_serializing_if = "Option::is_none")]
    pub base_value: Option<f64>,

    /// Base Sum - added to the sums of following records
    #[serde(rename = "bs", skip_serializing_if = "Option::is_none")]
    pub base_sum: Option<f64>,

    /// Base Version - format version, only meaningful on the first record
    #[serde(rename = "bver", skip_serializing_if = "is_zero_version")]
    pub version: i32,

    /// Name - appended to the base name
    #[serde(rename = "n", skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Unit - overrides the base unit when set
    #[serde(rename = "u", skip_serializing_if = "Unit::is_empty")]
    pub unit: Unit,

    /// Time - offset added to the base time
    #[serde(rename = "t", skip_serializing_if = "is_zero")]
    pub time: f64,

    /// Update Time - maximum time before the next update is expected
    #[serde(rename = "ut", skip_serializing_if = "is_zero")]
    pub update_time: f64,

    /// Value - numeric measurement, added to the base value
    #[serde(rename = "v", skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,

    /// String Value
    #[serde(rename = "vs", skip_serializing_if = "String::is_empty")]
    pub string_value: String,

    /// Data Value - opaque binary, base64 in text encodings
    #[serde(rename = "vd", skip_serializing_if = "Vec::is_empty", with = "data_value")]
    pub data_value: Vec<u8>,

    /// Boolean Value
    #[serde(rename = "vb", skip_serializing_if = "Option::is_none")]
    pub bool_value: Option<bool>,

    /// Sum - integrated value over time, added to the base sum
    #[serde(rename = "s", skip_serializing_if = "Option::is_none")]
    pub sum: Option<f64>,
}

/// The single measurement a record carries
#[derive(Debug, Clone, PartialEq)]
pub enum Measurement {
    /// Numeric value (`v`)
    Value(f64),
    /// Boolean value (`vb`)
    Bool(bool),
    /// String value (`vs`)
    String(String),
    /// Binary data (`vd`)
    Data(Vec<u8>),
    /// Integrated sum (`s`)
    Sum(f64),
}

fn is_zero(v: &f64) -> bool {
    *v == 0.0
}

fn is_zero_version(v: &i32) -> bool {
    *v == 0
}

impl Record {
    /// Create a new empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a record with a numeric value
    pub fn with_value<S: Into<String>>(name: S, value: f64) -> Self {
        Self {
            name: name.into(),
            value: Some(value),
            ..Default::default()
        }
    }

    /// Create a record with a string value
    pub fn with_string_value<S: Into<String>, V: Into<String>>(name: S, value: V) -> Self {
        Self {
            name: name.into(),
            string_value: value.into(),
            ..Default::default()
        }
    }

    /// Create a record with a boolean value
    pub fn with_bool_value<S: Into<String>>(name: S, value: bool) -> Self {
        Self {
            name: name.into(),
            bool_value: Some(value),
            ..Default::default()
        }
    }

    /// Create a record with binary data
    pub fn with_data_value<S: Into<String>>(name: S, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data_value: data,
            ..Default::default()
        }
    }

    /// Set the name of this record
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    /// Set the unit for this record
    pub fn with_unit<U: Into<Unit>>(mut self, unit: U) -> Self {
        self.unit = unit.into();
        self
    }

    /// Set the time for this record
    pub fn with_time(mut self, time: f64) -> Self {
        self.time = time;
        self
    }

    /// Set the update time for this record
    pub fn with_update_time(mut self, ut: f64) -> Self {
        self.update_time = ut;
        self
    }

    /// Set the sum for this record
    pub fn with_sum(mut self, sum: f64) -> Self {
        self.sum = Some(sum);
        self
    }

    pub fn with_base_name<S: Into<String>>(mut self, base_name: S) -> Self {
        self.base_name = base_name.into();
        self
    }

    pub fn with_base_time(mut self, base_time: f64) -> Self {
        self.base_time = base_time;
        self
    }

    pub fn with_base_unit<U: Into<Unit>>(mut self, base_unit: U) -> Self {
        self.base_unit = base_unit.into();
        self
    }

    pub fn with_base_value(mut self, base_value: f64) -> Self {
        self.base_value = Some(base_value);
        self
    }

    pub fn with_base_sum(mut self, base_sum: f64) -> Self {
        self.base_sum = Some(base_sum);
        self
    }

    pub fn with_version(mut self, version: i32) -> Self {
        self.version = version;
        self
    }

    /// The measurement this record carries, if any.
    ///
    /// When several measurement fields are set the first present one wins,
    /// in this order: `v`, `vb`, `vs`, `vd`, `s`.
    pub fn measurement(&self) -> Option<Measurement> {
        if let Some(v) = self.value {
            Some(Measurement::Value(v))
        } else if let Some(vb) = self.bool_value {
            Some(Measurement::Bool(vb))
        } else if !self.string_value.is_empty() {
            Some(Measurement::String(self.string_value.clone()))
        } else if !self.data_value.is_empty() {
            Some(Measurement::Data(self.data_value.clone()))
        } else {
            self.sum.map(Measurement::Sum)
        }
    }

    /// Check if this record carries a measurement
    pub fn has_measurement(&self) -> bool {
        self.value.is_some()
            || self.bool_value.is_some()
            || !self.string_value.is_empty()
            || !self.data_value.is_empty()
            || self.sum.is_some()
    }

    /// Replace every measurement field with `measurement`
    pub fn set_measurement(&mut self, measurement: Measurement) {
        self.clear_measurement();
        match measurement {
            Measurement::Value(v) => self.value = Some(v),
            Measurement::Bool(vb) => self.bool_value = Some(vb),
            Measurement::String(vs) => self.string_value = vs,
            Measurement::Data(vd) => self.data_value = vd,
            Measurement::Sum(s) => self.sum = Some(s),
        }
    }

    fn clear_measurement(&mut self) {
        self.value = None;
        self.bool_value = None;
        self.string_value.clear();
        self.data_value.clear();
        self.sum = None;
    }

    /// The time of this record as a timestamp
    pub fn timestamp(&self) -> Result<OffsetDateTime> {
        crate::from_senml_time(self.time)
    }

    /// SenML record equality.
    ///
    /// All non-measurement fields must match exactly. Then the records are
    /// equal as soon as one measurement field is set on both sides with the
    /// same value; the remaining measurement fields are not looked at. Base
    /// value and base sum are not compared.
    pub fn equals(&self, other: &Record) -> bool {
        if self.base_name != other.base_name
            || self.base_time != other.base_time
            || self.base_unit != other.base_unit
            || self.version != other.version
            || self.name != other.name
            || self.unit != other.unit
            || self.time != other.time
            || self.update_time != other.update_time
        {
            return false;
        }

        if matches!((self.value, other.value), (Some(a), Some(b)) if a == b) {
            return true;
        }
        if !self.string_value.is_empty() && self.string_value == other.string_value {
            return true;
        }
        if matches!((self.bool_value, other.bool_value), (Some(a), Some(b)) if a == b) {
            return true;
        }
        if matches!((self.sum, other.sum), (Some(a), Some(b)) if a == b) {
            return true;
        }
        !self.data_value.is_empty() && self.data_value == other.data_value
    }
}

/// [`Record::equals`] with an absent side; two absent records are equal.
pub fn records_equal(a: Option<&Record>, b: Option<&Record>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.equals(b),
        (None, None) => true,
        _ => false,
    }
}

impl From<Measurement> for Record {
    fn from(measurement: Measurement) -> Self {
        let mut record = Record::default();
        record.set_measurement(measurement);
        record
    }
}

/// Base64 text form of `vd`
pub(crate) mod data_value {
    use base64::Engine;
    use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD, URL_SAFE_NO_PAD};
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn encode(data: &[u8]) -> String {
        STANDARD.encode(data)
    }

    /// Accepts the standard and URL-safe alphabets, with or without padding
    pub fn decode(text: &str) -> Result<Vec<u8>, base64::DecodeError> {
        let trimmed = text.trim().trim_end_matches('=');
        if trimmed.contains(['-', '_']) {
            URL_SAFE_NO_PAD.decode(trimmed)
        } else {
            STANDARD_NO_PAD.decode(trimmed)
        }
    }

    pub fn serialize<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&encode(data))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(text) => decode(&text).map_err(de::Error::custom),
            None => Ok(Vec::new()),
        }
    }
}
