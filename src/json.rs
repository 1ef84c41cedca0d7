//! JSON serialization support for SenML
//!
//! A pack is a JSON array of objects keyed by the short SenML labels
//! (`bn bt bu bv bs bver n u t ut v vs vd vb s`). Fields at their zero or
//! absent value are left out.
//!
//! Numbers are written by `serde_json`, so whole floats keep a fraction
//! (`20.0`, `-5.0`). Readers take `20` and `20.0` alike. JSON has no NaN or
//! infinity: encoding a record with a non-finite number fails instead of
//! writing `null`. An object that repeats a key is rejected on decode.

use crate::{Pack, Record, Result, SenMLError};

impl Pack {
    /// Serialize to a compact JSON string
    pub fn to_json(&self) -> Result<String> {
        self.check_finite()?;
        serde_json::to_string(self).map_err(|e| SenMLError::serialization(e.to_string()))
    }

    /// Serialize to pretty JSON string
    pub fn to_json_pretty(&self) -> Result<String> {
        self.check_finite()?;
        serde_json::to_string_pretty(self).map_err(|e| SenMLError::serialization(e.to_string()))
    }

    /// Serialize SenML pack to JSON bytes
    pub fn to_json_bytes(&self) -> Result<Vec<u8>> {
        self.check_finite()?;
        serde_json::to_vec(self).map_err(|e| SenMLError::serialization(e.to_string()))
    }

    fn check_finite(&self) -> Result<()> {
        for (index, record) in self.records.iter().enumerate() {
            if let Some((field, value)) = non_finite_field(record) {
                tracing::debug!(index, field, "refusing to encode non-finite number as JSON");
                return Err(SenMLError::serialization(format!(
                    "record {index}: unsupported value {value} for field '{field}'"
                )));
            }
        }
        Ok(())
    }

    /// Deserialize from JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_json_bytes(json.as_bytes())
    }

    /// Deserialize SenML pack from JSON bytes
    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| {
            tracing::debug!(error = %e, "failed to decode SenML JSON");
            SenMLError::deserialization(e.to_string())
        })
    }
}

/// First number of `record` that JSON cannot represent
fn non_finite_field(record: &Record) -> Option<(&'static str, f64)> {
    [
        ("bt", Some(record.base_time)),
        ("bv", record.base_value),
        ("bs", record.base_sum),
        ("t", Some(record.time)),
        ("ut", Some(record.update_time)),
        ("v", record.value),
        ("s", record.sum),
    ]
    .into_iter()
    .find_map(|(field, value)| value.filter(|v| !v.is_finite()).map(|v| (field, v)))
}
