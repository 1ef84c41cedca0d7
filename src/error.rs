//! Error types for SenML operations

use thiserror::Error;

/// Result type alias for SenML operations
pub type Result<T> = std::result::Result<T, SenMLError>;

/// Errors that can occur while encoding, decoding or converting SenML data
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SenMLError {
    /// A field carried a value that does not parse into its type
    #[error("Invalid value for field '{field}': {value}")]
    InvalidFieldValue { field: String, value: String },

    /// An encoder failed
    #[error("Serialization error: {message}")]
    SerializationError { message: String },

    /// The input is not a well-formed SenML document
    #[error("Deserialization error: {message}")]
    DeserializationError { message: String },

    /// A SenML time that no timestamp can represent
    #[error("Time error: {message}")]
    TimeError { message: String },
}

impl SenMLError {
    pub fn invalid_field_value<F: Into<String>, V: Into<String>>(field: F, value: V) -> Self {
        Self::InvalidFieldValue {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn serialization<S: Into<String>>(message: S) -> Self {
        Self::SerializationError {
            message: message.into(),
        }
    }

    pub fn deserialization<S: Into<String>>(message: S) -> Self {
        Self::DeserializationError {
            message: message.into(),
        }
    }

    pub fn time<S: Into<String>>(message: S) -> Self {
        Self::TimeError {
            message: message.into(),
        }
    }
}

#[cfg(feature = "cbor")]
impl From<ciborium::de::Error<std::io::Error>> for SenMLError {
    fn from(err: ciborium::de::Error<std::io::Error>) -> Self {
        Self::deserialization(err.to_string())
    }
}

#[cfg(feature = "cbor")]
impl From<ciborium::ser::Error<std::io::Error>> for SenMLError {
    fn from(err: ciborium::ser::Error<std::io::Error>) -> Self {
        Self::serialization(err.to_string())
    }
}

impl From<time::error::ComponentRange> for SenMLError {
    fn from(err: time::error::ComponentRange) -> Self {
        Self::time(err.to_string())
    }
}
