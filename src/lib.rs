//! # SenML - Sensor Measurement Lists for Rust
//!
//! An implementation of the [SenML](https://tools.ietf.org/html/rfc8428) data
//! model: packs of sensor records that share a name prefix, a time offset, a
//! unit or a value offset through "base" fields on earlier records.
//!
//! ## Features
//!
//! - **Normalization**: resolve base fields into self-contained records, sorted by time
//! - **Equality**: the SenML record and pack comparison rules
//! - **Time conversion**: between `time::OffsetDateTime` and SenML time, including relative times
//! - **Multiple formats**: JSON, XML and CBOR codecs behind cargo features
//! - **Builder pattern**: ergonomic construction of compact packs
//!
//! ## Quick Start
//!
//! ```rust
//! use senml::{PackBuilder, Unit};
//!
//! let pack = PackBuilder::new()
//!     .base_name("urn:dev:ow:10e2073a01080063")
//!     .base_time(1.320067464e9)
//!     .base_unit(Unit::RELATIVE_HUMIDITY)
//!     .add_value("", 20.0)
//!     .add_measurement("", 20.3, 60.0)
//!     .build();
//!
//! let normalized = pack.normalize();
//! assert_eq!(normalized.records[1].time, 1.320067524e9);
//! assert_eq!(normalized.records[1].unit, Unit::RELATIVE_HUMIDITY);
//! ```
//!
//! ## SenML Data Model
//!
//! A pack is an array of records, where each record can contain:
//! - **Base fields**: apply to this and later records (bn, bt, bu, bv, bs, bver)
//! - **Record fields**: individual measurements (n, u, v, vs, vb, vd, s, t, ut)

pub mod builder;
pub mod config;
pub mod error;
pub mod normalize;
pub mod pack;
pub mod record;
pub mod timestamp;
pub mod units;

#[cfg(feature = "json")]
pub mod json;

#[cfg(feature = "xml")]
pub mod xml;

#[cfg(feature = "cbor")]
pub mod cbor;

// Re-export main types
pub use builder::{PackBuilder, TimeSeriesBuilder};
pub use config::{NormalizeConfig, SumAttribute, XmlConfig};
pub use error::{Result, SenMLError};
pub use pack::{Pack, packs_equal};
pub use record::{Measurement, Record, records_equal};
pub use timestamp::{MAX_RELATIVE_TIME, from_senml_time, resolve_relative_time, to_senml_time};
pub use units::Unit;
